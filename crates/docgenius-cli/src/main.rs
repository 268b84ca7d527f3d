//! DocGenius CLI - terminal front end for the DocGenius backend
//!
//! Upload PDFs, list them, ask questions about one, and run generation
//! templates, all through `docgenius-client`.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docgenius_client::{
    ApiClient, ChatSession, DocumentClient, DocumentStatus, OnFailure, Resolution, UploadFile,
    GENERATION_TEMPLATES,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LoggingConfig};

#[derive(Parser)]
#[command(name = "docgenius")]
#[command(about = "Chat with your PDFs and generate text from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL (overrides config and DOCGENIUS_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print raw JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend is up
    Health,

    /// Check whether text generation is configured on the backend
    Probe,

    /// Upload a PDF
    Upload {
        path: PathBuf,

        /// Poll until the backend finishes processing
        #[arg(long)]
        wait: bool,
    },

    /// List uploaded documents
    Documents {
        /// Fail on errors instead of printing an empty list
        #[arg(long)]
        strict: bool,
    },

    /// Ask one question about a document
    Ask {
        document_id: String,
        question: String,
    },

    /// Generate text, optionally through a template
    Generate {
        /// Template name or id (see `templates`)
        #[arg(short, long)]
        template: Option<String>,

        /// Input text, or `-` to read stdin
        text: String,
    },

    /// List the built-in generation templates
    Templates,

    /// Interactive question loop about a document (`/quit` to leave)
    Chat { document_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    // Built on demand so `templates` works without a configured backend
    let connect = || -> Result<ApiClient> {
        let client = ApiClient::new(config.client_config(cli.base_url.as_deref())?)?;
        tracing::debug!(base_url = client.config().base_url(), "Client ready");
        Ok(client)
    };

    match cli.command {
        Commands::Templates => {
            output::templates(GENERATION_TEMPLATES, cli.json)?;
        }
        Commands::Health => {
            let client = connect()?;
            let health = client.health().await?;
            output::health(&health, cli.json)?;
        }
        Commands::Probe => {
            let client = connect()?;
            let probe = client.probe_generation().await?;
            output::probe(&probe, cli.json)?;
        }
        Commands::Upload { path, wait } => {
            let client = connect()?;
            let file = UploadFile::from_path(&path).await?;
            let mut document = client.upload_document(file).await?;

            if wait {
                document = client
                    .wait_for_document(&document.id, client.config().poll)
                    .await?;
                if document.status == DocumentStatus::Processing {
                    tracing::warn!(document_id = %document.id, "Still processing after polling");
                }
            }

            output::document(&document, cli.json)?;
        }
        Commands::Documents { strict } => {
            let on_failure = if strict {
                OnFailure::Propagate
            } else {
                OnFailure::Empty
            };
            let documents = connect()?.list_documents(on_failure).await?;
            output::documents(&documents, cli.json)?;
        }
        Commands::Ask {
            document_id,
            question,
        } => {
            let message = connect()?.ask_question(&document_id, &question).await?;
            output::message(&message, cli.json)?;
        }
        Commands::Generate { template, text } => {
            let input = if text == "-" {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("Failed to read stdin")?;
                buf
            } else {
                text
            };

            let generated = connect()?.generate_text(&input, template.as_deref()).await?;
            println!("{}", generated);
        }
        Commands::Chat { document_id } => {
            chat(&connect()?, document_id, cli.json).await?;
        }
    }

    Ok(())
}

async fn chat(client: &ApiClient, document_id: String, json: bool) -> Result<()> {
    let session = ChatSession::new(document_id);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("Chatting about {}. Type /quit to leave.", session.document_id());

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question == "/quit" {
            break;
        }

        match session.ask(client, question).await {
            Resolution::Applied(message) => output::message(&message, json)?,
            Resolution::Stale => {}
            Resolution::Failed(e) => eprintln!("error: {}", e),
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
