// Plain-text and JSON rendering for command results

use anyhow::Result;
use docgenius_client::{
    Document, DocumentStatus, GenerationProbe, GenerationTemplate, HealthStatus, Message,
};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn health(health: &HealthStatus, json: bool) -> Result<()> {
    if json {
        return print_json(health);
    }
    match &health.service {
        Some(service) => println!("{} ({})", health.status, service),
        None => println!("{}", health.status),
    }
    Ok(())
}

pub fn probe(probe: &GenerationProbe, json: bool) -> Result<()> {
    if json {
        return print_json(probe);
    }
    println!(
        "{} (generation key configured: {})",
        probe.status,
        if probe.gemini_key_configured { "yes" } else { "no" }
    );
    Ok(())
}

fn status_label(status: DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Processing => "processing",
        DocumentStatus::Indexed => "indexed",
        DocumentStatus::Error => "error",
    }
}

pub fn document(doc: &Document, json: bool) -> Result<()> {
    if json {
        return print_json(doc);
    }
    println!(
        "{}  {}  {} bytes  {} pages  {}  {}",
        doc.id,
        doc.name,
        doc.size,
        doc.page_count.unwrap_or(0),
        status_label(doc.status),
        doc.uploaded_at.format("%Y-%m-%d %H:%M"),
    );
    Ok(())
}

pub fn documents(docs: &[Document], json: bool) -> Result<()> {
    if json {
        return print_json(docs);
    }
    if docs.is_empty() {
        println!("No documents.");
    }
    for doc in docs {
        document(doc, false)?;
    }
    Ok(())
}

pub fn message(message: &Message, json: bool) -> Result<()> {
    if json {
        return print_json(message);
    }
    println!("{}", message.content);
    for citation in &message.citations {
        println!(
            "  [{} p.{}] {}",
            citation.document_name, citation.page_number, citation.snippet
        );
    }
    Ok(())
}

pub fn templates(templates: &[GenerationTemplate], json: bool) -> Result<()> {
    if json {
        return print_json(templates);
    }
    for t in templates {
        println!("{}  {:<16} {}", t.id, t.name, t.description);
    }
    Ok(())
}
