use crate::config::PollConfig;
use crate::error::{ApiError, Result};
use crate::types::{Document, HealthStatus, Message};
use crate::upload::UploadFile;
use async_trait::async_trait;

/// What a read should do when the backend call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnFailure {
    /// Return the error to the caller
    #[default]
    Propagate,
    /// Log the error and resolve to an empty result
    Empty,
}

/// Operations offered by the DocGenius backend
///
/// [`crate::ApiClient`] is the HTTP implementation; the trait exists so that
/// callers such as [`crate::ChatSession`] can be driven by any backend.
#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// Liveness probe
    async fn health(&self) -> Result<HealthStatus>;

    /// Upload a file; the returned document is provisional (`Processing`)
    async fn upload_document(&self, file: UploadFile) -> Result<Document>;

    async fn list_documents(&self, on_failure: OnFailure) -> Result<Vec<Document>>;

    /// Ask a question about one document and get the assistant's answer
    async fn ask_question(&self, document_id: &str, question: &str) -> Result<Message>;

    /// Generate text, optionally prefixed by a template selected by name or id
    async fn generate_text(&self, input: &str, template: Option<&str>) -> Result<String>;

    /// Refresh a document's status from the backend's listing
    ///
    /// A document the listing does not (yet) contain is returned unchanged.
    async fn reconcile_document(&self, document: &Document) -> Result<Document> {
        let documents = self.list_documents(OnFailure::Propagate).await?;
        Ok(documents
            .into_iter()
            .find(|d| d.id == document.id)
            .unwrap_or_else(|| document.clone()))
    }

    /// Poll until the document reaches a terminal status
    ///
    /// Returns the last observed record when attempts run out, so callers
    /// must still check [`Document::status`].
    async fn wait_for_document(&self, document_id: &str, poll: PollConfig) -> Result<Document> {
        let attempts = poll.max_attempts.max(1);
        let mut last_seen = None;

        for attempt in 1..=attempts {
            let documents = self.list_documents(OnFailure::Propagate).await?;
            if let Some(doc) = documents.into_iter().find(|d| d.id == document_id) {
                if doc.status.is_terminal() {
                    return Ok(doc);
                }
                last_seen = Some(doc);
            }

            if attempt < attempts {
                tracing::debug!(document_id, attempt, "Document still processing, polling again");
                tokio::time::sleep(poll.interval).await;
            }
        }

        last_seen.ok_or_else(|| {
            ApiError::Unexpected(format!(
                "Document {} was not listed after {} attempts",
                document_id, attempts
            ))
        })
    }
}
