use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle of an uploaded document as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Processing,
    Indexed,
    Error,
}

impl DocumentStatus {
    /// `Indexed` and `Error` are final; only `Processing` can still change
    pub fn is_terminal(self) -> bool {
        !matches!(self, DocumentStatus::Processing)
    }
}

/// A document known to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub uploaded_at: DateTime<Utc>,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

/// Accepts RFC 3339, the naive ISO form the backend writes
/// (`datetime.now().isoformat()`, `T` or space separated) read as UTC, and
/// bare dates read as midnight UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid upload timestamp '{}'", raw))
    })
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Source reference attached to an assistant answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub document_id: String,
    pub document_name: String,
    pub page_number: u32,
    pub snippet: String,
}

/// One chat turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Locally authored message, stamped now
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), Vec::new())
    }

    pub fn assistant(content: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self::new(Role::Assistant, content.into(), citations)
    }

    fn new(role: Role, content: String, citations: Vec<Citation>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            citations,
            timestamp: Utc::now(),
        }
    }
}

/// Static generation preset: a prompt prefix plus display metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
    pub icon: &'static str,
}

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

/// `GET /gemini/_probe`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationProbe {
    pub status: String,
    #[serde(default)]
    pub gemini_key_configured: bool,
}

// ============================================================================
// WIRE SHAPES
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub document_id: String,
    #[serde(default)]
    pub page_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AskRequest<'a> {
    pub document_id: &'a str,
    pub question: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AskResponse {
    pub answer: String,
    #[serde(default, deserialize_with = "deserialize_citations")]
    pub citations: Vec<Citation>,
}

/// Citations are optional decoration on an answer: null or unrecognized
/// shapes yield an empty list instead of failing the whole response.
fn deserialize_citations<'de, D>(deserializer: D) -> Result<Vec<Citation>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring citations in unexpected shape");
            Vec::new()
        }),
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_document_from_backend_record() {
        let doc: Document = serde_json::from_value(json!({
            "id": "abc",
            "name": "Guide.pdf",
            "size": 245760,
            "uploadedAt": "2024-01-15T10:30:00.123456",
            "status": "indexed",
            "pageCount": 12
        }))
        .unwrap();

        assert_eq!(doc.id, "abc");
        assert_eq!(doc.status, DocumentStatus::Indexed);
        assert_eq!(doc.page_count, Some(12));
        assert_eq!(doc.uploaded_at.year(), 2024);
        assert_eq!(doc.uploaded_at.hour(), 10);
    }

    #[test]
    fn test_document_rfc3339_timestamp() {
        let ts = parse_timestamp("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 8);
    }

    #[test]
    fn test_naive_and_date_only_timestamps() {
        let ts = parse_timestamp("2024-01-15 10:30:00").unwrap();
        assert_eq!(ts.hour(), 10);

        let ts = parse_timestamp("2024-01-15").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 15));
        assert_eq!(ts.hour(), 0);
    }

    #[test]
    fn test_ask_response_citations_lenient() {
        let response: AskResponse =
            serde_json::from_value(json!({"answer": "42", "citations": null})).unwrap();
        assert_eq!(response.answer, "42");
        assert!(response.citations.is_empty());

        let response: AskResponse = serde_json::from_value(json!({
            "answer": "42",
            "citations": [{"document_id": "d", "page": 1}]
        }))
        .unwrap();
        assert!(response.citations.is_empty());
    }

    #[test]
    fn test_document_bad_timestamp_rejected() {
        let result: Result<Document, _> = serde_json::from_value(json!({
            "id": "abc",
            "name": "Guide.pdf",
            "size": 1,
            "uploadedAt": "yesterday",
            "status": "indexed"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_status_terminality() {
        assert!(!DocumentStatus::Processing.is_terminal());
        assert!(DocumentStatus::Indexed.is_terminal());
        assert!(DocumentStatus::Error.is_terminal());
    }

    #[test]
    fn test_message_ids_unique() {
        let a = Message::user("hi");
        let b = Message::user("hi");
        assert_ne!(a.id, b.id);
        assert_eq!(a.role, Role::User);
        assert!(a.citations.is_empty());
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), json!("assistant"));
    }
}
