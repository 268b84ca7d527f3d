//! Typed client for the DocGenius backend
//!
//! Document upload and listing, question answering over an uploaded
//! document, and template-driven text generation. All calls go through one
//! request wrapper that normalizes failures into [`ApiError`].

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod templates;
pub mod traits;
pub mod types;
pub mod upload;

pub use client::{merge_headers, ApiClient, RequestBody, RequestOptions};
pub use config::{ClientConfig, PollConfig, BASE_URL_ENV};
pub use error::{ApiError, Result, NETWORK_ERROR_MESSAGE};
pub use session::{ChatSession, Resolution, Ticket};
pub use templates::{build_prompt, find_template, GENERATION_TEMPLATES};
pub use traits::{DocumentClient, OnFailure};
pub use types::{
    Citation, Document, DocumentStatus, GenerationProbe, GenerationTemplate, HealthStatus,
    Message, Role,
};
pub use upload::UploadFile;
