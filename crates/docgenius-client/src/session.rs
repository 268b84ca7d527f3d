use crate::error::{ApiError, Result};
use crate::traits::DocumentClient;
use crate::types::Message;
use std::sync::{Mutex, MutexGuard};

/// Tag for one in-flight question; later tickets supersede earlier ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Outcome of resolving a ticket against the session
#[derive(Debug)]
pub enum Resolution {
    /// Answer appended to the conversation
    Applied(Message),
    /// A newer question was issued before this answer arrived; dropped
    Stale,
    /// Latest question failed; the conversation is left as it was
    Failed(ApiError),
}

#[derive(Debug, Default)]
struct SessionState {
    messages: Vec<Message>,
    last_issued: u64,
}

/// Conversation about a single document
///
/// Each question is tagged with a monotonic ticket. Only the answer to the
/// most recently issued question is applied; answers that land after a newer
/// question was asked are discarded so they cannot overwrite it.
#[derive(Debug)]
pub struct ChatSession {
    document_id: String,
    state: Mutex<SessionState>,
}

impl ChatSession {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Snapshot of the conversation, oldest first
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages.clone()
    }

    /// Record the user's question and issue a ticket for its answer
    pub fn begin(&self, question: impl Into<String>) -> Ticket {
        let mut state = self.lock();
        state.messages.push(Message::user(question));
        state.last_issued += 1;
        Ticket(state.last_issued)
    }

    pub fn resolve(&self, ticket: Ticket, result: Result<Message>) -> Resolution {
        let mut state = self.lock();

        if ticket.0 != state.last_issued {
            tracing::warn!(
                ticket = ticket.0,
                latest = state.last_issued,
                document_id = %self.document_id,
                "Discarding stale answer"
            );
            return Resolution::Stale;
        }

        match result {
            Ok(message) => {
                state.messages.push(message.clone());
                Resolution::Applied(message)
            }
            Err(e) => Resolution::Failed(e),
        }
    }

    /// Ask through `client` and apply the answer if it is still current
    pub async fn ask<C>(&self, client: &C, question: &str) -> Resolution
    where
        C: DocumentClient + ?Sized,
    {
        let ticket = self.begin(question);
        let result = client.ask_question(&self.document_id, question).await;
        self.resolve(ticket, result)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
