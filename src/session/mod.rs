// Session and message model, plus the persistence seam
//
// The store exclusively owns the canonical history; every component reads
// through it and nothing caches a mutable copy across calls.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ChatError;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn in a conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Canonical per-session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl SessionRecord {
    pub fn new(id: String) -> Self {
        Self {
            id,
            title: None,
            created_at: Utc::now(),
            messages: Vec::new(),
        }
    }
}

/// Persistence collaborator, keyed by session id.
///
/// Contract:
/// - `append` to an unknown session fails with `SessionNotFound`.
/// - `read` of an unknown session returns an empty history.
/// - `delete` is idempotent.
/// - `append_fenced` commits only if the current history length matches
///   what the writer observed; a mismatch is a `StaleWrite`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new empty session and return its id.
    async fn create(&self) -> Result<String, ChatError>;

    /// Whether the session exists.
    async fn contains(&self, id: &str) -> Result<bool, ChatError>;

    /// Append messages to an existing session, in order, atomically.
    async fn append(&self, id: &str, messages: &[Message]) -> Result<(), ChatError>;

    /// Append with a fencing check on the observed message count.
    async fn append_fenced(
        &self,
        id: &str,
        expected_len: usize,
        messages: &[Message],
    ) -> Result<(), ChatError>;

    /// Read the full ordered history. Unknown sessions read as empty.
    async fn read(&self, id: &str) -> Result<Vec<Message>, ChatError>;

    /// Delete a session. Succeeds whether or not the id was present.
    async fn delete(&self, id: &str) -> Result<(), ChatError>;

    /// Number of live sessions, for the health surface.
    async fn session_count(&self) -> Result<usize, ChatError>;
}
