// Error taxonomy for the chat core
//
// Provider failures are deliberately not part of this enum: the gateway
// recovers them internally and the caller always gets a reply.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// User submitted blank text. No session mutation happens.
    #[error("message text is empty")]
    EmptyInput,

    /// Append or send targeted a session id the store does not know.
    /// Reads of unknown sessions are permissive and do not hit this.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// A fenced append found the session history longer than the writer
    /// observed at the start of its turn. The write is discarded.
    #[error("stale write fenced off for session {session_id}: expected {expected} messages, found {found}")]
    StaleWrite {
        session_id: String,
        expected: usize,
        found: usize,
    },

    /// The persistence collaborator is unreachable. Retryable.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Context window contract violation (`max_turns` must be >= 1).
    #[error("invalid context window: max_turns must be at least 1")]
    InvalidContextWindow,
}
