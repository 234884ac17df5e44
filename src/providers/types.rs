// Request and failure types shared by all providers

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{Message, Role};

/// Decoding temperature used for every provider call.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Maximum output length in tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 500;
/// Per-attempt request timeout.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Provider-agnostic completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Context window: system instruction, retained history, new user turn.
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Typed per-attempt failure. Internal to the gateway; never reaches the
/// end caller as an error.
#[derive(Debug, Clone, Error)]
pub enum ProviderFailure {
    /// Network failure, 5xx status, or a malformed response body.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The provider refused the request (4xx status).
    #[error("provider rejected request: {0}")]
    Rejected(String),

    /// The bounded per-attempt timeout elapsed.
    #[error("provider timed out")]
    Timeout,
}

/// One message on the chat-completions wire (no timestamp).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Request body for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatCompletionsBody {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Response body: only the fields this service reads.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionsResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: WireMessage,
}
