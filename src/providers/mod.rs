// Text-completion providers
//
// Abstraction over the external completion APIs (Zhipu, OpenAI) plus the
// deterministic local responder, behind one gateway that never fails.

use async_trait::async_trait;

pub mod factory;
pub mod gateway;
pub mod openai;
pub mod responder;
pub mod types;

pub use factory::create_gateway;
pub use gateway::{GatewayReply, ProviderGateway, ReplySource};
pub use openai::OpenAiCompatProvider;
pub use types::{CompletionRequest, ProviderFailure};

/// A hosted text-completion capability.
///
/// One attempt per call; retry policy lives in the gateway, not here.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the context window and return the generated reply text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderFailure>;

    /// Provider name for logging (e.g. "zhipu", "openai").
    fn name(&self) -> &str;

    /// Model this provider generates with.
    fn default_model(&self) -> &str;
}
