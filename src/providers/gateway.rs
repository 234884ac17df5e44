// Provider gateway with automatic fallback
//
// Tries configured providers in priority order, one attempt each, then
// the deterministic responder. The gateway as a whole never fails; the
// worst case is the generic empathetic line.

use super::responder;
use super::types::CompletionRequest;
use super::ChatProvider;

/// Where a reply came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    /// A configured provider, by name.
    Provider(String),
    /// The deterministic local responder.
    Fallback,
}

/// Reply produced by the gateway.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub text: String,
    pub source: ReplySource,
}

/// A prioritized chain of providers terminated by the deterministic tier.
pub struct ProviderGateway {
    providers: Vec<Box<dyn ChatProvider>>,
}

impl ProviderGateway {
    /// Create a gateway with providers in priority order. An empty list
    /// is valid; every turn then falls through to the deterministic tier.
    pub fn new(providers: Vec<Box<dyn ChatProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Generate a reply for the given context window. `raw_user_text` is
    /// the untrimmed user message, which the deterministic tier keys on.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
        raw_user_text: &str,
    ) -> GatewayReply {
        for (idx, provider) in self.providers.iter().enumerate() {
            tracing::debug!(
                provider = %provider.name(),
                attempt = idx + 1,
                of = self.providers.len(),
                "Trying provider"
            );

            match provider.complete(request).await {
                Ok(text) if !text.trim().is_empty() => {
                    if idx > 0 {
                        tracing::info!(
                            provider = %provider.name(),
                            failed_attempts = idx,
                            "Provider succeeded after fallback"
                        );
                    }
                    return GatewayReply {
                        text,
                        source: ReplySource::Provider(provider.name().to_string()),
                    };
                }
                Ok(_) => {
                    tracing::warn!(
                        provider = %provider.name(),
                        "Provider returned an empty reply, falling through"
                    );
                }
                Err(failure) => {
                    tracing::warn!(
                        provider = %provider.name(),
                        failure = %failure,
                        "Provider attempt failed"
                    );
                }
            }
        }

        tracing::info!("All providers exhausted, using deterministic responder");
        GatewayReply {
            text: responder::respond(raw_user_text).to_string(),
            source: ReplySource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::types::ProviderFailure;
    use crate::session::Message;
    use async_trait::async_trait;

    struct MockProvider {
        name: String,
        should_fail: bool,
    }

    impl MockProvider {
        fn new(name: &str, should_fail: bool) -> Self {
            Self {
                name: name.to_string(),
                should_fail,
            }
        }
    }

    #[async_trait]
    impl ChatProvider for MockProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderFailure> {
            if self.should_fail {
                return Err(ProviderFailure::Unavailable(format!(
                    "mock provider {} down",
                    self.name
                )));
            }
            Ok(format!("reply from {}", self.name))
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn default_model(&self) -> &str {
            "mock-model"
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(vec![Message::system("sys"), Message::user("你好")])
    }

    #[tokio::test]
    async fn test_primary_succeeds() {
        let gateway = ProviderGateway::new(vec![
            Box::new(MockProvider::new("primary", false)),
            Box::new(MockProvider::new("secondary", false)),
        ]);

        let reply = gateway.complete(&request(), "你好").await;
        assert_eq!(reply.source, ReplySource::Provider("primary".to_string()));
        assert_eq!(reply.text, "reply from primary");
    }

    #[tokio::test]
    async fn test_falls_back_to_secondary() {
        let gateway = ProviderGateway::new(vec![
            Box::new(MockProvider::new("primary", true)),
            Box::new(MockProvider::new("secondary", false)),
        ]);

        let reply = gateway.complete(&request(), "你好").await;
        assert_eq!(reply.source, ReplySource::Provider("secondary".to_string()));
    }

    #[tokio::test]
    async fn test_all_providers_fail_uses_deterministic_tier() {
        let gateway = ProviderGateway::new(vec![
            Box::new(MockProvider::new("primary", true)),
            Box::new(MockProvider::new("secondary", true)),
        ]);

        let reply = gateway.complete(&request(), "你好").await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert!(!reply.text.is_empty());
    }

    #[tokio::test]
    async fn test_empty_gateway_still_replies() {
        let gateway = ProviderGateway::new(vec![]);

        let reply = gateway.complete(&request(), "我好累").await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert!(reply.text.contains("疲惫"));
    }
}
