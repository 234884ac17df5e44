// Provider construction from configuration

use super::{ChatProvider, OpenAiCompatProvider, ProviderGateway};
use crate::config::ProviderEntry;

/// Build the gateway from configured entries, preserving priority order.
/// Unknown provider kinds are skipped with a warning.
pub fn create_gateway(entries: &[ProviderEntry]) -> ProviderGateway {
    let mut providers: Vec<Box<dyn ChatProvider>> = Vec::new();

    for entry in entries {
        let built = match entry.provider.as_str() {
            "zhipu" => OpenAiCompatProvider::new_zhipu(entry.api_key.clone()),
            "openai" => OpenAiCompatProvider::new_openai(entry.api_key.clone()),
            other => {
                tracing::warn!(provider = %other, "Unknown provider kind, skipping");
                continue;
            }
        };

        match built {
            Ok(mut provider) => {
                if let Some(model) = &entry.model {
                    provider = provider.with_model(model.clone());
                }
                if let Some(base_url) = &entry.base_url {
                    provider = provider.with_base_url(base_url.clone());
                }
                tracing::info!(
                    provider = %provider.name(),
                    model = %provider.default_model(),
                    "Configured provider tier"
                );
                providers.push(Box::new(provider));
            }
            Err(failure) => {
                tracing::warn!(
                    provider = %entry.provider,
                    failure = %failure,
                    "Failed to build provider, skipping"
                );
            }
        }
    }

    ProviderGateway::new(providers)
}
