// OpenAI-compatible chat-completions provider
//
// Both configured tiers speak the same wire format: Zhipu's GLM endpoint
// and OpenAI's chat completions endpoint differ only in base URL and
// model name, so one implementation covers both.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::types::{
    ChatCompletionsBody, ChatCompletionsResponse, CompletionRequest, ProviderFailure, WireMessage,
    REQUEST_TIMEOUT_SECS,
};
use super::ChatProvider;

const ZHIPU_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone)]
pub struct OpenAiCompatProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
    provider_name: String,
}

impl OpenAiCompatProvider {
    /// Zhipu GLM provider (primary tier in the default config).
    pub fn new_zhipu(api_key: String) -> Result<Self, ProviderFailure> {
        Self::new(
            api_key,
            ZHIPU_BASE_URL.to_string(),
            "glm-4-flash".to_string(),
            "zhipu".to_string(),
        )
    }

    /// OpenAI provider (secondary tier in the default config).
    pub fn new_openai(api_key: String) -> Result<Self, ProviderFailure> {
        Self::new(
            api_key,
            OPENAI_BASE_URL.to_string(),
            "gpt-3.5-turbo".to_string(),
            "openai".to_string(),
        )
    }

    /// Provider with custom settings (also used to point tests at a mock
    /// server).
    pub fn new(
        api_key: String,
        base_url: String,
        default_model: String,
        provider_name: String,
    ) -> Result<Self, ProviderFailure> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderFailure::Unavailable(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url,
            default_model,
            provider_name,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Override the endpoint base URL (config override, mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn to_body(&self, request: &CompletionRequest) -> ChatCompletionsBody {
        ChatCompletionsBody {
            model: self.default_model.clone(),
            messages: request.messages.iter().map(WireMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderFailure> {
        let body = self.to_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(provider = %self.provider_name, model = %body.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderFailure::Timeout
                } else {
                    ProviderFailure::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let detail = format!("status {}: {}", status, error_body);
            return if status.is_client_error() {
                Err(ProviderFailure::Rejected(detail))
            } else {
                Err(ProviderFailure::Unavailable(detail))
            };
        }

        let parsed: ChatCompletionsResponse = response
            .json()
            .await
            .map_err(|e| ProviderFailure::Unavailable(format!("malformed response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderFailure::Unavailable("response contained no choices".to_string()))
    }

    fn name(&self) -> &str {
        &self.provider_name
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}
