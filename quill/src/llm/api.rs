use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};

use crate::{
    config::ProviderConfig,
    error::{QuillError, Result},
    llm::message::{AiMessage, ChatMessage, MessageRole, ResponseMetadata, UsageMetadata},
};

pub(crate) const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub(crate) const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    model: String,
    temperature: f32,
    provider: &'static str,
}

/// Chat-completion client for any OpenAI-compatible endpoint.
///
/// Each call is a single attempt: failures surface to the caller as-is.
#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
    config: ApiConfig,
}

impl LlmApiClient {
    pub fn new(
        provider: &'static str,
        default_base_url: &str,
        config: &ProviderConfig,
    ) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(QuillError::Config(format!(
                "API key required for provider {provider}"
            )));
        }

        let api_config = ApiConfig {
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| default_base_url.to_string()),
            model: config.model.clone(),
            temperature: config.temperature,
            provider,
        };

        let openai_config = OpenAIConfig::new()
            .with_api_base(api_config.base_url.clone())
            .with_api_key(config.api_key.clone());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                QuillError::Config(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        // async-openai retries rate limits and 5xx responses on its own;
        // a zero elapsed-time budget turns that off.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            config: api_config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn temperature(&self) -> f32 {
        self.config.temperature
    }

    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<AiMessage> {
        if messages.is_empty() {
            return Err(QuillError::Validation(
                "At least one message is required".to_string(),
            ));
        }

        let request = self.build_request(messages)?;

        match self.client.chat().create(request).await {
            Ok(response) => self.extract_message(response),
            Err(error) => {
                if let Some(rate_limit_error) = Self::rate_limit_error(&error) {
                    return Err(rate_limit_error);
                }

                if let Some(auth_error) = Self::auth_error(&error) {
                    return Err(auth_error);
                }

                Err(Self::map_openai_error(error))
            }
        }
    }

    fn build_request(&self, messages: &[ChatMessage]) -> Result<CreateChatCompletionRequest> {
        let messages = messages
            .iter()
            .map(Self::convert_message)
            .collect::<Result<Vec<_>>>()?;

        CreateChatCompletionRequestArgs::default()
            .model(self.config.model.clone())
            .temperature(self.config.temperature)
            .messages(messages)
            .build()
            .map_err(|error| {
                QuillError::Validation(format!("Invalid LLM completion request: {error}"))
            })
    }

    fn convert_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
        let content = message.content.as_str();
        let converted: ChatCompletionRequestMessage = match message.role {
            MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(content)
                .build()
                .map_err(|error| QuillError::Validation(format!("Invalid system prompt: {error}")))?
                .into(),
            MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
                .content(content)
                .build()
                .map_err(|error| QuillError::Validation(format!("Invalid user prompt: {error}")))?
                .into(),
            MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(content)
                .build()
                .map_err(|error| {
                    QuillError::Validation(format!("Invalid assistant message: {error}"))
                })?
                .into(),
        };
        Ok(converted)
    }

    fn extract_message(&self, response: CreateChatCompletionResponse) -> Result<AiMessage> {
        let usage = response.usage.as_ref().map(|usage| UsageMetadata {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        });

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| QuillError::Llm("LLM response contained no choices".to_string()))?;

        let finish_reason = choice
            .finish_reason
            .and_then(|reason| serde_json::to_value(reason).ok())
            .and_then(|value| value.as_str().map(str::to_owned));

        let metadata = ResponseMetadata {
            model_name: response.model,
            provider: self.config.provider.to_string(),
            finish_reason,
        };

        let mut message = AiMessage::new(choice.message.content.unwrap_or_default(), metadata);
        message.id = Some(format!("run-{}", response.id));
        message.usage_metadata = usage;
        Ok(message)
    }

    fn rate_limit_error(error: &OpenAIError) -> Option<QuillError> {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) =>
            {
                Some(QuillError::LlmRateLimit { retry_after: None })
            }
            OpenAIError::ApiError(api_error) if Self::is_rate_limit_api_error(api_error) => {
                Some(QuillError::LlmRateLimit { retry_after: None })
            }
            _ => None,
        }
    }

    fn auth_error(error: &OpenAIError) -> Option<QuillError> {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.status() == Some(reqwest::StatusCode::UNAUTHORIZED)
                    || reqwest_error.status() == Some(reqwest::StatusCode::FORBIDDEN) =>
            {
                Some(QuillError::LlmAuth(reqwest_error.to_string()))
            }
            OpenAIError::ApiError(api_error) if Self::is_auth_api_error(api_error) => {
                Some(QuillError::LlmAuth(api_error.to_string()))
            }
            _ => None,
        }
    }

    fn is_rate_limit_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("rate limit")
            || message.contains("too many requests")
            || error_type.contains("rate_limit")
            || code.contains("rate_limit")
            || code == "insufficient_quota"
    }

    fn is_auth_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("unauthorized")
            || message.contains("forbidden")
            || message.contains("authentication")
            || message.contains("invalid api key")
            || code.contains("invalid_api_key")
            || code.contains("authentication")
            || error_type.contains("authentication")
    }

    fn map_openai_error(error: OpenAIError) -> QuillError {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.is_timeout() || reqwest_error.is_connect() =>
            {
                QuillError::LlmUnavailable(format!("LLM provider unreachable: {reqwest_error}"))
            }
            OpenAIError::Reqwest(reqwest_error) => {
                QuillError::Llm(format!("LLM request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                QuillError::Llm(format!("LLM API error: {api_error}"))
            }
            OpenAIError::JSONDeserialize(err) => {
                QuillError::Llm(format!("Failed to parse LLM response: {err}"))
            }
            OpenAIError::InvalidArgument(message) => QuillError::Validation(message),
            other => QuillError::Llm(other.to_string()),
        }
    }
}
