use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::config::{Config, ProviderConfig};
use crate::error::Result;
use crate::llm::api::{LlmApiClient, GROQ_BASE_URL, OPENAI_BASE_URL};
use crate::llm::message::{AiMessage, ChatMessage};

/// Hosted chat providers the service can bind routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Groq,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Groq => "groq",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAI => OPENAI_BASE_URL,
            Provider::Groq => GROQ_BASE_URL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured hosted model: provider identity, model name and temperature.
#[derive(Clone)]
pub struct ChatModel {
    provider: Provider,
    client: LlmApiClient,
}

impl fmt::Debug for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatModel")
            .field("provider", &self.provider)
            .field("model", &self.client.model())
            .field("temperature", &self.client.temperature())
            .finish()
    }
}

impl ChatModel {
    pub fn new(provider: Provider, config: &ProviderConfig) -> Result<Self> {
        let client = LlmApiClient::new(provider.as_str(), provider.default_base_url(), config)?;
        Ok(Self { provider, client })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn temperature(&self) -> f32 {
        self.client.temperature()
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub async fn invoke(&self, messages: &[ChatMessage]) -> Result<AiMessage> {
        self.client.chat(messages).await
    }

    pub async fn invoke_text(&self, prompt: &str) -> Result<AiMessage> {
        self.invoke(&[ChatMessage::user(prompt)]).await
    }
}

/// Which providers were usable at startup. Computed once, never refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderAvailability {
    pub openai: bool,
    pub groq: bool,
}

/// Models resolved at startup, ready to be wired into routes.
#[derive(Debug, Clone)]
pub struct ModelBindings {
    pub primary: ChatModel,
    /// Model behind the poem route: Groq when its probe passed, else `primary`.
    pub poem: ChatModel,
    pub availability: ProviderAvailability,
}

/// Build the primary model and decide the poem binding.
///
/// Errors only when the primary model cannot be constructed. Every secondary
/// provider failure degrades to the primary instead.
pub async fn resolve_bindings(config: &Config) -> Result<ModelBindings> {
    let primary = ChatModel::new(Provider::OpenAI, &config.openai)?;
    let secondary = probe_secondary(config.groq.as_ref(), config.probe.timeout()).await;

    let availability = ProviderAvailability {
        openai: true,
        groq: secondary.is_some(),
    };

    let poem = match secondary {
        Some(model) => {
            tracing::info!(model = %model.model(), "Poem route using Groq");
            model
        }
        None => {
            tracing::info!(model = %primary.model(), "Poem route using OpenAI as fallback");
            primary.clone()
        }
    };

    Ok(ModelBindings {
        primary,
        poem,
        availability,
    })
}

/// Construct the Groq model and run one liveness call against it.
///
/// Returns `None` when no key is configured, construction fails, the call
/// errors, or it does not answer within `timeout`.
pub async fn probe_secondary(
    config: Option<&ProviderConfig>,
    timeout: Duration,
) -> Option<ChatModel> {
    let Some(config) = config else {
        tracing::info!("GROQ_API_KEY missing. Poem feature will use OpenAI as fallback.");
        return None;
    };

    let model = match ChatModel::new(Provider::Groq, config) {
        Ok(model) => model,
        Err(e) => {
            tracing::warn!(error = %e, "Groq initialization failed");
            return None;
        }
    };

    match tokio::time::timeout(timeout, model.invoke_text("Hello")).await {
        Ok(Ok(_)) => {
            tracing::info!(model = %model.model(), "Groq initialized successfully");
            Some(model)
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Groq liveness probe failed");
            None
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis() as u64,
                "Groq liveness probe timed out"
            );
            None
        }
    }
}
