use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::error::{QuillError, Result};

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Read a non-empty string variable. Blank values count as unset.
fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Prompt service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    /// Primary provider. Always present; startup fails without its key.
    pub openai: ProviderConfig,
    /// Secondary provider, only when `GROQ_API_KEY` is set.
    pub groq: Option<ProviderConfig>,
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection settings for one hosted chat-completion provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
}

/// Bounds the one-time secondary provider liveness probe.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    pub timeout_secs: u64,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Build the service configuration from the environment.
    ///
    /// Fails with [`QuillError::Config`] when `OPENAI_API_KEY` is missing;
    /// the service must not start in that case.
    pub fn from_env() -> Result<Self> {
        let Some(openai_key) = env_non_empty("OPENAI_API_KEY") else {
            return Err(QuillError::Config(
                "OpenAI API key is missing. Set OPENAI_API_KEY in the environment or .env"
                    .to_string(),
            ));
        };

        let temperature = parse_env_or("LLM_TEMPERATURE", DEFAULT_TEMPERATURE);
        let timeout_secs = parse_env_or("LLM_TIMEOUT", 60);

        Ok(Self {
            server: ServerConfig {
                host: env::var("QUILL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_env_or("QUILL_PORT", 8999),
            },
            openai: ProviderConfig {
                api_key: openai_key,
                model: env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
                base_url: env_non_empty("OPENAI_BASE_URL"),
                temperature,
                timeout_secs,
            },
            groq: env_non_empty("GROQ_API_KEY").map(|api_key| ProviderConfig {
                api_key,
                model: env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_string()),
                base_url: env_non_empty("GROQ_BASE_URL"),
                temperature,
                timeout_secs,
            }),
            probe: ProbeConfig {
                timeout_secs: parse_env_or("GROQ_PROBE_TIMEOUT_SECS", 10),
            },
        })
    }
}

/// Presentation client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub host: String,
    pub port: u16,
    /// Prompt service base URL, without a trailing slash.
    pub server_base_url: String,
    pub timeout_secs: f64,
}

impl UiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(Duration::from_secs(30))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            host: env::var("QUILL_UI_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_env_or("QUILL_UI_PORT", 8501),
            server_base_url: env::var("SERVER_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8999".to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout_secs: parse_env_or("CLIENT_TIMEOUT_SEC", 30.0),
        }
    }
}

impl UiConfig {
    pub fn from_env() -> Self {
        Self::default()
    }
}
