use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::client::normalize;
use crate::config::UiConfig;

/// Which generation route a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Essay,
    Poem,
}

impl GenerationKind {
    pub const ALL: [GenerationKind; 2] = [GenerationKind::Essay, GenerationKind::Poem];

    pub fn route(&self) -> &'static str {
        match self {
            GenerationKind::Essay => "essay",
            GenerationKind::Poem => "poem",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GenerationKind::Essay => "Essay",
            GenerationKind::Poem => "Poem",
        }
    }

    /// `{kind}_{topic}.txt` with spaces in the topic turned into underscores.
    pub fn download_filename(&self, topic: &str) -> String {
        format!("{}_{}.txt", self.route(), topic.replace(' ', "_"))
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Request failed: server returned {status}")]
    Status { status: StatusCode },

    #[error("Request failed: invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// A successful generation, ready to display and download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub kind: GenerationKind,
    pub topic: String,
    pub text: String,
}

impl Generation {
    pub fn filename(&self) -> String {
        self.kind.download_filename(&self.topic)
    }
}

/// HTTP client for the prompt service's invoke endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(config: &UiConfig) -> Result<Self, ClientError> {
        let timeout = config.timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.server_base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `payload` to `{base_url}/{route}/invoke` and decode the JSON body.
    pub async fn invoke(&self, route: &str, payload: &Value) -> Result<Value, ClientError> {
        let url = format!("{}/{}/invoke", self.base_url, route.trim_matches('/'));

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { status });
        }

        response.json::<Value>().await.map_err(ClientError::Decode)
    }

    /// Generate text for `topic` on the route named by `kind`.
    ///
    /// Any transport failure, including a non-2xx status, is returned as an
    /// error and logged; nothing is retried.
    pub async fn generate(
        &self,
        kind: GenerationKind,
        topic: &str,
    ) -> Result<Generation, ClientError> {
        let payload = json!({ "input": { "topic": topic } });

        match self.invoke(kind.route(), &payload).await {
            Ok(result) => Ok(Generation {
                kind,
                topic: topic.to_string(),
                text: normalize::extract_text(&result),
            }),
            Err(error) => {
                tracing::warn!(route = kind.route(), error = %error, "Generation request failed");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_filename_replaces_spaces() {
        assert_eq!(
            GenerationKind::Essay.download_filename("AI in Pakistan"),
            "essay_AI_in_Pakistan.txt"
        );
        assert_eq!(
            GenerationKind::Poem.download_filename("friendly robots"),
            "poem_friendly_robots.txt"
        );
    }

    #[test]
    fn test_kind_deserializes_from_route_name() {
        let kind: GenerationKind = serde_json::from_str("\"poem\"").unwrap();
        assert_eq!(kind, GenerationKind::Poem);
        assert!(serde_json::from_str::<GenerationKind>("\"haiku\"").is_err());
    }
}
