#![allow(dead_code)]

use axum::response::Response;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quill::config::{Config, ProbeConfig, ProviderConfig, ServerConfig};

pub fn provider_config(model: &str, base_url: &str) -> ProviderConfig {
    ProviderConfig {
        api_key: "test-key".to_string(),
        model: model.to_string(),
        base_url: Some(base_url.to_string()),
        temperature: 0.2,
        timeout_secs: 5,
    }
}

pub fn service_config(openai_url: &str, groq_url: Option<&str>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8999,
        },
        openai: provider_config("gpt-4o-mini", openai_url),
        groq: groq_url.map(|url| provider_config("llama-3.1-8b-instant", url)),
        probe: ProbeConfig { timeout_secs: 2 },
    }
}

pub fn completion_body(model: &str, content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": model,
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

pub fn api_error_body(message: &str, error_type: &str, code: &str) -> Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": Value::Null,
            "code": code
        }
    })
}

/// Answer every chat completion on `server` with `content`.
pub async fn mount_completion(server: &MockServer, model: &str, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(model, content)))
        .mount(server)
        .await;
}

pub async fn mount_failure(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream exploded"))
        .mount(server)
        .await;
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
