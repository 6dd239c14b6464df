//! Chat message types exchanged with hosted models.
//!
//! Inputs accept both OpenAI-style `role` and LangChain-style `type` keys, so
//! `{"type": "human", "content": "hi"}` and `{"role": "user", "content": "hi"}`
//! are the same message.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    #[serde(alias = "human")]
    User,
    #[serde(alias = "ai")]
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChatMessage {
    #[serde(alias = "type")]
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Raw model input: a bare prompt string or an explicit message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum ModelInput {
    Text(String),
    Messages(Vec<ChatMessage>),
}

impl ModelInput {
    pub fn into_messages(self) -> Vec<ChatMessage> {
        match self {
            ModelInput::Text(text) => vec![ChatMessage::user(text)],
            ModelInput::Messages(messages) => messages,
        }
    }
}

/// Model reply in the shape LangChain serializes an `AIMessage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AiMessage {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub response_metadata: ResponseMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl AiMessage {
    pub fn new(content: impl Into<String>, response_metadata: ResponseMetadata) -> Self {
        Self {
            content: content.into(),
            kind: "ai".to_string(),
            id: None,
            response_metadata,
            usage_metadata: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ResponseMetadata {
    pub model_name: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UsageMetadata {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_input_accepts_plain_string() {
        let input: ModelInput = serde_json::from_value(json!("tell me a joke")).unwrap();
        assert_eq!(
            input.into_messages(),
            vec![ChatMessage::user("tell me a joke")]
        );
    }

    #[test]
    fn test_model_input_accepts_langchain_message_types() {
        let input: ModelInput = serde_json::from_value(json!([
            {"type": "system", "content": "be brief"},
            {"type": "human", "content": "hi"},
            {"role": "assistant", "content": "hello"}
        ]))
        .unwrap();

        let messages = input.into_messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[2].role, MessageRole::Assistant);
    }

    #[test]
    fn test_ai_message_serializes_type_tag() {
        let message = AiMessage::new("hello", ResponseMetadata::default());
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "ai");
        assert_eq!(value["content"], "hello");
        assert!(value.get("usage_metadata").is_none());
    }
}
