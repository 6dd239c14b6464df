//! Prompt templates for the generation routes.
//!
//! A template is a fixed instruction with a single `{topic}` slot, filled in
//! per request and sent to the model as one user message.

use serde::{Deserialize, Serialize};

use crate::llm::message::ChatMessage;

const TOPIC_SLOT: &str = "{topic}";

/// Variables accepted by every generation route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TopicInput {
    pub topic: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    name: &'static str,
    template: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, template: &'static str) -> Self {
        Self { name, template }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Substitute `topic` into the slot.
    ///
    /// # Example
    /// ```
    /// use quill::llm::prompts::ESSAY_PROMPT;
    ///
    /// let prompt = ESSAY_PROMPT.render("tea");
    /// assert_eq!(prompt, "Write a concise 100-words essay about tea");
    /// ```
    pub fn render(&self, topic: &str) -> String {
        self.template.replace(TOPIC_SLOT, topic)
    }

    pub fn format_messages(&self, input: &TopicInput) -> Vec<ChatMessage> {
        vec![ChatMessage::user(self.render(&input.topic))]
    }
}

pub const ESSAY_PROMPT: PromptTemplate =
    PromptTemplate::new("essay", "Write a concise 100-words essay about {topic}");

pub const POEM_PROMPT: PromptTemplate = PromptTemplate::new(
    "poem",
    "Write a 100 word poem about {topic} suitable for a 5 years old.",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poem_prompt_substitution() {
        let prompt = POEM_PROMPT.render("friendly robots");
        assert_eq!(
            prompt,
            "Write a 100 word poem about friendly robots suitable for a 5 years old."
        );
    }

    #[test]
    fn test_topic_braces_are_not_reinterpreted() {
        let prompt = ESSAY_PROMPT.render("{topic} in JSON");
        assert_eq!(prompt, "Write a concise 100-words essay about {topic} in JSON");
    }

    #[test]
    fn test_format_messages_yields_single_user_message() {
        let messages = ESSAY_PROMPT.format_messages(&TopicInput {
            topic: "rust".to_string(),
        });
        assert_eq!(messages, vec![ChatMessage::user(ESSAY_PROMPT.render("rust"))]);
    }
}
