use crate::error::Result;
use crate::llm::message::AiMessage;
use crate::llm::prompts::{PromptTemplate, TopicInput};
use crate::llm::provider::ChatModel;

/// A prompt template piped into a model.
#[derive(Debug, Clone)]
pub struct PromptChain {
    template: PromptTemplate,
    model: ChatModel,
}

impl PromptChain {
    pub fn new(template: PromptTemplate, model: ChatModel) -> Self {
        Self { template, model }
    }

    pub fn name(&self) -> &'static str {
        self.template.name()
    }

    pub fn model(&self) -> &ChatModel {
        &self.model
    }

    pub async fn invoke(&self, input: &TopicInput) -> Result<AiMessage> {
        tracing::debug!(
            chain = self.name(),
            provider = %self.model.provider(),
            topic_len = input.topic.len(),
            "Invoking prompt chain"
        );
        let messages = self.template.format_messages(input);
        self.model.invoke(&messages).await
    }
}
