use std::sync::Arc;

use crate::llm::prompts::{ESSAY_PROMPT, POEM_PROMPT};
use crate::llm::{ChatModel, ModelBindings, PromptChain, ProviderAvailability};

/// Route bindings resolved once at startup. Nothing here changes afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Raw primary model behind `/openai`.
    pub openai: ChatModel,
    pub essay: Arc<PromptChain>,
    pub poem: Arc<PromptChain>,
    pub availability: ProviderAvailability,
}

impl AppState {
    pub fn new(bindings: ModelBindings) -> Self {
        let ModelBindings {
            primary,
            poem,
            availability,
        } = bindings;

        Self {
            essay: Arc::new(PromptChain::new(ESSAY_PROMPT, primary.clone())),
            poem: Arc::new(PromptChain::new(POEM_PROMPT, poem)),
            openai: primary,
            availability,
        }
    }
}
