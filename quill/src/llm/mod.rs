mod api;
mod chain;
pub mod message;
pub mod prompts;
mod provider;

pub use api::LlmApiClient;
pub use chain::PromptChain;
pub use message::{AiMessage, ChatMessage, MessageRole, ModelInput};
pub use provider::{
    probe_secondary, resolve_bindings, ChatModel, ModelBindings, Provider, ProviderAvailability,
};
