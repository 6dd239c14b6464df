//! Wire types for the runnable invoke contract.
//!
//! Every route accepts `{"input": ...}` on `/invoke` and `{"inputs": [...]}`
//! on `/batch`, and answers with `{"output": ..., "metadata": ...}`. Unknown
//! request fields such as `config` or `kwargs` are ignored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::llm::prompts::TopicInput;
use crate::llm::{AiMessage, ModelInput};

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct TopicInvokeRequest {
    pub input: TopicInput,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct TopicBatchRequest {
    pub inputs: Vec<TopicInput>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ModelInvokeRequest {
    pub input: ModelInput,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ModelBatchRequest {
    pub inputs: Vec<ModelInput>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct InvokeResponse {
    pub output: AiMessage,
    pub metadata: RunMetadata,
}

impl InvokeResponse {
    pub fn new(output: AiMessage) -> Self {
        Self {
            output,
            metadata: RunMetadata {
                run_id: Uuid::new_v4(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct RunMetadata {
    pub run_id: Uuid,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct BatchResponse {
    pub output: Vec<AiMessage>,
    pub metadata: BatchMetadata,
}

impl BatchResponse {
    pub fn new(output: Vec<AiMessage>) -> Self {
        let run_ids = output.iter().map(|_| Uuid::new_v4()).collect();
        Self {
            output,
            metadata: BatchMetadata { run_ids },
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct BatchMetadata {
    pub run_ids: Vec<Uuid>,
}

/// Liveness report. `openai_available` is always true: the service does not
/// start without the primary provider.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub openai_available: bool,
    pub groq_available: bool,
}
