use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use crate::llm;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quill Prompt Service",
        version = "1.0.0",
        description = "Essay and poem prompt chains over hosted chat models.",
    ),
    paths(
        handlers::health::health_check,
        handlers::invoke::invoke_chain,
        handlers::invoke::batch_chain,
        handlers::invoke::invoke_model,
        handlers::invoke::batch_model,
    ),
    components(schemas(
        dto::TopicInvokeRequest,
        dto::TopicBatchRequest,
        dto::ModelInvokeRequest,
        dto::ModelBatchRequest,
        dto::InvokeResponse,
        dto::RunMetadata,
        dto::BatchResponse,
        dto::BatchMetadata,
        dto::HealthResponse,
        llm::prompts::TopicInput,
        llm::message::ModelInput,
        llm::message::ChatMessage,
        llm::message::MessageRole,
        llm::message::AiMessage,
        llm::message::ResponseMetadata,
        llm::message::UsageMetadata,
    )),
    tags(
        (name = "health", description = "Liveness and provider availability"),
        (name = "chains", description = "Prompt template chains"),
        (name = "models", description = "Raw primary model access"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
