use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;
use crate::llm::{ChatModel, PromptChain};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/openai", model_routes(state.openai.clone()))
        .nest("/essay", chain_routes(state.essay.clone()))
        .nest("/poem", chain_routes(state.poem.clone()))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn chain_routes<S>(chain: Arc<PromptChain>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/invoke", post(handlers::invoke_chain))
        .route("/batch", post(handlers::batch_chain))
        .with_state(chain)
}

fn model_routes<S>(model: ChatModel) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/invoke", post(handlers::invoke_model))
        .route("/batch", post(handlers::batch_model))
        .with_state(model)
}
