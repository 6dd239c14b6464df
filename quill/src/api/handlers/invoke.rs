use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use futures::future::try_join_all;

use crate::api::dto::{
    BatchResponse, InvokeResponse, ModelBatchRequest, ModelInvokeRequest, TopicBatchRequest,
    TopicInvokeRequest,
};
use crate::api::extractors::AppJson;
use crate::error::Result;
use crate::llm::{ChatModel, PromptChain};

/// `POST /{route}/invoke` for the `essay` and `poem` chains.
#[utoipa::path(
    post,
    path = "/{route}/invoke",
    tag = "chains",
    params(("route" = String, Path, description = "Chain name: `essay` or `poem`")),
    request_body = TopicInvokeRequest,
    responses(
        (status = 200, description = "Generated message", body = InvokeResponse),
        (status = 422, description = "Malformed input"),
        (status = 429, description = "Upstream rate limit"),
        (status = 502, description = "Upstream provider error"),
    )
)]
pub async fn invoke_chain(
    State(chain): State<Arc<PromptChain>>,
    AppJson(request): AppJson<TopicInvokeRequest>,
) -> Result<Json<InvokeResponse>> {
    let output = chain.invoke(&request.input).await?;
    Ok(Json(InvokeResponse::new(output)))
}

/// `POST /{route}/batch`
#[utoipa::path(
    post,
    path = "/{route}/batch",
    tag = "chains",
    params(("route" = String, Path, description = "Chain name: `essay` or `poem`")),
    request_body = TopicBatchRequest,
    responses(
        (status = 200, description = "One generated message per input, in order", body = BatchResponse),
        (status = 422, description = "Malformed input"),
        (status = 502, description = "Upstream provider error"),
    )
)]
pub async fn batch_chain(
    State(chain): State<Arc<PromptChain>>,
    AppJson(request): AppJson<TopicBatchRequest>,
) -> Result<Json<BatchResponse>> {
    let outputs = try_join_all(request.inputs.iter().map(|input| chain.invoke(input))).await?;
    Ok(Json(BatchResponse::new(outputs)))
}

/// `POST /openai/invoke`
#[utoipa::path(
    post,
    path = "/openai/invoke",
    tag = "models",
    request_body = ModelInvokeRequest,
    responses(
        (status = 200, description = "Raw model reply", body = InvokeResponse),
        (status = 422, description = "Malformed input"),
        (status = 502, description = "Upstream provider error"),
    )
)]
pub async fn invoke_model(
    State(model): State<ChatModel>,
    AppJson(request): AppJson<ModelInvokeRequest>,
) -> Result<Json<InvokeResponse>> {
    let messages = request.input.into_messages();
    let output = model.invoke(&messages).await?;
    Ok(Json(InvokeResponse::new(output)))
}

/// `POST /openai/batch`
#[utoipa::path(
    post,
    path = "/openai/batch",
    tag = "models",
    request_body = ModelBatchRequest,
    responses(
        (status = 200, description = "One raw reply per input, in order", body = BatchResponse),
        (status = 422, description = "Malformed input"),
        (status = 502, description = "Upstream provider error"),
    )
)]
pub async fn batch_model(
    State(model): State<ChatModel>,
    AppJson(request): AppJson<ModelBatchRequest>,
) -> Result<Json<BatchResponse>> {
    let conversations: Vec<_> = request
        .inputs
        .into_iter()
        .map(|input| input.into_messages())
        .collect();
    let outputs = try_join_all(
        conversations
            .iter()
            .map(|messages| model.invoke(messages.as_slice())),
    )
    .await?;
    Ok(Json(BatchResponse::new(outputs)))
}
