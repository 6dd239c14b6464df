use axum::extract::State;
use axum::Json;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service liveness and provider availability", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        openai_available: state.availability.openai,
        groq_available: state.availability.groq,
    })
}
