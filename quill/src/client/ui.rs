use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use validator::Validate;

use crate::client::api::{BackendClient, GenerationKind};
use crate::client::assets;
use crate::client::page::{self, PageView, TabOutcome};

#[derive(Clone)]
pub struct UiState {
    client: Arc<BackendClient>,
}

impl UiState {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

pub fn create_ui_router(state: UiState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate/{kind}", post(generate))
        .route("/download/{kind}", post(download))
        .route("/assets/{*path}", get(assets::serve_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct TabQuery {
    tab: Option<GenerationKind>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TopicForm {
    #[validate(length(min = 1))]
    pub topic: String,
}

#[derive(Debug, Deserialize)]
struct DownloadForm {
    topic: String,
    /// Base64 of the displayed text, so line endings survive form encoding.
    text: String,
}

async fn index(State(state): State<UiState>, Query(query): Query<TabQuery>) -> Html<String> {
    let active = query.tab.unwrap_or(GenerationKind::Essay);
    let view = PageView::idle(active, state.client.base_url(), state.client.timeout());
    Html(page::render(&view))
}

async fn generate(
    State(state): State<UiState>,
    Path(kind): Path<GenerationKind>,
    Form(form): Form<TopicForm>,
) -> Html<String> {
    let mut view = PageView::idle(kind, state.client.base_url(), state.client.timeout());

    if form.validate().is_err() {
        return Html(page::render(&view));
    }

    view.topic = &form.topic;
    view.outcome = match state.client.generate(kind, &form.topic).await {
        Ok(generation) => TabOutcome::Generated(generation),
        Err(error) => TabOutcome::Failed(error.to_string()),
    };

    Html(page::render(&view))
}

async fn download(Path(kind): Path<GenerationKind>, Form(form): Form<DownloadForm>) -> Response {
    let Ok(bytes) = STANDARD.decode(form.text.as_bytes()) else {
        return (StatusCode::BAD_REQUEST, "Invalid download payload").into_response();
    };
    let Ok(text) = String::from_utf8(bytes) else {
        return (StatusCode::BAD_REQUEST, "Invalid download payload").into_response();
    };

    let filename = kind.download_filename(&form.topic);
    let mut response = text.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    if let Ok(disposition) = HeaderValue::from_str(&content_disposition(&filename)) {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }
    response
}

/// `attachment` disposition with an ASCII `filename` fallback and the exact
/// name in RFC 5987 `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded: String = url::form_urlencoded::byte_serialize(filename.as_bytes()).collect();

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
