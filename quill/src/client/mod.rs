//! Presentation client: a small form-based web UI over the prompt service.

mod api;
mod assets;
pub mod normalize;
pub mod page;
mod ui;

pub use api::{BackendClient, ClientError, Generation, GenerationKind};
pub use normalize::{extract_text, ResponseEnvelope};
pub use ui::{content_disposition, create_ui_router, UiState};
