pub mod health;
pub mod invoke;

pub use health::health_check;
pub use invoke::{batch_chain, batch_model, invoke_chain, invoke_model};
