mod health;
mod ingestion;

pub use health::health_check;
pub use ingestion::{create_model, validate_sources};
