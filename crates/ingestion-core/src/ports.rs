//! Port trait definitions
//!
//! These traits define the collaborators the ingestion pipeline depends on.

pub mod observer;
pub mod services;

pub use observer::{IngestionState, NoopObserver, PipelineObserver, PipelineStep};
pub use services::{Catalog, StoreTrigger, Validator};
