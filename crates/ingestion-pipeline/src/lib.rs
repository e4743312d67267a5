//! Ingestion Pipeline - Request validation and dispatch
//!
//! This crate implements the ingestion use cases, orchestrating path
//! normalization, footprint decoding, validation and hand-off to the
//! store-trigger service.

pub mod manager;
pub mod observer;
pub mod validator;

pub use manager::ModelManager;
pub use observer::TracingObserver;
pub use validator::ValidationManager;
