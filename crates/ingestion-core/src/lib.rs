//! Ingestion Core - Domain models, ports, and configuration
//!
//! This crate contains the request and work-order models, the error taxonomy,
//! path normalization and the port definitions for the ingestion service.

pub mod config;
pub mod error;
pub mod models;
pub mod path;
pub mod ports;

pub use error::{IngestError, Result};
pub use path::PathNormalizer;
