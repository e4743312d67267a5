//! Ingestion Clients - HTTP adapters for downstream services
//!
//! This crate implements the catalog and store-trigger ports over HTTP.

pub mod catalog;
pub mod store_trigger;

pub use catalog::CatalogClient;
pub use store_trigger::StoreTriggerClient;
