//! Ingestion Geo - Footprint decoding and geometry checks
//!
//! This crate turns the footprint field of an ingestion request into a
//! GeoJSON geometry and checks that its rings are usable.

pub mod footprint;
pub mod models;
pub mod validation;

pub use footprint::{decode_footprint, decode_footprint_value};
pub use validation::{validate_footprint, ValidationError, ValidationResult, MAX_FOOTPRINT_VERTICES};
