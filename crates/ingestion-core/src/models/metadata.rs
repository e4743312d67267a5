//! Product-level metadata carried by an ingestion request.

use chrono::{DateTime, Utc};
use geojson::Geometry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only product type this service ingests.
pub const PHOTO_REALISTIC_PRODUCT_TYPE: &str = "3DPhotoRealistic";

/// Descriptive metadata of a 3D model product.
///
/// The footprint type is generic: requests arrive with a raw JSON value
/// (possibly a JSON-encoded string) and are decoded into a [`Geometry`]
/// before validation. Fields this service does not interpret are kept in
/// `extra` and forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata<F = Geometry> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_source: Option<String>,
    pub footprint: F,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_date_start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_date_end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_resolution_meter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_resolution_meter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srs_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srs_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<F> ModelMetadata<F> {
    /// Replace the footprint, keeping every other field.
    pub fn with_footprint<G>(self, footprint: G) -> ModelMetadata<G> {
        ModelMetadata {
            product_id: self.product_id,
            product_name: self.product_name,
            product_type: self.product_type,
            product_source: self.product_source,
            footprint,
            description: self.description,
            creation_date: self.creation_date,
            source_date_start: self.source_date_start,
            source_date_end: self.source_date_end,
            min_resolution_meter: self.min_resolution_meter,
            max_resolution_meter: self.max_resolution_meter,
            srs_id: self.srs_id,
            srs_name: self.srs_name,
            region: self.region,
            classification: self.classification,
            producer_name: self.producer_name,
            extra: self.extra,
        }
    }
}

/// Publication status of a catalog record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    Unpublished,
    Published,
}

/// Partial metadata update sent to the catalog. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_resolution_meter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_resolution_meter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_status: Option<ProductStatus>,
}

impl MetadataPatch {
    pub fn status(status: ProductStatus) -> Self {
        Self { product_status: Some(status), ..Default::default() }
    }
}
