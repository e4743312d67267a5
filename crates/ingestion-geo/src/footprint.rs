//! Decoding of request footprints.
//!
//! Upstream systems send the footprint either as a GeoJSON object or as a
//! string holding the JSON document. Both forms decode to the same geometry.

use geojson::Geometry;
use ingestion_core::error::{IngestError, Result};
use serde_json::Value;

use crate::models::{type_name, FootprintKind};

/// Decode a footprint from its JSON text.
pub fn decode_footprint(raw: &str) -> Result<Geometry> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        IngestError::MalformedGeometry(format!("footprint is not valid JSON: {}", e))
    })?;
    decode_footprint_value(&value)
}

/// Decode a footprint that is either a GeoJSON object or a JSON-encoded string of one.
pub fn decode_footprint_value(value: &Value) -> Result<Geometry> {
    match value {
        Value::String(inner) => {
            let inner: Value = serde_json::from_str(inner).map_err(|e| {
                IngestError::MalformedGeometry(format!("footprint is not valid JSON: {}", e))
            })?;
            if !inner.is_object() {
                return Err(IngestError::MalformedGeometry(
                    "footprint must be a GeoJSON geometry object".to_string(),
                ));
            }
            decode_geometry(inner)
        }
        Value::Object(_) => decode_geometry(value.clone()),
        _ => Err(IngestError::MalformedGeometry(
            "footprint must be a GeoJSON geometry object".to_string(),
        )),
    }
}

fn decode_geometry(value: Value) -> Result<Geometry> {
    let geometry: Geometry = serde_json::from_value(value).map_err(|e| {
        IngestError::MalformedGeometry(format!("failed to parse GeoJSON geometry: {}", e))
    })?;

    match FootprintKind::of(&geometry) {
        Some(_) => Ok(geometry),
        None => Err(IngestError::MalformedGeometry(format!(
            "footprint must be a Polygon or MultiPolygon, got {}",
            type_name(&geometry.value)
        ))),
    }
}
