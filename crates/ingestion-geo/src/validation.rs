use geo::{Area, Intersects, Line};
use geojson::Geometry;

use crate::models::{polygons, to_geo_polygon, to_geo_ring, type_name};

/// Upper bound on positions across all rings of one footprint.
///
/// The self-intersection check is quadratic in the ring size.
pub const MAX_FOOTPRINT_VERTICES: usize = 10_000;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// First error formatted for a user-facing message
    pub fn summary(&self) -> Option<String> {
        self.errors.first().map(|e| format!("{}: {}", e.location, e.reason))
    }
}

/// Validate a decoded footprint
pub fn validate_footprint(geometry: &Geometry) -> ValidationResult {
    let mut result = ValidationResult::valid();
    let polygons = polygons(geometry);

    if polygons.is_empty() {
        result.add_error(
            type_name(&geometry.value).to_string(),
            "Footprint must be a Polygon or MultiPolygon with at least one polygon".to_string(),
        );
        return result;
    }

    let vertices: usize = polygons.iter().flat_map(|rings| rings.iter()).map(Vec::len).sum();
    if vertices > MAX_FOOTPRINT_VERTICES {
        result.add_error(
            type_name(&geometry.value).to_string(),
            format!(
                "Footprint has {} vertices, at most {} are allowed",
                vertices, MAX_FOOTPRINT_VERTICES
            ),
        );
        return result;
    }

    for (i, rings) in polygons.iter().enumerate() {
        let location = if polygons.len() == 1 {
            "Polygon".to_string()
        } else {
            format!("MultiPolygon[{}]", i)
        };

        if rings.is_empty() {
            result.add_error(location, "Polygon must have an exterior ring".to_string());
            continue;
        }

        for (r, ring) in rings.iter().enumerate() {
            let ring_location = if r == 0 {
                format!("{} exterior", location)
            } else {
                format!("{} interior[{}]", location, r - 1)
            };
            validate_ring(ring, &ring_location, &mut result);
        }

        if result.is_valid && to_geo_polygon(rings).unsigned_area() == 0.0 {
            result.add_error(location, "Polygon must have a non-zero area".to_string());
        }
    }

    result
}

fn validate_ring(ring: &[Vec<f64>], location: &str, result: &mut ValidationResult) {
    // Rings must have at least 4 positions
    if ring.len() < 4 {
        result.add_error(
            location.to_string(),
            format!("Ring must have at least 4 points, found {}", ring.len()),
        );
        return;
    }

    for (i, position) in ring.iter().enumerate() {
        if position.len() < 2 || position.iter().any(|c| !c.is_finite()) {
            result.add_error(
                format!("{}[{}]", location, i),
                "Coordinates must be finite x/y pairs".to_string(),
            );
            return;
        }
    }

    // Check if closed
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if first[..2] != last[..2] {
            result.add_error(
                location.to_string(),
                "Ring must be closed (first point == last point)".to_string(),
            );
            return;
        }
    }

    if is_self_intersecting(ring) {
        result.add_error(location.to_string(), "Ring must not self-intersect".to_string());
    }
}

/// Checks every pair of non-adjacent ring segments for an intersection
fn is_self_intersecting(ring: &[Vec<f64>]) -> bool {
    let mut coords = to_geo_ring(ring).0;
    coords.dedup();

    let segments: Vec<Line> = coords.windows(2).map(|w| Line::new(w[0], w[1])).collect();
    let n = segments.len();
    if n < 3 {
        return false;
    }

    for i in 0..n {
        for j in (i + 2)..n {
            // First and last segments share the closing point
            if i == 0 && j == n - 1 {
                continue;
            }
            if segments[i].intersects(&segments[j]) {
                return true;
            }
        }
    }

    false
}
