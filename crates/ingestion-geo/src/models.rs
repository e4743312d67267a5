//! Footprint shapes and conversions to the `geo` crate.

use geojson::{Geometry, PolygonType, Value};

/// Geometry shapes accepted as a model footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootprintKind {
    Polygon,
    MultiPolygon,
}

impl FootprintKind {
    pub fn of(geometry: &Geometry) -> Option<Self> {
        match geometry.value {
            Value::Polygon(_) => Some(Self::Polygon),
            Value::MultiPolygon(_) => Some(Self::MultiPolygon),
            _ => None,
        }
    }
}

/// GeoJSON type name of a geometry value
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Polygons of a footprint as raw GeoJSON rings. Empty for other shapes.
pub fn polygons(geometry: &Geometry) -> Vec<&PolygonType> {
    match &geometry.value {
        Value::Polygon(rings) => vec![rings],
        Value::MultiPolygon(polygons) => polygons.iter().collect(),
        _ => Vec::new(),
    }
}

/// Convert a GeoJSON ring to a geo::LineString, keeping x/y only
pub fn to_geo_ring(ring: &[Vec<f64>]) -> geo::LineString {
    let coords: Vec<geo::Coord> = ring
        .iter()
        .filter(|position| position.len() >= 2)
        .map(|position| geo::Coord { x: position[0], y: position[1] })
        .collect();
    geo::LineString::new(coords)
}

/// Convert GeoJSON polygon rings to a geo::Polygon
pub fn to_geo_polygon(rings: &PolygonType) -> geo::Polygon {
    match rings.split_first() {
        Some((exterior, interiors)) => geo::Polygon::new(
            to_geo_ring(exterior),
            interiors.iter().map(|ring| to_geo_ring(ring)).collect(),
        ),
        None => geo::Polygon::new(geo::LineString::new(vec![]), vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    fn unit_square() -> PolygonType {
        vec![vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0], vec![0.0, 0.0]]]
    }

    #[test]
    fn test_footprint_kind() {
        let polygon = Geometry::new(Value::Polygon(unit_square()));
        assert_eq!(FootprintKind::of(&polygon), Some(FootprintKind::Polygon));

        let point = Geometry::new(Value::Point(vec![1.0, 2.0]));
        assert_eq!(FootprintKind::of(&point), None);
        assert_eq!(type_name(&point.value), "Point");
    }

    #[test]
    fn test_polygons_of_multipolygon() {
        let geometry = Geometry::new(Value::MultiPolygon(vec![unit_square(), unit_square()]));
        assert_eq!(polygons(&geometry).len(), 2);
    }

    #[test]
    fn test_to_geo_polygon_area() {
        let polygon = to_geo_polygon(&unit_square());
        assert!((polygon.unsigned_area() - 1.0).abs() < 1e-9);
    }
}
