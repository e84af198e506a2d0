// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Shape classification and bounds for drawn and persisted geometries.

use crate::error::CaptureError;
use geo::{BoundingRect, Coord, Rect};
use geojson::Value;

/// The shape kinds a spot may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl GeometryKind {
    /// Classify a GeoJSON geometry, rejecting unsupported and empty shapes.
    pub fn classify(geometry: &geojson::Geometry) -> Result<Self, CaptureError> {
        match &geometry.value {
            Value::Point(position) => {
                if position.len() < 2 || position.iter().any(|c| !c.is_finite()) {
                    return Err(CaptureError::EmptyGeometry);
                }
                Ok(GeometryKind::Point)
            }
            Value::LineString(positions) => {
                if positions.is_empty() {
                    return Err(CaptureError::EmptyGeometry);
                }
                Ok(GeometryKind::LineString)
            }
            Value::Polygon(rings) => {
                if rings.first().map_or(true, |outer| outer.is_empty()) {
                    return Err(CaptureError::EmptyGeometry);
                }
                Ok(GeometryKind::Polygon)
            }
            other => Err(CaptureError::UnsupportedGeometry(type_name(other).to_string())),
        }
    }
}

/// GeoJSON `type` member for a geometry value.
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

/// Running bounding rectangle over a set of geometries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpotBounds {
    rect: Option<Rect<f64>>,
}

impl SpotBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the bounds to include a geometry. Geometries that cannot be
    /// converted (or have no extent) are ignored.
    pub fn extend(&mut self, geometry: &geojson::Geometry) {
        let converted: Result<geo::Geometry<f64>, _> = geometry.value.clone().try_into();
        let Some(rect) = converted.ok().and_then(|g| g.bounding_rect()) else {
            tracing::debug!(kind = type_name(&geometry.value), "Geometry has no bounds");
            return;
        };

        self.rect = Some(match self.rect {
            None => rect,
            Some(current) => Rect::new(
                Coord {
                    x: current.min().x.min(rect.min().x),
                    y: current.min().y.min(rect.min().y),
                },
                Coord {
                    x: current.max().x.max(rect.max().x),
                    y: current.max().y.max(rect.max().y),
                },
            ),
        });
    }

    /// The accumulated rectangle, if any geometry contributed to it.
    pub fn rect(&self) -> Option<Rect<f64>> {
        self.rect
    }
}

impl<'a> FromIterator<&'a geojson::Geometry> for SpotBounds {
    fn from_iter<I: IntoIterator<Item = &'a geojson::Geometry>>(iter: I) -> Self {
        let mut bounds = SpotBounds::new();
        for geometry in iter {
            bounds.extend(geometry);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> geojson::Geometry {
        geojson::Geometry::new(Value::Point(vec![x, y]))
    }

    #[test]
    fn test_classify_supported_shapes() {
        assert_eq!(
            GeometryKind::classify(&point(-122.1, 47.3)).unwrap(),
            GeometryKind::Point
        );

        let line = geojson::Geometry::new(Value::LineString(vec![
            vec![-122.0, 47.0],
            vec![-122.1, 47.1],
        ]));
        assert_eq!(
            GeometryKind::classify(&line).unwrap(),
            GeometryKind::LineString
        );

        let polygon = geojson::Geometry::new(Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ]]));
        assert_eq!(
            GeometryKind::classify(&polygon).unwrap(),
            GeometryKind::Polygon
        );
    }

    #[test]
    fn test_classify_rejects_empty_and_unsupported() {
        let empty_line = geojson::Geometry::new(Value::LineString(vec![]));
        assert!(matches!(
            GeometryKind::classify(&empty_line),
            Err(CaptureError::EmptyGeometry)
        ));

        let empty_polygon = geojson::Geometry::new(Value::Polygon(vec![]));
        assert!(matches!(
            GeometryKind::classify(&empty_polygon),
            Err(CaptureError::EmptyGeometry)
        ));

        let multi = geojson::Geometry::new(Value::MultiPoint(vec![vec![0.0, 0.0]]));
        assert!(matches!(
            GeometryKind::classify(&multi),
            Err(CaptureError::UnsupportedGeometry(kind)) if kind == "MultiPoint"
        ));
    }

    #[test]
    fn test_bounds_cover_all_geometries() {
        let bounds: SpotBounds = [point(-122.1, 47.3), point(-121.5, 46.9)].iter().collect();
        let rect = bounds.rect().expect("bounds");

        assert_eq!(rect.min().x, -122.1);
        assert_eq!(rect.min().y, 46.9);
        assert_eq!(rect.max().x, -121.5);
        assert_eq!(rect.max().y, 47.3);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(SpotBounds::new().rect().is_none());
    }
}
