//! `GeoJSON` wrappers for footprint polygons.

use geo::Polygon;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

/// Wraps a polygon in a `GeoJSON` feature carrying `properties`.
#[must_use]
pub fn polygon_feature(polygon: &Polygon<f64>, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(polygon))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Collects features into a `FeatureCollection`.
///
/// Entries in `extra` are emitted as top-level members next to
/// `features` (e.g. a `meta` block for the UI).
#[must_use]
pub fn feature_collection(features: Vec<Feature>, extra: Option<JsonObject>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: extra,
    }
}
