#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Great-circle primitives and spread footprint polygons.
//!
//! All public functions take and return degrees. Distances are in
//! kilometres on a spherical Earth of radius [`EARTH_RADIUS_KM`]. Nothing
//! here validates its inputs: `NaN` goes in, `NaN` comes out.

pub mod feature;
pub mod polygon;

pub use polygon::{SectorOptions, rect_around_point, sector_polygon};

/// Mean Earth radius used by every calculation in this crate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Projects a point `distance_km` along the great circle leaving
/// `(lat, lon)` at compass `bearing_deg`.
///
/// Returns the destination as `(lat, lon)` in degrees.
#[must_use]
pub fn destination_point(lat: f64, lon: f64, bearing_deg: f64, distance_km: f64) -> (f64, f64) {
    let lat0 = lat.to_radians();
    let lon0 = lon.to_radians();
    let bearing = bearing_deg.to_radians();
    let d = distance_km / EARTH_RADIUS_KM;

    let lat1 = (lat0.sin() * d.cos() + lat0.cos() * d.sin() * bearing.cos()).asin();
    let lon1 = lon0
        + (bearing.sin() * d.sin() * lat0.cos()).atan2(d.cos() - lat0.sin() * lat1.sin());

    (lat1.to_degrees(), lon1.to_degrees())
}

/// Haversine great-circle distance between two points, in kilometres.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}
