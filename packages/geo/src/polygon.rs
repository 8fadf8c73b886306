//! Footprint polygons approximating fire spread around a point.
//!
//! Rings are built in `(lon, lat)` order, matching `GeoJSON`. Every ring
//! returned here is closed: its first and last coordinates are identical.
//! Closure is checked with `==`, so a NaN coordinate gets one extra
//! closing vertex; callers validate coordinates before building rings.

use geo::{Coord, LineString, Polygon};

use crate::destination_point;

/// Kilometres per degree of latitude in the equirectangular approximation.
const KM_PER_DEG_LAT: f64 = 110.574;

/// Kilometres per degree of longitude at the equator.
const KM_PER_DEG_LON_EQUATOR: f64 = 111.320;

/// Shape of an angular sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorOptions {
    /// Total angular width of the wedge in degrees, centred on the bearing.
    pub width_deg: f64,
    /// Number of arc segments. The arc has `steps + 1` vertices.
    pub steps: usize,
}

impl Default for SectorOptions {
    fn default() -> Self {
        Self {
            width_deg: 60.0,
            steps: 24,
        }
    }
}

/// Builds a wedge starting at `(lat, lon)`, sweeping an arc of constant
/// `radius_km` across `bearing_deg ± width_deg / 2`, then returning to the
/// centre.
///
/// A `steps` of zero is treated as one so the arc always has both edges.
/// The ring has `steps + 3` vertices for finite input.
#[must_use]
pub fn sector_polygon(
    lat: f64,
    lon: f64,
    radius_km: f64,
    bearing_deg: f64,
    options: SectorOptions,
) -> Polygon<f64> {
    let steps = options.steps.max(1);
    let start = bearing_deg - options.width_deg / 2.0;
    let end = bearing_deg + options.width_deg / 2.0;
    let center = Coord { x: lon, y: lat };

    let mut ring = Vec::with_capacity(steps + 3);
    ring.push(center);

    #[allow(clippy::cast_precision_loss)]
    for i in 0..=steps {
        let bearing = start + (end - start) * i as f64 / steps as f64;
        let (arc_lat, arc_lon) = destination_point(lat, lon, bearing, radius_km);
        ring.push(Coord {
            x: arc_lon,
            y: arc_lat,
        });
    }

    ring.push(center);

    Polygon::new(LineString::new(ring), vec![])
}

/// Builds an axis-aligned rectangle extending `radius_km` from
/// `(lat, lon)` in each cardinal direction.
///
/// Uses the equirectangular approximation, so the east-west extent grows
/// without bound near the poles.
#[must_use]
pub fn rect_around_point(lat: f64, lon: f64, radius_km: f64) -> Polygon<f64> {
    let dlat = radius_km / KM_PER_DEG_LAT;
    let dlon = radius_km / (KM_PER_DEG_LON_EQUATOR * lat.to_radians().cos());

    let ring = vec![
        Coord {
            x: lon - dlon,
            y: lat - dlat,
        },
        Coord {
            x: lon + dlon,
            y: lat - dlat,
        },
        Coord {
            x: lon + dlon,
            y: lat + dlat,
        },
        Coord {
            x: lon - dlon,
            y: lat + dlat,
        },
        Coord {
            x: lon - dlon,
            y: lat - dlat,
        },
    ];

    Polygon::new(LineString::new(ring), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine_km;

    fn assert_closed(polygon: &Polygon<f64>) {
        let coords = &polygon.exterior().0;
        assert_eq!(coords.first(), coords.last(), "ring is not closed");
    }

    #[test]
    fn sector_ring_is_closed_with_expected_length() {
        let polygon = sector_polygon(34.05, -118.24, 5.0, 90.0, SectorOptions::default());
        assert_closed(&polygon);
        // centre + 25 arc vertices + centre
        assert_eq!(polygon.exterior().0.len(), 27);
    }

    #[test]
    fn sector_starts_and_ends_at_center() {
        let polygon = sector_polygon(10.0, 20.0, 3.0, 0.0, SectorOptions::default());
        let coords = &polygon.exterior().0;
        assert_eq!(coords[0], Coord { x: 20.0, y: 10.0 });
    }

    #[test]
    fn sector_arc_is_at_constant_radius() {
        let polygon = sector_polygon(45.0, 7.0, 12.5, 200.0, SectorOptions::default());
        let coords = &polygon.exterior().0;
        for c in &coords[1..coords.len() - 1] {
            let d = haversine_km(45.0, 7.0, c.y, c.x);
            assert!((d - 12.5).abs() < 1e-6, "vertex at {d} km");
        }
    }

    #[test]
    fn sector_arc_edges_span_the_width() {
        let polygon = sector_polygon(0.0, 0.0, 10.0, 0.0, SectorOptions::default());
        let coords = &polygon.exterior().0;
        let first_arc = coords[1];
        let last_arc = coords[coords.len() - 2];
        // A wedge centred on north is symmetric about the meridian.
        assert!(first_arc.x < 0.0);
        assert!(last_arc.x > 0.0);
        assert!((first_arc.x + last_arc.x).abs() < 1e-9);
    }

    #[test]
    fn nan_center_gets_an_extra_closing_vertex() {
        let polygon = sector_polygon(f64::NAN, 0.0, 5.0, 0.0, SectorOptions::default());
        assert_eq!(polygon.exterior().0.len(), 28);
    }

    #[test]
    fn sector_with_zero_steps_still_closes() {
        let polygon = sector_polygon(
            1.0,
            1.0,
            2.0,
            45.0,
            SectorOptions {
                width_deg: 90.0,
                steps: 0,
            },
        );
        assert_closed(&polygon);
        assert_eq!(polygon.exterior().0.len(), 4);
    }

    #[test]
    fn rect_is_closed_and_symmetric() {
        let polygon = rect_around_point(34.05, -118.24, 7.0);
        assert_closed(&polygon);
        let coords = &polygon.exterior().0;
        assert_eq!(coords.len(), 5);

        let dlat = 7.0 / 110.574;
        assert!((coords[2].y - (34.05 + dlat)).abs() < 1e-12);
        assert!((coords[0].y - (34.05 - dlat)).abs() < 1e-12);
        assert!(((coords[1].x + coords[0].x) / 2.0 - -118.24).abs() < 1e-9);
    }

    #[test]
    fn rect_widens_in_longitude_away_from_equator() {
        let equator = rect_around_point(0.0, 0.0, 10.0);
        let north = rect_around_point(60.0, 0.0, 10.0);
        let width = |p: &Polygon<f64>| p.exterior().0[1].x - p.exterior().0[0].x;
        assert!((width(&north) / width(&equator) - 2.0).abs() < 1e-9);
    }
}
