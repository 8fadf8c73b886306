#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Site triage around a selected point.
//!
//! Samples the selected point plus four neighbours half a degree away,
//! scores each for risk and exposure, and ranks them by
//! `priority = risk × exposure`. Offsets are plain degree offsets, not
//! geodesic distances.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use wildfire_risk_geo::haversine_km;

/// Degree offset of each neighbour from the selected point.
pub const RING_OFFSET_DEG: f64 = 0.5;

/// Risk above which a site is tagged [`TriageTag::HighRisk`].
pub const HIGH_RISK_THRESHOLD: f64 = 0.6;

/// Exposure above which a site is tagged [`TriageTag::HighExposure`].
pub const HIGH_EXPOSURE_THRESHOLD: f64 = 0.6;

/// Label attached to a ranked site.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
pub enum TriageTag {
    /// Risk above [`HIGH_RISK_THRESHOLD`].
    #[serde(rename = "high risk")]
    #[strum(serialize = "high risk")]
    HighRisk,
    /// Exposure above [`HIGH_EXPOSURE_THRESHOLD`].
    #[serde(rename = "high exposure")]
    #[strum(serialize = "high exposure")]
    HighExposure,
}

/// A scored site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriagePoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Ring label: `"Selected"`, `"N"`, `"S"`, `"E"` or `"W"`.
    pub name: String,
    /// Risk score in 0-1.
    pub risk: f64,
    /// Exposure score in 0-1; highest at the selected point.
    pub exposure: f64,
    /// `risk × exposure` rounded to 3 decimals.
    pub priority: f64,
    /// Threshold tags, at most one of each.
    pub tags: Vec<TriageTag>,
}

/// Ring labels and `(Δlat, Δlon)` offsets, in definition order.
const RING: [(&str, f64, f64); 5] = [
    ("Selected", 0.0, 0.0),
    ("N", RING_OFFSET_DEG, 0.0),
    ("S", -RING_OFFSET_DEG, 0.0),
    ("E", 0.0, RING_OFFSET_DEG),
    ("W", 0.0, -RING_OFFSET_DEG),
];

fn clamp01(v: f64) -> f64 {
    v.min(1.0).max(0.0)
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Scores the site at `(lat, lon)` relative to the selected point.
#[must_use]
pub fn score_point(
    center_lat: f64,
    center_lon: f64,
    name: &str,
    lat: f64,
    lon: f64,
) -> TriagePoint {
    let risk = clamp01(0.2 + 0.6 * ((lat - center_lat) + (lon - center_lon)).abs());
    let distance_km = haversine_km(center_lat, center_lon, lat, lon);
    let exposure = clamp01(0.3 + 0.7 * (1.0 / (1.0 + distance_km + 0.1)));

    let mut tags = Vec::new();
    if risk > HIGH_RISK_THRESHOLD {
        tags.push(TriageTag::HighRisk);
    }
    if exposure > HIGH_EXPOSURE_THRESHOLD {
        tags.push(TriageTag::HighExposure);
    }

    TriagePoint {
        lat,
        lon,
        name: name.to_string(),
        risk,
        exposure,
        priority: round3(risk * exposure),
        tags,
    }
}

/// Ranks the five-point ring around `(lat, lon)` by descending priority.
///
/// Equal priorities keep ring order (Selected, N, S, E, W).
#[must_use]
pub fn triage(lat: f64, lon: f64) -> Vec<TriagePoint> {
    let mut items: Vec<TriagePoint> = RING
        .iter()
        .map(|(name, dlat, dlon)| score_point(lat, lon, name, lat + dlat, lon + dlon))
        .collect();

    items.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_always_has_five_points() {
        for (lat, lon) in [(0.0, 0.0), (40.0, -100.0), (-33.9, 151.2), (64.8, -147.7)] {
            assert_eq!(triage(lat, lon).len(), 5);
        }
    }

    #[test]
    fn selected_point_has_base_risk_and_max_exposure() {
        let items = triage(40.0, -100.0);
        let selected = items.iter().find(|p| p.name == "Selected").unwrap();

        assert!((selected.risk - 0.2).abs() < 1e-12);
        assert!((selected.exposure - (0.3 + 0.7 / 1.1)).abs() < 1e-12);
        assert!((selected.priority - 0.187).abs() < 1e-12);
        assert_eq!(selected.tags, vec![TriageTag::HighExposure]);

        for other in items.iter().filter(|p| p.name != "Selected") {
            assert!(other.exposure < selected.exposure);
        }
    }

    #[test]
    fn output_is_non_increasing_in_priority() {
        for (lat, lon) in [(40.0, -100.0), (0.0, 0.0), (70.0, 20.0)] {
            let items = triage(lat, lon);
            for pair in items.windows(2) {
                assert!(pair[0].priority >= pair[1].priority, "{pair:?}");
            }
        }
    }

    #[test]
    fn ties_keep_ring_order() {
        // At 40°N the E/W neighbours are closer than N/S, so they rank
        // higher; each pair ties and keeps definition order.
        let names: Vec<String> = triage(40.0, -100.0).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Selected", "E", "W", "N", "S"]);
    }

    #[test]
    fn neighbours_are_offset_in_degrees() {
        let items = triage(10.0, 20.0);
        let north = items.iter().find(|p| p.name == "N").unwrap();
        let west = items.iter().find(|p| p.name == "W").unwrap();
        assert!((north.lat - 10.5).abs() < 1e-12);
        assert!((north.lon - 20.0).abs() < 1e-12);
        assert!((west.lon - 19.5).abs() < 1e-12);
        assert!((north.risk - 0.5).abs() < 1e-12);
    }

    #[test]
    fn scores_are_clamped_and_tagged() {
        let far = score_point(0.0, 0.0, "far", 1.0, 1.0);
        // 0.2 + 0.6 * 2.0 exceeds 1
        assert!((far.risk - 1.0).abs() < f64::EPSILON);
        assert_eq!(far.tags, vec![TriageTag::HighRisk]);
    }

    #[test]
    fn tags_serialize_as_phrases() {
        let json = serde_json::to_value(score_point(0.0, 0.0, "x", 0.0, 0.0)).unwrap();
        assert_eq!(json["tags"], serde_json::json!(["high exposure"]));
        assert_eq!(TriageTag::HighRisk.to_string(), "high risk");
    }
}
