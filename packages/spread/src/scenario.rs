//! What-if wildfire footprint for the map UI.
//!
//! Unlike [`crate::model`], this takes the wind speed and fuel moisture
//! directly from the user instead of resolving live weather, and draws two
//! concentric rectangles rather than wind-biased sectors.

use geojson::{FeatureCollection, JsonObject};
use serde_json::json;
use wildfire_risk_geo::feature::{feature_collection, polygon_feature};
use wildfire_risk_geo::rect_around_point;
use wildfire_risk_spread_models::{MoistureRegime, ScenarioMeta};

/// Horizon label used when none is given.
pub const DEFAULT_HORIZON: &str = "3h";

/// Wind speed in km/h used when none is given.
pub const DEFAULT_WIND_KMPH: f64 = 20.0;

/// Wind direction in degrees used when none is given.
pub const DEFAULT_WIND_DIR_DEG: f64 = 45.0;

/// Smallest footprint radius in km.
const MIN_RADIUS_KM: f64 = 0.5;

/// Inner ring as a fraction of the outer radius.
const INNER_RING_FRACTION: f64 = 0.6;

/// Inputs of a what-if projection.
#[derive(Debug, Clone, PartialEq)]
pub struct WildfireScenario {
    /// Ignition latitude.
    pub lat: f64,
    /// Ignition longitude.
    pub lon: f64,
    /// Horizon label such as `"1h"` or `"12h"`. Echoed back as given.
    pub horizon: String,
    /// Wind speed in km/h.
    pub wind_kmph: f64,
    /// Fuel moisture regime.
    pub moisture: MoistureRegime,
    /// Wind direction in degrees. Carried into feature properties only.
    pub wind_dir_deg: f64,
}

impl WildfireScenario {
    /// Growth scale for the horizon label. Unknown labels scale like 3h.
    #[must_use]
    pub fn horizon_scale(&self) -> f64 {
        match self.horizon.as_str() {
            "1h" => 1.0,
            "6h" => 2.2,
            "12h" => 3.0,
            _ => 1.6,
        }
    }

    /// Outer footprint radius in km.
    #[must_use]
    pub fn radius_km(&self) -> f64 {
        let radius = 2.0
            * self.horizon_scale()
            * self.moisture.factor()
            * (0.5 + self.wind_kmph / 60.0);
        radius.max(MIN_RADIUS_KM)
    }

    /// Headline exposure numbers for the footprint.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn meta(&self) -> ScenarioMeta {
        let scale = self.horizon_scale();
        let radius = self.radius_km();
        let side = 2.0 * radius;

        ScenarioMeta {
            area_km2: (side * side * 100.0).round() / 100.0,
            pop_exposed: (1200.0 * scale * self.moisture.factor() + self.wind_kmph * 10.0) as i64,
            assets_exposed: (50.0 * scale + self.wind_kmph) as i64,
            delta: format!("+{} vs 1h", (200.0 * scale) as i64),
        }
    }

    /// Builds the inner and outer growth rings plus `meta` as a
    /// `FeatureCollection`.
    #[must_use]
    pub fn footprint(&self) -> FeatureCollection {
        let radius = self.radius_km();

        let features = [radius * INNER_RING_FRACTION, radius]
            .into_iter()
            .map(|r| {
                let mut props = JsonObject::new();
                props.insert("horizon".to_string(), json!(self.horizon));
                props.insert("radius_km".to_string(), json!(r));
                props.insert("wind_dir".to_string(), json!(self.wind_dir_deg));
                polygon_feature(&rect_around_point(self.lat, self.lon, r), props)
            })
            .collect();

        let mut extra = JsonObject::new();
        extra.insert("meta".to_string(), json!(self.meta()));

        log::debug!(
            "What-if footprint at ({}, {}) horizon={} radius={radius:.2} km",
            self.lat,
            self.lon,
            self.horizon
        );

        feature_collection(features, Some(extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(horizon: &str, wind: f64, moisture: MoistureRegime) -> WildfireScenario {
        WildfireScenario {
            lat: 38.5,
            lon: -122.7,
            horizon: horizon.to_string(),
            wind_kmph: wind,
            moisture,
            wind_dir_deg: DEFAULT_WIND_DIR_DEG,
        }
    }

    #[test]
    fn default_inputs_radius() {
        // 2.0 * 1.6 * 1.0 * (0.5 + 20/60)
        let s = scenario(DEFAULT_HORIZON, DEFAULT_WIND_KMPH, MoistureRegime::Normal);
        assert!((s.radius_km() - 2.666_666_666_666_667).abs() < 1e-9);
    }

    #[test]
    fn unknown_horizon_scales_like_three_hours() {
        let s = scenario("48h", 20.0, MoistureRegime::Normal);
        assert!((s.horizon_scale() - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn radius_never_below_minimum() {
        let s = scenario("1h", -100.0, MoistureRegime::Wet);
        assert!((s.radius_km() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn meta_matches_hand_calculation() {
        let s = scenario("6h", 30.0, MoistureRegime::Dry);
        // radius = 2 * 2.2 * 1.3 * (0.5 + 0.5) = 5.72
        let meta = s.meta();
        assert!((meta.area_km2 - 130.87).abs() < 1e-9);
        // 1200 * 2.2 * 1.3 + 300 = 3732
        assert_eq!(meta.pop_exposed, 3732);
        // 50 * 2.2 + 30 = 140
        assert_eq!(meta.assets_exposed, 140);
        assert_eq!(meta.delta, "+440 vs 1h");
    }

    #[test]
    fn footprint_has_two_closed_rings_and_meta() {
        let s = scenario("12h", 45.0, MoistureRegime::Normal);
        let json = serde_json::to_value(s.footprint()).unwrap();

        assert_eq!(json["type"], "FeatureCollection");
        let features = json["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);

        let inner = features[0]["properties"]["radius_km"].as_f64().unwrap();
        let outer = features[1]["properties"]["radius_km"].as_f64().unwrap();
        assert!((inner - outer * 0.6).abs() < 1e-9);
        assert_eq!(features[1]["properties"]["horizon"], "12h");
        assert_eq!(features[1]["properties"]["wind_dir"], 45.0);

        for feature in features {
            let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
            assert_eq!(ring.first(), ring.last());
        }

        assert_eq!(json["meta"]["delta"], "+600 vs 1h");
    }
}
