//! Sector wedges drawn from a spread projection.

use geojson::{FeatureCollection, JsonObject};
use serde_json::json;
use wildfire_risk_geo::feature::{feature_collection, polygon_feature};
use wildfire_risk_geo::{SectorOptions, sector_polygon};
use wildfire_risk_spread_models::{Sector, SpreadResult};

/// Angular width of each cardinal wedge; four of them tile the circle.
pub const SECTOR_WIDTH_DEG: f64 = 90.0;

/// Draws one wedge per cardinal sector, each reaching that sector's
/// projected radius.
#[must_use]
pub fn sector_footprint(
    lat: f64,
    lon: f64,
    spread: &SpreadResult,
    wind_bearing_deg: f64,
    horizon_hours: f64,
) -> FeatureCollection {
    let options = SectorOptions {
        width_deg: SECTOR_WIDTH_DEG,
        ..SectorOptions::default()
    };

    let features = Sector::ALL
        .into_iter()
        .map(|sector| {
            let radius_km = spread.sector_radii_km[sector];
            let polygon = sector_polygon(lat, lon, radius_km, sector.bearing_deg(), options);

            let mut props = JsonObject::new();
            props.insert("sector".to_string(), json!(sector));
            props.insert("radius_km".to_string(), json!(radius_km));
            props.insert(
                "weight_pct".to_string(),
                json!(spread.sector_weight_pct[sector]),
            );
            props.insert("wind_dir".to_string(), json!(wind_bearing_deg));
            props.insert("horizon_hours".to_string(), json!(horizon_hours));

            polygon_feature(&polygon, props)
        })
        .collect();

    feature_collection(features, None)
}
