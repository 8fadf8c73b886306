#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the wildfire risk server.
//!
//! Query parameters arrive as raw strings so handlers can reject bad
//! numbers with the endpoint's own JSON error body instead of the
//! framework default. Response field names are `snake_case` to match the
//! map frontend.

use serde::{Deserialize, Serialize};
use wildfire_risk_spread_models::{SectorMap, SpreadResult};
use wildfire_risk_triage::TriagePoint;
use wildfire_risk_weather_models::WeatherSignal;

/// Query parameters for `GET /api/spread` and `GET /api/spread/sectors`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadQueryParams {
    /// Latitude.
    pub lat: Option<String>,
    /// Longitude.
    pub lon: Option<String>,
    /// Horizon in hours (default 3.0).
    pub h: Option<String>,
}

/// Query parameters for `GET /api/spread/wildfire`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WildfireQueryParams {
    /// Latitude.
    pub lat: Option<String>,
    /// Longitude.
    pub lon: Option<String>,
    /// Horizon label: `1h`, `3h`, `6h` or `12h`.
    pub h: Option<String>,
    /// Wind speed in km/h (default 20).
    pub w: Option<String>,
    /// Fuel moisture: `dry`, `normal` or `wet`.
    pub m: Option<String>,
    /// Wind direction in degrees (default 45).
    pub wind_dir: Option<String>,
}

/// Query parameters for `GET /api/triage`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriageQueryParams {
    /// Latitude.
    pub lat: Option<String>,
    /// Longitude.
    pub lon: Option<String>,
}

/// Query parameters for `GET /api/validate/spread`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateSpreadParams {
    /// Predicted spread bearing in degrees.
    pub predicted_angle_deg: Option<String>,
    /// Observed spread bearing in degrees.
    pub expected_angle_deg: Option<String>,
}

/// Response from the spread endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSpread {
    /// Requested latitude.
    pub lat: f64,
    /// Requested longitude.
    pub lon: f64,
    /// Projection horizon in hours.
    pub horizon_hours: f64,
    /// The weather the projection used, including its `source`.
    pub weather: WeatherSignal,
    /// Base spread rate in km/h.
    pub r0_kmph: f64,
    /// Distance travelled per sector over the horizon, in km.
    pub r_dir_km: SectorMap<f64>,
    /// Area share per sector; sums to 100.
    pub w_dir_pct: SectorMap<i32>,
}

impl ApiSpread {
    /// Assembles the response from a projection and the weather behind it.
    #[must_use]
    pub fn new(
        lat: f64,
        lon: f64,
        horizon_hours: f64,
        weather: WeatherSignal,
        spread: SpreadResult,
    ) -> Self {
        Self {
            lat,
            lon,
            horizon_hours,
            weather,
            r0_kmph: spread.base_rate_kmph,
            r_dir_km: spread.sector_radii_km,
            w_dir_pct: spread.sector_weight_pct,
        }
    }
}

/// Response from the triage endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiTriage {
    /// Always `"success"`.
    pub status: &'static str,
    /// Sites sorted by descending priority.
    pub items: Vec<TriagePoint>,
}

/// Error body used by the spread, wildfire and validation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// What was wrong with the request.
    pub error: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Error body used by the triage endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiStatusError {
    /// Always `"error"`.
    pub status: &'static str,
    /// What was wrong with the request.
    pub message: String,
}

impl ApiStatusError {
    /// Creates an error body.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

/// Response from the spread validation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSpreadValidation {
    /// Predicted bearing in degrees.
    pub predicted_angle_deg: f64,
    /// Observed bearing in degrees.
    pub expected_angle_deg: f64,
    /// `predicted - expected`.
    pub error_deg: f64,
    /// Magnitude of `error_deg`.
    pub abs_error_deg: f64,
    /// Unix seconds when the comparison was made.
    pub validated_at: i64,
}

/// Aggregate skill scores of past spread projections.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BacktestMetrics {
    /// Fraction of projected burn cells that burned.
    pub precision: f64,
    /// Fraction of burned cells that were projected.
    pub recall: f64,
    /// Mean warning lead time in hours.
    pub lead_time_h: f64,
}

/// One historical fire used for backtesting.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestCase {
    /// Case identifier.
    pub id: &'static str,
    /// Region name.
    pub region: &'static str,
    /// First day of the event (ISO date).
    pub start: &'static str,
    /// Last day of the event (ISO date).
    pub end: &'static str,
    /// Scores for this case.
    #[serde(flatten)]
    pub metrics: BacktestMetrics,
}

/// Response from the backtest endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiBacktest {
    /// Always `"success"`.
    pub status: &'static str,
    /// Unix seconds when the response was built.
    pub generated_at: i64,
    /// Aggregate scores across all cases.
    pub metrics: BacktestMetrics,
    /// Per-case scores.
    pub cases: Vec<BacktestCase>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
