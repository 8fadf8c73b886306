//! HTTP handler functions for the wildfire risk API.

use actix_web::{HttpResponse, web};
use thiserror::Error;
use wildfire_risk_server_models::{
    ApiBacktest, ApiError, ApiHealth, ApiSpread, ApiSpreadValidation, ApiStatusError, ApiTriage,
    SpreadQueryParams, TriageQueryParams, ValidateSpreadParams, WildfireQueryParams,
};
use wildfire_risk_spread::compute_spread;
use wildfire_risk_spread::footprint::sector_footprint;
use wildfire_risk_spread::scenario::{
    DEFAULT_HORIZON, DEFAULT_WIND_DIR_DEG, DEFAULT_WIND_KMPH, WildfireScenario,
};
use wildfire_risk_spread::validation::angular_error;
use wildfire_risk_spread_models::MoistureRegime;

use crate::{AppState, backtest};

/// Horizon in hours when `h` is omitted.
const DEFAULT_HORIZON_HOURS: f64 = 3.0;

/// A query parameter that could not be used.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A required parameter was absent.
    #[error("missing query parameter: {name}")]
    Missing {
        /// Parameter name.
        name: &'static str,
    },
    /// A parameter was present but not a finite number.
    #[error("invalid number for {name}: {value:?}")]
    Invalid {
        /// Parameter name.
        name: &'static str,
        /// The raw value as received.
        value: String,
    },
}

fn parse_f64(name: &'static str, value: &str) -> Result<f64, QueryError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QueryError::Invalid {
            name,
            value: value.to_string(),
        })
}

fn required_f64(name: &'static str, value: Option<&str>) -> Result<f64, QueryError> {
    value.map_or(Err(QueryError::Missing { name }), |v| parse_f64(name, v))
}

fn optional_f64(name: &'static str, value: Option<&str>, default: f64) -> Result<f64, QueryError> {
    value.map_or(Ok(default), |v| parse_f64(name, v))
}

/// Blank labels count as absent.
fn label_or<'a>(value: Option<&'a str>, default: &'a str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_lowercase()
}

fn parse_spread_query(params: &SpreadQueryParams) -> Result<(f64, f64, f64), QueryError> {
    Ok((
        required_f64("lat", params.lat.as_deref())?,
        required_f64("lon", params.lon.as_deref())?,
        optional_f64("h", params.h.as_deref(), DEFAULT_HORIZON_HOURS)?,
    ))
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/spread`
///
/// Projects fire spread from the resolved weather at `(lat, lon)` over
/// `h` hours.
pub async fn spread(
    state: web::Data<AppState>,
    params: web::Query<SpreadQueryParams>,
) -> HttpResponse {
    let (lat, lon, horizon_hours) = match parse_spread_query(&params) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::debug!("Rejecting spread request: {e}");
            return HttpResponse::BadRequest().json(ApiError::new("invalid lat/lon/h"));
        }
    };

    let resolution = state.weather.resolve(lat, lon).await;
    let result = compute_spread(&resolution.signal, horizon_hours);

    log::debug!(
        "Spread at ({lat}, {lon}) over {horizon_hours}h: r0={:.3} km/h from {}",
        result.base_rate_kmph,
        resolution.signal.source
    );

    HttpResponse::Ok().json(ApiSpread::new(
        lat,
        lon,
        horizon_hours,
        resolution.signal,
        result,
    ))
}

/// `GET /api/spread/sectors`
///
/// Same projection as [`spread`], drawn as four cardinal wedges.
pub async fn sectors(
    state: web::Data<AppState>,
    params: web::Query<SpreadQueryParams>,
) -> HttpResponse {
    let (lat, lon, horizon_hours) = match parse_spread_query(&params) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::debug!("Rejecting sectors request: {e}");
            return HttpResponse::BadRequest().json(ApiError::new("invalid lat/lon/h"));
        }
    };

    let weather = state.weather.resolve(lat, lon).await.signal;
    let result = compute_spread(&weather, horizon_hours);

    HttpResponse::Ok().json(sector_footprint(
        lat,
        lon,
        &result,
        weather.wind_bearing_deg,
        horizon_hours,
    ))
}

fn parse_wildfire_query(params: &WildfireQueryParams) -> Result<WildfireScenario, QueryError> {
    Ok(WildfireScenario {
        lat: required_f64("lat", params.lat.as_deref())?,
        lon: required_f64("lon", params.lon.as_deref())?,
        horizon: label_or(params.h.as_deref(), DEFAULT_HORIZON),
        wind_kmph: optional_f64("w", params.w.as_deref(), DEFAULT_WIND_KMPH)?,
        moisture: MoistureRegime::parse_lenient(&label_or(params.m.as_deref(), "normal")),
        wind_dir_deg: optional_f64(
            "wind_dir",
            params.wind_dir.as_deref(),
            DEFAULT_WIND_DIR_DEG,
        )?,
    })
}

/// `GET /api/spread/wildfire`
///
/// What-if footprint from user-chosen wind speed, moisture and horizon.
pub async fn wildfire(params: web::Query<WildfireQueryParams>) -> HttpResponse {
    match parse_wildfire_query(&params) {
        Ok(scenario) => HttpResponse::Ok().json(scenario.footprint()),
        Err(e) => {
            log::debug!("Rejecting wildfire request: {e}");
            HttpResponse::BadRequest().json(ApiError::new(e.to_string()))
        }
    }
}

/// `GET /api/triage`
///
/// Ranks the selected point and its four neighbours by priority.
pub async fn triage(params: web::Query<TriageQueryParams>) -> HttpResponse {
    let coords = required_f64("lat", params.lat.as_deref())
        .and_then(|lat| Ok((lat, required_f64("lon", params.lon.as_deref())?)));

    match coords {
        Ok((lat, lon)) => HttpResponse::Ok().json(ApiTriage {
            status: "success",
            items: wildfire_risk_triage::triage(lat, lon),
        }),
        Err(e) => {
            log::debug!("Rejecting triage request: {e}");
            HttpResponse::BadRequest().json(ApiStatusError::new(e.to_string()))
        }
    }
}

/// `GET /api/validate/spread`
///
/// Scores a predicted spread bearing against an observed one.
pub async fn validate_spread(params: web::Query<ValidateSpreadParams>) -> HttpResponse {
    let predicted = required_f64("predicted_angle_deg", params.predicted_angle_deg.as_deref());
    let expected = required_f64("expected_angle_deg", params.expected_angle_deg.as_deref());

    let (Ok(predicted_angle_deg), Ok(expected_angle_deg)) = (predicted, expected) else {
        return HttpResponse::BadRequest().json(ApiError::new("invalid predicted/expected"));
    };

    let error = angular_error(predicted_angle_deg, expected_angle_deg);

    HttpResponse::Ok().json(ApiSpreadValidation {
        predicted_angle_deg,
        expected_angle_deg,
        error_deg: error.error_deg,
        abs_error_deg: error.abs_error_deg,
        validated_at: chrono::Utc::now().timestamp(),
    })
}

/// `GET /api/backtest`
pub async fn backtest() -> HttpResponse {
    HttpResponse::Ok().json(ApiBacktest {
        status: "success",
        generated_at: chrono::Utc::now().timestamp(),
        metrics: backtest::SUMMARY,
        cases: backtest::cases(),
    })
}
