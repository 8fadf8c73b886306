//! Open-Meteo hourly forecast provider.
//!
//! Reads the first hourly value of wind speed, wind direction, relative
//! humidity and shallow soil moisture. Open-Meteo has no fuel data, so the
//! fuel index is a configured constant.
//!
//! See <https://open-meteo.com/en/docs>

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use wildfire_risk_weather_models::WeatherSignal;

use crate::{WeatherError, WeatherProvider};

/// Provenance tag written into every record from this provider.
pub const SOURCE: &str = "open-meteo";

const HOURLY_FIELDS: &str =
    "windspeed_10m,winddirection_10m,relativehumidity_2m,soil_moisture_0_to_7cm";

/// Live provider backed by the Open-Meteo forecast API.
pub struct OpenMeteoProvider {
    id: String,
    client: reqwest::Client,
    base_url: String,
    default_fuel_index: f64,
    default_soil_moisture: f64,
}

impl OpenMeteoProvider {
    /// Creates a provider whose requests time out after `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the HTTP client cannot be built.
    pub fn new(
        id: &str,
        base_url: &str,
        timeout_secs: u64,
        default_fuel_index: f64,
        default_soil_moisture: f64,
    ) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            id: id.to_string(),
            client,
            base_url: base_url.to_string(),
            default_fuel_index,
            default_soil_moisture,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherSignal, WeatherError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("past_days", "0".to_string()),
                ("forecast_days", "1".to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_response(
            &body,
            Utc::now(),
            self.default_fuel_index,
            self.default_soil_moisture,
        )
    }
}

/// Extracts the first hourly element of each field into a record.
///
/// A missing or empty soil moisture series falls back to
/// `default_soil_moisture`; every other field is required.
fn parse_response(
    body: &serde_json::Value,
    observed_at: DateTime<Utc>,
    default_fuel_index: f64,
    default_soil_moisture: f64,
) -> Result<WeatherSignal, WeatherError> {
    let hourly = body.get("hourly").ok_or_else(|| WeatherError::Parse {
        message: "Missing hourly block in Open-Meteo response".to_string(),
    })?;

    let first = |field: &str| {
        hourly
            .get(field)
            .and_then(serde_json::Value::as_array)
            .and_then(|series| series.first())
            .and_then(serde_json::Value::as_f64)
    };

    let required = |field: &str| {
        first(field).ok_or_else(|| WeatherError::Parse {
            message: format!("Missing hourly.{field}[0] in Open-Meteo response"),
        })
    };

    Ok(WeatherSignal {
        wind_speed_kmph: required("windspeed_10m")?,
        wind_bearing_deg: required("winddirection_10m")?,
        humidity_pct: required("relativehumidity_2m")?,
        soil_moisture: first("soil_moisture_0_to_7cm").unwrap_or(default_soil_moisture),
        fuel_index: default_fuel_index,
        observed_at: Some(observed_at),
        source: SOURCE.to_string(),
    })
}
