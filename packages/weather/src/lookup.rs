//! Caller-supplied lookup functions as provider tiers.

use async_trait::async_trait;
use wildfire_risk_weather_models::WeatherSignal;

use crate::{WeatherError, WeatherProvider};

/// Adapts a synchronous `Fn(lat, lon) -> Option<WeatherSignal>` into a
/// [`WeatherProvider`]. `None` is reported as
/// [`WeatherError::Unavailable`].
pub struct LookupFn<F> {
    id: String,
    lookup: F,
}

impl<F> LookupFn<F>
where
    F: Fn(f64, f64) -> Option<WeatherSignal> + Send + Sync,
{
    /// Wraps `lookup` under the provider id `id`.
    pub fn new(id: impl Into<String>, lookup: F) -> Self {
        Self {
            id: id.into(),
            lookup,
        }
    }
}

#[async_trait]
impl<F> WeatherProvider for LookupFn<F>
where
    F: Fn(f64, f64) -> Option<WeatherSignal> + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherSignal, WeatherError> {
        (self.lookup)(lat, lon).ok_or_else(|| WeatherError::Unavailable {
            message: format!("{} has no weather for ({lat}, {lon})", self.id),
        })
    }
}
