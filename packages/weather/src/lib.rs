#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather resolution for the spread model.
//!
//! A [`WeatherResolver`] walks an ordered list of provider tiers, giving
//! each exactly one attempt:
//!
//! 1. **Live providers** (e.g. [`open_meteo::OpenMeteoProvider`]) with a
//!    short request timeout.
//! 2. **Lookup tiers** such as the in-memory [`cache::CachedLookup`] or a
//!    caller-supplied [`lookup::LookupFn`].
//! 3. The fixed [`WeatherSignal::fallback`] record when every tier fails.
//!
//! Failures never reach the caller as errors. They are logged and carried
//! in the returned [`Resolution`] so the reason for a fallback stays
//! visible.
//!
//! Tier order comes from the TOML files in `services/` (see
//! [`service_registry`]).

pub mod cache;
pub mod lookup;
pub mod open_meteo;
pub mod service_registry;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use wildfire_risk_weather_models::WeatherSignal;

use crate::cache::{CacheKey, CachedLookup, WeatherCache};
use crate::open_meteo::OpenMeteoProvider;
use crate::service_registry::{ProviderConfig, WeatherService};

/// Errors from a single provider attempt.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("Unexpected HTTP status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The provider has nothing for this location.
    #[error("Unavailable: {message}")]
    Unavailable {
        /// Why no record was produced.
        message: String,
    },
}

/// A source of [`WeatherSignal`] records.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Stable identifier used in logs and [`ProviderFailure`]s.
    fn id(&self) -> &str;

    /// Whether successful answers from this provider should be written to
    /// the resolver's cache.
    fn cacheable(&self) -> bool {
        true
    }

    /// Makes one attempt to produce a record for `(lat, lon)`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] if the provider cannot produce a record.
    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherSignal, WeatherError>;
}

/// A provider tier that failed during resolution.
#[derive(Debug)]
pub struct ProviderFailure {
    /// The failing provider's [`WeatherProvider::id`].
    pub provider: String,
    /// What went wrong.
    pub error: WeatherError,
}

/// Outcome of [`WeatherResolver::resolve`].
#[derive(Debug)]
pub struct Resolution {
    /// The selected record. Always present.
    pub signal: WeatherSignal,
    /// Tiers that failed before `signal` was selected, in attempt order.
    pub failures: Vec<ProviderFailure>,
}

/// Runtime switches for [`WeatherResolver::from_services`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Skip live (network) providers entirely.
    pub offline: bool,
    /// Overrides the cache TTL from the service configuration.
    pub cache_ttl_secs: Option<u64>,
}

impl ResolverOptions {
    /// Reads `WEATHER_OFFLINE` and `WEATHER_CACHE_TTL_SECS`.
    ///
    /// `WEATHER_OFFLINE` counts as set for `1`, `true` or `yes`. An
    /// unparseable TTL is ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let offline = std::env::var("WEATHER_OFFLINE")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let cache_ttl_secs = std::env::var("WEATHER_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| match v.trim().parse() {
                Ok(ttl) => Some(ttl),
                Err(e) => {
                    log::warn!("Ignoring invalid WEATHER_CACHE_TTL_SECS={v:?}: {e}");
                    None
                }
            });

        Self {
            offline,
            cache_ttl_secs,
        }
    }
}

/// Ordered provider tiers with a fixed fallback.
#[derive(Default)]
pub struct WeatherResolver {
    providers: Vec<Arc<dyn WeatherProvider>>,
    cache: Option<Arc<WeatherCache>>,
}

impl WeatherResolver {
    /// Creates a resolver with no tiers. It always returns the fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider tier.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Appends a cache tier at this position and records every cacheable
    /// success into it.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<WeatherCache>) -> Self {
        self.providers
            .push(Arc::new(CachedLookup::new(Arc::clone(&cache))));
        self.cache = Some(cache);
        self
    }

    /// Builds tiers from enabled service configurations in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if an HTTP client cannot be built.
    pub fn from_services(
        services: &[WeatherService],
        options: ResolverOptions,
    ) -> Result<Self, WeatherError> {
        let mut resolver = Self::new();

        for service in services.iter().filter(|s| s.enabled) {
            match &service.provider {
                ProviderConfig::OpenMeteo { .. } if options.offline => {
                    log::info!("Offline mode: skipping live provider {}", service.id);
                }
                ProviderConfig::OpenMeteo {
                    base_url,
                    timeout_secs,
                    default_fuel_index,
                    default_soil_moisture,
                } => {
                    let provider = OpenMeteoProvider::new(
                        &service.id,
                        base_url,
                        *timeout_secs,
                        *default_fuel_index,
                        *default_soil_moisture,
                    )?;
                    log::info!("Weather tier {}: {}", service.priority, service.name);
                    resolver = resolver.with_provider(Arc::new(provider));
                }
                ProviderConfig::Cache { ttl_secs } => {
                    let ttl = options.cache_ttl_secs.unwrap_or(*ttl_secs);
                    log::info!(
                        "Weather tier {}: {} (ttl {ttl}s)",
                        service.priority,
                        service.name
                    );
                    resolver = resolver.with_cache(Arc::new(WeatherCache::with_ttl_secs(ttl)));
                }
            }
        }

        Ok(resolver)
    }

    /// Number of configured tiers, not counting the fallback.
    #[must_use]
    pub fn tier_count(&self) -> usize {
        self.providers.len()
    }

    /// Resolves weather for `(lat, lon)`. Never fails.
    pub async fn resolve(&self, lat: f64, lon: f64) -> Resolution {
        let mut failures = Vec::new();

        for provider in &self.providers {
            match provider.fetch(lat, lon).await {
                Ok(signal) => {
                    log::debug!(
                        "Weather for ({lat}, {lon}) from {} after {} failed tier(s)",
                        provider.id(),
                        failures.len()
                    );
                    if provider.cacheable() {
                        if let Some(cache) = &self.cache {
                            cache.insert(CacheKey::new(lat, lon), signal.clone(), Utc::now());
                        }
                    }
                    return Resolution { signal, failures };
                }
                Err(error) => {
                    log::warn!(
                        "Weather provider {} failed for ({lat}, {lon}): {error}",
                        provider.id()
                    );
                    failures.push(ProviderFailure {
                        provider: provider.id().to_string(),
                        error,
                    });
                }
            }
        }

        log::info!("Using demo fallback weather for ({lat}, {lon})");
        Resolution {
            signal: WeatherSignal::fallback(),
            failures,
        }
    }
}
