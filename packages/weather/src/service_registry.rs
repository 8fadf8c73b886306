//! Compile-time registry of weather provider configurations.
//!
//! Each provider tier is defined in a TOML file under `services/`. The
//! registry embeds these at compile time and exposes them via
//! [`all_services`] and [`enabled_services`].

use serde::Deserialize;

/// A weather provider tier loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherService {
    /// Unique identifier (e.g., `"open_meteo"`, `"cache"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this tier is consulted during resolution.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Attempt order; lower values run first.
    pub priority: u32,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Open-Meteo hourly forecast API.
    OpenMeteo {
        /// Forecast endpoint (e.g., `"https://api.open-meteo.com/v1/forecast"`).
        base_url: String,
        /// Per-request timeout in seconds.
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
        /// Fuel index reported for every record (no fuel data upstream).
        default_fuel_index: f64,
        /// Soil moisture used when the series is absent.
        default_soil_moisture: f64,
    },
    /// In-memory cache of recent successful lookups.
    Cache {
        /// How long a cached record stays usable.
        ttl_secs: u64,
    },
}

const fn default_true() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    6
}

impl WeatherService {
    /// Whether this tier makes network calls.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self.provider, ProviderConfig::OpenMeteo { .. })
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("open_meteo", include_str!("../services/open_meteo.toml")),
    ("cache", include_str!("../services/cache.toml")),
];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 2;

/// Returns all weather service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<WeatherService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse weather service '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled services, sorted by priority (ascending).
#[must_use]
pub fn enabled_services() -> Vec<WeatherService> {
    let mut services: Vec<WeatherService> =
        all_services().into_iter().filter(|s| s.enabled).collect();
    services.sort_by_key(|s| s.priority);
    services
}
