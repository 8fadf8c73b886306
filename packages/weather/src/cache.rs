//! In-memory expiring cache of recent weather answers.
//!
//! Entries are `(value, expires_at)` pairs. Every read and write takes the
//! current time from the caller, so expiry is deterministic under test.
//! Nothing survives a restart.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use wildfire_risk_weather_models::WeatherSignal;

use crate::{WeatherError, WeatherProvider};

/// Identifier of the cache tier in logs and failures.
pub const CACHE_PROVIDER_ID: &str = "cache";

/// Coordinates rounded to two decimals (~1 km), used as the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    lat_centi: i64,
    lon_centi: i64,
}

impl CacheKey {
    /// Buckets `(lat, lon)` to the nearest hundredth of a degree.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat_centi: (lat * 100.0).round() as i64,
            lon_centi: (lon * 100.0).round() as i64,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

/// A map whose entries stop being returned once `now >= expires_at`.
#[derive(Debug)]
pub struct ExpiringCache<K, V> {
    ttl: TimeDelta,
    entries: Mutex<BTreeMap<K, Entry<V>>>,
}

/// The cache used by the weather resolver.
pub type WeatherCache = ExpiringCache<CacheKey, WeatherSignal>;

impl<K: Ord, V: Clone> ExpiringCache<K, V> {
    /// Creates an empty cache whose entries live for `ttl`.
    #[must_use]
    pub const fn new(ttl: TimeDelta) -> Self {
        Self {
            ttl,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Creates an empty cache whose entries live for `secs` seconds.
    #[must_use]
    pub fn with_ttl_secs(secs: u64) -> Self {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        Self::new(TimeDelta::try_seconds(secs).unwrap_or(TimeDelta::MAX))
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<K, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the live value for `key`, dropping it if it has expired.
    pub fn get(&self, key: &K, now: DateTime<Utc>) -> Option<V> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `value` under `key`, expiring `ttl` after `now`. Entries
    /// already expired at `now` are dropped first.
    pub fn insert(&self, key: K, value: V, now: DateTime<Utc>) {
        let expires_at = now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut entries = self.lock();
        entries.retain(|_, entry| now < entry.expires_at);
        entries.insert(key, Entry { value, expires_at });
    }

    /// Returns the live value for `key`, or computes, stores and returns a
    /// fresh one if it is missing or expired.
    ///
    /// # Errors
    ///
    /// Propagates the error from `refresh`; nothing is stored in that case.
    pub fn get_or_refresh<E>(
        &self,
        key: K,
        now: DateTime<Utc>,
        refresh: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key, now) {
            return Ok(value);
        }
        let value = refresh()?;
        self.insert(key, value.clone(), now);
        Ok(value)
    }

    /// Drops every entry that has expired at `now`. Returns how many were
    /// removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| now < entry.expires_at);
        before - entries.len()
    }

    /// Number of stored entries, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Provider tier that answers from a [`WeatherCache`].
pub struct CachedLookup {
    cache: Arc<WeatherCache>,
}

impl CachedLookup {
    /// Wraps a shared cache as a provider tier.
    #[must_use]
    pub const fn new(cache: Arc<WeatherCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl WeatherProvider for CachedLookup {
    fn id(&self) -> &str {
        CACHE_PROVIDER_ID
    }

    fn cacheable(&self) -> bool {
        false
    }

    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherSignal, WeatherError> {
        // A miss falls through to the next tier.
        self.cache
            .get_or_refresh(CacheKey::new(lat, lon), Utc::now(), || {
                Err(WeatherError::Unavailable {
                    message: format!("no cached weather near ({lat}, {lon})"),
                })
            })
    }
}
