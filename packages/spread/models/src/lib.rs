#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Compass sector types and spread projection results.
//!
//! Sector collections are fixed-size and always iterate in N, E, S, W
//! order. Tie-breaks in the spread model depend on that order.

use std::ops::{Index, IndexMut};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the four cardinal compass sectors.
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
    EnumString,
    AsRefStr,
)]
pub enum Sector {
    /// Spread toward bearing 0°.
    N,
    /// Spread toward bearing 90°.
    E,
    /// Spread toward bearing 180°.
    S,
    /// Spread toward bearing 270°.
    W,
}

impl Sector {
    /// All sectors in iteration order.
    pub const ALL: [Self; 4] = [Self::N, Self::E, Self::S, Self::W];

    /// Compass bearing the sector points toward, in degrees.
    #[must_use]
    pub const fn bearing_deg(self) -> f64 {
        match self {
            Self::N => 0.0,
            Self::E => 90.0,
            Self::S => 180.0,
            Self::W => 270.0,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// A value per [`Sector`], stored in N, E, S, W order.
///
/// Serializes as a JSON object keyed `"N"`, `"E"`, `"S"`, `"W"` in that
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectorMap<T>([T; 4]);

impl<T> SectorMap<T> {
    /// Builds a map by evaluating `f` for each sector in order.
    pub fn from_fn(mut f: impl FnMut(Sector) -> T) -> Self {
        Self(Sector::ALL.map(&mut f))
    }

    /// Iterates `(sector, value)` pairs in N, E, S, W order.
    pub fn iter(&self) -> impl Iterator<Item = (Sector, &T)> {
        Sector::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterates values in N, E, S, W order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    /// Applies `f` to every value, keeping sector positions.
    pub fn map<U>(&self, mut f: impl FnMut(Sector, &T) -> U) -> SectorMap<U> {
        SectorMap::from_fn(|sector| f(sector, &self[sector]))
    }
}

impl<T> Index<Sector> for SectorMap<T> {
    type Output = T;

    fn index(&self, sector: Sector) -> &T {
        &self.0[sector.index()]
    }
}

impl<T> IndexMut<Sector> for SectorMap<T> {
    fn index_mut(&mut self, sector: Sector) -> &mut T {
        &mut self.0[sector.index()]
    }
}

impl<T: Serialize> Serialize for SectorMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (sector, value) in self.iter() {
            map.serialize_entry(sector.as_ref(), value)?;
        }
        map.end()
    }
}

/// Outcome of a spread projection for one weather signal and horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadResult {
    /// Omnidirectional spread rate in km/h, clamped to the model bounds.
    pub base_rate_kmph: f64,
    /// Distance travelled over the horizon in each sector, in km.
    pub sector_radii_km: SectorMap<f64>,
    /// Share of exposed area per sector. Always sums to exactly 100.
    pub sector_weight_pct: SectorMap<i32>,
}

/// Fuel moisture regime for what-if scenarios.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MoistureRegime {
    /// Dry fuels spread faster.
    Dry,
    /// Baseline.
    #[default]
    Normal,
    /// Wet fuels spread slower.
    Wet,
}

impl MoistureRegime {
    /// Multiplier applied to the scenario radius.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Dry => 1.3,
            Self::Normal => 1.0,
            Self::Wet => 0.7,
        }
    }

    /// Parses a regime name, treating anything unrecognized as
    /// [`MoistureRegime::Normal`].
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.trim().parse().unwrap_or_default()
    }
}

/// Headline numbers shown next to a what-if footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMeta {
    /// Area of the outer square footprint in km², rounded to 2 decimals.
    pub area_km2: f64,
    /// Rough population inside the footprint.
    pub pop_exposed: i64,
    /// Rough count of assets inside the footprint.
    pub assets_exposed: i64,
    /// Growth versus the one-hour horizon, e.g. `"+320 vs 1h"`.
    pub delta: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sectors_iterate_in_compass_order() {
        let map = SectorMap::from_fn(Sector::bearing_deg);
        let order: Vec<_> = map.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![Sector::N, Sector::E, Sector::S, Sector::W]);
        assert!((map[Sector::W] - 270.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sector_map_serializes_as_ordered_object() {
        let map = SectorMap::from_fn(|s| s.bearing_deg());
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"N":0.0,"E":90.0,"S":180.0,"W":270.0}"#);
    }

    #[test]
    fn index_mut_updates_one_sector() {
        let mut map: SectorMap<i32> = SectorMap::default();
        map[Sector::S] += 5;
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![0, 0, 5, 0]);
    }

    #[test]
    fn sector_parses_from_letter() {
        assert_eq!("E".parse::<Sector>().unwrap(), Sector::E);
        assert_eq!(Sector::W.to_string(), "W");
    }

    #[test]
    fn moisture_parse_is_lenient() {
        assert_eq!(MoistureRegime::parse_lenient("DRY"), MoistureRegime::Dry);
        assert_eq!(MoistureRegime::parse_lenient("wet"), MoistureRegime::Wet);
        assert_eq!(MoistureRegime::parse_lenient("soggy"), MoistureRegime::Normal);
        assert!((MoistureRegime::Dry.factor() - 1.3).abs() < f64::EPSILON);
    }
}
