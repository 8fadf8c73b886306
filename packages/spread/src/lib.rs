#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coarse fire-spread projection.
//!
//! This is a geometric heuristic, not a fire-physics solver. Given a
//! [`WeatherSignal`](wildfire_risk_weather_models::WeatherSignal) and a
//! horizon it produces a base spread rate, per-sector travel distances and
//! area-weighted triage percentages ([`model`]). The same radii can be
//! drawn as wedges ([`footprint`]). A separate user-driven what-if
//! footprint lives in [`scenario`].

pub mod footprint;
pub mod model;
pub mod scenario;
pub mod validation;

pub use model::{SpreadParams, area_weights, compute_spread, compute_spread_with};
