//! Radial spread rate with wind-biased sectors.
//!
//! The base rate scales linearly with wind speed and is amplified by dry
//! air and heavy fuel. Each cardinal sector is then stretched or shrunk by
//! the cosine of its angle to the downwind direction, and sector areas
//! (proportional to radius squared) become integer percentage weights.

use wildfire_risk_spread_models::{Sector, SectorMap, SpreadResult};
use wildfire_risk_weather_models::WeatherSignal;

/// Tunable constants of the spread heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadParams {
    /// Base km/h of spread per km/h of wind.
    pub k0: f64,
    /// Humidity sensitivity.
    pub k_h: f64,
    /// Fuel sensitivity.
    pub k_f: f64,
    /// Directional bias strength, 0 (isotropic) to 1.
    pub alpha: f64,
    /// Lower clamp on the base rate, km/h.
    pub r_min: f64,
    /// Upper clamp on the base rate, km/h.
    pub r_max: f64,
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            k0: 0.12,
            k_h: 0.8,
            k_f: 0.6,
            alpha: 0.5,
            r_min: 0.5,
            r_max: 8.0,
        }
    }
}

impl SpreadParams {
    /// `1 + k_h * (1 - h)` with `h` the humidity fraction clamped to 0-1.
    #[must_use]
    pub fn humidity_factor(&self, humidity_pct: f64) -> f64 {
        let h = humidity_pct.clamp(0.0, 100.0) / 100.0;
        1.0 + self.k_h * (1.0 - h)
    }

    /// `1 + k_f * f` with `f` the fuel index clamped to 0-1.
    #[must_use]
    pub fn fuel_factor(&self, fuel_index: f64) -> f64 {
        1.0 + self.k_f * fuel_index.clamp(0.0, 1.0)
    }

    /// Omnidirectional spread rate in km/h, clamped to `[r_min, r_max]`.
    #[must_use]
    pub fn base_rate_kmph(&self, weather: &WeatherSignal) -> f64 {
        let raw = self.k0
            * weather.wind_speed_kmph
            * self.humidity_factor(weather.humidity_pct)
            * self.fuel_factor(weather.fuel_index);
        // NaN clamps to r_min.
        raw.max(self.r_min).min(self.r_max)
    }

    /// Multiplier for `sector` given the bearing the wind blows from.
    ///
    /// Peaks at `1 + alpha` when the sector bearing equals
    /// `wind_bearing_deg` and bottoms out at `1 - alpha` opposite it.
    #[must_use]
    pub fn directional_bias(&self, sector: Sector, wind_bearing_deg: f64) -> f64 {
        1.0 + self.alpha * (sector.bearing_deg() - wind_bearing_deg).to_radians().cos()
    }
}

/// Projects spread over `horizon_hours` with the default parameters.
#[must_use]
pub fn compute_spread(weather: &WeatherSignal, horizon_hours: f64) -> SpreadResult {
    compute_spread_with(&SpreadParams::default(), weather, horizon_hours)
}

/// Projects spread over `horizon_hours` with explicit parameters.
#[must_use]
pub fn compute_spread_with(
    params: &SpreadParams,
    weather: &WeatherSignal,
    horizon_hours: f64,
) -> SpreadResult {
    let base_rate_kmph = params.base_rate_kmph(weather);

    let sector_radii_km = SectorMap::from_fn(|sector| {
        let bias = params.directional_bias(sector, weather.wind_bearing_deg);
        (base_rate_kmph * bias * horizon_hours).max(0.0)
    });

    let sector_weight_pct = area_weights(&sector_radii_km);

    log::debug!(
        "Spread r0={base_rate_kmph:.3} km/h over {horizon_hours}h from wind {} km/h @ {}°",
        weather.wind_speed_kmph,
        weather.wind_bearing_deg
    );

    SpreadResult {
        base_rate_kmph,
        sector_radii_km,
        sector_weight_pct,
    }
}

/// Converts sector radii into integer area percentages summing to 100.
///
/// Each sector's share is `r² / Σr²`, rounded half-to-even. The rounding
/// remainder goes to the first sector (in N, E, S, W order) holding the
/// largest weight. All-zero radii put the whole 100 on N.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn area_weights(radii_km: &SectorMap<f64>) -> SectorMap<i32> {
    let sum_sq: f64 = radii_km.values().map(|r| r * r).sum();
    let denom = if sum_sq == 0.0 { 1.0 } else { sum_sq };

    let mut weights = radii_km.map(|_, r| (100.0 * (r * r) / denom).round_ties_even() as i32);

    let remainder = 100 - weights.values().sum::<i32>();
    if remainder != 0 {
        let mut heaviest = Sector::N;
        for (sector, weight) in weights.iter() {
            if *weight > weights[heaviest] {
                heaviest = sector;
            }
        }
        weights[heaviest] += remainder;
    }

    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(wind: f64, bearing: f64, humidity: f64, fuel: f64) -> WeatherSignal {
        WeatherSignal {
            wind_speed_kmph: wind,
            wind_bearing_deg: bearing,
            humidity_pct: humidity,
            soil_moisture: 0.2,
            fuel_index: fuel,
            observed_at: None,
            source: "test".to_string(),
        }
    }

    #[test]
    fn worked_example_matches_hand_calculation() {
        let params = SpreadParams::default();
        let w = weather(20.0, 0.0, 50.0, 0.4);

        assert!((params.humidity_factor(50.0) - 1.4).abs() < 1e-12);
        assert!((params.fuel_factor(0.4) - 1.24).abs() < 1e-12);

        let result = compute_spread(&w, 3.0);
        assert!((result.base_rate_kmph - 4.1664).abs() < 1e-9);
        assert!((result.sector_radii_km[Sector::N] - 18.7488).abs() < 1e-9);
        assert!((result.sector_radii_km[Sector::S] - 6.2496).abs() < 1e-9);
        assert!((result.sector_radii_km[Sector::E] - 12.4992).abs() < 1e-9);

        // r² ratios 2.25 : 1 : 0.25 : 1
        let weights: Vec<i32> = result.sector_weight_pct.values().copied().collect();
        assert_eq!(weights, vec![50, 22, 6, 22]);
    }

    #[test]
    fn base_rate_is_clamped() {
        for wind in [0.0, 0.1, 5.0, 20.0, 60.0, 250.0, 1e6, -40.0] {
            let r0 = compute_spread(&weather(wind, 90.0, 20.0, 0.9), 1.0).base_rate_kmph;
            assert!((0.5..=8.0).contains(&r0), "wind={wind} r0={r0}");
        }
    }

    #[test]
    fn calm_air_hits_lower_clamp() {
        let r0 = compute_spread(&weather(0.0, 0.0, 50.0, 0.4), 3.0).base_rate_kmph;
        assert!((r0 - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn undefined_wind_hits_lower_clamp() {
        let r0 = compute_spread(&weather(f64::NAN, 0.0, 50.0, 0.4), 1.0).base_rate_kmph;
        assert!((r0 - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_humidity_and_fuel_are_clamped() {
        let params = SpreadParams::default();
        assert!((params.humidity_factor(-20.0) - 1.8).abs() < 1e-12);
        assert!((params.humidity_factor(140.0) - 1.0).abs() < 1e-12);
        assert!((params.fuel_factor(3.0) - 1.6).abs() < 1e-12);
        assert!((params.fuel_factor(-1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wind_bearing_selects_largest_sector() {
        for (bearing, expected) in [
            (0.0, Sector::N),
            (90.0, Sector::E),
            (180.0, Sector::S),
            (270.0, Sector::W),
        ] {
            let result = compute_spread(&weather(18.0, bearing, 40.0, 0.5), 2.0);
            let largest = result
                .sector_radii_km
                .iter()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(s, _)| s)
                .unwrap();
            assert_eq!(largest, expected, "bearing={bearing}");
        }
    }

    #[test]
    fn downwind_peak_uses_one_plus_alpha() {
        let params = SpreadParams::default();
        assert!((params.directional_bias(Sector::S, 180.0) - 1.5).abs() < 1e-12);
        assert!((params.directional_bias(Sector::N, 180.0) - 0.5).abs() < 1e-12);
        assert!((params.directional_bias(Sector::E, 180.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn weights_always_sum_to_100() {
        for wind in [0.0, 3.0, 18.0, 45.0, 120.0] {
            for bearing in (0..360).step_by(7) {
                for horizon in [0.0, 0.5, 3.0, 12.0] {
                    let w = weather(wind, f64::from(bearing), 35.0, 0.4);
                    let result = compute_spread(&w, horizon);
                    let sum: i32 = result.sector_weight_pct.values().sum();
                    assert_eq!(sum, 100, "wind={wind} bearing={bearing} h={horizon}");
                }
            }
        }
    }

    #[test]
    fn zero_horizon_puts_everything_on_north() {
        let result = compute_spread(&weather(20.0, 250.0, 62.0, 0.4), 0.0);
        assert!(result.sector_radii_km.values().all(|r| *r == 0.0));
        let weights: Vec<i32> = result.sector_weight_pct.values().copied().collect();
        assert_eq!(weights, vec![100, 0, 0, 0]);
    }

    #[test]
    fn negative_horizon_floors_radii_at_zero() {
        let result = compute_spread(&weather(20.0, 0.0, 50.0, 0.4), -2.0);
        assert!(result.sector_radii_km.values().all(|r| *r == 0.0));
    }

    #[test]
    fn remainder_goes_to_first_maximum() {
        // Three equal sectors round to 33 each; the missing 1 goes to N.
        let radii = SectorMap::from_fn(|s| if s == Sector::W { 0.0 } else { 1.0 });
        let weights: Vec<i32> = area_weights(&radii).values().copied().collect();
        assert_eq!(weights, vec![34, 33, 33, 0]);
    }

    #[test]
    fn exact_half_shares_round_to_even() {
        // Bearing 60° puts S at exactly 12.5%, which must round down to 12.
        let result = compute_spread(&weather(5.0, 60.0, 62.0, 0.4), 1.0);
        let weights: Vec<i32> = result.sector_weight_pct.values().copied().collect();
        assert_eq!(weights, vec![35, 46, 12, 7]);
    }

    #[test]
    fn surplus_is_taken_from_first_maximum() {
        // Shares of 30.6, 30.6, 30.6 and 8.2 round to 101; N gives one back.
        let radii = SectorMap::from_fn(|s| match s {
            Sector::W => 8.2_f64.sqrt(),
            _ => 30.6_f64.sqrt(),
        });
        let weights: Vec<i32> = area_weights(&radii).values().copied().collect();
        assert_eq!(weights, vec![30, 31, 31, 8]);
    }

    #[test]
    fn remainder_tie_break_uses_compass_order() {
        // E and W tie for the maximum; E comes first.
        let radii = SectorMap::from_fn(|s| match s {
            Sector::N | Sector::S => 0.0,
            Sector::E | Sector::W => 1.0,
        });
        let weights: Vec<i32> = area_weights(&radii).values().copied().collect();
        assert_eq!(weights, vec![0, 50, 0, 50]);

        let radii = SectorMap::from_fn(|s| match s {
            Sector::N => 0.0,
            _ => 1.0,
        });
        let weights: Vec<i32> = area_weights(&radii).values().copied().collect();
        assert_eq!(weights, vec![0, 34, 33, 33]);
    }

    #[test]
    fn fallback_weather_projects_toward_west_southwest() {
        // Fallback wind comes from 250°, so W (270°) is the nearest sector.
        let result = compute_spread(&WeatherSignal::fallback(), 3.0);
        let sum: i32 = result.sector_weight_pct.values().sum();
        assert_eq!(sum, 100);
        assert!(result.sector_radii_km[Sector::W] > result.sector_radii_km[Sector::E]);
        assert!(result.sector_radii_km[Sector::S] > result.sector_radii_km[Sector::N]);
    }
}
