//! Fish well-being indicators: hunger/energy decay, feeding, happiness.
//!
//! Every operation takes a snapshot and returns a new one. Nothing here
//! keeps state between calls, reads a clock, or fails: out-of-range inputs
//! are clamped, never rejected.
//!
//! ```
//! use aquarium_logic::config::IndicatorConfig;
//! use aquarium_logic::indicators::{advance, feed_default, IndicatorState, MS_PER_HOUR};
//!
//! let config = IndicatorConfig::default();
//! let t0 = 0;
//! let fish = IndicatorState {
//!     last_fed_at: Some(t0),
//!     last_updated_at: Some(t0),
//!     ..IndicatorState::new(80.0, 70.0)
//! };
//!
//! let later = advance(&fish, t0 + 2 * MS_PER_HOUR, 100.0, &config);
//! assert_eq!(later.hunger, 50.0);
//! assert_eq!(later.energy, 50.0);
//!
//! let fed = feed_default(&later, t0 + 2 * MS_PER_HOUR, &config);
//! assert_eq!(fed.hunger, 85.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::IndicatorConfig;

/// Milliseconds since an arbitrary epoch.
pub type Timestamp = i64;

pub const MS_PER_HOUR: Timestamp = 3_600_000;

/// Floor for the happiness weight sum so all-zero weights never divide by zero.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// Upper bound of the cleanliness reading (spotless water).
pub const CLEANLINESS_MAX: f64 = 100.0;

/// Per-fish well-being snapshot. Owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorState {
    /// 100 = fully fed.
    pub hunger: f64,
    /// 100 = fully rested.
    pub energy: f64,
    /// Derived from hunger, energy and cleanliness; only [`advance`] writes it.
    pub happiness: f64,
    pub last_fed_at: Option<Timestamp>,
    /// Baseline for the next decay computation.
    pub last_updated_at: Option<Timestamp>,
}

impl IndicatorState {
    /// A freshly spawned, never-fed fish. Happiness starts at 0 until the
    /// first [`advance`] derives it.
    pub fn new(hunger: f64, energy: f64) -> Self {
        Self {
            hunger,
            energy,
            happiness: 0.0,
            last_fed_at: None,
            last_updated_at: None,
        }
    }

    /// Fully fed and rested.
    pub fn full() -> Self {
        Self::new(100.0, 100.0)
    }
}

/// Clamp without panicking on inverted bounds or NaN input.
fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Clamp a value to the configured indicator bounds.
pub fn clamp_indicator(value: f64, config: &IndicatorConfig) -> f64 {
    clamp_range(value, config.clamp_min, config.clamp_max)
}

/// Hours since the decay baseline: last update, else last feed, else `now`.
/// Never negative.
pub fn elapsed_hours(previous: &IndicatorState, now: Timestamp) -> f64 {
    let baseline = previous
        .last_updated_at
        .or(previous.last_fed_at)
        .unwrap_or(now);
    let elapsed_ms = now.saturating_sub(baseline);
    (elapsed_ms as f64 / MS_PER_HOUR as f64).max(0.0)
}

/// Extra decay fraction for a cleanliness reading. Spotless water gives 0,
/// filthy water gives the full configured penalty.
pub fn cleanliness_penalty(cleanliness: f64, config: &IndicatorConfig) -> f64 {
    let dirt = 1.0 - clamp_range(cleanliness, 0.0, CLEANLINESS_MAX) / CLEANLINESS_MAX;
    dirt * config.max_cleanliness_penalty.max(0.0)
}

/// Weighted blend of hunger, energy and cleanliness, clamped to bounds.
pub fn compute_happiness(
    hunger: f64,
    energy: f64,
    cleanliness: f64,
    config: &IndicatorConfig,
) -> f64 {
    let w = &config.happiness_weights;
    let cleanliness = clamp_range(cleanliness, 0.0, CLEANLINESS_MAX);
    let blended = hunger * w.hunger + energy * w.energy + cleanliness * w.cleanliness;
    clamp_indicator(blended / w.sum().max(WEIGHT_SUM_EPSILON), config)
}

fn decay(value: f64, hours: f64, rate_per_hour: f64, penalty: f64, config: &IndicatorConfig) -> f64 {
    let loss = hours * rate_per_hour.max(0.0) * (1.0 + penalty);
    clamp_indicator(value - loss, config)
}

/// Apply time decay up to `now` and re-derive happiness.
///
/// Calling twice with the same `now` is a no-op the second time: the first
/// call moves the baseline to `now`.
pub fn advance(
    previous: &IndicatorState,
    now: Timestamp,
    cleanliness: f64,
    config: &IndicatorConfig,
) -> IndicatorState {
    let hours = elapsed_hours(previous, now);
    let penalty = cleanliness_penalty(cleanliness, config);

    let hunger = decay(
        previous.hunger,
        hours,
        config.hunger_decay_per_hour,
        penalty,
        config,
    );
    let energy = decay(
        previous.energy,
        hours,
        config.energy_decay_per_hour,
        penalty,
        config,
    );

    IndicatorState {
        hunger,
        energy,
        happiness: compute_happiness(hunger, energy, cleanliness, config),
        last_fed_at: previous.last_fed_at,
        last_updated_at: Some(now),
    }
}

/// Restore hunger by `boost` and stamp the feed time.
///
/// Energy, happiness and the decay baseline are left alone; happiness stays
/// stale until the next [`advance`]. Negative boosts count as zero.
pub fn feed(
    state: &IndicatorState,
    boost: f64,
    feed_time: Timestamp,
    config: &IndicatorConfig,
) -> IndicatorState {
    IndicatorState {
        hunger: clamp_indicator(state.hunger + boost.max(0.0), config),
        last_fed_at: Some(feed_time),
        ..*state
    }
}

/// [`feed`] with the configured default boost.
pub fn feed_default(
    state: &IndicatorState,
    feed_time: Timestamp,
    config: &IndicatorConfig,
) -> IndicatorState {
    feed(state, config.feeding_boost, feed_time, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HappinessWeights;

    const T0: Timestamp = 1_700_000_000_000;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn settled(hunger: f64, energy: f64) -> IndicatorState {
        IndicatorState {
            last_fed_at: Some(T0),
            last_updated_at: Some(T0),
            ..IndicatorState::new(hunger, energy)
        }
    }

    #[test]
    fn test_two_hours_clean_water() {
        let s = advance(&settled(80.0, 70.0), T0 + 2 * MS_PER_HOUR, 100.0, &IndicatorConfig::default());
        assert!(approx(s.hunger, 50.0));
        assert!(approx(s.energy, 50.0));
        assert!(approx(s.happiness, 55.0));
        assert_eq!(s.last_fed_at, Some(T0));
        assert_eq!(s.last_updated_at, Some(T0 + 2 * MS_PER_HOUR));
    }

    #[test]
    fn test_two_hours_filthy_water() {
        let s = advance(&settled(80.0, 70.0), T0 + 2 * MS_PER_HOUR, 0.0, &IndicatorConfig::default());
        assert!(approx(s.hunger, 35.0));
        assert!(approx(s.energy, 40.0));
        // (35*0.5 + 40*0.4 + 0*0.1) / 1.0
        assert!(approx(s.happiness, 33.5));
    }

    #[test]
    fn test_fresh_fish_has_no_decay() {
        let fresh = IndicatorState::new(60.0, 60.0);
        let s = advance(&fresh, T0, 100.0, &IndicatorConfig::default());
        assert_eq!(s.hunger, 60.0);
        assert_eq!(s.energy, 60.0);
        assert_eq!(s.last_updated_at, Some(T0));
        assert_eq!(s.last_fed_at, None);
        // 60*0.5 + 60*0.4 + 100*0.1
        assert!(approx(s.happiness, 64.0));
    }

    #[test]
    fn test_baseline_falls_back_to_last_fed() {
        let fed_only = IndicatorState {
            last_fed_at: Some(T0),
            ..IndicatorState::new(90.0, 90.0)
        };
        assert!(approx(elapsed_hours(&fed_only, T0 + MS_PER_HOUR), 1.0));
        let s = advance(&fed_only, T0 + MS_PER_HOUR, 100.0, &IndicatorConfig::default());
        assert!(approx(s.hunger, 75.0));
        assert!(approx(s.energy, 80.0));
    }

    #[test]
    fn test_last_update_wins_over_last_fed() {
        let s = IndicatorState {
            last_fed_at: Some(T0),
            last_updated_at: Some(T0 + MS_PER_HOUR),
            ..IndicatorState::new(50.0, 50.0)
        };
        assert!(approx(elapsed_hours(&s, T0 + 2 * MS_PER_HOUR), 1.0));
    }

    #[test]
    fn test_clock_going_backwards_is_zero_elapsed() {
        let s = settled(50.0, 50.0);
        assert_eq!(elapsed_hours(&s, T0 - MS_PER_HOUR), 0.0);
        let after = advance(&s, T0 - MS_PER_HOUR, 100.0, &IndicatorConfig::default());
        assert_eq!(after.hunger, 50.0);
        assert_eq!(after.energy, 50.0);
    }

    #[test]
    fn test_same_now_is_idempotent() {
        let config = IndicatorConfig::default();
        let once = advance(&settled(80.0, 70.0), T0 + 5 * MS_PER_HOUR / 2, 40.0, &config);
        let twice = advance(&once, T0 + 5 * MS_PER_HOUR / 2, 40.0, &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_decay_floors_at_clamp_min() {
        let s = advance(&settled(10.0, 10.0), T0 + 10_000 * MS_PER_HOUR, -50.0, &IndicatorConfig::default());
        assert_eq!(s.hunger, 0.0);
        assert_eq!(s.energy, 0.0);
        assert_eq!(s.happiness, 0.0);
    }

    #[test]
    fn test_custom_bounds() {
        let config = IndicatorConfig {
            clamp_min: 20.0,
            clamp_max: 80.0,
            ..IndicatorConfig::default()
        };
        let s = advance(&settled(95.0, 5.0), T0, 100.0, &config);
        assert_eq!(s.hunger, 80.0);
        assert_eq!(s.energy, 20.0);
        assert!(s.happiness >= 20.0 && s.happiness <= 80.0);
    }

    #[test]
    fn test_penalty_interpolates_linearly() {
        let config = IndicatorConfig::default();
        assert_eq!(cleanliness_penalty(100.0, &config), 0.0);
        assert!(approx(cleanliness_penalty(50.0, &config), 0.25));
        assert!(approx(cleanliness_penalty(0.0, &config), 0.5));
        // out-of-range readings are clamped
        assert!(approx(cleanliness_penalty(-20.0, &config), 0.5));
        assert_eq!(cleanliness_penalty(250.0, &config), 0.0);
    }

    #[test]
    fn test_negative_rates_never_grow_values() {
        let config = IndicatorConfig {
            hunger_decay_per_hour: -15.0,
            energy_decay_per_hour: -10.0,
            max_cleanliness_penalty: -3.0,
            ..IndicatorConfig::default()
        };
        let s = advance(&settled(40.0, 40.0), T0 + 3 * MS_PER_HOUR, 0.0, &config);
        assert_eq!(s.hunger, 40.0);
        assert_eq!(s.energy, 40.0);
    }

    #[test]
    fn test_zero_weights_do_not_divide_by_zero() {
        let config = IndicatorConfig {
            happiness_weights: HappinessWeights {
                hunger: 0.0,
                energy: 0.0,
                cleanliness: 0.0,
            },
            ..IndicatorConfig::default()
        };
        let h = compute_happiness(80.0, 80.0, 80.0, &config);
        assert!(h.is_finite());
        assert_eq!(h, 0.0);
    }

    #[test]
    fn test_happiness_uses_weight_ratio() {
        let config = IndicatorConfig {
            happiness_weights: HappinessWeights {
                hunger: 2.0,
                energy: 2.0,
                cleanliness: 0.0,
            },
            ..IndicatorConfig::default()
        };
        assert!(approx(compute_happiness(80.0, 40.0, 0.0, &config), 60.0));
    }

    #[test]
    fn test_nan_cleanliness_is_clamped() {
        let config = IndicatorConfig::default();
        let s = advance(&settled(80.0, 70.0), T0 + MS_PER_HOUR, f64::NAN, &config);
        assert!(s.hunger.is_finite());
        assert!(s.happiness.is_finite());
    }

    #[test]
    fn test_feed_adds_boost() {
        let config = IndicatorConfig::default();
        let s = feed(&settled(40.0, 55.0), 35.0, T0 + 1, &config);
        assert!(approx(s.hunger, 75.0));
        assert_eq!(s.energy, 55.0);
        assert_eq!(s.last_fed_at, Some(T0 + 1));
        assert_eq!(s.last_updated_at, Some(T0));
    }

    #[test]
    fn test_feed_clamps_at_max() {
        let s = feed(&settled(90.0, 55.0), 35.0, T0, &IndicatorConfig::default());
        assert_eq!(s.hunger, 100.0);
    }

    #[test]
    fn test_feed_negative_boost_is_ignored() {
        let s = feed(&settled(40.0, 55.0), -30.0, T0, &IndicatorConfig::default());
        assert_eq!(s.hunger, 40.0);
        assert_eq!(s.last_fed_at, Some(T0));
    }

    #[test]
    fn test_feed_leaves_happiness_stale() {
        let config = IndicatorConfig::default();
        let ticked = advance(&settled(30.0, 60.0), T0 + MS_PER_HOUR, 100.0, &config);
        let fed = feed_default(&ticked, T0 + MS_PER_HOUR, &config);
        assert_eq!(fed.happiness, ticked.happiness);
        assert!(fed.hunger > ticked.hunger);

        // the next tick at the same instant refreshes it without extra decay
        let refreshed = advance(&fed, T0 + MS_PER_HOUR, 100.0, &config);
        assert_eq!(refreshed.hunger, fed.hunger);
        assert!(refreshed.happiness > fed.happiness);
    }

    #[test]
    fn test_feed_default_uses_configured_boost() {
        let config = IndicatorConfig {
            feeding_boost: 12.0,
            ..IndicatorConfig::default()
        };
        let s = feed_default(&settled(10.0, 10.0), T0, &config);
        assert!(approx(s.hunger, 22.0));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let config = IndicatorConfig::default();
        let before = settled(80.0, 70.0);
        let copy = before;
        let _ = advance(&before, T0 + MS_PER_HOUR, 10.0, &config);
        let _ = feed(&before, 10.0, T0, &config);
        assert_eq!(before, copy);
    }

    #[test]
    fn test_state_json_shape() {
        let json = serde_json::to_value(settled(1.0, 2.0)).unwrap();
        assert_eq!(json["hunger"], 1.0);
        assert_eq!(json["last_fed_at"], T0);
        let fresh = serde_json::to_value(IndicatorState::full()).unwrap();
        assert!(fresh["last_updated_at"].is_null());
    }
}
