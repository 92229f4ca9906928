//! Integration tests for a fish's indicator lifecycle.
//!
//! Exercises: config overrides → spawn → ticks → feeding → display tiers.

use aquarium_logic::config::{validate_config, IndicatorConfig};
use aquarium_logic::indicators::{
    advance, feed, feed_default, IndicatorState, Timestamp, MS_PER_HOUR,
};
use aquarium_logic::status::{most_urgent, summarize, IndicatorKind, WellbeingTier};

const T0: Timestamp = 1_700_000_000_000;

// ── Helpers ────────────────────────────────────────────────────────────

fn settled(hunger: f64, energy: f64) -> IndicatorState {
    IndicatorState {
        last_fed_at: Some(T0),
        last_updated_at: Some(T0),
        ..IndicatorState::new(hunger, energy)
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Reference scenarios ────────────────────────────────────────────────

#[test]
fn two_hours_in_clean_water() {
    let s = advance(
        &settled(80.0, 70.0),
        T0 + 2 * MS_PER_HOUR,
        100.0,
        &IndicatorConfig::default(),
    );
    assert!(approx(s.hunger, 50.0));
    assert!(approx(s.energy, 50.0));
    assert!(approx(s.happiness, 55.0));
}

#[test]
fn two_hours_in_filthy_water() {
    let s = advance(
        &settled(80.0, 70.0),
        T0 + 2 * MS_PER_HOUR,
        0.0,
        &IndicatorConfig::default(),
    );
    assert!(approx(s.hunger, 35.0));
    assert!(approx(s.energy, 40.0));
}

#[test]
fn feeding_boost_and_cap() {
    let config = IndicatorConfig::default();
    assert!(approx(feed(&settled(40.0, 50.0), 35.0, T0, &config).hunger, 75.0));
    assert_eq!(feed(&settled(90.0, 50.0), 35.0, T0, &config).hunger, 100.0);
}

// ── Lifecycle ──────────────────────────────────────────────────────────

#[test]
fn many_small_ticks_match_one_large_step() {
    let config = IndicatorConfig::default();
    let start = settled(100.0, 100.0);

    let mut ticked = start;
    for minute in 1..=180 {
        ticked = advance(&ticked, T0 + minute * 60_000, 60.0, &config);
    }
    let jumped = advance(&start, T0 + 3 * MS_PER_HOUR, 60.0, &config);

    assert!((ticked.hunger - jumped.hunger).abs() < 1e-6);
    assert!((ticked.energy - jumped.energy).abs() < 1e-6);
    assert!((ticked.happiness - jumped.happiness).abs() < 1e-6);
}

#[test]
fn neglected_fish_becomes_distressed_then_recovers() {
    let config = IndicatorConfig::default();
    let mut fish = advance(&IndicatorState::full(), T0, 100.0, &config);
    assert_eq!(summarize(&fish, &config).happiness, WellbeingTier::Thriving);

    fish = advance(&fish, T0 + 6 * MS_PER_HOUR, 20.0, &config);
    assert_eq!(summarize(&fish, &config).hunger, WellbeingTier::Distressed);
    assert_eq!(most_urgent(&fish, &config, 0.25), Some(IndicatorKind::Hunger));

    fish = feed_default(&fish, T0 + 6 * MS_PER_HOUR, &config);
    fish = feed_default(&fish, T0 + 6 * MS_PER_HOUR, &config);
    fish = advance(&fish, T0 + 6 * MS_PER_HOUR, 100.0, &config);
    assert_eq!(summarize(&fish, &config).hunger, WellbeingTier::Content);
    assert_eq!(fish.last_fed_at, Some(T0 + 6 * MS_PER_HOUR));
}

#[test]
fn json_config_drives_the_model() {
    let config = IndicatorConfig::from_json(
        r#"{ "hunger_decay_per_hour": 30.0, "max_cleanliness_penalty": 0.0 }"#,
    )
    .unwrap();
    assert!(validate_config(&config).is_empty());

    let s = advance(&settled(80.0, 70.0), T0 + MS_PER_HOUR, 0.0, &config);
    assert!(approx(s.hunger, 50.0));
    assert!(approx(s.energy, 60.0));
}

#[test]
fn state_survives_json_round_trip_between_ticks() {
    let config = IndicatorConfig::default();
    let s = advance(&settled(80.0, 70.0), T0 + MS_PER_HOUR, 75.0, &config);
    let json = serde_json::to_string(&s).unwrap();
    let restored: IndicatorState = serde_json::from_str(&json).unwrap();
    assert_eq!(
        advance(&restored, T0 + 2 * MS_PER_HOUR, 75.0, &config),
        advance(&s, T0 + 2 * MS_PER_HOUR, 75.0, &config)
    );
}
