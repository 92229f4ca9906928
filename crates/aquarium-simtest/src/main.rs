//! Aquarium Headless Simulation Harness
//!
//! Validates the well-being model and tank driver without any front-end.
//!
//! Usage:
//!   cargo run -p aquarium-simtest
//!   cargo run -p aquarium-simtest -- --verbose
//!   cargo run -p aquarium-simtest -- --config tuning.json

use aquarium_logic::config::{validate_config, IndicatorConfig};
use aquarium_logic::indicators::{
    self, advance, feed, feed_default, IndicatorState, Timestamp, MS_PER_HOUR,
};
use aquarium_logic::status::{self, WellbeingTier};
use aquarium_tank::{Tank, TankError, TickScheduler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Bundled tuning (partial override document) ──────────────────────────
const SLOW_TANK_JSON: &str = include_str!("../data/slow_tank.json");

const T0: Timestamp = 1_700_000_000_000;
const SWEEP_SEED: u64 = 42;
const SWEEP_SAMPLES: usize = 10_000;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn config_path() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1).cloned())
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Aquarium Well-being Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration
    let (config, config_results) = load_config(config_path(), verbose);
    results.extend(config_results);

    // 2. Reference scenarios (default tuning)
    results.extend(validate_reference_scenarios(verbose));

    // 3. Bounds sweep with the loaded tuning
    results.extend(validate_bounds_sweep(&config, verbose));

    // 4. Decay behavior
    results.extend(validate_decay(&config, verbose));

    // 5. Feeding
    results.extend(validate_feeding(&config, verbose));

    // 6. Tank ordering and scheduling
    results.extend(validate_tank(&config, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn load_config(path: Option<String>, verbose: bool) -> (IndicatorConfig, Vec<TestResult>) {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    match IndicatorConfig::from_json(SLOW_TANK_JSON) {
        Ok(bundled) => {
            let errors = validate_config(&bundled);
            results.push(check(
                "bundled_config_valid",
                errors.is_empty() && bundled.happiness_weights.hunger == 0.5,
                if errors.is_empty() {
                    format!(
                        "slow_tank.json merged: tick={}ms hunger={}/h",
                        bundled.tick_ms, bundled.hunger_decay_per_hour
                    )
                } else {
                    format!("{} validation errors", errors.len())
                },
            ));
        }
        Err(e) => results.push(check(
            "bundled_config_parse",
            false,
            format!("JSON parse error: {}", e),
        )),
    }

    let Some(path) = path else {
        results.push(check(
            "config_source",
            true,
            "using default tuning".into(),
        ));
        return (IndicatorConfig::default(), results);
    };

    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            results.push(check(
                "config_read",
                false,
                format!("cannot read {}: {}", path, e),
            ));
            return (IndicatorConfig::default(), results);
        }
    };

    let config = match IndicatorConfig::from_json(&json) {
        Ok(c) => c,
        Err(e) => {
            results.push(check(
                "config_parse",
                false,
                format!("JSON parse error in {}: {}", path, e),
            ));
            return (IndicatorConfig::default(), results);
        }
    };

    let errors = validate_config(&config);
    results.push(check(
        "config_valid",
        errors.is_empty(),
        if errors.is_empty() {
            format!("{} loaded", path)
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    ));
    if verbose {
        println!("  config: {:?}", config);
    }
    (config, results)
}

// ── 2. Reference scenarios ──────────────────────────────────────────────

fn settled(hunger: f64, energy: f64) -> IndicatorState {
    IndicatorState {
        last_fed_at: Some(T0),
        last_updated_at: Some(T0),
        ..IndicatorState::new(hunger, energy)
    }
}

fn validate_reference_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Reference Scenarios ---");
    let config = IndicatorConfig::default();
    let mut results = Vec::new();

    let clean = advance(&settled(80.0, 70.0), T0 + 2 * MS_PER_HOUR, 100.0, &config);
    results.push(check(
        "two_hours_clean",
        approx(clean.hunger, 50.0) && approx(clean.energy, 50.0) && approx(clean.happiness, 55.0),
        format!(
            "hunger={:.2} energy={:.2} happiness={:.2}",
            clean.hunger, clean.energy, clean.happiness
        ),
    ));

    let dirty = advance(&settled(80.0, 70.0), T0 + 2 * MS_PER_HOUR, 0.0, &config);
    results.push(check(
        "two_hours_filthy",
        approx(dirty.hunger, 35.0) && approx(dirty.energy, 40.0),
        format!("hunger={:.2} energy={:.2}", dirty.hunger, dirty.energy),
    ));

    let fed = feed(&settled(40.0, 50.0), 35.0, T0, &config);
    let capped = feed(&settled(90.0, 50.0), 35.0, T0, &config);
    results.push(check(
        "feed_boost_and_cap",
        approx(fed.hunger, 75.0) && capped.hunger == 100.0,
        format!("40+35={:.1}, 90+35={:.1}", fed.hunger, capped.hunger),
    ));

    let fresh = advance(&IndicatorState::new(60.0, 60.0), T0, 100.0, &config);
    results.push(check(
        "fresh_fish_no_decay",
        fresh.hunger == 60.0 && fresh.energy == 60.0,
        format!("hunger={:.1} energy={:.1}", fresh.hunger, fresh.energy),
    ));

    if verbose {
        println!("  clean: {:?}", clean);
        println!("  dirty: {:?}", dirty);
    }
    results
}

// ── 3. Bounds sweep ─────────────────────────────────────────────────────

fn random_state(rng: &mut StdRng) -> IndicatorState {
    IndicatorState {
        hunger: rng.gen_range(-1_000.0..1_000.0),
        energy: rng.gen_range(-1_000.0..1_000.0),
        happiness: rng.gen_range(-1_000.0..1_000.0),
        last_fed_at: rng
            .gen_bool(0.5)
            .then(|| T0 + rng.gen_range(0..1_000 * MS_PER_HOUR)),
        last_updated_at: rng
            .gen_bool(0.5)
            .then(|| T0 + rng.gen_range(0..1_000 * MS_PER_HOUR)),
    }
}

fn validate_bounds_sweep(config: &IndicatorConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Bounds Sweep ---");
    let mut rng = StdRng::seed_from_u64(SWEEP_SEED);
    let in_bounds = |v: f64| v >= config.clamp_min && v <= config.clamp_max;

    let mut advance_violations = 0;
    let mut feed_violations = 0;
    for _ in 0..SWEEP_SAMPLES {
        let state = random_state(&mut rng);
        let now = T0 + rng.gen_range(0..20_000 * MS_PER_HOUR);
        let cleanliness = rng.gen_range(-500.0..500.0);
        let boost = rng.gen_range(-500.0..500.0);

        let next = advance(&state, now, cleanliness, config);
        if !(in_bounds(next.hunger) && in_bounds(next.energy) && in_bounds(next.happiness)) {
            advance_violations += 1;
        }
        let fed = feed(&next, boost, now, config);
        if !in_bounds(fed.hunger) {
            feed_violations += 1;
        }
    }

    if verbose {
        println!("  {} samples, seed {}", SWEEP_SAMPLES, SWEEP_SEED);
    }
    vec![
        check(
            "advance_in_bounds",
            advance_violations == 0,
            format!("{} / {} out of bounds", advance_violations, SWEEP_SAMPLES),
        ),
        check(
            "feed_in_bounds",
            feed_violations == 0,
            format!("{} / {} out of bounds", feed_violations, SWEEP_SAMPLES),
        ),
    ]
}

// ── 4. Decay ────────────────────────────────────────────────────────────

fn validate_decay(config: &IndicatorConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Decay ---");
    let mut results = Vec::new();

    // hourly energy over a day never rises
    let mut state = settled(100.0, 100.0);
    let mut energies = vec![state.energy];
    for hour in 1..=24 {
        state = advance(&state, T0 + hour * MS_PER_HOUR, 70.0, config);
        energies.push(state.energy);
    }
    let monotonic = energies.windows(2).all(|w| w[1] <= w[0]);
    results.push(check(
        "energy_monotonic",
        monotonic,
        format!("energy after 24h = {:.2}", state.energy),
    ));

    let again = advance(&state, T0 + 24 * MS_PER_HOUR, 70.0, config);
    results.push(check(
        "same_instant_idempotent",
        again == state,
        "second advance at same instant is a no-op".into(),
    ));

    let penalties: Vec<f64> = [100.0, 75.0, 50.0, 25.0, 0.0]
        .iter()
        .map(|c| indicators::cleanliness_penalty(*c, config))
        .collect();
    results.push(check(
        "penalty_grows_with_dirt",
        penalties.windows(2).all(|w| w[1] >= w[0]),
        format!("penalties {:?}", penalties),
    ));

    let tier = status::summarize(&state, config);
    if verbose {
        println!("  energies: {:?}", energies);
        println!("  tiers after a day: {:?}", tier);
    }
    results.push(check(
        "neglected_fish_distressed",
        config.hunger_decay_per_hour * 24.0 < config.range()
            || tier.hunger == WellbeingTier::Distressed,
        format!("hunger tier after 24h: {}", tier.hunger.label()),
    ));

    results
}

// ── 5. Feeding ──────────────────────────────────────────────────────────

fn validate_feeding(config: &IndicatorConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Feeding ---");
    let ticked = advance(&settled(30.0, 60.0), T0 + MS_PER_HOUR, 100.0, config);
    let fed = feed_default(&ticked, T0 + MS_PER_HOUR, config);

    if verbose {
        println!("  before: {:?}", ticked);
        println!("  after:  {:?}", fed);
    }
    vec![
        check(
            "feed_touches_hunger_only",
            fed.energy == ticked.energy && fed.last_updated_at == ticked.last_updated_at,
            format!("energy {:.2} → {:.2}", ticked.energy, fed.energy),
        ),
        check(
            "feed_leaves_happiness_stale",
            fed.happiness == ticked.happiness,
            format!("happiness stays {:.2} until next tick", fed.happiness),
        ),
        check(
            "feed_stamps_time",
            fed.last_fed_at == Some(T0 + MS_PER_HOUR),
            format!("last_fed_at = {:?}", fed.last_fed_at),
        ),
    ]
}

// ── 6. Tank ─────────────────────────────────────────────────────────────

fn validate_tank(config: &IndicatorConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Tank ---");
    let mut results = Vec::new();
    let mut tank = Tank::new(*config);
    let ids: Vec<_> = (0..5)
        .map(|i| tank.spawn(settled(100.0 - i as f64 * 15.0, 90.0)))
        .collect();

    let mut scheduler = TickScheduler::from_config(config, T0);
    let ticks_per_hour = (MS_PER_HOUR / scheduler.tick_ms()) as usize;
    let reports = tank.run_until(&mut scheduler, T0 + MS_PER_HOUR, 80.0);
    results.push(check(
        "scheduler_hour_of_ticks",
        reports.len() == ticks_per_hour.min(aquarium_tank::schedule::DEFAULT_MAX_CATCH_UP),
        format!("{} ticks run for one hour", reports.len()),
    ));

    let feed_ok = tank.feed(ids[4], T0 + MS_PER_HOUR, None).is_ok();
    let stale = tank.feed(ids[4], T0, None);
    results.push(check(
        "tank_rejects_out_of_order",
        feed_ok && matches!(stale, Err(TankError::OutOfOrder { .. })),
        format!("late feed → {:?}", stale.err()),
    ));

    let report = tank.tick(T0 + MS_PER_HOUR, 80.0);
    results.push(check(
        "tank_tick_all_fish",
        report.advanced == ids.len() && report.skipped.is_empty(),
        format!(
            "{} advanced, {} flagged",
            report.advanced,
            report.needs_attention.len()
        ),
    ));

    if verbose {
        let fish: Vec<_> = tank.iter().collect();
        match serde_json::to_string_pretty(&fish) {
            Ok(json) => println!("{}", json),
            Err(e) => println!("  tank dump failed: {}", e),
        }
    }
    results
}
