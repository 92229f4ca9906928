//! Per-fish indicator store.
//!
//! The tank owns every fish's [`IndicatorState`] and applies `advance` and
//! `feed` one at a time in wall-clock order. Events older than the last one
//! applied to a fish are rejected instead of silently corrupting its decay
//! baseline.

use std::collections::BTreeMap;
use std::fmt;

use aquarium_logic::config::IndicatorConfig;
use aquarium_logic::indicators::{self, IndicatorState, Timestamp};
use aquarium_logic::status::{self, IndicatorKind};
use serde::{Deserialize, Serialize};

use crate::error::TankError;
use crate::schedule::TickScheduler;

/// Range fraction below which a fish is reported as needing attention.
pub const ATTENTION_THRESHOLD: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FishId(pub u32);

impl fmt::Display for FishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fish#{}", self.0)
    }
}

/// One fish and the time of the latest event applied to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    pub id: FishId,
    pub state: IndicatorState,
    latest_event_at: Option<Timestamp>,
}

impl Fish {
    pub fn latest_event_at(&self) -> Option<Timestamp> {
        self.latest_event_at
    }

    fn check_order(&self, at: Timestamp) -> Result<(), TankError> {
        match self.latest_event_at {
            Some(latest) if at < latest => Err(TankError::OutOfOrder {
                fish: self.id,
                event_at: at,
                latest,
            }),
            _ => Ok(()),
        }
    }
}

/// Outcome of advancing every fish to one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub at: Timestamp,
    pub advanced: usize,
    /// Fish whose latest event is newer than this tick.
    pub skipped: Vec<FishId>,
    /// Fish with an indicator in the distressed tier after this tick.
    pub needs_attention: Vec<(FishId, IndicatorKind)>,
}

/// All fish in one aquarium, sharing one config.
#[derive(Debug, Clone)]
pub struct Tank {
    config: IndicatorConfig,
    fish: BTreeMap<FishId, Fish>,
    next_id: u32,
}

impl Tank {
    pub fn new(config: IndicatorConfig) -> Self {
        Self {
            config,
            fish: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.fish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fish.is_empty()
    }

    pub fn get(&self, id: FishId) -> Option<&IndicatorState> {
        self.fish.get(&id).map(|f| &f.state)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fish> {
        self.fish.values()
    }

    /// Add a fish with caller-chosen initial indicators.
    pub fn spawn(&mut self, state: IndicatorState) -> FishId {
        let id = FishId(self.next_id);
        self.next_id += 1;

        let latest_event_at = match (state.last_updated_at, state.last_fed_at) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.fish.insert(
            id,
            Fish {
                id,
                state,
                latest_event_at,
            },
        );

        log::info!(
            "{} spawned (hunger={:.1}, energy={:.1})",
            id,
            state.hunger,
            state.energy
        );
        id
    }

    pub fn remove(&mut self, id: FishId) -> Result<IndicatorState, TankError> {
        let fish = self.fish.remove(&id).ok_or(TankError::UnknownFish(id))?;
        log::info!("{} removed", id);
        Ok(fish.state)
    }

    fn fish_mut(&mut self, id: FishId) -> Result<&mut Fish, TankError> {
        self.fish.get_mut(&id).ok_or(TankError::UnknownFish(id))
    }

    /// Feed one fish. `boost` of `None` uses the configured feeding boost.
    pub fn feed(
        &mut self,
        id: FishId,
        feed_time: Timestamp,
        boost: Option<f64>,
    ) -> Result<&IndicatorState, TankError> {
        let config = self.config;
        let fish = self.fish_mut(id)?;
        if let Err(e) = fish.check_order(feed_time) {
            log::warn!("Rejected feed: {}", e);
            return Err(e);
        }

        let boost = boost.unwrap_or(config.feeding_boost);
        fish.state = indicators::feed(&fish.state, boost, feed_time, &config);
        fish.latest_event_at = Some(feed_time);
        log::debug!(
            "{} fed +{:.1} at {} (hunger={:.1})",
            id,
            boost,
            feed_time,
            fish.state.hunger
        );
        Ok(&fish.state)
    }

    /// Advance one fish to `now`.
    pub fn advance_fish(
        &mut self,
        id: FishId,
        now: Timestamp,
        cleanliness: f64,
    ) -> Result<&IndicatorState, TankError> {
        let config = self.config;
        let fish = self.fish_mut(id)?;
        if let Err(e) = fish.check_order(now) {
            log::warn!("Rejected advance: {}", e);
            return Err(e);
        }

        fish.state = indicators::advance(&fish.state, now, cleanliness, &config);
        fish.latest_event_at = Some(now);
        Ok(&fish.state)
    }

    /// Advance every fish to `now` with one shared cleanliness reading.
    pub fn tick(&mut self, now: Timestamp, cleanliness: f64) -> TickReport {
        let config = self.config;
        let mut report = TickReport {
            at: now,
            ..TickReport::default()
        };

        for fish in self.fish.values_mut() {
            if let Err(e) = fish.check_order(now) {
                log::warn!("Skipped tick: {}", e);
                report.skipped.push(fish.id);
                continue;
            }
            fish.state = indicators::advance(&fish.state, now, cleanliness, &config);
            fish.latest_event_at = Some(now);
            report.advanced += 1;

            if let Some(kind) = status::most_urgent(&fish.state, &config, ATTENTION_THRESHOLD) {
                report.needs_attention.push((fish.id, kind));
            }
        }

        log::debug!(
            "Tick at {}: {} advanced, {} skipped, {} need attention",
            now,
            report.advanced,
            report.skipped.len(),
            report.needs_attention.len()
        );
        report
    }

    /// Run every tick the scheduler has due at `now`.
    pub fn run_until(
        &mut self,
        scheduler: &mut TickScheduler,
        now: Timestamp,
        cleanliness: f64,
    ) -> Vec<TickReport> {
        scheduler
            .due_ticks(now)
            .into_iter()
            .map(|at| self.tick(at, cleanliness))
            .collect()
    }
}
