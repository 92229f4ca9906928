//! Indicator configuration, partial overrides, and caller-side validation.
//!
//! The engine in [`crate::indicators`] assumes a sane config and never
//! checks it. Callers that want strictness run [`validate_config`] once
//! when a config is loaded.
//!
//! ```
//! use aquarium_logic::config::{validate_config, IndicatorConfig, IndicatorOverrides};
//!
//! let overrides = IndicatorOverrides {
//!     feeding_boost: Some(50.0),
//!     ..IndicatorOverrides::default()
//! };
//! let config = IndicatorConfig::default().with_overrides(&overrides);
//! assert_eq!(config.feeding_boost, 50.0);
//! assert_eq!(config.hunger_decay_per_hour, 15.0);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relative weights of the happiness blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HappinessWeights {
    pub hunger: f64,
    pub energy: f64,
    pub cleanliness: f64,
}

impl HappinessWeights {
    pub fn sum(&self) -> f64 {
        self.hunger + self.energy + self.cleanliness
    }
}

impl Default for HappinessWeights {
    fn default() -> Self {
        Self {
            hunger: 0.5,
            energy: 0.4,
            cleanliness: 0.1,
        }
    }
}

/// Tuning for the well-being model. Immutable once handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Suggested polling interval in milliseconds. The engine ignores it;
    /// schedulers use it to space ticks.
    pub tick_ms: u64,
    /// Hunger lost per hour at full cleanliness.
    pub hunger_decay_per_hour: f64,
    /// Energy lost per hour at full cleanliness.
    pub energy_decay_per_hour: f64,
    /// Hunger restored by one feed action when no custom boost is given.
    pub feeding_boost: f64,
    /// Extra decay fraction at zero cleanliness (0.5 = 50% faster).
    pub max_cleanliness_penalty: f64,
    pub happiness_weights: HappinessWeights,
    pub clamp_min: f64,
    pub clamp_max: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            hunger_decay_per_hour: 15.0,
            energy_decay_per_hour: 10.0,
            feeding_boost: 35.0,
            max_cleanliness_penalty: 0.5,
            happiness_weights: HappinessWeights::default(),
            clamp_min: 0.0,
            clamp_max: 100.0,
        }
    }
}

/// Per-weight overrides; `None` keeps the base weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightOverrides {
    pub hunger: Option<f64>,
    pub energy: Option<f64>,
    pub cleanliness: Option<f64>,
}

/// Partial configuration merged over a base config.
///
/// Every field is optional, so a JSON object naming only a few fields is a
/// valid override document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorOverrides {
    pub tick_ms: Option<u64>,
    pub hunger_decay_per_hour: Option<f64>,
    pub energy_decay_per_hour: Option<f64>,
    pub feeding_boost: Option<f64>,
    pub max_cleanliness_penalty: Option<f64>,
    pub happiness_weights: Option<WeightOverrides>,
    pub clamp_min: Option<f64>,
    pub clamp_max: Option<f64>,
}

impl IndicatorConfig {
    /// Merge `overrides` over `self`, keeping every field it leaves unset.
    pub fn with_overrides(&self, overrides: &IndicatorOverrides) -> Self {
        let weights = match overrides.happiness_weights {
            Some(w) => HappinessWeights {
                hunger: w.hunger.unwrap_or(self.happiness_weights.hunger),
                energy: w.energy.unwrap_or(self.happiness_weights.energy),
                cleanliness: w
                    .cleanliness
                    .unwrap_or(self.happiness_weights.cleanliness),
            },
            None => self.happiness_weights,
        };

        Self {
            tick_ms: overrides.tick_ms.unwrap_or(self.tick_ms),
            hunger_decay_per_hour: overrides
                .hunger_decay_per_hour
                .unwrap_or(self.hunger_decay_per_hour),
            energy_decay_per_hour: overrides
                .energy_decay_per_hour
                .unwrap_or(self.energy_decay_per_hour),
            feeding_boost: overrides.feeding_boost.unwrap_or(self.feeding_boost),
            max_cleanliness_penalty: overrides
                .max_cleanliness_penalty
                .unwrap_or(self.max_cleanliness_penalty),
            happiness_weights: weights,
            clamp_min: overrides.clamp_min.unwrap_or(self.clamp_min),
            clamp_max: overrides.clamp_max.unwrap_or(self.clamp_max),
        }
    }

    /// Parse a partial JSON override document and merge it over the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: IndicatorOverrides = serde_json::from_str(json)?;
        Ok(Self::default().with_overrides(&overrides))
    }

    /// Width of the clamp range. Zero or negative for an invalid config.
    pub fn range(&self) -> f64 {
        self.clamp_max - self.clamp_min
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("clamp bounds invalid: min {min}, max {max}")]
    InvalidBounds { min: f64, max: f64 },
    #[error("{indicator} decay rate is negative: {rate}")]
    NegativeDecayRate { indicator: &'static str, rate: f64 },
    #[error("feeding boost is negative: {0}")]
    NegativeFeedingBoost(f64),
    #[error("cleanliness penalty is negative: {0}")]
    NegativePenalty(f64),
    #[error("{component} happiness weight is negative: {weight}")]
    NegativeWeight {
        component: &'static str,
        weight: f64,
    },
    #[error("happiness weights sum to zero")]
    ZeroWeightSum,
    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
}

/// Validate a config, returning all errors found.
pub fn validate_config(config: &IndicatorConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let bounds_finite = config.clamp_min.is_finite() && config.clamp_max.is_finite();
    if !bounds_finite || config.clamp_max <= config.clamp_min {
        errors.push(ConfigError::InvalidBounds {
            min: config.clamp_min,
            max: config.clamp_max,
        });
    }

    for (indicator, rate) in [
        ("hunger", config.hunger_decay_per_hour),
        ("energy", config.energy_decay_per_hour),
    ] {
        if rate < 0.0 {
            errors.push(ConfigError::NegativeDecayRate { indicator, rate });
        }
    }

    if config.feeding_boost < 0.0 {
        errors.push(ConfigError::NegativeFeedingBoost(config.feeding_boost));
    }
    if config.max_cleanliness_penalty < 0.0 {
        errors.push(ConfigError::NegativePenalty(config.max_cleanliness_penalty));
    }

    let w = &config.happiness_weights;
    for (component, weight) in [
        ("hunger", w.hunger),
        ("energy", w.energy),
        ("cleanliness", w.cleanliness),
    ] {
        if weight < 0.0 {
            errors.push(ConfigError::NegativeWeight { component, weight });
        }
    }
    if w.sum() <= 0.0 {
        errors.push(ConfigError::ZeroWeightSum);
    }

    if config.tick_ms == 0 {
        errors.push(ConfigError::ZeroTickInterval);
    }

    errors
}
