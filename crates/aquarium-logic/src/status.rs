//! Display tiers for indicator values.
//!
//! Read-only classification the UI layer uses to pick labels and colors.
//! Tiers are based on the fraction of the configured clamp range, so they
//! keep working when bounds are customized.

use serde::{Deserialize, Serialize};

use crate::config::IndicatorConfig;
use crate::indicators::IndicatorState;

/// Coarse well-being tier for one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WellbeingTier {
    /// >= 75% of range.
    Thriving,
    /// 50%..75%.
    Content,
    /// 25%..50%.
    Uneasy,
    /// Below 25%; the fish needs attention.
    Distressed,
}

impl WellbeingTier {
    pub fn from_value(value: f64, config: &IndicatorConfig) -> Self {
        let fraction = range_fraction(value, config);
        if fraction >= 0.75 {
            Self::Thriving
        } else if fraction >= 0.5 {
            Self::Content
        } else if fraction >= 0.25 {
            Self::Uneasy
        } else {
            Self::Distressed
        }
    }

    pub fn needs_attention(self) -> bool {
        matches!(self, Self::Distressed)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Thriving => "thriving",
            Self::Content => "content",
            Self::Uneasy => "uneasy",
            Self::Distressed => "distressed",
        }
    }
}

/// Which indicator a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    Hunger,
    Energy,
    Happiness,
}

/// Tier of every indicator of one fish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellbeingSummary {
    pub hunger: WellbeingTier,
    pub energy: WellbeingTier,
    pub happiness: WellbeingTier,
}

/// Position of `value` within the clamp range, in [0, 1].
/// A degenerate range reports 0.
pub fn range_fraction(value: f64, config: &IndicatorConfig) -> f64 {
    let range = config.range();
    if range <= 0.0 {
        return 0.0;
    }
    ((value - config.clamp_min) / range).max(0.0).min(1.0)
}

pub fn summarize(state: &IndicatorState, config: &IndicatorConfig) -> WellbeingSummary {
    WellbeingSummary {
        hunger: WellbeingTier::from_value(state.hunger, config),
        energy: WellbeingTier::from_value(state.energy, config),
        happiness: WellbeingTier::from_value(state.happiness, config),
    }
}

/// The lowest indicator whose range fraction is strictly below `threshold`.
pub fn most_urgent(
    state: &IndicatorState,
    config: &IndicatorConfig,
    threshold: f64,
) -> Option<IndicatorKind> {
    let indicators = [
        (IndicatorKind::Hunger, range_fraction(state.hunger, config)),
        (IndicatorKind::Energy, range_fraction(state.energy, config)),
        (
            IndicatorKind::Happiness,
            range_fraction(state.happiness, config),
        ),
    ];

    indicators
        .iter()
        .filter(|(_, f)| *f < threshold)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(kind, _)| *kind)
}
