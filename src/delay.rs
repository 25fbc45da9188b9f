use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::random::{RandomSource, RandomnessKind};

/// Shortest idle, in seconds.
pub const DELAY_BASE_SECS: f64 = 5.0;

/// Exclusive upper bound of the `uniform` strategy, in seconds.
pub const DELAY_UNIFORM_MAX_SECS: f64 = 15.0;

/// Number of tenth-of-a-second steps the `tenths` strategy draws from.
pub const DELAY_TENTHS_STEPS: u32 = 100;

/// How the idle duration is computed.
///
/// The two strategies target the same nominal window but do not cover it
/// identically: `tenths` never exceeds 14.9 seconds.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DelayStrategy {
    /// Continuous uniform draw in `[5, 15)` seconds.
    Uniform,
    /// `5 + below(100) / 10` seconds, i.e. `5.0, 5.1, ..., 14.9`.
    Tenths,
}

impl DelayStrategy {
    /// Strategy historically paired with each randomness provider.
    pub const fn default_for(kind: RandomnessKind) -> Self {
        match kind {
            RandomnessKind::Standard => DelayStrategy::Uniform,
            RandomnessKind::Secure => DelayStrategy::Tenths,
        }
    }

    pub fn sample(self, source: &mut dyn RandomSource) -> Duration {
        let secs = match self {
            DelayStrategy::Uniform => source.float(DELAY_BASE_SECS..DELAY_UNIFORM_MAX_SECS),
            DelayStrategy::Tenths => {
                DELAY_BASE_SECS + f64::from(source.below(DELAY_TENTHS_STEPS)) / 10.0
            }
        };
        Duration::from_secs_f64(secs)
    }
}

impl fmt::Display for DelayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelayStrategy::Uniform => write!(f, "uniform"),
            DelayStrategy::Tenths => write!(f, "tenths"),
        }
    }
}
