//! Emitter configuration: defaults, an optional file, then environment
//! overrides.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use snafu::{ResultExt, Snafu, ensure};

use crate::{delay::DelayStrategy, random::RandomnessKind};

pub mod format;

pub use format::{Format, FormatError, FormatHint};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    #[snafu(display("Could not read config file {:?}: {}", path, source))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "Unable to detect the format of config file {:?}; use one of .toml, .json, .yaml or set SAMPLE_EMITTER_CONFIG_FORMAT",
        path
    ))]
    UnknownFormat { path: PathBuf },
    #[snafu(display("Could not parse config file {:?} as {}: {}", path, format, source))]
    Parse {
        path: PathBuf,
        format: Format,
        source: FormatError,
    },
    #[snafu(display("A `seed` can only be used with the `standard` randomness source"))]
    SeedRequiresStandard,
}

/// Settings of a single run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct EmitterConfig {
    /// Which provider draws the random values.
    pub randomness: RandomnessKind,

    /// Idle strategy. Derived from `randomness` when unset.
    pub delay: Option<DelayStrategy>,

    /// Seed for a reproducible `standard` provider.
    pub seed: Option<u64>,

    /// Report the delay without waiting it out.
    pub no_idle: bool,
}

/// Values given through the environment. Anything
/// set here wins over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub randomness: Option<RandomnessKind>,
    pub delay: Option<DelayStrategy>,
    pub seed: Option<u64>,
    pub no_idle: bool,
}

impl EmitterConfig {
    /// Resolve the delay strategy, falling back to the one paired with the
    /// randomness provider.
    pub fn delay_strategy(&self) -> DelayStrategy {
        self.delay
            .unwrap_or_else(|| DelayStrategy::default_for(self.randomness))
    }

    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if let Some(randomness) = overrides.randomness {
            self.randomness = randomness;
        }
        if let Some(delay) = overrides.delay {
            self.delay = Some(delay);
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        self.no_idle |= overrides.no_idle;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            self.seed.is_none() || self.randomness == RandomnessKind::Standard,
            SeedRequiresStandardSnafu
        );
        Ok(())
    }
}

/// Parse a config document in the given format.
pub fn load_from_str(content: &str, format: Format) -> Result<EmitterConfig, FormatError> {
    format::deserialize(content, format)
}

/// Read a config file, picking the format from `hint` or the file extension.
pub fn load_from_path(path: &Path, hint: FormatHint) -> Result<EmitterConfig, ConfigError> {
    let format = match hint {
        Some(format) => format,
        None => Format::from_path(path).map_err(|path| ConfigError::UnknownFormat {
            path: path.to_path_buf(),
        })?,
    };
    let content = fs::read_to_string(path).context(ReadFileSnafu { path })?;
    load_from_str(&content, format).context(ParseSnafu { path, format })
}

/// Build the effective configuration of a run.
pub fn load(
    path: Option<&Path>,
    hint: FormatHint,
    overrides: &Overrides,
) -> Result<EmitterConfig, ConfigError> {
    let base = match path {
        Some(path) => load_from_path(path, hint)?,
        None => EmitterConfig::default(),
    };
    let config = base.apply(overrides);
    config.validate()?;
    Ok(config)
}
