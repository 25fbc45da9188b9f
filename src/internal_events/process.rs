use std::path::Path;

use super::InternalEvent;
use crate::{delay::DelayStrategy, random::RandomnessKind};

#[derive(Debug)]
pub struct EmitterStarted {
    pub randomness: RandomnessKind,
    pub delay: DelayStrategy,
}

impl InternalEvent for EmitterStarted {
    fn emit(self) {
        info!(
            target: "sample_emitter",
            message = "Sample emitter has started.",
            version = %crate::get_version(),
            randomness = %self.randomness,
            delay = %self.delay,
        );
    }
}

#[derive(Debug)]
pub struct EmitterStopped;

impl InternalEvent for EmitterStopped {
    fn emit(self) {
        info!(
            target: "sample_emitter",
            message = "Sample emitter has stopped."
        );
    }
}

#[derive(Debug)]
pub struct ConfigLoadFailed<'a> {
    pub path: Option<&'a Path>,
    pub error: &'a crate::config::ConfigError,
}

impl InternalEvent for ConfigLoadFailed<'_> {
    fn emit(self) {
        error!(
            target: "sample_emitter",
            message = "Configuration error.",
            path = ?self.path,
            error = %self.error,
        );
    }
}
