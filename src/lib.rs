#![deny(unreachable_pub)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]

#[macro_use]
extern crate tracing;

#[macro_use]
pub mod internal_events;

pub mod app;
pub mod cli;
pub mod config;
pub mod delay;
pub mod emitter;
pub mod random;
pub mod record;
#[cfg(test)]
pub mod test_util;
pub mod trace;

pub use emitter::{Emitter, Idle};
pub use random::{RandomSource, RandomnessKind};
pub use record::{HEADER, SampleRecord};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version string logged when the emitter starts.
pub fn get_version() -> String {
    format!(
        "{} ({}-{} {})",
        VERSION,
        std::env::consts::ARCH,
        std::env::consts::OS,
        if cfg!(debug_assertions) { "debug" } else { "release" }
    )
}
