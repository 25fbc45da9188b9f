use tracing::dispatcher::{Dispatch, set_global_default};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global subscriber. Logs go to standard error so standard
/// output only ever carries the emitter's own lines.
pub fn init(color: bool, json: bool, levels: &str) {
    // An unparsable `LOG` directive falls back to the default level.
    let filter = EnvFilter::try_new(levels).unwrap_or_else(|_| EnvFilter::new("info"));

    let dispatch = if json {
        let formatter = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .flatten_event(true)
            .finish();
        Dispatch::new(formatter)
    } else {
        let formatter = FmtSubscriber::builder()
            .with_ansi(color)
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        Dispatch::new(formatter)
    };

    // Tests can initialize this multiple times.
    let _ = set_global_default(dispatch);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init(false, false, "sample_emitter=debug");
        init(false, true, "not a valid = directive [");
        info!(message = "Still logging.");
    }
}
