use std::io;

use crate::{
    cli::{LogFormat, LogLevel, Opts},
    config::{self, EmitterConfig},
    emitter::{EmitError, Emitter, Idle},
    internal_events::{ConfigLoadFailed, EmitterStarted, EmitterStopped, RandomSourceFailed},
    random::{RandomError, RandomSource},
    trace,
};

pub struct Application {
    pub config: EmitterConfig,
    args: Vec<String>,
    source: Box<dyn RandomSource>,
}

impl Application {
    pub fn prepare() -> Result<Self, exitcode::ExitCode> {
        let opts = Opts::get_matches().map_err(|error| {
            // Printing to stdout/stderr should not fail.
            let _ = error.print();
            if error.use_stderr() {
                exitcode::USAGE
            } else {
                exitcode::OK
            }
        })?;

        Self::prepare_from_opts(opts)
    }

    pub fn prepare_from_opts(opts: Opts) -> Result<Self, exitcode::ExitCode> {
        let level = std::env::var("LOG").unwrap_or_else(|_| match opts.log_level {
            LogLevel::Off => "off".to_owned(),
            level => format!("sample_emitter={}", level.as_str()),
        });

        trace::init(
            opts.color.use_color(),
            opts.log_format == LogFormat::Json,
            &level,
        );

        debug!(message = "Log level is enabled.", level = ?level);

        let config = config::load(
            opts.config.as_deref(),
            opts.config_format,
            &opts.overrides(),
        )
        .map_err(|error| {
            emit!(ConfigLoadFailed {
                path: opts.config.as_deref(),
                error: &error,
            });
            exitcode::CONFIG
        })?;

        let source = config
            .randomness
            .build(config.seed)
            .map_err(|error| handle_random_error(&error))?;

        Ok(Application {
            config,
            args: opts.args,
            source,
        })
    }

    pub fn run(self) -> exitcode::ExitCode {
        let delay = self.config.delay_strategy();
        emit!(EmitterStarted {
            randomness: self.source.kind(),
            delay,
        });

        let idle = if self.config.no_idle {
            Idle::Skip
        } else {
            Idle::Block
        };

        let mut emitter = Emitter::new(self.source, delay, io::stdout().lock()).with_idle(idle);
        match emitter.run(&self.args) {
            Ok(_) => {
                emit!(EmitterStopped);
                exitcode::OK
            }
            Err(EmitError::WriteOutput { .. }) => exitcode::IOERR,
        }
    }
}

fn handle_random_error(error: &RandomError) -> exitcode::ExitCode {
    emit!(RandomSourceFailed { error });
    match error {
        RandomError::EntropyUnavailable { .. } => exitcode::OSERR,
        RandomError::SeededSecureSource => exitcode::CONFIG,
    }
}
