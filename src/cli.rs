//! Emitter options.
//!
//! Every command-line argument belongs to the echo, so options are read from
//! the environment only. The command line is handed to clap as just the binary
//! name, which still resolves each `env` backed option and its default.

use std::{ffi::OsString, path::PathBuf};

use clap::{CommandFactory, FromArgMatches, Parser};

use crate::{
    config::{Format, Overrides},
    delay::DelayStrategy,
    random::RandomnessKind,
};

#[derive(Parser, Debug)]
#[command(name = "sample-emitter", rename_all = "kebab-case")]
/// Print the given arguments, one randomized sample record, then idle for a
/// randomized delay.
pub struct Opts {
    /// Read configuration from a file.
    /// File format is detected from the file name unless `SAMPLE_EMITTER_CONFIG_FORMAT` is set.
    #[arg(long, env = "SAMPLE_EMITTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Force the format of the config file.
    #[arg(long, env = "SAMPLE_EMITTER_CONFIG_FORMAT")]
    pub config_format: Option<Format>,

    /// Randomness source used to draw the record and the delay.
    #[arg(long, env = "SAMPLE_EMITTER_RANDOMNESS")]
    pub randomness: Option<RandomnessKind>,

    /// How the idle delay is computed. Defaults to `uniform` for the
    /// `standard` source and `tenths` for the `secure` one.
    #[arg(long, env = "SAMPLE_EMITTER_DELAY")]
    pub delay: Option<DelayStrategy>,

    /// Seed the `standard` source for a reproducible run.
    #[arg(long, env = "SAMPLE_EMITTER_SEED")]
    pub seed: Option<u64>,

    /// Compute and report the delay without waiting it out.
    #[arg(long, env = "SAMPLE_EMITTER_NO_IDLE")]
    pub no_idle: bool,

    /// Internal logging level. Overridden by the `LOG` filter.
    #[arg(long, default_value = "warn", env = "SAMPLE_EMITTER_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Set the logging format.
    #[arg(long, default_value = "text", env = "SAMPLE_EMITTER_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Control when ANSI terminal formatting is used.
    ///
    /// `auto` enables ANSI formatting when `stderr` is a terminal, `always`
    /// and `never` force it on or off.
    #[arg(long, default_value = "auto", env = "SAMPLE_EMITTER_COLOR")]
    pub color: Color,

    /// Arguments echoed back before the record. Never interpreted.
    #[arg(skip)]
    pub args: Vec<String>,
}

impl Opts {
    pub fn get_matches() -> Result<Self, clap::Error> {
        Self::get_matches_from(std::env::args_os())
    }

    /// The first item is the binary name; everything after it is echoed as
    /// given.
    pub fn get_matches_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let bin_name = args
            .next()
            .unwrap_or_else(|| OsString::from("sample-emitter"));

        let matches = Opts::command().try_get_matches_from([bin_name])?;
        let mut opts = Opts::from_arg_matches(&matches)?;
        opts.args = args
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        Ok(opts)
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            randomness: self.randomness,
            delay: self.delay,
            seed: self.seed,
            no_idle: self.no_idle,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Auto,
    Always,
    Never,
}

impl Color {
    pub fn use_color(&self) -> bool {
        use std::io::IsTerminal;

        match self {
            Color::Auto => std::io::stderr().is_terminal(),
            Color::Always => true,
            Color::Never => false,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Opts {
        Opts::get_matches_from(std::iter::once("sample-emitter").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn verify_cli() {
        Opts::command().debug_assert();
    }

    #[test]
    fn no_arguments() {
        let opts = parse(&[]);
        assert!(opts.args.is_empty());
        assert_eq!(opts.log_format, LogFormat::Text);
        assert_eq!(opts.color, Color::Auto);
    }

    #[test]
    fn default_log_level_is_quiet() {
        assert_eq!(parse(&[]).log_level, LogLevel::Warn);
    }

    #[test]
    fn unknown_flags_are_echoed() {
        let opts = parse(&["--foo", "bar"]);
        assert_eq!(opts.args, vec!["--foo", "bar"]);
    }

    #[test]
    fn option_names_are_echoed() {
        let args = [
            "-v",
            "x",
            "-c",
            "foo",
            "--seed",
            "3",
            "--delay",
            "forever",
            "--help",
            "--version",
            "--",
        ];
        let opts = parse(&args);
        assert_eq!(opts.args, args);
        assert_eq!(opts.seed, None);
        assert_eq!(opts.config, None);
    }

    #[test]
    fn empty_command_line() {
        let opts = Opts::get_matches_from(Vec::<String>::new()).unwrap();
        assert!(opts.args.is_empty());
    }

    #[test]
    fn log_level_names() {
        let cases = vec![
            (LogLevel::Off, "off"),
            (LogLevel::Error, "error"),
            (LogLevel::Warn, "warn"),
            (LogLevel::Info, "info"),
            (LogLevel::Debug, "debug"),
            (LogLevel::Trace, "trace"),
        ];

        for (level, expected) in cases {
            assert_eq!(level.as_str(), expected);
        }
    }

    #[test]
    fn never_and_always_ignore_the_terminal() {
        assert!(Color::Always.use_color());
        assert!(!Color::Never.use_color());
    }
}
