//! The sample emitter: echo, generate, emit, idle.

use std::{io::Write, thread, time::Duration};

use snafu::{ResultExt, Snafu};

use crate::{
    delay::DelayStrategy,
    internal_events::{IdleSkipped, IdleStarted, OutputWriteFailed, SampleRecordGenerated},
    random::RandomSource,
    record::{self, HEADER, SampleRecord},
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EmitError {
    #[snafu(display("Failed to write output: {}", source))]
    WriteOutput { source: std::io::Error },
}

/// Whether the idle step actually blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Idle {
    #[default]
    Block,
    Skip,
}

/// What a run produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emitted {
    pub record: SampleRecord,
    pub delay: Duration,
}

pub struct Emitter<W> {
    source: Box<dyn RandomSource>,
    delay: DelayStrategy,
    idle: Idle,
    out: W,
}

impl<W: Write> Emitter<W> {
    pub fn new(source: Box<dyn RandomSource>, delay: DelayStrategy, out: W) -> Self {
        Self {
            source,
            delay,
            idle: Idle::default(),
            out,
        }
    }

    pub fn with_idle(mut self, idle: Idle) -> Self {
        self.idle = idle;
        self
    }

    /// Run every step once, in order.
    pub fn run(&mut self, args: &[String]) -> Result<Emitted, EmitError> {
        self.echo_arguments(args)?;
        let record = self.generate_record();
        self.emit(&record)?;
        let delay = self.idle()?;
        Ok(Emitted { record, delay })
    }

    /// Print the arguments as given. They are never interpreted.
    pub fn echo_arguments(&mut self, args: &[String]) -> Result<(), EmitError> {
        self.line(&record::list(args))
    }

    pub fn generate_record(&mut self) -> SampleRecord {
        let record = SampleRecord::generate(self.source.as_mut());
        emit!(SampleRecordGenerated { record: &record });
        record
    }

    /// Print the header followed by the record.
    pub fn emit(&mut self, record: &SampleRecord) -> Result<(), EmitError> {
        self.line(&record::list(HEADER))?;
        self.line(&record.to_string())
    }

    /// Draw a delay, report it, then block for it unless idling is skipped.
    pub fn idle(&mut self) -> Result<Duration, EmitError> {
        let delay = self.delay.sample(self.source.as_mut());
        self.line(&format!("Sleeping for {:.2} seconds...", delay.as_secs_f64()))?;
        self.flush()?;

        match self.idle {
            Idle::Block => {
                emit!(IdleStarted { delay });
                thread::sleep(delay);
            }
            Idle::Skip => emit!(IdleSkipped { delay }),
        }
        Ok(delay)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: &str) -> Result<(), EmitError> {
        writeln!(self.out, "{line}")
            .inspect_err(|error| emit!(OutputWriteFailed { error }))
            .context(WriteOutputSnafu)
    }

    fn flush(&mut self) -> Result<(), EmitError> {
        self.out
            .flush()
            .inspect_err(|error| emit!(OutputWriteFailed { error }))
            .context(WriteOutputSnafu)
    }
}

#[cfg(test)]
mod tests {
    use std::{io, time::Instant};

    use super::*;
    use crate::{
        random::{RandomnessKind, StandardSource},
        record::Category,
        test_util::FixedSource,
    };

    fn emitter(source: Box<dyn RandomSource>, delay: DelayStrategy) -> Emitter<Vec<u8>> {
        Emitter::new(source, delay, Vec::new()).with_idle(Idle::Skip)
    }

    fn lines(output: Vec<u8>) -> Vec<String> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn prints_four_lines_in_order() {
        let mut emitter = emitter(Box::new(FixedSource::lowest()), DelayStrategy::Tenths);
        let emitted = emitter.run(&[]).unwrap();

        assert_eq!(emitted.delay, Duration::from_secs(5));
        assert_eq!(
            lines(emitter.into_inner()),
            vec![
                "[]",
                "['h1', 'h2', 'h3']",
                "[1, 0.0, 'A']",
                "Sleeping for 5.00 seconds...",
            ]
        );
    }

    #[test]
    fn echoes_arguments_verbatim() {
        let mut emitter = emitter(Box::new(FixedSource::highest()), DelayStrategy::Tenths);
        let args = vec!["--foo".to_owned(), "bar".to_owned()];
        emitter.run(&args).unwrap();

        let lines = lines(emitter.into_inner());
        assert_eq!(lines[0], "['--foo', 'bar']");
        assert_eq!(lines[2], "[100, 0.9999999999999999, 'C']");
        assert_eq!(lines[3], "Sleeping for 14.90 seconds...");
    }

    #[test]
    fn record_and_delay_stay_in_bounds() {
        for kind in [RandomnessKind::Standard, RandomnessKind::Secure] {
            for delay in [DelayStrategy::Uniform, DelayStrategy::Tenths] {
                for _ in 0..200 {
                    let mut emitter = emitter(kind.build(None).unwrap(), delay);
                    let Emitted { record, delay: slept } = emitter.run(&[]).unwrap();
                    assert!((1..=100).contains(&record.field1));
                    assert!((0.0..1.0).contains(&record.field2));
                    assert!(Category::ALL.contains(&record.field3));
                    assert!(slept >= Duration::from_secs(5));
                    assert!(slept < Duration::from_secs(15));
                }
            }
        }
    }

    #[test]
    fn reported_delay_matches_returned_delay() {
        let mut emitter = emitter(Box::new(StandardSource::new(Some(5))), DelayStrategy::Uniform);
        let emitted = emitter.run(&[]).unwrap();
        let expected = format!("Sleeping for {:.2} seconds...", emitted.delay.as_secs_f64());
        assert_eq!(lines(emitter.into_inner())[3], expected);
    }

    #[test]
    fn skip_does_not_block() {
        let start = Instant::now();
        let mut emitter = emitter(Box::new(FixedSource::highest()), DelayStrategy::Uniform);
        emitter.idle().unwrap();
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_reported() {
        let mut emitter = Emitter::new(
            Box::new(FixedSource::lowest()),
            DelayStrategy::Uniform,
            BrokenPipe,
        )
        .with_idle(Idle::Skip);

        let error = emitter.run(&[]).unwrap_err();
        assert!(matches!(error, EmitError::WriteOutput { .. }));
    }
}
