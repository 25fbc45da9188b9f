use std::time::Duration;

use super::InternalEvent;
use crate::record::SampleRecord;

#[derive(Debug)]
pub struct SampleRecordGenerated<'a> {
    pub record: &'a SampleRecord,
}

impl InternalEvent for SampleRecordGenerated<'_> {
    fn emit(self) {
        debug!(
            message = "Generated sample record.",
            field1 = self.record.field1,
            field2 = self.record.field2,
            field3 = %self.record.field3,
        );
    }
}

#[derive(Debug)]
pub struct IdleStarted {
    pub delay: Duration,
}

impl InternalEvent for IdleStarted {
    fn emit(self) {
        debug!(
            message = "Idling before exit.",
            delay_secs = self.delay.as_secs_f64(),
        );
    }
}

#[derive(Debug)]
pub struct IdleSkipped {
    pub delay: Duration,
}

impl InternalEvent for IdleSkipped {
    fn emit(self) {
        debug!(
            message = "Idle skipped.",
            delay_secs = self.delay.as_secs_f64(),
        );
    }
}

#[derive(Debug)]
pub struct OutputWriteFailed<'a> {
    pub error: &'a std::io::Error,
}

impl InternalEvent for OutputWriteFailed<'_> {
    fn emit(self) {
        error!(
            message = "Failed to write to standard output.",
            error = %self.error,
        );
    }
}
