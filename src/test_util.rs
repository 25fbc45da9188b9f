use std::ops::{Range, RangeInclusive};

use crate::random::{RandomSource, RandomnessKind};

/// Deterministic source pinned to one end of every requested range.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource {
    high: bool,
}

impl FixedSource {
    pub const fn lowest() -> Self {
        Self { high: false }
    }

    pub const fn highest() -> Self {
        Self { high: true }
    }
}

impl RandomSource for FixedSource {
    fn integer(&mut self, range: RangeInclusive<u32>) -> u32 {
        if self.high { *range.end() } else { *range.start() }
    }

    fn float(&mut self, range: Range<f64>) -> f64 {
        if self.high {
            range.end.next_down()
        } else {
            range.start
        }
    }

    fn below(&mut self, bound: u32) -> u32 {
        if self.high { bound.saturating_sub(1) } else { 0 }
    }

    fn index(&mut self, len: usize) -> Option<usize> {
        match len {
            0 => None,
            len if self.high => Some(len - 1),
            _ => Some(0),
        }
    }

    fn kind(&self) -> RandomnessKind {
        RandomnessKind::Standard
    }
}
