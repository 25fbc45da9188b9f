//! Pluggable sources of randomness.
//!
//! Everything that draws a random value goes through [`RandomSource`], so the
//! emitter never knows whether it is backed by a fast general-purpose generator
//! or by the operating system's cryptographically secure one.

use std::{
    fmt,
    ops::{Range, RangeInclusive},
};

use rand::{
    Rng, SeedableRng, TryRngCore,
    rngs::{OsRng, SmallRng},
};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

use crate::internal_events::EntropySourceProbed;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RandomError {
    #[snafu(display("Operating system entropy source is unavailable: {}", source))]
    EntropyUnavailable { source: rand::rand_core::OsError },
    #[snafu(display("The `secure` randomness source cannot be seeded"))]
    SeededSecureSource,
}

/// Capability interface shared by every randomness provider.
pub trait RandomSource {
    /// Uniform integer in the closed range.
    fn integer(&mut self, range: RangeInclusive<u32>) -> u32;

    /// Uniform float in the half-open range.
    fn float(&mut self, range: Range<f64>) -> f64;

    /// Uniform integer in `[0, bound)`. A zero bound yields zero.
    fn below(&mut self, bound: u32) -> u32;

    /// Uniform index into a set of `len` elements, `None` for an empty set.
    fn index(&mut self, len: usize) -> Option<usize>;

    fn kind(&self) -> RandomnessKind;
}

/// Uniformly choose one of `items`.
pub fn choose<'a, T>(source: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    source.index(items.len()).and_then(|index| items.get(index))
}

/// Which provider backs the emitter.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RandomnessKind {
    /// General-purpose, non-cryptographic generator.
    #[default]
    Standard,
    /// Operating system backed, cryptographically secure generator.
    Secure,
}

impl fmt::Display for RandomnessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomnessKind::Standard => write!(f, "standard"),
            RandomnessKind::Secure => write!(f, "secure"),
        }
    }
}

impl RandomnessKind {
    /// Build the provider for this kind.
    ///
    /// A `seed` makes the standard provider reproducible and is rejected by the
    /// secure one.
    pub fn build(self, seed: Option<u64>) -> Result<Box<dyn RandomSource>, RandomError> {
        match (self, seed) {
            (RandomnessKind::Standard, seed) => Ok(Box::new(StandardSource::new(seed))),
            (RandomnessKind::Secure, None) => Ok(Box::new(SecureSource::probe()?)),
            (RandomnessKind::Secure, Some(_)) => SeededSecureSourceSnafu.fail(),
        }
    }
}

/// Fast general-purpose generator, seeded from the thread-local RNG unless an
/// explicit seed is given.
#[derive(Debug)]
pub struct StandardSource {
    rng: SmallRng,
}

impl StandardSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }
}

impl RandomSource for StandardSource {
    fn integer(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.random_range(range)
    }

    fn float(&mut self, range: Range<f64>) -> f64 {
        self.rng.random_range(range)
    }

    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }

    fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    fn kind(&self) -> RandomnessKind {
        RandomnessKind::Standard
    }
}

/// Cryptographically secure generator reading straight from the operating
/// system.
///
/// The entropy source is probed once on construction. A failure after that
/// point is treated as a fatal runtime fault and panics.
#[derive(Debug, Default)]
pub struct SecureSource;

impl SecureSource {
    pub fn probe() -> Result<Self, RandomError> {
        OsRng.try_next_u32().context(EntropyUnavailableSnafu)?;
        emit!(EntropySourceProbed);
        Ok(Self)
    }
}

impl RandomSource for SecureSource {
    fn integer(&mut self, range: RangeInclusive<u32>) -> u32 {
        OsRng.unwrap_err().random_range(range)
    }

    fn float(&mut self, range: Range<f64>) -> f64 {
        OsRng.unwrap_err().random_range(range)
    }

    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        OsRng.unwrap_err().random_range(0..bound)
    }

    fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| OsRng.unwrap_err().random_range(0..len))
    }

    fn kind(&self) -> RandomnessKind {
        RandomnessKind::Secure
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const DRAWS: usize = 10_000;

    fn providers() -> Vec<Box<dyn RandomSource>> {
        vec![
            RandomnessKind::Standard.build(None).unwrap(),
            RandomnessKind::Secure.build(None).unwrap(),
        ]
    }

    #[test]
    fn integers_stay_in_closed_range() {
        for mut source in providers() {
            let seen: HashSet<u32> = (0..DRAWS).map(|_| source.integer(1..=100)).collect();
            assert!(seen.iter().all(|n| (1..=100).contains(n)));
            // Both endpoints are reachable over this many draws.
            assert!(seen.contains(&1), "{} never drew 1", source.kind());
            assert!(seen.contains(&100), "{} never drew 100", source.kind());
        }
    }

    #[test]
    fn floats_stay_in_half_open_range() {
        for mut source in providers() {
            for _ in 0..DRAWS {
                let value = source.float(0.0..1.0);
                assert!((0.0..1.0).contains(&value), "{value} out of range");
            }
        }
    }

    #[test]
    fn below_excludes_bound() {
        for mut source in providers() {
            let max = (0..DRAWS).map(|_| source.below(100)).max().unwrap();
            assert_eq!(max, 99);
            assert_eq!(source.below(0), 0);
        }
    }

    #[test]
    fn choose_covers_every_item() {
        let items = ["A", "B", "C"];
        for mut source in providers() {
            let seen: HashSet<&str> = (0..1_000)
                .map(|_| *choose(source.as_mut(), &items).unwrap())
                .collect();
            assert_eq!(seen.len(), 3);
        }
    }

    #[test]
    fn choose_from_empty_set_is_none() {
        let empty: [u8; 0] = [];
        for mut source in providers() {
            assert_eq!(source.index(0), None);
            assert!(choose(source.as_mut(), &empty).is_none());
        }
    }

    #[test]
    fn seeded_standard_source_is_reproducible() {
        let mut first = StandardSource::new(Some(42));
        let mut second = StandardSource::new(Some(42));
        let a: Vec<u32> = (0..32).map(|_| first.integer(1..=100)).collect();
        let b: Vec<u32> = (0..32).map(|_| second.integer(1..=100)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn secure_source_rejects_seed() {
        let error = RandomnessKind::Secure.build(Some(7)).err().unwrap();
        assert!(matches!(error, RandomError::SeededSecureSource));
    }

    #[test]
    fn build_reports_kind() {
        assert_eq!(
            RandomnessKind::Standard.build(Some(1)).unwrap().kind(),
            RandomnessKind::Standard
        );
        assert_eq!(
            RandomnessKind::Secure.build(None).unwrap().kind(),
            RandomnessKind::Secure
        );
    }
}
