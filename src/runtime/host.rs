//! Host services: sleeping, wall-clock time and random numbers.
//!
//! The engine never touches the system clock, the thread scheduler or a
//! global RNG directly. It calls a [`Host`], so tests can substitute a
//! [`RecordingHost`] with a fixed clock and a seeded generator.

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Host {
    /// Block the caller for `duration`.
    fn sleep(&mut self, duration: Duration);

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// Uniform random integer in the inclusive range spanned by the two
    /// bounds. Reversed bounds are swapped.
    fn random_between(&mut self, lower: i64, upper: i64) -> i64;
}

fn ordered(lower: i64, upper: i64) -> (i64, i64) {
    if lower <= upper {
        (lower, upper)
    } else {
        (upper, lower)
    }
}

/// The real operating-system host.
#[derive(Debug)]
pub struct SystemHost {
    rng: StdRng,
}

impl SystemHost {
    /// Host with an entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Host whose random sequence is reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for SystemHost {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }

    fn random_between(&mut self, lower: i64, upper: i64) -> i64 {
        let (lo, hi) = ordered(lower, upper);
        self.rng.gen_range(lo..=hi)
    }
}

/// Deterministic host that records sleeps instead of performing them.
#[derive(Debug)]
pub struct RecordingHost {
    /// Value returned by [`Host::now_millis`].
    pub now: i64,
    /// Every requested sleep, in order.
    pub sleeps: Vec<Duration>,
    rng: StdRng,
}

impl RecordingHost {
    pub fn new(seed: u64) -> Self {
        Self {
            now: 0,
            sleeps: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_clock(mut self, now: i64) -> Self {
        self.now = now;
        self
    }

    /// Total time the program asked to sleep.
    pub fn total_slept(&self) -> Duration {
        self.sleeps.iter().sum()
    }
}

impl Host for RecordingHost {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }

    fn now_millis(&self) -> i64 {
        self.now
    }

    fn random_between(&mut self, lower: i64, upper: i64) -> i64 {
        let (lo, hi) = ordered(lower, upper);
        self.rng.gen_range(lo..=hi)
    }
}
