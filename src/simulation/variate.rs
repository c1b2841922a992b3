//! Exponential variate generation
//!
//! Samples are drawn by inverse-transform sampling from a uniform `U` in `[0, 1)`:
//! `-ln(1 - U) / rate`. The uniform source is any `rand::Rng`; the simulation
//! uses a seeded [`StdRng`] so that a run is exactly reproducible from its seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Map a uniform variate in `[0, 1)` to an exponential variate with the given rate
pub fn exponential_from_uniform(uniform: f64, rate: f64) -> f64 {
    debug_assert!((0.0..1.0).contains(&uniform), "uniform variate {} outside [0, 1)", uniform);
    debug_assert!(rate > 0.0, "rate must be positive, got {}", rate);
    -(1.0 - uniform).ln() / rate
}

/// Source of exponential inter-arrival and service durations
#[derive(Debug, Clone)]
pub struct VariateGenerator<R = StdRng> {
    rng: R,
}

impl<R: Rng> VariateGenerator<R> {
    /// Wrap an existing uniform source
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a non-negative exponential sample with mean `1 / rate`
    pub fn sample(&mut self, rate: f64) -> f64 {
        let uniform: f64 = self.rng.gen();
        exponential_from_uniform(uniform, rate)
    }
}

impl<R: Rng + SeedableRng> VariateGenerator<R> {
    /// Create a generator whose stream is fixed by `seed`
    pub fn seeded(seed: u64) -> Self {
        Self { rng: R::seed_from_u64(seed) }
    }

    /// Restart the stream from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }
}
