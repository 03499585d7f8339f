//! Injectable random source for spawn and power-up rolls
//!
//! Production runs use an unseeded generator; tests seed it for repeatable waves.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform draws used by the simulation
pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Uniform float in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// True with the given probability
    fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// Uniform index in [0, len); 0 when len is 0
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }

    /// Uniform angle in [0, τ)
    fn angle(&mut self) -> f32 {
        self.range(0.0, std::f32::consts::TAU)
    }
}

/// PCG-backed random source
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: Pcg32,
}

impl SimRng {
    /// Unseeded generator (non-reproducible runs)
    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg32::from_os_rng(),
        }
    }

    /// Seeded generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SimRng {
    fn next_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }
}
