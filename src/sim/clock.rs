//! Fixed-step accumulator
//!
//! Host frames push wall-clock deltas in; the loop drains whole `SIM_DT`
//! slices out and carries the remainder to the next frame.

use crate::consts::{MAX_FRAME_DT, SIM_DT};

/// Slack for f32 rounding so a clamped 0.1 s frame yields exactly 12 slices
const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    accumulator: f64,
    /// Total fixed ticks released since creation
    ticks: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one host frame's delta, clamped to `MAX_FRAME_DT`
    pub fn push(&mut self, frame_dt: f32) {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt as f64;
    }

    /// Release one fixed slice if a whole one is available
    pub fn next_tick(&mut self) -> bool {
        let step = SIM_DT as f64;
        if self.accumulator + EPSILON < step {
            return false;
        }
        self.accumulator = (self.accumulator - step).max(0.0);
        self.ticks += 1;
        true
    }

    /// Time carried over to the next frame (seconds)
    pub fn remainder(&self) -> f64 {
        self.accumulator
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
