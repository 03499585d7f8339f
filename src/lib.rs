//! Drift Blaster - a wrap-around asteroid shooter
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (entities, collisions, waves, scoring)
//! - `config`: Immutable game balance, passed explicitly into the simulation
//! - `platform`: Input edge tracking for the host
//! - `persistence`: High score storage collaborators
//! - `audio`: Cue playback collaborators
//! - `app`: Host loop tying the collaborators to the simulation

pub mod app;
pub mod audio;
pub mod config;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use app::App;
pub use config::GameConfig;

use glam::Vec2;

/// Engine constants that are not part of the tunable config
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Largest wall-clock delta accepted per host frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Highest shield level a ship can hold
    pub const MAX_SHIELD: u8 = 2;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
