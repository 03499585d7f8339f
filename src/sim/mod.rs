//! Simulation core
//!
//! All gameplay logic lives here:
//! - Fixed timestep only, driven by [`SimulationClock`]
//! - Randomness only through an injected [`RandomSource`]
//! - Config passed in explicitly, never read from globals
//! - No rendering, audio or storage calls; those are published as [`GameEvent`]s

pub mod asteroid;
pub mod clock;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod movement;
pub mod rng;
pub mod score;
pub mod ship;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::SimulationClock;
pub use collision::{Resolution, overlaps};
pub use events::{GameEvent, SoundCue};
pub use rng::{RandomSource, SimRng};
pub use score::ScoreTracker;
pub use snapshot::RenderSnapshot;
pub use state::{
    Asteroid, AsteroidSize, Body, Bullet, EnemyCraft, EnemyShot, Entity, GameMode, GameState,
    PowerUp, PowerUpKind, Ship, WeaponMode,
};
pub use tick::{Command, TickInput, tick};
