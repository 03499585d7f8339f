//! Notifications published by the simulation for the host collaborators

use serde::{Deserialize, Serialize};

/// Fire-and-forget audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Shoot,
    PowerUp,
    PlayerHit,
    EnemyLaser,
    /// Hazard or enemy craft destroyed
    Explosion,
}

/// Lifecycle and collaborator events, drained by the host after each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    RunOver {
        score: u64,
        wave: u32,
        high_score: u64,
        new_high_score: bool,
    },
    ReturnedToMenu,
    WaveStarted {
        wave: u32,
        asteroids: usize,
    },
    Sound(SoundCue),
    MusicStart,
    MusicStop,
    /// Persist this high score (outside the tick)
    SaveHighScore(u64),
}
