//! Score and high score bookkeeping

use serde::{Deserialize, Serialize};

use super::events::GameEvent;

/// Current score, best score, and pending persistence requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub score: u64,
    pub high_score: u64,
    /// The current run has exceeded the previous high score
    pub beat_high_score: bool,
    /// High score value waiting to be written, coalesced per tick
    #[serde(skip)]
    pending_save: Option<u64>,
}

impl ScoreTracker {
    /// Reset per-run values; the high score is kept
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.beat_high_score = false;
        self.pending_save = None;
    }

    /// Add points and raise the high score if exceeded
    pub fn award(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.beat_high_score = true;
            self.pending_save = Some(self.high_score);
        }
    }

    /// Merge a high score loaded from storage
    pub fn observe_loaded(&mut self, loaded: u64) {
        if loaded > self.high_score {
            self.high_score = loaded;
        }
    }

    /// Emit at most one save request for the high score reached this tick
    pub fn flush_save_request(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(score) = self.pending_save.take() {
            events.push(GameEvent::SaveHighScore(score));
        }
    }
}
