//! Host loop
//!
//! Owns the run and its collaborators. Each host frame feeds the clock,
//! runs the fixed ticks, then hands queued events to audio and storage.

use crate::audio::AudioSink;
use crate::config::GameConfig;
use crate::consts::SIM_DT;
use crate::persistence::HighScoreStore;
use crate::platform::InputState;
use crate::sim::{
    GameEvent, GameMode, GameState, RandomSource, RenderSnapshot, SimRng, SimulationClock,
    TickInput, tick,
};

pub struct App<S: HighScoreStore, A: AudioSink> {
    pub config: GameConfig,
    pub state: GameState,
    pub input: InputState,
    clock: SimulationClock,
    rng: Box<dyn RandomSource>,
    store: S,
    audio: A,
}

impl<S: HighScoreStore, A: AudioSink> App<S, A> {
    /// Unseeded production instance
    pub fn new(config: GameConfig, store: S, audio: A) -> Self {
        Self::with_rng(config, store, audio, Box::new(SimRng::from_entropy()))
    }

    pub fn with_rng(
        config: GameConfig,
        mut store: S,
        audio: A,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let mut state = GameState::new(&config);
        match store.load() {
            Ok(Some(high_score)) => {
                log::info!("Loaded high score {}", high_score);
                state.scores.observe_loaded(high_score);
            }
            Ok(None) => log::info!("No saved high score"),
            Err(e) => log::warn!("High score load failed: {}", e),
        }

        Self {
            config,
            state,
            input: InputState::new(),
            clock: SimulationClock::new(),
            rng,
            store,
            audio,
        }
    }

    /// Advance by one host frame of `wall_dt` seconds; returns ticks run
    pub fn frame(&mut self, wall_dt: f32) -> u32 {
        self.clock.push(wall_dt);

        let mut ticks = 0;
        while self.clock.next_tick() {
            let input = TickInput::from_input(&self.input);
            tick(&mut self.state, &input, &self.config, self.rng.as_mut(), SIM_DT);
            self.input.clear_edges();
            ticks += 1;
        }

        for event in self.state.drain_events() {
            self.dispatch(event);
        }
        ticks
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Sound(cue) => self.audio.play(cue),
            GameEvent::MusicStart => self.audio.start_music(),
            GameEvent::MusicStop => self.audio.stop_music(),
            GameEvent::SaveHighScore(score) => {
                // A failed write is retried by the next higher score
                if let Err(e) = self.store.save(score) {
                    log::warn!("High score save failed: {}", e);
                }
            }
            GameEvent::RunStarted => log::info!("Run started"),
            GameEvent::RunOver {
                score,
                wave,
                high_score,
                new_high_score,
            } => log::info!(
                "Game over: score={} wave={} high={} new_high={}",
                score,
                wave + 1,
                high_score,
                new_high_score
            ),
            GameEvent::ReturnedToMenu => log::info!("Back at menu"),
            GameEvent::WaveStarted { wave, asteroids } => {
                log::debug!("Wave {} started with {} hazards", wave + 1, asteroids)
            }
        }
    }

    /// Drop every held key, e.g. when the page loses focus and key-ups go missing
    pub fn release_input(&mut self) {
        self.input.release_all();
        log::debug!("Input released");
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::persistence::MemoryStore;
    use crate::platform::Key;

    fn app(store: MemoryStore) -> App<MemoryStore, NullAudio> {
        App::with_rng(
            GameConfig::default(),
            store,
            NullAudio::default(),
            Box::new(SimRng::seeded(77)),
        )
    }

    #[test]
    fn test_loads_high_score_at_startup() {
        let app = app(MemoryStore::with_value(900));
        assert_eq!(app.state.scores.high_score, 900);
        assert_eq!(app.snapshot().high_score, 900);
    }

    #[test]
    fn test_failed_load_starts_from_zero() {
        let app = app(MemoryStore {
            fail_load: true,
            ..Default::default()
        });
        assert_eq!(app.state.scores.high_score, 0);
    }

    #[test]
    fn test_start_key_begins_run_and_music() {
        let mut app = app(MemoryStore::default());
        app.input.key_down(Key::Start);
        let ticks = app.frame(1.0 / 60.0);
        assert_eq!(ticks, 2);
        assert_eq!(app.mode(), GameMode::Play);
        assert!(app.audio().music_playing);

        // The press edge was consumed by the first tick only
        assert!(!app.input.pressed(Key::Start));
    }

    #[test]
    fn test_high_score_saved_after_frame() {
        let mut app = app(MemoryStore::default());
        app.input.key_down(Key::Start);
        app.frame(SIM_DT);
        app.state.scores.award(150);
        app.frame(SIM_DT);
        assert_eq!(app.store().writes, vec![150]);
    }

    #[test]
    fn test_failed_save_does_not_stop_play() {
        let mut app = app(MemoryStore {
            fail_save: true,
            ..Default::default()
        });
        app.input.key_down(Key::Start);
        app.frame(SIM_DT);
        app.state.scores.award(150);
        app.frame(SIM_DT);
        assert!(app.store().writes.is_empty());
        assert_eq!(app.mode(), GameMode::Play);
    }

    #[test]
    fn test_released_input_stops_held_controls() {
        let mut app = app(MemoryStore::default());
        app.input.key_down(Key::Start);
        app.frame(SIM_DT);
        app.state.ship.invulnerable = 100.0;

        app.input.key_down(Key::Thrust);
        app.input.key_down(Key::Fire);
        app.frame(SIM_DT);
        assert!(app.state.ship.body.vel.length() > 0.0);

        app.release_input();
        assert!(!app.input.is_down(Key::Thrust));
        assert!(!app.input.is_down(Key::Fire));

        app.state.ship.fire_cooldown = 0.0;
        let speed = app.state.ship.body.vel.length();
        app.frame(SIM_DT);
        assert_eq!(app.state.ship.fire_cooldown, 0.0);
        assert!(app.state.ship.body.vel.length() <= speed);
    }

    #[test]
    fn test_menu_key_stops_music() {
        let mut app = app(MemoryStore::default());
        app.input.key_down(Key::Start);
        app.frame(SIM_DT);
        app.input.key_down(Key::Menu);
        app.frame(SIM_DT);
        assert_eq!(app.mode(), GameMode::Menu);
        assert!(!app.audio().music_playing);
    }
}
