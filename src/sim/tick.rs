//! Fixed timestep simulation tick
//!
//! Runs the mode gate and, while playing, every per-tick stage in order:
//! ship control, entity timers, enemy AI, movement, collisions, cleanup,
//! and the wave check.

use super::collision::{self, Resolution};
use super::events::GameEvent;
use super::rng::RandomSource;
use super::state::{GameMode, GameState, Ship};
use super::{enemy, movement, ship, spawn};
use crate::config::GameConfig;
use crate::platform::{InputState, Key};

/// Mode change requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
    ReturnToMenu,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    /// Fire while held (cooldown permitting)
    pub fire: bool,
    /// Edge-triggered mode command
    pub command: Option<Command>,
}

impl TickInput {
    /// Sample held keys and this tick's key presses
    pub fn from_input(input: &InputState) -> Self {
        let command = if input.pressed(Key::Menu) {
            Some(Command::ReturnToMenu)
        } else if input.pressed(Key::Restart) {
            Some(Command::Restart)
        } else if input.pressed(Key::Start) {
            Some(Command::Start)
        } else {
            None
        };

        Self {
            turn_left: input.is_down(Key::Left),
            turn_right: input.is_down(Key::Right),
            thrust: input.is_down(Key::Thrust),
            fire: input.is_down(Key::Fire),
            command,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
    dt: f32,
) {
    match state.mode {
        GameMode::Menu => {
            if input.command == Some(Command::Start) {
                start_run(state, config, rng);
            }
            return;
        }
        GameMode::GameOver => {
            match input.command {
                Some(Command::Start | Command::Restart) => start_run(state, config, rng),
                Some(Command::ReturnToMenu) => return_to_menu(state, config),
                None => {}
            }
            return;
        }
        GameMode::Play => {
            if input.command == Some(Command::ReturnToMenu) {
                return_to_menu(state, config);
                return;
            }
        }
    }

    state.time_ticks += 1;

    ship::update(
        &mut state.ship,
        input,
        config,
        dt,
        &mut state.bullets,
        &mut state.events,
    );
    update_entities(state, dt);
    enemy::update(state, config, rng, dt);
    movement::advance_world(state, &config.world, config.enemy.shot_margin, dt);

    if collision::resolve(state, config, rng) == Resolution::RunOver {
        end_run(state);
        return;
    }

    state.purge_dead();

    if state.asteroids.is_empty() {
        spawn::advance_wave(state, config, rng);
    }

    state.scores.flush_save_request(&mut state.events);
}

/// Lifetimes and presentation spin
fn update_entities(state: &mut GameState, dt: f32) {
    for bullet in state.bullets.iter_mut() {
        bullet.life -= dt;
        if bullet.life <= 0.0 {
            bullet.body.dead = true;
        }
    }
    for asteroid in state.asteroids.iter_mut() {
        asteroid.angle += asteroid.spin * dt;
    }
    for power_up in state.power_ups.iter_mut() {
        power_up.angle += power_up.spin * dt;
    }
    enemy::age_shots(&mut state.enemy_shots, dt);
}

/// Reset the run and spawn wave 0 (start and restart)
pub fn start_run(state: &mut GameState, config: &GameConfig, rng: &mut dyn RandomSource) {
    reset_run(state, config);
    state.mode = GameMode::Play;
    state.events.push(GameEvent::RunStarted);
    state.events.push(GameEvent::MusicStart);
    log::info!("Run started");
    spawn::begin_wave(state, config, rng);
}

/// Lives exhausted: publish the result and freeze the world
fn end_run(state: &mut GameState) {
    state.mode = GameMode::GameOver;
    state.purge_dead();

    let scores = &state.scores;
    log::info!(
        "Run over: score {} at wave {} (high score {}{})",
        scores.score,
        state.wave,
        scores.high_score,
        if scores.beat_high_score { ", new" } else { "" }
    );
    state.events.push(GameEvent::RunOver {
        score: scores.score,
        wave: state.wave,
        high_score: scores.high_score,
        new_high_score: scores.beat_high_score,
    });
    state.events.push(GameEvent::MusicStop);
    state.scores.flush_save_request(&mut state.events);
}

/// Discard the run without scoring side effects
pub fn return_to_menu(state: &mut GameState, config: &GameConfig) {
    let was_playing = state.mode == GameMode::Play;
    reset_run(state, config);
    state.mode = GameMode::Menu;
    state.events.push(GameEvent::ReturnedToMenu);
    if was_playing {
        state.events.push(GameEvent::MusicStop);
    }
    log::info!("Returned to menu");
}

fn reset_run(state: &mut GameState, config: &GameConfig) {
    state.clear_world();
    state.scores.reset_run();
    state.lives = config.starting_lives;
    state.wave = 0;
    state.time_ticks = 0;
    state.enemy_spawn_timer = 0.0;
    state.enemy_spawned_this_wave = false;
    state.ship = Ship::spawn(config.world.center(), config);
}
