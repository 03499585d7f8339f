//! Run state and entity types
//!
//! Every moving object shares a [`Body`]; per-kind data sits next to it and
//! the [`Entity`] trait exposes the shared part to movement and collision code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::score::ScoreTracker;
use crate::config::GameConfig;
use crate::consts::MAX_SHIELD;

/// Current mode of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for a start command
    #[default]
    Menu,
    /// Active run
    Play,
    /// Run ended, waiting for restart or return to menu
    GameOver,
}

/// Position, velocity and collision radius shared by every moving object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Marked for removal at the end of the tick
    pub dead: bool,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            dead: false,
        }
    }
}

/// Capability shared by every simulated object
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Whether the object reappears on the opposite edge when leaving the play area
    fn wraps(&self) -> bool {
        true
    }

    fn is_dead(&self) -> bool {
        self.body().dead
    }

    fn kill(&mut self) {
        self.body_mut().dead = true;
    }
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Entity for $ty {
                fn body(&self) -> &Body {
                    &self.body
                }

                fn body_mut(&mut self) -> &mut Body {
                    &mut self.body
                }
            }
        )*
    };
}

impl_entity!(Ship, Bullet, Asteroid, EnemyCraft, PowerUp);

impl Entity for EnemyShot {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn wraps(&self) -> bool {
        false
    }
}

/// Bullet fan fired by the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponMode {
    #[default]
    Single,
    Triple,
    Five,
}

impl WeaponMode {
    /// Spread multipliers for each bullet in the fan
    pub fn offsets(self) -> &'static [f32] {
        match self {
            WeaponMode::Single => &[0.0],
            WeaponMode::Triple => &[-1.0, 0.0, 1.0],
            WeaponMode::Five => &[-2.0, -1.0, 0.0, 1.0, 2.0],
        }
    }

    /// Next mode up, or None when already at the widest fan
    pub fn upgraded(self) -> Option<Self> {
        match self {
            WeaponMode::Single => Some(WeaponMode::Triple),
            WeaponMode::Triple => Some(WeaponMode::Five),
            WeaponMode::Five => None,
        }
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// Facing angle in radians (0 = +x, y grows downward)
    pub angle: f32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    /// Seconds of remaining damage immunity
    pub invulnerable: f32,
    /// Presentation-only blink toggle while invulnerable
    pub blink: bool,
    blink_timer: f32,
    pub weapon: WeaponMode,
    pub speed_level: u8,
    pub shield: u8,
}

impl Ship {
    /// Fresh ship at the given position with baseline stats and spawn invulnerability
    pub fn spawn(pos: Vec2, config: &GameConfig) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO, config.ship.radius),
            angle: -std::f32::consts::FRAC_PI_2,
            fire_cooldown: 0.0,
            invulnerable: config.ship.spawn_invulnerability,
            blink: false,
            blink_timer: 0.0,
            weapon: WeaponMode::Single,
            speed_level: 0,
            shield: 0,
        }
    }

    /// Count the invulnerability window down and toggle the blink flag
    pub fn tick_invulnerability(&mut self, dt: f32, blink_interval: f32) {
        if self.invulnerable > 0.0 {
            self.invulnerable -= dt;
            self.blink_timer += dt;
            if blink_interval > 0.0 && self.blink_timer >= blink_interval {
                self.blink = !self.blink;
                self.blink_timer -= blink_interval;
            }
        }
        if self.invulnerable <= 0.0 {
            self.invulnerable = 0.0;
            self.blink = false;
            self.blink_timer = 0.0;
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    pub fn add_shield(&mut self) -> bool {
        if self.shield >= MAX_SHIELD {
            return false;
        }
        self.shield += 1;
        true
    }
}

/// A player bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    /// Firing angle (radians)
    pub angle: f32,
    /// Seconds left before despawn
    pub life: f32,
}

/// Hazard size class; smaller tiers are worth more
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Tier index (0 = large, 1 = medium, 2 = small)
    pub fn tier(self) -> usize {
        match self {
            AsteroidSize::Large => 0,
            AsteroidSize::Medium => 1,
            AsteroidSize::Small => 2,
        }
    }

    /// Size of the pieces produced on destruction
    pub fn child(self) -> Option<Self> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// A drifting hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
    /// Color variant (0 or 1), inherited by children
    pub color: u8,
    /// Presentation rotation (radians)
    pub angle: f32,
    /// Radians per second
    pub spin: f32,
    /// Wave speed scaling captured at creation, inherited by children
    pub speed_mult: f32,
}

/// The intermittent enemy craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCraft {
    pub body: Body,
    pub hit_points: u32,
    /// Seconds until the next shot
    pub fire_cooldown: f32,
    pub variant: u8,
}

/// Projectile fired by the enemy craft (never wraps)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShot {
    pub body: Body,
    pub angle: f32,
    pub life: f32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    TripleShot,
    ExtraLife,
    Shield,
    Speed,
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    pub angle: f32,
    pub spin: f32,
}

/// Complete run state, mutated only by [`super::tick`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    /// Current wave index (0-based)
    pub wave: u32,
    pub lives: u32,
    /// Score, high score and save requests
    pub scores: ScoreTracker,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub enemy: Option<EnemyCraft>,
    pub enemy_shots: Vec<EnemyShot>,
    pub power_ups: Vec<PowerUp>,
    /// Seconds until the enemy craft appears
    pub enemy_spawn_timer: f32,
    /// Set once the craft has appeared during the current wave
    pub enemy_spawned_this_wave: bool,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Notifications produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create the initial menu state
    pub fn new(config: &GameConfig) -> Self {
        Self {
            mode: GameMode::Menu,
            wave: 0,
            lives: config.starting_lives,
            scores: ScoreTracker::default(),
            ship: Ship::spawn(config.world.center(), config),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            enemy: None,
            enemy_shots: Vec::new(),
            power_ups: Vec::new(),
            enemy_spawn_timer: 0.0,
            enemy_spawned_this_wave: false,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Drop every live entity except the ship
    pub fn clear_world(&mut self) {
        self.bullets.clear();
        self.asteroids.clear();
        self.enemy = None;
        self.enemy_shots.clear();
        self.power_ups.clear();
    }

    /// Remove entities marked dead this tick
    pub fn purge_dead(&mut self) {
        self.bullets.retain(|b| !b.is_dead());
        self.asteroids.retain(|a| !a.is_dead());
        self.enemy_shots.retain(|s| !s.is_dead());
        self.power_ups.retain(|p| !p.is_dead());
        if self.enemy.as_ref().is_some_and(|e| e.is_dead()) {
            self.enemy = None;
        }
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
