//! Game balance configuration
//!
//! One immutable value handed to every simulation component. Loaded from JSON
//! when available; out-of-range values are clamped by [`GameConfig::sanitized`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::state::{AsteroidSize, PowerUpKind};

/// Play area dimensions (toroidal)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 720.0,
        }
    }
}

impl WorldConfig {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Ship handling and weapon tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub radius: f32,
    /// Radians per second while a turn is held
    pub turn_rate: f32,
    /// Baseline thrust acceleration (px/s²)
    pub thrust: f32,
    /// Extra acceleration per speed level
    pub thrust_per_level: f32,
    pub max_speed: f32,
    pub max_speed_per_level: f32,
    /// Velocity multiplier applied every tick
    pub friction: f32,
    /// Seconds between shots
    pub fire_cooldown: f32,
    /// Invulnerability granted on (re)spawn
    pub spawn_invulnerability: f32,
    /// Invulnerability granted when the shield absorbs a hit
    pub shield_invulnerability: f32,
    pub blink_interval: f32,
    /// Angle between neighbouring bullets in a fan (radians)
    pub spread: f32,
    /// Distance beyond the hull where bullets appear
    pub nose_offset: f32,
    pub max_speed_level: u8,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            radius: 14.0,
            turn_rate: 4.5,
            thrust: 320.0,
            thrust_per_level: 60.0,
            max_speed: 280.0,
            max_speed_per_level: 40.0,
            friction: 0.995,
            fire_cooldown: 0.2,
            spawn_invulnerability: 2.5,
            shield_invulnerability: 1.0,
            blink_interval: 0.1,
            spread: 0.12,
            nose_offset: 4.0,
            max_speed_level: 3,
        }
    }
}

impl ShipConfig {
    pub fn thrust_for(&self, level: u8) -> f32 {
        self.thrust + self.thrust_per_level * level as f32
    }

    pub fn max_speed_for(&self, level: u8) -> f32 {
        self.max_speed + self.max_speed_per_level * level as f32
    }
}

/// Player bullet tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub radius: f32,
    pub speed: f32,
    /// Seconds before a bullet despawns
    pub lifetime: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            speed: 520.0,
            lifetime: 1.1,
        }
    }
}

/// Hazard tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Radius per tier (large, medium, small)
    pub radii: [f32; 3],
    /// Score per tier (large, medium, small)
    pub scores: [u64; 3],
    pub min_speed: f32,
    pub max_speed: f32,
    /// Speed multiplier gained per wave
    pub speed_growth: f32,
    /// Children produced when a large or medium hazard breaks
    pub split_count: u32,
    pub start_count: u32,
    /// Extra hazards per wave
    pub count_growth: u32,
    /// Presentation spin limit (radians per second)
    pub max_spin: f32,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            radii: [48.0, 28.0, 14.0],
            scores: [20, 50, 100],
            min_speed: 30.0,
            max_speed: 80.0,
            speed_growth: 0.1,
            split_count: 2,
            start_count: 4,
            count_growth: 1,
            max_spin: 1.5,
        }
    }
}

impl AsteroidConfig {
    pub fn radius_for(&self, size: AsteroidSize) -> f32 {
        self.radii[size.tier()]
    }

    pub fn score_for(&self, size: AsteroidSize) -> u64 {
        self.scores[size.tier()]
    }
}

/// Enemy craft and projectile tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub radius: f32,
    pub hit_points: u32,
    pub speed: f32,
    /// Seconds between shots
    pub fire_interval: f32,
    /// Spawn delay at wave 0 (seconds)
    pub spawn_delay_base: f32,
    /// Delay removed per wave
    pub spawn_delay_decay: f32,
    pub spawn_delay_min: f32,
    pub kill_bonus: u64,
    pub shot_radius: f32,
    pub shot_speed: f32,
    pub shot_lifetime: f32,
    /// Distance outside the play area at which shots are discarded
    pub shot_margin: f32,
    /// Number of sprite variants to pick from
    pub variants: u8,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            radius: 18.0,
            hit_points: 3,
            speed: 90.0,
            fire_interval: 1.5,
            spawn_delay_base: 20.0,
            spawn_delay_decay: 1.5,
            spawn_delay_min: 6.0,
            kill_bonus: 500,
            shot_radius: 4.0,
            shot_speed: 240.0,
            shot_lifetime: 3.0,
            shot_margin: 40.0,
            variants: 3,
        }
    }
}

/// How a power-up type decides whether to appear in a wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnModel {
    /// Appears when a uniform draw falls below the probability
    Chance(f32),
    /// Appears on every wave whose index is a multiple of N (0 = never)
    Interval(u32),
}

/// Spawn and duplicate-pickup rule for one power-up type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpRule {
    pub kind: PowerUpKind,
    pub model: SpawnModel,
    /// Score awarded when picked up while the effect is already maxed
    pub duplicate_bonus: u64,
}

/// Power-up tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub radius: f32,
    pub drift_speed: f32,
    pub max_spin: f32,
    pub rules: Vec<PowerUpRule>,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            radius: 12.0,
            drift_speed: 25.0,
            max_spin: 2.0,
            rules: vec![
                PowerUpRule {
                    kind: PowerUpKind::TripleShot,
                    model: SpawnModel::Chance(0.25),
                    duplicate_bonus: 250,
                },
                PowerUpRule {
                    kind: PowerUpKind::ExtraLife,
                    model: SpawnModel::Interval(3),
                    duplicate_bonus: 500,
                },
                PowerUpRule {
                    kind: PowerUpKind::Shield,
                    model: SpawnModel::Chance(0.3),
                    duplicate_bonus: 200,
                },
                PowerUpRule {
                    kind: PowerUpKind::Speed,
                    model: SpawnModel::Chance(0.25),
                    duplicate_bonus: 150,
                },
            ],
        }
    }
}

impl PowerUpConfig {
    pub fn duplicate_bonus(&self, kind: PowerUpKind) -> u64 {
        self.rules
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.duplicate_bonus)
            .unwrap_or(0)
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub ship: ShipConfig,
    pub bullet: BulletConfig,
    pub asteroid: AsteroidConfig,
    pub enemy: EnemyConfig,
    pub power_ups: PowerUpConfig,
    pub starting_lives: u32,
    pub max_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            ship: ShipConfig::default(),
            bullet: BulletConfig::default(),
            asteroid: AsteroidConfig::default(),
            enemy: EnemyConfig::default(),
            power_ups: PowerUpConfig::default(),
            starting_lives: 3,
            max_lives: 5,
        }
    }
}

/// Replace non-positive or non-finite values with a fallback
fn positive(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn probability(p: f32) -> f32 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

impl GameConfig {
    /// Clamp every value into its valid range
    pub fn sanitized(mut self) -> Self {
        let defaults = GameConfig::default();

        self.world.width = positive(self.world.width, defaults.world.width);
        self.world.height = positive(self.world.height, defaults.world.height);

        let ship = &mut self.ship;
        ship.radius = positive(ship.radius, defaults.ship.radius);
        ship.friction = if ship.friction.is_finite() {
            ship.friction.clamp(0.0, 1.0)
        } else {
            defaults.ship.friction
        };
        ship.max_speed = positive(ship.max_speed, defaults.ship.max_speed);
        ship.max_speed_per_level = ship.max_speed_per_level.max(0.0);
        ship.thrust_per_level = ship.thrust_per_level.max(0.0);
        ship.fire_cooldown = ship.fire_cooldown.max(0.0);
        ship.spawn_invulnerability = ship.spawn_invulnerability.max(0.0);
        ship.shield_invulnerability = ship.shield_invulnerability.max(0.0);

        self.bullet.radius = positive(self.bullet.radius, defaults.bullet.radius);
        self.bullet.lifetime = positive(self.bullet.lifetime, defaults.bullet.lifetime);

        for (radius, fallback) in self.asteroid.radii.iter_mut().zip(defaults.asteroid.radii) {
            *radius = positive(*radius, fallback);
        }
        if self.asteroid.max_speed < self.asteroid.min_speed {
            std::mem::swap(&mut self.asteroid.min_speed, &mut self.asteroid.max_speed);
        }
        self.asteroid.min_speed = self.asteroid.min_speed.max(0.0);
        // Every wave needs at least one hazard to clear
        self.asteroid.start_count = self.asteroid.start_count.max(1);
        self.asteroid.speed_growth = self.asteroid.speed_growth.max(0.0);

        self.enemy.radius = positive(self.enemy.radius, defaults.enemy.radius);
        self.enemy.shot_radius = positive(self.enemy.shot_radius, defaults.enemy.shot_radius);
        self.enemy.hit_points = self.enemy.hit_points.max(1);
        self.enemy.fire_interval = positive(self.enemy.fire_interval, defaults.enemy.fire_interval);
        self.enemy.spawn_delay_min = self.enemy.spawn_delay_min.max(0.0);
        self.enemy.shot_margin = self.enemy.shot_margin.max(0.0);
        self.enemy.variants = self.enemy.variants.max(1);

        self.power_ups.radius = positive(self.power_ups.radius, defaults.power_ups.radius);
        for rule in &mut self.power_ups.rules {
            if let SpawnModel::Chance(p) = rule.model {
                rule.model = SpawnModel::Chance(probability(p));
            }
        }

        self.starting_lives = self.starting_lives.max(1);
        self.max_lives = self.max_lives.max(self.starting_lives);
        self
    }

    /// Parse a (possibly partial) JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<GameConfig>(json).map(GameConfig::sanitized)
    }

    /// Load from a JSON file, falling back to defaults on any failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json_str(r#"{"starting_lives": 5, "ship": {"radius": 20.0}}"#)
            .expect("valid json");
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.ship.radius, 20.0);
        assert_eq!(config.ship.turn_rate, ShipConfig::default().turn_rate);
        assert_eq!(config.asteroid.start_count, 4);
    }

    #[test]
    fn test_sanitize_clamps_probabilities_and_radii() {
        let mut config = GameConfig::default();
        config.ship.radius = -3.0;
        config.bullet.radius = f32::NAN;
        config.power_ups.rules[0].model = SpawnModel::Chance(1.7);
        config.power_ups.rules[2].model = SpawnModel::Chance(f32::NAN);
        config.starting_lives = 0;
        config.max_lives = 0;

        let config = config.sanitized();
        assert_eq!(config.ship.radius, ShipConfig::default().radius);
        assert_eq!(config.bullet.radius, BulletConfig::default().radius);
        assert_eq!(config.power_ups.rules[0].model, SpawnModel::Chance(1.0));
        assert_eq!(config.power_ups.rules[2].model, SpawnModel::Chance(0.0));
        assert_eq!(config.starting_lives, 1);
        assert_eq!(config.max_lives, 1);
    }

    #[test]
    fn test_empty_waves_are_rejected() {
        let config = GameConfig::from_json_str(
            r#"{"asteroid": {"start_count": 0, "count_growth": 0}}"#,
        )
        .expect("valid json");
        assert_eq!(config.asteroid.start_count, 1);
        assert_eq!(config.asteroid.count_growth, 0);
    }

    #[test]
    fn test_speed_scales_with_level() {
        let ship = ShipConfig::default();
        assert_eq!(ship.max_speed_for(0), ship.max_speed);
        assert_eq!(ship.max_speed_for(2), ship.max_speed + 2.0 * ship.max_speed_per_level);
        assert!(ship.thrust_for(3) > ship.thrust_for(0));
    }

    #[test]
    fn test_smallest_tier_scores_highest() {
        let asteroid = AsteroidConfig::default();
        assert!(asteroid.score_for(AsteroidSize::Small) > asteroid.score_for(AsteroidSize::Medium));
        assert!(asteroid.score_for(AsteroidSize::Medium) > asteroid.score_for(AsteroidSize::Large));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(GameConfig::from_json_str("{ not json").is_err());
    }
}
