//! Wave generation: hazards, power-up rolls, and the enemy timer

use glam::Vec2;

use super::asteroid;
use super::enemy;
use super::events::GameEvent;
use super::rng::RandomSource;
use super::state::{AsteroidSize, Body, GameState, PowerUp, PowerUpKind};
use crate::config::{GameConfig, SpawnModel};
use crate::polar_to_cartesian;

/// Hazards created at the start of a wave
pub fn asteroid_count(wave: u32, config: &GameConfig) -> u32 {
    config
        .asteroid
        .start_count
        .saturating_add(wave.saturating_mul(config.asteroid.count_growth))
}

/// A point on the wrap seam, i.e. just off one of the screen edges
fn edge_position(config: &GameConfig, rng: &mut dyn RandomSource) -> Vec2 {
    let world = &config.world;
    if rng.chance(0.5) {
        Vec2::new(0.0, rng.range(0.0, world.height))
    } else {
        Vec2::new(rng.range(0.0, world.width), 0.0)
    }
}

/// Decide which power-up types appear this wave; each rule rolls independently
pub fn roll_power_ups(
    wave: u32,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
) -> Vec<PowerUpKind> {
    config
        .power_ups
        .rules
        .iter()
        .filter(|rule| match rule.model {
            SpawnModel::Chance(p) => rng.chance(p),
            SpawnModel::Interval(0) => false,
            SpawnModel::Interval(n) => wave % n == 0,
        })
        .map(|rule| rule.kind)
        .collect()
}

fn spawn_power_up(kind: PowerUpKind, config: &GameConfig, rng: &mut dyn RandomSource) -> PowerUp {
    let tuning = &config.power_ups;
    let pos = Vec2::new(
        rng.range(0.0, config.world.width),
        rng.range(0.0, config.world.height),
    );
    let vel = polar_to_cartesian(tuning.drift_speed, rng.angle());
    PowerUp {
        body: Body::new(pos, vel, tuning.radius),
        kind,
        angle: rng.angle(),
        spin: rng.range(-tuning.max_spin, tuning.max_spin),
    }
}

/// Populate the current wave and reset the enemy craft for it
pub fn begin_wave(state: &mut GameState, config: &GameConfig, rng: &mut dyn RandomSource) {
    let wave = state.wave;
    let count = asteroid_count(wave, config);
    let speed_mult = asteroid::speed_multiplier(wave, config);

    for _ in 0..count {
        let pos = edge_position(config, rng);
        let color = if rng.chance(0.5) { 0 } else { 1 };
        state
            .asteroids
            .push(asteroid::create(AsteroidSize::Large, pos, color, speed_mult, config, rng));
    }

    let kinds = roll_power_ups(wave, config, rng);
    if !kinds.is_empty() {
        log::debug!("Wave {} power-ups: {:?}", wave, kinds);
    }
    for kind in kinds {
        state.power_ups.push(spawn_power_up(kind, config, rng));
    }

    state.enemy = None;
    state.enemy_spawned_this_wave = false;
    state.enemy_spawn_timer = enemy::spawn_delay(wave, config);

    log::info!(
        "Wave {}: {} hazards, enemy in {:.1}s",
        wave,
        count,
        state.enemy_spawn_timer
    );
    state.events.push(GameEvent::WaveStarted {
        wave,
        asteroids: state.asteroids.len(),
    });
}

/// Move to the next wave once the hazards are cleared
pub fn advance_wave(state: &mut GameState, config: &GameConfig, rng: &mut dyn RandomSource) {
    state.wave += 1;
    begin_wave(state, config, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PowerUpRule;
    use crate::sim::rng::SimRng;
    use crate::sim::state::{EnemyCraft, Entity};

    /// Draws a fixed value forever
    struct Fixed(f32);

    impl RandomSource for Fixed {
        fn next_f32(&mut self) -> f32 {
            self.0
        }
    }

    fn rules(rules: Vec<PowerUpRule>) -> GameConfig {
        let mut config = GameConfig::default();
        config.power_ups.rules = rules;
        config
    }

    #[test]
    fn test_count_grows_per_wave() {
        let config = GameConfig::default();
        assert_eq!(asteroid_count(0, &config), config.asteroid.start_count);
        assert_eq!(
            asteroid_count(3, &config),
            config.asteroid.start_count + 3 * config.asteroid.count_growth
        );
    }

    #[test]
    fn test_wave_hazards_start_on_seam() {
        let config = GameConfig::default();
        let mut rng = SimRng::seeded(21);
        let mut state = GameState::new(&config);
        state.wave = 2;

        begin_wave(&mut state, &config, &mut rng);

        assert_eq!(state.asteroids.len() as u32, asteroid_count(2, &config));
        let mult = asteroid::speed_multiplier(2, &config);
        for a in &state.asteroids {
            assert_eq!(a.size, AsteroidSize::Large);
            assert!(a.body.pos.x == 0.0 || a.body.pos.y == 0.0);
            assert!(a.color <= 1);
            assert_eq!(a.speed_mult, mult);
        }
        assert!(state.events.contains(&GameEvent::WaveStarted {
            wave: 2,
            asteroids: state.asteroids.len(),
        }));
    }

    #[test]
    fn test_interval_rule_follows_wave_index() {
        let config = rules(vec![PowerUpRule {
            kind: PowerUpKind::ExtraLife,
            model: SpawnModel::Interval(3),
            duplicate_bonus: 0,
        }]);
        let mut rng = SimRng::seeded(1);
        assert_eq!(roll_power_ups(0, &config, &mut rng), vec![PowerUpKind::ExtraLife]);
        assert!(roll_power_ups(1, &config, &mut rng).is_empty());
        assert_eq!(roll_power_ups(6, &config, &mut rng), vec![PowerUpKind::ExtraLife]);
    }

    #[test]
    fn test_zero_interval_never_spawns() {
        let config = rules(vec![PowerUpRule {
            kind: PowerUpKind::Speed,
            model: SpawnModel::Interval(0),
            duplicate_bonus: 0,
        }]);
        let mut rng = SimRng::seeded(1);
        assert!(roll_power_ups(0, &config, &mut rng).is_empty());
    }

    #[test]
    fn test_chance_rules_roll_independently() {
        let config = rules(vec![
            PowerUpRule {
                kind: PowerUpKind::TripleShot,
                model: SpawnModel::Chance(0.5),
                duplicate_bonus: 0,
            },
            PowerUpRule {
                kind: PowerUpKind::Shield,
                model: SpawnModel::Chance(0.5),
                duplicate_bonus: 0,
            },
        ]);
        assert_eq!(
            roll_power_ups(1, &config, &mut Fixed(0.1)),
            vec![PowerUpKind::TripleShot, PowerUpKind::Shield]
        );
        assert!(roll_power_ups(1, &config, &mut Fixed(0.9)).is_empty());
    }

    #[test]
    fn test_advance_resets_enemy() {
        let config = GameConfig::default();
        let mut rng = SimRng::seeded(4);
        let mut state = GameState::new(&config);
        state.enemy_spawned_this_wave = true;
        state.enemy = Some(EnemyCraft {
            body: Body::new(Vec2::ZERO, Vec2::ZERO, 10.0),
            hit_points: 1,
            fire_cooldown: 1.0,
            variant: 0,
        });

        advance_wave(&mut state, &config, &mut rng);

        assert_eq!(state.wave, 1);
        assert!(state.enemy.is_none());
        assert!(!state.enemy_spawned_this_wave);
        assert_eq!(state.enemy_spawn_timer, enemy::spawn_delay(1, &config));
        assert!(state.power_ups.iter().all(|p| !p.is_dead()));
    }
}
