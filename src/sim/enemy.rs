//! Enemy craft: spawn timer, edge entry, and aimed fire

use glam::Vec2;

use super::events::{GameEvent, SoundCue};
use super::rng::RandomSource;
use super::state::{Body, EnemyCraft, EnemyShot, GameState};
use crate::config::GameConfig;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Seconds before the craft appears in the given wave
pub fn spawn_delay(wave: u32, config: &GameConfig) -> f32 {
    let tuning = &config.enemy;
    (tuning.spawn_delay_base - wave as f32 * tuning.spawn_delay_decay).max(tuning.spawn_delay_min)
}

/// Create a craft on a random screen edge moving straight across
pub fn spawn_at_edge(config: &GameConfig, rng: &mut dyn RandomSource) -> EnemyCraft {
    let world = &config.world;
    let speed = config.enemy.speed;
    // Start just inside the edge so the position is already wrapped
    let inset = 1.0;

    let (pos, vel) = match rng.index(4) {
        0 => (Vec2::new(0.0, rng.range(0.0, world.height)), Vec2::new(speed, 0.0)),
        1 => (
            Vec2::new(world.width - inset, rng.range(0.0, world.height)),
            Vec2::new(-speed, 0.0),
        ),
        2 => (Vec2::new(rng.range(0.0, world.width), 0.0), Vec2::new(0.0, speed)),
        _ => (
            Vec2::new(rng.range(0.0, world.width), world.height - inset),
            Vec2::new(0.0, -speed),
        ),
    };
    let variant = rng.index(config.enemy.variants as usize) as u8;

    EnemyCraft {
        body: Body::new(pos, vel, config.enemy.radius),
        hit_points: config.enemy.hit_points,
        fire_cooldown: config.enemy.fire_interval,
        variant,
    }
}

/// A shot from `from` aimed exactly at `target`
pub fn aimed_shot(from: Vec2, target: Vec2, config: &GameConfig) -> EnemyShot {
    let (_, angle) = cartesian_to_polar(target - from);
    EnemyShot {
        body: Body::new(
            from,
            polar_to_cartesian(config.enemy.shot_speed, angle),
            config.enemy.shot_radius,
        ),
        angle,
        life: config.enemy.shot_lifetime,
    }
}

/// Run the spawn timer, then let a live craft fire at the ship
pub fn update(state: &mut GameState, config: &GameConfig, rng: &mut dyn RandomSource, dt: f32) {
    if state.enemy.is_none() && !state.enemy_spawned_this_wave {
        state.enemy_spawn_timer -= dt;
        if state.enemy_spawn_timer <= 0.0 {
            let craft = spawn_at_edge(config, rng);
            log::debug!("Enemy craft entering at {:?}", craft.body.pos);
            state.enemy = Some(craft);
            state.enemy_spawned_this_wave = true;
        }
    }

    let Some(craft) = state.enemy.as_mut().filter(|c| !c.body.dead) else {
        return;
    };
    craft.fire_cooldown -= dt;
    if craft.fire_cooldown <= 0.0 {
        state
            .enemy_shots
            .push(aimed_shot(craft.body.pos, state.ship.body.pos, config));
        craft.fire_cooldown = config.enemy.fire_interval;
        state.events.push(GameEvent::Sound(SoundCue::EnemyLaser));
    }
}

/// Count shot lifetimes down
pub fn age_shots(shots: &mut [EnemyShot], dt: f32) {
    for shot in shots.iter_mut() {
        shot.life -= dt;
        if shot.life <= 0.0 {
            shot.body.dead = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SimRng;

    #[test]
    fn test_spawn_delay_decays_to_floor() {
        let config = GameConfig::default();
        assert_eq!(spawn_delay(0, &config), config.enemy.spawn_delay_base);
        assert!(spawn_delay(2, &config) < spawn_delay(1, &config));
        assert_eq!(spawn_delay(100, &config), config.enemy.spawn_delay_min);
    }

    #[test]
    fn test_edge_spawn_moves_along_one_axis() {
        let config = GameConfig::default();
        let mut rng = SimRng::seeded(5);
        for _ in 0..40 {
            let craft = spawn_at_edge(&config, &mut rng);
            let v = craft.body.vel;
            assert!(v.x == 0.0 || v.y == 0.0);
            assert!((v.length() - config.enemy.speed).abs() < 1e-3);
            let p = craft.body.pos;
            assert!(p.x >= 0.0 && p.x < config.world.width);
            assert!(p.y >= 0.0 && p.y < config.world.height);
            assert!(craft.variant < config.enemy.variants);
        }
    }

    #[test]
    fn test_shot_aims_at_target() {
        let config = GameConfig::default();
        let shot = aimed_shot(Vec2::new(100.0, 100.0), Vec2::new(100.0, 300.0), &config);
        let dir = shot.body.vel.normalize();
        assert!(dir.x.abs() < 1e-5);
        assert!((dir.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_timer_spawns_once_per_wave() {
        let config = GameConfig::default();
        let mut rng = SimRng::seeded(9);
        let mut state = GameState::new(&config);
        state.enemy_spawn_timer = 0.05;

        update(&mut state, &config, &mut rng, 0.1);
        assert!(state.enemy.is_some());
        assert!(state.enemy_spawned_this_wave);

        state.enemy = None;
        state.enemy_spawn_timer = 0.0;
        update(&mut state, &config, &mut rng, 0.1);
        assert!(state.enemy.is_none());
    }

    #[test]
    fn test_craft_fires_on_interval() {
        let config = GameConfig::default();
        let mut rng = SimRng::seeded(9);
        let mut state = GameState::new(&config);
        state.enemy_spawned_this_wave = true;
        let mut craft = spawn_at_edge(&config, &mut rng);
        craft.fire_cooldown = 0.05;
        state.enemy = Some(craft);

        update(&mut state, &config, &mut rng, 0.1);
        assert_eq!(state.enemy_shots.len(), 1);
        assert_eq!(state.events, vec![GameEvent::Sound(SoundCue::EnemyLaser)]);
        let cooldown = state.enemy.as_ref().map(|c| c.fire_cooldown);
        assert_eq!(cooldown, Some(config.enemy.fire_interval));

        update(&mut state, &config, &mut rng, 0.1);
        assert_eq!(state.enemy_shots.len(), 1);
    }

    #[test]
    fn test_shots_expire() {
        let config = GameConfig::default();
        let mut shots = vec![aimed_shot(Vec2::ZERO, Vec2::X, &config)];
        age_shots(&mut shots, config.enemy.shot_lifetime + 0.01);
        assert!(shots[0].body.dead);
    }
}
