//! Position integration and toroidal wrap

use glam::Vec2;

use super::state::{Entity, GameState};
use crate::config::WorldConfig;

/// Wrap one coordinate into [0, size)
#[inline]
pub fn wrap_coord(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs
    if wrapped >= size { 0.0 } else { wrapped }
}

#[inline]
pub fn wrap_position(pos: Vec2, world: &WorldConfig) -> Vec2 {
    Vec2::new(wrap_coord(pos.x, world.width), wrap_coord(pos.y, world.height))
}

/// True once a position is further than `margin` outside the play area
#[inline]
pub fn outside_margin(pos: Vec2, world: &WorldConfig, margin: f32) -> bool {
    pos.x < -margin
        || pos.y < -margin
        || pos.x > world.width + margin
        || pos.y > world.height + margin
}

/// Advance live entities by their velocity, wrapping those that wrap
pub fn integrate<T: Entity>(items: &mut [T], dt: f32, world: &WorldConfig) {
    for item in items.iter_mut().filter(|e| !e.is_dead()) {
        let wraps = item.wraps();
        let body = item.body_mut();
        body.pos += body.vel * dt;
        if wraps {
            body.pos = wrap_position(body.pos, world);
        }
    }
}

/// Move every entity group one step; enemy shots leaving the margin are killed
pub fn advance_world(state: &mut GameState, world: &WorldConfig, shot_margin: f32, dt: f32) {
    integrate(std::slice::from_mut(&mut state.ship), dt, world);
    integrate(&mut state.bullets, dt, world);
    integrate(&mut state.asteroids, dt, world);
    if let Some(enemy) = state.enemy.as_mut() {
        integrate(std::slice::from_mut(enemy), dt, world);
    }
    integrate(&mut state.power_ups, dt, world);

    integrate(&mut state.enemy_shots, dt, world);
    for shot in state.enemy_shots.iter_mut() {
        if outside_margin(shot.body.pos, world, shot_margin) {
            shot.kill();
        }
    }
}
