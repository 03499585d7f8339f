//! Circle overlap tests and per-pair collision rules
//!
//! Pairs are resolved in a fixed order each tick: bullets against hazards,
//! bullets against the enemy craft, then the ship against hazards, the craft,
//! enemy shots, and finally power-ups.

use super::asteroid;
use super::events::{GameEvent, SoundCue};
use super::rng::RandomSource;
use super::ship::{self, Damage};
use super::state::{Body, Entity, GameState, PowerUpKind, Ship};
use crate::config::GameConfig;

/// Outcome of a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Continue,
    /// The last life was lost; the tick must stop here
    RunOver,
}

/// Circle-circle overlap without a square root
#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    let reach = a.radius + b.radius;
    (a.pos - b.pos).length_squared() <= reach * reach
}

/// Run every collision rule for one tick
pub fn resolve(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
) -> Resolution {
    bullets_vs_asteroids(state, config, rng);
    bullets_vs_enemy(state, config);

    if ship_vs_asteroids(state, config, rng) == Resolution::RunOver
        || ship_vs_enemy(state, config) == Resolution::RunOver
        || ship_vs_enemy_shots(state, config) == Resolution::RunOver
    {
        return Resolution::RunOver;
    }

    ship_vs_power_ups(state, config);
    Resolution::Continue
}

/// Each bullet breaks at most the first hazard it touches
fn bullets_vs_asteroids(state: &mut GameState, config: &GameConfig, rng: &mut dyn RandomSource) {
    let mut children = Vec::new();

    for bullet in state.bullets.iter_mut().filter(|b| !b.is_dead()) {
        let Some(target) = state
            .asteroids
            .iter_mut()
            .find(|a| !a.is_dead() && overlaps(&bullet.body, &a.body))
        else {
            continue;
        };

        bullet.kill();
        target.kill();
        state.scores.award(config.asteroid.score_for(target.size));
        state.events.push(GameEvent::Sound(SoundCue::Explosion));
        children.extend(asteroid::split(target, config, rng));
    }

    state.asteroids.extend(children);
}

fn bullets_vs_enemy(state: &mut GameState, config: &GameConfig) {
    let Some(craft) = state.enemy.as_mut() else {
        return;
    };

    for bullet in state.bullets.iter_mut().filter(|b| !b.is_dead()) {
        if craft.is_dead() {
            break;
        }
        if !overlaps(&bullet.body, &craft.body) {
            continue;
        }

        bullet.kill();
        craft.hit_points = craft.hit_points.saturating_sub(1);
        if craft.hit_points == 0 {
            craft.kill();
            state.scores.award(config.enemy.kill_bonus);
            state.events.push(GameEvent::Sound(SoundCue::Explosion));
            log::debug!("Enemy craft destroyed");
        }
    }
}

/// Handle the aftermath of a damaging hit on the ship
fn after_damage(state: &mut GameState, config: &GameConfig, damage: Damage) -> Resolution {
    state.events.push(GameEvent::Sound(SoundCue::PlayerHit));
    match damage {
        Damage::Absorbed => Resolution::Continue,
        Damage::LifeLost => {
            log::debug!("Life lost, {} remaining", state.lives);
            state.ship = Ship::spawn(config.world.center(), config);
            Resolution::Continue
        }
        Damage::Fatal => Resolution::RunOver,
    }
}

fn ship_vs_asteroids(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
) -> Resolution {
    if state.ship.is_invulnerable() {
        return Resolution::Continue;
    }
    let ship_body = state.ship.body;
    let Some(index) = state
        .asteroids
        .iter()
        .position(|a| !a.is_dead() && overlaps(&ship_body, &a.body))
    else {
        return Resolution::Continue;
    };

    let damage = ship::take_hit(&mut state.ship, &mut state.lives, config);

    let target = &mut state.asteroids[index];
    target.kill();
    if damage == Damage::Absorbed {
        state.scores.award(config.asteroid.score_for(target.size));
    }
    let children = asteroid::split(target, config, rng);
    state.asteroids.extend(children);

    after_damage(state, config, damage)
}

fn ship_vs_enemy(state: &mut GameState, config: &GameConfig) -> Resolution {
    if state.ship.is_invulnerable() {
        return Resolution::Continue;
    }
    let touching = state
        .enemy
        .as_ref()
        .is_some_and(|craft| !craft.is_dead() && overlaps(&state.ship.body, &craft.body));
    if !touching {
        return Resolution::Continue;
    }

    let damage = ship::take_hit(&mut state.ship, &mut state.lives, config);
    after_damage(state, config, damage)
}

fn ship_vs_enemy_shots(state: &mut GameState, config: &GameConfig) -> Resolution {
    if state.ship.is_invulnerable() {
        return Resolution::Continue;
    }
    let ship_body = state.ship.body;
    let Some(shot) = state
        .enemy_shots
        .iter_mut()
        .find(|s| !s.is_dead() && overlaps(&ship_body, &s.body))
    else {
        return Resolution::Continue;
    };
    shot.kill();

    let damage = ship::take_hit(&mut state.ship, &mut state.lives, config);
    after_damage(state, config, damage)
}

fn ship_vs_power_ups(state: &mut GameState, config: &GameConfig) {
    let ship_body = state.ship.body;
    let mut collected = Vec::new();
    for power_up in state.power_ups.iter_mut() {
        if !power_up.is_dead() && overlaps(&ship_body, &power_up.body) {
            power_up.kill();
            collected.push(power_up.kind);
        }
    }

    for kind in collected {
        apply_power_up(state, kind, config);
        state.events.push(GameEvent::Sound(SoundCue::PowerUp));
    }
}

/// Apply a pickup, or award its duplicate bonus when the effect is already maxed
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind, config: &GameConfig) {
    let ship = &mut state.ship;
    let applied = match kind {
        PowerUpKind::TripleShot => match ship.weapon.upgraded() {
            Some(next) => {
                ship.weapon = next;
                true
            }
            None => false,
        },
        PowerUpKind::ExtraLife => {
            if state.lives < config.max_lives {
                state.lives += 1;
                true
            } else {
                false
            }
        }
        PowerUpKind::Shield => ship.add_shield(),
        PowerUpKind::Speed => {
            if ship.speed_level < config.ship.max_speed_level {
                ship.speed_level += 1;
                true
            } else {
                false
            }
        }
    };

    if !applied {
        state.scores.award(config.power_ups.duplicate_bonus(kind));
    }
    log::debug!("Picked up {:?} (applied: {})", kind, applied);
}
