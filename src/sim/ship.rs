//! Ship controller: rotation, thrust, firing, and damage

use super::events::{GameEvent, SoundCue};
use super::movement::wrap_position;
use super::state::{Body, Bullet, Ship};
use super::tick::TickInput;
use crate::config::GameConfig;
use crate::{normalize_angle, polar_to_cartesian};

/// Result of a damaging contact with the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damage {
    /// Shield took the hit
    Absorbed,
    /// A life was lost, lives remain
    LifeLost,
    /// The last life was lost
    Fatal,
}

/// Apply one tick of player control. Position integration happens in `movement`.
pub fn update(
    ship: &mut Ship,
    input: &TickInput,
    config: &GameConfig,
    dt: f32,
    bullets: &mut Vec<Bullet>,
    events: &mut Vec<GameEvent>,
) {
    let tuning = &config.ship;

    if input.turn_left && !input.turn_right {
        ship.angle = normalize_angle(ship.angle - tuning.turn_rate * dt);
    } else if input.turn_right && !input.turn_left {
        ship.angle = normalize_angle(ship.angle + tuning.turn_rate * dt);
    }

    if input.thrust {
        let accel = tuning.thrust_for(ship.speed_level);
        ship.body.vel += polar_to_cartesian(accel * dt, ship.angle);
    }

    ship.body.vel *= tuning.friction;
    let max_speed = tuning.max_speed_for(ship.speed_level);
    let speed_sq = ship.body.vel.length_squared();
    if speed_sq > max_speed * max_speed {
        ship.body.vel *= max_speed / speed_sq.sqrt();
    }

    if ship.fire_cooldown > 0.0 {
        ship.fire_cooldown = (ship.fire_cooldown - dt).max(0.0);
    }
    if input.fire && ship.fire_cooldown <= 0.0 {
        bullets.extend(fire(ship, config));
        ship.fire_cooldown = tuning.fire_cooldown;
        events.push(GameEvent::Sound(SoundCue::Shoot));
    }

    ship.tick_invulnerability(dt, tuning.blink_interval);
}

/// Build the bullet fan for the ship's weapon mode
pub fn fire(ship: &Ship, config: &GameConfig) -> Vec<Bullet> {
    let nose = ship.body.radius + config.ship.nose_offset;
    ship.weapon
        .offsets()
        .iter()
        .map(|offset| {
            let angle = ship.angle + offset * config.ship.spread;
            let pos = wrap_position(ship.body.pos + polar_to_cartesian(nose, angle), &config.world);
            Bullet {
                body: Body::new(
                    pos,
                    polar_to_cartesian(config.bullet.speed, angle),
                    config.bullet.radius,
                ),
                angle,
                life: config.bullet.lifetime,
            }
        })
        .collect()
}

/// Resolve a would-be damaging hit: the shield absorbs it if charged, otherwise a life goes
pub fn take_hit(ship: &mut Ship, lives: &mut u32, config: &GameConfig) -> Damage {
    if ship.shield > 0 {
        ship.shield -= 1;
        ship.invulnerable = config.ship.shield_invulnerability;
        return Damage::Absorbed;
    }

    *lives = lives.saturating_sub(1);
    if *lives == 0 {
        Damage::Fatal
    } else {
        Damage::LifeLost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::WeaponMode;
    use glam::Vec2;

    fn setup() -> (GameConfig, Ship) {
        let config = GameConfig::default();
        let mut ship = Ship::spawn(config.world.center(), &config);
        ship.invulnerable = 0.0;
        (config, ship)
    }

    #[test]
    fn test_five_way_fan_angles() {
        let (config, mut ship) = setup();
        ship.weapon = WeaponMode::Five;
        ship.angle = 0.3;

        let bullets = fire(&ship, &config);
        assert_eq!(bullets.len(), 5);
        for (bullet, k) in bullets.iter().zip([-2.0f32, -1.0, 0.0, 1.0, 2.0]) {
            let expected = 0.3 + k * config.ship.spread;
            assert!((bullet.angle - expected).abs() < 1e-6);
            let dir = bullet.body.vel.normalize();
            assert!((dir.y.atan2(dir.x) - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_bullets_spawn_ahead_of_nose() {
        let (config, ship) = setup();
        let bullets = fire(&ship, &config);
        assert_eq!(bullets.len(), 1);
        let gap = bullets[0].body.pos.distance(ship.body.pos);
        assert!(gap > ship.body.radius + bullets[0].body.radius);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let (config, mut ship) = setup();
        let mut bullets = Vec::new();
        let mut events = Vec::new();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };

        update(&mut ship, &input, &config, 0.01, &mut bullets, &mut events);
        update(&mut ship, &input, &config, 0.01, &mut bullets, &mut events);
        assert_eq!(bullets.len(), 1);
        assert_eq!(events, vec![GameEvent::Sound(SoundCue::Shoot)]);

        for _ in 0..20 {
            update(&mut ship, &input, &config, 0.01, &mut bullets, &mut events);
        }
        assert_eq!(bullets.len(), 2);
    }

    #[test]
    fn test_opposing_turns_cancel() {
        let (config, mut ship) = setup();
        let before = ship.angle;
        let input = TickInput {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        update(&mut ship, &input, &config, 0.1, &mut Vec::new(), &mut Vec::new());
        assert_eq!(ship.angle, before);
    }

    #[test]
    fn test_speed_clamped_to_level_max() {
        let (config, mut ship) = setup();
        ship.body.vel = Vec2::new(10_000.0, 0.0);
        update(&mut ship, &TickInput::default(), &config, 0.01, &mut Vec::new(), &mut Vec::new());
        assert!((ship.body.vel.length() - config.ship.max_speed).abs() < 1e-2);

        ship.speed_level = 2;
        ship.body.vel = Vec2::new(0.0, 10_000.0);
        update(&mut ship, &TickInput::default(), &config, 0.01, &mut Vec::new(), &mut Vec::new());
        assert!((ship.body.vel.length() - config.ship.max_speed_for(2)).abs() < 1e-2);
        assert_eq!(ship.body.vel.x, 0.0);
    }

    #[test]
    fn test_thrust_accelerates_along_facing() {
        let (config, mut ship) = setup();
        ship.angle = 0.0;
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        update(&mut ship, &input, &config, 0.1, &mut Vec::new(), &mut Vec::new());
        assert!(ship.body.vel.x > 0.0);
        assert!(ship.body.vel.y.abs() < 1e-4);
    }

    #[test]
    fn test_shield_absorbs_before_lives() {
        let (config, mut ship) = setup();
        ship.shield = 1;
        let mut lives = 3;

        assert_eq!(take_hit(&mut ship, &mut lives, &config), Damage::Absorbed);
        assert_eq!(ship.shield, 0);
        assert_eq!(lives, 3);
        assert!(ship.is_invulnerable());

        assert_eq!(take_hit(&mut ship, &mut lives, &config), Damage::LifeLost);
        assert_eq!(lives, 2);
    }

    #[test]
    fn test_last_life_is_fatal() {
        let (config, mut ship) = setup();
        let mut lives = 1;
        assert_eq!(take_hit(&mut ship, &mut lives, &config), Damage::Fatal);
        assert_eq!(lives, 0);
    }
}
