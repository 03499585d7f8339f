//! Hazard creation and splitting

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Asteroid, AsteroidSize, Body};
use crate::config::GameConfig;
use crate::polar_to_cartesian;

/// Speed multiplier applied to hazards created during a wave
pub fn speed_multiplier(wave: u32, config: &GameConfig) -> f32 {
    1.0 + wave as f32 * config.asteroid.speed_growth
}

/// Create a hazard with a random heading, speed, and spin
pub fn create(
    size: AsteroidSize,
    pos: Vec2,
    color: u8,
    speed_mult: f32,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
) -> Asteroid {
    let tuning = &config.asteroid;
    let heading = rng.angle();
    let speed = rng.range(tuning.min_speed, tuning.max_speed) * speed_mult;
    let angle = rng.angle();
    let spin = rng.range(-tuning.max_spin, tuning.max_spin);

    Asteroid {
        body: Body::new(pos, polar_to_cartesian(speed, heading), tuning.radius_for(size)),
        size,
        color,
        angle,
        spin,
        speed_mult,
    }
}

/// Children produced when `parent` is destroyed (none for the smallest tier)
pub fn split(parent: &Asteroid, config: &GameConfig, rng: &mut dyn RandomSource) -> Vec<Asteroid> {
    let Some(child_size) = parent.size.child() else {
        return Vec::new();
    };

    (0..config.asteroid.split_count)
        .map(|_| {
            create(
                child_size,
                parent.body.pos,
                parent.color,
                parent.speed_mult,
                config,
                rng,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SimRng;

    #[test]
    fn test_large_splits_into_mediums() {
        let config = GameConfig::default();
        let mut rng = SimRng::seeded(3);
        let pos = Vec2::new(100.0, 200.0);
        let parent = create(AsteroidSize::Large, pos, 1, 1.3, &config, &mut rng);

        let children = split(&parent, &config, &mut rng);
        assert_eq!(children.len(), config.asteroid.split_count as usize);
        for child in &children {
            assert_eq!(child.size, AsteroidSize::Medium);
            assert_eq!(child.body.pos, parent.body.pos);
            assert_eq!(child.color, 1);
            assert_eq!(child.speed_mult, 1.3);
            assert_eq!(child.body.radius, config.asteroid.radii[1]);
        }
    }

    #[test]
    fn test_small_leaves_nothing() {
        let config = GameConfig::default();
        let mut rng = SimRng::seeded(3);
        let parent = create(AsteroidSize::Small, Vec2::ZERO, 0, 1.0, &config, &mut rng);
        assert!(split(&parent, &config, &mut rng).is_empty());
    }

    #[test]
    fn test_speed_scales_with_wave() {
        let config = GameConfig::default();
        let mut rng = SimRng::seeded(11);
        let mult = speed_multiplier(4, &config);
        assert!((mult - 1.4).abs() < 1e-6);

        for _ in 0..50 {
            let a = create(AsteroidSize::Large, Vec2::ZERO, 0, mult, &config, &mut rng);
            let speed = a.body.vel.length();
            assert!(speed >= config.asteroid.min_speed * mult - 1e-3);
            assert!(speed <= config.asteroid.max_speed * mult + 1e-3);
        }
    }
}
