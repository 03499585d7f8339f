//! Read-only view of a run for the renderer and HUD

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameMode, GameState, PowerUpKind, WeaponMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
    pub shield: u8,
    pub invulnerable: bool,
    /// Hide the ship this frame
    pub blink: bool,
    pub weapon: WeaponMode,
    pub speed_level: u8,
}

/// Position plus facing, used for bullets and enemy shots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
    pub tier: usize,
    pub color: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub variant: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub angle: f32,
    pub kind: PowerUpKind,
}

/// Everything one frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub mode: GameMode,
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    /// 1-based wave number for display
    pub wave: u32,
    pub ship: Option<ShipView>,
    pub bullets: Vec<ProjectileView>,
    pub asteroids: Vec<AsteroidView>,
    pub enemy: Option<EnemyView>,
    pub enemy_shots: Vec<ProjectileView>,
    pub power_ups: Vec<PowerUpView>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let ship = &state.ship;
        let ship = (state.mode == GameMode::Play).then(|| ShipView {
            pos: ship.body.pos,
            angle: ship.angle,
            radius: ship.body.radius,
            shield: ship.shield,
            invulnerable: ship.is_invulnerable(),
            blink: ship.blink,
            weapon: ship.weapon,
            speed_level: ship.speed_level,
        });

        Self {
            mode: state.mode,
            score: state.scores.score,
            high_score: state.scores.high_score,
            lives: state.lives,
            wave: state.wave + 1,
            ship,
            bullets: state
                .bullets
                .iter()
                .map(|b| ProjectileView {
                    pos: b.body.pos,
                    angle: b.angle,
                })
                .collect(),
            asteroids: state
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    pos: a.body.pos,
                    angle: a.angle,
                    radius: a.body.radius,
                    tier: a.size.tier(),
                    color: a.color,
                })
                .collect(),
            enemy: state.enemy.as_ref().map(|c| EnemyView {
                pos: c.body.pos,
                variant: c.variant,
            }),
            enemy_shots: state
                .enemy_shots
                .iter()
                .map(|s| ProjectileView {
                    pos: s.body.pos,
                    angle: s.angle,
                })
                .collect(),
            power_ups: state
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.body.pos,
                    angle: p.angle,
                    kind: p.kind,
                })
                .collect(),
        }
    }
}
