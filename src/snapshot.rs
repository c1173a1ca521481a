//! Read-only render contract
//!
//! The renderer is a pure consumer: once per frame it captures a [`Snapshot`]
//! of the simulation and draws from that. Nothing here can mutate game state,
//! and the views are serializable so an out-of-process renderer works too.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::{GameState, ObstacleKind, Phase, PowerupKind};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u8,
    pub max_health: u8,
    /// False on the "off" beats of the invulnerability blink
    pub visible: bool,
    pub overdrive_active: bool,
    /// Remaining overdrive, 0.0..=1.0
    pub overdrive_phase: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerupView {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub powerups: Vec<PowerupView>,
    pub score: u64,
    pub distance: f32,
    pub difficulty_level: u32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        // Blink on a 5-frame cadence while invulnerable
        let visible =
            !player.is_invulnerable() || (player.invuln_frames / INVULN_FLASH_PERIOD) % 2 == 0;

        Self {
            phase: state.phase,
            player: PlayerView {
                pos: player.pos,
                size: player.size(),
                health: player.health,
                max_health: MAX_HEALTH,
                visible,
                overdrive_active: player.overdrive_active(),
                overdrive_phase: player.overdrive_frames as f32 / OVERDRIVE_FRAMES as f32,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    kind: o.kind,
                    pos: o.pos,
                    size: o.size(),
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerupView {
                    kind: p.kind,
                    pos: p.pos,
                    size: p.size(),
                })
                .collect(),
            score: state.score,
            distance: state.distance,
            difficulty_level: state.difficulty_level(),
        }
    }
}
