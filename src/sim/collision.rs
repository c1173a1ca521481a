//! Collision detection and per-frame resolution
//!
//! All tests run on hitboxes (narrower than visual boxes) so contacts feel
//! fair. The resolution order is load-bearing: the platform-landing test runs
//! before the general overlap test, which is what lets a falling player land
//! cleanly on a platform's top surface instead of registering a side hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, ObstacleKind, PowerupKind};
use crate::consts::*;

/// Axis-aligned bounding box, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Half-open interval intersection on both axes (touching edges miss)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Which face of an obstacle the player ran into. Classified for future
/// rulesets; damage is uniform regardless of side today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactSide {
    Left,
    Right,
    Below,
}

/// Landing test: the player's previous-frame bottom edge (extrapolated by
/// subtracting current velocity) was at or above the platform top within
/// tolerance, the current bottom sits in the top half of the platform band,
/// the hitboxes overlap horizontally, and the player is not ascending.
pub fn platform_landing(player_hb: &Aabb, vel_y: f32, platform_hb: &Aabb) -> bool {
    let was_above = player_hb.bottom() - vel_y <= platform_hb.pos.y + LANDING_TOLERANCE;
    let on_top = player_hb.bottom() >= platform_hb.pos.y
        && player_hb.bottom() <= platform_hb.pos.y + platform_hb.size.y / 2.0;
    let horizontal = player_hb.pos.x < platform_hb.right() && player_hb.right() > platform_hb.pos.x;
    was_above && on_top && horizontal && vel_y >= 0.0
}

/// Classify a confirmed overlap as a left/right/bottom contact. The
/// trailing-edge extrapolation by `vel_y` mirrors the original ruleset.
pub fn classify_contact(player_hb: &Aabb, vel_y: f32, obstacle_hb: &Aabb) -> Option<ContactSide> {
    if player_hb.right() - vel_y <= obstacle_hb.pos.x + SIDE_TOLERANCE {
        Some(ContactSide::Left)
    } else if player_hb.pos.x >= obstacle_hb.right() - SIDE_TOLERANCE {
        Some(ContactSide::Right)
    } else if player_hb.pos.y <= obstacle_hb.bottom() - SIDE_TOLERANCE {
        Some(ContactSide::Below)
    } else {
        None
    }
}

/// Resolve one frame of contacts.
///
/// Order per frame: timers, power-up pickups, then obstacles in id order.
/// Short-circuits on the first death so later obstacles can never re-resolve
/// a terminal outcome differently.
pub fn resolve(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // (1) advance timers
    state.player.invuln_frames = state.player.invuln_frames.saturating_sub(1);
    state.player.overdrive_frames = state.player.overdrive_frames.saturating_sub(1);

    // Platform support is re-derived from scratch every frame
    state.player.on_platform = false;
    state.player.platform_id = None;

    let player_hb = state.player.hitbox();
    let vel_y = state.player.vel_y;

    // (2) power-up pickups
    let mut collected = Vec::new();
    state.powerups.retain(|p| {
        if player_hb.overlaps(&p.hitbox()) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        match kind {
            PowerupKind::Restore => state.player.heal(),
            PowerupKind::Overdrive => state.player.overdrive_frames = OVERDRIVE_FRAMES,
        }
        events.push(GameEvent::PowerupCollected { kind });
    }

    // (3) obstacles, in spawn order
    let mut i = 0;
    while i < state.obstacles.len() {
        let ob_hb = state.obstacles[i].hitbox();
        let kind = state.obstacles[i].kind;
        let spec = kind.spec();
        let id = state.obstacles[i].id;

        // Overdrive bulldozes everything it touches
        if state.player.overdrive_active() {
            if player_hb.overlaps(&ob_hb) {
                let points = if spec.destructible { spec.point_value } else { 0 };
                state.score += u64::from(points);
                events.push(GameEvent::ObstacleDestroyed { kind, points });
                state.obstacles.remove(i);
                continue;
            }
            i += 1;
            continue;
        }

        if !spec.platform {
            // Hazard: recurring contact damage, gated by invulnerability
            if player_hb.overlaps(&ob_hb) && !state.player.is_invulnerable() {
                let side = classify_contact(&player_hb, vel_y, &ob_hb);
                if apply_damage(state, side, &mut events) {
                    return events;
                }
            }
        } else if platform_landing(&player_hb, vel_y, &ob_hb) {
            // Snap to rest on the platform top
            state.player.pos.y = ob_hb.pos.y - PLAYER_HEIGHT;
            state.player.vel_y = 0.0;
            state.player.on_ground = false;
            state.player.jumping = false;

            if spec.destructible {
                // Stomp: points, removal, and a small chained-jump bounce
                state.score += u64::from(spec.point_value);
                events.push(GameEvent::ObstacleDestroyed {
                    kind,
                    points: spec.point_value,
                });
                state.obstacles.remove(i);
                state.player.vel_y = JUMP_FORCE * BOUNCE_FRACTION;
                continue;
            }

            state.player.on_platform = true;
            state.player.platform_id = Some(id);
        } else if player_hb.overlaps(&ob_hb) && !state.player.is_invulnerable() {
            // Side or bottom hit
            let side = classify_contact(&player_hb, vel_y, &ob_hb);
            if apply_damage(state, side, &mut events) {
                return events;
            }
        }

        i += 1;
    }

    events
}

/// Apply one damage unit and open the invulnerability window. Returns true
/// on death (the caller must stop resolving).
fn apply_damage(
    state: &mut GameState,
    side: Option<ContactSide>,
    events: &mut Vec<GameEvent>,
) -> bool {
    state.player.health = state.player.health.saturating_sub(1);
    state.player.invuln_frames = INVULN_FRAMES;
    events.push(GameEvent::Damaged { side });
    if state.player.health == 0 {
        events.push(GameEvent::PlayerDied);
        return true;
    }
    false
}
