//! Procedural spawning: obstacle selection, stacking, set pieces, power-ups
//!
//! All randomness flows through the injected RNG so runs replay exactly from
//! a seed. Spacing and weight tables scale with the difficulty level
//! (floor(distance / 50)), with every scaled parameter clamped to a floor so
//! gaps can never collapse.

use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind, Powerup, PowerupKind};
use crate::consts::*;

/// Draw order for the weighted obstacle pick
const OBSTACLE_KINDS: [ObstacleKind; 3] =
    [ObstacleKind::Hazard, ObstacleKind::Enemy, ObstacleKind::Crate];

/// Weight tiers keyed by difficulty thresholds
fn weight_tier(level: u32) -> [u32; 3] {
    if level > 5 {
        [35, 40, 25]
    } else if level > 2 {
        [25, 35, 40]
    } else {
        [20, 30, 50]
    }
}

/// Cumulative-bucket weighted selection: `draw` is uniform in
/// [0, total_weight); the first bucket containing it wins.
pub fn weighted_pick(weights: &[u32], mut draw: f32) -> usize {
    for (i, &w) in weights.iter().enumerate() {
        if draw < w as f32 {
            return i;
        }
        draw -= w as f32;
    }
    weights.len() - 1
}

/// Spawn gap bounds for a difficulty level. Both shrink as difficulty rises
/// but are clamped so spacing never collapses.
pub fn spawn_gap_bounds(level: u32) -> (f32, f32) {
    let min = (SPAWN_GAP_MIN - level as f32 * SPAWN_GAP_MIN_SHRINK).max(SPAWN_GAP_MIN_FLOOR);
    let max = (SPAWN_GAP_MAX - level as f32 * SPAWN_GAP_MAX_SHRINK).max(min + 50.0);
    (min, max)
}

/// Scroll every obstacle, drop the ones past the left boundary, and spawn a
/// replacement when the gap behind the rightmost one has opened up enough.
pub fn advance_obstacles<R: Rng>(state: &mut GameState, rng: &mut R) {
    let speed = state.effective_scroll_speed();
    for ob in &mut state.obstacles {
        ob.pos.x -= speed;
    }
    state.obstacles.retain(|ob| ob.right_edge() > 0.0);

    let rightmost = state
        .obstacles
        .iter()
        .map(|o| o.pos.x)
        .fold(0.0_f32, f32::max);

    let level = state.difficulty_level();
    let (min_gap, max_gap) = spawn_gap_bounds(level);
    let gap = min_gap + rng.random::<f32>() * (max_gap - min_gap);

    if rightmost < FIELD_WIDTH - gap {
        let since_last_triple = state.distance - state.last_triple_stack_distance;
        let set_piece = level >= TRIPLE_STACK_MIN_LEVEL
            && since_last_triple > TRIPLE_STACK_MIN_SPACING
            && rng.random::<f32>() < TRIPLE_STACK_CHANCE;

        if set_piece {
            spawn_triple_stack(state);
        } else {
            spawn_obstacle(state, rng);
        }
    }
}

/// The hand-tuned set piece: a lone ground crate, then a vertical
/// triple-stack a fixed distance ahead. The player has to jump off the
/// single crate to clear the stack; the offsets are deliberate, never random.
pub fn spawn_triple_stack(state: &mut GameState) {
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle::new(id, ObstacleKind::Crate, 0, 0.0));

    for level in 0..3 {
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, ObstacleKind::Crate, level, TRIPLE_STACK_OFFSET));
    }

    state.last_triple_stack_distance = state.distance;
    log::debug!("triple-stack set piece at distance {:.0}", state.distance);
}

/// Regular spawn: weighted kind pick, then the stacking rules.
/// Hazards never stack; crates carry crates or enemies; enemies piggyback.
fn spawn_obstacle<R: Rng>(state: &mut GameState, rng: &mut R) {
    let level = state.difficulty_level();
    let weights = weight_tier(level);
    let total: u32 = weights.iter().sum();
    let draw = rng.random::<f32>() * total as f32;
    let kind = OBSTACLE_KINDS[weighted_pick(&weights, draw)];

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle::new(id, kind, 0, 0.0));

    match kind {
        ObstacleKind::Crate if level > 1 => {
            if rng.random::<f32>() < 0.4 {
                if rng.random::<f32>() < 0.5 {
                    let id = state.next_entity_id();
                    state.obstacles.push(Obstacle::new(id, ObstacleKind::Crate, 1, 0.0));
                    if rng.random::<f32>() < 0.2 && level > 3 {
                        let id = state.next_entity_id();
                        state.obstacles.push(Obstacle::new(id, ObstacleKind::Crate, 2, 0.0));
                    }
                } else {
                    let id = state.next_entity_id();
                    state.obstacles.push(Obstacle::new(id, ObstacleKind::Enemy, 1, 0.0));
                    if rng.random::<f32>() < 0.1 && level > 3 {
                        let id = state.next_entity_id();
                        state.obstacles.push(Obstacle::new(id, ObstacleKind::Enemy, 2, 0.0));
                    }
                }
            }
        }
        ObstacleKind::Enemy if level > 2 => {
            if rng.random::<f32>() < 0.2 {
                let id = state.next_entity_id();
                state.obstacles.push(Obstacle::new(id, ObstacleKind::Enemy, 1, 0.0));
            }
        }
        _ => {}
    }
}

/// Scroll/expire the in-flight power-up and, on the check cadence, roll for
/// a new one. At most one power-up exists at a time.
pub fn advance_powerups<R: Rng>(state: &mut GameState, rng: &mut R) {
    let speed = state.effective_scroll_speed();
    for p in &mut state.powerups {
        p.pos.x -= speed;
    }
    state.powerups.retain(|p| p.right_edge() > 0.0);

    if !state.powerups.is_empty() {
        return;
    }
    if !state.frame_count.is_multiple_of(POWERUP_CHECK_INTERVAL) {
        return;
    }

    // Single uniform draw over fixed buckets: restore first, then overdrive.
    // The restore bucket only pays out while the player is damaged; at full
    // health it spawns nothing rather than spilling into overdrive, so the
    // overdrive rate never depends on health.
    let roll = rng.random::<f32>();
    let kind = if roll < RESTORE_CHANCE {
        (state.player.health < MAX_HEALTH).then_some(PowerupKind::Restore)
    } else if roll < RESTORE_CHANCE + OVERDRIVE_CHANCE {
        Some(PowerupKind::Overdrive)
    } else {
        None
    };

    if let Some(kind) = kind {
        // Vertical position is rolled once and stays fixed for the lifetime
        let height = rng.random_range(POWERUP_BAND_LOW..POWERUP_BAND_HIGH);
        let id = state.next_entity_id();
        state.powerups.push(Powerup {
            id,
            kind,
            pos: glam::Vec2::new(FIELD_WIDTH, GROUND_Y - POWERUP_SIZE - height),
        });
        log::debug!("power-up {kind:?} spawned at distance {:.0}", state.distance);
    }
}
