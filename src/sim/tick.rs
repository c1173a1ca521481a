//! Per-frame orchestration and the game-flow state machine
//!
//! One call to [`tick`] advances exactly one simulated frame (nominally
//! 60 Hz). The order inside a running frame is fixed: distance/speed, player
//! physics, obstacle spawning, power-up spawning, then collision resolution.

use rand::Rng;

use super::state::{GameEvent, GameState, Phase};
use super::{collision, physics, spawn};
use crate::consts::*;

/// Edge-triggered input events for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Rising edge of the jump control
    pub jump_pressed: bool,
    /// Falling edge of the jump control
    pub jump_released: bool,
    /// Start/restart action (click, tap, or the primary action key)
    pub start: bool,
}

/// Advance the game by one frame, returning the events it produced.
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, rng: &mut R) -> Vec<GameEvent> {
    match state.phase {
        Phase::Idle | Phase::Ended => {
            // Jump inputs are ignored outside a run
            if input.start {
                state.reset();
                state.phase = Phase::Running;
                log::info!("run started");
            }
            return Vec::new();
        }
        Phase::Running => {}
    }

    state.frame_count += 1;

    // Distance drives difficulty; overdrive covers ground faster
    let rate = if state.player.overdrive_active() {
        DISTANCE_PER_FRAME * OVERDRIVE_MULTIPLIER
    } else {
        DISTANCE_PER_FRAME
    };
    state.distance += rate;

    state.scroll_speed = (BASE_SCROLL_SPEED
        + state.frame_count as f32 * SCROLL_INCREASE_PER_FRAME)
        .min(MAX_SCROLL_SPEED);

    physics::update_player(
        &mut state.player,
        &state.obstacles,
        input.jump_pressed,
        input.jump_released,
    );
    spawn::advance_obstacles(state, rng);
    spawn::advance_powerups(state, rng);

    let events = collision::resolve(state);
    if events.contains(&GameEvent::PlayerDied) {
        state.phase = Phase::Ended;
        log::info!(
            "game over: score {} distance {:.0}m level {}",
            state.score,
            state.distance,
            state.difficulty_level()
        );
    }

    events
}
