//! Headless demo driver
//!
//! Runs the simulation at a fixed step with a small autopilot until the run
//! ends (or a frame budget expires), then prints the final render snapshot
//! as JSON. Useful for balance checks: `gig-runner [seed]`.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use gig_runner::audio::{MusicDirector, NullSink};
use gig_runner::consts::*;
use gig_runner::sim::{GameState, Phase, TickInput, tick};
use gig_runner::snapshot::Snapshot;

/// Five simulated minutes at 60 Hz
const MAX_FRAMES: u64 = 5 * 60 * 60;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(entropy_seed);
    log::info!("demo run, seed {seed}");

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut state = GameState::new();
    let mut music = MusicDirector::new(NullSink);

    let start = TickInput {
        start: true,
        ..TickInput::default()
    };
    tick(&mut state, &start, &mut rng);
    music.start_run(&mut rng);

    let mut holding_jump = false;
    while state.phase == Phase::Running && state.frame_count < MAX_FRAMES {
        let want_jump = should_jump(&state);
        let input = TickInput {
            jump_pressed: want_jump && !holding_jump,
            jump_released: !want_jump && holding_jump,
            start: false,
        };
        holding_jump = want_jump;
        tick(&mut state, &input, &mut rng);
    }
    music.end_run();

    log::info!(
        "finished after {} frames: score {} distance {:.0}m",
        state.frame_count,
        state.score,
        state.distance
    );

    match serde_json::to_string_pretty(&Snapshot::capture(&state)) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
}

/// Hop whenever a ground-level obstacle closes within reaction range.
/// Deliberately naive - it will still die to stacks and hazard clusters.
fn should_jump(state: &GameState) -> bool {
    let reaction = state.effective_scroll_speed() * 22.0;
    let player_right = state.player.pos.x + PLAYER_WIDTH;
    state.obstacles.iter().any(|ob| {
        ob.height_level == 0 && ob.pos.x > state.player.pos.x && ob.pos.x < player_right + reaction
    })
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x6167_5f72_756e)
}
