//! Gig Runner - a side-scrolling endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game flow)
//! - `snapshot`: Read-only per-frame views for an external renderer
//! - `assets`: Polled asset readiness with primitive-shape fallbacks
//! - `audio`: Background-track playlist with swallowed playback failures

pub mod assets;
pub mod audio;
pub mod sim;
pub mod snapshot;

pub use sim::{GameEvent, GameState, Phase, TickInput, tick};
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Top of the ground band
    pub const GROUND_Y: f32 = 510.0;

    /// Player defaults - fixed x, free y
    pub const PLAYER_X: f32 = 150.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Player top edge while resting on the ground
    pub const PLAYER_GROUND_Y: f32 = 450.0;
    /// Player hitbox is narrower than the visual box (centered)
    pub const PLAYER_HITBOX_INSET_X: f32 = 10.0;
    pub const PLAYER_HITBOX_INSET_TOP: f32 = 4.0;

    /// Physics
    pub const GRAVITY: f32 = 0.7;
    pub const JUMP_FORCE: f32 = -15.0;
    pub const MAX_FALL_SPEED: f32 = 18.0;
    /// Releasing jump while ascending scales velocity by this (variable height)
    pub const JUMP_CUT_FRACTION: f32 = 0.25;
    /// Stomping a destructible applies this fraction of the jump impulse
    pub const BOUNCE_FRACTION: f32 = 0.2;

    /// Health / damage
    pub const MAX_HEALTH: u8 = 3;
    /// Post-damage invulnerability window (frames at 60 Hz)
    pub const INVULN_FRAMES: u32 = 60;
    /// Invulnerability flash cadence for the render contract
    pub const INVULN_FLASH_PERIOD: u32 = 5;

    /// World scroll
    pub const BASE_SCROLL_SPEED: f32 = 4.0;
    pub const MAX_SCROLL_SPEED: f32 = 10.0;
    pub const SCROLL_INCREASE_PER_FRAME: f32 = 0.0005;
    /// Distance gained per frame (drives the difficulty curve)
    pub const DISTANCE_PER_FRAME: f32 = 0.1;
    /// Difficulty level = floor(distance / this)
    pub const DIFFICULTY_STEP: f32 = 50.0;

    /// Obstacle spawn gaps, shrinking with difficulty but clamped to floors
    pub const SPAWN_GAP_MIN: f32 = 250.0;
    pub const SPAWN_GAP_MAX: f32 = 400.0;
    pub const SPAWN_GAP_MIN_FLOOR: f32 = 150.0;
    pub const SPAWN_GAP_MIN_SHRINK: f32 = 10.0;
    pub const SPAWN_GAP_MAX_SHRINK: f32 = 15.0;
    /// Vertical offset per stacked height level
    pub const STACK_HEIGHT: f32 = 90.0;

    /// Triple-stack set piece (hand-tuned, fixed offsets)
    pub const TRIPLE_STACK_MIN_LEVEL: u32 = 3;
    pub const TRIPLE_STACK_MIN_SPACING: f32 = 200.0;
    pub const TRIPLE_STACK_CHANCE: f32 = 0.15;
    pub const TRIPLE_STACK_OFFSET: f32 = 180.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 40.0;
    /// Spawn checks run on this frame cadence, not every frame
    pub const POWERUP_CHECK_INTERVAL: u64 = 45;
    pub const RESTORE_CHANCE: f32 = 0.012;
    pub const OVERDRIVE_CHANCE: f32 = 0.008;
    /// Vertical spawn band, measured up from the ground
    pub const POWERUP_BAND_LOW: f32 = 80.0;
    pub const POWERUP_BAND_HIGH: f32 = 220.0;
    /// Overdrive state: scroll/distance multiplier + invincibility
    pub const OVERDRIVE_MULTIPLIER: f32 = 1.5;
    pub const OVERDRIVE_FRAMES: u32 = 300;

    /// Collision tolerances
    pub const LANDING_TOLERANCE: f32 = 5.0;
    pub const SIDE_TOLERANCE: f32 = 10.0;
}
