//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed frame step only (one tick = one frame)
//! - Injected, seedable RNG only - no ambient generators
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ContactSide, classify_contact, platform_landing, resolve};
pub use spawn::{spawn_gap_bounds, weighted_pick};
pub use state::{
    GameEvent, GameState, Obstacle, ObstacleKind, ObstacleSpec, Phase, Player, Powerup,
    PowerupKind,
};
pub use tick::{TickInput, tick};
