//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; there are no
//! module-level globals. Entities carry stable ids (monotonic per run) so
//! references like "the platform under the player" survive collection churn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, ContactSide};
use crate::consts::*;

/// Current phase of the game-flow state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Pre-start screen, simulation frozen
    Idle,
    /// Active run
    Running,
    /// Run over, final score/distance left visible
    Ended,
}

/// Obstacle variants - a closed set, each with a static config record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Burning can: recurring contact damage, never a platform, never destructible
    Hazard,
    /// Cop: a platform that is destroyed (for points) when landed on
    Enemy,
    /// Trash can: a plain platform
    Crate,
}

/// Per-variant configuration, resolved once at construction time
#[derive(Debug, Clone, Copy)]
pub struct ObstacleSpec {
    pub width: f32,
    pub height: f32,
    /// Hitbox is narrower than the visual box (centered) and dropped from the top
    pub hitbox_inset_x: f32,
    pub hitbox_inset_top: f32,
    pub platform: bool,
    pub destructible: bool,
    pub point_value: u32,
}

const HAZARD_SPEC: ObstacleSpec = ObstacleSpec {
    width: 45.0,
    height: 60.0,
    hitbox_inset_x: 6.0,
    hitbox_inset_top: 8.0,
    platform: false,
    destructible: false,
    point_value: 0,
};

const ENEMY_SPEC: ObstacleSpec = ObstacleSpec {
    width: 60.0,
    height: 90.0,
    hitbox_inset_x: 10.0,
    hitbox_inset_top: 10.0,
    platform: true,
    destructible: true,
    point_value: 10,
};

const CRATE_SPEC: ObstacleSpec = ObstacleSpec {
    width: 45.0,
    height: 60.0,
    hitbox_inset_x: 4.0,
    hitbox_inset_top: 0.0,
    platform: true,
    destructible: false,
    point_value: 0,
};

impl ObstacleKind {
    pub const fn spec(self) -> &'static ObstacleSpec {
        match self {
            ObstacleKind::Hazard => &HAZARD_SPEC,
            ObstacleKind::Enemy => &ENEMY_SPEC,
            ObstacleKind::Crate => &CRATE_SPEC,
        }
    }
}

/// A scrolling obstacle. `x` decreases monotonically once spawned; the
/// obstacle is removed when its right edge passes the left field boundary
/// or when destroyed by a stomp/overdrive contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Visual top-left corner
    pub pos: Vec2,
    /// Discrete stacking tier (0 = ground); only used for spawn placement
    pub height_level: u8,
}

impl Obstacle {
    /// Spawn at the right field edge, offset forward by `x_offset` and raised
    /// by `height_level` stack steps.
    pub fn new(id: u32, kind: ObstacleKind, height_level: u8, x_offset: f32) -> Self {
        let spec = kind.spec();
        let y = GROUND_Y - spec.height - f32::from(height_level) * STACK_HEIGHT;
        Self {
            id,
            kind,
            pos: Vec2::new(FIELD_WIDTH + x_offset, y),
            height_level,
        }
    }

    pub fn size(&self) -> Vec2 {
        let spec = self.kind.spec();
        Vec2::new(spec.width, spec.height)
    }

    /// Collision hitbox: narrower and top-offset relative to the visual box
    pub fn hitbox(&self) -> Aabb {
        let spec = self.kind.spec();
        Aabb::new(
            self.pos + Vec2::new(spec.hitbox_inset_x, spec.hitbox_inset_top),
            Vec2::new(
                spec.width - 2.0 * spec.hitbox_inset_x,
                spec.height - spec.hitbox_inset_top,
            ),
        )
    }

    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.kind.spec().width
    }
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Heals one unit if the player is below max health
    Restore,
    /// Time-limited speed multiplier + invincibility
    Overdrive,
}

/// A floating pickup. Vertical position is randomized once at spawn and
/// fixed for its lifetime; any hover animation is purely visual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub pos: Vec2,
}

impl Powerup {
    pub fn size(&self) -> Vec2 {
        Vec2::splat(POWERUP_SIZE)
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos, self.size())
    }

    pub fn right_edge(&self) -> f32 {
        self.pos.x + POWERUP_SIZE
    }
}

/// The runner. `x` never changes; the world scrolls past instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel_y: f32,
    pub health: u8,
    /// Frames of damage immunity remaining; the flag is derived from this
    pub invuln_frames: u32,
    pub on_ground: bool,
    pub on_platform: bool,
    /// Id of the supporting obstacle, validated each frame (the obstacle may
    /// have been removed)
    pub platform_id: Option<u32>,
    /// True only for input-initiated jumps; bounces don't set it, which is
    /// what keeps jump-cut from truncating a stomp bounce
    pub jumping: bool,
    /// Frames of overdrive remaining (0 = inactive)
    pub overdrive_frames: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_GROUND_Y),
            vel_y: 0.0,
            health: MAX_HEALTH,
            invuln_frames: 0,
            on_ground: true,
            on_platform: false,
            platform_id: None,
            jumping: false,
            overdrive_frames: 0,
        }
    }
}

impl Player {
    pub fn size(&self) -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(
            self.pos + Vec2::new(PLAYER_HITBOX_INSET_X, PLAYER_HITBOX_INSET_TOP),
            Vec2::new(
                PLAYER_WIDTH - 2.0 * PLAYER_HITBOX_INSET_X,
                PLAYER_HEIGHT - PLAYER_HITBOX_INSET_TOP,
            ),
        )
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_frames > 0
    }

    pub fn overdrive_active(&self) -> bool {
        self.overdrive_frames > 0
    }

    /// Resting on the ground or on a platform (eligible to jump)
    pub fn resting(&self) -> bool {
        self.on_ground || self.on_platform
    }

    pub fn heal(&mut self) {
        self.health = (self.health + 1).min(MAX_HEALTH);
    }
}

/// Events emitted by one simulated frame, for the caller (audio/FX/flow)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// One damage unit applied. The contact side is classified for future
    /// rulesets but does not change the damage amount today.
    Damaged { side: Option<ContactSide> },
    /// Health reached zero - the only way a run ends
    PlayerDied,
    /// Stomp or overdrive contact removed an obstacle
    ObstacleDestroyed { kind: ObstacleKind, points: u32 },
    PowerupCollected { kind: PowerupKind },
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub player: Player,
    /// Active obstacles in spawn (id) order
    pub obstacles: Vec<Obstacle>,
    /// At most one power-up is in flight at a time
    pub powerups: Vec<Powerup>,
    /// Current world scroll speed (monotonic up to the cap while running)
    pub scroll_speed: f32,
    /// Cumulative distance; drives the difficulty curve
    pub distance: f32,
    /// Frames simulated since run start
    pub frame_count: u64,
    pub score: u64,
    /// Distance at which the last triple-stack set piece spawned
    pub last_triple_stack_distance: f32,
    next_id: u32,
}

impl GameState {
    pub fn new() -> Self {
        let mut state = Self {
            phase: Phase::Idle,
            player: Player::default(),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            scroll_speed: BASE_SCROLL_SPEED,
            distance: 0.0,
            frame_count: 0,
            score: 0,
            last_triple_stack_distance: -500.0,
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Restore the exact initial run configuration. Called on every start and
    /// restart; idempotent.
    pub fn reset(&mut self) {
        self.player = Player::default();
        self.obstacles.clear();
        self.powerups.clear();
        self.scroll_speed = BASE_SCROLL_SPEED;
        self.distance = 0.0;
        self.frame_count = 0;
        self.score = 0;
        self.last_triple_stack_distance = -500.0;
        self.next_id = 1;

        // Every run opens with a single crate so the first jump is a freebie
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(id, ObstacleKind::Crate, 0, 0.0));
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Difficulty level = floor(distance / 50)
    pub fn difficulty_level(&self) -> u32 {
        (self.distance / DIFFICULTY_STEP) as u32
    }

    /// Scroll speed as entities experience it (overdrive scales it up)
    pub fn effective_scroll_speed(&self) -> f32 {
        if self.player.overdrive_active() {
            self.scroll_speed * OVERDRIVE_MULTIPLIER
        } else {
            self.scroll_speed
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new();
        state.reset();
        let first = state.clone();

        // Dirty the state, then reset again
        state.score = 99;
        state.distance = 321.0;
        state.player.health = 1;
        state.player.pos.y = 100.0;
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(id, ObstacleKind::Hazard, 0, 50.0));
        state.reset();

        assert_eq!(state.score, first.score);
        assert_eq!(state.distance, first.distance);
        assert_eq!(state.frame_count, first.frame_count);
        assert_eq!(state.player.health, first.player.health);
        assert_eq!(state.player.pos, first.player.pos);
        assert_eq!(state.obstacles.len(), first.obstacles.len());
        assert_eq!(state.obstacles[0].kind, first.obstacles[0].kind);
        assert_eq!(state.obstacles[0].pos, first.obstacles[0].pos);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_obstacle_stacking_offsets() {
        let base = Obstacle::new(1, ObstacleKind::Crate, 0, 0.0);
        let stacked = Obstacle::new(2, ObstacleKind::Crate, 2, 0.0);
        assert_eq!(base.pos.y - stacked.pos.y, 2.0 * STACK_HEIGHT);
        assert_eq!(base.pos.x, FIELD_WIDTH);
    }

    #[test]
    fn test_hitbox_is_centered_and_inset() {
        let ob = Obstacle::new(1, ObstacleKind::Enemy, 0, 0.0);
        let hb = ob.hitbox();
        let spec = ObstacleKind::Enemy.spec();
        assert!(hb.size.x < spec.width);
        // Centered horizontally: equal margins on both sides
        let left_margin = hb.pos.x - ob.pos.x;
        let right_margin = (ob.pos.x + spec.width) - (hb.pos.x + hb.size.x);
        assert!((left_margin - right_margin).abs() < f32::EPSILON);
        assert_eq!(hb.pos.y - ob.pos.y, spec.hitbox_inset_top);
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut player = Player::default();
        player.heal();
        assert_eq!(player.health, MAX_HEALTH);
        player.health = 1;
        player.heal();
        assert_eq!(player.health, 2);
    }

    #[test]
    fn test_variant_specs() {
        assert!(!ObstacleKind::Hazard.spec().platform);
        assert!(!ObstacleKind::Hazard.spec().destructible);
        assert!(ObstacleKind::Enemy.spec().platform);
        assert!(ObstacleKind::Enemy.spec().destructible);
        assert_eq!(ObstacleKind::Enemy.spec().point_value, 10);
        assert!(ObstacleKind::Crate.spec().platform);
        assert!(!ObstacleKind::Crate.spec().destructible);
    }
}
