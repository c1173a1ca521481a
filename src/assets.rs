//! Visual asset readiness, polled by the render step
//!
//! Assets load asynchronously relative to the frame loop. The simulation
//! never waits on them: each slot is polled for readiness every render, and
//! every drawable kind has a deterministic primitive-shape fallback (filled
//! rectangle + outline) so an asset that never arrives costs nothing but
//! looks.

use crate::sim::{ObstacleKind, PowerupKind};

/// Number of frames in the player's run cycle
pub const PLAYER_RUN_FRAMES: usize = 8;

/// Load state of one asset, advanced by the host's loader callbacks and
/// queried synchronously - never the other way around
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssetState {
    Loading,
    Ready { width: f32, height: f32 },
    Failed,
}

#[derive(Debug, Clone)]
pub struct AssetSlot {
    pub name: &'static str,
    pub state: AssetState,
}

impl AssetSlot {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: AssetState::Loading,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, AssetState::Ready { .. })
    }

    pub fn mark_ready(&mut self, width: f32, height: f32) {
        // A failed slot stays failed for its remaining lifetime
        if self.state != AssetState::Failed {
            self.state = AssetState::Ready { width, height };
        }
    }

    pub fn mark_failed(&mut self) {
        if self.state != AssetState::Failed {
            log::warn!("asset '{}' failed to load, using fallback", self.name);
            self.state = AssetState::Failed;
        }
    }
}

/// All drawable resources the renderer may poll
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    pub player_run: Vec<AssetSlot>,
    pub enemy: AssetSlot,
    pub crate_can: AssetSlot,
    pub hazard_can: AssetSlot,
    pub flame: AssetSlot,
    pub backdrop_logo: AssetSlot,
}

impl AssetCatalog {
    pub fn new() -> Self {
        const RUN_FRAME_NAMES: [&str; PLAYER_RUN_FRAMES] = [
            "punk_run_0",
            "punk_run_1",
            "punk_run_2",
            "punk_run_3",
            "punk_run_4",
            "punk_run_5",
            "punk_run_6",
            "punk_run_7",
        ];
        Self {
            player_run: RUN_FRAME_NAMES.iter().map(|n| AssetSlot::new(n)).collect(),
            enemy: AssetSlot::new("cop_walk"),
            crate_can: AssetSlot::new("trash_can"),
            hazard_can: AssetSlot::new("fire"),
            flame: AssetSlot::new("flame_overlay"),
            backdrop_logo: AssetSlot::new("backdrop_logo"),
        }
    }

    /// The run animation only plays once every frame is in
    pub fn player_animation_ready(&self) -> bool {
        self.player_run.iter().all(AssetSlot::is_ready)
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Primitive-shape fallback: filled rectangle + outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackStyle {
    pub fill: &'static str,
    pub outline: &'static str,
    pub outline_width: u32,
}

pub fn obstacle_fallback(kind: ObstacleKind) -> FallbackStyle {
    let fill = match kind {
        ObstacleKind::Hazard => "#ff6600",
        ObstacleKind::Enemy => "#00ff41",
        ObstacleKind::Crate => "#ffff00",
    };
    FallbackStyle {
        fill,
        outline: "#000000",
        outline_width: 3,
    }
}

pub fn player_fallback() -> FallbackStyle {
    FallbackStyle {
        fill: "#00ff41",
        outline: "#000000",
        outline_width: 2,
    }
}

pub fn powerup_fallback(kind: PowerupKind) -> FallbackStyle {
    let fill = match kind {
        PowerupKind::Restore => "#ff006e",
        PowerupKind::Overdrive => "#ffff00",
    };
    FallbackStyle {
        fill,
        outline: "#000000",
        outline_width: 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_is_permanent() {
        let mut slot = AssetSlot::new("test");
        slot.mark_failed();
        // A late load completion cannot revive a failed slot
        slot.mark_ready(64.0, 64.0);
        assert_eq!(slot.state, AssetState::Failed);
        assert!(!slot.is_ready());
    }

    #[test]
    fn test_animation_needs_all_frames() {
        let mut catalog = AssetCatalog::new();
        assert!(!catalog.player_animation_ready());
        for frame in &mut catalog.player_run {
            frame.mark_ready(256.0, 256.0);
        }
        assert!(catalog.player_animation_ready());
        catalog.player_run[3].state = AssetState::Failed;
        assert!(!catalog.player_animation_ready());
    }

    #[test]
    fn test_every_kind_has_a_fallback() {
        for kind in [ObstacleKind::Hazard, ObstacleKind::Enemy, ObstacleKind::Crate] {
            let style = obstacle_fallback(kind);
            assert!(style.fill.starts_with('#'));
        }
        assert_ne!(
            powerup_fallback(PowerupKind::Restore),
            powerup_fallback(PowerupKind::Overdrive)
        );
    }
}
