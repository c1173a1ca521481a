//! Player physics: gravity, jump impulse, jump-cut, platform adherence
//!
//! The player's x never changes; only y integrates. The world moves instead.

use super::state::{Obstacle, Player};
use crate::consts::*;

/// Advance the player by one frame given this frame's jump edge events.
pub fn update_player(
    player: &mut Player,
    obstacles: &[Obstacle],
    jump_pressed: bool,
    jump_released: bool,
) {
    if jump_pressed {
        jump(player);
    }
    if jump_released {
        jump_cut(player);
    }

    // Gravity accumulates unless resting, clamped to terminal velocity
    if !player.resting() {
        player.vel_y = (player.vel_y + GRAVITY).min(MAX_FALL_SPEED);
    }

    // Platform adherence: the supporting obstacle may have scrolled out from
    // under the player, or been removed entirely
    if player.on_platform {
        let supported = player
            .platform_id
            .and_then(|id| obstacles.iter().find(|o| o.id == id))
            .is_some_and(|platform| {
                let hb = player.hitbox();
                let plat = platform.hitbox();
                hb.pos.x < plat.right() && hb.right() > plat.pos.x
            });
        if !supported {
            player.on_platform = false;
            player.platform_id = None;
            // Falls from rest, no carried velocity
            player.vel_y = 0.0;
        }
    }

    player.pos.y += player.vel_y;

    // Ground collision
    if player.pos.y >= PLAYER_GROUND_Y {
        player.pos.y = PLAYER_GROUND_Y;
        player.vel_y = 0.0;
        player.jumping = false;
        player.on_ground = true;
        player.on_platform = false;
        player.platform_id = None;
    } else {
        player.on_ground = false;
    }
}

/// Jump impulse: rising edge only, and only while resting (no air jumps)
pub fn jump(player: &mut Player) {
    if player.resting() && !player.jumping {
        player.vel_y = JUMP_FORCE;
        player.jumping = true;
        player.on_ground = false;
        player.on_platform = false;
        player.platform_id = None;
    }
}

/// Variable jump height: releasing while still ascending trims the impulse.
/// Bounces never set `jumping`, so they are exempt.
pub fn jump_cut(player: &mut Player) {
    if player.vel_y < 0.0 && player.jumping {
        player.vel_y *= JUMP_CUT_FRACTION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    #[test]
    fn test_gravity_accumulates_and_clamps() {
        let mut player = Player {
            on_ground: false,
            pos: glam::Vec2::new(PLAYER_X, 100.0),
            ..Player::default()
        };
        update_player(&mut player, &[], false, false);
        assert_eq!(player.vel_y, GRAVITY);

        player.vel_y = MAX_FALL_SPEED - 0.1;
        update_player(&mut player, &[], false, false);
        assert_eq!(player.vel_y, MAX_FALL_SPEED);
    }

    #[test]
    fn test_jump_only_while_resting() {
        let mut player = Player::default();
        jump(&mut player);
        assert_eq!(player.vel_y, JUMP_FORCE);
        assert!(player.jumping);
        assert!(!player.on_ground);

        // No air jumps
        let vel_before = player.vel_y;
        jump(&mut player);
        assert_eq!(player.vel_y, vel_before);
    }

    #[test]
    fn test_jump_cut_scales_ascent() {
        let mut player = Player::default();
        jump(&mut player);
        assert_eq!(player.vel_y, -15.0);
        jump_cut(&mut player);
        assert_eq!(player.vel_y, -3.75);
    }

    #[test]
    fn test_jump_cut_ignores_bounce() {
        // A stomp bounce leaves `jumping` false
        let mut player = Player {
            on_ground: false,
            vel_y: JUMP_FORCE * BOUNCE_FRACTION,
            ..Player::default()
        };
        jump_cut(&mut player);
        assert_eq!(player.vel_y, JUMP_FORCE * BOUNCE_FRACTION);
    }

    #[test]
    fn test_ground_clamp() {
        let mut player = Player {
            on_ground: false,
            pos: glam::Vec2::new(PLAYER_X, PLAYER_GROUND_Y - 1.0),
            vel_y: 10.0,
            jumping: true,
            ..Player::default()
        };
        update_player(&mut player, &[], false, false);
        assert_eq!(player.pos.y, PLAYER_GROUND_Y);
        assert_eq!(player.vel_y, 0.0);
        assert!(player.on_ground);
        assert!(!player.jumping);
    }

    #[test]
    fn test_platform_detach_when_scrolled_away() {
        let mut platform = Obstacle::new(7, ObstacleKind::Crate, 0, 0.0);
        // Way off to the left of the player
        platform.pos.x = PLAYER_X - 500.0;
        let obstacles = vec![platform];

        let mut player = Player {
            on_ground: false,
            on_platform: true,
            platform_id: Some(7),
            pos: glam::Vec2::new(PLAYER_X, 300.0),
            ..Player::default()
        };
        update_player(&mut player, &obstacles, false, false);
        assert!(!player.on_platform);
        assert_eq!(player.platform_id, None);
    }

    #[test]
    fn test_platform_detach_when_removed() {
        let mut player = Player {
            on_ground: false,
            on_platform: true,
            platform_id: Some(42),
            pos: glam::Vec2::new(PLAYER_X, 300.0),
            ..Player::default()
        };
        // Obstacle 42 no longer exists
        update_player(&mut player, &[], false, false);
        assert!(!player.on_platform);
        assert_eq!(player.platform_id, None);
        // Fell from rest: gravity only applied after detach on later frames
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_resting_on_platform_skips_gravity() {
        let mut platform = Obstacle::new(3, ObstacleKind::Crate, 1, 0.0);
        platform.pos.x = PLAYER_X;
        let plat_top = platform.hitbox().pos.y;
        let obstacles = vec![platform];

        let mut player = Player {
            on_ground: false,
            on_platform: true,
            platform_id: Some(3),
            pos: glam::Vec2::new(PLAYER_X, plat_top - PLAYER_HEIGHT),
            ..Player::default()
        };
        update_player(&mut player, &obstacles, false, false);
        assert_eq!(player.vel_y, 0.0);
        assert!(player.on_platform);
        assert_eq!(player.pos.y, plat_top - PLAYER_HEIGHT);
    }
}
