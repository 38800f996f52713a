use glam::Vec3;
use hoverscene::movement::{Mover, Obstacle, WorldBounds};

#[cfg(test)]
mod movement_tests {
    use super::*;

    fn open_bounds() -> WorldBounds {
        WorldBounds {
            half_extent: 50.0,
            max_height: 50.0,
        }
    }

    #[test]
    fn test_forward_step_in_open_space_is_accepted() {
        let mut mover = Mover::new(Vec3::ZERO, 1.0);
        let obstacles = [Obstacle {
            position: Vec3::new(5.0, 0.0, 0.0),
            clearance: 2.0,
        }];

        let moved = mover.try_move(1.0, 0.0, &obstacles, open_bounds());

        assert!(moved, "Step away from the obstacle should be accepted");
        assert_eq!(
            mover.position,
            Vec3::new(0.0, 0.0, 1.0),
            "Heading 0 should advance along +Z"
        );
    }

    #[test]
    fn test_step_into_clearance_zone_is_rejected() {
        let mut mover = Mover::new(Vec3::ZERO, 1.0);
        mover.turn(90.0); // face +X
        let obstacles = [Obstacle {
            position: Vec3::new(5.0, 0.0, 0.0),
            clearance: 4.5,
        }];

        let moved = mover.try_move(1.0, 0.0, &obstacles, open_bounds());

        assert!(!moved, "Step to within clearance distance should be rejected");
        assert_eq!(mover.position, Vec3::ZERO, "Rejected move must not change position");
    }

    #[test]
    fn test_clearance_uses_ground_plane_distance() {
        // Climb well above the obstacle, then try to cross it. The 2D
        // check should still reject the overflight.
        let mut mover = Mover::new(Vec3::new(5.0, 30.0, -1.0), 1.0);
        let obstacles = [Obstacle {
            position: Vec3::new(5.0, 0.0, 0.0),
            clearance: 2.0,
        }];

        let moved = mover.try_move(1.0, 0.0, &obstacles, open_bounds());

        assert!(!moved, "Obstacles block the full column above them");
    }

    #[test]
    fn test_world_boundary_accounts_for_mover_radius() {
        let bounds = open_bounds();
        let mut mover = Mover::new(Vec3::new(0.0, 0.0, 47.5), 2.0);

        let moved = mover.try_move(1.0, 0.0, &[], bounds);

        assert!(
            !moved,
            "Center at z=48.5 with radius 2 would poke past half_extent 50"
        );

        let small_step = mover.try_move(0.4, 0.0, &[], bounds);
        assert!(small_step, "z=47.9 keeps the whole body inside the world");
    }

    #[test]
    fn test_cannot_descend_below_ground() {
        let mut mover = Mover::new(Vec3::new(0.0, 0.3, 0.0), 1.0);

        let moved = mover.try_move(0.0, -1.0, &[], open_bounds());

        assert!(!moved, "Descending below y=0 should be rejected");
        assert_eq!(mover.position.y, 0.3);
    }

    #[test]
    fn test_repeated_rejections_leave_state_unchanged() {
        let mut mover = Mover::new(Vec3::new(0.0, 0.5, 49.5), 1.0);
        let before = mover.position;

        for _ in 0..10 {
            mover.try_move(1.0, 0.0, &[], open_bounds());
        }

        assert_eq!(
            mover.position, before,
            "Holding a blocked direction should be a stable no-op"
        );
    }

    #[test]
    fn test_turn_then_move_follows_new_heading() {
        let mut mover = Mover::new(Vec3::ZERO, 1.0);
        mover.turn(90.0);

        let moved = mover.try_move(2.0, 0.0, &[], open_bounds());

        assert!(moved);
        assert!(
            (mover.position.x - 2.0).abs() < 1e-5 && mover.position.z.abs() < 1e-5,
            "After a 90 degree turn the step should go along +X, got {:?}",
            mover.position
        );
    }
}
