use glam::Vec3;
use serde::Deserialize;

/// Static obstacle the craft must keep clear of.
///
/// `clearance` is the combined radius: obstacle radius plus mover radius,
/// so the test is a single center-to-center distance comparison.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Obstacle {
    pub position: Vec3,
    pub clearance: f32,
}

/// Symmetric square world boundary on x/z, with a vertical ceiling.
/// The floor is always y = 0: the craft never goes underground.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WorldBounds {
    pub half_extent: f32,
    pub max_height: f32,
}

/// The craft's mutable state: position plus heading in degrees.
///
/// Heading 0 points along +Z and is never normalized into [0, 360);
/// large values stay valid as trigonometric input.
#[derive(Debug, Clone, Copy)]
pub struct Mover {
    pub position: Vec3,
    pub heading_deg: f32,
    pub radius: f32,
}

impl Mover {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            heading_deg: 0.0,
            radius,
        }
    }

    /// Unit ground-plane direction the craft is facing
    pub fn heading_dir(&self) -> Vec3 {
        let rad = self.heading_deg.to_radians();
        Vec3::new(rad.sin(), 0.0, rad.cos())
    }

    /// Turn in place by `degrees`. Unconstrained, never fails.
    pub fn turn(&mut self, degrees: f32) {
        self.heading_deg += degrees;
    }

    /// Attempt to displace along the current heading by `forward` (negative
    /// moves backward) and vertically by `height_delta`.
    ///
    /// The candidate is accepted only if it clears every obstacle and stays
    /// inside the world bounds; otherwise the position is left unchanged.
    /// Rejection is a silent no-op, so repeated invalid intents are safe.
    ///
    /// Obstacle clearance uses ground-plane (2D) distance: obstacles are
    /// ground-standing solids, so flying above one does not let the craft
    /// pass through it.
    pub fn try_move(
        &mut self,
        forward: f32,
        height_delta: f32,
        obstacles: &[Obstacle],
        bounds: WorldBounds,
    ) -> bool {
        let candidate =
            self.position + self.heading_dir() * forward + Vec3::new(0.0, height_delta, 0.0);

        if position_is_clear(candidate, self.radius, obstacles, bounds) {
            self.position = candidate;
            true
        } else {
            false
        }
    }
}

/// Validity predicate for a candidate craft position
pub fn position_is_clear(
    pos: Vec3,
    radius: f32,
    obstacles: &[Obstacle],
    bounds: WorldBounds,
) -> bool {
    // Strict inequality: a center exactly at the clearance distance is
    // still a rejection
    let clear_of_obstacles = obstacles.iter().all(|obs| {
        let dx = pos.x - obs.position.x;
        let dz = pos.z - obs.position.z;
        (dx * dx + dz * dz).sqrt() > obs.clearance
    });

    let limit = bounds.half_extent - radius;
    let inside_bounds = pos.x <= limit
        && pos.x >= -limit
        && pos.z <= limit
        && pos.z >= -limit
        && pos.y >= 0.0
        && pos.y <= bounds.max_height - radius;

    clear_of_obstacles && inside_bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_bounds() -> WorldBounds {
        WorldBounds {
            half_extent: 50.0,
            max_height: 50.0,
        }
    }

    #[test]
    fn clearance_is_strict() {
        let obstacles = [Obstacle {
            position: Vec3::new(5.0, 0.0, 0.0),
            clearance: 2.0,
        }];

        // Exactly on the clearance circle: rejected
        assert!(!position_is_clear(
            Vec3::new(3.0, 0.0, 0.0),
            1.0,
            &obstacles,
            open_bounds()
        ));

        // One unit further out: accepted
        assert!(position_is_clear(
            Vec3::new(2.0, 0.0, 0.0),
            1.0,
            &obstacles,
            open_bounds()
        ));
    }

    #[test]
    fn clearance_ignores_height() {
        let obstacles = [Obstacle {
            position: Vec3::new(5.0, 0.0, 0.0),
            clearance: 2.0,
        }];

        // Directly above the obstacle but inside its ground-plane circle
        assert!(!position_is_clear(
            Vec3::new(5.0, 30.0, 0.0),
            1.0,
            &obstacles,
            open_bounds()
        ));
    }

    #[test]
    fn heading_zero_is_positive_z() {
        let mover = Mover::new(Vec3::ZERO, 1.0);
        let dir = mover.heading_dir();
        assert!((dir.z - 1.0).abs() < 1e-6);
        assert!(dir.x.abs() < 1e-6);
    }

    #[test]
    fn rejected_move_leaves_position_unchanged() {
        let mut mover = Mover::new(Vec3::ZERO, 5.0);

        // 46 units forward lands at z = 46 > 50 - 5
        for _ in 0..10 {
            let accepted = mover.try_move(46.0, 0.0, &[], open_bounds());
            assert!(!accepted);
            assert_eq!(mover.position, Vec3::ZERO, "rejection must not mutate");
        }
    }

    #[test]
    fn cannot_go_underground() {
        let mut mover = Mover::new(Vec3::new(0.0, 0.5, 0.0), 1.0);

        assert!(!mover.try_move(0.0, -1.0, &[], open_bounds()));
        assert_eq!(mover.position.y, 0.5);

        assert!(mover.try_move(0.0, -0.5, &[], open_bounds()));
        assert_eq!(mover.position.y, 0.0);
    }

    #[test]
    fn ceiling_is_reduced_by_radius() {
        let mut mover = Mover::new(Vec3::new(0.0, 44.5, 0.0), 5.0);

        assert!(mover.try_move(0.0, 0.5, &[], open_bounds())); // y = 45 = 50 - 5
        assert!(!mover.try_move(0.0, 0.1, &[], open_bounds()));
    }

    #[test]
    fn turning_never_fails_or_wraps() {
        let mut mover = Mover::new(Vec3::ZERO, 1.0);
        for _ in 0..100 {
            mover.turn(5.0);
        }
        assert_eq!(mover.heading_deg, 500.0);

        // Still a valid trig input: 500 degrees == 140 degrees
        let dir = mover.heading_dir();
        let expected = 140.0f32.to_radians();
        assert!((dir.x - expected.sin()).abs() < 1e-4);
        assert!((dir.z - expected.cos()).abs() < 1e-4);
    }

    #[test]
    fn backward_moves_against_heading() {
        let mut mover = Mover::new(Vec3::ZERO, 1.0);
        assert!(mover.try_move(-2.0, 0.0, &[], open_bounds()));
        assert!((mover.position.z + 2.0).abs() < 1e-6);
    }
}
