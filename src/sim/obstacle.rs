//! Obstacle model and kinematics
//!
//! Obstacles are anchored at the bottom-right corner of their box and scroll
//! left at the current difficulty speed. Oscillating obstacles also bounce
//! between `BLOCK_CEILING` and `BLOCK_GROUND` under gravity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Fixed height, horizontal motion only
    Static,
    /// Perpetual bounce between the block ground and ceiling
    GravityOscillating { vel_y: f32 },
}

/// A spawned hazard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Bottom-right corner of the box
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Obstacle {
    pub fn new_static(pos: Vec2, size: Vec2) -> Self {
        Self {
            kind: ObstacleKind::Static,
            pos,
            size,
        }
    }

    /// Oscillating obstacle launched upward from its lane
    pub fn new_oscillating(pos: Vec2, size: Vec2) -> Self {
        Self {
            kind: ObstacleKind::GravityOscillating {
                vel_y: -BLOCK_JUMP_IMPULSE,
            },
            pos,
            size,
        }
    }

    pub fn is_oscillating(&self) -> bool {
        matches!(self.kind, ObstacleKind::GravityOscillating { .. })
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_bottom_right(self.pos, self.size)
    }

    /// Whole box has left the field on the left side
    pub fn is_off_field(&self) -> bool {
        self.pos.x < 0.0
    }

    /// Instant horizontal shift (dash)
    pub fn shift(&mut self, dx: f32) {
        self.pos.x += dx;
    }

    /// Advance one frame at the given scroll speed
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.pos.x -= speed * dt;

        if let ObstacleKind::GravityOscillating { ref mut vel_y } = self.kind {
            *vel_y = (*vel_y + GRAVITY * dt).clamp(-BLOCK_VY_CLAMP, BLOCK_VY_CLAMP);
            self.pos.y += *vel_y * dt;

            if self.pos.y >= BLOCK_GROUND - GROUND_TOLERANCE {
                // Bounce back up
                self.pos.y = self.pos.y.min(BLOCK_GROUND);
                *vel_y = -BLOCK_JUMP_IMPULSE;
            } else if self.pos.y <= BLOCK_CEILING + GROUND_TOLERANCE {
                // Fall back down
                self.pos.y = self.pos.y.max(BLOCK_CEILING);
                *vel_y = BLOCK_FALL_SPEED;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vel_y(o: &Obstacle) -> f32 {
        match o.kind {
            ObstacleKind::GravityOscillating { vel_y } => vel_y,
            ObstacleKind::Static => 0.0,
        }
    }

    #[test]
    fn test_static_obstacle_scrolls_left() {
        let mut o = Obstacle::new_static(Vec2::new(SPAWN_X, GROUND_LANE), Vec2::new(100.0, 50.0));
        o.advance(250.0, 0.1);
        assert!((o.pos.x - 775.0).abs() < 1e-4);
        assert_eq!(o.pos.y, GROUND_LANE);
        assert!(!o.is_oscillating());
    }

    #[test]
    fn test_off_field_once_right_edge_passes_zero() {
        let mut o = Obstacle::new_static(Vec2::new(10.0, GROUND_LANE), Vec2::new(100.0, 50.0));
        assert!(!o.is_off_field());
        o.advance(250.0, 0.1);
        assert!(o.is_off_field());
    }

    #[test]
    fn test_oscillator_rises_then_falls() {
        let mut o =
            Obstacle::new_oscillating(Vec2::new(SPAWN_X, OSCILLATOR_LANE), Vec2::new(80.0, 80.0));
        assert!(o.is_oscillating());
        o.advance(250.0, 0.016);
        assert!(o.pos.y < OSCILLATOR_LANE);
        assert!(vel_y(&o) < 0.0);

        // Past the apex it comes back down
        for _ in 0..30 {
            o.advance(250.0, 0.016);
        }
        assert!(vel_y(&o) > 0.0 || o.pos.y >= BLOCK_GROUND - GROUND_TOLERANCE);
    }

    #[test]
    fn test_oscillator_bounces_off_block_ground() {
        let mut o = Obstacle::new_oscillating(Vec2::new(SPAWN_X, 520.0), Vec2::new(80.0, 80.0));
        o.kind = ObstacleKind::GravityOscillating { vel_y: 800.0 };
        o.advance(0.0, 0.016);
        assert_eq!(o.pos.y, BLOCK_GROUND);
        assert_eq!(vel_y(&o), -BLOCK_JUMP_IMPULSE);
    }

    #[test]
    fn test_oscillator_turns_at_ceiling() {
        let mut o = Obstacle::new_oscillating(Vec2::new(SPAWN_X, 105.0), Vec2::new(80.0, 80.0));
        o.kind = ObstacleKind::GravityOscillating { vel_y: -900.0 };
        o.advance(0.0, 0.016);
        assert_eq!(o.pos.y, BLOCK_CEILING);
        assert_eq!(vel_y(&o), BLOCK_FALL_SPEED);
    }

    #[test]
    fn test_vertical_speed_is_clamped() {
        let mut o = Obstacle::new_oscillating(Vec2::new(SPAWN_X, 200.0), Vec2::new(80.0, 80.0));
        o.kind = ObstacleKind::GravityOscillating { vel_y: 890.0 };
        o.advance(0.0, 0.05);
        assert!(vel_y(&o) <= BLOCK_VY_CLAMP);
    }

    #[test]
    fn test_shift_moves_left() {
        let mut o = Obstacle::new_static(Vec2::new(SPAWN_X, MID_LANE), Vec2::new(60.0, 60.0));
        o.shift(-DASH_DISTANCE);
        assert_eq!(o.pos.x, SPAWN_X - DASH_DISTANCE);
    }

    proptest! {
        #[test]
        fn prop_oscillator_stays_between_bounds(
            dts in prop::collection::vec(0.0f32..0.1, 1..600),
            speed in 250.0f32..500.0,
        ) {
            let mut o = Obstacle::new_oscillating(
                Vec2::new(SPAWN_X, OSCILLATOR_LANE),
                Vec2::new(80.0, 80.0),
            );
            let mut last_x = o.pos.x;
            for dt in dts {
                o.advance(speed, dt);
                prop_assert!(o.pos.y >= BLOCK_CEILING);
                prop_assert!(o.pos.y <= BLOCK_GROUND);
                prop_assert!(vel_y(&o).abs() <= BLOCK_VY_CLAMP);
                prop_assert!(o.pos.x <= last_x);
                last_x = o.pos.x;
            }
        }
    }
}
