//! Player controller
//!
//! Vertical kinematics with jump buffering, coyote time and hold-to-jump-higher.
//! The player never moves horizontally; obstacles scroll past a fixed lane.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::player_spawn;

/// Kinematic and input-timing state of the runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Bottom-centre of the sprite
    pub pos: Vec2,
    /// Vertical velocity (negative = up)
    pub vel_y: f32,
    pub grounded: bool,
    /// Seconds left in which a jump is still honoured after leaving the ground
    pub coyote_timer: f32,
    /// Seconds left in which an early press is still honoured on landing
    pub jump_buffer_timer: f32,
    /// Jump key currently down
    pub jump_held: bool,
    /// Time spent in the reduced-gravity part of the current ascent
    pub hold_time: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            pos: player_spawn(),
            vel_y: 0.0,
            grounded: true,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            jump_held: false,
            hold_time: 0.0,
        }
    }
}

impl PlayerState {
    /// Jump key went down
    ///
    /// The press is only buffered while the player is near the ground; it is
    /// the buffer and coyote windows together that decide whether it fires.
    pub fn press_jump(&mut self) {
        self.jump_held = true;
        if self.pos.y > JUMP_TRIGGER_Y {
            self.jump_buffer_timer = JUMP_BUFFER_TIME;
        }
    }

    /// Jump key went up: short hop if still rising
    pub fn release_jump(&mut self) {
        self.jump_held = false;
        if self.vel_y < 0.0 {
            self.vel_y *= RELEASE_CUT;
        }
    }

    /// Advance one frame. Returns true if a jump launched this frame.
    pub fn update(&mut self, dt: f32) -> bool {
        self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);

        // Ground check uses last frame's position
        self.grounded = self.pos.y >= GROUND_Y - GROUND_TOLERANCE;
        if self.grounded {
            self.coyote_timer = COYOTE_TIME;
            self.hold_time = 0.0;
        }

        let jumped = self.jump_buffer_timer > 0.0 && self.coyote_timer > 0.0;
        if jumped {
            self.vel_y = JUMP_IMPULSE;
            self.grounded = false;
            self.jump_buffer_timer = 0.0;
            self.coyote_timer = 0.0;
            self.hold_time = 0.0;
        }

        if self.vel_y < 0.0 && self.jump_held && self.hold_time < MAX_HOLD_TIME {
            self.vel_y += GRAVITY * HOLD_GRAVITY_SCALE * dt;
            self.hold_time += dt;
        } else {
            self.vel_y += GRAVITY * dt;
        }

        self.vel_y = self.vel_y.min(MAX_FALL);
        self.pos.y += self.vel_y * dt;

        if self.pos.y > GROUND_Y {
            self.pos.y = GROUND_Y;
            self.vel_y = 0.0;
            self.grounded = true;
        }

        jumped
    }

    /// Collision box (sprite anchored at bottom-centre)
    pub fn bounds(&self) -> Aabb {
        Aabb::from_bottom_center(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 0.016;

    /// Run until the player is back on the ground, returning the highest point reached
    fn run_to_landing(player: &mut PlayerState) -> f32 {
        let mut peak = player.pos.y;
        for _ in 0..500 {
            player.update(DT);
            peak = peak.min(player.pos.y);
            if player.grounded && player.vel_y == 0.0 {
                break;
            }
        }
        peak
    }

    #[test]
    fn test_idle_player_stays_grounded() {
        let mut player = PlayerState::default();
        for _ in 0..1000 {
            assert!(!player.update(DT));
            assert!(player.grounded);
            assert_eq!(player.pos, Vec2::new(PLAYER_X, GROUND_Y));
            assert_eq!(player.vel_y, 0.0);
        }
    }

    #[test]
    fn test_press_on_ground_jumps_next_update() {
        let mut player = PlayerState::default();
        player.press_jump();
        assert!(player.update(DT));
        assert!(!player.grounded);
        assert!(player.pos.y < GROUND_Y);
        assert_eq!(player.jump_buffer_timer, 0.0);
        assert_eq!(player.coyote_timer, 0.0);
    }

    #[test]
    fn test_press_above_trigger_line_is_ignored() {
        let mut player = PlayerState::default();
        player.pos.y = JUMP_TRIGGER_Y - 10.0;
        player.press_jump();
        assert!(player.jump_held);
        assert_eq!(player.jump_buffer_timer, 0.0);
    }

    #[test]
    fn test_buffered_press_fires_on_landing() {
        let mut player = PlayerState::default();
        // Falling, a few units above the ground and below the trigger line
        player.pos.y = GROUND_Y - 5.0;
        player.vel_y = 600.0;
        player.grounded = false;
        player.press_jump();
        player.release_jump();

        // First update lands the player, second consumes the buffer
        assert!(!player.update(DT));
        assert!(player.grounded);
        assert!(player.update(DT));
        assert!(player.vel_y < 0.0);
    }

    #[test]
    fn test_stale_press_is_dropped() {
        let mut player = PlayerState::default();
        player.pos.y = 460.0;
        player.vel_y = 0.0;
        player.grounded = false;
        player.press_jump();
        player.release_jump();

        // Falling from 460 takes longer than the buffer window
        let mut jumped = false;
        for _ in 0..100 {
            jumped |= player.update(DT);
        }
        assert!(!jumped);
        assert!(player.grounded);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_coyote_window_allows_late_jump() {
        let mut player = PlayerState::default();
        player.update(DT);
        assert!(player.coyote_timer > 0.0);

        // Walk off a ledge: no longer on the ground but within the coyote window
        player.pos.y = GROUND_Y - 20.0;
        player.press_jump();
        assert!(player.update(0.03));
    }

    #[test]
    fn test_coyote_window_expires() {
        let mut player = PlayerState::default();
        player.update(DT);
        player.pos.y = 500.0;
        player.update(COYOTE_TIME + 0.01);
        assert_eq!(player.coyote_timer, 0.0);

        // Still below the trigger line, so the press is buffered
        player.press_jump();
        assert!(player.jump_buffer_timer > 0.0);
        assert!(!player.update(0.001));
    }

    #[test]
    fn test_release_cuts_upward_velocity() {
        let mut player = PlayerState::default();
        player.press_jump();
        player.update(DT);
        let before = player.vel_y;
        player.release_jump();
        assert!((player.vel_y - before * RELEASE_CUT).abs() < 1e-3);
        assert!(!player.jump_held);
    }

    #[test]
    fn test_release_while_falling_keeps_velocity() {
        let mut player = PlayerState::default();
        player.pos.y = 300.0;
        player.vel_y = 250.0;
        player.release_jump();
        assert_eq!(player.vel_y, 250.0);
    }

    #[test]
    fn test_hold_uses_reduced_gravity_for_max_hold_time() {
        let dt = 0.01;
        let mut player = PlayerState::default();
        player.press_jump();
        player.update(dt);
        assert!((player.vel_y - (JUMP_IMPULSE + GRAVITY * HOLD_GRAVITY_SCALE * dt)).abs() < 1e-2);

        // Hold until the boost is used up
        while player.hold_time < MAX_HOLD_TIME {
            player.update(dt);
        }
        let held_steps = (player.hold_time / dt).round();
        let expected = JUMP_IMPULSE + GRAVITY * HOLD_GRAVITY_SCALE * dt * held_steps;
        assert!((player.vel_y - expected).abs() < 0.5);

        // Boost exhausted: full gravity even though the key is still down
        let before = player.vel_y;
        player.update(dt);
        assert!((player.vel_y - (before + GRAVITY * dt)).abs() < 1e-2);
    }

    #[test]
    fn test_held_jump_peaks_higher_than_tap() {
        let mut held = PlayerState::default();
        held.press_jump();
        let held_peak = run_to_landing(&mut held);

        let mut tapped = PlayerState::default();
        tapped.press_jump();
        tapped.update(DT);
        tapped.release_jump();
        let tapped_peak = run_to_landing(&mut tapped);

        // Smaller y is higher on screen
        assert!(held_peak < tapped_peak);
    }

    #[test]
    fn test_peak_is_deterministic() {
        let mut a = PlayerState::default();
        let mut b = PlayerState::default();
        a.press_jump();
        b.press_jump();
        assert_eq!(run_to_landing(&mut a), run_to_landing(&mut b));
    }

    #[test]
    fn test_bounds_anchor_bottom_centre() {
        let player = PlayerState::default();
        let b = player.bounds();
        assert_eq!(b.max.y, GROUND_Y);
        assert!((b.min.x + PLAYER_WIDTH / 2.0 - PLAYER_X).abs() < 1e-4);
        assert!((b.max.x - PLAYER_WIDTH / 2.0 - PLAYER_X).abs() < 1e-4);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Press,
        Release,
        Update(f32),
    }

    fn step_strategy() -> impl Strategy<Value = Step> {
        prop_oneof![
            Just(Step::Press),
            Just(Step::Release),
            (0.0f32..0.1).prop_map(Step::Update),
        ]
    }

    proptest! {
        #[test]
        fn prop_velocity_and_height_stay_bounded(steps in prop::collection::vec(step_strategy(), 1..400)) {
            let mut player = PlayerState::default();
            for step in steps {
                match step {
                    Step::Press => player.press_jump(),
                    Step::Release => player.release_jump(),
                    Step::Update(dt) => {
                        player.update(dt);
                        prop_assert!(player.vel_y <= MAX_FALL);
                        prop_assert!(player.pos.y <= GROUND_Y);
                        prop_assert!(player.coyote_timer >= 0.0);
                        prop_assert!(player.jump_buffer_timer >= 0.0);
                    }
                }
            }
        }
    }
}
