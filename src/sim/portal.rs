//! Portal sequence
//!
//! A one-shot exit that appears once per run when the score crosses the
//! threshold, slides across the field and ends the run when it leaves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalState {
    /// Portal has appeared this run (never clears until reset)
    pub spawned: bool,
    /// Portal is on screen and animating
    pub active: bool,
    /// Current sprite frame, clamped at the last one
    pub frame: u32,
    /// Time since the last frame advance
    pub anim_clock: f32,
    /// Bottom-right corner of the sprite
    pub pos: Vec2,
}

impl Default for PortalState {
    fn default() -> Self {
        Self {
            spawned: false,
            active: false,
            frame: 0,
            anim_clock: 0.0,
            pos: Vec2::new(PORTAL_START_X, PORTAL_START_Y),
        }
    }
}

impl PortalState {
    /// Start the sequence if the score has crossed the threshold
    ///
    /// Fires at most once per run. Returns true on the triggering frame.
    pub fn maybe_trigger(&mut self, score: f32) -> bool {
        if score < PORTAL_SCORE_THRESHOLD || self.spawned || self.active {
            return false;
        }
        self.spawned = true;
        self.active = true;
        self.frame = 0;
        self.anim_clock = 0.0;
        self.pos = Vec2::new(PORTAL_START_X, PORTAL_START_Y);
        true
    }

    /// Slide and animate. Returns true on the frame the portal leaves the field.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }

        self.pos.x -= PORTAL_SPEED * dt;

        let frame_time = 1.0 / PORTAL_FPS;
        self.anim_clock += dt;
        while self.anim_clock >= frame_time {
            self.anim_clock -= frame_time;
            if self.frame < PORTAL_FRAMES - 1 {
                self.frame += 1;
            }
        }

        if self.pos.x + PORTAL_FRAME_WIDTH * 0.5 < 0.0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Sprite box (anchored at bottom-right)
    pub fn bounds(&self) -> Aabb {
        Aabb::from_bottom_right(self.pos, Vec2::new(PORTAL_FRAME_WIDTH, PORTAL_FRAME_HEIGHT))
    }

    /// Animation progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.frame as f32 / (PORTAL_FRAMES - 1) as f32
    }
}
