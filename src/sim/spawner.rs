//! Obstacle spawning and difficulty escalation

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use crate::consts::*;

/// Scroll speed, spawn cadence and the accumulators that drive them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Horizontal obstacle speed (units/s)
    pub speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Seconds since the last spawn
    pub since_spawn: f32,
    /// Seconds since the last escalation step
    pub since_escalation: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            speed: BASE_OBSTACLE_SPEED,
            spawn_interval: BASE_SPAWN_INTERVAL,
            since_spawn: 0.0,
            since_escalation: 0.0,
        }
    }
}

impl Difficulty {
    /// Accumulate frame time
    pub fn advance(&mut self, dt: f32) {
        self.since_spawn += dt;
        self.since_escalation += dt;
    }

    /// Apply one escalation step if a full period has elapsed
    ///
    /// Returns true when a step was taken. Speed and cadence saturate at their
    /// caps but the period keeps ticking.
    pub fn escalate(&mut self) -> bool {
        if self.since_escalation < ESCALATION_PERIOD {
            return false;
        }
        self.since_escalation -= ESCALATION_PERIOD;
        self.speed = (self.speed + OBSTACLE_SPEED_STEP).min(MAX_OBSTACLE_SPEED);
        self.spawn_interval = (self.spawn_interval - SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL);
        true
    }

    pub fn spawn_due(&self) -> bool {
        self.since_spawn >= self.spawn_interval
    }
}

/// Lane picked by the category roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Ground,
    Mid,
    Oscillating,
}

impl Lane {
    /// Map a roll in `[0, CATEGORY_ROLL_MAX)` to a lane
    pub fn from_roll(roll: f32) -> Self {
        if roll <= GROUND_ROLL_MAX {
            Lane::Ground
        } else if roll <= MID_ROLL_MAX {
            Lane::Mid
        } else {
            Lane::Oscillating
        }
    }
}

/// Build an obstacle at the right edge from a size and a category roll
pub fn build_obstacle(size: Vec2, roll: f32) -> Obstacle {
    match Lane::from_roll(roll) {
        Lane::Ground => Obstacle::new_static(Vec2::new(SPAWN_X, GROUND_LANE), size),
        Lane::Mid => Obstacle::new_static(Vec2::new(SPAWN_X, MID_LANE), size),
        Lane::Oscillating => Obstacle::new_oscillating(Vec2::new(SPAWN_X, OSCILLATOR_LANE), size),
    }
}

/// Draw a random obstacle
pub fn roll_obstacle<R: Rng>(rng: &mut R) -> Obstacle {
    let width = rng.random_range(MIN_OBSTACLE_WIDTH..MAX_OBSTACLE_WIDTH);
    let height = rng.random_range(MIN_OBSTACLE_HEIGHT..MAX_OBSTACLE_HEIGHT);
    let roll = rng.random_range(0.0..CATEGORY_ROLL_MAX);
    build_obstacle(Vec2::new(width, height), roll)
}

/// Spawn an obstacle if the interval has elapsed
///
/// Never spawns while the portal is active. The spawn accumulator resets on
/// every spawn, whatever lane was drawn.
pub fn maybe_spawn<R: Rng>(
    difficulty: &mut Difficulty,
    rng: &mut R,
    portal_active: bool,
) -> Option<Obstacle> {
    if portal_active || !difficulty.spawn_due() {
        return None;
    }
    difficulty.since_spawn = 0.0;
    Some(roll_obstacle(rng))
}
