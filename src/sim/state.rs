//! Session state and core simulation types
//!
//! One `SessionState` holds the whole world. Every component borrows the part
//! it needs for the duration of a frame; nothing keeps its own copy.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::player::PlayerState;
use super::portal::PortalState;
use super::spawner::Difficulty;

/// Stored phase of the session state machine
///
/// The game-over state is transient: a run end is resolved into one of these
/// two before the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen is showing
    Start,
    /// Active gameplay
    Playing,
}

/// How a run finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEnd {
    /// Player hit an obstacle
    Crashed,
    /// Portal sequence completed
    Escaped,
}

fn fresh_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete world state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Seed the spawner RNG was created from
    pub seed: u64,
    /// Spawner RNG; keeps running across resets so runs differ
    #[serde(skip, default = "fresh_rng")]
    pub rng: Pcg32,
    /// Seconds since the last reset
    pub score: f32,
    /// Frames simulated since the last reset
    pub frame_count: u64,
    pub player: PlayerState,
    /// Static obstacles (tested first for collisions)
    pub obstacles: Vec<Obstacle>,
    /// Gravity-oscillating obstacles
    pub oscillators: Vec<Obstacle>,
    pub portal: PortalState,
    pub difficulty: Difficulty,
}

impl SessionState {
    /// Create a new world with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0.0,
            frame_count: 0,
            player: PlayerState::default(),
            obstacles: Vec::new(),
            oscillators: Vec::new(),
            portal: PortalState::default(),
            difficulty: Difficulty::default(),
        }
    }

    /// Return every gameplay value to its starting point
    ///
    /// The RNG is left alone so the next run draws a different stream.
    pub fn reset(&mut self) {
        self.score = 0.0;
        self.frame_count = 0;
        self.player = PlayerState::default();
        self.obstacles.clear();
        self.oscillators.clear();
        self.portal = PortalState::default();
        self.difficulty = Difficulty::default();
    }

    /// Route a freshly spawned obstacle into its collection
    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        if obstacle.is_oscillating() {
            self.oscillators.push(obstacle);
        } else {
            self.obstacles.push(obstacle);
        }
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
        self.oscillators.clear();
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len() + self.oscillators.len()
    }

    /// All live obstacles, static first
    pub fn all_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().chain(self.oscillators.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    #[test]
    fn test_new_state_is_clean() {
        let state = SessionState::new(5);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.obstacle_count(), 0);
        assert!(!state.portal.spawned);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_X, GROUND_Y));
        assert_eq!(state.difficulty.speed, BASE_OBSTACLE_SPEED);
    }

    #[test]
    fn test_push_routes_by_kind() {
        let mut state = SessionState::new(5);
        let size = Vec2::new(60.0, 60.0);
        state.push_obstacle(Obstacle::new_static(Vec2::new(SPAWN_X, GROUND_LANE), size));
        state.push_obstacle(Obstacle::new_oscillating(Vec2::new(SPAWN_X, OSCILLATOR_LANE), size));
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.oscillators.len(), 1);
        assert_eq!(state.obstacle_count(), 2);
        assert!(!state.all_obstacles().next().map(Obstacle::is_oscillating).unwrap_or(true));
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut state = SessionState::new(5);
        let size = Vec2::new(60.0, 60.0);
        state.push_obstacle(Obstacle::new_static(Vec2::new(400.0, GROUND_LANE), size));
        state.push_obstacle(Obstacle::new_oscillating(Vec2::new(400.0, OSCILLATOR_LANE), size));
        state.score = 8.5;
        state.frame_count = 400;
        state.player.pos.y = 300.0;
        state.player.vel_y = -400.0;
        state.player.jump_held = true;
        state.player.jump_buffer_timer = 0.05;
        state.portal.maybe_trigger(12.0);
        state.difficulty.speed = 450.0;
        state.difficulty.spawn_interval = 1.0;
        state.difficulty.since_spawn = 0.7;
        state.difficulty.since_escalation = 1.3;

        state.reset();

        assert_eq!(state.obstacle_count(), 0);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.player, PlayerState::default());
        assert_eq!(state.portal, PortalState::default());
        assert_eq!(state.difficulty, Difficulty::default());
        assert_eq!(state.seed, 5);
    }

    #[test]
    fn test_serializes_without_rng() {
        let state = SessionState::new(9);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"seed\":9"));
        assert!(!json.contains("rng"));
    }
}
