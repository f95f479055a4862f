//! Elliot Dash - a side-scrolling obstacle dodger
//!
//! Core modules:
//! - `sim`: Frame simulation (player physics, spawning, portal, collisions)
//! - `session`: Start/Playing/Ended state machine and the frame loop
//! - `renderer`: Projects the world onto a character-cell canvas
//! - `platform`: Window/input abstraction and the terminal implementation
//! - `ui`: Blocking start and game-over screens
//! - `settings`: Frontend preferences

pub mod error;
pub mod platform;
pub mod renderer;
pub mod score;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{Error, Result};
pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (prevents tunnelling after a stall)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (screen space, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 150.0;
    pub const GROUND_Y: f32 = 564.0;
    /// 128px run frame scaled by 0.65
    pub const PLAYER_WIDTH: f32 = 83.2;
    pub const PLAYER_HEIGHT: f32 = 83.2;
    /// Jump presses only register below this line
    pub const JUMP_TRIGGER_Y: f32 = 450.0;
    pub const GROUND_TOLERANCE: f32 = 0.5;

    /// Player physics (units/s, units/s²)
    pub const GRAVITY: f32 = 2000.0;
    pub const JUMP_IMPULSE: f32 = -1000.0;
    pub const MAX_FALL: f32 = 2000.0;
    /// Variable jump height
    pub const MAX_HOLD_TIME: f32 = 0.18;
    pub const HOLD_GRAVITY_SCALE: f32 = 0.35;
    pub const RELEASE_CUT: f32 = 0.45;
    /// Grace windows (seconds)
    pub const COYOTE_TIME: f32 = 0.08;
    pub const JUMP_BUFFER_TIME: f32 = 0.10;

    /// Oscillating obstacle bounce bounds and speeds
    pub const BLOCK_GROUND: f32 = 524.0;
    pub const BLOCK_CEILING: f32 = 100.0;
    pub const BLOCK_JUMP_IMPULSE: f32 = 900.0;
    pub const BLOCK_FALL_SPEED: f32 = 600.0;
    pub const BLOCK_VY_CLAMP: f32 = 900.0;

    /// Spawn lanes (bottom edge of the obstacle)
    pub const SPAWN_X: f32 = 800.0;
    pub const GROUND_LANE: f32 = 564.0;
    pub const MID_LANE: f32 = 464.0;
    pub const OSCILLATOR_LANE: f32 = 524.0;

    /// Spawn draws
    pub const MIN_OBSTACLE_WIDTH: f32 = 50.0;
    pub const MAX_OBSTACLE_WIDTH: f32 = 150.0;
    pub const MIN_OBSTACLE_HEIGHT: f32 = 30.0;
    pub const MAX_OBSTACLE_HEIGHT: f32 = 150.0;
    pub const CATEGORY_ROLL_MAX: f32 = 3.0;
    /// roll <= this -> ground lane
    pub const GROUND_ROLL_MAX: f32 = 1.6;
    /// roll in (GROUND_ROLL_MAX, MID_ROLL_MAX] -> mid lane, above -> oscillator
    pub const MID_ROLL_MAX: f32 = 2.5;

    /// Difficulty curve
    pub const BASE_OBSTACLE_SPEED: f32 = 250.0;
    pub const OBSTACLE_SPEED_STEP: f32 = 50.0;
    pub const MAX_OBSTACLE_SPEED: f32 = 500.0;
    pub const BASE_SPAWN_INTERVAL: f32 = 2.0;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.2;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.8;
    pub const ESCALATION_PERIOD: f32 = 2.0;

    /// Portal sequence
    pub const PORTAL_SCORE_THRESHOLD: f32 = 10.0;
    pub const PORTAL_SPEED: f32 = 200.0;
    pub const PORTAL_FPS: f32 = 8.0;
    /// 4x4 sprite sheet
    pub const PORTAL_FRAMES: u32 = 16;
    pub const PORTAL_FRAME_WIDTH: f32 = 128.0;
    pub const PORTAL_FRAME_HEIGHT: f32 = 128.0;
    pub const PORTAL_START_X: f32 = 800.0;
    pub const PORTAL_START_Y: f32 = 600.0;

    /// Dash shifts every obstacle this far left
    pub const DASH_DISTANCE: f32 = 250.0;
}

/// Initial player position (bottom-centre of the sprite)
#[inline]
pub fn player_spawn() -> Vec2 {
    Vec2::new(consts::PLAYER_X, consts::GROUND_Y)
}
