//! Platform abstraction layer
//!
//! Handles the window side of the game:
//! - Input events (drained once per frame, or waited on by modal screens)
//! - Presenting a rendered canvas
//! - Frame timing
//!
//! The core only talks to the `Platform` trait; `terminal` is the shipped
//! implementation.

pub mod terminal;

use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;
use crate::error::Result;
use crate::renderer::Canvas;

pub use terminal::TerminalPlatform;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Right,
    Enter,
    Char(char),
    Other,
}

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Window closed / quit requested
    Closed,
    /// Canvas size changed
    Resized { cols: usize, rows: usize },
}

/// Window/event collaborator
pub trait Platform {
    /// Drain every pending event without blocking
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;

    /// Block for up to `timeout` waiting for one event
    fn wait_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;

    /// Blank canvas matching the current window size
    fn canvas(&self) -> Canvas;

    /// Show a finished canvas
    fn present(&mut self, canvas: &Canvas) -> Result<()>;
}

/// Number of frame timestamps kept for the FPS estimate
const FPS_WINDOW: usize = 60;

/// Single authoritative frame clock
///
/// Produces one clamped `dt` per frame, paces the loop to the target rate and
/// estimates FPS over the last 60 frames.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    frame_budget: Duration,
    frame_times: [Option<Instant>; FPS_WINDOW],
    frame_index: usize,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            last: Instant::now(),
            frame_budget: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
        }
    }

    /// Forget time spent elsewhere (modal screens) so the next `dt` is small
    pub fn restart(&mut self) {
        self.last = Instant::now();
        self.frame_times = [None; FPS_WINDOW];
        self.frame_index = 0;
    }

    /// Seconds since the previous call, clamped to `MAX_FRAME_DT`
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;

        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        dt.min(MAX_FRAME_DT)
    }

    /// Sleep off whatever is left of this frame's budget
    pub fn pace(&self) {
        let elapsed = self.last.elapsed();
        if let Some(remaining) = self.frame_budget.checked_sub(elapsed) {
            std::thread::sleep(remaining);
        }
    }

    /// Frames per second over the recorded window
    pub fn fps(&self) -> Option<u32> {
        // Oldest sample sits at the write index once the ring is full
        let oldest = self.frame_times[self.frame_index]?;
        let newest_index = (self.frame_index + FPS_WINDOW - 1) % FPS_WINDOW;
        let newest = self.frame_times[newest_index]?;
        let elapsed = newest.duration_since(oldest).as_secs_f64();
        if elapsed > 0.0 {
            Some(((FPS_WINDOW - 1) as f64 / elapsed).round() as u32)
        } else {
            None
        }
    }
}
