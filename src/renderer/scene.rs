//! Draw the playfield onto a canvas
//!
//! Draw order follows the layering of the field: ground, HUD, player,
//! portal, obstacles.

use super::canvas::Canvas;
use crate::consts::GROUND_Y;
use crate::score::format_score;
use crate::settings::GlyphSet;
use crate::sim::SessionState;

/// Frames in the run cycle
pub const RUN_FRAMES: usize = 8;
/// Seconds per run-cycle frame
pub const RUN_FRAME_TIME: f32 = 0.1;
/// Frame shown while airborne
pub const AIRBORNE_FRAME: usize = 2;

/// Leg glyph for each run-cycle frame
const RUN_LEGS: [char; RUN_FRAMES] = ['/', '|', '^', '|', '\\', '|', '^', '|'];

/// Run-cycle animation state (presentation only)
#[derive(Debug, Clone, Default)]
pub struct RunCycle {
    frame: usize,
    clock: f32,
}

impl RunCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Step the cycle while grounded; hold the airborne frame otherwise
    pub fn update(&mut self, dt: f32, grounded: bool) {
        if !grounded {
            self.frame = AIRBORNE_FRAME;
            self.clock = 0.0;
            return;
        }
        self.clock += dt;
        while self.clock >= RUN_FRAME_TIME {
            self.clock -= RUN_FRAME_TIME;
            self.frame = (self.frame + 1) % RUN_FRAMES;
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}

/// Render the world for one frame
pub fn draw_world(
    canvas: &mut Canvas,
    state: &SessionState,
    run: &RunCycle,
    glyphs: GlyphSet,
    fps: Option<u32>,
) {
    canvas.clear();
    if canvas.cols() == 0 || canvas.rows() == 0 {
        return;
    }

    // Ground line just under the runner's feet
    let ground_row = (canvas.row_of(GROUND_Y) + 1).min(canvas.rows() - 1);
    for col in 0..canvas.cols() {
        canvas.put(col, ground_row, glyphs.ground());
    }

    let mut hud = format_score(state.score);
    if let Some(fps) = fps {
        hud.push_str(&format!("  {fps} fps"));
    }
    canvas.text(2, 1, &hud);

    if let Some(rect) = canvas.project(&state.player.bounds()) {
        canvas.fill(rect, glyphs.player());
        let legs = RUN_LEGS[run.frame() % RUN_FRAMES];
        for col in rect.col0..rect.col1 {
            canvas.put(col, rect.row1 - 1, legs);
        }
    }

    if state.portal.active {
        if let Some(rect) = canvas.project(&state.portal.bounds()) {
            let stages = glyphs.portal_stages();
            let stage = ((state.portal.progress() * (stages.len() - 1) as f32).round() as usize)
                .min(stages.len() - 1);
            canvas.fill(rect, stages[stage]);
        }
    }

    for obstacle in state.all_obstacles() {
        if let Some(rect) = canvas.project(&obstacle.bounds()) {
            canvas.fill(rect, glyphs.block());
        }
    }
}
