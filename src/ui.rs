//! Start and game-over screens
//!
//! Both are blocking loops that own the event pump until the player decides.
//! A close request unwinds as `Error::WindowClosed`. If the canvas cannot fit
//! the screen's text the screen gives up and returns its safe default.

use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::platform::{InputEvent, Key, Platform};
use crate::renderer::Canvas;
use crate::score::format_score;
use crate::sim::RunEnd;

/// How often a modal screen redraws while waiting for input
const MODAL_POLL: Duration = Duration::from_millis(100);

/// Game-over decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MenuChoice {
    /// Start a fresh run immediately
    Retry,
    /// Return to the start screen
    Menu,
}

/// What the game-over screen shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub end: RunEnd,
    /// Seconds survived
    pub score: f32,
    /// Runs started this session, including this one
    pub run: u32,
}

const START_LINES: [&str; 4] = [
    "Welcome to Elliot Dash!",
    "",
    "Press SPACE to start",
    "SPACE jump (hold for height)  RIGHT dash  Q quit",
];

fn game_over_lines(report: &RunReport) -> [String; 5] {
    let header = match report.end {
        RunEnd::Crashed => "GAME OVER",
        RunEnd::Escaped => "YOU ESCAPED!",
    };
    [
        header.to_string(),
        String::new(),
        format!("Time {}", format_score(report.score)),
        String::new(),
        "Press R to restart, B to go back to menu".to_string(),
    ]
}

/// Draw lines centred vertically and horizontally
///
/// Fails when the canvas is too small to show every line in full.
fn layout<S: AsRef<str>>(canvas: &mut Canvas, lines: &[S]) -> Result<()> {
    let need_cols = lines
        .iter()
        .map(|l| l.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    let need_rows = lines.len();
    if canvas.cols() < need_cols || canvas.rows() < need_rows {
        return Err(Error::ScreenTooSmall {
            need_cols,
            need_rows,
            cols: canvas.cols(),
            rows: canvas.rows(),
        });
    }

    canvas.clear();
    let top = (canvas.rows() - need_rows) / 2;
    for (i, line) in lines.iter().enumerate() {
        canvas.text_centered(top + i, line.as_ref());
    }
    Ok(())
}

/// Run a modal loop until `decide` maps an event to a decision
///
/// Layout failures return `fallback`. A failed present is logged once and
/// the screen keeps waiting for input; close requests and input errors
/// propagate.
fn modal<P, S, T>(
    platform: &mut P,
    lines: &[S],
    fallback: T,
    mut decide: impl FnMut(Key) -> Option<T>,
) -> Result<T>
where
    P: Platform,
    S: AsRef<str>,
{
    let mut render_failed = false;
    loop {
        let mut canvas = platform.canvas();
        match layout(&mut canvas, lines) {
            Ok(()) => {}
            Err(e @ Error::ScreenTooSmall { .. }) => {
                log::error!("Modal screen unavailable: {e}");
                return Ok(fallback);
            }
            Err(e) => return Err(e),
        }
        if let Err(e) = platform.present(&canvas) {
            if !render_failed {
                log::warn!("Modal screen could not be drawn, still waiting for input: {e}");
                render_failed = true;
            }
        }

        match platform.wait_event(MODAL_POLL)? {
            Some(InputEvent::Closed) => return Err(Error::WindowClosed),
            Some(InputEvent::KeyDown(key)) => {
                if let Some(decision) = decide(key) {
                    return Ok(decision);
                }
            }
            _ => {}
        }
    }
}

/// Start screen: `true` to begin a run, `false` to quit
pub fn start_screen<P: Platform>(platform: &mut P) -> Result<bool> {
    modal(platform, &START_LINES, false, |key| match key {
        Key::Space | Key::Enter => Some(true),
        _ => None,
    })
}

/// Game-over screen: retry or back to the menu
pub fn game_over_screen<P: Platform>(platform: &mut P, report: &RunReport) -> Result<MenuChoice> {
    let lines = game_over_lines(report);
    modal(platform, &lines, MenuChoice::Menu, |key| match key {
        Key::Char('r') => Some(MenuChoice::Retry),
        Key::Char('b') => Some(MenuChoice::Menu),
        _ => None,
    })
}
