//! Per-frame simulation step
//!
//! Advances the world by one wall-clock delta. Order matters:
//! input, score clock, player, portal trigger, spawn, portal sequence,
//! escalation, obstacle motion, cleanup, collisions.

use super::collision::find_collision;
use super::spawner::maybe_spawn;
use super::state::{RunEnd, SessionState};
use crate::consts::*;

/// A discrete player command, applied in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    JumpPressed,
    JumpReleased,
    Dash,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

/// Result of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep going; render this frame
    Running,
    /// Run is over; the rest of the frame is skipped
    Ended(RunEnd),
}

/// Shift every live obstacle left by the dash distance
fn dash(state: &mut SessionState) {
    for obstacle in state.obstacles.iter_mut().chain(state.oscillators.iter_mut()) {
        obstacle.shift(-DASH_DISTANCE);
    }
}

/// Advance the world by `dt` seconds
pub fn tick(state: &mut SessionState, input: &TickInput, dt: f32) -> TickOutcome {
    for command in &input.commands {
        match command {
            Command::JumpPressed => state.player.press_jump(),
            Command::JumpReleased => state.player.release_jump(),
            Command::Dash => {
                if !state.portal.active {
                    dash(state);
                }
            }
        }
    }

    state.score += dt;
    state.frame_count += 1;

    if state.player.update(dt) {
        log::trace!("jump at t={:.2}", state.score);
    }

    if state.portal.maybe_trigger(state.score) {
        log::debug!("portal triggered at t={:.2}", state.score);
    }

    state.difficulty.advance(dt);
    if let Some(obstacle) = maybe_spawn(&mut state.difficulty, &mut state.rng, state.portal.active) {
        log::debug!(
            "spawned {:?} {:.0}x{:.0} at y={:.0}",
            obstacle.kind,
            obstacle.size.x,
            obstacle.size.y,
            obstacle.pos.y
        );
        state.push_obstacle(obstacle);
    }

    let mut escaped = false;
    if state.portal.active {
        escaped = state.portal.update(dt);
        // Field stays empty for the whole sequence
        state.clear_obstacles();
    }

    if state.difficulty.escalate() {
        log::debug!(
            "difficulty up: speed={:.0} interval={:.1}",
            state.difficulty.speed,
            state.difficulty.spawn_interval
        );
    }

    let speed = state.difficulty.speed;
    for obstacle in state.obstacles.iter_mut().chain(state.oscillators.iter_mut()) {
        obstacle.advance(speed, dt);
    }
    state.obstacles.retain(|o| !o.is_off_field());
    state.oscillators.retain(|o| !o.is_off_field());

    if let Some(hit) = find_collision(&state.player, &state.obstacles, &state.oscillators) {
        log::debug!("hit {:?}[{}] at t={:.2}", hit.source, hit.index, state.score);
        return TickOutcome::Ended(RunEnd::Crashed);
    }

    if escaped {
        return TickOutcome::Ended(RunEnd::Escaped);
    }

    TickOutcome::Running
}
