//! Game session state machine
//!
//! `Start --begin--> Playing --run ends--> (game over) --Retry--> Playing`
//! and `--Menu--> Start`. Every entry into `Playing` or `Start` resets the
//! world. The `run` loop drives a `Platform`; the transition methods are
//! usable on their own.

use crate::error::Result;
use crate::platform::{FrameClock, InputEvent, Key, Platform};
use crate::renderer::{RunCycle, draw_world};
use crate::settings::Settings;
use crate::sim::{Command, GamePhase, RunEnd, SessionState, TickInput, TickOutcome, tick};
use crate::ui::{self, MenuChoice, RunReport};

/// Map raw input events to simulation commands
///
/// Returns `None` when the window was closed.
pub fn commands_from_events(events: &[InputEvent]) -> Option<TickInput> {
    let mut input = TickInput::default();
    for event in events {
        match event {
            InputEvent::Closed => return None,
            InputEvent::KeyDown(Key::Space) => input.push(Command::JumpPressed),
            InputEvent::KeyUp(Key::Space) => input.push(Command::JumpReleased),
            InputEvent::KeyDown(Key::Right) => input.push(Command::Dash),
            _ => {}
        }
    }
    Some(input)
}

/// Owns the world and the current phase
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    phase: GamePhase,
    /// Runs started so far
    runs: u32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            state: SessionState::new(seed),
            phase: GamePhase::Start,
            runs: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Start screen confirmed: reset and start playing
    pub fn begin(&mut self) {
        self.state.reset();
        self.phase = GamePhase::Playing;
        self.runs += 1;
        log::info!("Run {} started", self.runs);
    }

    /// Simulate one frame. Outside `Playing` this does nothing.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> TickOutcome {
        if self.phase != GamePhase::Playing {
            return TickOutcome::Running;
        }
        tick(&mut self.state, input, dt)
    }

    /// Summary of the run that just ended
    pub fn report(&self, end: RunEnd) -> RunReport {
        RunReport {
            end,
            score: self.state.score,
            run: self.runs,
        }
    }

    /// Apply the game-over decision; both paths reset the world
    pub fn resolve(&mut self, choice: MenuChoice) {
        match choice {
            MenuChoice::Retry => self.begin(),
            MenuChoice::Menu => {
                self.state.reset();
                self.phase = GamePhase::Start;
                log::info!("Back to start screen");
            }
        }
    }

    /// Drive the game until the player quits
    ///
    /// Returns `Err(Error::WindowClosed)` when the window is closed mid-game
    /// or from a modal screen, and `Ok(())` when the start screen is declined.
    pub fn run<P: Platform>(&mut self, platform: &mut P, settings: &Settings) -> Result<()> {
        let mut clock = FrameClock::new(settings.target_fps);
        let mut run_cycle = RunCycle::new();
        let mut render_failed = false;

        loop {
            match self.phase {
                GamePhase::Start => {
                    if !ui::start_screen(platform)? {
                        log::info!("Quit from start screen");
                        return Ok(());
                    }
                    self.begin();
                    run_cycle.reset();
                    clock.restart();
                }
                GamePhase::Playing => {
                    let events = platform.poll_events()?;
                    let Some(input) = commands_from_events(&events) else {
                        return Err(crate::Error::WindowClosed);
                    };
                    let dt = clock.tick();

                    match self.frame(&input, dt) {
                        TickOutcome::Running => {
                            run_cycle.update(dt, self.state.player.grounded);
                            let mut canvas = platform.canvas();
                            let fps = if settings.show_fps { clock.fps() } else { None };
                            draw_world(&mut canvas, &self.state, &run_cycle, settings.glyphs, fps);
                            if let Err(e) = platform.present(&canvas) {
                                if !render_failed {
                                    log::warn!("Rendering failed, continuing without display: {e}");
                                    render_failed = true;
                                }
                            }
                            clock.pace();
                        }
                        TickOutcome::Ended(end) => {
                            let report = self.report(end);
                            match serde_json::to_string(&report) {
                                Ok(json) => log::info!("Run ended: {json}"),
                                Err(e) => log::info!("Run ended ({end:?}); summary unavailable: {e}"),
                            }
                            let choice = ui::game_over_screen(platform, &report)?;
                            self.resolve(choice);
                            run_cycle.reset();
                            clock.restart();
                        }
                    }
                }
            }
        }
    }
}
