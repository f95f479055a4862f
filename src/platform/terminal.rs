//! Terminal platform (crossterm)
//!
//! Raw mode plus the alternate screen. Key release events need the keyboard
//! enhancement protocol; on terminals without it a held key is reported as
//! released `FALLBACK_HOLD` after the last press or repeat.

use std::collections::VecDeque;
use std::io::{Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, queue, style, terminal};

use super::{InputEvent, Key, Platform};
use crate::consts::MAX_HOLD_TIME;
use crate::error::{Error, Result};
use crate::renderer::Canvas;

/// Synthetic hold length when the terminal cannot report releases
const FALLBACK_HOLD: Duration = Duration::from_millis((MAX_HOLD_TIME * 1000.0) as u64);

/// Presses of a held key closer together than this are autorepeat
///
/// Terminal autorepeat runs at roughly 30 ms; a deliberate double tap is
/// slower.
const REPEAT_WINDOW: Duration = Duration::from_millis(50);

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => Key::Other,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Turns crossterm events into `InputEvent`s
///
/// With `enhanced` set the terminal's own press/release events are passed
/// through. Otherwise every press opens a synthetic hold that `expire` closes.
#[derive(Debug)]
struct KeyTracker {
    enhanced: bool,
    /// Keys considered down, with the time of their last press or repeat
    held: Vec<(Key, Instant)>,
}

impl KeyTracker {
    fn new(enhanced: bool) -> Self {
        Self {
            enhanced,
            held: Vec::new(),
        }
    }

    fn translate(&mut self, event: Event, now: Instant, out: &mut Vec<InputEvent>) {
        match event {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Release && is_quit(&key) {
                    out.push(InputEvent::Closed);
                    return;
                }
                let mapped = map_key(key.code);
                match key.kind {
                    KeyEventKind::Press if self.enhanced => out.push(InputEvent::KeyDown(mapped)),
                    KeyEventKind::Press => self.legacy_press(mapped, now, out),
                    KeyEventKind::Repeat => {
                        if let Some(entry) = self.held.iter_mut().find(|(k, _)| *k == mapped) {
                            entry.1 = now;
                        }
                    }
                    KeyEventKind::Release => out.push(InputEvent::KeyUp(mapped)),
                }
            }
            Event::Resize(cols, rows) => out.push(InputEvent::Resized {
                cols: cols as usize,
                rows: rows as usize,
            }),
            _ => {}
        }
    }

    /// Legacy terminals report autorepeat as fresh presses
    fn legacy_press(&mut self, key: Key, now: Instant, out: &mut Vec<InputEvent>) {
        match self.held.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) if now.duration_since(entry.1) < REPEAT_WINDOW => {
                entry.1 = now;
            }
            Some(entry) => {
                // A second tap while still held: release, then press again
                entry.1 = now;
                out.push(InputEvent::KeyUp(key));
                out.push(InputEvent::KeyDown(key));
            }
            None => {
                self.held.push((key, now));
                out.push(InputEvent::KeyDown(key));
            }
        }
    }

    /// Release keys whose synthetic hold has run out
    fn expire(&mut self, now: Instant, out: &mut Vec<InputEvent>) {
        self.held.retain(|(key, since)| {
            if now.duration_since(*since) >= FALLBACK_HOLD {
                out.push(InputEvent::KeyUp(*key));
                false
            } else {
                true
            }
        });
    }
}

pub struct TerminalPlatform {
    stdout: Stdout,
    cols: usize,
    rows: usize,
    keys: KeyTracker,
    /// Translated events not yet handed to `wait_event`
    pending: VecDeque<InputEvent>,
}

impl TerminalPlatform {
    /// Take over the terminal
    pub fn new() -> Result<Self> {
        let mut stdout = stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide
        )?;

        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!(
            "Terminal ready (key release events: {})",
            if enhanced { "native" } else { "synthesised" }
        );

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            stdout,
            cols: cols as usize,
            rows: rows as usize,
            keys: KeyTracker::new(enhanced),
            pending: VecDeque::new(),
        })
    }

    /// Translate one crossterm event, tracking the canvas size
    fn translate(&mut self, event: Event, out: &mut Vec<InputEvent>) {
        let start = out.len();
        self.keys.translate(event, Instant::now(), out);
        for ev in &out[start..] {
            if let InputEvent::Resized { cols, rows } = *ev {
                self.cols = cols;
                self.rows = rows;
            }
        }
    }
}

impl Platform for TerminalPlatform {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events: Vec<InputEvent> = self.pending.drain(..).collect();
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            self.translate(ev, &mut events);
        }
        self.keys.expire(Instant::now(), &mut events);
        Ok(events)
    }

    fn wait_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        if self.pending.is_empty() {
            let mut events = Vec::new();
            if event::poll(timeout)? {
                let ev = event::read()?;
                self.translate(ev, &mut events);
            }
            self.keys.expire(Instant::now(), &mut events);
            self.pending.extend(events);
        }
        Ok(self.pending.pop_front())
    }

    fn canvas(&self) -> Canvas {
        Canvas::new(self.cols, self.rows)
    }

    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        for (row, line) in canvas.lines().enumerate() {
            // Writing the bottom-right cell scrolls some terminals
            let line: String = if row + 1 == canvas.rows() {
                line.chars().take(canvas.cols().saturating_sub(1)).collect()
            } else {
                line
            };
            queue!(self.stdout, cursor::MoveTo(0, row as u16), style::Print(line))?;
        }
        self.stdout.flush().map_err(Error::from)
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        if self.keys.enhanced {
            let _ = execute!(self.stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
