use std::{collections::HashMap, io, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use star_chase_core::{entities::HeldKeys, game::InputFrame, game_loop::InputSource};

/// Ticks a key stays held after its last press or repeat, for terminals
/// that never report key releases. About 130 ms at 60 Hz.
const HOLD_WINDOW: u64 = 8;

/// Turns raw key events into per-tick [`InputFrame`]s.
///
/// Terminals with keyboard enhancement send `Release` events, so keys are
/// held until released. Classic terminals only send repeated `Press`
/// events; there a key counts as held while its last event is within
/// [`HOLD_WINDOW`] ticks.
#[derive(Debug)]
pub struct KeyTracker {
    /// Last tick each key was seen pressed or repeated.
    last_seen: HashMap<KeyCode, u64>,
    tick: u64,
    reports_release: bool,
    quit: bool,
    fire_requests: u32,
}

impl KeyTracker {
    pub fn new(reports_release: bool) -> Self {
        KeyTracker {
            last_seen: HashMap::new(),
            tick: 0,
            reports_release,
            quit: false,
            fire_requests: 0,
        }
    }

    /// Records one key event for the current tick.
    ///
    /// Letters are tracked case-insensitively: Shift may be let go before
    /// the letter, so a press of `W` can be released as `w`.
    pub fn handle(&mut self, key: KeyEvent) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press => {
                self.last_seen.insert(code, self.tick);
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    KeyCode::Char(' ') | KeyCode::Char('f') => self.fire_requests += 1,
                    _ => {}
                }
            }
            // Repeats keep a key held but never fire.
            KeyEventKind::Repeat => {
                self.last_seen.insert(code, self.tick);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
            }
        }
    }

    /// Closes the current tick and returns what happened during it.
    pub fn finish_tick(&mut self) -> InputFrame {
        let frame = InputFrame {
            quit: self.quit,
            fire_requests: self.fire_requests,
            held: HeldKeys {
                up: self.any_held(&[KeyCode::Up, KeyCode::Char('w')]),
                down: self.any_held(&[KeyCode::Down, KeyCode::Char('s')]),
                left: self.any_held(&[KeyCode::Left, KeyCode::Char('a')]),
                right: self.any_held(&[KeyCode::Right, KeyCode::Char('d')]),
            },
        };
        self.fire_requests = 0;
        self.tick += 1;
        frame
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| match self.last_seen.get(key) {
            Some(_) if self.reports_release => true,
            Some(&last) => self.tick.saturating_sub(last) <= HOLD_WINDOW,
            None => false,
        })
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Reads pending crossterm events without blocking.
#[derive(Debug)]
pub struct TerminalInput {
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn new(reports_release: bool) -> Self {
        TerminalInput {
            tracker: KeyTracker::new(reports_release),
        }
    }
}

impl InputSource for TerminalInput {
    type Error = io::Error;

    fn poll(&mut self) -> Result<InputFrame, Self::Error> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.tracker.handle(key);
            }
        }
        Ok(self.tracker.finish_tick())
    }
}
