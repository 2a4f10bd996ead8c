//! Terminal events → game input events.
//!
//! Two classes of terminal are supported:
//! * **Keyboard-enhancement capable** (kitty protocol): real `Release` events
//!   become `KeyUp` directly.
//! * **Classic terminals**: only `Press` events arrive (OS key-repeat shows up
//!   as repeated presses).  A movement key counts as held while a press for it
//!   arrived within `HOLD_WINDOW` frames; after that `expire` synthesises the
//!   `KeyUp`.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Frames of silence after which a movement key is treated as released.
/// OS key-repeat runs at ≥ 15 Hz, so 4 frames (≈133 ms) is always refreshed
/// while the key is really down.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    NewGame,
}

impl Key {
    fn is_movement(self) -> bool {
        matches!(self, Key::Left | Key::Right)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Left click in field coordinates.
    MouseDown { x: i32, y: i32 },
    Quit,
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(Key::NewGame),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('c') | KeyCode::Char('C') => modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

pub struct KeyTracker {
    release_events: bool,
    /// Held movement key → frame it was last seen.
    held: HashMap<Key, u64>,
}

impl KeyTracker {
    /// `release_events` is whether the terminal reports key releases.
    pub fn new(release_events: bool) -> Self {
        KeyTracker {
            release_events,
            held: HashMap::new(),
        }
    }

    /// `origin` is the terminal cell of the field's top-left corner.
    pub fn translate(&mut self, event: &Event, frame: u64, origin: (u16, u16)) -> Option<InputEvent> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => self.translate_key(*code, *kind, *modifiers, frame),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(InputEvent::MouseDown {
                x: *column as i32 - origin.0 as i32,
                y: *row as i32 - origin.1 as i32,
            }),
            _ => None,
        }
    }

    fn translate_key(
        &mut self,
        code: KeyCode,
        kind: KeyEventKind,
        modifiers: KeyModifiers,
        frame: u64,
    ) -> Option<InputEvent> {
        match kind {
            KeyEventKind::Press => {
                if is_quit(code, modifiers) {
                    return Some(InputEvent::Quit);
                }
                let key = map_key(code)?;
                if key.is_movement() && self.held.insert(key, frame).is_some() {
                    // auto-repeat of a key already down
                    return None;
                }
                Some(InputEvent::KeyDown(key))
            }
            KeyEventKind::Repeat => {
                let key = map_key(code)?;
                if let Some(last) = self.held.get_mut(&key) {
                    *last = frame;
                }
                None
            }
            KeyEventKind::Release => {
                let key = map_key(code)?;
                self.held.remove(&key);
                Some(InputEvent::KeyUp(key))
            }
        }
    }

    /// Synthesised releases for keys that went quiet.  Always empty when the
    /// terminal reports releases itself.
    pub fn expire(&mut self, frame: u64) -> Vec<InputEvent> {
        if self.release_events {
            return Vec::new();
        }
        let mut stale: Vec<Key> = self
            .held
            .iter()
            .filter(|&(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(&key, _)| key)
            .collect();
        stale.sort_by_key(|k| *k as u8);
        stale
            .into_iter()
            .map(|key| {
                self.held.remove(&key);
                InputEvent::KeyUp(key)
            })
            .collect()
    }
}
