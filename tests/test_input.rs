use alien_invasion::input::*;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

fn press(code: KeyCode) -> Event {
    key(code, KeyEventKind::Press)
}

fn click(button: MouseButton, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(button),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

const ORIGIN: (u16, u16) = (5, 2);

// ── key mapping ───────────────────────────────────────────────────────────────

#[test]
fn arrows_and_letters_share_bindings() {
    assert_eq!(map_key(KeyCode::Left), Some(Key::Left));
    assert_eq!(map_key(KeyCode::Char('a')), Some(Key::Left));
    assert_eq!(map_key(KeyCode::Right), Some(Key::Right));
    assert_eq!(map_key(KeyCode::Char('D')), Some(Key::Right));
    assert_eq!(map_key(KeyCode::Char(' ')), Some(Key::Fire));
    assert_eq!(map_key(KeyCode::Char('g')), Some(Key::NewGame));
    assert_eq!(map_key(KeyCode::Char('x')), None);
}

#[test]
fn quit_keys() {
    let mut keys = KeyTracker::new(false);
    assert_eq!(
        keys.translate(&press(KeyCode::Char('q')), 1, ORIGIN),
        Some(InputEvent::Quit)
    );
    let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(keys.translate(&ctrl_c, 1, ORIGIN), Some(InputEvent::Quit));
    assert_eq!(keys.translate(&press(KeyCode::Char('c')), 1, ORIGIN), None);
}

#[test]
fn fire_is_reported_on_every_press() {
    let mut keys = KeyTracker::new(false);
    let space = press(KeyCode::Char(' '));
    assert_eq!(
        keys.translate(&space, 1, ORIGIN),
        Some(InputEvent::KeyDown(Key::Fire))
    );
    assert_eq!(
        keys.translate(&space, 2, ORIGIN),
        Some(InputEvent::KeyDown(Key::Fire))
    );
}

// ── classic terminals: hold-window release ────────────────────────────────────

#[test]
fn held_key_released_after_hold_window() {
    let mut keys = KeyTracker::new(false);
    assert_eq!(
        keys.translate(&press(KeyCode::Left), 1, ORIGIN),
        Some(InputEvent::KeyDown(Key::Left))
    );
    assert!(keys.expire(1 + HOLD_WINDOW).is_empty());
    assert_eq!(
        keys.expire(2 + HOLD_WINDOW),
        vec![InputEvent::KeyUp(Key::Left)]
    );
    // already released
    assert!(keys.expire(100).is_empty());
}

#[test]
fn auto_repeat_refreshes_without_new_key_down() {
    let mut keys = KeyTracker::new(false);
    keys.translate(&press(KeyCode::Right), 1, ORIGIN);
    assert_eq!(keys.translate(&press(KeyCode::Right), 4, ORIGIN), None);
    assert!(keys.expire(4 + HOLD_WINDOW).is_empty());
    assert_eq!(
        keys.expire(5 + HOLD_WINDOW),
        vec![InputEvent::KeyUp(Key::Right)]
    );
}

#[test]
fn both_directions_expire_together() {
    let mut keys = KeyTracker::new(false);
    keys.translate(&press(KeyCode::Left), 1, ORIGIN);
    keys.translate(&press(KeyCode::Right), 1, ORIGIN);
    assert_eq!(
        keys.expire(10),
        vec![InputEvent::KeyUp(Key::Left), InputEvent::KeyUp(Key::Right)]
    );
}

// ── enhanced terminals: real releases ─────────────────────────────────────────

#[test]
fn release_event_becomes_key_up() {
    let mut keys = KeyTracker::new(true);
    keys.translate(&press(KeyCode::Left), 1, ORIGIN);
    assert_eq!(
        keys.translate(&key(KeyCode::Left, KeyEventKind::Repeat), 2, ORIGIN),
        None
    );
    // no synthetic release while the terminal reports its own
    assert!(keys.expire(50).is_empty());
    assert_eq!(
        keys.translate(&key(KeyCode::Left, KeyEventKind::Release), 51, ORIGIN),
        Some(InputEvent::KeyUp(Key::Left))
    );
    // released keys are not expired a second time
    assert!(keys.expire(200).is_empty());
}

// ── mouse ─────────────────────────────────────────────────────────────────────

#[test]
fn left_click_translated_to_field_coordinates() {
    let mut keys = KeyTracker::new(false);
    assert_eq!(
        keys.translate(&click(MouseButton::Left, 40, 12), 1, ORIGIN),
        Some(InputEvent::MouseDown { x: 35, y: 10 })
    );
    // left of the field is still reported, the button check rejects it
    assert_eq!(
        keys.translate(&click(MouseButton::Left, 0, 0), 1, ORIGIN),
        Some(InputEvent::MouseDown { x: -5, y: -2 })
    );
}

#[test]
fn other_mouse_buttons_ignored() {
    let mut keys = KeyTracker::new(false);
    assert_eq!(
        keys.translate(&click(MouseButton::Right, 40, 12), 1, ORIGIN),
        None
    );
    assert_eq!(keys.translate(&Event::FocusGained, 1, ORIGIN), None);
}
