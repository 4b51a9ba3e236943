//! Keyboard handling
//!
//! Polls macroquad once per frame and turns key presses into [`InputEvent`]s.

use crate::app::InputEvent;
use crate::rasterizer::CullMode;
use macroquad::prelude::*;

const WATCHED_KEYS: [KeyCode; 8] = [
    KeyCode::Escape,
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::C,
    KeyCode::X,
    KeyCode::D,
];

/// Key binding table
pub fn event_for_key(key: KeyCode) -> Option<InputEvent> {
    match key {
        KeyCode::Escape => Some(InputEvent::Quit),
        KeyCode::Key1 => Some(InputEvent::SelectMode(1)),
        KeyCode::Key2 => Some(InputEvent::SelectMode(2)),
        KeyCode::Key3 => Some(InputEvent::SelectMode(3)),
        KeyCode::Key4 => Some(InputEvent::SelectMode(4)),
        KeyCode::C => Some(InputEvent::SetCull(CullMode::Backface)),
        KeyCode::X | KeyCode::D => Some(InputEvent::SetCull(CullMode::None)),
        _ => None,
    }
}

/// Collect this frame's events
pub fn poll_events() -> Vec<InputEvent> {
    WATCHED_KEYS
        .iter()
        .filter(|&&key| is_key_pressed(key))
        .filter_map(|&key| event_for_key(key))
        .collect()
}
