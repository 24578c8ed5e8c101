//! Input abstraction for keyboard and mouse events.

use macroquad::prelude::*;

use genlab_runtime::{PointerButton, PointerEvent};

/// Collect all characters typed this frame.
pub fn typed_chars() -> Vec<char> {
    let mut chars = Vec::new();
    while let Some(ch) = get_char_pressed() {
        // Filter control characters but keep printable ones
        if (' '..='~').contains(&ch) {
            chars.push(ch);
        }
    }
    chars
}

/// Discard characters typed this frame, so they don't reach a field
/// focused later.
pub fn drain_chars() {
    while get_char_pressed().is_some() {}
}

/// Check if the backspace key was pressed this frame.
pub fn backspace_pressed() -> bool {
    is_key_pressed(KeyCode::Backspace)
}

/// Check if the Enter key was pressed this frame.
pub fn enter_pressed() -> bool {
    is_key_pressed(KeyCode::Enter)
}

/// Check if the Escape key was pressed this frame.
pub fn escape_pressed() -> bool {
    is_key_pressed(KeyCode::Escape)
}

/// Get the mouse scroll wheel Y delta this frame.
///
/// Positive = scroll up, negative = scroll down.
pub fn scroll_y() -> f32 {
    mouse_wheel().1
}

/// Keyboard shortcuts for the lab controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Space.
    TogglePlay,
    /// S.
    Step,
    /// R.
    Reset,
    /// C.
    Clear,
}

impl Shortcut {
    /// All shortcuts, in the order they are checked.
    pub const ALL: [Self; 4] = [Self::TogglePlay, Self::Step, Self::Reset, Self::Clear];

    /// The key bound to this shortcut.
    pub fn key(self) -> KeyCode {
        match self {
            Self::TogglePlay => KeyCode::Space,
            Self::Step => KeyCode::S,
            Self::Reset => KeyCode::R,
            Self::Clear => KeyCode::C,
        }
    }

    /// The shortcut bound to `key`, if any.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Shortcuts pressed this frame.
pub fn pressed_shortcuts() -> Vec<Shortcut> {
    Shortcut::ALL
        .into_iter()
        .filter(|s| is_key_pressed(s.key()))
        .collect()
}

/// Map a window mouse button to a surface pointer button.
pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Unknown => None,
    }
}

const BUTTONS: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

/// Pointer events for this frame, in window coordinates.
///
/// Presses only count when `over_surface` is true; releases and moves are
/// always reported so drags that leave the surface still end.
pub fn pointer_events(over_surface: bool, moved: bool) -> Vec<PointerEvent> {
    let (x, y) = mouse_position();
    let mut events = Vec::new();
    if over_surface {
        for button in BUTTONS {
            if is_mouse_button_pressed(button) {
                if let Some(button) = pointer_button(button) {
                    events.push(PointerEvent::Down { x, y, button });
                }
            }
        }
    }
    if moved {
        events.push(PointerEvent::Move { x, y });
    }
    if BUTTONS.into_iter().any(is_mouse_button_released) {
        events.push(PointerEvent::Up { x, y });
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_round_trip_through_keys() {
        for s in Shortcut::ALL {
            assert_eq!(Shortcut::from_key(s.key()), Some(s));
        }
        assert_eq!(Shortcut::from_key(KeyCode::Space), Some(Shortcut::TogglePlay));
        assert_eq!(Shortcut::from_key(KeyCode::Q), None);
    }

    #[test]
    fn mouse_buttons_map_to_pointer_buttons() {
        assert_eq!(pointer_button(MouseButton::Left), Some(PointerButton::Primary));
        assert_eq!(pointer_button(MouseButton::Right), Some(PointerButton::Secondary));
        assert_eq!(pointer_button(MouseButton::Middle), Some(PointerButton::Middle));
        assert_eq!(pointer_button(MouseButton::Unknown), None);
    }
}
