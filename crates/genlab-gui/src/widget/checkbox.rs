//! Labelled on/off toggle.

use macroquad::prelude::*;

use super::Rect2;
use crate::theme::{LINE_H, draw_ui_text, ui};

/// Draw a checkbox and return the new value if it was toggled this frame.
pub fn draw_checkbox(label: &str, checked: bool, area: &Rect2, mouse: (f32, f32)) -> Option<bool> {
    let hovered = area.contains(mouse.0, mouse.1);
    let size = area.h.min(16.0);
    let bx = Rect2::new(area.x, area.y + (area.h - size) / 2.0, size, size);

    let border = if hovered { ui::YELLOW } else { ui::LIGHT_GRAY };
    super::bordered_rect(&bx, ui::BLACK, border);
    if checked {
        let inner = bx.inset(4.0);
        draw_rectangle(inner.x, inner.y, inner.w, inner.h, ui::GREEN);
    }
    draw_ui_text(
        label,
        bx.x + size + 8.0,
        area.y + (area.h - LINE_H) / 2.0,
        ui::WHITE,
    );

    if hovered && is_mouse_button_pressed(MouseButton::Left) {
        Some(!checked)
    } else {
        None
    }
}
