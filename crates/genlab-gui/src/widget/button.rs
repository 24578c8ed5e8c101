//! Clickable button widget with hover and active states.

use macroquad::prelude::*;

use super::Rect2;
use crate::theme::{LINE_H, draw_ui_text, text_width, ui};

/// Draw a button and return true if it was clicked this frame.
pub fn draw_button(label: &str, area: &Rect2, mouse: (f32, f32)) -> bool {
    let hovered = area.contains(mouse.0, mouse.1);
    let clicked = hovered && is_mouse_button_pressed(MouseButton::Left);

    let (fill, border, text_color) = if clicked {
        (ui::DARK_GRAY, ui::WHITE, ui::YELLOW)
    } else if hovered {
        (ui::DARK_BLUE, ui::YELLOW, ui::YELLOW)
    } else {
        (ui::DARK_BLUE, ui::LIGHT_GRAY, ui::WHITE)
    };

    super::bordered_rect(area, fill, border);

    let tx = area.x + (area.w - text_width(label)) / 2.0;
    let ty = area.y + (area.h - LINE_H) / 2.0;
    draw_ui_text(label, tx.max(area.x), ty, text_color);

    clicked
}
