//! Single-line text input field with blinking cursor.

use macroquad::prelude::*;

use super::Rect2;
use crate::theme::{LINE_H, chars_that_fit, draw_ui_text, text_width, ui};

/// Draw a text input field with a blinking cursor.
///
/// `value` is the current text. `active` determines if the field accepts input.
/// Returns the updated text value.
pub fn draw_input(value: &str, placeholder: &str, active: bool, area: &Rect2) -> String {
    let fill = if active { ui::BLACK } else { ui::DARK_BLUE };
    let border = if active { ui::YELLOW } else { ui::DARK_GRAY };
    super::bordered_rect(area, fill, border);

    let text_x = area.x + 4.0;
    let text_y = area.y + (area.h - LINE_H) / 2.0;
    let max_chars = chars_that_fit(area.w - 8.0);

    let mut text = value.to_string();

    if active {
        for ch in crate::input::typed_chars() {
            text.push(ch);
        }
        if crate::input::backspace_pressed() {
            text.pop();
        }

        let visible = tail(&text, max_chars);
        draw_ui_text(visible, text_x, text_y, ui::WHITE);

        if cursor_visible() {
            let cursor_x = text_x + text_width(visible) + 1.0;
            draw_rectangle(cursor_x, text_y + 2.0, 1.0, LINE_H - 4.0, ui::YELLOW);
        }
    } else if text.is_empty() {
        draw_ui_text(placeholder, text_x, text_y, ui::DARK_GRAY);
    } else {
        let visible = super::label::clip(&text, max_chars);
        draw_ui_text(&visible, text_x, text_y, ui::LIGHT_GRAY);
    }

    text
}

/// Blink phase shared by all text cursors.
pub(crate) fn cursor_visible() -> bool {
    (get_time() * 3.0) as u32 % 2 == 0
}

/// The last `max` characters of `text`.
pub(crate) fn tail(text: &str, max: usize) -> &str {
    let count = text.chars().count();
    if count <= max {
        return text;
    }
    let skip = count - max;
    text.char_indices()
        .nth(skip)
        .map_or("", |(i, _)| &text[i..])
}
