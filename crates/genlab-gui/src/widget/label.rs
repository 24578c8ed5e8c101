//! Single-line text label widget.

use macroquad::prelude::*;

use crate::theme::{chars_that_fit, draw_ui_text, text_width};

/// Draw a label at the given position.
pub fn draw_label(text: &str, x: f32, y: f32, color: Color) {
    draw_ui_text(text, x, y, color);
}

/// Draw a label right-aligned within a width.
pub fn draw_label_right(text: &str, x: f32, y: f32, w: f32, color: Color) {
    let rx = x + w - text_width(text);
    draw_ui_text(text, rx.max(x), y, color);
}

/// Draw a label cut to the width available, with a trailing ellipsis.
pub fn draw_label_clipped(text: &str, x: f32, y: f32, w: f32, color: Color) {
    draw_ui_text(&clip(text, chars_that_fit(w)), x, y, color);
}

/// Shorten `text` to at most `max` characters, marking the cut with "...".
pub fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::clip;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(clip("Slime Mold", 20), "Slime Mold");
    }

    #[test]
    fn long_text_gets_ellipsis() {
        assert_eq!(clip("L-System Koch Snowflake", 10), "L-Syste...");
        assert_eq!(clip("abcdef", 2), "...");
    }
}
