//! Multi-line text editor for rule sets.

use macroquad::prelude::*;

use super::Rect2;
use crate::theme::{LINE_H, chars_that_fit, draw_ui_text, text_width, ui};

/// Draw an editable text area. While `active`, typed characters are
/// appended, Enter starts a new line and Backspace deletes.
///
/// Returns the updated text value.
pub fn draw_text_area(value: &str, active: bool, area: &Rect2) -> String {
    let fill = if active { ui::BLACK } else { ui::DARK_BLUE };
    let border = if active { ui::YELLOW } else { ui::DARK_GRAY };
    super::bordered_rect(area, fill, border);

    let mut text = value.to_string();
    if active {
        for ch in crate::input::typed_chars() {
            text.push(ch);
        }
        if crate::input::enter_pressed() {
            text.push('\n');
        }
        if crate::input::backspace_pressed() {
            text.pop();
        }
    }

    let rows = ((area.h - 4.0) / LINE_H).max(1.0) as usize;
    let lines = visible_lines(&text, rows, chars_that_fit(area.w - 8.0), active);
    let color = if active { ui::WHITE } else { ui::LIGHT_GRAY };
    for (i, line) in lines.iter().enumerate() {
        draw_ui_text(line, area.x + 4.0, area.y + 2.0 + i as f32 * LINE_H, color);
    }

    if active && super::input::cursor_visible() {
        let last = lines.last().map_or("", String::as_str);
        let cx = area.x + 4.0 + text_width(last) + 1.0;
        let cy = area.y + 2.0 + lines.len().saturating_sub(1) as f32 * LINE_H;
        draw_rectangle(cx, cy + 2.0, 1.0, LINE_H - 4.0, ui::YELLOW);
    }

    text
}

/// Lines of `text` that fit in `rows` rows of `max_chars` columns.
///
/// While editing the view follows the end of the text, where the cursor
/// is; otherwise it shows the beginning. Long lines are cut.
pub fn visible_lines(text: &str, rows: usize, max_chars: usize, follow_end: bool) -> Vec<String> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if rows == 0 {
        return Vec::new();
    }
    if lines.len() > rows {
        lines = if follow_end {
            lines.split_off(lines.len() - rows)
        } else {
            lines.truncate(rows);
            lines
        };
    }
    lines
        .into_iter()
        .map(|line| {
            if follow_end {
                super::input::tail(line, max_chars).to_string()
            } else {
                super::label::clip(line, max_chars)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::visible_lines;

    const RULES: &str = "X=F+[[X]-X]-F[-FX]+X\nF=FF\nY=X\nZ=Y";

    #[test]
    fn idle_view_shows_first_rows() {
        let lines = visible_lines(RULES, 2, 40, false);
        assert_eq!(lines, ["X=F+[[X]-X]-F[-FX]+X", "F=FF"]);
    }

    #[test]
    fn editing_view_follows_cursor() {
        let lines = visible_lines(RULES, 2, 40, true);
        assert_eq!(lines, ["Y=X", "Z=Y"]);
    }

    #[test]
    fn long_lines_are_cut() {
        let lines = visible_lines(RULES, 1, 8, false);
        assert_eq!(lines, ["X=F+[..."]);
        let lines = visible_lines("F=FFFFFFFFFF", 1, 4, true);
        assert_eq!(lines, ["FFFF"]);
    }

    #[test]
    fn trailing_newline_opens_empty_line() {
        let lines = visible_lines("F=FF\n", 4, 20, true);
        assert_eq!(lines, ["F=FF", ""]);
    }
}
