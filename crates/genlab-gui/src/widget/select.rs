//! Cycling selector: `< option >`, click either half to move through the
//! options.

use macroquad::prelude::*;

use super::Rect2;
use crate::theme::{LINE_H, draw_ui_text, text_width, ui};

/// Draw a selector showing `options[selected]` and return the newly chosen
/// index if the user moved it this frame.
pub fn draw_select(options: &[&str], selected: usize, area: &Rect2, mouse: (f32, f32)) -> Option<usize> {
    let hovered = area.contains(mouse.0, mouse.1);
    super::bordered_rect(
        area,
        ui::DARK_BLUE,
        if hovered { ui::YELLOW } else { ui::LIGHT_GRAY },
    );

    let ty = area.y + (area.h - LINE_H) / 2.0;
    draw_ui_text("<", area.x + 6.0, ty, ui::LIGHT_GRAY);
    draw_ui_text(">", area.x + area.w - 14.0, ty, ui::LIGHT_GRAY);
    let current = options.get(selected).copied().unwrap_or("");
    let label = super::label::clip(current, crate::theme::chars_that_fit(area.w - 36.0));
    let tx = area.x + (area.w - text_width(&label)) / 2.0;
    draw_ui_text(&label, tx.max(area.x + 18.0), ty, ui::WHITE);

    if !(hovered && is_mouse_button_pressed(MouseButton::Left)) {
        return None;
    }
    let forward = mouse.0 >= area.x + area.w / 2.0;
    cycle(selected, options.len(), forward)
}

/// The index after (or before) `index` in a ring of `len`, or `None` when
/// there is nothing to move to.
pub fn cycle(index: usize, len: usize, forward: bool) -> Option<usize> {
    if len < 2 {
        return None;
    }
    let index = index.min(len - 1);
    Some(if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    })
}

#[cfg(test)]
mod tests {
    use super::cycle;

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(cycle(4, 5, true), Some(0));
        assert_eq!(cycle(0, 5, false), Some(4));
        assert_eq!(cycle(2, 5, true), Some(3));
    }

    #[test]
    fn cycle_needs_two_options() {
        assert_eq!(cycle(0, 1, true), None);
        assert_eq!(cycle(0, 0, false), None);
    }
}
