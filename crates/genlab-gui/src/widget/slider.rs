//! Horizontal slider over a numeric range.

use macroquad::prelude::*;

use super::Rect2;
use crate::theme::ui;

/// Draw a slider and return the new value while it is being dragged.
pub fn draw_slider(
    value: f64,
    range: (f64, f64),
    step: f64,
    area: &Rect2,
    mouse: (f32, f32),
) -> Option<f64> {
    let (min, max) = range;
    let hovered = area.contains(mouse.0, mouse.1);

    let track = Rect2::new(area.x, area.y + area.h / 2.0 - 3.0, area.w, 6.0);
    super::bordered_rect(&track, ui::BLACK, if hovered { ui::YELLOW } else { ui::DARK_GRAY });
    let fill_w = track.w * fraction(value, min, max) as f32;
    draw_rectangle(track.x, track.y, fill_w, track.h, ui::BLUE);
    draw_rectangle(track.x + fill_w - 3.0, area.y + 2.0, 6.0, area.h - 4.0, ui::WHITE);

    if !(hovered && is_mouse_button_down(MouseButton::Left)) {
        return None;
    }
    let next = value_at(mouse.0 - area.x, area.w, min, max, step);
    (next != value).then_some(next)
}

/// Position of `value` along `min..=max`, in `0.0..=1.0`.
pub fn fraction(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Value under offset `dx` of a track `width` wide, snapped to `step`.
pub fn value_at(dx: f32, width: f32, min: f64, max: f64, step: f64) -> f64 {
    if width <= 0.0 || max <= min {
        return min;
    }
    let t = f64::from((dx / width).clamp(0.0, 1.0));
    let raw = min + t * (max - min);
    if step > 0.0 {
        (min + ((raw - min) / step).round() * step).clamp(min, max)
    } else {
        raw
    }
}
