//! Visual theme: interface colors, layout constants, text helpers and the
//! canvas palettes.

pub mod palettes;

use macroquad::prelude::*;

/// Initial window width.
pub const WINDOW_W: i32 = 1180;
/// Initial window height.
pub const WINDOW_H: i32 = 760;

/// Width of the control sidebar.
pub const SIDEBAR_W: f32 = 280.0;
/// Outer margin around the canvas and inside the sidebar.
pub const MARGIN: f32 = 12.0;
/// Height of one control row.
pub const ROW_H: f32 = 24.0;
/// Vertical gap between rows.
pub const GAP: f32 = 6.0;

/// Font size of interface text.
pub const FONT_SIZE: u16 = 18;
/// Height of one line of interface text.
pub const LINE_H: f32 = 18.0;

/// Interface colors.
pub mod ui {
    use macroquad::prelude::Color;

    /// Window background.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Sidebar and widget fill.
    pub const DARK_BLUE: Color = Color::new(0.114, 0.169, 0.326, 1.0);
    /// Inactive borders and separators.
    pub const DARK_GRAY: Color = Color::new(0.373, 0.341, 0.310, 1.0);
    /// Borders and secondary text.
    pub const LIGHT_GRAY: Color = Color::new(0.761, 0.765, 0.780, 1.0);
    /// Primary text.
    pub const WHITE: Color = Color::new(1.0, 0.945, 0.910, 1.0);
    /// Errors.
    pub const RED: Color = Color::new(1.0, 0.0, 0.302, 1.0);
    /// Hover and focus highlight.
    pub const YELLOW: Color = Color::new(1.0, 0.925, 0.153, 1.0);
    /// Running indicator.
    pub const GREEN: Color = Color::new(0.0, 0.894, 0.212, 1.0);
    /// Slider fill.
    pub const BLUE: Color = Color::new(0.161, 0.678, 1.0, 1.0);
}

/// Draw interface text with its top-left corner at `(x, y)`.
pub fn draw_ui_text(text: &str, x: f32, y: f32, color: Color) {
    // draw_text positions the baseline.
    draw_text(text, x, y + LINE_H * 0.75, f32::from(FONT_SIZE), color);
}

/// Rendered width of `text` in interface font.
pub fn text_width(text: &str) -> f32 {
    measure_text(text, None, FONT_SIZE, 1.0).width
}

/// Approximate number of characters that fit in `width`.
pub fn chars_that_fit(width: f32) -> usize {
    (width / (f32::from(FONT_SIZE) * 0.5)).max(0.0) as usize
}
