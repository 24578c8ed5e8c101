//! Immediate-mode widgets for the sidebar.
//!
//! Each widget draws itself and reports what the user did this frame; none
//! of them hold state. Focus and edit buffers live with the caller.

pub mod button;
pub mod checkbox;
pub mod input;
pub mod label;
pub mod select;
pub mod slider;
pub mod text_area;

use macroquad::prelude::*;

use crate::theme::ui;

/// Draw a 1-pixel bordered rectangle (border inside bounds).
pub fn bordered_rect(area: &Rect2, fill: Color, border: Color) {
    draw_rectangle(area.x, area.y, area.w, area.h, fill);
    draw_rectangle_lines(area.x, area.y, area.w, area.h, 1.0, border);
}

/// Horizontal separator line.
pub fn draw_separator(x: f32, y: f32, w: f32) {
    draw_rectangle(x, y, w, 1.0, ui::DARK_GRAY);
}

/// A simple rectangular area for layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2 {
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect2 {
    /// Create a new rect.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Check if a point is inside this rect.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Inset the rect by a margin on all sides.
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            x: self.x + margin,
            y: self.y + margin,
            w: (self.w - margin * 2.0).max(0.0),
            h: (self.h - margin * 2.0).max(0.0),
        }
    }

    /// Split horizontally at `fraction` of the width: (left, right).
    pub fn split_h(&self, fraction: f32) -> (Self, Self) {
        let left_w = self.w * fraction;
        (
            Self::new(self.x, self.y, left_w, self.h),
            Self::new(self.x + left_w, self.y, self.w - left_w, self.h),
        )
    }

    /// Split into `n` equal columns separated by `gap`.
    pub fn columns(&self, n: usize, gap: f32) -> Vec<Self> {
        if n == 0 {
            return Vec::new();
        }
        let w = ((self.w - gap * (n - 1) as f32) / n as f32).max(0.0);
        (0..n)
            .map(|i| Self::new(self.x + i as f32 * (w + gap), self.y, w, self.h))
            .collect()
    }
}

/// Top-to-bottom layout cursor over a column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    x: f32,
    y: f32,
    w: f32,
    gap: f32,
}

impl Column {
    /// Start laying out at the top of `area`.
    pub fn new(area: &Rect2, gap: f32) -> Self {
        Self {
            x: area.x,
            y: area.y,
            w: area.w,
            gap,
        }
    }

    /// Take the next row of height `h`.
    pub fn row(&mut self, h: f32) -> Rect2 {
        let r = Rect2::new(self.x, self.y, self.w, h);
        self.y += h + self.gap;
        r
    }

    /// Skip vertical space.
    pub fn space(&mut self, h: f32) {
        self.y += h;
    }

    /// The y of the next row.
    pub fn y(&self) -> f32 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect2::new(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(10.0, 10.0));
        assert!(!r.contains(30.0, 12.0));
        assert!(!r.contains(15.0, 15.0));
    }

    #[test]
    fn inset_never_goes_negative() {
        let r = Rect2::new(0.0, 0.0, 4.0, 4.0).inset(5.0);
        assert_eq!((r.w, r.h), (0.0, 0.0));
    }

    #[test]
    fn columns_share_width() {
        let cols = Rect2::new(0.0, 0.0, 100.0, 10.0).columns(3, 5.0);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].w, 30.0);
        assert_eq!(cols[2].x, 70.0);
    }

    #[test]
    fn column_stacks_rows() {
        let mut col = Column::new(&Rect2::new(5.0, 10.0, 50.0, 500.0), 4.0);
        let a = col.row(20.0);
        let b = col.row(10.0);
        assert_eq!(a.y, 10.0);
        assert_eq!(b.y, 34.0);
        assert_eq!(col.y(), 48.0);
    }
}
