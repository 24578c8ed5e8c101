//! Draws process views into an offscreen backing store.
//!
//! The backing store is a render target sized in backing pixels; the host
//! stretches it over the canvas area every frame. Dense fields go through
//! a CPU pixel buffer uploaded as one texture when the process asks for it,
//! and fall back to one rectangle per sample otherwise.

use macroquad::prelude::*;
use tracing::debug;

use genlab_runtime::{
    Process, Renderer, Segment, SurfaceView, VisualizationHints, VisualizationParams,
};

use crate::theme::palettes::{self, Palette};
use crate::widget::Rect2;

/// CPU image plus the texture it is uploaded to.
struct PixelBuffer {
    image: Image,
    texture: Texture2D,
}

impl PixelBuffer {
    fn new(width: u16, height: u16) -> Self {
        let image = Image::gen_image_color(width, height, BLACK);
        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Linear);
        Self { image, texture }
    }

    fn fits(&self, width: usize, height: usize) -> bool {
        usize::from(self.image.width) == width && usize::from(self.image.height) == height
    }
}

/// Macroquad implementation of [`Renderer`].
pub struct CanvasRenderer {
    target: Option<RenderTarget>,
    width: u32,
    height: u32,
    palette: &'static Palette,
    grid_enabled: bool,
    hints: VisualizationHints,
    pixels: Option<PixelBuffer>,
    wants_pixels: bool,
}

impl std::fmt::Debug for CanvasRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasRenderer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("palette", &self.palette.name)
            .field("grid_enabled", &self.grid_enabled)
            .field("pixel_buffer", &self.pixels.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasRenderer {
    /// A renderer with no backing store yet; the first `resize` creates it.
    pub fn new() -> Self {
        Self {
            target: None,
            width: 0,
            height: 0,
            palette: palettes::palette("classic"),
            grid_enabled: false,
            hints: VisualizationHints::default(),
            pixels: None,
            wants_pixels: false,
        }
    }

    /// Name of the palette currently in use.
    pub fn palette_name(&self) -> &'static str {
        self.palette.name
    }

    /// Stretch the backing store over `area` of the window.
    pub fn present(&self, area: &Rect2) {
        match &self.target {
            Some(target) => draw_texture_ex(
                &target.texture,
                area.x,
                area.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(area.w, area.h)),
                    ..Default::default()
                },
            ),
            None => draw_rectangle(area.x, area.y, area.w, area.h, self.palette.background),
        }
    }

    /// Point the camera at the backing store. Returns false without one.
    fn begin(&self) -> bool {
        let Some(target) = &self.target else {
            return false;
        };
        let (w, h) = (self.width as f32, self.height as f32);
        set_camera(&Camera2D {
            zoom: vec2(2.0 / w, 2.0 / h),
            target: vec2(w / 2.0, h / 2.0),
            render_target: Some(target.clone()),
            ..Default::default()
        });
        true
    }

    fn end(&self) {
        set_default_camera();
    }

    fn draw_cells(&self, cols: usize, rows: usize, cell_size: f32, states: &[u8]) {
        for (i, &state) in states.iter().enumerate().take(cols * rows) {
            if state == 0 {
                continue;
            }
            let (c, r) = (i % cols, i / cols);
            draw_rectangle(
                c as f32 * cell_size,
                r as f32 * cell_size,
                cell_size,
                cell_size,
                self.palette.cell(state),
            );
        }
        if self.grid_enabled && self.hints.supports_grid && cell_size >= 4.0 {
            let (w, h) = (cols as f32 * cell_size, rows as f32 * cell_size);
            for c in 0..=cols {
                let x = c as f32 * cell_size;
                draw_line(x, 0.0, x, h, 1.0, self.palette.grid);
            }
            for r in 0..=rows {
                let y = r as f32 * cell_size;
                draw_line(0.0, y, w, y, 1.0, self.palette.grid);
            }
        }
    }

    fn draw_segments(&self, segments: &[Segment]) {
        let max_depth = segments.iter().map(|s| s.depth).max().unwrap_or(0);
        for s in segments {
            draw_line(
                s.x0,
                s.y0,
                s.x1,
                s.y1,
                1.0,
                self.palette.branch(s.depth, max_depth),
            );
        }
    }

    fn draw_field(&mut self, width: usize, height: usize, values: &[f32]) {
        if width == 0 || height == 0 {
            return;
        }
        let dest = vec2(self.width as f32, self.height as f32);
        if !self.wants_pixels {
            let (sx, sy) = (dest.x / width as f32, dest.y / height as f32);
            for (i, &v) in values.iter().enumerate().take(width * height) {
                if v <= 0.0 {
                    continue;
                }
                let (c, r) = (i % width, i / width);
                draw_rectangle(c as f32 * sx, r as f32 * sy, sx, sy, self.palette.shade(v));
            }
            return;
        }

        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return;
        };
        if !self.pixels.as_ref().is_some_and(|p| p.fits(width, height)) {
            debug!(width, height, "allocating pixel buffer");
            self.pixels = Some(PixelBuffer::new(w, h));
        }
        if let Some(pixels) = &mut self.pixels {
            fill_rgba(values, self.palette, &mut pixels.image.bytes);
            pixels.texture.update(&pixels.image);
            draw_texture_ex(
                &pixels.texture,
                0.0,
                0.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(dest),
                    ..Default::default()
                },
            );
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, process: &dyn Process) {
        if !self.begin() {
            return;
        }
        clear_background(self.palette.background);
        match process.view() {
            SurfaceView::Empty => {}
            SurfaceView::Cells {
                cols,
                rows,
                cell_size,
                states,
            } => self.draw_cells(cols, rows, cell_size, states),
            SurfaceView::Segments { segments } => self.draw_segments(segments),
            SurfaceView::Field {
                width,
                height,
                values,
            } => self.draw_field(width, height, values),
        }
        self.end();
    }

    fn clear(&mut self) {
        if self.begin() {
            clear_background(self.palette.background);
            self.end();
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return;
        }
        debug!(width, height, "resizing backing store");
        let target = render_target(width, height);
        target.texture.set_filter(FilterMode::Nearest);
        self.target = Some(target);
        self.width = width;
        self.height = height;
        self.clear();
    }

    fn set_visualization_params(&mut self, params: &VisualizationParams) {
        self.palette = palettes::palette(&params.palette);
        self.grid_enabled = params.grid_enabled;
    }

    fn update_hints(&mut self, hints: &VisualizationHints) {
        if let Some(name) = &hints.palette {
            self.palette = palettes::palette(name);
        }
        if !hints.pixel_buffer {
            self.wants_pixels = false;
            self.pixels = None;
        }
        self.hints = hints.clone();
    }

    fn prepare_pixel_buffer(&mut self) {
        // Sized on first use, when the field dimensions are known.
        self.wants_pixels = true;
    }
}

/// Write `values` as RGBA8 pixels shaded with `palette` into `bytes`.
///
/// Stops at whichever runs out first, the samples or the buffer.
pub fn fill_rgba(values: &[f32], palette: &Palette, bytes: &mut [u8]) {
    for (px, &v) in bytes.chunks_exact_mut(4).zip(values) {
        let c = palette.shade(v);
        px[0] = channel(c.r);
        px[1] = channel(c.g);
        px[2] = channel(c.b);
        px[3] = 255;
    }
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_writes_opaque_shaded_pixels() {
        let mono = palettes::palette("mono");
        let mut bytes = vec![7u8; 12];
        fill_rgba(&[0.0, 1.0, 0.5], mono, &mut bytes);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 255]);
        assert_eq!(&bytes[4..8], &[255, 255, 255, 255]);
        assert_eq!(&bytes[8..12], &[128, 128, 128, 255]);
    }

    #[test]
    fn fill_stops_at_shorter_input() {
        let mono = palettes::palette("mono");
        let mut bytes = vec![7u8; 8];
        fill_rgba(&[1.0], mono, &mut bytes);
        assert_eq!(&bytes[4..8], &[7, 7, 7, 7]);
    }

    #[test]
    fn channel_clamps() {
        assert_eq!(channel(-1.0), 0);
        assert_eq!(channel(2.0), 255);
    }
}
