use serde::{Deserialize, Serialize};

/// A line segment in surface coordinates, produced by rewriting systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start x.
    pub x0: f32,
    /// Start y.
    pub y0: f32,
    /// End x.
    pub x1: f32,
    /// End y.
    pub y1: f32,
    /// Branch depth, used by renderers to shade nested structure.
    pub depth: u16,
}

/// Read-only view of process state handed to renderers.
///
/// The runtime never looks inside; it only passes the view along.
#[derive(Debug, Clone, Copy)]
pub enum SurfaceView<'a> {
    /// Nothing to draw.
    Empty,
    /// A dense grid of small integer cell states (0 = empty).
    Cells {
        /// Number of columns.
        cols: usize,
        /// Number of rows.
        rows: usize,
        /// Edge length of one cell in backing-store pixels.
        cell_size: f32,
        /// Row-major cell states, `cols * rows` long.
        states: &'a [u8],
    },
    /// A set of line segments.
    Segments {
        /// The segments to stroke.
        segments: &'a [Segment],
    },
    /// A dense scalar field in `0.0..=1.0`, stretched over the surface.
    Field {
        /// Field width in samples.
        width: usize,
        /// Field height in samples.
        height: usize,
        /// Row-major samples, `width * height` long.
        values: &'a [f32],
    },
}

/// Hints a process offers to the renderer. Opaque to the runtime apart
/// from `pixel_buffer`, which selects the renderer's dense-field path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualizationHints {
    /// The process draws a dense field and wants a pixel buffer.
    pub pixel_buffer: bool,
    /// Preferred palette name, if the process has one.
    pub palette: Option<String>,
    /// Whether grid lines make sense for this process.
    pub supports_grid: bool,
}

/// User-selected presentation settings forwarded to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationParams {
    /// Draw cell grid lines.
    pub grid_enabled: bool,
    /// Palette name.
    pub palette: String,
}

impl Default for VisualizationParams {
    fn default() -> Self {
        Self {
            grid_enabled: false,
            palette: "classic".to_string(),
        }
    }
}
