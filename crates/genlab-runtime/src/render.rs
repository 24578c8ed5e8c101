use crate::process::Process;
use crate::view::{VisualizationHints, VisualizationParams};

/// Turns process state into pixels.
///
/// The lab only sequences these calls; it never inspects what a renderer
/// draws.
pub trait Renderer {
    /// Draw the current state of `process`.
    fn render(&mut self, process: &dyn Process);

    /// Blank the surface.
    fn clear(&mut self);

    /// The backing store is now `width` x `height` pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Apply user-selected presentation settings.
    fn set_visualization_params(&mut self, params: &VisualizationParams);

    /// Apply hints offered by the live process.
    fn update_hints(&mut self, hints: &VisualizationHints);

    /// Allocate the pixel buffer used for dense fields.
    fn prepare_pixel_buffer(&mut self) {}
}

/// A renderer that draws nothing, for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _process: &dyn Process) {}
    fn clear(&mut self) {}
    fn resize(&mut self, _width: u32, _height: u32) {}
    fn set_visualization_params(&mut self, _params: &VisualizationParams) {}
    fn update_hints(&mut self, _hints: &VisualizationHints) {}
}
