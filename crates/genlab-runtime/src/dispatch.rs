//! Pointer events on the drawing surface, translated into process calls.

use crate::process::Process;

/// Which pointer button an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Usually the left button.
    #[default]
    Primary,
    /// Usually the right button. Available to processes because the
    /// surface suppresses the context menu.
    Secondary,
    /// Usually the wheel button.
    Middle,
}

/// A raw pointer event in client (window) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A button went down.
    Down {
        /// Client x.
        x: f32,
        /// Client y.
        y: f32,
        /// The button pressed.
        button: PointerButton,
    },
    /// The pointer moved.
    Move {
        /// Client x.
        x: f32,
        /// Client y.
        y: f32,
    },
    /// A button went up.
    Up {
        /// Client x.
        x: f32,
        /// Client y.
        y: f32,
    },
    /// The host is about to open a context menu on the surface.
    ContextMenu,
}

/// Placement of the drawing surface: where it is displayed and how large
/// its backing store is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// Client x of the surface's left edge.
    pub left: f32,
    /// Client y of the surface's top edge.
    pub top: f32,
    /// Displayed width.
    pub display_width: f32,
    /// Displayed height.
    pub display_height: f32,
    /// Backing-store width in pixels.
    pub backing_width: u32,
    /// Backing-store height in pixels.
    pub backing_height: u32,
}

impl SurfaceGeometry {
    /// A surface displayed at its backing resolution at the client origin.
    pub fn unscaled(width: u32, height: u32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            display_width: width as f32,
            display_height: height as f32,
            backing_width: width,
            backing_height: height,
        }
    }

    /// Convert a client position into backing-store coordinates.
    ///
    /// A zero-sized display maps everything to the surface origin.
    pub fn to_backing(&self, client_x: f32, client_y: f32) -> (f32, f32) {
        let scale_x = scale(self.backing_width, self.display_width);
        let scale_y = scale(self.backing_height, self.display_height);
        (
            (client_x - self.left) * scale_x,
            (client_y - self.top) * scale_y,
        )
    }

    /// Whether a client position lies over the displayed surface.
    pub fn contains(&self, client_x: f32, client_y: f32) -> bool {
        client_x >= self.left
            && client_x < self.left + self.display_width
            && client_y >= self.top
            && client_y < self.top + self.display_height
    }
}

fn scale(backing: u32, display: f32) -> f32 {
    if display > 0.0 {
        backing as f32 / display
    } else {
        0.0
    }
}

/// What the host should do after an event was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerResponse {
    /// The process may have changed; request a render.
    pub redraw: bool,
    /// Suppress the host's default handling (the context menu).
    pub consume_default: bool,
}

/// Tracks the pointer-down flag and forwards drags to the live process.
#[derive(Debug, Default)]
pub struct PointerDispatcher {
    down: bool,
}

impl PointerDispatcher {
    /// A dispatcher with the pointer up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a button is currently held on the surface.
    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Forget any held button, e.g. when the process is replaced.
    pub fn release(&mut self) {
        self.down = false;
    }

    /// Dispatch one event to `process`, if any.
    pub fn dispatch(
        &mut self,
        event: PointerEvent,
        geometry: &SurfaceGeometry,
        process: Option<&mut dyn Process>,
    ) -> PointerResponse {
        match event {
            PointerEvent::ContextMenu => PointerResponse {
                redraw: false,
                consume_default: true,
            },
            PointerEvent::Down { x, y, button } => {
                let Some(input) = process.and_then(|p| p.pointer_input()) else {
                    return PointerResponse::default();
                };
                let (px, py) = geometry.to_backing(x, y);
                self.down = true;
                input.pointer_down(px, py, button);
                redraw()
            }
            PointerEvent::Move { x, y } => {
                if !self.down {
                    return PointerResponse::default();
                }
                let Some(input) = process.and_then(|p| p.pointer_input()) else {
                    return PointerResponse::default();
                };
                let (px, py) = geometry.to_backing(x, y);
                input.pointer_move(px, py);
                redraw()
            }
            PointerEvent::Up { x, y } => {
                let was_down = std::mem::take(&mut self.down);
                if !was_down {
                    return PointerResponse::default();
                }
                if let Some(input) = process.and_then(|p| p.pointer_input()) {
                    let (px, py) = geometry.to_backing(x, y);
                    input.pointer_up(px, py);
                }
                redraw()
            }
        }
    }
}

fn redraw() -> PointerResponse {
    PointerResponse {
        redraw: true,
        consume_default: false,
    }
}
