//! Interactive host for GenLab, built on macroquad.
//!
//! The window is split into a control sidebar and a canvas showing the
//! live process. All process lifecycle and timing is delegated to
//! [`genlab_runtime::Lab`]; this crate supplies the renderer, the widgets
//! and the mapping from window input to lab calls.

pub mod app;
pub mod input;
pub mod panel;
pub mod renderer;
pub mod sidebar;
pub mod theme;
pub mod widget;
