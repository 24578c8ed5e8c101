//! Runtime for GenLab, an interactive laboratory for generative processes.
//!
//! A [`Process`] is any stepwise system that evolves a visual state:
//! cellular automata, rewriting systems, agent swarms. The runtime knows
//! nothing about what a process computes. It owns the registry processes
//! are created from, the frame-driven scheduler, pointer dispatch and the
//! [`Lab`] lifecycle controller that ties them to a [`Renderer`] supplied
//! by the host.

/// Configuration for a lab session.
pub mod config;
/// Pointer events and surface geometry.
pub mod dispatch;
/// Error types for the runtime.
pub mod error;
/// The lifecycle controller.
pub mod lab;
/// Parameter-panel instructions.
pub mod panel;
/// Parameter descriptors, values and storage.
pub mod param;
/// The process contract and its optional capabilities.
pub mod process;
/// Identifier-to-constructor registry.
pub mod registry;
/// The rendering contract.
pub mod render;
/// Frame-driven stepping, render coalescing and debouncing.
pub mod scheduler;
/// Read-only views of process state for renderers.
pub mod view;

/// Re-export of [`config::LabConfig`].
pub use config::LabConfig;
/// Re-exports of dispatch types.
pub use dispatch::{PointerButton, PointerDispatcher, PointerEvent, PointerResponse, SurfaceGeometry};
/// Re-exports of [`error::LabError`] and [`error::LabResult`].
pub use error::{LabError, LabResult};
/// Re-exports of the lifecycle controller and its readouts.
pub use lab::{FrameReport, Lab, LabInfo, LabStatus};
/// Re-exports of [`panel::PanelUpdate`] and [`panel::ParamSnapshot`].
pub use panel::{PanelUpdate, ParamSnapshot};
/// Re-exports of parameter types.
pub use param::{ParamDescriptor, ParamKind, ParamStore, ParamValue};
/// Re-exports of the process contract and capabilities.
pub use process::{
    Actionable, NullProcess, PointerInput, Process, ProcessInstance, Resizable, Teardown,
};
/// Re-exports of registry types.
pub use registry::{Creation, ProcessRegistry, RegistryEntry, Spawn};
/// Re-exports of [`render::Renderer`] and [`render::NullRenderer`].
pub use render::{NullRenderer, Renderer};
/// Re-exports of scheduler types.
pub use scheduler::{Debounce, RunState, Scheduler};
/// Re-exports of view types.
pub use view::{Segment, SurfaceView, VisualizationHints, VisualizationParams};
