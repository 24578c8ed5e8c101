use crate::dispatch::PointerButton;
use crate::param::{ParamDescriptor, ParamValue};
use crate::view::{SurfaceView, VisualizationHints};

/// A generative process: one live simulation the lab can step, reset and
/// draw.
///
/// The required methods form the contract every process kind satisfies.
/// Optional behavior is exposed through capability accessors
/// ([`Process::pointer_input`], [`Process::resizable`], [`Process::actions`],
/// [`Process::teardown`]) that return `None` unless a process opts in.
/// Callers query the capability once at the call site and skip the behavior
/// when it is absent.
pub trait Process: std::fmt::Debug {
    /// Human-readable name for this process.
    fn name(&self) -> &str;

    /// Advance by exactly one generation and increment the iteration counter.
    fn step(&mut self);

    /// Reinitialize state and set the iteration counter back to 0.
    ///
    /// With `randomize == false` the process produces a deterministic blank
    /// configuration.
    fn reset(&mut self, randomize: bool);

    /// Ordered parameter declarations.
    fn parameters(&self) -> &[ParamDescriptor] {
        &[]
    }

    /// Current value of a declared parameter.
    fn param_value(&self, _id: &str) -> Option<ParamValue> {
        None
    }

    /// Store a new value for a declared parameter. Undeclared ids are
    /// ignored; malformed values are clamped or ignored by the process.
    fn set_param_value(&mut self, _id: &str, _value: ParamValue) {}

    /// Number of generations since the last reset.
    fn iteration(&self) -> u64;

    /// Process-defined population metric, or `None` if it has none.
    fn population(&self) -> Option<f64>;

    /// State view for renderers.
    fn view(&self) -> SurfaceView<'_> {
        SurfaceView::Empty
    }

    /// Hints for the renderer.
    fn visualization_hints(&self) -> Option<VisualizationHints> {
        None
    }

    /// Pointer interaction capability.
    fn pointer_input(&mut self) -> Option<&mut dyn PointerInput> {
        None
    }

    /// Surface resize capability.
    fn resizable(&mut self) -> Option<&mut dyn Resizable> {
        None
    }

    /// Action-button capability.
    fn actions(&mut self) -> Option<&mut dyn Actionable> {
        None
    }

    /// Teardown capability.
    fn teardown(&mut self) -> Option<&mut dyn Teardown> {
        None
    }
}

/// Receives pointer events in backing-store coordinates.
pub trait PointerInput {
    /// A button was pressed at `(x, y)`.
    fn pointer_down(&mut self, x: f32, y: f32, button: PointerButton);
    /// The pointer moved to `(x, y)` while a button is held.
    fn pointer_move(&mut self, x: f32, y: f32);
    /// The button was released at `(x, y)`, possibly outside the surface.
    fn pointer_up(&mut self, x: f32, y: f32);
}

/// Reacts to a change of the drawing surface size.
pub trait Resizable {
    /// The backing store is now `width` x `height` pixels.
    fn on_resize(&mut self, width: u32, height: u32);
}

/// Handles activation of action-button parameters.
pub trait Actionable {
    /// The action parameter `id` was activated.
    fn trigger_action(&mut self, id: &str);
}

/// Releases resources before the process is discarded.
pub trait Teardown {
    /// Called once, right before the lab drops the process.
    fn destroy(&mut self);
}

/// The stand-in process returned for identifiers the registry doesn't know.
///
/// Counts iterations and does nothing else.
#[derive(Debug, Default)]
pub struct NullProcess {
    iteration: u64,
}

impl NullProcess {
    /// Create a fresh stub.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Process for NullProcess {
    fn name(&self) -> &str {
        "Unknown"
    }

    fn step(&mut self) {
        self.iteration += 1;
    }

    fn reset(&mut self, _randomize: bool) {
        self.iteration = 0;
    }

    fn iteration(&self) -> u64 {
        self.iteration
    }

    fn population(&self) -> Option<f64> {
        None
    }
}

/// A live process together with the identifier it was created under.
#[derive(Debug)]
pub struct ProcessInstance {
    id: String,
    process: Box<dyn Process>,
}

impl ProcessInstance {
    /// Pair a process with its identifier.
    pub fn new(id: impl Into<String>, process: Box<dyn Process>) -> Self {
        Self {
            id: id.into(),
            process,
        }
    }

    /// The identifier this instance was created under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Shared access to the process.
    pub fn process(&self) -> &dyn Process {
        self.process.as_ref()
    }

    /// Exclusive access to the process.
    pub fn process_mut(&mut self) -> &mut dyn Process {
        self.process.as_mut()
    }

    /// Run the teardown hook if the process has one.
    pub fn destroy(&mut self) {
        if let Some(teardown) = self.process.teardown() {
            teardown.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_process_counts_steps() {
        let mut p = NullProcess::new();
        p.step();
        p.step();
        assert_eq!(p.iteration(), 2);
        p.reset(true);
        assert_eq!(p.iteration(), 0);
        assert!(p.population().is_none());
    }

    #[test]
    fn null_process_has_no_capabilities() {
        let mut p = NullProcess::new();
        assert!(p.parameters().is_empty());
        assert!(p.param_value("anything").is_none());
        p.set_param_value("anything", ParamValue::Number(1.0));
        assert!(p.pointer_input().is_none());
        assert!(p.resizable().is_none());
        assert!(p.actions().is_none());
        assert!(p.teardown().is_none());
        assert!(p.visualization_hints().is_none());
        assert!(matches!(p.view(), SurfaceView::Empty));
    }

    #[test]
    fn instance_destroy_skips_missing_hook() {
        let mut instance = ProcessInstance::new("stub", Box::new(NullProcess::new()));
        instance.destroy();
        assert_eq!(instance.id(), "stub");
        assert_eq!(instance.process().name(), "Unknown");
    }
}
