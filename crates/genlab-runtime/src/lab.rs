use std::time::Duration;

use crate::config::LabConfig;
use crate::dispatch::{PointerDispatcher, PointerEvent, PointerResponse, SurfaceGeometry};
use crate::panel::PanelUpdate;
use crate::param::{ParamKind, ParamValue};
use crate::process::ProcessInstance;
use crate::registry::{Creation, ProcessRegistry};
use crate::render::Renderer;
use crate::scheduler::{Debounce, RunState, Scheduler};
use crate::view::VisualizationParams;

/// Whether the lab currently has a process to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabStatus {
    /// A process is live.
    Active,
    /// No process is live, e.g. after a constructor failed.
    NoProcess {
        /// What to show the user.
        message: String,
    },
}

/// Display readout of the live process and scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct LabInfo {
    /// Identifier of the live process.
    pub id: Option<String>,
    /// Display name, or "No process".
    pub name: String,
    /// Iteration counter.
    pub iteration: u64,
    /// Population metric, if the process has one.
    pub population: Option<f64>,
    /// Run state.
    pub state: RunState,
    /// Steps per second.
    pub rate: u32,
}

/// What happened during one [`Lab::frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// A debounced resize was applied.
    pub resized: bool,
    /// The live process advanced one step.
    pub stepped: bool,
    /// The renderer drew the live process.
    pub rendered: bool,
}

/// The lifecycle controller.
///
/// Owns the registry, scheduler, pointer dispatcher, renderer and the one
/// live process, and is the only place the live process is replaced.
/// Hosts call [`Lab::frame`] once per display frame and route user intents
/// through the other methods.
pub struct Lab<R: Renderer> {
    registry: ProcessRegistry,
    scheduler: Scheduler,
    dispatcher: PointerDispatcher,
    geometry: SurfaceGeometry,
    backing_scale: f32,
    resize: Debounce<(f32, f32)>,
    renderer: Option<R>,
    current: Option<ProcessInstance>,
    status: LabStatus,
    visualization: VisualizationParams,
    /// Palette the live process asked for, until the user picks one.
    hinted_palette: Option<String>,
    panel_update: Option<PanelUpdate>,
    initial_process: String,
}

impl<R: Renderer> std::fmt::Debug for Lab<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lab")
            .field("process", &self.current.as_ref().map(|c| c.id()))
            .field("status", &self.status)
            .field("state", &self.scheduler.state())
            .field("geometry", &self.geometry)
            .finish()
    }
}

impl<R: Renderer> Lab<R> {
    /// Create a lab with no live process. Call [`Lab::start`] or
    /// [`Lab::switch_to`] to load one.
    pub fn new(mut registry: ProcessRegistry, config: &LabConfig, mut renderer: R) -> Self {
        if let Some(seed) = config.seed {
            registry.reseed(seed);
        }
        let geometry = SurfaceGeometry::unscaled(config.width, config.height);
        renderer.resize(geometry.backing_width, geometry.backing_height);
        renderer.set_visualization_params(&config.visualization);
        Self {
            registry,
            scheduler: Scheduler::new(config.rate, config.min_rate, config.max_rate),
            dispatcher: PointerDispatcher::new(),
            geometry,
            backing_scale: config.backing_scale,
            resize: Debounce::new(config.resize_quiet()),
            renderer: Some(renderer),
            current: None,
            status: LabStatus::NoProcess {
                message: "No process loaded".to_string(),
            },
            visualization: config.visualization.clone(),
            hinted_palette: None,
            panel_update: None,
            initial_process: config.initial_process.clone(),
        }
    }

    /// Load the configured initial process.
    pub fn start(&mut self) -> bool {
        let id = self.initial_process.clone();
        self.switch_to(&id)
    }

    /// Replace the live process with a new instance of `id`.
    ///
    /// Pauses first and tears the outgoing process down before the new one
    /// is constructed. Returns `false` if construction failed, in which case
    /// the lab is left without a process.
    pub fn switch_to(&mut self, id: &str) -> bool {
        tracing::info!("loading process: {id}");
        self.scheduler.pause();
        self.dispatcher.release();
        if let Some(mut outgoing) = self.current.take() {
            outgoing.destroy();
        }

        let creation = self.registry.create(
            id,
            self.geometry.backing_width,
            self.geometry.backing_height,
        );
        let mut instance = match creation {
            Creation::Created(instance) | Creation::Fallback(instance) => instance,
            Creation::Failed { id, error } => {
                let message = format!("Error loading process '{id}': {error}");
                self.status = LabStatus::NoProcess {
                    message: message.clone(),
                };
                self.panel_update = Some(PanelUpdate::Unavailable { message });
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.clear();
                }
                return false;
            }
        };

        instance.process_mut().reset(true);
        self.panel_update = Some(PanelUpdate::populate(instance.process()));
        let hints = instance.process().visualization_hints();
        self.hinted_palette = hints.as_ref().and_then(|h| h.palette.clone());
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_visualization_params(&self.visualization);
            if let Some(hints) = hints {
                renderer.update_hints(&hints);
                if hints.pixel_buffer {
                    renderer.prepare_pixel_buffer();
                }
            }
        }
        self.current = Some(instance);
        self.status = LabStatus::Active;
        self.scheduler.request_render();
        true
    }

    /// Pause and reinitialize the live process with a random configuration.
    pub fn reset(&mut self) {
        let Some(instance) = self.current.as_mut() else {
            return;
        };
        self.scheduler.pause();
        instance.process_mut().reset(true);
        self.scheduler.request_render();
        tracing::info!("simulation reset");
    }

    /// Pause, blank the surface and reinitialize the live process to its
    /// empty configuration.
    pub fn clear(&mut self) {
        let Some(instance) = self.current.as_mut() else {
            return;
        };
        self.scheduler.pause();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.clear();
        }
        instance.process_mut().reset(false);
        self.scheduler.request_render();
        tracing::info!("simulation cleared");
    }

    /// Advance the live process by one step, whether running or paused.
    pub fn step_once(&mut self) {
        if let Some(instance) = self.current.as_mut() {
            instance.process_mut().step();
            self.scheduler.request_render();
        }
    }

    /// Flip between running and paused.
    pub fn toggle_play_pause(&mut self) -> RunState {
        let state = self.scheduler.toggle();
        tracing::info!("simulation {state}");
        state
    }

    /// Force the paused state.
    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    /// Change the automatic step rate.
    pub fn set_rate(&mut self, rate: u32) {
        self.scheduler.set_rate(rate);
    }

    /// Ask for a redraw on the next frame.
    pub fn request_render(&mut self) {
        self.scheduler.request_render();
    }

    /// Stop the frame loop for good.
    pub fn stop(&mut self) {
        tracing::info!("stopping frame loop");
        self.scheduler.stop();
    }

    /// Move the displayed surface without changing its size.
    pub fn place_surface(&mut self, left: f32, top: f32) {
        self.geometry.left = left;
        self.geometry.top = top;
    }

    /// Note that the surface container now measures `width` x `height`
    /// display units. Handled once requests stop arriving for the quiet
    /// period.
    pub fn request_resize(&mut self, width: f32, height: f32, now: Duration) {
        self.resize.request((width, height), now);
    }

    /// Resize immediately, bypassing the debounce.
    pub fn apply_resize(&mut self, width: f32, height: f32) {
        let backing_width = backing_extent(width, self.backing_scale);
        let backing_height = backing_extent(height, self.backing_scale);
        self.geometry.display_width = width.max(0.0);
        self.geometry.display_height = height.max(0.0);
        self.geometry.backing_width = backing_width;
        self.geometry.backing_height = backing_height;
        tracing::info!("surface resized to {backing_width}x{backing_height}");

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(backing_width, backing_height);
        }
        if let Some(resizable) = self
            .current
            .as_mut()
            .and_then(|c| c.process_mut().resizable())
        {
            resizable.on_resize(backing_width, backing_height);
        }
        self.scheduler.request_render();
    }

    /// Run one host frame: pending resize, at most one step, then at most
    /// one draw of the resulting state.
    pub fn frame(&mut self, now: Duration) -> FrameReport {
        let mut report = FrameReport::default();
        if self.scheduler.is_stopped() {
            return report;
        }

        if let Some((width, height)) = self.resize.poll(now) {
            self.apply_resize(width, height);
            report.resized = true;
        }

        if self.scheduler.on_frame(now) {
            if let Some(instance) = self.current.as_mut() {
                instance.process_mut().step();
                self.scheduler.request_render();
                report.stepped = true;
            }
        }

        if self.scheduler.take_render() {
            if let (Some(renderer), Some(instance)) = (self.renderer.as_mut(), self.current.as_ref()) {
                renderer.render(instance.process());
                report.rendered = true;
            }
        }
        report
    }

    /// Route a pointer event on the surface to the live process.
    pub fn pointer(&mut self, event: PointerEvent) -> PointerResponse {
        let process = self.current.as_mut().map(|c| c.process_mut());
        let response = self.dispatcher.dispatch(event, &self.geometry, process);
        if response.redraw {
            self.scheduler.request_render();
        }
        response
    }

    /// Write a parameter value back to the live process.
    ///
    /// Editing a multi-line text parameter (rewriting rules and the like)
    /// reinitializes the process.
    pub fn set_param_value(&mut self, id: &str, value: ParamValue) {
        let Some(instance) = self.current.as_mut() else {
            return;
        };
        let process = instance.process_mut();
        let multiline = process
            .parameters()
            .iter()
            .find(|d| d.id == id)
            .is_some_and(|d| matches!(d.kind, ParamKind::MultilineText { .. }));
        process.set_param_value(id, value);
        if multiline {
            process.reset(true);
        }
        self.scheduler.request_render();
    }

    /// Activate an action-button parameter on the live process.
    pub fn trigger_action(&mut self, id: &str) {
        if let Some(actions) = self.current.as_mut().and_then(|c| c.process_mut().actions()) {
            actions.trigger_action(id);
        }
        self.scheduler.request_render();
    }

    /// Replace all presentation settings. The palette given here overrides
    /// any palette the live process hinted at.
    pub fn set_visualization(&mut self, params: VisualizationParams) {
        self.hinted_palette = None;
        self.visualization = params;
        self.forward_visualization();
    }

    /// Toggle grid lines. The palette in use is left alone.
    pub fn set_grid_enabled(&mut self, enabled: bool) {
        self.visualization.grid_enabled = enabled;
        self.forward_visualization();
    }

    /// Select a palette by name.
    pub fn set_palette(&mut self, palette: &str) {
        self.hinted_palette = None;
        self.visualization.palette = palette.to_string();
        self.forward_visualization();
    }

    fn forward_visualization(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            let mut params = self.visualization.clone();
            if let Some(palette) = &self.hinted_palette {
                params.palette.clone_from(palette);
            }
            renderer.set_visualization_params(&params);
        }
        self.scheduler.request_render();
    }

    /// Take the latest instruction for the parameter panel, if any.
    pub fn take_panel_update(&mut self) -> Option<PanelUpdate> {
        self.panel_update.take()
    }

    /// Readout for the info display.
    pub fn info(&self) -> LabInfo {
        match &self.current {
            Some(instance) => LabInfo {
                id: Some(instance.id().to_string()),
                name: instance.process().name().to_string(),
                iteration: instance.process().iteration(),
                population: instance.process().population(),
                state: self.scheduler.state(),
                rate: self.scheduler.rate(),
            },
            None => LabInfo {
                id: None,
                name: "No process".to_string(),
                iteration: 0,
                population: None,
                state: self.scheduler.state(),
                rate: self.scheduler.rate(),
            },
        }
    }

    /// The live process, if any.
    pub fn process(&self) -> Option<&ProcessInstance> {
        self.current.as_ref()
    }

    /// Current status.
    pub fn status(&self) -> &LabStatus {
        &self.status
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The registry processes are created from.
    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// Current surface placement and resolution.
    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    /// Current presentation settings.
    pub fn visualization(&self) -> &VisualizationParams {
        &self.visualization
    }

    /// The renderer, if still attached.
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    /// The renderer, if still attached.
    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    /// Detach and return the renderer. Later draws are skipped.
    pub fn detach_renderer(&mut self) -> Option<R> {
        self.renderer.take()
    }
}

impl<R: Renderer> Drop for Lab<R> {
    fn drop(&mut self) {
        if let Some(mut instance) = self.current.take() {
            instance.destroy();
        }
    }
}

fn backing_extent(display: f32, scale: f32) -> u32 {
    (display * scale).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dispatch::PointerButton;
    use crate::error::LabError;
    use crate::param::{ParamDescriptor, ParamStore};
    use crate::process::{Actionable, PointerInput, Process, Resizable, Teardown};
    use crate::view::{VisualizationHints, VisualizationParams};

    type Log = Rc<RefCell<Vec<String>>>;

    #[derive(Debug)]
    struct Probe {
        tag: &'static str,
        log: Log,
        iteration: u64,
        cells: u32,
        params: ParamStore,
    }

    impl Probe {
        fn new(tag: &'static str, log: Log) -> Self {
            Self {
                tag,
                log,
                iteration: 0,
                cells: 0,
                params: ParamStore::new()
                    .declare(ParamDescriptor::slider("speed", "Speed", 0.0, 10.0, 1.0), 1.0)
                    .declare(ParamDescriptor::multiline("rules", "Rules", 3), "A=AB")
                    .declare(ParamDescriptor::action("seed", "Seed", "Seed"), false),
            }
        }

        fn record(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{what}", self.tag));
        }
    }

    impl Process for Probe {
        fn name(&self) -> &str {
            "Probe"
        }
        fn step(&mut self) {
            self.iteration += 1;
        }
        fn reset(&mut self, randomize: bool) {
            self.record(&format!("reset({randomize})"));
            self.iteration = 0;
            self.cells = if randomize { 10 } else { 0 };
        }
        fn parameters(&self) -> &[ParamDescriptor] {
            self.params.descriptors()
        }
        fn param_value(&self, id: &str) -> Option<ParamValue> {
            self.params.get(id)
        }
        fn set_param_value(&mut self, id: &str, value: ParamValue) {
            self.params.set(id, value);
        }
        fn iteration(&self) -> u64 {
            self.iteration
        }
        fn population(&self) -> Option<f64> {
            Some(f64::from(self.cells))
        }
        fn visualization_hints(&self) -> Option<VisualizationHints> {
            let dense = self.tag == "dense";
            Some(VisualizationHints {
                pixel_buffer: dense,
                palette: dense.then(|| "ember".to_string()),
                ..Default::default()
            })
        }
        fn pointer_input(&mut self) -> Option<&mut dyn PointerInput> {
            Some(self)
        }
        fn resizable(&mut self) -> Option<&mut dyn Resizable> {
            Some(self)
        }
        fn actions(&mut self) -> Option<&mut dyn Actionable> {
            Some(self)
        }
        fn teardown(&mut self) -> Option<&mut dyn Teardown> {
            Some(self)
        }
    }

    impl PointerInput for Probe {
        fn pointer_down(&mut self, x: f32, y: f32, _button: PointerButton) {
            self.record(&format!("down({x},{y})"));
        }
        fn pointer_move(&mut self, x: f32, y: f32) {
            self.record(&format!("move({x},{y})"));
        }
        fn pointer_up(&mut self, x: f32, y: f32) {
            self.record(&format!("up({x},{y})"));
        }
    }

    impl Resizable for Probe {
        fn on_resize(&mut self, width: u32, height: u32) {
            self.record(&format!("resize({width}x{height})"));
        }
    }

    impl Actionable for Probe {
        fn trigger_action(&mut self, id: &str) {
            self.record(&format!("action({id})"));
        }
    }

    impl Teardown for Probe {
        fn destroy(&mut self) {
            self.record("destroy");
        }
    }

    #[derive(Debug, Default)]
    struct Recorder {
        log: Log,
        renders: Vec<u64>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, process: &dyn Process) {
            self.renders.push(process.iteration());
        }
        fn clear(&mut self) {
            self.log.borrow_mut().push("renderer:clear".into());
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.log
                .borrow_mut()
                .push(format!("renderer:resize({width}x{height})"));
        }
        fn set_visualization_params(&mut self, params: &VisualizationParams) {
            self.log
                .borrow_mut()
                .push(format!("renderer:palette({})", params.palette));
        }
        fn update_hints(&mut self, _hints: &VisualizationHints) {
            self.log.borrow_mut().push("renderer:hints".into());
        }
        fn prepare_pixel_buffer(&mut self) {
            self.log.borrow_mut().push("renderer:pixels".into());
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn lab_with_log() -> (Lab<Recorder>, Log) {
        let log: Log = Rc::default();
        let (a, b, c) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));
        let registry = ProcessRegistry::with_seed(1)
            .with("alpha", "Alpha", move |_| Ok(Box::new(Probe::new("alpha", Rc::clone(&a)))))
            .with("beta", "Beta", move |_| Ok(Box::new(Probe::new("beta", Rc::clone(&b)))))
            .with("dense", "Dense", move |_| Ok(Box::new(Probe::new("dense", Rc::clone(&c)))))
            .with("broken", "Broken", |_| {
                Err(LabError::construction("broken", "bad surface"))
            });
        let config = LabConfig::default()
            .with_initial_process("alpha")
            .with_size(800, 600);
        let renderer = Recorder {
            log: Rc::clone(&log),
            renders: Vec::new(),
        };
        let mut lab = Lab::new(registry, &config, renderer);
        assert!(lab.start());
        log.borrow_mut().clear();
        (lab, log)
    }

    fn renders(lab: &Lab<Recorder>) -> &[u64] {
        &lab.renderer().unwrap().renders
    }

    #[test]
    fn start_loads_initial_process() {
        let (mut lab, _log) = lab_with_log();
        assert_eq!(lab.status(), &LabStatus::Active);
        assert_eq!(lab.process().unwrap().id(), "alpha");
        assert_eq!(lab.info().population, Some(10.0));
        match lab.take_panel_update() {
            Some(PanelUpdate::Populate { name, parameters }) => {
                assert_eq!(name, "Probe");
                assert_eq!(parameters.len(), 3);
                assert_eq!(parameters[0].value, Some(ParamValue::Number(1.0)));
                assert_eq!(parameters[2].value, None);
            }
            other => panic!("unexpected panel update {other:?}"),
        }
        assert!(lab.take_panel_update().is_none());
    }

    #[test]
    fn switch_while_running_pauses_and_destroys_first() {
        let (mut lab, log) = lab_with_log();
        lab.toggle_play_pause();
        assert!(lab.scheduler().is_running());

        assert!(lab.switch_to("beta"));
        assert_eq!(lab.scheduler().state(), RunState::Paused);
        let log = log.borrow();
        let destroy = log.iter().position(|l| l == "alpha:destroy").unwrap();
        let reset = log.iter().position(|l| l == "beta:reset(true)").unwrap();
        assert!(destroy < reset);
        assert!(!log.iter().any(|l| l.starts_with("renderer:pixels")));
    }

    #[test]
    fn dense_process_gets_pixel_buffer() {
        let (mut lab, log) = lab_with_log();
        lab.switch_to("dense");
        let log = log.borrow();
        let hints = log.iter().position(|l| l == "renderer:hints").unwrap();
        let pixels = log.iter().position(|l| l == "renderer:pixels").unwrap();
        assert!(hints < pixels);
    }

    #[test]
    fn failed_construction_leaves_no_process() {
        let (mut lab, log) = lab_with_log();
        assert!(!lab.switch_to("broken"));
        assert!(lab.process().is_none());
        assert!(matches!(lab.status(), LabStatus::NoProcess { message } if message.contains("bad surface")));
        assert!(matches!(
            lab.take_panel_update(),
            Some(PanelUpdate::Unavailable { .. })
        ));
        assert!(log.borrow().contains(&"alpha:destroy".to_string()));

        lab.request_render();
        lab.step_once();
        lab.reset();
        let report = lab.frame(ms(0));
        assert!(!report.rendered);
        assert_eq!(lab.info().name, "No process");
    }

    #[test]
    fn unknown_id_runs_stub() {
        let (mut lab, _log) = lab_with_log();
        assert!(lab.switch_to("does_not_exist"));
        assert_eq!(lab.status(), &LabStatus::Active);
        assert_eq!(lab.info().name, "Unknown");
        lab.step_once();
        assert_eq!(lab.info().iteration, 1);
    }

    #[test]
    fn render_requests_coalesce_into_one_draw() {
        let (mut lab, _log) = lab_with_log();
        lab.frame(ms(0));
        let before = renders(&lab).len();
        for _ in 0..5 {
            lab.request_render();
        }
        lab.step_once();
        lab.step_once();
        let report = lab.frame(ms(16));
        assert!(report.rendered);
        assert_eq!(renders(&lab).len(), before + 1);
        assert!(!lab.frame(ms(32)).rendered);
    }

    #[test]
    fn paused_lab_never_steps() {
        let (mut lab, _log) = lab_with_log();
        for i in 0..600 {
            assert!(!lab.frame(ms(i * 16)).stepped);
        }
        assert_eq!(lab.info().iteration, 0);
    }

    #[test]
    fn running_lab_draws_post_step_state() {
        let (mut lab, _log) = lab_with_log();
        lab.set_rate(10);
        lab.toggle_play_pause();
        let mut t = 0;
        while t <= 1000 {
            let report = lab.frame(ms(t));
            if report.stepped {
                assert!(report.rendered);
            }
            t += 10;
        }
        assert_eq!(lab.info().iteration, 10);
        assert_eq!(*renders(&lab).last().unwrap(), 10);
    }

    #[test]
    fn manual_step_while_paused_redraws() {
        let (mut lab, _log) = lab_with_log();
        lab.frame(ms(0));
        lab.step_once();
        let report = lab.frame(ms(16));
        assert!(!report.stepped);
        assert!(report.rendered);
        assert_eq!(*renders(&lab).last().unwrap(), 1);
    }

    #[test]
    fn clear_blanks_renderer_before_reset() {
        let (mut lab, log) = lab_with_log();
        lab.toggle_play_pause();
        lab.step_once();
        lab.clear();
        assert!(!lab.scheduler().is_running());
        assert_eq!(lab.info().iteration, 0);
        assert_eq!(lab.info().population, Some(0.0));
        assert_eq!(
            *log.borrow(),
            ["renderer:clear".to_string(), "alpha:reset(false)".to_string()]
        );
    }

    #[test]
    fn reset_pauses_and_rewinds() {
        let (mut lab, _log) = lab_with_log();
        lab.step_once();
        lab.toggle_play_pause();
        lab.reset();
        assert!(!lab.scheduler().is_running());
        assert_eq!(lab.info().iteration, 0);
        assert_eq!(lab.info().population, Some(10.0));
    }

    #[test]
    fn resize_is_debounced() {
        let (mut lab, log) = lab_with_log();
        lab.request_resize(300.0, 200.0, ms(0));
        lab.request_resize(400.0, 300.0, ms(100));
        assert!(!lab.frame(ms(200)).resized);
        let report = lab.frame(ms(360));
        assert!(report.resized);
        assert!(report.rendered);
        assert_eq!(
            *log.borrow(),
            [
                "renderer:resize(400x300)".to_string(),
                "alpha:resize(400x300)".to_string()
            ]
        );
        assert!(!lab.frame(ms(1000)).resized);
    }

    #[test]
    fn pointer_events_use_backing_coordinates() {
        let (mut lab, log) = lab_with_log();
        lab.apply_resize(400.0, 300.0);
        lab.backing_scale = 2.0;
        lab.apply_resize(400.0, 300.0);
        lab.place_surface(50.0, 40.0);
        log.borrow_mut().clear();

        let r = lab.pointer(PointerEvent::Down {
            x: 150.0,
            y: 90.0,
            button: PointerButton::Primary,
        });
        assert!(r.redraw);
        lab.pointer(PointerEvent::Move { x: 60.0, y: 50.0 });
        lab.pointer(PointerEvent::Up { x: 0.0, y: 0.0 });
        lab.pointer(PointerEvent::Move { x: 70.0, y: 70.0 });
        assert!(lab.pointer(PointerEvent::ContextMenu).consume_default);
        assert_eq!(
            *log.borrow(),
            ["alpha:down(200,100)", "alpha:move(20,20)", "alpha:up(-100,-80)"]
        );
    }

    #[test]
    fn multiline_edit_resets_process() {
        let (mut lab, log) = lab_with_log();
        lab.step_once();
        lab.set_param_value("speed", ParamValue::Number(4.0));
        assert_eq!(lab.info().iteration, 1);
        lab.set_param_value("rules", ParamValue::from("A=BA"));
        assert_eq!(lab.info().iteration, 0);
        assert_eq!(*log.borrow(), ["alpha:reset(true)"]);
        let process = lab.process().unwrap().process();
        assert_eq!(process.param_value("speed"), Some(ParamValue::Number(4.0)));
        lab.set_param_value("undeclared", ParamValue::Number(1.0));
        assert!(process_value(&lab, "undeclared").is_none());
    }

    fn process_value(lab: &Lab<Recorder>, id: &str) -> Option<ParamValue> {
        lab.process().unwrap().process().param_value(id)
    }

    #[test]
    fn action_reaches_process() {
        let (mut lab, log) = lab_with_log();
        lab.trigger_action("seed");
        assert_eq!(*log.borrow(), ["alpha:action(seed)"]);
        assert!(lab.scheduler().render_pending());
    }

    #[test]
    fn visualization_changes_forwarded() {
        let (mut lab, log) = lab_with_log();
        lab.set_palette("ember");
        lab.set_grid_enabled(true);
        assert!(lab.visualization().grid_enabled);
        assert_eq!(lab.visualization().palette, "ember");
        assert_eq!(log.borrow()[0], "renderer:palette(ember)");
    }

    #[test]
    fn grid_toggle_keeps_hinted_palette() {
        let (mut lab, log) = lab_with_log();
        let classic = lab.visualization().palette.clone();
        assert!(lab.switch_to("dense"));
        log.borrow_mut().clear();

        lab.set_grid_enabled(true);
        assert_eq!(*log.borrow(), ["renderer:palette(ember)"]);
        assert_eq!(lab.visualization().palette, classic);

        lab.set_palette("ocean");
        lab.set_grid_enabled(false);
        assert_eq!(
            *log.borrow(),
            [
                "renderer:palette(ember)",
                "renderer:palette(ocean)",
                "renderer:palette(ocean)"
            ]
        );

        assert!(lab.switch_to("alpha"));
        log.borrow_mut().clear();
        lab.set_grid_enabled(true);
        assert_eq!(*log.borrow(), ["renderer:palette(ocean)"]);
    }

    #[test]
    fn stopped_lab_ignores_frames() {
        let (mut lab, _log) = lab_with_log();
        lab.toggle_play_pause();
        lab.frame(ms(0));
        lab.stop();
        lab.request_render();
        let report = lab.frame(ms(5000));
        assert_eq!(report, FrameReport::default());
    }

    #[test]
    fn detached_renderer_skips_draw() {
        let (mut lab, _log) = lab_with_log();
        let renderer = lab.detach_renderer().unwrap();
        assert!(renderer.renders.is_empty());
        lab.request_render();
        assert!(!lab.frame(ms(0)).rendered);
        assert!(!lab.scheduler().render_pending());
    }

    #[test]
    fn drop_destroys_live_process() {
        let (lab, log) = lab_with_log();
        drop(lab);
        assert_eq!(*log.borrow(), ["alpha:destroy"]);
    }
}
