use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use genlab_runtime::{
    LabError, LabResult, ParamDescriptor, ParamStore, ParamValue, PointerButton, PointerInput,
    Process, Resizable, Spawn, SurfaceView, Teardown, VisualizationHints,
};

use crate::trail::TrailField;

/// Surface pixels per trail sample along each axis.
pub const DOWNSAMPLE: u32 = 2;

/// Agents spawned by one pointer press.
pub const BURST: usize = 200;

const MAX_AGENTS: usize = 20_000;

const AGENT_COUNT: &str = "agent_count";
const SENSOR_ANGLE: &str = "sensor_angle";
const SENSOR_DISTANCE: &str = "sensor_distance";
const TURN_RATE: &str = "turn_rate";
const STEP_SIZE: &str = "step_size";
const DEPOSIT: &str = "deposit";
const DECAY: &str = "decay";

/// One particle of the mold, in trail-field coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Heading in radians.
    pub heading: f32,
}

/// A Physarum-style slime mold.
///
/// Agents sense the trail ahead of them at three angles, turn toward the
/// strongest reading, move and deposit. The trail then diffuses and
/// decays.
#[derive(Debug)]
pub struct SlimeMold {
    params: ParamStore,
    agents: Vec<Agent>,
    field: TrailField,
    rng: StdRng,
    iteration: u64,
}

impl SlimeMold {
    /// Create a mold with no agents for the spawn surface.
    pub fn new(spawn: Spawn) -> LabResult<Self> {
        if spawn.width == 0 || spawn.height == 0 {
            return Err(LabError::construction(
                "agent_slime",
                format!("surface {}x{} has no area", spawn.width, spawn.height),
            ));
        }
        let params = ParamStore::new()
            .declare(
                ParamDescriptor::slider(AGENT_COUNT, "Agents", 100.0, MAX_AGENTS as f64, 100.0),
                4000.0,
            )
            .declare(
                ParamDescriptor::slider(SENSOR_ANGLE, "Sensor angle", 5.0, 90.0, 1.0)
                    .with_tooltip("Angle between the forward and side sensors, in degrees"),
                30.0,
            )
            .declare(
                ParamDescriptor::slider(SENSOR_DISTANCE, "Sensor distance", 1.0, 30.0, 1.0),
                9.0,
            )
            .declare(
                ParamDescriptor::slider(TURN_RATE, "Turn rate", 5.0, 90.0, 1.0),
                20.0,
            )
            .declare(
                ParamDescriptor::slider(STEP_SIZE, "Step size", 0.5, 5.0, 0.5),
                1.0,
            )
            .declare(
                ParamDescriptor::slider(DEPOSIT, "Deposit", 0.01, 1.0, 0.01),
                0.1,
            )
            .declare(
                ParamDescriptor::slider(DECAY, "Decay", 0.0, 0.5, 0.01)
                    .with_tooltip("Fraction of trail lost per step"),
                0.05,
            );
        Ok(Self {
            params,
            agents: Vec::new(),
            field: field_for(spawn.width, spawn.height),
            rng: StdRng::seed_from_u64(spawn.seed),
            iteration: 0,
        })
    }

    /// The live agents.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The trail field the agents deposit into.
    pub fn field(&self) -> &TrailField {
        &self.field
    }

    fn random_agent(&mut self) -> Agent {
        Agent {
            x: self.rng.random_range(0.0..self.field.width() as f32),
            y: self.rng.random_range(0.0..self.field.height() as f32),
            heading: self.rng.random_range(0.0..TAU),
        }
    }

    fn target_count(&self) -> usize {
        self.params.number(AGENT_COUNT).max(0.0) as usize
    }

    fn fit_population(&mut self) {
        let target = self.target_count();
        if self.agents.len() > target {
            self.agents.truncate(target);
        }
        while self.agents.len() < target {
            let agent = self.random_agent();
            self.agents.push(agent);
        }
    }

    fn sense(&self, agent: &Agent, offset: f32, distance: f32) -> f32 {
        let heading = agent.heading + offset;
        self.field.sample(
            agent.x + heading.cos() * distance,
            agent.y + heading.sin() * distance,
        )
    }
}

fn field_for(width: u32, height: u32) -> TrailField {
    TrailField::new(
        (width / DOWNSAMPLE).max(1) as usize,
        (height / DOWNSAMPLE).max(1) as usize,
    )
}

/// `value` wrapped into `0.0..extent`.
fn wrap(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}

impl Process for SlimeMold {
    fn name(&self) -> &str {
        "Slime Mold"
    }

    fn step(&mut self) {
        let sensor_angle = (self.params.number(SENSOR_ANGLE) as f32).to_radians();
        let distance = self.params.number(SENSOR_DISTANCE) as f32;
        let turn = (self.params.number(TURN_RATE) as f32).to_radians();
        let step = self.params.number(STEP_SIZE) as f32;
        let deposit = self.params.number(DEPOSIT) as f32;
        let (w, h) = (self.field.width() as f32, self.field.height() as f32);

        let mut agents = std::mem::take(&mut self.agents);
        for agent in &mut agents {
            let forward = self.sense(agent, 0.0, distance);
            let left = self.sense(agent, -sensor_angle, distance);
            let right = self.sense(agent, sensor_angle, distance);
            agent.heading += if forward >= left && forward >= right {
                0.0
            } else if forward < left && forward < right {
                if self.rng.random_bool(0.5) { turn } else { -turn }
            } else if left > right {
                -turn
            } else {
                turn
            };
            agent.x = wrap(agent.x + agent.heading.cos() * step, w);
            agent.y = wrap(agent.y + agent.heading.sin() * step, h);
            self.field.deposit(agent.x, agent.y, deposit);
        }
        self.agents = agents;
        self.field.diffuse(self.params.number(DECAY) as f32);
        self.iteration += 1;
    }

    fn reset(&mut self, randomize: bool) {
        self.iteration = 0;
        self.field.clear();
        self.agents.clear();
        if randomize {
            self.fit_population();
        }
    }

    fn parameters(&self) -> &[ParamDescriptor] {
        self.params.descriptors()
    }

    fn param_value(&self, id: &str) -> Option<ParamValue> {
        self.params.get(id)
    }

    fn set_param_value(&mut self, id: &str, value: ParamValue) {
        if self.params.set(id, value) && id == AGENT_COUNT && !self.agents.is_empty() {
            self.fit_population();
        }
    }

    fn iteration(&self) -> u64 {
        self.iteration
    }

    fn population(&self) -> Option<f64> {
        Some(self.agents.len() as f64)
    }

    fn view(&self) -> SurfaceView<'_> {
        SurfaceView::Field {
            width: self.field.width(),
            height: self.field.height(),
            values: self.field.values(),
        }
    }

    fn visualization_hints(&self) -> Option<VisualizationHints> {
        Some(VisualizationHints {
            pixel_buffer: true,
            palette: Some("ember".to_string()),
            supports_grid: false,
        })
    }

    fn pointer_input(&mut self) -> Option<&mut dyn PointerInput> {
        Some(self)
    }

    fn resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }

    fn teardown(&mut self) -> Option<&mut dyn Teardown> {
        Some(self)
    }
}

impl PointerInput for SlimeMold {
    fn pointer_down(&mut self, x: f32, y: f32, _button: PointerButton) {
        let (fx, fy) = (x / DOWNSAMPLE as f32, y / DOWNSAMPLE as f32);
        let (w, h) = (self.field.width() as f32, self.field.height() as f32);
        let room = MAX_AGENTS.saturating_sub(self.agents.len()).min(BURST);
        for _ in 0..room {
            let heading = self.rng.random_range(0.0..TAU);
            let radius = self.rng.random_range(0.0..3.0_f32);
            self.agents.push(Agent {
                x: wrap(fx + heading.cos() * radius, w),
                y: wrap(fy + heading.sin() * radius, h),
                heading,
            });
        }
    }

    fn pointer_move(&mut self, _x: f32, _y: f32) {}

    fn pointer_up(&mut self, _x: f32, _y: f32) {}
}

impl Resizable for SlimeMold {
    fn on_resize(&mut self, width: u32, height: u32) {
        let old = (self.field.width() as f32, self.field.height() as f32);
        self.field = field_for(width.max(1), height.max(1));
        let (w, h) = (self.field.width() as f32, self.field.height() as f32);
        for agent in &mut self.agents {
            agent.x = wrap(agent.x / old.0 * w, w);
            agent.y = wrap(agent.y / old.1 * h, h);
        }
    }
}

impl Teardown for SlimeMold {
    fn destroy(&mut self) {
        tracing::debug!("releasing {} agents and trail buffers", self.agents.len());
        self.agents = Vec::new();
        self.field.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mold() -> SlimeMold {
        let mut mold = SlimeMold::new(Spawn {
            width: 200,
            height: 100,
            seed: 11,
        })
        .unwrap();
        mold.set_param_value(AGENT_COUNT, ParamValue::Number(500.0));
        mold.reset(true);
        mold
    }

    #[test]
    fn field_is_downsampled() {
        let mold = mold();
        assert_eq!((mold.field().width(), mold.field().height()), (100, 50));
        match mold.view() {
            SurfaceView::Field { width, height, values } => {
                assert_eq!(values.len(), width * height);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn blank_reset_has_no_agents_or_trail() {
        let mut mold = mold();
        assert_eq!(mold.population(), Some(500.0));
        mold.step();
        assert!(mold.field().total() > 0.0);
        mold.reset(false);
        assert_eq!(mold.population(), Some(0.0));
        assert_eq!(mold.field().total(), 0.0);
        assert_eq!(mold.iteration(), 0);
    }

    #[test]
    fn steps_keep_agents_on_field() {
        let mut mold = mold();
        for _ in 0..20 {
            mold.step();
        }
        assert_eq!(mold.iteration(), 20);
        let (w, h) = (mold.field().width() as f32, mold.field().height() as f32);
        assert!(mold.agents().iter().all(|a| (0.0..w).contains(&a.x) && (0.0..h).contains(&a.y)));
        assert!(mold.field().values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn agent_count_param_resizes_population() {
        let mut mold = mold();
        mold.set_param_value(AGENT_COUNT, ParamValue::Number(200.0));
        assert_eq!(mold.population(), Some(200.0));
        mold.set_param_value(AGENT_COUNT, ParamValue::Number(800.0));
        assert_eq!(mold.population(), Some(800.0));

        mold.reset(false);
        mold.set_param_value(AGENT_COUNT, ParamValue::Number(300.0));
        assert_eq!(mold.population(), Some(0.0));
    }

    #[test]
    fn pointer_spawns_burst_near_press() {
        let mut mold = mold();
        mold.reset(false);
        mold.pointer_down(100.0, 50.0, PointerButton::Primary);
        assert_eq!(mold.population(), Some(BURST as f64));
        assert!(
            mold.agents()
                .iter()
                .all(|a| (a.x - 50.0).abs() <= 3.0 && (a.y - 25.0).abs() <= 3.0)
        );
    }

    #[test]
    fn resize_rescales_agents() {
        let mut mold = mold();
        mold.on_resize(400, 400);
        assert_eq!((mold.field().width(), mold.field().height()), (200, 200));
        assert_eq!(mold.population(), Some(500.0));
        assert!(mold.agents().iter().all(|a| a.x < 200.0 && a.y < 200.0));
    }

    #[test]
    fn destroy_releases_buffers() {
        let mut mold = mold();
        mold.destroy();
        assert_eq!(mold.population(), Some(0.0));
        assert!(mold.field().values().is_empty());
    }

    #[test]
    fn hints_request_pixel_buffer() {
        let hints = mold().visualization_hints().unwrap();
        assert!(hints.pixel_buffer);
        assert!(!hints.supports_grid);
        assert_eq!(hints.palette.as_deref(), Some("ember"));
    }
}
