use rand::SeedableRng;
use rand::rngs::StdRng;

use genlab_runtime::{
    Actionable, LabError, LabResult, ParamDescriptor, ParamStore, ParamValue, PointerButton,
    PointerInput, Process, Resizable, Spawn, SurfaceView, VisualizationHints,
};

use crate::grid::CellGrid;

/// State of a live (or firing) cell.
pub const FIRING: u8 = 1;

const CELL_SIZE: &str = "cell_size";
const DENSITY: &str = "density";
const WRAP: &str = "wrap";
const RANDOMIZE: &str = "randomize";

/// A neighborhood transition rule.
pub trait Rule: std::fmt::Debug {
    /// Display name of the automaton.
    fn name(&self) -> &str;

    /// Next state of a cell given its current state and its number of
    /// firing neighbors.
    fn next(&self, state: u8, firing: u8) -> u8;

    /// Cell edge length in pixels for new instances.
    fn default_cell_size(&self) -> f64 {
        8.0
    }

    /// Fraction of cells seeded by a randomizing reset.
    fn default_density(&self) -> f64 {
        0.3
    }
}

/// Conway's Game of Life (B3/S23).
#[derive(Debug, Clone, Copy, Default)]
pub struct Conway;

impl Rule for Conway {
    fn name(&self) -> &str {
        "Game of Life"
    }

    fn next(&self, state: u8, firing: u8) -> u8 {
        match (state, firing) {
            (FIRING, 2 | 3) | (0, 3) => FIRING,
            _ => 0,
        }
    }
}

/// Brian's Brain: ready cells fire with exactly two firing neighbors,
/// firing cells become refractory, refractory cells become ready.
#[derive(Debug, Clone, Copy, Default)]
pub struct BriansBrain;

/// State of a refractory cell in [`BriansBrain`].
pub const REFRACTORY: u8 = 2;

impl Rule for BriansBrain {
    fn name(&self) -> &str {
        "Brian's Brain"
    }

    fn next(&self, state: u8, firing: u8) -> u8 {
        match state {
            0 if firing == 2 => FIRING,
            FIRING => REFRACTORY,
            _ => 0,
        }
    }

    fn default_cell_size(&self) -> f64 {
        6.0
    }

    fn default_density(&self) -> f64 {
        0.2
    }
}

/// A cellular automaton on a [`CellGrid`] sized to the surface.
///
/// Primary-button drags paint firing cells, secondary-button drags erase.
#[derive(Debug)]
pub struct Automaton<R: Rule> {
    rule: R,
    grid: CellGrid,
    params: ParamStore,
    rng: StdRng,
    width: u32,
    height: u32,
    iteration: u64,
    brush: Option<u8>,
}

impl<R: Rule> Automaton<R> {
    /// Create an empty automaton for the spawn surface.
    pub fn new(rule: R, spawn: Spawn) -> LabResult<Self> {
        if spawn.width == 0 || spawn.height == 0 {
            return Err(LabError::construction(
                rule.name(),
                format!("surface {}x{} has no area", spawn.width, spawn.height),
            ));
        }
        let params = ParamStore::new()
            .declare(
                ParamDescriptor::slider(CELL_SIZE, "Cell size", 2.0, 24.0, 1.0)
                    .with_tooltip("Edge length of one cell in pixels"),
                rule.default_cell_size(),
            )
            .declare(
                ParamDescriptor::slider(DENSITY, "Initial density", 0.0, 1.0, 0.05)
                    .with_tooltip("Fraction of cells alive after a reset"),
                rule.default_density(),
            )
            .declare(ParamDescriptor::checkbox(WRAP, "Wrap edges"), true)
            .declare(
                ParamDescriptor::action(RANDOMIZE, "Randomize", "Randomize"),
                false,
            );
        let (cols, rows) = grid_size(spawn.width, spawn.height, rule.default_cell_size());
        Ok(Self {
            rule,
            grid: CellGrid::new(cols, rows),
            params,
            rng: StdRng::seed_from_u64(spawn.seed),
            width: spawn.width,
            height: spawn.height,
            iteration: 0,
            brush: None,
        })
    }

    /// The cell grid.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// The cell grid, for seeding patterns.
    pub fn grid_mut(&mut self) -> &mut CellGrid {
        &mut self.grid
    }

    fn cell_size(&self) -> f64 {
        self.params.number(CELL_SIZE).max(1.0)
    }

    fn paint_at(&mut self, x: f32, y: f32) {
        let Some(state) = self.brush else {
            return;
        };
        let cell = self.cell_size();
        let col = (f64::from(x) / cell).floor() as i64;
        let row = (f64::from(y) / cell).floor() as i64;
        if col < 0 || row < 0 || col >= self.grid.cols() as i64 || row >= self.grid.rows() as i64 {
            return;
        }
        self.grid.paint(col, row, 0, state);
    }

    fn fit_grid(&mut self) {
        let (cols, rows) = grid_size(self.width, self.height, self.cell_size());
        if (cols, rows) != (self.grid.cols(), self.grid.rows()) {
            self.grid = self.grid.resized(cols, rows);
        }
    }
}

fn grid_size(width: u32, height: u32, cell_size: f64) -> (usize, usize) {
    let cell = cell_size.max(1.0);
    let cols = (f64::from(width) / cell).floor().max(1.0) as usize;
    let rows = (f64::from(height) / cell).floor().max(1.0) as usize;
    (cols, rows)
}

impl<R: Rule> Process for Automaton<R> {
    fn name(&self) -> &str {
        self.rule.name()
    }

    fn step(&mut self) {
        let rule = &self.rule;
        self.grid.advance(FIRING, |state, firing| rule.next(state, firing));
        self.iteration += 1;
    }

    fn reset(&mut self, randomize: bool) {
        self.iteration = 0;
        self.grid.fill(0);
        if randomize {
            let density = self.params.number(DENSITY);
            self.grid.randomize(&mut self.rng, density, FIRING);
        }
    }

    fn parameters(&self) -> &[ParamDescriptor] {
        self.params.descriptors()
    }

    fn param_value(&self, id: &str) -> Option<ParamValue> {
        self.params.get(id)
    }

    fn set_param_value(&mut self, id: &str, value: ParamValue) {
        if !self.params.set(id, value) {
            return;
        }
        match id {
            CELL_SIZE => self.fit_grid(),
            WRAP => self.grid.set_wrap(self.params.flag(WRAP)),
            _ => {}
        }
    }

    fn iteration(&self) -> u64 {
        self.iteration
    }

    fn population(&self) -> Option<f64> {
        Some(self.grid.count(FIRING) as f64)
    }

    fn view(&self) -> SurfaceView<'_> {
        SurfaceView::Cells {
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            cell_size: self.cell_size() as f32,
            states: self.grid.states(),
        }
    }

    fn visualization_hints(&self) -> Option<VisualizationHints> {
        Some(VisualizationHints {
            supports_grid: true,
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
}

impl<R: Rule> PointerInput for Automaton<R> {
    fn pointer_down(&mut self, x: f32, y: f32, button: PointerButton) {
        self.brush = match button {
            PointerButton::Primary => Some(FIRING),
            PointerButton::Secondary => Some(0),
            PointerButton::Middle => None,
        };
        self.paint_at(x, y);
    }

    fn pointer_move(&mut self, x: f32, y: f32) {
        self.paint_at(x, y);
    }

    fn pointer_up(&mut self, _x: f32, _y: f32) {
        self.brush = None;
    }
}

impl<R: Rule> Resizable for Automaton<R> {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.fit_grid();
    }
}

impl<R: Rule> Actionable for Automaton<R> {
    fn trigger_action(&mut self, id: &str) {
        if id == RANDOMIZE {
            self.reset(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(width: u32, height: u32) -> Spawn {
        Spawn {
            width,
            height,
            seed: 42,
        }
    }

    fn life() -> Automaton<Conway> {
        Automaton::new(Conway, spawn(800, 600)).unwrap()
    }

    #[test]
    fn grid_fits_surface() {
        let ca = life();
        assert_eq!((ca.grid().cols(), ca.grid().rows()), (100, 75));
        let brain = Automaton::new(BriansBrain, spawn(600, 600)).unwrap();
        assert_eq!((brain.grid().cols(), brain.grid().rows()), (100, 100));
    }

    #[test]
    fn zero_area_surface_fails() {
        let err = Automaton::new(Conway, spawn(0, 600)).unwrap_err();
        assert!(matches!(err, LabError::Construction { .. }));
    }

    #[test]
    fn blank_and_random_resets_differ() {
        let mut ca = life();
        ca.reset(false);
        assert_eq!(ca.population(), Some(0.0));
        ca.reset(true);
        let population = ca.population().unwrap();
        assert!(population > 1000.0 && population < 3500.0);
    }

    #[test]
    fn steps_count_iterations() {
        let mut ca = life();
        ca.reset(true);
        for _ in 0..5 {
            ca.step();
        }
        assert_eq!(ca.iteration(), 5);
        ca.reset(true);
        assert_eq!(ca.iteration(), 0);
    }

    #[test]
    fn glider_keeps_five_cells() {
        let mut ca = life();
        ca.reset(false);
        for (c, r) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            ca.grid_mut().set(c, r, FIRING);
        }
        for _ in 0..8 {
            ca.step();
            assert_eq!(ca.population(), Some(5.0));
        }
        assert_eq!(ca.grid().get(3, 2), FIRING);
    }

    #[test]
    fn brain_cells_cycle_through_refractory() {
        let rule = BriansBrain;
        assert_eq!(rule.next(0, 2), FIRING);
        assert_eq!(rule.next(0, 3), 0);
        assert_eq!(rule.next(FIRING, 2), REFRACTORY);
        assert_eq!(rule.next(REFRACTORY, 2), 0);
    }

    #[test]
    fn drags_paint_and_erase() {
        let mut ca = life();
        ca.reset(false);
        ca.pointer_down(4.0, 4.0, PointerButton::Primary);
        ca.pointer_move(12.0, 4.0);
        ca.pointer_up(12.0, 4.0);
        ca.pointer_move(20.0, 4.0);
        assert_eq!(ca.population(), Some(2.0));
        assert_eq!(ca.grid().get(1, 0), FIRING);

        ca.pointer_down(4.0, 4.0, PointerButton::Secondary);
        assert_eq!(ca.population(), Some(1.0));
        ca.pointer_up(4.0, 4.0);

        ca.pointer_down(-5.0, 4.0, PointerButton::Primary);
        ca.pointer_down(9000.0, 4.0, PointerButton::Primary);
        assert_eq!(ca.population(), Some(1.0));
    }

    #[test]
    fn resize_keeps_overlapping_cells() {
        let mut ca = life();
        ca.reset(false);
        ca.grid_mut().set(10, 10, FIRING);
        ca.grid_mut().set(90, 70, FIRING);
        ca.on_resize(400, 400);
        assert_eq!((ca.grid().cols(), ca.grid().rows()), (50, 50));
        assert_eq!(ca.population(), Some(1.0));
        assert_eq!(ca.grid().get(10, 10), FIRING);
    }

    #[test]
    fn cell_size_param_refits_grid() {
        let mut ca = life();
        ca.set_param_value(CELL_SIZE, ParamValue::Number(16.0));
        assert_eq!((ca.grid().cols(), ca.grid().rows()), (50, 37));
        ca.set_param_value(CELL_SIZE, ParamValue::Number(500.0));
        assert_eq!(ca.param_value(CELL_SIZE), Some(ParamValue::Number(24.0)));
        ca.set_param_value("nonexistent", ParamValue::Number(1.0));
        assert_eq!(ca.param_value("nonexistent"), None);
    }

    #[test]
    fn wrap_param_reaches_grid() {
        let mut ca = life();
        assert!(ca.grid().wrap());
        ca.set_param_value(WRAP, ParamValue::Flag(false));
        assert!(!ca.grid().wrap());
    }

    #[test]
    fn randomize_action_reseeds() {
        let mut ca = life();
        ca.reset(false);
        ca.step();
        ca.trigger_action(RANDOMIZE);
        assert_eq!(ca.iteration(), 0);
        assert!(ca.population().unwrap() > 0.0);
    }

    #[test]
    fn view_exposes_cells() {
        let ca = life();
        match ca.view() {
            SurfaceView::Cells {
                cols,
                rows,
                cell_size,
                states,
            } => {
                assert_eq!(states.len(), cols * rows);
                assert!((cell_size - 8.0).abs() < f32::EPSILON);
            }
            other => panic!("unexpected view {other:?}"),
        }
        assert!(ca.visualization_hints().unwrap().supports_grid);
    }
}
