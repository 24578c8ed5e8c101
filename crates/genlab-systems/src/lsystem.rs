use genlab_runtime::{
    LabError, LabResult, ParamDescriptor, ParamStore, ParamValue, Process, Resizable, Segment,
    Spawn, SurfaceView,
};

use crate::grammar::Grammar;
use crate::turtle::{Turtle, fit};

/// Longest word a rewrite may produce.
pub const SYMBOL_LIMIT: usize = 250_000;

const MARGIN: f32 = 16.0;

const AXIOM: &str = "axiom";
const RULES: &str = "rules";
const ANGLE: &str = "angle";
const GENERATIONS: &str = "generations";

/// Starting configuration of an [`LSystem`].
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Display name.
    pub name: &'static str,
    /// Start word.
    pub axiom: &'static str,
    /// Rules, one `X=...` per line.
    pub rules: &'static str,
    /// Turn angle in degrees.
    pub angle: f64,
    /// Initial turtle heading in degrees.
    pub heading: f32,
    /// Rewrites applied before the word stops growing.
    pub generations: u32,
}

impl Preset {
    /// A branching plant.
    pub fn tree() -> Self {
        Self {
            name: "L-System Tree",
            axiom: "X",
            rules: "X=F+[[X]-X]-F[-FX]+X\nF=FF",
            angle: 25.0,
            heading: -90.0,
            generations: 6,
        }
    }

    /// The Koch snowflake.
    pub fn koch() -> Self {
        Self {
            name: "L-System Koch Snowflake",
            axiom: "F--F--F",
            rules: "F=F+F--F+F",
            angle: 60.0,
            heading: 0.0,
            generations: 5,
        }
    }
}

/// A rewriting system drawn with turtle graphics.
///
/// Each step applies one rewrite until the generation cap is reached, then
/// re-traces the word into segments fitted to the surface.
#[derive(Debug)]
pub struct LSystem {
    name: &'static str,
    heading: f32,
    params: ParamStore,
    grammar: Grammar,
    word: String,
    generation: u32,
    segments: Vec<Segment>,
    width: u32,
    height: u32,
    iteration: u64,
}

impl LSystem {
    /// Create a system from `preset` for the spawn surface. The word is
    /// empty until the first reset.
    pub fn new(preset: Preset, spawn: Spawn) -> LabResult<Self> {
        if spawn.width == 0 || spawn.height == 0 {
            return Err(LabError::construction(
                preset.name,
                format!("surface {}x{} has no area", spawn.width, spawn.height),
            ));
        }
        let params = ParamStore::new()
            .declare(
                ParamDescriptor::text(AXIOM, "Axiom").with_tooltip("Start word, used on reset"),
                preset.axiom,
            )
            .declare(
                ParamDescriptor::multiline(RULES, "Rules", 4)
                    .with_tooltip("One rule per line, e.g. F=F+F"),
                preset.rules,
            )
            .declare(
                ParamDescriptor::slider(ANGLE, "Angle", 0.0, 180.0, 1.0),
                preset.angle,
            )
            .declare(
                ParamDescriptor::number(GENERATIONS, "Generations", 0.0, 10.0, 1.0)
                    .with_tooltip("Rewrites applied before growth stops"),
                f64::from(preset.generations),
            );
        Ok(Self {
            name: preset.name,
            heading: preset.heading,
            grammar: Grammar::parse(preset.rules),
            params,
            word: String::new(),
            generation: 0,
            segments: Vec::new(),
            width: spawn.width,
            height: spawn.height,
            iteration: 0,
        })
    }

    /// The current word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Rewrites applied since the last reset.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Segments of the current word, in surface coordinates.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn generation_cap(&self) -> u32 {
        self.params.number(GENERATIONS).max(0.0) as u32
    }

    fn retrace(&mut self) {
        let turtle = Turtle::new(self.params.number(ANGLE) as f32, self.heading);
        self.segments = turtle.trace(&self.word);
        fit(&mut self.segments, self.width, self.height, MARGIN);
    }
}

impl Process for LSystem {
    fn name(&self) -> &str {
        self.name
    }

    fn step(&mut self) {
        self.iteration += 1;
        if self.generation >= self.generation_cap() {
            return;
        }
        match self.grammar.rewrite(&self.word, SYMBOL_LIMIT) {
            Some(word) => {
                self.word = word;
                self.generation += 1;
                self.retrace();
            }
            None => {
                tracing::warn!(
                    "{}: generation {} would exceed {SYMBOL_LIMIT} symbols, holding",
                    self.name,
                    self.generation + 1
                );
            }
        }
    }

    fn reset(&mut self, randomize: bool) {
        self.iteration = 0;
        self.generation = 0;
        self.word = if randomize {
            self.params.text(AXIOM).to_string()
        } else {
            String::new()
        };
        self.retrace();
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
            RULES => self.grammar = Grammar::parse(self.params.text(RULES)),
            ANGLE => self.retrace(),
            _ => {}
        }
    }

    fn iteration(&self) -> u64 {
        self.iteration
    }

    fn population(&self) -> Option<f64> {
        Some(self.word.chars().count() as f64)
    }

    fn view(&self) -> SurfaceView<'_> {
        SurfaceView::Segments {
            segments: &self.segments,
        }
    }

    fn resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for LSystem {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.retrace();
    }
}
