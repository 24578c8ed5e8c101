use std::collections::HashMap;
use std::fmt;

/// The kind of control a parameter is edited with, plus its constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    /// A bounded continuous range.
    Slider {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Increment between selectable values.
        step: f64,
    },
    /// A numeric entry field with optional bounds.
    Number {
        /// Optional lower bound.
        min: Option<f64>,
        /// Optional upper bound.
        max: Option<f64>,
        /// Optional increment.
        step: Option<f64>,
    },
    /// An on/off toggle.
    Checkbox,
    /// Single-line free text.
    Text,
    /// Multi-line free text, e.g. rewriting rules.
    MultilineText {
        /// Number of visible rows.
        rows: u32,
    },
    /// A button that fires an action instead of holding a value.
    Action {
        /// Caption shown on the button.
        button_text: String,
    },
}

impl ParamKind {
    /// Short type tag, as shown in listings.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Slider { .. } => "slider",
            Self::Number { .. } => "number",
            Self::Checkbox => "checkbox",
            Self::Text => "text",
            Self::MultilineText { .. } => "textarea",
            Self::Action { .. } => "button",
        }
    }

    /// Whether this kind holds a numeric value.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Slider { .. } | Self::Number { .. })
    }
}

/// Static declaration of one adjustable parameter of a process.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDescriptor {
    /// Identifier, unique within the declaring process.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Optional hover help.
    pub tooltip: Option<String>,
    /// Control type and constraints.
    pub kind: ParamKind,
}

impl ParamDescriptor {
    fn new(id: &str, label: &str, kind: ParamKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            tooltip: None,
            kind,
        }
    }

    /// A slider between `min` and `max`.
    pub fn slider(id: &str, label: &str, min: f64, max: f64, step: f64) -> Self {
        Self::new(id, label, ParamKind::Slider { min, max, step })
    }

    /// A numeric field bounded by `min..=max` with the given increment.
    pub fn number(id: &str, label: &str, min: f64, max: f64, step: f64) -> Self {
        Self::new(
            id,
            label,
            ParamKind::Number {
                min: Some(min),
                max: Some(max),
                step: Some(step),
            },
        )
    }

    /// A checkbox.
    pub fn checkbox(id: &str, label: &str) -> Self {
        Self::new(id, label, ParamKind::Checkbox)
    }

    /// A single-line text field.
    pub fn text(id: &str, label: &str) -> Self {
        Self::new(id, label, ParamKind::Text)
    }

    /// A multi-line text field with `rows` visible lines.
    pub fn multiline(id: &str, label: &str, rows: u32) -> Self {
        Self::new(id, label, ParamKind::MultilineText { rows })
    }

    /// An action button.
    pub fn action(id: &str, label: &str, button_text: &str) -> Self {
        Self::new(
            id,
            label,
            ParamKind::Action {
                button_text: button_text.to_string(),
            },
        )
    }

    /// Attach a tooltip.
    pub fn with_tooltip(mut self, tooltip: &str) -> Self {
        self.tooltip = Some(tooltip.to_string());
        self
    }
}

/// A current parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Slider and number values.
    Number(f64),
    /// Checkbox values.
    Flag(bool),
    /// Text and multi-line text values.
    Text(String),
}

impl ParamValue {
    /// The numeric value, if this is a number.
    ///
    /// Text that parses as a number is accepted too, so raw input from an
    /// entry field can be passed straight through.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Flag(_) => None,
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// The boolean value, if this is a flag.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Text(s) => match s.trim() {
                "true" | "on" | "1" => Some(true),
                "false" | "off" | "0" => Some(false),
                _ => None,
            },
            Self::Number(_) => None,
        }
    }

    /// The text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Parse raw user input into a value suited to `kind`.
    ///
    /// Returns `None` for action buttons, which carry no value.
    pub fn parse_for(kind: &ParamKind, raw: &str) -> Option<Self> {
        match kind {
            ParamKind::Slider { .. } | ParamKind::Number { .. } => {
                Some(Self::Number(raw.trim().parse().ok()?))
            }
            ParamKind::Checkbox => Self::Text(raw.to_string()).as_flag().map(Self::Flag),
            ParamKind::Text | ParamKind::MultilineText { .. } => Some(Self::Text(raw.to_string())),
            ParamKind::Action { .. } => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Clamp a numeric input to the bounds declared by `kind`.
///
/// Non-numeric kinds pass the value through unchanged. Swapped bounds are
/// treated as if declared in order.
pub fn clamp_to(kind: &ParamKind, value: f64) -> f64 {
    match kind {
        ParamKind::Slider { min, max, .. } => within(value, *min, *max),
        ParamKind::Number { min, max, .. } => within(
            value,
            min.unwrap_or(f64::NEG_INFINITY),
            max.unwrap_or(f64::INFINITY),
        ),
        _ => value,
    }
}

// `f64::clamp` panics when lo > hi or either bound is NaN.
fn within(value: f64, a: f64, b: f64) -> f64 {
    value.max(a.min(b)).min(a.max(b))
}

/// Descriptors plus the current value of every declared parameter.
///
/// Processes delegate their parameter accessors here. Writes to undeclared
/// ids are ignored, numeric writes are clamped to their declared bounds,
/// and values of the wrong shape are dropped.
#[derive(Debug, Clone, Default)]
pub struct ParamStore {
    descriptors: Vec<ParamDescriptor>,
    values: HashMap<String, ParamValue>,
}

impl ParamStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter with its initial value.
    ///
    /// Action buttons take no value; pass anything, it is not stored.
    pub fn declare(mut self, descriptor: ParamDescriptor, initial: impl Into<ParamValue>) -> Self {
        if !matches!(descriptor.kind, ParamKind::Action { .. }) {
            self.values.insert(descriptor.id.clone(), initial.into());
        }
        self.descriptors.push(descriptor);
        self
    }

    /// The declared descriptors, in declaration order.
    pub fn descriptors(&self) -> &[ParamDescriptor] {
        &self.descriptors
    }

    /// Look up a descriptor by id.
    pub fn descriptor(&self, id: &str) -> Option<&ParamDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    /// Current value of `id`.
    pub fn get(&self, id: &str) -> Option<ParamValue> {
        self.values.get(id).cloned()
    }

    /// Store a new value. Returns `true` if the value was accepted.
    pub fn set(&mut self, id: &str, value: ParamValue) -> bool {
        let Some(descriptor) = self.descriptor(id) else {
            return false;
        };
        let coerced = match &descriptor.kind {
            kind @ (ParamKind::Slider { .. } | ParamKind::Number { .. }) => value
                .as_number()
                .map(|n| ParamValue::Number(clamp_to(kind, n))),
            ParamKind::Checkbox => value.as_flag().map(ParamValue::Flag),
            ParamKind::Text | ParamKind::MultilineText { .. } => {
                value.as_text().map(|s| ParamValue::Text(s.to_string()))
            }
            ParamKind::Action { .. } => None,
        };
        match coerced {
            Some(v) => {
                self.values.insert(id.to_string(), v);
                true
            }
            None => false,
        }
    }

    /// Numeric value of `id`, or 0.0 if undeclared.
    pub fn number(&self, id: &str) -> f64 {
        self.values
            .get(id)
            .and_then(ParamValue::as_number)
            .unwrap_or(0.0)
    }

    /// Flag value of `id`, or `false` if undeclared.
    pub fn flag(&self, id: &str) -> bool {
        self.values
            .get(id)
            .and_then(ParamValue::as_flag)
            .unwrap_or(false)
    }

    /// Text value of `id`, or the empty string if undeclared.
    pub fn text(&self, id: &str) -> &str {
        self.values
            .get(id)
            .and_then(ParamValue::as_text)
            .unwrap_or("")
    }
}
