//! Parameter panel: controls built from the live process's declarations.
//!
//! The panel keeps the edit state of its controls (focus, text buffers,
//! last known values) and reports edits as [`PanelIntent`]s; it never
//! touches the process itself.

use macroquad::prelude::*;

use genlab_runtime::{PanelUpdate, ParamDescriptor, ParamKind, ParamValue, param::clamp_to};

use crate::theme::{GAP, LINE_H, ROW_H, draw_ui_text, ui};
use crate::widget::label::{draw_label, draw_label_clipped, draw_label_right};
use crate::widget::{Rect2, button, checkbox, input, slider, text_area};

/// An edit the host should forward to the lab.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelIntent {
    /// Store a new parameter value.
    Set {
        /// Parameter id.
        id: String,
        /// New value.
        value: ParamValue,
    },
    /// Fire an action parameter.
    Action(String),
}

#[derive(Debug, Clone)]
struct Control {
    descriptor: ParamDescriptor,
    value: Option<ParamValue>,
    buffer: String,
}

impl Control {
    fn new(descriptor: ParamDescriptor, value: Option<ParamValue>) -> Self {
        let buffer = value.as_ref().map(ToString::to_string).unwrap_or_default();
        Self {
            descriptor,
            value,
            buffer,
        }
    }

    fn is_text_entry(&self) -> bool {
        matches!(
            self.descriptor.kind,
            ParamKind::Number { .. } | ParamKind::Text | ParamKind::MultilineText { .. }
        )
    }

    fn number(&self) -> f64 {
        self.value.as_ref().and_then(ParamValue::as_number).unwrap_or(0.0)
    }

    fn flag(&self) -> bool {
        self.value.as_ref().and_then(ParamValue::as_flag).unwrap_or(false)
    }

    /// Height of the control, label included.
    fn height(&self) -> f32 {
        match &self.descriptor.kind {
            ParamKind::Checkbox | ParamKind::Action { .. } => ROW_H,
            ParamKind::MultilineText { rows } => LINE_H + (*rows).max(1) as f32 * LINE_H + 4.0,
            _ => LINE_H + ROW_H,
        }
    }

    /// Turn the edit buffer into a value. An unparsable buffer reverts to
    /// the last known value.
    fn commit(&mut self) -> Option<PanelIntent> {
        match commit_text(&self.descriptor.kind, &self.buffer) {
            Some(value) if Some(&value) != self.value.as_ref() => {
                self.buffer = value.to_string();
                self.value = Some(value.clone());
                Some(PanelIntent::Set {
                    id: self.descriptor.id.clone(),
                    value,
                })
            }
            Some(_) => None,
            None => {
                self.buffer = self.value.as_ref().map(ToString::to_string).unwrap_or_default();
                None
            }
        }
    }
}

/// Parse an edit buffer for a parameter of `kind`. Numbers are clamped to
/// their declared bounds.
pub fn commit_text(kind: &ParamKind, buffer: &str) -> Option<ParamValue> {
    match ParamValue::parse_for(kind, buffer)? {
        ParamValue::Number(n) if n.is_finite() => Some(ParamValue::Number(clamp_to(kind, n))),
        ParamValue::Number(_) => None,
        other => Some(other),
    }
}

/// Immediate-mode parameter panel.
#[derive(Debug, Default)]
pub struct ParamPanel {
    title: String,
    controls: Vec<Control>,
    message: Option<String>,
    focused: Option<usize>,
    scroll: f32,
    tooltip: Option<String>,
}

impl ParamPanel {
    /// An empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the panel from a lab update, dropping any edit in progress.
    pub fn apply(&mut self, update: PanelUpdate) {
        self.focused = None;
        self.scroll = 0.0;
        self.tooltip = None;
        match update {
            PanelUpdate::Populate { name, parameters } => {
                self.title = name;
                self.message = None;
                self.controls = parameters
                    .into_iter()
                    .map(|p| Control::new(p.descriptor, p.value))
                    .collect();
            }
            PanelUpdate::Unavailable { message } => {
                self.title.clear();
                self.message = Some(message);
                self.controls.clear();
            }
        }
    }

    /// Heading shown above the controls.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether the panel has no controls.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Whether a text field holds keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.focused.is_some()
    }

    /// Tooltip of the control under the mouse, as of the last draw.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Focus the text control `index`, committing the previous one.
    fn focus(&mut self, index: usize) -> Option<PanelIntent> {
        if self.focused == Some(index) {
            return None;
        }
        let committed = self.blur();
        if self.controls.get(index).is_some_and(Control::is_text_entry) {
            self.focused = Some(index);
        }
        committed
    }

    /// Drop keyboard focus, committing the focused field.
    pub fn blur(&mut self) -> Option<PanelIntent> {
        let index = self.focused.take()?;
        self.controls.get_mut(index)?.commit()
    }

    #[cfg(test)]
    fn edit(&mut self, id: &str, text: &str) {
        if let Some(index) = self.controls.iter().position(|c| c.descriptor.id == id) {
            let _ = self.focus(index);
            self.controls[index].buffer = text.to_string();
        }
    }

    fn content_height(&self) -> f32 {
        self.controls.iter().map(|c| c.height() + GAP).sum()
    }

    /// Draw the panel into `area` and collect this frame's edits.
    pub fn draw(&mut self, area: &Rect2, mouse: (f32, f32)) -> Vec<PanelIntent> {
        let mut intents = Vec::new();
        self.tooltip = None;

        if let Some(message) = &self.message {
            draw_label_clipped(message, area.x, area.y, area.w, ui::RED);
            return intents;
        }
        if self.controls.is_empty() {
            draw_label("No parameters.", area.x, area.y, ui::DARK_GRAY);
            return intents;
        }

        if area.contains(mouse.0, mouse.1) {
            let overflow = (self.content_height() - area.h).max(0.0);
            self.scroll = (self.scroll - crate::input::scroll_y() * 20.0).clamp(0.0, overflow);
        }

        let clicked = is_mouse_button_pressed(MouseButton::Left);
        let mut clicked_field = None;
        let mut y = area.y - self.scroll;
        for (index, control) in self.controls.iter_mut().enumerate() {
            let h = control.height();
            let rect = Rect2::new(area.x, y, area.w, h);
            y += h + GAP;
            if rect.y < area.y || rect.y + rect.h > area.y + area.h {
                continue;
            }
            if rect.contains(mouse.0, mouse.1) {
                self.tooltip = control.descriptor.tooltip.clone();
                if clicked && control.is_text_entry() {
                    clicked_field = Some(index);
                }
            }
            let active = self.focused == Some(index);
            intents.extend(draw_control(control, &rect, active, mouse));
        }

        if clicked {
            match clicked_field {
                Some(index) => {
                    crate::input::drain_chars();
                    intents.extend(self.focus(index));
                }
                None => intents.extend(self.blur()),
            }
        } else if let Some(index) = self.focused {
            let single_line = !matches!(
                self.controls[index].descriptor.kind,
                ParamKind::MultilineText { .. }
            );
            if crate::input::escape_pressed() || (single_line && crate::input::enter_pressed()) {
                intents.extend(self.blur());
            }
        }

        intents
    }
}

fn draw_control(
    control: &mut Control,
    rect: &Rect2,
    active: bool,
    mouse: (f32, f32),
) -> Option<PanelIntent> {
    let id = control.descriptor.id.clone();
    let label = control.descriptor.label.clone();
    match control.descriptor.kind.clone() {
        ParamKind::Slider { min, max, step } => {
            draw_ui_text(&label, rect.x, rect.y, ui::LIGHT_GRAY);
            draw_label_right(&format_number(control.number()), rect.x, rect.y, rect.w, ui::WHITE);
            let track = Rect2::new(rect.x, rect.y + LINE_H, rect.w, ROW_H);
            let value = slider::draw_slider(control.number(), (min, max), step, &track, mouse)?;
            control.value = Some(ParamValue::Number(value));
            control.buffer = value.to_string();
            Some(PanelIntent::Set {
                id,
                value: ParamValue::Number(value),
            })
        }
        ParamKind::Checkbox => {
            let flag = checkbox::draw_checkbox(&label, control.flag(), rect, mouse)?;
            control.value = Some(ParamValue::Flag(flag));
            Some(PanelIntent::Set {
                id,
                value: ParamValue::Flag(flag),
            })
        }
        ParamKind::Action { button_text } => {
            button::draw_button(&button_text, rect, mouse).then_some(PanelIntent::Action(id))
        }
        ParamKind::Number { .. } | ParamKind::Text => {
            draw_ui_text(&label, rect.x, rect.y, ui::LIGHT_GRAY);
            let field = Rect2::new(rect.x, rect.y + LINE_H, rect.w, ROW_H);
            control.buffer = input::draw_input(&control.buffer, "", active, &field);
            None
        }
        ParamKind::MultilineText { .. } => {
            draw_ui_text(&label, rect.x, rect.y, ui::LIGHT_GRAY);
            let field = Rect2::new(rect.x, rect.y + LINE_H, rect.w, rect.h - LINE_H);
            control.buffer = text_area::draw_text_area(&control.buffer, active, &field);
            None
        }
    }
}

/// Compact display of a slider value.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let s = format!("{value:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genlab_runtime::ParamSnapshot;

    fn populated() -> ParamPanel {
        let mut panel = ParamPanel::new();
        panel.apply(PanelUpdate::Populate {
            name: "L-System Tree".to_string(),
            parameters: vec![
                ParamSnapshot {
                    descriptor: ParamDescriptor::text("axiom", "Axiom"),
                    value: Some(ParamValue::Text("X".to_string())),
                },
                ParamSnapshot {
                    descriptor: ParamDescriptor::number("generations", "Generations", 0.0, 10.0, 1.0),
                    value: Some(ParamValue::Number(6.0)),
                },
                ParamSnapshot {
                    descriptor: ParamDescriptor::slider("angle", "Angle", 0.0, 180.0, 1.0),
                    value: Some(ParamValue::Number(25.0)),
                },
                ParamSnapshot {
                    descriptor: ParamDescriptor::action("regrow", "Regrow", "Regrow"),
                    value: None,
                },
            ],
        });
        panel
    }

    #[test]
    fn populate_builds_controls() {
        let panel = populated();
        assert_eq!(panel.title(), "L-System Tree");
        assert_eq!(panel.len(), 4);
        assert!(!panel.has_focus());
    }

    #[test]
    fn unavailable_clears_controls() {
        let mut panel = populated();
        panel.apply(PanelUpdate::Unavailable {
            message: "Error loading process 'x'".to_string(),
        });
        assert!(panel.is_empty());
        assert_eq!(panel.message.as_deref(), Some("Error loading process 'x'"));
    }

    #[test]
    fn blur_commits_changed_text() {
        let mut panel = populated();
        panel.edit("axiom", "F");
        assert!(panel.has_focus());
        assert_eq!(
            panel.blur(),
            Some(PanelIntent::Set {
                id: "axiom".to_string(),
                value: ParamValue::Text("F".to_string()),
            })
        );
        assert!(!panel.has_focus());
    }

    #[test]
    fn unchanged_text_commits_nothing() {
        let mut panel = populated();
        panel.edit("axiom", "X");
        assert_eq!(panel.blur(), None);
    }

    #[test]
    fn number_entry_is_clamped() {
        let mut panel = populated();
        panel.edit("generations", "40");
        assert_eq!(
            panel.blur(),
            Some(PanelIntent::Set {
                id: "generations".to_string(),
                value: ParamValue::Number(10.0),
            })
        );
    }

    #[test]
    fn bad_number_reverts_buffer() {
        let mut panel = populated();
        panel.edit("generations", "many");
        assert_eq!(panel.blur(), None);
        assert_eq!(panel.controls[1].buffer, "6");
    }

    #[test]
    fn switching_fields_commits_previous() {
        let mut panel = populated();
        panel.edit("axiom", "FX");
        let committed = panel.focus(1);
        assert!(matches!(committed, Some(PanelIntent::Set { ref id, .. }) if id == "axiom"));
        assert_eq!(panel.focused, Some(1));
    }

    #[test]
    fn buttons_never_take_focus() {
        let mut panel = populated();
        assert_eq!(panel.focus(3), None);
        assert!(!panel.has_focus());
    }

    #[test]
    fn commit_text_rejects_non_finite() {
        let kind = ParamKind::Number {
            min: None,
            max: None,
            step: None,
        };
        assert_eq!(commit_text(&kind, "NaN"), None);
        assert_eq!(commit_text(&kind, " 3.5 "), Some(ParamValue::Number(3.5)));
    }

    #[test]
    fn numbers_format_compactly() {
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(0.05), "0.05");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
    }
}
