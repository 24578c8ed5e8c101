//! The control sidebar: process selector, transport buttons, speed,
//! presentation settings, info readout and the parameter panel.

use macroquad::prelude::*;

use genlab_runtime::{Lab, LabStatus, RunState};

use crate::app::Intent;
use crate::panel::ParamPanel;
use crate::renderer::CanvasRenderer;
use crate::theme::palettes::{self, PALETTES};
use crate::theme::{GAP, LINE_H, MARGIN, ROW_H, ui};
use crate::widget::label::{draw_label, draw_label_clipped, draw_label_right};
use crate::widget::{Column, Rect2, button, checkbox, draw_separator, select, slider};

const SHORTCUTS: &str = "Space play  S step  R reset  C clear";

/// Draw the sidebar and collect this frame's intents.
pub fn draw_sidebar(
    lab: &Lab<CanvasRenderer>,
    panel: &mut ParamPanel,
    area: &Rect2,
    mouse: (f32, f32),
) -> Vec<Intent> {
    let mut intents = Vec::new();
    draw_rectangle(area.x, area.y, area.w, area.h, ui::DARK_BLUE);
    draw_rectangle(area.x + area.w - 1.0, area.y, 1.0, area.h, ui::DARK_GRAY);

    let inner = area.inset(MARGIN);
    let mut col = Column::new(&inner, GAP);
    draw_label("GenLab", inner.x, col.row(LINE_H).y, ui::YELLOW);
    col.space(GAP);

    // Process selector
    let info = lab.info();
    draw_label("Process", inner.x, col.row(LINE_H).y, ui::LIGHT_GRAY);
    let entries = lab.registry().entries();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    let selected = info
        .id
        .as_deref()
        .and_then(|id| entries.iter().position(|e| e.id == id))
        .unwrap_or(0);
    if let Some(index) = select::draw_select(&names, selected, &col.row(ROW_H), mouse) {
        intents.push(Intent::Select(entries[index].id.clone()));
    }

    // Transport
    let play = if info.state == RunState::Running { "Pause" } else { "Play" };
    let buttons = col.row(ROW_H).columns(4, 4.0);
    let transport = [
        (play, Intent::TogglePlay),
        ("Step", Intent::Step),
        ("Reset", Intent::Reset),
        ("Clear", Intent::Clear),
    ];
    for ((label, intent), rect) in transport.into_iter().zip(&buttons) {
        if button::draw_button(label, rect, mouse) {
            intents.push(intent);
        }
    }

    // Speed
    let (min_rate, max_rate) = lab.scheduler().rate_range();
    let speed = col.row(LINE_H);
    draw_label("Speed", speed.x, speed.y, ui::LIGHT_GRAY);
    draw_label_right(&format!("{} steps/s", info.rate), speed.x, speed.y, speed.w, ui::WHITE);
    if let Some(rate) = slider::draw_slider(
        f64::from(info.rate),
        (f64::from(min_rate), f64::from(max_rate)),
        1.0,
        &col.row(ROW_H),
        mouse,
    ) {
        intents.push(Intent::SetRate(rate.round() as u32));
    }

    // Presentation
    draw_label("Palette", inner.x, col.row(LINE_H).y, ui::LIGHT_GRAY);
    let palette_names: Vec<&str> = PALETTES.iter().map(|p| p.name).collect();
    // Process hints may override the selected palette.
    let current = match lab.renderer() {
        Some(renderer) => renderer.palette_name(),
        None => lab.visualization().palette.as_str(),
    };
    let palette_index = palettes::index_of(current).unwrap_or(0);
    if let Some(index) = select::draw_select(&palette_names, palette_index, &col.row(ROW_H), mouse) {
        intents.push(Intent::SetPalette(palette_names[index].to_string()));
    }
    let grid = lab.visualization().grid_enabled;
    if let Some(enabled) = checkbox::draw_checkbox("Show grid", grid, &col.row(ROW_H), mouse) {
        intents.push(Intent::SetGrid(enabled));
    }

    // Info readout
    draw_separator(inner.x, col.y(), inner.w);
    col.space(GAP);
    let population = info
        .population
        .map_or_else(|| "n/a".to_string(), |p| format!("{p}"));
    for (key, value) in [
        ("Iteration", info.iteration.to_string()),
        ("Population", population),
        ("State", info.state.to_string()),
    ] {
        let row = col.row(LINE_H);
        draw_label(key, row.x, row.y, ui::LIGHT_GRAY);
        draw_label_right(&value, row.x, row.y, row.w, ui::WHITE);
    }
    if let LabStatus::NoProcess { message } = lab.status() {
        draw_label_clipped(message, inner.x, col.row(LINE_H).y, inner.w, ui::RED);
    }

    // Parameters
    draw_separator(inner.x, col.y(), inner.w);
    col.space(GAP);
    if !panel.title().is_empty() {
        draw_label_clipped(panel.title(), inner.x, col.row(LINE_H).y, inner.w, ui::YELLOW);
    }
    let footer_h = LINE_H * 2.0 + GAP;
    let top = col.y();
    let panel_area = Rect2::new(
        inner.x,
        top,
        inner.w,
        (inner.y + inner.h - footer_h - top).max(0.0),
    );
    intents.extend(panel.draw(&panel_area, mouse).into_iter().map(Intent::Param));

    // Footer
    let footer_y = inner.y + inner.h - footer_h + GAP;
    if let Some(tip) = panel.tooltip() {
        draw_label_clipped(tip, inner.x, footer_y, inner.w, ui::LIGHT_GRAY);
    }
    draw_label_clipped(SHORTCUTS, inner.x, footer_y + LINE_H, inner.w, ui::DARK_GRAY);

    intents
}
