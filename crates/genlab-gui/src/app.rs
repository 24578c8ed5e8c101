//! Application state: the lab, its canvas placement and the sidebar.
//!
//! Window input is turned into lab calls here. The sidebar only reports
//! [`Intent`]s, which [`App::apply`] carries out.

use std::time::Duration;

use macroquad::prelude::*;

use genlab_runtime::{Lab, LabConfig, RunState};

use crate::input::{self, Shortcut};
use crate::panel::{PanelIntent, ParamPanel};
use crate::renderer::CanvasRenderer;
use crate::sidebar;
use crate::theme::{MARGIN, SIDEBAR_W};
use crate::widget::Rect2;

/// Something the user asked for through the sidebar or the keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Switch to the process with this id.
    Select(String),
    /// Start or pause automatic stepping.
    TogglePlay,
    /// Advance one step.
    Step,
    /// Reinitialize with random state.
    Reset,
    /// Reinitialize blank.
    Clear,
    /// Change steps per second.
    SetRate(u32),
    /// Change the canvas palette.
    SetPalette(String),
    /// Toggle grid lines.
    SetGrid(bool),
    /// A parameter edit from the panel.
    Param(PanelIntent),
}

impl From<Shortcut> for Intent {
    fn from(shortcut: Shortcut) -> Self {
        match shortcut {
            Shortcut::TogglePlay => Self::TogglePlay,
            Shortcut::Step => Self::Step,
            Shortcut::Reset => Self::Reset,
            Shortcut::Clear => Self::Clear,
        }
    }
}

/// Where the canvas goes in a window of `screen_w` x `screen_h`.
pub fn canvas_rect(screen_w: f32, screen_h: f32) -> Rect2 {
    Rect2::new(
        SIDEBAR_W + MARGIN,
        MARGIN,
        (screen_w - SIDEBAR_W - MARGIN * 2.0).max(1.0),
        (screen_h - MARGIN * 2.0).max(1.0),
    )
}

/// Where the sidebar goes in a window `screen_h` tall.
pub fn sidebar_rect(screen_h: f32) -> Rect2 {
    Rect2::new(0.0, 0.0, SIDEBAR_W, screen_h)
}

/// Shared application state.
#[derive(Debug)]
pub struct App {
    lab: Lab<CanvasRenderer>,
    panel: ParamPanel,
    canvas: Rect2,
    last_mouse: (f32, f32),
}

impl App {
    /// Create the lab with every built-in process kind registered.
    pub fn new(config: &LabConfig) -> Self {
        let lab = Lab::new(genlab_systems::registry(), config, CanvasRenderer::new());
        Self {
            lab,
            panel: ParamPanel::new(),
            canvas: Rect2::new(0.0, 0.0, 0.0, 0.0),
            last_mouse: (0.0, 0.0),
        }
    }

    /// Size the surface for the current window and load the initial process.
    pub fn start(&mut self) {
        self.canvas = canvas_rect(screen_width(), screen_height());
        self.lab.place_surface(self.canvas.x, self.canvas.y);
        self.lab.apply_resize(self.canvas.w, self.canvas.h);
        self.lab.start();
        self.sync_panel();
    }

    /// The lab being hosted.
    pub fn lab(&self) -> &Lab<CanvasRenderer> {
        &self.lab
    }

    /// Stop the frame loop and release the live process.
    pub fn shutdown(&mut self) {
        self.lab.stop();
    }

    fn sync_panel(&mut self) {
        if let Some(update) = self.lab.take_panel_update() {
            self.panel.apply(update);
        }
    }

    /// Carry out one intent.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Select(id) => {
                self.lab.switch_to(&id);
            }
            Intent::TogglePlay => {
                self.lab.toggle_play_pause();
            }
            Intent::Step => self.lab.step_once(),
            Intent::Reset => self.lab.reset(),
            Intent::Clear => self.lab.clear(),
            Intent::SetRate(rate) => self.lab.set_rate(rate),
            Intent::SetPalette(name) => self.lab.set_palette(&name),
            Intent::SetGrid(enabled) => self.lab.set_grid_enabled(enabled),
            Intent::Param(PanelIntent::Set { id, value }) => self.lab.set_param_value(&id, value),
            Intent::Param(PanelIntent::Action(id)) => self.lab.trigger_action(&id),
        }
        self.sync_panel();
    }

    /// Feed window input to the lab and run one lab frame.
    pub fn update(&mut self, now: Duration) {
        let canvas = canvas_rect(screen_width(), screen_height());
        if canvas != self.canvas {
            self.lab.place_surface(canvas.x, canvas.y);
            if (canvas.w, canvas.h) != (self.canvas.w, self.canvas.h) {
                self.lab.request_resize(canvas.w, canvas.h, now);
            }
            self.canvas = canvas;
        }

        let mouse = mouse_position();
        let moved = mouse != self.last_mouse;
        self.last_mouse = mouse;
        let over = self.lab.geometry().contains(mouse.0, mouse.1);
        for event in input::pointer_events(over, moved) {
            self.lab.pointer(event);
        }

        if !self.panel.has_focus() {
            for shortcut in input::pressed_shortcuts() {
                self.apply(shortcut.into());
            }
        }

        self.lab.frame(now);
    }

    /// Draw the canvas and the sidebar, returning the sidebar's intents.
    pub fn draw(&mut self) -> Vec<Intent> {
        if let Some(renderer) = self.lab.renderer() {
            renderer.present(&self.canvas);
        }
        let running = self.lab.scheduler().state() == RunState::Running;
        draw_rectangle_lines(
            self.canvas.x - 1.0,
            self.canvas.y - 1.0,
            self.canvas.w + 2.0,
            self.canvas.h + 2.0,
            1.0,
            if running {
                crate::theme::ui::GREEN
            } else {
                crate::theme::ui::DARK_GRAY
            },
        );

        let area = sidebar_rect(screen_height());
        sidebar::draw_sidebar(&self.lab, &mut self.panel, &area, self.last_mouse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_sits_right_of_sidebar() {
        let r = canvas_rect(1180.0, 760.0);
        assert_eq!(r.x, SIDEBAR_W + MARGIN);
        assert_eq!(r.y, MARGIN);
        assert_eq!(r.w, 1180.0 - SIDEBAR_W - 2.0 * MARGIN);
        assert_eq!(r.h, 760.0 - 2.0 * MARGIN);
    }

    #[test]
    fn tiny_window_keeps_canvas_non_empty() {
        let r = canvas_rect(100.0, 10.0);
        assert_eq!((r.w, r.h), (1.0, 1.0));
    }

    #[test]
    fn canvas_and_sidebar_do_not_overlap() {
        let canvas = canvas_rect(900.0, 600.0);
        let sidebar = sidebar_rect(600.0);
        assert!(sidebar.x + sidebar.w <= canvas.x);
    }

    #[test]
    fn shortcuts_become_intents() {
        assert_eq!(Intent::from(Shortcut::TogglePlay), Intent::TogglePlay);
        assert_eq!(Intent::from(Shortcut::Step), Intent::Step);
        assert_eq!(Intent::from(Shortcut::Reset), Intent::Reset);
        assert_eq!(Intent::from(Shortcut::Clear), Intent::Clear);
    }
}
