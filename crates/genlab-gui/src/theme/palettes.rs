//! Color schemes for the drawing surface.

use macroquad::prelude::Color;

/// A named set of colors for cells, fields and line drawings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Name shown in the palette selector.
    pub name: &'static str,
    /// Surface background.
    pub background: Color,
    /// Firing or alive cells.
    pub firing: Color,
    /// Refractory cells and any other nonzero state.
    pub refractory: Color,
    /// Field ramp from low through mid to high.
    pub ramp: [Color; 3],
    /// Segment color at the root of a drawing.
    pub trunk: Color,
    /// Segment color at the deepest branches.
    pub tip: Color,
    /// Grid lines.
    pub grid: Color,
}

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::new(r, g, b, 1.0)
}

/// Palettes in selector order. The first one is the fallback.
pub const PALETTES: [Palette; 4] = [
    Palette {
        name: "classic",
        background: rgb(0.04, 0.05, 0.08),
        firing: rgb(0.95, 0.95, 0.90),
        refractory: rgb(0.16, 0.45, 0.95),
        ramp: [rgb(0.0, 0.0, 0.0), rgb(0.25, 0.55, 0.85), rgb(1.0, 1.0, 1.0)],
        trunk: rgb(0.55, 0.40, 0.25),
        tip: rgb(0.45, 0.90, 0.35),
        grid: Color::new(1.0, 1.0, 1.0, 0.08),
    },
    Palette {
        name: "ember",
        background: rgb(0.05, 0.02, 0.02),
        firing: rgb(1.0, 0.75, 0.20),
        refractory: rgb(0.75, 0.15, 0.05),
        ramp: [rgb(0.02, 0.0, 0.0), rgb(0.85, 0.25, 0.02), rgb(1.0, 0.95, 0.60)],
        trunk: rgb(0.60, 0.10, 0.05),
        tip: rgb(1.0, 0.80, 0.25),
        grid: Color::new(1.0, 0.6, 0.3, 0.08),
    },
    Palette {
        name: "ocean",
        background: rgb(0.01, 0.04, 0.09),
        firing: rgb(0.40, 0.95, 0.90),
        refractory: rgb(0.10, 0.30, 0.70),
        ramp: [rgb(0.0, 0.02, 0.08), rgb(0.05, 0.45, 0.65), rgb(0.75, 1.0, 0.95)],
        trunk: rgb(0.10, 0.35, 0.60),
        tip: rgb(0.55, 0.95, 0.85),
        grid: Color::new(0.5, 0.8, 1.0, 0.08),
    },
    Palette {
        name: "mono",
        background: rgb(0.0, 0.0, 0.0),
        firing: rgb(1.0, 1.0, 1.0),
        refractory: rgb(0.45, 0.45, 0.45),
        ramp: [rgb(0.0, 0.0, 0.0), rgb(0.5, 0.5, 0.5), rgb(1.0, 1.0, 1.0)],
        trunk: rgb(0.55, 0.55, 0.55),
        tip: rgb(1.0, 1.0, 1.0),
        grid: Color::new(1.0, 1.0, 1.0, 0.1),
    },
];

/// Look up a palette by name, falling back to the first one.
pub fn palette(name: &str) -> &'static Palette {
    PALETTES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .unwrap_or(&PALETTES[0])
}

/// Position of `name` in [`PALETTES`], if it is known.
pub fn index_of(name: &str) -> Option<usize> {
    PALETTES.iter().position(|p| p.name.eq_ignore_ascii_case(name))
}

fn lerp(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}

impl Palette {
    /// Color of a cell state. State 0 is empty and never drawn.
    pub fn cell(&self, state: u8) -> Color {
        match state {
            0 => self.background,
            1 => self.firing,
            _ => self.refractory,
        }
    }

    /// Field color for a sample in `0.0..=1.0`; out-of-range input is clamped.
    pub fn shade(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t < 0.5 {
            lerp(self.ramp[0], self.ramp[1], t * 2.0)
        } else {
            lerp(self.ramp[1], self.ramp[2], (t - 0.5) * 2.0)
        }
    }

    /// Segment color for branch `depth` out of `max_depth`.
    pub fn branch(&self, depth: u16, max_depth: u16) -> Color {
        if max_depth == 0 {
            return self.trunk;
        }
        lerp(self.trunk, self.tip, f32::from(depth) / f32::from(max_depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(palette("Ember").name, "ember");
        assert_eq!(index_of("OCEAN"), Some(2));
    }

    #[test]
    fn unknown_name_falls_back_to_classic() {
        assert_eq!(palette("plaid").name, "classic");
        assert_eq!(index_of("plaid"), None);
    }

    #[test]
    fn shade_hits_ramp_stops() {
        let p = palette("ocean");
        assert!(close(p.shade(0.0), p.ramp[0]));
        assert!(close(p.shade(0.5), p.ramp[1]));
        assert!(close(p.shade(1.0), p.ramp[2]));
        assert!(close(p.shade(7.0), p.ramp[2]));
        assert!(close(p.shade(f32::NAN), p.ramp[0]));
    }

    #[test]
    fn branch_runs_from_trunk_to_tip() {
        let p = palette("classic");
        assert!(close(p.branch(0, 6), p.trunk));
        assert!(close(p.branch(6, 6), p.tip));
        assert!(close(p.branch(3, 0), p.trunk));
    }

    #[test]
    fn cell_states_map_to_colors() {
        let p = palette("mono");
        assert!(close(p.cell(1), p.firing));
        assert!(close(p.cell(2), p.refractory));
        assert!(close(p.cell(9), p.refractory));
    }
}
