use rand::Rng;

/// A rectangular grid of small integer cell states.
///
/// State 0 is empty. With wrapping enabled the grid is a torus: the
/// neighbors of an edge cell include cells on the opposite edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    cols: usize,
    rows: usize,
    wrap: bool,
    cells: Vec<u8>,
    next: Vec<u8>,
}

impl CellGrid {
    /// An empty wrapping grid.
    pub fn new(cols: usize, rows: usize) -> Self {
        let n = cols * rows;
        Self {
            cols,
            rows,
            wrap: true,
            cells: vec![0; n],
            next: vec![0; n],
        }
    }

    /// Builder form of [`CellGrid::set_wrap`].
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Enable or disable toroidal wrapping.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Whether neighborhoods wrap around the edges.
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major cell states.
    pub fn states(&self) -> &[u8] {
        &self.cells
    }

    /// State at (`col`, `row`); out-of-range positions read as empty.
    pub fn get(&self, col: usize, row: usize) -> u8 {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col]
        } else {
            0
        }
    }

    /// Set the state at (`col`, `row`). Out-of-range positions are ignored.
    pub fn set(&mut self, col: usize, row: usize, state: u8) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = state;
        }
    }

    /// Set every cell to `state`.
    pub fn fill(&mut self, state: u8) {
        self.cells.fill(state);
    }

    /// Set each cell to `state` with probability `density`, otherwise empty.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64, state: u8) {
        let p = if density.is_finite() {
            density.clamp(0.0, 1.0)
        } else {
            0.0
        };
        for cell in &mut self.cells {
            *cell = if rng.random_bool(p) { state } else { 0 };
        }
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: u8) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Number of Moore neighbors of (`col`, `row`) in `state`.
    pub fn neighbors(&self, col: usize, row: usize, state: u8) -> u8 {
        let (cols, rows) = (self.cols as i64, self.rows as i64);
        let mut n = 0;
        for dy in -1..=1_i64 {
            for dx in -1..=1_i64 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (c, r) = (col as i64 + dx, row as i64 + dy);
                let (c, r) = if self.wrap {
                    (c.rem_euclid(cols), r.rem_euclid(rows))
                } else if c < 0 || r < 0 || c >= cols || r >= rows {
                    continue;
                } else {
                    (c, r)
                };
                if self.cells[r as usize * self.cols + c as usize] == state {
                    n += 1;
                }
            }
        }
        n
    }

    /// Compute one generation. `rule` maps a cell's state and its count of
    /// neighbors in state `counted` to the cell's next state.
    pub fn advance(&mut self, counted: u8, rule: impl Fn(u8, u8) -> u8) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let i = row * self.cols + col;
                let n = self.neighbors(col, row, counted);
                let next = rule(self.cells[i], n);
                self.next[i] = next;
            }
        }
        std::mem::swap(&mut self.cells, &mut self.next);
    }

    /// Set the cells within `radius` of (`col`, `row`) to `state`.
    ///
    /// Positions past an edge wrap when wrapping is enabled and are
    /// dropped otherwise.
    pub fn paint(&mut self, col: i64, row: i64, radius: i64, state: u8) {
        if self.cells.is_empty() {
            return;
        }
        let (cols, rows) = (self.cols as i64, self.rows as i64);
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let (c, r) = (col + dx, row + dy);
                let (c, r) = if self.wrap {
                    (c.rem_euclid(cols), r.rem_euclid(rows))
                } else if c < 0 || r < 0 || c >= cols || r >= rows {
                    continue;
                } else {
                    (c, r)
                };
                self.cells[r as usize * self.cols + c as usize] = state;
            }
        }
    }

    /// A grid of the new dimensions holding this grid's overlapping region.
    pub fn resized(&self, cols: usize, rows: usize) -> Self {
        let mut grid = Self::new(cols, rows).with_wrap(self.wrap);
        for row in 0..rows.min(self.rows) {
            for col in 0..cols.min(self.cols) {
                grid.cells[row * cols + col] = self.cells[row * self.cols + col];
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn blinker() -> CellGrid {
        let mut grid = CellGrid::new(5, 5);
        grid.set(1, 2, 1);
        grid.set(2, 2, 1);
        grid.set(3, 2, 1);
        grid
    }

    fn life(state: u8, n: u8) -> u8 {
        match (state, n) {
            (1, 2 | 3) | (0, 3) => 1,
            _ => 0,
        }
    }

    #[test]
    fn blinker_oscillates() {
        let mut grid = blinker();
        grid.advance(1, life);
        assert_eq!(grid.count(1), 3);
        assert_eq!(grid.get(2, 1), 1);
        assert_eq!(grid.get(2, 3), 1);
        assert_eq!(grid.get(1, 2), 0);
        grid.advance(1, life);
        assert_eq!(grid, blinker());
    }

    #[test]
    fn corner_neighbors_depend_on_wrap() {
        let mut grid = CellGrid::new(4, 4);
        grid.set(3, 3, 1);
        grid.set(3, 0, 1);
        grid.set(0, 3, 1);
        assert_eq!(grid.neighbors(0, 0, 1), 3);
        grid.set_wrap(false);
        assert_eq!(grid.neighbors(0, 0, 1), 0);
    }

    #[test]
    fn out_of_range_access_is_ignored() {
        let mut grid = CellGrid::new(2, 2);
        grid.set(5, 5, 1);
        assert_eq!(grid.get(5, 5), 0);
        assert_eq!(grid.count(1), 0);
    }

    #[test]
    fn randomize_respects_density_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut grid = CellGrid::new(10, 10);
        grid.randomize(&mut rng, 1.0, 2);
        assert_eq!(grid.count(2), 100);
        grid.randomize(&mut rng, 0.0, 2);
        assert_eq!(grid.count(0), 100);
        grid.randomize(&mut rng, f64::NAN, 2);
        assert_eq!(grid.count(0), 100);
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut grid = CellGrid::new(4, 3);
        grid.set(0, 0, 1);
        grid.set(3, 2, 1);
        grid.set(1, 1, 2);

        let smaller = grid.resized(2, 2);
        assert_eq!(smaller.get(0, 0), 1);
        assert_eq!(smaller.get(1, 1), 2);
        assert_eq!(smaller.count(1), 1);

        let larger = grid.resized(6, 5);
        assert_eq!(larger.get(3, 2), 1);
        assert_eq!(larger.count(0), 30 - 3);
    }

    #[test]
    fn paint_wraps_or_clips() {
        let mut grid = CellGrid::new(5, 5);
        grid.paint(0, 0, 1, 1);
        assert_eq!(grid.get(4, 0), 1);
        assert_eq!(grid.get(0, 4), 1);
        assert_eq!(grid.count(1), 5);

        let mut clipped = CellGrid::new(5, 5).with_wrap(false);
        clipped.paint(0, 0, 1, 1);
        assert_eq!(clipped.count(1), 3);
        clipped.paint(-10, -10, 0, 1);
        assert_eq!(clipped.count(1), 3);
    }
}
