/// A toroidal scalar field of chemical trail intensity in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailField {
    width: usize,
    height: usize,
    values: Vec<f32>,
    scratch: Vec<f32>,
}

impl TrailField {
    /// A zeroed field. Dimensions are raised to at least 1.
    pub fn new(width: usize, height: usize) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            values: vec![0.0; width * height],
            scratch: vec![0.0; width * height],
        }
    }

    /// Field width in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in samples.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major samples.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    fn index(&self, x: f32, y: f32) -> usize {
        let col = (x.floor() as i64).rem_euclid(self.width as i64) as usize;
        let row = (y.floor() as i64).rem_euclid(self.height as i64) as usize;
        row * self.width + col
    }

    /// Intensity at a wrapped position.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values[self.index(x, y)]
    }

    /// Add `amount` at a wrapped position, saturating at 1.0.
    pub fn deposit(&mut self, x: f32, y: f32, amount: f32) {
        if self.values.is_empty() {
            return;
        }
        let i = self.index(x, y);
        self.values[i] = (self.values[i] + amount).min(1.0);
    }

    /// Blur with a 3x3 mean filter, then scale every sample by
    /// `1.0 - decay`.
    pub fn diffuse(&mut self, decay: f32) {
        if self.values.is_empty() {
            return;
        }
        let keep = (1.0 - decay).clamp(0.0, 1.0);
        let (w, h) = (self.width as i64, self.height as i64);
        for row in 0..h {
            for col in 0..w {
                let mut sum = 0.0;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let c = (col + dx).rem_euclid(w) as usize;
                        let r = (row + dy).rem_euclid(h) as usize;
                        sum += self.values[r * self.width + c];
                    }
                }
                self.scratch[row as usize * self.width + col as usize] = sum / 9.0 * keep;
            }
        }
        std::mem::swap(&mut self.values, &mut self.scratch);
    }

    /// Zero every sample.
    pub fn clear(&mut self) {
        self.values.fill(0.0);
    }

    /// Sum of all samples.
    pub fn total(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Drop the sample buffers. The field reads as zero afterwards.
    pub fn release(&mut self) {
        self.values = Vec::new();
        self.scratch = Vec::new();
    }
}
