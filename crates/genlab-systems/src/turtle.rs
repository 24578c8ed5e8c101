use genlab_runtime::Segment;

/// Turtle-graphics interpretation of an L-system word.
///
/// `F` and `G` draw one unit forward, `f` moves without drawing, `+` and
/// `-` turn left and right by the turn angle, `|` turns around, `[` and
/// `]` push and pop the turtle state. Other symbols are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turtle {
    /// Turn angle in degrees.
    pub angle: f32,
    /// Initial heading in degrees; 0 points right, -90 points up.
    pub heading: f32,
}

#[derive(Debug, Clone, Copy)]
struct Pen {
    x: f32,
    y: f32,
    heading: f32,
}

impl Turtle {
    /// A turtle turning by `angle` degrees, starting at `heading` degrees.
    pub fn new(angle: f32, heading: f32) -> Self {
        Self { angle, heading }
    }

    /// Trace `word` into unit-length segments starting at the origin.
    pub fn trace(&self, word: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut stack: Vec<Pen> = Vec::new();
        let mut pen = Pen {
            x: 0.0,
            y: 0.0,
            heading: self.heading,
        };
        for symbol in word.chars() {
            match symbol {
                'F' | 'G' | 'f' => {
                    let radians = pen.heading.to_radians();
                    let (x, y) = (pen.x + radians.cos(), pen.y + radians.sin());
                    if symbol != 'f' {
                        segments.push(Segment {
                            x0: pen.x,
                            y0: pen.y,
                            x1: x,
                            y1: y,
                            depth: u16::try_from(stack.len()).unwrap_or(u16::MAX),
                        });
                    }
                    pen.x = x;
                    pen.y = y;
                }
                '+' => pen.heading -= self.angle,
                '-' => pen.heading += self.angle,
                '|' => pen.heading += 180.0,
                '[' => stack.push(pen),
                ']' => {
                    if let Some(saved) = stack.pop() {
                        pen = saved;
                    }
                }
                _ => {}
            }
        }
        segments
    }
}

/// Scale and translate `segments` in place so their bounding box is
/// centered in a `width` x `height` surface, leaving `margin` pixels on
/// every side.
pub fn fit(segments: &mut [Segment], width: u32, height: u32, margin: f32) {
    let Some(first) = segments.first() else {
        return;
    };
    let (mut min_x, mut min_y) = (first.x0.min(first.x1), first.y0.min(first.y1));
    let (mut max_x, mut max_y) = (first.x0.max(first.x1), first.y0.max(first.y1));
    for s in segments.iter() {
        min_x = min_x.min(s.x0).min(s.x1);
        min_y = min_y.min(s.y0).min(s.y1);
        max_x = max_x.max(s.x0).max(s.x1);
        max_y = max_y.max(s.y0).max(s.y1);
    }

    let avail_w = (width as f32 - 2.0 * margin).max(1.0);
    let avail_h = (height as f32 - 2.0 * margin).max(1.0);
    let span_w = max_x - min_x;
    let span_h = max_y - min_y;
    let scale = match (span_w > f32::EPSILON, span_h > f32::EPSILON) {
        (true, true) => (avail_w / span_w).min(avail_h / span_h),
        (true, false) => avail_w / span_w,
        (false, true) => avail_h / span_h,
        (false, false) => 1.0,
    };
    let offset_x = width as f32 / 2.0 - (min_x + span_w / 2.0) * scale;
    let offset_y = height as f32 / 2.0 - (min_y + span_h / 2.0) * scale;
    for s in segments.iter_mut() {
        s.x0 = s.x0 * scale + offset_x;
        s.y0 = s.y0 * scale + offset_y;
        s.x1 = s.x1 * scale + offset_x;
        s.y1 = s.y1 * scale + offset_y;
    }
}
