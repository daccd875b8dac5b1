/// Frame clock consumed by scenes: delta since the last frame and time since start.
pub trait Clock {
    /// Seconds elapsed since the previous frame.
    fn delta_time(&self) -> f32;
    /// Seconds elapsed since the clock started.
    fn time_since_init(&self) -> f32;
}

/// Monotonic clock advanced explicitly by the frame driver.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    delta: f32,
    elapsed: f32,
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame that lasted `dt` seconds. Negative deltas are clamped to zero.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt.max(0.0);
        self.elapsed += self.delta;
        self.frame += 1;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Clock for FrameClock {
    fn delta_time(&self) -> f32 {
        self.delta
    }

    fn time_since_init(&self) -> f32 {
        self.elapsed
    }
}
