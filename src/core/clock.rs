use std::time::Instant;

/// Delta clock for the redraw loop.
///
/// Ticked once at the top of each `RedrawRequested`; the returned delta
/// feeds the scene's sun timer so animation speed is independent of the
/// frame rate.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    /// Start counting from now; the first tick measures against this
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Seconds elapsed since the previous frame, advancing the clock
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
