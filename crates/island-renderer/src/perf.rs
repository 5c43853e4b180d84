//! Frame timing for the render loop.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Longest frame delta handed to animation. Longer stalls are clamped so
/// fades and smoothing never jump.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

const SAMPLE_WINDOW: usize = 120;

/// Produces per-frame deltas and keeps a rolling FPS estimate.
pub struct FrameTimer {
    frame_times: VecDeque<Duration>,
    last_frame: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(SAMPLE_WINDOW),
            last_frame: start,
        }
    }

    /// Record a frame at `now` and return its delta in seconds.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_times.push_back(dt);
        if self.frame_times.len() > SAMPLE_WINDOW {
            self.frame_times.pop_front();
        }
        dt.min(MAX_FRAME_DELTA).as_secs_f32()
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Average frames per second over the sample window.
    pub fn fps(&self) -> f64 {
        let total: f64 = self.frame_times.iter().map(|d| d.as_secs_f64()).sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.frame_times.len() as f64 / total
    }

    pub fn sample_count(&self) -> usize {
        self.frame_times.len()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
