//! Fixed-rate cursor sampling.

use std::time::Duration;

/// Roughly 30 Hz, decoupled from the frame rate.
pub const MOUSE_SAMPLE_INTERVAL: Duration = Duration::from_millis(33);

/// Where the cursor is, relative to the surface's top-left corner.
pub trait CursorSource {
    fn cursor(&self) -> Option<(f64, f64)>;
}

/// Latest cursor position reported by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestCursor {
    position: Option<(f64, f64)>,
}

impl LatestCursor {
    pub fn set(&mut self, x: f64, y: f64) {
        self.position = Some((x, y));
    }
}

impl CursorSource for LatestCursor {
    fn cursor(&self) -> Option<(f64, f64)> {
        self.position
    }
}

/// Turns cursor positions into deltas from the surface center. Only a
/// changed delta is reported; older samples are simply superseded.
#[derive(Debug)]
pub struct MouseSampler<C> {
    source: C,
    last: Option<(f64, f64)>,
}

impl<C: CursorSource> MouseSampler<C> {
    pub fn new(source: C) -> Self {
        Self { source, last: None }
    }

    pub fn source_mut(&mut self) -> &mut C {
        &mut self.source
    }

    pub fn sample(&mut self, center: (f64, f64)) -> Option<(f64, f64)> {
        let (x, y) = self.source.cursor()?;
        let delta = (x - center.0, y - center.1);
        if self.last == Some(delta) {
            return None;
        }
        self.last = Some(delta);
        Some(delta)
    }
}
