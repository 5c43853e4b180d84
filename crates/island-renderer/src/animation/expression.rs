//! Expression weight fading driven by performance commands.

use std::time::{Duration, Instant};

use island_bridge::Performance;
use island_common::{DeadlineTimer, Face};

use crate::avatar::AvatarModel;

/// Per-second rate at which the applied weight chases its target.
pub const EXPRESSION_FADE_RATE: f32 = 3.0;
/// Weights below this snap to zero once the target is also below it.
pub const EXPRESSION_SNAP: f32 = 0.01;

/// Fades a single named expression toward the latest performance's
/// intensity, and back to zero when the performance expires.
#[derive(Debug, Default)]
pub struct ExpressionFader {
    face: Option<Face>,
    clear: Option<Face>,
    weight: f32,
    target: f32,
    expiry: DeadlineTimer,
}

impl ExpressionFader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face(&self) -> Option<Face> {
        self.face
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn expiry_pending(&self) -> bool {
        self.expiry.is_pending()
    }

    /// Start fading toward `performance`. A different face takes over the
    /// current weight; the previous face is zeroed on the next update.
    pub fn trigger(&mut self, performance: &Performance, now: Instant) {
        if self.face != Some(performance.face) {
            // Only the face already written to the model needs zeroing. A face
            // replaced before any update never received a weight.
            if self.clear.is_none() {
                self.clear = self.face;
            }
            self.face = Some(performance.face);
        }
        self.target = performance.intensity.clamp(0.0, 1.0);
        let duration =
            Duration::try_from_secs_f32(performance.duration.max(0.0)).unwrap_or(Duration::MAX);
        self.expiry.schedule(now, duration);
        tracing::debug!(
            face = %performance.face,
            intensity = self.target,
            duration = performance.duration,
            "expression triggered"
        );
    }

    pub fn update<M: AvatarModel>(&mut self, model: &mut M, delta: f32, now: Instant) {
        if let Some(previous) = self.clear.take() {
            model.set_expression_weight(previous, 0.0);
        }
        if self.expiry.poll(now).is_some() {
            self.target = 0.0;
        }
        let Some(face) = self.face else {
            return;
        };

        self.weight += (self.target - self.weight) * (EXPRESSION_FADE_RATE * delta).min(1.0);
        if self.weight < EXPRESSION_SNAP && self.target < EXPRESSION_SNAP {
            self.weight = 0.0;
        }
        model.set_expression_weight(face, self.weight);
    }
}
