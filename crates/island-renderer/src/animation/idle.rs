//! Seamless idle looping from a single play-once clip.
//!
//! Two copies of the clip alternate between an active and a standby slot.
//! Shortly before the active copy ends the standby copy is restarted and
//! the two are crossfaded, then the slot roles swap.

use crate::avatar::PoseLayer;

/// Longest crossfade between idle cycles, in seconds.
pub const MAX_IDLE_FADE: f32 = 1.0;
/// Crossfade length as a share of the clip length.
pub const IDLE_FADE_RATIO: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
struct WeightFade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

/// One playing copy of the idle clip. Plays once and holds its last pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipAction {
    time: f32,
    weight: f32,
    playing: bool,
    fade: Option<WeightFade>,
}

impl ClipAction {
    fn stopped() -> Self {
        Self {
            time: 0.0,
            weight: 0.0,
            playing: false,
            fade: None,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn is_running(&self) -> bool {
        self.playing
    }

    fn reset_and_play(&mut self) {
        self.time = 0.0;
        self.weight = 1.0;
        self.playing = true;
        self.fade = None;
    }

    fn fade_to(&mut self, to: f32, duration: f32) {
        self.fade = Some(WeightFade {
            from: self.weight,
            to,
            elapsed: 0.0,
            duration,
        });
    }

    fn advance(&mut self, delta: f32, clip_duration: f32) {
        if !self.playing {
            return;
        }
        self.time = (self.time + delta).min(clip_duration);

        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += delta;
            let t = if fade.duration > 0.0 {
                (fade.elapsed / fade.duration).min(1.0)
            } else {
                1.0
            };
            self.weight = fade.from + (fade.to - fade.from) * t;
            if t >= 1.0 {
                let to = fade.to;
                self.fade = None;
                if to <= 0.0 {
                    self.playing = false;
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdleLoop {
    slots: [ClipAction; 2],
    active: usize,
    clip_duration: f32,
    fade_duration: f32,
    cycles: u64,
}

impl IdleLoop {
    /// Start looping a clip of `clip_duration` seconds. Returns `None` for
    /// an empty or invalid clip.
    pub fn new(clip_duration: f32) -> Option<Self> {
        if !clip_duration.is_finite() || clip_duration <= 0.0 {
            return None;
        }
        let mut active = ClipAction::stopped();
        active.reset_and_play();
        Some(Self {
            slots: [active, ClipAction::stopped()],
            active: 0,
            clip_duration,
            fade_duration: MAX_IDLE_FADE.min(clip_duration * IDLE_FADE_RATIO),
            cycles: 0,
        })
    }

    pub fn clip_duration(&self) -> f32 {
        self.clip_duration
    }

    pub fn fade_duration(&self) -> f32 {
        self.fade_duration
    }

    pub fn active(&self) -> &ClipAction {
        &self.slots[self.active]
    }

    pub fn standby(&self) -> &ClipAction {
        &self.slots[1 - self.active]
    }

    /// Number of times the standby slot has been restarted.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn update(&mut self, delta: f32) {
        for slot in &mut self.slots {
            slot.advance(delta, self.clip_duration);
        }

        let standby = 1 - self.active;
        let threshold = self.clip_duration - self.fade_duration;
        if self.slots[self.active].time > threshold && !self.slots[standby].is_running() {
            self.slots[standby].reset_and_play();
            self.slots[standby].weight = 0.0;
            self.slots[standby].fade_to(1.0, self.fade_duration);
            self.slots[self.active].fade_to(0.0, self.fade_duration);
            self.active = standby;
            self.cycles += 1;
        }
    }

    /// Slots contributing to the current pose.
    pub fn layers(&self) -> Vec<PoseLayer> {
        self.slots
            .iter()
            .filter(|s| s.is_running() && s.weight > 0.0)
            .map(|s| PoseLayer {
                time: s.time,
                weight: s.weight,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_clip() {
        assert!(IdleLoop::new(0.0).is_none());
        assert!(IdleLoop::new(f32::NAN).is_none());
    }

    #[test]
    fn fade_is_capped() {
        assert_eq!(IdleLoop::new(10.0).unwrap().fade_duration(), 1.0);
        let short = IdleLoop::new(1.0).unwrap();
        assert!((short.fade_duration() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn crossfade_starts_near_end() {
        let mut idle = IdleLoop::new(4.0).unwrap();
        for _ in 0..175 {
            idle.update(1.0 / 60.0);
        }
        assert_eq!(idle.cycles(), 0);
        assert_eq!(idle.layers().len(), 1);

        for _ in 0..10 {
            idle.update(1.0 / 60.0);
        }
        assert_eq!(idle.cycles(), 1);
        assert!(idle.active().time() < 0.1);
        assert!(idle.standby().time() > 3.0);
        assert_eq!(idle.layers().len(), 2);
    }

    #[test]
    fn outgoing_slot_stops_after_fade() {
        let mut idle = IdleLoop::new(4.0).unwrap();
        for _ in 0..(60 * 4 + 10) {
            idle.update(1.0 / 60.0);
        }
        assert_eq!(idle.cycles(), 1);
        assert!(!idle.standby().is_running());
        assert!((idle.active().weight() - 1.0).abs() < 1e-6);
        assert_eq!(idle.layers().len(), 1);
    }

    #[test]
    fn weights_sum_to_one_during_crossfade() {
        let mut idle = IdleLoop::new(2.0).unwrap();
        for _ in 0..600 {
            idle.update(1.0 / 60.0);
            let total: f32 = idle.layers().iter().map(|l| l.weight).sum();
            assert!((total - 1.0).abs() < 1e-4, "total weight {total}");
        }
    }
}
