use std::time::{Duration, Instant};

use glam::Vec3;
use island_bridge::Performance;
use island_common::{AgentState, CameraMode};
use island_config::CameraConfig;

use super::expression::ExpressionFader;
use super::idle::IdleLoop;
use super::look::{look_target, target_angles, LookTracker};
use crate::avatar::{AvatarModel, HumanBone};

/// Per-avatar animation state, advanced once per rendered frame.
///
/// Bridge commands only record intent here (latest performance, latest
/// cursor delta, framing mode); [`AnimationEngine::update`] applies it.
#[derive(Debug)]
pub struct AnimationEngine {
    idle: Option<IdleLoop>,
    expression: ExpressionFader,
    look: LookTracker,
    mouse: (f32, f32),
    mode: CameraMode,
    follow_mouse: bool,
    agent_state: AgentState,
    body_span: Option<f32>,
    last_action: Option<String>,
    clock: Instant,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::with_clock(Instant::now())
    }

    /// Start the engine's frame clock at `start`.
    pub fn with_clock(start: Instant) -> Self {
        Self {
            idle: None,
            expression: ExpressionFader::new(),
            look: LookTracker::new(),
            mouse: (0.0, 0.0),
            mode: CameraMode::Head,
            follow_mouse: false,
            agent_state: AgentState::Idle,
            body_span: None,
            last_action: None,
            clock: start,
        }
    }

    /// Bind to a freshly loaded model: start its idle loop and measure
    /// the head-to-hips span used for body framing.
    pub fn attach<M: AvatarModel>(&mut self, model: &M) {
        self.idle = model.idle_clip_duration().and_then(IdleLoop::new);
        self.body_span = match (
            model.bone_world_position(HumanBone::Head),
            model.bone_world_position(HumanBone::Hips),
        ) {
            (Some(head), Some(hips)) if head.y > hips.y => Some(head.y - hips.y),
            _ => None,
        };
        tracing::info!(
            idle = self.idle.is_some(),
            body_span = ?self.body_span,
            "avatar attached"
        );
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    pub fn set_mouse_delta(&mut self, dx: f64, dy: f64) {
        self.mouse = (dx as f32, dy as f32);
    }

    pub fn set_follow_mouse(&mut self, follow: bool) {
        self.follow_mouse = follow;
    }

    pub fn set_agent_state(&mut self, state: AgentState) {
        self.agent_state = state;
    }

    pub fn apply_config(&mut self, config: &CameraConfig) {
        self.follow_mouse = config.follow_mouse;
    }

    pub fn trigger_performance(&mut self, performance: &Performance) {
        if let Some(action) = &performance.action {
            tracing::debug!(action = %action, "performance action");
            self.last_action = Some(action.clone());
        }
        if performance.audio_url.is_some() {
            tracing::debug!("performance audio ignored");
        }
        self.expression.trigger(performance, self.clock);
    }

    pub fn update<M: AvatarModel>(&mut self, model: &mut M, delta: f32) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.clock += Duration::from_secs_f32(delta);

        match self.idle.as_mut() {
            Some(idle) => {
                idle.update(delta);
                model.apply_idle_pose(&idle.layers());
            }
            None => model.apply_idle_pose(&[]),
        }

        self.expression.update(model, delta, self.clock);
        model.update(delta);

        let (dx, dy) = if self.follow_mouse { self.mouse } else { (0.0, 0.0) };
        let (yaw, pitch) = target_angles(dx, dy, self.mode);
        self.look.update(yaw, pitch);
        self.look.apply_cascade(model);

        if let Some(head) = model.bone_world_position(HumanBone::Head) {
            model.set_look_target(look_target(head, self.look.yaw(), self.look.pitch()));
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn follow_mouse(&self) -> bool {
        self.follow_mouse
    }

    pub fn agent_state(&self) -> AgentState {
        self.agent_state
    }

    pub fn body_span(&self) -> Option<f32> {
        self.body_span
    }

    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    pub fn idle(&self) -> Option<&IdleLoop> {
        self.idle.as_ref()
    }

    pub fn expression(&self) -> &ExpressionFader {
        &self.expression
    }

    /// Smoothed `(yaw, pitch)` in radians.
    pub fn look_angles(&self) -> (f32, f32) {
        (self.look.yaw(), self.look.pitch())
    }

    /// Gaze point for the current angles relative to `head`.
    pub fn gaze_from(&self, head: Vec3) -> Vec3 {
        look_target(head, self.look.yaw(), self.look.pitch())
    }

    pub fn now(&self) -> Instant {
        self.clock
    }
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new()
    }
}
