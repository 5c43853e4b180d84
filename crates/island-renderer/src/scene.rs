//! Renderer-side consumer of bridge commands.

use island_bridge::{RendererCommand, RendererInbox};
use island_common::CameraMode;

use crate::animation::AnimationEngine;
use crate::avatar::AvatarModel;
use crate::camera::{CameraRig, PerspectiveCamera};

/// One avatar, its animation state and the camera framing it.
///
/// Commands arriving before a model is attached go through the
/// [`RendererInbox`] gate: only the latest camera config survives.
pub struct Scene<M> {
    model: Option<M>,
    engine: AnimationEngine,
    rig: CameraRig,
    camera: PerspectiveCamera,
    inbox: RendererInbox,
    frames: u64,
}

impl<M: AvatarModel> Scene<M> {
    pub fn new() -> Self {
        Self::with_engine(AnimationEngine::new())
    }

    pub fn with_engine(engine: AnimationEngine) -> Self {
        Self {
            model: None,
            engine,
            rig: CameraRig::new(),
            camera: PerspectiveCamera::new(),
            inbox: RendererInbox::new(),
            frames: 0,
        }
    }

    /// Gate and apply a command. Returns `false` when it was held or
    /// discarded because no model is attached yet.
    pub fn dispatch(&mut self, command: RendererCommand) -> bool {
        match self.inbox.accept(command) {
            Ok(command) => {
                self.apply(command);
                true
            }
            Err(e) => {
                tracing::trace!(error = %e, "command not applied");
                false
            }
        }
    }

    fn apply(&mut self, command: RendererCommand) {
        match command {
            RendererCommand::SetMode(mode) => {
                self.engine.set_mode(mode);
                self.rig.set_mode(mode, &mut self.camera);
            }
            RendererCommand::UpdateMouseDelta { dx, dy } => self.engine.set_mouse_delta(dx, dy),
            RendererCommand::UpdateViewportSize { width, height } => {
                self.camera.set_viewport(width, height)
            }
            RendererCommand::TriggerPerformance(performance) => {
                self.engine.trigger_performance(&performance)
            }
            RendererCommand::SetAgentState(state) => self.engine.set_agent_state(state),
            RendererCommand::SetCameraConfig(config) | RendererCommand::UpdateCameraConfig(config) => {
                self.engine.apply_config(&config);
                self.rig.set_config(config, &mut self.camera);
            }
        }
    }

    /// Attach a loaded model, mark the scene ready and apply any camera
    /// config that arrived early.
    pub fn attach(&mut self, model: M) {
        self.engine.attach(&model);
        self.rig.set_body_span(self.engine.body_span());
        self.model = Some(model);
        if let Some(command) = self.inbox.mark_ready() {
            tracing::debug!("flushing queued camera config");
            self.apply(command);
        }
    }

    /// Drop the model; later commands are gated again.
    pub fn detach(&mut self) -> Option<M> {
        self.inbox.mark_not_ready();
        self.model.take()
    }

    /// Advance animation then camera by `delta` seconds.
    pub fn frame(&mut self, delta: f32) {
        if let Some(model) = self.model.as_mut() {
            self.engine.update(model, delta);
        }
        self.rig.update(self.model.as_ref(), &mut self.camera);
        self.frames += 1;
    }

    pub fn is_ready(&self) -> bool {
        self.inbox.is_ready()
    }

    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Fit body framing to the attached avatar's span.
    pub fn set_fit_body(&mut self, fit: bool) {
        self.rig.set_fit_body(fit, &mut self.camera);
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn mode(&self) -> CameraMode {
        self.rig.mode()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<M: AvatarModel> Default for Scene<M> {
    fn default() -> Self {
        Self::new()
    }
}
