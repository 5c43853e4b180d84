//! IslandApp struct definition and constructor.

use island_bridge::{BridgeReceiver, BridgeSender};
use island_config::{ConfigPersistence, ConfigStore};
use island_presence::{PresenceMachine, PresenceState, SurfaceGeometry};
use island_renderer::{FrameTimer, Scene, SkeletonAvatar};

use super::mouse::{LatestCursor, MouseSampler};

/// Top-level application state.
pub struct IslandApp<P: ConfigPersistence> {
    pub(super) presence: PresenceMachine,
    pub(super) config: ConfigStore<P, BridgeSender>,
    pub(super) bridge: BridgeSender,

    // Render side of the bridge
    pub(super) renderer_rx: BridgeReceiver,
    pub(super) scene: Scene<SkeletonAvatar>,
    pub(super) frame_timer: FrameTimer,

    // Cursor input
    pub(super) mouse: MouseSampler<LatestCursor>,

    /// Closed-state geometry for the current screen.
    pub(super) compact: SurfaceGeometry,
}

impl<P: ConfigPersistence> IslandApp<P> {
    pub fn new(persistence: P, compact: SurfaceGeometry) -> Self {
        let (bridge, renderer_rx) = island_bridge::channel();
        let config = ConfigStore::open(persistence, bridge.clone());
        Self {
            presence: PresenceMachine::new(),
            config,
            bridge,
            renderer_rx,
            scene: Scene::new(),
            frame_timer: FrameTimer::new(),
            mouse: MouseSampler::new(LatestCursor::default()),
            compact,
        }
    }

    /// Publish the initial config, then bring up the avatar. The config
    /// reaches the scene before it is ready and is flushed on attach.
    pub fn start(&mut self) {
        self.config.publish_initial();
        self.pump();
        self.scene.attach(SkeletonAvatar::new());
        self.announce(self.presence.state());
        self.pump();
        tracing::info!(
            mode = %self.scene.mode(),
            follow_mouse = self.config.follow_mouse(),
            "Avatar ready"
        );
    }

    /// Target geometry for the current presence state.
    pub fn geometry(&self) -> SurfaceGeometry {
        match self.presence.state() {
            PresenceState::Closed => self.compact,
            PresenceState::Expanded => SurfaceGeometry::EXPANDED,
        }
    }

    /// Frame the whole avatar in body mode instead of the configured distance.
    pub fn set_fit_body(&mut self, fit: bool) {
        tracing::info!(fit, "Body framing fit");
        self.scene.set_fit_body(fit);
    }

    /// Tell the renderer about a presence change.
    pub(super) fn announce(&mut self, state: PresenceState) {
        let geometry = self.geometry();
        tracing::debug!(
            state = ?state,
            width = geometry.width,
            height = geometry.height,
            "Surface geometry"
        );
        self.bridge.set_mode(state.camera_mode());
        self.bridge
            .update_viewport_size(geometry.width, geometry.height);
    }
}
