//! Timer polling, cursor sampling and render frames.

use std::time::Instant;

use island_config::ConfigPersistence;

use super::core::IslandApp;

/// Log render stats this often.
const STATS_EVERY_FRAMES: u64 = 600;

impl<P: ConfigPersistence> IslandApp<P> {
    /// Fire due timers: auto-collapse and config persistence.
    pub fn tick(&mut self, now: Instant) {
        if let Some(state) = self.presence.poll(now) {
            self.announce(state);
        }
        self.config.poll(now);
    }

    pub fn sample_mouse(&mut self) {
        let center = self.geometry().center();
        if let Some((dx, dy)) = self.mouse.sample(center) {
            self.bridge.update_mouse_delta(dx, dy);
        }
    }

    /// Hand queued bridge commands to the scene, in issue order.
    pub(super) fn pump(&mut self) -> usize {
        let commands = self.renderer_rx.drain();
        let count = commands.len();
        for command in commands {
            self.scene.dispatch(command);
        }
        count
    }

    /// Render one frame timed by the frame timer.
    pub fn render_frame(&mut self) {
        let delta = self.frame_timer.tick();
        self.frame(delta);
        if self.scene.frames() % STATS_EVERY_FRAMES == 0 {
            tracing::debug!(
                fps = self.frame_timer.fps(),
                frames = self.scene.frames(),
                "Render stats"
            );
        }
    }

    /// Apply pending commands and advance the scene by `delta` seconds.
    pub fn frame(&mut self, delta: f32) {
        self.pump();
        self.scene.frame(delta);
    }
}
