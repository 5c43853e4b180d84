use std::time::{Duration, Instant};

use island_common::{AgentState, CameraMode, Face};
use island_config::{ConfigPersistence, FilePersistence, MemoryPersistence};
use island_presence::{PresenceState, SurfaceGeometry, THINKING_LABEL};
use island_renderer::camera::fit_distance;

use super::IslandApp;

const DT: f32 = 1.0 / 60.0;

fn started() -> IslandApp<MemoryPersistence> {
    let mut app = IslandApp::new(MemoryPersistence::new(), SurfaceGeometry::COMPACT);
    app.start();
    app
}

fn frames(app: &mut IslandApp<impl ConfigPersistence>, n: usize) {
    for _ in 0..n {
        app.frame(DT);
    }
}

#[test]
fn start_delivers_initial_config_and_compact_mode() {
    let app = started();
    assert!(app.scene.is_ready());
    assert!(app.scene.rig().config().is_some());
    assert_eq!(app.scene.mode(), CameraMode::Head);
    assert_eq!(app.presence.state(), PresenceState::Closed);
    // Defaults are persisted once when nothing is stored.
    assert_eq!(app.config.persistence().writes(), 1);
}

#[test]
fn thinking_envelope_expands_into_body_mode() {
    let mut app = started();
    let now = Instant::now();
    app.handle_message(r#"{"type":"agent_state","payload":{"state":"thinking"}}"#, now)
        .unwrap();

    assert_eq!(app.presence.state(), PresenceState::Expanded);
    assert_eq!(app.presence.tool_label(), Some(THINKING_LABEL));
    assert_eq!(app.geometry(), SurfaceGeometry::EXPANDED);

    frames(&mut app, 1);
    assert_eq!(app.scene.mode(), CameraMode::Body);
    assert_eq!(app.scene.engine().agent_state(), AgentState::Thinking);
    assert!((app.scene.camera().aspect - 640.0 / 190.0).abs() < 1e-5);
}

#[test]
fn fit_body_frames_whole_avatar_when_expanded() {
    let mut app = started();
    app.set_fit_body(true);
    let now = Instant::now();
    app.handle_message(r#"{"type":"agent_state","payload":{"state":"thinking"}}"#, now)
        .unwrap();
    frames(&mut app, 1);
    assert_eq!(app.scene.mode(), CameraMode::Body);

    let span = app.scene.engine().body_span().unwrap();
    let rig = app.scene.rig();
    let distance = (rig.target_position() - rig.target_look_at()).length();
    let expected = fit_distance(span, app.scene.camera().fov);
    assert!((distance - expected).abs() < 1e-4, "{distance} vs {expected}");
}

#[test]
fn response_collapses_after_quiet_period() {
    let mut app = started();
    let now = Instant::now();
    app.handle_message(
        r#"{"type":"assistant_response","payload":{"content":"hello"}}"#,
        now,
    )
    .unwrap();
    assert_eq!(app.presence.state(), PresenceState::Expanded);
    assert_eq!(app.presence.chat_text(), "hello");

    app.tick(now + Duration::from_secs(4));
    assert_eq!(app.presence.state(), PresenceState::Expanded);
    app.tick(now + Duration::from_secs(6));
    assert_eq!(app.presence.state(), PresenceState::Closed);

    frames(&mut app, 1);
    assert_eq!(app.scene.mode(), CameraMode::Head);
}

#[test]
fn performance_is_forwarded_to_avatar() {
    let mut app = started();
    app.handle_message(
        r#"{"type":"assistant_response","payload":{"content":"","performance":{"face":"joy","intensity":0.8,"duration":2.0}}}"#,
        Instant::now(),
    )
    .unwrap();
    // Empty content does not expand.
    assert_eq!(app.presence.state(), PresenceState::Closed);

    frames(&mut app, 60);
    let joy = app.scene.model().unwrap().expression_weight(Face::Joy);
    assert!(joy > 0.7 && joy <= 0.8, "joy weight {joy}");
}

#[test]
fn follow_mouse_side_channel_updates_config() {
    let mut app = started();
    let now = Instant::now();
    app.handle_message(
        r#"{"type":"agent_state","payload":{"state":"listening","follow_mouse":true}}"#,
        now,
    )
    .unwrap();
    assert!(app.config.follow_mouse());
    assert!(app.config.is_dirty());
    // Listening leaves presence alone.
    assert_eq!(app.presence.state(), PresenceState::Closed);

    frames(&mut app, 1);
    assert!(app.scene.engine().follow_mouse());
    assert_eq!(app.scene.engine().agent_state(), AgentState::Listening);

    assert!(app.config.next_deadline().is_some());
    app.tick(now + Duration::from_millis(600));
    assert!(!app.config.is_dirty());
    assert_eq!(app.config.persistence().writes(), 2);
    assert!(app.config.persistence().document().unwrap().contains("\"followMouse\":true"));
}

#[test]
fn malformed_envelope_is_dropped() {
    let mut app = started();
    let now = Instant::now();
    assert!(app.handle_message(r#"{"type":"bogus","payload":{}}"#, now).is_err());
    assert!(app.handle_message("{not json", now).is_err());
    assert!(app
        .handle_message(r#"{"type":"assistant_response","payload":{}}"#, now)
        .is_err());
    assert_eq!(app.presence.state(), PresenceState::Closed);
    assert!(!app.config.is_dirty());
}

#[test]
fn hover_and_focus_lock_from_host() {
    let mut app = started();
    let now = Instant::now();
    app.handle_message(r#"{"host":"hover_start"}"#, now).unwrap();
    assert_eq!(app.presence.state(), PresenceState::Expanded);

    app.handle_message(r#"{"host":"focus_lock"}"#, now).unwrap();
    app.handle_message(r#"{"host":"hover_end"}"#, now).unwrap();
    assert_eq!(app.presence.state(), PresenceState::Expanded);

    app.handle_message(r#"{"host":"focus_unlock"}"#, now).unwrap();
    assert_eq!(app.presence.state(), PresenceState::Closed);
}

#[test]
fn camera_edit_previews_then_persists() {
    let mut app = started();
    let now = Instant::now();
    app.handle_message(r#"{"host":"camera","mode":"body","fov":30}"#, now)
        .unwrap();
    frames(&mut app, 1);
    let live = app.scene.rig().config().unwrap();
    assert_eq!(live.body.fov, 30.0);

    app.handle_message(r#"{"host":"lerp_speed","value":0.2}"#, now + Duration::from_millis(100))
        .unwrap();
    app.tick(now + Duration::from_millis(550));
    assert!(app.config.is_dirty());
    app.tick(now + Duration::from_millis(650));
    assert!(!app.config.is_dirty());
    assert_eq!(app.config.persistence().writes(), 2);

    // Out of range values never reach the renderer.
    app.handle_message(r#"{"host":"lerp_speed","value":4.0}"#, now).unwrap();
    assert_eq!(app.config.config().lerp_speed, 0.2);
}

#[test]
fn reset_camera_restores_defaults() {
    let mut app = started();
    let now = Instant::now();
    app.handle_message(r#"{"host":"follow_mouse","enabled":true}"#, now)
        .unwrap();
    app.handle_message(r#"{"host":"reset_camera"}"#, now).unwrap();
    assert!(!app.config.follow_mouse());
    assert!(!app.config.is_dirty());
    frames(&mut app, 1);
    assert!(!app.scene.engine().follow_mouse());
}

#[test]
fn cursor_drives_look_tracking() {
    let mut app = started();
    let now = Instant::now();
    app.handle_message(r#"{"host":"follow_mouse","enabled":true}"#, now)
        .unwrap();
    app.handle_message(r#"{"host":"hover_start"}"#, now).unwrap();
    // 100px right of the expanded surface center.
    app.handle_message(r#"{"host":"cursor","x":420,"y":95}"#, now)
        .unwrap();
    app.sample_mouse();
    frames(&mut app, 300);

    let (yaw, pitch) = app.scene.engine().look_angles();
    assert!((yaw - 0.2).abs() < 1e-3);
    assert!(pitch.abs() < 1e-6);
}

#[test]
fn screen_metrics_resize_compact_surface() {
    let mut app = started();
    app.handle_message(r#"{"host":"screen","notchWidth":185,"topInset":38}"#, Instant::now())
        .unwrap();
    let geometry = app.geometry();
    assert_eq!(geometry.width, 275.0);
    assert_eq!(geometry.height, 38.0);
    frames(&mut app, 1);
    assert!((app.scene.camera().aspect - 275.0 / 38.0).abs() < 1e-4);
}

#[test]
fn shutdown_flushes_pending_edit_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("camera.json");
    let mut app = IslandApp::new(FilePersistence::new(&path), SurfaceGeometry::COMPACT);
    app.start();
    app.handle_message(r#"{"host":"camera","mode":"head","fov":25}"#, Instant::now())
        .unwrap();
    app.shutdown();

    let stored = island_config::json_loader::load_from_path(&path).unwrap();
    assert_eq!(stored.head.fov, 25.0);
}
