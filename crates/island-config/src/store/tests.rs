//! Tests for the config store.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use island_common::CameraMode;
use proptest::prelude::*;

use super::*;
use crate::json_loader;
use crate::patch::ConfigPatch;
use crate::schema::{CameraConfig, CameraPosition, CameraSetting};

#[derive(Clone, Default)]
struct RecordingSink(Rc<RefCell<Vec<(&'static str, CameraConfig)>>>);

impl RecordingSink {
    fn calls(&self) -> Vec<(&'static str, CameraConfig)> {
        self.0.borrow().clone()
    }
}

impl ConfigSink for RecordingSink {
    fn set_camera_config(&self, config: &CameraConfig) {
        self.0.borrow_mut().push(("set", config.clone()));
    }

    fn update_camera_config(&self, config: &CameraConfig) {
        self.0.borrow_mut().push(("update", config.clone()));
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn open_empty_store_persists_defaults_once() {
    let store = ConfigStore::open(MemoryPersistence::new(), RecordingSink::default());
    assert_eq!(store.config(), &CameraConfig::default());
    assert_eq!(store.persistence().writes(), 1);
    assert!(!store.is_dirty());
}

#[test]
fn open_uses_valid_persisted_config() {
    let mut stored = CameraConfig::default();
    stored.body.fov = 52.0;
    let doc = serde_json::to_string(&stored).unwrap();

    let store = ConfigStore::open(MemoryPersistence::with_document(doc), RecordingSink::default());
    assert_eq!(store.config().body.fov, 52.0);
    assert_eq!(store.persistence().writes(), 0);
}

#[test]
fn open_corrupt_document_falls_back_and_overwrites() {
    let store = ConfigStore::open(
        MemoryPersistence::with_document("{\"head\": 3}"),
        RecordingSink::default(),
    );
    assert_eq!(store.config(), &CameraConfig::default());
    assert_eq!(store.persistence().writes(), 1);
    let doc = store.persistence().document().unwrap();
    assert_eq!(json_loader::decode(doc).unwrap(), CameraConfig::default());
}

#[test]
fn open_unreadable_store_uses_defaults() {
    let mut persistence = MemoryPersistence::new();
    persistence.set_fail_reads(true);
    let store = ConfigStore::open(persistence, RecordingSink::default());
    assert_eq!(store.config(), &CameraConfig::default());
}

#[test]
fn publish_initial_uses_set_call() {
    let sink = RecordingSink::default();
    let store = ConfigStore::open(MemoryPersistence::new(), sink.clone());
    store.publish_initial();
    let calls = sink.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "set");
}

#[test]
fn update_pushes_immediately_and_persists_after_quiet_period() {
    let sink = RecordingSink::default();
    let mut store = ConfigStore::open(MemoryPersistence::new(), sink.clone());
    let t0 = Instant::now();

    store.update(ConfigPatch::fov(CameraMode::Head, 35.0), t0);

    let calls = sink.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "update");
    assert_eq!(calls[0].1.head.fov, 35.0);

    assert!(store.is_dirty());
    assert!(!store.poll(t0 + ms(499)));
    assert_eq!(store.persistence().writes(), 1);
    assert!(store.poll(t0 + ms(500)));
    assert_eq!(store.persistence().writes(), 2);
    assert!(!store.is_dirty());
}

#[test]
fn rapid_updates_collapse_into_one_write() {
    let mut store = ConfigStore::open(MemoryPersistence::new(), RecordingSink::default());
    let t0 = Instant::now();

    for i in 0..10u64 {
        store.update(ConfigPatch::fov(CameraMode::Body, 30.0 + i as f64), t0 + ms(i * 100));
    }
    // Last edit at t0+900ms; the window restarted each time.
    assert!(!store.poll(t0 + ms(1000)));
    assert!(store.poll(t0 + ms(1400)));
    assert!(!store.poll(t0 + ms(5000)));
    assert_eq!(store.persistence().writes(), 2);
    assert_eq!(store.config().body.fov, 39.0);
}

#[test]
fn invalid_patch_is_dropped() {
    let sink = RecordingSink::default();
    let mut store = ConfigStore::open(MemoryPersistence::new(), sink.clone());
    store.update(ConfigPatch::fov(CameraMode::Head, 0.0), Instant::now());
    assert_eq!(store.config().head.fov, 40.0);
    assert!(sink.calls().is_empty());
    assert!(!store.is_dirty());
}

#[test]
fn reset_persists_immediately_and_pushes() {
    let sink = RecordingSink::default();
    let mut store = ConfigStore::open(MemoryPersistence::new(), sink.clone());
    let t0 = Instant::now();
    store.update(ConfigPatch::FollowMouse(true), t0);

    store.reset();

    assert_eq!(store.config(), &CameraConfig::default());
    assert_eq!(store.persistence().writes(), 2);
    // The pending debounce was cancelled by the reset.
    assert!(store.next_deadline().is_none());
    assert!(!store.poll(t0 + ms(600)));
    let calls = sink.calls();
    assert_eq!(calls.last().unwrap().0, "update");
    assert!(!calls.last().unwrap().1.follow_mouse);
}

#[test]
fn failed_write_retries_only_on_next_cycle() {
    let mut store = ConfigStore::open(MemoryPersistence::new(), RecordingSink::default());
    let t0 = Instant::now();
    store.persistence_mut().set_fail_writes(true);

    store.update(ConfigPatch::LerpSpeed(0.2), t0);
    assert!(!store.poll(t0 + ms(500)));
    assert!(store.is_dirty());

    // No immediate retry: the timer is spent.
    store.persistence_mut().set_fail_writes(false);
    assert!(!store.poll(t0 + ms(2000)));
    assert_eq!(store.persistence().writes(), 1);

    // The next edit opens a new cycle that carries the earlier change too.
    store.update(ConfigPatch::FollowMouse(true), t0 + ms(3000));
    assert!(store.poll(t0 + ms(3500)));
    let saved = json_loader::decode(store.persistence().document().unwrap()).unwrap();
    assert_eq!(saved.lerp_speed, 0.2);
    assert!(saved.follow_mouse);
}

#[test]
fn flush_writes_pending_edit() {
    let mut store = ConfigStore::open(MemoryPersistence::new(), RecordingSink::default());
    store.update(ConfigPatch::FollowMouse(true), Instant::now());
    assert!(store.flush());
    assert!(!store.flush());
    assert_eq!(store.persistence().writes(), 2);
}

#[test]
fn file_persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("island").join("camera.json");

    let t0 = Instant::now();
    {
        let mut store = ConfigStore::open(FilePersistence::new(&path), RecordingSink::default());
        assert!(path.exists());
        store.update(ConfigPatch::fov(CameraMode::Body, 47.5), t0);
        assert!(store.poll(t0 + PERSIST_DEBOUNCE));
    }

    let store = ConfigStore::open(FilePersistence::new(&path), RecordingSink::default());
    assert_eq!(store.config().body.fov, 47.5);
}

fn finite() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |v| v.is_finite())
}

fn position() -> impl Strategy<Value = CameraPosition> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| CameraPosition::new(x, y, z))
}

fn setting() -> impl Strategy<Value = CameraSetting> {
    (position(), position(), 0.001f64..179.999).prop_map(|(position, target, fov)| {
        CameraSetting {
            position,
            target,
            fov,
        }
    })
}

proptest! {
    #[test]
    fn serializable_form_round_trips(
        head in setting(),
        body in setting(),
        lerp_speed in 0.001f64..=1.0,
        follow_mouse in any::<bool>(),
    ) {
        let config = CameraConfig { head, body, lerp_speed, follow_mouse };
        let mut persistence = MemoryPersistence::new();
        persistence.save(&config).unwrap();
        let store = ConfigStore::open(persistence, RecordingSink::default());

        let decoded = json_loader::decode(&store.to_serializable()).unwrap();
        prop_assert_eq!(decoded, config);
    }
}
