use super::*;
use crate::test_helpers::{agent, event};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

fn scratch_store() -> SessionStore {
    let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("polydros-dash-test-{}-{n}", std::process::id()));
    SessionStore::new(dir.join("nested").join("session.json"))
}

fn cleanup(store: &SessionStore) {
    if let Some(dir) = store.path().parent().and_then(std::path::Path::parent) {
        let _ = std::fs::remove_dir_all(dir);
    }
}

fn sample() -> ViewSnapshot {
    ViewSnapshot {
        world: Some(WorldSummary { tick: 5, agent_count: 3, total_cards: 60, total_unopened_boosters: 2 }),
        events: vec![event(5, 1, "match", "Agent 1 beat Agent 2")],
        agents: vec![agent(1, 10.0, 20), agent(2, -4.5, 8)],
        simulation: SimulationParams { seed: 7, agent_count: 3, tick: 5 },
    }
}

// =============================================================
// Decoding
// =============================================================

#[test]
fn defaults_match_runner_defaults() {
    let params = SimulationParams::default();
    assert_eq!(params.seed, 42);
    assert_eq!(params.agent_count, 10);
    assert_eq!(params.tick, 0);
    assert!(ViewSnapshot::default().is_empty());
}

#[test]
fn serializes_under_fixed_keys() {
    let value = serde_json::to_value(sample()).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    for key in [WORLD_SUMMARY_KEY, EVENTS_KEY, AGENTS_KEY, SIMULATION_KEY] {
        assert!(keys.iter().any(|k| k.as_str() == key), "missing {key}");
    }
    assert_eq!(keys.len(), 4);
}

#[test]
fn from_value_reads_back_serialized_snapshot() {
    let snapshot = sample();
    let back = ViewSnapshot::from_value(serde_json::to_value(&snapshot).unwrap());
    assert_eq!(back, snapshot);
    assert!(!back.is_empty());
}

#[test]
fn corrupt_key_only_loses_that_key() {
    let value = json!({
        "world_summary": {"tick": 2, "agent_count": 1, "total_cards": 12, "total_unopened_boosters": 0},
        "events": "not a list",
        "agents": [{"id": 1, "prism": 3.0, "collection_count": 4}],
        "simulation": {"seed": 1, "agent_count": 1, "tick": 2}
    });
    let snapshot = ViewSnapshot::from_value(value);
    assert!(snapshot.events.is_empty());
    assert_eq!(snapshot.agents.len(), 1);
    assert_eq!(snapshot.world.map(|w| w.tick), Some(2));
    assert_eq!(snapshot.simulation.tick, 2);
}

#[test]
fn missing_keys_default() {
    let snapshot = ViewSnapshot::from_value(json!({"world_summary": null}));
    assert_eq!(snapshot, ViewSnapshot::default());
}

#[test]
fn non_object_is_empty() {
    assert_eq!(ViewSnapshot::from_value(json!([1, 2, 3])), ViewSnapshot::default());
}

// =============================================================
// File store
// =============================================================

#[tokio::test]
async fn missing_file_loads_empty() {
    let store = scratch_store();
    assert_eq!(store.try_load().await.unwrap(), ViewSnapshot::default());
}

#[tokio::test]
async fn save_then_load_creates_parent_dirs() {
    let store = scratch_store();
    store.save(&sample()).await.unwrap();
    assert!(store.path().exists());
    assert_eq!(store.load().await, sample());
    cleanup(&store);
}

#[tokio::test]
async fn save_overwrites_previous_snapshot() {
    let store = scratch_store();
    store.save(&sample()).await.unwrap();
    store.save(&ViewSnapshot::default()).await.unwrap();
    assert!(store.load().await.is_empty());
    cleanup(&store);
}

#[tokio::test]
async fn corrupt_file_degrades_to_empty() {
    let store = scratch_store();
    tokio::fs::create_dir_all(store.path().parent().unwrap()).await.unwrap();
    tokio::fs::write(store.path(), b"{ not json").await.unwrap();

    assert!(matches!(store.try_load().await, Err(StoreError::Serde(_))));
    assert_eq!(store.load().await, ViewSnapshot::default());
    cleanup(&store);
}
