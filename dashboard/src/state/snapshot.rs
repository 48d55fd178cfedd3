//! Session-scoped view snapshot and its JSON file store.
//!
//! DESIGN
//! ======
//! The snapshot is the only state that outlives one CLI invocation. It is
//! stored as one JSON object under four fixed keys (`world_summary`,
//! `events`, `agents`, `simulation`), and each key is decoded on its own: a
//! corrupt `events` entry costs the event log, not the agent list.
//!
//! ERROR HANDLING
//! ==============
//! `load` never fails. A missing file is an empty snapshot; an unreadable
//! or corrupt one is logged and treated as empty. `save` reports
//! `StoreError` so the caller decides whether a lost write matters.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::world::WorldSummary;
use crate::net::types::{AgentSummary, SimulationEvent};

pub const WORLD_SUMMARY_KEY: &str = "world_summary";
pub const EVENTS_KEY: &str = "events";
pub const AGENTS_KEY: &str = "agents";
pub const SIMULATION_KEY: &str = "simulation";

pub const DEFAULT_SEED: i64 = 42;
pub const DEFAULT_AGENT_COUNT: u32 = 10;

/// Errors produced by the session store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session file I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Parameters of the simulation the snapshot was produced by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub seed: i64,
    pub agent_count: u32,
    /// Last tick simulated; 0 before the first run.
    pub tick: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED, agent_count: DEFAULT_AGENT_COUNT, tick: 0 }
    }
}

/// Everything the views render from between invocations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSnapshot {
    #[serde(rename = "world_summary")]
    pub world: Option<WorldSummary>,
    pub events: Vec<SimulationEvent>,
    pub agents: Vec<AgentSummary>,
    pub simulation: SimulationParams,
}

impl ViewSnapshot {
    /// Decode each fixed key independently from a stored JSON object.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut map) = value else {
            warn!("session snapshot is not a JSON object; starting empty");
            return Self::default();
        };
        Self {
            world: take_key(&mut map, WORLD_SUMMARY_KEY).flatten(),
            events: take_key(&mut map, EVENTS_KEY).unwrap_or_default(),
            agents: take_key(&mut map, AGENTS_KEY).unwrap_or_default(),
            simulation: take_key(&mut map, SIMULATION_KEY).unwrap_or_default(),
        }
    }

    /// True when nothing has been simulated or fetched yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.world.is_none() && self.events.is_empty() && self.agents.is_empty() && self.simulation.tick == 0
    }
}

fn take_key<T: DeserializeOwned>(map: &mut serde_json::Map<String, serde_json::Value>, key: &str) -> Option<T> {
    let value = map.remove(key)?;
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable session entry");
            None
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// JSON file holding one [`ViewSnapshot`].
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot, degrading to empty on any failure.
    pub async fn load(&self) -> ViewSnapshot {
        match self.try_load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session snapshot unreadable; starting empty");
                ViewSnapshot::default()
            }
        }
    }

    /// Read the snapshot. A missing file is an empty snapshot.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] when the file exists but cannot be read,
    /// [`StoreError::Serde`] when it is not JSON.
    pub async fn try_load(&self) -> Result<ViewSnapshot, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no session snapshot yet");
                return Ok(ViewSnapshot::default());
            }
            Err(source) => return Err(StoreError::Io { path: self.path.clone(), source }),
        };
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        Ok(ViewSnapshot::from_value(value))
    }

    /// Write the snapshot, replacing the previous file in one rename.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] when the directory or file cannot be written.
    pub async fn save(&self, snapshot: &ViewSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|source| self.io_error(source))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(|source| self.io_error(source))?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), tick = snapshot.simulation.tick, "session snapshot saved");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;
