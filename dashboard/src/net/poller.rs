//! Agent list poller: periodic background refresh of `GET /agents`.
//!
//! DESIGN
//! ======
//! One spawned task fetches immediately, then on every interval tick, and
//! publishes the latest [`AgentListState`] on a `watch` channel. Consumers
//! only ever see the newest state; intermediate refreshes they were too slow
//! to render are coalesced. Missed ticks are skipped rather than bursted, so
//! a slow backend is never hit with a backlog of catch-up requests.
//!
//! ERROR HANDLING
//! ==============
//! A failed refresh is logged and recorded in `last_error`, and the previous
//! agent list stays published. The next tick is the retry.
//!
//! LIFECYCLE
//! =========
//! The task lives exactly as long as its [`AgentPoller`]: dropping the poller
//! (or calling [`AgentPoller::stop`]) aborts it, which cancels the timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::api::SimulationApi;
use super::types::AgentSummary;

/// Snapshot published after every refresh attempt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentListState {
    /// Last successfully fetched list.
    pub agents: Vec<AgentSummary>,
    /// True until the first refresh attempt completes.
    pub loading: bool,
    /// Message of the most recent failed refresh, cleared on success.
    pub last_error: Option<String>,
    /// Completed refresh attempts, successful or not.
    pub refreshes: u64,
}

/// Handle to a running agent list poller.
pub struct AgentPoller {
    rx: watch::Receiver<AgentListState>,
    handle: JoinHandle<()>,
}

/// Spawn the polling task. The first fetch starts immediately.
#[must_use]
pub fn spawn_agent_poller(api: Arc<dyn SimulationApi>, interval: Duration) -> AgentPoller {
    let interval = interval.max(Duration::from_millis(1));
    let (tx, rx) = watch::channel(AgentListState { loading: true, ..AgentListState::default() });
    info!(interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX), "agent poller started");

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }
            refresh(api.as_ref(), &tx).await;
        }
        debug!("agent poller exited");
    });

    AgentPoller { rx, handle }
}

async fn refresh(api: &dyn SimulationApi, tx: &watch::Sender<AgentListState>) {
    match api.list_agents().await {
        Ok(agents) => {
            debug!(count = agents.len(), "agent list refreshed");
            tx.send_modify(|state| {
                state.agents = agents;
                state.loading = false;
                state.last_error = None;
                state.refreshes += 1;
            });
        }
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "agent list refresh failed");
            tx.send_modify(|state| {
                state.loading = false;
                state.last_error = Some(e.to_string());
                state.refreshes += 1;
            });
        }
    }
}

impl AgentPoller {
    /// Latest published state without waiting.
    #[must_use]
    pub fn latest(&self) -> AgentListState {
        self.rx.borrow().clone()
    }

    /// Wait for the next published state. `None` once the task has ended.
    pub async fn next(&mut self) -> Option<AgentListState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Abort the polling task.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for AgentPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
#[path = "poller_test.rs"]
mod poller_test;
