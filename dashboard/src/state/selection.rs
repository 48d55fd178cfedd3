//! Agent selection with latest-request-wins semantics.
//!
//! DESIGN
//! ======
//! Selecting an agent issues a generation-tagged [`Ticket`]. Responses are
//! applied only when their ticket is still the newest one, so when an
//! operator switches from agent A to agent B while A's detail is in flight,
//! A's late answer is discarded instead of overwriting B's view.

use crate::net::api::{ApiError, SimulationApi};
use crate::net::types::{AgentDetail, AgentId, Inventory};

/// Handle for one in-flight request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket<K> {
    pub generation: u64,
    pub key: K,
}

/// Monotonic ticket issuer. Only the most recently issued ticket is current.
#[derive(Clone, Debug)]
pub struct RequestGate<K> {
    generation: u64,
    current: Option<K>,
}

impl<K> Default for RequestGate<K> {
    fn default() -> Self {
        Self { generation: 0, current: None }
    }
}

impl<K: Clone> RequestGate<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `key`, invalidating every earlier one.
    pub fn issue(&mut self, key: K) -> Ticket<K> {
        self.generation += 1;
        self.current = Some(key.clone());
        Ticket { generation: self.generation, key }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        ticket.generation == self.generation && self.current.is_some()
    }

    /// Invalidate every outstanding ticket without issuing a new one.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    #[must_use]
    pub fn current_key(&self) -> Option<&K> {
        self.current.as_ref()
    }
}

/// Outcome of offering a response to the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

/// Both halves of one agent's detail view, fetched together.
#[derive(Debug)]
pub struct SelectionResponse {
    pub detail: Result<AgentDetail, ApiError>,
    pub inventory: Result<Inventory, ApiError>,
}

/// Fetch detail and inventory for the ticket's agent concurrently.
pub async fn fetch_selection(api: &dyn SimulationApi, ticket: &Ticket<AgentId>) -> SelectionResponse {
    let (detail, inventory) = tokio::join!(api.get_agent(ticket.key), api.get_agent_cards(ticket.key));
    SelectionResponse { detail, inventory }
}

/// The selected agent and whatever has arrived for it so far.
#[derive(Debug, Default)]
pub struct AgentSelection {
    gate: RequestGate<AgentId>,
    pub detail: Option<AgentDetail>,
    pub inventory: Option<Inventory>,
    pub detail_error: Option<String>,
    pub inventory_error: Option<String>,
}

impl AgentSelection {
    /// Switch to `id`. Clears the previous agent's data.
    pub fn select(&mut self, id: AgentId) -> Ticket<AgentId> {
        self.detail = None;
        self.inventory = None;
        self.detail_error = None;
        self.inventory_error = None;
        self.gate.issue(id)
    }

    pub fn clear(&mut self) {
        self.gate.cancel();
        self.detail = None;
        self.inventory = None;
        self.detail_error = None;
        self.inventory_error = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<AgentId> {
        self.gate.current_key().copied()
    }

    pub fn apply_detail(&mut self, ticket: &Ticket<AgentId>, result: Result<AgentDetail, ApiError>) -> Applied {
        if !self.gate.is_current(ticket) {
            tracing::debug!(agent_id = ticket.key, generation = ticket.generation, "discarding stale agent detail");
            return Applied::Stale;
        }
        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.detail_error = None;
            }
            Err(e) => {
                tracing::warn!(agent_id = ticket.key, error = %e, "agent detail fetch failed");
                self.detail_error = Some(e.to_string());
            }
        }
        Applied::Current
    }

    pub fn apply_inventory(&mut self, ticket: &Ticket<AgentId>, result: Result<Inventory, ApiError>) -> Applied {
        if !self.gate.is_current(ticket) {
            tracing::debug!(agent_id = ticket.key, generation = ticket.generation, "discarding stale inventory");
            return Applied::Stale;
        }
        match result {
            Ok(inventory) => {
                self.inventory = Some(inventory);
                self.inventory_error = None;
            }
            Err(e) => {
                tracing::warn!(agent_id = ticket.key, error = %e, "inventory fetch failed");
                self.inventory_error = Some(e.to_string());
            }
        }
        Applied::Current
    }

    pub fn apply(&mut self, ticket: &Ticket<AgentId>, response: SelectionResponse) -> Applied {
        let applied = self.apply_detail(ticket, response.detail);
        self.apply_inventory(ticket, response.inventory);
        applied
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;
