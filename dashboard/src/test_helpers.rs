//! Shared fixtures and a scriptable [`SimulationApi`] mock.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::net::api::{ApiError, SimulationApi};
use crate::net::types::{
    AgentDetail, AgentId, AgentSummary, CardInstance, Inventory, PricePoint, Rarity, RunRequest, RunResponse,
    SimulationEvent, TickSnapshot,
};

// =============================================================================
// MOCK API
// =============================================================================

/// Records every call and answers from canned responses.
///
/// `run` synthesizes a timeseries from the request when nothing is queued;
/// `list_agents` answers an empty list once its queue is drained.
#[derive(Default)]
pub(crate) struct MockApi {
    pub(crate) runs: Mutex<Vec<RunRequest>>,
    pub(crate) run_responses: Mutex<VecDeque<Result<RunResponse, ApiError>>>,
    pub(crate) agent_lists: Mutex<VecDeque<Result<Vec<AgentSummary>, ApiError>>>,
    pub(crate) details: Mutex<HashMap<AgentId, AgentDetail>>,
    pub(crate) inventories: Mutex<HashMap<AgentId, Inventory>>,
    pub(crate) list_calls: AtomicUsize,
    pub(crate) detail_calls: AtomicUsize,
    pub(crate) inventory_calls: AtomicUsize,
}

impl MockApi {
    pub(crate) fn with_agent_lists(lists: Vec<Result<Vec<AgentSummary>, ApiError>>) -> Self {
        Self { agent_lists: Mutex::new(lists.into()), ..Self::default() }
    }

    pub(crate) fn with_inventories(inventories: Vec<Inventory>) -> Self {
        let map = inventories.into_iter().map(|inv| (inv.id, inv)).collect();
        Self { inventories: Mutex::new(map), ..Self::default() }
    }

    pub(crate) fn with_details(details: Vec<AgentDetail>) -> Self {
        let map = details.into_iter().map(|d| (d.id, d)).collect();
        Self { details: Mutex::new(map), ..Self::default() }
    }

    pub(crate) fn push_run(&self, response: Result<RunResponse, ApiError>) {
        self.run_responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn run_count(&self) -> usize {
        self.runs.lock().unwrap().len()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.run_count()
            + self.list_calls.load(Ordering::SeqCst)
            + self.detail_calls.load(Ordering::SeqCst)
            + self.inventory_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimulationApi for MockApi {
    async fn run(&self, request: &RunRequest) -> Result<RunResponse, ApiError> {
        self.runs.lock().unwrap().push(request.clone());
        if let Some(response) = self.run_responses.lock().unwrap().pop_front() {
            return response;
        }
        Ok(synthetic_run(request))
    }

    async fn list_agents(&self) -> Result<Vec<AgentSummary>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.agent_lists.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_agent(&self, id: AgentId) -> Result<AgentDetail, ApiError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::Backend("Agent not found".into()))
    }

    async fn get_agent_cards(&self, id: AgentId) -> Result<Inventory, ApiError> {
        self.inventory_calls.fetch_add(1, Ordering::SeqCst);
        self.inventories
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::Backend("Agent not found".into()))
    }
}

/// One snapshot per tick with 12 cards per agent per tick and one purchase event each.
pub(crate) fn synthetic_run(request: &RunRequest) -> RunResponse {
    let timeseries = (1..=u64::from(request.ticks))
        .map(|tick| TickSnapshot {
            tick,
            agent_count: u64::from(request.agents),
            total_cards: tick * 12 * u64::from(request.agents),
            total_unopened_boosters: tick,
            events: vec![event(tick, 1, "booster_purchase", "Agent 1 bought a booster")],
        })
        .collect();
    RunResponse { timeseries }
}

// =============================================================================
// FIXTURES
// =============================================================================

pub(crate) fn event(tick: u64, agent_id: AgentId, event_type: &str, description: &str) -> SimulationEvent {
    SimulationEvent {
        tick,
        agent_id,
        event_type: event_type.to_string(),
        description: description.to_string(),
        agent_ids: vec![agent_id],
        triggered: None,
    }
}

pub(crate) fn agent(id: AgentId, prism: f64, collection_count: u64) -> AgentSummary {
    AgentSummary { id, prism, collection_count }
}

pub(crate) fn card(card_id: &str, name: &str, rarity: Rarity, color: &str, price: f64) -> CardInstance {
    CardInstance {
        card_instance_id: Some(format!("{card_id}-{price}")),
        card_id: card_id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        rarity,
        is_hologram: false,
        quality_score: 5.0,
        price,
        desirability: 5.0,
        condition: None,
        price_history: Vec::new(),
        win_count: 0,
        loss_count: 0,
        power: None,
        health: None,
        cost: None,
        card_type: None,
        flavor_text: None,
        gem_colored: 0,
        gem_colorless: 0,
    }
}

pub(crate) fn with_history(mut card: CardInstance, prices: &[f64]) -> CardInstance {
    card.price_history = prices
        .iter()
        .zip(1_u64..)
        .map(|(&price, tick)| PricePoint { tick, price, quality_score: card.quality_score, desirability: 5.0 })
        .collect();
    card
}

pub(crate) fn inventory(id: AgentId, cards: Vec<CardInstance>) -> Inventory {
    Inventory { id, name: format!("Agent {id}"), collection_count: cards.len() as u64, cards }
}

/// Agent detail owning `cards`, with no deck or events.
pub(crate) fn agent_detail(id: AgentId, cards: Vec<CardInstance>) -> AgentDetail {
    AgentDetail {
        id,
        prism: 100.0,
        collection_count: cards.len() as u64,
        name: None,
        traits: None,
        deck: Vec::new(),
        agent_events: Vec::new(),
        card_instances: cards,
    }
}
