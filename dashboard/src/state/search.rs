//! Global card search across every agent's collection.

use serde::Serialize;
use tracing::info;

use super::events::contains_ignore_case;
use super::market::load_agent_details;
use crate::net::api::SimulationApi;
use crate::net::types::{AgentDetail, AgentId, CardInstance};

/// Copies of one card held by one agent that match the search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchHit {
    pub card: CardInstance,
    pub agent_id: AgentId,
    pub agent_name: String,
    pub instance_count: usize,
    pub mean_price: f64,
    pub price_history_len: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CardSearch {
    pub term: String,
    pub hits: Vec<SearchHit>,
}

impl CardSearch {
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Found {} matching card instance(s)", self.hits.len())
    }
}

/// Group matching instances by `(card_id, agent_id)` in first-seen order.
///
/// A blank term matches nothing.
#[must_use]
pub fn search_cards(details: &[AgentDetail], term: &str) -> CardSearch {
    let term = term.trim();
    let mut hits: Vec<SearchHit> = Vec::new();
    let mut price_sums: Vec<f64> = Vec::new();

    if !term.is_empty() {
        for agent in details {
            for card in agent.card_instances.iter().filter(|c| contains_ignore_case(&c.name, term)) {
                let existing = hits.iter().position(|h| h.agent_id == agent.id && h.card.card_id == card.card_id);
                match existing {
                    Some(idx) => {
                        hits[idx].instance_count += 1;
                        price_sums[idx] += card.price;
                    }
                    None => {
                        hits.push(SearchHit {
                            card: card.clone(),
                            agent_id: agent.id,
                            agent_name: agent.display_name(),
                            instance_count: 1,
                            mean_price: 0.0,
                            price_history_len: card.price_history.len(),
                        });
                        price_sums.push(card.price);
                    }
                }
            }
        }
    }

    for (hit, sum) in hits.iter_mut().zip(price_sums) {
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / hit.instance_count as f64;
        hit.mean_price = mean;
    }
    CardSearch { term: term.to_string(), hits }
}

pub async fn search_agents(api: &dyn SimulationApi, ids: &[AgentId], term: &str) -> CardSearch {
    if term.trim().is_empty() {
        return CardSearch::default();
    }
    let details = load_agent_details(api, ids).await;
    let search = search_cards(&details, term);
    info!(term = %search.term, hits = search.hits.len(), "card search finished");
    search
}

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;
