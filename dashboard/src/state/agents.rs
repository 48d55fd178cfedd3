//! Agent list and agent detail views.
//!
//! DESIGN
//! ======
//! The backend only builds a deck once an agent owns more than
//! [`DECK_THRESHOLD`] cards, and the detail view applies the same gate so a
//! stale deck from a shrunken collection is never shown. Deck statistics are
//! summaries of backend-computed per-card numbers; nothing here scores cards.

use pager::{PageWindow, Pagination, PaginationOptions};
use serde::Serialize;

use crate::net::types::{AgentDetail, AgentSummary, AgentTraits, DeckCard, SimulationEvent};

/// Collection size an agent must exceed before a deck is shown.
pub const DECK_THRESHOLD: u64 = 40;

/// Feasibility below this marks a deck card as weak.
pub const WEAK_FEASIBILITY: f64 = 1.0;

pub const AGENT_EVENTS_PAGE_SIZE: i64 = 10;

// =============================================================================
// AGENT LIST
// =============================================================================

/// Totals across the agent list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AgentListTotals {
    pub agents: usize,
    pub total_prism: f64,
    pub total_cards: u64,
    pub in_debt: usize,
    pub richest: Option<u64>,
}

/// Agents ordered by id, as the list renders them.
#[must_use]
pub fn sorted_agents(agents: &[AgentSummary]) -> Vec<&AgentSummary> {
    let mut sorted: Vec<&AgentSummary> = agents.iter().collect();
    sorted.sort_by_key(|a| a.id);
    sorted
}

#[must_use]
pub fn agent_list_totals(agents: &[AgentSummary]) -> AgentListTotals {
    let richest = agents
        .iter()
        .max_by(|a, b| a.prism.total_cmp(&b.prism).then_with(|| b.id.cmp(&a.id)))
        .map(|a| a.id);
    AgentListTotals {
        agents: agents.len(),
        total_prism: agents.iter().map(|a| a.prism).sum(),
        total_cards: agents.iter().map(|a| a.collection_count).sum(),
        in_debt: agents.iter().filter(|a| a.prism < 0.0).count(),
        richest,
    }
}

// =============================================================================
// DECK
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeckStats {
    pub card_count: usize,
    pub average_feasibility: f64,
    pub weak_cards: usize,
    pub best: DeckCard,
    pub worst: DeckCard,
    pub wins: u64,
    pub losses: u64,
}

impl DeckStats {
    /// Wins over decided matches; `None` before any match.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        let played = self.wins + self.losses;
        #[allow(clippy::cast_precision_loss)]
        (played > 0).then(|| self.wins as f64 / played as f64)
    }
}

/// Summary of a deck; `None` for an empty deck.
#[must_use]
pub fn deck_stats(deck: &[DeckCard]) -> Option<DeckStats> {
    let first = deck.first()?;
    let mut best = first;
    let mut worst = first;
    for card in deck {
        if card.feasibility_score > best.feasibility_score {
            best = card;
        }
        if card.feasibility_score < worst.feasibility_score {
            worst = card;
        }
    }
    let total: f64 = deck.iter().map(|c| c.feasibility_score).sum();
    #[allow(clippy::cast_precision_loss)]
    let average_feasibility = total / deck.len() as f64;

    Some(DeckStats {
        card_count: deck.len(),
        average_feasibility,
        weak_cards: deck.iter().filter(|c| c.feasibility_score < WEAK_FEASIBILITY).count(),
        best: best.clone(),
        worst: worst.clone(),
        wins: deck.iter().map(|c| c.win_count).sum(),
        losses: deck.iter().map(|c| c.loss_count).sum(),
    })
}

#[must_use]
pub fn shows_deck(collection_count: u64) -> bool {
    collection_count > DECK_THRESHOLD
}

// =============================================================================
// AGENT DETAIL
// =============================================================================

/// Detail view of one agent, with its own events paginated ten at a time.
#[derive(Clone, Debug)]
pub struct AgentDetailView {
    detail: AgentDetail,
    events_pager: Pagination,
}

/// Serializable snapshot of the detail view.
#[derive(Clone, Debug, Serialize)]
pub struct AgentDetailReport<'a> {
    pub id: u64,
    pub name: String,
    pub prism: f64,
    pub collection_count: u64,
    pub traits: Option<&'a AgentTraits>,
    pub deck: Option<&'a [DeckCard]>,
    pub deck_stats: Option<DeckStats>,
    pub events: Vec<&'a SimulationEvent>,
    pub events_window: PageWindow,
}

impl AgentDetailView {
    #[must_use]
    pub fn new(detail: AgentDetail) -> Self {
        let events_pager = Pagination::new(
            detail.agent_events.len(),
            PaginationOptions::with_page_size(AGENT_EVENTS_PAGE_SIZE),
        );
        Self { detail, events_pager }
    }

    #[must_use]
    pub fn detail(&self) -> &AgentDetail {
        &self.detail
    }

    /// The deck, when the agent is past the deck threshold and has one.
    #[must_use]
    pub fn deck(&self) -> Option<&[DeckCard]> {
        (shows_deck(self.detail.collection_count) && !self.detail.deck.is_empty()).then_some(self.detail.deck.as_slice())
    }

    #[must_use]
    pub fn deck_stats(&self) -> Option<DeckStats> {
        self.deck().and_then(deck_stats)
    }

    pub fn set_events_page(&mut self, page: i64) {
        self.events_pager.set_current_page(page);
    }

    #[must_use]
    pub fn events_page(&self) -> (&[SimulationEvent], PageWindow) {
        let window = self.events_pager.window();
        (window.slice(&self.detail.agent_events), window)
    }

    #[must_use]
    pub fn report(&self) -> AgentDetailReport<'_> {
        let (events, events_window) = self.events_page();
        AgentDetailReport {
            id: self.detail.id,
            name: self.detail.display_name(),
            prism: self.detail.prism,
            collection_count: self.detail.collection_count,
            traits: self.detail.traits.as_ref(),
            deck: self.deck(),
            deck_stats: self.deck_stats(),
            events: events.iter().collect(),
            events_window,
        }
    }
}

#[cfg(test)]
#[path = "agents_test.rs"]
mod agents_test;
