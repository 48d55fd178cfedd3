//! World summary: aggregate counters at the latest simulated tick.

use serde::{Deserialize, Serialize};

use crate::net::types::TickSnapshot;

/// Cards per booster pack, used to estimate boosters already opened.
pub const CARDS_PER_BOOSTER: u64 = 12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSummary {
    pub tick: u64,
    pub agent_count: u64,
    pub total_cards: u64,
    pub total_unopened_boosters: u64,
}

impl From<&TickSnapshot> for WorldSummary {
    fn from(snapshot: &TickSnapshot) -> Self {
        Self {
            tick: snapshot.tick,
            agent_count: snapshot.agent_count,
            total_cards: snapshot.total_cards,
            total_unopened_boosters: snapshot.total_unopened_boosters,
        }
    }
}

impl WorldSummary {
    /// `round(unopened + total_cards / 12)`, halves rounding up.
    #[must_use]
    pub fn approx_total_boosters(&self) -> u64 {
        let opened = self.total_cards.saturating_add(CARDS_PER_BOOSTER / 2) / CARDS_PER_BOOSTER;
        self.total_unopened_boosters.saturating_add(opened)
    }

    /// Labelled rows in display order.
    #[must_use]
    pub fn rows(&self) -> [(&'static str, u64); 5] {
        [
            ("Tick", self.tick),
            ("Agents", self.agent_count),
            ("Total cards", self.total_cards),
            ("Unopened boosters", self.total_unopened_boosters),
            ("Approx. total boosters", self.approx_total_boosters()),
        ]
    }
}

#[cfg(test)]
#[path = "world_test.rs"]
mod world_test;
