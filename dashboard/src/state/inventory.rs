//! One agent's card collection: filters, sorts, rarity counts, card detail.

use pager::{PageWindow, Pagination, PaginationOptions};
use serde::Serialize;

use super::events::contains_ignore_case;
use super::showing_footer;
use crate::net::types::{CardInstance, Inventory, PrimaryTrait, Rarity};
use crate::util::behavior::{interested_traits, selling_traits, value_ratio};
use crate::util::gems::{gem_cost_text, gem_glyphs};
use crate::util::price::price_display;
use crate::util::sparkline::price_sparkline;

/// Sparkline width used by the card detail.
pub const DETAIL_SPARKLINE_WIDTH: usize = 24;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InventorySort {
    #[default]
    Name,
    Rarity,
    Quality,
    Price,
}

impl InventorySort {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "rarity" => Some(Self::Rarity),
            "quality" => Some(Self::Quality),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rarity => "rarity",
            Self::Quality => "quality",
            Self::Price => "price",
        }
    }

    fn sort(self, cards: &mut [&CardInstance]) {
        match self {
            Self::Name => cards.sort_by_cached_key(|c| c.name.to_lowercase()),
            Self::Rarity => cards.sort_by_key(|c| c.rarity.rank()),
            Self::Quality => cards.sort_by(|a, b| b.quality_score.total_cmp(&a.quality_score)),
            Self::Price => cards.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
    }
}

/// Inventory filters. `None` means "all".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InventoryFilter {
    pub search: String,
    pub rarity: Option<Rarity>,
    pub color: Option<String>,
    pub sort: InventorySort,
}

impl InventoryFilter {
    #[must_use]
    pub fn matches(&self, card: &CardInstance) -> bool {
        self.rarity.as_ref().is_none_or(|r| card.rarity == *r)
            && self.color.as_deref().is_none_or(|c| card.color == c)
            && contains_ignore_case(&card.name, &self.search)
    }

    fn triggers(&self) -> [String; 4] {
        [
            self.search.clone(),
            self.rarity.as_ref().map_or_else(String::new, ToString::to_string),
            self.color.clone().unwrap_or_default(),
            self.sort.as_str().to_string(),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RarityCount {
    pub rarity: Rarity,
    pub count: usize,
}

/// One rendered page of an inventory.
#[derive(Clone, Debug, Serialize)]
pub struct InventoryPage<'a> {
    pub agent_id: u64,
    pub name: &'a str,
    pub cards: Vec<&'a CardInstance>,
    pub window: PageWindow,
    pub shown: usize,
    pub total: u64,
    pub rarity_counts: Vec<RarityCount>,
    pub color_options: Vec<&'a str>,
}

impl InventoryPage<'_> {
    #[must_use]
    pub fn footer(&self) -> String {
        showing_footer(self.shown, usize::try_from(self.total).unwrap_or(usize::MAX), "cards")
    }
}

#[derive(Clone, Debug)]
pub struct InventoryView {
    inventory: Inventory,
    filter: InventoryFilter,
    pager: Pagination<String>,
}

impl InventoryView {
    #[must_use]
    pub fn new(inventory: Inventory) -> Self {
        Self::with_options(inventory, PaginationOptions::default())
    }

    #[must_use]
    pub fn with_options(inventory: Inventory, options: PaginationOptions) -> Self {
        let filter = InventoryFilter::default();
        let pager = Pagination::new(inventory.cards.len(), options).with_reset_triggers(filter.triggers().to_vec());
        Self { inventory, filter, pager }
    }

    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[must_use]
    pub fn filter(&self) -> &InventoryFilter {
        &self.filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.observe();
    }

    pub fn set_rarity(&mut self, rarity: Option<Rarity>) {
        self.filter.rarity = rarity;
        self.observe();
    }

    pub fn set_color(&mut self, color: Option<String>) {
        self.filter.color = color;
        self.observe();
    }

    pub fn set_sort(&mut self, sort: InventorySort) {
        self.filter.sort = sort;
        self.observe();
    }

    pub fn set_page(&mut self, page: i64) {
        self.pager.set_current_page(page);
    }

    /// Sorted distinct colors; blank colors are not offered.
    #[must_use]
    pub fn color_options(&self) -> Vec<&str> {
        let mut colors: Vec<&str> = self
            .inventory
            .cards
            .iter()
            .map(|c| c.color.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        colors.sort_unstable();
        colors.dedup();
        colors
    }

    /// Cards per rarity across the whole collection, in first-seen order.
    #[must_use]
    pub fn rarity_counts(&self) -> Vec<RarityCount> {
        let mut counts: Vec<RarityCount> = Vec::new();
        for card in &self.inventory.cards {
            match counts.iter_mut().find(|c| c.rarity == card.rarity) {
                Some(entry) => entry.count += 1,
                None => counts.push(RarityCount { rarity: card.rarity.clone(), count: 1 }),
            }
        }
        counts
    }

    /// Cards passing the filter, in the selected order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&CardInstance> {
        let mut cards: Vec<&CardInstance> = self.inventory.cards.iter().filter(|c| self.filter.matches(c)).collect();
        self.filter.sort.sort(&mut cards);
        cards
    }

    /// Collection size reported by the backend, or the card count when it sent none.
    #[must_use]
    pub fn total(&self) -> u64 {
        match self.inventory.collection_count {
            0 => self.inventory.cards.len() as u64,
            count => count,
        }
    }

    #[must_use]
    pub fn page(&self) -> InventoryPage<'_> {
        let filtered = self.filtered();
        let window = self.pager.window();
        InventoryPage {
            agent_id: self.inventory.id,
            name: &self.inventory.name,
            cards: window.slice(&filtered).to_vec(),
            window,
            shown: filtered.len(),
            total: self.total(),
            rarity_counts: self.rarity_counts(),
            color_options: self.color_options(),
        }
    }

    /// Look up a card by instance id, falling back to the first copy of a card id.
    #[must_use]
    pub fn card(&self, id: &str) -> Option<&CardInstance> {
        let cards = &self.inventory.cards;
        cards
            .iter()
            .find(|c| c.card_instance_id.as_deref() == Some(id))
            .or_else(|| cards.iter().find(|c| c.card_id == id))
    }

    fn observe(&mut self) {
        let count = self.filtered().len();
        let triggers = self.filter.triggers();
        self.pager.observe(count, &triggers);
    }
}

// =============================================================================
// CARD DETAIL
// =============================================================================

/// Everything the card detail panel shows for one instance.
#[derive(Clone, Debug, Serialize)]
pub struct CardDetail<'a> {
    pub card: &'a CardInstance,
    pub price: String,
    pub cost: String,
    pub gems: String,
    pub interested: Vec<PrimaryTrait>,
    pub would_sell: Vec<PrimaryTrait>,
    pub value_ratio: f64,
    pub sparkline: String,
    pub record: Option<(u64, u64)>,
}

impl<'a> CardDetail<'a> {
    #[must_use]
    pub fn new(card: &'a CardInstance) -> Self {
        let record = (card.win_count + card.loss_count > 0).then_some((card.win_count, card.loss_count));
        Self {
            card,
            price: price_display(card.price),
            cost: gem_cost_text(&card.color, card.gem_colored, card.gem_colorless),
            gems: gem_glyphs(&card.color, card.gem_colored, card.gem_colorless),
            interested: interested_traits(card),
            would_sell: selling_traits(card),
            value_ratio: value_ratio(card.quality_score, card.price),
            sparkline: price_sparkline(&card.price_history, DETAIL_SPARKLINE_WIDTH),
            record,
        }
    }
}

#[cfg(test)]
#[path = "inventory_test.rs"]
mod inventory_test;
