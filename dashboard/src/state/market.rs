//! Market view: every priced card instance across all agents.
//!
//! LIFECYCLE
//! =========
//! [`load_market`] fetches every agent's detail concurrently, skips agents
//! whose fetch fails (logged), and builds one listing per priced instance.
//! The resulting [`MarketView`] is pure and never refetches.

use futures_util::future::join_all;
use pager::{PageWindow, Pagination, PaginationOptions};
use serde::Serialize;
use tracing::{info, warn};

use super::events::contains_ignore_case;
use crate::net::api::SimulationApi;
use crate::net::types::{AgentDetail, AgentId, Rarity};
use crate::util::gems::{GemColorInfo, contrasting_text_color, gem_color_info, rarity_color};

pub const MARKET_PAGE_SIZE: i64 = 8;

// =============================================================================
// LOADING
// =============================================================================

/// Fetch agent details concurrently. Failed agents are logged and left out.
pub async fn load_agent_details(api: &dyn SimulationApi, ids: &[AgentId]) -> Vec<AgentDetail> {
    let results = join_all(ids.iter().map(|&id| async move { (id, api.get_agent(id).await) })).await;

    let mut details = Vec::with_capacity(results.len());
    for (agent_id, result) in results {
        match result {
            Ok(detail) => details.push(detail),
            Err(e) => warn!(agent_id, error = %e, code = e.error_code(), "agent detail fetch failed; skipping"),
        }
    }
    details
}

pub async fn load_market(api: &dyn SimulationApi, ids: &[AgentId]) -> MarketView {
    let details = load_agent_details(api, ids).await;
    let listings = listings_from(&details);
    info!(agents = details.len(), listings = listings.len(), "market loaded");
    MarketView::new(listings)
}

// =============================================================================
// LISTINGS
// =============================================================================

/// One card instance offered by its owner.
///
/// `gem` and the color fields are badge styling: the gem swatch draws its
/// label in `gem_text_color`, the rarity badge is filled with `rarity_color`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Listing {
    pub card_instance_id: String,
    pub card_id: String,
    pub name: String,
    pub color: String,
    pub gem: GemColorInfo,
    pub gem_text_color: &'static str,
    pub rarity: Rarity,
    pub rarity_color: &'static str,
    pub seller: AgentId,
    pub seller_name: String,
    pub price: f64,
    pub quality_score: f64,
    pub desirability: f64,
    pub condition: Option<String>,
}

/// Listings for every instance with a positive price.
#[must_use]
pub fn listings_from(details: &[AgentDetail]) -> Vec<Listing> {
    details
        .iter()
        .flat_map(|agent| {
            let seller_name = agent.display_name();
            agent
                .card_instances
                .iter()
                .enumerate()
                .filter(|(_, card)| card.price.is_finite() && card.price > 0.0)
                .map(move |(idx, card)| {
                    let gem = gem_color_info(&card.color);
                    Listing {
                        card_instance_id: card
                            .card_instance_id
                            .clone()
                            .unwrap_or_else(|| format!("card-{}-{idx}", agent.id)),
                        card_id: card.card_id.clone(),
                        name: card.name.clone(),
                        color: card.color.clone(),
                        gem_text_color: contrasting_text_color(gem.hex_color),
                        gem,
                        rarity: card.rarity.clone(),
                        rarity_color: rarity_color(&card.rarity),
                        seller: agent.id,
                        seller_name: seller_name.clone(),
                        price: card.price,
                        quality_score: card.quality_score,
                        desirability: card.desirability,
                        condition: card.condition.clone(),
                    }
                })
        })
        .collect()
}

// =============================================================================
// VIEW
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketSort {
    #[default]
    PriceLow,
    PriceHigh,
    Name,
    Quality,
}

impl MarketSort {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "price-low" | "price" => Some(Self::PriceLow),
            "price-high" => Some(Self::PriceHigh),
            "name" => Some(Self::Name),
            "quality" => Some(Self::Quality),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Name => "name",
            Self::Quality => "quality",
        }
    }

    fn sort(self, listings: &mut [&Listing]) {
        match self {
            Self::PriceLow => listings.sort_by(|a, b| a.price.total_cmp(&b.price)),
            Self::PriceHigh => listings.sort_by(|a, b| b.price.total_cmp(&a.price)),
            Self::Name => listings.sort_by_cached_key(|l| l.name.to_lowercase()),
            Self::Quality => listings.sort_by(|a, b| b.quality_score.total_cmp(&a.quality_score)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarketFilter {
    pub rarity: Option<Rarity>,
    pub seller: Option<AgentId>,
    pub search: String,
    pub sort: MarketSort,
}

impl MarketFilter {
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        self.rarity.as_ref().is_none_or(|r| listing.rarity == *r)
            && self.seller.is_none_or(|s| listing.seller == s)
            && contains_ignore_case(&listing.name, &self.search)
    }

    fn triggers(&self) -> [String; 4] {
        [
            self.rarity.as_ref().map_or_else(String::new, ToString::to_string),
            self.seller.map_or_else(String::new, |s| s.to_string()),
            self.search.clone(),
            self.sort.as_str().to_string(),
        ]
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MarketPage<'a> {
    pub listings: Vec<&'a Listing>,
    pub window: PageWindow,
    pub matching: usize,
    pub total: usize,
    pub rarity_options: Vec<&'a Rarity>,
    pub seller_options: Vec<AgentId>,
}

impl MarketPage<'_> {
    #[must_use]
    pub fn footer(&self) -> String {
        format!(
            "Showing {} of {} cards (filtered from {} total)",
            self.listings.len(),
            self.matching,
            self.total
        )
    }
}

#[derive(Clone, Debug)]
pub struct MarketView {
    listings: Vec<Listing>,
    filter: MarketFilter,
    pager: Pagination<String>,
}

impl MarketView {
    #[must_use]
    pub fn new(listings: Vec<Listing>) -> Self {
        let filter = MarketFilter::default();
        let pager = Pagination::new(listings.len(), PaginationOptions::with_page_size(MARKET_PAGE_SIZE))
            .with_reset_triggers(filter.triggers().to_vec());
        Self { listings, filter, pager }
    }

    #[must_use]
    pub fn filter(&self) -> &MarketFilter {
        &self.filter
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn set_rarity(&mut self, rarity: Option<Rarity>) {
        self.filter.rarity = rarity;
        self.observe();
    }

    pub fn set_seller(&mut self, seller: Option<AgentId>) {
        self.filter.seller = seller;
        self.observe();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.observe();
    }

    pub fn set_sort(&mut self, sort: MarketSort) {
        self.filter.sort = sort;
        self.observe();
    }

    pub fn set_page(&mut self, page: i64) {
        self.pager.set_current_page(page);
    }

    /// Distinct rarities on offer, sorted by label.
    #[must_use]
    pub fn rarity_options(&self) -> Vec<&Rarity> {
        let mut rarities: Vec<&Rarity> = self.listings.iter().map(|l| &l.rarity).collect();
        rarities.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        rarities.dedup();
        rarities
    }

    #[must_use]
    pub fn seller_options(&self) -> Vec<AgentId> {
        let mut sellers: Vec<AgentId> = self.listings.iter().map(|l| l.seller).collect();
        sellers.sort_unstable();
        sellers.dedup();
        sellers
    }

    #[must_use]
    pub fn filtered(&self) -> Vec<&Listing> {
        let mut listings: Vec<&Listing> = self.listings.iter().filter(|l| self.filter.matches(l)).collect();
        self.filter.sort.sort(&mut listings);
        listings
    }

    #[must_use]
    pub fn page(&self) -> MarketPage<'_> {
        let filtered = self.filtered();
        let window = self.pager.window();
        MarketPage {
            listings: window.slice(&filtered).to_vec(),
            window,
            matching: filtered.len(),
            total: self.listings.len(),
            rarity_options: self.rarity_options(),
            seller_options: self.seller_options(),
        }
    }

    fn observe(&mut self) {
        let count = self.filtered().len();
        let triggers = self.filter.triggers();
        self.pager.observe(count, &triggers);
    }
}

#[cfg(test)]
#[path = "market_test.rs"]
mod market_test;
