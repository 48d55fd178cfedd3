//! Trait-driven buy/sell hints shown next to a card.
//!
//! These are display heuristics over a card's price history, not the
//! backend's trading logic: they explain which archetypes a card appeals to
//! and whether its owner would likely let it go.

use crate::net::types::{CardInstance, PricePoint, PrimaryTrait, Rarity};

/// How far back a gambler looks for a rising price.
pub const GAMBLER_LOOKBACK_TICKS: usize = 10;
pub const SCAVENGER_PRICE_CEILING: f64 = 10.0;
pub const COMPETITOR_MIN_QUALITY: f64 = 7.0;
pub const COMPETITOR_MIN_DESIRABILITY: f64 = 6.0;

/// Collectors chase Rare, Mythic and Alternate Art cards.
#[must_use]
pub fn is_collector_interested(rarity: &Rarity) -> bool {
    rarity.is_collectible()
}

#[must_use]
pub fn is_competitor_interested(quality: f64, desirability: f64) -> bool {
    quality >= COMPETITOR_MIN_QUALITY && desirability >= COMPETITOR_MIN_DESIRABILITY
}

/// True when the price rose across the last `ticks` points (at least two).
#[must_use]
pub fn is_gambler_interested(history: &[PricePoint], ticks: usize) -> bool {
    let recent = &history[history.len().saturating_sub(ticks)..];
    match (recent.first(), recent.last()) {
        (Some(first), Some(last)) if recent.len() >= 2 => last.price > first.price,
        _ => false,
    }
}

#[must_use]
pub fn is_scavenger_interested(price: f64) -> bool {
    price < SCAVENGER_PRICE_CEILING
}

/// Quality per Prism; 0 for free or negatively priced cards.
#[must_use]
pub fn value_ratio(quality: f64, price: f64) -> f64 {
    if price > 0.0 { quality / price } else { 0.0 }
}

/// Whether an owner with `primary` would sell given the last two price points.
///
/// Everyone sells into a falling price. Otherwise collectors shed
/// non-collectible rarities, scavengers hold, gamblers sell once the price
/// stops rising, and everyone else holds.
#[must_use]
pub fn should_sell(history: &[PricePoint], primary: PrimaryTrait, rarity: &Rarity) -> bool {
    let [.., prev, last] = history else {
        return false;
    };
    if last.price < prev.price {
        return true;
    }
    match primary {
        PrimaryTrait::Collector => !rarity.is_collectible(),
        PrimaryTrait::Scavenger => false,
        PrimaryTrait::Gambler => last.price <= prev.price,
        PrimaryTrait::Competitor | PrimaryTrait::Unknown => false,
    }
}

/// Archetypes that would want to buy `card`, in trait order.
#[must_use]
pub fn interested_traits(card: &CardInstance) -> Vec<PrimaryTrait> {
    let mut traits = Vec::new();
    if is_collector_interested(&card.rarity) {
        traits.push(PrimaryTrait::Collector);
    }
    if is_competitor_interested(card.quality_score, card.desirability) {
        traits.push(PrimaryTrait::Competitor);
    }
    if is_gambler_interested(&card.price_history, GAMBLER_LOOKBACK_TICKS) {
        traits.push(PrimaryTrait::Gambler);
    }
    if is_scavenger_interested(card.price) {
        traits.push(PrimaryTrait::Scavenger);
    }
    traits
}

/// Archetypes whose owner would sell `card` now, in trait order.
#[must_use]
pub fn selling_traits(card: &CardInstance) -> Vec<PrimaryTrait> {
    [PrimaryTrait::Collector, PrimaryTrait::Competitor, PrimaryTrait::Gambler, PrimaryTrait::Scavenger]
        .into_iter()
        .filter(|&primary| should_sell(&card.price_history, primary, &card.rarity))
        .collect()
}

#[cfg(test)]
#[path = "behavior_test.rs"]
mod behavior_test;
