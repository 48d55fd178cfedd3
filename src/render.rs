//! Plain-text rendering of dashboard views.
//!
//! Each function returns the full text of one view so commands only print.

use std::fmt::Write as _;

use dashboard::net::types::{AgentSummary, AgentTraits};
use dashboard::state::agents::{AgentDetailReport, AgentListTotals, DeckStats, sorted_agents};
use dashboard::state::events::{EventsPage, event_type_label};
use dashboard::state::inventory::{CardDetail, InventoryPage};
use dashboard::state::market::MarketPage;
use dashboard::state::search::CardSearch;
use dashboard::state::world::WorldSummary;
use dashboard::util::price::{format_price, price_display};
use pager::PageWindow;

pub const NO_WORLD: &str = "No world data yet. Run a simulation to see world statistics.";
pub const NO_EVENTS: &str = "No events yet. Run a simulation to see events.";
pub const NO_MATCHES: &str = "No cards match your filters.";
pub const NO_MARKET: &str = "No cards currently for sale.";
pub const NO_AGENTS: &str = "No agents available";

/// Placeholder line for a view whose data failed to load.
#[must_use]
pub fn error_line(message: &str) -> String {
    format!("Error: {message}")
}

fn pager_line(window: &PageWindow) -> String {
    let mut line = window.to_string();
    if window.has_previous() {
        line.push_str("  [prev]");
    }
    if window.has_next() {
        line.push_str("  [next]");
    }
    line
}

// =============================================================================
// WORLD & EVENTS
// =============================================================================

#[must_use]
pub fn world(summary: Option<&WorldSummary>) -> String {
    let Some(summary) = summary else {
        return NO_WORLD.to_string();
    };
    let mut out = String::from("World\n");
    for (label, value) in summary.rows() {
        let _ = writeln!(out, "  {label:<24}{value}");
    }
    out
}

#[must_use]
pub fn events(page: &EventsPage<'_>) -> String {
    if page.total == 0 {
        return NO_EVENTS.to_string();
    }
    let mut out = String::new();
    let types: Vec<&str> = page.event_types.iter().map(|t| event_type_label(t)).collect();
    let _ = writeln!(out, "Types: all, {}", types.join(", "));
    if page.events.is_empty() {
        let _ = writeln!(out, "No events match your filters.");
    }
    for event in &page.events {
        let _ = writeln!(
            out,
            "  [{:>4}] {:<18} {}",
            event.tick,
            event_type_label(&event.event_type),
            event.description
        );
    }
    let _ = writeln!(out, "{}", page.footer());
    let _ = writeln!(out, "{}", pager_line(&page.window));
    out
}

// =============================================================================
// AGENTS
// =============================================================================

#[must_use]
pub fn agent_list(agents: &[AgentSummary], totals: &AgentListTotals) -> String {
    if agents.is_empty() {
        return NO_AGENTS.to_string();
    }
    let mut out = String::from("Agents\n");
    for agent in sorted_agents(agents) {
        let _ = writeln!(
            out,
            "  Agent {:<4} {:>5} cards  {:>12} Prism",
            agent.id,
            agent.collection_count,
            format_price(agent.prism)
        );
    }
    let _ = writeln!(
        out,
        "{} agents, {} cards, {} Prism total",
        totals.agents,
        totals.total_cards,
        format_price(totals.total_prism)
    );
    out
}

fn traits(out: &mut String, traits: &AgentTraits) {
    let _ = writeln!(out, "Primary trait: {}", traits.primary_trait.label());
    for (kind, score) in traits.scores() {
        let _ = writeln!(out, "  {:<12}{score:.2}", kind.label());
    }
    let _ = writeln!(out, "  Risk aversion: {}  Time horizon: {}", traits.risk_aversion, traits.time_horizon);
}

fn deck_summary(out: &mut String, stats: &DeckStats) {
    let _ = writeln!(
        out,
        "Deck: {} cards, avg feasibility {:.2}, {} weak",
        stats.card_count, stats.average_feasibility, stats.weak_cards
    );
    let _ = writeln!(out, "  Best: {} ({:.2})", stats.best.name, stats.best.feasibility_score);
    let _ = writeln!(out, "  Worst: {} ({:.2})", stats.worst.name, stats.worst.feasibility_score);
    let _ = write!(out, "  Record: {}W {}L", stats.wins, stats.losses);
    if let Some(rate) = stats.win_rate() {
        let _ = write!(out, " ({:.0}%)", rate * 100.0);
    }
    out.push('\n');
}

#[must_use]
pub fn agent_detail(report: &AgentDetailReport<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", report.name, report.id);
    let _ = writeln!(out, "Prism: {}", price_display(report.prism));
    let _ = writeln!(out, "Collection: {} cards", report.collection_count);

    if let Some(t) = report.traits {
        traits(&mut out, t);
    }

    match (report.deck, &report.deck_stats) {
        (Some(deck), Some(stats)) => {
            deck_summary(&mut out, stats);
            for card in deck {
                let _ = writeln!(
                    out,
                    "  {:<22} {:<10} {:>3}/{:<3} cost {:<4} feas {:.2}",
                    card.name, card.color, card.power, card.health, card.cost, card.feasibility_score
                );
            }
        }
        _ => {
            let _ = writeln!(out, "No deck yet.");
        }
    }

    let _ = writeln!(out, "Events");
    if report.events.is_empty() {
        let _ = writeln!(out, "  No events for this agent.");
    } else {
        for event in &report.events {
            let _ = writeln!(out, "  [{:>4}] {}", event.tick, event.description);
        }
        let _ = writeln!(out, "{}", pager_line(&report.events_window));
    }
    out
}

// =============================================================================
// CARDS
// =============================================================================

#[must_use]
pub fn inventory(page: &InventoryPage<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} collection", page.name);
    let counts: Vec<String> = page.rarity_counts.iter().map(|c| format!("{} {}", c.rarity, c.count)).collect();
    if !counts.is_empty() {
        let _ = writeln!(out, "Rarities: {}", counts.join(", "));
    }
    if !page.color_options.is_empty() {
        let _ = writeln!(out, "Colors: {}", page.color_options.join(", "));
    }
    if page.cards.is_empty() {
        let _ = writeln!(out, "{NO_MATCHES}");
    }
    for card in &page.cards {
        let holo = if card.is_hologram { " *holo*" } else { "" };
        let _ = writeln!(
            out,
            "  {:<24} {:<10} {:<9} Q{:<5.1} {}{holo}",
            card.name,
            card.rarity.as_str(),
            card.color,
            card.quality_score,
            price_display(card.price)
        );
    }
    let _ = writeln!(out, "{}", page.footer());
    let _ = writeln!(out, "{}", pager_line(&page.window));
    out
}

#[must_use]
pub fn card_detail(detail: &CardDetail<'_>) -> String {
    let card = detail.card;
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", card.name, card.rarity);
    if let Some(card_type) = &card.card_type {
        let _ = writeln!(out, "Type: {card_type}");
    }
    let _ = writeln!(out, "Color: {}", card.color);
    if let (Some(power), Some(health)) = (card.power, card.health) {
        let _ = writeln!(out, "Power/Health: {power}/{health}");
    }
    let _ = writeln!(out, "Cost: {} {}", detail.gems, detail.cost);
    let _ = writeln!(out, "Price: {}", detail.price);
    let _ = writeln!(out, "Quality: {:.1}  Desirability: {:.1}", card.quality_score, card.desirability);
    if let Some(condition) = &card.condition {
        let _ = writeln!(out, "Condition: {condition}");
    }
    if let Some((wins, losses)) = detail.record {
        let _ = writeln!(out, "Record: {wins}W {losses}L");
    }
    if !detail.interested.is_empty() {
        let labels: Vec<&str> = detail.interested.iter().map(|t| t.label()).collect();
        let _ = writeln!(out, "Interested: {}", labels.join(", "));
    }
    if !detail.would_sell.is_empty() {
        let labels: Vec<&str> = detail.would_sell.iter().map(|t| t.label()).collect();
        let _ = writeln!(out, "Would sell: {}", labels.join(", "));
    }
    let _ = writeln!(out, "Value: {:.2} quality per Prism", detail.value_ratio);
    if detail.sparkline.is_empty() {
        let _ = writeln!(out, "Price history: none");
    } else {
        let _ = writeln!(out, "Price history: {} ({} points)", detail.sparkline, card.price_history.len());
    }
    let _ = writeln!(out, "{}", card.flavor_text.as_deref().unwrap_or("No flavor text available."));
    out
}

// =============================================================================
// MARKET & SEARCH
// =============================================================================

#[must_use]
pub fn market(page: &MarketPage<'_>) -> String {
    if page.total == 0 {
        return NO_MARKET.to_string();
    }
    let mut out = String::from("Market\n");
    if page.listings.is_empty() {
        let _ = writeln!(out, "{NO_MATCHES}");
    }
    for listing in &page.listings {
        let _ = writeln!(
            out,
            "  {:<24} {:<10} {} {:<9} Q{:<5.1} {:>14}  seller {}",
            listing.name,
            listing.rarity.as_str(),
            listing.gem.icon,
            listing.color,
            listing.quality_score,
            price_display(listing.price),
            listing.seller_name
        );
    }
    let _ = writeln!(out, "{}", page.footer());
    let _ = writeln!(out, "{}", pager_line(&page.window));
    out
}

#[must_use]
pub fn search(search: &CardSearch) -> String {
    if search.hits.is_empty() {
        return format!("No cards found matching \"{}\"", search.term);
    }
    let mut out = String::new();
    let _ = writeln!(out, "{}", search.summary());
    for hit in &search.hits {
        let _ = writeln!(
            out,
            "  {:<24} {:<10} {:<10} x{:<3} avg {:>10}  history {}",
            hit.card.name,
            hit.card.rarity.as_str(),
            hit.agent_name,
            hit.instance_count,
            format_price(hit.mean_price),
            hit.price_history_len
        );
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;
