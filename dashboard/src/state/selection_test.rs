use super::*;
use crate::test_helpers::{MockApi, card, inventory};
use crate::net::types::Rarity;

fn detail(id: AgentId) -> AgentDetail {
    serde_json::from_value(serde_json::json!({"id": id, "prism": 1.0, "collection_count": 3})).unwrap()
}

// =============================================================
// RequestGate
// =============================================================

#[test]
fn fresh_gate_has_no_current_key() {
    let gate: RequestGate<u64> = RequestGate::new();
    assert_eq!(gate.current_key(), None);
}

#[test]
fn latest_ticket_is_current() {
    let mut gate = RequestGate::new();
    let ticket = gate.issue("a");
    assert!(gate.is_current(&ticket));
    assert_eq!(gate.current_key(), Some(&"a"));
}

#[test]
fn earlier_ticket_is_rejected_after_later_issue() {
    let mut gate = RequestGate::new();
    let first = gate.issue(1_u64);
    let second = gate.issue(2_u64);
    assert!(!gate.is_current(&first));
    assert!(gate.is_current(&second));
}

#[test]
fn reissuing_same_key_still_invalidates_older_ticket() {
    let mut gate = RequestGate::new();
    let first = gate.issue(7_u64);
    let second = gate.issue(7_u64);
    assert!(!gate.is_current(&first));
    assert!(gate.is_current(&second));
    assert!(second.generation > first.generation);
}

#[test]
fn cancel_invalidates_everything() {
    let mut gate = RequestGate::new();
    let ticket = gate.issue(3_u64);
    gate.cancel();
    assert!(!gate.is_current(&ticket));
    assert_eq!(gate.current_key(), None);
}

// =============================================================
// AgentSelection
// =============================================================

#[test]
fn select_clears_previous_agent_data() {
    let mut sel = AgentSelection::default();
    let t1 = sel.select(1);
    sel.apply_detail(&t1, Ok(detail(1)));
    assert!(sel.detail.is_some());

    sel.select(2);
    assert!(sel.detail.is_none());
    assert_eq!(sel.selected(), Some(2));
}

#[test]
fn stale_detail_is_discarded() {
    let mut sel = AgentSelection::default();
    let t1 = sel.select(1);
    let t2 = sel.select(2);

    assert_eq!(sel.apply_detail(&t2, Ok(detail(2))), Applied::Current);
    assert_eq!(sel.apply_detail(&t1, Ok(detail(1))), Applied::Stale);
    assert_eq!(sel.detail.as_ref().map(|d| d.id), Some(2));
}

#[test]
fn stale_inventory_arriving_first_is_discarded() {
    let mut sel = AgentSelection::default();
    let t1 = sel.select(1);
    let t2 = sel.select(2);

    assert_eq!(sel.apply_inventory(&t1, Ok(inventory(1, Vec::new()))), Applied::Stale);
    assert!(sel.inventory.is_none());
    assert_eq!(sel.apply_inventory(&t2, Ok(inventory(2, Vec::new()))), Applied::Current);
    assert_eq!(sel.inventory.as_ref().map(|i| i.id), Some(2));
}

#[test]
fn errors_are_recorded_for_current_ticket() {
    let mut sel = AgentSelection::default();
    let ticket = sel.select(9);
    sel.apply_detail(&ticket, Err(ApiError::Backend("Agent not found".into())));
    sel.apply_inventory(&ticket, Err(ApiError::Backend("Agent not found".into())));
    assert_eq!(sel.detail_error.as_deref(), Some("Agent not found"));
    assert_eq!(sel.inventory_error.as_deref(), Some("Agent not found"));
}

#[test]
fn clear_rejects_outstanding_ticket() {
    let mut sel = AgentSelection::default();
    let ticket = sel.select(1);
    sel.clear();
    assert_eq!(sel.apply_detail(&ticket, Ok(detail(1))), Applied::Stale);
    assert_eq!(sel.selected(), None);
    assert!(sel.detail.is_none());
}

#[tokio::test]
async fn fetch_selection_applies_both_halves() {
    let api = MockApi::with_inventories(vec![inventory(4, vec![card("c1", "Ember", Rarity::Rare, "Ruby", 3.0)])]);
    api.details.lock().unwrap().insert(4, detail(4));

    let mut sel = AgentSelection::default();
    let ticket = sel.select(4);
    let response = fetch_selection(&api, &ticket).await;
    assert_eq!(sel.apply(&ticket, response), Applied::Current);
    assert_eq!(sel.detail.as_ref().map(|d| d.id), Some(4));
    assert_eq!(sel.inventory.as_ref().map(|i| i.cards.len()), Some(1));
}

#[tokio::test]
async fn response_for_superseded_selection_is_dropped() {
    let api = MockApi::with_inventories(vec![inventory(1, Vec::new()), inventory(2, Vec::new())]);
    api.details.lock().unwrap().insert(1, detail(1));
    api.details.lock().unwrap().insert(2, detail(2));

    let mut sel = AgentSelection::default();
    let t1 = sel.select(1);
    let slow = fetch_selection(&api, &t1).await;
    let t2 = sel.select(2);
    let fast = fetch_selection(&api, &t2).await;

    assert_eq!(sel.apply(&t2, fast), Applied::Current);
    assert_eq!(sel.apply(&t1, slow), Applied::Stale);
    assert_eq!(sel.detail.as_ref().map(|d| d.id), Some(2));
    assert_eq!(sel.inventory.as_ref().map(|i| i.id), Some(2));
}
