use super::*;

fn world(total_cards: u64, unopened: u64) -> WorldSummary {
    WorldSummary { tick: 3, agent_count: 10, total_cards, total_unopened_boosters: unopened }
}

#[test]
fn approx_boosters_adds_opened_estimate() {
    assert_eq!(world(120, 4).approx_total_boosters(), 14);
}

#[test]
fn approx_boosters_rounds_half_up() {
    assert_eq!(world(6, 0).approx_total_boosters(), 1);
    assert_eq!(world(5, 0).approx_total_boosters(), 0);
    assert_eq!(world(18, 2).approx_total_boosters(), 4);
}

#[test]
fn empty_world_is_all_zero() {
    let summary = WorldSummary::default();
    assert_eq!(summary.approx_total_boosters(), 0);
    assert!(summary.rows().iter().all(|(_, value)| *value == 0));
}

#[test]
fn from_snapshot_copies_counters() {
    let snap = TickSnapshot { tick: 7, agent_count: 2, total_cards: 48, total_unopened_boosters: 1, events: Vec::new() };
    let summary = WorldSummary::from(&snap);
    assert_eq!(summary.tick, 7);
    assert_eq!(summary.total_cards, 48);
    assert_eq!(summary.rows()[4], ("Approx. total boosters", 5));
}
