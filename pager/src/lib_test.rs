use super::*;

fn pager(item_count: usize, page_size: i64, initial_page: i64) -> Pagination {
    Pagination::new(
        item_count,
        PaginationOptions {
            initial_page_size: page_size,
            initial_page,
        },
    )
}

// =============================================================
// Construction
// =============================================================

#[test]
fn defaults_to_page_one_of_twenty_five() {
    let p = Pagination::new(100, PaginationOptions::default());
    assert_eq!(p.current_page(), 1);
    assert_eq!(p.page_size(), 25);
    assert_eq!(p.total_pages(), 4);
}

#[test]
fn custom_page_size_changes_total_pages() {
    let p = Pagination::new(100, PaginationOptions::with_page_size(50));
    assert_eq!(p.page_size(), 50);
    assert_eq!(p.total_pages(), 2);
}

#[test]
fn custom_initial_page_is_exposed() {
    let p = pager(100, 25, 2);
    assert_eq!(p.current_page(), 2);
}

#[test]
fn zero_items_is_one_empty_page() {
    let p = Pagination::new(0, PaginationOptions::default());
    assert_eq!(p.total_pages(), 1);
    assert_eq!(p.current_page(), 1);
    assert_eq!(p.start_idx(), 0);
    assert_eq!(p.end_idx(), 25);
}

#[test]
fn non_positive_initial_page_size_falls_back_to_default() {
    assert_eq!(pager(100, 0, 1).page_size(), DEFAULT_PAGE_SIZE);
    assert_eq!(pager(100, -3, 1).page_size(), DEFAULT_PAGE_SIZE);
}

#[test]
fn out_of_range_initial_page_is_clamped_on_read() {
    assert_eq!(pager(100, 25, 9).current_page(), 4);
    assert_eq!(pager(100, 25, -2).current_page(), 1);
}

// =============================================================
// Derived indices
// =============================================================

#[test]
fn first_page_indices() {
    let p = pager(100, 25, 1);
    assert_eq!(p.start_idx(), 0);
    assert_eq!(p.end_idx(), 25);
}

#[test]
fn middle_page_indices() {
    let p = pager(100, 25, 3);
    assert_eq!(p.start_idx(), 50);
    assert_eq!(p.end_idx(), 75);
}

#[test]
fn exact_last_page_boundary() {
    let mut p = pager(100, 25, 1);
    p.set_current_page(4);
    assert_eq!(p.start_idx(), 75);
    assert_eq!(p.end_idx(), 100);
    assert_eq!(p.total_pages(), 4);
}

#[test]
fn incomplete_last_page_end_exceeds_item_count() {
    let p = pager(105, 25, 5);
    assert_eq!(p.total_pages(), 5);
    assert_eq!(p.start_idx(), 100);
    assert_eq!(p.end_idx(), 125);
}

#[test]
fn total_pages_matches_ceiling_formula() {
    for item_count in [0_usize, 1, 24, 25, 26, 99, 100, 101, 1_000] {
        for size in [1_i64, 2, 7, 25, 100] {
            let p = pager(item_count, size, 1);
            let size = usize::try_from(size).unwrap();
            let expected = item_count.div_ceil(size).max(1);
            assert_eq!(p.total_pages(), expected, "count={item_count} size={size}");
        }
    }
}

#[test]
fn large_item_counts() {
    assert_eq!(pager(1_000_000, 100, 1).total_pages(), 10_000);
    assert_eq!(pager(100, 1, 1).total_pages(), 100);
}

// =============================================================
// set_current_page
// =============================================================

#[test]
fn set_current_page_commits_valid_page() {
    let mut p = pager(100, 25, 1);
    p.set_current_page(2);
    assert_eq!(p.current_page(), 2);
}

#[test]
fn set_current_page_clamps_low() {
    let mut p = pager(100, 25, 1);
    p.set_current_page(-5);
    assert_eq!(p.current_page(), 1);
    p.set_current_page(0);
    assert_eq!(p.current_page(), 1);
}

#[test]
fn set_current_page_clamps_high() {
    let mut p = pager(100, 25, 1);
    p.set_current_page(100);
    assert_eq!(p.current_page(), 4);
    p.set_current_page(i64::MAX);
    assert_eq!(p.current_page(), 4);
}

#[test]
fn set_current_page_with_no_items_stays_on_one() {
    let mut p = pager(0, 25, 1);
    p.set_current_page(5);
    assert_eq!(p.current_page(), 1);
}

#[test]
fn arbitrary_page_requests_stay_in_range() {
    let mut p = pager(73, 10, 1);
    for page in [-1_000, -1, 0, 1, 3, 8, 9, 1_000, i64::MIN, i64::MAX] {
        p.set_current_page(page);
        let current = p.current_page();
        assert!((1..=p.total_pages()).contains(&current), "page={page}");
        assert!(p.start_idx() < p.end_idx());
    }
}

// =============================================================
// set_page_size
// =============================================================

#[test]
fn set_page_size_recomputes_total_pages() {
    let mut p = pager(100, 25, 1);
    p.set_page_size(50);
    assert_eq!(p.page_size(), 50);
    assert_eq!(p.total_pages(), 2);
}

#[test]
fn set_page_size_resets_to_first_page() {
    let mut p = pager(100, 25, 3);
    p.set_page_size(50);
    assert_eq!(p.page_size(), 50);
    assert_eq!(p.current_page(), 1);
    assert_eq!(p.total_pages(), 2);
}

#[test]
fn set_page_size_ignores_zero_and_negative() {
    let mut p = pager(100, 25, 3);
    p.set_page_size(0);
    assert_eq!(p.page_size(), 25);
    p.set_page_size(-10);
    assert_eq!(p.page_size(), 25);
    assert_eq!(p.current_page(), 3);
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn previous_page_moves_back() {
    let mut p = pager(100, 25, 3);
    p.previous_page();
    assert_eq!(p.current_page(), 2);
}

#[test]
fn previous_page_clamps_at_one() {
    let mut p = pager(100, 25, 1);
    p.previous_page();
    assert_eq!(p.current_page(), 1);
}

#[test]
fn next_page_moves_forward() {
    let mut p = pager(100, 25, 2);
    p.next_page();
    assert_eq!(p.current_page(), 3);
}

#[test]
fn next_page_clamps_at_last() {
    let mut p = pager(100, 25, 4);
    p.next_page();
    assert_eq!(p.current_page(), 4);
}

#[test]
fn first_and_last_page() {
    let mut p = pager(100, 25, 3);
    p.first_page();
    assert_eq!(p.current_page(), 1);
    p.last_page();
    assert_eq!(p.current_page(), 4);
}

#[test]
fn full_workflow() {
    let mut p = pager(100, 25, 1);
    p.next_page();
    assert_eq!(p.current_page(), 2);
    p.set_page_size(50);
    assert_eq!(p.current_page(), 1);
    assert_eq!(p.total_pages(), 2);
    p.last_page();
    assert_eq!(p.current_page(), 2);
    p.previous_page();
    assert_eq!(p.current_page(), 1);
}

#[test]
fn rapid_page_changes_settle_on_last_call() {
    let mut p = Pagination::new(100, PaginationOptions::default());
    p.next_page();
    p.next_page();
    p.previous_page();
    p.set_current_page(4);
    p.first_page();
    assert_eq!(p.current_page(), 1);
}

// =============================================================
// External item count changes
// =============================================================

#[test]
fn shrinking_count_on_first_page_stays_on_first_page() {
    let mut p = Pagination::new(100, PaginationOptions::default());
    assert_eq!(p.total_pages(), 4);
    p.set_item_count(50);
    assert_eq!(p.current_page(), 1);
    assert_eq!(p.total_pages(), 2);
}

#[test]
fn shrinking_count_self_corrects_to_new_last_page() {
    let mut p = pager(100, 25, 1);
    p.set_current_page(4);
    p.set_item_count(50);
    assert_eq!(p.total_pages(), 2);
    assert_eq!(p.current_page(), 2);
    assert_eq!(p.start_idx(), 25);
}

#[test]
fn corrected_page_is_committed_when_count_grows_back() {
    let mut p = pager(100, 25, 1);
    p.set_current_page(4);
    p.set_item_count(10);
    assert_eq!(p.current_page(), 1);
    p.set_item_count(100);
    assert_eq!(p.current_page(), 1);
}

#[test]
fn growing_count_keeps_current_page() {
    let mut p = pager(100, 25, 1);
    p.set_current_page(3);
    p.set_item_count(500);
    assert_eq!(p.current_page(), 3);
    assert_eq!(p.total_pages(), 20);
}

// =============================================================
// Reset triggers
// =============================================================

#[test]
fn changed_trigger_resets_to_first_page() {
    let mut p = Pagination::new(100, PaginationOptions::default()).with_reset_triggers(vec!["initial"]);
    p.set_current_page(3);
    assert_eq!(p.current_page(), 3);

    p.observe(100, &["initial"]);
    assert_eq!(p.current_page(), 3);

    p.observe(100, &["changed"]);
    assert_eq!(p.current_page(), 1);
}

#[test]
fn trigger_reset_respects_custom_initial_page() {
    let mut p = pager(100, 25, 2).with_reset_triggers(vec!["initial".to_owned()]);
    p.set_current_page(3);
    p.observe(100, &["changed".to_owned()]);
    assert_eq!(p.current_page(), 2);
}

#[test]
fn trigger_list_length_change_resets() {
    let mut p = pager(100, 25, 1).with_reset_triggers(vec![1_u8]);
    p.set_current_page(4);
    p.observe(100, &[1, 2]);
    assert_eq!(p.current_page(), 1);
}

#[test]
fn observe_applies_item_count_with_triggers() {
    let mut p = pager(100, 25, 1).with_reset_triggers(vec![0_u32]);
    p.set_current_page(4);
    p.observe(30, &[0]);
    assert_eq!(p.total_pages(), 2);
    assert_eq!(p.current_page(), 2);
}

// =============================================================
// PageWindow
// =============================================================

#[test]
fn window_snapshot_matches_reads() {
    let p = pager(105, 25, 5);
    let window = p.window();
    assert_eq!(
        window,
        PageWindow {
            current_page: 5,
            page_size: 25,
            total_pages: 5,
            start_idx: 100,
            end_idx: 125,
            item_count: 105,
        }
    );
    assert_eq!(window.to_string(), "Page 5 of 5");
}

#[test]
fn window_slice_clips_to_items() {
    let items: Vec<u32> = (0..105).collect();
    let window = pager(items.len(), 25, 5).window();
    assert_eq!(window.slice(&items), &[100, 101, 102, 103, 104]);
}

#[test]
fn window_slice_of_empty_list_is_empty() {
    let items: Vec<u32> = Vec::new();
    let window = pager(0, 25, 1).window();
    assert!(window.slice(&items).is_empty());
}

#[test]
fn window_navigation_flags() {
    let mut p = pager(100, 25, 1);
    assert!(!p.window().has_previous());
    assert!(p.window().has_next());
    p.last_page();
    assert!(p.window().has_previous());
    assert!(!p.window().has_next());
}

#[test]
fn window_serializes_to_json() {
    let json = serde_json::to_value(pager(100, 25, 2).window()).unwrap();
    assert_eq!(json["current_page"], 2);
    assert_eq!(json["total_pages"], 4);
    assert_eq!(json["start_idx"], 25);
}
