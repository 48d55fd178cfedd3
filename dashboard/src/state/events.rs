//! Global event log view with type filter, description search, and pagination.

use pager::{PageWindow, Pagination, PaginationOptions};
use serde::Serialize;

use super::showing_footer;
use crate::net::types::SimulationEvent;

/// Filter value meaning "every event type".
pub const ALL_EVENT_TYPES: &str = "all";

/// Human label for a backend event type; unknown types pass through.
#[must_use]
pub fn event_type_label(event_type: &str) -> &str {
    match event_type {
        "booster_purchase" => "Booster Purchase",
        "card_trade" => "Card Trade",
        "card_sale" => "Card Sale",
        "match" => "Match",
        "booster_open" => "Booster Open",
        other => other,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventTypeFilter {
    #[default]
    All,
    Only(String),
}

impl EventTypeFilter {
    /// `None`, empty, or `all` select every type.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("" | ALL_EVENT_TYPES) => Self::All,
            Some(event_type) => Self::Only(event_type.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_EVENT_TYPES,
            Self::Only(event_type) => event_type,
        }
    }

    #[must_use]
    pub fn matches(&self, event: &SimulationEvent) -> bool {
        match self {
            Self::All => true,
            Self::Only(event_type) => event.event_type == *event_type,
        }
    }
}

/// Filters applied to the event log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub event_type: EventTypeFilter,
    /// Case-insensitive substring of the description; empty matches all.
    pub search: String,
}

impl EventFilter {
    #[must_use]
    pub fn matches(&self, event: &SimulationEvent) -> bool {
        self.event_type.matches(event) && contains_ignore_case(&event.description, &self.search)
    }

    fn triggers(&self) -> [String; 2] {
        [self.event_type.as_str().to_string(), self.search.clone()]
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// One rendered page of the event log.
#[derive(Clone, Debug, Serialize)]
pub struct EventsPage<'a> {
    pub events: Vec<&'a SimulationEvent>,
    pub window: PageWindow,
    pub shown: usize,
    pub total: usize,
    pub event_types: Vec<&'a str>,
}

impl EventsPage<'_> {
    #[must_use]
    pub fn footer(&self) -> String {
        showing_footer(self.shown, self.total, "events")
    }
}

/// Event log state. Changing the filter or search returns to the first page.
#[derive(Clone, Debug)]
pub struct EventsView {
    events: Vec<SimulationEvent>,
    filter: EventFilter,
    pager: Pagination<String>,
}

impl EventsView {
    #[must_use]
    pub fn new(events: Vec<SimulationEvent>) -> Self {
        Self::with_options(events, PaginationOptions::default())
    }

    #[must_use]
    pub fn with_options(events: Vec<SimulationEvent>, options: PaginationOptions) -> Self {
        let filter = EventFilter::default();
        let pager = Pagination::new(events.len(), options).with_reset_triggers(filter.triggers().to_vec());
        Self { events, filter, pager }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    pub fn set_type_filter(&mut self, event_type: EventTypeFilter) {
        self.filter.event_type = event_type;
        self.observe();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.observe();
    }

    pub fn set_page(&mut self, page: i64) {
        self.pager.set_current_page(page);
    }

    /// Distinct event types in first-seen order.
    #[must_use]
    pub fn event_types(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for event in &self.events {
            if !seen.contains(&event.event_type.as_str()) {
                seen.push(&event.event_type);
            }
        }
        seen
    }

    #[must_use]
    pub fn filtered(&self) -> Vec<&SimulationEvent> {
        self.events.iter().filter(|e| self.filter.matches(e)).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn page(&self) -> EventsPage<'_> {
        let filtered = self.filtered();
        let window = self.pager.window();
        EventsPage {
            events: window.slice(&filtered).to_vec(),
            window,
            shown: filtered.len(),
            total: self.events.len(),
            event_types: self.event_types(),
        }
    }

    fn observe(&mut self) {
        let count = self.filtered().len();
        let triggers = self.filter.triggers();
        self.pager.observe(count, &triggers);
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;
