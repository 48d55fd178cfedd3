//! View state behind each dashboard view.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views are recomputed from data already fetched or loaded from the session
//! snapshot. Only the runner, the selection fetch, and the market and search
//! loaders reach the API seam; only `snapshot` touches disk.

pub mod agents;
pub mod events;
pub mod inventory;
pub mod market;
pub mod runner;
pub mod search;
pub mod selection;
pub mod snapshot;
pub mod world;

/// `Showing X of Y <noun>` footer shared by list views.
#[must_use]
pub fn showing_footer(shown: usize, total: usize, noun: &str) -> String {
    format!("Showing {shown} of {total} {noun}")
}
