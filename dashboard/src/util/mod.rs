//! Formatting and card heuristics shared across views.

pub mod behavior;
pub mod gems;
pub mod price;
pub mod sparkline;
