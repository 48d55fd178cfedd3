//! Client library for the Polydros simulation dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` talks to the simulation backend, `state` holds the pure view models
//! recomputed from fetched data, and `util` carries formatting and card
//! heuristics shared by the views. The binary composes these into commands.

pub mod config;
pub mod net;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod test_helpers;
