//! Networking modules for the simulation backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls behind the mockable `SimulationApi` seam,
//! `poller` refreshes the agent list on an interval, and `types` defines the
//! normalized wire schema.

pub mod api;
pub mod poller;
pub mod types;
