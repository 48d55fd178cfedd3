//! Simulation runner: operator input, validation, and tick advancement.
//!
//! DESIGN
//! ======
//! The backend replays a simulation from tick 0 on every `POST /run`, so
//! advancing by N ticks sends the cumulative target `current_tick + N` with
//! the same seed and agent count. The last point of the returned series is
//! the new world summary; events from every point are flattened in order.
//!
//! Input is validated before any request is built: a rejected tick count
//! never reaches the network and leaves the runner untouched.

use tracing::info;

use super::snapshot::{DEFAULT_AGENT_COUNT, DEFAULT_SEED, SimulationParams, ViewSnapshot};
use super::world::WorldSummary;
use crate::net::api::{ApiError, SimulationApi};
use crate::net::types::{RunRequest, SimulationEvent, TickSnapshot};

pub const DEFAULT_TICKS: i64 = 1;

/// Operator input rejected before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Cannot move forward with negative ticks")]
    NegativeTicks,

    #[error("Please specify a positive number of ticks to advance")]
    ZeroTicks,

    #[error("Cannot advance past tick {max}")]
    TickOverflow { max: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Failed to run simulation: {0}")]
    Api(#[from] ApiError),
}

/// Form values for one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunnerInput {
    pub seed: i64,
    pub agents: u32,
    /// Ticks to advance by; signed so negative input can be reported.
    pub ticks: i64,
}

impl Default for RunnerInput {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED, agents: DEFAULT_AGENT_COUNT, ticks: DEFAULT_TICKS }
    }
}

/// Accept a strictly positive tick count.
///
/// # Errors
///
/// [`InputError::NegativeTicks`] below zero, [`InputError::ZeroTicks`] at zero,
/// [`InputError::TickOverflow`] beyond the wire's `u32` range.
pub fn validate_ticks(ticks: i64) -> Result<u32, InputError> {
    if ticks < 0 {
        return Err(InputError::NegativeTicks);
    }
    if ticks == 0 {
        return Err(InputError::ZeroTicks);
    }
    u32::try_from(ticks).map_err(|_| InputError::TickOverflow { max: u32::MAX })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationRunner {
    pub current_tick: u64,
    pub params: SimulationParams,
    /// Series returned by the most recent run.
    pub series: Vec<TickSnapshot>,
    pub world: Option<WorldSummary>,
    pub events: Vec<SimulationEvent>,
}

impl SimulationRunner {
    /// Resume from a stored snapshot. The series itself is not persisted.
    #[must_use]
    pub fn from_snapshot(snapshot: &ViewSnapshot) -> Self {
        Self {
            current_tick: snapshot.simulation.tick,
            params: snapshot.simulation,
            series: Vec::new(),
            world: snapshot.world,
            events: snapshot.events.clone(),
        }
    }

    /// Whether there is anything to reset.
    #[must_use]
    pub fn can_reset(&self) -> bool {
        self.current_tick != 0
    }

    /// Request for advancing by `input.ticks` from the current tick.
    ///
    /// # Errors
    ///
    /// Any [`InputError`] from [`validate_ticks`], or overflow of the cumulative target.
    pub fn next_request(&self, input: &RunnerInput) -> Result<RunRequest, InputError> {
        let ticks = validate_ticks(input.ticks)?;
        let target = self
            .current_tick
            .checked_add(u64::from(ticks))
            .and_then(|t| u32::try_from(t).ok())
            .ok_or(InputError::TickOverflow { max: u32::MAX })?;
        Ok(RunRequest { seed: input.seed, agents: input.agents, ticks: target })
    }

    /// Run the backend up to `current_tick + input.ticks` and absorb the result.
    ///
    /// # Errors
    ///
    /// [`RunError::Input`] before any request; [`RunError::Api`] when the backend
    /// call fails, in which case the runner keeps its previous state.
    pub async fn advance(&mut self, api: &dyn SimulationApi, input: &RunnerInput) -> Result<(), RunError> {
        let request = self.next_request(input)?;
        info!(seed = request.seed, agents = request.agents, target_tick = request.ticks, "running simulation");

        let response = api.run(&request).await?;

        if let Some(last) = response.timeseries.last() {
            self.world = Some(WorldSummary::from(last));
        }
        self.events = response
            .timeseries
            .iter()
            .flat_map(|point| point.events.iter().cloned())
            .collect();
        self.series = response.timeseries;
        self.current_tick = u64::from(request.ticks);
        self.params = SimulationParams { seed: request.seed, agent_count: request.agents, tick: self.current_tick };

        info!(tick = self.current_tick, events = self.events.len(), points = self.series.len(), "simulation advanced");
        Ok(())
    }

    /// Back to tick 0 with an all-zero world summary. Seed and agent count are kept.
    pub fn reset(&mut self) {
        self.current_tick = 0;
        self.series.clear();
        self.events.clear();
        self.world = Some(WorldSummary::default());
        self.params.tick = 0;
    }

    /// Write runner-owned fields into the snapshot.
    pub fn write_to(&self, snapshot: &mut ViewSnapshot) {
        snapshot.world = self.world;
        snapshot.events.clone_from(&self.events);
        snapshot.simulation = self.params;
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
