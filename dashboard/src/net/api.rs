//! REST client for the simulation backend.
//!
//! `SimulationApi` is the seam every view depends on; `HttpSimulationApi` is
//! the reqwest implementation and tests substitute hand-written mocks. Body
//! parsing lives in pure `parse_*` functions so it is testable without a
//! server.
//!
//! ERROR HANDLING
//! ==============
//! Every endpoint may answer `{"error": "..."}` instead of its payload; that
//! envelope becomes `ApiError::Backend` regardless of the HTTP status. Other
//! non-2xx answers keep their status and body. Nothing is retried here: the
//! poller's next tick or the operator's next command is the retry.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::types::{
    AgentDetail, AgentDetailEnvelope, AgentId, AgentListEnvelope, AgentSummary, Inventory, RunRequest, RunResponse,
};
use crate::config::{ClientConfig, HttpTimeouts};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by simulation API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status and no error envelope.
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The backend reported an error through its `{error}` envelope.
    #[error("{0}")]
    Backend(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl ApiError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_REQUEST",
            Self::Status { .. } => "E_STATUS",
            Self::Parse(_) => "E_PARSE",
            Self::Backend(_) => "E_BACKEND",
            Self::ClientBuild(_) => "E_CLIENT_BUILD",
        }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// The four backend operations the dashboard consumes.
#[async_trait]
pub trait SimulationApi: Send + Sync {
    /// `POST /run`. The backend simulates from tick 0 up to `request.ticks`.
    async fn run(&self, request: &RunRequest) -> Result<RunResponse, ApiError>;

    /// `GET /agents`.
    async fn list_agents(&self) -> Result<Vec<AgentSummary>, ApiError>;

    /// `GET /agents/{id}`.
    async fn get_agent(&self, id: AgentId) -> Result<AgentDetail, ApiError>;

    /// `GET /agents/{id}/cards`.
    async fn get_agent_cards(&self, id: AgentId) -> Result<Inventory, ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpSimulationApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSimulationApi {
    /// Build a client for `base_url` (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] when the TLS backend cannot start.
    pub fn new(base_url: impl Into<String>, timeouts: HttpTimeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    /// # Errors
    ///
    /// See [`HttpSimulationApi::new`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(config.base_url.clone(), config.timeouts)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str) -> Result<String, ApiError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_body(response).await
    }
}

#[async_trait]
impl SimulationApi for HttpSimulationApi {
    async fn run(&self, request: &RunRequest) -> Result<RunResponse, ApiError> {
        let url = format!("{}{RUN_ENDPOINT}", self.base_url);
        tracing::debug!(%url, seed = request.seed, agents = request.agents, ticks = request.ticks, "POST");
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let text = read_body(response).await?;
        parse_run_response(&text)
    }

    async fn list_agents(&self) -> Result<Vec<AgentSummary>, ApiError> {
        let text = self.get(AGENTS_ENDPOINT).await?;
        parse_agent_list(&text)
    }

    async fn get_agent(&self, id: AgentId) -> Result<AgentDetail, ApiError> {
        let text = self.get(&agent_endpoint(id)).await?;
        parse_agent_detail(&text)
    }

    async fn get_agent_cards(&self, id: AgentId) -> Result<Inventory, ApiError> {
        let text = self.get(&agent_cards_endpoint(id)).await?;
        parse_inventory(&text)
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    check_status(status, text)
}

// =============================================================================
// ENDPOINTS
// =============================================================================

const RUN_ENDPOINT: &str = "/run";
const AGENTS_ENDPOINT: &str = "/agents";

fn agent_endpoint(id: AgentId) -> String {
    format!("{AGENTS_ENDPOINT}/{id}")
}

fn agent_cards_endpoint(id: AgentId) -> String {
    format!("{AGENTS_ENDPOINT}/{id}/cards")
}

// =============================================================================
// PARSING
// =============================================================================

fn check_status(status: u16, text: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        return Ok(text);
    }
    if let Some(message) = serde_json::from_str::<serde_json::Value>(&text).ok().as_ref().and_then(backend_error) {
        return Err(ApiError::Backend(message));
    }
    Err(ApiError::Status { status, body: text })
}

/// Message of an `{"error": ...}` envelope, if `value` is one.
fn backend_error(value: &serde_json::Value) -> Option<String> {
    match value.as_object()?.get("error")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_body<T: DeserializeOwned>(json: &str) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))?;
    if let Some(message) = backend_error(&value) {
        return Err(ApiError::Backend(message));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

/// # Errors
///
/// [`ApiError::Backend`] for an error envelope, [`ApiError::Parse`] otherwise.
pub fn parse_run_response(json: &str) -> Result<RunResponse, ApiError> {
    parse_body(json)
}

/// # Errors
///
/// [`ApiError::Backend`] for an error envelope, [`ApiError::Parse`] otherwise.
pub fn parse_agent_list(json: &str) -> Result<Vec<AgentSummary>, ApiError> {
    parse_body::<AgentListEnvelope>(json).map(|envelope| envelope.agents)
}

/// # Errors
///
/// [`ApiError::Backend`] for an error envelope, [`ApiError::Parse`] otherwise.
pub fn parse_agent_detail(json: &str) -> Result<AgentDetail, ApiError> {
    parse_body::<AgentDetailEnvelope>(json).map(|envelope| envelope.agent)
}

/// # Errors
///
/// [`ApiError::Backend`] for an error envelope, [`ApiError::Parse`] otherwise.
pub fn parse_inventory(json: &str) -> Result<Inventory, ApiError> {
    parse_body::<Inventory>(json).map(Inventory::normalize)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
