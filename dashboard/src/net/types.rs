//! Canonical wire schema for the simulation backend.
//!
//! DESIGN
//! ======
//! Payloads are normalized here, at the network boundary, and nowhere else:
//! alternate field spellings collapse onto one name, card collections that
//! arrive as keyed maps become lists, and numeric fields tolerate the
//! integer/float drift of a dynamically typed backend. Views only ever see
//! the canonical structs below.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Backend agent identifier.
pub type AgentId = u64;

// =============================================================================
// SIMULATION RUN
// =============================================================================

/// Body of `POST /run`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub seed: i64,
    pub agents: u32,
    /// Absolute tick to simulate up to (the backend replays from tick 0).
    pub ticks: u32,
}

/// Response of `POST /run`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResponse {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub timeseries: Vec<TickSnapshot>,
}

/// Cumulative world counters at the end of one tick, plus that tick's events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub tick: u64,
    #[serde(default, deserialize_with = "deserialize_u64_from_number")]
    pub agent_count: u64,
    #[serde(default, deserialize_with = "deserialize_u64_from_number")]
    pub total_cards: u64,
    #[serde(default, deserialize_with = "deserialize_u64_from_number")]
    pub total_unopened_boosters: u64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub events: Vec<SimulationEvent>,
}

/// One discrete thing that happened during a tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationEvent {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub tick: u64,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub agent_id: AgentId,
    pub event_type: String,
    #[serde(default)]
    pub description: String,
    /// Every agent involved (both sides of a trade or match).
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub agent_ids: Vec<AgentId>,
    /// `Some(true)` won/triggered, `Some(false)` lost/not triggered.
    #[serde(default)]
    pub triggered: Option<bool>,
}

// =============================================================================
// AGENTS
// =============================================================================

/// Row of `GET /agents`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub id: AgentId,
    /// Currency balance. May be negative.
    #[serde(default)]
    pub prism: f64,
    #[serde(default, deserialize_with = "deserialize_u64_from_number")]
    pub collection_count: u64,
}

/// Envelope of `GET /agents`; older backends named the list `players`.
#[derive(Debug, Deserialize)]
pub(crate) struct AgentListEnvelope {
    #[serde(alias = "players")]
    pub(crate) agents: Vec<AgentSummary>,
}

/// Envelope of `GET /agents/{id}`; older backends named the record `player`.
#[derive(Debug, Deserialize)]
pub(crate) struct AgentDetailEnvelope {
    #[serde(alias = "player")]
    pub(crate) agent: AgentDetail,
}

/// Full state of one agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentDetail {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub id: AgentId,
    #[serde(default)]
    pub prism: f64,
    #[serde(default, deserialize_with = "deserialize_u64_from_number")]
    pub collection_count: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_traits")]
    pub traits: Option<AgentTraits>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub deck: Vec<DeckCard>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub agent_events: Vec<SimulationEvent>,
    #[serde(default, deserialize_with = "deserialize_card_collection")]
    pub card_instances: Vec<CardInstance>,
}

impl AgentDetail {
    /// Backend-provided name, or `Agent {id}`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map_or_else(|| format!("Agent {}", self.id), ToOwned::to_owned)
    }
}

/// Behavioral trait scores. Each score is clamped into `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAgentTraits")]
pub struct AgentTraits {
    pub collector: f64,
    pub competitor: f64,
    pub gambler: f64,
    pub scavenger: f64,
    pub primary_trait: PrimaryTrait,
    pub risk_aversion: String,
    pub time_horizon: String,
}

impl AgentTraits {
    /// Scores in display order, paired with their trait.
    #[must_use]
    pub fn scores(&self) -> [(PrimaryTrait, f64); 4] {
        [
            (PrimaryTrait::Collector, self.collector),
            (PrimaryTrait::Competitor, self.competitor),
            (PrimaryTrait::Gambler, self.gambler),
            (PrimaryTrait::Scavenger, self.scavenger),
        ]
    }

    /// The trait with the highest score; earlier traits win ties.
    #[must_use]
    pub fn dominant_trait(&self) -> PrimaryTrait {
        let mut best = (PrimaryTrait::Collector, self.collector);
        for (kind, score) in self.scores() {
            if score > best.1 {
                best = (kind, score);
            }
        }
        best.0
    }
}

#[derive(Deserialize)]
struct RawAgentTraits {
    #[serde(default)]
    collector_trait: Option<f64>,
    #[serde(default)]
    collector_score: Option<f64>,
    #[serde(default)]
    competitor_trait: Option<f64>,
    #[serde(default)]
    competitor_score: Option<f64>,
    #[serde(default)]
    gambler_trait: Option<f64>,
    #[serde(default)]
    gambler_score: Option<f64>,
    #[serde(default)]
    scavenger_trait: Option<f64>,
    #[serde(default)]
    scavenger_score: Option<f64>,
    #[serde(default)]
    primary_trait: Option<PrimaryTrait>,
    #[serde(default, deserialize_with = "deserialize_label")]
    risk_aversion: String,
    #[serde(default, deserialize_with = "deserialize_label")]
    time_horizon: String,
    // Canonical names, so serialized traits read back unchanged.
    #[serde(default)]
    collector: Option<f64>,
    #[serde(default)]
    competitor: Option<f64>,
    #[serde(default)]
    gambler: Option<f64>,
    #[serde(default)]
    scavenger: Option<f64>,
}

impl From<RawAgentTraits> for AgentTraits {
    fn from(raw: RawAgentTraits) -> Self {
        let mut traits = Self {
            collector: unit_score(raw.collector_trait.or(raw.collector_score).or(raw.collector)),
            competitor: unit_score(raw.competitor_trait.or(raw.competitor_score).or(raw.competitor)),
            gambler: unit_score(raw.gambler_trait.or(raw.gambler_score).or(raw.gambler)),
            scavenger: unit_score(raw.scavenger_trait.or(raw.scavenger_score).or(raw.scavenger)),
            primary_trait: PrimaryTrait::Unknown,
            risk_aversion: raw.risk_aversion,
            time_horizon: raw.time_horizon,
        };
        traits.primary_trait = match raw.primary_trait {
            Some(PrimaryTrait::Unknown) | None => traits.dominant_trait(),
            Some(kind) => kind,
        };
        traits
    }
}

fn unit_score(value: Option<f64>) -> f64 {
    match value {
        Some(score) if score.is_finite() => score.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Categorical behavior archetype.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryTrait {
    Collector,
    Competitor,
    Gambler,
    Scavenger,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PrimaryTrait {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Collector => "Collector",
            Self::Competitor => "Competitor",
            Self::Gambler => "Gambler",
            Self::Scavenger => "Scavenger",
            Self::Unknown => "Unknown",
        }
    }
}

/// A card picked into an agent's deck, with backend-computed combat stats.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckCard {
    #[serde(default, deserialize_with = "deserialize_label")]
    pub card_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type", deserialize_with = "deserialize_label")]
    pub card_type: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub power: i64,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub health: i64,
    #[serde(default, deserialize_with = "deserialize_u64_from_number")]
    pub gem_colored: u64,
    #[serde(default, deserialize_with = "deserialize_u64_from_number")]
    pub gem_colorless: u64,
    /// Display label; the backend sends either a number or formatted text.
    #[serde(default, deserialize_with = "deserialize_label")]
    pub cost: String,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub total_power_defense: i64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default, deserialize_with = "deserialize_u64_from_number")]
    pub win_count: u64,
    #[serde(default, deserialize_with = "deserialize_u64_from_number")]
    pub loss_count: u64,
    #[serde(default)]
    pub feasibility_score: f64,
}

// =============================================================================
// CARDS
// =============================================================================

/// Card rarity. Unknown labels are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    Player,
    AlternateArt,
    Other(String),
}

impl Rarity {
    /// Sort rank: Mythic first, unknown rarities last.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::Mythic => 0,
            Self::Rare => 1,
            Self::Uncommon => 2,
            Self::Common => 3,
            Self::Player => 4,
            Self::AlternateArt | Self::Other(_) => 5,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Mythic => "Mythic",
            Self::Player => "Player",
            Self::AlternateArt => "Alternate Art",
            Self::Other(label) => label,
        }
    }

    /// Rarities collectors chase.
    #[must_use]
    pub fn is_collectible(&self) -> bool {
        matches!(self, Self::Rare | Self::Mythic | Self::AlternateArt)
    }
}

impl From<String> for Rarity {
    fn from(label: String) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "common" => Self::Common,
            "uncommon" => Self::Uncommon,
            "rare" => Self::Rare,
            "mythic" => Self::Mythic,
            "player" => Self::Player,
            "alternate art" => Self::AlternateArt,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for Rarity {
    fn from(label: &str) -> Self {
        Self::from(label.to_owned())
    }
}

impl From<Rarity> for String {
    fn from(rarity: Rarity) -> Self {
        match rarity {
            Rarity::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One price observation of a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub tick: u64,
    pub price: f64,
    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub desirability: f64,
}

/// One concrete owned copy of a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCardInstance")]
pub struct CardInstance {
    pub card_instance_id: Option<String>,
    pub card_id: String,
    pub name: String,
    pub color: String,
    pub rarity: Rarity,
    pub is_hologram: bool,
    pub quality_score: f64,
    pub price: f64,
    pub desirability: f64,
    pub condition: Option<String>,
    pub price_history: Vec<PricePoint>,
    pub win_count: u64,
    pub loss_count: u64,
    pub power: Option<i64>,
    pub health: Option<i64>,
    pub cost: Option<String>,
    pub card_type: Option<String>,
    pub flavor_text: Option<String>,
    pub gem_colored: u64,
    pub gem_colorless: u64,
}

/// Every spelling of a card instance seen from the backend.
#[derive(Deserialize)]
struct RawCardInstance {
    #[serde(default, deserialize_with = "deserialize_optional_label")]
    card_instance_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_label")]
    card_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    card_name: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    card_color: Option<String>,
    #[serde(default)]
    rarity: Option<String>,
    #[serde(default)]
    card_rarity: Option<String>,
    #[serde(default)]
    is_hologram: Option<bool>,
    #[serde(default)]
    quality_score: Option<f64>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    desirability: Option<f64>,
    #[serde(default)]
    attractiveness: Option<f64>,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    price_history: Option<Vec<PricePoint>>,
    #[serde(default, rename = "priceHistory")]
    price_history_camel: Option<Vec<PricePoint>>,
    #[serde(default, deserialize_with = "deserialize_optional_u64_from_number")]
    win_count: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_optional_u64_from_number")]
    loss_count: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64_from_number")]
    power: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64_from_number")]
    health: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_label")]
    cost: Option<String>,
    #[serde(default, rename = "type")]
    card_type_wire: Option<String>,
    #[serde(default)]
    card_type: Option<String>,
    #[serde(default)]
    flavor_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_u64_from_number")]
    gem_colored: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_optional_u64_from_number")]
    gem_colorless: Option<u64>,
}

impl From<RawCardInstance> for CardInstance {
    fn from(raw: RawCardInstance) -> Self {
        Self {
            card_instance_id: raw.card_instance_id.filter(|id| !id.is_empty()),
            card_id: raw.card_id,
            name: raw
                .card_name
                .or(raw.name)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unknown Card".to_owned()),
            color: raw.card_color.or(raw.color).unwrap_or_default(),
            rarity: Rarity::from(raw.card_rarity.or(raw.rarity).unwrap_or_default()),
            is_hologram: raw.is_hologram.unwrap_or(false),
            quality_score: raw.quality_score.unwrap_or(0.0),
            price: raw.current_price.or(raw.price).unwrap_or(0.0),
            desirability: raw.desirability.or(raw.attractiveness).unwrap_or(0.0),
            condition: raw.condition,
            price_history: raw
                .price_history
                .or(raw.price_history_camel)
                .unwrap_or_default(),
            win_count: raw.win_count.unwrap_or(0),
            loss_count: raw.loss_count.unwrap_or(0),
            power: raw.power,
            health: raw.health,
            cost: raw.cost,
            card_type: raw.card_type.or(raw.card_type_wire),
            flavor_text: raw.flavor_text.filter(|text| !text.is_empty()),
            gem_colored: raw.gem_colored.unwrap_or(0),
            gem_colorless: raw.gem_colorless.unwrap_or(0),
        }
    }
}

/// Response of `GET /agents/{id}/cards`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub id: AgentId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_u64_from_number")]
    pub collection_count: u64,
    #[serde(default, deserialize_with = "deserialize_card_collection")]
    pub cards: Vec<CardInstance>,
}

impl Inventory {
    /// Fill the name the backend left blank.
    pub(crate) fn normalize(mut self) -> Self {
        if self.name.trim().is_empty() {
            self.name = format!("Agent {}", self.id);
        }
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CardCollection {
    List(Vec<CardInstance>),
    Keyed(BTreeMap<String, CardInstance>),
}

/// Accept a card collection as a list or as a map keyed by instance id.
///
/// Keyed maps flatten in key order; the key fills a missing instance id.
fn deserialize_card_collection<'de, D>(deserializer: D) -> Result<Vec<CardInstance>, D::Error>
where
    D: Deserializer<'de>,
{
    let collection = Option::<CardCollection>::deserialize(deserializer)?;
    Ok(match collection {
        None => Vec::new(),
        Some(CardCollection::List(cards)) => cards,
        Some(CardCollection::Keyed(map)) => map
            .into_iter()
            .map(|(key, mut card)| {
                if card.card_instance_id.is_none() {
                    card.card_instance_id = Some(key);
                }
                card
            })
            .collect(),
    })
}

// =============================================================================
// DESERIALIZE HELPERS
// =============================================================================

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Traits arrive as `{}` for agents the backend has not profiled.
fn deserialize_traits<'de, D>(deserializer: D) -> Result<Option<AgentTraits>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Some(other) => serde_json::from_value(other).map(Some).map_err(D::Error::custom),
    }
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_label(deserializer)?.unwrap_or_default())
}

/// Text or number rendered as text; `null` is absent.
fn deserialize_optional_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(text) => Ok(Some(text)),
        serde_json::Value::Number(number) => Ok(Some(number.to_string())),
        serde_json::Value::Bool(flag) => Ok(Some(flag.to_string())),
        _ => Err(D::Error::custom("expected text or number")),
    }
}

fn deserialize_u64_from_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserialize_i64_from_number(deserializer)?;
    u64::try_from(value).map_err(|_| D::Error::custom(format!("value {value} must not be negative")))
}

/// Like [`deserialize_u64_from_number`], with `null` or a missing field as `None`.
fn deserialize_optional_u64_from_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => deserialize_u64_from_number(value).map(Some).map_err(D::Error::custom),
    }
}

fn deserialize_optional_i64_from_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => deserialize_i64_from_number(value).map(Some).map_err(D::Error::custom),
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        serde_json::Value::Null => Ok(0),
        _ => Err(D::Error::custom("expected number")),
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
