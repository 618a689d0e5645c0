//! User-behaviour environments that turn a ranked slate into clicks.
//!
//! Three click models share one contract:
//! - `Cascade`: examine top-down, stop at the first click
//! - `PositionBased`: independent positions scaled by a position bias
//! - `DependentClick`: cascade examination with a post-click satisfaction roll
//!
//! Each environment owns its random source, so a run is reproducible from
//! the seed it was built with.

pub mod cascade;
pub mod dependent_click;
mod documents;
pub mod position_based;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::core::{ClickOutcome, DocId, Document};
use crate::error::{LabError, Result};

pub use cascade::CascadeEnvironment;
pub use dependent_click::{DEFAULT_SATISFACTION, DependentClickEnvironment};
pub use position_based::PositionBasedEnvironment;

use documents::DocumentSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickModel {
    #[default]
    Cascade,
    #[serde(alias = "position", alias = "pbm")]
    PositionBased,
    #[serde(alias = "dependent", alias = "dcm")]
    DependentClick,
}

impl ClickModel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cascade => "cascade",
            Self::PositionBased => "position_based",
            Self::DependentClick => "dependent_click",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Cascade, Self::PositionBased, Self::DependentClick]
    }
}

impl fmt::Display for ClickModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClickModel {
    type Err = LabError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "cascade" => Ok(Self::Cascade),
            "position" | "position_based" | "pbm" => Ok(Self::PositionBased),
            "dependent" | "dependent_click" | "dcm" => Ok(Self::DependentClick),
            other => Err(LabError::Config(format!(
                "unknown click model '{other}' (expected cascade|position|dependent)"
            ))),
        }
    }
}

/// Serializable description of an environment, minus documents and seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub model: ClickModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_bias: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub satisfaction: BTreeMap<DocId, f64>,
    #[serde(default = "default_satisfaction")]
    pub default_satisfaction: f64,
}

const fn default_satisfaction() -> f64 {
    DEFAULT_SATISFACTION
}

impl Default for EnvironmentSpec {
    fn default() -> Self {
        Self::new(ClickModel::Cascade)
    }
}

impl EnvironmentSpec {
    #[must_use]
    pub const fn new(model: ClickModel) -> Self {
        Self {
            model,
            position_bias: None,
            satisfaction: BTreeMap::new(),
            default_satisfaction: DEFAULT_SATISFACTION,
        }
    }

    pub fn build(
        &self,
        documents: Vec<Document>,
        slate_size: usize,
        rng: StdRng,
    ) -> Result<Environment> {
        let env = match self.model {
            ClickModel::Cascade => {
                Environment::Cascade(CascadeEnvironment::new(documents, slate_size, rng)?)
            }
            ClickModel::PositionBased => Environment::PositionBased(PositionBasedEnvironment::new(
                documents,
                slate_size,
                self.position_bias.clone(),
                rng,
            )?),
            ClickModel::DependentClick => {
                Environment::DependentClick(DependentClickEnvironment::new(
                    documents,
                    slate_size,
                    &self.satisfaction,
                    self.default_satisfaction,
                    rng,
                )?)
            }
        };
        Ok(env)
    }

    pub fn build_seeded(
        &self,
        documents: Vec<Document>,
        slate_size: usize,
        seed: u64,
    ) -> Result<Environment> {
        self.build(documents, slate_size, StdRng::seed_from_u64(seed))
    }
}

#[derive(Debug, Clone)]
pub enum Environment {
    Cascade(CascadeEnvironment),
    PositionBased(PositionBasedEnvironment),
    DependentClick(DependentClickEnvironment),
}

impl Environment {
    /// Present `slate` to a simulated user.
    pub fn select_clicks(&mut self, slate: &[String]) -> Result<ClickOutcome> {
        match self {
            Self::Cascade(env) => env.select_clicks(slate),
            Self::PositionBased(env) => env.select_clicks(slate),
            Self::DependentClick(env) => env.select_clicks(slate),
        }
    }

    /// Expected clicks at each slate position under ground truth.
    pub fn expected_clicks_by_position(&self, slate: &[String]) -> Result<Vec<f64>> {
        match self {
            Self::Cascade(env) => env.expected_clicks_by_position(slate),
            Self::PositionBased(env) => env.expected_clicks_by_position(slate),
            Self::DependentClick(env) => env.expected_clicks_by_position(slate),
        }
    }

    /// Expected number of clicks for `slate` under ground truth.
    pub fn expected_reward(&self, slate: &[String]) -> Result<f64> {
        Ok(self.expected_clicks_by_position(slate)?.iter().sum())
    }

    /// The fixed slate with the highest expected reward.
    #[must_use]
    pub fn optimal_slate(&self) -> Vec<DocId> {
        match self {
            Self::Cascade(env) => env.optimal_slate(),
            Self::PositionBased(env) => env.optimal_slate(),
            Self::DependentClick(env) => env.optimal_slate(),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        match self {
            Self::Cascade(env) => env.reseed(seed),
            Self::PositionBased(env) => env.reseed(seed),
            Self::DependentClick(env) => env.reseed(seed),
        }
    }

    #[must_use]
    pub const fn model(&self) -> ClickModel {
        match self {
            Self::Cascade(_) => ClickModel::Cascade,
            Self::PositionBased(_) => ClickModel::PositionBased,
            Self::DependentClick(_) => ClickModel::DependentClick,
        }
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        self.document_set().documents()
    }

    #[must_use]
    pub fn doc_ids(&self) -> Vec<DocId> {
        self.document_set().doc_ids()
    }

    #[must_use]
    pub const fn slate_size(&self) -> usize {
        self.document_set().slate_size()
    }

    const fn document_set(&self) -> &DocumentSet {
        match self {
            Self::Cascade(env) => env.documents(),
            Self::PositionBased(env) => env.documents(),
            Self::DependentClick(env) => env.documents(),
        }
    }
}
