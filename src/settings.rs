//! Resolved settings for a single simulation run.
//!
//! `RunSettings` is the flat bag of knobs the CLI, config files, scenarios
//! and sweep overrides all write into. It is the only place that turns plain
//! values into an `Environment`, a `Policy` and a `Simulator`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::{DocId, Document};
use crate::environment::{ClickModel, Environment, EnvironmentSpec};
use crate::error::{LabError, Result};
use crate::policy::{Policy, PolicyConfig};
use crate::simulator::Simulator;

/// Override keys accepted by `RunSettings::apply_override`.
pub const OVERRIDE_KEYS: &[&str] = &[
    "algo",
    "model",
    "steps",
    "slate_size",
    "epsilon",
    "alpha_prior",
    "beta_prior",
    "ucb_confidence",
    "temperature",
    "seed",
];

/// Documents used when none are given on the command line.
pub const DEFAULT_DOCUMENTS: &[(&str, f64)] = &[
    ("doc-A", 0.45),
    ("doc-B", 0.35),
    ("doc-C", 0.25),
    ("doc-D", 0.15),
    ("doc-E", 0.10),
];

/// Parse `id=prob` specs; an empty list yields [`DEFAULT_DOCUMENTS`].
pub fn parse_documents(specs: &[String]) -> Result<Vec<Document>> {
    if specs.is_empty() {
        return DEFAULT_DOCUMENTS
            .iter()
            .map(|(doc_id, attraction)| Document::new(*doc_id, *attraction))
            .collect();
    }
    specs.iter().map(|spec| Document::parse_spec(spec)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    #[serde(alias = "epsilon_greedy")]
    Epsilon,
    #[serde(alias = "ucb1")]
    Ucb,
    Thompson,
    Softmax,
}

impl Algorithm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Epsilon => "epsilon",
            Self::Ucb => "ucb",
            Self::Thompson => "thompson",
            Self::Softmax => "softmax",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Epsilon, Self::Ucb, Self::Thompson, Self::Softmax]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = LabError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "epsilon" | "epsilon_greedy" => Ok(Self::Epsilon),
            "ucb" | "ucb1" => Ok(Self::Ucb),
            "thompson" => Ok(Self::Thompson),
            "softmax" => Ok(Self::Softmax),
            other => Err(LabError::Config(format!(
                "unsupported algorithm '{other}' (expected epsilon|ucb|thompson|softmax)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    pub algo: Algorithm,
    pub model: ClickModel,
    pub steps: usize,
    pub slate_size: usize,
    pub seed: u64,
    pub epsilon: f64,
    pub alpha_prior: f64,
    pub beta_prior: f64,
    pub ucb_confidence: f64,
    pub temperature: f64,
    pub position_bias: Option<Vec<f64>>,
    pub satisfaction: BTreeMap<DocId, f64>,
    pub default_satisfaction: f64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RunSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let position_bias = if config.environment.position_bias.is_empty() {
            None
        } else {
            Some(config.environment.position_bias.clone())
        };
        Self {
            algo: config.policy.algo,
            model: config.simulation.model,
            steps: config.simulation.steps,
            slate_size: config.simulation.slate_size,
            seed: config.simulation.seed,
            epsilon: config.policy.epsilon,
            alpha_prior: config.policy.alpha_prior,
            beta_prior: config.policy.beta_prior,
            ucb_confidence: config.policy.ucb_confidence,
            temperature: config.policy.temperature,
            position_bias,
            satisfaction: BTreeMap::new(),
            default_satisfaction: config.environment.default_satisfaction,
        }
    }

    #[must_use]
    pub const fn policy_config(&self) -> PolicyConfig {
        match self.algo {
            Algorithm::Epsilon => PolicyConfig::EpsilonGreedy {
                epsilon: self.epsilon,
            },
            Algorithm::Ucb => PolicyConfig::Ucb1 {
                confidence: self.ucb_confidence,
            },
            Algorithm::Thompson => PolicyConfig::Thompson {
                alpha_prior: self.alpha_prior,
                beta_prior: self.beta_prior,
            },
            Algorithm::Softmax => PolicyConfig::Softmax {
                temperature: self.temperature,
            },
        }
    }

    #[must_use]
    pub fn environment_spec(&self) -> EnvironmentSpec {
        EnvironmentSpec {
            model: self.model,
            position_bias: self.position_bias.clone(),
            satisfaction: self.satisfaction.clone(),
            default_satisfaction: self.default_satisfaction,
        }
    }

    /// Environment seeded with `seed`.
    pub fn build_environment(&self, documents: Vec<Document>) -> Result<Environment> {
        self.environment_spec()
            .build_seeded(documents, self.slate_size, self.seed)
    }

    /// Policy seeded with `seed + 1` so it never mirrors the environment's draws.
    pub fn build_policy(&self, doc_ids: &[String]) -> Result<Policy> {
        Policy::seeded(
            self.policy_config(),
            doc_ids,
            self.slate_size,
            self.seed.wrapping_add(1),
        )
    }

    pub fn build_simulator(&self, documents: Vec<Document>) -> Result<Simulator> {
        let environment = self.build_environment(documents)?;
        let policy = self.build_policy(&environment.doc_ids())?;
        Ok(Simulator::new(environment, policy))
    }

    /// Apply one `key=value` override, as used by sweep run specs.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key.trim() {
            "algo" => self.algo = value.parse()?,
            "model" => self.model = value.parse()?,
            "steps" => self.steps = parse_override(key, value)?,
            "slate_size" => self.slate_size = parse_override(key, value)?,
            "epsilon" => self.epsilon = parse_override(key, value)?,
            "alpha_prior" => self.alpha_prior = parse_override(key, value)?,
            "beta_prior" => self.beta_prior = parse_override(key, value)?,
            "ucb_confidence" => self.ucb_confidence = parse_override(key, value)?,
            "temperature" => self.temperature = parse_override(key, value)?,
            "seed" => self.seed = parse_override(key, value)?,
            other => {
                return Err(LabError::Usage(format!(
                    "unsupported override '{other}' (expected one of: {})",
                    OVERRIDE_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    pub fn apply_overrides<'a, I>(&mut self, overrides: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (key, value) in overrides {
            self.apply_override(key, value)?;
        }
        Ok(())
    }
}

fn parse_override<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|err| LabError::Usage(format!("failed to parse override '{key}={value}': {err}")))
}
