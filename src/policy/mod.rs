//! Ranking policies that learn from click feedback only.
//!
//! A `Policy` owns its candidate list, its per-document statistics and its
//! random source. The strategy variant decides how the statistics are turned
//! into a slate:
//! - `EpsilonGreedy`: uniform exploration with probability epsilon
//! - `Ucb1`: optimism under uncertainty
//! - `Thompson`: Beta posterior sampling
//! - `Softmax`: Boltzmann sampling without replacement

pub mod epsilon_greedy;
pub mod softmax;
pub mod stats;
pub mod thompson;
pub mod ucb;

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::core::{ClickOutcome, DocId, check_candidates};
use crate::error::Result;

pub use epsilon_greedy::EpsilonGreedy;
pub use softmax::Softmax;
pub use stats::{DocStats, StatsTable};
pub use thompson::ThompsonSampling;
pub use ucb::Ucb1;

/// Hyperparameters for one of the supported policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algo", rename_all = "snake_case")]
pub enum PolicyConfig {
    #[serde(alias = "epsilon")]
    EpsilonGreedy { epsilon: f64 },
    #[serde(alias = "ucb")]
    Ucb1 { confidence: f64 },
    Thompson { alpha_prior: f64, beta_prior: f64 },
    Softmax { temperature: f64 },
}

impl PolicyConfig {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EpsilonGreedy { .. } => "epsilon",
            Self::Ucb1 { .. } => "ucb",
            Self::Thompson { .. } => "thompson",
            Self::Softmax { .. } => "softmax",
        }
    }
}

impl fmt::Display for PolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EpsilonGreedy { epsilon } => write!(f, "epsilon(epsilon={epsilon})"),
            Self::Ucb1 { confidence } => write!(f, "ucb(confidence={confidence})"),
            Self::Thompson {
                alpha_prior,
                beta_prior,
            } => write!(f, "thompson(alpha={alpha_prior}, beta={beta_prior})"),
            Self::Softmax { temperature } => write!(f, "softmax(temperature={temperature})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    EpsilonGreedy(EpsilonGreedy),
    Ucb1(Ucb1),
    Thompson(ThompsonSampling),
    Softmax(Softmax),
}

impl Strategy {
    fn from_config(config: PolicyConfig) -> Result<Self> {
        Ok(match config {
            PolicyConfig::EpsilonGreedy { epsilon } => {
                Self::EpsilonGreedy(EpsilonGreedy::new(epsilon)?)
            }
            PolicyConfig::Ucb1 { confidence } => Self::Ucb1(Ucb1::new(confidence)?),
            PolicyConfig::Thompson {
                alpha_prior,
                beta_prior,
            } => Self::Thompson(ThompsonSampling::new(alpha_prior, beta_prior)?),
            PolicyConfig::Softmax { temperature } => Self::Softmax(Softmax::new(temperature)?),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Policy {
    config: PolicyConfig,
    strategy: Strategy,
    candidates: Vec<DocId>,
    slate_size: usize,
    stats: StatsTable,
    rng: StdRng,
}

impl Policy {
    pub fn new(
        config: PolicyConfig,
        candidate_ids: &[String],
        slate_size: usize,
        rng: StdRng,
    ) -> Result<Self> {
        check_candidates(candidate_ids, slate_size)?;
        Ok(Self {
            config,
            strategy: Strategy::from_config(config)?,
            candidates: candidate_ids.to_vec(),
            slate_size,
            stats: StatsTable::new(candidate_ids),
            rng,
        })
    }

    pub fn seeded(
        config: PolicyConfig,
        candidate_ids: &[String],
        slate_size: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::new(config, candidate_ids, slate_size, StdRng::seed_from_u64(seed))
    }

    /// Choose an ordered slate of `slate_size` distinct candidates.
    ///
    /// Candidates the policy has not met before start with empty statistics.
    pub fn select_slate(&mut self, candidates: &[String], slate_size: usize) -> Result<Vec<DocId>> {
        check_candidates(candidates, slate_size)?;
        for doc_id in candidates {
            self.stats.ensure(doc_id);
        }
        let stats = &self.stats;
        let rng = &mut self.rng;
        match &self.strategy {
            Strategy::EpsilonGreedy(policy) => Ok(policy.rank(candidates, slate_size, stats, rng)),
            Strategy::Ucb1(policy) => Ok(policy.rank(candidates, slate_size, stats)),
            Strategy::Thompson(policy) => policy.rank(candidates, slate_size, stats, rng),
            Strategy::Softmax(policy) => policy.rank(candidates, slate_size, stats, rng),
        }
    }

    /// Select from the candidate list and slate size given at construction.
    pub fn next_slate(&mut self) -> Result<Vec<DocId>> {
        let candidates = std::mem::take(&mut self.candidates);
        let result = self.select_slate(&candidates, self.slate_size);
        self.candidates = candidates;
        result
    }

    /// Fold one round of feedback into this policy's statistics.
    pub fn update(&mut self, slate: &[String], outcome: &ClickOutcome) -> Result<()> {
        self.stats.observe(slate, outcome)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.config.name()
    }

    #[must_use]
    pub const fn config(&self) -> PolicyConfig {
        self.config
    }

    #[must_use]
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    #[must_use]
    pub const fn statistics(&self) -> &StatsTable {
        &self.stats
    }

    #[must_use]
    pub fn candidates(&self) -> &[DocId] {
        &self.candidates
    }

    #[must_use]
    pub const fn slate_size(&self) -> usize {
        self.slate_size
    }
}

/// Top `k` candidates by descending score; ties go to the document the
/// policy saw first.
pub(crate) fn rank_by_scores(
    candidates: &[String],
    scores: &[f64],
    k: usize,
    stats: &StatsTable,
) -> Vec<DocId> {
    let seen = |i: usize| stats.first_seen(&candidates[i]).unwrap_or(usize::MAX);
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|a, b| {
        scores[*b]
            .total_cmp(&scores[*a])
            .then_with(|| seen(*a).cmp(&seen(*b)))
    });
    order
        .into_iter()
        .take(k)
        .map(|i| candidates[i].clone())
        .collect()
}
