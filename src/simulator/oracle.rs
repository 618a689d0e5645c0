//! Regret baseline derived from ground truth.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DocId;
use crate::environment::Environment;
use crate::error::Result;

/// The best fixed slate under ground truth and its expected reward.
///
/// Ground truth is static, so this is computed once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oracle {
    pub slate: Vec<DocId>,
    pub expected_reward: f64,
}

impl Oracle {
    pub fn for_environment(environment: &Environment) -> Result<Self> {
        let slate = environment.optimal_slate();
        let expected_reward = environment.expected_reward(&slate)?;
        debug!(
            model = %environment.model(),
            slate = ?slate,
            expected_reward,
            "oracle slate selected"
        );
        Ok(Self {
            slate,
            expected_reward,
        })
    }

    /// Expected-reward gap between the oracle and `slate`.
    ///
    /// Uses the expectation, not the sampled clicks, so regret is a
    /// deterministic function of the chosen slate. Floating-point noise
    /// below zero (same set, different product order) reads as zero.
    pub fn regret(&self, environment: &Environment, slate: &[String]) -> Result<(f64, f64)> {
        let expected = environment.expected_reward(slate)?;
        Ok((expected, (self.expected_reward - expected).max(0.0)))
    }
}
