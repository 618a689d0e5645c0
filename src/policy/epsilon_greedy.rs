use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::{DocId, validate_probability};
use crate::error::Result;

use super::rank_by_scores;
use super::stats::StatsTable;

/// Explore uniformly with probability `epsilon`, otherwise exploit the
/// empirical click-through rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Result<Self> {
        Ok(Self {
            epsilon: validate_probability("epsilon", epsilon)?,
        })
    }

    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub(crate) fn rank(
        &self,
        candidates: &[String],
        slate_size: usize,
        stats: &StatsTable,
        rng: &mut StdRng,
    ) -> Vec<DocId> {
        if rng.random::<f64>() < self.epsilon {
            let mut pool = candidates.to_vec();
            pool.shuffle(rng);
            pool.truncate(slate_size);
            return pool;
        }
        let scores: Vec<f64> = candidates.iter().map(|id| stats.get(id).mean()).collect();
        rank_by_scores(candidates, &scores, slate_size, stats)
    }
}
