use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;

use crate::core::DocId;
use crate::error::{LabError, Result};

use super::rank_by_scores;
use super::stats::StatsTable;

/// Boltzmann exploration: positions are filled by sampling without
/// replacement proportionally to `exp(mean / temperature)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Softmax {
    temperature: f64,
}

impl Softmax {
    pub fn new(temperature: f64) -> Result<Self> {
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(LabError::Config(format!(
                "softmax temperature must be a finite value >= 0, got {temperature}"
            )));
        }
        Ok(Self { temperature })
    }

    fn is_greedy(&self) -> bool {
        self.temperature <= f64::EPSILON
    }

    /// Selection probabilities over `candidates` for the first position.
    #[must_use]
    pub fn weights(&self, candidates: &[String], stats: &StatsTable) -> Vec<f64> {
        let means: Vec<f64> = candidates.iter().map(|id| stats.get(id).mean()).collect();
        if self.is_greedy() {
            let best = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let winners = means.iter().filter(|m| **m >= best).count() as f64;
            return means
                .iter()
                .map(|m| if *m >= best { 1.0 / winners } else { 0.0 })
                .collect();
        }
        let weights = self.unnormalized(&means);
        let total: f64 = weights.iter().sum();
        weights.into_iter().map(|w| w / total).collect()
    }

    /// `exp((m - max) / T)`; subtracting the max keeps the exponent <= 0.
    fn unnormalized(&self, means: &[f64]) -> Vec<f64> {
        let max_logit = means
            .iter()
            .map(|m| m / self.temperature)
            .fold(f64::NEG_INFINITY, f64::max);
        means
            .iter()
            .map(|m| (m / self.temperature - max_logit).exp())
            .collect()
    }

    pub(crate) fn rank(
        &self,
        candidates: &[String],
        slate_size: usize,
        stats: &StatsTable,
        rng: &mut StdRng,
    ) -> Result<Vec<DocId>> {
        let means: Vec<f64> = candidates.iter().map(|id| stats.get(id).mean()).collect();
        if self.is_greedy() {
            return Ok(rank_by_scores(candidates, &means, slate_size, stats));
        }

        let mut remaining: Vec<usize> = (0..candidates.len()).collect();
        let mut slate = Vec::with_capacity(slate_size);
        while slate.len() < slate_size && !remaining.is_empty() {
            let pool: Vec<f64> = remaining.iter().map(|i| means[*i]).collect();
            let weights = self.unnormalized(&pool);
            let dist = WeightedIndex::new(&weights)
                .map_err(|err| LabError::Sampling(format!("softmax weights: {err}")))?;
            let picked = remaining.remove(dist.sample(rng));
            slate.push(candidates[picked].clone());
        }
        Ok(slate)
    }
}
