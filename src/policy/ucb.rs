use crate::core::DocId;
use crate::error::{LabError, Result};

use super::rank_by_scores;
use super::stats::{DocStats, StatsTable};

/// Keeps the bonus finite for documents with very few impressions.
const VISIT_EPSILON: f64 = 1e-6;

/// UCB1 ranking: empirical mean plus a confidence bonus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ucb1 {
    confidence: f64,
}

impl Ucb1 {
    pub fn new(confidence: f64) -> Result<Self> {
        if !confidence.is_finite() || confidence < 0.0 {
            return Err(LabError::Config(format!(
                "ucb confidence must be a finite value >= 0, got {confidence}"
            )));
        }
        Ok(Self { confidence })
    }

    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Never-shown documents score `+inf` so every candidate is explored
    /// before the bound is trusted.
    #[must_use]
    pub fn score(&self, doc: DocStats, rounds: u64) -> f64 {
        if doc.shown == 0 {
            return f64::INFINITY;
        }
        let bonus = ((rounds as f64 + 1.0).ln() / (doc.shown as f64 + VISIT_EPSILON)).sqrt();
        self.confidence.mul_add(bonus, doc.mean())
    }

    pub(crate) fn rank(
        &self,
        candidates: &[String],
        slate_size: usize,
        stats: &StatsTable,
    ) -> Vec<DocId> {
        let scores: Vec<f64> = candidates
            .iter()
            .map(|id| self.score(stats.get(id), stats.rounds()))
            .collect();
        rank_by_scores(candidates, &scores, slate_size, stats)
    }
}
