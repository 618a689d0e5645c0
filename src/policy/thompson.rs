use rand::rngs::StdRng;
use rand_distr::{Beta, Distribution};

use crate::core::DocId;
use crate::error::{LabError, Result};

use super::rank_by_scores;
use super::stats::StatsTable;

/// Thompson sampling with an independent Beta posterior per document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThompsonSampling {
    alpha_prior: f64,
    beta_prior: f64,
}

impl ThompsonSampling {
    pub fn new(alpha_prior: f64, beta_prior: f64) -> Result<Self> {
        for (name, value) in [("alpha_prior", alpha_prior), ("beta_prior", beta_prior)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LabError::Config(format!("{name} must be > 0, got {value}")));
            }
        }
        Ok(Self {
            alpha_prior,
            beta_prior,
        })
    }

    /// Posterior `(alpha, beta)`: one pseudo-count per click / examined miss.
    #[must_use]
    pub fn posterior(&self, stats: &StatsTable, doc_id: &str) -> (f64, f64) {
        let doc = stats.get(doc_id);
        (
            self.alpha_prior + doc.clicks as f64,
            self.beta_prior + doc.failures() as f64,
        )
    }

    pub(crate) fn rank(
        &self,
        candidates: &[String],
        slate_size: usize,
        stats: &StatsTable,
        rng: &mut StdRng,
    ) -> Result<Vec<DocId>> {
        let scores = candidates
            .iter()
            .map(|id| {
                let (alpha, beta) = self.posterior(stats, id);
                let posterior = Beta::new(alpha, beta)
                    .map_err(|err| LabError::Sampling(format!("Beta({alpha}, {beta}): {err}")))?;
                Ok(posterior.sample(rng))
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(rank_by_scores(candidates, &scores, slate_size, stats))
    }
}
