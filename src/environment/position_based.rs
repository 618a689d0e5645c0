//! Position-based click model: click = examined(position) x attracted(doc).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{ClickOutcome, DocId, Document, validate_probability};
use crate::error::{LabError, Result};

use super::documents::DocumentSet;

#[derive(Debug, Clone)]
pub struct PositionBasedEnvironment {
    docs: DocumentSet,
    position_bias: Vec<f64>,
    rng: StdRng,
}

impl PositionBasedEnvironment {
    /// `position_bias` defaults to 1.0 at every position. A vector shorter
    /// than `slate_size` is rejected; extra entries are ignored.
    pub fn new(
        documents: Vec<Document>,
        slate_size: usize,
        position_bias: Option<Vec<f64>>,
        rng: StdRng,
    ) -> Result<Self> {
        let docs = DocumentSet::new(documents, slate_size)?;
        let position_bias = match position_bias {
            None => vec![1.0; slate_size],
            Some(bias) => {
                if bias.len() < slate_size {
                    return Err(LabError::Config(format!(
                        "position_bias has {} entries but slate_size is {slate_size}",
                        bias.len()
                    )));
                }
                bias.into_iter()
                    .take(slate_size)
                    .enumerate()
                    .map(|(index, value)| {
                        validate_probability(&format!("position bias at index {index}"), value)
                    })
                    .collect::<Result<Vec<_>>>()?
            }
        };
        Ok(Self {
            docs,
            position_bias,
            rng,
        })
    }

    pub(crate) const fn documents(&self) -> &DocumentSet {
        &self.docs
    }

    #[must_use]
    pub fn position_bias(&self) -> &[f64] {
        &self.position_bias
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn select_clicks(&mut self, slate: &[String]) -> Result<ClickOutcome> {
        let resolved = self.docs.resolve(slate)?;
        let mut outcome = ClickOutcome::with_len(resolved.len());
        for (position, index) in resolved.into_iter().enumerate() {
            if self.rng.random::<f64>() >= self.position_bias[position] {
                continue;
            }
            outcome.examined[position] = true;
            if self.rng.random::<f64>() < self.docs.attraction(index) {
                outcome.clicks[position] = true;
            }
        }
        Ok(outcome)
    }

    pub fn expected_clicks_by_position(&self, slate: &[String]) -> Result<Vec<f64>> {
        let resolved = self.docs.resolve(slate)?;
        Ok(resolved
            .into_iter()
            .zip(&self.position_bias)
            .map(|(index, bias)| bias * self.docs.attraction(index))
            .collect())
    }

    /// Pair the i-th most attractive document with the i-th strongest
    /// position (rearrangement inequality), so any bias vector is handled.
    #[must_use]
    pub fn optimal_slate(&self) -> Vec<DocId> {
        let slate_size = self.docs.slate_size();
        let ranked = self.docs.by_attraction();
        let mut positions: Vec<usize> = (0..slate_size).collect();
        positions.sort_by(|a, b| self.position_bias[*b].total_cmp(&self.position_bias[*a]));

        let mut slate = vec![0usize; slate_size];
        for (rank, position) in positions.into_iter().enumerate() {
            slate[position] = ranked[rank];
        }
        self.docs.ids_for(&slate)
    }
}
