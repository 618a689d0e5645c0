//! Cascade click model: top-down examination, stop at the first click.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{ClickOutcome, DocId, Document};
use crate::error::Result;

use super::documents::DocumentSet;

#[derive(Debug, Clone)]
pub struct CascadeEnvironment {
    docs: DocumentSet,
    rng: StdRng,
}

impl CascadeEnvironment {
    pub fn new(documents: Vec<Document>, slate_size: usize, rng: StdRng) -> Result<Self> {
        Ok(Self {
            docs: DocumentSet::new(documents, slate_size)?,
            rng,
        })
    }

    pub(crate) const fn documents(&self) -> &DocumentSet {
        &self.docs
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn select_clicks(&mut self, slate: &[String]) -> Result<ClickOutcome> {
        let resolved = self.docs.resolve(slate)?;
        let mut outcome = ClickOutcome::with_len(resolved.len());
        for (position, index) in resolved.into_iter().enumerate() {
            outcome.examined[position] = true;
            if self.rng.random::<f64>() < self.docs.attraction(index) {
                outcome.clicks[position] = true;
                outcome.stop_position = Some(position);
                break;
            }
        }
        Ok(outcome)
    }

    /// Probability that the single click lands at each position.
    pub fn expected_clicks_by_position(&self, slate: &[String]) -> Result<Vec<f64>> {
        let resolved = self.docs.resolve(slate)?;
        let mut no_click_yet = 1.0;
        let mut expected = Vec::with_capacity(resolved.len());
        for index in resolved {
            let attraction = self.docs.attraction(index);
            expected.push(no_click_yet * attraction);
            no_click_yet *= 1.0 - attraction;
        }
        Ok(expected)
    }

    /// `1 - Π(1 - a_i)` is order-free, so the top-k by attraction is optimal.
    #[must_use]
    pub fn optimal_slate(&self) -> Vec<DocId> {
        let order = self.docs.by_attraction();
        self.docs.ids_for(&order[..self.docs.slate_size()])
    }
}
