//! Dependent click model: cascade examination where a click only ends the
//! session if the user is satisfied.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{ClickOutcome, DocId, Document, validate_probability};
use crate::error::{LabError, Result};

use super::documents::DocumentSet;

pub const DEFAULT_SATISFACTION: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct DependentClickEnvironment {
    docs: DocumentSet,
    /// Indexed like the document set.
    satisfaction: Vec<f64>,
    rng: StdRng,
}

impl DependentClickEnvironment {
    pub fn new(
        documents: Vec<Document>,
        slate_size: usize,
        satisfaction: &BTreeMap<DocId, f64>,
        default_satisfaction: f64,
        rng: StdRng,
    ) -> Result<Self> {
        let docs = DocumentSet::new(documents, slate_size)?;
        validate_probability("default_satisfaction", default_satisfaction)?;
        for (doc_id, value) in satisfaction {
            if !docs.contains(doc_id) {
                return Err(LabError::UnknownDocument(format!(
                    "{doc_id} (satisfaction override)"
                )));
            }
            validate_probability(&format!("satisfaction of '{doc_id}'"), *value)?;
        }
        let satisfaction = docs
            .documents()
            .iter()
            .map(|doc| {
                satisfaction
                    .get(doc.doc_id())
                    .copied()
                    .unwrap_or(default_satisfaction)
            })
            .collect();
        Ok(Self {
            docs,
            satisfaction,
            rng,
        })
    }

    pub(crate) const fn documents(&self) -> &DocumentSet {
        &self.docs
    }

    #[must_use]
    pub fn satisfaction(&self, doc_id: &str) -> Option<f64> {
        self.docs.index_of(doc_id).map(|i| self.satisfaction[i])
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn select_clicks(&mut self, slate: &[String]) -> Result<ClickOutcome> {
        let resolved = self.docs.resolve(slate)?;
        let mut outcome = ClickOutcome::with_len(resolved.len());
        for (position, index) in resolved.into_iter().enumerate() {
            outcome.examined[position] = true;
            if self.rng.random::<f64>() >= self.docs.attraction(index) {
                continue;
            }
            outcome.clicks[position] = true;
            if self.rng.random::<f64>() < self.satisfaction[index] {
                outcome.stop_position = Some(position);
                break;
            }
        }
        Ok(outcome)
    }

    pub fn expected_clicks_by_position(&self, slate: &[String]) -> Result<Vec<f64>> {
        let resolved = self.docs.resolve(slate)?;
        let mut continue_prob = 1.0;
        let mut expected = Vec::with_capacity(resolved.len());
        for index in resolved {
            let attraction = self.docs.attraction(index);
            expected.push(continue_prob * attraction);
            continue_prob *= 1.0 - attraction * self.satisfaction[index];
        }
        Ok(expected)
    }

    /// Exact optimum over ordered slates of length `slate_size`.
    ///
    /// For a fixed set, swapping neighbours shows ascending satisfaction is
    /// the best order, so the optimum is a subsequence of the documents
    /// sorted that way. `best[i][c]` is the best reward from picking exactly
    /// `c` documents out of `sorted[i..]`.
    #[must_use]
    pub fn optimal_slate(&self) -> Vec<DocId> {
        let k = self.docs.slate_size();
        let mut sorted: Vec<usize> = (0..self.docs.documents().len()).collect();
        sorted.sort_by(|a, b| {
            self.satisfaction[*a]
                .total_cmp(&self.satisfaction[*b])
                .then_with(|| self.docs.attraction(*b).total_cmp(&self.docs.attraction(*a)))
        });
        let n = sorted.len();

        let mut best = vec![vec![f64::NEG_INFINITY; k + 1]; n + 1];
        for row in &mut best {
            row[0] = 0.0;
        }
        for i in (0..n).rev() {
            for c in 1..=k {
                let skip = best[i + 1][c];
                let take = self.take_value(sorted[i], best[i + 1][c - 1]);
                best[i][c] = skip.max(take);
            }
        }

        let mut slate = Vec::with_capacity(k);
        let mut remaining = k;
        for i in 0..n {
            if remaining == 0 {
                break;
            }
            let take = self.take_value(sorted[i], best[i + 1][remaining - 1]);
            if take >= best[i + 1][remaining] {
                slate.push(sorted[i]);
                remaining -= 1;
            }
        }
        self.docs.ids_for(&slate)
    }

    fn take_value(&self, index: usize, rest: f64) -> f64 {
        if rest == f64::NEG_INFINITY {
            return f64::NEG_INFINITY;
        }
        let attraction = self.docs.attraction(index);
        attraction + (1.0 - attraction * self.satisfaction[index]) * rest
    }
}
