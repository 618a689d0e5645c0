//! Per-document click statistics owned by a single policy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{ClickOutcome, DocId};
use crate::error::{LabError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocStats {
    /// Rounds in which the document was examined.
    pub shown: u64,
    pub clicks: u64,
}

impl DocStats {
    /// Empirical click-through rate; 0 for a document never shown.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.shown == 0 {
            0.0
        } else {
            self.clicks as f64 / self.shown as f64
        }
    }

    #[must_use]
    pub const fn failures(&self) -> u64 {
        self.shown.saturating_sub(self.clicks)
    }
}

/// Statistics keyed by document id, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct StatsTable {
    order: Vec<DocId>,
    slots: Vec<DocStats>,
    index: HashMap<DocId, usize>,
    rounds: u64,
}

impl StatsTable {
    #[must_use]
    pub fn new(doc_ids: &[String]) -> Self {
        let mut table = Self::default();
        for doc_id in doc_ids {
            table.ensure(doc_id);
        }
        table
    }

    pub(crate) fn ensure(&mut self, doc_id: &str) -> usize {
        if let Some(slot) = self.index.get(doc_id) {
            return *slot;
        }
        let slot = self.order.len();
        self.order.push(doc_id.to_string());
        self.slots.push(DocStats::default());
        self.index.insert(doc_id.to_string(), slot);
        slot
    }

    #[must_use]
    pub fn get(&self, doc_id: &str) -> DocStats {
        self.index
            .get(doc_id)
            .map(|slot| self.slots[*slot])
            .unwrap_or_default()
    }

    /// Position of `doc_id` in first-seen order.
    #[must_use]
    pub fn first_seen(&self, doc_id: &str) -> Option<usize> {
        self.index.get(doc_id).copied()
    }

    /// Number of rounds folded in so far.
    #[must_use]
    pub const fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DocStats)> + '_ {
        self.order
            .iter()
            .zip(&self.slots)
            .map(|(doc_id, stats)| (doc_id.as_str(), *stats))
    }

    #[must_use]
    pub fn total_clicks(&self) -> u64 {
        self.slots.iter().map(|s| s.clicks).sum()
    }

    #[must_use]
    pub fn total_shown(&self) -> u64 {
        self.slots.iter().map(|s| s.shown).sum()
    }

    /// Fold one round in. Only examined positions change; each examined
    /// document is counted once.
    pub(crate) fn observe(&mut self, slate: &[String], outcome: &ClickOutcome) -> Result<()> {
        if slate.len() != outcome.len() || outcome.examined.len() != outcome.len() {
            return Err(LabError::InvalidSlate(format!(
                "outcome covers {} positions but slate has {}",
                outcome.len(),
                slate.len()
            )));
        }
        for (position, doc_id) in slate.iter().enumerate() {
            let clicked = outcome.clicks[position];
            if !outcome.examined[position] && !clicked {
                continue;
            }
            let slot = self.ensure(doc_id);
            let stats = &mut self.slots[slot];
            stats.shown += 1;
            if clicked {
                stats.clicks += 1;
            }
        }
        self.rounds += 1;
        Ok(())
    }
}
