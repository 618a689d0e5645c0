//! Append-only record of a simulation run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{ClickOutcome, DocId};
use crate::environment::ClickModel;

/// One round of a run. Field names are stable; plotting and persistence
/// depend on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based.
    pub round_index: usize,
    pub slate: Vec<DocId>,
    pub clicks: ClickOutcome,
    /// Realized clicks this round.
    pub reward: u32,
    /// Expected clicks for `slate` under ground truth.
    pub expected_reward: f64,
    pub instantaneous_regret: f64,
    pub cumulative_regret: f64,
}

/// Running aggregates after a given round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundMetric {
    pub round_index: usize,
    pub reward: u32,
    pub cumulative_reward: u64,
    pub ctr: f64,
    pub instantaneous_regret: f64,
    pub cumulative_regret: f64,
}

/// Aggregate view of a log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub rounds: usize,
    pub total_reward: u64,
    /// Clicks per round.
    pub ctr: f64,
    pub optimal_reward: f64,
    pub cumulative_regret: f64,
    pub exposure_counts: BTreeMap<DocId, u64>,
    pub click_counts: BTreeMap<DocId, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationLog {
    model: ClickModel,
    optimal_slate: Vec<DocId>,
    optimal_reward: f64,
    records: Vec<RoundRecord>,
}

impl SimulationLog {
    #[must_use]
    pub const fn new(model: ClickModel, optimal_slate: Vec<DocId>, optimal_reward: f64) -> Self {
        Self {
            model,
            optimal_slate,
            optimal_reward,
            records: Vec::new(),
        }
    }

    /// Rebuild a log from persisted records.
    #[must_use]
    pub const fn from_records(
        model: ClickModel,
        optimal_slate: Vec<DocId>,
        optimal_reward: f64,
        records: Vec<RoundRecord>,
    ) -> Self {
        Self {
            model,
            optimal_slate,
            optimal_reward,
            records,
        }
    }

    pub(crate) fn push(&mut self, record: RoundRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub const fn model(&self) -> ClickModel {
        self.model
    }

    #[must_use]
    pub fn optimal_slate(&self) -> &[DocId] {
        &self.optimal_slate
    }

    #[must_use]
    pub const fn optimal_reward(&self) -> f64 {
        self.optimal_reward
    }

    #[must_use]
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    #[must_use]
    pub fn rounds(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn total_reward(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.reward)).sum()
    }

    #[must_use]
    pub fn ctr(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.total_reward() as f64 / self.records.len() as f64
    }

    #[must_use]
    pub fn cumulative_regret(&self) -> f64 {
        self.records.last().map_or(0.0, |r| r.cumulative_regret)
    }

    /// Examinations per document.
    #[must_use]
    pub fn exposure_counts(&self) -> BTreeMap<DocId, u64> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            for doc_id in record.clicks.examined_doc_ids(&record.slate) {
                *counts.entry(doc_id.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }

    #[must_use]
    pub fn click_counts(&self) -> BTreeMap<DocId, u64> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            for doc_id in record.clicks.clicked_doc_ids(&record.slate) {
                *counts.entry(doc_id.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }

    #[must_use]
    pub fn round_metrics(&self) -> Vec<RoundMetric> {
        let mut cumulative_reward = 0u64;
        self.records
            .iter()
            .map(|record| {
                cumulative_reward += u64::from(record.reward);
                RoundMetric {
                    round_index: record.round_index,
                    reward: record.reward,
                    cumulative_reward,
                    ctr: cumulative_reward as f64 / record.round_index.max(1) as f64,
                    instantaneous_regret: record.instantaneous_regret,
                    cumulative_regret: record.cumulative_regret,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            rounds: self.rounds(),
            total_reward: self.total_reward(),
            ctr: self.ctr(),
            optimal_reward: self.optimal_reward,
            cumulative_regret: self.cumulative_regret(),
            exposure_counts: self.exposure_counts(),
            click_counts: self.click_counts(),
        }
    }
}
