//! Plot-ready series extracted from simulation logs.
//!
//! Rendering is left to external tools; these structs serialize to plain
//! JSON arrays that any plotting library can consume.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::simulator::SimulationLog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningCurve {
    pub rounds: Vec<usize>,
    pub reward: Vec<u32>,
    pub cumulative_reward: Vec<u64>,
    pub ctr: Vec<f64>,
    pub optimal_reward: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegretCurve {
    pub rounds: Vec<usize>,
    pub instantaneous_regret: Vec<f64>,
    pub cumulative_regret: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocDistribution {
    pub doc_ids: Vec<String>,
    pub exposures: Vec<u64>,
    pub clicks: Vec<u64>,
}

/// All three series for one labelled log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveBundle {
    pub label: String,
    pub learning: LearningCurve,
    pub regret: RegretCurve,
    pub distribution: DocDistribution,
}

impl CurveBundle {
    #[must_use]
    pub fn from_log(label: impl Into<String>, log: &SimulationLog, doc_ids: &[String]) -> Self {
        Self {
            label: label.into(),
            learning: learning_curve_data(log),
            regret: regret_curve_data(log),
            distribution: doc_distribution_data(log, doc_ids),
        }
    }
}

#[must_use]
pub fn learning_curve_data(log: &SimulationLog) -> LearningCurve {
    let metrics = log.round_metrics();
    LearningCurve {
        rounds: metrics.iter().map(|m| m.round_index).collect(),
        reward: metrics.iter().map(|m| m.reward).collect(),
        cumulative_reward: metrics.iter().map(|m| m.cumulative_reward).collect(),
        ctr: metrics.iter().map(|m| m.ctr).collect(),
        optimal_reward: log.optimal_reward(),
    }
}

#[must_use]
pub fn regret_curve_data(log: &SimulationLog) -> RegretCurve {
    let metrics = log.round_metrics();
    RegretCurve {
        rounds: metrics.iter().map(|m| m.round_index).collect(),
        instantaneous_regret: metrics.iter().map(|m| m.instantaneous_regret).collect(),
        cumulative_regret: metrics.iter().map(|m| m.cumulative_regret).collect(),
    }
}

/// Exposure and click totals in `doc_ids` order; absent documents count 0.
#[must_use]
pub fn doc_distribution_data(log: &SimulationLog, doc_ids: &[String]) -> DocDistribution {
    let exposure_counts = log.exposure_counts();
    let click_counts = log.click_counts();
    DocDistribution {
        doc_ids: doc_ids.to_vec(),
        exposures: doc_ids
            .iter()
            .map(|id| exposure_counts.get(id).copied().unwrap_or(0))
            .collect(),
        clicks: doc_ids
            .iter()
            .map(|id| click_counts.get(id).copied().unwrap_or(0))
            .collect(),
    }
}

pub fn write_curves_json(path: &Path, bundles: &[CurveBundle]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(bundles)?)?;
    Ok(())
}
