//! Side-by-side summaries of persisted simulation logs.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persist::{RunMetadata, load_log};
use crate::simulator::SimulationLog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSummaryRow {
    pub label: String,
    pub path: String,
    pub rounds: usize,
    pub ctr: f64,
    pub total_reward: u64,
    pub optimal_reward: f64,
    pub cumulative_regret: f64,
    pub algo: Option<String>,
    pub model: Option<String>,
}

impl LogSummaryRow {
    /// Build a row from an in-memory log. The label falls back to the file stem.
    #[must_use]
    pub fn from_log(path: &Path, log: &SimulationLog, metadata: &RunMetadata) -> Self {
        let label = metadata.label.clone().unwrap_or_else(|| {
            path.file_stem()
                .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
        });
        let summary = log.summary();
        Self {
            label,
            path: path.display().to_string(),
            rounds: summary.rounds,
            ctr: summary.ctr,
            total_reward: summary.total_reward,
            optimal_reward: summary.optimal_reward,
            cumulative_regret: summary.cumulative_regret,
            algo: metadata.algo.clone(),
            model: metadata
                .model
                .clone()
                .or_else(|| Some(log.model().to_string())),
        }
    }
}

pub fn summarize_file(path: &Path) -> Result<LogSummaryRow> {
    load_with_summary(path).map(|(row, _)| row)
}

/// Like [`summarize_file`], also returning the log for curve extraction.
pub fn load_with_summary(path: &Path) -> Result<(LogSummaryRow, SimulationLog)> {
    let (log, metadata) = load_log(path)?;
    Ok((LogSummaryRow::from_log(path, &log, &metadata), log))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Ctr,
    Regret,
    Reward,
}

/// Stable sort; ascending unless `descending`.
pub fn sort_rows(rows: &mut [LogSummaryRow], key: SortKey, descending: bool) {
    rows.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Ctr => a.ctr.total_cmp(&b.ctr),
            SortKey::Regret => a.cumulative_regret.total_cmp(&b.cumulative_regret),
            SortKey::Reward => a.total_reward.cmp(&b.total_reward),
        };
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Fixed-width plain text table.
#[must_use]
pub fn summaries_to_table(rows: &[LogSummaryRow]) -> String {
    let header = format!(
        "{:20} {:10} {:16} {:>8} {:>8} {:>10}",
        "Label", "Algo", "Model", "Rounds", "CTR", "Regret"
    );
    let mut lines = vec![header.clone(), "-".repeat(header.len())];
    for row in rows {
        lines.push(format!(
            "{:20} {:10} {:16} {:>8} {:>8.4} {:>10.2}",
            row.label,
            row.algo.as_deref().unwrap_or("-"),
            row.model.as_deref().unwrap_or("-"),
            row.rounds,
            row.ctr,
            row.cumulative_regret
        ));
    }
    lines.join("\n")
}

pub fn write_summary_json(path: &Path, rows: &[LogSummaryRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(rows)?)?;
    Ok(())
}
