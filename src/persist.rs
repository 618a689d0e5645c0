//! JSON persistence for simulation logs.
//!
//! A log file holds the run metadata, the oracle, every round record and a
//! convenience copy of the summary. Loading rebuilds the `SimulationLog`
//! from the records alone, so a replayed `summary()` matches the original.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::DocId;
use crate::environment::ClickModel;
use crate::error::{LabError, Result};
use crate::settings::RunSettings;
use crate::simulator::{RoundRecord, SimulationLog, Summary};

pub const LOG_FORMAT_VERSION: u32 = 1;

/// Free-form description of how a log was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub doc_ids: Vec<DocId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RunMetadata {
    /// Metadata describing a run built from `settings`, stamped now.
    #[must_use]
    pub fn for_run(label: Option<String>, settings: &RunSettings, doc_ids: Vec<DocId>) -> Self {
        Self {
            label,
            algo: Some(settings.algo.to_string()),
            model: Some(settings.model.to_string()),
            steps: Some(settings.steps),
            seed: Some(settings.seed),
            doc_ids,
            overrides: BTreeMap::new(),
            created_at: Some(Utc::now()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogDocument {
    pub version: u32,
    #[serde(default)]
    pub metadata: RunMetadata,
    pub model: ClickModel,
    pub optimal_slate: Vec<DocId>,
    pub optimal_reward: f64,
    /// Written for readers; ignored on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    pub rounds: Vec<RoundRecord>,
}

impl LogDocument {
    #[must_use]
    pub fn into_log(self) -> (SimulationLog, RunMetadata) {
        let log = SimulationLog::from_records(
            self.model,
            self.optimal_slate,
            self.optimal_reward,
            self.rounds,
        );
        (log, self.metadata)
    }
}

#[must_use]
pub fn serialize_log(log: &SimulationLog, metadata: &RunMetadata) -> LogDocument {
    LogDocument {
        version: LOG_FORMAT_VERSION,
        metadata: metadata.clone(),
        model: log.model(),
        optimal_slate: log.optimal_slate().to_vec(),
        optimal_reward: log.optimal_reward(),
        summary: Some(log.summary()),
        rounds: log.records().to_vec(),
    }
}

/// Write `log` as pretty JSON via a temp file and rename.
pub fn write_log(path: &Path, log: &SimulationLog, metadata: &RunMetadata) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&serialize_log(log, metadata))?;
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, json)?;
    match std::fs::rename(&temp_path, path) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            std::fs::remove_file(path)?;
            if let Err(err) = std::fs::rename(&temp_path, path) {
                discard_temp(&temp_path);
                return Err(LabError::Io(err));
            }
        }
        Err(err) => {
            discard_temp(&temp_path);
            return Err(LabError::Io(err));
        }
    }
    Ok(())
}

fn discard_temp(temp_path: &Path) {
    if let Err(err) = std::fs::remove_file(temp_path) {
        warn!(path = %temp_path.display(), error = %err, "failed to remove temporary log file");
    }
}

pub fn load_log(path: &Path) -> Result<(SimulationLog, RunMetadata)> {
    let contents = std::fs::read_to_string(path)?;
    let document: LogDocument = serde_json::from_str(&contents)?;
    if document.version > LOG_FORMAT_VERSION {
        return Err(LabError::Config(format!(
            "{} uses log format v{} (this build reads up to v{LOG_FORMAT_VERSION})",
            path.display(),
            document.version
        )));
    }
    Ok(document.into_log())
}
