//! Batch runs over labelled settings overrides.
//!
//! A run spec looks like `label:key=value,key=value`. Each spec is applied
//! over the base settings, simulated, and written to `<output_dir>/<label>.json`.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::compare::LogSummaryRow;
use crate::core::Document;
use crate::error::{LabError, Result};
use crate::persist::{RunMetadata, write_log};
use crate::settings::RunSettings;
use crate::simulator::SimulationLog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub label: String,
    pub overrides: BTreeMap<String, String>,
}

impl RunSpec {
    /// Base settings with this spec's overrides applied.
    pub fn settings(&self, base: &RunSettings) -> Result<RunSettings> {
        let mut settings = base.clone();
        settings.apply_overrides(&self.overrides)?;
        Ok(settings)
    }
}

pub fn parse_run_spec(spec: &str) -> Result<RunSpec> {
    let Some((label, remainder)) = spec.split_once(':') else {
        return Err(LabError::Usage(format!(
            "run spec '{spec}' is missing label prefix (label:key=value,...)"
        )));
    };
    let label = label.trim();
    if label.is_empty() {
        return Err(LabError::Usage("run label cannot be empty".to_string()));
    }
    if label.contains(['/', '\\']) || label == "." || label == ".." {
        return Err(LabError::Usage(format!(
            "run label '{label}' must be usable as a file name"
        )));
    }

    let mut overrides = BTreeMap::new();
    for token in remainder.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let Some((key, value)) = token.split_once('=') else {
            return Err(LabError::Usage(format!(
                "invalid token '{token}' in run spec '{spec}' (expected key=value)"
            )));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(LabError::Usage(format!("missing key in run token '{token}'")));
        }
        overrides.insert(key.to_string(), value.trim().to_string());
    }

    Ok(RunSpec {
        label: label.to_string(),
        overrides,
    })
}

#[derive(Debug, Clone)]
pub struct SweepRun {
    pub row: LogSummaryRow,
    pub log: SimulationLog,
}

/// Run every spec in order and persist one log per run.
///
/// All specs are validated before the first simulation starts.
pub fn run_sweep(
    base: &RunSettings,
    specs: &[RunSpec],
    documents: &[Document],
    output_dir: &Path,
) -> Result<Vec<SweepRun>> {
    if specs.is_empty() {
        return Err(LabError::Usage(
            "at least one run specification is required".to_string(),
        ));
    }
    let mut labels = HashSet::new();
    let mut resolved = Vec::with_capacity(specs.len());
    for spec in specs {
        if !labels.insert(spec.label.as_str()) {
            return Err(LabError::Usage(format!(
                "duplicate run label '{}'",
                spec.label
            )));
        }
        resolved.push((spec, spec.settings(base)?));
    }

    std::fs::create_dir_all(output_dir)?;

    let mut runs = Vec::with_capacity(resolved.len());
    for (spec, settings) in resolved {
        debug!(
            label = %spec.label,
            algo = %settings.algo,
            model = %settings.model,
            steps = settings.steps,
            seed = settings.seed,
            "sweep run"
        );
        let mut simulator = settings.build_simulator(documents.to_vec())?;
        let log = simulator.run(settings.steps)?;

        let doc_ids = simulator.environment().doc_ids();
        let mut metadata = RunMetadata::for_run(Some(spec.label.clone()), &settings, doc_ids);
        metadata.overrides.clone_from(&spec.overrides);

        let path = output_dir.join(format!("{}.json", spec.label));
        write_log(&path, &log, &metadata)?;
        runs.push(SweepRun {
            row: LogSummaryRow::from_log(&path, &log, &metadata),
            log,
        });
    }
    Ok(runs)
}
