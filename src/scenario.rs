//! Named document sets with their click-model parameters.
//!
//! Built-in scenarios are JSON files compiled into the binary; user-supplied
//! ones are read with [`Scenario::from_path`]. Applying a scenario writes its
//! values over a [`RunSettings`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{DocId, Document};
use crate::environment::ClickModel;
use crate::error::{LabError, Result};
use crate::settings::RunSettings;

const BUILTIN: &[(&str, &str)] = &[
    (
        "ecommerce_longtail",
        include_str!("../scenarios/ecommerce_longtail.json"),
    ),
    (
        "education_catalog",
        include_str!("../scenarios/education_catalog.json"),
    ),
    (
        "news_headlines",
        include_str!("../scenarios/news_headlines.json"),
    ),
    (
        "video_streaming",
        include_str!("../scenarios/video_streaming.json"),
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub documents: Vec<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slate_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ClickModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_bias: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub satisfaction: BTreeMap<DocId, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_satisfaction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
}

impl Scenario {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(raw)
            .map_err(|err| LabError::Config(format!("parse scenario: {err}")))?;
        if scenario.documents.is_empty() {
            return Err(LabError::Config(
                "scenario must list at least one document".to_string(),
            ));
        }
        Ok(scenario)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw).map_err(|err| match err {
            LabError::Config(msg) => LabError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    #[must_use]
    pub fn doc_ids(&self) -> Vec<DocId> {
        self.documents
            .iter()
            .map(|doc| doc.doc_id().to_string())
            .collect()
    }

    /// Overwrite the fields of `settings` this scenario pins down.
    pub fn apply_to(&self, settings: &mut RunSettings) {
        if let Some(slate_size) = self.slate_size {
            settings.slate_size = slate_size;
        }
        if let Some(model) = self.model {
            settings.model = model;
        }
        if let Some(bias) = &self.position_bias {
            settings.position_bias = Some(bias.clone());
        }
        if !self.satisfaction.is_empty() {
            settings.satisfaction.clone_from(&self.satisfaction);
        }
        if let Some(value) = self.default_satisfaction {
            settings.default_satisfaction = value;
        }
        if let Some(steps) = self.steps {
            settings.steps = steps;
        }
    }
}

/// Built-in scenario names, sorted.
#[must_use]
pub fn list_scenarios() -> Vec<&'static str> {
    BUILTIN.iter().map(|(name, _)| *name).collect()
}

pub fn load_scenario(name: &str) -> Result<Scenario> {
    let (_, raw) = BUILTIN
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .ok_or_else(|| LabError::ScenarioNotFound(name.to_string()))?;
    Scenario::from_json_str(raw)
}

/// Resolve `name_or_path` as a built-in name first, then as a file.
pub fn resolve_scenario(name_or_path: &str) -> Result<Scenario> {
    match load_scenario(name_or_path) {
        Err(LabError::ScenarioNotFound(_)) if Path::new(name_or_path).is_file() => {
            Scenario::from_path(Path::new(name_or_path))
        }
        other => other,
    }
}
