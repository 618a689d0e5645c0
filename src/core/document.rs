use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

/// Document identifier. Policies only ever see these.
pub type DocId = String;

/// A rankable document with its ground-truth attraction probability.
///
/// Immutable after construction; the attraction is known to environments and
/// the oracle but never handed to a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument", into = "RawDocument")]
pub struct Document {
    doc_id: DocId,
    attraction: f64,
}

impl Document {
    pub fn new(doc_id: impl Into<DocId>, attraction: f64) -> Result<Self> {
        let doc_id = doc_id.into();
        if doc_id.trim().is_empty() {
            return Err(LabError::Config("document id must not be empty".to_string()));
        }
        let attraction = validate_probability(&format!("attraction of '{doc_id}'"), attraction)?;
        Ok(Self { doc_id, attraction })
    }

    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    #[must_use]
    pub const fn attraction(&self) -> f64 {
        self.attraction
    }

    /// Parse a `doc_id=probability` specification.
    pub fn parse_spec(spec: &str) -> Result<Self> {
        let Some((name, raw_prob)) = spec.split_once('=') else {
            return Err(LabError::Config(format!(
                "invalid document spec '{spec}' (expected 'id=prob')"
            )));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(LabError::Config(format!(
                "document id missing in specification '{spec}'"
            )));
        }
        let probability = raw_prob.trim().parse::<f64>().map_err(|err| {
            LabError::Config(format!("invalid probability '{raw_prob}' in '{spec}': {err}"))
        })?;
        Self::new(name, probability)
    }
}

/// Reject NaN and anything outside `[0, 1]`; values are never clamped.
pub fn validate_probability(field: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(LabError::probability(field, value))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDocument {
    doc_id: DocId,
    attraction: f64,
}

impl TryFrom<RawDocument> for Document {
    type Error = LabError;

    fn try_from(raw: RawDocument) -> Result<Self> {
        Self::new(raw.doc_id, raw.attraction)
    }
}

impl From<Document> for RawDocument {
    fn from(doc: Document) -> Self {
        Self {
            doc_id: doc.doc_id,
            attraction: doc.attraction,
        }
    }
}
