//! Error types for rank-bandit-lab.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{field} must be in [0, 1], got {value}")]
    InvalidProbability { field: String, value: f64 },

    #[error("unknown document ids requested: {0}")]
    UnknownDocument(String),

    #[error("invalid slate: {0}")]
    InvalidSlate(String),

    #[error("usage error: {0}")]
    Usage(String),

    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("sampling failed: {0}")]
    Sampling(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LabError {
    /// Stable machine-readable code for robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::InvalidProbability { .. } => "invalid_probability",
            Self::UnknownDocument(_) => "unknown_document",
            Self::InvalidSlate(_) => "invalid_slate",
            Self::Usage(_) => "usage_error",
            Self::ScenarioNotFound(_) => "scenario_not_found",
            Self::Sampling(_) => "sampling_error",
            Self::Io(_) => "io_error",
            Self::Serialization(_) => "serialization_error",
        }
    }

    /// Configuration errors are fatal at construction or first use.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::InvalidProbability { .. }
                | Self::UnknownDocument(_)
                | Self::InvalidSlate(_)
        )
    }

    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    pub(crate) fn probability(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidProbability {
            field: field.into(),
            value,
        }
    }
}

pub type Result<T> = std::result::Result<T, LabError>;
