//! Core data model: documents, slates and click outcomes.

pub mod document;
pub mod outcome;
pub mod slate;

pub use document::{DocId, Document, validate_probability};
pub use outcome::ClickOutcome;
pub use slate::{check_candidates, ensure_unique};
