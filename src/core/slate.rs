//! Slate and candidate-set validation shared by environments and policies.

use std::collections::HashSet;

use crate::error::{LabError, Result};

/// Fail on the first repeated id.
pub fn ensure_unique<'a, I>(ids: I, context: &str) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LabError::Config(format!(
                "duplicate document id '{id}' in {context}"
            )));
        }
    }
    Ok(())
}

/// Validate a candidate set against a requested slate size.
///
/// An empty candidate set is a usage error; a bad slate size is a
/// configuration error.
pub fn check_candidates(candidates: &[String], slate_size: usize) -> Result<()> {
    if candidates.is_empty() {
        return Err(LabError::Usage("candidate set is empty".to_string()));
    }
    if slate_size == 0 {
        return Err(LabError::Config("slate_size must be >= 1".to_string()));
    }
    if slate_size > candidates.len() {
        return Err(LabError::Config(format!(
            "slate_size ({slate_size}) cannot exceed number of candidates ({})",
            candidates.len()
        )));
    }
    ensure_unique(candidates.iter().map(String::as_str), "candidate set")
}
