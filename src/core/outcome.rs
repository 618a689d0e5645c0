use serde::{Deserialize, Serialize};

/// Result of presenting one slate to a simulated user.
///
/// `clicks[p]` and `examined[p]` describe slate position `p`. A click implies
/// the position was examined. `stop_position` is the position at which the
/// user stopped browsing (cascade click, DCM satisfied click); `None` when
/// the user ran off the end of the slate or the model has no stopping rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickOutcome {
    pub clicks: Vec<bool>,
    pub examined: Vec<bool>,
    pub stop_position: Option<usize>,
}

impl ClickOutcome {
    pub(crate) fn with_len(len: usize) -> Self {
        Self {
            clicks: vec![false; len],
            examined: vec![false; len],
            stop_position: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clicks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty()
    }

    #[must_use]
    pub fn click_positions(&self) -> Vec<usize> {
        positions(&self.clicks)
    }

    #[must_use]
    pub fn examined_positions(&self) -> Vec<usize> {
        positions(&self.examined)
    }

    /// Number of clicks; this is the round's reward.
    #[must_use]
    pub fn click_count(&self) -> u32 {
        let count = self.clicks.iter().filter(|clicked| **clicked).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn first_click(&self) -> Option<usize> {
        self.clicks.iter().position(|clicked| *clicked)
    }

    #[must_use]
    pub fn clicked_doc_ids<'a>(&self, slate: &'a [String]) -> Vec<&'a str> {
        select(slate, &self.clicks)
    }

    #[must_use]
    pub fn examined_doc_ids<'a>(&self, slate: &'a [String]) -> Vec<&'a str> {
        select(slate, &self.examined)
    }
}

fn positions(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(position, flag)| flag.then_some(position))
        .collect()
}

fn select<'a>(slate: &'a [String], flags: &[bool]) -> Vec<&'a str> {
    slate
        .iter()
        .zip(flags)
        .filter_map(|(doc_id, flag)| flag.then_some(doc_id.as_str()))
        .collect()
}
