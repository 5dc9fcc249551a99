//! Match/warn/suspicious percentage breakdowns.
//!
//! Breakdowns are computed bottom-up as unweighted arithmetic means of
//! child percentages, not count-weighted rollups: an operation's
//! breakdown is the mean of its pipelines' breakdowns regardless of how
//! many comparisons each pipeline holds.

use serde::{Deserialize, Serialize};

use crate::state::ContrastState;

/// Percentage breakdown of contrast states at one level of the result
/// tree. The three fields sum to 100 (within floating tolerance).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimilarityPercentages {
    /// Percentage of `Match` outcomes.
    pub matched: f64,
    /// Percentage of `Warn` outcomes.
    pub warned: f64,
    /// Percentage of `Suspicious` outcomes.
    pub suspicious: f64,
}

impl SimilarityPercentages {
    /// Count-based breakdown over leaf states.
    ///
    /// Returns `None` for an empty sequence; dividing by a zero count is
    /// guarded here and surfaced by callers, never propagated as an
    /// arithmetic fault.
    pub fn from_states<I>(states: I) -> Option<Self>
    where
        I: IntoIterator<Item = ContrastState>,
    {
        let mut matched = 0usize;
        let mut warned = 0usize;
        let mut suspicious = 0usize;
        for state in states {
            match state {
                ContrastState::Match => matched += 1,
                ContrastState::Warn => warned += 1,
                ContrastState::Suspicious => suspicious += 1,
            }
        }
        let total = matched + warned + suspicious;
        if total == 0 {
            return None;
        }
        let total = total as f64;
        Some(Self {
            matched: matched as f64 / total * 100.0,
            warned: warned as f64 / total * 100.0,
            suspicious: suspicious as f64 / total * 100.0,
        })
    }

    /// Unweighted arithmetic mean of child breakdowns.
    ///
    /// Returns `None` for an empty slice.
    pub fn mean_of(children: &[SimilarityPercentages]) -> Option<Self> {
        if children.is_empty() {
            return None;
        }
        let n = children.len() as f64;
        Some(Self {
            matched: children.iter().map(|c| c.matched).sum::<f64>() / n,
            warned: children.iter().map(|c| c.warned).sum::<f64>() / n,
            suspicious: children.iter().map(|c| c.suspicious).sum::<f64>() / n,
        })
    }

    /// The breakdown as `[match, warn, suspicious]`, for chart-style
    /// consumers.
    pub fn as_array(&self) -> [f64; 3] {
        [self.matched, self.warned, self.suspicious]
    }
}

impl std::fmt::Display for SimilarityPercentages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Match:{:.2}%; Warning:{:.2}%; Suspicious:{:.2}%",
            self.matched, self.warned, self.suspicious
        )
    }
}
