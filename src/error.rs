//! Error types for the contrast engine.

use std::fmt;

/// Error raised while contrasting a profile dataset against a reference.
///
/// All variants are recoverable from the caller's perspective: the caller
/// decides whether to abort the whole comparison or skip the offending
/// subtree. Unmatched operation or pipeline identifiers are never errors;
/// see [`contrast_datasets`](crate::contrast_datasets) for the matching
/// policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContrastError {
    /// A reference sample set has fewer than two measurements, so no
    /// dispersion estimate and therefore no bounds can be derived.
    ///
    /// The affected pipeline or operation is rejected outright rather
    /// than classified against default bounds.
    InsufficientSample {
        /// Where the offending sample set lives, e.g.
        /// `"operation ECDH, pipeline corr"`.
        scope: String,
        /// Number of reference measurements found.
        count: usize,
    },
    /// A state aggregation or percentage breakdown was requested over
    /// zero elements.
    EmptyAggregation {
        /// Where the empty aggregation was attempted.
        scope: String,
    },
}

impl fmt::Display for ContrastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContrastError::InsufficientSample { scope, count } => write!(
                f,
                "{}: {} reference sample(s), need at least 2 to derive bounds",
                scope, count
            ),
            ContrastError::EmptyAggregation { scope } => {
                write!(f, "{}: nothing to aggregate", scope)
            }
        }
    }
}

impl std::error::Error for ContrastError {}
