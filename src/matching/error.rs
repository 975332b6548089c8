use thiserror::Error;

use crate::core::lexicon::LexiconError;
use crate::matching::enrichment::DeclineError;

/// Fatal failures of an overlap computation.
///
/// Generation errors from the decliner never appear here: they are absorbed
/// per item during enrichment.
#[derive(Error, Debug)]
pub enum OverlapError {
    /// The phases desynchronized; this is a bug, not bad input
    #[error("Invariant violated during {phase}: {detail}")]
    InvariantViolation { phase: &'static str, detail: String },

    #[error("Input contract violated: {0}")]
    InputContract(#[from] LexiconError),

    #[error("Too many {side} items: {count} exceeds maximum of {max}")]
    TooManyItems {
        side: &'static str,
        count: usize,
        max: usize,
    },

    /// A decliner failure outside the recoverable generation-error class
    #[error("Decliner failed on '{headword}': {source}")]
    Decliner {
        headword: String,
        #[source]
        source: DeclineError,
    },
}

impl OverlapError {
    pub(crate) fn invariant(phase: &'static str, detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            phase,
            detail: detail.into(),
        }
    }
}
