//! Two-phase overlap matching between a PILA lexicon and another lexicon.
//!
//! This module provides the core matching functionality:
//!
//! - [`OverlapEngine`]: Main entry point, runs both phases and aggregates the result
//! - [`ScoreMatrix`]: Square 0/1 matrix of variant overlap between items
//! - [`assignment::solve`]: Optimal one-to-one assignment over a score matrix
//! - [`residual::remove_matched`]: Empties matched items while preserving positions
//! - [`enrichment`]: Macron stripping and declension of unmatched items
//! - [`OverlapResult`]: Counts and percentages per side and phase
//!
//! ## Matching Algorithm
//!
//! 1. **Direct matching**: build the score matrix and solve the assignment problem
//! 2. **Residual reduction**: empty every item matched in step 1
//! 3. **Enrichment**: add macron-stripped spellings to both sides and declined
//!    forms to PILA items
//! 4. **Indirect matching**: solve the assignment problem again on the residual
//! 5. **Aggregation**: counts and percentages relative to the original sizes
//!
//! ## Example
//!
//! ```rust
//! use lexicon_overlap::core::{FormSequence, Other, Pila};
//! use lexicon_overlap::matching::enrichment::{DeclineError, DeclinedForm, GenerationError};
//! use lexicon_overlap::matching::OverlapEngine;
//!
//! let decliner = |headword: &str| -> Result<Vec<DeclinedForm>, DeclineError> {
//!     match headword {
//!         "rosa" => Ok(vec![DeclinedForm::new("rosam", "--s----a-")]),
//!         other => Err(GenerationError::UnknownHeadword(other.to_string()).into()),
//!     }
//! };
//!
//! let pila: FormSequence<Pila> = FormSequence::from_forms(["aqua", "rosa"]);
//! let other: FormSequence<Other> = FormSequence::from_forms(["aqua", "rosam"]);
//!
//! let engine = OverlapEngine::new(&decliner);
//! let outcome = engine.compute_overlap(&pila, &other).unwrap();
//!
//! assert_eq!(outcome.result.direct_overlap, 1);
//! assert_eq!(outcome.result.indirect_overlap, 1);
//! assert_eq!(outcome.result.total_overlap, 2);
//! ```

pub mod assignment;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod metrics;
pub mod residual;
pub mod scoring;

pub use engine::{OverlapConfig, OverlapEngine, OverlapOutcome, ResolvedMatch};
pub use error::OverlapError;
pub use metrics::OverlapResult;
pub use scoring::ScoreMatrix;
