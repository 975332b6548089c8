//! # lexicon-overlap
//!
//! A library for measuring how much two independently curated word-form
//! datasets overlap.
//!
//! Each item of a dataset is a set of spelling variants for one lexeme. The
//! two datasets being compared rarely share transcription conventions, so a
//! Latin headword in PILA may appear in another dataset with or without
//! macrons, or only in an inflected form.
//!
//! `lexicon-overlap` answers "how many PILA items are already present, in
//! some form, in this other dataset?" with a one-to-one matching in two
//! phases:
//!
//! ## Features
//!
//! - **Direct overlap**: optimal assignment over exact variant intersections
//! - **Indirect overlap**: a second assignment after adding macron-free
//!   spellings and declined forms to the items left unmatched
//! - **Position-keyed results**: matches resolve back to the caller's record ids
//! - **Pluggable declension**: any [`Decliner`](matching::enrichment::Decliner),
//!   with a correction policy for known bare-ending defects
//!
//! ## Example
//!
//! ```rust
//! use lexicon_overlap::{FormSequence, NoDecliner, OverlapEngine, Other, Pila};
//!
//! let pila: FormSequence<Pila> = FormSequence::from_forms(["aquā", "ignis", "terra"]);
//! let other: FormSequence<Other> = FormSequence::from_forms(["aqua", "terra"]);
//!
//! let engine = OverlapEngine::new(&NoDecliner);
//! let outcome = engine.compute_overlap(&pila, &other).unwrap();
//!
//! assert_eq!(outcome.result.direct_overlap, 1);   // terra
//! assert_eq!(outcome.result.indirect_overlap, 1); // aquā ~ aqua
//! assert!((outcome.result.other_total_overlap_percentage - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Form sets, side-typed indices, and lexicons
//! - [`matching`]: Score matrix, assignment solver, enrichment, and the overlap engine
//! - [`parsing`]: Loaders for lexicon files and declension tables
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::form_set::{FormSequence, FormSet};
pub use crate::core::lexicon::Lexicon;
pub use crate::core::types::*;
pub use crate::matching::engine::{OverlapConfig, OverlapEngine, OverlapOutcome, ResolvedMatch};
pub use crate::matching::enrichment::{Decliner, NoDecliner, TableDecliner};
pub use crate::matching::error::OverlapError;
pub use crate::matching::metrics::OverlapResult;
