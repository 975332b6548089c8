//! Core data types for lexical overlap measurement.
//!
//! - [`FormSet`]: interchangeable spellings for one lexical item
//! - [`FormSequence`]: a fixed-length, position-keyed sequence of form sets for one side
//! - [`Lexicon`]: a form sequence paired with the caller's record identifiers
//! - [`ItemIndex`], [`Match`]: side-typed positions and the correspondences between them
//! - [`Pila`], [`Other`]: side markers
//!
//! ## Positional identity
//!
//! An item's identity is its position in its sequence. Every phase of the
//! overlap computation keeps sequence lengths unchanged, so a [`Match`] can be
//! resolved against the caller's identifier arrays after the engine finishes.
//! Indices carry their side in the type:
//!
//! ```compile_fail
//! use lexicon_overlap::core::{FormSequence, ItemIndex, Other, Pila};
//!
//! let pila: FormSequence<Pila> = FormSequence::from_forms(["aqua"]);
//! let other_index: ItemIndex<Other> = ItemIndex::new(0);
//! pila.get(other_index);
//! ```

pub mod form_set;
pub mod lexicon;
pub mod types;

pub use form_set::{FormSequence, FormSet};
pub use lexicon::{Lexicon, LexiconError};
pub use types::{ItemIndex, Match, MatchList, Other, OverlapKind, Pila, Side};
