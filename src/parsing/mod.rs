//! Loaders for lexicons and declension tables.
//!
//! The overlap engine works on in-memory sequences; these parsers are one
//! way of producing them from delimited text files.
//!
//! - **Lexicon files** (`.tsv`, `.csv`, optionally `.gz`): one item per line,
//!   `id<TAB>form` or just `form`
//! - **Declension tables** (`.tsv`, optionally `.gz`): `headword<TAB>form<TAB>tag`
//!
//! ## Lexicon format
//!
//! | Column | Description | Required |
//! |--------|-------------|----------|
//! | 1 | Item id (joined back to after matching) | No, defaults to the line number |
//! | 2 | Form, exactly one per item | Yes |
//!
//! Extra columns are ignored. Lines starting with `#` are comments.
//!
//! ## Example
//!
//! ```rust
//! use lexicon_overlap::core::Pila;
//! use lexicon_overlap::parsing::tsv::parse_lexicon_text;
//!
//! let lexicon = parse_lexicon_text::<Pila>("id\tform\np1\taqua\np2\trosā\n", '\t').unwrap();
//! assert_eq!(lexicon.len(), 2);
//! ```

pub mod decliner_table;
pub mod tsv;

pub use tsv::ParseError;
