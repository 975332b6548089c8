//! Resource limits and hostile input handling
//!
//! Inputs come from files assembled by third parties, so oversized or
//! malformed content must be rejected before it reaches the cubic solver.

use std::fmt::Write as _;

use lexicon_overlap::parsing::{decliner_table, tsv, ParseError};
use lexicon_overlap::utils::validation::{
    check_item_limit, normalize_form, split_variants, MAX_FORM_LENGTH, MAX_ITEMS,
};
use lexicon_overlap::{
    FormSequence, Lexicon, NoDecliner, Other, OverlapConfig, OverlapEngine, OverlapError, Pila,
};

fn numbered_lexicon(count: usize) -> String {
    let mut text = String::from("id\tform\n");
    for i in 0..count {
        let _ = writeln!(text, "O{i}\tform{i}");
    }
    text
}

/// A lexicon one item over the limit is refused while parsing
#[test]
fn test_lexicon_item_limit_enforced() {
    let at_limit: Result<Lexicon<Other>, _> =
        tsv::parse_lexicon_text(&numbered_lexicon(MAX_ITEMS), '\t');
    assert_eq!(at_limit.map(|l| l.len()).ok(), Some(MAX_ITEMS));

    let over: Result<Lexicon<Other>, _> =
        tsv::parse_lexicon_text(&numbered_lexicon(MAX_ITEMS + 1), '\t');
    assert!(matches!(over, Err(ParseError::TooManyItems(n)) if n == MAX_ITEMS));
}

/// The padded score matrix at the item limit stays a modest allocation
#[test]
fn test_item_limit_bounds_matrix_memory() {
    let matrix_bytes = MAX_ITEMS * MAX_ITEMS;
    assert!(matrix_bytes <= 32 * 1024 * 1024, "{matrix_bytes} bytes");
    assert_eq!(OverlapConfig::default().max_items, MAX_ITEMS);
}

#[test]
fn test_item_limit_boundary() {
    assert!(check_item_limit(0).is_none());
    assert!(check_item_limit(MAX_ITEMS - 1).is_none());
    assert!(check_item_limit(MAX_ITEMS).is_some());
}

/// Sequences built in memory bypass the parser, so the engine checks again
#[test]
fn test_engine_rejects_oversized_side() {
    let config = OverlapConfig {
        max_items: 3,
        ..OverlapConfig::default()
    };
    let engine = OverlapEngine::with_config(&NoDecliner, config);
    let pila: FormSequence<Pila> = FormSequence::from_forms(["a", "b", "c", "d"]);
    let other: FormSequence<Other> = FormSequence::from_forms(["a"]);

    let err = engine.compute_overlap(&pila, &other).unwrap_err();
    assert!(matches!(
        err,
        OverlapError::TooManyItems { count: 4, max: 3, .. }
    ));
}

#[test]
fn test_overlong_form_rejected() {
    let long = "a".repeat(MAX_FORM_LENGTH + 1);
    assert!(normalize_form(&long).is_none());
    assert!(normalize_form(&"a".repeat(MAX_FORM_LENGTH)).is_some());

    let text = format!("O1\t{long}\n");
    let result: Result<Lexicon<Other>, _> = tsv::parse_lexicon_text(&text, '\t');
    assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
}

/// Length is measured in characters, so multi-byte letters are not penalized
#[test]
fn test_form_length_counts_characters() {
    let macrons = "ā".repeat(MAX_FORM_LENGTH);
    assert!(macrons.len() > MAX_FORM_LENGTH);
    assert!(normalize_form(&macrons).is_some());
}

#[test]
fn test_control_characters_rejected() {
    for hostile in ["aqua\u{0000}", "\u{001b}[31maqua", "aq\rua", "ign\u{007f}is"] {
        assert!(normalize_form(hostile).is_none(), "accepted {hostile:?}");
    }
}

/// Bad variants are dropped individually without discarding the whole item
#[test]
fn test_mixed_variants_keep_valid_ones() {
    let variants = split_variants("aqua|\u{0007}|  |aquā");
    assert_eq!(variants, vec!["aqua".to_string(), "aquā".to_string()]);
}

#[test]
fn test_binary_garbage_is_not_a_lexicon() {
    let garbage = "\u{0001}\u{0002}\n\u{0003}\t\u{0004}\n";
    let result: Result<Lexicon<Pila>, _> = tsv::parse_lexicon_text(garbage, '\t');
    assert!(result.is_err());
}

#[test]
fn test_declension_table_rejects_short_rows() {
    let result = decliner_table::parse_table_text("rosa\n");
    assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result: Result<Lexicon<Pila>, _> =
        tsv::parse_lexicon_file(std::path::Path::new("/nonexistent/pila.tsv"));
    assert!(matches!(result, Err(ParseError::Io(_))));
}
