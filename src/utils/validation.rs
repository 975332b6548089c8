//! Centralized validation and helper functions.

use unicode_normalization::UnicodeNormalization;

/// Maximum number of items accepted on either side of a comparison.
///
/// The score matrix takes `n * n` bytes for the larger side `n` (25 MB at this
/// limit) and the assignment solver is O(n³): about a second at 1 000 items,
/// a few minutes at the limit.
pub const MAX_ITEMS: usize = 5_000;

/// Maximum number of rows in a declension table
pub const MAX_TABLE_ROWS: usize = 1_000_000;

/// Longest accepted variant, in characters
pub const MAX_FORM_LENGTH: usize = 256;

/// Separator between variants of one item in a single input field
pub const VARIANT_SEPARATOR: char = '|';

/// Normalize a raw variant to NFC with surrounding whitespace removed.
///
/// Returns None if the variant is empty, too long, or contains control characters.
///
/// # Examples
///
/// ```
/// use lexicon_overlap::utils::validation::normalize_form;
///
/// assert_eq!(normalize_form("  aqua "), Some("aqua".to_string()));
/// assert_eq!(normalize_form("a\u{0304}qua"), Some("\u{0101}qua".to_string()));
/// assert_eq!(normalize_form("   "), None);
/// assert_eq!(normalize_form("aq\u{0007}ua"), None);
/// ```
#[must_use]
pub fn normalize_form(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
        return None;
    }
    let normalized: String = trimmed.nfc().collect();
    if normalized.chars().count() > MAX_FORM_LENGTH {
        return None;
    }
    Some(normalized)
}

/// Split a field holding one or more `|`-separated variants.
///
/// Invalid variants are dropped; the result may be empty.
#[must_use]
pub fn split_variants(field: &str) -> Vec<String> {
    field
        .split(VARIANT_SEPARATOR)
        .filter_map(normalize_form)
        .collect()
}

/// Check if adding another item would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new item.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_item_limit(count: usize) -> Option<String> {
    if count >= MAX_ITEMS {
        Some(format!(
            "Too many items: adding another would exceed maximum of {MAX_ITEMS}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_form_composes() {
        // Decomposed and precomposed macrons normalize to the same string
        assert_eq!(normalize_form("ro\u{0304}sa"), normalize_form("r\u{014D}sa"));
    }

    #[test]
    fn test_normalize_form_length_limit() {
        let long = "a".repeat(MAX_FORM_LENGTH + 1);
        assert!(normalize_form(&long).is_none());
        let ok = "a".repeat(MAX_FORM_LENGTH);
        assert!(normalize_form(&ok).is_some());
    }

    #[test]
    fn test_split_variants() {
        assert_eq!(split_variants("aqua|aquam"), vec!["aqua", "aquam"]);
        assert_eq!(split_variants("aqua| |"), vec!["aqua"]);
        assert!(split_variants("").is_empty());
    }

    #[test]
    fn test_check_item_limit() {
        assert!(check_item_limit(0).is_none());
        assert!(check_item_limit(MAX_ITEMS - 1).is_none());
        assert!(check_item_limit(MAX_ITEMS).is_some());
    }
}
