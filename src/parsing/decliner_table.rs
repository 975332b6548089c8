use std::path::Path;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::matching::enrichment::{strip_macrons, DeclinedForm, TableDecliner};
use crate::parsing::tsv::{read_text, ParseError};
use crate::utils::validation::{normalize_form, MAX_TABLE_ROWS};

/// Parse a declension table file with columns: headword, form, [tag]
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_table_file(path: &Path) -> Result<TableDecliner, ParseError> {
    let content = read_text(path)?;
    let decliner = parse_table_text(&content)?;
    debug!(
        path = %path.display(),
        headwords = decliner.headword_count(),
        "Loaded declension table"
    );
    Ok(decliner)
}

/// Parse a tab-separated declension table with columns: headword, form, [tag]
///
/// Headwords are stored macron-stripped, matching how enrichment looks them
/// up. Forms are kept verbatim (after NFC) so that bare endings still reach
/// the correction policy, and an empty form is allowed.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 2 fields or
/// an invalid headword, or `ParseError::TooManyItems` if the row limit is exceeded.
pub fn parse_table_text(text: &str) -> Result<TableDecliner, ParseError> {
    let mut decliner = TableDecliner::new();
    let mut rows = 0usize;
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        if first_data_line {
            first_data_line = false;
            if fields[0].eq_ignore_ascii_case("headword") {
                continue;
            }
        }

        let line_num = i + 1;

        if fields.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 2 fields"
            )));
        }

        let headword = normalize_form(fields[0]).ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "Invalid headword on line {}: '{}'",
                line_num, fields[0]
            ))
        })?;

        let form: String = fields[1].nfc().collect();
        let tag = fields.get(2).copied().unwrap_or_default();

        if rows >= MAX_TABLE_ROWS {
            return Err(ParseError::TooManyItems(rows));
        }
        rows += 1;

        decliner.insert(strip_macrons(&headword), DeclinedForm::new(form, tag));
    }

    Ok(decliner)
}
