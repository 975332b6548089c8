use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::debug;

use crate::core::form_set::FormSet;
use crate::core::lexicon::Lexicon;
use crate::core::types::Side;
use crate::utils::validation::{check_item_limit, split_variants};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Too many entries: {0} exceeds the maximum allowed")]
    TooManyItems(usize),
}

/// Read a text file, transparently decompressing `.gz`
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or decompressed.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        let mut content = String::new();
        GzDecoder::new(file).read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// Field delimiter implied by a file name: `,` for `.csv`, tab otherwise
#[must_use]
pub fn delimiter_for(path: &Path) -> char {
    let inner = if is_gzipped(path) {
        path.file_stem().map(Path::new)
    } else {
        Some(path)
    };

    let is_csv = inner
        .and_then(Path::extension)
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        ','
    } else {
        '\t'
    }
}

/// Parse a lexicon file with columns: [id], form
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_lexicon_file<S: Side>(path: &Path) -> Result<Lexicon<S>, ParseError> {
    let content = read_text(path)?;
    let lexicon = parse_lexicon_text(&content, delimiter_for(path))?;
    debug!(
        path = %path.display(),
        side = S::LABEL,
        items = lexicon.len(),
        "Loaded lexicon"
    );
    Ok(lexicon.with_source(path.display().to_string()))
}

/// Parse lexicon text with columns: [id], form
///
/// With two or more columns the first is the item id and the second its
/// form. With a single column the id is the 1-based line number. Blank lines
/// and `#` comments are skipped, and a first row starting with `id` is treated
/// as a header.
///
/// Enrichment works on one form per item, so a field listing several
/// `|`-separated variants is refused here rather than failing mid-computation.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if an item has no usable form, more
/// than one form, or no items are found, or `ParseError::TooManyItems` if the
/// limit is exceeded.
pub fn parse_lexicon_text<S: Side>(text: &str, delimiter: char) -> Result<Lexicon<S>, ParseError> {
    let mut entries: Vec<(String, FormSet)> = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Split before trimming so a blank trailing field stays a field
        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "id" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let (id, raw_forms) = match fields.as_slice() {
            [form] => (line_num.to_string(), *form),
            [id, form, ..] => ((*id).to_string(), *form),
            [] => continue,
        };

        if id.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Empty id on line {line_num}"
            )));
        }

        let variants = split_variants(raw_forms);
        if variants.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "No valid form on line {line_num}: '{raw_forms}'"
            )));
        }
        if variants.len() > 1 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} lists {} variants ('{raw_forms}'); one form per item is required",
                variants.len()
            )));
        }

        // Check item limit for DOS protection
        if check_item_limit(entries.len()).is_some() {
            return Err(ParseError::TooManyItems(entries.len()));
        }

        entries.push((id, variants.into_iter().collect()));
    }

    if entries.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No items found in file".to_string(),
        ));
    }

    Ok(Lexicon::from_entries(entries))
}
