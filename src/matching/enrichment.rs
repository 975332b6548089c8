//! Morphological enrichment of unmatched items.
//!
//! Before the indirect matching phase, every surviving singleton gains its
//! macron-stripped spelling. PILA items additionally gain the inflected forms
//! proposed by a [`Decliner`]. Declension is best-effort: an item the decliner
//! cannot handle keeps only its stripped spelling.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, trace};
use unicode_normalization::UnicodeNormalization;

use crate::core::form_set::{FormSequence, FormSet};
use crate::core::types::{Other, Pila, Side};
use crate::matching::error::OverlapError;

const COMBINING_MACRON: char = '\u{0304}';

/// An inflected form and its grammatical tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclinedForm {
    pub form: String,
    pub tag: String,
}

impl DeclinedForm {
    pub fn new(form: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            tag: tag.into(),
        }
    }
}

/// The decliner has no analysis for a headword. Recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Unknown headword: {0}")]
    UnknownHeadword(String),

    #[error("Headword not supported by generator: {0}")]
    Unsupported(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclineError {
    /// Expected failure class; enrichment skips the item
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Anything else; never masked
    #[error("Decliner backend error: {0}")]
    Backend(String),
}

/// Source of inflected forms for a headword
pub trait Decliner {
    /// Propose inflected forms of `headword`.
    ///
    /// # Errors
    ///
    /// Returns `DeclineError::Generation` when the headword cannot be
    /// analysed, or `DeclineError::Backend` for any other failure.
    fn decline(&self, headword: &str) -> Result<Vec<DeclinedForm>, DeclineError>;
}

impl<F> Decliner for F
where
    F: Fn(&str) -> Result<Vec<DeclinedForm>, DeclineError>,
{
    fn decline(&self, headword: &str) -> Result<Vec<DeclinedForm>, DeclineError> {
        self(headword)
    }
}

/// Decliner that never proposes anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecliner;

impl Decliner for NoDecliner {
    fn decline(&self, _headword: &str) -> Result<Vec<DeclinedForm>, DeclineError> {
        Ok(Vec::new())
    }
}

/// Decliner backed by a precomputed headword → forms table
#[derive(Debug, Clone, Default)]
pub struct TableDecliner {
    table: HashMap<String, Vec<DeclinedForm>>,
}

impl TableDecliner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, headword: impl Into<String>, form: DeclinedForm) {
        self.table.entry(headword.into()).or_default().push(form);
    }

    #[must_use]
    pub fn headword_count(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl FromIterator<(String, DeclinedForm)> for TableDecliner {
    fn from_iter<I: IntoIterator<Item = (String, DeclinedForm)>>(iter: I) -> Self {
        let mut decliner = Self::new();
        for (headword, form) in iter {
            decliner.insert(headword, form);
        }
        decliner
    }
}

impl Decliner for TableDecliner {
    fn decline(&self, headword: &str) -> Result<Vec<DeclinedForm>, DeclineError> {
        self.table
            .get(headword)
            .cloned()
            .ok_or_else(|| GenerationError::UnknownHeadword(headword.to_string()).into())
    }
}

/// Generated (ending, tag) pairs that come back as a bare second-declension
/// ending instead of a full form. Tags are positional morphology codes.
pub const DEFECTIVE_ENDINGS: [(&str, &str); 10] = [
    ("um", "--s----a-"),
    ("i", "--s----g-"),
    ("o", "--s----d-"),
    ("o", "--s----b-"),
    ("i", "--p----n-"),
    ("i", "--p----v-"),
    ("os", "--p----a-"),
    ("orum", "--p----g-"),
    ("is", "--p----d-"),
    ("is", "--p----b-"),
];

/// Replace bare endings from [`DEFECTIVE_ENDINGS`] with `headword + ending`
#[must_use]
pub fn correct_declined_forms(headword: &str, forms: Vec<DeclinedForm>) -> Vec<DeclinedForm> {
    forms
        .into_iter()
        .map(|declined| {
            let defective = DEFECTIVE_ENDINGS
                .iter()
                .any(|&(ending, tag)| declined.form == ending && declined.tag == tag);
            if defective {
                DeclinedForm {
                    form: format!("{headword}{}", declined.form),
                    tag: declined.tag,
                }
            } else {
                declined
            }
        })
        .collect()
}

/// Remove macrons, leaving every other diacritic in place.
///
/// ```
/// use lexicon_overlap::matching::enrichment::strip_macrons;
///
/// assert_eq!(strip_macrons("rosā"), "rosa");
/// assert_eq!(strip_macrons("Ōceanus"), "Oceanus");
/// ```
#[must_use]
pub fn strip_macrons(form: &str) -> String {
    form.nfd().filter(|&c| c != COMBINING_MACRON).nfc().collect()
}

/// What enrichment did to one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    /// Non-empty items visited
    pub items: usize,
    /// Items whose decliner call succeeded
    pub declined: usize,
    /// Items skipped because the decliner could not handle them
    pub skipped: usize,
    /// Variants added across all items
    pub variants_added: usize,
}

/// Add macron-stripped spellings and declined forms to unmatched PILA items.
///
/// # Errors
///
/// Returns `OverlapError::InvariantViolation` if a non-empty item is not a
/// singleton, or `OverlapError::Decliner` if the decliner fails with anything
/// other than a generation error.
pub fn enrich_pila(
    sequence: &mut FormSequence<Pila>,
    decliner: &dyn Decliner,
) -> Result<EnrichmentReport, OverlapError> {
    let mut report = EnrichmentReport::default();

    for (index, set) in sequence.iter_indexed_mut() {
        let Some(headword) = add_stripped_form::<Pila>(set, &mut report)? else {
            continue;
        };

        match decliner.decline(&headword) {
            Ok(forms) => {
                report.declined += 1;
                for declined in correct_declined_forms(&headword, forms) {
                    if !declined.form.is_empty() && set.insert(declined.form) {
                        report.variants_added += 1;
                    }
                }
                trace!(index = %index, headword = %headword, variants = set.len(), "Declined");
            }
            Err(DeclineError::Generation(e)) => {
                report.skipped += 1;
                debug!(index = %index, headword = %headword, reason = %e, "Skipping declension");
            }
            Err(source) => return Err(OverlapError::Decliner { headword, source }),
        }
    }

    Ok(report)
}

/// Add macron-stripped spellings to unmatched Other items.
///
/// # Errors
///
/// Returns `OverlapError::InvariantViolation` if a non-empty item is not a singleton.
pub fn enrich_other(sequence: &mut FormSequence<Other>) -> Result<EnrichmentReport, OverlapError> {
    add_stripped_forms(sequence)
}

/// Add only the macron-stripped spelling to every unmatched item of either side
///
/// # Errors
///
/// Returns `OverlapError::InvariantViolation` if a non-empty item is not a singleton.
pub fn add_stripped_forms<S: Side>(
    sequence: &mut FormSequence<S>,
) -> Result<EnrichmentReport, OverlapError> {
    let mut report = EnrichmentReport::default();
    for (_, set) in sequence.iter_indexed_mut() {
        add_stripped_form::<S>(set, &mut report)?;
    }
    Ok(report)
}

/// Returns the stripped headword, or `None` for an already-consumed item
fn add_stripped_form<S: Side>(
    set: &mut FormSet,
    report: &mut EnrichmentReport,
) -> Result<Option<String>, OverlapError> {
    if set.is_empty() {
        return Ok(None);
    }
    let Some(form) = set.sole_form() else {
        return Err(OverlapError::invariant(
            "enrichment",
            format!(
                "expected a singleton {} form set before enrichment, found {} variants",
                S::LABEL,
                set.len()
            ),
        ));
    };

    report.items += 1;
    let stripped = strip_macrons(form);
    if set.insert(stripped.clone()) {
        report.variants_added += 1;
    }
    Ok(Some(stripped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ItemIndex;

    fn rosa_decliner(headword: &str) -> Result<Vec<DeclinedForm>, DeclineError> {
        match headword {
            "rosa" => Ok(vec![
                DeclinedForm::new("rosam", "--s----a-"),
                DeclinedForm::new("rosae", "--s----g-"),
                DeclinedForm::new("", "--p----v-"),
            ]),
            other => Err(GenerationError::UnknownHeadword(other.to_string()).into()),
        }
    }

    #[test]
    fn test_strip_macrons() {
        assert_eq!(strip_macrons("aquā"), "aqua");
        assert_eq!(strip_macrons("ūnus"), "unus");
        assert_eq!(strip_macrons("amō"), "amo");
        // Decomposed input
        assert_eq!(strip_macrons("a\u{0304}"), "a");
        // Other diacritics survive
        assert_eq!(strip_macrons("ăēï"), "ăeï");
        assert_eq!(strip_macrons("plain"), "plain");
    }

    #[test]
    fn test_correct_declined_forms() {
        let forms = vec![
            DeclinedForm::new("um", "--s----a-"),
            DeclinedForm::new("um", "--s----n-"),
            DeclinedForm::new("orum", "--p----g-"),
            DeclinedForm::new("lupi", "--s----g-"),
        ];
        let corrected = correct_declined_forms("lup", forms);
        assert_eq!(corrected[0], DeclinedForm::new("lupum", "--s----a-"));
        // Tag not in the defect table: left alone
        assert_eq!(corrected[1], DeclinedForm::new("um", "--s----n-"));
        assert_eq!(corrected[2], DeclinedForm::new("luporum", "--p----g-"));
        assert_eq!(corrected[3], DeclinedForm::new("lupi", "--s----g-"));
    }

    #[test]
    fn test_enrich_pila_adds_declined_forms() {
        let mut pila: FormSequence<Pila> = FormSequence::from_forms(["rosā"]);
        let report = enrich_pila(&mut pila, &rosa_decliner).unwrap();

        let set = pila.get(ItemIndex::new(0)).unwrap();
        assert!(set.contains("rosā"));
        assert!(set.contains("rosa"));
        assert!(set.contains("rosam"));
        assert!(set.contains("rosae"));
        assert!(!set.contains(""));
        assert_eq!(report.items, 1);
        assert_eq!(report.declined, 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.variants_added, 3);
    }

    #[test]
    fn test_enrich_pila_generation_error_is_absorbed() {
        let mut pila: FormSequence<Pila> = FormSequence::from_forms(["ignis"]);
        let report = enrich_pila(&mut pila, &rosa_decliner).unwrap();

        let set = pila.get(ItemIndex::new(0)).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains("ignis"));
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_enrich_pila_backend_error_propagates() {
        let failing = |_: &str| -> Result<Vec<DeclinedForm>, DeclineError> {
            Err(DeclineError::Backend("connection reset".to_string()))
        };
        let mut pila: FormSequence<Pila> = FormSequence::from_forms(["rosa"]);
        let err = enrich_pila(&mut pila, &failing).unwrap_err();
        assert!(matches!(err, OverlapError::Decliner { ref headword, .. } if headword == "rosa"));
    }

    #[test]
    fn test_enrich_skips_empty_sets() {
        let mut pila = FormSequence::<Pila>::new(vec![FormSet::new()]);
        let report = enrich_pila(&mut pila, &rosa_decliner).unwrap();
        assert_eq!(report, EnrichmentReport::default());
        assert!(pila.get(ItemIndex::new(0)).unwrap().is_empty());
    }

    #[test]
    fn test_enrich_rejects_non_singletons() {
        let mut other = FormSequence::<Other>::new(vec![["a", "b"].into_iter().collect()]);
        let err = enrich_other(&mut other).unwrap_err();
        assert!(matches!(err, OverlapError::InvariantViolation { .. }));
    }

    #[test]
    fn test_enrich_other_never_declines() {
        let mut other: FormSequence<Other> = FormSequence::from_forms(["rosā", "rosa"]);
        let report = enrich_other(&mut other).unwrap();

        assert_eq!(other.get(ItemIndex::new(0)).unwrap().len(), 2);
        // Already macronless: nothing new
        assert_eq!(other.get(ItemIndex::new(1)).unwrap().len(), 1);
        assert_eq!(report.items, 2);
        assert_eq!(report.variants_added, 1);
        assert_eq!(report.declined, 0);
    }

    #[test]
    fn test_stripping_alone_never_counts_declensions() {
        let mut pila: FormSequence<Pila> = FormSequence::from_forms(["rosā", "aqua"]);
        let report = add_stripped_forms(&mut pila).unwrap();

        assert_eq!(report.items, 2);
        assert_eq!(report.declined, 0);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.variants_added, 1);
        assert!(pila.get(ItemIndex::new(0)).unwrap().contains("rosa"));
    }

    #[test]
    fn test_table_decliner() {
        let decliner: TableDecliner = [
            ("lupus".to_string(), DeclinedForm::new("lupum", "--s----a-")),
            ("lupus".to_string(), DeclinedForm::new("lupo", "--s----d-")),
        ]
        .into_iter()
        .collect();

        assert_eq!(decliner.headword_count(), 1);
        assert_eq!(decliner.decline("lupus").unwrap().len(), 2);
        assert_eq!(
            decliner.decline("canis"),
            Err(DeclineError::Generation(GenerationError::UnknownHeadword(
                "canis".to_string()
            )))
        );
    }

    #[test]
    fn test_no_decliner() {
        assert!(NoDecliner.decline("anything").unwrap().is_empty());
    }
}
