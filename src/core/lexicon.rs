use thiserror::Error;

use crate::core::form_set::{FormSequence, FormSet};
use crate::core::types::{ItemIndex, Side};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    #[error("{side} lexicon has {forms} form sets but {ids} identifiers")]
    MisalignedIds {
        side: &'static str,
        forms: usize,
        ids: usize,
    },

    #[error("{side} item {position} holds {variants} variants; one form per item is required")]
    MultipleVariants {
        side: &'static str,
        position: usize,
        variants: usize,
    },
}

/// Check that every non-empty item holds exactly one form.
///
/// # Errors
///
/// Returns `LexiconError::MultipleVariants` for the first item with more than one form.
pub fn check_singletons<S: Side>(forms: &FormSequence<S>) -> Result<(), LexiconError> {
    match forms.iter_indexed().find(|(_, set)| set.len() > 1) {
        Some((index, set)) => Err(LexiconError::MultipleVariants {
            side: S::LABEL,
            position: index.position(),
            variants: set.len(),
        }),
        None => Ok(()),
    }
}

/// Form sets paired index-for-index with the caller's record identifiers
#[derive(Debug, Clone)]
pub struct Lexicon<S: Side> {
    /// Where the items were loaded from (if known)
    pub source: Option<String>,
    forms: FormSequence<S>,
    ids: Vec<String>,
}

impl<S: Side> Lexicon<S> {
    /// Pair form sets with identifiers.
    ///
    /// # Errors
    ///
    /// Returns `LexiconError::MisalignedIds` if the two sequences differ in length.
    pub fn new(forms: FormSequence<S>, ids: Vec<String>) -> Result<Self, LexiconError> {
        if forms.len() != ids.len() {
            return Err(LexiconError::MisalignedIds {
                side: S::LABEL,
                forms: forms.len(),
                ids: ids.len(),
            });
        }
        Ok(Self {
            source: None,
            forms,
            ids,
        })
    }

    /// Build from `(id, form_set)` rows
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, FormSet)>,
    {
        let (ids, sets): (Vec<String>, Vec<FormSet>) = entries.into_iter().unzip();
        Self {
            source: None,
            forms: FormSequence::new(sets),
            ids,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn forms(&self) -> &FormSequence<S> {
        &self.forms
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn id(&self, index: ItemIndex<S>) -> Option<&str> {
        self.ids.get(index.position()).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
