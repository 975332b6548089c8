use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::{ItemIndex, Side};

/// Interchangeable spellings for one lexical item.
///
/// A fresh item is a singleton. Matching empties it; enrichment grows it.
/// Iteration order is sorted so that score matrices are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSet {
    forms: BTreeSet<String>,
}

impl FormSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn singleton(form: impl Into<String>) -> Self {
        let mut set = Self::new();
        set.insert(form);
        set
    }

    /// Add a variant; returns true if it was not already present
    pub fn insert(&mut self, form: impl Into<String>) -> bool {
        self.forms.insert(form.into())
    }

    #[must_use]
    pub fn contains(&self, form: &str) -> bool {
        self.forms.contains(form)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().map(String::as_str)
    }

    /// True if the two sets share at least one variant
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        // Probe the smaller set against the larger one
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.forms.iter().any(|form| large.forms.contains(form))
    }

    pub fn clear(&mut self) {
        self.forms.clear();
    }

    /// The only variant, if this is a singleton
    #[must_use]
    pub fn sole_form(&self) -> Option<&str> {
        if self.forms.len() == 1 {
            self.forms.first().map(String::as_str)
        } else {
            None
        }
    }
}

impl<T: Into<String>> FromIterator<T> for FormSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            forms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FormSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.forms.iter()
    }
}

/// Fixed-length, position-keyed sequence of [`FormSet`]s for one side.
///
/// Length is fixed at construction. Positions index caller-held identifier
/// arrays, so items are only ever emptied or grown in place.
#[derive(Debug)]
pub struct FormSequence<S: Side> {
    sets: Vec<FormSet>,
    side: std::marker::PhantomData<fn() -> S>,
}

impl<S: Side> Clone for FormSequence<S> {
    fn clone(&self) -> Self {
        Self::new(self.sets.clone())
    }
}

impl<S: Side> PartialEq for FormSequence<S> {
    fn eq(&self, other: &Self) -> bool {
        self.sets == other.sets
    }
}

impl<S: Side> FormSequence<S> {
    #[must_use]
    pub fn new(sets: Vec<FormSet>) -> Self {
        Self {
            sets,
            side: std::marker::PhantomData,
        }
    }

    /// One singleton set per form
    pub fn from_forms<I, T>(forms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(forms.into_iter().map(FormSet::singleton).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: ItemIndex<S>) -> Option<&FormSet> {
        self.sets.get(index.position())
    }

    pub fn get_mut(&mut self, index: ItemIndex<S>) -> Option<&mut FormSet> {
        self.sets.get_mut(index.position())
    }

    pub fn indices(&self) -> impl Iterator<Item = ItemIndex<S>> {
        (0..self.sets.len()).map(ItemIndex::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormSet> {
        self.sets.iter()
    }

    pub fn iter_indexed(&self) -> impl Iterator<Item = (ItemIndex<S>, &FormSet)> {
        self.sets
            .iter()
            .enumerate()
            .map(|(i, set)| (ItemIndex::new(i), set))
    }

    pub fn iter_indexed_mut(&mut self) -> impl Iterator<Item = (ItemIndex<S>, &mut FormSet)> {
        self.sets
            .iter_mut()
            .enumerate()
            .map(|(i, set)| (ItemIndex::new(i), set))
    }

    /// Number of items that still carry at least one variant
    #[must_use]
    pub fn non_empty_count(&self) -> usize {
        self.sets.iter().filter(|set| !set.is_empty()).count()
    }
}
