use std::collections::HashSet;

use crate::core::form_set::{FormSequence, FormSet};
use crate::core::types::{ItemIndex, Match, Other, Pila};

/// Copy both sequences with every matched position emptied.
///
/// Lengths are preserved so positions keep pointing at the same caller
/// records. Unmatched sets are cloned; the inputs are left untouched.
#[must_use]
pub fn remove_matched(
    pila: &FormSequence<Pila>,
    other: &FormSequence<Other>,
    matches: &[Match],
) -> (FormSequence<Pila>, FormSequence<Other>) {
    let matched_pila: HashSet<ItemIndex<Pila>> = matches.iter().map(|m| m.pila).collect();
    let matched_other: HashSet<ItemIndex<Other>> = matches.iter().map(|m| m.other).collect();

    (
        retain_unmatched(pila, &matched_pila),
        retain_unmatched(other, &matched_other),
    )
}

fn retain_unmatched<S: crate::core::types::Side>(
    sequence: &FormSequence<S>,
    matched: &HashSet<ItemIndex<S>>,
) -> FormSequence<S> {
    let sets = sequence
        .iter_indexed()
        .map(|(index, set)| {
            if matched.contains(&index) {
                FormSet::new()
            } else {
                set.clone()
            }
        })
        .collect();
    FormSequence::new(sets)
}
