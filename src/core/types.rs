use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
}

/// One side of a comparison.
///
/// Implemented only by [`Pila`] and [`Other`]. Indices and sequences are
/// parameterized by their side so an index from one collection can never be
/// used to look up an item in the other.
pub trait Side: sealed::Sealed + 'static {
    /// Human-readable label used in logs and error messages
    const LABEL: &'static str;
}

/// The dataset under study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pila {}

/// The comparison dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Other {}

impl sealed::Sealed for Pila {}
impl sealed::Sealed for Other {}

impl Side for Pila {
    const LABEL: &'static str = "pila";
}

impl Side for Other {
    const LABEL: &'static str = "other";
}

/// Position of an item within a [`FormSequence`](crate::core::form_set::FormSequence) of side `S`
pub struct ItemIndex<S: Side> {
    position: usize,
    side: PhantomData<fn() -> S>,
}

impl<S: Side> ItemIndex<S> {
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self {
            position,
            side: PhantomData,
        }
    }

    /// Raw position, for joining back to caller-held arrays
    #[must_use]
    pub const fn position(self) -> usize {
        self.position
    }
}

// Manual impls: derives would needlessly require `S: Clone` etc.
impl<S: Side> Clone for ItemIndex<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Side> Copy for ItemIndex<S> {}

impl<S: Side> PartialEq for ItemIndex<S> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<S: Side> Eq for ItemIndex<S> {}

impl<S: Side> PartialOrd for ItemIndex<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Side> Ord for ItemIndex<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.position.cmp(&other.position)
    }
}

impl<S: Side> Hash for ItemIndex<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}

impl<S: Side> fmt::Debug for ItemIndex<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", S::LABEL, self.position)
    }
}

impl<S: Side> fmt::Display for ItemIndex<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}

/// A correspondence between an Other item and a PILA item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub other: ItemIndex<Other>,
    pub pila: ItemIndex<Pila>,
}

impl Match {
    #[must_use]
    pub const fn new(other: ItemIndex<Other>, pila: ItemIndex<Pila>) -> Self {
        Self { other, pila }
    }

    /// Construct from raw `(other_index, pila_index)` positions
    #[must_use]
    pub const fn from_positions(other: usize, pila: usize) -> Self {
        Self::new(ItemIndex::new(other), ItemIndex::new(pila))
    }
}

/// Matches in solver order; the order carries no meaning
pub type MatchList = Vec<Match>;

/// Phase in which a match was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapKind {
    /// Found by exact variant intersection before enrichment
    Direct,
    /// Found only after adding normalized or generated variants
    Indirect,
}

impl fmt::Display for OverlapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Indirect => write!(f, "indirect"),
        }
    }
}
