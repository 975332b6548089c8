use crate::core::form_set::FormSequence;
use crate::core::types::{Other, Pila};

/// Square 0/1 overlap matrix between Other items (rows) and PILA items (columns).
///
/// The size is `max(len(pila), len(other))`. Rows or columns past the end of
/// the shorter sequence are padding and score 0 against everything, which
/// gives the assignment solver the square input it requires.
///
/// Storage is one byte per cell, `size * size` in total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    size: usize,
    /// Row-major scores
    cells: Vec<u8>,
}

impl ScoreMatrix {
    /// Score every (Other, PILA) pair by variant intersection
    #[must_use]
    pub fn build(pila: &FormSequence<Pila>, other: &FormSequence<Other>) -> Self {
        let size = pila.len().max(other.len());
        let mut cells = vec![0u8; size * size];

        for (row, other_set) in other.iter().enumerate() {
            if other_set.is_empty() {
                continue;
            }
            for (column, pila_set) in pila.iter().enumerate() {
                if other_set.intersects(pila_set) {
                    cells[row * size + column] = 1;
                }
            }
        }

        Self { size, cells }
    }

    /// Build directly from rows; short rows and missing rows are zero-padded
    #[must_use]
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let size = width.max(rows.len());
        let mut cells = vec![0u8; size * size];

        for (row, values) in rows.iter().enumerate() {
            for (column, &value) in values.iter().enumerate() {
                cells[row * size + column] = u8::from(value > 0);
            }
        }

        Self { size, cells }
    }

    /// Side length of the (square) matrix
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Score at `[row, column]`, 0 when out of range
    #[must_use]
    pub fn score(&self, row: usize, column: usize) -> u8 {
        if row >= self.size || column >= self.size {
            return 0;
        }
        self.cells[row * self.size + column]
    }

    /// Number of overlapping (Other, PILA) pairs
    #[must_use]
    pub fn overlapping_pairs(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == 1).count()
    }
}
