//! Optimal one-to-one assignment over a [`ScoreMatrix`].
//!
//! The solver is the Hungarian method in its shortest-augmenting-path form
//! (row and column potentials, one augmentation per row), which runs in
//! O(n³) on the padded square matrix. Scores are maximized by minimizing
//! `1 - score`.
//!
//! With 0/1 scores a maximum-weight assignment is a maximum-cardinality
//! matching of the overlap graph. Assignment pairs that score 0 are either
//! non-overlapping items or padding, and are dropped from the result.

use tracing::debug;

use crate::core::types::{Match, MatchList};
use crate::matching::scoring::ScoreMatrix;

/// Result of solving one assignment problem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    /// Number of assignment pairs with score 1; always `matches.len()`
    pub best_score: usize,
    /// Overlapping pairs, ordered by Other index
    pub matches: MatchList,
}

/// Solve the assignment problem and keep only true overlaps
#[must_use]
pub fn solve(matrix: &ScoreMatrix) -> Assignment {
    let n = matrix.size();
    if n == 0 || matrix.overlapping_pairs() == 0 {
        return Assignment::default();
    }

    let column_owner = hungarian(matrix);

    let mut row_to_column = vec![0usize; n];
    for (column, &row) in column_owner.iter().enumerate() {
        row_to_column[row] = column;
    }

    let matches: MatchList = row_to_column
        .into_iter()
        .enumerate()
        .filter(|&(row, column)| matrix.score(row, column) == 1)
        .map(|(row, column)| Match::from_positions(row, column))
        .collect();

    debug!(
        size = n,
        matched = matches.len(),
        "Solved assignment problem"
    );

    Assignment {
        best_score: matches.len(),
        matches,
    }
}

/// Minimum-cost perfect assignment; returns the row assigned to each column.
///
/// Indices are 1-based internally with slot 0 acting as the virtual source
/// column of each augmentation.
fn hungarian(matrix: &ScoreMatrix) -> Vec<usize> {
    let n = matrix.size();
    let cost = |row: usize, column: usize| 1 - i64::from(matrix.score(row - 1, column - 1));

    let mut row_potential = vec![0i64; n + 1];
    let mut column_potential = vec![0i64; n + 1];
    // owner[j] = row currently assigned to column j (0 = unassigned)
    let mut owner = vec![0usize; n + 1];
    let mut previous = vec![0usize; n + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut current_column = 0usize;
        let mut min_slack = vec![i64::MAX; n + 1];
        let mut visited = vec![false; n + 1];

        loop {
            visited[current_column] = true;
            let current_row = owner[current_column];
            let mut delta = i64::MAX;
            let mut next_column = 0usize;

            for column in 1..=n {
                if visited[column] {
                    continue;
                }
                let slack =
                    cost(current_row, column) - row_potential[current_row] - column_potential[column];
                if slack < min_slack[column] {
                    min_slack[column] = slack;
                    previous[column] = current_column;
                }
                if min_slack[column] < delta {
                    delta = min_slack[column];
                    next_column = column;
                }
            }

            for column in 0..=n {
                if visited[column] {
                    row_potential[owner[column]] += delta;
                    column_potential[column] -= delta;
                } else {
                    min_slack[column] -= delta;
                }
            }

            current_column = next_column;
            if owner[current_column] == 0 {
                break;
            }
        }

        // Flip the augmenting path back to the source
        loop {
            let prior = previous[current_column];
            owner[current_column] = owner[prior];
            current_column = prior;
            if current_column == 0 {
                break;
            }
        }
    }

    owner[1..].iter().map(|&row| row - 1).collect()
}
