//! Solvability pre-check by inversion parity.
//!
//! On a board with an odd column count every move keeps the parity of the
//! inversion count (blank excluded), so two boards whose parities differ can
//! never reach each other. Even column counts need the blank row too, which
//! this check does not model; it answers "undecided" for them.

use crate::puzzle::{Puzzle, PuzzleError};

/// Number of pairs `i < j` with `values[i] > values[j]`.
///
/// Merge sort, `O(n log n)`. Equal values are not counted.
#[must_use]
pub fn count_reverse_pairs(values: &[i32]) -> u64 {
    let mut work = values.to_vec();
    let mut scratch = vec![0; values.len()];
    sort_counting(&mut work, &mut scratch)
}

fn sort_counting(values: &mut [i32], scratch: &mut [i32]) -> u64 {
    if values.len() < 2 {
        return 0;
    }
    let middle = values.len() / 2;
    let mut inversions = {
        let (left, right) = values.split_at_mut(middle);
        sort_counting(left, &mut scratch[..middle]) + sort_counting(right, &mut scratch[middle..])
    };

    let (mut i, mut j) = (0, middle);
    for slot in scratch.iter_mut().take(values.len()) {
        if j == values.len() || (i < middle && values[i] <= values[j]) {
            // Every right-half element already emitted is smaller than values[i].
            inversions += (j - middle) as u64;
            *slot = values[i];
            i += 1;
        } else {
            *slot = values[j];
            j += 1;
        }
    }
    values.copy_from_slice(&scratch[..values.len()]);
    inversions
}

/// Whether `destination` can be reached from `source`.
///
/// `Ok(None)` when the column count is even (undecided).
///
/// # Errors
///
/// [`PuzzleError::ShapeMismatch`] or [`PuzzleError::TileMismatch`] when the
/// boards are not permutations of each other.
pub fn reachable(source: &Puzzle, destination: &Puzzle) -> Result<Option<bool>, PuzzleError> {
    if source.shape() != destination.shape() {
        return Err(PuzzleError::ShapeMismatch {
            left: source.shape(),
            right: destination.shape(),
        });
    }
    let mut a = source.tiles().to_vec();
    let mut b = destination.tiles().to_vec();
    a.sort_unstable();
    b.sort_unstable();
    if a != b {
        return Err(PuzzleError::TileMismatch);
    }
    if source.columns() % 2 == 0 {
        return Ok(None);
    }
    let src = count_reverse_pairs(&source.to_vec(false)) % 2;
    let dst = count_reverse_pairs(&destination.to_vec(false)) % 2;
    Ok(Some(src == dst))
}
