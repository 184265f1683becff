//! Puzzle heuristics and the name → function registry.
//!
//! | Name                | Estimate                                            |
//! |---------------------|-----------------------------------------------------|
//! | `manhattan`         | `abs(dr) + abs(dc)` between blank positions         |
//! | `euclidean`         | `round(sqrt(dr² + dc²))` between blank positions    |
//! | `malposed_count`    | `max(0, differing tiles - 1)`                       |
//! | `diagonal_distance` | piecewise on blank offsets (see [`diagonal_distance`]) |
//!
//! Only blank-position distances and the malposed count are provided; none of
//! them is guaranteed admissible for every board, so paths found with them
//! are not guaranteed shortest.

use std::collections::BTreeMap;
use std::fmt;

use crate::puzzle::Puzzle;

/// Signature shared by every registered heuristic.
pub type HeuristicFn = fn(&Puzzle, &Puzzle) -> i64;

fn blank_offset(src: &Puzzle, dst: &Puzzle) -> (i64, i64) {
    let (sr, sc) = src.blank();
    let (dr, dc) = dst.blank();
    (sr.abs_diff(dr) as i64, sc.abs_diff(dc) as i64)
}

#[must_use]
pub fn manhattan(src: &Puzzle, dst: &Puzzle) -> i64 {
    let (dr, dc) = blank_offset(src, dst);
    dr + dc
}

#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn euclidean(src: &Puzzle, dst: &Puzzle) -> i64 {
    let (dr, dc) = blank_offset(src, dst);
    ((dr * dr + dc * dc) as f64).sqrt().round() as i64
}

/// Tiles that differ, minus one for the blank; never negative.
#[must_use]
pub fn malposed_count(src: &Puzzle, dst: &Puzzle) -> i64 {
    let differing = src
        .tiles()
        .iter()
        .zip(dst.tiles())
        .filter(|(a, b)| a != b)
        .count() as i64;
    (differing - 1).max(0)
}

/// Row offset 2 → 2; same row → column offset; same column → 1; otherwise
/// the column offset.
#[must_use]
pub fn diagonal_distance(src: &Puzzle, dst: &Puzzle) -> i64 {
    match blank_offset(src, dst) {
        (2, _) => 2,
        (0, dc) => dc,
        (_, 0) => 1,
        (_, dc) => dc,
    }
}

/// Unknown heuristic name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown heuristic {name:?} (known: {known})")]
pub struct UnknownHeuristic {
    pub name: String,
    /// Comma-separated registered names.
    pub known: String,
}

/// Explicit name → heuristic table.
#[derive(Clone)]
pub struct HeuristicRegistry {
    entries: BTreeMap<String, HeuristicFn>,
}

impl fmt::Debug for HeuristicRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl HeuristicRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registry holding the four built-in heuristics.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("manhattan", manhattan);
        registry.register("euclidean", euclidean);
        registry.register("malposed_count", malposed_count);
        registry.register("diagonal_distance", diagonal_distance);
        registry
    }

    /// Add or replace `name`.
    pub fn register(&mut self, name: &str, heuristic: HeuristicFn) {
        self.entries.insert(name.to_string(), heuristic);
    }

    /// Look up `name`.
    ///
    /// # Errors
    ///
    /// [`UnknownHeuristic`] listing the registered names.
    pub fn get(&self, name: &str) -> Result<HeuristicFn, UnknownHeuristic> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| UnknownHeuristic {
                name: name.to_string(),
                known: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for HeuristicRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
