//! Shared helpers for waypoint benchmark suites.

#![forbid(unsafe_code)]

use waypoint_harness::puzzle::{Direction, Puzzle};
use waypoint_kernel::tree::{NodeId, Tree};

/// A single path `0 → 1 → … → n-1`.
///
/// # Panics
///
/// Panics if the arena rejects an insert. Benchmark setup failures are fatal.
#[must_use]
pub fn chain(n: usize) -> (Tree<usize>, Vec<NodeId>) {
    let mut tree = Tree::with_capacity(n);
    let mut ids = Vec::with_capacity(n);
    let mut parent = None;
    for i in 0..n {
        let id = tree.insert(i, parent).expect("insert");
        ids.push(id);
        parent = Some(id);
    }
    (tree, ids)
}

/// Complete tree where node `i` hangs under `(i - 1) / fanout`.
///
/// # Panics
///
/// Panics if the arena rejects an insert.
#[must_use]
pub fn bushy(n: usize, fanout: usize) -> (Tree<usize>, Vec<NodeId>) {
    let mut tree = Tree::with_capacity(n);
    let mut ids: Vec<NodeId> = Vec::with_capacity(n);
    for i in 0..n {
        let parent = (i > 0).then(|| ids[(i - 1) / fanout]);
        ids.push(tree.insert(i, parent).expect("insert"));
    }
    (tree, ids)
}

/// Open `width × height` grid, 4-neighbour moves of cost 1, with a wall
/// down column `width / 2` that leaves one gap at the bottom row.
#[must_use]
pub fn walled_grid(width: i32, height: i32) -> impl Fn(&(i32, i32)) -> Vec<((i32, i32), i64)> {
    move |&(x, y): &(i32, i32)| {
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .map(|(dx, dy)| (x + dx, y + dy))
            .filter(|&(nx, ny)| nx >= 0 && ny >= 0 && nx < width && ny < height)
            .filter(|&(nx, ny)| nx != width / 2 || ny == height - 1)
            .map(|p| (p, 1))
            .collect()
    }
}

/// Manhattan distance on grid coordinates.
#[must_use]
pub fn grid_manhattan(a: &(i32, i32), b: &(i32, i32)) -> i64 {
    i64::from((a.0 - b.0).abs() + (a.1 - b.1).abs())
}

/// Solved 3×3 board.
///
/// # Panics
///
/// Never for the fixed layout.
#[must_use]
pub fn goal_board() -> Puzzle {
    Puzzle::from_rows(&[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 0]]).expect("goal")
}

/// Goal board with `moves` applied, skipping moves that hit the border.
#[must_use]
pub fn scrambled_board(moves: &[Direction]) -> Puzzle {
    moves.iter().fold(goal_board(), |board, &d| {
        board.move_blank(d).unwrap_or(board)
    })
}
