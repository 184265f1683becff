//! Sliding-tile puzzle: a rows × columns board with one blank.
//!
//! The blank is the first tile (row-major) whose value is `<= 0`. Moves are
//! named after the direction the blank travels.

use std::fmt;
use std::str::FromStr;

/// Direction the blank moves in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Successor enumeration order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Invalid board or move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("puzzle has no tiles")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("no blank tile (value <= 0) provided")]
    NoBlank,
    #[error("blank is on the border, cannot move {direction}")]
    OnBorder { direction: Direction },
    #[error("puzzles differ in shape: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("puzzles contain different tiles")]
    TileMismatch,
    #[error("line {line}: {detail}")]
    Parse { line: usize, detail: String },
}

/// Board state. Equality and hashing cover shape and every tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Puzzle {
    rows: usize,
    columns: usize,
    tiles: Vec<i32>,
    blank: usize,
}

impl Puzzle {
    /// Build from row arrays.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::Empty`], [`PuzzleError::Ragged`] or
    /// [`PuzzleError::NoBlank`].
    pub fn from_rows(rows: &[Vec<i32>]) -> Result<Self, PuzzleError> {
        let columns = rows.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(PuzzleError::Empty);
        }
        let mut tiles = Vec::with_capacity(rows.len() * columns);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != columns {
                return Err(PuzzleError::Ragged {
                    row,
                    expected: columns,
                    found: values.len(),
                });
            }
            tiles.extend_from_slice(values);
        }
        let blank = tiles
            .iter()
            .position(|&t| t <= 0)
            .ok_or(PuzzleError::NoBlank)?;
        Ok(Self {
            rows: rows.len(),
            columns,
            tiles,
            blank,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Blank position as `(row, column)`.
    #[must_use]
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.columns, self.blank % self.columns)
    }

    /// Tile at `(row, column)`, if in range.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<i32> {
        if row < self.rows && column < self.columns {
            Some(self.tiles[row * self.columns + column])
        } else {
            None
        }
    }

    /// All tiles, row-major.
    #[must_use]
    pub fn tiles(&self) -> &[i32] {
        &self.tiles
    }

    /// Row-major tiles, with or without the blank.
    #[must_use]
    pub fn to_vec(&self, include_blank: bool) -> Vec<i32> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(i, _)| include_blank || i != self.blank)
            .map(|(_, &t)| t)
            .collect()
    }

    /// Row arrays, the inverse of [`Puzzle::from_rows`].
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.tiles.chunks(self.columns).map(<[i32]>::to_vec).collect()
    }

    /// New board with the blank moved one step.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::OnBorder`] if the blank would leave the board.
    pub fn move_blank(&self, direction: Direction) -> Result<Self, PuzzleError> {
        let (row, column) = self.blank();
        let (dr, dc) = direction.delta();
        let target = row
            .checked_add_signed(dr)
            .zip(column.checked_add_signed(dc))
            .filter(|&(r, c)| r < self.rows && c < self.columns)
            .ok_or(PuzzleError::OnBorder { direction })?;
        let target = target.0 * self.columns + target.1;
        let mut next = self.clone();
        next.tiles.swap(self.blank, target);
        next.blank = target;
        Ok(next)
    }

    /// Every legal move with unit cost, in [`Direction::ALL`] order.
    #[must_use]
    pub fn successors(&self) -> Vec<(Puzzle, i64)> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.move_blank(d).ok())
            .map(|p| (p, 1))
            .collect()
    }
}

impl fmt::Display for Puzzle {
    /// Right-aligned to the widest tile, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .tiles
            .iter()
            .map(|t| t.to_string().len())
            .max()
            .unwrap_or(1);
        for row in self.tiles.chunks(self.columns) {
            for tile in row {
                write!(f, "{tile:>width$} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Puzzle {
    type Err = PuzzleError;

    /// One row per non-empty line, tiles separated by whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (line_no, line) in s.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<i32>().map_err(|e| PuzzleError::Parse {
                        line: line_no + 1,
                        detail: format!("{tok:?}: {e}"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }
}
