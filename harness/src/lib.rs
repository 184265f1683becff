//! Waypoint Harness: sliding-tile puzzles driven through the A* engine.
//!
//! The harness owns the puzzle domain (boards, moves, parity, heuristics),
//! run configuration and on-disk reports. Search logic lives in
//! `waypoint_search`; hashing and canonical JSON in `waypoint_kernel`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod artifact;
pub mod config;
pub mod heuristics;
pub mod parity;
pub mod puzzle;
pub mod runner;

pub use config::RunConfig;
pub use puzzle::{Direction, Puzzle, PuzzleError};
pub use runner::{solve, solve_to_dir, PuzzleReport, RunError, SolveOutcome, UnreachableReason};
