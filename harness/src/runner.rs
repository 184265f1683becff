//! Runner: one config in, one solved (or unreachable) report out.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig::validate() → heuristic lookup → parity pre-check
//!   → AStar::run() → SearchTreeExport → digest
//! ```

use std::path::Path;

use tracing::info;

use waypoint_kernel::proof::canon::CanonError;
use waypoint_kernel::proof::hash::ContentHash;
use waypoint_search::{AStar, ExportError, SearchError, SearchStats, SearchTreeExport};

use crate::artifact::{write_report_dir, ArtifactError};
use crate::config::{ConfigError, RunConfig};
use crate::heuristics::{HeuristicRegistry, UnknownHeuristic};
use crate::parity::reachable;
use crate::puzzle::{Puzzle, PuzzleError};

/// Error during a run. "No path" is not an error; see [`SolveOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
    #[error(transparent)]
    Heuristic(#[from] UnknownHeuristic),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Canon(#[from] CanonError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Why no path was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableReason {
    /// Inversion parities differ; the search never ran.
    Parity,
    /// The search exhausted every reachable board.
    Exhausted,
}

#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Solved(PuzzleReport),
    Unreachable(UnreachableReason),
}

/// A solved run.
#[derive(Debug, Clone)]
pub struct PuzzleReport {
    pub heuristic: String,
    /// Moves on the returned path.
    pub steps: i64,
    /// Boards from source to destination, both inclusive.
    pub path: Vec<Puzzle>,
    pub stats: SearchStats,
    pub export: SearchTreeExport,
    /// Content address of `export`.
    pub digest: ContentHash,
}

/// Compact one-line board label: rows joined by `/`.
#[must_use]
pub fn board_label(puzzle: &Puzzle) -> String {
    puzzle
        .to_rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Solve with the built-in heuristics.
///
/// # Errors
///
/// See [`solve_with`].
pub fn solve(config: &RunConfig) -> Result<SolveOutcome, RunError> {
    solve_with(config, &HeuristicRegistry::builtin())
}

/// Solve, resolving the heuristic name in `registry`.
///
/// # Errors
///
/// - [`RunError::Config`] for an invalid board or shape mismatch.
/// - [`RunError::Heuristic`] for an unknown heuristic name.
/// - [`RunError::Puzzle`] when the boards hold different tiles.
/// - [`RunError::Search`], [`RunError::Export`], [`RunError::Canon`] from
///   the engine and the export.
pub fn solve_with(config: &RunConfig, registry: &HeuristicRegistry) -> Result<SolveOutcome, RunError> {
    let (source, destination) = config.validate()?;
    let heuristic = registry.get(&config.heuristic)?;
    let (rows, columns) = source.shape();
    info!(
        rows,
        columns,
        heuristic = %config.heuristic,
        stop_on_discovery = config.stop_on_discovery,
        "solve"
    );

    if reachable(&source, &destination)? == Some(false) {
        info!("inversion parity differs, skipping search");
        return Ok(SolveOutcome::Unreachable(UnreachableReason::Parity));
    }

    let mut searcher = AStar::with_policy(source, config.policy());
    let Some(outcome) = searcher.run(Some(&destination), &Puzzle::successors, &heuristic)? else {
        return Ok(SolveOutcome::Unreachable(UnreachableReason::Exhausted));
    };

    let export = SearchTreeExport::from_outcome(&outcome, board_label)?;
    let digest = export.digest()?;
    info!(steps = outcome.cost, digest = %digest, "solved");

    Ok(SolveOutcome::Solved(PuzzleReport {
        heuristic: config.heuristic.clone(),
        steps: outcome.cost,
        path: outcome.path,
        stats: outcome.stats,
        export,
        digest,
    }))
}

/// Load a config from `config_path`, solve it, and write the report into
/// `out_dir` when a path is found. Nothing is written for an unreachable pair.
///
/// # Errors
///
/// As for [`solve`], plus [`RunError::Artifact`] if the report cannot be
/// written.
pub fn solve_to_dir(config_path: &Path, out_dir: &Path) -> Result<SolveOutcome, RunError> {
    let config = RunConfig::from_path(config_path)?;
    let outcome = solve(&config)?;
    if let SolveOutcome::Solved(report) = &outcome {
        write_report_dir(out_dir, report)?;
        info!(dir = %out_dir.display(), "report written");
    }
    Ok(outcome)
}
