//! Waypoint Search: A* over a lazily described state graph.
//!
//! The engine records every discovered state as a node of a
//! [`waypoint_kernel::tree::Tree`]; relaxation re-parents nodes in place and
//! pushes cost improvements down their subtrees.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_kernel  ←  waypoint_search  ←  waypoint_harness
//! (tree, hashing)     (open set, engine)   (puzzle, runner, artifacts)
//! ```
//!
//! # Key types
//!
//! - [`AStar`] -- reusable searcher with status and last path
//! - [`Transition`] / [`Heuristic`] -- domain seams, implemented by closures
//! - [`OpenSet`] -- indexed binary heap with in-place priority updates
//! - [`SearchOutcome`] -- cost, path and the whole search tree
//! - [`SearchTreeExport`] -- canonical, content-addressed tree snapshot

#![forbid(unsafe_code)]

pub mod contract;
pub mod cost;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod policy;
pub mod search;
pub mod visited;

pub use contract::{Heuristic, Transition, ZeroHeuristic};
pub use cost::Cost;
pub use error::SearchError;
pub use frontier::OpenSet;
pub use graph::{ExportError, SearchTreeExport};
pub use node::{FrontierKey, HeuristicNode};
pub use policy::{SearchPolicyV1, TerminationV1};
pub use search::{astar, AStar, SearchOutcome, SearchStats, SearchStatus};
pub use visited::VisitedIndex;
