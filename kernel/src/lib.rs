//! Waypoint Kernel: the structural core underneath the search engine.
//!
//! # API Surface
//!
//! - [`tree::Tree`] -- arena of nodes with lazily cached size, height and depth,
//!   re-parenting, ancestry and lowest-common-ancestor queries
//! - [`proof::canon::canonical_json_bytes`] -- deterministic JSON for hashed artifacts
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashes
//!
//! # Module Dependency Direction
//!
//! `tree` and `proof` are independent of each other. Neither depends on any
//! other workspace crate.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
pub mod tree;
