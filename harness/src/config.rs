//! `RunConfig`: JSON description of one puzzle run.
//!
//! ```json
//! {
//!   "source":      [[1, 2, 3], [4, 0, 6], [7, 5, 8]],
//!   "destination": [[1, 2, 3], [4, 5, 6], [7, 8, 0]],
//!   "heuristic":   "manhattan",
//!   "stop_on_discovery": false
//! }
//! ```
//!
//! `heuristic` and `stop_on_discovery` are optional. Unknown fields are
//! rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};
use waypoint_search::SearchPolicyV1;

use crate::puzzle::{Puzzle, PuzzleError};

/// Heuristic used when the config names none.
pub const DEFAULT_HEURISTIC: &str = "manhattan";

fn default_heuristic() -> String {
    DEFAULT_HEURISTIC.to_string()
}

/// Invalid or unreadable config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read {path}: {detail}")]
    Io { path: String, detail: String },
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{which} board: {source}")]
    Board {
        which: &'static str,
        #[source]
        source: PuzzleError,
    },
    #[error("source is {source_shape:?} but destination is {destination_shape:?}")]
    ShapeMismatch {
        source_shape: (usize, usize),
        destination_shape: (usize, usize),
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub source: Vec<Vec<i32>>,
    pub destination: Vec<Vec<i32>>,
    #[serde(default = "default_heuristic")]
    pub heuristic: String,
    /// Stop as soon as the destination is discovered instead of expanded.
    #[serde(default)]
    pub stop_on_discovery: bool,
}

impl RunConfig {
    /// Config with the default heuristic and termination.
    #[must_use]
    pub fn new(source: Vec<Vec<i32>>, destination: Vec<Vec<i32>>) -> Self {
        Self {
            source,
            destination,
            heuristic: default_heuristic(),
            stop_on_discovery: false,
        }
    }

    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed JSON or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`RunConfig::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// Build both boards and check they share a shape.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Board`] for an invalid board,
    /// [`ConfigError::ShapeMismatch`] if the shapes differ.
    pub fn validate(&self) -> Result<(Puzzle, Puzzle), ConfigError> {
        let source = Puzzle::from_rows(&self.source).map_err(|source| ConfigError::Board {
            which: "source",
            source,
        })?;
        let destination =
            Puzzle::from_rows(&self.destination).map_err(|source| ConfigError::Board {
                which: "destination",
                source,
            })?;
        if source.shape() != destination.shape() {
            return Err(ConfigError::ShapeMismatch {
                source_shape: source.shape(),
                destination_shape: destination.shape(),
            });
        }
        Ok((source, destination))
    }

    #[must_use]
    pub fn policy(&self) -> SearchPolicyV1 {
        if self.stop_on_discovery {
            SearchPolicyV1::stop_on_discovery()
        } else {
            SearchPolicyV1::default()
        }
    }
}
