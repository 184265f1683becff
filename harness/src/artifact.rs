//! Report directory persistence: write and verify a solved run on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   search_tree.json   -- canonical JSON, the SearchTreeExport
//!   path.json          -- canonical JSON, heuristic + steps + boards on the path
//!   digest.txt         -- ASCII digest of search_tree.json (e.g. "sha256:...")
//! ```
//!
//! # Fail-closed verification
//!
//! - Missing file → error
//! - Extra file → error
//! - Non-canonical JSON → error
//! - Digest mismatch → error
//! - `path.json` disagreeing with the tree metadata → error

use std::collections::BTreeSet;
use std::path::Path;

use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash};
use waypoint_search::graph::DOMAIN_SEARCH_TREE;

use crate::runner::PuzzleReport;

pub const TREE_FILENAME: &str = "search_tree.json";
pub const PATH_FILENAME: &str = "path.json";
pub const DIGEST_FILENAME: &str = "digest.txt";

const REPORT_FILENAMES: &[&str] = &[TREE_FILENAME, PATH_FILENAME, DIGEST_FILENAME];

/// Error writing or verifying a report directory.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("I/O error: {detail}")]
    Io { detail: String },
    #[error(transparent)]
    Canon(#[from] CanonError),
    #[error("missing file: {name}")]
    MissingFile { name: String },
    #[error("undeclared extra file: {name}")]
    ExtraFile { name: String },
    #[error("{name} is not canonical JSON")]
    NonCanonical { name: String },
    #[error("digest mismatch: stored={stored}, recomputed={recomputed}")]
    DigestMismatch { stored: String, recomputed: String },
    #[error("path.json disagrees with search tree: {detail}")]
    PathMismatch { detail: String },
}

fn path_json(report: &PuzzleReport) -> serde_json::Value {
    serde_json::json!({
        "heuristic": report.heuristic,
        "path": report.path.iter().map(crate::puzzle::Puzzle::to_rows).collect::<Vec<_>>(),
        "steps": report.steps,
    })
}

/// Write `report` into `dir`, creating it if needed.
///
/// # Errors
///
/// [`ArtifactError::Io`] or [`ArtifactError::Canon`].
pub fn write_report_dir(dir: &Path, report: &PuzzleReport) -> Result<(), ArtifactError> {
    std::fs::create_dir_all(dir).map_err(|e| ArtifactError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    let tree = report.export.to_canonical_json_bytes()?;
    let path = canonical_json_bytes(&path_json(report))?;

    write_atomic(&dir.join(TREE_FILENAME), &tree)?;
    write_atomic(&dir.join(PATH_FILENAME), &path)?;
    write_atomic(&dir.join(DIGEST_FILENAME), report.digest.as_str().as_bytes())?;
    Ok(())
}

/// Re-check a report directory from disk alone.
///
/// Returns the verified digest.
///
/// # Errors
///
/// Any [`ArtifactError`] listed in the module docs.
pub fn verify_report_dir(dir: &Path) -> Result<ContentHash, ArtifactError> {
    let present = list_files(dir)?;
    for name in REPORT_FILENAMES {
        if !present.contains(*name) {
            return Err(ArtifactError::MissingFile {
                name: (*name).to_string(),
            });
        }
    }
    if let Some(extra) = present.iter().find(|n| !REPORT_FILENAMES.contains(&n.as_str())) {
        return Err(ArtifactError::ExtraFile {
            name: extra.clone(),
        });
    }

    let tree_bytes = read_file(dir, TREE_FILENAME)?;
    let tree = read_canonical(TREE_FILENAME, &tree_bytes)?;

    let recomputed = canonical_hash(DOMAIN_SEARCH_TREE, &tree_bytes);
    let stored = String::from_utf8_lossy(&read_file(dir, DIGEST_FILENAME)?)
        .trim()
        .to_string();
    if recomputed.as_str() != stored {
        return Err(ArtifactError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    let path = read_canonical(PATH_FILENAME, &read_file(dir, PATH_FILENAME)?)?;
    let boards = path["path"].as_array().map_or(0, Vec::len) as u64;
    if Some(boards) != tree["metadata"]["path_len"].as_u64() {
        return Err(ArtifactError::PathMismatch {
            detail: format!("{boards} boards vs path_len {}", tree["metadata"]["path_len"]),
        });
    }
    if path["steps"] != tree["metadata"]["path_cost"] {
        return Err(ArtifactError::PathMismatch {
            detail: format!(
                "steps {} vs path_cost {}",
                path["steps"], tree["metadata"]["path_cost"]
            ),
        });
    }

    Ok(recomputed)
}

fn read_canonical(name: &str, bytes: &[u8]) -> Result<serde_json::Value, ArtifactError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|_| ArtifactError::NonCanonical {
            name: name.to_string(),
        })?;
    if canonical_json_bytes(&value)? != bytes {
        return Err(ArtifactError::NonCanonical {
            name: name.to_string(),
        });
    }
    Ok(value)
}

/// Write via temp file + rename in the same directory.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ArtifactError> {
    let dir = path.parent().ok_or_else(|| ArtifactError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_path = dir.join(format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));
    std::fs::write(&temp_path, content).map_err(|e| ArtifactError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ArtifactError::Io {
        detail: format!("rename {} → {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_file(dir: &Path, name: &str) -> Result<Vec<u8>, ArtifactError> {
    std::fs::read(dir.join(name)).map_err(|_| ArtifactError::MissingFile {
        name: name.to_string(),
    })
}

/// Regular files in `dir`, skipping leftover temp files.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, ArtifactError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ArtifactError::Io {
        detail: format!("read_dir: {e}"),
    })?;
    let mut files = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| ArtifactError::Io {
            detail: format!("dir entry: {e}"),
        })?;
        let is_file = entry.file_type().map_err(|e| ArtifactError::Io {
            detail: format!("file_type: {e}"),
        })?;
        if !is_file.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with(".tmp_") {
                files.insert(name.to_string());
            }
        }
    }
    Ok(files)
}
