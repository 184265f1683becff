//! Canonical JSON bytes for hashed artifacts.
//!
//! # Rules
//!
//! 1. Object keys sorted lexicographically (byte order).
//! 2. Compact form, no whitespace.
//! 3. Numbers must be integers; floats are rejected so output never depends on
//!    float formatting.
//!
//! Key order relies on `serde_json::Map` being a `BTreeMap`, i.e. on the
//! `preserve_order` feature staying off in this workspace.

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A JSON number was not an integer.
    #[error("non-integer number in canonical JSON at {path}: {raw}")]
    NonIntegerNumber { path: String, raw: String },
    /// Serialization itself failed.
    #[error("canonical JSON serialization failed: {detail}")]
    Serialize { detail: String },
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] naming the JSON path of the first
/// float encountered.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    reject_floats(value)?;
    serde_json::to_vec(value).map_err(|e| CanonError::Serialize {
        detail: e.to_string(),
    })
}

fn reject_floats(root: &serde_json::Value) -> Result<(), CanonError> {
    let mut stack = vec![(String::from("$"), root)];
    while let Some((path, value)) = stack.pop() {
        match value {
            serde_json::Value::Number(n) if !(n.is_i64() || n.is_u64()) => {
                return Err(CanonError::NonIntegerNumber {
                    path,
                    raw: n.to_string(),
                });
            }
            serde_json::Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    stack.push((format!("{path}[{i}]"), item));
                }
            }
            serde_json::Value::Object(map) => {
                for (key, item) in map {
                    stack.push((format!("{path}.{key}"), item));
                }
            }
            _ => {}
        }
    }
    Ok(())
}
