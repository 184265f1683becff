//! `SearchTreeExport`: renderer-facing snapshot of a finished search tree.
//!
//! One summary per discovered node, sorted by `node_id`, plus run metadata.
//! Serialized to canonical JSON and content-addressed, so two runs over the
//! same inputs produce byte-identical artifacts.

use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash};

use crate::cost::Cost;
use crate::search::SearchOutcome;

/// Domain prefix for search tree content hashing.
pub const DOMAIN_SEARCH_TREE: &[u8] = b"WAYPOINT::SEARCH_TREE::V1\0";

/// Failure to build or serialize an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A cost does not fit the `i64` wire representation.
    #[error("cost of node {node_id} does not fit in i64")]
    CostOutOfRange { node_id: u32 },

    #[error(transparent)]
    Canon(#[from] CanonError),
}

/// The exported tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTreeExport {
    /// Sorted by `node_id` ascending.
    pub nodes: Vec<NodeSummary>,
    pub metadata: ExportMetadata,
}

/// Per-node view for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    pub node_id: u32,
    pub parent_id: Option<u32>,
    pub depth: u64,
    /// Cost from the source along the final tree edges.
    pub cost: i64,
    pub estimate: i64,
    /// `cost - parent.cost`; `None` for the root.
    pub edge_cost: Option<i64>,
    /// Caller-supplied rendering of the state.
    pub label: String,
    /// Whether the node lies on the returned path.
    pub on_path: bool,
}

/// Run-level facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMetadata {
    pub root_id: u32,
    pub goal_id: u32,
    pub path_cost: i64,
    pub path_len: u64,
    pub expansions: u64,
    pub nodes_created: u64,
    pub relaxations: u64,
    pub propagated_updates: u64,
    pub open_high_water: u64,
}

fn to_i64<C>(value: C, node_id: u32) -> Result<i64, ExportError>
where
    i64: TryFrom<C>,
{
    i64::try_from(value).map_err(|_| ExportError::CostOutOfRange { node_id })
}

impl SearchTreeExport {
    /// Build the export from a finished run, labelling states with `label`.
    ///
    /// # Errors
    ///
    /// [`ExportError::CostOutOfRange`] if a cost or estimate does not fit
    /// in `i64`.
    pub fn from_outcome<S, C, L>(outcome: &SearchOutcome<S, C>, label: L) -> Result<Self, ExportError>
    where
        C: Cost,
        i64: TryFrom<C>,
        L: Fn(&S) -> String,
    {
        let tree = &outcome.tree;
        let path = outcome.path_nodes();
        let mut on_path = vec![false; tree.len()];
        for id in &path {
            on_path[id.index()] = true;
        }

        let mut nodes = Vec::with_capacity(tree.len());
        for id in tree.ids() {
            let node = &tree[id];
            let node_id = id.as_u32();
            let parent = tree.parent(id);
            let edge_cost = match parent {
                Some(p) => Some(to_i64(node.cost - tree[p].cost, node_id)?),
                None => None,
            };
            nodes.push(NodeSummary {
                node_id,
                parent_id: parent.map(|p| p.as_u32()),
                depth: tree.depth(id) as u64,
                cost: to_i64(node.cost, node_id)?,
                estimate: to_i64(node.estimate, node_id)?,
                edge_cost,
                label: label(&node.state),
                on_path: on_path[id.index()],
            });
        }

        let stats = outcome.stats;
        Ok(Self {
            nodes,
            metadata: ExportMetadata {
                root_id: outcome.root.as_u32(),
                goal_id: outcome.goal.as_u32(),
                path_cost: to_i64(outcome.cost, outcome.goal.as_u32())?,
                path_len: path.len() as u64,
                expansions: stats.expansions,
                nodes_created: stats.nodes_created,
                relaxations: stats.relaxations,
                propagated_updates: stats.propagated_updates,
                open_high_water: stats.open_high_water,
            },
        })
    }

    /// Serialize to canonical JSON bytes (sorted keys, compact, integers only).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content address of the canonical bytes under [`DOMAIN_SEARCH_TREE`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_TREE, &bytes))
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "metadata": metadata_to_json(&self.metadata),
            "nodes": self.nodes.iter().map(node_to_json).collect::<Vec<_>>(),
        })
    }
}

fn node_to_json(n: &NodeSummary) -> serde_json::Value {
    serde_json::json!({
        "cost": n.cost,
        "depth": n.depth,
        "edge_cost": n.edge_cost,
        "estimate": n.estimate,
        "label": n.label,
        "node_id": n.node_id,
        "on_path": n.on_path,
        "parent_id": n.parent_id,
    })
}

fn metadata_to_json(m: &ExportMetadata) -> serde_json::Value {
    serde_json::json!({
        "expansions": m.expansions,
        "goal_id": m.goal_id,
        "nodes_created": m.nodes_created,
        "open_high_water": m.open_high_water,
        "path_cost": m.path_cost,
        "path_len": m.path_len,
        "propagated_updates": m.propagated_updates,
        "relaxations": m.relaxations,
        "root_id": m.root_id,
    })
}
