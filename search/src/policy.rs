//! Search policy types.

/// When a run stops after reaching its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminationV1 {
    /// Stop when the goal node is popped from the open set, before it is
    /// expanded.
    ///
    /// With a consistent heuristic the goal's cost is final at that point, so
    /// the returned path is optimal.
    #[default]
    OnExpansion,
    /// Stop once the goal has been discovered, checked after all successors
    /// of the popped node have been processed.
    ///
    /// Cheaper, but the goal's cost may still be improvable. In predicate
    /// mode the earliest-created match wins.
    OnDiscovery,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchPolicyV1 {
    pub termination: TerminationV1,
}

impl SearchPolicyV1 {
    /// Policy that stops on first discovery of the goal.
    #[must_use]
    pub fn stop_on_discovery() -> Self {
        Self {
            termination: TerminationV1::OnDiscovery,
        }
    }
}
