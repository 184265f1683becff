//! Function-shaped seams between the engine and a search domain.

use crate::cost::Cost;

/// Lazy description of the state graph.
///
/// # Contract
///
/// - Pure and terminating: the engine may call it more than once for the same
///   state (relaxation re-derives child costs from it).
/// - Deterministic order: same state → same successors in the same order.
///   Tie-breaking in the open set follows discovery order, so a reordered
///   enumeration can change which of several equal-cost paths is returned.
/// - Negative step costs are accepted, but closing a cycle whose total is
///   negative aborts the run with [`crate::error::SearchError::NegativeCycle`].
pub trait Transition<S, C> {
    /// Every `(next_state, step_cost)` reachable from `state` in one step.
    fn successors(&self, state: &S) -> Vec<(S, C)>;
}

impl<S, C, F, I> Transition<S, C> for F
where
    F: Fn(&S) -> I,
    I: IntoIterator<Item = (S, C)>,
{
    fn successors(&self, state: &S) -> Vec<(S, C)> {
        self(state).into_iter().collect()
    }
}

/// Estimate of the remaining cost from a state to the destination.
///
/// The engine does not check admissibility. The returned path is optimal only
/// if the estimate never overestimates and is consistent
/// (`h(u) <= step(u, v) + h(v)`); that is the caller's obligation.
pub trait Heuristic<S, C> {
    fn estimate(&self, state: &S, destination: &S) -> C;
}

impl<S, C, F> Heuristic<S, C> for F
where
    F: Fn(&S, &S) -> C,
{
    fn estimate(&self, state: &S, destination: &S) -> C {
        self(state, destination)
    }
}

/// Heuristic that always returns zero: plain uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<S, C: Cost> Heuristic<S, C> for ZeroHeuristic {
    fn estimate(&self, _state: &S, _destination: &S) -> C {
        C::zero()
    }
}
