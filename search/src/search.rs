//! A* entry points and expansion loop.

use std::collections::BTreeMap;
use std::hash::Hash;

use tracing::{debug, info, warn};
use waypoint_kernel::tree::{NodeId, Tree};

use crate::contract::{Heuristic, Transition, ZeroHeuristic};
use crate::cost::Cost;
use crate::error::SearchError;
use crate::frontier::OpenSet;
use crate::node::{FrontierKey, HeuristicNode};
use crate::policy::{SearchPolicyV1, TerminationV1};
use crate::visited::VisitedIndex;

/// Lifecycle of an [`AStar`] searcher.
///
/// `Idle → Running → {Succeeded, Failed}`. Each run operation starts a fresh
/// pass; terminal states only describe the most recent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// No run has started yet.
    Idle,
    /// A run is in progress.
    Running,
    /// The last run reached its goal.
    Succeeded,
    /// The last run exhausted the open set or aborted with an error.
    Failed,
}

/// Counters collected during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the open set, the goal pop included.
    pub expansions: u64,
    /// Distinct states discovered (one tree node each).
    pub nodes_created: u64,
    /// Direct relaxations: a cheaper path found to a known state.
    pub relaxations: u64,
    /// Descendant cost updates triggered by relaxations.
    pub propagated_updates: u64,
    /// Largest open-set size reached.
    pub open_high_water: u64,
}

/// A successful run.
///
/// Owns the whole search tree so renderers can walk it after the run.
#[derive(Debug, Clone)]
pub struct SearchOutcome<S, C> {
    /// Cost of the returned path.
    pub cost: C,
    /// States from source to goal, both inclusive.
    pub path: Vec<S>,
    /// Every node discovered during the run.
    pub tree: Tree<HeuristicNode<S, C>>,
    /// The source node.
    pub root: NodeId,
    /// The goal node.
    pub goal: NodeId,
    pub stats: SearchStats,
}

impl<S, C> SearchOutcome<S, C> {
    /// Node handles along the returned path, source first.
    #[must_use]
    pub fn path_nodes(&self) -> Vec<NodeId> {
        self.tree.path_from_root(self.goal)
    }
}

/// Reusable A* searcher bound to one source state.
///
/// Keeps the last path and status between runs; every run clears the previous
/// path before it starts exploring.
#[derive(Debug, Clone)]
pub struct AStar<S> {
    source: S,
    policy: SearchPolicyV1,
    status: SearchStatus,
    path: Vec<S>,
    last_stats: Option<SearchStats>,
}

impl<S: Clone + Eq + Hash> AStar<S> {
    /// Searcher from `source` with the default policy.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_policy(source, SearchPolicyV1::default())
    }

    #[must_use]
    pub fn with_policy(source: S, policy: SearchPolicyV1) -> Self {
        Self {
            source,
            policy,
            status: SearchStatus::Idle,
            path: Vec::new(),
            last_stats: None,
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replace the source for subsequent runs.
    pub fn set_source(&mut self, source: S) {
        self.source = source;
    }

    #[must_use]
    pub fn policy(&self) -> SearchPolicyV1 {
        self.policy
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Path found by the last successful run (empty otherwise).
    #[must_use]
    pub fn path(&self) -> &[S] {
        &self.path
    }

    /// Counters of the last completed run.
    #[must_use]
    pub fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }

    /// Heuristic search towards a fixed `destination`.
    ///
    /// Returns `Ok(None)` when the destination is unreachable.
    ///
    /// # Errors
    ///
    /// - [`SearchError::MissingDestination`] if `destination` is `None`. Raised
    ///   before anything changes: status and last path are left as they were.
    /// - [`SearchError::NegativeCycle`] if a relaxation would lower the cost of
    ///   the expanding node's own ancestry.
    pub fn run<C, T, H>(
        &mut self,
        destination: Option<&S>,
        transform: &T,
        heuristic: &H,
    ) -> Result<Option<SearchOutcome<S, C>>, SearchError>
    where
        C: Cost,
        T: Transition<S, C>,
        H: Heuristic<S, C>,
    {
        let Some(destination) = destination else {
            return Err(SearchError::MissingDestination);
        };
        self.begin();
        let run = Run {
            transform,
            heuristic: Some((heuristic, destination)),
            goal: Goal::State(destination),
            policy: self.policy,
            tree: Tree::new(),
            open: OpenSet::new(),
            visited: VisitedIndex::new(),
            stats: SearchStats::default(),
            found: None,
        };
        let result = run.execute(self.source.clone());
        self.finish(result)
    }

    /// Uniform-cost search until a state satisfies `is_goal`.
    ///
    /// No heuristic is used: without a fixed target there is nothing to
    /// estimate against. When several discovered states match, the first
    /// one to satisfy the policy's termination check wins.
    ///
    /// # Errors
    ///
    /// [`SearchError::NegativeCycle`] as for [`AStar::run`].
    pub fn run_until<C, T, P>(
        &mut self,
        is_goal: P,
        transform: &T,
    ) -> Result<Option<SearchOutcome<S, C>>, SearchError>
    where
        C: Cost,
        T: Transition<S, C>,
        P: Fn(&S) -> bool,
    {
        self.begin();
        let run: Run<'_, S, C, T, ZeroHeuristic> = Run {
            transform,
            heuristic: None,
            goal: Goal::Predicate(&is_goal),
            policy: self.policy,
            tree: Tree::new(),
            open: OpenSet::new(),
            visited: VisitedIndex::new(),
            stats: SearchStats::default(),
            found: None,
        };
        let result = run.execute(self.source.clone());
        self.finish(result)
    }

    fn begin(&mut self) {
        self.path.clear();
        self.last_stats = None;
        self.status = SearchStatus::Running;
    }

    fn finish<C>(
        &mut self,
        result: Result<Option<SearchOutcome<S, C>>, SearchError>,
    ) -> Result<Option<SearchOutcome<S, C>>, SearchError> {
        self.status = match &result {
            Ok(Some(outcome)) => {
                self.path.clone_from(&outcome.path);
                self.last_stats = Some(outcome.stats);
                SearchStatus::Succeeded
            }
            Ok(None) | Err(_) => SearchStatus::Failed,
        };
        result
    }
}

/// One-shot A* from `source` to `destination` with the default policy.
///
/// # Errors
///
/// [`SearchError::NegativeCycle`] as for [`AStar::run`].
pub fn astar<S, C, T, H>(
    source: S,
    destination: &S,
    transform: &T,
    heuristic: &H,
) -> Result<Option<SearchOutcome<S, C>>, SearchError>
where
    S: Clone + Eq + Hash,
    C: Cost,
    T: Transition<S, C>,
    H: Heuristic<S, C>,
{
    AStar::new(source).run(Some(destination), transform, heuristic)
}

enum Goal<'g, S> {
    State(&'g S),
    Predicate(&'g dyn Fn(&S) -> bool),
}

impl<S: PartialEq> Goal<'_, S> {
    fn matches(&self, state: &S) -> bool {
        match self {
            Self::State(target) => *target == state,
            Self::Predicate(is_goal) => is_goal(state),
        }
    }
}

/// State owned by a single pass. Dropped (or moved into the outcome) when the
/// pass ends, so nothing leaks between runs.
struct Run<'a, S, C, T, H> {
    transform: &'a T,
    heuristic: Option<(&'a H, &'a S)>,
    goal: Goal<'a, S>,
    policy: SearchPolicyV1,
    tree: Tree<HeuristicNode<S, C>>,
    open: OpenSet<C>,
    visited: VisitedIndex<S>,
    stats: SearchStats,
    found: Option<NodeId>,
}

impl<S, C, T, H> Run<'_, S, C, T, H>
where
    S: Clone + Eq + Hash,
    C: Cost,
    T: Transition<S, C>,
    H: Heuristic<S, C>,
{
    fn execute(mut self, source: S) -> Result<Option<SearchOutcome<S, C>>, SearchError> {
        let root = self.discover(source, C::zero(), None)?;

        while let Some((current, key)) = self.open.pop_min() {
            self.stats.expansions += 1;
            debug!(
                node = %current,
                total = ?key.total,
                open = self.open.len(),
                "expand"
            );
            if self.settled_at_goal(current) {
                break;
            }
            if let Err(err) = self.expand(current) {
                self.stats.open_high_water = self.open.high_water() as u64;
                info!(
                    expansions = self.stats.expansions,
                    nodes = self.stats.nodes_created,
                    error = %err,
                    "search aborted"
                );
                return Err(err);
            }
            if self.found.is_some() {
                break;
            }
        }

        self.stats.open_high_water = self.open.high_water() as u64;
        let Some(goal) = self.found else {
            info!(
                expansions = self.stats.expansions,
                nodes = self.stats.nodes_created,
                "search exhausted without reaching goal"
            );
            return Ok(None);
        };

        let path: Vec<S> = self
            .tree
            .path_from_root(goal)
            .into_iter()
            .map(|id| self.tree[id].state.clone())
            .collect();
        let cost = self.tree[goal].cost;
        info!(
            expansions = self.stats.expansions,
            nodes = self.stats.nodes_created,
            relaxations = self.stats.relaxations,
            path_len = path.len(),
            cost = ?cost,
            "goal reached"
        );
        Ok(Some(SearchOutcome {
            cost,
            path,
            tree: self.tree,
            root,
            goal,
            stats: self.stats,
        }))
    }

    fn estimate(&self, state: &S) -> C {
        self.heuristic
            .map_or_else(C::zero, |(h, destination)| h.estimate(state, destination))
    }

    fn key(&self, id: NodeId) -> FrontierKey<C> {
        FrontierKey {
            total: self.tree[id].total(),
            creation_order: u64::from(id.as_u32()),
        }
    }

    /// Create the node for a never-seen state and queue it.
    fn discover(
        &mut self,
        state: S,
        cost: C,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SearchError> {
        let estimate = self.estimate(&state);
        let is_goal = self.goal.matches(&state);
        let id = self
            .tree
            .insert(HeuristicNode::new(state.clone(), cost, estimate), parent)?;
        self.visited.insert(state, id);
        let key = self.key(id);
        self.open.push(id, key);
        self.stats.nodes_created += 1;
        if is_goal && self.found.is_none() && self.policy.termination == TerminationV1::OnDiscovery
        {
            self.found = Some(id);
        }
        Ok(id)
    }

    fn expand(&mut self, current: NodeId) -> Result<(), SearchError> {
        let current_cost = self.tree[current].cost;
        let successors = self.transform.successors(&self.tree[current].state);
        for (next, step) in successors {
            let new_cost = current_cost + step;
            match self.visited.get(&next) {
                None => {
                    self.discover(next, new_cost, Some(current))?;
                }
                Some(existing) if new_cost < self.tree[existing].cost => {
                    self.relax(current, existing, new_cost)?;
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Re-parent `existing` under `current` at `new_cost`, then push the
    /// improvement down its subtree.
    fn relax(&mut self, current: NodeId, existing: NodeId, new_cost: C) -> Result<(), SearchError> {
        // Lowering the cost of our own ancestry can only come from a negative
        // cycle and would never settle.
        if existing == current || self.tree.is_ancestor_of(existing, current) {
            let depth = self.tree.depth(current);
            warn!(node = %existing, via = %current, depth, "negative-cost cycle");
            return Err(SearchError::NegativeCycle { depth });
        }
        debug!(
            node = %existing,
            via = %current,
            old = ?self.tree[existing].cost,
            new = ?new_cost,
            "relax"
        );
        self.stats.relaxations += 1;
        self.tree.set_parent(existing, Some(current))?;
        self.assign_cost(existing, new_cost);
        self.propagate(existing);
        Ok(())
    }

    fn assign_cost(&mut self, id: NodeId, cost: C) {
        self.tree[id].cost = cost;
        if self.open.contains(id) {
            let key = self.key(id);
            self.open.update_priority(id, key);
        }
    }

    /// Re-derive the cost of every descendant of `from` whose tree edge runs
    /// through a node whose cost just changed.
    ///
    /// Child costs are `parent.cost + step`, with `step` taken from the
    /// transition model (cheapest edge if several reach the same child).
    /// Work-list instead of recursion: chains can be arbitrarily deep.
    fn propagate(&mut self, from: NodeId) {
        let mut work = vec![from];
        while let Some(parent) = work.pop() {
            if self.tree.is_leaf(parent) {
                continue;
            }
            let parent_cost = self.tree[parent].cost;
            let mut cheapest: BTreeMap<NodeId, C> = BTreeMap::new();
            for (next, step) in self.transform.successors(&self.tree[parent].state) {
                let Some(child) = self.visited.get(&next) else {
                    continue;
                };
                if self.tree.parent(child) != Some(parent) {
                    continue;
                }
                let candidate = parent_cost + step;
                cheapest
                    .entry(child)
                    .and_modify(|c| *c = (*c).min(candidate))
                    .or_insert(candidate);
            }
            for (child, cost) in cheapest {
                if cost != self.tree[child].cost {
                    self.assign_cost(child, cost);
                    self.stats.propagated_updates += 1;
                    work.push(child);
                }
            }
        }
    }

    /// Expansion-time goal check; always false under lazy termination.
    fn settled_at_goal(&mut self, current: NodeId) -> bool {
        if self.policy.termination == TerminationV1::OnExpansion
            && self.goal.matches(&self.tree[current].state)
        {
            self.found = Some(current);
            return true;
        }
        false
    }
}
