//! End-to-end engine scenarios on small hand-built graphs.

use lock_tests::graph_fixtures::Graph;
use waypoint_search::{
    astar, AStar, SearchError, SearchPolicyV1, SearchStatus, ZeroHeuristic,
};

const A: u32 = 0;
const B: u32 = 1;
const C: u32 = 2;
const D: u32 = 3;

#[test]
fn diamond_graph() {
    let g = Graph::from_edges(4, &[(A, B, 1), (A, C, 1), (B, D, 1), (C, D, 1)]);
    let outcome = astar(A, &D, &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap()
        .unwrap();
    assert_eq!(outcome.cost, 2);
    assert_eq!(outcome.path.len(), 3);
    assert_eq!(g.path_cost(&outcome.path), Some(2));
}

#[test]
fn source_is_destination() {
    let g = Graph::from_edges(2, &[(A, B, 1)]);
    let mut searcher = AStar::new(A);
    let outcome = searcher
        .run(Some(&A), &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap()
        .unwrap();
    assert_eq!(outcome.cost, 0);
    assert_eq!(outcome.path, vec![A]);
    assert_eq!(searcher.path(), &[A]);
    assert_eq!(searcher.status(), SearchStatus::Succeeded);
}

#[test]
fn cheaper_route_reparents_node() {
    let g = Graph::from_edges(3, &[(A, B, 5), (A, C, 1), (C, B, 1)]);
    let outcome = astar(A, &B, &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap()
        .unwrap();
    assert_eq!(outcome.cost, 2);
    assert_eq!(outcome.path, vec![A, C, B]);
    let parent = outcome.tree.parent(outcome.goal).unwrap();
    assert_eq!(outcome.tree[parent].state, C);
    assert_eq!(outcome.tree.depth(outcome.goal), 2);
}

#[test]
fn relaxing_closed_node_fixes_descendants() {
    // B is expanded (closed) through the expensive edge before C offers the
    // cheap way in; D and E under B must follow.
    let g = Graph::from_edges(
        5,
        &[(A, B, 10), (A, C, 6), (B, D, 1), (D, 4, 1), (C, B, 1)],
    );
    let h = |s: &u32, _: &u32| match *s {
        C => 20,
        4 => 30,
        _ => 0,
    };
    let outcome = astar(A, &4, &|s: &u32| g.successors(s), &h).unwrap().unwrap();
    assert_eq!(outcome.cost, 9);
    assert_eq!(outcome.path, vec![A, C, B, D, 4]);
    for id in outcome.tree.ids() {
        if let Some(p) = outcome.tree.parent(id) {
            let step = g
                .edge_cost(outcome.tree[p].state, outcome.tree[id].state)
                .unwrap();
            assert_eq!(outcome.tree[id].cost, outcome.tree[p].cost + step);
        }
    }
}

#[test]
fn missing_destination_leaves_state_alone() {
    let g = Graph::from_edges(2, &[(A, B, 1)]);
    let mut searcher = AStar::new(A);
    searcher
        .run(Some(&B), &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap();
    assert_eq!(searcher.path(), &[A, B]);

    let err = searcher
        .run::<i64, _, _>(None, &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap_err();
    assert_eq!(err, SearchError::MissingDestination);
    assert_eq!(searcher.status(), SearchStatus::Succeeded);
    assert_eq!(searcher.path(), &[A, B]);
}

#[test]
fn negative_cycle_is_reported() {
    // A → B → C → B with C → B at -5 closes a cycle of total -4.
    let g = Graph::from_edges(4, &[(A, B, 1), (B, C, 1), (C, B, -5)]);
    let mut searcher = AStar::new(A);
    let err = searcher
        .run(Some(&D), &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap_err();
    assert_eq!(err, SearchError::NegativeCycle { depth: 2 });
    assert_eq!(searcher.status(), SearchStatus::Failed);
    assert!(searcher.path().is_empty());
}

#[test]
fn negative_edge_without_cycle_is_fine() {
    let g = Graph::from_edges(4, &[(A, B, 4), (A, C, 1), (C, B, -2), (B, D, 1)]);
    let outcome = astar(A, &D, &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap()
        .unwrap();
    assert_eq!(outcome.cost, 0);
    assert_eq!(outcome.path, vec![A, C, B, D]);
}

#[test]
fn unreachable_is_idempotent() {
    let g = Graph::from_edges(4, &[(A, B, 1), (C, D, 1)]);
    let mut searcher = AStar::new(A);
    for _ in 0..2 {
        let result = searcher
            .run(Some(&D), &|s: &u32| g.successors(s), &ZeroHeuristic)
            .unwrap();
        assert!(result.is_none());
        assert_eq!(searcher.status(), SearchStatus::Failed);
        assert!(searcher.path().is_empty());
    }
}

#[test]
fn predicate_goal() {
    let g = Graph::from_edges(4, &[(A, B, 3), (A, C, 1), (C, D, 1)]);
    let mut searcher = AStar::new(A);
    let outcome = searcher
        .run_until(|s| *s == B || *s == D, &|s: &u32| g.successors(s))
        .unwrap()
        .unwrap();
    assert_eq!(outcome.path, vec![A, C, D]);
    assert_eq!(outcome.cost, 2);
}

#[test]
fn stop_on_discovery_may_return_first_found() {
    // Lazy termination stops as soon as B is created via the expensive edge.
    let g = Graph::from_edges(3, &[(A, B, 5), (A, C, 1), (C, B, 1)]);
    let mut lazy = AStar::with_policy(A, SearchPolicyV1::stop_on_discovery());
    let outcome = lazy
        .run(Some(&B), &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap()
        .unwrap();
    assert_eq!(outcome.cost, 5);
    assert_eq!(outcome.stats.expansions, 1);

    let mut eager = AStar::new(A);
    let outcome = eager
        .run(Some(&B), &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap()
        .unwrap();
    assert_eq!(outcome.cost, 2);
}

#[test]
fn predicate_goal_with_lazy_termination() {
    let g = Graph::from_edges(4, &[(A, B, 5), (A, C, 1), (C, D, 1), (C, B, 1)]);
    let transform = |s: &u32| g.successors(s);
    let mut lazy = AStar::with_policy(A, SearchPolicyV1::stop_on_discovery());

    // B is created while expanding A, so the run stops there.
    let outcome = lazy
        .run_until(|s| *s == B || *s == D, &transform)
        .unwrap()
        .unwrap();
    assert_eq!(outcome.path, vec![A, B]);
    assert_eq!(outcome.cost, 5);
    assert_eq!(outcome.stats.expansions, 1);

    let outcome = lazy.run_until(|s| *s == A, &transform).unwrap().unwrap();
    assert_eq!(outcome.path, vec![A]);
    assert_eq!(outcome.cost, 0);

    // The eager default settles on the cheaper match instead.
    let outcome = AStar::new(A)
        .run_until(|s| *s == B || *s == D, &transform)
        .unwrap()
        .unwrap();
    assert_eq!(outcome.cost, 2);
}

#[test]
fn lazy_predicate_prefers_earliest_created_match() {
    // Both matches appear in one expansion; D is created first.
    let g = Graph::from_edges(4, &[(A, D, 3), (A, B, 1)]);
    let outcome = AStar::with_policy(A, SearchPolicyV1::stop_on_discovery())
        .run_until(|s| *s == B || *s == D, &|s: &u32| g.successors(s))
        .unwrap()
        .unwrap();
    assert_eq!(outcome.path, vec![A, D]);
    assert_eq!(outcome.cost, 3);
}

#[test]
fn status_lifecycle() {
    let g = Graph::from_edges(2, &[(A, B, 1)]);
    let mut searcher = AStar::new(A);
    assert_eq!(searcher.status(), SearchStatus::Idle);
    assert!(searcher.last_stats().is_none());

    searcher
        .run(Some(&B), &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap();
    assert_eq!(searcher.status(), SearchStatus::Succeeded);
    let stats = searcher.last_stats().unwrap();
    assert_eq!(stats.nodes_created, 2);
    assert_eq!(stats.expansions, 2);

    searcher.set_source(B);
    searcher
        .run(Some(&A), &|s: &u32| g.successors(s), &ZeroHeuristic)
        .unwrap();
    assert_eq!(searcher.status(), SearchStatus::Failed);
    assert!(searcher.last_stats().is_none());
}
