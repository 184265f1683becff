//! Returned costs match Bellman-Ford on random non-negative graphs, for
//! several consistent heuristics.

use lock_tests::graph_fixtures::Graph;
use proptest::prelude::*;
use waypoint_search::{astar, AStar, SearchError, ZeroHeuristic};

fn arb_graph() -> impl Strategy<Value = (u32, Vec<(u32, u32, i64)>)> {
    (2u32..10).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec((0..n, 0..n, 0i64..10), 0..30),
        )
    })
}

/// Check cost, path validity and tree consistency of one run.
fn check_run<H>(g: &Graph, source: u32, goal: u32, h: &H) -> Result<(), TestCaseError>
where
    H: Fn(&u32, &u32) -> i64,
{
    let expected = g.distances_from(source)[goal as usize];
    let result = astar(source, &goal, &|s: &u32| g.successors(s), h).unwrap();
    match (expected, result) {
        (None, None) => {}
        (Some(cost), Some(outcome)) => {
            prop_assert_eq!(outcome.cost, cost);
            prop_assert_eq!(outcome.path.first(), Some(&source));
            prop_assert_eq!(outcome.path.last(), Some(&goal));
            prop_assert_eq!(g.path_cost(&outcome.path), Some(cost));
            for id in outcome.tree.ids() {
                if let Some(p) = outcome.tree.parent(id) {
                    let step = g.edge_cost(outcome.tree[p].state, outcome.tree[id].state);
                    prop_assert_eq!(Some(outcome.tree[id].cost), step.map(|s| outcome.tree[p].cost + s));
                }
            }
        }
        (expected, got) => {
            return Err(TestCaseError::fail(format!(
                "expected {expected:?}, got {:?}",
                got.map(|o| o.cost)
            )));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn zero_heuristic_is_optimal((n, edges) in arb_graph(), s in 0u32..10, t in 0u32..10) {
        let g = Graph::from_edges(n, &edges);
        check_run(&g, s % n, t % n, &|_: &u32, _: &u32| 0)?;
    }

    #[test]
    fn exact_heuristic_is_optimal((n, edges) in arb_graph(), s in 0u32..10, t in 0u32..10) {
        let g = Graph::from_edges(n, &edges);
        let goal = t % n;
        let to_goal = g.distances_to(goal);
        check_run(&g, s % n, goal, &|u: &u32, _: &u32| to_goal[*u as usize].unwrap_or(0))?;
    }

    #[test]
    fn halved_heuristic_is_optimal((n, edges) in arb_graph(), s in 0u32..10, t in 0u32..10) {
        let g = Graph::from_edges(n, &edges);
        let goal = t % n;
        let to_goal = g.distances_to(goal);
        check_run(&g, s % n, goal, &|u: &u32, _: &u32| to_goal[*u as usize].unwrap_or(0) / 2)?;
    }

    #[test]
    fn negative_dag_never_reports_cycle(
        n in 2u32..10,
        raw in proptest::collection::vec((0u32..10, 0u32..10, -5i64..10), 0..30),
    ) {
        // Orient every edge low → high so the graph is acyclic.
        let edges: Vec<_> = raw
            .into_iter()
            .map(|(a, b, c)| (a % n, b % n, c))
            .filter(|(a, b, _)| a < b)
            .collect();
        let g = Graph::from_edges(n, &edges);
        let result = AStar::new(0).run(Some(&(n - 1)), &|s: &u32| g.successors(s), &ZeroHeuristic);
        let reported_cycle = matches!(result, Err(SearchError::NegativeCycle { .. }));
        prop_assert!(!reported_cycle);
    }
}

#[test]
fn larger_pseudo_random_graph() {
    let g = Graph::pseudo_random(42, 300, 4, 20);
    let dist = g.distances_from(0);
    for goal in [1, 17, 150, 299] {
        let result = astar(0, &goal, &|s: &u32| g.successors(s), &ZeroHeuristic).unwrap();
        assert_eq!(result.map(|o| o.cost), dist[goal as usize]);
    }
}
