//! Same inputs, same export bytes and digest, within one process.

use lock_tests::graph_fixtures::Graph;
use waypoint_harness::runner::{solve, SolveOutcome};
use waypoint_harness::RunConfig;
use waypoint_search::{astar, SearchTreeExport, ZeroHeuristic};

fn puzzle_digest() -> String {
    let config = RunConfig::new(
        vec![vec![0, 1, 3], vec![4, 2, 5], vec![7, 8, 6]],
        vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 0]],
    );
    match solve(&config).unwrap() {
        SolveOutcome::Solved(report) => report.digest.as_str().to_string(),
        SolveOutcome::Unreachable(reason) => panic!("unexpected {reason:?}"),
    }
}

#[test]
fn puzzle_digest_is_stable() {
    let first = puzzle_digest();
    assert!(first.starts_with("sha256:"));
    for _ in 0..5 {
        assert_eq!(puzzle_digest(), first);
    }
}

#[test]
fn graph_export_is_stable_and_sorted() {
    let g = Graph::pseudo_random(9, 200, 3, 15);
    let dist = g.distances_from(0);
    let goal = (0..g.nodes())
        .filter_map(|n| dist[n as usize].map(|d| (d, n)))
        .max()
        .map(|(_, n)| n)
        .unwrap();
    let export = || {
        let outcome = astar(0, &goal, &|s: &u32| g.successors(s), &ZeroHeuristic)
            .unwrap()
            .unwrap();
        SearchTreeExport::from_outcome(&outcome, |s: &u32| format!("v{s}")).unwrap()
    };
    let a = export();
    let b = export();
    assert_eq!(
        a.to_canonical_json_bytes().unwrap(),
        b.to_canonical_json_bytes().unwrap()
    );
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());

    let ids: Vec<u32> = a.nodes.iter().map(|n| n.node_id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);

    let on_path = a.nodes.iter().filter(|n| n.on_path).count() as u64;
    assert_eq!(on_path, a.metadata.path_len);
    assert_eq!(
        a.nodes.iter().filter(|n| n.parent_id.is_none()).count(),
        1,
        "exactly one root"
    );
}
