//! Cached tree metrics agree with naive recomputation after arbitrary
//! insert / re-parent / detach sequences.

use lock_tests::tree_reference::{naive_depth, naive_height, naive_size};
use proptest::prelude::*;
use waypoint_kernel::tree::{NodeId, Tree, TreeError};

#[derive(Debug, Clone)]
enum Op {
    /// Insert under the node at this index (mod len), or as a root.
    Insert(Option<usize>),
    /// Re-parent node `.0` under node `.1` (indices mod len), or detach.
    Move(usize, Option<usize>),
    /// Read a metric, forcing a refresh mid-sequence.
    Touch(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => proptest::option::of(0usize..64).prop_map(Op::Insert),
        3 => (0usize..64, proptest::option::of(0usize..64)).prop_map(|(n, p)| Op::Move(n, p)),
        1 => (0usize..64).prop_map(Op::Touch),
    ]
}

fn nth(ids: &[NodeId], i: usize) -> NodeId {
    ids[i % ids.len()]
}

fn apply(ops: &[Op]) -> Tree<usize> {
    let mut tree = Tree::new();
    let mut ids: Vec<NodeId> = vec![tree.insert(0, None).unwrap()];
    for op in ops {
        match *op {
            Op::Insert(parent) => {
                let parent = parent.map(|p| nth(&ids, p));
                let id = tree.insert(ids.len(), parent).unwrap();
                ids.push(id);
            }
            Op::Move(node, parent) => {
                let node = nth(&ids, node);
                let parent = parent.map(|p| nth(&ids, p));
                match tree.set_parent(node, parent) {
                    Ok(()) | Err(TreeError::WouldCycle { .. }) => {}
                    Err(e) => panic!("unexpected error: {e}"),
                }
            }
            Op::Touch(node) => {
                let node = nth(&ids, node);
                let _ = (tree.size(node), tree.height(node), tree.depth(node));
            }
        }
    }
    tree
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn cached_metrics_match_naive(ops in proptest::collection::vec(arb_op(), 0..80)) {
        let tree = apply(&ops);
        for id in tree.ids() {
            prop_assert_eq!(tree.depth(id), naive_depth(&tree, id), "depth of {}", id);
            prop_assert_eq!(tree.size(id), naive_size(&tree, id), "size of {}", id);
            prop_assert_eq!(tree.height(id), naive_height(&tree, id), "height of {}", id);
        }
    }

    #[test]
    fn structural_identities_hold(ops in proptest::collection::vec(arb_op(), 0..80)) {
        let tree = apply(&ops);
        for id in tree.ids() {
            let children = tree.children(id);
            let child_sizes: usize = children.iter().map(|&c| tree.size(c)).sum();
            prop_assert_eq!(tree.size(id), 1 + child_sizes);
            prop_assert_eq!(tree.height(id) == 0, tree.is_leaf(id));
            let max_child = children.iter().map(|&c| tree.height(c) + 1).max().unwrap_or(0);
            prop_assert_eq!(tree.height(id), max_child);
            for &c in children {
                prop_assert_eq!(tree.depth(c), tree.depth(id) + 1);
                prop_assert_eq!(tree.parent(c), Some(id));
            }
            prop_assert_eq!(tree.depth(id) == 0, tree.is_root(id));
        }
    }

    #[test]
    fn no_node_becomes_its_own_ancestor(ops in proptest::collection::vec(arb_op(), 0..80)) {
        let tree = apply(&ops);
        for id in tree.ids() {
            prop_assert!(!tree.is_ancestor_of(id, id));
            prop_assert!(tree.path_from_root(id).len() == tree.depth(id) + 1);
        }
    }
}

#[test]
fn interleaved_reads_and_moves() {
    // 0 ─ 1 ─ 2 ─ 3, then 4 under 0; move 2 under 4 and back under 0.
    let mut tree = Tree::new();
    let n0 = tree.insert('a', None).unwrap();
    let n1 = tree.insert('b', Some(n0)).unwrap();
    let n2 = tree.insert('c', Some(n1)).unwrap();
    let n3 = tree.insert('d', Some(n2)).unwrap();
    let n4 = tree.insert('e', Some(n0)).unwrap();
    assert_eq!((tree.size(n0), tree.height(n0), tree.depth(n3)), (5, 3, 3));

    tree.set_parent(n2, Some(n4)).unwrap();
    assert_eq!(tree.height(n1), 0);
    assert_eq!(tree.size(n4), 3);
    assert_eq!(tree.depth(n3), 3);

    tree.set_parent(n2, Some(n0)).unwrap();
    assert_eq!(tree.depth(n3), 2);
    assert_eq!(tree.height(n0), 2);
    assert_eq!(tree.size(n4), 1);
}
