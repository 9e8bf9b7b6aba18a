use rebuild_bst::Tree;

use std::collections::{BTreeSet, HashSet};

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same values in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Delete(k) => {
                bst.delete(k);
                set.remove(k);
            }
            Op::Rebalance => bst.rebalance(),
        }
    }
}

/// Whether the in-order sequence is strictly ascending.
fn is_strictly_ascending<K: Ord>(tree: &Tree<K>) -> bool {
    tree.iter().zip(tree.iter().skip(1)).all(|(a, b)| a < b)
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    is_strictly_ascending(&tree) && tree.len() == set.len() && tree.iter().eq(set.iter())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.find(x).map(|n| n.value()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = Tree::from_unsorted(xs.clone());
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::from_unsorted(xs.clone());
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    is_strictly_ascending(&tree)
        && deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn unsorted_matches_sorted_dedup(xs: Vec<i16>) -> bool {
    let mut sorted = xs.clone();
    sorted.sort_unstable();
    sorted.dedup();

    let from_unsorted = Tree::from_unsorted(xs);
    let from_sorted = Tree::from_sorted(sorted);

    from_unsorted.height() == from_sorted.height() && from_unsorted.iter().eq(from_sorted.iter())
}

#[quickcheck]
fn rebalance_keeps_values(xs: Vec<i16>, extra: Vec<i16>) -> bool {
    let mut tree = Tree::from_unsorted(xs);
    tree.extend(extra);
    let before: Vec<i16> = tree.iter().copied().collect();

    tree.rebalance();
    tree.is_balanced() && tree.iter().copied().eq(before)
}

#[quickcheck]
fn insert_is_idempotent(xs: Vec<i8>, x: i8) -> bool {
    let mut tree = Tree::from_unsorted(xs);
    tree.insert(x);
    let before: Vec<i8> = tree.iter().copied().collect();
    let height = tree.height();

    !tree.insert(x)
        && tree.height() == height
        && tree.len() == before.len()
        && tree.iter().copied().eq(before)
}

#[quickcheck]
fn level_orders_agree(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    tree.extend(xs);

    let mut recursive = Vec::new();
    tree.level_order_recursive(|x| recursive.push(*x));
    tree.iter_level_order().copied().eq(recursive)
}

#[quickcheck]
fn depth_of_found_nodes(xs: Vec<i8>) -> bool {
    let tree = Tree::from_unsorted(xs.clone());
    let height = tree.height();

    xs.iter().all(|x| {
        let node = tree.find(x).expect("inserted values are found");
        matches!(tree.depth(node), Some(depth) if depth < height)
    })
}
