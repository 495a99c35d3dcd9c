use balanced_bst::avl::Tree;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same set of values in both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut BTreeSet<T>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(v) => {
                assert_eq!(bst.insert(v.clone()), set.insert(v.clone()));
            }
            Op::Remove(v) => {
                assert_eq!(bst.remove(v), set.remove(v));
            }
            Op::Fork => {
                let before = bst.inorder().into_iter().cloned().collect::<Vec<_>>();
                let mut copy = bst.clone();

                // Whatever happens to a copy must not leak into the original...
                if let Some(max) = set.last() {
                    copy.remove(max);
                }
                assert!(bst.inorder().into_iter().eq(before.iter()));

                // ...and the other way around.
                let copy_before = copy.inorder().into_iter().cloned().collect::<Vec<_>>();
                if let Some(min) = set.pop_first() {
                    assert!(bst.remove(&min));
                }
                assert!(copy.inorder().into_iter().eq(copy_before.iter()));
                assert!(copy.is_valid());

                copy.clear();
                assert_eq!(bst.len(), set.len());
            }
        }
        assert!(bst.is_valid());
    }
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set);
        tree.len() == set.len() && tree.inorder().into_iter().eq(set.iter())
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.search(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.search(x))
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        for delete in &deletes {
            tree.remove(delete);
            if !tree.is_valid() {
                return false;
            }
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        deletes.iter().all(|x| !tree.search(x))
            && still_present.iter().all(|x| tree.search(x))
    }
}

quickcheck::quickcheck! {
    fn min_max_match_sorted_order(xs: Vec<i16>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        tree.find_min().ok() == xs.iter().min() && tree.find_max().ok() == xs.iter().max()
    }
}
