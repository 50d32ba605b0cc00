use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use raw_containers::{RbTree, Rank};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Generates values in a range that ensures duplicates.
fn value_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

/// A sorted-vector model of a multiset.
#[derive(Default)]
struct Model(Vec<i64>);

impl Model {
    fn insert(&mut self, value: i64) {
        let at = self.0.partition_point(|&v| v <= value);
        self.0.insert(at, value);
    }

    fn remove(&mut self, value: i64) -> Option<i64> {
        let at = self.0.binary_search(&value).ok()?;
        Some(self.0.remove(at))
    }

    fn rank_of(&self, value: i64) -> Option<usize> {
        let at = self.0.partition_point(|&v| v < value);
        (self.0.get(at) == Some(&value)).then_some(at)
    }
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    RankOf(i64),
    GetByRank(usize),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        6 => value_strategy().prop_map(TreeOp::Insert),
        3 => value_strategy().prop_map(TreeOp::Remove),
        2 => value_strategy().prop_map(TreeOp::Contains),
        2 => value_strategy().prop_map(TreeOp::RankOf),
        2 => any::<usize>().prop_map(TreeOp::GetByRank),
        1 => Just(TreeOp::First),
        1 => Just(TreeOp::Last),
        1 => Just(TreeOp::PopFirst),
        1 => Just(TreeOp::PopLast),
    ]
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both an `RbTree` and a
    /// sorted-vector multiset and asserts identical results at every step.
    #[test]
    fn tree_ops_match_model(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: RbTree<i64> = RbTree::new();
        let mut model = Model::default();

        for op in &ops {
            match *op {
                TreeOp::Insert(v) => {
                    tree.insert(v).unwrap();
                    model.insert(v);
                }
                TreeOp::Remove(v) => {
                    prop_assert_eq!(tree.remove(&v), model.remove(v), "remove({})", v);
                }
                TreeOp::Contains(v) => {
                    prop_assert_eq!(tree.contains(&v), model.0.binary_search(&v).is_ok(), "contains({})", v);
                }
                TreeOp::RankOf(v) => {
                    prop_assert_eq!(tree.rank_of(&v), model.rank_of(v), "rank_of({})", v);
                }
                TreeOp::GetByRank(rank) => {
                    let rank = rank % (model.0.len() + 1);
                    prop_assert_eq!(tree.get_by_rank(rank), model.0.get(rank), "get_by_rank({})", rank);
                }
                TreeOp::First => {
                    prop_assert_eq!(tree.first(), model.0.first(), "first()");
                }
                TreeOp::Last => {
                    prop_assert_eq!(tree.last(), model.0.last(), "last()");
                }
                TreeOp::PopFirst => {
                    let expected = (!model.0.is_empty()).then(|| model.0.remove(0));
                    prop_assert_eq!(tree.pop_first(), expected, "pop_first()");
                }
                TreeOp::PopLast => {
                    prop_assert_eq!(tree.pop_last(), model.0.pop(), "pop_last()");
                }
            }
            prop_assert_eq!(tree.len(), model.0.len());
        }

        prop_assert!(tree.iter().eq(model.0.iter()));
    }

    /// In-order traversal is ascending and counts every duplicate.
    #[test]
    fn iter_is_sorted_multiset(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let tree: RbTree<i64> = values.iter().copied().collect();

        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for &v in &values {
            *counts.entry(v).or_default() += 1;
        }
        let expected: Vec<i64> = counts.iter().flat_map(|(&v, &n)| std::iter::repeat_n(v, n)).collect();

        let forward: Vec<i64> = tree.iter().copied().collect();
        prop_assert_eq!(&forward, &expected);

        let mut backward: Vec<i64> = tree.iter().rev().copied().collect();
        backward.reverse();
        prop_assert_eq!(&backward, &expected);

        prop_assert_eq!(tree.iter().len(), values.len());
        prop_assert_eq!(tree.into_iter().collect::<Vec<_>>(), expected);
    }

    /// Walking a cursor from `begin` to `end` visits the same values as `iter`.
    #[test]
    fn cursor_walk_matches_iter(values in proptest::collection::vec(value_strategy(), 0..500)) {
        let tree: RbTree<i64> = values.into_iter().collect();

        let mut walked = Vec::new();
        let mut cursor = tree.begin();
        while cursor != tree.end() {
            walked.push(*cursor.get().unwrap());
            cursor.move_next();
        }
        prop_assert!(tree.iter().eq(walked.iter()));

        let mut walked_back = Vec::new();
        let mut cursor = tree.end();
        for _ in 0..tree.len() {
            cursor.move_prev();
            walked_back.push(*cursor.get().unwrap());
        }
        prop_assert!(tree.iter().rev().eq(walked_back.iter()));
    }

    /// Both bounds return the last node of the search path, which is always
    /// an in-order neighbour of the probe.
    #[test]
    fn bounds_land_next_to_the_probe(
        values in proptest::collection::vec(value_strategy(), 1..500),
        probe in value_strategy(),
    ) {
        let tree: RbTree<i64> = values.into_iter().collect();

        let lower = tree.lower_bound(&probe);
        prop_assert_eq!(lower, tree.upper_bound(&probe));

        let found = *lower.get().unwrap();
        let rank = lower.rank().unwrap();
        if probe < found {
            prop_assert!(rank == 0 || *tree.get_by_rank(rank - 1).unwrap() <= probe);
        } else {
            prop_assert!(tree.get_by_rank(rank + 1).is_none_or(|&next| next > probe));
        }
    }

    #[test]
    fn clear_empties_tree(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let mut tree: RbTree<i64> = values.into_iter().collect();
        tree.clear();
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.first(), None);
        prop_assert_eq!(tree.begin(), tree.end());

        tree.insert(1).unwrap();
        prop_assert_eq!(tree.len(), 1);
    }

    #[test]
    fn clone_is_deep(values in proptest::collection::vec(value_strategy(), 1..500)) {
        let mut tree: RbTree<i64> = values.into_iter().collect();
        let copy = tree.clone();
        prop_assert_eq!(&copy, &tree);

        let first = tree.pop_first().unwrap();
        prop_assert_eq!(copy.len(), tree.len() + 1);
        prop_assert_eq!(copy.first(), Some(&first));
    }
}

// ─── Edge cases ──────────────────────────────────────────────────────────────

#[test]
fn empty_tree() {
    let mut tree: RbTree<i32> = RbTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.find(&1), tree.end());
    assert_eq!(tree.lower_bound(&1), tree.end());
    assert_eq!(tree.remove(&1), None);
    assert_eq!(tree.pop_first(), None);
    assert_eq!(tree.get_by_rank(0), None);
    assert_eq!(tree.iter().next(), None);
}

#[test]
fn duplicates_are_kept() {
    let mut tree = RbTree::new();
    for _ in 0..3 {
        tree.insert(7).unwrap();
    }
    tree.insert(1).unwrap();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.rank_of(&7), Some(1));
    assert_eq!(tree.remove(&7), Some(7));
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 7, 7]);
}

#[test]
fn equivalent_values_keep_insertion_order() {
    let mut tree = RbTree::with_comparator(|a: &(i32, char), b: &(i32, char)| a.0 < b.0);
    for value in [(2, 'a'), (1, 'x'), (2, 'b'), (2, 'c')] {
        tree.insert(value).unwrap();
    }
    let order: String = tree.iter().map(|&(_, c)| c).collect();
    assert_eq!(order, "xabc");
    assert_eq!(tree.rank_of(&(2, '?')), Some(1));
    assert_eq!(tree.get(&(1, '?')), Some(&(1, 'x')));
}

#[test]
fn index_by_rank() {
    let tree = RbTree::from([30, 10, 20]);
    assert_eq!(tree[Rank(0)], 10);
    assert_eq!(tree[Rank(2)], 30);
}

#[test]
#[should_panic(expected = "`RbTree::index()` - `rank` is out of bounds!")]
fn index_out_of_bounds() {
    let tree = RbTree::from([1]);
    let _ = tree[Rank(1)];
}

#[test]
fn ordering_is_lexicographic() {
    let a = RbTree::from([1, 2, 3]);
    let b = RbTree::from([1, 2, 4]);
    let c = RbTree::from([1, 2]);
    assert!(a < b);
    assert!(c < a);
    assert_eq!(a.clone().max(b.clone()), b);
    assert_ne!(a, c);
}

#[test]
fn swap_exchanges_contents() {
    let mut a = RbTree::from([1, 2]);
    let mut b = RbTree::from([9]);
    a.swap_with(&mut b);
    assert_eq!(a, RbTree::from([9]));
    assert_eq!(b, RbTree::from([1, 2]));
}

#[test]
fn debug_format() {
    let tree = RbTree::from([3, 1, 2]);
    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
}

#[test]
fn extend_by_reference() {
    let mut tree: RbTree<i32> = RbTree::new();
    tree.extend(&[3, 1]);
    tree.extend([2]);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(tree.max_size(), u32::MAX as usize);
}
