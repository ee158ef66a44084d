use std::collections::BTreeSet;

use core::ops::Bound;
use flat_tree::{Error, FlatBst, Handle, Natural, ReverseOrder};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates random values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -20_000i64..20_000i64
}

fn inorder<T: Copy, C>(tree: &FlatBst<T, C>) -> Vec<T> {
    let mut out = Vec::new();
    tree.for_each_inorder(|v| out.push(*v));
    out
}

fn preorder<T: Copy, C>(tree: &FlatBst<T, C>) -> Vec<T> {
    let mut out = Vec::new();
    tree.for_each_preorder(|v| out.push(*v));
    out
}

fn postorder<T: Copy, C>(tree: &FlatBst<T, C>) -> Vec<T> {
    let mut out = Vec::new();
    tree.for_each_postorder(|v| out.push(*v));
    out
}

/// Minimal height of a binary tree holding `len` nodes.
fn minimal_height(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn basic_insert_and_inorder() {
    let mut tree = FlatBst::new();
    for value in [5, 2, 8, 1, 3, 7, 9] {
        assert!(tree.insert(value).1);
    }

    assert_eq!(tree.len(), 7);
    assert_eq!(inorder(&tree), [1, 2, 3, 5, 7, 8, 9]);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 5, 7, 8, 9]);
}

#[test]
fn duplicate_insert_returns_existing_handle() {
    let mut tree = FlatBst::new();
    let (first, inserted) = tree.insert(5);
    assert!(inserted);

    let (second, inserted) = tree.insert(5);
    assert!(!inserted);
    assert_eq!(first, second);
    assert_eq!(tree.len(), 1);
}

#[test]
fn balanced_insert_order_survives_rebalance() {
    let mut tree = FlatBst::new();
    tree.insert_many([5, 2, 8, 1, 3, 7, 9]);
    assert_eq!(preorder(&tree), [5, 2, 1, 3, 8, 7, 9]);

    tree.rebalance();
    assert_eq!(preorder(&tree), [5, 2, 1, 3, 8, 7, 9]);

    assert!(tree.erase(&2));
    assert_eq!(inorder(&tree), [1, 3, 5, 7, 8, 9]);
    assert_eq!(tree.len(), 6);
    assert!(!tree.contains(&2));
}

#[test]
fn rebuilding_a_midpoint_shape_is_idempotent() {
    let mut tree = FlatBst::new();
    tree.build_from_sorted_unique(1..=12).unwrap();
    let shape = preorder(&tree);

    tree.build_from_sorted_unique(inorder(&tree)).unwrap();
    assert_eq!(preorder(&tree), shape);
    tree.rebalance();
    assert_eq!(preorder(&tree), shape);
}

#[test]
fn erase_leaf_one_child_and_two_children() {
    let mut tree = FlatBst::from([5, 2, 8, 1, 3, 7, 9, 6]);
    let mut tree_by_insert = FlatBst::new();
    tree_by_insert.insert_many([5, 2, 8, 1, 3, 7, 9, 6]);

    for tree in [&mut tree, &mut tree_by_insert] {
        // Leaf.
        assert!(tree.erase(&1));
        assert_eq!(inorder(tree), [2, 3, 5, 6, 7, 8, 9]);
        // One child.
        assert!(tree.erase(&2));
        assert_eq!(inorder(tree), [3, 5, 6, 7, 8, 9]);
        // Two children.
        assert!(tree.erase(&8));
        assert_eq!(inorder(tree), [3, 5, 6, 7, 9]);
        // Root.
        assert!(tree.erase(&5));
        assert_eq!(inorder(tree), [3, 6, 7, 9]);

        assert!(!tree.erase(&42));
        assert_eq!(tree.len(), 4);
    }
}

#[test]
fn erase_everything_empties_tree() {
    let mut tree = FlatBst::from([4, 2, 6, 1, 3, 5, 7]);
    for value in [4, 1, 7, 2, 6, 3, 5] {
        assert!(tree.erase(&value));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.first(), None);
    assert_eq!(tree.iter().next(), None);
    assert_eq!(tree.holes(), 7);
}

#[test]
fn find_and_contains() {
    let tree = FlatBst::from([10, 5, 15, 3, 7]);
    assert_eq!(tree.find(&7), Some(&7));
    assert_eq!(tree.find(&8), None);
    assert!(tree.contains(&15));
    assert!(!tree.contains(&16));

    let handle = tree.find_handle(&5);
    assert_eq!(tree.get(handle), Some(&5));
    assert!(tree.find_handle(&6).is_npos());
}

#[test]
fn traversal_orders() {
    let mut tree = FlatBst::new();
    tree.insert_many([4, 2, 6, 1, 3, 5, 7]);

    assert_eq!(inorder(&tree), [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(preorder(&tree), [4, 2, 1, 3, 6, 5, 7]);
    assert_eq!(postorder(&tree), [1, 3, 2, 5, 7, 6, 4]);
    assert_eq!(tree.height(), 3);
}

#[test]
fn iterator_as_cursor() {
    let tree = FlatBst::from([10, 20, 30]);
    let mut iter = tree.iter();

    assert_eq!(iter.current(), Some(&10));
    let handle = iter.handle();
    assert_eq!(tree[handle], 10);

    assert_eq!(iter.next(), Some(&10));
    assert_eq!(iter.next(), Some(&20));
    assert_eq!(iter.current(), Some(&30));
    assert_eq!(iter.next(), Some(&30));
    assert_eq!(iter.current(), None);
    assert_eq!(iter.handle(), Handle::NPOS);
    assert_eq!(iter.next(), None);
}

#[test]
fn clear_and_reserve() {
    let mut tree = FlatBst::from([1, 2, 3]);
    tree.reserve(100);
    assert!(tree.capacity() >= 103);
    assert_eq!(inorder(&tree), [1, 2, 3]);

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.holes(), 0);

    tree.insert(7);
    assert_eq!(inorder(&tree), [7]);
}

#[test]
fn range_constructor_sorts_and_dedups() {
    let tree: FlatBst<i32> = vec![5, 2, 8, 1, 3, 7, 9, 3, 5].into_iter().collect();
    assert_eq!(tree.len(), 7);
    assert_eq!(inorder(&tree), [1, 2, 3, 5, 7, 8, 9]);
    assert_eq!(tree.height(), 3);
}

#[test]
fn sorted_input_takes_midpoint_shape() {
    let tree: FlatBst<i32> = (1..=7).collect();
    assert_eq!(preorder(&tree), [4, 2, 1, 3, 6, 5, 7]);
    assert_eq!(tree.holes(), 0);
}

#[test]
fn array_with_duplicates() {
    let tree = FlatBst::from([3, 1, 4, 1, 5, 9, 2, 6, 5, 3]);
    assert_eq!(inorder(&tree), [1, 2, 3, 4, 5, 6, 9]);
}

#[test]
fn bulk_insert_counts_new_values() {
    let mut tree = FlatBst::from([5]);
    assert_eq!(tree.insert_many([1, 5, 9, 1]), 2);
    assert_eq!(inorder(&tree), [1, 5, 9]);

    tree.extend([2, 9]);
    assert_eq!(inorder(&tree), [1, 2, 5, 9]);
}

#[test]
fn build_apis_replace_contents() {
    let mut tree = FlatBst::from([100, 200]);

    tree.build_from_sorted_unique([1, 2, 3, 4, 5, 6, 7]).unwrap();
    assert_eq!(preorder(&tree), [4, 2, 1, 3, 6, 5, 7]);

    tree.build_from_range([9, 3, 3, 1]).unwrap();
    assert_eq!(inorder(&tree), [1, 3, 9]);
    assert_eq!(preorder(&tree), [3, 1, 9]);

    tree.build_from_range(Vec::new()).unwrap();
    assert!(tree.is_empty());
}

#[test]
fn rebalance_degenerate_chain() {
    let mut tree = FlatBst::new();
    tree.insert_many(1..=7);
    assert_eq!(preorder(&tree), [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(tree.height(), 7);

    tree.rebalance();
    assert_eq!(preorder(&tree), [4, 2, 1, 3, 6, 5, 7]);
    assert_eq!(inorder(&tree), [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(tree.height(), 3);
}

#[test]
fn rebalance_compacts_holes() {
    let mut tree = FlatBst::new();
    tree.insert_many(0..100);
    for value in (0..100).step_by(3) {
        tree.erase(&value);
    }
    assert_eq!(tree.holes(), 34);

    tree.rebalance();
    assert_eq!(tree.holes(), 0);
    assert_eq!(tree.len(), 66);
    assert_eq!(tree.height(), minimal_height(66));
}

#[test]
fn bounds_and_equal_range() {
    let tree = FlatBst::from([10, 20, 30, 40]);
    let value = |handle: Handle| tree.get(handle).copied();

    assert_eq!(value(tree.lower_bound(&5)), Some(10));
    assert_eq!(value(tree.lower_bound(&20)), Some(20));
    assert_eq!(value(tree.lower_bound(&25)), Some(30));
    assert_eq!(value(tree.lower_bound(&45)), None);

    assert_eq!(value(tree.upper_bound(&5)), Some(10));
    assert_eq!(value(tree.upper_bound(&20)), Some(30));
    assert_eq!(value(tree.upper_bound(&40)), None);

    let (lower, upper) = tree.equal_range(&30);
    assert_eq!((value(lower), value(upper)), (Some(30), Some(40)));

    let (lower, upper) = tree.equal_range(&35);
    assert_eq!(lower, upper);
    assert_eq!(value(lower), Some(40));

    let (lower, upper) = tree.equal_range(&40);
    assert_eq!((value(lower), upper), (Some(40), Handle::NPOS));
}

#[test]
fn custom_ordering() {
    let mut tree = FlatBst::with_compare(ReverseOrder(Natural));
    tree.insert_many([1, 3, 2]);
    assert_eq!(inorder(&tree), [3, 2, 1]);
    assert_eq!(tree.first(), Some(&3));
    assert_eq!(tree.range(..=2).copied().collect::<Vec<_>>(), [3, 2]);

    let rebuilt = FlatBst::from_iter_with_compare(1..=5, ReverseOrder(Natural));
    assert_eq!(inorder(&rebuilt), [5, 4, 3, 2, 1]);
    assert_eq!(rebuilt.height(), 3);
}

#[test]
fn equivalent_values_collapse() {
    let mut tree = FlatBst::with_compare(|a: &(i32, char), b: &(i32, char)| a.0 < b.0);
    assert!(tree.insert((1, 'a')).1);
    assert!(!tree.insert((1, 'b')).1);
    assert_eq!(tree.find(&(1, 'z')), Some(&(1, 'a')));
}

#[test]
fn emplace_constructs_once() {
    let mut tree: FlatBst<String> = FlatBst::new();
    let (handle, inserted) = tree.emplace("kiwi");
    assert!(inserted);
    assert_eq!(tree.emplace("kiwi"), (handle, false));
    assert_eq!(tree[handle], "kiwi");
}

#[test]
fn owned_iteration_in_order() {
    let mut tree = FlatBst::new();
    tree.insert_many([3, 1, 2]);
    let iter = tree.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn try_get_reports_stale_handles() {
    let tree = FlatBst::from([1]);
    assert_eq!(tree.try_get(Handle::NPOS), Err(Error::NotFound));
    assert_eq!(tree.try_get(tree.find_handle(&1)), Ok(&1));
}

// ─── Model-based tests ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64),
    Erase(i64),
    Contains(i64),
    LowerBound(i64),
    UpperBound(i64),
    First,
    Last,
    Rebalance,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        5 => value_strategy().prop_map(TreeOp::Insert),
        3 => value_strategy().prop_map(TreeOp::Erase),
        2 => value_strategy().prop_map(TreeOp::Contains),
        1 => value_strategy().prop_map(TreeOp::LowerBound),
        1 => value_strategy().prop_map(TreeOp::UpperBound),
        1 => Just(TreeOp::First),
        1 => Just(TreeOp::Last),
        1 => Just(TreeOp::Rebalance),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both FlatBst and BTreeSet and asserts
    /// identical results at every step.
    #[test]
    fn ops_match_btreeset(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: FlatBst<i64> = FlatBst::new();
        let mut model: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                TreeOp::Insert(v) => {
                    let (handle, inserted) = tree.insert(*v);
                    prop_assert_eq!(inserted, model.insert(*v), "insert({})", v);
                    prop_assert_eq!(tree.get(handle), Some(v));
                }
                TreeOp::Erase(v) => {
                    prop_assert_eq!(tree.erase(v), model.remove(v), "erase({})", v);
                }
                TreeOp::Contains(v) => {
                    prop_assert_eq!(tree.contains(v), model.contains(v), "contains({})", v);
                }
                TreeOp::LowerBound(v) => {
                    let expected = model.range(*v..).next();
                    prop_assert_eq!(tree.get(tree.lower_bound(v)), expected, "lower_bound({})", v);
                }
                TreeOp::UpperBound(v) => {
                    let expected = model.range((Bound::Excluded(*v), Bound::Unbounded)).next();
                    prop_assert_eq!(tree.get(tree.upper_bound(v)), expected, "upper_bound({})", v);
                    prop_assert_eq!(tree.equal_range(v), (tree.lower_bound(v), tree.upper_bound(v)));
                }
                TreeOp::First => {
                    prop_assert_eq!(tree.first(), model.first(), "first()");
                }
                TreeOp::Last => {
                    prop_assert_eq!(tree.last(), model.last(), "last()");
                }
                TreeOp::Rebalance => {
                    tree.rebalance();
                    prop_assert_eq!(tree.holes(), 0);
                    prop_assert_eq!(tree.height(), minimal_height(tree.len()));
                }
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        let items: Vec<_> = tree.iter().copied().collect();
        let expected: Vec<_> = model.iter().copied().collect();
        prop_assert_eq!(items, expected);
    }

    /// Tests FromIterator matches BTreeSet and always produces a minimal-height tree.
    #[test]
    fn from_iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let tree: FlatBst<i64> = values.iter().copied().collect();
        let model: BTreeSet<i64> = values.iter().copied().collect();

        prop_assert_eq!(inorder(&tree), model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(tree.height(), minimal_height(model.len()));
        prop_assert_eq!(tree.iter().len(), model.len());
    }

    /// Tests that traversal orders agree on their contents and on the root position.
    #[test]
    fn traversals_visit_every_element(values in proptest::collection::vec(value_strategy(), 1..1_000)) {
        let mut tree = FlatBst::new();
        tree.insert_many(values.iter().copied());

        let mut pre = preorder(&tree);
        let mut post = postorder(&tree);
        prop_assert_eq!(pre.first(), Some(&values[0]));
        prop_assert_eq!(post.last(), Some(&values[0]));

        pre.sort_unstable();
        post.sort_unstable();
        prop_assert_eq!(&pre, &inorder(&tree));
        prop_assert_eq!(&post, &inorder(&tree));
    }

    /// Tests range with tuple bounds using Excluded/Included combinations matches BTreeSet.
    #[test]
    fn range_tuple_bounds_match_btreeset(
        values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
        lo in value_strategy(),
        hi in value_strategy(),
    ) {
        let mut tree = FlatBst::new();
        tree.insert_many(values.iter().copied());
        let model: BTreeSet<i64> = values.iter().copied().collect();

        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

        let bounds = [
            (Bound::Included(lo), Bound::Included(hi)),
            (Bound::Included(lo), Bound::Excluded(hi)),
            (Bound::Excluded(lo), Bound::Included(hi)),
            (Bound::Unbounded, Bound::Excluded(hi)),
            (Bound::Excluded(lo), Bound::Unbounded),
        ];
        for range in bounds {
            let actual: Vec<_> = tree.range(range).copied().collect();
            let expected: Vec<_> = model.range(range).copied().collect();
            prop_assert_eq!(actual, expected, "range({:?})", range);
        }
    }

    /// Tests that rebalancing preserves contents and yields minimal height with no holes.
    #[test]
    fn rebalance_is_minimal(
        values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
        erase in proptest::collection::vec(value_strategy(), 0..TEST_SIZE / 2),
    ) {
        let mut tree = FlatBst::new();
        tree.insert_many(values.iter().copied());
        for value in &erase {
            tree.erase(value);
        }
        let before = inorder(&tree);

        tree.rebalance();
        prop_assert_eq!(inorder(&tree), before);
        prop_assert_eq!(tree.holes(), 0);
        prop_assert_eq!(tree.height(), minimal_height(tree.len()));
    }

    /// Tests that erased slots are reused before the arena grows.
    #[test]
    fn holes_are_reused(values in proptest::collection::vec(value_strategy(), 1..1_000)) {
        let mut tree = FlatBst::new();
        tree.insert_many(values.iter().copied());
        let len = tree.len();

        let erased: Vec<_> = tree.iter().copied().step_by(2).collect();
        for value in &erased {
            tree.erase(value);
        }
        prop_assert_eq!(tree.holes(), erased.len());

        let fresh: Vec<i64> = (0..erased.len() as i64).map(|i| 100_000 + i).collect();
        prop_assert_eq!(tree.insert_many(fresh), erased.len());
        prop_assert_eq!(tree.holes(), 0);
        prop_assert_eq!(tree.len(), len);
    }
}
