use alloc::vec::Vec;

use super::FlatBst;
use crate::Error;
use crate::compare::Compare;

impl<T, C: Compare<T>> FlatBst<T, C> {
    /// Builds a minimal-height tree ordered by `compare` from arbitrary input.
    ///
    /// Input that is already strictly increasing is laid out directly; anything else is sorted
    /// and deduplicated first, keeping the first of each run of equivalent values.
    ///
    /// # Panics
    ///
    /// Panics if the input holds more distinct values than the arena can address.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let tree = FlatBst::from_iter_with_compare([1, 4, 2, 4], |a: &i32, b: &i32| a > b);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [4, 2, 1]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) for strictly increasing input, O(n log n) otherwise.
    pub fn from_iter_with_compare<I: IntoIterator<Item = T>>(values: I, compare: C) -> Self {
        let mut tree = Self::with_compare(compare);
        if let Err(error) = tree.raw.build_from_iter(values.into_iter().collect()) {
            panic!("`FlatBst::from_iter_with_compare()` - {error}!");
        }
        tree
    }

    /// Replaces the contents with `values`, which must be strictly increasing under the tree's
    /// ordering, laid out as a minimal-height tree.
    ///
    /// The subtree root of every range is its midpoint `lo + len / 2`, so for the same input the
    /// shape is always the same.
    ///
    /// In debug builds, unsorted or duplicated input panics. In release builds it produces a tree
    /// whose search results are unspecified.
    ///
    /// # Handle invalidation
    ///
    /// Every previously issued handle becomes stale.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] if `values` is longer than the arena can address. The tree is
    /// left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::new();
    /// tree.build_from_sorted_unique([1, 2, 3, 4, 5, 6, 7])?;
    ///
    /// let mut preorder = Vec::new();
    /// tree.for_each_preorder(|v| preorder.push(*v));
    /// assert_eq!(preorder, [4, 2, 1, 3, 6, 5, 7]);
    /// # Ok::<(), flat_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn build_from_sorted_unique<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<(), Error> {
        self.raw.build_from_sorted_unique(values.into_iter().collect())
    }

    /// Replaces the contents with `values` after sorting them and dropping equivalent duplicates
    /// (the first of each run is kept), laid out as a minimal-height tree.
    ///
    /// # Handle invalidation
    ///
    /// Every previously issued handle becomes stale.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] if more distinct values remain than the arena can address. The
    /// tree is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::new();
    /// tree.build_from_range([5, 2, 8, 1, 3, 7, 9, 3, 5])?;
    /// assert_eq!(tree.len(), 7);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 5, 7, 8, 9]);
    /// # Ok::<(), flat_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n log n)
    pub fn build_from_range<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<(), Error> {
        let values: Vec<T> = values.into_iter().collect();
        self.raw.build_from_range(values)
    }

    /// Rebuilds the tree into minimal-height shape and compacts away every free slot.
    ///
    /// Size and ascending order are preserved. Trees with fewer than two elements are left
    /// untouched (and their handles stay valid).
    ///
    /// # Handle invalidation
    ///
    /// For two or more elements, every previously issued handle becomes stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::new();
    /// tree.insert_many(1..=7);
    /// let stale = tree.find_handle(&4);
    ///
    /// tree.rebalance();
    ///
    /// let mut preorder = Vec::new();
    /// tree.for_each_preorder(|v| preorder.push(*v));
    /// assert_eq!(preorder, [4, 2, 1, 3, 6, 5, 7]);
    /// assert_eq!(tree.get(stale), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn rebalance(&mut self) {
        self.raw.rebalance();
    }
}
