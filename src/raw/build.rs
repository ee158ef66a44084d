use alloc::vec::Vec;

use super::arena::Arena;
use super::Link;
use super::raw_flat_bst::RawFlatBst;
use crate::Error;
use crate::compare::Compare;

impl<T, C> RawFlatBst<T, C> {
    /// Moves every value out in inorder sequence and leaves the tree empty (arena cleared).
    pub(crate) fn drain_inorder(&mut self) -> Vec<T> {
        let mut links = Vec::with_capacity(self.len());
        self.walk_inorder(|link| links.push(link));

        let values: Vec<T> = links.into_iter().map(|link| self.arena.free(link)).collect();
        self.clear();
        values
    }

    /// Replaces the contents with `values`, which must be strictly increasing and addressable.
    ///
    /// Values are appended to the cleared arena in sorted order, then linked by the midpoint rule,
    /// so arena order equals inorder and the shape has minimal height.
    fn rebuild(&mut self, values: Vec<T>) {
        debug_assert!(values.len() <= Arena::<T>::MAX_SLOTS);
        self.clear();

        let len = values.len();
        if len == 0 {
            return;
        }

        log::trace!("laying out {len} sorted values as a minimal-height tree");
        self.arena.reserve(len);
        for value in values {
            if self.arena.alloc(value).is_err() {
                panic!("`RawFlatBst::rebuild()` - arena refused a pre-checked allocation!");
            }
        }
        self.root = self.link_midpoints(0, len);
    }

    /// Links slots `lo..hi` into a subtree rooted at their midpoint and returns that root.
    fn link_midpoints(&mut self, lo: usize, hi: usize) -> Link {
        if lo == hi {
            return Link::NIL;
        }

        let mid = lo + (hi - lo) / 2;
        let node = Link::from_index(mid);
        let left = self.link_midpoints(lo, mid);
        let right = self.link_midpoints(mid + 1, hi);
        self.arena.set_left(node, left);
        self.arena.set_right(node, right);
        node
    }

    fn check_capacity(len: usize) -> Result<(), Error> {
        if len > Arena::<T>::MAX_SLOTS {
            return Err(Error::CapacityExceeded { max: Arena::<T>::MAX_SLOTS });
        }
        Ok(())
    }
}

impl<T, C: Compare<T>> RawFlatBst<T, C> {
    /// Builds a minimal-height tree from strictly increasing `values`, replacing all contents.
    ///
    /// Fails before touching the tree if `values` cannot be addressed.
    pub(crate) fn build_from_sorted_unique(&mut self, values: Vec<T>) -> Result<(), Error> {
        debug_assert!(
            self.is_strictly_sorted(&values),
            "`RawFlatBst::build_from_sorted_unique()` - `values` are not strictly increasing!"
        );
        Self::check_capacity(values.len())?;
        self.rebuild(values);
        Ok(())
    }

    /// Sorts, removes equivalent duplicates (keeping the first), and builds.
    pub(crate) fn build_from_range(&mut self, mut values: Vec<T>) -> Result<(), Error> {
        values.sort_by(|a, b| self.compare.ordering(a, b));
        values.dedup_by(|next, kept| self.compare.equivalent(kept, next));
        self.build_from_sorted_unique(values)
    }

    /// Builds from arbitrary input, skipping the sort when it is already strictly increasing.
    pub(crate) fn build_from_iter(&mut self, values: Vec<T>) -> Result<(), Error> {
        if self.is_strictly_sorted(&values) {
            self.build_from_sorted_unique(values)
        } else {
            self.build_from_range(values)
        }
    }

    /// Rebuilds into minimal-height shape with no holes. No-op below two elements.
    pub(crate) fn rebalance(&mut self) {
        let len = self.len();
        if len < 2 {
            return;
        }

        let holes = self.holes();
        let values = self.drain_inorder();
        self.rebuild(values);
        log::debug!("rebalanced {len} values: reclaimed {holes} holes, height now {}", self.height());
    }

    fn is_strictly_sorted(&self, values: &[T]) -> bool {
        values.is_sorted_by(|a, b| self.compare.less(a, b))
    }
}
