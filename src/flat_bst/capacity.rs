use super::FlatBst;
use crate::compare::Natural;
use crate::raw::RawFlatBst;

impl<T> FlatBst<T> {
    /// Creates an empty tree with room for at least `capacity` elements before the arena
    /// reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let tree: FlatBst<i32> = FlatBst::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_compare(capacity, Natural)
    }
}

impl<T, C> FlatBst<T, C> {
    /// Creates an empty tree ordered by `compare` with room for at least `capacity` elements.
    #[must_use]
    pub fn with_capacity_and_compare(capacity: usize, compare: C) -> Self {
        FlatBst {
            raw: RawFlatBst::with_capacity(capacity, compare),
        }
    }

    /// Returns the number of slots the arena can hold without reallocating, alive or free.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of free slots waiting to be reused by later insertions.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::from([1, 2, 3]);
    /// tree.erase(&2);
    /// assert_eq!(tree.holes(), 1);
    /// tree.insert(4);
    /// assert_eq!(tree.holes(), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn holes(&self) -> usize {
        self.raw.holes()
    }

    /// Reserves room for at least `additional` more elements, counting free slots as room.
    ///
    /// This is only a hint: it never changes the contents and never invalidates handles.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::from([1]);
    /// let handle = tree.find_handle(&1);
    /// tree.reserve(100);
    /// assert!(tree.capacity() >= 101);
    /// assert_eq!(tree.get(handle), Some(&1));
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }
}
