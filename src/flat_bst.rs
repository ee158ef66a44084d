use core::fmt;
use core::ops::{Index, RangeBounds};

use crate::compare::{Compare, Natural};
use crate::raw::{InorderCursor, RawFlatBst};
use crate::{Error, Handle};

mod build;
mod capacity;
mod iter;

pub use iter::{IntoIter, Iter, Range};

/// An ordered set of unique values stored in a flat arena and linked by indices.
///
/// Every element lives in one slot of a contiguous arena; the tree's child links are slot indices
/// rather than pointers. Erased slots go onto a free list and are reused by later insertions,
/// so churn does not grow the arena. Positions in the set can be held as [`Handle`]s, which
/// stay valid until that element is erased or the tree is cleared or rebuilt, and are detected
/// as stale afterwards.
///
/// The tree is a plain binary search tree: insertion never rebalances, so monotone insertion
/// orders degrade it into a chain. Call [`rebalance`](FlatBst::rebalance) after such a load, or
/// construct it in bulk with [`build_from_range`](FlatBst::build_from_range) /
/// [`FromIterator`], which always produce a minimal-height shape.
///
/// Ordering comes from the `C` parameter, a [`Compare`] implementation. The default,
/// [`Natural`], uses the value's [`Ord`] impl. Values that are equivalent under `C` are treated
/// as the same key.
///
/// It is a logic error for a value to be modified in such a way that its ordering relative to any
/// other value changes while it is in the tree. The behavior resulting from such a logic error is
/// not specified, but will be encapsulated to the `FlatBst` that observed it and not result in
/// undefined behavior.
///
/// # Handle invalidation
///
/// [`clear`](FlatBst::clear), [`rebalance`](FlatBst::rebalance) and every `build_*` method
/// invalidate **every** previously issued handle, even ones whose raw slot index is reused by
/// the new contents. [`erase`](FlatBst::erase) invalidates only the handle of the slot it frees;
/// when the erased element has two children that is the handle of its inorder successor, whose
/// value moves into the erased element's slot.
///
/// # Examples
///
/// ```
/// use flat_tree::FlatBst;
///
/// let mut tree = FlatBst::new();
/// for value in [5, 2, 8, 1, 3, 7, 9] {
///     tree.insert(value);
/// }
///
/// assert_eq!(tree.len(), 7);
/// assert!(tree.contains(&3));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 5, 7, 8, 9]);
///
/// assert!(tree.erase(&2));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 5, 7, 8, 9]);
/// ```
///
/// A `FlatBst` with a known list of values can be initialized from an array:
///
/// ```
/// use flat_tree::FlatBst;
///
/// let tree = FlatBst::from([3, 1, 4, 1, 5]);
/// assert_eq!(tree.len(), 4);
/// ```
#[derive(Clone)]
pub struct FlatBst<T, C = Natural> {
    raw: RawFlatBst<T, C>,
}

impl<T> FlatBst<T> {
    /// Makes a new, empty `FlatBst` ordered by `T`'s [`Ord`] impl.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::new();
    /// tree.insert(1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawFlatBst::new(Natural),
        }
    }
}

impl<T, C> FlatBst<T, C> {
    /// Makes a new, empty `FlatBst` ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::with_compare(|a: &&str, b: &&str| a.len() < b.len());
    /// tree.insert("ccc");
    /// tree.insert("a");
    /// assert!(!tree.insert("zzz").1); // same length as "ccc"
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["a", "ccc"]);
    /// ```
    #[must_use]
    pub const fn with_compare(compare: C) -> Self {
        Self {
            raw: RawFlatBst::new(compare),
        }
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of nodes on the longest root-to-leaf path (0 when empty).
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::new();
    /// tree.insert_many(1..=7);
    /// assert_eq!(tree.height(), 7);
    /// tree.rebalance();
    /// assert_eq!(tree.height(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Removes every element and invalidates every handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::from([1, 2]);
    /// let handle = tree.find_handle(&1);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// tree.insert(1);
    /// assert_eq!(tree.get(handle), None);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the element `handle` refers to, or `None` if the handle is stale.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.raw.resolve(handle).map(|link| self.raw.value(link))
    }

    /// Returns the element `handle` refers to, or [`Error::NotFound`] if the handle is stale.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for [`Handle::NPOS`], out-of-range handles, and handles whose slot has
    /// been freed or reused since they were issued.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::{Error, FlatBst, Handle};
    ///
    /// let tree = FlatBst::from([1]);
    /// assert_eq!(tree.try_get(tree.find_handle(&1)), Ok(&1));
    /// assert_eq!(tree.try_get(Handle::NPOS), Err(Error::NotFound));
    /// ```
    pub fn try_get(&self, handle: Handle) -> Result<&T, Error> {
        self.get(handle).ok_or(Error::NotFound)
    }

    /// Returns `true` if `handle` refers to a live element of this tree.
    #[must_use]
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.raw.resolve(handle).is_some()
    }

    /// Returns the smallest element.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let tree = FlatBst::from([2, 3, 1]);
    /// assert_eq!(tree.first(), Some(&1));
    /// assert_eq!(tree.last(), Some(&3));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        let link = self.raw.leftmost(self.raw.root());
        link.get().map(|_| self.raw.value(link))
    }

    /// Returns the largest element.
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        let link = self.raw.rightmost(self.raw.root());
        link.get().map(|_| self.raw.value(link))
    }

    /// Calls `f` on every element in ascending order.
    ///
    /// The walk uses an explicit stack, so degenerate (chain-shaped) trees cannot overflow the call
    /// stack.
    pub fn for_each_inorder<F: FnMut(&T)>(&self, mut f: F) {
        self.raw.walk_inorder(|link| f(self.raw.value(link)));
    }

    /// Calls `f` on every element in preorder (node, left subtree, right subtree).
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::new();
    /// tree.insert_many([4, 2, 6, 1, 3, 5, 7]);
    ///
    /// let mut preorder = Vec::new();
    /// tree.for_each_preorder(|v| preorder.push(*v));
    /// assert_eq!(preorder, [4, 2, 1, 3, 6, 5, 7]);
    /// ```
    pub fn for_each_preorder<F: FnMut(&T)>(&self, mut f: F) {
        self.raw.walk_preorder(|link| f(self.raw.value(link)));
    }

    /// Calls `f` on every element in postorder (left subtree, right subtree, node).
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::new();
    /// tree.insert_many([4, 2, 6, 1, 3, 5, 7]);
    ///
    /// let mut postorder = Vec::new();
    /// tree.for_each_postorder(|v| postorder.push(*v));
    /// assert_eq!(postorder, [1, 3, 2, 5, 7, 6, 4]);
    /// ```
    pub fn for_each_postorder<F: FnMut(&T)>(&self, mut f: F) {
        self.raw.walk_postorder(|link| f(self.raw.value(link)));
    }

    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let tree = FlatBst::from([3, 1, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(&self.raw, InorderCursor::first(&self.raw), self.len())
    }
}

impl<T, C: Compare<T>> FlatBst<T, C> {
    /// Adds a value to the tree.
    ///
    /// Returns the handle of the element equivalent to `value` and whether it was newly
    /// inserted. Duplicates are never overwritten: if an equivalent element is already present,
    /// its handle is returned with `false` and `value` is dropped.
    ///
    /// No rebalancing happens; see [`rebalance`](FlatBst::rebalance).
    ///
    /// # Panics
    ///
    /// Panics if the arena cannot address another slot. Use [`try_insert`](FlatBst::try_insert)
    /// to handle that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::new();
    /// let (handle, inserted) = tree.insert(2);
    /// assert!(inserted);
    /// assert_eq!(tree.insert(2), (handle, false));
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn insert(&mut self, value: T) -> (Handle, bool) {
        match self.try_insert(value) {
            Ok(result) => result,
            Err(error) => panic!("`FlatBst::insert()` - {error}!"),
        }
    }

    /// Adds a value to the tree, reporting capacity exhaustion instead of panicking.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] if a new slot is needed and the arena is full. The tree is left
    /// unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<(Handle, bool), Error> {
        let (link, inserted) = self.raw.insert(value)?;
        Ok((self.raw.handle(link), inserted))
    }

    /// Constructs a value from `args` and inserts it.
    ///
    /// The value is constructed exactly once; if an equivalent element exists it is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree: FlatBst<String> = FlatBst::new();
    /// assert!(tree.emplace("pear").1);
    /// assert!(!tree.emplace("pear").1);
    /// ```
    pub fn emplace<A>(&mut self, args: A) -> (Handle, bool)
    where
        T: From<A>,
    {
        self.insert(T::from(args))
    }

    /// Inserts every value in sequence order, returning how many were new.
    ///
    /// Duplicates, within `values` or against existing contents, are skipped. The input is not
    /// sorted and the tree is not rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::new();
    /// assert_eq!(tree.insert_many([5, 2, 8]), 3);
    /// assert_eq!(tree.insert_many([1, 2, 2, 10]), 2);
    /// assert_eq!(tree.len(), 5);
    /// ```
    pub fn insert_many<I: IntoIterator<Item = T>>(&mut self, values: I) -> usize {
        let values = values.into_iter();
        self.reserve(values.size_hint().0);

        let mut inserted = 0;
        for value in values {
            if self.insert(value).1 {
                inserted += 1;
            }
        }
        inserted
    }

    /// Returns a reference to the element equivalent to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let tree = FlatBst::from([4, 2, 6]);
    /// assert_eq!(tree.find(&2), Some(&2));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn find(&self, key: &T) -> Option<&T> {
        let link = self.raw.search(key);
        link.get().map(|_| self.raw.value(link))
    }

    /// Returns the handle of the element equivalent to `key`, or [`Handle::NPOS`].
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn find_handle(&self, key: &T) -> Handle {
        self.raw.handle_or_npos(self.raw.search(key))
    }

    /// Returns `true` if the tree contains an element equivalent to `key`.
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        !self.raw.search(key).is_nil()
    }

    /// Returns the handle of the first element not ordered before `key`, or [`Handle::NPOS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let tree = FlatBst::from([10, 20, 30]);
    /// assert_eq!(tree.get(tree.lower_bound(&20)), Some(&20));
    /// assert_eq!(tree.get(tree.lower_bound(&21)), Some(&30));
    /// assert!(tree.lower_bound(&31).is_npos());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn lower_bound(&self, key: &T) -> Handle {
        self.raw.handle_or_npos(self.raw.lower_bound(key))
    }

    /// Returns the handle of the first element ordered after `key`, or [`Handle::NPOS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let tree = FlatBst::from([10, 20, 30]);
    /// assert_eq!(tree.get(tree.upper_bound(&20)), Some(&30));
    /// assert!(tree.upper_bound(&30).is_npos());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn upper_bound(&self, key: &T) -> Handle {
        self.raw.handle_or_npos(self.raw.upper_bound(key))
    }

    /// Returns `(lower_bound(key), upper_bound(key))`, computed in a single descent.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let tree = FlatBst::from([10, 20, 30]);
    /// let (lower, upper) = tree.equal_range(&20);
    /// assert_eq!((tree.get(lower), tree.get(upper)), (Some(&20), Some(&30)));
    ///
    /// let (lower, upper) = tree.equal_range(&25);
    /// assert_eq!(lower, upper);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn equal_range(&self, key: &T) -> (Handle, Handle) {
        let (lower, upper) = self.raw.equal_range(key);
        (self.raw.handle_or_npos(lower), self.raw.handle_or_npos(upper))
    }

    /// Removes the element equivalent to `key`. Returns whether such an element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::from([5, 2, 8, 1, 3]);
    /// assert!(tree.erase(&2));
    /// assert!(!tree.erase(&2));
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 5, 8]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn erase(&mut self, key: &T) -> bool {
        self.remove(key).is_some()
    }

    /// Removes the element equivalent to `key` and returns it.
    ///
    /// If the element has two children its inorder successor's value moves into its slot: the
    /// removed element's handle stays valid and now refers to the successor, while the
    /// successor's old handle becomes stale. Moves cannot fail, so the tree is always left
    /// consistent.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let mut tree = FlatBst::from([2, 1, 3]);
    /// let root = tree.find_handle(&2);
    /// assert_eq!(tree.remove(&2), Some(2));
    /// assert_eq!(tree.get(root), Some(&3));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn remove(&mut self, key: &T) -> Option<T> {
        self.raw.remove(key)
    }

    /// Removes the element `handle` refers to and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the handle is stale; nothing is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::{Error, FlatBst};
    ///
    /// let mut tree = FlatBst::from([1, 2, 3]);
    /// let handle = tree.find_handle(&3);
    /// assert_eq!(tree.remove_handle(handle), Ok(3));
    /// assert_eq!(tree.remove_handle(handle), Err(Error::NotFound));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn remove_handle(&mut self, handle: Handle) -> Result<T, Error> {
        self.raw.remove_handle(handle)
    }

    /// Constructs an iterator over a sub-range of elements in ascending order.
    ///
    /// The start of the range is found with a single descent; iteration then stops at the first
    /// element past the end bound. A range whose start is past its end yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    /// use std::ops::Bound::{Excluded, Included};
    ///
    /// let tree = FlatBst::from([3, 5, 8, 13, 21]);
    /// assert_eq!(tree.range(4..=13).copied().collect::<Vec<_>>(), [5, 8, 13]);
    /// assert_eq!(tree.range((Excluded(5), Included(21))).count(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth) to start, amortized O(1) per element.
    pub fn range<R: RangeBounds<T>>(&self, range: R) -> Range<'_, T, C>
    where
        T: Clone,
    {
        Range::new(&self.raw, &range)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for FlatBst<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C> PartialEq for FlatBst<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for FlatBst<T, C> {}

impl<T, C: Default> Default for FlatBst<T, C> {
    /// Creates an empty `FlatBst`.
    fn default() -> Self {
        Self::with_compare(C::default())
    }
}

impl<T, C: Compare<T>> Extend<T> for FlatBst<T, C> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_many(iter);
    }
}

impl<'a, T: 'a + Copy, C: Compare<T>> Extend<&'a T> for FlatBst<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.insert_many(iter.into_iter().copied());
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for FlatBst<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with_compare(iter, C::default())
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for FlatBst<T> {
    /// Converts a `[T; N]` into a `FlatBst<T>`, dropping duplicates.
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let tree1 = FlatBst::from([1, 2, 3, 4]);
    /// let tree2: FlatBst<_> = [4, 3, 2, 1].into();
    /// assert_eq!(tree1, tree2);
    /// ```
    fn from(values: [T; N]) -> Self {
        Self::from_iter(values)
    }
}

impl<T, C> Index<Handle> for FlatBst<T, C> {
    type Output = T;

    /// Returns the element `handle` refers to.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale. Use [`FlatBst::get`] for a checked lookup.
    fn index(&self, handle: Handle) -> &T {
        match self.get(handle) {
            Some(value) => value,
            None => panic!("`FlatBst::index()` - `handle` is stale or invalid!"),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a FlatBst<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Iter<'a, T, C> {
        self.iter()
    }
}

impl<T, C> IntoIterator for FlatBst<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `FlatBst`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_tree::FlatBst;
    ///
    /// let tree = FlatBst::from([1, 2, 3, 4]);
    /// let v: Vec<_> = tree.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter::new(self.raw.drain_inorder())
    }
}
