use alloc::vec::{self, Vec};
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Bound, RangeBounds};
use core::ptr;

use crate::Handle;
use crate::compare::{Compare, Natural};
use crate::raw::{InorderCursor, RawFlatBst};

/// An iterator over the elements of a `FlatBst` in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`FlatBst`]. See its documentation for
/// more.
///
/// Besides yielding values, an `Iter` is a cursor: [`current`](Iter::current) and
/// [`handle`](Iter::handle) describe the element the next call to `next` will return. Two
/// iterators over the same tree compare equal when they sit on the same element (or both at the
/// end).
///
/// # Examples
///
/// ```
/// use flat_tree::FlatBst;
///
/// let tree = FlatBst::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.current(), Some(&1));
/// assert_eq!(tree.get(iter.handle()), Some(&1));
///
/// iter.next();
/// assert_eq!(iter.current(), Some(&2));
/// ```
///
/// [`iter`]: super::FlatBst::iter
/// [`FlatBst`]: super::FlatBst
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T, C = Natural> {
    tree: &'a RawFlatBst<T, C>,
    cursor: InorderCursor,
    remaining: usize,
}

impl<'a, T, C> Iter<'a, T, C> {
    pub(crate) fn new(tree: &'a RawFlatBst<T, C>, cursor: InorderCursor, remaining: usize) -> Self {
        Self { tree, cursor, remaining }
    }

    /// Returns the element the iterator is positioned on, without advancing.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        let tree = self.tree;
        let link = self.cursor.current();
        link.get().map(|_| tree.value(link))
    }

    /// Returns the handle of the element the iterator is positioned on, or [`Handle::NPOS`] at
    /// the end.
    #[must_use]
    pub fn handle(&self) -> Handle {
        self.tree.handle_or_npos(self.cursor.current())
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.current()?;
        self.cursor.advance(self.tree);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            cursor: self.cursor.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T, C> PartialEq for Iter<'_, T, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.cursor.current() == other.cursor.current()
    }
}

impl<T, C> Eq for Iter<'_, T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for Iter<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over a sub-range of elements in a `FlatBst`.
///
/// This `struct` is created by the [`range`] method on [`FlatBst`]. See its documentation for
/// more.
///
/// # Examples
///
/// ```
/// use flat_tree::FlatBst;
///
/// let tree = FlatBst::from([1, 2, 3, 4]);
/// let mut range = tree.range(2..=3);
/// assert_eq!(range.next(), Some(&2));
/// assert_eq!(range.next(), Some(&3));
/// assert_eq!(range.next(), None);
/// ```
///
/// [`range`]: super::FlatBst::range
/// [`FlatBst`]: super::FlatBst
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, T, C = Natural> {
    tree: &'a RawFlatBst<T, C>,
    cursor: InorderCursor,
    end: Bound<T>,
}

impl<'a, T, C> Range<'a, T, C> {
    pub(crate) fn new<R: RangeBounds<T>>(tree: &'a RawFlatBst<T, C>, range: &R) -> Self
    where
        T: Clone,
        C: Compare<T>,
    {
        let cursor = match range.start_bound() {
            Bound::Included(start) => InorderCursor::seek(tree, start, true),
            Bound::Excluded(start) => InorderCursor::seek(tree, start, false),
            Bound::Unbounded => InorderCursor::first(tree),
        };

        Self {
            tree,
            cursor,
            end: range.end_bound().cloned(),
        }
    }
}

impl<'a, T, C: Compare<T>> Iterator for Range<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.tree;
        let link = self.cursor.current();
        link.get()?;

        let value = tree.value(link);
        let past_end = match &self.end {
            Bound::Included(end) => tree.compare().less(end, value),
            Bound::Excluded(end) => !tree.compare().less(value, end),
            Bound::Unbounded => false,
        };
        if past_end {
            self.cursor = InorderCursor::end();
            return None;
        }

        self.cursor.advance(tree);
        Some(value)
    }
}

impl<T, C: Compare<T>> FusedIterator for Range<'_, T, C> {}

impl<T: Clone, C> Clone for Range<'_, T, C> {
    fn clone(&self) -> Self {
        Range {
            tree: self.tree,
            cursor: self.cursor.clone(),
            end: self.end.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Range<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let link = self.cursor.current();
        let next = link.get().map(|_| self.tree.value(link));
        f.debug_struct("Range").field("next", &next).field("end", &self.end).finish()
    }
}

/// An owning iterator over the elements of a `FlatBst` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`FlatBst`] (provided by the
/// [`IntoIterator`] trait).
///
/// # Examples
///
/// ```
/// use flat_tree::FlatBst;
///
/// let tree = FlatBst::from([1, 2, 3]);
/// let mut iter = tree.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next_back(), Some(3));
/// assert_eq!(iter.next(), Some(2));
/// ```
///
/// [`into_iter`]: super::FlatBst#method.into_iter
/// [`FlatBst`]: super::FlatBst
pub struct IntoIter<T> {
    inner: vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        Self { inner: values.into_iter() }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `flat_bst::IntoIter`.
    ///
    /// ```
    /// # use flat_tree::flat_bst;
    /// let iter: flat_bst::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
