use core::cmp::Ordering;

/// A strict weak ordering ("less-than") over `T`.
///
/// Two values are *equivalent* when neither is less than the other; a [`FlatBst`](crate::FlatBst)
/// stores at most one value per equivalence class.
///
/// Any `Fn(&T, &T) -> bool` closure is a `Compare<T>`:
///
/// ```
/// use flat_tree::FlatBst;
///
/// let mut tree = FlatBst::with_compare(|a: &i32, b: &i32| a > b);
/// tree.insert_many([1, 3, 2]);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
pub trait Compare<T: ?Sized> {
    /// Returns `true` if `a` is ordered before `b`.
    fn less(&self, a: &T, b: &T) -> bool;

    /// Returns `true` if neither value is ordered before the other.
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }

    /// Derives a total [`Ordering`] from [`Compare::less`].
    #[inline]
    fn ordering(&self, a: &T, b: &T) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// The natural ordering of an [`Ord`] type. This is the default ordering of a `FlatBst`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Reverses another ordering.
///
/// ```
/// use flat_tree::{FlatBst, Natural, ReverseOrder};
///
/// let tree = FlatBst::from_iter_with_compare([1, 5, 3], ReverseOrder(Natural));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [5, 3, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ReverseOrder<C = Natural>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for ReverseOrder<C> {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.0.less(b, a)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
