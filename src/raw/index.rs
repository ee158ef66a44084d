#[cfg(test)]
pub(crate) type RawIndex = u16;
#[cfg(not(test))]
pub(crate) type RawIndex = u32;

/// A raw slot index, or the reserved `NIL` sentinel meaning "no link".
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Link(RawIndex);

impl Link {
    /// The no-link sentinel. It occupies the top of the index range, so it is
    /// distinct from every addressable slot.
    pub(crate) const NIL: Self = Self(RawIndex::MAX);

    /// The largest addressable slot index.
    pub(crate) const MAX_INDEX: usize = (RawIndex::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX_INDEX, "`Link::from_index()` - `index` > `Link::MAX_INDEX`!");
        #[allow(clippy::cast_possible_truncation)]
        Self(index as RawIndex)
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        debug_assert!(!self.is_nil(), "`Link::to_index()` - `self` is `Link::NIL`!");
        self.0 as usize
    }

    #[inline]
    pub(crate) const fn is_nil(self) -> bool {
        self.0 == RawIndex::MAX
    }

    #[inline]
    pub(crate) const fn get(self) -> Option<usize> {
        if self.is_nil() { None } else { Some(self.0 as usize) }
    }
}
