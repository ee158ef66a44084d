use core::fmt;

/// The per-slot counter bumped on every alive/free transition.
pub(crate) type Generation = u32;

/// A generational reference to one element of a [`FlatBst`](crate::FlatBst).
///
/// A handle packs the raw slot index together with the slot's generation at the time the handle
/// was issued. It does not keep the element alive: once the element is erased, or the tree is
/// cleared or rebuilt, the handle becomes *stale* and every checked accessor reports it as absent,
/// even if a new element later occupies the same slot.
///
/// [`Handle::NPOS`] means "no such element" and is never valid.
///
/// # Examples
///
/// ```
/// use flat_tree::{FlatBst, Handle};
///
/// let mut tree = FlatBst::new();
/// let (handle, inserted) = tree.insert(7);
/// assert!(inserted);
/// assert_eq!(tree.get(handle), Some(&7));
///
/// tree.erase(&7);
/// assert_eq!(tree.get(handle), None);
/// assert_eq!(tree.find_handle(&7), Handle::NPOS);
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Handle(u64);

impl Handle {
    /// The "no such element" handle.
    pub const NPOS: Self = Self(u64::MAX);

    const INDEX_BITS: u32 = 32;
    const INDEX_MASK: u64 = (1 << Self::INDEX_BITS) - 1;

    #[inline]
    pub(crate) const fn new(index: usize, generation: Generation) -> Self {
        Self(((generation as u64) << Self::INDEX_BITS) | (index as u64 & Self::INDEX_MASK))
    }

    /// Returns the raw slot index this handle points at.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn index(self) -> usize {
        (self.0 & Self::INDEX_MASK) as usize
    }

    /// Returns the generation recorded when this handle was issued.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn generation(self) -> u32 {
        (self.0 >> Self::INDEX_BITS) as Generation
    }

    /// Returns `true` if this is [`Handle::NPOS`].
    #[inline]
    #[must_use]
    pub const fn is_npos(self) -> bool {
        self.0 == Self::NPOS.0
    }

    /// Returns the packed representation.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Rebuilds a handle from [`Handle::to_bits`].
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::NPOS
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_npos() {
            f.write_str("Handle::NPOS")
        } else {
            f.debug_struct("Handle")
                .field("index", &self.index())
                .field("generation", &self.generation())
                .finish()
        }
    }
}
