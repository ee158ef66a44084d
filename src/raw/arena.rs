use alloc::vec::Vec;

use super::Link;
use crate::Error;
use crate::handle::{Generation, Handle};

/// One arena cell. Even generations are alive, odd generations are free.
///
/// A free slot keeps its value as `None` and threads the free list through `right`.
#[derive(Clone)]
pub(crate) struct Slot<T> {
    generation: Generation,
    left: Link,
    right: Link,
    value: Option<T>,
}

impl<T> Slot<T> {
    #[inline]
    const fn is_alive(&self) -> bool {
        self.generation & 1 == 0
    }

    #[inline]
    pub(crate) const fn left(&self) -> Link {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Link {
        self.right
    }
}

#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Link,
    holes: usize,
    // Generation given to appended slots. Advanced past `high_water` on `clear()`.
    epoch: Generation,
    high_water: Generation,
}

impl<T> Arena<T> {
    /// Maximum number of slots, alive or free.
    pub(crate) const MAX_SLOTS: usize = Link::MAX_INDEX + 1;

    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: Link::NIL,
            holes: 0,
            epoch: 0,
            high_water: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut arena = Self::new();
        arena.slots.reserve(capacity.min(Self::MAX_SLOTS));
        arena
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        let room = Self::MAX_SLOTS - self.slots.len();
        self.slots.reserve(additional.saturating_sub(self.holes).min(room));
    }

    /// Number of alive slots.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len() - self.holes
    }

    /// Number of free slots waiting for reuse.
    pub(crate) const fn holes(&self) -> usize {
        self.holes
    }

    pub(crate) fn alloc(&mut self, value: T) -> Result<Link, Error> {
        if let Some(index) = self.free_head.get() {
            // Reuse the most recently freed slot.
            let slot = &mut self.slots[index];
            debug_assert!(!slot.is_alive() && slot.value.is_none());
            self.free_head = slot.right;
            slot.generation = slot.generation.wrapping_add(1);
            slot.left = Link::NIL;
            slot.right = Link::NIL;
            slot.value = Some(value);
            self.high_water = self.high_water.max(slot.generation);
            self.holes -= 1;
            return Ok(Link::from_index(index));
        }

        if self.slots.len() >= Self::MAX_SLOTS {
            log::debug!("arena capacity exhausted at {} slots", Self::MAX_SLOTS);
            return Err(Error::CapacityExceeded { max: Self::MAX_SLOTS });
        }

        self.slots.push(Slot {
            generation: self.epoch,
            left: Link::NIL,
            right: Link::NIL,
            value: Some(value),
        });
        Ok(Link::from_index(self.slots.len() - 1))
    }

    /// Destroys the value in `link` and pushes the slot onto the free list.
    pub(crate) fn free(&mut self, link: Link) -> T {
        let slot = &mut self.slots[link.to_index()];
        assert!(slot.is_alive(), "`Arena::free()` - `link` is not alive!");
        let Some(value) = slot.value.take() else {
            panic!("`Arena::free()` - alive slot holds no value!");
        };
        slot.generation = slot.generation.wrapping_add(1);
        slot.left = Link::NIL;
        slot.right = self.free_head;
        self.high_water = self.high_water.max(slot.generation);
        self.free_head = link;
        self.holes += 1;
        value
    }

    /// Drops every slot. Handles issued before the call never resolve afterwards.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = Link::NIL;
        self.holes = 0;
        self.epoch = (self.high_water | 1).wrapping_add(1);
        self.high_water = self.epoch;
    }

    #[inline]
    pub(crate) fn handle(&self, link: Link) -> Handle {
        Handle::new(link.to_index(), self.slot(link).generation)
    }

    /// Maps a handle back to its slot if the handle is still current.
    #[inline]
    pub(crate) fn resolve(&self, handle: Handle) -> Option<Link> {
        let index = handle.index();
        let slot = self.slots.get(index)?;
        (slot.is_alive() && slot.generation == handle.generation()).then(|| Link::from_index(index))
    }

    #[inline]
    pub(crate) fn slot(&self, link: Link) -> &Slot<T> {
        let slot = &self.slots[link.to_index()];
        debug_assert!(slot.is_alive(), "`Arena::slot()` - `link` is not alive!");
        slot
    }

    #[inline]
    pub(crate) fn value(&self, link: Link) -> &T {
        self.slots[link.to_index()].value.as_ref().expect("`Arena::value()` - `link` is not alive!")
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, link: Link) -> &mut T {
        self.slots[link.to_index()].value.as_mut().expect("`Arena::value_mut()` - `link` is not alive!")
    }

    #[inline]
    pub(crate) fn set_left(&mut self, link: Link, left: Link) {
        self.slots[link.to_index()].left = left;
    }

    #[inline]
    pub(crate) fn set_right(&mut self, link: Link, right: Link) {
        self.slots[link.to_index()].right = right;
    }

    /// Walks the free list from its head.
    #[cfg(test)]
    pub(crate) fn free_links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        let mut current = self.free_head;
        while let Some(index) = current.get() {
            assert!(!self.slots[index].is_alive(), "free list reaches an alive slot");
            assert!(links.len() < self.slots.len(), "free list has a cycle");
            links.push(current);
            current = self.slots[index].right;
        }
        links
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn is_alive(&self, index: usize) -> bool {
        self.slots[index].is_alive()
    }
}
