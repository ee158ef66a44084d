use core::mem;

use super::arena::Arena;
use super::Link;
use crate::compare::Compare;
use crate::{Error, Handle};

/// The unbalanced binary search tree backing `FlatBst`.
///
/// All algorithms work on raw [`Link`]s into a single [`Arena`]; handles only appear at the
/// boundary (`handle` / `resolve`).
#[derive(Clone)]
pub(crate) struct RawFlatBst<T, C> {
    /// Arena storing every node.
    pub(super) arena: Arena<T>,
    /// Link to the root node, or `Link::NIL` if the tree is empty.
    pub(super) root: Link,
    /// The ordering relation.
    pub(super) compare: C,
}

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Side {
    Left,
    Right,
}

impl<T, C> RawFlatBst<T, C> {
    pub(crate) const fn new(compare: C) -> Self {
        Self {
            arena: Arena::new(),
            root: Link::NIL,
            compare,
        }
    }

    pub(crate) fn with_capacity(capacity: usize, compare: C) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: Link::NIL,
            compare,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.arena.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) const fn holes(&self) -> usize {
        self.arena.holes()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional);
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.root = Link::NIL;
    }

    pub(crate) const fn root(&self) -> Link {
        self.root
    }

    pub(crate) const fn compare(&self) -> &C {
        &self.compare
    }

    #[inline]
    pub(crate) fn left(&self, link: Link) -> Link {
        self.arena.slot(link).left()
    }

    #[inline]
    pub(crate) fn right(&self, link: Link) -> Link {
        self.arena.slot(link).right()
    }

    #[inline]
    pub(crate) fn value(&self, link: Link) -> &T {
        self.arena.value(link)
    }

    #[inline]
    pub(crate) fn handle(&self, link: Link) -> Handle {
        self.arena.handle(link)
    }

    /// Returns `Handle::NPOS` for `Link::NIL`.
    #[inline]
    pub(crate) fn handle_or_npos(&self, link: Link) -> Handle {
        if link.is_nil() { Handle::NPOS } else { self.handle(link) }
    }

    #[inline]
    pub(crate) fn resolve(&self, handle: Handle) -> Option<Link> {
        self.arena.resolve(handle)
    }

    /// Leftmost node of the subtree rooted at `link`.
    pub(crate) fn leftmost(&self, mut link: Link) -> Link {
        while !link.is_nil() {
            let left = self.left(link);
            if left.is_nil() {
                break;
            }
            link = left;
        }
        link
    }

    /// Rightmost node of the subtree rooted at `link`.
    pub(crate) fn rightmost(&self, mut link: Link) -> Link {
        while !link.is_nil() {
            let right = self.right(link);
            if right.is_nil() {
                break;
            }
            link = right;
        }
        link
    }

    /// Points `parent`'s link to `old_child` at `new_child` instead, or replaces the root when
    /// `parent` is `Link::NIL`.
    fn relink(&mut self, parent: Link, old_child: Link, new_child: Link) {
        if parent.is_nil() {
            self.root = new_child;
            return;
        }

        let (left, right) = (self.left(parent), self.right(parent));
        if left == old_child {
            self.arena.set_left(parent, new_child);
        } else if right == old_child {
            self.arena.set_right(parent, new_child);
        } else {
            panic!("`RawFlatBst::relink()` - `parent` does not link to `old_child`!");
        }
    }

    /// Unlinks `node` (whose parent is `parent`) and returns its value.
    pub(crate) fn remove_at(&mut self, parent: Link, node: Link) -> T {
        let (left, right) = (self.left(node), self.right(node));

        match (left.is_nil(), right.is_nil()) {
            // No children, or one: splice the (possibly absent) child into the parent.
            (true, _) => {
                self.relink(parent, node, right);
                self.arena.free(node)
            }
            (false, true) => {
                self.relink(parent, node, left);
                self.arena.free(node)
            }
            // Two children: pull the inorder successor's value up into `node` and unlink the
            // successor instead. `node` keeps its slot, so its handle stays valid.
            (false, false) => {
                let mut successor_parent = node;
                let mut successor = right;
                loop {
                    let next = self.left(successor);
                    if next.is_nil() {
                        break;
                    }
                    successor_parent = successor;
                    successor = next;
                }

                let successor_right = self.right(successor);
                self.relink(successor_parent, successor, successor_right);
                let successor_value = self.arena.free(successor);
                mem::replace(self.arena.value_mut(node), successor_value)
            }
        }
    }
}

impl<T, C: Compare<T>> RawFlatBst<T, C> {
    /// Finds the node equivalent to `key` together with its parent.
    ///
    /// Returns `(parent, node)`; `parent` is `Link::NIL` for the root.
    pub(crate) fn search_with_parent(&self, key: &T) -> Option<(Link, Link)> {
        let mut parent = Link::NIL;
        let mut current = self.root;

        while !current.is_nil() {
            let value = self.value(current);
            if self.compare.less(key, value) {
                parent = current;
                current = self.left(current);
            } else if self.compare.less(value, key) {
                parent = current;
                current = self.right(current);
            } else {
                return Some((parent, current));
            }
        }

        None
    }

    pub(crate) fn search(&self, key: &T) -> Link {
        self.search_with_parent(key).map_or(Link::NIL, |(_, node)| node)
    }

    /// First node not ordered before `key`.
    pub(crate) fn lower_bound(&self, key: &T) -> Link {
        let mut best = Link::NIL;
        let mut current = self.root;

        while !current.is_nil() {
            if self.compare.less(self.value(current), key) {
                current = self.right(current);
            } else {
                best = current;
                current = self.left(current);
            }
        }

        best
    }

    /// First node ordered after `key`.
    pub(crate) fn upper_bound(&self, key: &T) -> Link {
        let mut best = Link::NIL;
        let mut current = self.root;

        while !current.is_nil() {
            if self.compare.less(key, self.value(current)) {
                best = current;
                current = self.left(current);
            } else {
                current = self.right(current);
            }
        }

        best
    }

    /// `(lower_bound(key), upper_bound(key))` in a single descent.
    pub(crate) fn equal_range(&self, key: &T) -> (Link, Link) {
        // Until the descent meets `key` itself, both bounds share every candidate.
        let mut upper = Link::NIL;
        let mut current = self.root;

        while !current.is_nil() {
            let value = self.value(current);
            if self.compare.less(key, value) {
                upper = current;
                current = self.left(current);
            } else if self.compare.less(value, key) {
                current = self.right(current);
            } else {
                // Keys are unique: the match is the lower bound and its successor the upper.
                let right = self.right(current);
                if !right.is_nil() {
                    upper = self.leftmost(right);
                }
                return (current, upper);
            }
        }

        (upper, upper)
    }

    /// Inserts `value` at a leaf unless an equivalent value is present.
    ///
    /// Returns the node holding the (new or existing) value and whether it was inserted. On a
    /// duplicate, `value` is dropped.
    pub(crate) fn insert(&mut self, value: T) -> Result<(Link, bool), Error> {
        let mut parent = Link::NIL;
        let mut side = Side::Left;
        let mut current = self.root;

        while !current.is_nil() {
            let existing = self.value(current);
            parent = current;
            if self.compare.less(&value, existing) {
                side = Side::Left;
                current = self.left(current);
            } else if self.compare.less(existing, &value) {
                side = Side::Right;
                current = self.right(current);
            } else {
                return Ok((current, false));
            }
        }

        let node = self.arena.alloc(value)?;
        match (parent.is_nil(), side) {
            (true, _) => self.root = node,
            (false, Side::Left) => self.arena.set_left(parent, node),
            (false, Side::Right) => self.arena.set_right(parent, node),
        }

        Ok((node, true))
    }

    pub(crate) fn remove(&mut self, key: &T) -> Option<T> {
        let (parent, node) = self.search_with_parent(key)?;
        Some(self.remove_at(parent, node))
    }

    /// Removes the node a handle refers to. The parent is located by searching for the node's
    /// own value, which is unique in the tree.
    pub(crate) fn remove_handle(&mut self, handle: Handle) -> Result<T, Error> {
        let node = self.resolve(handle).ok_or(Error::NotFound)?;
        let Some((parent, found)) = self.search_with_parent(self.value(node)) else {
            panic!("`RawFlatBst::remove_handle()` - live node is unreachable from the root!");
        };
        debug_assert_eq!(found, node);
        Ok(self.remove_at(parent, node))
    }
}

#[cfg(test)]
impl<T, C: Compare<T>> RawFlatBst<T, C> {
    /// Checks every structural invariant, panicking on the first violation.
    pub(crate) fn check_invariants(&self) {
        use alloc::vec;
        use alloc::vec::Vec;

        let slot_count = self.arena.slot_count();
        let mut seen = vec![false; slot_count];
        let mut inorder: Vec<Link> = Vec::new();
        self.walk_inorder(|link| inorder.push(link));

        for &link in &inorder {
            let index = link.to_index();
            assert!(self.arena.is_alive(index), "reachable slot {index} is free");
            assert!(!seen[index], "slot {index} is reachable twice");
            seen[index] = true;
        }
        for pair in inorder.windows(2) {
            assert!(
                self.compare.less(self.value(pair[0]), self.value(pair[1])),
                "inorder sequence is not strictly increasing"
            );
        }
        assert_eq!(inorder.len(), self.len(), "live count does not match reachable nodes");

        let free = self.arena.free_links();
        assert_eq!(free.len(), self.holes(), "hole count does not match the free list");
        for link in free {
            assert!(!seen[link.to_index()], "free slot is reachable from the root");
            seen[link.to_index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "slot is neither reachable nor free");
    }
}
