use smallvec::SmallVec;

use super::Link;
use super::raw_flat_bst::RawFlatBst;
use crate::compare::Compare;

/// Explicit traversal stack. Stays inline for trees up to 32 levels deep.
pub(crate) type Stack = SmallVec<[Link; 32]>;

impl<T, C> RawFlatBst<T, C> {
    pub(crate) fn walk_inorder(&self, mut f: impl FnMut(Link)) {
        let mut stack = Stack::new();
        let mut current = self.root;

        while !current.is_nil() || !stack.is_empty() {
            while !current.is_nil() {
                stack.push(current);
                current = self.left(current);
            }
            let Some(node) = stack.pop() else { break };
            f(node);
            current = self.right(node);
        }
    }

    pub(crate) fn walk_preorder(&self, mut f: impl FnMut(Link)) {
        if self.root.is_nil() {
            return;
        }

        let mut stack = Stack::new();
        stack.push(self.root);

        while let Some(node) = stack.pop() {
            f(node);
            let (left, right) = (self.left(node), self.right(node));
            if !right.is_nil() {
                stack.push(right);
            }
            if !left.is_nil() {
                stack.push(left);
            }
        }
    }

    pub(crate) fn walk_postorder(&self, mut f: impl FnMut(Link)) {
        let mut stack = Stack::new();
        let mut current = self.root;
        let mut last = Link::NIL;

        loop {
            while !current.is_nil() {
                stack.push(current);
                current = self.left(current);
            }
            let Some(&top) = stack.last() else { break };

            let right = self.right(top);
            if !right.is_nil() && right != last {
                current = right;
            } else {
                f(top);
                last = top;
                stack.pop();
            }
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut stack: SmallVec<[(Link, usize); 32]> = SmallVec::new();
        let mut height = 0;
        if !self.root.is_nil() {
            stack.push((self.root, 1));
        }

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [self.left(node), self.right(node)] {
                if !child.is_nil() {
                    stack.push((child, depth + 1));
                }
            }
        }

        height
    }
}

/// A forward-only inorder position: the current node plus the ancestors still to be visited.
#[derive(Clone, Debug)]
pub(crate) struct InorderCursor {
    stack: Stack,
    current: Link,
}

impl InorderCursor {
    /// The past-the-end position.
    pub(crate) fn end() -> Self {
        Self {
            stack: Stack::new(),
            current: Link::NIL,
        }
    }

    /// Positions the cursor on the smallest node.
    pub(crate) fn first<T, C>(tree: &RawFlatBst<T, C>) -> Self {
        let mut cursor = Self::end();
        cursor.push_left(tree, tree.root());
        cursor.pop();
        cursor
    }

    /// Positions the cursor on the first node not before `key` (`inclusive`) or after `key`.
    pub(crate) fn seek<T, C: Compare<T>>(tree: &RawFlatBst<T, C>, key: &T, inclusive: bool) -> Self {
        let mut cursor = Self::end();
        let mut current = tree.root();

        while !current.is_nil() {
            let value = tree.value(current);
            let keep = if inclusive {
                !tree.compare().less(value, key)
            } else {
                tree.compare().less(key, value)
            };
            if keep {
                cursor.stack.push(current);
                current = tree.left(current);
            } else {
                current = tree.right(current);
            }
        }

        cursor.pop();
        cursor
    }

    #[inline]
    pub(crate) const fn current(&self) -> Link {
        self.current
    }

    /// Moves to the inorder successor. Does nothing at the end.
    pub(crate) fn advance<T, C>(&mut self, tree: &RawFlatBst<T, C>) {
        if self.current.is_nil() {
            return;
        }
        self.push_left(tree, tree.right(self.current));
        self.pop();
    }

    fn push_left<T, C>(&mut self, tree: &RawFlatBst<T, C>, mut link: Link) {
        while !link.is_nil() {
            self.stack.push(link);
            link = tree.left(link);
        }
    }

    fn pop(&mut self) {
        self.current = self.stack.pop().unwrap_or(Link::NIL);
    }
}
