use core::fmt;
use core::ptr;

use super::RbTree;
use crate::allocator::{Allocator, DefaultAllocator};
use crate::compare::Natural;
use crate::raw::Handle;

/// A bidirectional position over the values of an [`RbTree`].
///
/// A cursor is either at a value or at the end sentinel. Stepping off either
/// end of the tree moves it to the sentinel and remembers the value it left;
/// from the sentinel, both [`move_next`](Cursor::move_next) and
/// [`move_prev`](Cursor::move_prev) return to that remembered value.
///
/// # Examples
///
/// ```
/// use raw_containers::RbTree;
///
/// let tree = RbTree::from([1, 2]);
/// let mut cursor = tree.begin();
/// assert_eq!(cursor.get(), Some(&1));
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor, tree.end());
/// cursor.move_prev();
/// assert_eq!(cursor.get(), Some(&2));
/// ```
pub struct Cursor<'a, T, C = Natural, A: Allocator = DefaultAllocator> {
    tree: &'a RbTree<T, C, A>,
    node: Option<Handle>,
    // Where the cursor was before it reached the sentinel.
    previous: Option<Handle>,
}

impl<'a, T, C, A: Allocator> Cursor<'a, T, C, A> {
    pub(super) const fn new(tree: &'a RbTree<T, C, A>, node: Option<Handle>, previous: Option<Handle>) -> Self {
        Cursor { tree, node, previous }
    }

    /// Returns the value at the cursor, or `None` at the end sentinel.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.node.map(|node| self.tree.raw.value(node))
    }

    /// Returns `true` if the cursor is at the end sentinel.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Returns the number of values before the cursor, or `None` at the end sentinel.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        self.node.map(|node| self.tree.raw.rank_of(node))
    }

    /// Moves to the next value in order.
    pub fn move_next(&mut self) {
        self.step(|tree, node| tree.raw.successor(node));
    }

    /// Moves to the previous value in order.
    pub fn move_prev(&mut self) {
        self.step(|tree, node| tree.raw.predecessor(node));
    }

    fn step(&mut self, neighbour: impl FnOnce(&RbTree<T, C, A>, Handle) -> Option<Handle>) {
        match self.node {
            None => self.node = self.previous.take(),
            Some(node) => {
                self.node = neighbour(self.tree, node);
                if self.node.is_none() {
                    self.previous = Some(node);
                }
            }
        }
    }
}

impl<T, C, A: Allocator> Clone for Cursor<'_, T, C, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C, A: Allocator> Copy for Cursor<'_, T, C, A> {}

impl<T: fmt::Debug, C, A: Allocator> fmt::Debug for Cursor<'_, T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<T, C, A: Allocator> PartialEq for Cursor<'_, T, C, A> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<T, C, A: Allocator> Eq for Cursor<'_, T, C, A> {}
