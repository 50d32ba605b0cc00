use log::trace;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};
use crate::Result;
use crate::allocator::{Allocator, DefaultAllocator};

/// The red-black tree core backing `RbTree`.
///
/// The tree knows nothing about ordering: every operation that needs one
/// takes a `less` predicate. Nodes are stored in an [`Arena`] and linked by
/// handles; each node also records the size of its subtree.
pub(crate) struct RawRbTree<T, A: Allocator = DefaultAllocator> {
    nodes: Arena<Node<T>, A>,
    root: Option<Handle>,
}

impl<T, A: Allocator> RawRbTree<T, A> {
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            nodes: Arena::new_in(alloc),
            root: None,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn max_len(&self) -> usize {
        self.nodes.max_len()
    }

    pub(crate) const fn allocator(&self) -> &A {
        self.nodes.allocator()
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &T {
        &self.node(handle).value
    }

    /// Nil links count as black.
    #[inline]
    fn color(&self, handle: Option<Handle>) -> Color {
        handle.map_or(Color::Black, |h| self.node(h).color)
    }

    #[inline]
    fn is_red(&self, handle: Handle) -> bool {
        self.node(handle).color == Color::Red
    }

    #[inline]
    fn size(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.node(h).size)
    }

    /// Which child of `parent` the node `child` is.
    fn side_of(&self, child: Handle, parent: Handle) -> Side {
        if self.node(parent).left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// The furthest node towards `side` in the subtree rooted at `handle`.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.node(handle).child(side) {
            handle = child;
        }
        handle
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// The in-order neighbour of `handle` towards `side`.
    fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }
        let mut current = handle;
        let mut parent = self.node(current).parent;
        while let Some(p) = parent {
            if self.node(p).child(side) != Some(current) {
                break;
            }
            current = p;
            parent = self.node(p).parent;
        }
        parent
    }

    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    /// Points `parent`'s link to `old` (or the root, for no parent) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_of(old, p);
                self.node_mut(p).set_child(side, new);
            }
        }
    }

    /// Rotates `pivot` down towards `side`; its child on the other side takes its place.
    ///
    /// `rotate(x, Side::Left)` is the classic left rotation. The in-order
    /// sequence and all subtree sizes are preserved.
    fn rotate(&mut self, pivot: Handle, side: Side) {
        let other = side.opposite();
        let Some(riser) = self.node(pivot).child(other) else {
            unreachable!("`RawRbTree::rotate()` - `pivot` has no child to rotate up!");
        };

        let inner = self.node(riser).child(side);
        self.node_mut(pivot).set_child(other, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(pivot);
        }

        let parent = self.node(pivot).parent;
        self.node_mut(riser).parent = parent;
        self.replace_child(parent, pivot, Some(riser));
        self.node_mut(riser).set_child(side, Some(pivot));
        self.node_mut(pivot).parent = Some(riser);

        let total = self.node(pivot).size;
        let pivot_size = self.size(self.node(pivot).left) + self.size(self.node(pivot).right) + 1;
        self.node_mut(riser).size = total;
        self.node_mut(pivot).size = pivot_size;
    }

    /// Replaces the subtree rooted at `old` with the one rooted at `new`.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.node(old).parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.node_mut(new).parent = parent;
        }
    }

    /// Links `value` into the tree, after any values it is not less than.
    ///
    /// The node is allocated before the tree is touched, so on error the tree
    /// is unchanged.
    pub(crate) fn insert<F>(&mut self, value: T, mut less: F) -> Result<Handle>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let node = self.nodes.alloc(Node::new(value))?;

        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(c) = current {
            parent = Some(c);
            side = if less(self.value(node), self.value(c)) { Side::Left } else { Side::Right };
            current = self.node(c).child(side);
        }

        self.node_mut(node).parent = parent;
        match parent {
            None => self.root = Some(node),
            Some(p) => self.node_mut(p).set_child(side, Some(node)),
        }

        let mut ancestor = parent;
        while let Some(a) = ancestor {
            let n = self.node_mut(a);
            n.size += 1;
            ancestor = n.parent;
        }

        self.insert_fixup(node);
        Ok(node)
    }

    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.node(node).parent.filter(|&p| self.is_red(p)) {
            // A red node is never the root, so a red parent has a parent.
            let Some(grandparent) = self.node(parent).parent else {
                unreachable!("`RawRbTree::insert_fixup()` - red `parent` is the root!");
            };
            let side = self.side_of(parent, grandparent);

            if let Some(uncle) = self.node(grandparent).child(side.opposite()).filter(|&u| self.is_red(u)) {
                self.node_mut(parent).color = Color::Black;
                self.node_mut(uncle).color = Color::Black;
                self.node_mut(grandparent).color = Color::Red;
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.node(parent).child(side.opposite()) == Some(node) {
                // Inner child: straighten into the outer case.
                node = parent;
                self.rotate(node, side);
                let Some(p) = self.node(node).parent else {
                    unreachable!("`RawRbTree::insert_fixup()` - rotated node lost its parent!");
                };
                parent = p;
            }
            self.node_mut(parent).color = Color::Black;
            self.node_mut(grandparent).color = Color::Red;
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.node_mut(root).color = Color::Black;
        }
    }

    /// Unlinks `node` and returns its value.
    pub(crate) fn remove(&mut self, node: Handle) -> T {
        let (left, right) = (self.node(node).left, self.node(node).right);

        // The node that leaves its position: `node` itself, or its in-order
        // successor when both children are present.
        let spliced = match (left, right) {
            (Some(_), Some(r)) => self.extreme(r, Side::Left),
            _ => node,
        };

        let mut ancestor = self.node(spliced).parent;
        while let Some(a) = ancestor {
            let n = self.node_mut(a);
            n.size -= 1;
            ancestor = n.parent;
        }

        let spliced_color = self.node(spliced).color;
        let (child, child_parent) = match (left, right) {
            (None, _) => {
                let parent = self.node(node).parent;
                self.transplant(node, right);
                (right, parent)
            }
            (_, None) => {
                let parent = self.node(node).parent;
                self.transplant(node, left);
                (left, parent)
            }
            (Some(left), Some(right)) => {
                let child = self.node(spliced).right;
                let child_parent = if self.node(spliced).parent == Some(node) {
                    Some(spliced)
                } else {
                    let parent = self.node(spliced).parent;
                    self.transplant(spliced, child);
                    self.node_mut(spliced).right = Some(right);
                    self.node_mut(right).parent = Some(spliced);
                    parent
                };
                self.transplant(node, Some(spliced));
                self.node_mut(spliced).left = Some(left);
                self.node_mut(left).parent = Some(spliced);
                let (color, size) = (self.node(node).color, self.node(node).size);
                let s = self.node_mut(spliced);
                s.color = color;
                s.size = size;
                (child, child_parent)
            }
        };

        if spliced_color == Color::Black {
            self.delete_fixup(child, child_parent);
        }
        self.nodes.take(node).value
    }

    /// Restores the black height after a black node left the path through
    /// `node`, whose parent is `parent` (both may be nil).
    fn delete_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && self.color(node) == Color::Black {
            let Some(p) = parent else {
                break;
            };
            let side = if self.node(p).left == node { Side::Left } else { Side::Right };
            let other = side.opposite();

            let mut sibling = self.sibling(p, other);
            if self.is_red(sibling) {
                self.node_mut(sibling).color = Color::Black;
                self.node_mut(p).color = Color::Red;
                self.rotate(p, side);
                sibling = self.sibling(p, other);
            }

            let s = self.node(sibling);
            if self.color(s.left) == Color::Black && self.color(s.right) == Color::Black {
                self.node_mut(sibling).color = Color::Red;
                node = Some(p);
                parent = self.node(p).parent;
                continue;
            }

            if self.color(self.node(sibling).child(other)) == Color::Black {
                if let Some(near) = self.node(sibling).child(side) {
                    self.node_mut(near).color = Color::Black;
                }
                self.node_mut(sibling).color = Color::Red;
                self.rotate(sibling, other);
                sibling = self.sibling(p, other);
            }

            let parent_color = self.node(p).color;
            self.node_mut(sibling).color = parent_color;
            self.node_mut(p).color = Color::Black;
            if let Some(far) = self.node(sibling).child(other) {
                self.node_mut(far).color = Color::Black;
            }
            self.rotate(p, side);
            node = self.root;
            parent = None;
        }

        if let Some(node) = node {
            self.node_mut(node).color = Color::Black;
        }
    }

    /// The child of `parent` on `side`, which must exist during delete fixup.
    fn sibling(&self, parent: Handle, side: Side) -> Handle {
        let Some(sibling) = self.node(parent).child(side) else {
            unreachable!("`RawRbTree::delete_fixup()` - doubly black node has no sibling!");
        };
        sibling
    }

    /// Any node equivalent to `value`: neither is less than the other.
    pub(crate) fn find<F>(&self, value: &T, mut less: F) -> Option<Handle>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut current = self.root;
        while let Some(c) = current {
            let candidate = self.value(c);
            current = if less(value, candidate) {
                self.node(c).left
            } else if less(candidate, value) {
                self.node(c).right
            } else {
                return Some(c);
            };
        }
        None
    }

    /// The first node in order that is not less than `value`.
    pub(crate) fn first_not_less<F>(&self, value: &T, mut less: F) -> Option<Handle>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut found = None;
        let mut current = self.root;
        while let Some(c) = current {
            if less(self.value(c), value) {
                current = self.node(c).right;
            } else {
                found = Some(c);
                current = self.node(c).left;
            }
        }
        found
    }

    /// The last node visited by a descent that goes left when `value` is less
    /// than the node and right otherwise.
    pub(crate) fn last_visited<F>(&self, value: &T, mut less: F) -> Option<Handle>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut last = None;
        let mut current = self.root;
        while let Some(c) = current {
            last = Some(c);
            current = if less(value, self.value(c)) { self.node(c).left } else { self.node(c).right };
        }
        last
    }

    /// The node with `rank` nodes before it in order.
    pub(crate) fn get_by_rank(&self, mut rank: usize) -> Option<Handle> {
        let mut current = self.root;
        while let Some(c) = current {
            let left = self.node(c).left;
            let left_size = self.size(left);
            match rank.cmp(&left_size) {
                core::cmp::Ordering::Less => current = left,
                core::cmp::Ordering::Equal => return Some(c),
                core::cmp::Ordering::Greater => {
                    rank -= left_size + 1;
                    current = self.node(c).right;
                }
            }
        }
        None
    }

    /// The number of nodes before `node` in order.
    pub(crate) fn rank_of(&self, node: Handle) -> usize {
        let mut rank = self.size(self.node(node).left);
        let mut current = node;
        while let Some(parent) = self.node(current).parent {
            if self.node(parent).right == Some(current) {
                rank += self.size(self.node(parent).left) + 1;
            }
            current = parent;
        }
        rank
    }

    pub(crate) fn clear(&mut self) {
        if !self.is_empty() {
            trace!("rb tree cleared: {} nodes released", self.len());
        }
        self.nodes.clear();
        self.root = None;
    }

    /// Deep-copies every node, keeping the shape and colors.
    pub(crate) fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        Ok(Self {
            nodes: self.nodes.try_clone()?,
            root: self.root,
        })
    }
}
