use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

use crate::allocator::{Allocator, DefaultAllocator};
use crate::compare::{Compare, Natural};
use crate::raw::{Handle, RawRbTree};
use crate::Result;

mod cursor;
mod order_statistic;

pub use cursor::Cursor;

/// An ordered multiset based on a red-black tree.
///
/// Values are kept in the order given by the comparator `C` (ascending
/// [`Ord`] order by default). Equivalent values are all kept, each new one
/// placed after those already present. Every node also records the size of
/// its subtree, which makes rank queries ([`get_by_rank`](RbTree::get_by_rank),
/// [`rank_of`](RbTree::rank_of)) logarithmic.
///
/// Nodes are stored in a slab obtained from the allocator `A`; inserting
/// reports allocation failure as an [`Error`](crate::Error) instead of aborting.
///
/// It is a logic error for a value to be modified in such a way that its
/// ordering relative to any other value changes while it is in the tree.
/// The behavior resulting from such a logic error is not specified, but will
/// not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use raw_containers::RbTree;
///
/// let mut tree = RbTree::new();
/// tree.insert(5)?;
/// tree.insert(1)?;
/// tree.insert(3)?;
/// tree.insert(3)?;
///
/// assert_eq!(tree.len(), 4);
/// assert!(tree.contains(&3));
/// assert_eq!(tree.remove(&3), Some(3));
///
/// let values: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(values, [1, 3, 5]);
/// # Ok::<(), raw_containers::Error>(())
/// ```
pub struct RbTree<T, C = Natural, A: Allocator = DefaultAllocator> {
    raw: RawRbTree<T, A>,
    compare: C,
}

impl<T> RbTree<T> {
    /// Makes a new, empty `RbTree` ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator_in(Natural, DefaultAllocator)
    }
}

impl<T, A: Allocator> RbTree<T, Natural, A> {
    /// Makes a new, empty `RbTree` ordered by [`Ord`] whose nodes come from `alloc`.
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Self::with_comparator_in(Natural, alloc)
    }
}

impl<T, C: Compare<T>> RbTree<T, C> {
    /// Makes a new, empty `RbTree` ordered by `compare`.
    #[must_use]
    pub const fn with_comparator(compare: C) -> Self {
        Self::with_comparator_in(compare, DefaultAllocator)
    }
}

impl<T, C, A: Allocator> RbTree<T, C, A> {
    /// Makes a new, empty `RbTree` ordered by `compare` whose nodes come from `alloc`.
    #[must_use]
    pub const fn with_comparator_in(compare: C, alloc: A) -> Self {
        Self {
            raw: RawRbTree::new_in(alloc),
            compare,
        }
    }

    /// Returns the number of values in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the largest number of values the tree can hold.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.raw.max_len()
    }

    /// Returns the comparator that orders the tree.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.compare
    }

    /// Returns the allocator backing the tree's nodes.
    #[must_use]
    pub const fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    /// Returns a reference to the first value in order, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|h| self.raw.value(h))
    }

    /// Returns a reference to the last value in order, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|h| self.raw.value(h))
    }

    /// Removes and returns the first value in order, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::RbTree;
    ///
    /// let mut tree = RbTree::from([2, 1]);
    /// assert_eq!(tree.pop_first(), Some(1));
    /// assert_eq!(tree.pop_first(), Some(2));
    /// assert_eq!(tree.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.raw.first()?;
        Some(self.raw.remove(first))
    }

    /// Removes and returns the last value in order, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.raw.last()?;
        Some(self.raw.remove(last))
    }

    /// Returns a cursor at the first value, or the end cursor when empty.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T, C, A> {
        Cursor::new(self, self.raw.first(), None)
    }

    /// Returns the end cursor, one past the last value.
    ///
    /// Moving the end cursor back lands on the last value.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::RbTree;
    ///
    /// let tree = RbTree::from([1, 2, 3]);
    /// let mut cursor = tree.end();
    /// assert_eq!(cursor.get(), None);
    /// cursor.move_prev();
    /// assert_eq!(cursor.get(), Some(&3));
    /// ```
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T, C, A> {
        Cursor::new(self, None, self.raw.last())
    }

    /// Gets an iterator that visits the values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::RbTree;
    ///
    /// let tree = RbTree::from([3, 1, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter {
            raw: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Removes every value, releasing each node exactly once.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Exchanges the contents of two trees, comparators included, without
    /// moving any value.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns a deep copy of the tree.
    ///
    /// This is the fallible form of [`Clone::clone`].
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the nodes cannot be copied.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
        C: Clone,
    {
        Ok(Self {
            raw: self.raw.try_clone()?,
            compare: self.compare.clone(),
        })
    }
}

impl<T, C: Compare<T>, A: Allocator> RbTree<T, C, A> {
    /// Adds a value to the tree, after any equivalent values already present.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the node cannot be obtained; the tree
    /// is left unchanged and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(2)?;
    /// tree.insert(2)?;
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), raw_containers::Error>(())
    /// ```
    pub fn insert(&mut self, value: T) -> Result<()> {
        let compare = &self.compare;
        self.raw.insert(value, |a, b| compare.less(a, b))?;
        Ok(())
    }

    /// Removes one value equivalent to `value` and returns it.
    ///
    /// Returns `None` if no value is equivalent.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let node = self.find_node(value)?;
        Some(self.raw.remove(node))
    }

    /// Returns a cursor at a value equivalent to `value`, or the end cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::RbTree;
    ///
    /// let tree = RbTree::from([1, 2, 3]);
    /// assert_eq!(tree.find(&2).get(), Some(&2));
    /// assert_eq!(tree.find(&4), tree.end());
    /// ```
    #[must_use]
    pub fn find(&self, value: &T) -> Cursor<'_, T, C, A> {
        match self.find_node(value) {
            Some(node) => Cursor::new(self, Some(node), None),
            None => self.end(),
        }
    }

    /// Returns a reference to a value equivalent to `value`, if any.
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.find_node(value).map(|h| self.raw.value(h))
    }

    /// Returns `true` if the tree contains a value equivalent to `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.find_node(value).is_some()
    }

    /// Returns a cursor at the node where a search for `value` ends.
    ///
    /// The search goes left while `value` is less than the node and right
    /// otherwise; the cursor is left at the last node it visited, which is a
    /// neighbour of `value`'s position in order. An empty tree yields the end
    /// cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::RbTree;
    ///
    /// let tree = RbTree::from([10, 20, 30]);
    /// assert_eq!(tree.lower_bound(&5).get(), Some(&10));
    /// assert_eq!(tree.lower_bound(&35).get(), Some(&30));
    /// ```
    #[must_use]
    pub fn lower_bound(&self, value: &T) -> Cursor<'_, T, C, A> {
        self.last_visited(value)
    }

    /// Returns a cursor at the node where a search for `value` ends.
    ///
    /// Identical to [`lower_bound`](RbTree::lower_bound).
    #[must_use]
    pub fn upper_bound(&self, value: &T) -> Cursor<'_, T, C, A> {
        self.last_visited(value)
    }

    fn last_visited(&self, value: &T) -> Cursor<'_, T, C, A> {
        let compare = &self.compare;
        match self.raw.last_visited(value, |a, b| compare.less(a, b)) {
            Some(node) => Cursor::new(self, Some(node), None),
            None => self.end(),
        }
    }

    fn find_node(&self, value: &T) -> Option<Handle> {
        let compare = &self.compare;
        self.raw.find(value, |a, b| compare.less(a, b))
    }
}

impl<T, C, A: Allocator> fmt::Debug for RbTree<T, C, A>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default, A: Allocator + Default> Default for RbTree<T, C, A> {
    fn default() -> Self {
        Self::with_comparator_in(C::default(), A::default())
    }
}

impl<T: Clone, C: Clone, A: Allocator> Clone for RbTree<T, C, A> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|e| e.raise())
    }
}

impl<T, U, C1, C2, A, B> PartialEq<RbTree<U, C2, B>> for RbTree<T, C1, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &RbTree<U, C2, B>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, C, A: Allocator> Eq for RbTree<T, C, A> {}

impl<T: PartialOrd, C, A: Allocator> PartialOrd for RbTree<T, C, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, C, A: Allocator> Ord for RbTree<T, C, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T, C: Compare<T>, A: Allocator> Extend<T> for RbTree<T, C, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value).unwrap_or_else(|e| e.raise());
        }
    }
}

impl<'a, T: Copy + 'a, C: Compare<T>, A: Allocator> Extend<&'a T> for RbTree<T, C, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord> FromIterator<T> for RbTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RbTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RbTree<T> {
    /// Converts a `[T; N]` into an `RbTree<T>`.
    ///
    /// ```
    /// use raw_containers::RbTree;
    ///
    /// let tree1 = RbTree::from([1, 2, 3, 4]);
    /// let tree2: RbTree<_> = [4, 3, 2, 1].into();
    /// assert_eq!(tree1, tree2);
    /// ```
    fn from(values: [T; N]) -> Self {
        RbTree::from_iter(values)
    }
}

impl<'a, T, C, A: Allocator> IntoIterator for &'a RbTree<T, C, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Iter<'a, T, A> {
        self.iter()
    }
}

impl<T, C, A: Allocator> IntoIterator for RbTree<T, C, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    /// Gets an iterator for moving out the values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::RbTree;
    ///
    /// let tree = RbTree::from([3, 1, 2]);
    /// let v: Vec<_> = tree.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3]);
    /// ```
    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter { raw: self.raw }
    }
}

/// An iterator over the values of an [`RbTree`] in ascending order.
///
/// This `struct` is created by the [`iter`](RbTree::iter) method on [`RbTree`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T, A: Allocator = DefaultAllocator> {
    raw: &'a RawRbTree<T, A>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, T, A: Allocator> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.remaining -= 1;
        self.front = self.raw.successor(node);
        Some(self.raw.value(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T, A: Allocator> DoubleEndedIterator for Iter<'a, T, A> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.remaining -= 1;
        self.back = self.raw.predecessor(node);
        Some(self.raw.value(node))
    }
}

impl<T, A: Allocator> ExactSizeIterator for Iter<'_, T, A> {}

impl<T, A: Allocator> FusedIterator for Iter<'_, T, A> {}

impl<T, A: Allocator> Clone for Iter<'_, T, A> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Iter<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the values of an [`RbTree`] in ascending order.
///
/// This `struct` is created by the `into_iter` method on [`RbTree`]
/// (provided by the [`IntoIterator`] trait). Values not yielded are dropped
/// together with the iterator.
pub struct IntoIter<T, A: Allocator = DefaultAllocator> {
    raw: RawRbTree<T, A>,
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let first = self.raw.first()?;
        Some(self.raw.remove(first))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.len(), Some(self.raw.len()))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        let last = self.raw.last()?;
        Some(self.raw.remove(last))
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let remaining = Iter {
            raw: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        };
        f.debug_tuple("IntoIter").field(&remaining).finish()
    }
}
