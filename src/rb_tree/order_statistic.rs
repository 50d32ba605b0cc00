use core::ops::Index;

use super::RbTree;
use crate::Rank;
use crate::allocator::Allocator;
use crate::compare::Compare;

impl<T, C: Compare<T>, A: Allocator> RbTree<T, C, A> {
    /// Returns the value at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::RbTree;
    ///
    /// let tree = RbTree::from([10, 20, 30]);
    /// assert_eq!(tree.get_by_rank(1), Some(&20));
    /// assert!(tree.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.raw.get_by_rank(rank).map(|node| self.raw.value(node))
    }

    /// Returns the zero-based rank of the first value equivalent to `value`,
    /// or `None` if there is none.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::RbTree;
    ///
    /// let tree = RbTree::from([10, 20, 20, 30]);
    ///
    /// assert_eq!(tree.rank_of(&20), Some(1));
    /// assert_eq!(tree.rank_of(&30), Some(3));
    /// assert_eq!(tree.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, value: &T) -> Option<usize> {
        let compare = &self.compare;
        let node = self.raw.first_not_less(value, |a, b| compare.less(a, b))?;
        if compare.less(value, self.raw.value(node)) {
            return None;
        }
        Some(self.raw.rank_of(node))
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use raw_containers::{RbTree, Rank};
///
/// let tree = RbTree::from([10, 20, 30]);
/// assert_eq!(tree[Rank(1)], 20);
/// ```
impl<T, C: Compare<T>, A: Allocator> Index<Rank> for RbTree<T, C, A> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("`RbTree::index()` - `rank` is out of bounds!")
    }
}
