/// A zero-based rank into the sorted order of an [`RbTree`](crate::RbTree).
///
/// # Examples
///
/// ```
/// use raw_containers::{RbTree, Rank};
///
/// let tree = RbTree::from([30, 10, 20]);
/// assert_eq!(tree[Rank(0)], 10);
/// assert_eq!(tree[Rank(2)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
