/// A strict weak ordering used by [`RbTree`](crate::RbTree) to place values.
///
/// `less(a, b)` must be irreflexive and transitive, and equivalence
/// (`!less(a, b) && !less(b, a)`) must be transitive. A comparator that breaks
/// these rules cannot cause undefined behavior, but the tree's contents and
/// lookups become unspecified.
///
/// Any `Fn(&T, &T) -> bool` closure is a comparator:
///
/// ```
/// use raw_containers::RbTree;
///
/// let mut tree = RbTree::with_comparator(|a: &i32, b: &i32| a > b);
/// tree.insert(1)?;
/// tree.insert(3)?;
/// tree.insert(2)?;
/// assert!(tree.iter().eq(&[3, 2, 1]));
/// # Ok::<(), raw_containers::Error>(())
/// ```
pub trait Compare<T: ?Sized> {
    /// Returns `true` if `a` is ordered strictly before `b`.
    fn less(&self, a: &T, b: &T) -> bool;
}

/// The ascending order given by [`Ord`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Compare<T> for F {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
