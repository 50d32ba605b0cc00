use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr;

/// A random-access position inside a [`Vector`](super::Vector).
///
/// A cursor is a plain position: it owns nothing and may step outside the
/// live elements, in which case [`get`](Cursor::get) returns `None`. It
/// borrows the vector, so it cannot outlive a reallocation or shift of the
/// storage.
///
/// # Examples
///
/// ```
/// use raw_containers::Vector;
///
/// let v = Vector::from([10, 20, 30, 40]);
/// let mut cursor = v.begin();
/// assert_eq!(cursor.get(), Some(&10));
///
/// cursor += 2;
/// assert_eq!(cursor.get(), Some(&30));
/// assert_eq!(cursor.offset(-1), Some(&20));
/// assert_eq!(v.end() - cursor, 2);
///
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor, v.end());
/// assert_eq!(cursor.get(), None);
/// ```
pub struct Cursor<'a, T> {
    items: &'a [T],
    pos: isize,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(items: &'a [T], index: usize) -> Self {
        Cursor {
            items,
            pos: isize::try_from(index).unwrap_or(isize::MAX),
        }
    }

    /// Returns the element at the cursor, or `None` outside the live elements.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.offset(0)
    }

    /// Returns the element `n` positions away from the cursor.
    #[must_use]
    pub fn offset(&self, n: isize) -> Option<&'a T> {
        let index = usize::try_from(self.pos.checked_add(n)?).ok()?;
        self.items.get(index)
    }

    /// Returns the position of the cursor relative to the first element.
    #[must_use]
    pub const fn position(&self) -> isize {
        self.pos
    }

    /// Returns `true` if the cursor is one past the last element.
    #[must_use]
    pub fn is_end(&self) -> bool {
        usize::try_from(self.pos).is_ok_and(|pos| pos == self.items.len())
    }

    /// Advances the cursor by one element.
    pub fn move_next(&mut self) {
        *self += 1;
    }

    /// Moves the cursor back by one element.
    pub fn move_prev(&mut self) {
        *self -= 1;
    }

    /// Returns the elements from this cursor up to, but excluding, `last`.
    ///
    /// Positions outside the live elements are clamped, and an empty slice is
    /// returned when `last` comes before `self`.
    #[must_use]
    pub fn span(&self, last: &Cursor<'a, T>) -> &'a [T] {
        let clamp = |pos: isize| usize::try_from(pos).unwrap_or(0).min(self.items.len());
        let (first, last) = (clamp(self.pos), clamp(last.pos));
        if first >= last {
            return &[];
        }
        &self.items[first..last]
    }

    fn same_storage(&self, other: &Self) -> bool {
        ptr::eq(self.items, other.items)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("position", &self.pos).field("len", &self.items.len()).finish()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_storage(other) && self.pos == other.pos
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    /// Cursors into different vectors are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_storage(other).then(|| self.pos.cmp(&other.pos))
    }
}

impl<T> Add<isize> for Cursor<'_, T> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<T> Sub<isize> for Cursor<'_, T> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.pos = self.pos.saturating_add(n);
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.pos = self.pos.saturating_sub(n);
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    /// Returns the signed number of elements from `other` to `self`.
    ///
    /// # Panics
    ///
    /// Panics if the cursors belong to different vectors.
    fn sub(self, other: Cursor<'a, T>) -> isize {
        assert!(self.same_storage(&other), "`Cursor::sub()` - cursors belong to different vectors!");
        self.pos.saturating_sub(other.pos)
    }
}
