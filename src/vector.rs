use core::borrow::{Borrow, BorrowMut};
use core::cmp::{self, Ordering};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use core::slice;

use log::trace;

use crate::allocator::{Allocator, DefaultAllocator};
use crate::{Error, Result};

mod cursor;
mod into_iter;

pub use cursor::Cursor;
pub use into_iter::IntoIter;

/// A contiguous growable array whose storage comes from an [`Allocator`].
///
/// Elements live in a single buffer of `capacity()` slots, the first `len()`
/// of which are initialized. Growth triggered by [`push`](Vector::push) and
/// the `insert*` family is geometric (the capacity doubles), while
/// [`reserve`](Vector::reserve) and [`resize`](Vector::resize) grow to exactly
/// the requested size.
///
/// Every operation that may allocate returns a [`Result`]. The new buffer is
/// obtained before anything else happens, so a failed allocation leaves the
/// vector untouched.
///
/// `Vector` dereferences to a slice, which provides unchecked-style indexing
/// (`v[i]`), iteration, sorting and the rest of the slice API. [`at`](Vector::at)
/// is the checked accessor that reports [`Error::OutOfRange`] instead of panicking.
///
/// # Examples
///
/// ```
/// use raw_containers::Vector;
///
/// let mut v = Vector::new();
/// for i in 1..=3 {
///     v.push(i)?;
/// }
/// assert_eq!(v.capacity(), 4);
///
/// v.insert(0, 0)?;
/// assert_eq!(v, [0, 1, 2, 3]);
///
/// assert_eq!(v.pop()?, 3);
/// assert!(v.at(3).is_err());
/// # Ok::<(), raw_containers::Error>(())
/// ```
pub struct Vector<T, A: Allocator = DefaultAllocator> {
    start: NonNull<T>,
    len: usize,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: `Vector` owns its elements exclusively, like `Box<[T]>`.
unsafe impl<T: Send, A: Allocator + Send> Send for Vector<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Vector<T, A> {}

impl<T> Vector<T> {
    /// Creates an empty vector. Nothing is allocated until an element is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let v: Vector<i32> = Vector::new();
    /// assert!(v.is_empty());
    /// assert_eq!(v.capacity(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::new_in(DefaultAllocator)
    }

    /// Creates a vector holding `n` clones of `value`, with a capacity of exactly `n`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the buffer cannot be obtained.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let v = Vector::from_elem(3, 'x')?;
    /// assert_eq!(v, ['x', 'x', 'x']);
    /// assert_eq!(v.capacity(), 3);
    /// # Ok::<(), raw_containers::Error>(())
    /// ```
    pub fn from_elem(n: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        Self::from_elem_in(n, value, DefaultAllocator)
    }

    /// Creates a vector holding clones of the elements of `items`, with a
    /// capacity of exactly `items.len()`.
    ///
    /// Combine with [`Cursor::span`] to build a vector from a pair of cursors.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the buffer cannot be obtained.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let source = Vector::from([1, 2, 3, 4, 5]);
    /// let middle = Vector::from_slice(source.cursor_at(1).span(&source.cursor_at(4)))?;
    /// assert_eq!(middle, [2, 3, 4]);
    /// # Ok::<(), raw_containers::Error>(())
    /// ```
    pub fn from_slice(items: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        Self::from_slice_in(items, DefaultAllocator)
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// Creates an empty vector that will allocate from `alloc`.
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Vector {
            start: NonNull::dangling(),
            len: 0,
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Creates an empty vector with room for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the buffer cannot be obtained.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self> {
        let start = alloc.allocate::<T>(capacity)?;
        Ok(Vector {
            start,
            len: 0,
            cap: capacity,
            alloc,
            _marker: PhantomData,
        })
    }

    /// Like [`Vector::from_elem`], allocating from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the buffer cannot be obtained.
    pub fn from_elem_in(n: usize, value: T, alloc: A) -> Result<Self>
    where
        T: Clone,
    {
        let mut v = Self::with_capacity_in(n, alloc)?;
        v.extend_with(n, value);
        Ok(v)
    }

    /// Like [`Vector::from_slice`], allocating from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the buffer cannot be obtained.
    pub fn from_slice_in(items: &[T], alloc: A) -> Result<Self>
    where
        T: Clone,
    {
        let mut v = Self::with_capacity_in(items.len(), alloc)?;
        v.extend_within_capacity(items.iter().cloned());
        Ok(v)
    }

    /// Returns a deep copy whose capacity equals the source's length.
    ///
    /// This is the fallible form of [`Clone::clone`].
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the buffer cannot be obtained.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        Self::from_slice_in(self.as_slice(), self.alloc.clone())
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of elements the vector can hold without reallocating.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the largest element count the allocator can provide.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.alloc.max_size::<T>()
    }

    /// Returns the allocator backing this vector.
    #[must_use]
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a raw pointer to the buffer. The pointer is dangling while the
    /// capacity is zero.
    #[must_use]
    pub const fn as_ptr(&self) -> *const T {
        self.start.as_ptr()
    }

    /// Extracts a slice of the live elements.
    #[must_use]
    pub const fn as_slice(&self) -> &[T] {
        // SAFETY: `start` is aligned and the first `len` slots are initialized.
        unsafe { slice::from_raw_parts(self.start.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice of the live elements.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.start.as_ptr(), self.len) }
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::{Error, Vector};
    ///
    /// let v = Vector::from([10, 20]);
    /// assert_eq!(v.at(1), Ok(&20));
    /// assert_eq!(v.at(2), Err(Error::OutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len;
        self.as_slice().get(index).ok_or(Error::OutOfRange { index, len })
    }

    /// Returns the element at `index` mutably.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index >= self.len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(Error::OutOfRange { index, len })
    }

    /// Returns the first element, or `None` if the vector is empty.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the first element mutably, or `None` if the vector is empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element, or `None` if the vector is empty.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the last element mutably, or `None` if the vector is empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Returns a cursor positioned at the first element.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Returns a cursor positioned one past the last element.
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    /// Returns a cursor positioned at `index`.
    #[must_use]
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), index)
    }

    /// Resizes the vector to `new_len` elements.
    ///
    /// Shrinking drops the trailing elements and keeps the capacity. Growing
    /// within the current capacity appends clones of `value`; growing beyond
    /// it first reallocates to exactly `new_len`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if a larger buffer is needed and cannot be
    /// obtained; the vector is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let mut v = Vector::from([1, 2, 3]);
    /// v.resize(5, 0)?;
    /// assert_eq!(v, [1, 2, 3, 0, 0]);
    /// assert_eq!(v.capacity(), 5);
    ///
    /// v.resize(1, 0)?;
    /// assert_eq!(v, [1]);
    /// assert_eq!(v.capacity(), 5);
    /// # Ok::<(), raw_containers::Error>(())
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate_to(new_len);
            return Ok(());
        }
        if new_len > self.cap {
            self.relocate(new_len)?;
        }
        self.extend_with(new_len - self.len, value);
        Ok(())
    }

    /// Like [`resize`](Vector::resize), filling with `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if a larger buffer is needed and cannot be obtained.
    pub fn resize_default(&mut self, new_len: usize) -> Result<()>
    where
        T: Clone + Default,
    {
        self.resize(new_len, T::default())
    }

    /// Ensures the capacity is at least `capacity`.
    ///
    /// Unlike `std::vec::Vec::reserve`, the argument is the total capacity, not
    /// an additional count. When the current capacity is already large enough
    /// nothing happens and no element moves; otherwise the buffer is
    /// reallocated to exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the buffer cannot be obtained; the vector
    /// is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let mut v = Vector::from([1]);
    /// v.reserve(10)?;
    /// assert_eq!(v.capacity(), 10);
    /// v.reserve(4)?;
    /// assert_eq!(v.capacity(), 10);
    /// # Ok::<(), raw_containers::Error>(())
    /// ```
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.cap {
            return Ok(());
        }
        self.relocate(capacity)
    }

    /// Appends `value`, doubling the capacity (or allocating one slot) when full.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if growth fails; `value` is dropped and the
    /// vector is left unchanged.
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.len == self.cap {
            let required = self.required(1)?;
            self.relocate(self.grown_capacity(required))?;
        }
        // SAFETY: `len < cap`, so the slot is allocated and uninitialized.
        unsafe { self.alloc.construct(self.start.add(self.len), value) };
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if the vector is empty.
    pub fn pop(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::Empty { operation: "pop" });
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` was initialized and is now past the end.
        Ok(unsafe { self.start.add(self.len).read() })
    }

    /// Inserts `value` before the element at `index`, shifting the tail right.
    ///
    /// Returns the index of the inserted element. When the vector is full the
    /// capacity doubles (an empty vector grows to one slot), and inserting at
    /// `len()` behaves like [`push`](Vector::push).
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index > self.len()`, or an allocation error.
    /// In both cases the vector is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let mut v = Vector::from_elem(10, 0)?;
    /// assert_eq!(v.insert(2, 42)?, 2);
    /// assert_eq!(v.len(), 11);
    /// assert_eq!(v.capacity(), 20);
    /// assert_eq!(v[2], 42);
    /// # Ok::<(), raw_containers::Error>(())
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize> {
        self.check_position(index)?;
        if self.len == self.cap {
            let required = self.required(1)?;
            self.relocate(self.grown_capacity(required))?;
        }
        // SAFETY: `index <= len < cap`. The tail moves one slot right inside the
        // allocation, then the freed slot is initialized.
        unsafe {
            let hole = self.start.add(index);
            ptr::copy(hole.as_ptr(), hole.as_ptr().add(1), self.len - index);
            self.alloc.construct(hole, value);
        }
        self.len += 1;
        Ok(index)
    }

    /// Inserts `n` clones of `value` before the element at `index`.
    ///
    /// When the elements do not fit, the capacity grows to the larger of
    /// `len() + n` and twice the current capacity.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index > self.len()`, or an allocation error.
    /// In both cases the vector is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let mut v = Vector::from([1, 5]);
    /// v.insert_n(1, 3, 0)?;
    /// assert_eq!(v, [1, 0, 0, 0, 5]);
    /// # Ok::<(), raw_containers::Error>(())
    /// ```
    pub fn insert_n(&mut self, index: usize, n: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        self.check_position(index)?;
        if n == 0 {
            return Ok(());
        }
        self.make_room(n)?;
        self.extend_with(n, value);
        self.as_mut_slice()[index..].rotate_right(n);
        Ok(())
    }

    /// Inserts every element of `items` before the element at `index`,
    /// preserving their order.
    ///
    /// The iterator's reported length sizes the growth, which follows the same
    /// rule as [`insert_n`](Vector::insert_n). Items beyond the reported length
    /// are not consumed.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index > self.len()`, or an allocation error.
    /// In both cases the vector is left unchanged and `items` is not consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let mut v = Vector::from([1, 5]);
    /// v.insert_from(1, [2, 3, 4])?;
    /// assert_eq!(v, [1, 2, 3, 4, 5]);
    /// # Ok::<(), raw_containers::Error>(())
    /// ```
    pub fn insert_from<I>(&mut self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.check_position(index)?;
        let items = items.into_iter();
        let n = items.len();
        if n == 0 {
            return Ok(());
        }
        self.make_room(n)?;
        let old_len = self.len;
        self.extend_within_capacity(items.take(n));
        let inserted = self.len - old_len;
        self.as_mut_slice()[index..].rotate_right(inserted);
        Ok(())
    }

    /// Replaces the contents with the elements of `items`.
    ///
    /// The existing buffer is reused when it is large enough; otherwise a
    /// buffer of exactly `items.len()` slots replaces it.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if a larger buffer cannot be obtained; the
    /// vector is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let mut v = Vector::from([1, 2, 3, 4]);
    /// v.assign_from([7, 8])?;
    /// assert_eq!(v, [7, 8]);
    /// assert_eq!(v.capacity(), 4);
    /// # Ok::<(), raw_containers::Error>(())
    /// ```
    pub fn assign_from<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let n = items.len();
        self.replace_storage(n)?;
        self.extend_within_capacity(items.take(n));
        Ok(())
    }

    /// Replaces the contents with `n` clones of `value`, reusing the buffer
    /// when it is large enough.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if a larger buffer cannot be obtained; the
    /// vector is left unchanged.
    pub fn assign_n(&mut self, n: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        self.replace_storage(n)?;
        self.extend_with(n, value);
        Ok(())
    }

    /// Drops every element. The capacity is kept.
    pub fn clear(&mut self) {
        self.truncate_to(0);
    }

    /// Exchanges the contents of two vectors without moving any element.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let mut a = Vector::from([1, 2, 3]);
    /// let mut b = Vector::from([4]);
    /// let a_ptr = a.as_ptr();
    /// a.swap_with(&mut b);
    /// assert_eq!(a, [4]);
    /// assert_eq!(b, [1, 2, 3]);
    /// assert_eq!(b.as_ptr(), a_ptr);
    /// ```
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    fn check_position(&self, index: usize) -> Result<()> {
        if index > self.len {
            return Err(Error::OutOfRange { index, len: self.len });
        }
        Ok(())
    }

    /// Returns `len + additional`, or a capacity error on overflow.
    fn required(&self, additional: usize) -> Result<usize> {
        self.len.checked_add(additional).ok_or(Error::CapacityOverflow {
            requested: usize::MAX,
            max: self.max_size(),
        })
    }

    /// The capacity to grow to when at least `required` slots are needed.
    fn grown_capacity(&self, required: usize) -> usize {
        cmp::max(required, self.cap.saturating_mul(2)).max(1)
    }

    /// Ensures `additional` more elements fit, growing geometrically if needed.
    fn make_room(&mut self, additional: usize) -> Result<()> {
        let required = self.required(additional)?;
        if required > self.cap {
            self.relocate(self.grown_capacity(required))?;
        }
        Ok(())
    }

    /// Moves the live elements into a fresh buffer of exactly `new_cap` slots.
    fn relocate(&mut self, new_cap: usize) -> Result<()> {
        debug_assert!(new_cap >= self.len, "`Vector::relocate()` - `new_cap` < `len`!");
        let new_start = self.alloc.allocate::<T>(new_cap)?;
        trace!("vector relocated: capacity {} -> {new_cap}, {} live elements", self.cap, self.len);
        // SAFETY: the buffers are distinct and both hold at least `len` slots.
        // Elements are moved bitwise, so the old slots are dead afterwards.
        unsafe {
            ptr::copy_nonoverlapping(self.start.as_ptr(), new_start.as_ptr(), self.len);
            self.alloc.deallocate(self.start, self.cap);
        }
        self.start = new_start;
        self.cap = new_cap;
        Ok(())
    }

    /// Empties the vector, making sure at least `n` slots are allocated.
    ///
    /// A larger buffer is obtained before the old contents are dropped.
    fn replace_storage(&mut self, n: usize) -> Result<()> {
        if n <= self.cap {
            self.clear();
            return Ok(());
        }
        let new_start = self.alloc.allocate::<T>(n)?;
        trace!("vector storage replaced: capacity {} -> {n}", self.cap);
        self.clear();
        // SAFETY: the old buffer came from `allocate::<T>(cap)` and holds no live elements.
        unsafe { self.alloc.deallocate(self.start, self.cap) };
        self.start = new_start;
        self.cap = n;
        Ok(())
    }

    /// Drops the elements past `new_len`.
    fn truncate_to(&mut self, new_len: usize) {
        let old_len = self.len;
        if new_len >= old_len {
            return;
        }
        // Shorten first, so a panicking destructor leaks instead of double-dropping.
        self.len = new_len;
        for i in new_len..old_len {
            // SAFETY: slots in `[new_len, old_len)` were initialized and are now past the end.
            unsafe { self.alloc.destroy(self.start.add(i)) };
        }
    }

    /// Appends `n` clones of `value`. The capacity must already fit them.
    fn extend_with(&mut self, n: usize, value: T)
    where
        T: Clone,
    {
        debug_assert!(self.cap - self.len >= n, "`Vector::extend_with()` - not enough capacity!");
        if n == 0 {
            return;
        }
        for _ in 1..n {
            // SAFETY: `len < cap`; `len` is bumped per element so a panicking
            // `clone` leaves only initialized slots below `len`.
            unsafe { self.alloc.construct(self.start.add(self.len), value.clone()) };
            self.len += 1;
        }
        // SAFETY: as above; the last slot takes `value` itself.
        unsafe { self.alloc.construct(self.start.add(self.len), value) };
        self.len += 1;
    }

    /// Appends items until the iterator or the spare capacity runs out.
    fn extend_within_capacity<I: Iterator<Item = T>>(&mut self, items: I) {
        let spare = self.cap - self.len;
        for item in items.take(spare) {
            // SAFETY: `take(spare)` keeps `len < cap`.
            unsafe { self.alloc.construct(self.start.add(self.len), item) };
            self.len += 1;
        }
    }
}

impl<T, A: Allocator> Drop for Vector<T, A> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the buffer came from `allocate::<T>(cap)` and holds no live elements.
        unsafe { self.alloc.deallocate(self.start, self.cap) };
    }
}

impl<T: Clone, A: Allocator> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|e| e.raise())
    }

    /// Copies `source` into `self`, reusing the buffer when it is large enough.
    fn clone_from(&mut self, source: &Self) {
        if let Err(e) = self.assign_from(source.iter().cloned()) {
            e.raise();
        }
    }
}

impl<T, A: Allocator> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: Allocator> Borrow<[T]> for Vector<T, A> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> BorrowMut<[T]> for Vector<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T, A: Allocator + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Vector::new_in(A::default())
    }
}

impl<T, U, A, B> PartialEq<Vector<U, B>> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &Vector<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<[U]> for Vector<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<&[U]> for Vector<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, A: Allocator, const N: usize> PartialEq<[U; N]> for Vector<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Eq, A: Allocator> Eq for Vector<T, A> {}

impl<T: PartialOrd, A: Allocator> PartialOrd for Vector<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: Allocator> Ord for Vector<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, A: Allocator> Hash for Vector<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, A: Allocator> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            if let Err(e) = self.push(item) {
                e.raise();
            }
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Vector::new();
        v.extend(iter);
        v
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    /// Builds a vector with a capacity of exactly `N`.
    fn from(items: [T; N]) -> Self {
        let mut v = Vector::with_capacity_in(N, DefaultAllocator).unwrap_or_else(|e| e.raise());
        v.extend_within_capacity(items.into_iter());
        v
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, A: Allocator> IntoIterator for Vector<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    /// Moves the elements out of the vector, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_containers::Vector;
    ///
    /// let v = Vector::from(["a".to_string(), "b".to_string()]);
    /// let mut iter = v.into_iter();
    /// assert_eq!(iter.next_back().as_deref(), Some("b"));
    /// assert_eq!(iter.next().as_deref(), Some("a"));
    /// assert_eq!(iter.next(), None);
    /// ```
    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self)
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// Releases ownership of the buffer: `(start, len, cap, alloc)`.
    pub(crate) fn into_raw_parts(self) -> (NonNull<T>, usize, usize, A) {
        let me = mem::ManuallyDrop::new(self);
        // SAFETY: `me` is never dropped, so `alloc` is moved out exactly once.
        let alloc = unsafe { ptr::read(&me.alloc) };
        (me.start, me.len, me.cap, alloc)
    }
}
