use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;
use core::slice;

use super::Vector;
use crate::allocator::{Allocator, DefaultAllocator};

/// An owning iterator over the elements of a [`Vector`].
///
/// This `struct` is created by the `into_iter` method on [`Vector`]
/// (provided by the [`IntoIterator`] trait). Elements not yielded are dropped
/// together with the buffer.
pub struct IntoIter<T, A: Allocator = DefaultAllocator> {
    start: NonNull<T>,
    cap: usize,
    alloc: A,
    // Live elements are the slots in `front..back`.
    front: usize,
    back: usize,
    _marker: PhantomData<T>,
}

// SAFETY: `IntoIter` owns the remaining elements exclusively.
unsafe impl<T: Send, A: Allocator + Send> Send for IntoIter<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for IntoIter<T, A> {}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(super) fn new(vector: Vector<T, A>) -> Self {
        let (start, len, cap, alloc) = vector.into_raw_parts();
        IntoIter {
            start,
            cap,
            alloc,
            front: 0,
            back: len,
            _marker: PhantomData,
        }
    }

    /// Returns the remaining elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots in `front..back` are initialized and owned by `self`.
        unsafe { slice::from_raw_parts(self.start.add(self.front).as_ptr(), self.back - self.front) }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: `front < back`, so the slot is initialized; it leaves the live range.
        let item = unsafe { self.start.add(self.front).read() };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: the slot at the old `back - 1` is initialized and leaves the live range.
        Some(unsafe { self.start.add(self.back).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        while self.front != self.back {
            // SAFETY: `front < back`, so the slot is initialized; it leaves the
            // live range before its destructor runs.
            unsafe {
                let slot = self.start.add(self.front);
                self.front += 1;
                self.alloc.destroy(slot);
            }
        }
        // SAFETY: the buffer came from `allocate::<T>(cap)` and holds no live elements.
        unsafe { self.alloc.deallocate(self.start, self.cap) };
    }
}
