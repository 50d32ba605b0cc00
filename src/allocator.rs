//! Raw storage for the containers.
//!
//! Containers never touch the global heap directly: every buffer and node
//! slot they own is obtained from, and returned to, the [`Allocator`] they
//! were created with.

use core::alloc::Layout;
use core::mem;
use core::ptr::NonNull;

use allocator_api2::alloc::{Allocator as RawAllocator, Global};

use crate::{Error, Result};

/// Returns the largest number of `T`s that can be described by a single [`Layout`].
///
/// Zero-sized types never occupy memory, so any count is addressable.
#[must_use]
pub const fn max_size_of<T>() -> usize {
    match mem::size_of::<T>() {
        0 => usize::MAX,
        size => isize::MAX as usize / size,
    }
}

fn array_layout<T>(n: usize) -> Result<Layout> {
    let max = max_size_of::<T>();
    if n > max {
        return Err(Error::CapacityOverflow { requested: n, max });
    }
    Layout::array::<T>(n).map_err(|_| Error::CapacityOverflow { requested: n, max })
}

/// A source of uninitialized, typed storage.
///
/// Every pointer returned by [`allocate`](Allocator::allocate) is owned by
/// the caller until it is handed back to [`deallocate`](Allocator::deallocate)
/// with the same element type and count, exactly once.
///
/// # Safety
///
/// Implementors must return storage that is valid for reads and writes of
/// `n` properly aligned `T`s and that stays valid until it is deallocated.
/// Clones of an allocator must be able to deallocate each other's storage.
pub unsafe trait Allocator: Clone {
    /// Allocates uninitialized storage for `n` values of type `T`.
    ///
    /// Returns a dangling, well-aligned pointer when `n == 0` or `T` is
    /// zero-sized.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityOverflow`] if `n > self.max_size::<T>()`, and
    /// [`Error::AllocFailed`] if the underlying allocation fails.
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>>;

    /// Releases storage obtained from [`allocate`](Allocator::allocate).
    ///
    /// Live values in the storage are not dropped.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `self.allocate::<T>(n)` (or a clone of `self`) with
    /// the same `n`, and must not be used afterwards. A dangling pointer with
    /// `n == 0` is always accepted.
    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, n: usize);

    /// Moves `value` into uninitialized storage at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes and must not hold a live value.
    unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T) {
        // SAFETY: guaranteed by the caller.
        unsafe { ptr.write(value) }
    }

    /// Drops the value at `ptr` without releasing its storage.
    ///
    /// # Safety
    ///
    /// `ptr` must hold a live value, which is dead afterwards.
    unsafe fn destroy<T>(&self, ptr: NonNull<T>) {
        // SAFETY: guaranteed by the caller.
        unsafe { ptr.drop_in_place() }
    }

    /// The largest `n` for which [`allocate`](Allocator::allocate) can succeed.
    fn max_size<T>(&self) -> usize {
        max_size_of::<T>()
    }
}

/// The bundled allocator, backed by the global heap.
///
/// It carries no state: all instances compare equal and can release each
/// other's storage.
///
/// # Examples
///
/// ```
/// use raw_containers::{Allocator, DefaultAllocator};
///
/// let alloc = DefaultAllocator;
/// let ptr = alloc.allocate::<u32>(4)?;
/// unsafe {
///     for i in 0..4 {
///         alloc.construct(ptr.add(i), i as u32 * 10);
///     }
///     assert_eq!(*ptr.add(3).as_ptr(), 30);
///     alloc.deallocate(ptr, 4);
/// }
/// assert_eq!(alloc, DefaultAllocator);
/// # Ok::<(), raw_containers::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct DefaultAllocator;

// SAFETY: storage comes from the global allocator with the layout of `[T; n]`.
unsafe impl Allocator for DefaultAllocator {
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>> {
        let layout = array_layout::<T>(n)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(ptr.cast::<T>()).ok_or(Error::AllocFailed { layout })
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, n: usize) {
        let Ok(layout) = Layout::array::<T>(n) else {
            unreachable!("`DefaultAllocator::deallocate()` - `n` was never allocated!");
        };
        if layout.size() != 0 {
            // SAFETY: the caller guarantees `ptr` came from `allocate::<T>(n)`.
            unsafe { alloc::alloc::dealloc(ptr.as_ptr().cast(), layout) }
        }
    }
}

/// Adapts any [`allocator_api2`] allocator into an [`Allocator`].
///
/// # Examples
///
/// ```
/// use raw_containers::{StdAllocator, Vector};
///
/// let mut v = Vector::new_in(<StdAllocator>::default());
/// v.push(1)?;
/// v.push(2)?;
/// assert_eq!(v.as_slice(), &[1, 2]);
/// # Ok::<(), raw_containers::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StdAllocator<A = Global>(pub A);

// SAFETY: storage comes from `A` with the layout of `[T; n]`, and `A` clones
// are required by `allocator_api2` to share their memory blocks.
unsafe impl<A: RawAllocator + Clone> Allocator for StdAllocator<A> {
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>> {
        let layout = array_layout::<T>(n)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        self.0
            .allocate(layout)
            .map(NonNull::cast)
            .map_err(|_| Error::AllocFailed { layout })
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, n: usize) {
        let Ok(layout) = Layout::array::<T>(n) else {
            unreachable!("`StdAllocator::deallocate()` - `n` was never allocated!");
        };
        if layout.size() != 0 {
            // SAFETY: the caller guarantees `ptr` came from `allocate::<T>(n)`.
            unsafe { self.0.deallocate(ptr.cast(), layout) }
        }
    }
}
