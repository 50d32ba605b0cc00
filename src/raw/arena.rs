use core::mem;

use super::handle::Handle;
use crate::allocator::{Allocator, DefaultAllocator};
use crate::{Error, Result, Vector};

#[derive(Clone)]
enum Slot<T> {
    Occupied(T),
    // Vacant slots form an intrusive free list.
    Vacant(Option<Handle>),
}

/// A slab of `T`s addressed by [`Handle`]s.
///
/// Slots live in a [`Vector`], so every byte the arena uses comes from its
/// allocator. Released slots are chained into a free list and reused before
/// the vector grows.
pub(crate) struct Arena<T, A: Allocator = DefaultAllocator> {
    slots: Vector<Slot<T>, A>,
    next_free: Option<Handle>,
    len: usize,
}

impl<T, A: Allocator> Arena<T, A> {
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            slots: Vector::new_in(alloc),
            next_free: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn allocator(&self) -> &A {
        self.slots.allocator()
    }

    /// The largest number of elements the arena can hold at once.
    pub(crate) fn max_len(&self) -> usize {
        self.slots.max_size().min(Handle::MAX + 1)
    }

    /// Stores `element` and returns its handle.
    ///
    /// On error the arena is unchanged and `element` is dropped.
    pub(crate) fn alloc(&mut self, element: T) -> Result<Handle> {
        let handle = if let Some(handle) = self.next_free {
            let slot = &mut self.slots[handle.index()];
            let Slot::Vacant(next) = *slot else {
                unreachable!("`Arena::alloc()` - free list points at an occupied slot!");
            };
            *slot = Slot::Occupied(element);
            self.next_free = next;
            handle
        } else {
            let index = self.slots.len();
            let handle = Handle::new(index).ok_or(Error::CapacityOverflow {
                requested: index + 1,
                max: self.max_len(),
            })?;
            self.slots.push(Slot::Occupied(element))?;
            handle
        };
        self.len += 1;
        Ok(handle)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.slots[handle.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get()` - `handle` is invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get_mut()` - `handle` is invalid!"),
        }
    }

    /// Moves the element out of its slot and puts the slot on the free list.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.index()];
        assert!(matches!(slot, Slot::Occupied(_)), "`Arena::take()` - `handle` is invalid!");
        let Slot::Occupied(element) = mem::replace(slot, Slot::Vacant(self.next_free)) else {
            unreachable!("`Arena::take()` - slot changed while being taken!");
        };
        self.next_free = Some(handle);
        self.len -= 1;
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.next_free = None;
        self.len = 0;
    }

    /// Deep-copies the arena. Handles stay valid across the copy.
    pub(crate) fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        Ok(Self {
            slots: self.slots.try_clone()?,
            next_free: self.next_free,
            len: self.len,
        })
    }
}
