use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// A stable address of a slot in an [`Arena`](super::Arena).
///
/// Slot `i` is stored as `i + 1` so that `Option<Handle>` costs nothing
/// over the raw integer. Handles survive relocation of the arena storage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// The largest slot index a handle can address.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    /// Returns the handle of slot `index`, or `None` past [`Handle::MAX`].
    #[inline]
    pub(crate) fn new(index: usize) -> Option<Self> {
        if index > Self::MAX {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        NonZero::new((index + 1) as RawHandle).map(Self)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
