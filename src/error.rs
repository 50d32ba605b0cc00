use core::alloc::Layout;

use thiserror::Error;

/// Errors reported by the containers and allocators in this crate.
///
/// Allocation errors are reported before a container is modified, so a
/// container that returned an error is left exactly as it was.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A checked access or an insert position was past the end of the container.
    #[error("index {index} is out of range for length {len}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The length of the container at the time of the call.
        len: usize,
    },

    /// An operation that needs at least one element was called on an empty container.
    #[error("`{operation}` called on an empty container")]
    Empty {
        /// The name of the operation.
        operation: &'static str,
    },

    /// The requested element count does not fit in the address space.
    #[error("capacity overflow: requested {requested} elements, the maximum is {max}")]
    CapacityOverflow {
        /// The requested element count.
        requested: usize,
        /// The largest count the allocator can address for the element type.
        max: usize,
    },

    /// The underlying system allocator could not satisfy the request.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocFailed {
        /// The layout that was requested.
        layout: Layout,
    },
}

/// A `Result` alias with [`Error`] as the default error type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

impl Error {
    /// Returns `true` if this error came from a failed or oversized allocation.
    #[must_use]
    pub const fn is_alloc(&self) -> bool {
        matches!(self, Error::CapacityOverflow { .. } | Error::AllocFailed { .. })
    }

    /// Diverges with this error, for contexts that cannot return a `Result`
    /// (`Clone`, `Extend`, `FromIterator`).
    ///
    /// Allocation failures go through [`handle_alloc_error`](alloc::alloc::handle_alloc_error);
    /// everything else panics with the error message.
    #[cold]
    #[track_caller]
    pub fn raise(self) -> ! {
        match self {
            Error::AllocFailed { layout } => alloc::alloc::handle_alloc_error(layout),
            other => panic!("{other}"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(Error::OutOfRange { index: 3, len: 3 }.to_string(), "index 3 is out of range for length 3");
        assert_eq!(Error::Empty { operation: "pop" }.to_string(), "`pop` called on an empty container");
        let layout = Layout::array::<u64>(4).unwrap();
        assert_eq!(Error::AllocFailed { layout }.to_string(), "memory allocation of 32 bytes failed");
    }

    #[test]
    fn alloc_classification() {
        assert!(Error::CapacityOverflow { requested: 2, max: 1 }.is_alloc());
        assert!(!Error::Empty { operation: "pop" }.is_alloc());
    }

    #[test]
    #[should_panic(expected = "index 1 is out of range for length 0")]
    fn raise_panics_with_message() {
        Error::OutOfRange { index: 1, len: 0 }.raise();
    }
}
