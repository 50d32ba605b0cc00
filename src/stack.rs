//! A last-in, first-out adapter over any sequence with a growable back.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::allocator::Allocator;
use crate::{Error, Result, Vector};

/// A sequence that can grow and shrink at its back.
pub trait BackSequence<T> {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the last element.
    fn back(&self) -> Option<&T>;

    /// Returns the last element mutably.
    fn back_mut(&mut self) -> Option<&mut T>;

    /// Appends `value`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the sequence cannot grow.
    fn push_back(&mut self, value: T) -> Result<()>;

    /// Removes the last element.
    fn pop_back(&mut self) -> Option<T>;
}

impl<T, A: Allocator> BackSequence<T> for Vector<T, A> {
    fn len(&self) -> usize {
        Vector::len(self)
    }

    fn back(&self) -> Option<&T> {
        Vector::back(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        Vector::back_mut(self)
    }

    fn push_back(&mut self, value: T) -> Result<()> {
        self.push(value)
    }

    fn pop_back(&mut self) -> Option<T> {
        self.pop().ok()
    }
}

impl<T> BackSequence<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    fn push_back(&mut self, value: T) -> Result<()> {
        self.push(value);
        Ok(())
    }

    fn pop_back(&mut self) -> Option<T> {
        self.pop()
    }
}

impl<T> BackSequence<T> for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn back(&self) -> Option<&T> {
        VecDeque::back(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        VecDeque::back_mut(self)
    }

    fn push_back(&mut self, value: T) -> Result<()> {
        VecDeque::push_back(self, value);
        Ok(())
    }

    fn pop_back(&mut self) -> Option<T> {
        VecDeque::pop_back(self)
    }
}

/// A LIFO stack over a [`BackSequence`], a [`Vector`] by default.
///
/// Equality and ordering are those of the underlying sequence.
///
/// # Examples
///
/// ```
/// use raw_containers::{Stack, Vector};
///
/// let mut stack = Stack::from_sequence(Vector::from_elem(5, 10)?);
/// stack.pop()?;
/// assert_eq!(stack.len(), 4);
/// assert_eq!(stack.top(), Some(&10));
///
/// stack.push(20)?;
/// assert_eq!(stack.pop()?, 20);
/// # Ok::<(), raw_containers::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stack<T, S = Vector<T>> {
    sequence: S,
    _marker: core::marker::PhantomData<fn() -> T>,
}

impl<T, S: BackSequence<T> + Default> Stack<T, S> {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::from_sequence(S::default())
    }
}

impl<T, S: BackSequence<T>> Stack<T, S> {
    /// Creates a stack whose top is the last element of `sequence`.
    pub const fn from_sequence(sequence: S) -> Self {
        Stack {
            sequence,
            _marker: core::marker::PhantomData,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the stack holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the most recently pushed element.
    #[must_use]
    pub fn top(&self) -> Option<&T> {
        self.sequence.back()
    }

    /// Returns the most recently pushed element mutably.
    #[must_use]
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.sequence.back_mut()
    }

    /// Pushes `value` on top of the stack.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the sequence cannot grow.
    pub fn push(&mut self, value: T) -> Result<()> {
        self.sequence.push_back(value)
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the stack is empty.
    pub fn pop(&mut self) -> Result<T> {
        self.sequence.pop_back().ok_or(Error::Empty { operation: "pop" })
    }

    /// Returns the underlying sequence.
    pub fn into_inner(self) -> S {
        self.sequence
    }
}
