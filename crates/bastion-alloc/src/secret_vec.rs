// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::ops::{Deref, DerefMut, RangeBounds};
use core::ptr::NonNull;

use allocator_api2::alloc::{Allocator, Global};
use bastion_erase::{AssertEraseOnDrop, EraseSentinel, ErasureProbe, SecureErase};
use bastion_util::constant_time_eq;

use crate::buffer::SecretBuffer;
use crate::{SecretAllocError, SecretAllocator};

/// A growable array whose memory is erased on every release.
///
/// Behaves like `Vec<T>` with three differences:
///
/// - Storage comes from a [`SecretAllocator`], so every reallocation, shrink and drop
///   overwrites the released block before freeing it. Slots vacated by `pop`,
///   `truncate`, `erase_range` and friends are erased immediately.
/// - Growing operations are fallible and leave the vector untouched on failure.
/// - [`take`](Self::take) leaves the source in the Empty state (no allocation).
///
/// Single-value insertion (`push`, `insert`) grows to `max(2 * capacity, capacity + 1)`;
/// range insertion grows to exactly the required size.
///
/// # Example
///
/// ```rust
/// use bastion_alloc::{SecretAllocError, SecretVec};
///
/// let mut key = SecretVec::<u8>::with_capacity(4)?;
/// key.extend_from_slice(&[1, 2, 3, 4])?;
///
/// // Self-referencing insertion is safe even when it reallocates.
/// key.extend_from_within(..2)?;
/// assert_eq!(&key[..], &[1, 2, 3, 4, 1, 2]);
/// # Ok::<(), SecretAllocError>(())
/// ```
pub struct SecretVec<T, A: Allocator = Global> {
    buf: SecretBuffer<T, A>,
    __sentinel: EraseSentinel,
}

impl<T, A: Allocator> fmt::Debug for SecretVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretVec")
            .field("data", &"REDACTED")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<T> SecretVec<T, Global> {
    /// An Empty vector. Does not allocate a secret block.
    pub fn new() -> Self {
        Self::new_in(SecretAllocator::new())
    }

    /// A vector with room for exactly `capacity` values.
    pub fn with_capacity(capacity: usize) -> Result<Self, SecretAllocError> {
        Self::with_capacity_in(capacity, SecretAllocator::new())
    }

    /// `count` clones of `value`, capacity exactly `count`.
    pub fn from_elem(count: usize, value: T) -> Result<Self, SecretAllocError>
    where
        T: Clone,
    {
        Self::from_elem_in(count, value, SecretAllocator::new())
    }

    /// `count` default values, capacity exactly `count`.
    pub fn with_default(count: usize) -> Result<Self, SecretAllocError>
    where
        T: Default,
    {
        let mut vec = Self::with_capacity(count)?;
        vec.buf.assign_with(count, |_| Some(T::default()))?;
        Ok(vec)
    }

    /// Clones of `src`, capacity exactly `src.len()`.
    pub fn from_slice(src: &[T]) -> Result<Self, SecretAllocError>
    where
        T: Clone,
    {
        Self::from_slice_in(src, SecretAllocator::new())
    }

    /// Moves every value out of an exact-size iterator.
    pub fn from_iter_exact<I>(iter: I) -> Result<Self, SecretAllocError>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator<Item = T>,
    {
        let mut vec = Self::new();
        vec.buf.insert_iter(0, iter)?;
        Ok(vec)
    }

    /// Copies `src` into a new vector and erases `src`.
    pub fn from_mut_slice(src: &mut [T]) -> Result<Self, SecretAllocError>
    where
        T: Clone + SecureErase,
    {
        let mut vec = Self::new();
        vec.extend_from_mut_slice(src)?;
        Ok(vec)
    }
}

impl<T, A: Allocator> SecretVec<T, A> {
    /// An Empty vector over `alloc`. Does not allocate a secret block.
    pub fn new_in(alloc: SecretAllocator<A>) -> Self {
        Self {
            buf: SecretBuffer::new_in(alloc),
            __sentinel: EraseSentinel::default(),
        }
    }

    /// A vector over `alloc` with room for exactly `capacity` values.
    pub fn with_capacity_in(
        capacity: usize,
        alloc: SecretAllocator<A>,
    ) -> Result<Self, SecretAllocError> {
        Ok(Self {
            buf: SecretBuffer::with_capacity_in(capacity, alloc)?,
            __sentinel: EraseSentinel::default(),
        })
    }

    /// Number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// `true` if there are no live values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots in the current block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// `true` if the vector owns a block (it is not Empty).
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.buf.is_bound()
    }

    /// The allocator backing this vector.
    pub fn allocator(&self) -> &SecretAllocator<A> {
        self.buf.allocator()
    }

    /// The live values.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buf.as_slice()
    }

    /// The live values, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buf.as_mut_slice()
    }

    /// Pointer to the first slot. Dangling when Empty.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Writable pointer to the first slot. Dangling when Empty.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    /// Pointer to the owned block, for handing to native code.
    ///
    /// # Errors
    ///
    /// [`SecretAllocError::InvalidObject`] if the vector is Empty.
    pub fn as_non_null(&self) -> Result<NonNull<T>, SecretAllocError> {
        self.buf.as_non_null().ok_or(SecretAllocError::InvalidObject)
    }

    /// Ensures room for `additional` more values, allocating exactly what is needed.
    pub fn reserve(&mut self, additional: usize) -> Result<(), SecretAllocError> {
        self.buf.reserve_additional(additional)
    }

    /// Grows the block to exactly `capacity` slots. No-op if it is already that large.
    pub fn reserve_capacity(&mut self, capacity: usize) -> Result<(), SecretAllocError> {
        self.buf.reserve_exact(capacity)
    }

    /// Reallocates to exactly `len()` slots, erasing the old block.
    pub fn shrink_to_fit(&mut self) -> Result<(), SecretAllocError> {
        self.buf.shrink_to_fit()
    }

    /// Appends `value`.
    pub fn push(&mut self, value: T) -> Result<(), SecretAllocError> {
        self.buf.push(value)
    }

    /// Removes the last value and erases its slot.
    pub fn pop(&mut self) -> Option<T> {
        self.buf.pop()
    }

    /// Inserts `value` at `index`, returning `index`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize, SecretAllocError> {
        self.buf.insert(index, value)
    }

    /// Inserts `count` clones of `value` at `index`, returning `index`.
    pub fn insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<usize, SecretAllocError>
    where
        T: Clone,
    {
        self.buf.insert_n(index, count, value)
    }

    /// Inserts clones of `src` at `index`, returning `index`.
    pub fn insert_slice(&mut self, index: usize, src: &[T]) -> Result<usize, SecretAllocError>
    where
        T: Clone,
    {
        self.buf.insert_slice(index, src)
    }

    /// Moves the values of an exact-size iterator in at `index`, returning `index`.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> Result<usize, SecretAllocError>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator<Item = T>,
    {
        self.buf.insert_iter(index, iter)
    }

    /// Inserts clones of this vector's own values in `range` at `index`.
    ///
    /// `range` refers to positions before the insertion and may overlap `index`.
    ///
    /// ```rust
    /// use bastion_alloc::{SecretAllocError, SecretVec};
    ///
    /// let mut v = SecretVec::from_slice(&[1u8, 2, 3])?;
    /// v.insert_from_within(1, 0..3)?;
    /// assert_eq!(&v[..], &[1, 1, 2, 3, 2, 3]);
    /// # Ok::<(), SecretAllocError>(())
    /// ```
    pub fn insert_from_within<R>(&mut self, index: usize, range: R) -> Result<usize, SecretAllocError>
    where
        T: Clone,
        R: RangeBounds<usize>,
    {
        self.buf.insert_from_within(index, range)
    }

    /// Appends clones of `src`.
    pub fn extend_from_slice(&mut self, src: &[T]) -> Result<(), SecretAllocError>
    where
        T: Clone,
    {
        let len = self.len();
        self.buf.insert_slice(len, src).map(drop)
    }

    /// Appends clones of this vector's own values in `range`.
    pub fn extend_from_within<R>(&mut self, range: R) -> Result<(), SecretAllocError>
    where
        T: Clone,
        R: RangeBounds<usize>,
    {
        let len = self.len();
        self.buf.insert_from_within(len, range).map(drop)
    }

    /// Appends clones of `src`, then erases `src`.
    ///
    /// On failure nothing is appended and `src` is left as it was.
    pub fn extend_from_mut_slice(&mut self, src: &mut [T]) -> Result<(), SecretAllocError>
    where
        T: Clone + SecureErase,
    {
        self.extend_from_slice(src)?;
        src.secure_erase();
        Ok(())
    }

    /// Removes the value at `index`, returning the position of the value that
    /// followed it.
    pub fn erase(&mut self, index: usize) -> Result<usize, SecretAllocError> {
        if index >= self.len() {
            return Err(SecretAllocError::OutOfBounds {
                index,
                len: self.len(),
            });
        }

        self.buf.erase_range(index..index + 1)
    }

    /// Removes the values in `range`, returning the position of the value that
    /// followed it.
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<usize, SecretAllocError> {
        self.buf.erase_range(range)
    }

    /// Removes and returns the value at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T, SecretAllocError> {
        self.buf.remove(index)
    }

    /// Keeps the first `len` values, dropping and erasing the rest.
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    /// Drops every value. The block is kept, fully erased.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Grows with clones of `value` or truncates so that `len() == new_len`.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), SecretAllocError>
    where
        T: Clone,
    {
        let len = self.len();
        if new_len <= len {
            self.truncate(new_len);
            return Ok(());
        }

        self.buf.insert_n(len, new_len - len, &value).map(drop)
    }
}

impl<T, A: Allocator + Clone> SecretVec<T, A> {
    /// `count` clones of `value` over `alloc`.
    pub fn from_elem_in(count: usize, value: T, alloc: SecretAllocator<A>) -> Result<Self, SecretAllocError>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity_in(count, alloc)?;
        vec.assign_n(count, &value)?;
        Ok(vec)
    }

    /// Clones of `src` over `alloc`.
    pub fn from_slice_in(src: &[T], alloc: SecretAllocator<A>) -> Result<Self, SecretAllocError>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity_in(src.len(), alloc)?;
        vec.assign_slice(src)?;
        Ok(vec)
    }

    /// Replaces the contents with `count` clones of `value`.
    ///
    /// Reuses the block when it is large enough. Otherwise the new block is built
    /// first, so on failure the old contents are untouched.
    pub fn assign_n(&mut self, count: usize, value: &T) -> Result<(), SecretAllocError>
    where
        T: Clone,
    {
        self.buf.assign_with(count, |_| Some(value.clone()))
    }

    /// Replaces the contents with clones of `src`.
    pub fn assign_slice(&mut self, src: &[T]) -> Result<(), SecretAllocError>
    where
        T: Clone,
    {
        self.buf.assign_with(src.len(), |i| src.get(i).cloned())
    }

    /// Replaces the contents with the values of an exact-size iterator.
    pub fn assign_iter<I>(&mut self, iter: I) -> Result<(), SecretAllocError>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        self.buf.assign_with(iter.len(), |_| iter.next())
    }

    /// Deep copy with capacity equal to `len()`.
    pub fn try_clone(&self) -> Result<Self, SecretAllocError>
    where
        T: Clone,
    {
        Ok(Self {
            buf: self.buf.try_clone()?,
            __sentinel: EraseSentinel::default(),
        })
    }

    /// Makes `self` a copy of `src`, reusing the current block when it is large enough.
    pub fn clone_from_secret(&mut self, src: &Self) -> Result<(), SecretAllocError>
    where
        T: Clone,
    {
        self.buf.clone_from_buffer(&src.buf)
    }

    /// Moves the contents into a new vector, leaving `self` Empty.
    pub fn take(&mut self) -> Self {
        Self {
            buf: self.buf.take(),
            __sentinel: EraseSentinel::default(),
        }
    }
}

impl<A: Allocator> SecretVec<u8, A> {
    /// Constant-time comparison of the contents.
    pub fn ct_eq(&self, other: &[u8]) -> bool {
        constant_time_eq(self.as_slice(), other)
    }
}

impl<T> Default for SecretVec<T, Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> Drop for SecretVec<T, A> {
    fn drop(&mut self) {
        self.buf.release();
        self.__sentinel.secure_erase();
    }
}

impl<T, A: Allocator> Deref for SecretVec<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for SecretVec<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for SecretVec<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for SecretVec<T, A> {}

impl<T: SecureErase, A: Allocator> SecureErase for SecretVec<T, A> {
    fn secure_erase(&mut self) {
        self.as_mut_slice().secure_erase();
        self.__sentinel.secure_erase();
    }
}

impl<T: ErasureProbe, A: Allocator> ErasureProbe for SecretVec<T, A> {
    fn is_erased(&self) -> bool {
        self.as_slice().is_erased()
    }
}

impl<T, A: Allocator> AssertEraseOnDrop for SecretVec<T, A> {
    fn clone_sentinel(&self) -> EraseSentinel {
        self.__sentinel.clone()
    }
}
