// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::string::String;
use core::fmt;
use core::ops::{Deref, Range, RangeBounds};

use allocator_api2::alloc::{Allocator, Global};
use bastion_erase::{AssertEraseOnDrop, EraseSentinel, ErasureProbe, SecureErase};
use bastion_util::constant_time_eq;

use crate::buffer::{resolve_range, SecretBuffer};
use crate::{SecretAllocError, SecretAllocator};

/// A growable UTF-8 string whose memory is erased on every release.
///
/// While bound, the content of length `len()` is followed by a hidden NUL byte, so
/// [`as_bytes_with_nul`](Self::as_bytes_with_nul) can be handed to native code
/// directly. `capacity()` counts content bytes only; the terminator slot is extra.
/// A string that was never bound (or was taken from) holds no block and no
/// terminator.
///
/// `push` and `insert` of a single character grow geometrically; `push_str`,
/// `insert_str` and `extend_from_within` grow to exactly the required size.
///
/// ```rust
/// use bastion_alloc::{SecretAllocError, SecretString};
///
/// let mut s = SecretString::try_from_str("abc")?;
/// s.append_self()?;
///
/// assert_eq!(&*s, "abcabc");
/// assert_eq!(s.as_bytes_with_nul()?, b"abcabc\0");
/// # Ok::<(), SecretAllocError>(())
/// ```
pub struct SecretString<A: Allocator = Global> {
    buf: SecretBuffer<u8, A>,
    __sentinel: EraseSentinel,
}

impl<A: Allocator> fmt::Debug for SecretString<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretString")
            .field("data", &"REDACTED")
            .field("len", &self.len())
            .finish()
    }
}

impl SecretString<Global> {
    /// An unbound string. Does not allocate a secret block.
    pub fn new() -> Self {
        Self::new_in(SecretAllocator::new())
    }

    /// An empty, bound string with room for `capacity` content bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, SecretAllocError> {
        Self::with_capacity_in(capacity, SecretAllocator::new())
    }

    /// Copies `src`, capacity exactly `src.len()`.
    pub fn try_from_str(src: &str) -> Result<Self, SecretAllocError> {
        let mut s = Self::with_capacity(src.len())?;
        s.push_str(src)?;
        Ok(s)
    }

    /// Copies `src` and erases it, spare capacity included.
    ///
    /// On failure `src` is left untouched.
    pub fn from_mut_string(src: &mut String) -> Result<Self, SecretAllocError> {
        let s = Self::try_from_str(src.as_str())?;
        src.secure_erase();
        src.clear();
        Ok(s)
    }
}

impl<A: Allocator> SecretString<A> {
    /// An unbound string over `alloc`. Does not allocate a secret block.
    pub fn new_in(alloc: SecretAllocator<A>) -> Self {
        Self {
            buf: SecretBuffer::new_in(alloc),
            __sentinel: EraseSentinel::default(),
        }
    }

    /// An empty, bound string over `alloc` with room for `capacity` content bytes.
    pub fn with_capacity_in(
        capacity: usize,
        alloc: SecretAllocator<A>,
    ) -> Result<Self, SecretAllocError> {
        let slots = capacity
            .checked_add(1)
            .ok_or(SecretAllocError::CapacityOverflow)?;
        let mut buf = SecretBuffer::with_capacity_in(slots, alloc)?;
        // SAFETY: `slots >= 1`.
        unsafe { buf.push_unchecked(0) };

        Ok(Self {
            buf,
            __sentinel: EraseSentinel::default(),
        })
    }

    /// Content length in bytes, terminator excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len().saturating_sub(1)
    }

    /// `true` if there is no content.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Content bytes that fit without reallocating, terminator excluded.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity().saturating_sub(1)
    }

    /// `true` if the string owns a block.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.buf.is_bound()
    }

    /// The content.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: every mutation keeps the content valid UTF-8.
        unsafe { core::str::from_utf8_unchecked(self.content()) }
    }

    /// The content, mutably.
    #[inline]
    pub fn as_mut_str(&mut self) -> &mut str {
        let len = self.len();
        let bytes = &mut self.buf.as_mut_slice()[..len];
        // SAFETY: see `as_str`; `&mut str` cannot break the encoding.
        unsafe { core::str::from_utf8_unchecked_mut(bytes) }
    }

    /// The content bytes, terminator excluded.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.content()
    }

    /// The content followed by its NUL terminator.
    ///
    /// # Errors
    ///
    /// [`SecretAllocError::InvalidObject`] if the string is unbound.
    pub fn as_bytes_with_nul(&self) -> Result<&[u8], SecretAllocError> {
        if !self.is_bound() {
            return Err(SecretAllocError::InvalidObject);
        }

        Ok(self.buf.as_slice())
    }

    /// Pointer to the first content byte. Dangling when unbound.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.buf.as_ptr()
    }

    /// Ensures room for `additional` more content bytes, allocating exactly what is
    /// needed. Binds an unbound string.
    pub fn reserve(&mut self, additional: usize) -> Result<(), SecretAllocError> {
        self.prepare(additional, false)
    }

    /// Reallocates so that capacity equals length, erasing the old block.
    pub fn shrink_to_fit(&mut self) -> Result<(), SecretAllocError> {
        self.buf.shrink_to_fit()
    }

    /// Appends one character.
    pub fn push(&mut self, ch: char) -> Result<(), SecretAllocError> {
        let len = self.len();
        self.insert(len, ch)
    }

    /// Appends `src`.
    pub fn push_str(&mut self, src: &str) -> Result<(), SecretAllocError> {
        let len = self.len();
        self.insert_str(len, src)
    }

    /// Inserts one character at byte position `index`.
    pub fn insert(&mut self, index: usize, ch: char) -> Result<(), SecretAllocError> {
        let mut encoded = [0u8; 4];
        let bytes = ch.encode_utf8(&mut encoded).as_bytes();

        let result = self.insert_bytes(index, bytes, true);
        encoded.secure_erase();
        result
    }

    /// Inserts `src` at byte position `index`.
    pub fn insert_str(&mut self, index: usize, src: &str) -> Result<(), SecretAllocError> {
        self.insert_bytes(index, src.as_bytes(), false)
    }

    /// Appends a copy of the content in `range` (byte positions before the call).
    ///
    /// Sources are resolved after any reallocation, so appending the string to itself
    /// is well-defined.
    pub fn extend_from_within<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), SecretAllocError> {
        let Range { start, end } = self.content_range(range)?;
        let len = self.len();

        self.prepare(end - start, false)?;
        self.buf.insert_from_within(len, start..end)?;

        Ok(())
    }

    /// Appends a copy of the whole content to itself.
    pub fn append_self(&mut self) -> Result<(), SecretAllocError> {
        self.extend_from_within(..)
    }

    /// Removes and returns the last character.
    pub fn pop(&mut self) -> Option<char> {
        let ch = self.as_str().chars().next_back()?;
        let len = self.len();

        self.buf.erase_range(len - ch.len_utf8()..len).ok()?;
        Some(ch)
    }

    /// Removes and returns the character starting at byte position `index`.
    pub fn remove(&mut self, index: usize) -> Result<char, SecretAllocError> {
        let len = self.len();
        let ch = self
            .as_str()
            .get(index..)
            .and_then(|rest| rest.chars().next())
            .ok_or_else(|| {
                if index >= len {
                    SecretAllocError::OutOfBounds { index, len }
                } else {
                    SecretAllocError::NotCharBoundary { index }
                }
            })?;

        self.buf.erase_range(index..index + ch.len_utf8())?;
        Ok(ch)
    }

    /// Keeps the first `new_len` bytes. No-op if `new_len >= len()`.
    pub fn truncate(&mut self, new_len: usize) -> Result<(), SecretAllocError> {
        let len = self.len();
        if new_len >= len {
            return Ok(());
        }

        self.ensure_boundary(new_len)?;
        self.buf.erase_range(new_len..len)?;

        Ok(())
    }

    /// Removes all content. The block and the terminator are kept.
    pub fn clear(&mut self) {
        let len = self.len();
        if len > 0 {
            // Cannot fail: `0..len` is in range and on boundaries.
            let _ = self.buf.erase_range(0..len);
        }
    }

    /// Removes the bytes in `range`, returning the position that followed it.
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<usize, SecretAllocError> {
        let range = self.content_range(range)?;
        self.buf.erase_range(range)
    }

    /// Constant-time comparison of the contents.
    pub fn ct_eq(&self, other: &str) -> bool {
        constant_time_eq(self.as_bytes(), other.as_bytes())
    }

    #[inline(always)]
    fn content(&self) -> &[u8] {
        let len = self.len();
        &self.buf.as_slice()[..len]
    }

    fn ensure_boundary(&self, index: usize) -> Result<(), SecretAllocError> {
        let len = self.len();
        if index > len {
            return Err(SecretAllocError::OutOfBounds { index, len });
        }
        if !self.as_str().is_char_boundary(index) {
            return Err(SecretAllocError::NotCharBoundary { index });
        }
        Ok(())
    }

    fn content_range<R: RangeBounds<usize>>(&self, range: R) -> Result<Range<usize>, SecretAllocError> {
        // The terminator is not part of the content.
        let range = resolve_range(range, self.len())?;

        self.ensure_boundary(range.start)?;
        self.ensure_boundary(range.end)?;

        Ok(range)
    }

    /// Makes room for `additional` content bytes and binds the string.
    ///
    /// All allocation happens here, before any content is touched.
    fn prepare(&mut self, additional: usize, amortized: bool) -> Result<(), SecretAllocError> {
        let missing_nul = usize::from(!self.is_bound());
        let extra = additional
            .checked_add(missing_nul)
            .ok_or(SecretAllocError::CapacityOverflow)?;

        if amortized {
            // Doubling applies to the visible capacity; the terminator slot rides on top.
            let required = self
                .len()
                .checked_add(additional)
                .ok_or(SecretAllocError::CapacityOverflow)?;
            if required > self.capacity() {
                let target = self.capacity().saturating_mul(2).max(required);
                let slots = target
                    .checked_add(1)
                    .ok_or(SecretAllocError::CapacityOverflow)?;
                self.buf.reserve_exact(slots)?;
            }
        } else {
            self.buf.reserve_additional(extra)?;
        }

        if self.buf.len() == 0 && self.buf.capacity() > 0 {
            // SAFETY: capacity reserved above.
            unsafe { self.buf.push_unchecked(0) };
        }

        Ok(())
    }

    fn insert_bytes(&mut self, index: usize, bytes: &[u8], amortized: bool) -> Result<(), SecretAllocError> {
        self.ensure_boundary(index)?;
        self.prepare(bytes.len(), amortized)?;
        self.buf.insert_slice(index, bytes)?;

        Ok(())
    }
}

impl<A: Allocator + Clone> SecretString<A> {
    /// Replaces the content with a copy of `src`.
    ///
    /// Reuses the block when it is large enough. Otherwise the new block is built
    /// first, so on failure the old content is untouched.
    pub fn assign(&mut self, src: &str) -> Result<(), SecretAllocError> {
        let bytes = src.as_bytes();
        let slots = bytes
            .len()
            .checked_add(1)
            .ok_or(SecretAllocError::CapacityOverflow)?;

        self.buf
            .assign_with(slots, |i| Some(bytes.get(i).copied().unwrap_or(0)))
    }

    /// Deep copy with capacity equal to `len()`.
    pub fn try_clone(&self) -> Result<Self, SecretAllocError> {
        Ok(Self {
            buf: self.buf.try_clone()?,
            __sentinel: EraseSentinel::default(),
        })
    }

    /// Makes `self` a copy of `src`, reusing the current block when it is large enough.
    ///
    /// An unbound `src` copies as empty content, so `self` stays terminated.
    pub fn clone_from_secret(&mut self, src: &Self) -> Result<(), SecretAllocError> {
        if !src.is_bound() && !self.is_bound() {
            return Ok(());
        }

        self.assign(src.as_str())
    }

    /// Moves the content into a new string, leaving `self` unbound.
    pub fn take(&mut self) -> Self {
        Self {
            buf: self.buf.take(),
            __sentinel: EraseSentinel::default(),
        }
    }
}

impl<'a> TryFrom<&'a str> for SecretString<Global> {
    type Error = SecretAllocError;

    fn try_from(src: &'a str) -> Result<Self, Self::Error> {
        Self::try_from_str(src)
    }
}

impl Default for SecretString<Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Allocator> Drop for SecretString<A> {
    fn drop(&mut self) {
        self.buf.release();
        self.__sentinel.secure_erase();
    }
}

impl<A: Allocator> Deref for SecretString<A> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

/// Constant-time in the content, variable only in the lengths.
impl<A: Allocator> PartialEq for SecretString<A> {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(self.as_bytes(), other.as_bytes())
    }
}

impl<A: Allocator> Eq for SecretString<A> {}

impl<A: Allocator> PartialEq<str> for SecretString<A> {
    fn eq(&self, other: &str) -> bool {
        self.ct_eq(other)
    }
}

impl<A: Allocator> PartialEq<&str> for SecretString<A> {
    fn eq(&self, other: &&str) -> bool {
        self.ct_eq(other)
    }
}

/// Overwrites the content with NUL characters. The length is kept.
impl<A: Allocator> SecureErase for SecretString<A> {
    fn secure_erase(&mut self) {
        let len = self.len();
        self.buf.as_mut_slice()[..len].secure_erase();
        self.__sentinel.secure_erase();
    }
}

impl<A: Allocator> ErasureProbe for SecretString<A> {
    fn is_erased(&self) -> bool {
        self.as_bytes().is_erased()
    }
}

impl<A: Allocator> AssertEraseOnDrop for SecretString<A> {
    fn clone_sentinel(&self) -> EraseSentinel {
        self.__sentinel.clone()
    }
}
