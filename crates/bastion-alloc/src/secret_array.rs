// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::ops::{Deref, DerefMut};

use bastion_erase::{AssertEraseOnDrop, EraseSentinel, ErasureProbe, SecureErase};
use bastion_util::{constant_time_eq, secure_erase_elements};
use zerocopy::FromZeroes;

#[cfg(any(test, feature = "test-utils"))]
use crate::SecretCounter;

/// A fixed-size array that starts zeroed and is erased when dropped.
///
/// Unlike [`SecretVec`](crate::SecretVec), the storage is embedded, so there is no
/// allocation and nothing can fail. `T: FromZeroes` guarantees that both the initial
/// state and the erased state are valid values.
///
/// # Example
///
/// ```rust
/// use bastion_alloc::SecretArray;
/// use bastion_erase::ErasureProbe;
///
/// let mut data = [42u8; 32];
/// let key = SecretArray::from_mut_array(&mut data);
///
/// assert_eq!(key[0], 42);
/// assert!(data.is_erased());
/// ```
pub struct SecretArray<T: FromZeroes, const N: usize> {
    inner: [T; N],
    #[cfg(any(test, feature = "test-utils"))]
    counter: Option<SecretCounter>,
    __sentinel: EraseSentinel,
}

impl<T: FromZeroes, const N: usize> fmt::Debug for SecretArray<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretArray")
            .field("data", &"REDACTED")
            .field("len", &N)
            .finish()
    }
}

impl<T: FromZeroes, const N: usize> SecretArray<T, N> {
    /// A zero-filled array.
    pub fn new() -> Self {
        Self {
            inner: FromZeroes::new_zeroed(),
            #[cfg(any(test, feature = "test-utils"))]
            counter: None,
            __sentinel: EraseSentinel::default(),
        }
    }

    /// A zero-filled array that reports `N` outstanding elements to `counter` until dropped.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_tracked(counter: &SecretCounter) -> Self {
        counter.on_allocate(N);

        let mut array = Self::new();
        array.counter = Some(counter.clone());
        array
    }

    /// Moves the contents of `src` into a new array and erases `src`.
    pub fn from_mut_array(src: &mut [T; N]) -> Self
    where
        T: SecureErase,
    {
        let mut array = Self::new();
        array.replace_from_mut_array(src);
        array
    }

    /// Replaces the contents with those of `src`, then erases `src`.
    ///
    /// The previous contents end up in `src` before it is erased, so they do not
    /// survive anywhere.
    pub fn replace_from_mut_array(&mut self, src: &mut [T; N])
    where
        T: SecureErase,
    {
        core::mem::swap(&mut self.inner, src);
        src.secure_erase();
    }

    /// Always `N`.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// `true` only when `N == 0`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// The elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }

    /// The elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.inner
    }

    /// The underlying array.
    #[inline]
    pub fn as_array(&self) -> &[T; N] {
        &self.inner
    }

    /// The underlying array, mutably.
    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        &mut self.inner
    }
}

impl<const N: usize> SecretArray<u8, N> {
    /// Constant-time comparison of the contents.
    pub fn ct_eq(&self, other: &[u8]) -> bool {
        constant_time_eq(&self.inner, other)
    }
}

impl<T: FromZeroes, const N: usize> Default for SecretArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracked arrays hand a clone of their counter to the copy.
impl<T: FromZeroes + Clone, const N: usize> Clone for SecretArray<T, N> {
    fn clone(&self) -> Self {
        #[cfg(any(test, feature = "test-utils"))]
        if let Some(counter) = &self.counter {
            counter.on_allocate(N);
        }

        Self {
            inner: self.inner.clone(),
            #[cfg(any(test, feature = "test-utils"))]
            counter: self.counter.clone(),
            __sentinel: EraseSentinel::default(),
        }
    }
}

impl<T: FromZeroes, const N: usize> Drop for SecretArray<T, N> {
    fn drop(&mut self) {
        // SAFETY: `inner` spans exactly `N` values, and all-zero bytes are a valid `T`.
        unsafe { secure_erase_elements(self.inner.as_mut_ptr(), N) };

        #[cfg(any(test, feature = "test-utils"))]
        if let Some(counter) = &self.counter {
            counter.on_release(N, N * core::mem::size_of::<T>());
        }

        self.__sentinel.secure_erase();
    }
}

impl<T: FromZeroes, const N: usize> Deref for SecretArray<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.inner
    }
}

impl<T: FromZeroes, const N: usize> DerefMut for SecretArray<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.inner
    }
}

impl<T: FromZeroes + PartialEq, const N: usize> PartialEq for SecretArray<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: FromZeroes + Eq, const N: usize> Eq for SecretArray<T, N> {}

impl<T: FromZeroes + SecureErase, const N: usize> SecureErase for SecretArray<T, N> {
    fn secure_erase(&mut self) {
        self.inner.secure_erase();
        self.__sentinel.secure_erase();
    }
}

impl<T: FromZeroes + ErasureProbe, const N: usize> ErasureProbe for SecretArray<T, N> {
    fn is_erased(&self) -> bool {
        self.inner.is_erased()
    }
}

impl<T: FromZeroes, const N: usize> AssertEraseOnDrop for SecretArray<T, N> {
    fn clone_sentinel(&self) -> EraseSentinel {
        self.__sentinel.clone()
    }
}
