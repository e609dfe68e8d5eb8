// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::fmt;
use core::ptr::NonNull;

use allocator_api2::alloc::{Allocator, Global};
use bastion_util::secure_erase;

use crate::SecretAllocError;

#[cfg(any(test, feature = "test-utils"))]
use crate::SecretCounter;

/// Typed allocator that erases every block before giving it back.
///
/// Wraps a general-purpose [`Allocator`] (the global heap by default). Blocks come
/// back zero-initialised; on release all `n * size_of::<T>()` bytes are overwritten
/// with non-elidable writes before the wrapped allocator sees them again.
///
/// The allocator is stateless apart from an optional diagnostic counter: clones are
/// interchangeable, and memory obtained from one clone may be released by another.
#[derive(Clone, Default)]
pub struct SecretAllocator<A: Allocator = Global> {
    inner: A,
    #[cfg(any(test, feature = "test-utils"))]
    counter: Option<SecretCounter>,
}

impl<A: Allocator> fmt::Debug for SecretAllocator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretAllocator").finish_non_exhaustive()
    }
}

impl SecretAllocator<Global> {
    /// Secret allocator over the global heap.
    pub const fn new() -> Self {
        Self {
            inner: Global,
            #[cfg(any(test, feature = "test-utils"))]
            counter: None,
        }
    }
}

impl<A: Allocator> SecretAllocator<A> {
    /// Secret allocator over `inner`.
    pub const fn new_in(inner: A) -> Self {
        Self {
            inner,
            #[cfg(any(test, feature = "test-utils"))]
            counter: None,
        }
    }

    /// Attaches a diagnostic counter shared by every clone of this allocator.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn with_counter(mut self, counter: SecretCounter) -> Self {
        self.counter = Some(counter);
        self
    }

    /// The attached diagnostic counter, if any.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn counter(&self) -> Option<&SecretCounter> {
        self.counter.as_ref()
    }

    /// Allocates a zeroed block for `n` values of `T`.
    ///
    /// Zero-sized requests return a dangling, well-aligned pointer without touching
    /// the wrapped allocator.
    ///
    /// # Errors
    ///
    /// - [`SecretAllocError::CapacityOverflow`] if `n` values of `T` do not fit a layout.
    /// - [`SecretAllocError::AllocationFailure`] if the wrapped allocator refuses.
    pub fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, SecretAllocError> {
        let layout = Layout::array::<T>(n).map_err(|_| SecretAllocError::CapacityOverflow)?;

        if self.injected_failure() {
            log::error!("secret allocation of {} bytes failed (injected)", layout.size());
            return Err(SecretAllocError::AllocationFailure {
                bytes: layout.size(),
            });
        }

        let ptr = if layout.size() == 0 {
            NonNull::<T>::dangling()
        } else {
            self.inner
                .allocate_zeroed(layout)
                .map_err(|_| {
                    log::error!("secret allocation of {} bytes failed", layout.size());
                    SecretAllocError::AllocationFailure {
                        bytes: layout.size(),
                    }
                })?
                .cast::<T>()
        };

        self.track_allocate(n);

        Ok(ptr)
    }

    /// Erases and releases a block obtained from [`allocate`](Self::allocate).
    ///
    /// `None` is a no-op. Values still living in the block are not dropped; the
    /// caller drops or moves them out first.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate::<T>(n)` on this allocator or one of its clones,
    /// with the same `n`, and must not be used afterwards.
    pub unsafe fn deallocate<T>(&self, ptr: Option<NonNull<T>>, n: usize) {
        let Some(ptr) = ptr else {
            return;
        };

        let bytes = n * core::mem::size_of::<T>();

        // SAFETY: the block spans `bytes` writable bytes (caller contract).
        unsafe { secure_erase(ptr.as_ptr().cast::<u8>(), bytes) };

        if bytes != 0 {
            // SAFETY: same size and alignment as the `Layout::array::<T>(n)` used to
            // allocate, which was validated then.
            unsafe {
                let layout = Layout::from_size_align_unchecked(bytes, core::mem::align_of::<T>());
                self.inner.deallocate(ptr.cast::<u8>(), layout);
            }
        }

        self.track_release(n, bytes);
    }

    #[cfg(any(test, feature = "test-utils"))]
    fn injected_failure(&self) -> bool {
        self.counter.as_ref().is_some_and(SecretCounter::should_fail)
    }

    #[cfg(any(test, feature = "test-utils"))]
    fn track_allocate(&self, n: usize) {
        if let Some(counter) = &self.counter {
            counter.on_allocate(n);
        }
    }

    #[cfg(any(test, feature = "test-utils"))]
    fn track_release(&self, n: usize, bytes: usize) {
        if let Some(counter) = &self.counter {
            counter.on_release(n, bytes);
        }
    }

    #[cfg(not(any(test, feature = "test-utils")))]
    #[inline(always)]
    fn injected_failure(&self) -> bool {
        false
    }

    #[cfg(not(any(test, feature = "test-utils")))]
    #[inline(always)]
    fn track_allocate(&self, _n: usize) {}

    #[cfg(not(any(test, feature = "test-utils")))]
    #[inline(always)]
    fn track_release(&self, _n: usize, _bytes: usize) {}
}
