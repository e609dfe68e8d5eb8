// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Erasure for slices, arrays, `Vec<T>` and `String`.

use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{Ordering, compiler_fence};

use bastion_util::{is_region_erased, secure_erase_elements};

use crate::{ErasureProbe, SecureErase};

/// Erases every element of `slice` in order.
#[inline(always)]
pub fn erase_slice<T: SecureErase>(slice: &mut [T]) {
    for elem in slice.iter_mut() {
        elem.secure_erase();
    }
    compiler_fence(Ordering::SeqCst);
}

/// Returns `true` if every element of `slice` reports itself erased.
#[inline(always)]
pub fn slice_erased<T: ErasureProbe>(slice: &[T]) -> bool {
    slice.iter().all(ErasureProbe::is_erased)
}

// =============================================================================
// [T], [T; N]
// =============================================================================

impl<T: SecureErase> SecureErase for [T] {
    fn secure_erase(&mut self) {
        erase_slice(self);
    }
}

impl<T: ErasureProbe> ErasureProbe for [T] {
    fn is_erased(&self) -> bool {
        slice_erased(self)
    }
}

impl<T: SecureErase, const N: usize> SecureErase for [T; N] {
    fn secure_erase(&mut self) {
        erase_slice(self.as_mut_slice());
    }
}

impl<T: ErasureProbe, const N: usize> ErasureProbe for [T; N] {
    fn is_erased(&self) -> bool {
        slice_erased(self.as_slice())
    }
}

// =============================================================================
// Vec<T>
// =============================================================================

/// Erases the live elements and then the spare capacity of `vec`.
impl<T: SecureErase> SecureErase for Vec<T> {
    fn secure_erase(&mut self) {
        erase_slice(self.as_mut_slice());

        let spare = self.capacity() - self.len();
        // SAFETY: `len..capacity` lies inside the allocation; the slots are
        // uninitialized so byte writes cannot break any value.
        unsafe { secure_erase_elements(self.as_mut_ptr().add(self.len()), spare) };
    }
}

impl<T: ErasureProbe> ErasureProbe for Vec<T> {
    fn is_erased(&self) -> bool {
        slice_erased(self.as_slice())
    }
}

// =============================================================================
// String
// =============================================================================

/// Erases the whole allocation, spare capacity included. The length is kept, so an
/// erased `"abc"` reads as three NUL characters.
impl SecureErase for String {
    fn secure_erase(&mut self) {
        // SAFETY: all-zero bytes are valid UTF-8.
        let bytes = unsafe { self.as_mut_vec() };
        bytes.secure_erase();
    }
}

impl ErasureProbe for String {
    fn is_erased(&self) -> bool {
        // SAFETY: the string's bytes are readable for `len()` bytes.
        unsafe { is_region_erased(self.as_ptr(), self.len()) }
    }
}
