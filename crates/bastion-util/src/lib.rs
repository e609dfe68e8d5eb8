// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Low-level erasure primitives.
//!
//! Every write in this crate goes through `ptr::write_volatile` and is followed by a
//! `compiler_fence(SeqCst)`, so the stores survive dead-store elimination even when the
//! region is released right after.

#![cfg_attr(not(test), no_std)]
#![warn(unsafe_op_in_unsafe_fn)]

use core::sync::atomic::{Ordering, compiler_fence};

/// Overwrites `len` bytes starting at `ptr` with zeros.
///
/// The writes are volatile and fenced: the optimizer cannot drop them, not even when
/// the memory is deallocated immediately afterwards.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes. A zero `len` accepts any pointer,
/// including a dangling one.
///
/// # Example
///
/// ```
/// use bastion_util::secure_erase;
///
/// let mut key = [0xAAu8; 16];
/// unsafe { secure_erase(key.as_mut_ptr(), key.len()) };
/// assert!(key.iter().all(|&b| b == 0));
/// ```
#[inline(never)]
pub unsafe fn secure_erase(ptr: *mut u8, len: usize) {
    for i in 0..len {
        // SAFETY: caller guarantees `ptr..ptr + len` is writable.
        unsafe { core::ptr::write_volatile(ptr.add(i), 0) };
    }

    compiler_fence(Ordering::SeqCst);
}

/// Erases `count` elements of `T` starting at `ptr`, byte by byte.
///
/// The erased slots no longer hold valid values of `T` in general; callers treat them
/// as uninitialized afterwards.
///
/// # Safety
///
/// `ptr` must be valid for writes of `count * size_of::<T>()` bytes.
#[inline(always)]
pub unsafe fn secure_erase_elements<T>(ptr: *mut T, count: usize) {
    let bytes = count * core::mem::size_of::<T>();

    // SAFETY: forwarded from the caller.
    unsafe { secure_erase(ptr.cast::<u8>(), bytes) };
}

/// Safe wrapper over [`secure_erase`] for byte slices.
///
/// # Example
///
/// ```
/// use bastion_util::{is_slice_erased, secure_erase_slice};
///
/// let mut buf = *b"hunter2";
/// secure_erase_slice(&mut buf);
/// assert!(is_slice_erased(&buf));
/// ```
#[inline(always)]
pub fn secure_erase_slice(slice: &mut [u8]) {
    // SAFETY: the slice is valid for writes of its own length.
    unsafe { secure_erase(slice.as_mut_ptr(), slice.len()) }
}

/// Resets a primitive to its default value with a volatile write.
///
/// For every primitive the default is the all-zeros value (`0`, `0.0`, `false`, `'\0'`).
///
/// # Example
///
/// ```
/// use bastion_util::erase_primitive;
///
/// let mut counter = 42u64;
/// erase_primitive(&mut counter);
/// assert_eq!(counter, 0);
///
/// let mut ch = 'x';
/// erase_primitive(&mut ch);
/// assert_eq!(ch, '\0');
/// ```
#[inline(always)]
pub fn erase_primitive<T: Copy + Default>(val: &mut T) {
    // SAFETY: `val` is a valid, aligned, exclusive reference.
    unsafe { core::ptr::write_volatile(val, T::default()) };
    compiler_fence(Ordering::SeqCst);
}

/// Returns `true` when every byte of `slice` is zero.
#[inline(always)]
pub fn is_slice_erased(slice: &[u8]) -> bool {
    slice.iter().all(|&b| b == 0)
}

/// Returns `true` when the `len` bytes at `ptr` are all zero.
///
/// Reads are volatile so the check observes the memory, not a value the compiler
/// remembers from before the erasure.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes.
#[inline(never)]
pub unsafe fn is_region_erased(ptr: *const u8, len: usize) -> bool {
    for i in 0..len {
        // SAFETY: caller guarantees `ptr..ptr + len` is readable.
        if unsafe { core::ptr::read_volatile(ptr.add(i)) } != 0 {
            return false;
        }
    }

    true
}

/// Constant-time equality comparison for byte slices.
///
/// The running time depends only on the lengths, never on where the slices differ.
///
/// # Example
///
/// ```
/// use bastion_util::constant_time_eq;
///
/// assert!(constant_time_eq(b"token", b"token"));
/// assert!(!constant_time_eq(b"token", b"tokem"));
/// assert!(!constant_time_eq(b"token", b"tok"));
/// ```
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let diff = a
        .iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));

    // SAFETY: `diff` is a live local.
    unsafe { core::ptr::read_volatile(&diff) == 0 }
}
