// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Traits for secure erasure and for verifying that erasure really happened.
//!
//! - [`SecureErase`]: overwrite a value in place with non-elidable writes.
//! - [`ErasureProbe`]: check at runtime that a value is all zeros.
//! - [`AssertEraseOnDrop`] + [`EraseSentinel`]: prove in tests that a container
//!   erased itself before it was dropped.
//!
//! # Example
//!
//! ```rust
//! use bastion_erase::{ErasureProbe, SecureErase};
//!
//! let mut key = [0x5Au8; 32];
//! assert!(!key.is_erased());
//!
//! key.secure_erase();
//! assert!(key.is_erased());
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod collections;
mod primitives;
mod sentinel;
mod traits;

#[cfg(test)]
mod tests;

pub use collections::{erase_slice, slice_erased};
pub use sentinel::EraseSentinel;
pub use traits::{AssertEraseOnDrop, ErasureProbe, SecureErase};
