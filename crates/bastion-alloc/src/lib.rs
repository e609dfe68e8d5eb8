// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable containers whose every deallocation securely erases the released memory.
//!
//! - [`SecretAllocator`]: typed allocator over any `allocator_api2` allocator. Blocks
//!   come back zeroed and are overwritten with non-elidable writes before release.
//! - [`SecretVec`]: `Vec`-like container on top of it. Reallocation, shrinking and drop
//!   never leave a copy of the contents behind; slots vacated by removal are erased
//!   immediately.
//! - [`SecretString`]: UTF-8 string with a hidden NUL terminator for native calls.
//! - [`SecretArray`]: fixed-size, zero-initialised array erased on drop.
//!
//! Every growing operation is fallible and gives the strong guarantee: on error the
//! container is unchanged. Moving out with `take()` leaves the source unbound.
//!
//! # Example
//!
//! ```rust
//! use bastion_alloc::{SecretAllocError, SecretVec};
//!
//! let mut v = SecretVec::<u8>::with_capacity(10)?;
//! for i in 0..10 {
//!     v.push(i)?;
//! }
//!
//! // Grows to twice the capacity; the old block is erased before it is freed.
//! v.push(10)?;
//! assert_eq!(v.len(), 11);
//! assert_eq!(v.capacity(), 20);
//! # Ok::<(), SecretAllocError>(())
//! ```
//!
//! # Test Utilities
//!
//! The `test-utils` feature adds [`SecretCounter`], a per-instance diagnostic counter
//! that records outstanding elements and erased bytes and can inject allocation
//! failures:
//!
//! ```toml
//! [dev-dependencies]
//! bastion-alloc = { version = "*", features = ["test-utils"] }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod allocator;
mod buffer;
mod contiguous;
mod error;
mod secret_array;
mod secret_string;
mod secret_vec;

#[cfg(any(test, feature = "test-utils"))]
mod counter;

#[cfg(test)]
mod tests;

pub use allocator::SecretAllocator;
pub use allocator_api2::alloc::{Allocator, Global};
pub use error::SecretAllocError;
pub use secret_array::SecretArray;
pub use secret_string::SecretString;
pub use secret_vec::SecretVec;

#[cfg(any(test, feature = "test-utils"))]
pub use counter::SecretCounter;
