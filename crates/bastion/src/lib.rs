// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Secret-holding containers and bounds-checked memory views.</em></p>
//!
//! ---
//!
//! Bastion is the memory layer underneath cryptographic wrappers: it hands out views of
//! input and output buffers, and it keeps key material in containers that erase every
//! block they ever release.
//!
//! # Features
//!
//! - **Bounds-checked views**: slice any contiguous container by items or by bytes,
//!   checked at runtime, or at compile time for fixed-size arrays
//! - **Secure erasure**: non-elidable writes followed by a compiler fence
//! - **Secret allocator**: zeroed allocation, erasure before every release
//! - **Secret containers**: `SecretVec`, `SecretString` (with hidden NUL terminator),
//!   `SecretArray`
//! - **Strong guarantee**: a failed allocation never changes a container
//! - **`no_std` compatible**: only `alloc` is required
//!
//! # Quick Start
//!
//! ```rust
//! use bastion::alloc::{SecretAllocError, SecretArray, SecretString, SecretVec};
//! use bastion::view::{ViewExt, ViewMutExt};
//!
//! // A key that grows; every abandoned block is erased.
//! let mut key = SecretVec::<u8>::with_capacity(16)?;
//! key.extend_from_slice(&[0x42; 16])?;
//! key.extend_from_within(..8)?;
//!
//! // A passphrase with a NUL terminator ready for native code.
//! let mut pass = SecretString::try_from_str("correct horse")?;
//! pass.append_self()?;
//! assert_eq!(pass.as_bytes_with_nul()?.last(), Some(&0));
//!
//! // Views describe the regions handed to a cipher.
//! let nonce = SecretArray::<u8, 12>::new();
//! let counter_block = nonce.static_byte_range::<8, 12>();
//! assert_eq!(counter_block.parts().count, 4);
//!
//! let mut out = SecretVec::<u8>::with_default(24)?;
//! let body = out.byte_range_mut(0, 16).expect("in range");
//! assert_eq!(body.len(), 16);
//! # Ok::<(), SecretAllocError>(())
//! ```
//!
//! # Crates
//!
//! | Module | Crate | Contents |
//! |---|---|---|
//! | [`util`] | `bastion-util` | volatile erasure, constant-time comparison |
//! | [`erase`] | `bastion-erase` | erasure traits, drop sentinels |
//! | [`view`] | `bastion-view` | container classification, `View`, `ViewMut` |
//! | [`alloc`] | `bastion-alloc` | `SecretAllocator`, `SecretVec`, `SecretString`, `SecretArray` |
//!
//! # Testing
//!
//! The `test-utils` feature exposes `SecretCounter`, a per-allocator diagnostic that
//! counts outstanding elements and erased bytes and injects allocation failures:
//!
//! ```rust,ignore
//! let counter = SecretCounter::new();
//! let alloc = SecretAllocator::new().with_counter(counter.clone());
//!
//! counter.fail_next();
//! assert!(SecretVec::<u8>::with_capacity_in(8, alloc).is_err());
//! ```
//!
//! # License
//!
//! GPL-3.0-only

#![cfg_attr(not(test), no_std)]

pub use bastion_alloc as alloc;
pub use bastion_erase as erase;
pub use bastion_util as util;
pub use bastion_view as view;
