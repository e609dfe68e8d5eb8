// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Zero-copy, bounds-checked views over contiguous containers.
//!
//! A [`View`] is a borrowed `(pointer, element size, element count)` triple carved out of
//! any type implementing [`Contiguous`]. Views never own memory and never allocate; the
//! borrow checker ties each view to the container (or parent view) it came from.
//!
//! # Slicing forms
//!
//! | Form | Runtime-checked | Compile-time-checked |
//! |---|---|---|
//! | whole container | [`ViewExt::view`] | |
//! | items `[b, e)` | [`ViewExt::item_range`] | [`ViewExt::static_item_range`] |
//! | items `[b, ..)` | [`ViewExt::item_range_from`] | [`ViewExt::static_item_range_from`] |
//! | bytes `[b, e)` | [`ViewExt::byte_range`] | [`ViewExt::static_byte_range`] |
//! | bytes `[b, ..)` | [`ViewExt::byte_range_from`] | [`ViewExt::static_byte_range_from`] |
//!
//! Runtime forms return [`ViewError`]: `InvalidArgument` when `begin > end`, otherwise
//! `OutOfRange` when the range exceeds the source. Compile-time forms are only available
//! for fixed-extent containers ([`StaticExtent`]) and reject bad ranges during
//! monomorphisation.
//!
//! Mutable counterparts live on [`ViewMutExt`] and [`ViewMut`].
//!
//! # Example
//!
//! ```rust
//! use bastion_view::{ViewError, ViewExt};
//!
//! let words: Vec<u32> = vec![1, 2, 3, 4];
//!
//! let middle = words.item_range(1, 3)?;
//! assert_eq!(middle.as_slice(), &[2, 3]);
//!
//! // Views compose; the inner range is checked against the outer view only.
//! let last = middle.item_range_from(1)?;
//! assert_eq!(last.as_slice(), &[3]);
//!
//! let bytes = words.byte_range(4, 8)?;
//! assert_eq!(bytes.len(), 4);
//!
//! assert_eq!(
//!     words.item_range(3, 2),
//!     Err(ViewError::InvalidArgument { begin: 3, end: 2 })
//! );
//! # Ok::<(), ViewError>(())
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod bounds;
mod contiguous;
mod error;
mod ext;
mod raw_region;
mod view;
mod view_mut;

#[cfg(test)]
mod tests;

pub use contiguous::{Contiguous, ContiguousMut, StaticExtent};
pub use error::ViewError;
pub use ext::{ViewExt, ViewMutExt};
pub use raw_region::{RawRegion, RawRegionMut};
pub use view::{View, ViewParts};
pub use view_mut::ViewMut;
