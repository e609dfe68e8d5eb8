// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Errors returned by the secret containers.
///
/// Every failing operation leaves its container exactly as it was.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum SecretAllocError {
    /// The underlying allocator could not provide the block.
    #[error("allocation of {bytes} bytes failed")]
    AllocationFailure {
        /// Size of the rejected request.
        bytes: usize,
    },

    /// The requested element count does not fit in a memory layout.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The container holds no allocation (never bound, or taken from).
    #[error("container is not bound to an allocation")]
    InvalidObject,

    /// A position lies outside the container.
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds {
        /// Requested position.
        index: usize,
        /// Current length.
        len: usize,
    },

    /// A range is reversed or reaches past the end.
    #[error("invalid range {start}..{end} for length {len}")]
    InvalidRange {
        /// Range start.
        start: usize,
        /// Range end (exclusive).
        end: usize,
        /// Current length.
        len: usize,
    },

    /// A string position splits a multi-byte character.
    #[error("byte index {index} is not a char boundary")]
    NotCharBoundary {
        /// Offending byte index.
        index: usize,
    },
}
