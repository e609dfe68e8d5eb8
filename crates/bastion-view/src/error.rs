// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Errors produced by runtime-checked slicing.
///
/// Neither variant mutates anything; the source container or view is untouched.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ViewError {
    /// `begin` is greater than `end`.
    #[error("invalid range: begin {begin} is greater than end {end}")]
    InvalidArgument {
        /// Requested start position.
        begin: usize,
        /// Requested end position.
        end: usize,
    },

    /// The range reaches past the end of the source.
    #[error("range out of bounds: {requested} exceeds extent {extent}")]
    OutOfRange {
        /// Offending position (the end, or the start for open-ended ranges).
        requested: usize,
        /// Number of items or bytes in the source.
        extent: usize,
    },
}
