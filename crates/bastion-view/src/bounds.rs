// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::marker::PhantomData;
use core::ops::Range;

use crate::{StaticExtent, ViewError};

/// `begin > end` is reported before any extent check.
#[inline]
pub(crate) fn checked_range(
    begin: usize,
    end: usize,
    extent: usize,
) -> Result<Range<usize>, ViewError> {
    if begin > end {
        return Err(ViewError::InvalidArgument { begin, end });
    }

    if end > extent {
        return Err(ViewError::OutOfRange {
            requested: end,
            extent,
        });
    }

    Ok(begin..end)
}

#[inline]
pub(crate) fn checked_range_from(begin: usize, extent: usize) -> Result<Range<usize>, ViewError> {
    if begin > extent {
        return Err(ViewError::OutOfRange {
            requested: begin,
            extent,
        });
    }

    Ok(begin..extent)
}

/// Post-monomorphisation bounds checks for the `static_*` slicing forms.
///
/// Evaluating one of the associated consts with bad parameters is a compile error,
/// so an invalid static range never reaches codegen.
pub(crate) struct StaticBounds<C: ?Sized, const B: usize, const E: usize>(PhantomData<C>);

impl<C: StaticExtent + ?Sized, const B: usize, const E: usize> StaticBounds<C, B, E> {
    pub(crate) const ITEMS: () = assert!(
        B <= E && E <= C::COUNT,
        "static item range is out of bounds"
    );

    pub(crate) const ITEMS_FROM: () = assert!(B <= C::COUNT, "static item range is out of bounds");

    pub(crate) const BYTES: () = assert!(
        B <= E && E <= C::COUNT * C::ELEMENT_SIZE,
        "static byte range is out of bounds"
    );

    pub(crate) const BYTES_FROM: () = assert!(
        B <= C::COUNT * C::ELEMENT_SIZE,
        "static byte range is out of bounds"
    );
}
