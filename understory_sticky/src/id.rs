// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity handles for sticky elements.

use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

// Pointer-width so the counter also exists on targets without 64-bit atomics.
static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(1);

/// Identifier for a sticky element.
///
/// An `ElementId` is allocated once, when the element is constructed, and is
/// held for the element's whole lifetime. It stays the same across layout and
/// render passes of that element and is never handed out again, so two sibling
/// elements can never share one.
///
/// Ids are ordered by allocation: an id compares less than every id allocated
/// after it.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(usize);

impl ElementId {
    /// Allocates a fresh, process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw number behind this id.
    ///
    /// Useful for logging; the value carries no meaning beyond identity.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
