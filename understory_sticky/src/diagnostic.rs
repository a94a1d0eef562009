// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-fatal conditions reported while resolving sticky placements.

use core::fmt;

use crate::id::ElementId;

/// Something that kept an element from getting its sticky behavior.
///
/// Neither case is fatal: the element resolves to offset `0` and renders at
/// its natural position. Diagnostics are returned from
/// [`resolve`](crate::resolve) and also logged through `tracing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StickyDiagnostic {
    /// The element was resolved without an enclosing sticky context.
    ///
    /// This is a host bug: sticky elements must live inside a
    /// [`StickyScope`](crate::StickyScope).
    MissingContext {
        /// The element that was resolved.
        id: ElementId,
    },
    /// The registry holds no frame for the element yet.
    ///
    /// Normal before the element's first layout pass.
    UnknownGeometry {
        /// The element that was resolved.
        id: ElementId,
    },
}

impl StickyDiagnostic {
    /// The element the diagnostic refers to.
    #[must_use]
    pub fn id(&self) -> ElementId {
        match *self {
            Self::MissingContext { id } | Self::UnknownGeometry { id } => id,
        }
    }

    /// Returns `true` if this indicates a host misconfiguration.
    #[must_use]
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, Self::MissingContext { .. })
    }
}

impl fmt::Display for StickyDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContext { id } => write!(
                f,
                "sticky element {id} resolved outside of any sticky context; rendering unpinned"
            ),
            Self::UnknownGeometry { id } => {
                write!(f, "no frame reported yet for sticky element {id}")
            }
        }
    }
}

impl core::error::Error for StickyDiagnostic {}
