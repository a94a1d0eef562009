// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sticky offset computation.
//!
//! Everything here is a pure function of the committed registry contents.
//! Nothing is cached between passes: callers re-run [`resolve`] after every
//! commit and use the result for exactly one render.

use kurbo::{Affine, Rect, Vec2};

use crate::diagnostic::StickyDiagnostic;
use crate::id::ElementId;
use crate::options::{HandoffPolicy, StickyOptions};
use crate::registry::{FrameRegistry, RegistryRef};

/// Sticking state of one element for one pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickyState {
    /// The element's top edge has scrolled above the pin line.
    pub is_sticking: bool,
    /// Vertical translation to apply when rendering the element.
    ///
    /// Positive values move the element down. A plainly pinned element gets
    /// exactly the distance its top edge scrolled past the pin line.
    pub offset: f64,
    /// The element currently pushing this one out of view, if any.
    pub displaced_by: Option<ElementId>,
}

impl StickyState {
    /// Not sticking, not translated.
    pub const REST: Self = Self {
        is_sticking: false,
        offset: 0.0,
        displaced_by: None,
    };
}

/// Computes the sticky state of `id`, whose committed frame is `own`.
///
/// 1. The element sticks when `own.y0 < 0`; otherwise it rests at offset `0`.
/// 2. A sticking element is translated by `-own.y0`, which puts its top edge
///    on the pin line.
/// 3. Another element `O` is a hand-off candidate when its top edge lies
///    below the element's own top edge and above `own.height()`. The
///    `policy` picks one candidate.
/// 4. The chosen candidate reduces the offset by `own.height() - O.y0`, so
///    the pinned element slides up and out as `O` approaches the pin line.
#[must_use]
pub fn compute_sticky_state(
    id: ElementId,
    own: Rect,
    registry: &FrameRegistry,
    policy: HandoffPolicy,
) -> StickyState {
    let is_sticking = own.y0 < 0.0;
    if !is_sticking {
        return StickyState::REST;
    }

    let height = own.height();
    let mut candidates = registry
        .iter()
        .filter(|&(other, rect)| other != id && rect.y0 > own.y0 && rect.y0 < height);
    let pusher = match policy {
        HandoffPolicy::FirstEncountered => candidates.next(),
        HandoffPolicy::Nearest => candidates.min_by(|a, b| a.1.y0.total_cmp(&b.1.y0)),
    };

    let mut offset = -own.y0;
    if let Some((_, rect)) = pusher {
        offset -= height - rect.y0;
    }
    StickyState {
        is_sticking,
        offset,
        displaced_by: pusher.map(|(other, _)| other),
    }
}

/// Render-ready result for one sticky element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickyPlacement {
    /// The computed sticking state.
    pub state: StickyState,
    /// Stacking priority to draw the element with.
    pub z_index: i32,
}

impl StickyPlacement {
    /// Placement for an element at its natural position.
    #[must_use]
    pub fn resting(options: &StickyOptions) -> Self {
        Self::from_state(StickyState::REST, options)
    }

    /// Wraps `state`, choosing the z-index from `options`.
    #[must_use]
    pub fn from_state(state: StickyState, options: &StickyOptions) -> Self {
        Self {
            state,
            z_index: options.z_index(state.is_sticking),
        }
    }

    /// Vertical render offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    /// Whether the element is stuck to the pin line.
    #[must_use]
    pub fn is_sticking(&self) -> bool {
        self.state.is_sticking
    }

    /// The render offset as a vector.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(0.0, self.state.offset)
    }

    /// The render offset as a transform, ready to prepend to the element's own.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::translate(self.translation())
    }
}

/// Result of [`resolve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// Where and how to draw the element.
    pub placement: StickyPlacement,
    /// Why sticky behavior was suppressed, if it was.
    pub diagnostic: Option<StickyDiagnostic>,
}

/// Resolves the placement of `id` against whatever registry it can see.
///
/// - With [`RegistryRef::Unset`] the element rests and a
///   [`StickyDiagnostic::MissingContext`] is returned and logged as a warning.
/// - With no committed frame for `id` the element rests and a
///   [`StickyDiagnostic::UnknownGeometry`] is returned; this is expected before
///   the first layout pass and only logged at debug level.
/// - Otherwise the result of [`compute_sticky_state`] is used.
#[must_use]
pub fn resolve(id: ElementId, registry: RegistryRef<'_>, options: &StickyOptions) -> Resolution {
    let Some(registry) = registry.registry() else {
        let diagnostic = StickyDiagnostic::MissingContext { id };
        tracing::warn!(element = id.raw(), "{diagnostic}");
        return Resolution {
            placement: StickyPlacement::resting(options),
            diagnostic: Some(diagnostic),
        };
    };
    let Some(own) = registry.get(id) else {
        let diagnostic = StickyDiagnostic::UnknownGeometry { id };
        tracing::debug!(element = id.raw(), "{diagnostic}");
        return Resolution {
            placement: StickyPlacement::resting(options),
            diagnostic: Some(diagnostic),
        };
    };
    let state = compute_sticky_state(id, own, registry, options.handoff);
    Resolution {
        placement: StickyPlacement::from_state(state, options),
        diagnostic: None,
    }
}
