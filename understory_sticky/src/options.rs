// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for sticky resolution: hand-off policy and z-indices.

/// How the engine picks the element pushing a stuck element out of view.
///
/// Several elements may sit inside a stuck element's height band at once (for
/// example three short headers close together). The policy decides which one
/// drives the hand-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum HandoffPolicy {
    /// The first candidate in registry order (first-publication order).
    ///
    /// With two stacked elements this is indistinguishable from
    /// [`HandoffPolicy::Nearest`]. With more, the choice depends on which
    /// element was measured first rather than on geometry.
    #[default]
    FirstEncountered,
    /// The candidate whose top edge is closest to the pin line.
    Nearest,
}

/// Tuning knobs for sticky resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StickyOptions {
    /// Hand-off candidate selection.
    pub handoff: HandoffPolicy,
    /// Z-index for elements that are currently stuck.
    ///
    /// Must be higher than anything else in the scroll content so that pinned
    /// elements draw above the content scrolling underneath them.
    pub sticky_z_index: i32,
    /// Z-index for elements resting at their natural position.
    pub resting_z_index: i32,
}

impl Default for StickyOptions {
    fn default() -> Self {
        Self {
            handoff: HandoffPolicy::default(),
            sticky_z_index: i32::MAX,
            resting_z_index: 0,
        }
    }
}

impl StickyOptions {
    /// Sets the hand-off policy.
    #[must_use]
    pub fn with_handoff(mut self, handoff: HandoffPolicy) -> Self {
        self.handoff = handoff;
        self
    }

    /// Sets the z-index used while stuck.
    #[must_use]
    pub fn with_sticky_z_index(mut self, z: i32) -> Self {
        self.sticky_z_index = z;
        self
    }

    /// Sets the z-index used while resting.
    #[must_use]
    pub fn with_resting_z_index(mut self, z: i32) -> Self {
        self.resting_z_index = z;
        self
    }

    /// Z-index for an element in the given sticking state.
    #[must_use]
    pub fn z_index(&self, is_sticking: bool) -> i32 {
        if is_sticking {
            self.sticky_z_index
        } else {
            self.resting_z_index
        }
    }
}
