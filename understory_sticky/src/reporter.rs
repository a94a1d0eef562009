// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame reporting: turning post-layout measurements into registry updates.

use kurbo::Rect;

use crate::id::ElementId;

/// A measured frame on its way into a [`FrameRegistry`](crate::FrameRegistry).
///
/// Publications are only produced by [`FrameReporter::measure`], so the
/// rectangle is always expressed in
/// [`CoordinateSpace::Container`](crate::CoordinateSpace::Container).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePublication {
    id: ElementId,
    rect: Rect,
}

impl FramePublication {
    /// The element this frame belongs to.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The measured frame in container space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Per-element measurement hook.
///
/// Hosts call [`FrameReporter::measure`] after every layout pass (and after
/// every scroll) with the element's current frame in container space. The
/// reporter remembers what it last published and only emits a new
/// [`FramePublication`] when the frame actually changed, so repeated
/// measurements of a stationary element cost nothing downstream.
///
/// The very first measurement always publishes; that covers initial mount.
#[derive(Debug)]
pub struct FrameReporter {
    id: ElementId,
    last: Option<Rect>,
}

impl FrameReporter {
    /// Creates a reporter for `id` that has not published anything yet.
    #[must_use]
    pub fn new(id: ElementId) -> Self {
        Self { id, last: None }
    }

    /// The element this reporter measures.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The last frame this reporter published, if any.
    #[must_use]
    pub fn last_reported(&self) -> Option<Rect> {
        self.last
    }

    /// Records a measurement, returning a publication if the frame changed.
    #[must_use = "a publication that is not forwarded to a registry is lost"]
    pub fn measure(&mut self, rect_in_container: Rect) -> Option<FramePublication> {
        let known = self.last;
        self.measure_against(rect_in_container, known)
    }

    /// Records a measurement, publishing unless `known` already holds it.
    ///
    /// `known` is the frame the receiving registry currently holds for this
    /// element. A registry that has never seen the element passes `None`, so
    /// a remounted element republishes even if its frame did not move.
    #[must_use = "a publication that is not forwarded to a registry is lost"]
    pub fn measure_against(
        &mut self,
        rect_in_container: Rect,
        known: Option<Rect>,
    ) -> Option<FramePublication> {
        self.last = Some(rect_in_container);
        if known == Some(rect_in_container) {
            return None;
        }
        Some(FramePublication {
            id: self.id,
            rect: rect_in_container,
        })
    }

    /// Forgets the last publication so the next measurement publishes again.
    ///
    /// Only needed when driving [`FrameReporter::measure`] by hand;
    /// [`StickyContext::report`](crate::StickyContext::report) checks against
    /// the receiving registry instead.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
