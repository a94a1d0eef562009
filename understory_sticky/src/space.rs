// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate spaces and the scroll container that relates them.

use kurbo::{Rect, Vec2};

/// A named reference frame in which rectangles are measured.
///
/// All sticky comparisons happen in [`CoordinateSpace::Container`]. The other
/// spaces exist so hosts can hand over whatever their layout produced and let
/// [`ScrollContainer::convert`] bring it into the container space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoordinateSpace {
    /// Unscrolled layout position inside the scroll content.
    ///
    /// This is what a layout pass usually yields: the natural position of an
    /// element, ignoring the current scroll offset.
    Content,
    /// The scroll container's own frame. The top edge is the pin line (`y = 0`).
    Container,
    /// The outer region the scroll container is placed in (a window or screen).
    Viewport,
}

/// A rectangle tagged with the space it was measured in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpaceRect {
    /// Space the rectangle is expressed in.
    pub space: CoordinateSpace,
    /// The rectangle itself.
    pub rect: Rect,
}

impl SpaceRect {
    /// Creates a tagged rectangle.
    #[must_use]
    pub const fn new(space: CoordinateSpace, rect: Rect) -> Self {
        Self { space, rect }
    }

    /// A rectangle in [`CoordinateSpace::Content`].
    #[must_use]
    pub const fn content(rect: Rect) -> Self {
        Self::new(CoordinateSpace::Content, rect)
    }

    /// A rectangle in [`CoordinateSpace::Container`].
    #[must_use]
    pub const fn container(rect: Rect) -> Self {
        Self::new(CoordinateSpace::Container, rect)
    }

    /// A rectangle in [`CoordinateSpace::Viewport`].
    #[must_use]
    pub const fn viewport(rect: Rect) -> Self {
        Self::new(CoordinateSpace::Viewport, rect)
    }
}

/// Vertical scroll state of the container hosting sticky elements.
///
/// `ScrollContainer` records where the container sits in the viewport, how
/// tall its content is, and how far it is scrolled. The scroll offset is kept
/// within `[0, max_scroll_offset]`; there is no overscroll.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollContainer {
    frame: Rect,
    content_extent: f64,
    scroll_offset: f64,
}

impl ScrollContainer {
    /// Creates a container occupying `frame` (in viewport space).
    ///
    /// The content extent starts at the frame height, so nothing can scroll
    /// until [`ScrollContainer::set_content_extent`] says otherwise.
    #[must_use]
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            content_extent: frame.height(),
            scroll_offset: 0.0,
        }
    }

    /// Builder-style variant of [`ScrollContainer::set_content_extent`].
    #[must_use]
    pub fn with_content_extent(mut self, extent: f64) -> Self {
        self.set_content_extent(extent);
        self
    }

    /// Returns the container frame in viewport space.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Moves or resizes the container within the viewport.
    ///
    /// Returns `true` if the frame changed. The scroll offset is re-clamped.
    pub fn set_frame(&mut self, frame: Rect) -> bool {
        if self.frame == frame {
            return false;
        }
        self.frame = frame;
        self.clamp_scroll();
        true
    }

    /// Returns the total height of the scrollable content.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.content_extent
    }

    /// Sets the total height of the scrollable content.
    ///
    /// Negative or non-finite extents are ignored. Returns `true` if the
    /// extent changed.
    pub fn set_content_extent(&mut self, extent: f64) -> bool {
        if !extent.is_finite() || extent < 0.0 || extent == self.content_extent {
            return false;
        }
        self.content_extent = extent;
        self.clamp_scroll();
        true
    }

    /// Returns the current scroll offset (how far the content is scrolled up).
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Largest scroll offset that still keeps content filling the frame.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_extent - self.frame.height()).max(0.0)
    }

    /// Scrolls to `offset`, clamped into `[0, max_scroll_offset]`.
    ///
    /// Non-finite offsets are ignored. Returns `true` if the offset changed.
    pub fn set_scroll_offset(&mut self, offset: f64) -> bool {
        if !offset.is_finite() {
            return false;
        }
        let clamped = offset.clamp(0.0, self.max_scroll_offset());
        if clamped == self.scroll_offset {
            return false;
        }
        self.scroll_offset = clamped;
        true
    }

    /// Scrolls by `delta` (positive moves content up).
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.set_scroll_offset(self.scroll_offset + delta)
    }

    /// Converts a tagged rectangle into the `to` space.
    #[must_use]
    pub fn convert(&self, rect: SpaceRect, to: CoordinateSpace) -> Rect {
        if rect.space == to {
            return rect.rect;
        }
        rect.rect + self.origin_of(rect.space) - self.origin_of(to)
    }

    /// Converts a tagged rectangle into [`CoordinateSpace::Container`].
    #[must_use]
    pub fn to_container(&self, rect: SpaceRect) -> Rect {
        self.convert(rect, CoordinateSpace::Container)
    }

    /// Origin of `space`, expressed in viewport coordinates.
    fn origin_of(&self, space: CoordinateSpace) -> Vec2 {
        match space {
            CoordinateSpace::Viewport => Vec2::ZERO,
            CoordinateSpace::Container => self.frame.origin().to_vec2(),
            CoordinateSpace::Content => {
                self.frame.origin().to_vec2() - Vec2::new(0.0, self.scroll_offset)
            }
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ScrollContainer {
        // 300px tall container placed 100px down the viewport, 1000px of content.
        ScrollContainer::new(Rect::new(0.0, 100.0, 200.0, 400.0)).with_content_extent(1000.0)
    }

    #[test]
    fn scroll_offset_is_clamped() {
        let mut c = container();
        assert_eq!(c.max_scroll_offset(), 700.0);

        assert!(c.set_scroll_offset(2000.0));
        assert_eq!(c.scroll_offset(), 700.0);

        assert!(c.set_scroll_offset(-5.0));
        assert_eq!(c.scroll_offset(), 0.0);

        // No-op when nothing changes.
        assert!(!c.set_scroll_offset(0.0));
        assert!(!c.set_scroll_offset(f64::NAN));
    }

    #[test]
    fn shrinking_content_reclamps_scroll() {
        let mut c = container();
        c.set_scroll_offset(600.0);
        assert!(c.set_content_extent(500.0));
        assert_eq!(c.scroll_offset(), 200.0);
        assert!(!c.set_content_extent(-1.0));
    }

    #[test]
    fn content_rect_moves_up_as_container_scrolls() {
        let mut c = container();
        let header = SpaceRect::content(Rect::new(0.0, 50.0, 200.0, 90.0));
        assert_eq!(c.to_container(header).y0, 50.0);

        c.set_scroll_offset(60.0);
        let r = c.to_container(header);
        assert_eq!(r.y0, -10.0);
        assert_eq!(r.height(), 40.0);
    }

    #[test]
    fn viewport_and_container_differ_by_frame_origin() {
        let mut c = container();
        c.set_scroll_offset(30.0);
        let in_viewport = SpaceRect::viewport(Rect::new(10.0, 120.0, 50.0, 160.0));
        let in_container = c.to_container(in_viewport);
        assert_eq!(in_container, Rect::new(10.0, 20.0, 50.0, 60.0));

        let back = c.convert(SpaceRect::container(in_container), CoordinateSpace::Viewport);
        assert_eq!(back, in_viewport.rect);

        let content = c.convert(in_viewport, CoordinateSpace::Content);
        assert_eq!(content.y0, 50.0);
    }
}
