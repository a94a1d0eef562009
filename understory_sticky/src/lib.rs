// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sticky --heading-base-level=0

//! Understory Sticky: sticky header positioning for scroll containers.
//!
//! This crate pins elements (section headers, tab bars, toolbars) to the top
//! edge of a vertical scroll container while the content scrolls underneath,
//! and hands off between stacked sticky elements: when the next sticky element
//! arrives it pushes the pinned one up and out before taking its place.
//!
//! It is headless and renderer-agnostic. The pieces are:
//!
//! - [`FrameReporter`]: a per-element measurement hook. Hosts feed it the
//!   element's frame after every layout pass; it only yields a
//!   [`FramePublication`] when the frame changed.
//! - [`FrameRegistry`]: the shared map from [`ElementId`] to last reported
//!   frame. Publications are staged and merged in one [`FrameRegistry::commit`],
//!   so readers never see a partially merged pass.
//! - [`resolve`] / [`compute_sticky_state`]: the offset engine. Given an
//!   element and the registry it decides whether the element is stuck and how
//!   far to translate it, including the hand-off adjustment.
//! - [`StickyContext`], [`provide_sticky_context`] and [`mark_sticky`]: glue
//!   that ties a [`ScrollContainer`] to its registry and wraps host content.
//!
//! All sticky comparisons happen in [`CoordinateSpace::Container`], whose
//! `y = 0` is the container's top edge (the pin line). Layout results in
//! [`CoordinateSpace::Content`] or [`CoordinateSpace::Viewport`] are converted
//! by the container before they reach the registry.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_sticky::{
//!     RegistryObserver, ScrollContainer, SpaceRect, mark_sticky, provide_sticky_context,
//! };
//!
//! // A 480px tall container over 2000px of content.
//! let container = ScrollContainer::new(Rect::new(0.0, 0.0, 320.0, 480.0))
//!     .with_content_extent(2000.0);
//! let mut scope = provide_sticky_context("tile grid", container);
//!
//! // Two 40px headers laid out at y = 100 and y = 400 in the content.
//! let mut tabs = mark_sticky("tabs");
//! let mut footer = mark_sticky("section footer");
//! let tabs_layout = SpaceRect::content(Rect::new(0.0, 100.0, 320.0, 140.0));
//! let footer_layout = SpaceRect::content(Rect::new(0.0, 400.0, 320.0, 440.0));
//!
//! // Scroll, report, commit, then read placements.
//! let cx = scope.context_mut();
//! cx.scroll_to(110.0);
//! tabs.layout(tabs_layout, Some(&mut *cx));
//! footer.layout(footer_layout, Some(&mut *cx));
//! cx.commit_and_notify(&mut [&mut tabs as &mut dyn RegistryObserver, &mut footer]);
//!
//! // The tabs scrolled 10px past the top and are pinned back onto it.
//! assert!(tabs.placement().is_sticking());
//! assert_eq!(tabs.placement().offset(), 10.0);
//! assert!(!footer.placement().is_sticking());
//!
//! // Further down the footer approaches and pushes the tabs out.
//! cx.scroll_to(380.0);
//! tabs.layout(tabs_layout, Some(&mut *cx));
//! footer.layout(footer_layout, Some(&mut *cx));
//! cx.commit_and_notify(&mut [&mut tabs as &mut dyn RegistryObserver, &mut footer]);
//! assert_eq!(tabs.placement().offset(), 280.0 - (40.0 - 20.0));
//! ```
//!
//! ## Hand-off policy
//!
//! When several sticky elements are inside a pinned element's height band at
//! once, [`HandoffPolicy`] chooses which one pushes. The default,
//! [`HandoffPolicy::FirstEncountered`], takes the first in registry order;
//! [`HandoffPolicy::Nearest`] takes the one closest to the pin line.
//!
//! ## Misconfiguration
//!
//! Resolving an element against [`RegistryRef::Unset`] (no enclosing context)
//! never panics. The element renders unpinned and
//! [`StickyDiagnostic::MissingContext`] is returned and logged via `tracing`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod diagnostic;
mod engine;
mod id;
mod options;
mod registry;
mod reporter;
mod space;

pub use context::{
    RegistryObserver, Sticky, StickyContext, StickyScope, mark_sticky, provide_sticky_context,
};
pub use diagnostic::StickyDiagnostic;
pub use engine::{Resolution, StickyPlacement, StickyState, compute_sticky_state, resolve};
pub use id::ElementId;
pub use options::{HandoffPolicy, StickyOptions};
pub use registry::{FrameRegistry, RegistryCommit, RegistryRef};
pub use reporter::{FramePublication, FrameReporter};
pub use space::{CoordinateSpace, ScrollContainer, SpaceRect};
