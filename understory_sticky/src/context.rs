// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition: scroll containers that host a registry, and the sticky
//! elements that report into it.

use crate::engine::{Resolution, StickyPlacement, resolve};
use crate::id::ElementId;
use crate::options::StickyOptions;
use crate::registry::{FrameRegistry, RegistryCommit, RegistryRef};
use crate::reporter::FrameReporter;
use crate::space::{ScrollContainer, SpaceRect};

/// Receives the registry after every commit.
///
/// Implementors re-derive whatever they need from the registry on each call
/// and must not rely on state computed for an earlier commit.
pub trait RegistryObserver {
    /// Called once per commit with the freshly merged registry.
    fn registry_changed(&mut self, registry: RegistryRef<'_>, options: &StickyOptions);
}

/// The per-container state shared by every sticky element below it.
///
/// One context exists per scroll container. It owns the container's
/// [`ScrollContainer`] state and the [`FrameRegistry`] its sticky elements
/// report into; dropping the context drops the registry with it.
///
/// A frame goes through three explicit phases:
///
/// 1. **Report**: after layout (and after scrolling), call
///    [`StickyContext::report`] for every sticky element.
/// 2. **Commit**: call [`StickyContext::commit`] or
///    [`StickyContext::commit_and_notify`] once to merge all reports.
/// 3. **Resolve**: compute placements with [`StickyContext::resolve`] or
///    read them from notified [`Sticky`] elements.
#[derive(Clone, Debug)]
pub struct StickyContext {
    container: ScrollContainer,
    registry: FrameRegistry,
    options: StickyOptions,
}

impl StickyContext {
    /// Creates a context with default options.
    #[must_use]
    pub fn new(container: ScrollContainer) -> Self {
        Self::with_options(container, StickyOptions::default())
    }

    /// Creates a context with the given options.
    #[must_use]
    pub fn with_options(container: ScrollContainer, options: StickyOptions) -> Self {
        Self {
            container,
            registry: FrameRegistry::new(),
            options,
        }
    }

    /// The scroll container state.
    #[must_use]
    pub fn container(&self) -> &ScrollContainer {
        &self.container
    }

    /// Mutable access to the scroll container state.
    ///
    /// Changing the scroll offset or frame moves every element in container
    /// space, so hosts should re-report before the next commit.
    pub fn container_mut(&mut self) -> &mut ScrollContainer {
        &mut self.container
    }

    /// Scrolls the container to `offset`. See [`ScrollContainer::set_scroll_offset`].
    pub fn scroll_to(&mut self, offset: f64) -> bool {
        self.container.set_scroll_offset(offset)
    }

    /// Scrolls the container by `delta`. See [`ScrollContainer::scroll_by`].
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.container.scroll_by(delta)
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &StickyOptions {
        &self.options
    }

    /// Replaces the options. Takes effect on the next resolve.
    pub fn set_options(&mut self, options: StickyOptions) {
        self.options = options;
    }

    /// The committed registry.
    #[must_use]
    pub fn registry(&self) -> &FrameRegistry {
        &self.registry
    }

    /// The committed registry, as seen by sticky elements inside this context.
    #[must_use]
    pub fn registry_ref(&self) -> RegistryRef<'_> {
        RegistryRef::Provided(&self.registry)
    }

    /// Measures an element and stages its frame if it changed.
    ///
    /// `layout` may be in any space; it is converted to container space using
    /// the current scroll state. The frame is compared against what this
    /// context's registry holds for the element, so an element arriving from
    /// another context publishes on its first report here even if it did not
    /// move. Returns `true` if a publication was staged.
    pub fn report(&mut self, reporter: &mut FrameReporter, layout: SpaceRect) -> bool {
        let rect = self.container.to_container(layout);
        let known = self.registry.latest(reporter.id());
        match reporter.measure_against(rect, known) {
            Some(publication) => {
                self.registry.publish(publication);
                true
            }
            None => false,
        }
    }

    /// Merges all staged reports.
    pub fn commit(&mut self) -> RegistryCommit {
        self.registry.commit()
    }

    /// Merges all staged reports, then hands the registry to each observer.
    pub fn commit_and_notify(
        &mut self,
        observers: &mut [&mut dyn RegistryObserver],
    ) -> RegistryCommit {
        let commit = self.registry.commit();
        for observer in observers.iter_mut() {
            observer.registry_changed(self.registry_ref(), &self.options);
        }
        commit
    }

    /// Resolves the placement of `id` against the committed registry.
    #[must_use]
    pub fn resolve(&self, id: ElementId) -> Resolution {
        resolve(id, self.registry_ref(), &self.options)
    }
}

/// A scroll container's content together with its sticky context.
///
/// Created by [`provide_sticky_context`].
#[derive(Clone, Debug)]
pub struct StickyScope<C> {
    content: C,
    context: StickyContext,
}

impl<C> StickyScope<C> {
    /// The wrapped container content.
    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Mutable access to the wrapped container content.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// The sticky context hosted by this scope.
    #[must_use]
    pub fn context(&self) -> &StickyContext {
        &self.context
    }

    /// Mutable access to the sticky context.
    pub fn context_mut(&mut self) -> &mut StickyContext {
        &mut self.context
    }

    /// Borrows content and context at the same time.
    pub fn split_mut(&mut self) -> (&mut C, &mut StickyContext) {
        (&mut self.content, &mut self.context)
    }

    /// Tears the scope down into its parts.
    pub fn into_parts(self) -> (C, StickyContext) {
        (self.content, self.context)
    }
}

/// Wraps scroll container `content` so it hosts a sticky context.
///
/// Every sticky element rendered inside `content` should report into and
/// resolve against the returned scope's [`StickyContext`].
#[must_use]
pub fn provide_sticky_context<C>(content: C, container: ScrollContainer) -> StickyScope<C> {
    StickyScope {
        content,
        context: StickyContext::new(container),
    }
}

/// Content that pins itself to the top of its scroll container.
///
/// Created by [`mark_sticky`]. The element receives its [`ElementId`] here and
/// keeps it for its whole lifetime. Each instance owns a distinct id, so
/// `Sticky` is not `Clone`.
#[derive(Debug)]
pub struct Sticky<T> {
    content: T,
    reporter: FrameReporter,
    last: Resolution,
}

impl<T> Sticky<T> {
    /// The element's identity.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.reporter.id()
    }

    /// The wrapped content.
    #[must_use]
    pub fn content(&self) -> &T {
        &self.content
    }

    /// Mutable access to the wrapped content.
    pub fn content_mut(&mut self) -> &mut T {
        &mut self.content
    }

    /// Unwraps the content.
    pub fn into_inner(self) -> T {
        self.content
    }

    /// The element's frame reporter.
    pub fn reporter_mut(&mut self) -> &mut FrameReporter {
        &mut self.reporter
    }

    /// Reports this element's post-layout frame.
    ///
    /// Without a context there is nobody to read the frame; nothing is
    /// recorded, so the first report into a context later still publishes.
    pub fn layout(&mut self, layout: SpaceRect, context: Option<&mut StickyContext>) -> bool {
        match context {
            Some(context) => context.report(&mut self.reporter, layout),
            None => false,
        }
    }

    /// Resolves and records this element's placement.
    pub fn resolve(&mut self, registry: RegistryRef<'_>, options: &StickyOptions) -> Resolution {
        self.last = resolve(self.id(), registry, options);
        self.last
    }

    /// Placement from the most recent resolve or notification.
    ///
    /// Before the first resolve this is the resting placement under
    /// [`StickyOptions::default`]; options set on a context (such as
    /// [`StickyOptions::resting_z_index`]) only apply once the element has
    /// been resolved or notified through that context.
    #[must_use]
    pub fn placement(&self) -> StickyPlacement {
        self.last.placement
    }

    /// Result of the most recent resolve or notification.
    #[must_use]
    pub fn last_resolution(&self) -> Resolution {
        self.last
    }
}

impl<T> RegistryObserver for Sticky<T> {
    fn registry_changed(&mut self, registry: RegistryRef<'_>, options: &StickyOptions) {
        self.resolve(registry, options);
    }
}

/// Wraps `content` so it takes part in sticky positioning.
///
/// The element starts out with the resting placement of
/// [`StickyOptions::default`] until its first resolve.
#[must_use]
pub fn mark_sticky<T>(content: T) -> Sticky<T> {
    let options = StickyOptions::default();
    Sticky {
        content,
        reporter: FrameReporter::new(ElementId::next()),
        last: Resolution {
            placement: StickyPlacement::resting(&options),
            diagnostic: None,
        },
    }
}
