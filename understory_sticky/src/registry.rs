// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame registry shared by every sticky element in one scroll container.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;
use smallvec::SmallVec;

use crate::id::ElementId;
use crate::reporter::FramePublication;

/// Mapping from [`ElementId`] to the last frame reported for that element.
///
/// Publications are staged with [`FrameRegistry::publish`] and only become
/// visible after [`FrameRegistry::commit`]. Readers therefore never observe a
/// half-merged batch: either none of a layout pass's publications are visible
/// or all of them are.
///
/// Entries are kept in first-publication order, which is also the order of
/// [`FrameRegistry::iter`]. Entries are never removed; an element that goes
/// away simply stops updating its frame.
#[derive(Clone, Debug, Default)]
pub struct FrameRegistry {
    entries: Vec<(ElementId, Rect)>,
    index: HashMap<ElementId, usize>,
    pending: SmallVec<[FramePublication; 8]>,
    generation: u64,
}

/// Outcome of a [`FrameRegistry::commit`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistryCommit {
    /// Ids whose stored frame changed, in merge order, without duplicates.
    pub changed: SmallVec<[ElementId; 8]>,
    /// Registry generation after the commit.
    pub generation: u64,
}

impl RegistryCommit {
    /// Returns `true` if the commit changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

impl FrameRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a publication for the next commit.
    pub fn publish(&mut self, publication: FramePublication) {
        self.pending.push(publication);
    }

    /// Number of staged publications not yet committed.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Merges all staged publications.
    ///
    /// Publications are applied in the order they were staged, so a later
    /// publication for the same id overwrites an earlier one. An id counts as
    /// changed only if its frame after the batch differs from its frame
    /// before the batch; publishing the frame an entry already holds, or
    /// moving it and back within one batch, is a no-op. The generation is
    /// bumped once if anything changed.
    pub fn commit(&mut self) -> RegistryCommit {
        let mut before: SmallVec<[(ElementId, Option<Rect>); 8]> = SmallVec::new();
        for publication in core::mem::take(&mut self.pending) {
            let (id, rect) = (publication.id(), publication.rect());
            if !before.iter().any(|&(seen, _)| seen == id) {
                before.push((id, self.get(id)));
            }
            match self.index.get(&id) {
                Some(&slot) => self.entries[slot].1 = rect,
                None => {
                    self.index.insert(id, self.entries.len());
                    self.entries.push((id, rect));
                }
            }
        }
        let changed: SmallVec<[ElementId; 8]> = before
            .into_iter()
            .filter(|&(id, old)| old != self.get(id))
            .map(|(id, _)| id)
            .collect();
        if !changed.is_empty() {
            self.generation += 1;
            tracing::trace!(
                generation = self.generation,
                changed = changed.len(),
                "frame registry commit"
            );
        }
        RegistryCommit {
            changed,
            generation: self.generation,
        }
    }

    /// The frame `id` will hold after the next commit.
    ///
    /// This is the last staged publication for `id` if there is one, and the
    /// committed frame otherwise.
    #[must_use]
    pub fn latest(&self, id: ElementId) -> Option<Rect> {
        self.pending
            .iter()
            .rev()
            .find(|publication| publication.id() == id)
            .map(FramePublication::rect)
            .or_else(|| self.get(id))
    }

    /// Returns the committed frame for `id`, if one was ever published.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<Rect> {
        self.index.get(&id).map(|&slot| self.entries[slot].1)
    }

    /// Returns `true` if a frame for `id` has been committed.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }

    /// Iterates committed entries in first-publication order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, Rect)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of committed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been committed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counter bumped by every commit that changed at least one entry.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a sticky element sees when it looks for its registry.
///
/// `Unset` means no scroll container provided a registry at all, which is a
/// misconfiguration. `Provided` with an empty registry is the normal state
/// before the first layout pass.
#[derive(Clone, Copy, Debug, Default)]
pub enum RegistryRef<'a> {
    /// No enclosing sticky context.
    #[default]
    Unset,
    /// The registry of the enclosing sticky context.
    Provided(&'a FrameRegistry),
}

impl<'a> RegistryRef<'a> {
    /// Returns `true` for [`RegistryRef::Unset`].
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns the registry, if one was provided.
    #[must_use]
    pub fn registry(&self) -> Option<&'a FrameRegistry> {
        match *self {
            Self::Unset => None,
            Self::Provided(registry) => Some(registry),
        }
    }
}

impl<'a> From<Option<&'a FrameRegistry>> for RegistryRef<'a> {
    fn from(registry: Option<&'a FrameRegistry>) -> Self {
        registry.map_or(Self::Unset, Self::Provided)
    }
}

impl<'a> From<&'a FrameRegistry> for RegistryRef<'a> {
    fn from(registry: &'a FrameRegistry) -> Self {
        Self::Provided(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::FrameReporter;
    use alloc::vec;

    fn rect(y: f64, h: f64) -> Rect {
        Rect::new(0.0, y, 100.0, y + h)
    }

    #[test]
    fn publications_are_invisible_until_commit() {
        let mut registry = FrameRegistry::new();
        let mut reporter = FrameReporter::new(ElementId::next());
        registry.publish(reporter.measure(rect(0.0, 40.0)).unwrap());

        assert_eq!(registry.pending_len(), 1);
        assert!(registry.get(reporter.id()).is_none());

        let commit = registry.commit();
        assert_eq!(commit.changed.as_slice(), &[reporter.id()]);
        assert_eq!(commit.generation, 1);
        assert_eq!(registry.get(reporter.id()), Some(rect(0.0, 40.0)));
        assert_eq!(registry.pending_len(), 0);
    }

    #[test]
    fn last_write_wins_within_a_batch() {
        let mut registry = FrameRegistry::new();
        let mut reporter = FrameReporter::new(ElementId::next());
        registry.publish(reporter.measure(rect(10.0, 40.0)).unwrap());
        registry.publish(reporter.measure(rect(-5.0, 40.0)).unwrap());

        let commit = registry.commit();
        assert_eq!(commit.changed.len(), 1);
        assert_eq!(registry.get(reporter.id()), Some(rect(-5.0, 40.0)));
    }

    #[test]
    fn identical_frame_does_not_bump_generation() {
        let mut registry = FrameRegistry::new();
        let mut reporter = FrameReporter::new(ElementId::next());
        registry.publish(reporter.measure(rect(10.0, 40.0)).unwrap());
        registry.commit();

        // Bypass the reporter's own dedup to exercise the registry's.
        reporter.invalidate();
        registry.publish(reporter.measure(rect(10.0, 40.0)).unwrap());
        let commit = registry.commit();
        assert!(commit.is_empty());
        assert_eq!(registry.generation(), 1);
    }

    #[test]
    fn moving_and_moving_back_in_one_batch_is_a_no_op() {
        let mut registry = FrameRegistry::new();
        let mut reporter = FrameReporter::new(ElementId::next());
        registry.publish(reporter.measure(rect(10.0, 40.0)).unwrap());
        registry.commit();

        registry.publish(reporter.measure(rect(-20.0, 40.0)).unwrap());
        registry.publish(reporter.measure(rect(10.0, 40.0)).unwrap());
        assert_eq!(registry.latest(reporter.id()), Some(rect(10.0, 40.0)));

        let commit = registry.commit();
        assert!(commit.is_empty());
        assert_eq!(registry.generation(), 1);
        assert_eq!(registry.get(reporter.id()), Some(rect(10.0, 40.0)));
    }

    #[test]
    fn latest_prefers_staged_frames() {
        let mut registry = FrameRegistry::new();
        let mut reporter = FrameReporter::new(ElementId::next());
        assert_eq!(registry.latest(reporter.id()), None);

        registry.publish(reporter.measure(rect(0.0, 40.0)).unwrap());
        registry.commit();
        registry.publish(reporter.measure(rect(-5.0, 40.0)).unwrap());
        assert_eq!(registry.get(reporter.id()), Some(rect(0.0, 40.0)));
        assert_eq!(registry.latest(reporter.id()), Some(rect(-5.0, 40.0)));
    }

    #[test]
    fn iteration_follows_first_publication_order() {
        let mut registry = FrameRegistry::new();
        let mut late = FrameReporter::new(ElementId::next());
        let mut early = FrameReporter::new(ElementId::next());
        registry.publish(late.measure(rect(100.0, 40.0)).unwrap());
        registry.publish(early.measure(rect(0.0, 40.0)).unwrap());
        registry.commit();

        // Updating an entry keeps its position.
        registry.publish(late.measure(rect(90.0, 40.0)).unwrap());
        registry.commit();

        let ids: Vec<_> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![late.id(), early.id()]);
    }

    #[test]
    fn unset_is_distinct_from_empty() {
        let registry = FrameRegistry::new();
        let unset = RegistryRef::from(None::<&FrameRegistry>);
        let provided = RegistryRef::from(&registry);
        assert!(unset.is_unset());
        assert!(!provided.is_unset());
        assert!(provided.registry().is_some_and(FrameRegistry::is_empty));
    }
}
