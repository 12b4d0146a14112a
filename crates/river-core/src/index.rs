//! Backlink index snapshot
//!
//! Maps each note to the set of notes it links to. The core only ever reads
//! it; hosts hand out a fresh snapshot per logical operation.

use std::collections::{BTreeMap, BTreeSet};

use crate::note::NoteId;

/// Outgoing-link snapshot: source note -> notes it links to.
///
/// Iteration follows the sorted order of source ids, so everything derived
/// from a given snapshot is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BacklinkIndex {
    links: BTreeMap<NoteId, BTreeSet<NoteId>>,
}

impl BacklinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `source` links to `target`
    pub fn insert(&mut self, source: NoteId, target: NoteId) {
        self.links.entry(source).or_default().insert(target);
    }

    /// Builder-style: record a link
    #[must_use]
    pub fn with_link(mut self, source: impl Into<NoteId>, target: impl Into<NoteId>) -> Self {
        self.insert(source.into(), target.into());
        self
    }

    /// Notes that link to `target`, in index order
    pub fn sources_linking_to<'a>(&'a self, target: &'a NoteId) -> impl Iterator<Item = &'a NoteId> {
        self.links
            .iter()
            .filter(move |(_, targets)| targets.contains(target))
            .map(|(source, _)| source)
    }

    /// Number of notes with at least one outgoing link
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = BacklinkIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.sources_linking_to(&NoteId::new("a.md")).count(), 0);
    }

    #[test]
    fn test_sources_linking_to_is_sorted() {
        let index = BacklinkIndex::new()
            .with_link("c.md", "a.md")
            .with_link("b.md", "a.md")
            .with_link("b.md", "d.md");

        let target = NoteId::new("a.md");
        let sources: Vec<_> = index.sources_linking_to(&target).cloned().collect();
        assert_eq!(sources, vec![NoteId::new("b.md"), NoteId::new("c.md")]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_index_is_directional() {
        let index = BacklinkIndex::new().with_link("b.md", "a.md");
        assert_eq!(index.sources_linking_to(&NoteId::new("a.md")).count(), 1);
        assert_eq!(index.sources_linking_to(&NoteId::new("b.md")).count(), 0);
    }
}
