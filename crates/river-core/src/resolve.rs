//! Predecessor and successor resolution

use tracing::debug;

use crate::index::BacklinkIndex;
use crate::link::{normalize, previous_from_body, LinkRef};
use crate::note::NoteId;
use crate::notice::Notice;
use crate::traits::{LinkResolver, MetadataReader, NotificationSink};

/// Normalized `previous` reference of `note`, unresolved.
///
/// Structured metadata wins; the raw-body scan is consulted only when the
/// metadata has nothing. `ROOT` and absent values both yield `None`.
pub fn previous_reference(metadata: &dyn MetadataReader, note: &NoteId) -> Option<LinkRef> {
    let raw = metadata
        .previous_field(note)
        .filter(|raw| !raw.trim().is_empty())
        .or_else(|| metadata.body(note).and_then(|body| previous_from_body(&body)));

    normalize(raw.as_deref()).filter(|reference| !reference.is_root())
}

/// Resolves a note's single logical predecessor
pub struct PredecessorResolver<'a> {
    metadata: &'a dyn MetadataReader,
    links: &'a dyn LinkResolver,
    notices: &'a dyn NotificationSink,
}

impl<'a> PredecessorResolver<'a> {
    pub fn new(
        metadata: &'a dyn MetadataReader,
        links: &'a dyn LinkResolver,
        notices: &'a dyn NotificationSink,
    ) -> Self {
        Self {
            metadata,
            links,
            notices,
        }
    }

    pub fn metadata(&self) -> &'a dyn MetadataReader {
        self.metadata
    }

    pub fn notices(&self) -> &'a dyn NotificationSink {
        self.notices
    }

    /// Normalized, unresolved `previous` reference of `note`
    pub fn previous_reference(&self, note: &NoteId) -> Option<LinkRef> {
        previous_reference(self.metadata, note)
    }

    /// The note `note` follows, if any.
    ///
    /// A stale reference is reported as [`Notice::PredecessorNotFound`] and
    /// treated as the head of the river.
    pub fn previous_of(&self, note: &NoteId) -> Option<NoteId> {
        let reference = self.previous_reference(note)?;

        match self.links.resolve(&reference, note) {
            Some(target) => {
                debug!(note = %note, previous = %target, "resolved previous note");
                Some(target)
            }
            None => {
                self.notices.notify(Notice::PredecessorNotFound {
                    note: note.clone(),
                    reference,
                });
                None
            }
        }
    }
}

/// Notes whose `previous` names `note`, in index order.
///
/// A candidate must both link to `note` in the snapshot and carry a
/// `previous` reference that textually names it.
pub fn successors_of(
    note: &NoteId,
    index: &BacklinkIndex,
    metadata: &dyn MetadataReader,
) -> Vec<NoteId> {
    index
        .sources_linking_to(note)
        .filter(|candidate| {
            previous_reference(metadata, candidate)
                .is_some_and(|reference| note.matches_reference(&reference))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryKiln, RecordingSink};

    #[test]
    fn test_previous_of_follows_reference() {
        let kiln = MemoryKiln::new()
            .with_note("a.md", Some("ROOT"))
            .with_note("b.md", Some("[[a]]"));
        let sink = RecordingSink::new();
        let resolver = PredecessorResolver::new(&kiln, &kiln, &sink);

        assert_eq!(resolver.previous_of(&"b.md".into()), Some(NoteId::new("a.md")));
        assert_eq!(resolver.previous_of(&"a.md".into()), None);
        assert!(sink.notices().is_empty());
    }

    #[test]
    fn test_absent_previous_is_head() {
        let kiln = MemoryKiln::new().with_note("a.md", None);
        let sink = RecordingSink::new();
        let resolver = PredecessorResolver::new(&kiln, &kiln, &sink);

        assert_eq!(resolver.previous_of(&"a.md".into()), None);
        assert!(sink.notices().is_empty());
    }

    #[test]
    fn test_stale_reference_warns_and_stops() {
        let kiln = MemoryKiln::new().with_note("b.md", Some("[[deleted]]"));
        let sink = RecordingSink::new();
        let resolver = PredecessorResolver::new(&kiln, &kiln, &sink);

        assert_eq!(resolver.previous_of(&"b.md".into()), None);
        assert_eq!(
            sink.notices(),
            vec![Notice::PredecessorNotFound {
                note: NoteId::new("b.md"),
                reference: LinkRef::new("deleted").unwrap(),
            }]
        );
    }

    #[test]
    fn test_lowercase_root_is_a_literal_reference() {
        let kiln = MemoryKiln::new().with_note("b.md", Some("root"));
        let sink = RecordingSink::new();
        let resolver = PredecessorResolver::new(&kiln, &kiln, &sink);

        assert_eq!(resolver.previous_of(&"b.md".into()), None);
        assert_eq!(sink.notices().len(), 1);
    }

    #[test]
    fn test_body_fallback_only_without_metadata() {
        let kiln = MemoryKiln::new()
            .with_note("a.md", Some("ROOT"))
            .with_note("c.md", Some("ROOT"))
            .with_note("b.md", None)
            .with_body("b.md", "previous: [[a]]\n")
            .with_note("d.md", Some("[[c]]"))
            .with_body("d.md", "previous: [[a]]\n");
        let sink = RecordingSink::new();
        let resolver = PredecessorResolver::new(&kiln, &kiln, &sink);

        assert_eq!(resolver.previous_of(&"b.md".into()), Some(NoteId::new("a.md")));
        assert_eq!(resolver.previous_of(&"d.md".into()), Some(NoteId::new("c.md")));
    }

    #[test]
    fn test_successors_accept_short_name_and_full_identity() {
        let kiln = MemoryKiln::new()
            .with_note("notes/a.md", Some("ROOT"))
            .with_note("b.md", Some("[[a]]"))
            .with_note("c.md", Some("[[notes/a|A]]"))
            .with_note("d.md", Some("notes/a.md"));
        let index = kiln.backlinks_from_previous();

        let successors = successors_of(&"notes/a.md".into(), &index, &kiln);
        assert_eq!(
            successors,
            vec![NoteId::new("b.md"), NoteId::new("c.md"), NoteId::new("d.md")]
        );
    }

    #[test]
    fn test_successors_require_a_matching_previous() {
        // b links to a in its body but follows c
        let kiln = MemoryKiln::new()
            .with_note("a.md", Some("ROOT"))
            .with_note("c.md", Some("ROOT"))
            .with_note("b.md", Some("[[c]]"));
        let index = BacklinkIndex::new()
            .with_link("b.md", "a.md")
            .with_link("b.md", "c.md");

        assert!(successors_of(&"a.md".into(), &index, &kiln).is_empty());
        assert_eq!(
            successors_of(&"c.md".into(), &index, &kiln),
            vec![NoteId::new("b.md")]
        );
    }

    #[test]
    fn test_successors_require_a_link_in_the_index() {
        let kiln = MemoryKiln::new()
            .with_note("a.md", Some("ROOT"))
            .with_note("b.md", Some("[[a]]"));

        assert!(successors_of(&"a.md".into(), &BacklinkIndex::new(), &kiln).is_empty());
    }
}
