//! Mock Implementations for Testing
//!
//! These mocks are designed to be:
//!
//! - **Deterministic**: sorted storage, scripted choices
//! - **Observable**: every write, notice and disambiguation request is recorded
//! - **Configurable**: per-note write failures can be injected
//!
//! # Example
//!
//! ```rust
//! use river_core::test_support::MemoryKiln;
//! use river_core::{BacklinkSource, NoteId, PredecessorResolver, TracingSink};
//!
//! let kiln = MemoryKiln::new()
//!     .with_note("a.md", Some("ROOT"))
//!     .with_note("b.md", Some("[[a]]"));
//!
//! let resolver = PredecessorResolver::new(&kiln, &kiln, &TracingSink);
//! assert_eq!(resolver.previous_of(&NoteId::new("b.md")), Some(NoteId::new("a.md")));
//! assert_eq!(kiln.backlink_index().len(), 1);
//! ```

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Mutex;

use crate::choose::{Choice, Disambiguator};
use crate::error::{RiverError, RiverResult};
use crate::index::BacklinkIndex;
use crate::link::{normalize, LinkRef, PreviousValue};
use crate::note::NoteId;
use crate::notice::Notice;
use crate::traits::{BacklinkSource, LinkResolver, MetadataReader, NotificationSink, PreviousWriter};

#[derive(Debug, Clone, Default)]
struct MemoryNote {
    previous: Option<String>,
    body: Option<String>,
}

/// In-memory kiln implementing every host port.
///
/// Writes update the stored `previous` text immediately, the way a host's
/// metadata cache catches up after a frontmatter edit. The backlink index is
/// derived from the stored `previous` values plus any extra links added with
/// [`MemoryKiln::with_link`].
#[derive(Debug, Default)]
pub struct MemoryKiln {
    notes: Mutex<BTreeMap<NoteId, MemoryNote>>,
    extra_links: Vec<(NoteId, NoteId)>,
    failing: HashSet<NoteId>,
    writes: Mutex<Vec<(NoteId, PreviousValue)>>,
}

impl MemoryKiln {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note with a raw `previous` value
    #[must_use]
    pub fn with_note(self, path: &str, previous: Option<&str>) -> Self {
        self.lock_notes()
            .entry(NoteId::new(path))
            .or_default()
            .previous = previous.map(str::to_string);
        self
    }

    /// Give a note raw body text (for the degraded-mode fallback)
    #[must_use]
    pub fn with_body(self, path: &str, body: &str) -> Self {
        self.lock_notes().entry(NoteId::new(path)).or_default().body = Some(body.to_string());
        self
    }

    /// Add a link that does not come from a `previous` field
    #[must_use]
    pub fn with_link(mut self, source: &str, target: &str) -> Self {
        self.extra_links.push((NoteId::new(source), NoteId::new(target)));
        self
    }

    /// Make every write to `path` fail
    #[must_use]
    pub fn with_failing_writes(mut self, path: &str) -> Self {
        self.failing.insert(NoteId::new(path));
        self
    }

    /// Current raw `previous` value of a note
    pub fn previous(&self, path: &str) -> Option<String> {
        self.lock_notes()
            .get(&NoteId::new(path))
            .and_then(|note| note.previous.clone())
    }

    /// Every write attempted so far, in order (failed ones included)
    pub fn writes(&self) -> Vec<(NoteId, PreviousValue)> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Index built from the current `previous` values plus extra links
    pub fn backlinks_from_previous(&self) -> BacklinkIndex {
        let notes = self.lock_notes().clone();
        let mut index = BacklinkIndex::new();

        for (id, note) in &notes {
            let target = normalize(note.previous.as_deref())
                .and_then(|reference| resolve_in(&notes, &reference));
            if let Some(target) = target {
                index.insert(id.clone(), target);
            }
        }
        for (source, target) in &self.extra_links {
            index.insert(source.clone(), target.clone());
        }

        index
    }

    fn lock_notes(&self) -> std::sync::MutexGuard<'_, BTreeMap<NoteId, MemoryNote>> {
        self.notes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn resolve_in(notes: &BTreeMap<NoteId, MemoryNote>, reference: &LinkRef) -> Option<NoteId> {
    notes
        .keys()
        .find(|id| id.matches_reference(reference))
        .cloned()
}

impl MetadataReader for MemoryKiln {
    fn previous_field(&self, note: &NoteId) -> Option<String> {
        self.lock_notes().get(note).and_then(|n| n.previous.clone())
    }

    fn body(&self, note: &NoteId) -> Option<String> {
        self.lock_notes().get(note).and_then(|n| n.body.clone())
    }
}

impl LinkResolver for MemoryKiln {
    fn resolve(&self, reference: &LinkRef, _relative_to: &NoteId) -> Option<NoteId> {
        resolve_in(&self.lock_notes(), reference)
    }
}

impl BacklinkSource for MemoryKiln {
    fn backlink_index(&self) -> BacklinkIndex {
        self.backlinks_from_previous()
    }
}

#[async_trait]
impl PreviousWriter for MemoryKiln {
    async fn set_previous(&self, note: &NoteId, value: &PreviousValue) -> RiverResult<()> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((note.clone(), value.clone()));

        if self.failing.contains(note) {
            return Err(RiverError::write_failed(note, "simulated write failure"));
        }

        self.lock_notes().entry(note.clone()).or_default().previous = Some(value.render());
        Ok(())
    }
}

/// Disambiguator that replays a fixed script and records every request.
///
/// Once the script runs out it cancels.
#[derive(Debug, Default)]
pub struct ScriptedChooser {
    script: Mutex<VecDeque<Choice>>,
    requests: Mutex<Vec<Vec<NoteId>>>,
}

impl ScriptedChooser {
    pub fn new(script: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script that picks the given notes in order
    pub fn picking(paths: &[&str]) -> Self {
        Self::new(paths.iter().map(|p| Choice::Chosen(NoteId::new(*p))))
    }

    /// Candidate lists seen so far
    pub fn requests(&self) -> Vec<Vec<NoteId>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Disambiguator for ScriptedChooser {
    async fn choose_one(&self, candidates: &[NoteId]) -> Choice {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(candidates.to_vec());
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(Choice::Cancelled)
    }
}

/// Notification sink that keeps every notice
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_kiln_records_writes() {
        let kiln = MemoryKiln::new().with_note("a.md", None);
        let id = NoteId::new("a.md");

        kiln.set_previous(&id, &PreviousValue::Root).await.unwrap();

        assert_eq!(kiln.previous("a.md"), Some("ROOT".to_string()));
        assert_eq!(kiln.writes(), vec![(id, PreviousValue::Root)]);
    }

    #[tokio::test]
    async fn test_memory_kiln_failing_writes() {
        let kiln = MemoryKiln::new()
            .with_note("a.md", Some("[[b]]"))
            .with_failing_writes("a.md");

        let result = kiln.set_previous(&"a.md".into(), &PreviousValue::Root).await;

        assert!(matches!(result, Err(RiverError::WriteFailed { .. })));
        assert_eq!(kiln.previous("a.md"), Some("[[b]]".to_string()));
        assert_eq!(kiln.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_scripted_chooser_runs_out() {
        let chooser = ScriptedChooser::picking(&["b.md"]);
        let candidates = vec![NoteId::new("b.md"), NoteId::new("c.md")];

        assert_eq!(
            chooser.choose_one(&candidates).await,
            Choice::Chosen(NoteId::new("b.md"))
        );
        assert_eq!(chooser.choose_one(&candidates).await, Choice::Cancelled);
        assert_eq!(chooser.requests().len(), 2);
    }
}
