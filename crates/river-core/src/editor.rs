//! Chain editing
//!
//! Each operation is a short sequence of single-field writes issued in a fixed
//! order. Nothing is atomic across notes: a failed write is reported, skipped,
//! and the remaining writes still go out. Completed writes are never rolled
//! back.

use tracing::{debug, info, warn};

use crate::choose::Disambiguator;
use crate::error::{RiverError, RiverResult};
use crate::index::BacklinkIndex;
use crate::link::{LinkRef, PreviousValue};
use crate::note::NoteId;
use crate::notice::Notice;
use crate::traits::{LinkResolver, MetadataReader, NotificationSink, PreviousWriter};
use crate::walker::{ChainWalker, TailWalk};

/// How a chain edit ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Every write went through
    Completed,
    /// Some writes failed; the river may need repair
    Incomplete { failed: Vec<NoteId> },
    /// A disambiguation prompt was abandoned; earlier writes stay in place
    Cancelled,
}

impl EditOutcome {
    fn from_failures(failed: Vec<NoteId>) -> Self {
        if failed.is_empty() {
            EditOutcome::Completed
        } else {
            EditOutcome::Incomplete { failed }
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, EditOutcome::Completed)
    }
}

/// Rewrites `previous` fields to detach and splice notes
pub struct ChainEditor<'a> {
    walker: ChainWalker<'a>,
    links: &'a dyn LinkResolver,
    writer: &'a dyn PreviousWriter,
    notices: &'a dyn NotificationSink,
}

impl<'a> ChainEditor<'a> {
    pub fn new(
        metadata: &'a dyn MetadataReader,
        links: &'a dyn LinkResolver,
        writer: &'a dyn PreviousWriter,
        notices: &'a dyn NotificationSink,
    ) -> Self {
        Self {
            walker: ChainWalker::new(metadata, links, notices),
            links,
            writer,
            notices,
        }
    }

    pub fn walker(&self) -> &ChainWalker<'a> {
        &self.walker
    }

    /// Make `note` the head of a new river.
    ///
    /// Its successors keep pointing at it; they are not repointed.
    pub async fn detach(&self, note: &NoteId) -> EditOutcome {
        let mut failed = Vec::new();
        self.write(note, PreviousValue::Root, &mut failed).await;

        let outcome = EditOutcome::from_failures(failed);
        if outcome.is_completed() {
            info!(note = %note, "detached note");
        }
        outcome
    }

    /// Splice `note` directly after `target`; `target`'s successors now
    /// follow `note`.
    pub async fn insert_after(
        &self,
        note: &NoteId,
        target: &NoteId,
        index: &BacklinkIndex,
    ) -> EditOutcome {
        if note == target {
            debug!(note = %note, "cannot insert a note after itself");
            return EditOutcome::Completed;
        }

        // Captured before any write: the index describes the river as it was
        let successors = self.walker.successors_of(target, index);

        let mut failed = Vec::new();
        self.write(note, PreviousValue::Root, &mut failed).await;
        self.link(note, target, &mut failed).await;
        for successor in successors.iter().filter(|s| *s != note) {
            self.link(successor, note, &mut failed).await;
        }

        let outcome = EditOutcome::from_failures(failed);
        if outcome.is_completed() {
            info!(note = %note, target = %target, moved = successors.len(), "inserted note after target");
        }
        outcome
    }

    /// Make `note` the new head of the river `target_chain` belongs to
    pub async fn insert_at_head(&self, note: &NoteId, target_chain: &NoteId) -> EditOutcome {
        let head = self.walker.find_head(target_chain);

        let mut failed = Vec::new();
        self.write(note, PreviousValue::Root, &mut failed).await;
        if head != *note {
            self.link(&head, note, &mut failed).await;
        }
        self.write(note, PreviousValue::Root, &mut failed).await;

        let outcome = EditOutcome::from_failures(failed);
        if outcome.is_completed() {
            info!(note = %note, old_head = %head, "inserted note at head");
        }
        outcome
    }

    /// Append `note` after the tail of the river `target_chain` belongs to.
    ///
    /// `note` is detached first; if the tail walk is cancelled the detach
    /// stays in place.
    pub async fn insert_at_tail(
        &self,
        note: &NoteId,
        target_chain: &NoteId,
        index: &BacklinkIndex,
        chooser: &dyn Disambiguator,
    ) -> EditOutcome {
        let mut failed = Vec::new();
        self.write(note, PreviousValue::Root, &mut failed).await;

        let tail = match self.walker.find_tail(target_chain, index, chooser).await {
            TailWalk::Tail(tail) => tail,
            TailWalk::Cancelled => return EditOutcome::Cancelled,
        };

        if tail != *note {
            self.link(note, &tail, &mut failed).await;
        }

        let outcome = EditOutcome::from_failures(failed);
        if outcome.is_completed() {
            info!(note = %note, tail = %tail, "inserted note at tail");
        }
        outcome
    }

    /// Point `note` at `target`
    async fn link(&self, note: &NoteId, target: &NoteId, failed: &mut Vec<NoteId>) {
        match self.reference_to(target, note) {
            Ok(reference) => self.write(note, PreviousValue::Link(reference), failed).await,
            Err(err) => self.report_failure(note, err, failed),
        }
    }

    /// Shortest reference that resolves to `target` when written in `from`.
    ///
    /// Falls back to the first form when none resolves.
    fn reference_to(&self, target: &NoteId, from: &NoteId) -> RiverResult<LinkRef> {
        let mut fallback = None;
        for form in target.reference_forms() {
            let reference = LinkRef::new(form)?;
            if self.links.resolve(&reference, from).as_ref() == Some(target) {
                return Ok(reference);
            }
            fallback.get_or_insert(reference);
        }
        fallback.ok_or_else(|| RiverError::InvalidReference(target.to_string()))
    }

    async fn write(&self, note: &NoteId, value: PreviousValue, failed: &mut Vec<NoteId>) {
        match self.writer.set_previous(note, &value).await {
            Ok(()) => debug!(note = %note, previous = %value, "wrote previous"),
            Err(err) => self.report_failure(note, err, failed),
        }
    }

    fn report_failure(&self, note: &NoteId, err: RiverError, failed: &mut Vec<NoteId>) {
        let reason = match err {
            RiverError::WriteFailed { reason, .. } => reason,
            other => other.to_string(),
        };
        warn!(note = %note, reason = %reason, "failed to write previous");
        self.notices.notify(Notice::WriteFailed {
            note: note.clone(),
            reason,
        });
        failed.push(note.clone());
    }
}
