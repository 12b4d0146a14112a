//! Chain walking: head, tail and single forward steps
//!
//! Walks are recomputed from scratch on every call. Both directions stop on
//! the first revisited note, so closed rings and rho-shaped chains terminate.

use std::collections::HashSet;

use tracing::debug;

use crate::choose::{Choice, Disambiguator};
use crate::index::BacklinkIndex;
use crate::note::NoteId;
use crate::resolve::{successors_of, PredecessorResolver};
use crate::traits::{LinkResolver, MetadataReader, NotificationSink};

/// Result of walking forward to the end of a river
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TailWalk {
    Tail(NoteId),
    /// A branch-point prompt was abandoned
    Cancelled,
}

/// Result of a single forward step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// The note has no successor
    End,
    Next(NoteId),
    Cancelled,
}

/// Composes the resolvers into head/tail searches
pub struct ChainWalker<'a> {
    predecessors: PredecessorResolver<'a>,
}

impl<'a> ChainWalker<'a> {
    pub fn new(
        metadata: &'a dyn MetadataReader,
        links: &'a dyn LinkResolver,
        notices: &'a dyn NotificationSink,
    ) -> Self {
        Self {
            predecessors: PredecessorResolver::new(metadata, links, notices),
        }
    }

    pub fn resolver(&self) -> &PredecessorResolver<'a> {
        &self.predecessors
    }

    /// One step backwards
    pub fn previous_of(&self, note: &NoteId) -> Option<NoteId> {
        self.predecessors.previous_of(note)
    }

    /// Candidates for one step forwards
    pub fn successors_of(&self, note: &NoteId, index: &BacklinkIndex) -> Vec<NoteId> {
        successors_of(note, index, self.predecessors.metadata())
    }

    /// Follow `previous` until it runs out or loops.
    ///
    /// On a ring through `start` this returns the last note before the ring
    /// closes back onto `start`.
    pub fn find_head(&self, start: &NoteId) -> NoteId {
        let mut current = start.clone();
        let mut visited = HashSet::from([start.clone()]);

        while let Some(previous) = self.previous_of(&current) {
            if previous == *start {
                debug!(start = %start, at = %current, "river loops back to its start");
                break;
            }
            if !visited.insert(previous.clone()) {
                debug!(start = %start, at = %current, repeat = %previous, "cycle while walking back");
                break;
            }
            current = previous;
        }

        current
    }

    /// Follow successors until none are left or the walk loops.
    ///
    /// Branch points go through `chooser`; a cancelled choice cancels the
    /// whole walk.
    pub async fn find_tail(
        &self,
        start: &NoteId,
        index: &BacklinkIndex,
        chooser: &dyn Disambiguator,
    ) -> TailWalk {
        let mut current = start.clone();
        let mut visited = HashSet::from([start.clone()]);

        loop {
            let nexts = self.successors_of(&current, index);
            if nexts.is_empty() {
                return TailWalk::Tail(current);
            }
            if nexts.contains(start) {
                debug!(start = %start, at = %current, "river loops back to its start");
                return TailWalk::Tail(current);
            }

            let next = match pick(nexts, chooser).await {
                Choice::Chosen(next) => next,
                Choice::Cancelled => {
                    debug!(start = %start, at = %current, "tail walk cancelled");
                    return TailWalk::Cancelled;
                }
            };

            if !visited.insert(next.clone()) {
                debug!(start = %start, at = %current, repeat = %next, "cycle while walking forward");
                return TailWalk::Tail(current);
            }
            current = next;
        }
    }

    /// A single "go to next" step
    pub async fn next_of(
        &self,
        note: &NoteId,
        index: &BacklinkIndex,
        chooser: &dyn Disambiguator,
    ) -> NextStep {
        let nexts = self.successors_of(note, index);
        if nexts.is_empty() {
            return NextStep::End;
        }

        match pick(nexts, chooser).await {
            Choice::Chosen(next) => NextStep::Next(next),
            Choice::Cancelled => NextStep::Cancelled,
        }
    }
}

/// A lone candidate is taken without asking
async fn pick(mut candidates: Vec<NoteId>, chooser: &dyn Disambiguator) -> Choice {
    if candidates.len() == 1 {
        return Choice::Chosen(candidates.remove(0));
    }
    chooser.choose_one(&candidates).await
}
