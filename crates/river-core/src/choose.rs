//! Disambiguation port
//!
//! A branch point (several notes claiming the same predecessor) needs a
//! decision from outside the core. Interactive hosts prompt the user;
//! batch tooling and tests plug in one of the deterministic stubs below.

use async_trait::async_trait;

use crate::note::NoteId;

/// Outcome of a disambiguation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Chosen(NoteId),
    /// The user abandoned the prompt
    Cancelled,
}

/// Picks one note among branch-point candidates.
///
/// May suspend indefinitely while waiting on a user. Implementations should
/// only return notes taken from `candidates`.
#[async_trait]
pub trait Disambiguator: Send + Sync {
    async fn choose_one(&self, candidates: &[NoteId]) -> Choice;
}

/// Always picks the first candidate
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidate;

#[async_trait]
impl Disambiguator for FirstCandidate {
    async fn choose_one(&self, candidates: &[NoteId]) -> Choice {
        match candidates.first() {
            Some(note) => Choice::Chosen(note.clone()),
            None => Choice::Cancelled,
        }
    }
}

/// Always cancels
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysCancel;

#[async_trait]
impl Disambiguator for AlwaysCancel {
    async fn choose_one(&self, _candidates: &[NoteId]) -> Choice {
        Choice::Cancelled
    }
}

#[async_trait]
impl<T: Disambiguator + ?Sized> Disambiguator for std::sync::Arc<T> {
    async fn choose_one(&self, candidates: &[NoteId]) -> Choice {
        (**self).choose_one(candidates).await
    }
}

#[async_trait]
impl<T: Disambiguator + ?Sized> Disambiguator for Box<T> {
    async fn choose_one(&self, candidates: &[NoteId]) -> Choice {
        (**self).choose_one(candidates).await
    }
}
