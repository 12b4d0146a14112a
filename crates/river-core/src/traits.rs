//! Host ports
//!
//! The core never reaches into an ambient application object. Every
//! collaborator it needs is one of these traits, handed in explicitly:
//!
//! - [`MetadataReader`] - raw `previous` text (plus a raw-body fallback)
//! - [`LinkResolver`] - host-specific reference -> note resolution
//! - [`BacklinkSource`] - outgoing-link snapshot
//! - [`PreviousWriter`] - the single-field write primitive
//! - [`NotificationSink`] - fire-and-forget warnings
//!
//! The disambiguation port lives in [`crate::choose`].

use async_trait::async_trait;

use crate::error::RiverResult;
use crate::index::BacklinkIndex;
use crate::link::{LinkRef, PreviousValue};
use crate::note::NoteId;
use crate::notice::Notice;

/// Read access to note metadata
pub trait MetadataReader: Send + Sync {
    /// Raw `previous` value from structured metadata, if any
    fn previous_field(&self, note: &NoteId) -> Option<String>;

    /// Raw note text for the degraded-mode line scan.
    ///
    /// Only consulted when [`previous_field`](Self::previous_field) yields
    /// nothing, so hosts may hand out the full text of every note.
    fn body(&self, _note: &NoteId) -> Option<String> {
        None
    }
}

/// Host link resolution (path-aware, relative to the linking note)
pub trait LinkResolver: Send + Sync {
    fn resolve(&self, reference: &LinkRef, relative_to: &NoteId) -> Option<NoteId>;
}

/// Provider of backlink index snapshots
pub trait BacklinkSource: Send + Sync {
    fn backlink_index(&self) -> BacklinkIndex;
}

/// Write primitive for the `previous` field.
///
/// Expected to be atomic per note; nothing is promised across notes.
#[async_trait]
pub trait PreviousWriter: Send + Sync {
    async fn set_previous(&self, note: &NoteId, value: &PreviousValue) -> RiverResult<()>;
}

/// Fire-and-forget channel for warnings
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<T: MetadataReader + ?Sized> MetadataReader for std::sync::Arc<T> {
    fn previous_field(&self, note: &NoteId) -> Option<String> {
        (**self).previous_field(note)
    }

    fn body(&self, note: &NoteId) -> Option<String> {
        (**self).body(note)
    }
}

impl<T: LinkResolver + ?Sized> LinkResolver for std::sync::Arc<T> {
    fn resolve(&self, reference: &LinkRef, relative_to: &NoteId) -> Option<NoteId> {
        (**self).resolve(reference, relative_to)
    }
}

impl<T: BacklinkSource + ?Sized> BacklinkSource for std::sync::Arc<T> {
    fn backlink_index(&self) -> BacklinkIndex {
        (**self).backlink_index()
    }
}

#[async_trait]
impl<T: PreviousWriter + ?Sized> PreviousWriter for std::sync::Arc<T> {
    async fn set_previous(&self, note: &NoteId, value: &PreviousValue) -> RiverResult<()> {
        (**self).set_previous(note, value).await
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}
