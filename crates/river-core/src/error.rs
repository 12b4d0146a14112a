use crate::note::NoteId;

/// Common result type for river operations
pub type RiverResult<T> = Result<T, RiverError>;

/// Errors a host collaborator can hand back to the core.
///
/// None of these are fatal: the chain editor catches them at the call site,
/// reports them through the notification sink and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RiverError {
    #[error("failed to write `previous` for {note}: {reason}")]
    WriteFailed { note: NoteId, reason: String },

    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

impl RiverError {
    /// Build a write failure for `note` from any displayable cause
    pub fn write_failed(note: &NoteId, reason: impl std::fmt::Display) -> Self {
        RiverError::WriteFailed {
            note: note.clone(),
            reason: reason.to_string(),
        }
    }
}
