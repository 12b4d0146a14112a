//! Human-readable warnings raised while walking or editing a river

use serde::Serialize;

use crate::link::LinkRef;
use crate::note::NoteId;
use crate::traits::NotificationSink;

/// A recoverable condition worth telling the user about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A `previous` reference does not resolve to any note
    PredecessorNotFound { note: NoteId, reference: LinkRef },
    /// The host could not persist a `previous` update
    WriteFailed { note: NoteId, reason: String },
}

impl Notice {
    /// The note the notice is about
    pub fn note(&self) -> &NoteId {
        match self {
            Notice::PredecessorNotFound { note, .. } | Notice::WriteFailed { note, .. } => note,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::PredecessorNotFound { note, reference } => {
                write!(f, "Previous note not found: [[{}]] (from {})", reference, note)
            }
            Notice::WriteFailed { note, reason } => {
                write!(f, "Could not update previous of {}: {}", note, reason)
            }
        }
    }
}

/// Sink that forwards notices to `tracing` at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: Notice) {
        tracing::warn!(note = %notice.note(), "{}", notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_display() {
        let notice = Notice::PredecessorNotFound {
            note: NoteId::new("b.md"),
            reference: LinkRef::new("gone").unwrap(),
        };
        assert_eq!(notice.to_string(), "Previous note not found: [[gone]] (from b.md)");
        assert_eq!(notice.note().as_str(), "b.md");
    }

    #[test]
    fn test_notice_serialization() {
        let notice = Notice::WriteFailed {
            note: NoteId::new("a.md"),
            reason: "read-only".to_string(),
        };
        let json = serde_json::to_value(&notice).expect("serialize");
        assert_eq!(json["kind"], "write_failed");
        assert_eq!(json["note"], "a.md");
    }
}
