//! Note identity

use serde::{Deserialize, Serialize};

use crate::error::RiverResult;
use crate::link::{LinkRef, ROOT_SENTINEL};

const MARKDOWN_EXTENSION: &str = ".md";

/// Opaque identity of a note: its path relative to the kiln root, always with
/// `/` separators (e.g. `journal/day-01.md`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(path: impl Into<String>) -> Self {
        let path: String = path.into();
        NoteId(path.replace('\\', "/"))
    }

    /// Full identity (relative path including extension)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File stem, which is what a bare wikilink names (`journal/day-01.md` -> `day-01`)
    pub fn short_name(&self) -> &str {
        let file = self.0.rsplit('/').next().unwrap_or(&self.0);
        file.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(file)
    }

    /// Full identity without the markdown extension (`journal/day-01`)
    pub fn path_without_extension(&self) -> &str {
        self.0.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(&self.0)
    }

    /// Folder portion of the identity, empty for notes at the kiln root
    pub fn folder(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Whether a stored reference names this note textually.
    ///
    /// The stored text may use the short name or the full identity, with or
    /// without the `.md` extension.
    pub fn matches_reference(&self, reference: &LinkRef) -> bool {
        let reference = reference.as_str();
        reference == self.short_name()
            || reference == self.as_str()
            || reference == self.path_without_extension()
    }

    /// Forms a `previous` link can name this note by, shortest first.
    ///
    /// Forms equal to the `ROOT` sentinel are skipped; the full identity
    /// always remains.
    pub fn reference_forms(&self) -> impl Iterator<Item = &str> {
        let short = self.short_name();
        let without_extension = self.path_without_extension();
        let full = self.as_str();

        [
            Some(short),
            (without_extension != short).then_some(without_extension),
            (full != without_extension).then_some(full),
        ]
        .into_iter()
        .flatten()
        .filter(|form| *form != ROOT_SENTINEL)
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        NoteId::new(s)
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        NoteId::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_strips_folder_and_extension() {
        let id = NoteId::new("journal/2024/day-01.md");
        assert_eq!(id.short_name(), "day-01");
        assert_eq!(id.path_without_extension(), "journal/2024/day-01");
        assert_eq!(id.folder(), "journal/2024");
    }

    #[test]
    fn test_root_level_note() {
        let id = NoteId::new("inbox.md");
        assert_eq!(id.short_name(), "inbox");
        assert_eq!(id.folder(), "");
    }

    #[test]
    fn test_backslashes_are_normalized() {
        let id = NoteId::new("journal\\day-01.md");
        assert_eq!(id.as_str(), "journal/day-01.md");
    }

    #[test]
    fn test_matches_reference_accepts_every_form() {
        let id = NoteId::new("journal/day-01.md");
        assert!(id.matches_reference(&LinkRef::new("day-01").unwrap()));
        assert!(id.matches_reference(&LinkRef::new("journal/day-01").unwrap()));
        assert!(id.matches_reference(&LinkRef::new("journal/day-01.md").unwrap()));
        assert!(!id.matches_reference(&LinkRef::new("Day-01").unwrap()));
        assert!(!id.matches_reference(&LinkRef::new("day-02").unwrap()));
    }

    #[test]
    fn test_reference_forms_shortest_first() {
        let id = NoteId::new("journal/day-01.md");
        let forms: Vec<_> = id.reference_forms().collect();
        assert_eq!(forms, vec!["day-01", "journal/day-01", "journal/day-01.md"]);

        let top = NoteId::new("inbox.md");
        assert_eq!(top.reference_forms().collect::<Vec<_>>(), vec!["inbox", "inbox.md"]);
    }

    #[test]
    fn test_reference_forms_never_spell_the_sentinel() {
        let id = NoteId::new("ROOT.md");
        assert_eq!(id.reference_forms().collect::<Vec<_>>(), vec!["ROOT.md"]);

        let nested = NoteId::new("chains/ROOT.md");
        assert_eq!(
            nested.reference_forms().collect::<Vec<_>>(),
            vec!["chains/ROOT", "chains/ROOT.md"]
        );
    }
}
