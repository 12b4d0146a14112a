//! Link codec for the `previous` field
//!
//! The stored value is either the sentinel `ROOT` or a wikilink. On read every
//! historical form is accepted:
//! - Bracketed: `[[note]]`
//! - Aliased: `[[note|Display]]`
//! - Bare: `note` (and `note|Display`)
//!
//! On write the codec always produces `ROOT` or `[[note]]`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{RiverError, RiverResult};

/// Reserved `previous` value meaning "this note is the head of its river"
pub const ROOT_SENTINEL: &str = "ROOT";

static BODY_PREVIOUS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^previous:\s*\[\[(.+?)\]\]").expect("body previous regex"));

/// A normalized link reference: brackets and alias stripped, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkRef(String);

impl LinkRef {
    /// Create a reference the chain editor can write back as `[[reference]]`.
    ///
    /// Rejects text that would not survive a write/read cycle.
    pub fn new(reference: impl Into<String>) -> RiverResult<Self> {
        let reference: String = reference.into();
        let trimmed = reference.trim();
        if trimmed.is_empty()
            || trimmed.contains('|')
            || trimmed.contains("[[")
            || trimmed.contains("]]")
            || trimmed.contains('\n')
        {
            return Err(RiverError::InvalidReference(reference));
        }
        Ok(LinkRef(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this reference is the `ROOT` sentinel (case-sensitive)
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_SENTINEL
    }
}

impl std::fmt::Display for LinkRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize raw `previous` text into a reference.
///
/// Never fails: anything that is not a bracketed link is taken literally.
pub fn normalize(raw: Option<&str>) -> Option<LinkRef> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let inner = strip_brackets(trimmed).trim();
    let target = match inner.split_once('|') {
        Some((target, _alias)) => target,
        None => inner,
    }
    .trim();

    if target.is_empty() {
        None
    } else {
        Some(LinkRef(target.to_string()))
    }
}

fn strip_brackets(text: &str) -> &str {
    match text.strip_prefix("[[").and_then(|rest| rest.strip_suffix("]]")) {
        Some(inner) if !inner.is_empty() => inner,
        _ => text,
    }
}

/// Degraded-mode read: scan raw note text for a `previous: [[...]]` line.
///
/// Only consulted when structured metadata has nothing to offer.
pub fn previous_from_body(text: &str) -> Option<String> {
    BODY_PREVIOUS_REGEX
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| format!("[[{}]]", m.as_str()))
}

/// Value written into the `previous` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousValue {
    /// The note starts a river
    Root,
    /// The note follows the referenced note
    Link(LinkRef),
}

impl PreviousValue {
    /// Stored text: `ROOT` or `[[reference]]`
    pub fn render(&self) -> String {
        match self {
            PreviousValue::Root => ROOT_SENTINEL.to_string(),
            PreviousValue::Link(reference) => format!("[[{}]]", reference),
        }
    }
}

impl std::fmt::Display for PreviousValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
