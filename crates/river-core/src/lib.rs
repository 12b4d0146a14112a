//! # River Core
//!
//! Chain resolution and chain editing for notes ordered by a single
//! back-reference field, `previous`, stored in each note's frontmatter.
//!
//! The forward direction of a river is never stored: it is derived from a
//! backlink snapshot every time it is needed. This crate owns the pure logic
//! (link codec, predecessor/successor resolution, head/tail walks and the
//! three chain edits) and reaches its host only through the ports declared in
//! [`traits`] and [`choose`].
//!
//! ```text
//! ┌──────────────┐   previous_field / body   ┌──────────────────────┐
//! │ MetadataReader│ ─────────────────────────▶│ PredecessorResolver  │
//! └──────────────┘                            │  + successors_of     │
//! ┌──────────────┐   resolve(reference)       └──────────┬───────────┘
//! │ LinkResolver  │ ─────────────────────────▶           │
//! └──────────────┘                            ┌──────────▼───────────┐
//! ┌──────────────┐   choose_one(candidates)   │ ChainWalker          │
//! │ Disambiguator │ ◀────────────────────────▶│  find_head/find_tail │
//! └──────────────┘                            └──────────┬───────────┘
//! ┌──────────────┐   set_previous(note, value)┌──────────▼───────────┐
//! │PreviousWriter │ ◀─────────────────────────│ ChainEditor          │
//! └──────────────┘                            └──────────────────────┘
//! ```

pub mod choose;
pub mod editor;
mod error;
pub mod index;
pub mod link;
pub mod note;
pub mod notice;
pub mod resolve;
pub mod traits;
pub mod walker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use choose::{AlwaysCancel, Choice, Disambiguator, FirstCandidate};
pub use editor::{ChainEditor, EditOutcome};
pub use error::{RiverError, RiverResult};
pub use index::BacklinkIndex;
pub use link::{normalize, previous_from_body, LinkRef, PreviousValue, ROOT_SENTINEL};
pub use note::NoteId;
pub use notice::{Notice, TracingSink};
pub use resolve::{successors_of, PredecessorResolver};
pub use traits::{BacklinkSource, LinkResolver, MetadataReader, NotificationSink, PreviousWriter};
pub use walker::{ChainWalker, NextStep, TailWalk};
