//! # River Kiln
//!
//! A folder of markdown notes as a host for river chains.
//!
//! [`Kiln`] loads every `*.md` file under a root directory, reads the
//! `previous` field out of YAML frontmatter, indexes wikilinks and resolves
//! them with Obsidian's rules. It implements every host port of `river-core`,
//! so the chain walker and chain editor run directly against it.

mod error;
pub mod frontmatter;
pub mod kiln;
pub mod resolve;
pub mod scan;

pub use error::{KilnError, KilnResult};
pub use kiln::Kiln;
pub use resolve::resolve_link;
