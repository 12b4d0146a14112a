//! `previous`, `next`, `first` and `last`

use anyhow::Result;
use river_core::{BacklinkSource, NextStep, TailWalk};
use tracing::debug;

use super::Session;
use crate::output::{Destination, NavigationReport};

/// Print the predecessor of a note
pub fn previous(session: &Session, note: &str) -> Result<()> {
    let from = session.note(note)?;
    let destination = match session.walker().previous_of(&from) {
        Some(note) => Destination::Found { note },
        None => Destination::AtEnd,
    };

    NavigationReport {
        command: "previous",
        from,
        destination,
    }
    .print(session.format())
}

/// Print the successor of a note, asking at a branch point
pub async fn next(session: &Session, note: &str) -> Result<()> {
    let from = session.note(note)?;
    let index = session.kiln().backlink_index();
    let destination = match session.walker().next_of(&from, &index, session.picker()).await {
        NextStep::Next(note) => Destination::Found { note },
        NextStep::End => Destination::AtEnd,
        NextStep::Cancelled => Destination::Cancelled,
    };

    NavigationReport {
        command: "next",
        from,
        destination,
    }
    .print(session.format())
}

/// Print the head of the note's river (the note itself when it is the head)
pub fn first(session: &Session, note: &str) -> Result<()> {
    let from = session.note(note)?;
    let head = session.walker().find_head(&from);
    debug!(from = %from, head = %head, "found head");

    NavigationReport {
        command: "first",
        from,
        destination: Destination::Found { note: head },
    }
    .print(session.format())
}

/// Print the tail of the note's river (the note itself when it is the tail)
pub async fn last(session: &Session, note: &str) -> Result<()> {
    let from = session.note(note)?;
    let index = session.kiln().backlink_index();
    let destination = match session.walker().find_tail(&from, &index, session.picker()).await {
        TailWalk::Tail(note) => Destination::Found { note },
        TailWalk::Cancelled => Destination::Cancelled,
    };

    NavigationReport {
        command: "last",
        from,
        destination,
    }
    .print(session.format())
}
