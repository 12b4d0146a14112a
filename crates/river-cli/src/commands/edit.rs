//! Chain edits: `detach`, `insert-after`, `insert-at-head`, `insert-to-last`

use anyhow::Result;
use river_core::{BacklinkSource, Choice, EditOutcome};
use tracing::info;

use super::Session;
use crate::output::EditReport;

pub async fn detach(session: &Session, note: &str) -> Result<()> {
    let note = session.note(note)?;
    let outcome = session.editor().detach(&note).await;

    let summary = format!("{} is now the head of its own river", note);
    EditReport::new("detach", note, outcome, summary).print(session.format())
}

pub async fn insert_after(session: &Session, note: &str, target: &str) -> Result<()> {
    let note = session.note(note)?;
    let target = session.note(target)?;
    let index = session.kiln().backlink_index();
    let outcome = session.editor().insert_after(&note, &target, &index).await;

    let summary = format!("{} now follows {}", note, target);
    EditReport::new("insert-after", note, outcome, summary).print(session.format())
}

pub async fn insert_at_head(session: &Session, note: &str, chain: &str) -> Result<()> {
    let note = session.note(note)?;
    let chain = session.note(chain)?;
    let outcome = session.editor().insert_at_head(&note, &chain).await;

    let summary = format!("{} is now the head of the river containing {}", note, chain);
    EditReport::new("insert-at-head", note, outcome, summary).print(session.format())
}

/// Append a note to the end of a river.
///
/// Without `chain` the river is picked among every note of the kiln. The note
/// is detached even when that pick is cancelled.
pub async fn insert_to_last(session: &Session, note: &str, chain: Option<&str>) -> Result<()> {
    let note = session.note(note)?;
    let chain = match chain {
        Some(chain) => Some(session.note(chain)?),
        None => match session.picker().choose_one(&session.kiln().notes()).await {
            Choice::Chosen(chain) => Some(chain),
            Choice::Cancelled => None,
        },
    };

    let editor = session.editor();
    let outcome = match &chain {
        Some(chain) => {
            let index = session.kiln().backlink_index();
            editor
                .insert_at_tail(&note, chain, &index, session.picker())
                .await
        }
        None => {
            info!(note = %note, "no river picked, detaching only");
            match editor.detach(&note).await {
                EditOutcome::Completed => EditOutcome::Cancelled,
                incomplete => incomplete,
            }
        }
    };

    let summary = match &chain {
        Some(chain) => format!("{} appended to the river containing {}", note, chain),
        None => String::new(),
    };
    EditReport::new("insert-to-last", note, outcome, summary).print(session.format())
}
