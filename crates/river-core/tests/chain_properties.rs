//! End-to-end properties of river resolution and editing
//!
//! Every scenario runs against the in-memory kiln from `test_support`, so the
//! same ports a real host implements are exercised.

use proptest::prelude::*;
use river_core::test_support::{MemoryKiln, RecordingSink, ScriptedChooser};
use river_core::{
    normalize, BacklinkSource, ChainEditor, ChainWalker, Choice, EditOutcome, NoteId,
    PredecessorResolver, TailWalk,
};

fn id(path: &str) -> NoteId {
    NoteId::new(path)
}

// ============================================================================
// Link codec
// ============================================================================

proptest! {
    #[test]
    fn bracketed_and_bare_forms_normalize_alike(reference in "[A-Za-z0-9_\\-/ ]{1,24}") {
        let bracketed = normalize(Some(format!("[[{}]]", reference).as_str()));
        let bare = normalize(Some(reference.as_str()));
        prop_assert_eq!(bracketed.clone(), bare);

        let trimmed = reference.trim();
        if trimmed.is_empty() {
            prop_assert!(bracketed.is_none());
        } else {
            prop_assert_eq!(bracketed.map(|r| r.as_str().to_string()), Some(trimmed.to_string()));
        }
    }
}

#[test]
fn alias_is_stripped() {
    assert_eq!(normalize(Some("[[note|alias]]")).unwrap().as_str(), "note");
}

// ============================================================================
// Walking
// ============================================================================

#[test]
fn head_of_a_straight_river() {
    let kiln = MemoryKiln::new()
        .with_note("A.md", Some("ROOT"))
        .with_note("B.md", Some("[[A]]"))
        .with_note("C.md", Some("[[B]]"));
    let sink = RecordingSink::new();
    let walker = ChainWalker::new(&kiln, &kiln, &sink);

    assert_eq!(walker.find_head(&id("C.md")), id("A.md"));
}

#[test]
fn head_of_a_ring_terminates() {
    let kiln = MemoryKiln::new()
        .with_note("A.md", Some("[[B]]"))
        .with_note("B.md", Some("[[A]]"));
    let sink = RecordingSink::new();
    let walker = ChainWalker::new(&kiln, &kiln, &sink);

    let head = walker.find_head(&id("A.md"));
    assert!(head == id("A.md") || head == id("B.md"));
}

#[tokio::test]
async fn tail_branch_point_continues_from_choice() {
    let kiln = MemoryKiln::new()
        .with_note("A.md", Some("ROOT"))
        .with_note("B.md", Some("[[A]]"))
        .with_note("C.md", Some("[[A]]"))
        .with_note("D.md", Some("[[B]]"));
    let sink = RecordingSink::new();
    let walker = ChainWalker::new(&kiln, &kiln, &sink);
    let index = kiln.backlink_index();
    let chooser = ScriptedChooser::picking(&["B.md"]);

    let tail = walker.find_tail(&id("A.md"), &index, &chooser).await;

    assert_eq!(tail, TailWalk::Tail(id("D.md")));
    assert_eq!(chooser.requests(), vec![vec![id("B.md"), id("C.md")]]);
}

#[tokio::test]
async fn tail_branch_point_cancellation_stops_the_walk() {
    let kiln = MemoryKiln::new()
        .with_note("A.md", Some("ROOT"))
        .with_note("B.md", Some("[[A]]"))
        .with_note("C.md", Some("[[A]]"))
        .with_note("D.md", Some("[[B]]"))
        .with_note("E.md", Some("[[B]]"));
    let sink = RecordingSink::new();
    let walker = ChainWalker::new(&kiln, &kiln, &sink);
    let index = kiln.backlink_index();
    let chooser = ScriptedChooser::new([Choice::Cancelled, Choice::Chosen(id("D.md"))]);

    let tail = walker.find_tail(&id("A.md"), &index, &chooser).await;

    assert_eq!(tail, TailWalk::Cancelled);
    assert_eq!(chooser.requests().len(), 1);
}

// ============================================================================
// Editing
// ============================================================================

#[tokio::test]
async fn insert_after_preserves_continuity() {
    let kiln = MemoryKiln::new()
        .with_note("A.md", Some("ROOT"))
        .with_note("C.md", Some("[[A]]"))
        .with_note("X.md", None);
    let sink = RecordingSink::new();
    let editor = ChainEditor::new(&kiln, &kiln, &kiln, &sink);
    let index = kiln.backlink_index();

    let outcome = editor.insert_after(&id("X.md"), &id("A.md"), &index).await;
    assert_eq!(outcome, EditOutcome::Completed);

    let resolver = PredecessorResolver::new(&kiln, &kiln, &sink);
    assert_eq!(resolver.previous_of(&id("X.md")), Some(id("A.md")));
    assert_eq!(resolver.previous_of(&id("C.md")), Some(id("X.md")));
    assert_eq!(resolver.previous_of(&id("A.md")), None);
    assert!(sink.notices().is_empty());
}

#[tokio::test]
async fn detach_isolates_without_repointing() {
    let kiln = MemoryKiln::new()
        .with_note("A.md", Some("ROOT"))
        .with_note("B.md", Some("[[A]]"))
        .with_note("C.md", Some("[[B]]"));
    let sink = RecordingSink::new();
    let editor = ChainEditor::new(&kiln, &kiln, &kiln, &sink);

    editor.detach(&id("B.md")).await;

    let resolver = PredecessorResolver::new(&kiln, &kiln, &sink);
    assert_eq!(resolver.previous_of(&id("B.md")), None);
    assert_eq!(resolver.previous_of(&id("C.md")), Some(id("B.md")));
}

#[tokio::test]
async fn detach_is_idempotent() {
    let once = MemoryKiln::new()
        .with_note("A.md", Some("ROOT"))
        .with_note("B.md", Some("[[A]]"));
    let twice = MemoryKiln::new()
        .with_note("A.md", Some("ROOT"))
        .with_note("B.md", Some("[[A]]"));
    let sink = RecordingSink::new();

    ChainEditor::new(&once, &once, &once, &sink)
        .detach(&id("B.md"))
        .await;
    let editor = ChainEditor::new(&twice, &twice, &twice, &sink);
    editor.detach(&id("B.md")).await;
    editor.detach(&id("B.md")).await;

    assert_eq!(once.previous("B.md"), twice.previous("B.md"));
    assert_eq!(once.previous("A.md"), twice.previous("A.md"));
    assert_eq!(once.backlink_index(), twice.backlink_index());
}

#[tokio::test]
async fn many_note_river_round_trip() {
    // note_00 <- note_01 <- ... <- note_19, the layout of the stress-test kiln
    let mut kiln = MemoryKiln::new().with_note("note_00.md", Some("ROOT"));
    for i in 1..20 {
        kiln = kiln.with_note(
            &format!("note_{:02}.md", i),
            Some(format!("[[note_{:02}]]", i - 1).as_str()),
        );
    }
    let sink = RecordingSink::new();
    let walker = ChainWalker::new(&kiln, &kiln, &sink);
    let index = kiln.backlink_index();
    let chooser = ScriptedChooser::default();

    assert_eq!(walker.find_head(&id("note_13.md")), id("note_00.md"));
    assert_eq!(
        walker.find_tail(&id("note_04.md"), &index, &chooser).await,
        TailWalk::Tail(id("note_19.md"))
    );
    assert!(chooser.requests().is_empty());
}
