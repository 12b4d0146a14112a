//! Link resolution with Obsidian's rules
//!
//! 1. The `#heading` / `#^block` subpath is ignored; a bare `#heading` points
//!    at the source note itself.
//! 2. Path-qualified references (`dir/name`) match a full path, with or
//!    without `.md`, then a path relative to the source's folder, then any
//!    path ending in `/dir/name` (shortest first).
//! 3. Bare names match the file stem, preferring the source's own folder and
//!    then the shortest path.
//!
//! Every step is tried with exact case before falling back to a
//! case-insensitive comparison.

use std::collections::BTreeMap;

use river_core::NoteId;

const MARKDOWN_EXTENSION: &str = ".md";

/// Resolve `reference` as written in `source` to a note of the kiln
pub fn resolve_link<V>(
    notes: &BTreeMap<NoteId, V>,
    reference: &str,
    source: &NoteId,
) -> Option<NoteId> {
    let without_subpath = reference.split('#').next().unwrap_or(reference);
    let cleaned = without_subpath.trim().replace('\\', "/");
    let target = cleaned.trim_start_matches("./").trim_start_matches('/');

    if target.is_empty() {
        return notes.contains_key(source).then(|| source.clone());
    }
    let target = target.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(target);

    resolve_with(notes, target, source, |a, b| a == b)
        .or_else(|| resolve_with(notes, target, source, |a, b| a.to_lowercase() == b.to_lowercase()))
}

fn resolve_with<V>(
    notes: &BTreeMap<NoteId, V>,
    target: &str,
    source: &NoteId,
    eq: impl Fn(&str, &str) -> bool,
) -> Option<NoteId> {
    if target.contains('/') {
        if let Some(id) = notes
            .keys()
            .find(|id| eq(id.path_without_extension(), target))
        {
            return Some(id.clone());
        }

        if let Some(relative) = join_relative(source.folder(), target) {
            if let Some(id) = notes
                .keys()
                .find(|id| eq(id.path_without_extension(), relative.as_str()))
            {
                return Some(id.clone());
            }
        }

        let suffix = format!("/{}", target);
        return notes
            .keys()
            .filter(|id| {
                let path = id.path_without_extension();
                path.len() > suffix.len()
                    && path.is_char_boundary(path.len() - suffix.len())
                    && eq(&path[path.len() - suffix.len()..], suffix.as_str())
            })
            .min_by_key(|id| id.as_str().len())
            .cloned();
    }

    let candidates: Vec<&NoteId> = notes
        .keys()
        .filter(|id| eq(id.short_name(), target))
        .collect();

    candidates
        .iter()
        .find(|id| id.folder() == source.folder())
        .or_else(|| candidates.iter().min_by_key(|id| id.as_str().len()))
        .map(|id| (*id).clone())
}

/// Join `target` onto `folder`, collapsing `.` and `..` segments
fn join_relative(folder: &str, target: &str) -> Option<String> {
    let mut parts: Vec<&str> = folder.split('/').filter(|p| !p.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kiln(paths: &[&str]) -> BTreeMap<NoteId, ()> {
        paths.iter().map(|p| (NoteId::new(*p), ())).collect()
    }

    fn resolve(notes: &BTreeMap<NoteId, ()>, reference: &str, source: &str) -> Option<String> {
        resolve_link(notes, reference, &NoteId::new(source)).map(|id| id.as_str().to_string())
    }

    #[test]
    fn test_bare_name_by_stem() {
        let notes = kiln(&["daily/day-01.md", "index.md"]);
        assert_eq!(resolve(&notes, "day-01", "index.md").as_deref(), Some("daily/day-01.md"));
        assert_eq!(resolve(&notes, "day-01.md", "index.md").as_deref(), Some("daily/day-01.md"));
        assert_eq!(resolve(&notes, "missing", "index.md"), None);
    }

    #[test]
    fn test_bare_name_prefers_source_folder() {
        let notes = kiln(&["a/note.md", "b/note.md", "b/other.md"]);
        assert_eq!(resolve(&notes, "note", "b/other.md").as_deref(), Some("b/note.md"));
    }

    #[test]
    fn test_bare_name_prefers_shortest_path() {
        let notes = kiln(&["deep/nested/note.md", "top/note.md", "x.md"]);
        assert_eq!(resolve(&notes, "note", "x.md").as_deref(), Some("top/note.md"));
    }

    #[test]
    fn test_exact_case_wins_then_case_insensitive() {
        let notes = kiln(&["Note.md", "a/note.md"]);
        assert_eq!(resolve(&notes, "note", "Note.md").as_deref(), Some("a/note.md"));
        assert_eq!(resolve(&notes, "NOTE", "Note.md").as_deref(), Some("Note.md"));
    }

    #[test]
    fn test_path_qualified() {
        let notes = kiln(&["projects/river/plan.md", "plan.md"]);
        assert_eq!(
            resolve(&notes, "projects/river/plan", "plan.md").as_deref(),
            Some("projects/river/plan.md")
        );
        assert_eq!(
            resolve(&notes, "projects/river/plan.md", "plan.md").as_deref(),
            Some("projects/river/plan.md")
        );
    }

    #[test]
    fn test_relative_and_suffix_paths() {
        let notes = kiln(&["projects/river/plan.md", "projects/notes/log.md"]);
        assert_eq!(
            resolve(&notes, "../river/plan", "projects/notes/log.md").as_deref(),
            Some("projects/river/plan.md")
        );
        assert_eq!(
            resolve(&notes, "river/plan", "projects/notes/log.md").as_deref(),
            Some("projects/river/plan.md")
        );
    }

    #[test]
    fn test_subpath_is_ignored() {
        let notes = kiln(&["a.md", "b.md"]);
        assert_eq!(resolve(&notes, "b#Heading", "a.md").as_deref(), Some("b.md"));
        assert_eq!(resolve(&notes, "b#^block", "a.md").as_deref(), Some("b.md"));
        assert_eq!(resolve(&notes, "#Heading", "a.md").as_deref(), Some("a.md"));
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_relative("a/b", "../c").as_deref(), Some("a/c"));
        assert_eq!(join_relative("", "./c").as_deref(), Some("c"));
        assert_eq!(join_relative("", "../c"), None);
    }
}
