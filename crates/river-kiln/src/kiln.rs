//! The kiln: a directory of markdown notes held in memory
//!
//! Loading walks the root once. After that the in-memory state is the source
//! of truth for reads; `previous` writes go to disk first and then replace the
//! note's cached record, so later reads observe them immediately.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use river_core::{
    normalize, BacklinkIndex, BacklinkSource, LinkRef, LinkResolver, MetadataReader, NoteId,
    PreviousValue, PreviousWriter, RiverError, RiverResult,
};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{KilnError, KilnResult};
use crate::frontmatter::{read_previous, rewrite_previous, split_frontmatter};
use crate::resolve::resolve_link;
use crate::scan::{body_wikilinks, wikilinks};

#[derive(Debug, Clone, Default)]
struct NoteRecord {
    content: String,
    previous: Option<String>,
    /// Raw link targets, resolved lazily against the current note set
    links: Vec<String>,
}

impl NoteRecord {
    fn parse(content: String) -> Self {
        let split = split_frontmatter(&content);
        let mut links = Vec::new();
        let mut previous = None;

        if let Some(yaml) = split.frontmatter {
            links.extend(wikilinks(yaml));
            match read_previous(yaml) {
                Ok(value) => previous = value,
                Err(e) => debug!(error = %e, "frontmatter is not valid YAML"),
            }
        }
        links.extend(body_wikilinks(split.body));

        // Bare `previous` values are not wikilinks but still link the river
        if let Some(reference) = normalize(previous.as_deref()).filter(|r| !r.is_root()) {
            if !links.iter().any(|link| link == reference.as_str()) {
                links.push(reference.as_str().to_string());
            }
        }

        Self {
            content,
            previous,
            links,
        }
    }
}

/// A folder of markdown notes implementing every host port
#[derive(Debug)]
pub struct Kiln {
    root: PathBuf,
    notes: RwLock<BTreeMap<NoteId, NoteRecord>>,
}

impl Kiln {
    /// Load every markdown note under `root`, skipping hidden files and
    /// folders such as `.obsidian` or `.git`.
    pub async fn open(root: impl AsRef<Path>) -> KilnResult<Self> {
        let root = root.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&root)
            .await
            .map_err(|e| KilnError::io(root.clone(), e))?;
        if !metadata.is_dir() {
            return Err(KilnError::NotADirectory(root));
        }
        let root = tokio::fs::canonicalize(&root)
            .await
            .map_err(|e| KilnError::io(root.clone(), e))?;

        let mut notes = BTreeMap::new();
        for path in markdown_files(&root) {
            let Some(id) = note_id(&root, &path) else {
                continue;
            };
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    notes.insert(id, NoteRecord::parse(content));
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable note"),
            }
        }

        info!(root = %root.display(), notes = notes.len(), "kiln loaded");
        Ok(Self {
            root,
            notes: RwLock::new(notes),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk location of a note
    pub fn path_of(&self, note: &NoteId) -> PathBuf {
        note.as_str()
            .split('/')
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Every note, sorted by path
    pub fn notes(&self) -> Vec<NoteId> {
        self.notes.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }

    pub fn contains(&self, note: &NoteId) -> bool {
        self.notes.read().contains_key(note)
    }

    /// Map a user-supplied note argument to a note of the kiln.
    ///
    /// Accepts, in order: a kiln-relative path, a filesystem path (absolute or
    /// relative to the working directory) inside the kiln, and finally
    /// anything a wikilink could say (`name`, `[[name|alias]]`, `dir/name`).
    pub fn find_note(&self, query: &str) -> KilnResult<NoteId> {
        let not_found = || KilnError::NoteNotFound(query.to_string());
        let trimmed = query.trim();
        let notes = self.notes.read();

        let direct = NoteId::new(trimmed);
        if notes.contains_key(&direct) {
            return Ok(direct);
        }

        if let Ok(absolute) = Path::new(trimmed).canonicalize() {
            if let Some(id) = note_id(&self.root, &absolute).filter(|id| notes.contains_key(id)) {
                return Ok(id);
            }
        }

        let reference = normalize(Some(trimmed)).ok_or_else(not_found)?;
        resolve_link(&*notes, reference.as_str(), &NoteId::new("")).ok_or_else(not_found)
    }
}

fn markdown_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping kiln entry");
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "md")
        })
        .map(DirEntry::into_path)
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn note_id(root: &Path, path: &Path) -> Option<NoteId> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(NoteId::new(parts.join("/")))
}

impl MetadataReader for Kiln {
    fn previous_field(&self, note: &NoteId) -> Option<String> {
        self.notes.read().get(note).and_then(|r| r.previous.clone())
    }

    fn body(&self, note: &NoteId) -> Option<String> {
        self.notes.read().get(note).map(|r| r.content.clone())
    }
}

impl LinkResolver for Kiln {
    fn resolve(&self, reference: &LinkRef, relative_to: &NoteId) -> Option<NoteId> {
        let notes = self.notes.read();
        resolve_link(&*notes, reference.as_str(), relative_to)
    }
}

impl BacklinkSource for Kiln {
    fn backlink_index(&self) -> BacklinkIndex {
        let notes = self.notes.read();
        let mut index = BacklinkIndex::new();

        for (source, record) in notes.iter() {
            for link in &record.links {
                if let Some(target) = resolve_link(&*notes, link, source) {
                    index.insert(source.clone(), target);
                }
            }
        }

        index
    }
}

#[async_trait]
impl PreviousWriter for Kiln {
    async fn set_previous(&self, note: &NoteId, value: &PreviousValue) -> RiverResult<()> {
        if !self.contains(note) {
            return Err(RiverError::write_failed(note, "note is not part of the kiln"));
        }

        let path = self.path_of(note);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| RiverError::write_failed(note, e))?;
        let updated = rewrite_previous(&content, &value.render());
        tokio::fs::write(&path, &updated)
            .await
            .map_err(|e| RiverError::write_failed(note, e))?;

        debug!(note = %note, previous = %value, "wrote previous");
        self.notes.write().insert(note.clone(), NoteRecord::parse(updated));
        Ok(())
    }
}
