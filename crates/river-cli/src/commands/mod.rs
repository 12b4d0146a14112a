pub mod config;
pub mod edit;
pub mod navigate;

use anyhow::{Context, Result};
use river_core::{ChainEditor, ChainWalker, Disambiguator, NoteId};
use river_kiln::Kiln;

use crate::cli::OutputFormat;
use crate::config::CliConfig;
use crate::output::ConsoleSink;
use crate::picker::picker_for;

/// Everything a river command needs: the loaded kiln plus the user-facing
/// collaborators wired to it.
pub struct Session {
    kiln: Kiln,
    sink: ConsoleSink,
    picker: Box<dyn Disambiguator>,
    format: OutputFormat,
}

impl Session {
    pub async fn open(config: &CliConfig, format: OutputFormat) -> Result<Self> {
        let kiln = Kiln::open(&config.kiln.path)
            .await
            .with_context(|| format!("Failed to open kiln at {}", config.kiln.path.display()))?;

        Ok(Self::with_picker(kiln, picker_for(config.picker.mode), format))
    }

    pub fn with_picker(kiln: Kiln, picker: Box<dyn Disambiguator>, format: OutputFormat) -> Self {
        Self {
            kiln,
            sink: ConsoleSink::new(format),
            picker,
            format,
        }
    }

    pub fn kiln(&self) -> &Kiln {
        &self.kiln
    }

    pub fn picker(&self) -> &dyn Disambiguator {
        self.picker.as_ref()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Resolve a note argument against the kiln
    pub fn note(&self, query: &str) -> Result<NoteId> {
        Ok(self.kiln.find_note(query)?)
    }

    pub fn walker(&self) -> ChainWalker<'_> {
        ChainWalker::new(&self.kiln, &self.kiln, &self.sink)
    }

    pub fn editor(&self) -> ChainEditor<'_> {
        ChainEditor::new(&self.kiln, &self.kiln, &self.kiln, &self.sink)
    }
}
