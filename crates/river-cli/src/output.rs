//! Terminal output: results on stdout, notices and messages on stderr

use anyhow::{bail, Result};
use colored::Colorize;
use river_core::{EditOutcome, NoteId, Notice, NotificationSink};
use serde::Serialize;
use tracing::debug;

use crate::cli::OutputFormat;

/// Prints notices to stderr as they are raised
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    format: OutputFormat,
}

impl ConsoleSink {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl NotificationSink for ConsoleSink {
    fn notify(&self, notice: Notice) {
        debug!(note = %notice.note(), "{}", notice);
        match self.format {
            OutputFormat::Json => match serde_json::to_string(&notice) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", notice),
            },
            OutputFormat::Plain => eprintln!("{} {}", "Warning:".yellow().bold(), notice),
        }
    }
}

/// Where a navigation command ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Destination {
    Found { note: NoteId },
    /// Nothing beyond the start note in that direction
    AtEnd,
    Cancelled,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigationReport {
    pub command: &'static str,
    pub from: NoteId,
    #[serde(flatten)]
    pub destination: Destination,
}

impl NavigationReport {
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        if format == OutputFormat::Json {
            println!("{}", serde_json::to_string(self)?);
            return Ok(());
        }

        match &self.destination {
            Destination::Found { note } => println!("{}", note),
            Destination::AtEnd => {
                let message = match self.command {
                    "previous" => format!("{} has no previous note", self.from),
                    _ => format!("{} has no next note", self.from),
                };
                eprintln!("{}", message.dimmed());
            }
            Destination::Cancelled => eprintln!("{}", "Cancelled.".dimmed()),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditStatus {
    Completed,
    Incomplete,
    Cancelled,
}

/// Result of a chain edit as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct EditReport {
    pub command: &'static str,
    pub note: NoteId,
    pub status: EditStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<NoteId>,
    #[serde(skip)]
    pub summary: String,
}

impl EditReport {
    pub fn new(
        command: &'static str,
        note: NoteId,
        outcome: EditOutcome,
        summary: impl Into<String>,
    ) -> Self {
        let (status, failed) = match outcome {
            EditOutcome::Completed => (EditStatus::Completed, Vec::new()),
            EditOutcome::Incomplete { failed } => (EditStatus::Incomplete, failed),
            EditOutcome::Cancelled => (EditStatus::Cancelled, Vec::new()),
        };
        Self {
            command,
            note,
            status,
            failed,
            summary: summary.into(),
        }
    }

    /// Print the report; an incomplete edit becomes an error so the exit
    /// status is non-zero.
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(self)?),
            OutputFormat::Plain => match self.status {
                EditStatus::Completed => println!("{} {}", "Done:".green().bold(), self.summary),
                EditStatus::Cancelled => eprintln!("{}", "Cancelled.".dimmed()),
                EditStatus::Incomplete => {}
            },
        }

        if self.status == EditStatus::Incomplete {
            let failed: Vec<String> = self.failed.iter().map(ToString::to_string).collect();
            bail!(
                "{} left incomplete; could not update: {}",
                self.command,
                failed.join(", ")
            );
        }
        Ok(())
    }
}
