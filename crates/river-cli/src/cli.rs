use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors (default)
    Warn,
    /// Informational messages
    Info,
    /// Debug messages (default for verbose)
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// How branch points (several notes following the same one) are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickMode {
    /// Ask with an interactive fuzzy picker
    #[default]
    Prompt,
    /// Take the first candidate in path order
    First,
    /// Treat every branch point as cancelled
    Cancel,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Note paths and short messages
    #[default]
    Plain,
    /// One JSON object per result
    Json,
}

#[derive(Parser)]
#[command(name = "river")]
#[command(about = "river - Navigate and edit chains of notes linked by `previous`")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses config file value or defaults to 'warn'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/river/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Kiln directory (overrides config file and RIVER_KILN_PATH)
    #[arg(short = 'k', long, global = true)]
    pub kiln: Option<PathBuf>,

    /// Branch-point resolution (overrides config file and RIVER_PICKER)
    #[arg(short = 'p', long, global = true, value_enum)]
    pub pick: Option<PickMode>,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the note this one follows
    Previous {
        /// Note path or name
        note: String,
    },

    /// Print the note that follows this one
    Next {
        /// Note path or name
        note: String,
    },

    /// Print the head of the river this note belongs to
    First {
        /// Note path or name
        note: String,
    },

    /// Print the tail of the river this note belongs to
    Last {
        /// Note path or name
        note: String,
    },

    /// Make a note the head of its own river (followers are not repointed)
    Detach {
        /// Note path or name
        note: String,
    },

    /// Splice a note in directly after another
    InsertAfter {
        /// Note to move
        note: String,

        /// Note it should follow
        target: String,
    },

    /// Make a note the new head of a river
    InsertAtHead {
        /// Note to move
        note: String,

        /// Any note of the river
        chain: String,
    },

    /// Append a note to the end of a river
    InsertToLast {
        /// Note to move
        note: String,

        /// Any note of the river (picked interactively when omitted)
        chain: Option<String>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize a new config file
    Init {
        /// Path for the config file (defaults to ~/.config/river/config.toml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite existing config file
        #[arg(short = 'F', long)]
        force: bool,
    },

    /// Show the current effective configuration (TOML, or JSON with --format json)
    Show,
}
