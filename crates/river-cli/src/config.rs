use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{LogLevel, PickMode};

/// Environment variable overriding `[kiln] path`
pub const KILN_PATH_ENV: &str = "RIVER_KILN_PATH";
/// Environment variable overriding `[picker] mode`
pub const PICKER_ENV: &str = "RIVER_PICKER";
/// When set, the user's config file is not loaded
pub const TEST_MODE_ENV: &str = "RIVER_TEST_MODE";

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub kiln: KilnConfig,
    pub picker: PickerConfig,
    pub logging: LoggingConfig,
}

/// Kiln configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KilnConfig {
    /// Path to the kiln directory
    pub path: PathBuf,
}

impl Default for KilnConfig {
    fn default() -> Self {
        Self {
            path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub mode: PickMode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
}

impl CliConfig {
    /// Load configuration with precedence: defaults < file < env < args
    pub fn load(
        config_file: Option<PathBuf>,
        kiln_path: Option<PathBuf>,
        pick: Option<PickMode>,
    ) -> Result<Self> {
        let mut config = Self::from_file_or_default(config_file)?;
        config.apply_env(|key| std::env::var(key).ok())?;

        // CLI args (highest priority)
        if let Some(path) = kiln_path {
            config.kiln.path = path;
        }
        if let Some(mode) = pick {
            config.picker.mode = mode;
        }

        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = lookup(KILN_PATH_ENV) {
            self.kiln.path = PathBuf::from(path);
        }
        if let Some(mode) = lookup(PICKER_ENV) {
            self.picker.mode = PickMode::from_str(&mode, true)
                .map_err(|e| anyhow!("Invalid {}: {}", PICKER_ENV, e))?;
        }
        Ok(())
    }

    /// Get default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("river");
        Ok(config_dir.join("config.toml"))
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load config from file or return default
    fn from_file_or_default(config_file: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = config_file {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            return Self::from_file(&path);
        }

        // Skip the user's config file under test
        if std::env::var(TEST_MODE_ENV).is_ok() {
            return Ok(Self::default());
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Create a new config file with example values
    pub fn create_example(path: &Path) -> Result<()> {
        let example = r#"# river configuration
# Location: ~/.config/river/config.toml

[kiln]
# Folder of markdown notes
# Default: current directory
path = "/home/user/Documents/my-kiln"

[picker]
# How branch points are resolved: "prompt", "first" or "cancel"
# Default: prompt
mode = "prompt"

[logging]
# off, error, warn, info, debug, trace
# Default: warn
level = "warn"
"#;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        std::fs::write(path, example).context("Failed to write config file")?;

        Ok(())
    }

    /// Display the current configuration as TOML
    pub fn display_as_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config as TOML")
    }

    /// Display the current configuration as JSON
    pub fn display_as_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config as JSON")
    }
}
