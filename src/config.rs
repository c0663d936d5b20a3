//! Configuration file support for listboard.
//!
//! The configuration describes the sections of a board, their cards, and where
//! expansion state is persisted. It is stored as pretty-printed JSON.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Board name shown in the demo output
    #[serde(default = "default_board_name")]
    pub board_name: String,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// JSON file holding persisted expansion state (in-memory when absent)
    #[serde(default)]
    pub state_file: Option<PathBuf>,

    /// Sections in display order
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

fn default_board_name() -> String {
    "Board".to_string()
}

/// One section of the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Stable identity for persisted state
    pub id: String,
    /// Header title
    pub title: String,
    /// Footer text
    #[serde(default)]
    pub footer: Option<String>,
    /// Footer text while collapsed
    #[serde(default)]
    pub collapsed_footer: Option<String>,
    /// Expansion used when nothing is persisted for this id
    #[serde(default)]
    pub initially_expanded: bool,
    /// Cards in display order
    #[serde(default)]
    pub items: Vec<Card>,
}

impl SectionSpec {
    /// Create a section without footers or cards.
    pub fn new(id: &str, title: &str, initially_expanded: bool) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            footer: None,
            collapsed_footer: None,
            initially_expanded,
            items: Vec::new(),
        }
    }
}

fn default_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec {
            items: vec![
                Card::new(1, "Write release notes"),
                Card::new(2, "Triage new issues"),
                Card::new(3, "Update dependencies"),
            ],
            footer: Some("Add a card".to_string()),
            ..SectionSpec::new("todo", "To do", true)
        },
        SectionSpec {
            items: vec![Card::new(4, "Review pull requests")],
            ..SectionSpec::new("doing", "In progress", true)
        },
        SectionSpec {
            collapsed_footer: Some("Drag cards here to finish them".to_string()),
            ..SectionSpec::new("done", "Done", false)
        },
    ]
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            board_name: default_board_name(),
            log_level: LogLevel::default(),
            state_file: None,
            sections: default_sections(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigFileError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigFileError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        let mut seen = HashSet::new();
        for section in &config.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(ConfigFileError::DuplicateSection(section.id.clone()));
            }
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "listboard-config.json"
    }

    /// Get the default config file path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("listboard").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("listboard")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from `path`.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigFileError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to `path`, creating parent directories if needed.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Look up a section by id.
    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.id == id)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Two sections share an id
    #[error("Duplicate section id '{0}'")]
    DuplicateSection(String),

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
