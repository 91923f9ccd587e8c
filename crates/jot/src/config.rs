#![forbid(unsafe_code)]

//! Notepad configuration.
//!
//! Groups the history limits of every note and the notebook settings into a
//! single [`NotepadConfig`] that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # jot.toml
//! [history]
//! max_depth = 250
//!
//! [history.coalesce]
//! mode = "word"
//!
//! [notes]
//! name_prefix = "Memo"
//! autosave_interval_secs = 10
//! ```
//!
//! ```rust,ignore
//! let config = NotepadConfig::from_toml_file("jot.toml")?;
//! ```
//!
//! Every field has a default, so partial files are fine.

#[cfg(feature = "config-file")]
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use jot_history::HistoryConfig;

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct NotepadConfig {
    /// Per-note history limits and coalescing.
    pub history: HistoryConfig,
    /// Notebook settings.
    pub notes: NotesConfig,
}

/// Notebook settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct NotesConfig {
    /// Prefix for generated note titles (`"<prefix> <n>"`).
    pub name_prefix: String,
    /// Seconds between automatic session saves (0 disables autosave).
    pub autosave_interval_secs: u64,
    /// Where the session is saved.
    pub session_file: PathBuf,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            name_prefix: "Note".to_string(),
            autosave_interval_secs: 30,
            session_file: PathBuf::from("jot-session.json"),
        }
    }
}

impl NotesConfig {
    /// Autosave interval, or `None` when autosave is off.
    #[must_use]
    pub fn autosave_interval(&self) -> Option<Duration> {
        (self.autosave_interval_secs > 0).then(|| Duration::from_secs(self.autosave_interval_secs))
    }
}

impl NotepadConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.history.validate();
        if self.notes.name_prefix.trim().is_empty() {
            errors.push("notes.name_prefix must not be empty".to_string());
        }
        if self.notes.session_file.as_os_str().is_empty() {
            errors.push("notes.session_file must not be empty".to_string());
        }
        errors
    }

    /// Validate, turning any problems into [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use jot_history::CoalesceMode;

    #[test]
    fn defaults_are_valid() {
        let config = NotepadConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.notes.name_prefix, "Note");
        assert_eq!(config.history.max_depth, 100);
        assert_eq!(config.notes.autosave_interval(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_interval_disables_autosave() {
        let notes = NotesConfig {
            autosave_interval_secs: 0,
            ..NotesConfig::default()
        };
        assert_eq!(notes.autosave_interval(), None);
    }

    #[test]
    fn validate_catches_empty_prefix_and_zero_depth() {
        let mut config = NotepadConfig::default();
        config.notes.name_prefix = "  ".into();
        config.history.max_depth = 0;
        let errors = config.clone().validate();
        assert_eq!(errors.len(), 2);
        assert!(matches!(config.validated(), Err(ConfigError::Validation(e)) if e.len() == 2));
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn toml_partial_overrides() {
        let config = NotepadConfig::from_toml_str(
            "[history]\nmax_depth = 250\n[history.coalesce]\nmode = \"word\"\n[notes]\nname_prefix = \"Memo\"\n",
        )
        .expect("valid toml");
        assert_eq!(config.history.max_depth, 250);
        assert_eq!(config.history.coalesce.mode, CoalesceMode::Word);
        assert_eq!(config.history.coalesce.max_run_bytes, 1024);
        assert_eq!(config.notes.name_prefix, "Memo");
        assert_eq!(config.notes.autosave_interval_secs, 30);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn json_round_trip() {
        let mut config = NotepadConfig::default();
        config.notes.session_file = PathBuf::from("/tmp/notes.json");
        let json = serde_json::to_string(&config).expect("serialize");
        assert_eq!(NotepadConfig::from_json_str(&json).expect("parse"), config);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn bad_toml_is_reported() {
        let err = NotepadConfig::from_toml_str("[history\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn file_loaders_read_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("jot.toml");
        std::fs::write(&path, "[notes]\nautosave_interval_secs = 5\n").expect("write");
        let config = NotepadConfig::from_toml_file(&path).expect("load");
        assert_eq!(config.notes.autosave_interval_secs, 5);

        let missing = NotepadConfig::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
