#![forbid(unsafe_code)]

//! Session persistence for open notes.
//!
//! Provides [`SessionStore`] for saving the notebook to a JSON file and
//! loading it back in the next session. History is never persisted.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "notes": [
//!     {
//!       "title": "Note 1",
//!       "text": "hello\nworld",
//!       "styles": "0,5,1,0,0,",
//!       "bullets": "1,1,",
//!       "editable": true
//!     }
//!   ]
//! }
//! ```
//!
//! `styles` and `bullets` use the CSV codecs from [`jot_style::codec`].
//!
//! # Atomic Writes
//!
//! Writes use a temp-file-then-rename pattern to prevent corruption on crash.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use jot_history::HistoryConfig;
use jot_style::{deserialize_bullets, deserialize_styles, serialize_bullets, serialize_styles};

use crate::buffer::NoteBuffer;
use crate::error::SessionError;
use crate::note::Note;

/// Current file format version.
pub const SESSION_FORMAT_VERSION: u32 = 1;

/// Persisted state of one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub title: String,
    pub text: String,
    /// Style CSV.
    #[serde(default)]
    pub styles: String,
    /// Bullet CSV.
    #[serde(default)]
    pub bullets: String,
    #[serde(default = "default_editable")]
    pub editable: bool,
}

fn default_editable() -> bool {
    true
}

/// Persisted state of the notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub notes: Vec<NoteRecord>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn new(notes: Vec<NoteRecord>) -> Self {
        Self {
            version: SESSION_FORMAT_VERSION,
            notes,
        }
    }
}

impl Note {
    /// Persisted form of this note.
    #[must_use]
    pub fn to_record(&self) -> NoteRecord {
        NoteRecord {
            title: self.title().to_string(),
            text: self.text().to_string(),
            styles: serialize_styles(self.styles()),
            bullets: serialize_bullets(self.bullets()),
            editable: self.is_editable(),
        }
    }

    /// Rebuild a note from its persisted form, with empty history.
    ///
    /// Malformed style or bullet data is skipped with a warning.
    #[must_use]
    pub fn from_record(record: &NoteRecord, config: &HistoryConfig) -> Self {
        let buffer = NoteBuffer::with_markup(
            record.text.as_str(),
            deserialize_styles(&record.styles),
            deserialize_bullets(&record.bullets),
        );
        Self::from_parts(record.title.as_str(), buffer, record.editable, config)
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save a snapshot.
    ///
    /// Uses atomic write (write-to-temp-then-rename). The parent directory
    /// must already exist.
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(snapshot)?;

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;

        tracing::debug!(
            message = "session.saved",
            path = %self.path.display(),
            notes = snapshot.notes.len()
        );
        Ok(())
    }

    /// Load the saved snapshot.
    ///
    /// - **Missing file** returns `Ok(None)`.
    /// - **Corrupted file** returns [`SessionError::Json`].
    /// - **Version mismatch** returns [`SessionError::UnsupportedVersion`].
    pub fn load(&self) -> Result<Option<SessionSnapshot>, SessionError> {
        if !self.path.exists() {
            tracing::debug!(message = "session.missing", path = %self.path.display());
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let snapshot: SessionSnapshot = serde_json::from_str(&contents)?;
        if snapshot.version != SESSION_FORMAT_VERSION {
            return Err(SessionError::UnsupportedVersion(snapshot.version));
        }

        tracing::debug!(
            message = "session.loaded",
            path = %self.path.display(),
            notes = snapshot.notes.len()
        );
        Ok(Some(snapshot))
    }
}

// =============================================================================
// Tests
// =============================================================================
