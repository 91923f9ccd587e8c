#![forbid(unsafe_code)]

//! Jot: rich-text notes with per-note undo/redo.
//!
//! A [`Notebook`] holds the open [`Note`]s. Each note owns a styled
//! [`NoteBuffer`] and its own [`jot_history::HistoryEngine`], so undoing in
//! one note never touches another. The notebook can be saved to and
//! restored from a JSON session file; history is not part of the session.
//!
//! # Feature Flags
//!
//! - `persistence` (default): [`SessionStore`] and notebook save/restore.
//! - `config-file` (default): load [`NotepadConfig`] from TOML or JSON.
//!
//! # Example
//!
//! ```
//! use jot::{Notebook, NotepadConfig};
//!
//! let mut notebook = Notebook::new(NotepadConfig::default());
//! let index = notebook.add_note();
//! let note = notebook.note_mut(index).expect("just added");
//!
//! note.insert("hello");
//! note.select_all();
//! note.bold_selection();
//! note.undo();
//! assert!(note.styles().is_empty());
//! note.undo();
//! assert_eq!(note.text(), "");
//! ```

pub mod autosave;
pub mod buffer;
pub mod config;
pub mod error;
pub mod note;
pub mod notebook;
#[cfg(feature = "persistence")]
pub mod session;

// --- Re-exports -------------------------------------------------------------

pub use autosave::AutosaveTimer;
pub use buffer::{ChangeNotification, NoteBuffer, Selection};
pub use config::{NotepadConfig, NotesConfig};
pub use error::{ConfigError, Error, Result};
pub use note::Note;
pub use notebook::Notebook;

#[cfg(feature = "persistence")]
pub use error::SessionError;
#[cfg(feature = "persistence")]
pub use session::{NoteRecord, SESSION_FORMAT_VERSION, SessionSnapshot, SessionStore};

pub use jot_history as history;
pub use jot_style as style;

// --- Prelude ----------------------------------------------------------------

pub mod prelude {
    pub use crate::{Error, Note, NoteBuffer, Notebook, NotepadConfig, Result, Selection};

    #[cfg(feature = "persistence")]
    pub use crate::{SessionSnapshot, SessionStore};

    pub use jot_history::{HistoryConfig, StepKind};
    pub use jot_style::{StyleFlags, StyleSet};

    pub use crate::{history, style};
}
