#![forbid(unsafe_code)]

//! The ordered set of open notes.

#[cfg(feature = "persistence")]
use web_time::Instant;

use crate::config::NotepadConfig;
use crate::note::Note;

#[cfg(feature = "persistence")]
use crate::autosave::AutosaveTimer;
#[cfg(feature = "persistence")]
use crate::error::SessionError;
#[cfg(feature = "persistence")]
use crate::session::{SessionSnapshot, SessionStore};

/// Open notes in display order, with one selected.
#[derive(Debug)]
pub struct Notebook {
    notes: Vec<Note>,
    selected: Option<usize>,
    config: NotepadConfig,
}

impl Notebook {
    /// Empty notebook.
    #[must_use]
    pub fn new(config: NotepadConfig) -> Self {
        Self {
            notes: Vec::new(),
            selected: None,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &NotepadConfig {
        &self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> + '_ {
        self.notes.iter()
    }

    #[must_use]
    pub fn note(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn note_mut(&mut self, index: usize) -> Option<&mut Note> {
        self.notes.get_mut(index)
    }

    // ========================================================================
    // Opening and closing
    // ========================================================================

    /// Title for the next new note: `"<prefix> <count + 1>"`.
    #[must_use]
    pub fn next_title(&self) -> String {
        format!("{} {}", self.config.notes.name_prefix, self.notes.len() + 1)
    }

    /// Open an empty note with a generated title and select it.
    pub fn add_note(&mut self) -> usize {
        let title = self.next_title();
        self.push(Note::new(title, &self.config.history))
    }

    /// Append an existing note and select it.
    pub fn push(&mut self, note: Note) -> usize {
        tracing::debug!(message = "notebook.add", title = note.title());
        self.notes.push(note);
        let index = self.notes.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Close a note. Its history goes with it.
    pub fn close_note(&mut self, index: usize) -> Option<Note> {
        if index >= self.notes.len() {
            return None;
        }
        let note = self.notes.remove(index);
        self.selected = match self.selected {
            _ if self.notes.is_empty() => None,
            Some(selected) if selected > index => Some(selected - 1),
            Some(selected) => Some(selected.min(self.notes.len() - 1)),
            None => None,
        };
        tracing::debug!(message = "notebook.close", title = note.title(), remaining = self.notes.len());
        Some(note)
    }

    // ========================================================================
    // Selection and ordering
    // ========================================================================

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select a note. Returns `false` if `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.notes.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.and_then(|index| self.notes.get(index))
    }

    pub fn selected_note_mut(&mut self) -> Option<&mut Note> {
        self.selected.and_then(|index| self.notes.get_mut(index))
    }

    /// Swap the selected note with its left neighbour.
    pub fn move_selected_left(&mut self) -> bool {
        match self.selected {
            Some(index) if index > 0 => {
                self.notes.swap(index, index - 1);
                self.selected = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Swap the selected note with its right neighbour.
    pub fn move_selected_right(&mut self) -> bool {
        match self.selected {
            Some(index) if index + 1 < self.notes.len() => {
                self.notes.swap(index, index + 1);
                self.selected = Some(index + 1);
                true
            }
            _ => false,
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Persisted form of every open note, in order.
    #[cfg(feature = "persistence")]
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.notes.iter().map(Note::to_record).collect())
    }

    /// Rebuild a notebook from a saved session.
    ///
    /// With no session (or an empty one) the notebook starts with one empty
    /// note. The first note is selected.
    #[cfg(feature = "persistence")]
    #[must_use]
    pub fn restore(config: NotepadConfig, snapshot: Option<&SessionSnapshot>) -> Self {
        let mut notebook = Self::new(config);
        for record in snapshot.map(|s| s.notes.as_slice()).unwrap_or_default() {
            let note = Note::from_record(record, &notebook.config.history);
            notebook.notes.push(note);
        }
        if notebook.notes.is_empty() {
            notebook.add_note();
        }
        notebook.selected = Some(0);
        tracing::debug!(message = "notebook.restored", notes = notebook.notes.len());
        notebook
    }

    /// Save the session now.
    #[cfg(feature = "persistence")]
    pub fn save(&self, store: &SessionStore) -> Result<(), SessionError> {
        store.save(&self.snapshot())
    }

    /// Save the session if the timer says it is due.
    ///
    /// Returns whether a save happened.
    #[cfg(feature = "persistence")]
    pub fn autosave(
        &self,
        store: &SessionStore,
        timer: &mut AutosaveTimer,
        now: Instant,
    ) -> Result<bool, SessionError> {
        if !timer.is_due(now) {
            return Ok(false);
        }
        self.save(store)?;
        timer.mark_saved(now);
        Ok(true)
    }
}
