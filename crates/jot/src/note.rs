#![forbid(unsafe_code)]

//! A single note: styled text with its own undo/redo history.
//!
//! # Dispatch
//!
//! Text changes go through [`NoteBuffer::commit`], which queues a
//! notification. After every operation the note drains that queue: while
//! the history engine has a replay pending, the notification goes straight
//! to the engine (which drops it); otherwise it passes through the
//! [`Coalescer`] and whatever comes out is recorded.
//!
//! Style and bullet commands record a style-only change first and then
//! mutate the markup directly.

use jot_history::{Coalescer, EditingSurface, HistoryConfig, HistoryEngine, StepKind};
use jot_style::{BulletLines, StyleFlags, StyleSet};

use crate::buffer::{NoteBuffer, Selection};

/// One open note.
#[derive(Debug)]
pub struct Note {
    title: String,
    buffer: NoteBuffer,
    history: HistoryEngine,
    coalescer: Coalescer,
    editable: bool,
}

impl Note {
    /// Empty editable note.
    #[must_use]
    pub fn new(title: impl Into<String>, config: &HistoryConfig) -> Self {
        Self::from_parts(title, NoteBuffer::default(), true, config)
    }

    /// Note around an existing buffer. History starts empty.
    #[must_use]
    pub fn from_parts(
        title: impl Into<String>,
        buffer: NoteBuffer,
        editable: bool,
        config: &HistoryConfig,
    ) -> Self {
        Self {
            title: title.into(),
            buffer,
            history: HistoryEngine::new(config.clone()),
            coalescer: Coalescer::new(config.coalesce.clone()),
            editable,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    #[must_use]
    pub fn styles(&self) -> &StyleSet {
        self.buffer.styles()
    }

    #[must_use]
    pub fn bullets(&self) -> &BulletLines {
        self.buffer.bullets()
    }

    #[must_use]
    pub fn buffer(&self) -> &NoteBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn history(&self) -> &HistoryEngine {
        &self.history
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.buffer.selection()
    }

    #[must_use]
    pub fn caret(&self) -> usize {
        self.buffer.caret()
    }

    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Switch between editable and read-only.
    pub fn toggle_editable(&mut self) {
        self.editable = !self.editable;
        tracing::debug!(message = "note.editable", title = %self.title, editable = self.editable);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.editable && (self.history.can_undo() || self.coalescer.has_pending())
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.editable && self.history.can_redo()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select(&mut self, start: usize, length: usize) {
        self.buffer.select(start, length);
    }

    pub fn select_all(&mut self) {
        self.buffer.select_all();
    }

    pub fn set_caret(&mut self, offset: usize) {
        self.buffer.set_caret(offset);
    }

    // ========================================================================
    // Text editing
    // ========================================================================

    /// Type `text` at the caret, replacing any selection.
    pub fn insert(&mut self, text: &str) {
        self.replace_selection(text);
    }

    /// Replace the selection (or insert at the caret).
    pub fn replace_selection(&mut self, text: &str) {
        let Selection { start, length } = self.buffer.selection();
        self.replace_range(start, length, text);
    }

    /// Replace `length` bytes at `position`. Returns `false` if the note is
    /// read-only or the span is invalid.
    pub fn replace_range(&mut self, position: usize, length: usize, text: &str) -> bool {
        if !self.editable {
            return false;
        }
        let committed = self.buffer.commit(position, length, text);
        self.dispatch();
        committed
    }

    /// Delete the selection, or the character before the caret.
    pub fn delete_backward(&mut self) {
        let selection = self.buffer.selection();
        if !selection.is_empty() {
            self.replace_range(selection.start, selection.length, "");
            return;
        }
        let caret = selection.start;
        if let Some(ch) = self.buffer.as_str()[..caret].chars().next_back() {
            let len = ch.len_utf8();
            self.replace_range(caret - len, len, "");
        }
    }

    /// Delete the selection, or the character after the caret.
    pub fn delete_forward(&mut self) {
        let selection = self.buffer.selection();
        if !selection.is_empty() {
            self.replace_range(selection.start, selection.length, "");
            return;
        }
        let caret = selection.start;
        if let Some(ch) = self.buffer.as_str()[caret..].chars().next() {
            self.replace_range(caret, ch.len_utf8(), "");
        }
    }

    /// Remove all text. Undoable like any other edit.
    pub fn clear_text(&mut self) {
        let len = self.buffer.len();
        self.replace_range(0, len, "");
    }

    // ========================================================================
    // Styling
    // ========================================================================

    pub fn bold_selection(&mut self) {
        self.style_selection(StyleFlags::BOLD);
    }

    pub fn italic_selection(&mut self) {
        self.style_selection(StyleFlags::ITALIC);
    }

    pub fn underline_selection(&mut self) {
        self.style_selection(StyleFlags::UNDERLINE);
    }

    pub fn strikeout_selection(&mut self) {
        self.style_selection(StyleFlags::STRIKEOUT);
    }

    /// Remove all styling from the selection.
    pub fn clear_selection_styles(&mut self) {
        let Some(selection) = self.styling_target() else {
            return;
        };
        self.record_markup_change();
        self.buffer
            .styles_mut()
            .clear_span(selection.start, selection.length);
    }

    /// Add `flags` to every byte of the selection, keeping existing flags.
    fn style_selection(&mut self, flags: StyleFlags) {
        let Some(selection) = self.styling_target() else {
            return;
        };
        self.record_markup_change();
        self.buffer
            .styles_mut()
            .apply_flags(selection.start, selection.length, flags);
    }

    /// Bullet the selected lines (or the caret line), or remove the bullets
    /// if every one of them already has one.
    pub fn toggle_bullets(&mut self) {
        if !self.editable {
            return;
        }
        let selection = self.buffer.selection();
        let first = self.buffer.line_at(selection.start);
        let last = self.buffer.line_at(selection.end());
        self.record_markup_change();
        self.buffer.bullets_mut().toggle_lines(first, last);
    }

    fn styling_target(&self) -> Option<Selection> {
        let selection = self.buffer.selection();
        (self.editable && !selection.is_empty()).then_some(selection)
    }

    fn record_markup_change(&mut self) {
        self.flush_pending();
        self.history.record_change(None, self.buffer.markup());
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Undo the latest change. Ignored when read-only.
    pub fn undo(&mut self) -> Option<StepKind> {
        if !self.editable {
            return None;
        }
        self.flush_pending();
        let step = self.history.undo(&mut self.buffer);
        self.dispatch();
        step
    }

    /// Redo the latest undone change. Ignored when read-only.
    pub fn redo(&mut self) -> Option<StepKind> {
        if !self.editable {
            return None;
        }
        self.flush_pending();
        let step = self.history.redo(&mut self.buffer);
        self.dispatch();
        step
    }

    /// Record any typing held back by word coalescing.
    pub fn flush_pending(&mut self) {
        if let Some(ready) = self.coalescer.flush() {
            self.history.record_change(Some(&ready.event), ready.before);
        }
    }

    /// Forget all history, including typing not yet recorded.
    pub fn clear_history(&mut self) {
        let _pending = self.coalescer.flush();
        self.history.clear();
    }

    fn dispatch(&mut self) {
        for notification in self.buffer.take_notifications() {
            if self.history.is_replay_pending() {
                self.history
                    .record_change(Some(&notification.event), notification.before);
                continue;
            }
            for ready in self.coalescer.offer(notification.event, notification.before) {
                self.history.record_change(Some(&ready.event), ready.before);
            }
            // A new edit ends the undo sequence now, not at the next flush.
            if self.history.can_redo() {
                self.flush_pending();
            }
        }
    }
}
