#![forbid(unsafe_code)]

//! In-memory styled text buffer.
//!
//! [`NoteBuffer`] behaves like the text widget of a notes window: every
//! committed text change shifts styles and bullets, moves the caret to the
//! end of the inserted text, and queues a [`ChangeNotification`] carrying
//! the event and the markup current *before* the change. The owner drains
//! the queue and feeds it to its history engine.

use std::borrow::Cow;

use jot_history::{EditingSurface, Markup, TextChangeEvent};
use jot_history::surface::span_fits;
use jot_style::{BulletLines, StyleSet};

/// A change reported by the buffer, captured before it was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    pub event: TextChangeEvent,
    pub before: Markup,
}

/// Selected span (`length == 0` means just a caret).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub length: usize,
}

impl Selection {
    #[must_use]
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            length: 0,
        }
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Text, styles, bullets and selection of one note.
#[derive(Debug, Clone, Default)]
pub struct NoteBuffer {
    text: String,
    styles: StyleSet,
    bullets: BulletLines,
    selection: Selection,
    notifications: Vec<ChangeNotification>,
}

impl NoteBuffer {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_markup(text, StyleSet::new(), BulletLines::new())
    }

    /// Buffer with existing markup. Styles and bullets beyond the text are
    /// dropped; the caret starts at the end.
    #[must_use]
    pub fn with_markup(text: impl Into<String>, mut styles: StyleSet, mut bullets: BulletLines) -> Self {
        let text = text.into();
        styles.truncate_to(text.len());
        bullets.truncate_to(line_count(&text));
        let caret = text.len();
        Self {
            text,
            styles,
            bullets,
            selection: Selection::caret(caret),
            notifications: Vec::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn styles(&self) -> &StyleSet {
        &self.styles
    }

    #[must_use]
    pub fn bullets(&self) -> &BulletLines {
        &self.bullets
    }

    /// Direct markup access for style commands. Text is unaffected, so no
    /// notification is queued.
    pub fn styles_mut(&mut self) -> &mut StyleSet {
        &mut self.styles
    }

    pub fn bullets_mut(&mut self) -> &mut BulletLines {
        &mut self.bullets
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn caret(&self) -> usize {
        self.selection.end()
    }

    #[must_use]
    pub fn selected_text(&self) -> &str {
        &self.text[self.selection.start..self.selection.end()]
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        line_count(&self.text)
    }

    /// 0-based line containing byte `offset`.
    #[must_use]
    pub fn line_at(&self, offset: usize) -> usize {
        let offset = floor_char_boundary(&self.text, offset);
        newlines(&self.text[..offset])
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Move the caret, clamped to the text and snapped to a char boundary.
    pub fn set_caret(&mut self, offset: usize) {
        self.selection = Selection::caret(floor_char_boundary(&self.text, offset));
    }

    /// Select a span, clamped to the text and snapped to char boundaries.
    pub fn select(&mut self, start: usize, length: usize) {
        let start = floor_char_boundary(&self.text, start);
        let end = floor_char_boundary(&self.text, start.saturating_add(length));
        self.selection = Selection {
            start,
            length: end - start,
        };
    }

    pub fn select_all(&mut self) {
        self.selection = Selection {
            start: 0,
            length: self.text.len(),
        };
    }

    // ========================================================================
    // Text changes
    // ========================================================================

    /// Replace `length` bytes at `position`, queueing a notification.
    ///
    /// Returns `false` and leaves the buffer untouched if the span is not
    /// valid for the current text.
    pub fn commit(&mut self, position: usize, length: usize, replacement: &str) -> bool {
        if !span_fits(&self.text, position, length) {
            tracing::warn!(
                message = "buffer.commit.invalid_span",
                position,
                length,
                text_len = self.text.len()
            );
            return false;
        }

        let removed = &self.text[position..position + length];
        let event = TextChangeEvent::new(position, removed, replacement);
        let removed_lines = newlines(removed);
        let before = self.markup();
        self.notifications.push(ChangeNotification { event, before });

        let line = self.line_at(position);
        self.text
            .replace_range(position..position + length, replacement);
        self.styles
            .adjust_for_edit(position, length, replacement.len());
        self.bullets
            .adjust_for_line_edit(line, removed_lines, newlines(replacement));
        self.selection = Selection::caret(position + replacement.len());
        true
    }

    /// Drain queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<ChangeNotification> {
        std::mem::take(&mut self.notifications)
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }
}

impl EditingSurface for NoteBuffer {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn set_text(&mut self, text: String) {
        let len = self.text.len();
        self.commit(0, len, &text);
    }

    fn replace_range(&mut self, position: usize, length: usize, replacement: &str) {
        self.commit(position, length, replacement);
    }

    fn style_set(&self) -> StyleSet {
        self.styles.clone()
    }

    fn set_style_set(&mut self, mut styles: StyleSet) {
        styles.truncate_to(self.text.len());
        self.styles = styles;
    }

    fn bullet_lines(&self) -> Option<BulletLines> {
        Some(self.bullets.clone())
    }

    fn set_bullet_lines(&mut self, mut bullets: BulletLines) {
        bullets.truncate_to(self.line_count());
        self.bullets = bullets;
    }
}

fn newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

fn line_count(text: &str) -> usize {
    newlines(text) + 1
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot_style::{StyleFlags, StyleRange};

    #[test]
    fn commit_queues_pre_change_markup() {
        let mut buffer = NoteBuffer::with_markup(
            "hello",
            StyleSet::from_ranges([StyleRange::new(0, 5, StyleFlags::BOLD)]),
            BulletLines::new(),
        );
        assert!(buffer.commit(0, 5, "bye"));
        assert!(buffer.styles().is_empty());

        let notes = buffer.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].event, TextChangeEvent::new(0, "hello", "bye"));
        assert_eq!(notes[0].before.styles.len(), 1);
        assert_eq!(notes[0].before.bullets, Some(BulletLines::new()));
        assert!(!buffer.has_notifications());
    }

    #[test]
    fn commit_moves_caret_and_clears_selection() {
        let mut buffer = NoteBuffer::new("abcdef");
        buffer.select(1, 3);
        assert_eq!(buffer.selected_text(), "bcd");
        buffer.commit(1, 3, "XY");
        assert_eq!(buffer.as_str(), "aXYef");
        assert_eq!(buffer.selection(), Selection::caret(3));
    }

    #[test]
    fn invalid_span_is_rejected() {
        let mut buffer = NoteBuffer::new("é");
        assert!(!buffer.commit(1, 0, "x"));
        assert!(!buffer.commit(0, 5, "x"));
        assert_eq!(buffer.as_str(), "é");
        assert!(!buffer.has_notifications());
    }

    #[test]
    fn selection_snaps_to_char_boundaries() {
        let mut buffer = NoteBuffer::new("aéb");
        buffer.select(2, 1);
        assert_eq!(buffer.selection(), Selection { start: 1, length: 0 });
        buffer.set_caret(100);
        assert_eq!(buffer.caret(), 4);
        buffer.select_all();
        assert_eq!(buffer.selected_text(), "aéb");
    }

    #[test]
    fn newlines_shift_bullets() {
        let mut buffer = NoteBuffer::with_markup("a\nb\nc", StyleSet::new(), [0, 2].into_iter().collect());
        // Split line 0.
        buffer.commit(1, 0, "\nx");
        assert_eq!(buffer.bullets().iter().collect::<Vec<_>>(), vec![0, 3]);
        // Join lines 0 and 1 back.
        buffer.commit(1, 2, "");
        assert_eq!(buffer.bullets().iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(buffer.as_str(), "a\nb\nc");
    }

    #[test]
    fn with_markup_drops_out_of_range_markup() {
        let buffer = NoteBuffer::with_markup(
            "ab",
            StyleSet::from_ranges([StyleRange::new(1, 10, StyleFlags::ITALIC)]),
            [0, 5].into_iter().collect(),
        );
        assert_eq!(buffer.styles().ranges(), &[StyleRange::new(1, 1, StyleFlags::ITALIC)]);
        assert_eq!(buffer.bullets().iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(buffer.caret(), 2);
    }

    #[test]
    fn set_text_goes_through_commit() {
        let mut buffer = NoteBuffer::new("old");
        buffer.set_text("new text".into());
        assert_eq!(buffer.as_str(), "new text");
        assert_eq!(buffer.take_notifications()[0].event, TextChangeEvent::new(0, "old", "new text"));
    }

    #[test]
    fn line_at_counts_newlines_before_offset() {
        let buffer = NoteBuffer::new("a\nbc\n");
        assert_eq!(buffer.line_at(0), 0);
        assert_eq!(buffer.line_at(2), 1);
        assert_eq!(buffer.line_at(5), 2);
        assert_eq!(buffer.line_count(), 3);
    }
}
