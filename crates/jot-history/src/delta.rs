#![forbid(unsafe_code)]

//! Edit deltas and the markup snapshot they carry.

use std::mem::size_of;

use jot_style::{BulletLines, StyleRange, StyleSet};

use crate::event::TextChangeEvent;

/// Style-relevant state of a surface: style ranges plus bullet lines when
/// the surface tracks them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup {
    pub styles: StyleSet,
    pub bullets: Option<BulletLines>,
}

impl Markup {
    #[must_use]
    pub fn new(styles: StyleSet, bullets: Option<BulletLines>) -> Self {
        Self { styles, bullets }
    }

    /// Markup for a surface without bullets.
    #[must_use]
    pub fn styles_only(styles: StyleSet) -> Self {
        Self {
            styles,
            bullets: None,
        }
    }

    /// Size in bytes for memory accounting.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        size_of::<Self>()
            + self.styles.len() * StyleRange::size_bytes()
            + self.bullets.as_ref().map_or(0, BulletLines::size_bytes)
    }
}

/// One recorded change.
///
/// Immutable once built: it moves between the undo and redo stacks but is
/// never edited. A delta without `removed_text` is a style-only change; its
/// undo and redo only touch markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDelta {
    position: usize,
    removed_length: usize,
    removed_text: Option<String>,
    inserted_text: Option<String>,
    markup_before: Markup,
}

impl EditDelta {
    /// Delta for a text change.
    #[must_use]
    pub fn from_event(event: &TextChangeEvent, markup_before: Markup) -> Self {
        debug_assert_eq!(
            event.removed_text.len(),
            event.removed_length,
            "removed_length must match removed_text"
        );
        Self {
            position: event.position,
            removed_length: event.removed_text.len(),
            removed_text: Some(event.removed_text.clone()),
            inserted_text: Some(event.inserted_text.clone()),
            markup_before,
        }
    }

    /// Delta for a change that only touched markup.
    #[must_use]
    pub fn style_only(markup_before: Markup) -> Self {
        Self {
            position: 0,
            removed_length: 0,
            removed_text: None,
            inserted_text: None,
            markup_before,
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn removed_length(&self) -> usize {
        self.removed_length
    }

    #[must_use]
    pub fn removed_text(&self) -> Option<&str> {
        self.removed_text.as_deref()
    }

    #[must_use]
    pub fn inserted_text(&self) -> Option<&str> {
        self.inserted_text.as_deref()
    }

    /// Length of the inserted text (0 for style-only deltas).
    #[must_use]
    pub fn inserted_length(&self) -> usize {
        self.inserted_text.as_ref().map_or(0, String::len)
    }

    /// Markup current immediately before the change.
    #[must_use]
    pub fn markup_before(&self) -> &Markup {
        &self.markup_before
    }

    #[must_use]
    pub fn is_style_only(&self) -> bool {
        self.removed_text.is_none()
    }

    /// Size in bytes for memory accounting.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        size_of::<Self>()
            + self.removed_text.as_ref().map_or(0, String::len)
            + self.inserted_length()
            + self.markup_before.size_bytes()
            - size_of::<Markup>()
    }
}
