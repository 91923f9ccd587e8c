#![forbid(unsafe_code)]

//! The contract between the history engine and an editing surface.

use std::borrow::Cow;

use jot_style::{BulletLines, StyleSet};

use crate::delta::Markup;

/// A styled text buffer the engine can read and replay changes onto.
///
/// Implementors must report every committed text change (including those
/// made through [`replace_range`](Self::replace_range) and
/// [`set_text`](Self::set_text) by the engine) to whoever feeds
/// [`HistoryEngine::record_change`](crate::HistoryEngine::record_change).
pub trait EditingSurface {
    /// Current text.
    fn text(&self) -> Cow<'_, str>;

    /// Replace the whole text.
    fn set_text(&mut self, text: String);

    /// Replace `length` bytes at `position` with `replacement`.
    ///
    /// The span must lie on char boundaries within the text. The default
    /// splices through [`text`](Self::text) and [`set_text`](Self::set_text)
    /// and leaves the surface untouched if the span is invalid.
    fn replace_range(&mut self, position: usize, length: usize, replacement: &str) {
        let spliced = splice(&self.text(), position, length, replacement);
        if let Some(text) = spliced {
            self.set_text(text);
        }
    }

    /// Current style ranges.
    fn style_set(&self) -> StyleSet;

    /// Replace all style ranges.
    fn set_style_set(&mut self, styles: StyleSet);

    /// Current bullet lines, or `None` if the surface has no bullets.
    fn bullet_lines(&self) -> Option<BulletLines> {
        None
    }

    /// Replace all bullet lines.
    fn set_bullet_lines(&mut self, _bullets: BulletLines) {}

    /// Snapshot of styles and bullets.
    fn markup(&self) -> Markup {
        Markup::new(self.style_set(), self.bullet_lines())
    }

    /// Restore a snapshot. Bullets are only written when both the snapshot
    /// and the surface carry them.
    fn restore_markup(&mut self, markup: &Markup) {
        self.set_style_set(markup.styles.clone());
        if let Some(bullets) = &markup.bullets
            && self.bullet_lines().is_some()
        {
            self.set_bullet_lines(bullets.clone());
        }
    }
}

/// Whether `[position, position + length)` is a valid span of `text`.
#[must_use]
pub fn span_fits(text: &str, position: usize, length: usize) -> bool {
    position
        .checked_add(length)
        .is_some_and(|end| end <= text.len() && text.is_char_boundary(position) && text.is_char_boundary(end))
}

/// `text` with `length` bytes at `position` replaced, or `None` if the span
/// does not fit.
#[must_use]
pub fn splice(text: &str, position: usize, length: usize, replacement: &str) -> Option<String> {
    if !span_fits(text, position, length) {
        return None;
    }
    let mut out = String::with_capacity(text.len() - length + replacement.len());
    out.push_str(&text[..position]);
    out.push_str(replacement);
    out.push_str(&text[position + length..]);
    Some(out)
}
