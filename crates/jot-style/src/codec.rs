#![forbid(unsafe_code)]

//! Session CSV codecs for styles and bullets.
//!
//! Both formats are flat lists of unsigned integers, each followed by
//! [`SEPARATOR`]:
//!
//! ```text
//! styles:  start,length,fontStyle,underline,strikeout,   (per range)
//! bullets: firstLine,runLength,                          (per run)
//! ```
//!
//! `fontStyle` is the bold/italic bitmask (`1 = bold`, `2 = italic`);
//! `underline` and `strikeout` are `1` when set.
//!
//! # Leniency
//!
//! Saved sessions may come from older releases or be hand-edited, so
//! decoding never fails. Values are consumed in fixed-size groups; a group
//! with an unparseable value, an overflowing span, or too few values is
//! skipped and counted. The `deserialize_*` entry points emit one
//! `tracing::warn!` per call when anything was skipped.

use std::fmt::Write as _;

use crate::bullets::BulletLines;
use crate::range::{StyleFlags, StyleRange};
use crate::set::StyleSet;

/// Reserved field separator.
pub const SEPARATOR: char = ',';

const STYLE_FIELDS: usize = 5;
const BULLET_FIELDS: usize = 2;

/// Bullets on lines at or beyond this index are treated as corrupt data.
const MAX_BULLET_LINE: usize = 1 << 16;

/// Result of a lenient decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    /// Everything that parsed.
    pub value: T,
    /// Number of field groups that were skipped.
    pub skipped: usize,
}

/// Encode styles as session CSV.
#[must_use]
pub fn serialize_styles(styles: &StyleSet) -> String {
    let mut out = String::with_capacity(styles.len() * 16);
    for range in styles {
        let _ = write!(
            out,
            "{start}{sep}{length}{sep}{font}{sep}{underline}{sep}{strikeout}{sep}",
            start = range.start,
            length = range.length,
            font = range.flags.font_style_bits(),
            underline = u8::from(range.is_underline()),
            strikeout = u8::from(range.is_strikeout()),
            sep = SEPARATOR,
        );
    }
    out
}

/// Decode session CSV into styles, reporting skipped groups.
#[must_use]
pub fn decode_styles(input: &str) -> Decoded<StyleSet> {
    let tokens = tokenize(input);
    let mut ranges = Vec::with_capacity(tokens.len() / STYLE_FIELDS);
    let mut skipped = 0;

    for group in tokens.chunks(STYLE_FIELDS) {
        match parse_style_group(group) {
            Some(range) => ranges.push(range),
            None => skipped += 1,
        }
    }

    Decoded {
        value: StyleSet::from_ranges(ranges),
        skipped,
    }
}

/// Decode session CSV into styles, logging a diagnostic for skipped groups.
#[must_use]
pub fn deserialize_styles(input: &str) -> StyleSet {
    let decoded = decode_styles(input);
    if decoded.skipped > 0 {
        tracing::warn!(
            message = "style.decode.skipped",
            skipped = decoded.skipped,
            parsed = decoded.value.len()
        );
    }
    decoded.value
}

/// Encode bullets as run-length session CSV.
#[must_use]
pub fn serialize_bullets(bullets: &BulletLines) -> String {
    let mut out = String::new();
    for (first, len) in bullets.runs() {
        let _ = write!(out, "{first}{SEPARATOR}{len}{SEPARATOR}");
    }
    out
}

/// Decode run-length session CSV into bullets, reporting skipped groups.
#[must_use]
pub fn decode_bullets(input: &str) -> Decoded<BulletLines> {
    let tokens = tokenize(input);
    let mut bullets = BulletLines::new();
    let mut skipped = 0;

    for group in tokens.chunks(BULLET_FIELDS) {
        match parse_bullet_group(group) {
            Some((first, len)) => {
                for line in first..first + len {
                    bullets.insert(line);
                }
            }
            None => skipped += 1,
        }
    }

    Decoded {
        value: bullets,
        skipped,
    }
}

/// Decode run-length session CSV into bullets, logging a diagnostic for
/// skipped groups.
#[must_use]
pub fn deserialize_bullets(input: &str) -> BulletLines {
    let decoded = decode_bullets(input);
    if decoded.skipped > 0 {
        tracing::warn!(
            message = "bullet.decode.skipped",
            skipped = decoded.skipped,
            parsed = decoded.value.len()
        );
    }
    decoded.value
}

/// Split on the separator, ignoring surrounding whitespace and one trailing
/// separator.
fn tokenize(input: &str) -> Vec<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let body = trimmed.strip_suffix(SEPARATOR).unwrap_or(trimmed);
    body.split(SEPARATOR).map(str::trim).collect()
}

fn parse_style_group(group: &[&str]) -> Option<StyleRange> {
    let [start, length, font, underline, strikeout] = group else {
        return None;
    };
    let start: usize = start.parse().ok()?;
    let length: usize = length.parse().ok()?;
    start.checked_add(length)?;
    let font: u32 = font.parse().ok()?;
    let underline: u8 = underline.parse().ok()?;
    let strikeout: u8 = strikeout.parse().ok()?;
    let font = u8::try_from(font & u32::from(StyleFlags::FONT_STYLE_MASK.bits())).ok()?;
    Some(StyleRange::new(
        start,
        length,
        StyleFlags::from_columns(font, underline == 1, strikeout == 1),
    ))
}

fn parse_bullet_group(group: &[&str]) -> Option<(usize, usize)> {
    let [first, len] = group else {
        return None;
    };
    let first: usize = first.parse().ok()?;
    let len: usize = len.parse().ok()?;
    if len == 0 || first.checked_add(len)? > MAX_BULLET_LINE {
        return None;
    }
    Some((first, len))
}
