#![forbid(unsafe_code)]

//! Normalized style collections.
//!
//! # Invariants
//!
//! 1. Ranges are sorted by `start` and pairwise non-overlapping.
//! 2. No stored range is void (zero length or no flags).
//! 3. Touching ranges with identical flags are merged into one.
//!
//! Every mutating method rebuilds the range list through [`push_piece`],
//! which is the only place these invariants are enforced.

use crate::range::{StyleFlags, StyleRange};

/// The style ranges of one buffer state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StyleSet {
    ranges: Vec<StyleRange>,
}

impl StyleSet {
    /// An empty set (unstyled text).
    #[must_use]
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Build a set from arbitrary ranges.
    ///
    /// Ranges are painted in order, so when two overlap the later one wins
    /// for the shared bytes. Void ranges are dropped.
    #[must_use]
    pub fn from_ranges(ranges: impl IntoIterator<Item = StyleRange>) -> Self {
        let mut set = Self::new();
        for range in ranges {
            let flags = range.flags;
            set.map_span(range.start, range.length, |_| flags);
        }
        set
    }

    /// The normalized ranges, sorted by start.
    #[must_use]
    pub fn ranges(&self) -> &[StyleRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyleRange> {
        self.ranges.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Flags in effect at `offset` (empty when unstyled).
    #[must_use]
    pub fn flags_at(&self, offset: usize) -> StyleFlags {
        let idx = self.ranges.partition_point(|r| r.end() <= offset);
        match self.ranges.get(idx) {
            Some(range) if range.contains(offset) => range.flags,
            _ => StyleFlags::empty(),
        }
    }

    /// Ranges intersecting `[start, start + length)`, clipped to that span.
    #[must_use]
    pub fn ranges_in(&self, start: usize, length: usize) -> Vec<StyleRange> {
        let end = start.saturating_add(length);
        self.ranges
            .iter()
            .filter(|r| r.start < end && r.end() > start)
            .map(|r| {
                let clipped_start = r.start.max(start);
                let clipped_end = r.end().min(end);
                StyleRange::new(clipped_start, clipped_end - clipped_start, r.flags)
            })
            .collect()
    }

    /// Add `flags` to every byte of the span, keeping existing attributes.
    pub fn apply_flags(&mut self, start: usize, length: usize, flags: StyleFlags) {
        self.map_span(start, length, |current| current | flags);
    }

    /// Replace the attributes of every byte of the span with exactly `flags`.
    pub fn set_flags(&mut self, start: usize, length: usize, flags: StyleFlags) {
        self.map_span(start, length, |_| flags);
    }

    /// Remove all styling from the span.
    pub fn clear_span(&mut self, start: usize, length: usize) {
        self.map_span(start, length, |_| StyleFlags::empty());
    }

    /// Remove every range.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Drop or clip ranges extending past `text_len`.
    pub fn truncate_to(&mut self, text_len: usize) {
        let old = std::mem::take(&mut self.ranges);
        for range in old {
            if range.start >= text_len {
                break;
            }
            let end = range.end().min(text_len);
            push_piece(
                &mut self.ranges,
                StyleRange::new(range.start, end - range.start, range.flags),
            );
        }
    }

    /// Shift and clip ranges for a text edit.
    ///
    /// `removed_length` bytes at `position` are replaced by `inserted_length`
    /// bytes. Removed bytes take their styling with them. Inserted bytes
    /// inherit the style of a range only when they land strictly inside it;
    /// text inserted at a range boundary is unstyled.
    pub fn adjust_for_edit(
        &mut self,
        position: usize,
        removed_length: usize,
        inserted_length: usize,
    ) {
        if removed_length == 0 && inserted_length == 0 {
            return;
        }
        let removed_end = position.saturating_add(removed_length);
        let after_removal = |offset: usize| {
            if offset <= position {
                offset
            } else if offset >= removed_end {
                offset - removed_length
            } else {
                position
            }
        };

        let old = std::mem::take(&mut self.ranges);
        for range in old {
            let start = after_removal(range.start);
            let end = after_removal(range.end());
            let start = if start >= position {
                start + inserted_length
            } else {
                start
            };
            let end = if end > position {
                end + inserted_length
            } else {
                end
            };
            if end > start {
                push_piece(&mut self.ranges, StyleRange::new(start, end - start, range.flags));
            }
        }
    }

    /// Rewrite the flags of `[start, start + length)` through `f`.
    ///
    /// Unstyled gaps inside the span are passed to `f` as empty flags, so
    /// `f` may introduce styling where there was none.
    fn map_span(&mut self, start: usize, length: usize, f: impl Fn(StyleFlags) -> StyleFlags) {
        if length == 0 {
            return;
        }
        let end = start.saturating_add(length);
        let old = std::mem::take(&mut self.ranges);
        let mut out = Vec::with_capacity(old.len() + 2);
        let mut cursor = start;

        for range in old {
            let range_end = range.end();
            if range_end <= start {
                push_piece(&mut out, range);
                continue;
            }
            if range.start >= end {
                if cursor < end {
                    push_piece(&mut out, StyleRange::new(cursor, end - cursor, f(StyleFlags::empty())));
                    cursor = end;
                }
                push_piece(&mut out, range);
                continue;
            }

            if range.start < start {
                push_piece(&mut out, StyleRange::new(range.start, start - range.start, range.flags));
            }
            let overlap_start = range.start.max(start);
            let overlap_end = range_end.min(end);
            if cursor < overlap_start {
                push_piece(
                    &mut out,
                    StyleRange::new(cursor, overlap_start - cursor, f(StyleFlags::empty())),
                );
            }
            push_piece(
                &mut out,
                StyleRange::new(overlap_start, overlap_end - overlap_start, f(range.flags)),
            );
            cursor = overlap_end;
            if range_end > end {
                push_piece(&mut out, StyleRange::new(end, range_end - end, range.flags));
            }
        }
        if cursor < end {
            push_piece(&mut out, StyleRange::new(cursor, end - cursor, f(StyleFlags::empty())));
        }

        self.ranges = out;
    }
}

/// Append a piece to an ordered range list, dropping void pieces and merging
/// with the previous range when they touch and share flags.
fn push_piece(out: &mut Vec<StyleRange>, piece: StyleRange) {
    if piece.is_void() {
        return;
    }
    if let Some(last) = out.last_mut()
        && last.end() == piece.start
        && last.flags == piece.flags
    {
        last.length += piece.length;
        return;
    }
    debug_assert!(
        out.last().is_none_or(|last| last.end() <= piece.start),
        "style pieces must arrive in order"
    );
    out.push(piece);
}

impl FromIterator<StyleRange> for StyleSet {
    fn from_iter<I: IntoIterator<Item = StyleRange>>(iter: I) -> Self {
        Self::from_ranges(iter)
    }
}

impl<'a> IntoIterator for &'a StyleSet {
    type Item = &'a StyleRange;
    type IntoIter = std::slice::Iter<'a, StyleRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
