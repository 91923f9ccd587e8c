#![forbid(unsafe_code)]

use std::collections::BTreeSet;

/// Lines (0-based) that carry a bullet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BulletLines {
    lines: BTreeSet<usize>,
}

impl BulletLines {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    /// Add a bullet. Returns `false` if the line already had one.
    pub fn insert(&mut self, line: usize) -> bool {
        self.lines.insert(line)
    }

    /// Remove a bullet. Returns `false` if the line had none.
    pub fn remove(&mut self, line: usize) -> bool {
        self.lines.remove(&line)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Bulleted lines in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().copied()
    }

    /// Runs of consecutive bulleted lines as `(first_line, run_length)`.
    #[must_use]
    pub fn runs(&self) -> Vec<(usize, usize)> {
        let mut runs: Vec<(usize, usize)> = Vec::new();
        for line in self.iter() {
            match runs.last_mut() {
                Some((first, len)) if *first + *len == line => *len += 1,
                _ => runs.push((line, 1)),
            }
        }
        runs
    }

    /// Bullet every line in `first..=last`, or remove all of them if every
    /// line in the range already has one.
    pub fn toggle_lines(&mut self, first: usize, last: usize) {
        let (first, last) = if first <= last {
            (first, last)
        } else {
            (last, first)
        };
        let all_bulleted = (first..=last).all(|line| self.lines.contains(&line));
        for line in first..=last {
            if all_bulleted {
                self.lines.remove(&line);
            } else {
                self.lines.insert(line);
            }
        }
    }

    /// Shift bullets for an edit on `line` that removed `removed_lines` line
    /// breaks and inserted `inserted_lines` new ones.
    ///
    /// Lines merged into `line` lose their bullets; newly created lines start
    /// without one; `line` itself keeps its state.
    pub fn adjust_for_line_edit(&mut self, line: usize, removed_lines: usize, inserted_lines: usize) {
        if removed_lines == 0 && inserted_lines == 0 {
            return;
        }
        let merged_end = line.saturating_add(removed_lines);
        self.lines = std::mem::take(&mut self.lines)
            .into_iter()
            .filter_map(|bulleted| {
                if bulleted <= line {
                    Some(bulleted)
                } else if bulleted <= merged_end {
                    None
                } else {
                    Some(bulleted - removed_lines + inserted_lines)
                }
            })
            .collect();
    }

    /// Drop bullets on lines at or beyond `line_count`.
    pub fn truncate_to(&mut self, line_count: usize) {
        self.lines.retain(|&line| line < line_count);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Size in bytes for memory accounting.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.lines.len() * std::mem::size_of::<usize>()
    }
}

impl FromIterator<usize> for BulletLines {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
