#![forbid(unsafe_code)]

/// A committed text change, as reported by an editing surface before the
/// change is applied.
///
/// `removed_text` is the text that occupied
/// `[position, position + removed_length)` and `inserted_text` replaces it.
/// Offsets are UTF-8 byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChangeEvent {
    pub position: usize,
    pub removed_length: usize,
    pub removed_text: String,
    pub inserted_text: String,
}

impl TextChangeEvent {
    /// Replacement of `removed_text` at `position` by `inserted_text`.
    #[must_use]
    pub fn new(
        position: usize,
        removed_text: impl Into<String>,
        inserted_text: impl Into<String>,
    ) -> Self {
        let removed_text = removed_text.into();
        Self {
            position,
            removed_length: removed_text.len(),
            removed_text,
            inserted_text: inserted_text.into(),
        }
    }

    /// Pure insertion.
    #[must_use]
    pub fn insertion(position: usize, inserted_text: impl Into<String>) -> Self {
        Self::new(position, String::new(), inserted_text)
    }

    /// Pure deletion.
    #[must_use]
    pub fn deletion(position: usize, removed_text: impl Into<String>) -> Self {
        Self::new(position, removed_text, String::new())
    }

    /// Byte offset just past the inserted text once the change is applied.
    #[must_use]
    pub fn inserted_end(&self) -> usize {
        self.position + self.inserted_text.len()
    }

    /// True if the change removes nothing.
    #[must_use]
    pub fn is_insertion(&self) -> bool {
        self.removed_length == 0
    }

    /// True if the change neither removes nor inserts anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.removed_length == 0 && self.inserted_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_keep_length_in_sync() {
        let event = TextChangeEvent::new(3, "héllo", "x");
        assert_eq!(event.removed_length, "héllo".len());
        assert_eq!(event.inserted_end(), 4);

        assert!(TextChangeEvent::insertion(0, "a").is_insertion());
        assert!(!TextChangeEvent::deletion(0, "a").is_insertion());
        assert!(TextChangeEvent::insertion(5, "").is_noop());
    }
}
