#![forbid(unsafe_code)]

//! Bounded undo/redo stacks.
//!
//! [`HistoryStacks`] holds the two LIFO stacks of [`EditDelta`]s for one
//! note, with:
//!
//! - **Depth limit**: at most `max_depth` undo entries, oldest evicted first
//! - **Memory limit**: oldest undo entries evicted while the byte total is
//!   over budget, but never the newest one
//! - **Branch handling**: recording a new delta clears the redo stack
//!
//! # Invariants
//!
//! 1. `total_bytes` equals the sum of `size_bytes()` over both stacks
//! 2. `undo.len() <= config.max_depth` after any push
//! 3. The redo stack is empty right after a new delta is recorded
//!
//! # Memory Model
//!
//! ```text
//! record(d5)
//! ┌───────────────────────────────────────────────┐
//! │ Undo: [d1, d2, d3, d4, d5]                     │
//! │ Redo: []                                       │
//! └───────────────────────────────────────────────┘
//!
//! undo() x2
//! ┌───────────────────────────────────────────────┐
//! │ Undo: [d1, d2, d3]                             │
//! │ Redo: [d5, d4]           (d4 is redone first)  │
//! └───────────────────────────────────────────────┘
//!
//! record(d6)  <-- new branch, clears redo
//! ┌───────────────────────────────────────────────┐
//! │ Undo: [d1, d2, d3, d6]                         │
//! │ Redo: []                                       │
//! └───────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::coalesce::CoalesceConfig;
use crate::delta::EditDelta;

/// Limits for one note's history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HistoryConfig {
    /// Maximum number of deltas kept for undo.
    pub max_depth: usize,
    /// Maximum total bytes held by both stacks (0 = unlimited).
    pub max_bytes: usize,
    /// Keystroke coalescing policy applied by hosts above the engine.
    pub coalesce: CoalesceConfig,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: 100,
            max_bytes: 10 * 1024 * 1024, // 10 MiB
            coalesce: CoalesceConfig::default(),
        }
    }
}

impl HistoryConfig {
    /// Create a configuration with custom limits.
    #[must_use]
    pub fn new(max_depth: usize, max_bytes: usize) -> Self {
        Self {
            max_depth,
            max_bytes,
            coalesce: CoalesceConfig::default(),
        }
    }

    /// Set the coalescing policy.
    #[must_use]
    pub fn with_coalesce(mut self, coalesce: CoalesceConfig) -> Self {
        self.coalesce = coalesce;
        self
    }

    /// No depth or memory limit (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_bytes: 0,
            coalesce: CoalesceConfig::default(),
        }
    }

    /// Check for values that would make history unusable.
    ///
    /// Returns one message per problem; empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_depth == 0 {
            errors.push("history.max_depth must be at least 1".to_string());
        }
        if self.coalesce.max_run_bytes == 0 {
            errors.push("history.coalesce.max_run_bytes must be at least 1".to_string());
        }
        errors
    }
}

/// Undo and redo stacks with depth and byte limits.
pub struct HistoryStacks {
    /// Deltas available for undo (newest at back).
    undo: VecDeque<EditDelta>,
    /// Deltas available for redo (next to redo at back).
    redo: VecDeque<EditDelta>,
    config: HistoryConfig,
    /// Total bytes used by both stacks.
    total_bytes: usize,
}

impl fmt::Debug for HistoryStacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStacks")
            .field("undo_depth", &self.undo.len())
            .field("redo_depth", &self.redo.len())
            .field("total_bytes", &self.total_bytes)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for HistoryStacks {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl HistoryStacks {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            config,
            total_bytes: 0,
        }
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Record a new delta: clears the redo stack and enforces limits.
    ///
    /// Returns the number of undo entries evicted.
    pub fn record(&mut self, delta: EditDelta) -> usize {
        self.clear_redo();
        self.total_bytes += delta.size_bytes();
        self.undo.push_back(delta);
        self.enforce_limits()
    }

    /// Take the newest undo entry.
    pub fn pop_undo(&mut self) -> Option<EditDelta> {
        let delta = self.undo.pop_back()?;
        self.total_bytes = self.total_bytes.saturating_sub(delta.size_bytes());
        Some(delta)
    }

    /// Take the next redo entry.
    pub fn pop_redo(&mut self) -> Option<EditDelta> {
        let delta = self.redo.pop_back()?;
        self.total_bytes = self.total_bytes.saturating_sub(delta.size_bytes());
        Some(delta)
    }

    /// Park an undone delta for redo.
    pub fn push_redo(&mut self, delta: EditDelta) {
        self.total_bytes += delta.size_bytes();
        self.redo.push_back(delta);
    }

    /// Return a redone delta to the undo stack without touching the redo
    /// stack.
    pub fn push_undo(&mut self, delta: EditDelta) {
        self.total_bytes += delta.size_bytes();
        self.undo.push_back(delta);
    }

    /// Next delta that `pop_undo` would return.
    #[must_use]
    pub fn peek_undo(&self) -> Option<&EditDelta> {
        self.undo.back()
    }

    /// Next delta that `pop_redo` would return.
    #[must_use]
    pub fn peek_redo(&self) -> Option<&EditDelta> {
        self.redo.back()
    }

    // ========================================================================
    // Info
    // ========================================================================

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Undo entries, oldest first.
    pub fn undo_iter(&self) -> impl DoubleEndedIterator<Item = &EditDelta> + '_ {
        self.undo.iter()
    }

    /// Redo entries, next-to-redo first.
    pub fn redo_iter(&self) -> impl DoubleEndedIterator<Item = &EditDelta> + '_ {
        self.redo.iter().rev()
    }

    /// Total memory usage in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.total_bytes
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.total_bytes = 0;
    }

    fn clear_redo(&mut self) {
        for delta in self.redo.drain(..) {
            self.total_bytes = self.total_bytes.saturating_sub(delta.size_bytes());
        }
    }

    /// Evict oldest undo entries until both limits hold.
    fn enforce_limits(&mut self) -> usize {
        let mut evicted = 0;

        while self.undo.len() > self.config.max_depth {
            if let Some(delta) = self.undo.pop_front() {
                self.total_bytes = self.total_bytes.saturating_sub(delta.size_bytes());
                evicted += 1;
            }
        }

        // Newest entry always survives so the last edit stays undoable.
        if self.config.max_bytes > 0 {
            while self.total_bytes > self.config.max_bytes && self.undo.len() > 1 {
                if let Some(delta) = self.undo.pop_front() {
                    self.total_bytes = self.total_bytes.saturating_sub(delta.size_bytes());
                    evicted += 1;
                }
            }
        }

        if evicted > 0 {
            tracing::debug!(
                message = "history.evicted",
                evicted,
                undo_depth = self.undo.len(),
                total_bytes = self.total_bytes
            );
        }
        evicted
    }
}

// ============================================================================
// Tests
// ============================================================================
