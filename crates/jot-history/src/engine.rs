#![forbid(unsafe_code)]

//! The history engine for one note.
//!
//! # Recording
//!
//! The host calls [`HistoryEngine::record_change`] for every change
//! notification, *before* the change lands on the surface, passing the
//! markup current at that moment. Style-only changes are recorded the same
//! way with no event.
//!
//! # Replay
//!
//! [`undo`](HistoryEngine::undo) pops the newest delta, replaces its
//! inserted span with the removed text and restores the markup captured
//! before it. [`redo`](HistoryEngine::redo) re-applies the forward text and
//! restores the markup that was current right after the delta: the
//! `markup_before` of the next delta still waiting for redo or, once the redo
//! stack is drained, the markup saved at the start of the undo sequence.
//!
//! # Invariants
//!
//! 1. A non-empty redo stack means the last operation was an undo or a redo
//!    that did not drain it.
//! 2. Recording a change clears the redo stack and the saved markup.
//! 3. Replayed text changes are never recorded.

use std::fmt;

use crate::delta::{EditDelta, Markup};
use crate::event::TextChangeEvent;
use crate::guard::ReplayGuard;
use crate::stacks::{HistoryConfig, HistoryStacks};
use crate::surface::{EditingSurface, span_fits};

/// Result of [`HistoryEngine::record_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A delta was pushed on the undo stack.
    Recorded,
    /// The notification was the echo of a replay and was dropped.
    Suppressed,
}

/// What an undo or redo step changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Text and markup.
    Text,
    /// Markup only.
    StyleOnly,
}

/// Coarse state of the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPhase {
    /// Nothing to undo or redo.
    Clean,
    /// Changes recorded, nothing undone.
    Recording,
    /// At least one undone change waits for redo.
    UndoSequence,
}

/// Undo/redo state for one editing surface.
pub struct HistoryEngine {
    stacks: HistoryStacks,
    /// Markup at the first undo of the current sequence.
    markup_before_undo_sequence: Option<Markup>,
    guard: ReplayGuard,
}

impl fmt::Debug for HistoryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryEngine")
            .field("phase", &self.phase())
            .field("undo_depth", &self.stacks.undo_depth())
            .field("redo_depth", &self.stacks.redo_depth())
            .field("total_bytes", &self.stacks.memory_usage())
            .field("replay_pending", &self.guard.is_armed())
            .finish()
    }
}

impl Default for HistoryEngine {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl HistoryEngine {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            stacks: HistoryStacks::new(config),
            markup_before_undo_sequence: None,
            guard: ReplayGuard::new(),
        }
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Record a change about to be applied.
    ///
    /// `event` is `None` for a style-only change. `before` is the markup
    /// current before the change.
    pub fn record_change(&mut self, event: Option<&TextChangeEvent>, before: Markup) -> RecordOutcome {
        if self.guard.take() {
            tracing::trace!(message = "history.replay.suppressed");
            return RecordOutcome::Suppressed;
        }

        self.markup_before_undo_sequence = None;
        let delta = match event {
            Some(event) => EditDelta::from_event(event, before),
            None => EditDelta::style_only(before),
        };
        let style_only = delta.is_style_only();
        self.stacks.record(delta);

        tracing::trace!(
            message = "history.record",
            style_only,
            undo_depth = self.stacks.undo_depth()
        );
        RecordOutcome::Recorded
    }

    // ========================================================================
    // Replay
    // ========================================================================

    /// Revert the newest recorded change on `surface`.
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo<S: EditingSurface + ?Sized>(&mut self, surface: &mut S) -> Option<StepKind> {
        if !self.stacks.can_undo() {
            return None;
        }
        if self.markup_before_undo_sequence.is_none() {
            self.markup_before_undo_sequence = Some(surface.markup());
        }

        let delta = self.stacks.pop_undo()?;
        let kind = match delta.removed_text() {
            Some(removed) => {
                self.replay_text(surface, delta.position(), delta.inserted_length(), removed);
                StepKind::Text
            }
            None => StepKind::StyleOnly,
        };
        surface.restore_markup(delta.markup_before());
        self.stacks.push_redo(delta);

        tracing::debug!(
            message = "history.undo",
            kind = ?kind,
            undo_depth = self.stacks.undo_depth(),
            redo_depth = self.stacks.redo_depth()
        );
        Some(kind)
    }

    /// Re-apply the most recently undone change on `surface`.
    ///
    /// Returns `None` when there is nothing to redo.
    pub fn redo<S: EditingSurface + ?Sized>(&mut self, surface: &mut S) -> Option<StepKind> {
        let delta = self.stacks.pop_redo()?;
        let kind = match delta.inserted_text() {
            Some(inserted) => {
                self.replay_text(surface, delta.position(), delta.removed_length(), inserted);
                StepKind::Text
            }
            None => StepKind::StyleOnly,
        };

        match self.stacks.peek_redo() {
            Some(next) => surface.restore_markup(next.markup_before()),
            None => {
                let saved = self.markup_before_undo_sequence.take();
                debug_assert!(saved.is_some(), "redo drained without saved markup");
                if let Some(saved) = saved {
                    surface.restore_markup(&saved);
                }
            }
        }
        self.stacks.push_undo(delta);

        tracing::debug!(
            message = "history.redo",
            kind = ?kind,
            undo_depth = self.stacks.undo_depth(),
            redo_depth = self.stacks.redo_depth()
        );
        Some(kind)
    }

    /// Replace `length` bytes at `position` with `replacement`, arming the
    /// guard so the surface's notification is dropped.
    fn replay_text<S: EditingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        position: usize,
        length: usize,
        replacement: &str,
    ) {
        let (fits, text_len) = {
            let text = surface.text();
            (span_fits(&text, position, length), text.len())
        };
        debug_assert!(
            fits,
            "delta span {position}+{length} does not fit text of {text_len} bytes"
        );
        if !fits {
            tracing::error!(
                message = "history.replay.span_mismatch",
                position,
                length,
                text_len
            );
            return;
        }

        tracing::trace!(message = "history.replay", position, length, text_len);
        self.guard.arm();
        surface.replace_range(position, length, replacement);
    }

    // ========================================================================
    // Info
    // ========================================================================

    #[must_use]
    pub fn phase(&self) -> HistoryPhase {
        if self.stacks.can_redo() {
            HistoryPhase::UndoSequence
        } else if self.stacks.can_undo() {
            HistoryPhase::Recording
        } else {
            HistoryPhase::Clean
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.stacks.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.stacks.can_redo()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.stacks.undo_depth()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.stacks.redo_depth()
    }

    /// Bytes held by both stacks.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.stacks.memory_usage()
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        self.stacks.config()
    }

    /// Read access to the recorded deltas.
    #[must_use]
    pub fn stacks(&self) -> &HistoryStacks {
        &self.stacks
    }

    /// True if the next notification will be dropped as a replay echo.
    #[must_use]
    pub fn is_replay_pending(&self) -> bool {
        self.guard.is_armed()
    }

    /// Markup saved at the start of the current undo sequence.
    #[must_use]
    pub fn saved_markup(&self) -> Option<&Markup> {
        self.markup_before_undo_sequence.as_ref()
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Forget all history and disarm the guard.
    pub fn clear(&mut self) {
        self.stacks.clear();
        self.markup_before_undo_sequence = None;
        self.guard = ReplayGuard::new();
        tracing::debug!(message = "history.clear");
    }
}

// ============================================================================
// Tests
// ============================================================================
