#![forbid(unsafe_code)]

//! Keystroke coalescing above the engine.
//!
//! The engine records exactly what it is given. A host that wants typing to
//! undo a word at a time passes its change notifications through a
//! [`Coalescer`] first and records what comes out.
//!
//! In [`CoalesceMode::Word`], consecutive pure insertions that each start
//! where the previous one ended are merged into one pending run while none
//! of them contains whitespace and the run stays within `max_run_bytes`.
//! Anything else flushes the run and then passes through unchanged.
//!
//! ```text
//! typed:  h e l l o ␠ w o r l d
//! runs:   [hello] [␠] [world]      -> 3 undo steps
//! ```

use crate::delta::Markup;
use crate::event::TextChangeEvent;

/// How change notifications are grouped into undo steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CoalesceMode {
    /// One undo step per committed change.
    #[default]
    PerChange,
    /// Runs of typed non-whitespace characters form one undo step.
    Word,
}

/// Coalescing policy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoalesceConfig {
    pub mode: CoalesceMode,
    /// Maximum merged run size before forcing a split.
    pub max_run_bytes: usize,
}

impl Default for CoalesceConfig {
    fn default() -> Self {
        Self {
            mode: CoalesceMode::PerChange,
            max_run_bytes: 1024,
        }
    }
}

impl CoalesceConfig {
    /// Word-at-a-time coalescing with the default run limit.
    #[must_use]
    pub fn word() -> Self {
        Self {
            mode: CoalesceMode::Word,
            ..Self::default()
        }
    }
}

/// A change ready to hand to
/// [`HistoryEngine::record_change`](crate::HistoryEngine::record_change).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyChange {
    pub event: TextChangeEvent,
    /// Markup current before the (first) change.
    pub before: Markup,
}

#[derive(Debug, Clone)]
struct PendingRun {
    position: usize,
    inserted: String,
    before: Markup,
}

impl PendingRun {
    fn end(&self) -> usize {
        self.position + self.inserted.len()
    }
}

/// Groups change notifications according to a [`CoalesceConfig`].
#[derive(Debug, Clone, Default)]
pub struct Coalescer {
    config: CoalesceConfig,
    pending: Option<PendingRun>,
}

impl Coalescer {
    #[must_use]
    pub fn new(config: CoalesceConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CoalesceConfig {
        &self.config
    }

    /// True while typed text is held back in a pending run.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Offer one change notification with the markup current before it.
    ///
    /// Returns the changes that are now ready to record, oldest first.
    pub fn offer(&mut self, event: TextChangeEvent, before: Markup) -> Vec<ReadyChange> {
        if self.config.mode == CoalesceMode::PerChange {
            return vec![ReadyChange { event, before }];
        }

        if !extends_word(&event) {
            let mut ready: Vec<ReadyChange> = self.flush().into_iter().collect();
            ready.push(ReadyChange { event, before });
            return ready;
        }

        if let Some(run) = &mut self.pending
            && run.end() == event.position
            && run.inserted.len() + event.inserted_text.len() <= self.config.max_run_bytes
        {
            run.inserted.push_str(&event.inserted_text);
            return Vec::new();
        }

        let ready = self.flush().into_iter().collect();
        self.pending = Some(PendingRun {
            position: event.position,
            inserted: event.inserted_text,
            before,
        });
        ready
    }

    /// Drain the pending run, if any, as one insertion.
    pub fn flush(&mut self) -> Option<ReadyChange> {
        let run = self.pending.take()?;
        tracing::trace!(
            message = "history.coalesce.flush",
            position = run.position,
            bytes = run.inserted.len()
        );
        Some(ReadyChange {
            event: TextChangeEvent::insertion(run.position, run.inserted),
            before: run.before,
        })
    }
}

/// A pure insertion of non-whitespace text.
fn extends_word(event: &TextChangeEvent) -> bool {
    event.is_insertion()
        && !event.inserted_text.is_empty()
        && !event.inserted_text.chars().any(char::is_whitespace)
}
