#![forbid(unsafe_code)]

//! Delta-based undo/redo for styled note text.
//!
//! Every committed edit of an editing surface is recorded as an immutable
//! [`EditDelta`]: where it happened, what text it replaced, what text it
//! inserted, and the [`Markup`] (style ranges plus optional bullet lines)
//! that was current just before it. Undo replays the inverse text change and
//! restores that markup; redo replays the forward change.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  TextChangeEvent   ┌──────────────────────────────────┐
//! │              │ ─────────────────► │          HistoryEngine           │
//! │   Editing    │   (+ Markup)       │  ┌────────────┐  ┌────────────┐  │
//! │   Surface    │                    │  │ Undo Stack │  │ Redo Stack │  │
//! │              │ ◄───────────────── │  │ (bounded)  │  │            │  │
//! └──────────────┘  replace_range /   │  └────────────┘  └────────────┘  │
//!                   restore markup    │         ReplayGuard (1 slot)     │
//!                                     └──────────────────────────────────┘
//! ```
//!
//! The surface notifies the engine of *every* committed text change,
//! including the ones the engine itself issues while replaying. The
//! [`ReplayGuard`] is armed before each replayed text change and swallows
//! exactly one notification, so replays never land back on the undo stack.
//!
//! # Module Structure
//!
//! - [`event`]: the immutable change notification
//! - [`delta`]: [`EditDelta`] and [`Markup`]
//! - [`stacks`]: bounded undo/redo stacks and [`HistoryConfig`]
//! - [`guard`]: the single-slot replay latch
//! - [`surface`]: the [`EditingSurface`] contract
//! - [`engine`]: [`HistoryEngine`]
//! - [`coalesce`]: optional keystroke coalescing above the engine
//!
//! # Quick Start
//!
//! ```
//! use jot_history::{EditingSurface, HistoryConfig, HistoryEngine, Markup, TextChangeEvent};
//! use jot_style::StyleSet;
//!
//! struct Plain {
//!     text: String,
//!     styles: StyleSet,
//! }
//!
//! impl EditingSurface for Plain {
//!     fn text(&self) -> std::borrow::Cow<'_, str> {
//!         self.text.as_str().into()
//!     }
//!     fn set_text(&mut self, text: String) {
//!         self.text = text;
//!     }
//!     fn style_set(&self) -> StyleSet {
//!         self.styles.clone()
//!     }
//!     fn set_style_set(&mut self, styles: StyleSet) {
//!         self.styles = styles;
//!     }
//! }
//!
//! let mut surface = Plain { text: "abc".into(), styles: StyleSet::new() };
//! let mut history = HistoryEngine::new(HistoryConfig::default());
//!
//! let event = TextChangeEvent::insertion(1, "X");
//! history.record_change(Some(&event), surface.markup());
//! surface.replace_range(1, 0, "X");
//! assert_eq!(surface.text(), "aXbc");
//!
//! history.undo(&mut surface);
//! assert_eq!(surface.text(), "abc");
//! ```

pub mod coalesce;
pub mod delta;
pub mod engine;
pub mod event;
pub mod guard;
pub mod stacks;
pub mod surface;

pub use coalesce::{CoalesceConfig, CoalesceMode, Coalescer, ReadyChange};
pub use delta::{EditDelta, Markup};
pub use engine::{HistoryEngine, HistoryPhase, RecordOutcome, StepKind};
pub use event::TextChangeEvent;
pub use guard::ReplayGuard;
pub use stacks::{HistoryConfig, HistoryStacks};
pub use surface::{EditingSurface, splice};
