#![forbid(unsafe_code)]

//! Property tests for [`HistoryEngine`].
//!
//! Validates:
//! - Every undo/redo lands the surface on exactly the state a linear
//!   timeline model predicts, text and markup alike.
//! - Replayed changes never grow the stacks.
//! - Depth limits keep exactly the newest deltas.
//! - Undo all then redo all restores the final state.

use std::borrow::Cow;

use jot_history::{EditingSurface, HistoryConfig, HistoryEngine, RecordOutcome, TextChangeEvent};
use jot_style::{StyleFlags, StyleSet};
use proptest::prelude::*;

// ── Test surface ────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Surface {
    text: String,
    styles: StyleSet,
    notifications: Vec<TextChangeEvent>,
}

impl EditingSurface for Surface {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
    fn set_text(&mut self, text: String) {
        let len = self.text.len();
        self.replace_range(0, len, &text);
    }
    fn replace_range(&mut self, position: usize, length: usize, replacement: &str) {
        let event = self.change(position, length, replacement);
        self.notifications.push(event);
        self.commit(position, length, replacement);
    }
    fn style_set(&self) -> StyleSet {
        self.styles.clone()
    }
    fn set_style_set(&mut self, styles: StyleSet) {
        self.styles = styles;
    }
}

impl Surface {
    fn change(&self, position: usize, length: usize, replacement: &str) -> TextChangeEvent {
        let removed = &self.text[position..position + length];
        TextChangeEvent::new(position, removed, replacement)
    }

    fn commit(&mut self, position: usize, length: usize, replacement: &str) {
        self.text
            .replace_range(position..position + length, replacement);
        self.styles.adjust_for_edit(position, length, replacement.len());
    }
}

/// Owner of surface and engine, wired like a host.
struct Host {
    surface: Surface,
    engine: HistoryEngine,
}

impl Host {
    fn new(config: HistoryConfig) -> Self {
        Self {
            surface: Surface::default(),
            engine: HistoryEngine::new(config),
        }
    }

    fn dispatch(&mut self) -> usize {
        let mut recorded = 0;
        for event in std::mem::take(&mut self.surface.notifications) {
            let before = self.surface.markup();
            if self.engine.record_change(Some(&event), before) == RecordOutcome::Recorded {
                recorded += 1;
            }
        }
        recorded
    }

    fn apply(&mut self, op: &Op) {
        match op {
            Op::Replace(position, length, text) => {
                let position = floor_boundary(&self.surface.text, *position);
                let end = floor_boundary(&self.surface.text, position + *length);
                let event = self.surface.change(position, end - position, text);
                let outcome = self.engine.record_change(Some(&event), self.surface.markup());
                assert_eq!(outcome, RecordOutcome::Recorded);
                self.surface.commit(position, end - position, text);
            }
            Op::Style(start, length, flags) => {
                let start = (*start).min(self.surface.text.len());
                let length = (*length).min(self.surface.text.len() - start);
                self.engine.record_change(None, self.surface.markup());
                self.surface
                    .styles
                    .apply_flags(start, length, StyleFlags::from_bits_truncate(*flags));
            }
            Op::Undo => {
                self.engine.undo(&mut self.surface);
                assert_eq!(self.dispatch(), 0);
            }
            Op::Redo => {
                self.engine.redo(&mut self.surface);
                assert_eq!(self.dispatch(), 0);
            }
        }
    }

    fn state(&self) -> (String, StyleSet) {
        (self.surface.text.clone(), self.surface.styles.clone())
    }
}

fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

// ── Timeline model ──────────────────────────────────────────────────────

/// Linear history: `states[cursor]` is the current state.
struct Timeline {
    states: Vec<(String, StyleSet)>,
    cursor: usize,
    max_depth: usize,
}

impl Timeline {
    fn new(max_depth: usize) -> Self {
        Self {
            states: vec![(String::new(), StyleSet::new())],
            cursor: 0,
            max_depth,
        }
    }

    fn record(&mut self, state: (String, StyleSet)) {
        self.states.truncate(self.cursor + 1);
        self.states.push(state);
        self.cursor += 1;
        while self.states.len() > self.max_depth + 1 {
            self.states.remove(0);
            self.cursor -= 1;
        }
    }

    fn undo(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn redo(&mut self) {
        if self.cursor + 1 < self.states.len() {
            self.cursor += 1;
        }
    }

    fn current(&self) -> &(String, StyleSet) {
        &self.states[self.cursor]
    }
}

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Replace(usize, usize, String),
    Style(usize, usize, u8),
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..24, 0usize..4, "[abé ]{0,4}").prop_map(|(p, l, t)| Op::Replace(p, l, t)),
        2 => (0usize..24, 0usize..12, 1u8..16).prop_map(|(s, l, f)| Op::Style(s, l, f)),
        3 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

// ── Invariants ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn surface_follows_timeline(
        ops in prop::collection::vec(op_strategy(), 0..60),
        max_depth in 1usize..12,
    ) {
        let mut host = Host::new(HistoryConfig::new(max_depth, 0));
        let mut timeline = Timeline::new(max_depth);

        for op in &ops {
            host.apply(op);
            match op {
                Op::Replace(..) | Op::Style(..) => timeline.record(host.state()),
                Op::Undo => timeline.undo(),
                Op::Redo => timeline.redo(),
            }
            prop_assert_eq!(&host.state(), timeline.current(), "after {:?}", op);
            prop_assert_eq!(
                host.engine.undo_depth() + host.engine.redo_depth(),
                timeline.states.len() - 1
            );
            prop_assert!(!host.engine.is_replay_pending());
        }
    }

    #[test]
    fn undo_all_then_redo_all_restores_final_state(
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut host = Host::new(HistoryConfig::unlimited());
        for op in &ops {
            host.apply(op);
        }
        let last = host.state();
        let depth = host.engine.undo_depth();

        for _ in 0..depth {
            host.apply(&Op::Undo);
        }
        prop_assert!(!host.engine.can_undo());
        for _ in 0..depth {
            host.apply(&Op::Redo);
        }
        prop_assert_eq!(host.state(), last);
        prop_assert_eq!(host.engine.undo_depth(), depth);
    }

    #[test]
    fn depth_limit_keeps_newest(extra in 0usize..20, max_depth in 1usize..20) {
        let mut host = Host::new(HistoryConfig::new(max_depth, 0));
        let total = max_depth + extra;
        for i in 0..total {
            let position = host.surface.text.len();
            host.apply(&Op::Replace(position, 0, (i % 10).to_string()));
        }
        prop_assert_eq!(host.engine.undo_depth(), max_depth);

        let kept: Vec<usize> = host
            .engine
            .stacks()
            .undo_iter()
            .map(|delta| delta.position())
            .collect();
        let expected: Vec<usize> = (extra..total).collect();
        prop_assert_eq!(kept, expected);
    }
}
