#![no_main]

use arbitrary::Arbitrary;
use jot_history::{EditingSurface, HistoryConfig, HistoryEngine, Markup, TextChangeEvent};
use jot_style::{StyleFlags, StyleSet};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Replace { at: u8, len: u8, text: String },
    Bold { at: u8, len: u8 },
    Undo,
    Redo,
}

#[derive(Debug, Arbitrary)]
struct Input {
    max_depth: u8,
    ops: Vec<Op>,
}

/// Surface that reports every committed change straight back to the engine.
struct Surface {
    text: String,
    styles: StyleSet,
    /// Committed changes with the markup current before each one.
    echoes: Vec<(TextChangeEvent, Markup)>,
}

impl EditingSurface for Surface {
    fn text(&self) -> std::borrow::Cow<'_, str> {
        self.text.as_str().into()
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn replace_range(&mut self, position: usize, length: usize, replacement: &str) {
        if let Some(text) = jot_history::splice(&self.text, position, length, replacement) {
            let removed = &self.text[position..position + length];
            let event = TextChangeEvent::new(position, removed, replacement);
            let before = self.markup();
            self.echoes.push((event, before));
            self.styles.adjust_for_edit(position, length, replacement.len());
            self.text = text;
        }
    }

    fn style_set(&self) -> StyleSet {
        self.styles.clone()
    }

    fn set_style_set(&mut self, styles: StyleSet) {
        self.styles = styles;
    }
}

fn snap(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn drain(history: &mut HistoryEngine, surface: &mut Surface) {
    for (event, before) in std::mem::take(&mut surface.echoes) {
        history.record_change(Some(&event), before);
    }
}

fuzz_target!(|input: Input| {
    if input.ops.len() > 256 {
        return;
    }
    let config = HistoryConfig {
        max_depth: usize::from(input.max_depth).max(1),
        ..HistoryConfig::default()
    };
    let mut history = HistoryEngine::new(config);
    let mut surface = Surface {
        text: String::new(),
        styles: StyleSet::new(),
        echoes: Vec::new(),
    };

    for op in input.ops {
        match op {
            Op::Replace { at, len, text } => {
                if text.len() > 64 {
                    continue;
                }
                let start = snap(&surface.text, usize::from(at));
                let end = snap(&surface.text, start + usize::from(len));
                surface.replace_range(start, end - start, &text);
            }
            Op::Bold { at, len } => {
                let start = usize::from(at).min(surface.text.len());
                let len = usize::from(len).min(surface.text.len() - start);
                history.record_change(None, surface.markup());
                surface.styles.apply_flags(start, len, StyleFlags::BOLD);
            }
            Op::Undo => {
                history.undo(&mut surface);
            }
            Op::Redo => {
                history.redo(&mut surface);
            }
        }
        drain(&mut history, &mut surface);

        // Replays are always consumed by the guard.
        assert!(!history.is_replay_pending(), "replay guard left armed");
        assert!(history.undo_depth() <= history.config().max_depth);
    }

    // Undoing everything and redoing everything lands on the same text.
    let final_text = surface.text.clone();
    while history.undo(&mut surface).is_some() {
        drain(&mut history, &mut surface);
    }
    while history.redo(&mut surface).is_some() {
        drain(&mut history, &mut surface);
    }
    assert_eq!(surface.text, final_text, "undo-all/redo-all changed text");
});
