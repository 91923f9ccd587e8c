#![forbid(unsafe_code)]

//! Property tests for [`StyleSet`] and the session codecs.
//!
//! Validates:
//! - Normalization invariants hold after any sequence of operations.
//! - Per-byte flags match a naive reference model.
//! - Edits shift styling exactly like splicing the reference model.
//! - Session CSV round-trips and never panics on arbitrary input.

use jot_style::{
    BulletLines, StyleFlags, StyleRange, StyleSet, decode_bullets, decode_styles,
    serialize_bullets, serialize_styles,
};
use proptest::prelude::*;

const TEXT_LEN: usize = 64;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Apply(usize, usize, u8),
    Set(usize, usize, u8),
    Clear(usize, usize),
}

fn flags_strategy() -> impl Strategy<Value = u8> {
    0u8..16
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..TEXT_LEN, 0..TEXT_LEN, flags_strategy()).prop_map(|(s, l, f)| Op::Apply(s, l, f)),
        1 => (0..TEXT_LEN, 0..TEXT_LEN, flags_strategy()).prop_map(|(s, l, f)| Op::Set(s, l, f)),
        2 => (0..TEXT_LEN, 0..TEXT_LEN).prop_map(|(s, l)| Op::Clear(s, l)),
    ]
}

/// Reference model: one flag set per byte.
fn apply_to_model(model: &mut [StyleFlags], op: &Op) {
    let (start, len) = match op {
        Op::Apply(s, l, _) | Op::Set(s, l, _) | Op::Clear(s, l) => (*s, *l),
    };
    let end = (start + len).min(model.len());
    for flags in &mut model[start.min(end)..end] {
        *flags = match op {
            Op::Apply(_, _, f) => *flags | StyleFlags::from_bits_truncate(*f),
            Op::Set(_, _, f) => StyleFlags::from_bits_truncate(*f),
            Op::Clear(..) => StyleFlags::empty(),
        };
    }
}

fn apply_to_set(set: &mut StyleSet, op: &Op) {
    match op {
        Op::Apply(s, l, f) => set.apply_flags(*s, (*l).min(TEXT_LEN - *s), StyleFlags::from_bits_truncate(*f)),
        Op::Set(s, l, f) => set.set_flags(*s, (*l).min(TEXT_LEN - *s), StyleFlags::from_bits_truncate(*f)),
        Op::Clear(s, l) => set.clear_span(*s, (*l).min(TEXT_LEN - *s)),
    }
}

fn build(ops: &[Op]) -> (StyleSet, Vec<StyleFlags>) {
    let mut set = StyleSet::new();
    let mut model = vec![StyleFlags::empty(); TEXT_LEN];
    for op in ops {
        apply_to_set(&mut set, op);
        apply_to_model(&mut model, op);
    }
    (set, model)
}

fn assert_normalized(set: &StyleSet) -> Result<(), TestCaseError> {
    for range in set.ranges() {
        prop_assert!(!range.is_void(), "void range stored: {range:?}");
    }
    for pair in set.ranges().windows(2) {
        prop_assert!(pair[0].end() <= pair[1].start, "overlap/unsorted: {pair:?}");
        prop_assert!(
            pair[0].end() != pair[1].start || pair[0].flags != pair[1].flags,
            "unmerged neighbours: {pair:?}"
        );
    }
    Ok(())
}

// ── Invariants ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn operations_preserve_normalization(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (set, _) = build(&ops);
        assert_normalized(&set)?;
    }

    #[test]
    fn flags_match_reference_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (set, model) = build(&ops);
        for (offset, expected) in model.iter().enumerate() {
            prop_assert_eq!(set.flags_at(offset), *expected, "offset {}", offset);
        }
        prop_assert_eq!(set.flags_at(TEXT_LEN), StyleFlags::empty());
    }

    #[test]
    fn removal_matches_spliced_model(
        ops in prop::collection::vec(op_strategy(), 0..30),
        position in 0..TEXT_LEN,
        removed in 0..TEXT_LEN,
    ) {
        let (mut set, mut model) = build(&ops);
        let removed = removed.min(TEXT_LEN - position);
        set.adjust_for_edit(position, removed, 0);
        model.drain(position..position + removed);

        assert_normalized(&set)?;
        for (offset, expected) in model.iter().enumerate() {
            prop_assert_eq!(set.flags_at(offset), *expected, "offset {}", offset);
        }
    }

    #[test]
    fn insertion_then_removal_restores_set(
        ops in prop::collection::vec(op_strategy(), 0..30),
        position in 0..TEXT_LEN,
        inserted in 1usize..16,
    ) {
        let (mut set, _) = build(&ops);
        let original = set.clone();
        set.adjust_for_edit(position, 0, inserted);
        assert_normalized(&set)?;
        set.adjust_for_edit(position, inserted, 0);
        prop_assert_eq!(set, original);
    }

    #[test]
    fn styles_round_trip_through_csv(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (set, _) = build(&ops);
        let decoded = decode_styles(&serialize_styles(&set));
        prop_assert_eq!(decoded.skipped, 0);
        prop_assert_eq!(decoded.value, set);
    }

    #[test]
    fn bullets_round_trip_through_csv(lines in prop::collection::btree_set(0usize..500, 0..60)) {
        let bullets: BulletLines = lines.into_iter().collect();
        let decoded = decode_bullets(&serialize_bullets(&bullets));
        prop_assert_eq!(decoded.skipped, 0);
        prop_assert_eq!(decoded.value, bullets);
    }

    #[test]
    fn decoding_arbitrary_text_never_panics(input in ".{0,200}") {
        let styles = decode_styles(&input);
        assert_normalized(&styles.value)?;
        let _ = decode_bullets(&input);
    }

    #[test]
    fn decoding_numeric_noise_never_panics(values in prop::collection::vec(any::<u64>(), 0..40)) {
        let input: String = values.iter().map(|v| format!("{v},")).collect();
        let styles = decode_styles(&input);
        assert_normalized(&styles.value)?;
        let _ = decode_bullets(&input);
    }
}

#[test]
fn from_ranges_matches_sequential_set_flags() {
    let ranges = [
        StyleRange::new(0, 10, StyleFlags::BOLD),
        StyleRange::new(5, 10, StyleFlags::ITALIC),
        StyleRange::new(2, 2, StyleFlags::UNDERLINE),
    ];
    let mut manual = StyleSet::new();
    for range in ranges {
        manual.set_flags(range.start, range.length, range.flags);
    }
    assert_eq!(StyleSet::from_ranges(ranges), manual);
}
