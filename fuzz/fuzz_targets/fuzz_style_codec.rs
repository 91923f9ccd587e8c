#![no_main]

use jot_style::{decode_bullets, decode_styles, serialize_bullets, serialize_styles};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.len() > 4096 {
        return;
    }

    // Decoding arbitrary session data must never panic.
    let styles = decode_styles(input).value;
    let bullets = decode_bullets(input).value;

    // Whatever decoded must re-encode to something that decodes cleanly
    // to the same value.
    let reencoded = decode_styles(&serialize_styles(&styles));
    assert_eq!(reencoded.skipped, 0, "re-encoded styles were skipped");
    assert_eq!(reencoded.value, styles, "style re-encode changed the set");

    let reencoded = decode_bullets(&serialize_bullets(&bullets));
    assert_eq!(reencoded.skipped, 0, "re-encoded bullets were skipped");
    assert_eq!(reencoded.value, bullets, "bullet re-encode changed the set");

    // Ranges stay sorted and non-overlapping.
    for pair in styles.ranges().windows(2) {
        assert!(
            pair[0].start + pair[0].length <= pair[1].start,
            "overlapping ranges {:?}",
            pair
        );
    }
});
