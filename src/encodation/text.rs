use super::c40::{self, ValueBuffer, Values};
use super::{EncodationType, EncodingContext};

/// Text is C40 with upper and lower case swapped.
fn swap_case(ch: u8) -> u8 {
    match ch {
        ch @ b'A'..=b'Z' => ch - b'A' + b'a',
        ch @ b'a'..=b'z' => ch - b'a' + b'A',
        ch => ch,
    }
}

fn low_ascii_to_text_symbols(buf: &mut Values, ch: u8) {
    c40::low_ascii_to_c40_symbols(buf, swap_case(ch));
}

pub(super) fn in_base_set(ch: u8) -> bool {
    c40::in_base_set(swap_case(ch))
}

pub(super) fn step<T: EncodingContext>(ctx: &mut T, buf: ValueBuffer) -> Option<ValueBuffer> {
    c40::step_generic(ctx, buf, EncodationType::Text, low_ascii_to_text_symbols)
}

#[test]
fn test_text_values() {
    let mut vals = Values::new();
    low_ascii_to_text_symbols(&mut vals, b'a');
    low_ascii_to_text_symbols(&mut vals, b'A');
    low_ascii_to_text_symbols(&mut vals, b'`');
    low_ascii_to_text_symbols(&mut vals, b'{');
    assert_eq!(vals.as_slice(), &[14, 2, 1, 2, 0, 2, 27]);
}

#[test]
fn test_base_set() {
    assert!(in_base_set(b'q'));
    assert!(in_base_set(b'7'));
    assert!(in_base_set(b' '));
    assert!(!in_base_set(b'Q'));
    assert!(!in_base_set(0xE4));
}
