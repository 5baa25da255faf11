use super::{base256, c40, EncodationType, EncodingContext, Mode};

pub(super) const LATCH_C40: u8 = 230;
pub(super) const LATCH_BASE256: u8 = 231;
pub(super) const LATCH_X12: u8 = 238;
pub(super) const LATCH_TEXT: u8 = 239;
pub(super) const LATCH_EDIFACT: u8 = 240;
pub(crate) const PAD: u8 = 129;
pub(super) const FNC1: u8 = 232;

const UPPER_SHIFT: u8 = 235;

fn two_digits_coming(rest: &[u8]) -> bool {
    match rest {
        [a, b, ..] => a.is_ascii_digit() && b.is_ascii_digit(),
        _ => false,
    }
}

/// Encode a single character, FNC1 excluded.
pub(super) fn encode_char(ch: u8) -> impl Iterator<Item = u8> {
    let (first, second) = match ch {
        0..=127 => (ch + 1, None),
        128..=255 => (UPPER_SHIFT, Some(ch - 127)),
    };
    std::iter::once(first).chain(second)
}

/// Encode the next one or two characters, or latch into another mode.
pub(super) fn step<T: EncodingContext>(ctx: &mut T) -> Mode {
    if two_digits_coming(ctx.rest()) {
        // digit pairs are always cheapest in ASCII, no look-ahead needed
        let mut digit = || ctx.eat().map_or(0, |ch| ch - b'0');
        let (a, b) = (digit(), digit());
        ctx.push(a * 10 + b + 130);
        return Mode::Ascii;
    }

    let mode = ctx.next_mode(EncodationType::Ascii);
    if let Some(latch) = mode.latch_from_ascii() {
        ctx.push(latch);
        return match mode {
            EncodationType::C40 => Mode::C40(c40::ValueBuffer::default()),
            EncodationType::Text => Mode::Text(c40::ValueBuffer::default()),
            EncodationType::X12 => Mode::X12(Default::default()),
            EncodationType::Edifact => Mode::Edifact(Default::default()),
            _ => {
                // the latch decision covers the first byte of the run
                let start = ctx.codewords().len();
                base256::push_byte(ctx);
                Mode::Base256 { start }
            }
        };
    }

    if let Some(ch) = ctx.eat() {
        if ctx.is_fnc1(ch) {
            ctx.push(FNC1);
        } else {
            for cw in encode_char(ch) {
                ctx.push(cw);
            }
        }
    }
    Mode::Ascii
}

#[test]
fn test_encode_char() {
    assert_eq!(encode_char(b'A').collect::<Vec<_>>(), vec![66]);
    assert_eq!(encode_char(0).collect::<Vec<_>>(), vec![1]);
    assert_eq!(encode_char(127).collect::<Vec<_>>(), vec![128]);
    assert_eq!(encode_char(128).collect::<Vec<_>>(), vec![235, 1]);
    assert_eq!(encode_char(0xA3).collect::<Vec<_>>(), vec![235, 36]);
}

#[test]
fn test_two_digits_coming() {
    assert!(two_digits_coming(b"12"));
    assert!(two_digits_coming(b"123"));
    assert!(!two_digits_coming(b"1"));
    assert!(!two_digits_coming(b"1a2"));
    assert!(!two_digits_coming(b""));
}
