use arrayvec::ArrayVec;

use super::{c40, EncodationType, EncodingContext, UNLATCH};

pub(crate) fn is_native_x12(ch: u8) -> bool {
    matches!(ch, 13 | 42 | 62 | 32 | b'0'..=b'9' | b'A'..=b'Z')
}

fn enc(ch: u8) -> u8 {
    match ch {
        13 => 0,
        42 => 1,
        62 => 2,
        b' ' => 3,
        ch @ b'0'..=b'9' => ch - b'0' + 4,
        ch @ b'A'..=b'Z' => ch - b'A' + 14,
        // the look-ahead only commits to X12 for native characters
        _ => unreachable!("not an X12 character"),
    }
}

/// Collect the next character, three of them fill two codewords.
pub(super) fn step<T: EncodingContext>(
    ctx: &mut T,
    mut chars: ArrayVec<u8, 3>,
) -> Option<ArrayVec<u8, 3>> {
    if chars.is_empty() && ctx.next_mode(EncodationType::X12) != EncodationType::X12 {
        ctx.push(UNLATCH);
        return None;
    }
    if let Some(ch) = ctx.eat() {
        chars.push(ch);
    }
    if chars.is_full() {
        for cw in c40::pack(enc(chars[0]), enc(chars[1]), enc(chars[2])) {
            ctx.push(cw);
        }
        chars.clear();
    }
    Some(chars)
}

#[test]
fn test_values() {
    let vals: Vec<u8> = b"\r*> 09AZ".iter().map(|ch| enc(*ch)).collect();
    assert_eq!(vals, vec![0, 1, 2, 3, 4, 13, 14, 39]);
}

#[test]
fn test_native() {
    assert!(b"\r*> 0123456789ABCXYZ".iter().all(|ch| is_native_x12(*ch)));
    assert!(!b"abc!+\x1d\xe4".iter().any(|ch| is_native_x12(*ch)));
}
