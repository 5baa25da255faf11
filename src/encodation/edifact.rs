use arrayvec::ArrayVec;

use super::{EncodationType, EncodingContext};

pub(crate) const UNLATCH: u8 = 0b011111;

#[inline]
pub(crate) fn is_encodable(ch: u8) -> bool {
    matches!(ch, 32..=94)
}

/// Six bit EDIFACT value of a character.
#[inline]
pub(super) fn value(ch: u8) -> u8 {
    ch & 0b11_1111
}

/// Encode 1 to 4 EDIFACT values into as few codewords as possible.
pub(super) fn pack(s: &[u8]) -> ArrayVec<u8, 3> {
    debug_assert!(!s.is_empty() && s.len() <= 4);
    let get = |i: usize| s.get(i).cloned().unwrap_or(0) & 0b11_1111;
    let mut out = ArrayVec::new();
    out.push((get(0) << 2) | (get(1) >> 4));
    if s.len() >= 2 {
        out.push((get(1) << 4) | (get(2) >> 2));
        if s.len() >= 3 {
            out.push((get(2) << 6) | get(3));
        }
    }
    out
}

/// Values of `chars` followed by the unlatch value.
pub(super) fn with_unlatch(chars: &[u8]) -> ArrayVec<u8, 4> {
    chars
        .iter()
        .map(|ch| value(*ch))
        .chain(std::iter::once(UNLATCH))
        .collect()
}

/// Collect the next character, four of them fill three codewords.
///
/// The mode is only left in front of the last character of a group, the
/// unlatch value then completes the group.
pub(super) fn step<T: EncodingContext>(
    ctx: &mut T,
    mut chars: ArrayVec<u8, 4>,
) -> Option<ArrayVec<u8, 4>> {
    if chars.len() == 3 && ctx.next_mode(EncodationType::Edifact) != EncodationType::Edifact {
        for cw in pack(&with_unlatch(&chars)) {
            ctx.push(cw);
        }
        return None;
    }
    if let Some(ch) = ctx.eat() {
        chars.push(ch);
    }
    if chars.is_full() {
        let values: ArrayVec<u8, 4> = chars.iter().map(|ch| value(*ch)).collect();
        for cw in pack(&values) {
            ctx.push(cw);
        }
        chars.clear();
    }
    Some(chars)
}

#[test]
fn test_pack_four() {
    assert_eq!(
        pack(&[0b10_01_00, 0b11_01_10, 0b011010, 1]).as_slice(),
        &[0b10_01_00_11, 0b01_10_01_10, 0b10_00_00_01]
    );
}

#[test]
fn test_pack_three() {
    assert_eq!(
        pack(&[0b10_01_00, 0b11_01_10, 0b011010]).as_slice(),
        &[0b10_01_00_11, 0b01_10_01_10, 0b10_00_00_00]
    );
}

#[test]
fn test_pack_two() {
    assert_eq!(
        pack(&[0b10_01_00, 0b11_01_10]).as_slice(),
        &[0b10_01_00_11, 0b01_10_00_00]
    );
}

#[test]
fn test_pack_one() {
    assert_eq!(pack(&[0b10_01_00]).as_slice(), &[0b10_01_00_00]);
    // unlatch alone
    assert_eq!(pack(&[UNLATCH]).as_slice(), &[124]);
}

#[test]
fn test_values() {
    assert_eq!(value(b'@'), 0);
    assert_eq!(value(b'A'), 1);
    assert_eq!(value(b'^'), 30);
    assert_eq!(value(b' '), 32);
    assert_eq!(value(b'?'), 63);
    assert_eq!(with_unlatch(b"A").as_slice(), &[1, 31]);
}
