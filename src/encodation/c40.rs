use arrayvec::ArrayVec;

use super::{EncodationType, EncodingContext, Remainder, UNLATCH};

pub(super) const SHIFT1: u8 = 0;
pub(super) const SHIFT2: u8 = 1;
const SHIFT3: u8 = 2;
pub(super) const UPPER_SHIFT: u8 = 30;
/// FNC1 in the shift 2 set.
const FNC1: u8 = 27;

pub(super) type Values = ArrayVec<u8, 6>;

pub(super) fn low_ascii_to_c40_symbols(buf: &mut Values, ch: u8) {
    match ch {
        // Basic set
        b' ' => buf.push(3),
        ch @ b'0'..=b'9' => buf.push(ch - b'0' + 4),
        ch @ b'A'..=b'Z' => buf.push(ch - b'A' + 14),
        // Shift 1 set
        ch @ 0..=31 => {
            buf.push(SHIFT1);
            buf.push(ch);
        }
        // Shift 2 set
        ch @ 33..=47 => {
            buf.push(SHIFT2);
            buf.push(ch - 33);
        }
        ch @ 58..=64 => {
            buf.push(SHIFT2);
            buf.push(ch - 58 + 15);
        }
        ch @ 91..=95 => {
            buf.push(SHIFT2);
            buf.push(ch - 91 + 22);
        }
        // Shift 3 set
        ch => {
            debug_assert!(ch < 128);
            buf.push(SHIFT3);
            buf.push(ch - 96);
        }
    }
}

pub(super) fn in_base_set(ch: u8) -> bool {
    matches!(ch, b' ' | b'0'..=b'9' | b'A'..=b'Z')
}

/// Encode three C40 values into two codewords.
pub(super) fn pack(c1: u8, c2: u8, c3: u8) -> [u8; 2] {
    let enc = 1600 * c1 as u16 + 40 * c2 as u16 + c3 as u16 + 1;
    [(enc >> 8) as u8, (enc & 0xFF) as u8]
}

/// Values of the current group which do not fill two codewords yet.
#[derive(Debug, Clone, Default)]
pub(super) struct ValueBuffer {
    values: Values,
    last_char: u8,
    last_fnc1: bool,
}

impl ValueBuffer {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Add the values for `ch`, `low_ascii` maps the characters 0 to 127.
    pub fn push_char<F>(&mut self, ch: u8, fnc1: bool, low_ascii: F)
    where
        F: Fn(&mut Values, u8),
    {
        if fnc1 {
            self.values.push(SHIFT2);
            self.values.push(FNC1);
        } else if ch > 127 {
            self.values.push(SHIFT2);
            self.values.push(UPPER_SHIFT);
            low_ascii(&mut self.values, ch - 128);
        } else {
            low_ascii(&mut self.values, ch);
        }
        self.last_char = ch;
        self.last_fnc1 = fnc1;
    }

    /// Write all complete triples of values.
    fn write_full<T: EncodingContext>(&mut self, ctx: &mut T) {
        while self.values.len() >= 3 {
            for cw in pack(self.values[0], self.values[1], self.values[2]) {
                ctx.push(cw);
            }
            self.values.drain(0..3);
        }
    }

    /// A single pending value always belongs to the last character. It is
    /// written in ASCII instead if that takes one codeword.
    pub fn into_remainder(self) -> Remainder {
        let single = self.values.len() == 1 && !self.last_fnc1 && self.last_char < 128;
        Remainder::C40 {
            values: self.values.iter().cloned().collect(),
            single: single.then_some(self.last_char),
        }
    }
}

/// Shared logic of C40 and Text, which only differ in the character mapping.
pub(super) fn step_generic<T, F>(
    ctx: &mut T,
    mut buf: ValueBuffer,
    mode: EncodationType,
    low_ascii: F,
) -> Option<ValueBuffer>
where
    T: EncodingContext,
    F: Fn(&mut Values, u8),
{
    if buf.is_empty() && ctx.next_mode(mode) != mode {
        ctx.push(UNLATCH);
        return None;
    }
    if let Some(ch) = ctx.eat() {
        buf.push_char(ch, ctx.is_fnc1(ch), low_ascii);
        buf.write_full(ctx);
    }
    Some(buf)
}

pub(super) fn step<T: EncodingContext>(ctx: &mut T, buf: ValueBuffer) -> Option<ValueBuffer> {
    step_generic(ctx, buf, EncodationType::C40, low_ascii_to_c40_symbols)
}

#[cfg(test)]
fn vals(data: &[u8]) -> Vec<u8> {
    let mut vals = Vec::new();
    for ch in data.iter().cloned() {
        let mut buf = ValueBuffer::default();
        buf.push_char(ch, false, low_ascii_to_c40_symbols);
        vals.extend(buf.values.iter());
    }
    vals
}

#[test]
fn test_enc_basic_set() {
    let vals = vals(b" 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    let out: Vec<u8> = (3..=39).collect();
    assert_eq!(vals, out);
}

#[test]
fn test_enc_shift1_set() {
    let input: Vec<u8> = (0..=31).collect();
    let out: Vec<u8> = (0..=31).flat_map(|v| [SHIFT1, v]).collect();
    assert_eq!(vals(&input), out);
}

#[test]
fn test_enc_shift2_set() {
    let vals = vals(b"!\"#$%&'()*+,-./:;<=>?@[\\]^_");
    let out: Vec<u8> = (0..=26).flat_map(|v| [SHIFT2, v]).collect();
    assert_eq!(vals, out);
}

#[test]
fn test_enc_shift3_set() {
    let vals = vals(b"`abcdefghijklmnopqrstuvwxyz{|}~\x7f");
    let out: Vec<u8> = (0..=31).flat_map(|v| [SHIFT3, v]).collect();
    assert_eq!(vals, out);
}

#[test]
fn test_shift_upper() {
    let vals = vals(b"\x80\xFF\xa0");
    // first is 1, 30, 0, 0
    // second is 1, 30, 2, 31
    // third is 1, 30, 3
    assert_eq!(vals, vec![1, 30, 0, 0, 1, 30, 2, 31, 1, 30, 3]);
}

#[test]
fn test_fnc1() {
    let mut buf = ValueBuffer::default();
    buf.push_char(0x1D, true, low_ascii_to_c40_symbols);
    assert_eq!(buf.values.as_slice(), &[1, 27]);
}

#[test]
fn test_pack() {
    // "AIM"
    assert_eq!(pack(14, 22, 26), [91, 11]);
    assert_eq!(pack(39, 39, 39), [250, 0]);
}

#[test]
fn test_remainder_single_char() {
    let mut buf = ValueBuffer::default();
    buf.push_char(b'D', false, low_ascii_to_c40_symbols);
    match buf.into_remainder() {
        Remainder::C40 { values, single } => {
            assert_eq!(values.as_slice(), &[17]);
            assert_eq!(single, Some(b'D'));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[cfg(test)]
fn remainder_after(data: &[u8], fnc1: bool) -> Remainder {
    let mut buf = ValueBuffer::default();
    for ch in data.iter().cloned() {
        buf.push_char(ch, fnc1 && ch == 0x1D, low_ascii_to_c40_symbols);
    }
    let n = buf.values.len() / 3 * 3;
    buf.values.drain(0..n);
    buf.into_remainder()
}

#[test]
fn test_remainder_tail_of_char() {
    // "E", "C" and the shift of "," fill a triple
    assert_eq!(
        remainder_after(b"EC,", false),
        Remainder::C40 {
            values: [11].into_iter().collect(),
            single: Some(b','),
        }
    );
}

#[test]
fn test_remainder_tail_of_upper_shift() {
    // 0xC1 is shift 2, upper shift, "A"
    assert_eq!(
        remainder_after(b"E\xC1", false),
        Remainder::C40 {
            values: [14].into_iter().collect(),
            single: None,
        }
    );
}

#[test]
fn test_remainder_tail_of_fnc1() {
    assert_eq!(
        remainder_after(b"AB\x1D", true),
        Remainder::C40 {
            values: [27].into_iter().collect(),
            single: None,
        }
    );
}
