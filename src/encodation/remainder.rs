//! End of data handling.
//!
//! How the last characters of C40, Text, X12 and EDIFACT are written
//! depends on how many data codewords are left in the symbol. The encoder
//! therefore stops with a [Remainder] which is finished after the symbol
//! size was selected.
use arrayvec::ArrayVec;

use super::{ascii, c40, edifact, UNLATCH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Remainder {
    /// Nothing is pending, the encoder is in ASCII mode.
    Ascii,
    /// C40 or Text values which do not fill a triple.
    C40 {
        values: ArrayVec<u8, 2>,
        /// Set to the last character if a single value is pending and the
        /// character is written as one ASCII codeword.
        single: Option<u8>,
    },
    X12(ArrayVec<u8, 3>),
    Edifact(ArrayVec<u8, 4>),
}

impl Remainder {
    /// Number of codewords needed at least to finish.
    pub fn min_codewords(&self) -> usize {
        match self {
            Self::Ascii => 0,
            Self::C40 { values, single } => match (values.len(), single) {
                (0, _) => 0,
                (1, Some(_)) => 1,
                _ => 2,
            },
            Self::X12(chars) => match chars.len() {
                0 => 0,
                1 => 1,
                _ => 3,
            },
            Self::Edifact(chars) => chars.len(),
        }
    }

    /// Write the pending state, `left` is the number of free data codewords.
    pub fn finish(self, codewords: &mut Vec<u8>, left: usize) {
        debug_assert!(left >= self.min_codewords());
        match self {
            Self::Ascii => (),
            Self::C40 { values, single } => match (values.as_slice(), single) {
                ([], _) => {
                    if left > 0 {
                        codewords.push(UNLATCH);
                    }
                }
                ([_], Some(ch)) => {
                    if left > 1 {
                        codewords.push(UNLATCH);
                    }
                    codewords.extend(ascii::encode_char(ch));
                }
                // tail of an upper shifted character or FNC1, fill the
                // triple with shift values which decoders drop
                ([v], None) => {
                    codewords.extend(c40::pack(*v, c40::SHIFT2, c40::UPPER_SHIFT));
                    unlatch_after_pair(codewords, left);
                }
                ([a, b, ..], _) => {
                    codewords.extend(c40::pack(*a, *b, c40::SHIFT1));
                    unlatch_after_pair(codewords, left);
                }
            },
            Self::X12(chars) => {
                if chars.is_empty() {
                    if left > 0 {
                        codewords.push(UNLATCH);
                    }
                } else if chars.len() == 1 && left == 1 {
                    codewords.push(chars[0] + 1);
                } else {
                    codewords.push(UNLATCH);
                    codewords.extend(chars.iter().map(|ch| ch + 1));
                }
            }
            Self::Edifact(chars) => {
                if left <= 2 {
                    // ASCII is implied with at most two codewords left
                    codewords.extend(chars.iter().map(|ch| ch + 1));
                } else {
                    codewords.extend(edifact::pack(&edifact::with_unlatch(&chars)));
                }
            }
        }
    }
}

fn unlatch_after_pair(codewords: &mut Vec<u8>, left: usize) {
    if left > 2 {
        codewords.push(UNLATCH);
    }
}

/// Fill the codewords up to `total` with randomized padding.
pub(crate) fn pad(codewords: &mut Vec<u8>, total: usize) {
    if codewords.len() < total {
        codewords.push(ascii::PAD);
    }
    while codewords.len() < total {
        let pos = codewords.len() + 1;
        let pseudo_random = ((149 * pos) % 253) + 1;
        let tmp = ascii::PAD as usize + pseudo_random;
        codewords.push(if tmp <= 254 { tmp } else { tmp - 254 } as u8);
    }
}
