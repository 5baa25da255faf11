//! Look-ahead mode selection (ISO/IEC 16022, Annex P).
//!
//! Starting at a position in the input, the expected number of codewords
//! is tracked for all six encodation types in parallel. The first mode
//! which is clearly cheaper than all others wins. If no such mode is found
//! before the input ends, the cheapest one after rounding up is taken.
use super::frac::Frac;
use super::{c40, text, x12, EncodationType};

/// Cost of one input character in each encodation type.
///
/// The ASCII cost is only added as is for digits. For all other characters
/// the running ASCII count is rounded up first, as a pending half codeword
/// from a digit can not be shared with a non-digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct CharCost {
    pub ascii: Frac,
    pub ascii_digit: bool,
    pub c40: Frac,
    pub text: Frac,
    pub x12: Frac,
    pub edf: Frac,
    pub b256: Frac,
}

/// Classify a single input byte.
///
/// `fnc1` marks the byte as FNC1 instead of a data character.
pub(super) fn classify(ch: u8, fnc1: bool) -> CharCost {
    let native = |basic: bool| {
        if basic {
            Frac::new(2, 3)
        } else if ch > 127 {
            Frac::new(8, 3)
        } else {
            Frac::new(4, 3)
        }
    };
    let ascii_digit = !fnc1 && ch.is_ascii_digit();
    CharCost {
        ascii: if ascii_digit {
            Frac::new(1, 2)
        } else if ch > 127 && !fnc1 {
            Frac::new(2, 1)
        } else {
            Frac::new(1, 1)
        },
        ascii_digit,
        c40: native(!fnc1 && c40::in_base_set(ch)),
        text: native(!fnc1 && text::in_base_set(ch)),
        x12: if !fnc1 && x12::is_native_x12(ch) {
            Frac::new(2, 3)
        } else if ch > 127 && !fnc1 {
            Frac::new(13, 3)
        } else {
            Frac::new(10, 3)
        },
        edf: if fnc1 {
            Frac::new(26, 1)
        } else if matches!(ch, 32..=94) {
            Frac::new(3, 4)
        } else if ch > 127 {
            Frac::new(17, 1)
        } else {
            Frac::new(13, 1)
        },
        b256: if fnc1 {
            Frac::new(4, 1)
        } else {
            Frac::new(1, 1)
        },
    }
}

#[derive(Debug, Clone)]
struct Costs {
    ascii: Frac,
    c40: Frac,
    text: Frac,
    x12: Frac,
    edf: Frac,
    b256: Frac,
}

impl Costs {
    fn new(mode: EncodationType) -> Self {
        let mut me = if mode.is_ascii() {
            Self {
                ascii: Frac::ZERO,
                c40: Frac::new(1, 1),
                text: Frac::new(1, 1),
                x12: Frac::new(1, 1),
                edf: Frac::new(1, 1),
                b256: Frac::new(5, 4),
            }
        } else {
            Self {
                ascii: Frac::new(1, 1),
                c40: Frac::new(2, 1),
                text: Frac::new(2, 1),
                x12: Frac::new(2, 1),
                edf: Frac::new(2, 1),
                b256: Frac::new(9, 4),
            }
        };
        match mode {
            EncodationType::Ascii => (),
            EncodationType::C40 => me.c40 = Frac::ZERO,
            EncodationType::Text => me.text = Frac::ZERO,
            EncodationType::X12 => me.x12 = Frac::ZERO,
            EncodationType::Edifact => me.edf = Frac::ZERO,
            EncodationType::Base256 => me.b256 = Frac::ZERO,
        }
        me
    }

    fn add(&mut self, cost: CharCost) {
        if !cost.ascii_digit {
            self.ascii = self.ascii.ceil();
        }
        self.ascii += cost.ascii;
        self.c40 += cost.c40;
        self.text += cost.text;
        self.x12 += cost.x12;
        self.edf += cost.edf;
        self.b256 += cost.b256;
    }

    fn round_up(&mut self) {
        self.ascii = self.ascii.ceil();
        self.c40 = self.c40.ceil();
        self.text = self.text.ceil();
        self.x12 = self.x12.ceil();
        self.edf = self.edf.ceil();
        self.b256 = self.b256.ceil();
    }

    /// Cheapest mode at the end of data, ties go to the earlier mode
    /// in the order ASCII, C40, X12, Text, EDIFACT, Base256.
    fn cheapest(&self) -> EncodationType {
        let mut best = (EncodationType::C40, self.c40);
        for (mode, cost) in [
            (EncodationType::X12, self.x12),
            (EncodationType::Text, self.text),
            (EncodationType::Edifact, self.edf),
            (EncodationType::Base256, self.b256),
        ] {
            if cost < best.1 {
                best = (mode, cost);
            }
        }
        if self.ascii <= best.1 {
            EncodationType::Ascii
        } else {
            best.0
        }
    }

    /// Mode which is at least one codeword cheaper than all others.
    ///
    /// `x12_first` is asked if C40 and X12 are tied.
    fn dominant<F: FnOnce() -> bool>(&self, x12_first: F) -> Option<EncodationType> {
        let mut best = None;

        let c40 = self.c40 + 1;
        if c40 < self.ascii && c40 < self.b256 && c40 < self.edf && c40 < self.text {
            if self.c40 < self.x12 {
                best = Some(EncodationType::C40);
            } else if self.c40 == self.x12 {
                best = Some(if x12_first() {
                    EncodationType::X12
                } else {
                    EncodationType::C40
                });
            }
        }

        let x12 = self.x12 + 1;
        if x12 < self.ascii && x12 < self.b256 && x12 < self.edf && x12 < self.text && x12 < self.c40
        {
            best = Some(EncodationType::X12);
        }

        let text = self.text + 1;
        if text < self.ascii && text < self.b256 && text < self.edf && text < self.x12 && text < self.c40
        {
            best = Some(EncodationType::Text);
        }

        let edf = self.edf + 1;
        if edf < self.ascii && edf < self.b256 && edf < self.text && edf < self.x12 && edf < self.c40 {
            best = Some(EncodationType::Edifact);
        }

        let b256 = self.b256 + 1;
        if b256 <= self.ascii
            || (b256 < self.edf && b256 < self.text && b256 < self.x12 && b256 < self.c40)
        {
            best = Some(EncodationType::Base256);
        }

        let ascii = self.ascii + 1;
        if ascii <= self.b256
            && ascii <= self.edf
            && ascii <= self.text
            && ascii <= self.x12
            && ascii <= self.c40
        {
            best = Some(EncodationType::Ascii);
        }

        best
    }
}

/// Does an X12 terminator (CR, `*`, `>`) come before the first character
/// X12 can not encode?
///
/// Both must be present in `rest`.
pub(super) fn x12_terminator_first(rest: &[u8]) -> bool {
    let terminator = rest.iter().position(|ch| matches!(ch, 13 | b'*' | b'>'));
    let non_x12 = rest.iter().position(|ch| !x12::is_native_x12(*ch));
    match (terminator, non_x12) {
        (Some(t), Some(n)) => t < n,
        _ => false,
    }
}

/// Determine the mode to encode the data starting at `pos` with.
///
/// `mode` is the current mode and `fnc1` the byte which stands for FNC1,
/// if any. After the fifth character a mode is picked as soon as it is
/// a whole codeword cheaper than every other mode.
pub(super) fn look_ahead(
    data: &[u8],
    pos: usize,
    mode: EncodationType,
    fnc1: Option<u8>,
) -> EncodationType {
    let mut costs = Costs::new(mode);
    let mut i = pos;
    loop {
        let mut best = None;
        if let Some(ch) = data.get(i) {
            costs.add(classify(*ch, fnc1 == Some(*ch)));
        } else {
            costs.round_up();
            best = Some(costs.cheapest());
        }
        if i > pos + 3 {
            let rest = data.get(i..).unwrap_or(&[]);
            if let Some(dominant) = costs.dominant(|| x12_terminator_first(rest)) {
                best = Some(dominant);
            }
        }
        if let Some(best) = best {
            return best;
        }
        i += 1;
    }
}
