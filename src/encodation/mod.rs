//! Implementation of the data encodation using all specified modes.
//!
//! The encoder starts in ASCII mode. Whenever the current mode is free to
//! change, the [look-ahead](look_ahead) is asked which mode to continue
//! with. A mode is only committed if it can encode the characters it will
//! consume before the next decision, otherwise ASCII is used.
//!
//! State which is still pending at the end of the data is returned as a
//! [Remainder], it is resolved once the symbol size is known.
use arrayvec::ArrayVec;
use flagset::FlagSet;

use crate::error::EncodingError;
use crate::options::EncodeOptions;
use crate::symbol_size::MAX_DATA_CODEWORDS;

pub(crate) mod ascii;
mod base256;
mod c40;
mod edifact;
mod encodation_type;
mod frac;
mod header;
mod look_ahead;
mod remainder;
mod text;
mod x12;

#[cfg(test)]
mod tests;

pub use encodation_type::EncodationType;
pub(crate) use remainder::{pad, Remainder};

pub(crate) const UNLATCH: u8 = 254;

/// Upper bound for the input length, two digits per codeword in the largest symbol.
pub(crate) const MAX_INPUT_LEN: usize = 2 * MAX_DATA_CODEWORDS;

/// Byte which is interpreted as FNC1 in GS1 mode (ASCII group separator).
pub(crate) const GS1_SEPARATOR: u8 = 0x1D;

trait EncodingContext {
    /// Mode to continue with at the current position.
    ///
    /// `current` is the mode the encoder is in.
    fn next_mode(&self, current: EncodationType) -> EncodationType;

    fn eat(&mut self) -> Option<u8>;

    fn rest(&self) -> &[u8];

    /// Is `ch` the FNC1 marker instead of a data byte?
    fn is_fnc1(&self, ch: u8) -> bool;

    fn push(&mut self, ch: u8);

    /// Get the codewords written so far.
    fn codewords(&self) -> &[u8];

    fn codewords_mut(&mut self) -> &mut Vec<u8>;

    /// Are there more characters to process?
    fn has_more_characters(&self) -> bool {
        !self.rest().is_empty()
    }
}

/// Current mode, together with the state pending in it.
#[derive(Debug, Clone)]
enum Mode {
    Ascii,
    C40(c40::ValueBuffer),
    Text(c40::ValueBuffer),
    /// Characters not yet packed into codewords.
    X12(ArrayVec<u8, 3>),
    /// Characters not yet packed into codewords.
    Edifact(ArrayVec<u8, 4>),
    /// Index of the first codeword of the run.
    Base256 { start: usize },
}

impl Mode {
    fn encodation_type(&self) -> EncodationType {
        match self {
            Self::Ascii => EncodationType::Ascii,
            Self::C40(_) => EncodationType::C40,
            Self::Text(_) => EncodationType::Text,
            Self::X12(_) => EncodationType::X12,
            Self::Edifact(_) => EncodationType::Edifact,
            Self::Base256 { .. } => EncodationType::Base256,
        }
    }
}

/// Result of the data encodation, before the symbol size is known.
#[derive(Debug, Clone)]
pub(crate) struct Encoded {
    pub codewords: Vec<u8>,
    pub remainder: Remainder,
    pub used: FlagSet<EncodationType>,
}

impl Encoded {
    /// Number of data codewords the symbol must at least have.
    pub fn min_codewords(&self) -> usize {
        self.codewords.len() + self.remainder.min_codewords()
    }
}

pub(crate) struct DataEncoder<'a> {
    data: &'a [u8],
    pos: usize,
    fnc1: Option<u8>,
    codewords: Vec<u8>,
    used: FlagSet<EncodationType>,
}

impl<'a> EncodingContext for DataEncoder<'a> {
    fn next_mode(&self, current: EncodationType) -> EncodationType {
        let mode = look_ahead::look_ahead(self.data, self.pos, current, self.fnc1);
        let rest = self.rest();
        let can_encode = match mode {
            EncodationType::X12 => rest.iter().take(3).all(|ch| x12::is_native_x12(*ch)),
            EncodationType::Edifact => {
                // EDIFACT decides again after each third character of a group
                let n = if current == EncodationType::Edifact { 4 } else { 3 };
                rest.iter().take(n).all(|ch| edifact::is_encodable(*ch))
            }
            EncodationType::Base256 => rest.first().map_or(true, |ch| !self.is_fnc1(*ch)),
            _ => true,
        };
        if can_encode {
            mode
        } else {
            EncodationType::Ascii
        }
    }

    fn eat(&mut self) -> Option<u8> {
        let ch = self.data.get(self.pos).cloned()?;
        self.pos += 1;
        Some(ch)
    }

    fn rest(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    fn is_fnc1(&self, ch: u8) -> bool {
        self.fnc1 == Some(ch)
    }

    fn push(&mut self, ch: u8) {
        self.codewords.push(ch);
    }

    fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    fn codewords_mut(&mut self) -> &mut Vec<u8> {
        &mut self.codewords
    }
}

impl<'a> DataEncoder<'a> {
    /// Create an encoder for `data` which continues after `codewords`.
    ///
    /// `fnc1` is the byte standing for FNC1 in the data, if any.
    pub fn new(data: &'a [u8], fnc1: Option<u8>, codewords: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            fnc1,
            codewords,
            used: EncodationType::Ascii.into(),
        }
    }

    /// Advance by one step in `mode`, returning the mode to continue with.
    ///
    /// Only ASCII latches into another mode, all others return to ASCII.
    fn step(&mut self, mode: Mode) -> Mode {
        match mode {
            Mode::Ascii => ascii::step(self),
            Mode::C40(buf) => c40::step(self, buf).map_or(Mode::Ascii, Mode::C40),
            Mode::Text(buf) => text::step(self, buf).map_or(Mode::Ascii, Mode::Text),
            Mode::X12(buf) => x12::step(self, buf).map_or(Mode::Ascii, Mode::X12),
            Mode::Edifact(buf) => edifact::step(self, buf).map_or(Mode::Ascii, Mode::Edifact),
            Mode::Base256 { start } => {
                if base256::step(self, start) {
                    Mode::Base256 { start }
                } else {
                    Mode::Ascii
                }
            }
        }
    }

    pub fn run(mut self) -> Result<Encoded, EncodingError> {
        let mut mode = Mode::Ascii;
        while self.has_more_characters() {
            mode = self.step(mode);
            self.used |= mode.encodation_type();
            if self.codewords.len() > MAX_DATA_CODEWORDS {
                return Err(EncodingError::DataTooLong);
            }
        }

        let remainder = match mode {
            Mode::Ascii => Remainder::Ascii,
            Mode::C40(buf) | Mode::Text(buf) => buf.into_remainder(),
            Mode::X12(chars) => Remainder::X12(chars),
            Mode::Edifact(chars) => Remainder::Edifact(chars),
            Mode::Base256 { start } => {
                base256::finish_run(&mut self.codewords, start);
                Remainder::Ascii
            }
        };
        if self.codewords.len() > MAX_DATA_CODEWORDS {
            return Err(EncodingError::DataTooLong);
        }
        Ok(Encoded {
            codewords: self.codewords,
            remainder,
            used: self.used,
        })
    }
}

/// Encode the header and the data into data codewords.
///
/// Padding is not added, this needs the symbol size.
pub(crate) fn encode(data: &[u8], options: &EncodeOptions) -> Result<Encoded, EncodingError> {
    if data.len() > MAX_INPUT_LEN {
        return Err(EncodingError::DataTooLong);
    }
    let mut codewords = Vec::with_capacity(data.len() + 8);
    let data = header::write(data, options, &mut codewords);
    let fnc1 = options.is_gs1().then_some(GS1_SEPARATOR);
    DataEncoder::new(data, fnc1, codewords).run()
}
