use flagset::{flags, FlagSet};

use super::ascii;

flags! {
    /// List of data encodation types
    ///
    /// Data Matrix can switch between different "codecs" in a symbol. Each one
    /// has its strengths and weaknesses.
    pub enum EncodationType: u8 {
        Ascii   = 0b000001,
        C40     = 0b000010,
        Text    = 0b000100,
        X12     = 0b001000,
        Edifact = 0b010000,
        Base256 = 0b100000,
    }
}

impl EncodationType {
    /// Get flag set with all encodation types activated.
    pub fn all() -> FlagSet<Self> {
        FlagSet::full()
    }

    pub(super) fn is_ascii(&self) -> bool {
        matches!(self, EncodationType::Ascii)
    }

    /// Get the LATCH codeword to switch to this mode from ASCII.
    ///
    /// ASCII itself has no latch, `None` is returned for it.
    pub(super) fn latch_from_ascii(&self) -> Option<u8> {
        match self {
            Self::Ascii => None,
            Self::C40 => Some(ascii::LATCH_C40),
            Self::Text => Some(ascii::LATCH_TEXT),
            Self::X12 => Some(ascii::LATCH_X12),
            Self::Edifact => Some(ascii::LATCH_EDIFACT),
            Self::Base256 => Some(ascii::LATCH_BASE256),
        }
    }
}

#[test]
fn test_latches_are_distinct() {
    let mut latches: Vec<u8> = EncodationType::all()
        .into_iter()
        .filter_map(|m| m.latch_from_ascii())
        .collect();
    latches.sort_unstable();
    assert_eq!(latches, vec![230, 231, 238, 239, 240]);
    assert_eq!(EncodationType::Ascii.latch_from_ascii(), None);
}
