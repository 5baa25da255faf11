use std::cell::Cell;

use flagset::FlagSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pretty_assertions::assert_eq;

use super::{ascii, c40, x12, DataEncoder, EncodationType, EncodingContext, Mode, GS1_SEPARATOR};
use crate::data::encode_data;
use crate::options::{DataType, EncodeOptions, StructuredAppend};
use crate::symbol_size::{ForceMode, SymbolSize};
use crate::EncodingError;

/// Context whose mode decisions are scripted.
///
/// Every call of `next_mode` takes the next decision, the current mode is
/// kept once the script is exhausted.
struct TestContext {
    data: Vec<u8>,
    pos: usize,
    codewords: Vec<u8>,
    script: Vec<EncodationType>,
    decisions: Cell<usize>,
}

impl TestContext {
    fn new(data: &[u8], script: &[EncodationType]) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            codewords: Vec::new(),
            script: script.to_vec(),
            decisions: Cell::new(0),
        }
    }
}

impl EncodingContext for TestContext {
    fn next_mode(&self, current: EncodationType) -> EncodationType {
        let i = self.decisions.get();
        self.decisions.set(i + 1);
        self.script.get(i).cloned().unwrap_or(current)
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
        ch == 0x1D
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

fn enc(data: &[u8]) -> Vec<u8> {
    enc_with(data, &EncodeOptions::default()).0
}

fn enc_with(data: &[u8], options: &EncodeOptions) -> (Vec<u8>, SymbolSize) {
    let encoded = encode_data(data, options).unwrap();
    (encoded.codewords, encoded.symbol_size)
}

#[test]
fn test_ascii_latch_consumes_nothing() {
    let mut ctx = TestContext::new(b"AB", &[EncodationType::C40]);
    let mode = ascii::step(&mut ctx);
    assert!(matches!(mode, Mode::C40(_)));
    assert_eq!(ctx.codewords, vec![230]);
    assert_eq!(ctx.rest(), b"AB");
}

#[test]
fn test_ascii_digits_skip_look_ahead() {
    // the script would latch, but digit pairs never ask
    let mut ctx = TestContext::new(b"12", &[EncodationType::Edifact]);
    assert!(matches!(ascii::step(&mut ctx), Mode::Ascii));
    assert_eq!(ctx.codewords, vec![142]);
}

#[test]
fn test_ascii_fnc1() {
    let mut ctx = TestContext::new(b"\x1d", &[]);
    ascii::step(&mut ctx);
    assert_eq!(ctx.codewords, vec![232]);
}

#[test]
fn test_base256_run() {
    let mut ctx = TestContext::new(
        b"\xa0\xa1A",
        &[
            EncodationType::Base256,
            EncodationType::Base256,
            EncodationType::Ascii,
        ],
    );
    let start = match ascii::step(&mut ctx) {
        Mode::Base256 { start } => start,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(start, 1);
    // the first byte is part of the latch decision
    assert_eq!(ctx.codewords, vec![231, 0xA0]);
    assert!(super::base256::step(&mut ctx, start));
    assert!(!super::base256::step(&mut ctx, start));
    assert!(matches!(ascii::step(&mut ctx), Mode::Ascii));
    assert_eq!(ctx.codewords, vec![231, 46, 97, 248, 66]);
}

#[test]
fn test_c40_unlatch_only_at_group_boundary() {
    let mut ctx = TestContext::new(b"AIMa", &[EncodationType::C40, EncodationType::Ascii]);
    let mut buf = c40::ValueBuffer::default();
    for _ in 0..3 {
        buf = c40::step(&mut ctx, buf).unwrap();
    }
    assert_eq!(ctx.codewords, vec![91, 11]);
    // the look-ahead now says ASCII and the buffer is empty
    assert!(c40::step(&mut ctx, buf).is_none());
    assert_eq!(ctx.codewords, vec![91, 11, 254]);
    assert_eq!(ctx.rest(), b"a");
}

#[test]
fn test_c40_pending_values_block_switch() {
    let mut ctx = TestContext::new(b"AB", &[EncodationType::C40, EncodationType::Ascii]);
    let buf = c40::step(&mut ctx, c40::ValueBuffer::default()).unwrap();
    // values pending, no decision is taken
    let buf = c40::step(&mut ctx, buf).unwrap();
    assert!(!buf.is_empty());
    assert!(ctx.codewords.is_empty());
}

#[test]
fn test_x12_unlatch_after_triple() {
    let mut ctx = TestContext::new(b"ABCd", &[EncodationType::X12, EncodationType::Ascii]);
    let mut chars = Default::default();
    for _ in 0..3 {
        chars = x12::step(&mut ctx, chars).unwrap();
    }
    assert!(x12::step(&mut ctx, chars).is_none());
    assert_eq!(ctx.codewords, vec![89, 233, 254]);
}

#[test]
fn test_ascii_encodation_two_digits() {
    assert_eq!(enc(b"123456"), vec![142, 164, 186]);
}

#[test]
fn test_ascii_encodation_two_digits_with_upper() {
    assert_eq!(enc(b"123456\xa3"), vec![142, 164, 186, 235, 36]);
}

#[test]
fn test_ascii_encodation_example1() {
    assert_eq!(
        enc(b"30Q324343430794<OQQ"),
        vec![160, 82, 162, 173, 173, 173, 137, 224, 61, 80, 82, 82]
    );
}

#[test]
fn test_ascii_control_chars() {
    assert_eq!(enc(b"\x00\x01\x02abc"), vec![1, 2, 3, 98, 99, 100, 129, 56]);
}

#[test]
fn test_c40_basic() {
    assert_eq!(enc(b"AIMAIMAIM"), vec![230, 91, 11, 91, 11, 91, 11, 254]);
}

#[test]
fn test_c40_long_run() {
    let mut expected = vec![230];
    for _ in 0..13 {
        expected.extend([89, 191]);
    }
    // last "A" in ASCII after the unlatch
    expected.extend([254, 66, 129]);
    assert_eq!(enc(&[b'A'; 40]), expected);
}

#[test]
fn test_unlatching_from_c40() {
    assert_eq!(
        enc(b"AIMAIMAIMAIMaimaimaim"),
        vec![230, 91, 11, 91, 11, 91, 11, 91, 11, 254, 239, 91, 11, 91, 11, 91, 11, 254]
    );
}

#[test]
fn test_unlatching_from_text() {
    assert_eq!(
        enc(b"aimaimaimaim12345678"),
        vec![239, 91, 11, 91, 11, 91, 11, 91, 11, 254, 142, 164, 186, 208, 129, 237]
    );
}

#[test]
fn test_text_basic() {
    assert_eq!(enc(b"aimaimaim"), vec![239, 91, 11, 91, 11, 91, 11, 254]);
}

#[test]
fn test_hello_world() {
    assert_eq!(
        enc(b"Hello, World!"),
        vec![73, 239, 116, 130, 175, 52, 19, 40, 179, 242, 106, 105]
    );
    assert_eq!(
        enc(b"Hello World!"),
        vec![239, 13, 211, 160, 69, 19, 40, 179, 242, 106, 105, 254]
    );
}

#[test]
fn test_text_with_shift_chars() {
    assert_eq!(
        enc(b"fiykmj*Rh2`,e6"),
        vec![239, 122, 87, 154, 40, 7, 171, 115, 207, 12, 130, 71, 155, 254, 129, 237]
    );
}

#[test]
fn test_x12() {
    let (cw, size) = enc_with(b"ABC>ABC123>AB", &EncodeOptions::default());
    assert_eq!(cw, vec![238, 89, 233, 14, 192, 100, 207, 44, 31, 67]);
    assert_eq!(size, SymbolSize::Rect8x32);
    assert_eq!(
        enc(b"ABC>ABC123>ABCDE"),
        vec![238, 89, 233, 14, 192, 100, 207, 44, 31, 96, 82, 70]
    );
}

#[test]
fn test_x12_full_symbol() {
    assert_eq!(enc(b"*DTCP0"), vec![238, 9, 10, 104, 141]);
}

#[test]
fn test_ascii_wins_short_x12() {
    assert_eq!(enc(b"*DTCP01"), vec![43, 69, 85, 68, 81, 131, 129, 56]);
}

#[test]
fn test_edifact() {
    let (cw, size) = enc_with(b".A.C1.3.DATA.123DATA.123DATA", &EncodeOptions::default());
    assert_eq!(
        cw,
        vec![
            240, 184, 27, 131, 198, 236, 238, 16, 21, 1, 187, 28, 179, 16, 21, 1, 187, 28, 179,
            16, 21, 1
        ]
    );
    assert_eq!(size, SymbolSize::Square20);
}

#[test]
fn test_edifact_lost_to_ascii() {
    // lower case letters make EDIFACT too expensive
    assert_eq!(
        enc(b"CREX-TAN:h"),
        vec![68, 83, 70, 89, 46, 85, 66, 79, 59, 105]
    );
    assert_eq!(
        enc(b"CREX-TAN:hh"),
        vec![68, 83, 70, 89, 46, 85, 66, 79, 59, 105, 105, 129]
    );
}

#[test]
fn test_base256() {
    let (cw, size) = enc_with(b"\xa0\xa1\xa2\xa3\xa4\xa5\xa6", &EncodeOptions::default());
    assert_eq!(cw, vec![231, 51, 97, 248, 142, 37, 188, 82, 233, 129]);
    assert_eq!(size, SymbolSize::Rect8x32);
}

#[test]
fn test_base256_then_ascii() {
    assert_eq!(
        enc(b"\xe4\xf6\xfc\xdf\xc4\xd6\xdcabc"),
        vec![231, 54, 165, 77, 232, 97, 220, 131, 31, 57, 208, 103]
    );
}

#[test]
fn test_base256_two_byte_length() {
    let data: Vec<u8> = (0..300).map(|i| 0x80 + (i % 100) as u8).collect();
    let encoded = encode_data(&data, &EncodeOptions::default()).unwrap();
    assert_eq!(encoded.symbol_size, SymbolSize::Square72);
    assert_eq!(encoded.codewords.len(), 368);
    assert_eq!(encoded.codewords[..5], [231, 38, 243, 215, 109]);
    assert!(encoded.used.contains(EncodationType::Base256));
}

#[test]
fn test_modes_used() {
    let used = |data: &[u8]| encode_data(data, &EncodeOptions::default()).unwrap().used;
    assert_eq!(used(b"123456789012"), FlagSet::from(EncodationType::Ascii));
    assert_eq!(
        used(b"AIMAIMAIM"),
        EncodationType::Ascii | EncodationType::C40
    );
    assert_eq!(
        used(b"aimaimaim"),
        EncodationType::Ascii | EncodationType::Text
    );
    assert_eq!(
        used(b"ABC>ABC123>AB"),
        EncodationType::Ascii | EncodationType::X12
    );
    assert_eq!(
        used(b".A.C1.3.DATA.123DATA.123DATA"),
        EncodationType::Ascii | EncodationType::Edifact
    );
    assert_eq!(
        used(b"\xa0\xa1\xa2\xa3\xa4\xa5\xa6"),
        EncodationType::Ascii | EncodationType::Base256
    );
}

#[test]
fn test_latch_only_from_ascii() {
    const ALPHABET: &[u8] = b"ABCXYZ0123456789 abcxyz\r*>.,;!@\x1d\x01\xa0\xc1\xff";
    const LATCHES: [u8; 5] = [230, 231, 238, 239, 240];
    let mut rng = StdRng::seed_from_u64(16022);
    for round in 0..2000 {
        let len = rng.random_range(1..=48);
        let data: Vec<u8> = (0..len)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
            .collect();
        let fnc1 = (round % 2 == 1).then_some(GS1_SEPARATOR);
        let mut encoder = DataEncoder::new(&data, fnc1, Vec::new());
        let mut mode = Mode::Ascii;
        while encoder.has_more_characters() {
            let before = mode.encodation_type();
            let written = encoder.codewords.len();
            mode = encoder.step(mode);
            let after = mode.encodation_type();
            let new = &encoder.codewords[written..];
            if before == EncodationType::Ascii {
                if after == EncodationType::Ascii {
                    assert!(!new.iter().any(|cw| LATCHES.contains(cw)), "{:?}", data);
                } else {
                    assert_eq!(new.first().cloned(), after.latch_from_ascii(), "{:?}", data);
                }
            } else {
                // other modes only continue or return to ASCII
                assert!(after == before || after == EncodationType::Ascii, "{:?}", data);
            }
        }
    }
}

#[test]
fn test_gs1() {
    let gs1 = EncodeOptions::default().with_data_type(DataType::Gs1);
    assert_eq!(
        enc_with(b"10123\x1d2112", &gs1),
        (vec![232, 140, 142, 52, 232, 151, 142, 129], SymbolSize::Square14)
    );
    assert_eq!(
        enc_with(b"01034531200000111719112510ABCD1234", &gs1),
        (
            vec![
                232, 131, 133, 175, 161, 150, 130, 130, 141, 147, 149, 141, 155, 140, 66, 67, 68,
                69, 142, 164, 129, 118
            ],
            SymbolSize::Square20
        )
    );
}

#[test]
fn test_eci() {
    let eci = |n| EncodeOptions::default().with_eci(n);
    assert_eq!(
        enc_with(b"Hi", &eci(26)),
        (vec![241, 27, 73, 106, 129], SymbolSize::Square12)
    );
    assert_eq!(
        enc_with(b"Hi", &eci(1000)),
        (vec![241, 131, 112, 73, 106], SymbolSize::Square12)
    );
    assert_eq!(
        enc_with(b"Hi", &eci(20000)),
        (
            vec![241, 192, 15, 62, 73, 106, 129, 56],
            SymbolSize::Square14
        )
    );
}

#[test]
fn test_structured_append() {
    let sa = StructuredAppend::new(2, 5, 300).unwrap();
    let options = EncodeOptions::default().with_structured_append(sa);
    assert_eq!(
        enc_with(b"AB", &options),
        (
            vec![233, 28, 2, 46, 66, 67, 129, 56],
            SymbolSize::Square14
        )
    );
}

#[test]
fn test_reader_init() {
    let options = EncodeOptions::default().with_reader_init(true);
    assert_eq!(
        enc_with(b"AB", &options),
        (vec![234, 66, 67], SymbolSize::Square10)
    );
}

#[test]
fn test_macros() {
    assert_eq!(
        enc_with(b"[)>\x1e05\x1dABCDEF\x1e\x04", &EncodeOptions::default()),
        (
            vec![236, 230, 89, 233, 109, 36, 254, 129],
            SymbolSize::Square14
        )
    );
    assert_eq!(
        enc_with(b"[)>\x1e06\x1d123456\x1e\x04", &EncodeOptions::default()),
        (vec![237, 142, 164, 186, 129], SymbolSize::Square12)
    );
}

#[test]
fn test_preferred_size() {
    let size = SymbolSize::from_preferred_index(5).unwrap();
    let options = EncodeOptions::default().with_preferred_size(size);
    assert_eq!(
        enc_with(b"A", &options),
        (
            vec![66, 129, 70, 220, 115, 11, 161, 56, 206, 101, 251, 147, 42, 192, 87, 237, 133, 28],
            SymbolSize::Square18
        )
    );

    let options =
        EncodeOptions::default().with_preferred_size(SymbolSize::from_preferred_index(1).unwrap());
    assert_eq!(
        encode_data(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ", &options),
        Err(EncodingError::TooLongForSize)
    );
}

#[test]
fn test_force_mode() {
    let rect = EncodeOptions::default().with_force_mode(ForceMode::Rectangular);
    assert_eq!(
        enc_with(b"123456789012", &rect),
        (
            vec![142, 164, 186, 208, 220, 142, 129, 56, 206, 101],
            SymbolSize::Rect8x32
        )
    );
    let square = EncodeOptions::default().with_force_mode(ForceMode::Square);
    assert_eq!(
        enc_with(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ1", &square),
        (
            vec![
                230, 89, 233, 109, 36, 128, 95, 147, 154, 166, 213, 186, 16, 205, 75, 224, 134,
                243, 158, 254, 129, 118
            ],
            SymbolSize::Square20
        )
    );
}

#[test]
fn test_too_long() {
    assert_eq!(
        encode_data(&[0xC0; 1600], &EncodeOptions::default()),
        Err(EncodingError::DataTooLong)
    );
    let (_, size) = enc_with(&[b'1'; 3116], &EncodeOptions::default());
    assert_eq!(size, SymbolSize::Square144);
}

// End of data cases, named after the pending state and the free capacity.

#[test]
fn test_end_c40_empty_full_symbol() {
    assert_eq!(
        enc_with(b"DAH2G0", &EncodeOptions::default()),
        (vec![230, 108, 134, 40, 165], SymbolSize::Square12)
    );
}

#[test]
fn test_end_c40_empty_with_space() {
    assert_eq!(enc(b",2EF1FD"), vec![45, 230, 40, 100, 34, 74, 254, 129]);
    assert_eq!(enc(b"1F G0G2A"), vec![230, 34, 60, 125, 181, 39, 177, 254]);
}

#[test]
fn test_end_c40_single_char() {
    // no space for the unlatch
    assert_eq!(enc(b"3CDJ!FD D"), vec![230, 46, 82, 143, 233, 121, 108, 69]);
    assert_eq!(enc(b"3AI JE0"), vec![230, 46, 7, 22, 107, 254, 49, 129]);
}

#[test]
fn test_end_c40_tail_value() {
    // the last value belongs to ",", which is written in ASCII
    assert_eq!(
        enc_with(b"DHCGJ1EC,", &EncodeOptions::default()),
        (
            vec![230, 109, 153, 128, 158, 115, 2, 45],
            SymbolSize::Square14
        )
    );
    let gs1 = EncodeOptions::default().with_data_type(DataType::Gs1);
    assert_eq!(
        enc_with(b"DHCGJ1EC,", &gs1),
        (
            vec![232, 230, 109, 153, 128, 158, 115, 2, 254, 45],
            SymbolSize::Rect8x32
        )
    );
    assert_eq!(
        enc_with(b"77M2Md49mgrlaon eh2C", &EncodeOptions::default()),
        (
            vec![207, 78, 51, 78, 239, 107, 142, 165, 192, 158, 141, 169, 75, 132, 51, 68],
            SymbolSize::Rect12x26
        )
    );
}

#[test]
fn test_end_edifact_ascii() {
    assert_eq!(enc(b"2!GJF0.,"), vec![240, 202, 17, 202, 27, 11, 172, 129]);
    assert_eq!(enc(b"H3EDF,EH!"), vec![240, 35, 49, 68, 26, 193, 72, 34]);
    assert_eq!(
        enc(b"010;.A0 .@?A"),
        vec![131, 240, 195, 187, 129, 194, 11, 128, 64, 66]
    );
}

#[test]
fn test_end_edifact_packed() {
    assert_eq!(
        enc(b"F0,B3AE,,1"),
        vec![240, 27, 11, 2, 204, 17, 108, 179, 23, 192]
    );
    assert_eq!(
        enc(b"1DI1E! G0,!"),
        vec![240, 196, 66, 113, 22, 24, 7, 194, 200, 95]
    );
}

#[test]
fn test_end_x12() {
    assert_eq!(
        enc_with(b">>AA>*", &EncodeOptions::default()),
        (vec![238, 12, 223, 87, 210], SymbolSize::Square12)
    );
    // one character and one codeword left
    assert_eq!(
        enc(b"1C\r\r2 B103"),
        vec![238, 33, 193, 0, 244, 94, 141, 52]
    );
    assert_eq!(enc(b"AA 2AC*"), vec![238, 89, 180, 39, 193, 254, 43, 129]);
    assert_eq!(enc(b"0*A*1A\r\r"), vec![238, 25, 55, 7, 23, 254, 14, 14]);
    assert_eq!(enc(b"122B\rA >>"), vec![142, 238, 39, 217, 87, 251, 254, 63]);
}
