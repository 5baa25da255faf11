//! Codewords in front of the data: structured append, FNC1, reader
//! programming, ECI and the 05/06 macros.
use super::ascii::FNC1;
use crate::options::EncodeOptions;

const STRUCTURED_APPEND: u8 = 233;
const READER_PROGRAMMING: u8 = 234;
const MACRO05: u8 = 236;
const MACRO06: u8 = 237;
const ECI: u8 = 241;

/// ECI which needs no designator, it is the default interpretation.
pub(crate) const DEFAULT_ECI: u32 = 3;

const MACRO_HEADER: &[u8; 5] = b"[)>\x1e0";
const MACRO_TRAILER: &[u8; 2] = b"\x1e\x04";

/// Codewords for an ECI designator, one to three of them.
pub(crate) fn eci_codewords(eci: u32) -> Vec<u8> {
    if eci <= 126 {
        vec![(eci + 1) as u8]
    } else if eci <= 16382 {
        vec![((eci - 127) / 254 + 128) as u8, ((eci - 127) % 254 + 1) as u8]
    } else {
        vec![
            ((eci - 16383) / 64516 + 192) as u8,
            ((eci - 16383) / 254 % 254 + 1) as u8,
            ((eci - 16383) % 254 + 1) as u8,
        ]
    }
}

/// Detect a "[)>RS05GS...RSEOT" or "[)>RS06GS...RSEOT" message.
///
/// Returns the macro codeword and the data between header and trailer.
fn macro_content(data: &[u8]) -> Option<(u8, &[u8])> {
    if data.len() < 9 || !data.starts_with(MACRO_HEADER) || !data.ends_with(MACRO_TRAILER) {
        return None;
    }
    let codeword = match data[5] {
        b'5' => MACRO05,
        b'6' => MACRO06,
        _ => return None,
    };
    if data[6] != 0x1D {
        return None;
    }
    Some((codeword, &data[7..data.len() - 2]))
}

/// Write the header codewords and return the data left to encode.
pub(super) fn write<'a>(data: &'a [u8], options: &EncodeOptions, out: &mut Vec<u8>) -> &'a [u8] {
    let len_before = out.len();
    if let Some(sa) = options.structured_append().filter(|sa| sa.total() != 1) {
        let file_id = sa.file_id() - 1;
        out.push(STRUCTURED_APPEND);
        out.push(((sa.position() - 1) << 4) | (17 - sa.total()));
        out.push((file_id / 254 + 1) as u8);
        out.push((file_id % 254 + 1) as u8);
    }
    if options.is_gs1() {
        out.push(FNC1);
    }
    if options.reader_init() {
        out.push(READER_PROGRAMMING);
    }
    if let Some(eci) = options.eci().filter(|eci| *eci != DEFAULT_ECI) {
        out.push(ECI);
        out.extend(eci_codewords(eci));
    }
    // a macro must be the first codeword of the symbol
    if out.len() == len_before {
        if let Some((codeword, content)) = macro_content(data) {
            out.push(codeword);
            return content;
        }
    }
    data
}
