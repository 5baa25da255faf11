//! Pick a character set for text and convert it.
//!
//! Data Matrix interprets data as ISO 8859-1 by default. Other character
//! sets are announced with an ECI designator, see
//! [EncodeOptions::with_eci](crate::EncodeOptions::with_eci).
//!
//! ```rust
//! # use ecc200::{eci, DataMatrix, EncodeOptions};
//! let (bytes, eci) = eci::encode_str("Grüße");
//! assert_eq!(eci, eci::LATIN1);
//! let code = DataMatrix::encode(&bytes, &EncodeOptions::default().with_eci(eci)).unwrap();
//! ```
//!
//! With the feature `extended_eci` more character sets are considered
//! before UTF-8 is used.

/// ECI for ISO 8859-1, the default interpretation.
pub const LATIN1: u32 = 3;

/// ECI for UTF-8.
pub const UTF8: u32 = 26;

fn encode_latin1(text: &str) -> Option<Vec<u8>> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).ok())
        .collect()
}

/// Convert `text` into the first character set which can represent it.
///
/// Returns the bytes and the ECI of the character set. ISO 8859-1 is
/// tried first, UTF-8 is the fallback.
pub fn encode_str(text: &str) -> (Vec<u8>, u32) {
    if let Some(bytes) = encode_latin1(text) {
        return (bytes, LATIN1);
    }
    if let Some(found) = encode_extended(text) {
        return found;
    }
    (text.as_bytes().to_vec(), UTF8)
}

#[cfg(feature = "extended_eci")]
fn encode_extended(text: &str) -> Option<(Vec<u8>, u32)> {
    use encoding_rs::*;

    // ISO 8859-9 and 8859-11 are not available in encoding_rs
    let candidates = [
        (4, ISO_8859_2),
        (5, ISO_8859_3),
        (6, ISO_8859_4),
        (7, ISO_8859_5),
        (8, ISO_8859_6),
        (9, ISO_8859_7),
        (10, ISO_8859_8),
        (12, ISO_8859_10),
        (15, ISO_8859_13),
        (16, ISO_8859_14),
        (17, ISO_8859_15),
        (18, ISO_8859_16),
        (20, SHIFT_JIS),
        (21, WINDOWS_1250),
        (22, WINDOWS_1251),
        (23, WINDOWS_1252),
        (24, WINDOWS_1256),
        (28, BIG5),
        (29, GB18030),
        (30, EUC_KR),
    ];
    candidates.iter().find_map(|(eci, encoding)| {
        let (bytes, _, had_errors) = encoding.encode(text);
        (!had_errors).then(|| (bytes.into_owned(), *eci))
    })
}

#[cfg(not(feature = "extended_eci"))]
fn encode_extended(_text: &str) -> Option<(Vec<u8>, u32)> {
    None
}
