//! Health Industry Bar Code (HIBC) data preparation.
//!
//! HIBC data uses the Code 39 character subset. It is prefixed with `+`
//! and terminated by a modulo 43 check character.
use crate::error::EncodingError;

/// Longest HIBC data without prefix and check character.
pub const MAX_LEN: usize = 110;

const CHARSET: &[u8; 43] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

fn index(ch: u8) -> Option<usize> {
    CHARSET.iter().position(|c| *c == ch)
}

/// Convert to upper case, validate and add prefix and check character.
pub fn prepare(data: &[u8]) -> Result<Vec<u8>, EncodingError> {
    if data.len() > MAX_LEN {
        return Err(EncodingError::InvalidHibc("data too long"));
    }
    let mut out = Vec::with_capacity(data.len() + 2);
    out.push(b'+');
    // the prefix counts for the check sum
    let mut sum = CHARSET.len() - 2;
    for ch in data.iter().map(u8::to_ascii_uppercase) {
        sum += index(ch).ok_or(EncodingError::InvalidHibc("invalid character"))?;
        out.push(ch);
    }
    out.push(CHARSET[sum % CHARSET.len()]);
    Ok(out)
}
