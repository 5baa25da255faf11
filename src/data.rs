//! Data part encoding
//!
//! The bytes encoded into a Data Matrix symbol consist of two parts,
//! the first part is the actual information one wants to encode,
//! the second part error correction bytes.
//!
//! The function in this module computes the first part, the data
//! codewords including padding, together with the chosen symbol size.
//! It is useful to inspect the encodation on a lower level, most users
//! want [DataMatrix::encode](crate::DataMatrix::encode) instead.
use std::borrow::Cow;

use flagset::FlagSet;

use crate::encodation::{self, pad};
pub use crate::encodation::EncodationType;
use crate::error::EncodingError;
use crate::hibc;
use crate::options::{DataType, EncodeOptions};
use crate::symbol_size::{select_size, SymbolSize};

/// Data codewords of a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedData {
    /// Data codewords, padded to the capacity of `symbol_size`.
    pub codewords: Vec<u8>,
    pub symbol_size: SymbolSize,
    /// Modes used by the encodation, always includes ASCII.
    pub used: FlagSet<EncodationType>,
}

/// Encode input to data codewords for Data Matrix.
pub fn encode_data(data: &[u8], options: &EncodeOptions) -> Result<EncodedData, EncodingError> {
    options.validate()?;
    let data: Cow<[u8]> = match options.data_type() {
        DataType::Hibc => Cow::Owned(hibc::prepare(data)?),
        _ => Cow::Borrowed(data),
    };
    let encoded = encodation::encode(&data, options)?;
    let symbol_size = select_size(
        encoded.min_codewords(),
        options.preferred_size(),
        options.force_mode(),
    )?;
    let capacity = symbol_size.num_data_codewords();
    let mut codewords = encoded.codewords;
    let left = capacity - codewords.len();
    encoded.remainder.finish(&mut codewords, left);
    pad(&mut codewords, capacity);
    debug_assert_eq!(codewords.len(), capacity);
    Ok(EncodedData {
        codewords,
        symbol_size,
        used: encoded.used,
    })
}
