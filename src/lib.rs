//! Data Matrix (ECC 200) encoder.
//!
//! The encodation mode is switched with the look-ahead algorithm of
//! ISO/IEC 16022 Annex P, the smallest symbol the result fits in is picked
//! unless a size is requested.
//!
//! ```rust
//! use ecc200::{DataMatrix, EncodeOptions, SymbolSize};
//!
//! let code = DataMatrix::encode(b"Hello, World!", &EncodeOptions::default()).unwrap();
//! assert_eq!(code.size(), SymbolSize::Square16);
//! print!("{}", code.bitmap().unicode());
//! ```
mod encodation;
pub mod eci;
mod error;
pub mod errorcode;
mod hibc;
mod options;
pub mod placement;
mod symbol_size;

pub mod data;

use flagset::FlagSet;

pub use encodation::EncodationType;
pub use error::EncodingError;
pub use options::{DataType, EncodeOptions, StructuredAppend};
pub use symbol_size::{ForceMode, SymbolSize};

use placement::{Bitmap, PlacementMap};

/// An encoded Data Matrix symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMatrix {
    size: SymbolSize,
    data: Vec<u8>,
    ecc: Vec<u8>,
    bitmap: Bitmap,
    used: FlagSet<EncodationType>,
}

impl DataMatrix {
    /// Encode the data as a Data Matrix ECC200.
    pub fn encode(data: &[u8], options: &EncodeOptions) -> Result<Self, EncodingError> {
        let encoded = data::encode_data(data, options)?;
        let size = encoded.symbol_size;
        let ecc = errorcode::encode_error(&encoded.codewords, size);
        let mut codewords = encoded.codewords.clone();
        codewords.extend_from_slice(&ecc);
        let bitmap = PlacementMap::for_size(size).bitmap(&codewords, size);
        Ok(Self {
            size,
            data: encoded.codewords,
            ecc,
            bitmap,
            used: encoded.used,
        })
    }

    /// Encode a string, picking a character set with [eci::encode_str].
    ///
    /// An ECI set in `options` is replaced.
    pub fn encode_str(text: &str, options: &EncodeOptions) -> Result<Self, EncodingError> {
        let (bytes, eci) = eci::encode_str(text);
        Self::encode(&bytes, &options.clone().with_eci(eci))
    }

    pub fn size(&self) -> SymbolSize {
        self.size
    }

    /// Data codewords, including padding.
    pub fn data_codewords(&self) -> &[u8] {
        &self.data
    }

    /// Error correction codewords, interleaved as placed in the symbol.
    pub fn ecc_codewords(&self) -> &[u8] {
        &self.ecc
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// One string per row, see [Bitmap::pattern].
    pub fn pattern(&self) -> Vec<String> {
        self.bitmap.pattern()
    }

    /// Human readable text printed along the symbol, always empty.
    pub fn readable(&self) -> &str {
        ""
    }

    pub fn row_count(&self) -> usize {
        self.bitmap.height()
    }

    /// Height of each row in modules.
    pub fn row_heights(&self) -> Vec<usize> {
        vec![1; self.row_count()]
    }

    /// Short description of the symbol.
    pub fn info(&self) -> String {
        format!(
            "Grid size: {} x {}, data codewords: {}, error correction codewords: {}",
            self.size.width(),
            self.size.height(),
            self.data.len(),
            self.ecc.len()
        )
    }

    /// Encodation modes which appear in the symbol.
    pub fn encodation_types(&self) -> FlagSet<EncodationType> {
        self.used
    }
}

/// Encode the data as a Data Matrix ECC200 and return the modules.
pub fn encode(data: &[u8], options: &EncodeOptions) -> Result<Bitmap, EncodingError> {
    DataMatrix::encode(data, options).map(|code| code.bitmap)
}
