//! Settings for the encoder.
use crate::error::EncodingError;
use crate::symbol_size::{ForceMode, SymbolSize};

/// Largest ECI number which can be represented.
pub const MAX_ECI: u32 = 999_999;

/// Interpretation of the input data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DataType {
    /// Arbitrary bytes, interpreted as ISO 8859-1 unless an ECI is given.
    #[default]
    Plain,
    /// GS1 element string, the group separator (0x1D) stands for FNC1.
    Gs1,
    /// Health Industry Bar Code, a check character is computed and appended.
    Hibc,
}

/// Position of a symbol in a sequence of up to 16 symbols.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StructuredAppend {
    position: u8,
    total: u8,
    file_id: u16,
}

impl StructuredAppend {
    /// Symbol number `position` of `total`, all symbols of the sequence
    /// must share the same `file_id`.
    ///
    /// The position starts at 1, at most 16 symbols are possible. File ids
    /// range from 1 to 64516.
    pub fn new(position: u8, total: u8, file_id: u16) -> Result<Self, EncodingError> {
        if !(1..=16).contains(&position)
            || !(1..=16).contains(&total)
            || position > total
            || !(1..=64516).contains(&file_id)
        {
            return Err(EncodingError::InvalidStructuredAppend {
                position,
                total,
                file_id,
            });
        }
        Ok(Self {
            position,
            total,
            file_id,
        })
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    pub fn file_id(&self) -> u16 {
        self.file_id
    }
}

/// Options for [DataMatrix::encode](crate::DataMatrix::encode).
///
/// ```rust
/// # use ecc200::{DataType, EncodeOptions, ForceMode};
/// let options = EncodeOptions::default()
///     .with_data_type(DataType::Gs1)
///     .with_force_mode(ForceMode::Square);
/// assert!(options.is_gs1());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    data_type: DataType,
    reader_init: bool,
    eci: Option<u32>,
    structured_append: Option<StructuredAppend>,
    preferred_size: Option<SymbolSize>,
    force_mode: ForceMode,
}

impl EncodeOptions {
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Mark the symbol for reader programming.
    pub fn with_reader_init(mut self, reader_init: bool) -> Self {
        self.reader_init = reader_init;
        self
    }

    /// Declare the character set of the data, see [eci](crate::eci).
    pub fn with_eci(mut self, eci: u32) -> Self {
        self.eci = Some(eci);
        self
    }

    pub fn with_structured_append(mut self, structured_append: StructuredAppend) -> Self {
        self.structured_append = Some(structured_append);
        self
    }

    /// Use exactly this size instead of the smallest one the data fits in.
    pub fn with_preferred_size(mut self, size: SymbolSize) -> Self {
        self.preferred_size = Some(size);
        self
    }

    /// Restrict the automatic size selection to squares or rectangles.
    pub fn with_force_mode(mut self, force_mode: ForceMode) -> Self {
        self.force_mode = force_mode;
        self
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn is_gs1(&self) -> bool {
        self.data_type == DataType::Gs1
    }

    pub fn reader_init(&self) -> bool {
        self.reader_init
    }

    pub fn eci(&self) -> Option<u32> {
        self.eci
    }

    pub fn structured_append(&self) -> Option<StructuredAppend> {
        self.structured_append
    }

    pub fn preferred_size(&self) -> Option<SymbolSize> {
        self.preferred_size
    }

    pub fn force_mode(&self) -> ForceMode {
        self.force_mode
    }

    /// Check for conflicting settings.
    pub fn validate(&self) -> Result<(), EncodingError> {
        if self.is_gs1() && self.reader_init {
            return Err(EncodingError::Gs1WithReaderInit);
        }
        match self.eci {
            Some(eci) if eci > MAX_ECI => Err(EncodingError::InvalidEci(eci)),
            _ => Ok(()),
        }
    }
}
