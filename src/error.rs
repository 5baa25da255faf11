//! Errors reported by the encoder.
use thiserror::Error;

/// The reasons an encoding can fail.
///
/// Nothing is retried internally. Either a complete symbol is produced or
/// one of these errors is returned and the caller has to change the input
/// or the [options](crate::EncodeOptions).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The data needs more codewords than the largest symbol (or the
    /// largest symbol allowed by the force mode) can hold.
    #[error("Data too long to fit in symbol")]
    DataTooLong,

    /// The data does not fit into the preferred symbol size.
    #[error("Input too long for selected symbol size")]
    TooLongForSize,

    #[error("Cannot encode in GS1 mode and Reader Initialisation at the same time")]
    Gs1WithReaderInit,

    #[error("Invalid structured append: position {position} of {total}, file id {file_id}")]
    InvalidStructuredAppend {
        position: u8,
        total: u8,
        file_id: u16,
    },

    #[error("Invalid ECI mode {0}")]
    InvalidEci(u32),

    /// Preferred sizes are numbered 1 to 30.
    #[error("Invalid preferred symbol size {0}")]
    InvalidPreferredSize(usize),

    #[error("Invalid HIBC data: {0}")]
    InvalidHibc(&'static str),
}
