use crate::error::EncodingError;

#[cfg(test)]
use enum_iterator::{all, Sequence};

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Restriction on the shape of automatically chosen symbols.
///
/// Only used if no preferred [SymbolSize] is given.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ForceMode {
    /// Pick the smallest symbol, square or rectangular.
    #[default]
    None,
    /// Only consider square symbols.
    Square,
    /// Only consider rectangular symbols.
    Rectangular,
}

/// Geometry and codeword layout of one symbol size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockSetup {
    /// Total height of the symbol including alignment patterns but not quiet zone
    pub(crate) height: usize,
    /// Total width of the symbol including alignment patterns but not quiet zone
    pub(crate) width: usize,
    /// Height of one data region including its finder and timing pattern
    pub(crate) region_height: usize,
    /// Width of one data region including its finder and timing pattern
    pub(crate) region_width: usize,
    /// Number of data codewords in the whole symbol
    pub(crate) num_data: usize,
    /// Number of data codewords per interleaved block (the last blocks of
    /// 144x144 hold one less)
    pub(crate) num_data_per_block: usize,
    /// Number of error correction codewords per block
    pub(crate) num_ecc_per_block: usize,
}

impl BlockSetup {
    /// Number of interleaved error correction blocks.
    pub(crate) fn num_ecc_blocks(&self) -> usize {
        (self.num_data + 2) / self.num_data_per_block
    }

    pub(crate) fn num_ecc(&self) -> usize {
        self.num_ecc_blocks() * self.num_ecc_per_block
    }

    /// Number of rows used for data, without finder and timing patterns.
    pub(crate) fn content_height(&self) -> usize {
        self.height - 2 * (self.height / self.region_height)
    }

    /// Number of columns used for data, without finder and timing patterns.
    pub(crate) fn content_width(&self) -> usize {
        self.width - 2 * (self.width / self.region_width)
    }
}

const fn setup(
    height: usize,
    width: usize,
    region_height: usize,
    region_width: usize,
    num_data: usize,
    num_data_per_block: usize,
    num_ecc_per_block: usize,
) -> BlockSetup {
    BlockSetup {
        height,
        width,
        region_height,
        region_width,
        num_data,
        num_data_per_block,
        num_ecc_per_block,
    }
}

/// Size table, in the same order as [SymbolSize] is declared.
#[rustfmt::skip]
const SETUPS: [BlockSetup; 30] = [
    setup(10, 10, 10, 10, 3, 3, 5),
    setup(12, 12, 12, 12, 5, 5, 7),
    setup(8, 18, 8, 18, 5, 5, 7),
    setup(14, 14, 14, 14, 8, 8, 10),
    setup(8, 32, 8, 16, 10, 10, 11),
    setup(16, 16, 16, 16, 12, 12, 12),
    setup(12, 26, 12, 26, 16, 16, 14),
    setup(18, 18, 18, 18, 18, 18, 14),
    setup(20, 20, 20, 20, 22, 22, 18),
    setup(12, 36, 12, 18, 22, 22, 18),
    setup(22, 22, 22, 22, 30, 30, 20),
    setup(16, 36, 16, 18, 32, 32, 24),
    setup(24, 24, 24, 24, 36, 36, 24),
    setup(26, 26, 26, 26, 44, 44, 28),
    setup(16, 48, 16, 24, 49, 49, 28),
    setup(32, 32, 16, 16, 62, 62, 36),
    setup(36, 36, 18, 18, 86, 86, 42),
    setup(40, 40, 20, 20, 114, 114, 48),
    setup(44, 44, 22, 22, 144, 144, 56),
    setup(48, 48, 24, 24, 174, 174, 68),
    setup(52, 52, 26, 26, 204, 102, 42),
    setup(64, 64, 16, 16, 280, 140, 56),
    setup(72, 72, 18, 18, 368, 92, 36),
    setup(80, 80, 20, 20, 456, 114, 48),
    setup(88, 88, 22, 22, 576, 144, 56),
    setup(96, 96, 24, 24, 696, 174, 68),
    setup(104, 104, 26, 26, 816, 136, 56),
    setup(120, 120, 20, 20, 1050, 175, 68),
    setup(132, 132, 22, 22, 1304, 163, 62),
    setup(144, 144, 24, 24, 1558, 156, 62),
];

/// Maximum number of data codewords a symbol can hold.
pub(crate) const MAX_DATA_CODEWORDS: usize = 1558;

/// The symbol sizes supported by Data Matrix ECC 200.
///
/// The number behind a variant, e.g., [Square10](SymbolSize::Square10),
/// describes the number of modules (the tiny black squares) the symbol is
/// tall/wide. The variants are declared in order of increasing capacity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Sequence))]
pub enum SymbolSize {
    Square10,
    Square12,
    Rect8x18,
    Square14,
    Rect8x32,
    Square16,
    Rect12x26,
    Square18,
    Square20,
    Rect12x36,
    Square22,
    Rect16x36,
    Square24,
    Square26,
    Rect16x48,
    Square32,
    Square36,
    Square40,
    Square44,
    Square48,
    Square52,
    Square64,
    Square72,
    Square80,
    Square88,
    Square96,
    Square104,
    Square120,
    Square132,
    Square144,
}

/// All symbol sizes in order of increasing capacity.
pub(crate) const SYMBOL_SIZES: [SymbolSize; 30] = [
    SymbolSize::Square10,
    SymbolSize::Square12,
    SymbolSize::Rect8x18,
    SymbolSize::Square14,
    SymbolSize::Rect8x32,
    SymbolSize::Square16,
    SymbolSize::Rect12x26,
    SymbolSize::Square18,
    SymbolSize::Square20,
    SymbolSize::Rect12x36,
    SymbolSize::Square22,
    SymbolSize::Rect16x36,
    SymbolSize::Square24,
    SymbolSize::Square26,
    SymbolSize::Rect16x48,
    SymbolSize::Square32,
    SymbolSize::Square36,
    SymbolSize::Square40,
    SymbolSize::Square44,
    SymbolSize::Square48,
    SymbolSize::Square52,
    SymbolSize::Square64,
    SymbolSize::Square72,
    SymbolSize::Square80,
    SymbolSize::Square88,
    SymbolSize::Square96,
    SymbolSize::Square104,
    SymbolSize::Square120,
    SymbolSize::Square132,
    SymbolSize::Square144,
];

/// Position in [SYMBOL_SIZES] for the preferred size numbers 1 to 30.
///
/// Squares come first, then the rectangles.
const PREFERRED_INDEX: [usize; 30] = [
    0, 1, 3, 5, 7, 8, 10, 12, 13, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 2, 4,
    6, 9, 11, 14,
];

impl SymbolSize {
    /// Get the size for a preferred size number.
    ///
    /// The numbers 1 to 24 are the square sizes from 10x10 to 144x144,
    /// 25 to 30 the rectangles from 8x18 to 16x48.
    pub fn from_preferred_index(n: usize) -> Result<Self, EncodingError> {
        n.checked_sub(1)
            .and_then(|i| PREFERRED_INDEX.get(i))
            .map(|i| SYMBOL_SIZES[*i])
            .ok_or(EncodingError::InvalidPreferredSize(n))
    }

    pub(crate) fn block_setup(&self) -> BlockSetup {
        SETUPS[*self as usize]
    }

    /// Number of codewords available for data.
    pub fn num_data_codewords(&self) -> usize {
        self.block_setup().num_data
    }

    /// Number of error correction codewords.
    pub fn num_ecc_codewords(&self) -> usize {
        self.block_setup().num_ecc()
    }

    /// Number of codewords, data and error correction.
    pub fn num_codewords(&self) -> usize {
        self.num_data_codewords() + self.num_ecc_codewords()
    }

    /// Width in modules, without quiet zone.
    pub fn width(&self) -> usize {
        self.block_setup().width
    }

    /// Height in modules, without quiet zone.
    pub fn height(&self) -> usize {
        self.block_setup().height
    }

    pub fn is_square(&self) -> bool {
        let setup = self.block_setup();
        setup.width == setup.height
    }

    /// The symbols with four modules in the lower right corner
    /// not covered by any codeword.
    #[cfg(test)]
    pub(crate) fn has_padding_modules(&self) -> bool {
        matches!(
            self,
            Self::Square12 | Self::Square16 | Self::Square20 | Self::Square24
        )
    }

    /// The 144x144 symbol places its error correction codewords slightly
    /// differently than all others.
    pub(crate) fn has_skewed_ecc(&self) -> bool {
        matches!(self, Self::Square144)
    }
}

/// Pick the symbol size for `needed` data codewords.
///
/// A preferred size is used as is if the data fits, the force mode is
/// then ignored. Without a preferred size the smallest symbol in table order
/// is chosen which holds the data and satisfies the force mode.
pub(crate) fn select_size(
    needed: usize,
    preferred: Option<SymbolSize>,
    force: ForceMode,
) -> Result<SymbolSize, EncodingError> {
    if let Some(size) = preferred {
        return if size.num_data_codewords() >= needed {
            Ok(size)
        } else {
            Err(EncodingError::TooLongForSize)
        };
    }
    SYMBOL_SIZES
        .iter()
        .filter(|s| match force {
            ForceMode::None => true,
            ForceMode::Square => s.is_square(),
            ForceMode::Rectangular => !s.is_square(),
        })
        .find(|s| s.num_data_codewords() >= needed)
        .cloned()
        .ok_or(EncodingError::DataTooLong)
}

#[test]
fn test_iter_all_symbols() {
    let all: Vec<SymbolSize> = all::<SymbolSize>().collect();
    assert_eq!(&all, &SYMBOL_SIZES);
}

#[test]
fn test_table_order_by_capacity() {
    let mut last = 0;
    for size in SYMBOL_SIZES {
        let new = size.num_data_codewords();
        assert!(new >= last, "{:?}", size);
        last = new;
    }
    assert_eq!(last, MAX_DATA_CODEWORDS);
}

#[test]
fn test_content_sizes_consistency() {
    for size in all::<SymbolSize>() {
        let setup = size.block_setup();
        let padding = if size.has_padding_modules() { 4 } else { 0 };
        let len = size.num_codewords() * 8 + padding;
        assert_eq!(
            len,
            setup.content_width() * setup.content_height(),
            "{:?}",
            size
        );
        assert_eq!(setup.width % setup.region_width, 0);
        assert_eq!(setup.height % setup.region_height, 0);
    }
}

#[test]
fn test_blocks_cover_data() {
    for size in all::<SymbolSize>() {
        let setup = size.block_setup();
        let blocks = setup.num_ecc_blocks();
        assert!(blocks >= 1);
        if size.has_skewed_ecc() {
            assert_eq!(blocks, 10);
            assert_eq!(blocks * setup.num_data_per_block, setup.num_data + 2);
        } else {
            assert_eq!(blocks * setup.num_data_per_block, setup.num_data);
        }
    }
}

#[test]
fn test_ecc_counts() {
    assert_eq!(SymbolSize::Square10.num_ecc_codewords(), 5);
    assert_eq!(SymbolSize::Rect8x32.num_ecc_codewords(), 11);
    assert_eq!(SymbolSize::Square52.num_ecc_codewords(), 84);
    assert_eq!(SymbolSize::Square144.num_ecc_codewords(), 620);
    assert_eq!(SymbolSize::Square144.num_codewords(), 2178);
}

#[test]
fn test_distinguishable_by_size() {
    use std::collections::BTreeSet;

    let sizes: BTreeSet<(usize, usize)> = SYMBOL_SIZES
        .iter()
        .map(|s| (s.width(), s.height()))
        .collect();
    assert_eq!(sizes.len(), SYMBOL_SIZES.len());
}

#[test]
fn test_preferred_index() {
    assert_eq!(
        SymbolSize::from_preferred_index(1),
        Ok(SymbolSize::Square10)
    );
    assert_eq!(
        SymbolSize::from_preferred_index(24),
        Ok(SymbolSize::Square144)
    );
    assert_eq!(
        SymbolSize::from_preferred_index(25),
        Ok(SymbolSize::Rect8x18)
    );
    assert_eq!(
        SymbolSize::from_preferred_index(30),
        Ok(SymbolSize::Rect16x48)
    );
    assert_eq!(
        SymbolSize::from_preferred_index(0),
        Err(EncodingError::InvalidPreferredSize(0))
    );
    assert_eq!(
        SymbolSize::from_preferred_index(31),
        Err(EncodingError::InvalidPreferredSize(31))
    );
    let squares = (1..=24)
        .map(|i| SymbolSize::from_preferred_index(i).unwrap())
        .all(|s| s.is_square());
    assert!(squares);
}

#[test]
fn test_select_smallest() {
    assert_eq!(select_size(0, None, ForceMode::None), Ok(SymbolSize::Square10));
    assert_eq!(select_size(5, None, ForceMode::None), Ok(SymbolSize::Square12));
    assert_eq!(select_size(6, None, ForceMode::None), Ok(SymbolSize::Square14));
    assert_eq!(
        select_size(1558, None, ForceMode::None),
        Ok(SymbolSize::Square144)
    );
    assert_eq!(
        select_size(1559, None, ForceMode::None),
        Err(EncodingError::DataTooLong)
    );
}

#[test]
fn test_select_forced_shape() {
    assert_eq!(
        select_size(5, None, ForceMode::Rectangular),
        Ok(SymbolSize::Rect8x18)
    );
    assert_eq!(
        select_size(11, None, ForceMode::Rectangular),
        Ok(SymbolSize::Rect12x26)
    );
    assert_eq!(
        select_size(50, None, ForceMode::Rectangular),
        Err(EncodingError::DataTooLong)
    );
    assert_eq!(
        select_size(9, None, ForceMode::Square),
        Ok(SymbolSize::Square16)
    );
}

#[test]
fn test_select_preferred() {
    // preferred size wins even if bigger, and the force mode is ignored
    assert_eq!(
        select_size(3, Some(SymbolSize::Square20), ForceMode::Rectangular),
        Ok(SymbolSize::Square20)
    );
    assert_eq!(
        select_size(5, Some(SymbolSize::Rect8x18), ForceMode::None),
        Ok(SymbolSize::Rect8x18)
    );
    assert_eq!(
        select_size(6, Some(SymbolSize::Rect8x18), ForceMode::None),
        Err(EncodingError::TooLongForSize)
    );
}
