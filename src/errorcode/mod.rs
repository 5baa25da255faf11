//! Reed-Solomon error correction codes.
//!
//! The error correction in a Data Matrix is done using Reed-Solomon codes
//! over GF(256). By putting some redundancy into the symbol a reader can
//! recover from detection or printing errors.
//!
//! Larger symbols split the data codewords into several interleaved blocks:
//! with `N` blocks, block `b` consists of the codewords `b, b + N, b + 2N, ...`.
//! Each block gets its own error correction codewords, which are again
//! interleaved with stride `N` after the data.
#[cfg(test)]
mod decoding;
mod galois;
mod reed_solomon;

use super::symbol_size::SymbolSize;

pub use galois::FIELD_POLYNOMIAL;
pub use reed_solomon::ReedSolomon;

/// Data Matrix uses a^1, a^2, ... as roots of the generator polynomial.
const FIRST_ROOT: usize = 1;

/// Offset of the check symbol `k` of `block` relative to the end of the data.
///
/// The 144x144 symbol does not follow the plain interleaving: the check
/// symbols of the first eight blocks are moved two positions back, those of
/// the last two blocks eight positions to the front.
pub(crate) fn ecc_position(block: usize, k: usize, num_blocks: usize, skew: bool) -> usize {
    let n = block + k * num_blocks;
    match (skew, block < 8) {
        (false, _) => n,
        (true, true) => n + 2,
        (true, false) => n - 8,
    }
}

/// Compute the Reed-Solomon code used by Data Matrix for error correction.
///
/// `data` must be the padded data codewords of a symbol with the given size.
/// The returned error correction codewords are to be appended to the data.
pub fn encode_error(data: &[u8], size: SymbolSize) -> Vec<u8> {
    let setup = size.block_setup();
    assert_eq!(
        data.len(),
        setup.num_data,
        "data length does not match symbol size"
    );
    let num_blocks = setup.num_ecc_blocks();
    let skew = size.has_skewed_ecc();
    let mut rs = ReedSolomon::new(setup.num_ecc_per_block, FIRST_ROOT);
    let mut full_ecc = vec![0; setup.num_ecc()];
    let mut block_data = Vec::with_capacity(setup.num_data_per_block);
    for block in 0..num_blocks {
        block_data.clear();
        block_data.extend((block..data.len()).step_by(num_blocks).map(|i| data[i]));
        rs.encode(&block_data);
        for (k, ecc) in rs.ecc().iter().enumerate() {
            full_ecc[ecc_position(block, k, num_blocks, skew)] = *ecc;
        }
    }
    full_ecc
}
