//! Systematic Reed-Solomon encoder over GF(256).
use super::galois::GF;

/// Reed-Solomon encoder for a fixed number of check symbols.
///
/// The generator polynomial is
///
/// > g(x) = (x - a^r) (x - a^(r+1)) ... (x - a^(r+k-1))
///
/// with `a` the primitive element, `r` the first root and `k` the number
/// of check symbols. Data Matrix uses `r = 1`.
///
/// The encoder keeps the check symbols of the last [encode](Self::encode)
/// call, so one instance can be reused for all blocks of a symbol.
#[derive(Debug, Clone)]
pub struct ReedSolomon {
    /// Coefficients of g, highest degree first, leading 1 included
    generator: Vec<GF>,
    /// Working buffer, one longer than the number of check symbols
    ecc: Vec<u8>,
}

impl ReedSolomon {
    pub fn new(ecc_len: usize, first_root: usize) -> Self {
        let mut generator = Vec::with_capacity(ecc_len + 1);
        generator.push(GF(1));
        for i in 0..ecc_len {
            let root = GF::primitive_power(first_root + i);
            // multiply by (x + root)
            generator.push(GF(0));
            for j in (1..generator.len()).rev() {
                let prev = generator[j - 1];
                generator[j] += root * prev;
            }
        }
        Self {
            generator,
            ecc: vec![0; ecc_len + 1],
        }
    }

    /// Number of check symbols.
    pub fn ecc_len(&self) -> usize {
        self.generator.len() - 1
    }

    /// Coefficients of the generator polynomial, highest degree first.
    pub fn generator(&self) -> impl Iterator<Item = u8> + '_ {
        self.generator.iter().map(|g| g.0)
    }

    /// Compute the check symbols for `data`.
    pub fn encode(&mut self, data: &[u8]) {
        // Polynomial division of d(x) * x^k by g(x). The remainder r(x)
        // is accumulated in `ecc` (highest coefficient first). Then
        // d(x) * x^k - r(x) is a multiple of g and -r = r are the check symbols.
        let k = self.ecc_len();
        self.ecc.iter_mut().for_each(|e| *e = 0);
        for a in data.iter().cloned() {
            let m = GF(self.ecc[0]) + GF(a);
            for j in 0..k {
                self.ecc[j] = (GF(self.ecc[j + 1]) + m * self.generator[j + 1]).into();
            }
        }
    }

    /// Get the check symbol `index` of the last [encode](Self::encode) call.
    ///
    /// Index 0 is the coefficient of the highest power, so the check symbols
    /// are returned in the order they follow the data.
    pub fn result(&self, index: usize) -> u8 {
        self.ecc[index]
    }

    /// All check symbols of the last [encode](Self::encode) call.
    pub fn ecc(&self) -> &[u8] {
        &self.ecc[..self.ecc_len()]
    }
}
