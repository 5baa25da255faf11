//! Arithmetic in GF(256) as used by the Data Matrix Reed-Solomon code.
//!
//! An element is stored as a `u8` whose bits are the coefficients of a
//! polynomial of degree at most 7, the least significant bit being the
//! constant term. Addition is XOR. Multiplication is done modulo the field
//! polynomial x^8 + x^5 + x^3 + x^2 + 1 (0x12D), for which x is a primitive
//! element, so every non-zero element is a power of x and products
//! can be computed by adding exponents.
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// The field polynomial of Data Matrix.
pub const FIELD_POLYNOMIAL: u16 = 0x12D;

/// Compute the power (anti log) and log tables for the field defined by `poly`.
const fn compute_alog_log(poly: u16) -> ([u8; 255], [u8; 256]) {
    let mut alog = [0u8; 255];
    let mut log = [0u8; 256];
    let mut p: u16 = 1;
    let mut i = 0;
    while i < 255 {
        alog[i] = p as u8;
        log[p as usize] = i as u8;
        p <<= 1;
        if p & 0x100 != 0 {
            p ^= poly;
        }
        i += 1;
    }
    (alog, log)
}

const TABLES: ([u8; 255], [u8; 256]) = compute_alog_log(FIELD_POLYNOMIAL);

/// x^i for i = 0, ..., 254.
const ANTI_LOG: [u8; 255] = TABLES.0;

/// Inverse of [ANTI_LOG] on the non-zero elements.
const LOG: [u8; 256] = TABLES.1;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GF(pub u8);

impl GF {
    /// x^i, the exponent is taken modulo 255.
    pub fn primitive_power(i: usize) -> Self {
        GF(ANTI_LOG[i % 255])
    }

    /// The exponent i with x^i = self.
    ///
    /// # Panics
    ///
    /// For zero, which is not a power of x.
    pub fn log(self) -> usize {
        assert!(self.0 != 0, "log of 0");
        LOG[self.0 as usize] as usize
    }

    pub fn pow(self, n: usize) -> Self {
        if self.0 == 0 {
            return if n == 0 { GF(1) } else { GF(0) };
        }
        Self::primitive_power(self.log() * n)
    }
}

impl std::fmt::Debug for GF {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}₂₅₆", self.0)
    }
}

impl Add for GF {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self {
        GF(self.0 ^ rhs.0)
    }
}

impl AddAssign for GF {
    fn add_assign(&mut self, rhs: GF) {
        *self = *self + rhs;
    }
}

impl Sub for GF {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: Self) -> Self {
        self + rhs
    }
}

impl SubAssign for GF {
    fn sub_assign(&mut self, rhs: GF) {
        *self = *self - rhs;
    }
}

impl Mul for GF {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return GF(0);
        }
        Self::primitive_power(self.log() + rhs.log())
    }
}

impl MulAssign for GF {
    fn mul_assign(&mut self, rhs: GF) {
        *self = *self * rhs;
    }
}

impl Div for GF {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        assert_ne!(rhs.0, 0, "division by zero");
        if self.0 == 0 {
            return GF(0);
        }
        Self::primitive_power(self.log() + 255 - rhs.log())
    }
}

impl DivAssign for GF {
    fn div_assign(&mut self, rhs: GF) {
        *self = *self / rhs;
    }
}

impl From<GF> for u8 {
    fn from(a: GF) -> u8 {
        a.0
    }
}

impl From<u8> for GF {
    fn from(i: u8) -> Self {
        GF(i)
    }
}

impl Sum for GF {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(GF(0), |a, b| a + b)
    }
}

#[test]
fn sanity_check_tables() {
    use std::collections::HashSet;

    let anti_log: HashSet<u8> = ANTI_LOG.iter().cloned().collect();
    assert_eq!(anti_log.len(), ANTI_LOG.len());
    assert!(!anti_log.contains(&0));

    for i in 0..255 {
        assert_eq!(i, LOG[ANTI_LOG[i] as usize] as usize);
        assert_eq!(i + 1, ANTI_LOG[LOG[i + 1] as usize] as usize);
    }
}

#[test]
fn gf256_mul() {
    assert_eq!(GF(123) * GF(1), GF(123));
    assert_eq!(GF(234) * GF(0), GF(0));
    assert_eq!(GF(0) * GF(23), GF(0));
    assert_eq!(GF(2) * GF(4) * GF(8) * GF(16) * GF(32), GF(228));
    // x^8 reduces to x^5 + x^3 + x^2 + 1
    assert_eq!(GF(128) * GF(2), GF(0x2D));
}

#[test]
fn gf256_div_mul() {
    for a in 0..=255 {
        for b in 1..=255 {
            let a_div_b = GF(a) / GF(b);
            assert_eq!(a_div_b * GF(b), GF(a));
        }
    }
}

#[test]
fn gf256_pow() {
    let mut a = GF(1);
    for i in 0..300 {
        assert_eq!(GF(2).pow(i), a);
        assert_eq!(GF::primitive_power(i), a);
        a *= GF(2);
    }
    assert_eq!(GF(0).pow(0), GF(1));
    assert_eq!(GF(0).pow(3), GF(0));
    assert_eq!(GF(7).pow(255), GF(1));
}
