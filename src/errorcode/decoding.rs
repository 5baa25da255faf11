//! Reference Reed-Solomon decoder, used to check the encoder.
//!
//! Peterson-Gorenstein-Zierler: syndromes, error locator from the syndrome
//! matrix, roots by exhaustive search, error values from the Vandermonde
//! system. Slow but short, which is all the tests need.
use super::galois::GF;

#[derive(Debug, PartialEq, Eq)]
pub enum DecodingError {
    TooManyErrors,
    /// Error locations were found outside of the block.
    ErrorsOutsideRange,
}

/// Correct `block` (data followed by `ecc_len` check symbols) in place.
pub fn decode(block: &mut [u8], ecc_len: usize) -> Result<(), DecodingError> {
    let n = block.len();
    let syndromes: Vec<GF> = (1..=ecc_len).map(|j| evaluate(block, j)).collect();
    if syndromes.iter().all(|s| *s == GF(0)) {
        return Ok(());
    }

    let locator = error_locator(&syndromes)?;

    // positions as powers of a, counted from the end of the block
    let positions: Vec<usize> = (0..255)
        .filter(|i| horner(&locator, GF::primitive_power(*i)) == GF(0))
        .map(|i| (255 - i) % 255)
        .collect();
    if positions.len() + 1 != locator.len() {
        return Err(DecodingError::TooManyErrors);
    }
    if positions.iter().any(|p| *p >= n) {
        return Err(DecodingError::ErrorsOutsideRange);
    }

    // S_j = sum_l Y_l X_l^j
    let v = positions.len();
    let mut matrix = vec![GF(0); v * v];
    for j in 0..v {
        for (l, p) in positions.iter().enumerate() {
            matrix[j * v + l] = GF::primitive_power(*p * (j + 1));
        }
    }
    let mut values: Vec<GF> = syndromes[..v].into();
    if !solve(&mut matrix, &mut values, v) {
        return Err(DecodingError::TooManyErrors);
    }
    for (p, y) in positions.iter().zip(values) {
        let idx = n - 1 - p;
        block[idx] = (GF(block[idx]) - y).into();
    }
    Ok(())
}

/// Evaluate the block polynomial at a^j.
fn evaluate(block: &[u8], j: usize) -> GF {
    let x = GF::primitive_power(j);
    block.iter().fold(GF(0), |acc, c| acc * x + GF(*c))
}

fn horner(coeff: &[GF], x: GF) -> GF {
    coeff.iter().fold(GF(0), |acc, c| acc * x + *c)
}

/// Error locator polynomial, highest degree first, constant term 1.
fn error_locator(syndromes: &[GF]) -> Result<Vec<GF>, DecodingError> {
    let max = syndromes.len() / 2;
    // the syndrome matrix is regular iff. v is the number of errors
    for v in (1..=max).rev() {
        let mut matrix = vec![GF(0); v * v];
        for i in 0..v {
            for j in 0..v {
                matrix[i * v + j] = syndromes[i + j];
            }
        }
        let mut coeff: Vec<GF> = syndromes[v..2 * v].into();
        if solve(&mut matrix, &mut coeff, v) {
            coeff.push(GF(1));
            return Ok(coeff);
        }
    }
    Err(DecodingError::TooManyErrors)
}

/// Solve the square system `mat` * x = `b` in place (x is written to `b`).
///
/// Returns false if the matrix is singular.
fn solve(mat: &mut [GF], b: &mut [GF], n: usize) -> bool {
    let c = |i: usize, j: usize| i * n + j;
    for i in 0..n {
        let Some(pivot) = (i..n).find(|k| mat[c(*k, i)] != GF(0)) else {
            return false;
        };
        if pivot != i {
            b.swap(i, pivot);
            for j in 0..n {
                mat.swap(c(i, j), c(pivot, j));
            }
        }
        for k in i + 1..n {
            let f = mat[c(k, i)] / mat[c(i, i)];
            for j in i..n {
                let v = mat[c(i, j)];
                mat[c(k, j)] -= f * v;
            }
            let bi = b[i];
            b[k] -= f * bi;
        }
    }
    for i in (0..n).rev() {
        for j in i + 1..n {
            let bj = b[j];
            b[i] -= mat[c(i, j)] * bj;
        }
        b[i] /= mat[c(i, i)];
    }
    true
}

#[test]
fn test_solve_2x2() {
    let mut mat = vec![GF(2), GF(1), GF(5), GF(2)];
    let mut b = [GF(56), GF(23)];
    assert!(solve(&mut mat, &mut b[..], 2));
    assert_eq!(GF(2) * b[0] + GF(1) * b[1], GF(56));
    assert_eq!(GF(5) * b[0] + GF(2) * b[1], GF(23));
}

#[test]
fn test_solve_2x2_singular() {
    let mut mat = vec![GF(2), GF(1), GF(4), GF(2)];
    let mut b = [GF(56), GF(23)];
    assert!(!solve(&mut mat, &mut b[..], 2));
}

#[test]
fn test_recovery() {
    let mut rs = super::reed_solomon::ReedSolomon::new(5, 1);
    let mut data = vec![1, 2, 3];
    rs.encode(&data);
    data.extend_from_slice(rs.ecc());
    let mut received = data.clone();
    // make two wrong
    received[0] = 230;
    received[1] = 32;
    decode(&mut received, 5).unwrap();
    assert_eq!(&data, &received);
}

#[test]
fn test_no_errors() {
    let mut block = vec![23, 40, 11, 255, 207, 37, 244, 81];
    decode(&mut block, 5).unwrap();
    assert_eq!(block, vec![23, 40, 11, 255, 207, 37, 244, 81]);
}
