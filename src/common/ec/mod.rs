mod block;
mod galois;

pub(crate) use block::*;
pub use galois::multiply;

use super::error::{QRError, QRResult};

// Reed-Solomon generator
//------------------------------------------------------------------------------

/// Generator polynomial `(x - 2^0)(x - 2^1)...(x - 2^(d-1))` over GF(2^8).
///
/// Coefficients run from highest to lowest power, the leading 1 omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReedSolomonGenerator {
    coefficients: Vec<u8>,
}

impl ReedSolomonGenerator {
    pub const MAX_DEGREE: usize = 255;

    pub fn new(degree: usize) -> QRResult<Self> {
        if !(1..=Self::MAX_DEGREE).contains(&degree) {
            return Err(QRError::InvalidDegree(degree));
        }

        // Start with the monomial x^0, multiply by (x - r) for each root r
        let mut coefficients = vec![0u8; degree];
        coefficients[degree - 1] = 1;
        let mut root = 1u8;
        for _ in 0..degree {
            for j in 0..degree {
                coefficients[j] = multiply(coefficients[j], root);
                if j + 1 < degree {
                    coefficients[j] ^= coefficients[j + 1];
                }
            }
            root = multiply(root, 0x02);
        }
        Ok(Self { coefficients })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len()
    }

    pub fn coefficients(&self) -> &[u8] {
        &self.coefficients
    }

    /// Remainder of `data(x) * x^degree` divided by the generator, i.e. the error
    /// correction codewords for `data`.
    pub fn remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut res = vec![0u8; self.degree()];
        for &b in data {
            let factor = b ^ res[0];
            res.rotate_left(1);
            if let Some(last) = res.last_mut() {
                *last = 0;
            }
            for (r, &c) in res.iter_mut().zip(&self.coefficients) {
                *r ^= multiply(c, factor);
            }
        }
        res
    }
}
