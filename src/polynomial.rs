use crate::error::{Error, Result};
use crate::torus::Torus;

/// A polynomial of the negacyclic ring T[X]/(X^N + 1): N torus coefficients,
/// with X^N = -1. N is fixed at construction and is a power of two in every
/// ciphertext parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorusPolynomial {
    coeffs: Vec<Torus>,
}

impl TorusPolynomial {
    pub fn new(coeffs: Vec<Torus>) -> Self {
        TorusPolynomial { coeffs }
    }

    pub fn zero(n: usize) -> Self {
        TorusPolynomial { coeffs: vec![Torus::default(); n] }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeffs(&self) -> &[Torus] {
        &self.coeffs
    }

    /// A polynomial with N uniformly random torus coefficients.
    pub fn uniform(n: usize) -> Self {
        TorusPolynomial { coeffs: (0..n).map(|_| Torus::uniform()).collect() }
    }

    /// A polynomial of N independent discrete Gaussian draws.
    pub fn gaussian(n: usize, sigma: f64) -> Self {
        TorusPolynomial { coeffs: (0..n).map(|_| Torus::gaussian(sigma)).collect() }
    }

    /// Encode one real per coefficient.
    pub fn from_real(values: &[f64]) -> Self {
        TorusPolynomial { coeffs: values.iter().map(|&r| Torus::from_real(r)).collect() }
    }

    /// Encode a single real replicated across all N coefficients.
    pub fn from_real_scalar(value: f64, n: usize) -> Self {
        TorusPolynomial { coeffs: vec![Torus::from_real(value); n] }
    }

    pub fn to_real(&self, p: u128) -> Result<Vec<f64>> {
        self.coeffs.iter().map(|c| c.to_real(p)).collect()
    }

    /// Encode one integer from [0, p) per coefficient.
    pub fn from_int(values: &[u64], p: u128) -> Result<Self> {
        let coeffs = values
            .iter()
            .map(|&i| Torus::from_int(i, p))
            .collect::<Result<Vec<_>>>()?;
        Ok(TorusPolynomial { coeffs })
    }

    /// Encode a single integer replicated across all N coefficients.
    pub fn from_int_scalar(value: u64, p: u128, n: usize) -> Result<Self> {
        let c = Torus::from_int(value, p)?;
        Ok(TorusPolynomial { coeffs: vec![c; n] })
    }

    pub fn to_int(&self, p: u128) -> Result<Vec<u64>> {
        self.coeffs.iter().map(|c| c.to_int(p)).collect()
    }

    /// Encode one real from [lo, hi) per coefficient.
    pub fn from_float(values: &[f64], p: u128, data_range: (f64, f64)) -> Result<Self> {
        let coeffs = values
            .iter()
            .map(|&r| Torus::from_float(r, p, data_range))
            .collect::<Result<Vec<_>>>()?;
        Ok(TorusPolynomial { coeffs })
    }

    /// Encode a single real from [lo, hi) replicated across all N coefficients.
    pub fn from_float_scalar(value: f64, p: u128, data_range: (f64, f64), n: usize) -> Result<Self> {
        let c = Torus::from_float(value, p, data_range)?;
        Ok(TorusPolynomial { coeffs: vec![c; n] })
    }

    pub fn to_float(&self, p: u128, data_range: (f64, f64)) -> Result<Vec<f64>> {
        self.coeffs.iter().map(|c| c.to_float(p, data_range)).collect()
    }

    pub fn add(&self, other: &TorusPolynomial) -> Result<Self> {
        if self.coeffs.len() != other.coeffs.len() {
            return Err(Error::ParameterMismatch);
        }
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(x, y)| x.add(y))
            .collect();
        Ok(TorusPolynomial { coeffs })
    }

    pub fn sub(&self, other: &TorusPolynomial) -> Result<Self> {
        if self.coeffs.len() != other.coeffs.len() {
            return Err(Error::ParameterMismatch);
        }
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(x, y)| x.sub(y))
            .collect();
        Ok(TorusPolynomial { coeffs })
    }

    pub fn neg(&self) -> Self {
        TorusPolynomial { coeffs: self.coeffs.iter().map(|x| x.neg()).collect() }
    }

    pub fn mul_int(&self, scalar: u64) -> Self {
        TorusPolynomial { coeffs: self.coeffs.iter().map(|x| x.mul_int(scalar)).collect() }
    }

    /// Negacyclic product with an integer polynomial of the same length:
    /// c_t = sum_{i+j=t} s_i a_j - sum_{i+j=t+N} s_i a_j, all mod 2^64.
    /// Schoolbook; products past degree N-1 fold back with a sign flip
    /// since X^N = -1.
    pub fn mul_int_poly(&self, other: &[u64]) -> Result<Self> {
        let n = self.coeffs.len();
        if n != other.len() {
            return Err(Error::ParameterMismatch);
        }
        let mut out = vec![Torus::default(); n];
        for (i, &s) in other.iter().enumerate() {
            if s == 0 {
                continue;
            }
            for (j, a) in self.coeffs.iter().enumerate() {
                let term = a.mul_int(s);
                if i + j < n {
                    out[i + j] = out[i + j].add(&term);
                } else {
                    out[i + j - n] = out[i + j - n].sub(&term);
                }
            }
        }
        Ok(TorusPolynomial { coeffs: out })
    }
}
