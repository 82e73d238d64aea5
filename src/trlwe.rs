use crate::error::{Error, Result};
use crate::noise;
use crate::polynomial::TorusPolynomial;
use crate::tlwe::check_sigma;
use crate::torus;

/// Parameters of a TRLWE ciphertext: ring degree N (power of two), noise
/// standard deviation sigma, plaintext modulus p, and mask length k.
#[derive(Debug, Clone, PartialEq)]
pub struct TrlweParams {
    big_n: usize,
    sigma: f64,
    p: u128,
    k: usize,
}

impl TrlweParams {
    /// The only construction path; keeps every parameter set validated.
    pub fn new(big_n: usize, sigma: f64, p: u128, k: usize) -> Result<Self> {
        if big_n == 0 || !big_n.is_power_of_two() {
            return Err(Error::InvalidParameter(format!(
                "ring degree must be a positive power of two, got {big_n}"
            )));
        }
        if k == 0 {
            return Err(Error::InvalidParameter(format!(
                "mask length must be positive, got {k}"
            )));
        }
        check_sigma(sigma)?;
        torus::check_modulus(p)?;
        Ok(TrlweParams { big_n, sigma, p, k })
    }

    pub fn big_n(&self) -> usize {
        self.big_n
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn p(&self) -> u128 {
        self.p
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

/// Ring-LWE secret key: k polynomials of degree N with uniform coefficients
/// in {0, 1}, read in T[X]/(X^N + 1) through the inclusion {0, 1} in T.
#[derive(Debug, Clone)]
pub struct RlweSecretKey {
    polys: Vec<Vec<u64>>,
}

impl RlweSecretKey {
    pub fn generate(big_n: usize, k: usize) -> Self {
        let polys = (0..k)
            .map(|_| (0..big_n).map(|_| noise::uniform_bit()).collect())
            .collect();
        RlweSecretKey { polys }
    }

    pub fn polynomials(&self) -> &[Vec<u64>] {
        &self.polys
    }

    pub fn big_n(&self) -> usize {
        self.polys.first().map_or(0, |s| s.len())
    }

    pub fn k(&self) -> usize {
        self.polys.len()
    }
}

/// A TRLWE ciphertext (A, B): k mask polynomials with uniform torus
/// coefficients and body B = sum_j S_j * A_j + U + E, products taken in
/// T[X]/(X^N + 1). Same empty-until-encrypted lifecycle as `Tlwe`.
#[derive(Debug, Clone)]
pub struct Trlwe {
    params: TrlweParams,
    mask: Option<Vec<TorusPolynomial>>,
    body: Option<TorusPolynomial>,
}

impl Trlwe {
    pub fn new(params: TrlweParams) -> Self {
        Trlwe { params, mask: None, body: None }
    }

    pub fn params(&self) -> &TrlweParams {
        &self.params
    }

    pub fn is_encrypted(&self) -> bool {
        self.mask.is_some() && self.body.is_some()
    }

    pub fn mask(&self) -> Option<&[TorusPolynomial]> {
        self.mask.as_deref()
    }

    pub fn body(&self) -> Option<&TorusPolynomial> {
        self.body.as_ref()
    }

    fn parts(&self) -> Result<(&[TorusPolynomial], &TorusPolynomial)> {
        match (&self.mask, &self.body) {
            (Some(mask), Some(body)) => Ok((mask, body)),
            _ => Err(Error::NotEncrypted),
        }
    }

    fn with_parts(&self, mask: Vec<TorusPolynomial>, body: TorusPolynomial) -> Trlwe {
        Trlwe { params: self.params.clone(), mask: Some(mask), body: Some(body) }
    }

    fn check_compatible(&self, other: &Trlwe) -> Result<()> {
        if self.params.big_n != other.params.big_n
            || self.params.k != other.params.k
            || self.params.p != other.params.p
        {
            return Err(Error::ParameterMismatch);
        }
        Ok(())
    }

    fn check_key(&self, sk: &RlweSecretKey) -> Result<()> {
        if sk.big_n() != self.params.big_n || sk.k() != self.params.k {
            return Err(Error::ParameterMismatch);
        }
        Ok(())
    }

    fn check_plain(&self, u: &TorusPolynomial) -> Result<()> {
        if u.len() != self.params.big_n {
            return Err(Error::ParameterMismatch);
        }
        Ok(())
    }

    fn mask_key_product(mask: &[TorusPolynomial], sk: &RlweSecretKey, big_n: usize) -> Result<TorusPolynomial> {
        let mut acc = TorusPolynomial::zero(big_n);
        for (a, s) in mask.iter().zip(sk.polynomials()) {
            acc = acc.add(&a.mul_int_poly(s)?)?;
        }
        Ok(acc)
    }

    /// Encrypt a message polynomial `u` under secret key `sk`: fresh uniform
    /// mask polynomials, coefficient-wise Gaussian noise polynomial,
    /// B = sum_j S_j * A_j + U + E.
    pub fn encrypt(&mut self, sk: &RlweSecretKey, u: &TorusPolynomial) -> Result<()> {
        self.check_key(sk)?;
        self.check_plain(u)?;
        let mask: Vec<TorusPolynomial> = (0..self.params.k)
            .map(|_| TorusPolynomial::uniform(self.params.big_n))
            .collect();
        let e = TorusPolynomial::gaussian(self.params.big_n, self.params.sigma);
        let body = Self::mask_key_product(&mask, sk, self.params.big_n)?.add(u)?.add(&e)?;
        self.mask = Some(mask);
        self.body = Some(body);
        Ok(())
    }

    /// Decrypt into a torus polynomial: V = B - sum_j S_j * A_j, then snap
    /// every coefficient onto the p-grid.
    pub fn decrypt(&self, sk: &RlweSecretKey) -> Result<TorusPolynomial> {
        let (mask, body) = self.parts()?;
        self.check_key(sk)?;
        let phase = body.sub(&Self::mask_key_product(mask, sk, self.params.big_n)?)?;
        Ok(TorusPolynomial::from_real(&phase.to_real(self.params.p)?))
    }

    /// Homomorphic addition of two ciphertexts.
    pub fn add(&self, other: &Trlwe) -> Result<Trlwe> {
        self.check_compatible(other)?;
        let (a1, b1) = self.parts()?;
        let (a2, b2) = other.parts()?;
        let mask = a1
            .iter()
            .zip(a2)
            .map(|(x, y)| x.add(y))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_parts(mask, b1.add(b2)?))
    }

    /// Homomorphic subtraction of two ciphertexts.
    pub fn sub(&self, other: &Trlwe) -> Result<Trlwe> {
        self.check_compatible(other)?;
        let (a1, b1) = self.parts()?;
        let (a2, b2) = other.parts()?;
        let mask = a1
            .iter()
            .zip(a2)
            .map(|(x, y)| x.sub(y))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_parts(mask, b1.sub(b2)?))
    }

    /// Add a plaintext polynomial: only the body moves.
    pub fn add_plain(&self, u: &TorusPolynomial) -> Result<Trlwe> {
        self.check_plain(u)?;
        let (mask, body) = self.parts()?;
        Ok(self.with_parts(mask.to_vec(), body.add(u)?))
    }

    /// Subtract a plaintext polynomial.
    pub fn sub_plain(&self, u: &TorusPolynomial) -> Result<Trlwe> {
        self.check_plain(u)?;
        let (mask, body) = self.parts()?;
        Ok(self.with_parts(mask.to_vec(), body.sub(u)?))
    }

    /// Plaintext minus ciphertext: u - c = (-c) + u.
    pub fn plain_sub(&self, u: &TorusPolynomial) -> Result<Trlwe> {
        self.neg()?.add_plain(u)
    }

    /// Negate every mask polynomial and the body, encrypting -U.
    pub fn neg(&self) -> Result<Trlwe> {
        let (mask, body) = self.parts()?;
        let mask = mask.iter().map(TorusPolynomial::neg).collect();
        Ok(self.with_parts(mask, body.neg()))
    }

    /// Scale mask and body coefficient-wise by a non-negative integer.
    pub fn mul_int(&self, scalar: u64) -> Result<Trlwe> {
        let (mask, body) = self.parts()?;
        let mask = mask.iter().map(|x| x.mul_int(scalar)).collect();
        Ok(self.with_parts(mask, body.mul_int(scalar)))
    }
}
