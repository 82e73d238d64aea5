use crate::error::{Error, Result};
use crate::noise;
use crate::torus::{self, Torus};

/// Parameters of a TLWE ciphertext: LWE dimension n, Gaussian noise standard
/// deviation sigma (in torus units), plaintext modulus p. The ambient modulus
/// q = 2^64 is fixed by the torus representation.
#[derive(Debug, Clone, PartialEq)]
pub struct TlweParams {
    n: usize,
    sigma: f64,
    p: u128,
}

impl TlweParams {
    /// The only construction path; keeps every parameter set validated.
    pub fn new(n: usize, sigma: f64, p: u128) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidParameter(format!(
                "LWE dimension must be positive, got {n}"
            )));
        }
        check_sigma(sigma)?;
        torus::check_modulus(p)?;
        Ok(TlweParams { n, sigma, p })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn p(&self) -> u128 {
        self.p
    }
}

pub(crate) fn check_sigma(sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 || sigma >= 1.0 {
        return Err(Error::InvalidParameter(format!(
            "noise standard deviation must lie in (0, 1), got {sigma}"
        )));
    }
    Ok(())
}

/// Learning-with-errors secret key: a vector of n uniform bits. The same key
/// encrypts and decrypts.
#[derive(Debug, Clone)]
pub struct LweSecretKey {
    bits: Vec<u64>,
}

impl LweSecretKey {
    pub fn generate(n: usize) -> Self {
        LweSecretKey { bits: (0..n).map(|_| noise::uniform_bit()).collect() }
    }

    pub fn bits(&self) -> &[u64] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

/// A TLWE ciphertext (a, b): mask a of n uniform torus elements and body
/// b = <s, a> + u + e. Freshly constructed ciphertexts are empty; `encrypt`
/// populates them, and every arithmetic operation yields a populated copy.
#[derive(Debug, Clone)]
pub struct Tlwe {
    params: TlweParams,
    mask: Option<Vec<Torus>>,
    body: Option<Torus>,
}

impl Tlwe {
    pub fn new(params: TlweParams) -> Self {
        Tlwe { params, mask: None, body: None }
    }

    pub fn params(&self) -> &TlweParams {
        &self.params
    }

    pub fn is_encrypted(&self) -> bool {
        self.mask.is_some() && self.body.is_some()
    }

    pub fn mask(&self) -> Option<&[Torus]> {
        self.mask.as_deref()
    }

    pub fn body(&self) -> Option<Torus> {
        self.body
    }

    fn parts(&self) -> Result<(&[Torus], Torus)> {
        match (&self.mask, self.body) {
            (Some(mask), Some(body)) => Ok((mask, body)),
            _ => Err(Error::NotEncrypted),
        }
    }

    fn with_parts(&self, mask: Vec<Torus>, body: Torus) -> Tlwe {
        Tlwe { params: self.params.clone(), mask: Some(mask), body: Some(body) }
    }

    fn check_compatible(&self, other: &Tlwe) -> Result<()> {
        if self.params.n != other.params.n || self.params.p != other.params.p {
            return Err(Error::ParameterMismatch);
        }
        Ok(())
    }

    fn mask_key_product(mask: &[Torus], sk: &LweSecretKey) -> Torus {
        let mut acc = Torus::default();
        for (a, &s) in mask.iter().zip(sk.bits()) {
            acc = acc.add(&a.mul_int(s));
        }
        acc
    }

    /// Encrypt a torus message `u` under secret key `sk`: draw a fresh
    /// uniform mask and Gaussian noise, set b = <s, a> + u + e.
    pub fn encrypt(&mut self, sk: &LweSecretKey, u: Torus) -> Result<()> {
        if sk.len() != self.params.n {
            return Err(Error::ParameterMismatch);
        }
        let mask: Vec<Torus> = (0..self.params.n).map(|_| Torus::uniform()).collect();
        let e = Torus::gaussian(self.params.sigma);
        let body = Self::mask_key_product(&mask, sk).add(&u).add(&e);
        self.mask = Some(mask);
        self.body = Some(body);
        Ok(())
    }

    /// Decrypt into a torus element: compute the phase b - <s, a>, then snap
    /// it onto the p-grid, which strips any noise below 1/(2p).
    pub fn decrypt(&self, sk: &LweSecretKey) -> Result<Torus> {
        let (mask, body) = self.parts()?;
        if sk.len() != self.params.n {
            return Err(Error::ParameterMismatch);
        }
        let phase = body.sub(&Self::mask_key_product(mask, sk));
        Ok(Torus::from_real(phase.to_real(self.params.p)?))
    }

    /// Homomorphic addition of two ciphertexts.
    pub fn add(&self, other: &Tlwe) -> Result<Tlwe> {
        self.check_compatible(other)?;
        let (a1, b1) = self.parts()?;
        let (a2, b2) = other.parts()?;
        let mask = a1.iter().zip(a2).map(|(x, y)| x.add(y)).collect();
        Ok(self.with_parts(mask, b1.add(&b2)))
    }

    /// Homomorphic subtraction of two ciphertexts.
    pub fn sub(&self, other: &Tlwe) -> Result<Tlwe> {
        self.check_compatible(other)?;
        let (a1, b1) = self.parts()?;
        let (a2, b2) = other.parts()?;
        let mask = a1.iter().zip(a2).map(|(x, y)| x.sub(y)).collect();
        Ok(self.with_parts(mask, b1.sub(&b2)))
    }

    /// Add a plaintext torus element: only the body moves.
    pub fn add_plain(&self, u: Torus) -> Result<Tlwe> {
        let (mask, body) = self.parts()?;
        Ok(self.with_parts(mask.to_vec(), body.add(&u)))
    }

    /// Subtract a plaintext torus element.
    pub fn sub_plain(&self, u: Torus) -> Result<Tlwe> {
        let (mask, body) = self.parts()?;
        Ok(self.with_parts(mask.to_vec(), body.sub(&u)))
    }

    /// Plaintext minus ciphertext: u - c = (-c) + u.
    pub fn plain_sub(&self, u: Torus) -> Result<Tlwe> {
        self.neg()?.add_plain(u)
    }

    /// Negate mask and body, encrypting -u.
    pub fn neg(&self) -> Result<Tlwe> {
        let (mask, body) = self.parts()?;
        let mask = mask.iter().map(|x| x.neg()).collect();
        Ok(self.with_parts(mask, body.neg()))
    }

    /// Scale by a non-negative integer. Noise grows linearly with the scalar;
    /// decryption stays correct while scalar * sigma is below 1/(2p).
    pub fn mul_int(&self, scalar: u64) -> Result<Tlwe> {
        let (mask, body) = self.parts()?;
        let mask = mask.iter().map(|x| x.mul_int(scalar)).collect();
        Ok(self.with_parts(mask, body.mul_int(scalar)))
    }
}
