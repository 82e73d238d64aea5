use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::noise;

/// Ambient modulus q = 2^64 of the discretized torus.
const Q: u128 = 1 << 64;

/// An element of the real torus T = R/Z, stored as a 64-bit integer `d`
/// read as `d / 2^64` in [0, 1). Arithmetic wraps modulo 2^64, which is
/// exactly addition modulo 1 on the torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Torus(u64);

/// Plaintext moduli must be powers of two no larger than q.
pub(crate) fn check_modulus(p: u128) -> Result<()> {
    if !p.is_power_of_two() || p > Q {
        return Err(Error::InvalidParameter(format!(
            "plaintext modulus must be a power of two in [1, 2^64], got {p}"
        )));
    }
    Ok(())
}

pub(crate) fn check_range(data_range: (f64, f64)) -> Result<(f64, f64)> {
    let (lo, hi) = data_range;
    if !lo.is_finite() || !hi.is_finite() || hi <= lo {
        return Err(Error::InvalidParameter(format!(
            "data range must be a finite interval [lo, hi) with lo < hi, got [{lo}, {hi})"
        )));
    }
    Ok((lo, hi))
}

/// The quotient q/p. Fits in u128 for every valid p, and equals 1 when p = q.
fn scaling(p: u128) -> Result<u128> {
    check_modulus(p)?;
    Ok(Q / p)
}

impl Torus {
    pub fn new(data: u64) -> Self {
        Torus(data)
    }

    pub fn data(&self) -> u64 {
        self.0
    }

    /// Encode a real number from [0, 1). Values outside the range are reduced
    /// modulo 1 with a warning.
    pub fn from_real(value: f64) -> Self {
        if !(0.0..1.0).contains(&value) {
            log::warn!("real {value} is not in [0, 1), reducing modulo 1 to {}", value.rem_euclid(1.0));
        }
        let wrapped = value.rem_euclid(1.0);
        // rem_euclid can land on 1.0 exactly for tiny negative inputs; the
        // u128 -> u64 truncation wraps that back to 0.
        Torus((wrapped * Q as f64).round() as u128 as u64)
    }

    /// Decode to the nearest multiple of 1/p in [0, 1).
    pub fn to_real(&self, p: u128) -> Result<f64> {
        let k = self.to_int(p)?;
        Ok(k as f64 / p as f64)
    }

    /// Encode an integer from [0, p). Values outside the range are reduced
    /// modulo p with a warning.
    pub fn from_int(value: u64, p: u128) -> Result<Self> {
        let scale = scaling(p)?;
        if value as u128 >= p {
            log::warn!("integer {value} is not in [0, {p}), reducing modulo p to {}", value as u128 % p);
        }
        Ok(Torus(((value as u128 % p) * scale) as u64))
    }

    /// Decode to an integer in [0, p), rounding half away from zero.
    pub fn to_int(&self, p: u128) -> Result<u64> {
        let scale = scaling(p)?;
        Ok((((self.0 as u128 + scale / 2) / scale) % p) as u64)
    }

    /// Encode a real from the interval [lo, hi), discretized to p buckets.
    /// Values outside the interval are reduced modulo its width with a
    /// warning.
    pub fn from_float(value: f64, p: u128, data_range: (f64, f64)) -> Result<Self> {
        check_modulus(p)?;
        let (lo, hi) = check_range(data_range)?;
        if !(lo..hi).contains(&value) {
            log::warn!("float {value} is not in [{lo}, {hi}), reducing modulo the range width");
        }
        let delta = hi - lo;
        let x = (value - lo).rem_euclid(delta);
        let k = ((x * p as f64 / delta).round() as u128 % p) as u64;
        Self::from_int(k, p)
    }

    /// Decode back into the interval [lo, hi) with precision (hi - lo)/p.
    pub fn to_float(&self, p: u128, data_range: (f64, f64)) -> Result<f64> {
        let (lo, hi) = check_range(data_range)?;
        let k = self.to_int(p)?;
        Ok(k as f64 * (hi - lo) / p as f64 + lo)
    }

    /// A torus element drawn uniformly at random.
    pub fn uniform() -> Self {
        Torus(noise::uniform_u64())
    }

    /// A discrete Gaussian draw: N(0, sigma^2) in the reals, reduced mod 1.
    pub fn gaussian(sigma: f64) -> Self {
        Torus::from_real(noise::gaussian_noise(sigma).rem_euclid(1.0))
    }

    pub fn add(&self, other: &Torus) -> Self {
        Torus(self.0.wrapping_add(other.0))
    }

    pub fn sub(&self, other: &Torus) -> Self {
        Torus(self.0.wrapping_sub(other.0))
    }

    pub fn neg(&self) -> Self {
        Torus(self.0.wrapping_neg())
    }

    /// Scale by a non-negative integer. The torus is a Z-module, not a ring:
    /// there is no torus-times-torus product.
    pub fn mul_int(&self, scalar: u64) -> Self {
        Torus(self.0.wrapping_mul(scalar))
    }
}

impl Add for Torus {
    type Output = Torus;

    fn add(self, rhs: Torus) -> Torus {
        Torus(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Torus {
    type Output = Torus;

    fn sub(self, rhs: Torus) -> Torus {
        Torus(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Torus {
    type Output = Torus;

    fn neg(self) -> Torus {
        Torus(self.0.wrapping_neg())
    }
}

impl Mul<u64> for Torus {
    type Output = Torus;

    fn mul(self, rhs: u64) -> Torus {
        self.mul_int(rhs)
    }
}

impl Mul<Torus> for u64 {
    type Output = Torus;

    fn mul(self, rhs: Torus) -> Torus {
        rhs.mul_int(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torus_close(t1: f64, t2: f64, atol: f64) -> bool {
        assert!((0.0..1.0).contains(&t1));
        assert!((0.0..1.0).contains(&t2));
        let dist = (t1 - t2).abs();
        dist < atol || dist > 1.0 - atol
    }

    #[test]
    fn test_torus_wrapping() {
        let t1 = Torus::from_real(1.5);
        assert!(torus_close(t1.to_real(1 << 16).unwrap(), 0.5, 1e-4));

        let t2 = Torus::from_real(-0.3);
        assert!(torus_close(t2.to_real(1 << 16).unwrap(), 0.7, 1e-4));
    }

    #[test]
    fn test_torus_addition() {
        let t1 = Torus::from_real(0.7);
        let t2 = Torus::from_real(0.5);
        let result = t1.add(t2);

        assert!(torus_close(result.to_real(1 << 16).unwrap(), 0.2, 1e-4));
        assert_eq!(result, t1 + t2);
    }

    #[test]
    fn test_torus_subtraction() {
        let t1 = Torus::from_real(0.3);
        let t2 = Torus::from_real(0.5);
        let result = t1.sub(t2);

        assert!(torus_close(result.to_real(1 << 16).unwrap(), 0.8, 1e-4));
        assert_eq!(result, t1 - t2);
    }

    #[test]
    fn test_torus_neg_and_mul() {
        let t = Torus::from_int(3, 256).unwrap();
        assert_eq!(t.neg().to_int(256).unwrap(), 253);
        assert_eq!((-t).to_int(256).unwrap(), 253);
        assert_eq!(t.mul_int(5).to_int(256).unwrap(), 15);
        assert_eq!((t * 100).to_int(256).unwrap(), (3 * 100) % 256);
        assert_eq!((100u64 * t).to_int(256).unwrap(), (3 * 100) % 256);
    }

    #[test]
    fn test_torus_int_encoding() {
        for log2_p in [3u32, 5, 8, 16, 32] {
            let p = 1u128 << log2_p;
            for i in [0u64, 1, 2, (1 << log2_p) / 2, (1 << log2_p) - 1] {
                let u = Torus::from_int(i, p).unwrap();
                assert_eq!(u.to_int(p).unwrap(), i);
            }
        }
    }

    #[test]
    fn test_torus_int_identity_p256() {
        assert_eq!(Torus::from_int(13, 256).unwrap().to_int(256).unwrap(), 13);
    }

    #[test]
    fn test_torus_int_out_of_range_reduces() {
        let u = Torus::from_int(260, 256).unwrap();
        assert_eq!(u.to_int(256).unwrap(), 4);
    }

    #[test]
    fn test_torus_real_encoding() {
        for log2_p in [3u32, 5, 8, 16, 32, 64] {
            let p = 1u128 << log2_p;
            let atol = (1.0 / p as f64).max(1e-9);
            for step in 0..10 {
                let r = step as f64 / 10.0;
                let u = Torus::from_real(r);
                assert!(torus_close(u.to_real(p).unwrap(), r, atol));
            }
        }
    }

    #[test]
    fn test_torus_real_snap_p16() {
        let p = 1u128 << 16;
        let result = Torus::from_real(0.3).to_real(p).unwrap();
        assert!((result - 0.3).abs() <= 1.0 / p as f64);
    }

    #[test]
    fn test_torus_real_snap_is_idempotent() {
        let p = 1u128 << 8;
        let snapped = Torus::from_real(Torus::from_real(0.123456).to_real(p).unwrap());
        let twice = Torus::from_real(snapped.to_real(p).unwrap());
        assert_eq!(snapped, twice);
    }

    #[test]
    fn test_torus_float_encoding() {
        let ranges = [(0.0, 2.0), (-2.0, 1.0), (-5.5, -4.0), (-3.1, 3.5), (0.2, 1.4)];
        for data_range in ranges {
            let (lo, hi) = data_range;
            let delta = hi - lo;
            for log2_p in [3u32, 5, 8, 16, 32] {
                let p = 1u128 << log2_p;
                let precision = delta / p as f64;
                for offset in [0.0, 0.25, 0.5, 0.9] {
                    let r = lo + offset * delta;
                    let u = Torus::from_float(r, p, data_range).unwrap();
                    let result = u.to_float(p, data_range).unwrap();
                    assert!(
                        (result - r).abs() <= precision + 1e-9,
                        "range [{lo}, {hi}), p=2^{log2_p}, r={r}, got {result}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_torus_float_invalid_range() {
        assert!(matches!(
            Torus::from_float(0.5, 256, (1.0, 1.0)),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            Torus::from_float(0.5, 256, (2.0, -2.0)),
            Err(Error::InvalidParameter(_))
        ));
        let u = Torus::from_int(0, 256).unwrap();
        assert!(u.to_float(256, (3.0, 3.0)).is_err());
    }

    #[test]
    fn test_torus_invalid_modulus() {
        assert!(matches!(Torus::from_int(1, 3), Err(Error::InvalidParameter(_))));
        assert!(Torus::from_int(1, 0).is_err());
        // p > q
        assert!(Torus::from_int(1, 1u128 << 65).is_err());
        assert!(Torus::new(42).to_int(12).is_err());
    }

    #[test]
    fn test_p_equals_q() {
        let p = 1u128 << 64;
        let u = Torus::new(u64::MAX - 5);
        // scale is 1: decoding is exact, no rounding slack
        assert_eq!(u.to_int(p).unwrap(), u64::MAX - 5);
        let v = Torus::from_int(u64::MAX - 5, p).unwrap();
        assert_eq!(v, u);
    }
}
