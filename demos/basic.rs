use torus_fhe::polynomial::TorusPolynomial;
use torus_fhe::tlwe::{LweSecretKey, Tlwe, TlweParams};
use torus_fhe::torus::Torus;
use torus_fhe::trlwe::{RlweSecretKey, Trlwe, TrlweParams};

fn main() -> torus_fhe::Result<()> {
    env_logger::init();

    println!("=== Torus FHE Demo ===\n");

    // 1. Integers on the torus
    println!("1. Torus encoding:");
    let p = 1u128 << 8;
    let m1 = 42u64;
    let m2 = 17u64;
    let u1 = Torus::from_int(m1, p)?;
    let u2 = Torus::from_int(m2, p)?;
    println!("  {} encodes as {:#018x}", m1, u1.data());
    println!("  {} encodes as {:#018x}\n", m2, u2.data());

    // 2. TLWE encryption and homomorphic arithmetic
    println!("2. TLWE over Z_256:");
    let params = TlweParams::new(1024, 2f64.powi(-30), p)?;
    let sk = LweSecretKey::generate(params.n());

    let mut c1 = Tlwe::new(params.clone());
    let mut c2 = Tlwe::new(params);
    c1.encrypt(&sk, u1)?;
    c2.encrypt(&sk, u2)?;

    let sum = c1.add(&c2)?.decrypt(&sk)?.to_int(p)?;
    println!("  enc({m1}) + enc({m2}) decrypts to {sum}");

    let diff = c1.sub(&c2)?.decrypt(&sk)?.to_int(p)?;
    println!("  enc({m1}) - enc({m2}) decrypts to {diff}");

    let scaled = c1.mul_int(3)?.decrypt(&sk)?.to_int(p)?;
    println!("  enc({m1}) * 3 decrypts to {scaled}");

    let shifted = c1.add_plain(u2)?.decrypt(&sk)?.to_int(p)?;
    println!("  enc({m1}) + plain {m2} decrypts to {shifted}\n");

    // 3. TRLWE: a thousand reals in one ciphertext
    println!("3. TRLWE batch over reals:");
    let p = 1u128 << 16;
    let params = TrlweParams::new(1024, 2f64.powi(-30), p, 2)?;
    let rk = RlweSecretKey::generate(params.big_n(), params.k());

    let r1 = TorusPolynomial::from_real_scalar(0.2, params.big_n());
    let r2 = TorusPolynomial::from_real_scalar(0.3, params.big_n());

    let mut d1 = Trlwe::new(params.clone());
    let mut d2 = Trlwe::new(params);
    d1.encrypt(&rk, &r1)?;
    d2.encrypt(&rk, &r2)?;

    let decoded = d1.add(&d2)?.decrypt(&rk)?.to_real(p)?;
    println!("  enc(0.2) + enc(0.3): coefficient 0 decrypts to {:.5}", decoded[0]);
    println!("  ({} coefficients recovered in one decryption)", decoded.len());

    Ok(())
}
