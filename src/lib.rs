//! Torus fully homomorphic encryption core.
//!
//! Messages are encoded on the real torus T = R/Z, represented with 64-bit
//! fixed precision, and encrypted as TLWE or TRLWE (ring) ciphertexts.
//! Ciphertexts support homomorphic addition, subtraction and multiplication
//! by small non-negative integers; noise grows with every operation and
//! decryption recovers the message as long as the accumulated noise stays
//! below half a plaintext step 1/(2p).

pub mod error;
pub mod noise;
pub mod polynomial;
pub mod tlwe;
pub mod torus;
pub mod trlwe;

pub use error::{Error, Result};
pub use polynomial::TorusPolynomial;
pub use tlwe::{LweSecretKey, Tlwe, TlweParams};
pub use torus::Torus;
pub use trlwe::{RlweSecretKey, Trlwe, TrlweParams};
