use thiserror::Error;

/// Failure cases surfaced by the cryptographic core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parameter (p, n, N, k, sigma, or a data range) is outside its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Binary operation between ciphertexts whose parameters disagree.
    #[error("operation requires ciphertexts with identical parameters")]
    ParameterMismatch,
    /// Decryption or arithmetic on a ciphertext that was never encrypted.
    #[error("nothing is encrypted")]
    NotEncrypted,
    /// Operand combination the scheme does not define, e.g. ciphertext times
    /// ciphertext. Static typing rules these out inside the crate; the variant
    /// is for collaborators dispatching on operand kind at runtime.
    #[error("unsupported operand: {0}")]
    UnsupportedOperand(String),
}

pub type Result<T> = std::result::Result<T, Error>;
