//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors that can occur while turning certificate material into a public key.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The material is not valid PEM.
    #[error("PEM decoding failed: {0}")]
    Pem(String),
    /// The PEM block is not a certificate.
    #[error("expected a CERTIFICATE PEM block, found '{0}'")]
    UnexpectedLabel(String),
    /// The DER payload is not a parseable X.509 certificate.
    #[error("X.509 parsing failed: {0}")]
    X509(String),
    /// The certificate carries a key that is not RSA.
    #[error("unsupported public key algorithm {0}, only RSA is accepted")]
    UnsupportedKeyAlgorithm(String),
    /// The RSA subject public key info could not be loaded.
    #[error("invalid RSA public key: {0}")]
    InvalidRsaKey(String),
}

/// Errors that can occur during signature verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The transport encoding of the signature is not valid hex.
    #[error("signature is not valid hex: {0}")]
    InvalidHex(String),
    /// The signature does not match the digest.
    #[error("signature mismatch")]
    SignatureMismatch,
}
