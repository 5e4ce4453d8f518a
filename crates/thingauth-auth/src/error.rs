//! Error types for certificate resolution and authentication.

use thingauth_client::error::RegistryError;
use thingauth_core::principal::ParseError;
use thingauth_core::types::ValidationError;
use thingauth_crypto::error::{DecodeError, VerifyError};
use thiserror::Error;

/// Errors raised by a certificate cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    /// An I/O error occurred reading or writing an entry.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while resolving a device certificate.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The registry lookup failed or timed out.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// The registry lists no principals for the device.
    #[error("device '{0}' has no attached principals")]
    NoPrincipals(String),
    /// The first principal is not of the form `prefix/certificateId`.
    #[error("malformed principal reference '{reference}': {source}")]
    MalformedReference {
        /// The offending reference, sanitized for logging.
        reference: String,
        /// Why parsing failed.
        source: ParseError,
    },
    /// The fetched certificate could not be persisted.
    #[error("certificate cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Why a device failed to authenticate.
///
/// Only used for diagnostics; callers of
/// [`ThingAuthenticator::authenticate`](crate::authenticator::ThingAuthenticator::authenticate)
/// see a plain `false` for every variant.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The device name is not a valid identity.
    #[error("invalid device name: {0}")]
    InvalidDevice(#[from] ValidationError),
    /// No certificate could be obtained.
    #[error("certificate resolution failed: {0}")]
    Resolve(#[from] ResolveError),
    /// The certificate could not be decoded to an RSA key.
    #[error("certificate decoding failed: {0}")]
    Decode(#[from] DecodeError),
    /// The signature did not verify.
    #[error("signature verification failed: {0}")]
    Verify(#[from] VerifyError),
}
