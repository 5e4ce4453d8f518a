//! Authenticates device messages against the device's registered certificate.

use std::sync::Arc;

use log::{info, warn};
use thingauth_core::sanitize::sanitize_str;
use thingauth_core::types::DeviceIdentity;
use thingauth_crypto::decoder::decode_certificate;
use thingauth_crypto::verifier::{PssSha256Verifier, SignatureVerifier};

use crate::error::AuthError;
use crate::resolver::CertificateResolver;

/// Orchestrates certificate resolution, decoding and signature verification.
///
/// Holds no per-request state; share one instance behind an `Arc`.
pub struct ThingAuthenticator {
    resolver: CertificateResolver,
    verifier: Arc<dyn SignatureVerifier>,
}

impl ThingAuthenticator {
    /// Create an authenticator using RSA-PSS/SHA-256 verification.
    pub fn new(resolver: CertificateResolver) -> Self {
        Self::with_verifier(resolver, Arc::new(PssSha256Verifier))
    }

    /// Create an authenticator with a custom signature verifier.
    pub fn with_verifier(
        resolver: CertificateResolver,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Self {
        Self { resolver, verifier }
    }

    /// The resolver used to obtain certificates.
    #[must_use]
    pub fn resolver(&self) -> &CertificateResolver {
        &self.resolver
    }

    /// Run the full pipeline and report why it failed, if it did.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] naming the failing stage.
    pub async fn check(
        &self,
        device: &DeviceIdentity,
        message: &[u8],
        signature_hex: &str,
    ) -> Result<(), AuthError> {
        let material = self.resolver.get_certificate(device).await?;
        let key = decode_certificate(&material)?;
        self.verifier.verify(&key, message, signature_hex)?;
        Ok(())
    }

    /// Return `true` only if `signature_hex` is a valid signature over
    /// `message` by the certificate registered for `device`.
    ///
    /// Every failure, from an unknown device to a bad signature, yields
    /// `false`; the cause is logged but not returned.
    pub async fn authenticate(
        &self,
        device: &DeviceIdentity,
        message: &[u8],
        signature_hex: &str,
    ) -> bool {
        let name = sanitize_str(device.as_str());
        match self.check(device, message, signature_hex).await {
            Ok(()) => {
                info!("signature verified for {name}");
                true
            }
            Err(e) => {
                warn!("authentication failed for {name}: {e}");
                false
            }
        }
    }

    /// Like [`authenticate`](Self::authenticate), for an unvalidated device name.
    ///
    /// Names that are not valid identities are rejected before any cache or
    /// registry access.
    pub async fn authenticate_name(
        &self,
        thing_name: &str,
        message: &[u8],
        signature_hex: &str,
    ) -> bool {
        match DeviceIdentity::new(thing_name) {
            Ok(device) => self.authenticate(&device, message, signature_hex).await,
            Err(e) => {
                warn!(
                    "authentication failed for {}: {}",
                    sanitize_str(thing_name),
                    AuthError::from(e)
                );
                false
            }
        }
    }
}
