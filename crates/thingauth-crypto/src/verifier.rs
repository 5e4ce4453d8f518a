//! RSA-PSS signature verification over SHA-256 digests.

use log::debug;
use rsa::pss::Pss;
use rsa::traits::PublicKeyParts as _;
use rsa::RsaPublicKey;
use sha2::{Digest, Sha256};

use crate::error::VerifyError;

/// Verifies a hex-encoded detached signature over a message.
pub trait SignatureVerifier: Send + Sync {
    /// Verify `signature_hex` over `message` with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidHex`] if the signature cannot be
    /// hex-decoded and [`VerifyError::SignatureMismatch`] for any signature
    /// that does not verify.
    fn verify(
        &self,
        key: &RsaPublicKey,
        message: &[u8],
        signature_hex: &str,
    ) -> Result<(), VerifyError>;
}

/// RSASSA-PSS with SHA-256 as both message digest and MGF1 hash.
///
/// Any salt length the key can carry is accepted. The digest length and the
/// maximum length (what auto-sizing signers emit) are tried before the rest.
#[derive(Debug, Default, Clone, Copy)]
pub struct PssSha256Verifier;

impl SignatureVerifier for PssSha256Verifier {
    fn verify(
        &self,
        key: &RsaPublicKey,
        message: &[u8],
        signature_hex: &str,
    ) -> Result<(), VerifyError> {
        let signature =
            hex::decode(signature_hex).map_err(|e| VerifyError::InvalidHex(e.to_string()))?;
        if signature.len() != key.size() {
            return Err(VerifyError::SignatureMismatch);
        }
        let digest = Sha256::digest(message);

        let Some(max_salt) = max_salt_len(key, digest.len()) else {
            return Err(VerifyError::SignatureMismatch);
        };
        let preferred = [digest.len(), max_salt];
        let verified = preferred
            .into_iter()
            .filter(|&len| len <= max_salt)
            .chain((0..=max_salt).filter(|len| !preferred.contains(len)))
            .any(|salt_len| {
                key.verify(Pss::new_with_salt::<Sha256>(salt_len), &digest, &signature)
                    .is_ok()
            });

        if verified {
            Ok(())
        } else {
            Err(VerifyError::SignatureMismatch)
        }
    }
}

/// Largest salt an EMSA-PSS encoding can carry for this key and digest size.
fn max_salt_len(key: &RsaPublicKey, digest_len: usize) -> Option<usize> {
    let em_len = key.n().bits().saturating_sub(1).div_ceil(8);
    em_len.checked_sub(digest_len + 2)
}

/// Verify with [`PssSha256Verifier`], folding every failure into `false`.
#[must_use]
pub fn verify_signature(key: &RsaPublicKey, message: &[u8], signature_hex: &str) -> bool {
    match PssSha256Verifier.verify(key, message, signature_hex) {
        Ok(()) => true,
        Err(e) => {
            debug!("signature rejected: {e}");
            false
        }
    }
}
