//! PEM/X.509 certificate decoding down to an RSA public key.

use log::debug;
use rsa::traits::PublicKeyParts as _;
use rsa::{BigUint, RsaPublicKey};
use thingauth_core::types::CertificateMaterial;
use x509_parser::pem::parse_x509_pem;
use x509_parser::public_key::PublicKey;

use crate::error::DecodeError;

const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Largest RSA modulus accepted, in bits.
pub const MAX_RSA_MODULUS_BITS: usize = 16384;

/// Decode a PEM certificate and extract its RSA public key.
///
/// Only the first PEM block is considered. The certificate is not checked
/// against any trust anchor, validity window or revocation list. Moduli up
/// to [`MAX_RSA_MODULUS_BITS`] are accepted.
///
/// # Errors
///
/// Returns [`DecodeError`] if the PEM or DER is malformed, the block is not a
/// certificate, or the embedded key is not RSA.
pub fn decode_certificate(material: &CertificateMaterial) -> Result<RsaPublicKey, DecodeError> {
    let (_, pem) =
        parse_x509_pem(material.as_bytes()).map_err(|e| DecodeError::Pem(e.to_string()))?;
    if pem.label != CERTIFICATE_LABEL {
        return Err(DecodeError::UnexpectedLabel(pem.label));
    }

    let cert = pem
        .parse_x509()
        .map_err(|e| DecodeError::X509(e.to_string()))?;
    let spki = cert.public_key();

    let rsa_key = match spki.parsed() {
        Ok(PublicKey::RSA(rsa_key)) => rsa_key,
        Ok(_) => {
            return Err(DecodeError::UnsupportedKeyAlgorithm(
                spki.algorithm.algorithm.to_id_string(),
            ))
        }
        Err(e) => return Err(DecodeError::X509(e.to_string())),
    };

    let key = RsaPublicKey::new_with_max_size(
        BigUint::from_bytes_be(rsa_key.modulus),
        BigUint::from_bytes_be(rsa_key.exponent),
        MAX_RSA_MODULUS_BITS,
    )
    .map_err(|e| DecodeError::InvalidRsaKey(e.to_string()))?;
    debug!("decoded {}-bit RSA key from certificate", key.size() * 8);
    Ok(key)
}
