//! `thingauth certificate <thing>`: print a device's certificate.

use anyhow::{Context, Result};
use thingauth_auth::resolver::CertificateResolver;
use thingauth_core::types::DeviceIdentity;

/// Resolve the certificate for `thing` (cache first) and return it as text.
///
/// # Errors
///
/// Returns an error if the name is invalid or resolution fails.
pub async fn run_certificate(resolver: &CertificateResolver, thing: &str) -> Result<String> {
    let device = DeviceIdentity::new(thing).context("invalid device name")?;
    let material = resolver
        .get_certificate(&device)
        .await
        .with_context(|| format!("resolving certificate for {device}"))?;
    Ok(String::from_utf8_lossy(material.as_bytes()).into_owned())
}
