//! Cache-first certificate resolution through the device registry.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use thingauth_client::error::RegistryError;
use thingauth_client::registry::DeviceRegistry;
use thingauth_client::BoxFuture;
use thingauth_core::principal::PrincipalReference;
use thingauth_core::sanitize::sanitize_str;
use thingauth_core::types::{CertificateId, CertificateMaterial, DeviceIdentity};

use crate::cache::CertificateCache;
use crate::error::ResolveError;

/// Deadline applied to each registry round trip unless overridden.
pub const DEFAULT_REGISTRY_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves device certificates, reading through the local cache.
///
/// On a miss the registry is asked for the device's principals, the first
/// principal is taken as the device's certificate, and the fetched PEM is
/// written back to the cache. Devices are assumed to carry exactly one
/// relevant certificate; further principals are ignored.
pub struct CertificateResolver {
    cache: Arc<dyn CertificateCache>,
    registry: Arc<dyn DeviceRegistry>,
    timeout: Duration,
}

impl CertificateResolver {
    /// Create a resolver with [`DEFAULT_REGISTRY_TIMEOUT`].
    pub fn new(cache: Arc<dyn CertificateCache>, registry: Arc<dyn DeviceRegistry>) -> Self {
        Self {
            cache,
            registry,
            timeout: DEFAULT_REGISTRY_TIMEOUT,
        }
    }

    /// Override the per-call registry deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Return the certificate for `device`, from cache if present, otherwise
    /// from the registry.
    ///
    /// A cache read failure is logged and handled like a miss.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the registry lookup fails, the principal is
    /// malformed, or the fetched certificate cannot be cached.
    pub async fn get_certificate(
        &self,
        device: &DeviceIdentity,
    ) -> Result<CertificateMaterial, ResolveError> {
        let name = sanitize_str(device.as_str());
        match self.cache.read(device) {
            Ok(Some(material)) => {
                debug!("certificate cache hit for {name}");
                return Ok(material);
            }
            Ok(None) => debug!("certificate cache miss for {name}"),
            Err(e) => warn!("certificate cache read failed for {name}, using registry: {e}"),
        }

        let principal = self.resolve_principal(device).await?;
        self.fetch_certificate(&principal.certificate_id, device)
            .await
    }

    /// Look up the first principal attached to `device`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Registry`] on lookup failure,
    /// [`ResolveError::NoPrincipals`] if nothing is attached, and
    /// [`ResolveError::MalformedReference`] if the principal has no `/`.
    pub async fn resolve_principal(
        &self,
        device: &DeviceIdentity,
    ) -> Result<PrincipalReference, ResolveError> {
        let principals = self
            .with_deadline("ListThingPrincipals", self.registry.list_principals(device))
            .await?;

        let mut principals = principals.into_iter();
        let first = principals
            .next()
            .ok_or_else(|| ResolveError::NoPrincipals(sanitize_str(device.as_str())))?;
        let ignored = principals.len();
        if ignored > 0 {
            debug!(
                "{} has {ignored} further principal(s); using the first",
                sanitize_str(device.as_str())
            );
        }

        PrincipalReference::parse(&first).map_err(|source| ResolveError::MalformedReference {
            reference: sanitize_str(&first),
            source,
        })
    }

    /// Fetch certificate `certificate_id` from the registry and cache it
    /// under `device`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Registry`] on lookup failure and
    /// [`ResolveError::Cache`] if the certificate cannot be persisted.
    pub async fn fetch_certificate(
        &self,
        certificate_id: &CertificateId,
        device: &DeviceIdentity,
    ) -> Result<CertificateMaterial, ResolveError> {
        let pem = self
            .with_deadline(
                "DescribeCertificate",
                self.registry.describe_certificate(certificate_id),
            )
            .await?;

        let material = CertificateMaterial::from(pem);
        self.cache.write(device, &material)?;
        info!(
            "cached certificate {} for {}",
            sanitize_str(certificate_id.as_str()),
            sanitize_str(device.as_str())
        );
        Ok(material)
    }

    async fn with_deadline<T>(
        &self,
        operation: &'static str,
        call: BoxFuture<'_, Result<T, RegistryError>>,
    ) -> Result<T, RegistryError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| RegistryError::Timeout {
                operation,
                after: self.timeout,
            })?
    }
}
