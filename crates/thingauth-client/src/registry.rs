//! Device registry trait and AWS IoT-backed implementation.

use std::sync::Arc;

use aws_sdk_iot::error::DisplayErrorContext;
use aws_sdk_iot::Client as IotClient;
use log::debug;
use thingauth_core::sanitize::sanitize_str;
use thingauth_core::types::{CertificateId, DeviceIdentity};
use tokio::sync::OnceCell;

use crate::aws::AwsSession;
use crate::error::RegistryError;
use crate::BoxFuture;

/// Looks up devices and their certificates in a device registry.
pub trait DeviceRegistry: Send + Sync {
    /// List the principals attached to `device`, in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] on service or transport failure.
    fn list_principals<'a>(
        &'a self,
        device: &'a DeviceIdentity,
    ) -> BoxFuture<'a, Result<Vec<String>, RegistryError>>;

    /// Fetch the PEM body of the certificate `certificate_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] on service or transport failure, or if the
    /// registry has no PEM for the certificate.
    fn describe_certificate<'a>(
        &'a self,
        certificate_id: &'a CertificateId,
    ) -> BoxFuture<'a, Result<String, RegistryError>>;
}

/// AWS IoT Core implementation of [`DeviceRegistry`].
///
/// The IoT client is built on first use from the shared [`AwsSession`].
#[derive(Debug)]
pub struct IotDeviceRegistry {
    session: Arc<AwsSession>,
    client: OnceCell<IotClient>,
}

impl IotDeviceRegistry {
    /// Create a registry backed by `session`.
    #[must_use]
    pub fn new(session: Arc<AwsSession>) -> Self {
        Self {
            session,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &IotClient {
        self.client
            .get_or_init(|| async { IotClient::new(self.session.sdk_config().await) })
            .await
    }
}

impl DeviceRegistry for IotDeviceRegistry {
    fn list_principals<'a>(
        &'a self,
        device: &'a DeviceIdentity,
    ) -> BoxFuture<'a, Result<Vec<String>, RegistryError>> {
        Box::pin(async move {
            let output = self
                .client()
                .await
                .list_thing_principals()
                .thing_name(device.as_str())
                .send()
                .await
                .map_err(|e| RegistryError::Service {
                    operation: "ListThingPrincipals",
                    message: DisplayErrorContext(&e).to_string(),
                })?;

            let principals = output.principals().to_vec();
            debug!(
                "ListThingPrincipals for {} returned {} principal(s)",
                sanitize_str(device.as_str()),
                principals.len()
            );
            Ok(principals)
        })
    }

    fn describe_certificate<'a>(
        &'a self,
        certificate_id: &'a CertificateId,
    ) -> BoxFuture<'a, Result<String, RegistryError>> {
        Box::pin(async move {
            let output = self
                .client()
                .await
                .describe_certificate()
                .certificate_id(certificate_id.as_str())
                .send()
                .await
                .map_err(|e| RegistryError::Service {
                    operation: "DescribeCertificate",
                    message: DisplayErrorContext(&e).to_string(),
                })?;

            let pem = output
                .certificate_description()
                .and_then(|d| d.certificate_pem())
                .ok_or_else(|| RegistryError::MissingCertificatePem(certificate_id.to_string()))?;
            debug!(
                "DescribeCertificate returned {} bytes for {}",
                pem.len(),
                sanitize_str(certificate_id.as_str())
            );
            Ok(pem.to_owned())
        })
    }
}
