use std::sync::Arc;

use thingauth_auth::authenticator::ThingAuthenticator;
use thingauth_auth::cache::{CertificateCache, InMemoryCertificateCache};
use thingauth_auth::resolver::CertificateResolver;
use thingauth_cli::commands::certificate::run_certificate;
use thingauth_cli::commands::verify::{run_verify, VerifyOutcome};
use thingauth_client::error::RegistryError;
use thingauth_client::registry::DeviceRegistry;
use thingauth_client::BoxFuture;
use thingauth_core::types::{CertificateId, CertificateMaterial, DeviceIdentity};

const RSA_CERT_PEM: &str = include_str!("fixtures/thing-42.crt.pem");
const PING_SIG_HEX: &str = include_str!("fixtures/ping.sig.hex");

struct OfflineRegistry;

impl DeviceRegistry for OfflineRegistry {
    fn list_principals<'a>(
        &'a self,
        _device: &'a DeviceIdentity,
    ) -> BoxFuture<'a, Result<Vec<String>, RegistryError>> {
        Box::pin(async {
            Err(RegistryError::Service {
                operation: "ListThingPrincipals",
                message: "offline".to_owned(),
            })
        })
    }

    fn describe_certificate<'a>(
        &'a self,
        _certificate_id: &'a CertificateId,
    ) -> BoxFuture<'a, Result<String, RegistryError>> {
        Box::pin(async {
            Err(RegistryError::Service {
                operation: "DescribeCertificate",
                message: "offline".to_owned(),
            })
        })
    }
}

fn authenticator_with_cached_thing_42() -> ThingAuthenticator {
    let cache = Arc::new(InMemoryCertificateCache::new());
    cache
        .write(
            &DeviceIdentity::new("thing-42").unwrap(),
            &CertificateMaterial::from(RSA_CERT_PEM.to_owned()),
        )
        .unwrap();
    ThingAuthenticator::new(CertificateResolver::new(cache, Arc::new(OfflineRegistry)))
}

#[tokio::test]
async fn verify_reports_valid_signature() {
    let auth = authenticator_with_cached_thing_42();
    let outcome = run_verify(&auth, "thing-42", b"ping", PING_SIG_HEX.trim()).await;
    assert_eq!(
        outcome,
        VerifyOutcome {
            thing: "thing-42".to_owned(),
            verified: true
        }
    );
    assert_eq!(outcome.render(false).unwrap(), "verified");
}

#[tokio::test]
async fn verify_reports_rejection_for_unknown_device() {
    let auth = authenticator_with_cached_thing_42();
    let outcome = run_verify(&auth, "thing-43", b"ping", PING_SIG_HEX.trim()).await;
    assert!(!outcome.verified);
}

#[tokio::test]
async fn certificate_prints_cached_pem() {
    let auth = authenticator_with_cached_thing_42();
    let pem = run_certificate(auth.resolver(), "thing-42").await.unwrap();
    assert_eq!(pem, RSA_CERT_PEM);
}

#[tokio::test]
async fn certificate_rejects_invalid_names() {
    let auth = authenticator_with_cached_thing_42();
    assert!(run_certificate(auth.resolver(), "../etc").await.is_err());
}
