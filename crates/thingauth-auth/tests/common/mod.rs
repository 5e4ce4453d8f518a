#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rsa::pkcs8::DecodePrivateKey;
use rsa::pss::SigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;
use sha2::Sha256;
use thingauth_client::error::RegistryError;
use thingauth_client::registry::DeviceRegistry;
use thingauth_client::BoxFuture;
use thingauth_core::types::{CertificateId, DeviceIdentity};

pub const RSA_CERT_PEM: &str = include_str!("../fixtures/thing-42.crt.pem");
pub const RSA_KEY_PEM: &str = include_str!("../fixtures/thing-42.key.pem");
pub const P256_CERT_PEM: &str = include_str!("../fixtures/p256.crt.pem");
pub const PING_SIG_HEX: &str = include_str!("../fixtures/ping.sig.hex");

pub const CERT_ARN: &str = "arn:aws:iot:eu-north-1:123456789012:cert/cert-9";

/// Sign `message` with the fixture key using PSS over SHA-256.
pub fn sign_hex(message: &[u8]) -> String {
    let private_key = RsaPrivateKey::from_pkcs8_pem(RSA_KEY_PEM).unwrap();
    let signing_key = SigningKey::<Sha256>::new(private_key);
    let mut rng = rand::thread_rng();
    hex::encode(signing_key.sign_with_rng(&mut rng, message).to_bytes())
}

/// Flip the lowest bit of byte `index` of a hex signature.
pub fn flip_bit(signature_hex: &str, index: usize) -> String {
    let mut bytes = hex::decode(signature_hex).unwrap();
    bytes[index] ^= 0x01;
    hex::encode(bytes)
}

pub fn device(name: &str) -> DeviceIdentity {
    DeviceIdentity::new(name).unwrap()
}

/// Scripted [`DeviceRegistry`] that counts its calls.
#[derive(Default)]
pub struct FakeRegistry {
    principals: HashMap<String, Vec<String>>,
    certificates: HashMap<String, String>,
    failing: bool,
    delay: Option<Duration>,
    list_calls: AtomicUsize,
    describe_calls: AtomicUsize,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_principals(mut self, device: &str, principals: &[&str]) -> Self {
        self.principals.insert(
            device.to_owned(),
            principals.iter().map(|p| (*p).to_owned()).collect(),
        );
        self
    }

    pub fn with_certificate(mut self, certificate_id: &str, pem: &str) -> Self {
        self.certificates
            .insert(certificate_id.to_owned(), pem.to_owned());
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn describe_calls(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls() + self.describe_calls()
    }
}

impl DeviceRegistry for FakeRegistry {
    fn list_principals<'a>(
        &'a self,
        device: &'a DeviceIdentity,
    ) -> BoxFuture<'a, Result<Vec<String>, RegistryError>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.failing {
                return Err(RegistryError::Service {
                    operation: "ListThingPrincipals",
                    message: "ResourceNotFoundException".to_owned(),
                });
            }
            Ok(self
                .principals
                .get(device.as_str())
                .cloned()
                .unwrap_or_default())
        })
    }

    fn describe_certificate<'a>(
        &'a self,
        certificate_id: &'a CertificateId,
    ) -> BoxFuture<'a, Result<String, RegistryError>> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.certificates
                .get(certificate_id.as_str())
                .cloned()
                .ok_or_else(|| RegistryError::Service {
                    operation: "DescribeCertificate",
                    message: format!("no certificate {certificate_id}"),
                })
        })
    }
}
