//! Runtime configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thingauth_client::aws::{AwsSession, AwsSettings, StaticCredentials};
use thingauth_client::registry::IotDeviceRegistry;
use thiserror::Error;

use crate::authenticator::ThingAuthenticator;
use crate::cache::FsCertificateCache;
use crate::resolver::{CertificateResolver, DEFAULT_REGISTRY_TIMEOUT};

/// Registry access key id variable.
pub const ACCESS_KEY_ID_VAR: &str = "IOT_AWS_ACCESS_KEY_ID";
/// Registry secret access key variable.
pub const SECRET_ACCESS_KEY_VAR: &str = "IOT_AWS_SECRET_ACCESS_KEY";
/// Region variable.
pub const REGION_VAR: &str = "AWS_REGION";
/// Certificate cache directory variable.
pub const CACHE_DIR_VAR: &str = "THINGAUTH_CACHE_DIR";
/// Registry timeout (whole seconds) variable.
pub const REGISTRY_TIMEOUT_VAR: &str = "THINGAUTH_REGISTRY_TIMEOUT_SECS";

const DEFAULT_CACHE_DIR: &str = "certs";

/// Errors during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    Missing(String),
    /// A variable is set to an unusable value.
    #[error("invalid value '{value}' for environment variable {name}")]
    Invalid {
        /// Variable name.
        name: String,
        /// Rejected value.
        value: String,
    },
}

/// Authentication runtime configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Credentials and region for the device registry.
    pub registry: AwsSettings,
    /// Directory holding cached certificates.
    pub cache_dir: PathBuf,
    /// Deadline for each registry round trip.
    pub registry_timeout: Duration,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the registry credentials are not
    /// set and [`ConfigError::Invalid`] if the timeout is not a positive
    /// integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// See [`AuthConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required =
            |name: &str| non_empty(name).ok_or_else(|| ConfigError::Missing(name.to_owned()));

        let registry_timeout = match non_empty(REGISTRY_TIMEOUT_VAR) {
            None => DEFAULT_REGISTRY_TIMEOUT,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: REGISTRY_TIMEOUT_VAR.to_owned(),
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            registry: AwsSettings {
                credentials: Some(StaticCredentials {
                    access_key_id: required(ACCESS_KEY_ID_VAR)?,
                    secret_access_key: required(SECRET_ACCESS_KEY_VAR)?,
                }),
                region: non_empty(REGION_VAR),
            },
            cache_dir: non_empty(CACHE_DIR_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR), PathBuf::from),
            registry_timeout,
        })
    }

    /// Wire a filesystem cache and the IoT registry into an authenticator.
    ///
    /// No network traffic happens until the first cache miss.
    #[must_use]
    pub fn build_authenticator(&self) -> ThingAuthenticator {
        let session = Arc::new(AwsSession::new(self.registry.clone()));
        let resolver = CertificateResolver::new(
            Arc::new(FsCertificateCache::new(self.cache_dir.clone())),
            Arc::new(IotDeviceRegistry::new(session)),
        )
        .with_timeout(self.registry_timeout);
        ThingAuthenticator::new(resolver)
    }
}
