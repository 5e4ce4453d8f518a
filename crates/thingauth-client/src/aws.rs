//! Shared AWS SDK configuration, loaded lazily and at most once per session.

use std::fmt;

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_iot::config::{Credentials, Region};
use log::debug;
use tokio::sync::OnceCell;

/// Region used when neither the settings nor the environment name one.
pub const DEFAULT_REGION: &str = "eu-north-1";

const STATIC_PROVIDER_NAME: &str = "thingauth-static";

/// A fixed access key pair.
#[derive(Clone)]
pub struct StaticCredentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

/// Inputs for building an [`SdkConfig`].
#[derive(Debug, Clone, Default)]
pub struct AwsSettings {
    /// Static credentials; `None` falls back to the default provider chain.
    pub credentials: Option<StaticCredentials>,
    /// Explicit region; `None` tries the environment, then [`DEFAULT_REGION`].
    pub region: Option<String>,
}

/// Lazily-initialised SDK configuration shared by the service clients.
///
/// Concurrent first callers wait on the same initialisation; the config is
/// built exactly once.
#[derive(Debug)]
pub struct AwsSession {
    settings: AwsSettings,
    config: OnceCell<SdkConfig>,
}

impl AwsSession {
    /// Create a session that will load its config on first use.
    #[must_use]
    pub fn new(settings: AwsSettings) -> Self {
        Self {
            settings,
            config: OnceCell::new(),
        }
    }

    /// Return the SDK config, loading it on the first call.
    pub async fn sdk_config(&self) -> &SdkConfig {
        self.config
            .get_or_init(|| load_sdk_config(&self.settings))
            .await
    }
}

/// Build an [`SdkConfig`] from `settings`.
pub async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let region = RegionProviderChain::first_try(settings.region.clone().map(Region::new))
        .or_default_provider()
        .or_else(Region::new(DEFAULT_REGION));

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
    if let Some(creds) = &settings.credentials {
        loader = loader.credentials_provider(Credentials::new(
            creds.access_key_id.clone(),
            creds.secret_access_key.clone(),
            None,
            None,
            STATIC_PROVIDER_NAME,
        ));
    }

    let config = loader.load().await;
    debug!(
        "loaded AWS config for region {}",
        config.region().map_or("<none>", Region::as_ref)
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_secret() {
        let creds = StaticCredentials {
            access_key_id: "AKIAEXAMPLE".to_owned(),
            secret_access_key: "super-secret".to_owned(),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("AKIAEXAMPLE"));
        assert!(!rendered.contains("super-secret"));
    }

    #[tokio::test]
    async fn explicit_region_wins() {
        let session = AwsSession::new(AwsSettings {
            credentials: Some(StaticCredentials {
                access_key_id: "AKIAEXAMPLE".to_owned(),
                secret_access_key: "secret".to_owned(),
            }),
            region: Some("us-west-2".to_owned()),
        });
        let config = session.sdk_config().await;
        assert_eq!(config.region().map(Region::as_ref), Some("us-west-2"));
    }

    #[tokio::test]
    async fn config_is_loaded_once() {
        let session = AwsSession::new(AwsSettings {
            credentials: None,
            region: Some("eu-north-1".to_owned()),
        });
        let first: *const SdkConfig = session.sdk_config().await;
        let second: *const SdkConfig = session.sdk_config().await;
        assert_eq!(first, second);
    }
}
