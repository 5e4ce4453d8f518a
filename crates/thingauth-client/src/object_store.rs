//! Object store trait, S3-backed implementation, and an in-memory store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::Client as S3Client;
use log::info;
use thingauth_core::sanitize::sanitize_str;
use tokio::sync::OnceCell;

use crate::aws::AwsSession;
use crate::error::ObjectStoreError;
use crate::BoxFuture;

/// Reads whole objects by bucket and key.
pub trait ObjectStore: Send + Sync {
    /// Fetch the full contents of `key` in `bucket`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError::NotFound`] for a missing key, or another
    /// [`ObjectStoreError`] on service or body-read failure.
    fn get<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Vec<u8>, ObjectStoreError>>;
}

/// Amazon S3 implementation of [`ObjectStore`].
#[derive(Debug)]
pub struct S3ObjectStore {
    session: Arc<AwsSession>,
    client: OnceCell<S3Client>,
}

impl S3ObjectStore {
    /// Create a store backed by `session`; the S3 client is built on first use.
    #[must_use]
    pub fn new(session: Arc<AwsSession>) -> Self {
        Self {
            session,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &S3Client {
        self.client
            .get_or_init(|| async { S3Client::new(self.session.sdk_config().await) })
            .await
    }
}

impl ObjectStore for S3ObjectStore {
    fn get<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Vec<u8>, ObjectStoreError>> {
        Box::pin(async move {
            info!(
                "fetching object {} from bucket {}",
                sanitize_str(key),
                sanitize_str(bucket)
            );

            let output = self
                .client()
                .await
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| {
                    if e.as_service_error().is_some_and(GetObjectError::is_no_such_key) {
                        ObjectStoreError::NotFound {
                            bucket: bucket.to_owned(),
                            key: key.to_owned(),
                        }
                    } else {
                        ObjectStoreError::Service(DisplayErrorContext(&e).to_string())
                    }
                })?;

            let data = output
                .body
                .collect()
                .await
                .map_err(|e| ObjectStoreError::Body(e.to_string()))?;
            Ok(data.into_bytes().to_vec())
        })
    }
}

/// An in-memory [`ObjectStore`] for tests and offline use.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<(String, String), Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `bucket`/`key`, replacing any previous object.
    pub fn put(&self, bucket: &str, key: &str, data: Vec<u8>) {
        self.objects
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert((bucket.to_owned(), key.to_owned()), data);
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn get<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Vec<u8>, ObjectStoreError>> {
        let found = self
            .objects
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned();
        Box::pin(async move {
            found.ok_or_else(|| ObjectStoreError::NotFound {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
            })
        })
    }
}
