//! Error types for registry and object store operations.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during device registry lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry service rejected or failed the request.
    #[error("{operation} failed: {message}")]
    Service {
        /// Registry operation name.
        operation: &'static str,
        /// Rendered service or transport error.
        message: String,
    },
    /// The registry did not answer in time.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// Registry operation name.
        operation: &'static str,
        /// Configured deadline.
        after: Duration,
    },
    /// The certificate description came back without a PEM body.
    #[error("certificate '{0}' has no PEM body")]
    MissingCertificatePem(String),
}

/// Errors that can occur when fetching an object.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    /// No object exists under the key.
    #[error("object '{key}' not found in bucket '{bucket}'")]
    NotFound {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },
    /// The store rejected or failed the request.
    #[error("object store GET failed: {0}")]
    Service(String),
    /// The response body could not be read.
    #[error("failed to read object body: {0}")]
    Body(String),
}
