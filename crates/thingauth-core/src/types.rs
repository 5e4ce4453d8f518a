//! Validated newtype wrappers for core domain primitives.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length, in characters, of a device (thing) name accepted by the registry.
pub const MAX_DEVICE_NAME_LEN: usize = 128;

/// Error returned when a domain value fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is empty.
    #[error("value must not be empty")]
    Empty,
    /// The value exceeds the maximum length.
    #[error("value exceeds maximum length of {max} characters (got {got})")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length.
        got: usize,
    },
    /// The value contains a path separator or control character.
    #[error("value contains invalid characters: path separators and control characters are not allowed")]
    InvalidCharacters,
    /// The value is a relative path component (`.` or `..`).
    #[error("value must not be a relative path component")]
    PathTraversal,
}

/// A validated device (thing) name.
///
/// The name doubles as the certificate cache key, so it is restricted to
/// values that are safe to use as a single file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceIdentity(String);

impl DeviceIdentity {
    /// Create a new `DeviceIdentity`, validating that it is usable as a storage key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the name is empty, longer than
    /// [`MAX_DEVICE_NAME_LEN`], is `.` or `..`, or contains `/`, `\` or a
    /// control character.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::Empty);
        }
        let len = name.chars().count();
        if len > MAX_DEVICE_NAME_LEN {
            return Err(ValidationError::TooLong {
                max: MAX_DEVICE_NAME_LEN,
                got: len,
            });
        }
        if name == "." || name == ".." {
            return Err(ValidationError::PathTraversal);
        }
        if name
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
        {
            return Err(ValidationError::InvalidCharacters);
        }
        Ok(Self(name.to_owned()))
    }

    /// Return the inner name string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceIdentity {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<DeviceIdentity> for String {
    fn from(value: DeviceIdentity) -> Self {
        value.0
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registry certificate identifier, the trailing segment of a principal reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateId(String);

impl CertificateId {
    /// Create a new `CertificateId`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] if `id` is empty.
    pub fn new(id: &str) -> Result<Self, ValidationError> {
        if id.is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(Self(id.to_owned()))
    }

    /// Return the inner identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw PEM bytes of a single X.509 certificate.
///
/// Material is immutable once created; a newer resolution replaces it wholesale.
#[derive(Clone, PartialEq, Eq)]
pub struct CertificateMaterial(Vec<u8>);

impl CertificateMaterial {
    /// Wrap raw PEM bytes.
    #[must_use]
    pub fn from_pem_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the raw PEM bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<String> for CertificateMaterial {
    fn from(pem: String) -> Self {
        Self(pem.into_bytes())
    }
}

impl fmt::Debug for CertificateMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateMaterial")
            .field("len", &self.0.len())
            .finish()
    }
}
