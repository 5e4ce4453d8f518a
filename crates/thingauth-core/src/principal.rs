//! Principal references returned by the device registry, e.g.
//! `arn:aws:iot:eu-north-1:123456789012:cert/abc123`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CertificateId, ValidationError};

/// Error returned when a principal reference cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The string does not contain a `/` separator.
    #[error("principal reference must be in the form 'prefix/certificateId'")]
    MissingSlash,
    /// The certificate id segment is invalid.
    #[error("invalid certificate id: {0}")]
    InvalidCertificateId(#[from] ValidationError),
}

/// A principal attached to a device in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalReference {
    /// Everything before the first `/`.
    pub prefix: String,
    /// Certificate id, the segment following the first `/`.
    pub certificate_id: CertificateId,
    raw: String,
}

impl PrincipalReference {
    /// Parse a principal reference of the form `prefix/certificateId`.
    ///
    /// The certificate id is the segment between the first `/` and the next
    /// one (or the end of the string); anything after a second `/` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if there is no separator or the id is empty.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let (prefix, rest) = input.split_once('/').ok_or(ParseError::MissingSlash)?;
        let id = rest.split('/').next().unwrap_or_default();
        Ok(Self {
            prefix: prefix.to_owned(),
            certificate_id: CertificateId::new(id)?,
            raw: input.to_owned(),
        })
    }
}

impl fmt::Display for PrincipalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
