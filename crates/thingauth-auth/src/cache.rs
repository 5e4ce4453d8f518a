//! Local certificate cache keyed by device identity.
//!
//! Entries never expire. A cached certificate is trusted until the entry is
//! overwritten by a later resolution or removed out of band.

use std::collections::HashMap;
use std::io::{ErrorKind, Write as _};
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use log::debug;
use thingauth_core::sanitize::sanitize_display;
use thingauth_core::types::{CertificateMaterial, DeviceIdentity};

use crate::error::CacheError;

/// File mode for cache entries: owner read/write, group and other read.
#[cfg(unix)]
const ENTRY_MODE: u32 = 0o644;

const STAGING_PREFIX: &str = ".thingauth-staging-";

/// Byte store for certificate material.
pub trait CertificateCache: Send + Sync {
    /// Return the cached certificate for `device`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend fails for a reason other than
    /// the entry being absent.
    fn read(&self, device: &DeviceIdentity) -> Result<Option<CertificateMaterial>, CacheError>;

    /// Store `material` for `device`, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the entry cannot be written.
    fn write(&self, device: &DeviceIdentity, material: &CertificateMaterial)
        -> Result<(), CacheError>;
}

/// Filesystem cache: one PEM file per device, named after the device.
///
/// Writes go to a staging file in the same directory and are renamed into
/// place, so readers see either the old or the new certificate and
/// concurrent writers resolve last-writer-wins.
#[derive(Debug, Clone)]
pub struct FsCertificateCache {
    root: PathBuf,
}

impl FsCertificateCache {
    /// Create a cache rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the entry for `device`.
    #[must_use]
    pub fn entry_path(&self, device: &DeviceIdentity) -> PathBuf {
        self.root.join(device.as_str())
    }
}

impl CertificateCache for FsCertificateCache {
    fn read(&self, device: &DeviceIdentity) -> Result<Option<CertificateMaterial>, CacheError> {
        match std::fs::read(self.entry_path(device)) {
            Ok(bytes) => Ok(Some(CertificateMaterial::from_pem_bytes(bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(
        &self,
        device: &DeviceIdentity,
        material: &CertificateMaterial,
    ) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.root)?;

        let mut staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(&self.root)?;
        staged.write_all(material.as_bytes())?;
        staged.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            staged
                .as_file()
                .set_permissions(std::fs::Permissions::from_mode(ENTRY_MODE))?;
        }

        let path = self.entry_path(device);
        staged.persist(&path).map_err(|e| e.error)?;
        debug!("wrote certificate cache entry {}", sanitize_display(&path.display()));
        Ok(())
    }
}

/// An in-memory [`CertificateCache`] for tests and short-lived processes.
#[derive(Debug, Default)]
pub struct InMemoryCertificateCache {
    entries: RwLock<HashMap<DeviceIdentity, CertificateMaterial>>,
}

impl InMemoryCertificateCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Return `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CertificateCache for InMemoryCertificateCache {
    fn read(&self, device: &DeviceIdentity) -> Result<Option<CertificateMaterial>, CacheError> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(device)
            .cloned())
    }

    fn write(
        &self,
        device: &DeviceIdentity,
        material: &CertificateMaterial,
    ) -> Result<(), CacheError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(device.clone(), material.clone());
        Ok(())
    }
}
