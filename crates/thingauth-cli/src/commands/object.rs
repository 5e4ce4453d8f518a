//! `thingauth object <bucket> <key>`: download an object.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use thingauth_client::object_store::ObjectStore;
use thingauth_core::sanitize::sanitize_display;

/// Fetch `bucket`/`key`. With `output`, write the object there and return
/// `None`; otherwise return the bytes for the caller to print.
///
/// # Errors
///
/// Returns an error if the fetch fails or the output file cannot be written.
pub async fn run_object(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    output: Option<&Path>,
) -> Result<Option<Vec<u8>>> {
    let data = store
        .get(bucket, key)
        .await
        .with_context(|| format!("fetching s3://{bucket}/{key}"))?;

    let Some(path) = output else {
        return Ok(Some(data));
    };
    std::fs::write(path, &data)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        "wrote {} bytes to {}",
        data.len(),
        sanitize_display(&path.display())
    );
    Ok(None)
}
