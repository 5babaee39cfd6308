//! Rules document downloading and verbatim persistence.

use std::fs;
use std::path::Path;

use reqwest::blocking::Client;

use crate::error::{HarvestError, Result};
use crate::http::download_bytes;

/// Download the rules document.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL of the plain-text rules document
///
/// # Returns
/// Raw bytes of the document body
pub fn download_document(client: &Client, url: &str) -> Result<Vec<u8>> {
    download_bytes(client, url).map_err(|e| {
        if let HarvestError::Http(source) = e {
            HarvestError::DocumentDownload {
                url: url.to_string(),
                source,
            }
        } else {
            e
        }
    })
}

/// Persist the raw document bytes to a local path, byte for byte.
///
/// An existing file at `path` is overwritten.
pub fn persist_raw(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "Raw document persisted");
    Ok(())
}
