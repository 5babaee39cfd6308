//! HTTP client wrapper for downloading the rules document.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::Result;

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("comprules-harvester/", env!("CARGO_PKG_VERSION"));

/// TLS peer and hostname verification is disabled for the download.
///
/// The media host historically served certificates that fail strict
/// verification, and the document itself is public. This is part of the
/// current contract rather than a hard requirement of the segmenter.
const ACCEPT_INVALID_CERTS: bool = true;

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and
/// user agent, and with certificate verification disabled (see
/// [`ACCEPT_INVALID_CERTS`]).
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(ACCEPT_INVALID_CERTS)
        .build()?;
    Ok(client)
}

/// Download content from a URL.
///
/// There is no retry policy: every fetch either succeeds or fails the run.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    tracing::debug!(url, "Sending GET request");
    let response = client.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;
    tracing::debug!(len = bytes.len(), "Download complete");
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }
}
