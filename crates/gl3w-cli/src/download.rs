//! Khronos header download
//!
//! Headers already on disk are reused as-is; there is no staleness check.

use gl3w_core::{Error, Result};
use reqwest::blocking::Client;
use std::path::Path;
use tracing::info;

/// What [`Downloader::fetch`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Reused,
    Downloaded(usize),
}

/// Blocking HTTP fetcher with an on-disk cache
pub struct Downloader {
    client: Client,
    offline: bool,
}

impl Downloader {
    pub fn new(user_agent: &str, offline: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Download(e.to_string()))?;
        Ok(Self { client, offline })
    }

    /// Fetch `url` into `dst` unless `dst` already exists
    pub fn fetch(&self, url: &str, dst: &Path) -> Result<FetchOutcome> {
        if dst.exists() {
            info!("Reusing {}...", dst.display());
            return Ok(FetchOutcome::Reused);
        }
        if self.offline {
            return Err(Error::Download(format!(
                "{} is not cached and downloads are disabled",
                dst.display()
            )));
        }

        info!("Downloading {}...", dst.display());
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .map_err(|e| Error::Download(format!("{}: {}", url, e)))?;

        std::fs::write(dst, &body)?;
        Ok(FetchOutcome::Downloaded(body.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_file_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("glcorearb.h");
        std::fs::write(&dst, "cached").unwrap();

        // Unroutable URL: reaching the network would fail the test
        let downloader = Downloader::new("Mozilla/5.0", false).unwrap();
        let outcome = downloader.fetch("http://127.0.0.1:9/glcorearb.h", &dst).unwrap();

        assert_eq!(outcome, FetchOutcome::Reused);
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "cached");
    }

    #[test]
    fn test_offline_miss_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("khrplatform.h");

        let downloader = Downloader::new("Mozilla/5.0", true).unwrap();
        let err = downloader.fetch("http://127.0.0.1:9/khrplatform.h", &dst).unwrap_err();

        assert!(matches!(err, Error::Download(_)));
        assert!(!dst.exists());
    }
}
