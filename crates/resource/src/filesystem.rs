//! Filesystem-based fetcher.

use fonty_traits::{DownloadProgress, FetchError, Fetcher, SharedBytes};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Reads local files. Accepts plain paths and `file://` URLs.
#[derive(Debug, Default, Clone)]
pub struct FilesystemFetcher;

impl FilesystemFetcher {
    pub fn new() -> Self {
        Self
    }

    /// Strips an optional `file://` prefix.
    pub fn resolve(location: &str) -> PathBuf {
        let path = location.strip_prefix("file://").unwrap_or(location);
        PathBuf::from(path)
    }
}

impl Fetcher for FilesystemFetcher {
    fn fetch(
        &self,
        location: &str,
        on_progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<SharedBytes, FetchError> {
        let path = Self::resolve(location);
        log::debug!("Reading {}", path.display());

        let data = std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(location.to_string())
            } else {
                FetchError::Transport {
                    location: location.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let size = data.len() as u64;
        on_progress(DownloadProgress {
            location: location.to_string(),
            received: size,
            total: Some(size),
        });
        Ok(Arc::new(data))
    }

    fn can_fetch(&self, location: &str) -> bool {
        !crate::is_http_url(location) && Path::new(&Self::resolve(location)).is_file()
    }

    fn name(&self) -> &'static str {
        "FilesystemFetcher"
    }
}
