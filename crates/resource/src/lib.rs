//! Fetchers for the fonty font manager.
//!
//! - [`FilesystemFetcher`]: local paths and `file://` URLs
//! - [`HttpFetcher`]: `http://` and `https://` URLs
//! - [`SourceFetcher`]: picks one of the above per location
//!
//! The in-memory fetcher from fonty-traits is re-exported for tests.

mod filesystem;
mod http;

pub use filesystem::FilesystemFetcher;
pub use http::HttpFetcher;

pub use fonty_traits::InMemoryFetcher;

use fonty_traits::{DownloadProgress, FetchError, Fetcher, SharedBytes};
use std::time::Duration;

/// Returns true for `http://` and `https://` locations.
pub fn is_http_url(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Dispatches HTTP(S) URLs to [`HttpFetcher`] and everything else to
/// [`FilesystemFetcher`].
#[derive(Debug)]
pub struct SourceFetcher {
    http: HttpFetcher,
    filesystem: FilesystemFetcher,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            http: HttpFetcher::new(timeout)?,
            filesystem: FilesystemFetcher::new(),
        })
    }
}

impl Fetcher for SourceFetcher {
    fn fetch(
        &self,
        location: &str,
        on_progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<SharedBytes, FetchError> {
        if is_http_url(location) {
            self.http.fetch(location, on_progress)
        } else {
            self.filesystem.fetch(location, on_progress)
        }
    }

    fn can_fetch(&self, location: &str) -> bool {
        self.http.can_fetch(location) || self.filesystem.can_fetch(location)
    }

    fn name(&self) -> &'static str {
        "SourceFetcher"
    }
}
