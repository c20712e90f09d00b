//! Fetcher trait for retrieving font files and repository catalogues.
//!
//! A fetcher turns a location (URL or path) into bytes and reports download
//! progress through a callback. Rendering that progress is up to the caller.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for fetch operations.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request to '{location}' failed with HTTP status {status}")]
    Http { location: String, status: u16 },

    #[error("Failed to fetch '{location}': {message}")]
    Transport { location: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

/// Fetched bytes, shared so parallel workers can hand them around cheaply.
pub type SharedBytes = Arc<Vec<u8>>;

/// A progress notification emitted while a location is being fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadProgress {
    pub location: String,
    /// Bytes received so far.
    pub received: u64,
    /// Expected size, when the source announces one.
    pub total: Option<u64>,
}

impl DownloadProgress {
    pub fn is_complete(&self) -> bool {
        self.total.is_some_and(|total| self.received >= total)
    }
}

/// Retrieves raw bytes by location.
///
/// # Implementations
///
/// - `FilesystemFetcher`, `HttpFetcher`, `SourceFetcher` in `fonty-resource`
/// - [`InMemoryFetcher`]: pre-populated map, handy for tests
pub trait Fetcher: Send + Sync + Debug {
    /// Fetch a location, calling `on_progress` as data arrives.
    fn fetch(
        &self,
        location: &str,
        on_progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<SharedBytes, FetchError>;

    /// Whether this fetcher understands the location's scheme.
    fn can_fetch(&self, location: &str) -> bool;

    /// Returns a human-readable name for this fetcher (for logging).
    fn name(&self) -> &'static str;

    /// Fetch without progress reporting.
    fn fetch_quiet(&self, location: &str) -> Result<SharedBytes, FetchError> {
        self.fetch(location, &mut |_| {})
    }
}

/// An in-memory fetcher keyed by exact location.
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    entries: RwLock<HashMap<String, SharedBytes>>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the bytes served for `location`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Io` if the internal lock is poisoned.
    pub fn insert(&self, location: impl Into<String>, data: Vec<u8>) -> Result<(), FetchError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| FetchError::Io("fetcher store lock poisoned".to_string()))?;
        entries.insert(location.into(), Arc::new(data));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Fetcher for InMemoryFetcher {
    fn fetch(
        &self,
        location: &str,
        on_progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<SharedBytes, FetchError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| FetchError::Io("fetcher store lock poisoned".to_string()))?;
        let data = entries
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(location.to_string()))?;

        let size = data.len() as u64;
        on_progress(DownloadProgress {
            location: location.to_string(),
            received: size,
            total: Some(size),
        });
        Ok(data)
    }

    fn can_fetch(&self, location: &str) -> bool {
        self.entries
            .read()
            .map(|e| e.contains_key(location))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryFetcher"
    }
}
