pub mod executor;
pub mod fetch;

pub use executor::{Executor, SyncExecutor};
pub use fetch::{DownloadProgress, FetchError, Fetcher, InMemoryFetcher, SharedBytes};
