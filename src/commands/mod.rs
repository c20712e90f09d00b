//! The operations behind each `fonty` subcommand.
//!
//! Commands take a [`Context`] with the collaborators they need and return a
//! report; printing is left to the caller.

pub mod install;
pub mod list;
pub mod source;
pub mod uninstall;
pub mod webfont;

pub use install::{InstallReport, InstallRequest, install};
pub use list::list;
pub use uninstall::{UninstallReport, uninstall};
pub use webfont::{WebfontReport, WebfontRequest, webfont};

use crate::config::FontyConfig;
use crate::error::FontyError;
use crate::install::{FontInstaller, system_installer};
use crate::source::SubscriptionList;
use fonty_executor::ExecutorImpl;
use fonty_resource::SourceFetcher;
use fonty_traits::{Executor, Fetcher};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Everything a command needs from the outside world.
#[derive(Debug)]
pub struct Context {
    pub config: FontyConfig,
    pub fetcher: Arc<dyn Fetcher>,
    pub executor: ExecutorImpl,
    pub installer: Box<dyn FontInstaller>,
}

impl Context {
    /// Wires up the network fetcher, a worker pool and the system installer.
    pub fn new(config: FontyConfig) -> Result<Self, FontyError> {
        let fetcher = SourceFetcher::new(Duration::from_secs(config.http_timeout_secs))?;
        let executor = ExecutorImpl::with_workers(config.download_workers);
        let installer = system_installer(&config);
        log::debug!(
            "Using {} with {} worker(s), installing into {}",
            fetcher.name(),
            executor.parallelism(),
            config.font_dir.display()
        );
        Ok(Self {
            config,
            fetcher: Arc::new(fetcher),
            executor,
            installer: Box::new(installer),
        })
    }

    pub fn with_parts(
        config: FontyConfig,
        fetcher: Arc<dyn Fetcher>,
        executor: ExecutorImpl,
        installer: Box<dyn FontInstaller>,
    ) -> Self {
        Self {
            config,
            fetcher,
            executor,
            installer,
        }
    }

    pub(crate) fn subscriptions(&self) -> Result<SubscriptionList, FontyError> {
        SubscriptionList::load(&self.config.subscriptions_path())
    }
}

/// Expands glob patterns into font file paths.
///
/// Shells usually expand patterns already; this covers quoted patterns and
/// shells that do not. A pattern matching nothing is an error.
pub(crate) fn expand_file_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, FontyError> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let before = paths.len();
        for entry in glob::glob(pattern)? {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(err) => log::warn!("Skipping unreadable path: {}", err),
            }
        }
        if paths.len() == before {
            return Err(FontyError::NoFontFiles(pattern.clone()));
        }
    }
    Ok(paths)
}
