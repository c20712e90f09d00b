//! Installing font files into a font directory.
//!
//! Installers work file by file and report an outcome per font, so one bad
//! file never aborts a whole family.

mod directory;

pub use directory::DirectoryInstaller;

use crate::config::FontyConfig;
use crate::font::Font;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Font file '{}' does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to install '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What happened to one font.
#[derive(Debug)]
pub struct InstallOutcome {
    pub font: Font,
    /// The file's new location after installing, or the removed file after uninstalling.
    pub result: Result<PathBuf, InstallError>,
}

impl InstallOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Splits outcomes into fonts at their resulting paths and failures.
pub fn partition(outcomes: Vec<InstallOutcome>) -> (Vec<Font>, Vec<(Font, InstallError)>) {
    let mut done = Vec::new();
    let mut failed = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(path) => done.push(Font { path, ..outcome.font }),
            Err(err) => failed.push((outcome.font, err)),
        }
    }
    (done, failed)
}

/// Places fonts where the system (or the user) can find them.
pub trait FontInstaller: Send + Sync + Debug {
    fn install(&self, fonts: &[Font]) -> Vec<InstallOutcome>;

    fn uninstall(&self, fonts: &[Font]) -> Vec<InstallOutcome>;

    /// Directory fonts end up in.
    fn target(&self) -> &Path;

    fn name(&self) -> &'static str;
}

/// The installer for the user's font directory.
pub fn system_installer(config: &FontyConfig) -> DirectoryInstaller {
    DirectoryInstaller::new(&config.font_dir)
}
