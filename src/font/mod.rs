//! Font files, families and format conversion.
//!
//! - [`Font`]: a font file on disk with the family and variant read from its
//!   `name` table
//! - [`FontFamily`]: fonts grouped under one family name
//! - [`RemoteFont`]: a font that still has to be fetched
//! - [`woff`]: WOFF and WOFF2 container encoding

mod family;
mod file;
mod format;
mod remote;
pub mod woff;

pub use family::FontFamily;
pub use file::Font;
pub use format::FontFormat;
pub use remote::{FontSource, RemoteFont};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or converting font files.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Failed to read font '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse font '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Font '{}' has no family name", .0.display())]
    MissingName(PathBuf),

    #[error("Unsupported font data: {0}")]
    Unsupported(String),
}
