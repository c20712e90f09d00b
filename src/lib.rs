//! fonty, a friendly command-line font manager.
//!
//! Installs font families from subscribed repositories, URLs or local files,
//! keeps a manifest of what is installed, and turns fonts into web fonts.
//! Variant handling (`"700i"`, `"Bold Italic"`, ...) lives in
//! [`fonty_variant`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod font;
pub mod install;
pub mod manifest;
pub mod search;
pub mod source;

pub use config::FontyConfig;
pub use error::FontyError;
pub use font::{Font, FontError, FontFamily, FontFormat, RemoteFont};
pub use manifest::Manifest;

pub use fonty_variant::{FontStretch, FontStyle, FontWeight, VariantAttribute};
