//! Configuration for the fonty command line tool.
//!
//! Settings live in `config.json` inside the application directory. Every
//! field has a default, so a missing file or a partial one both work.

use crate::error::FontyError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the application directory.
pub const APP_DIR_ENV: &str = "FONTY_HOME";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontyConfig {
    /// Directory holding the manifest, subscriptions and downloaded repositories
    #[serde(default = "default_app_dir")]
    pub app_dir: PathBuf,

    /// Directory fonts are installed into when no output directory is given
    #[serde(default = "default_font_dir")]
    pub font_dir: PathBuf,

    /// Number of font files downloaded and parsed concurrently
    #[serde(default = "default_download_workers")]
    pub download_workers: usize,

    /// Timeout for a single HTTP request, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for FontyConfig {
    fn default() -> Self {
        Self {
            app_dir: default_app_dir(),
            font_dir: default_font_dir(),
            download_workers: default_download_workers(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

fn default_app_dir() -> PathBuf {
    if let Ok(from_env) = std::env::var(APP_DIR_ENV) {
        let trimmed = from_env.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fonty")
}

fn default_font_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        return dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Microsoft")
            .join("Windows")
            .join("Fonts");
    }

    dirs::font_dir().unwrap_or_else(|| default_app_dir().join("fonts"))
}

fn default_download_workers() -> usize {
    4
}

fn default_http_timeout_secs() -> u64 {
    30
}

impl FontyConfig {
    /// Loads the configuration from `path`, or from `config.json` in the
    /// default application directory.
    ///
    /// A missing file yields the defaults. A file that exists but cannot be
    /// parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, FontyError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_app_dir().join(CONFIG_FILE),
        };

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| FontyError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// A configuration rooted entirely inside `dir`, with fonts going to `dir/fonts`.
    pub fn with_app_dir(dir: impl Into<PathBuf>) -> Self {
        let app_dir = dir.into();
        Self {
            font_dir: app_dir.join("fonts"),
            app_dir,
            ..Self::default()
        }
    }

    pub fn save(&self) -> Result<(), FontyError> {
        std::fs::create_dir_all(&self.app_dir)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(self.config_path(), json)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), FontyError> {
        if self.download_workers == 0 {
            return Err(FontyError::Config(
                "downloadWorkers must be at least 1".to_string(),
            ));
        }
        if self.http_timeout_secs == 0 {
            return Err(FontyError::Config(
                "httpTimeoutSecs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.app_dir.join(CONFIG_FILE)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.app_dir.join("manifest.json")
    }

    pub fn subscriptions_path(&self) -> PathBuf {
        self.app_dir.join("subscriptions.json")
    }

    /// Local copies of subscribed repositories.
    pub fn repository_dir(&self) -> PathBuf {
        self.app_dir.join("repositories")
    }

    /// Scratch space for downloads waiting to be installed.
    pub fn tmp_dir(&self) -> PathBuf {
        self.app_dir.join("tmp")
    }
}
