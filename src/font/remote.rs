use super::Font;
use crate::error::FontyError;
use fonty_resource::{FilesystemFetcher, is_http_url};
use fonty_traits::{DownloadProgress, Fetcher};
use fonty_variant::VariantAttribute;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where a font's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Url(String),
    Path(PathBuf),
}

impl FontSource {
    /// HTTP(S) locations become URLs, everything else a local path.
    pub fn parse(location: &str) -> Self {
        if is_http_url(location) {
            FontSource::Url(location.to_string())
        } else {
            FontSource::Path(FilesystemFetcher::resolve(location))
        }
    }

    pub fn location(&self) -> String {
        match self {
            FontSource::Url(url) => url.clone(),
            FontSource::Path(path) => path.display().to_string(),
        }
    }
}

/// A font that has not been loaded yet.
///
/// Fonts listed in a repository carry the family and variant from the
/// catalogue, so requests can be narrowed down before anything is downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFont {
    pub source: FontSource,
    pub filename: String,
    pub family: Option<String>,
    pub variant: Option<VariantAttribute>,
}

impl RemoteFont {
    pub fn from_location(location: &str) -> Self {
        let source = FontSource::parse(location);
        let filename = match &source {
            FontSource::Url(url) => filename_from_url(url),
            FontSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "font.otf".to_string()),
        };
        Self {
            source,
            filename,
            family: None,
            variant: None,
        }
    }

    pub fn with_metadata(mut self, family: impl Into<String>, variant: VariantAttribute) -> Self {
        self.family = Some(family.into());
        self.variant = Some(variant);
        self
    }

    /// Overrides the file name used for the downloaded copy.
    ///
    /// Only the last path component is kept; names that reduce to nothing
    /// usable leave the current file name in place.
    pub fn with_filename(mut self, filename: impl AsRef<str>) -> Self {
        match sanitize_filename(filename.as_ref()) {
            Some(name) => self.filename = name,
            None => log::warn!(
                "Ignoring file name '{}' for {}",
                filename.as_ref(),
                self.source.location()
            ),
        }
        self
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.source, FontSource::Url(_))
    }

    /// Makes the font available locally and reads its metadata.
    ///
    /// Local files are read in place. URLs are fetched through `fetcher` and
    /// written to a fresh file in `dir` named after `filename`, so parallel
    /// downloads never share a path. Nothing is left behind when the bytes
    /// turn out not to be a font.
    pub fn load(
        &self,
        fetcher: &dyn Fetcher,
        dir: &Path,
        on_progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<Font, FontyError> {
        let url = match &self.source {
            FontSource::Path(path) => return Ok(Font::load(path)?),
            FontSource::Url(url) => url,
        };

        let bytes = fetcher.fetch(url, on_progress)?;
        std::fs::create_dir_all(dir)?;

        let name = Path::new(&self.filename);
        let prefix = match name.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => format!("{}-", stem),
            None => "font-".to_string(),
        };
        let suffix = name
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .tempfile_in(dir)?;

        // Dropping `file` on a parse error removes it.
        let font = Font::from_bytes(file.path(), &bytes)?;
        file.write_all(bytes.as_slice())?;
        file.keep().map_err(|e| e.error)?;
        Ok(font)
    }
}

/// Reduces an untrusted name to a single plain path component.
fn sanitize_filename(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    if last.is_empty() || last == "." || last == ".." || last.contains(':') {
        return None;
    }
    Some(last.to_string())
}

/// Last path segment of a URL, without query string or fragment.
fn filename_from_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let name = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    sanitize_filename(name).unwrap_or_else(|| "download.otf".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fonty_traits::{FetchError, InMemoryFetcher};

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/fonts/Lato-Bold.ttf?v=2#x"),
            "Lato-Bold.ttf"
        );
        assert_eq!(filename_from_url("https://example.com/"), "download.otf");
        assert_eq!(filename_from_url("https://example.com/fonts/.."), "download.otf");
        assert_eq!(filename_from_url("https://example.com/a\\..\\b.ttf"), "b.ttf");
    }

    #[test]
    fn test_with_filename_keeps_only_the_last_component() {
        let remote = RemoteFont::from_location("https://example.com/x/Lato-Regular.ttf");
        assert_eq!(remote.clone().with_filename("../../escaped.ttf").filename, "escaped.ttf");
        assert_eq!(remote.clone().with_filename("/etc/fonts/abs.otf").filename, "abs.otf");
        assert_eq!(remote.clone().with_filename("..\\win.ttf").filename, "win.ttf");
        assert_eq!(remote.clone().with_filename("..").filename, "Lato-Regular.ttf");
        assert_eq!(remote.with_filename("dir/").filename, "Lato-Regular.ttf");
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            FontSource::parse("https://example.com/a.ttf"),
            FontSource::Url("https://example.com/a.ttf".into())
        );
        assert_eq!(
            FontSource::parse("file:///tmp/a.ttf"),
            FontSource::Path(PathBuf::from("/tmp/a.ttf"))
        );
    }

    #[test]
    fn test_with_metadata() {
        let remote = RemoteFont::from_location("https://example.com/x/Lato-Regular.ttf")
            .with_metadata("Lato", VariantAttribute::parse("400"));
        assert!(remote.is_remote());
        assert_eq!(remote.filename, "Lato-Regular.ttf");
        assert_eq!(remote.family.as_deref(), Some("Lato"));
    }

    #[test]
    fn test_load_rejects_and_cleans_up_non_fonts() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = InMemoryFetcher::new();
        fetcher.insert("https://example.com/bad.ttf", b"<html>".to_vec()).unwrap();

        let remote = RemoteFont::from_location("https://example.com/bad.ttf");
        let result = remote.load(&fetcher, dir.path(), &mut |_| {});
        assert!(matches!(result, Err(FontyError::Font(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_load_missing_url() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = InMemoryFetcher::new();
        let remote = RemoteFont::from_location("https://example.com/none.ttf");
        let result = remote.load(&fetcher, dir.path(), &mut |_| {});
        assert!(matches!(result, Err(FontyError::Fetch(FetchError::NotFound(_)))));
    }
}
