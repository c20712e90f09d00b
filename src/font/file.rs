use super::{FontError, FontFormat};
use fonty_variant::{HasVariant, VariantAttribute};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use ttf_parser::name_id;

/// A font file on disk, identified by the family and variant in its `name` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub path: PathBuf,
    pub family: String,
    pub variant: VariantAttribute,
}

impl Font {
    pub fn new(path: impl Into<PathBuf>, family: impl Into<String>, variant: VariantAttribute) -> Self {
        Self {
            path: path.into(),
            family: family.into(),
            variant,
        }
    }

    /// Reads a TrueType or OpenType file and extracts its family and variant.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, &data)
    }

    /// Builds a font from bytes already in memory, recording `path` as its location.
    ///
    /// The typographic family and subfamily (name ids 16 and 17) win over the
    /// legacy family and subfamily (ids 1 and 2) when present.
    pub fn from_bytes(path: impl Into<PathBuf>, data: &[u8]) -> Result<Self, FontError> {
        let path = path.into();
        let face = ttf_parser::Face::parse(data, 0).map_err(|e| FontError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let names = read_names(&face);
        let family = names
            .get(&name_id::TYPOGRAPHIC_FAMILY)
            .or_else(|| names.get(&name_id::FAMILY))
            .cloned()
            .ok_or_else(|| FontError::MissingName(path.clone()))?;
        let subfamily = names
            .get(&name_id::TYPOGRAPHIC_SUBFAMILY)
            .or_else(|| names.get(&name_id::SUBFAMILY))
            .map(String::as_str)
            .unwrap_or_default();

        let variant = VariantAttribute::parse(subfamily);
        log::debug!("Read '{}' {} from {}", family, variant, path.display());
        Ok(Self {
            path,
            family,
            variant,
        })
    }

    pub fn format(&self) -> Option<FontFormat> {
        FontFormat::from_path(&self.path)
    }

    /// File name for this font: `"{family}-{variant long form}{ext}"`.
    ///
    /// Without an explicit extension the source file's extension is reused,
    /// falling back to `.otf`.
    pub fn generate_filename(&self, ext: Option<&str>) -> String {
        let ext = match ext {
            Some(ext) => ext.to_string(),
            None => self
                .path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{}", e))
                .unwrap_or_else(|| ".otf".to_string()),
        };
        let stem = format!("{}-{}", self.family, self.variant.to_long_string());
        format!("{}{}", sanitize_stem(&stem), ext)
    }
}

impl HasVariant for Font {
    fn variant(&self) -> &VariantAttribute {
        &self.variant
    }
}

/// Family and subfamily names come from the font itself: keep the name a
/// single path component without `..` or characters filesystems reject.
fn sanitize_stem(stem: &str) -> String {
    let mut clean: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    while clean.contains("..") {
        clean = clean.replace("..", ".");
    }
    let trimmed = clean.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if trimmed.is_empty() {
        "font".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Collects the first non-empty Unicode string for each family/subfamily name id.
fn read_names(face: &ttf_parser::Face<'_>) -> HashMap<u16, String> {
    let mut names = HashMap::new();
    for name in face.names() {
        if !matches!(
            name.name_id,
            name_id::FAMILY
                | name_id::SUBFAMILY
                | name_id::TYPOGRAPHIC_FAMILY
                | name_id::TYPOGRAPHIC_SUBFAMILY
        ) {
            continue;
        }
        if let Some(text) = name.to_string() {
            let text = text.trim();
            if !text.is_empty() {
                names.entry(name.name_id).or_insert_with(|| text.to_string());
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font(path: &str, family: &str, variant: &str) -> Font {
        Font::new(path, family, VariantAttribute::parse(variant))
    }

    #[test]
    fn test_generate_filename_uses_long_variant() {
        let f = font("/tmp/abc.ttf", "Roboto", "700i");
        assert_eq!(f.generate_filename(None), "Roboto-BoldItalic.ttf");
        assert_eq!(f.generate_filename(Some(".woff")), "Roboto-BoldItalic.woff");
    }

    #[test]
    fn test_generate_filename_keeps_stretch_and_falls_back_to_otf() {
        let f = font("/tmp/download", "Open Sans", "Condensed Light");
        assert_eq!(f.generate_filename(None), "Open Sans-Light_Condensed.otf");
    }

    #[test]
    fn test_generate_filename_strips_path_separators() {
        let f = font("a.otf", "AC/DC", "400");
        assert_eq!(f.generate_filename(None), "AC-DC-Regular.otf");
    }

    #[test]
    fn test_generate_filename_stays_a_single_component() {
        for (family, subfamily) in [("Fam", "Bold/../x"), ("..", "400"), ("Fam", "..\\..\\evil"), ("a:b", "Bold")] {
            let name = font("/tmp/abc.ttf", family, subfamily).generate_filename(None);
            assert!(!name.contains(['/', '\\', ':']), "{}", name);
            assert!(!name.contains(".."), "{}", name);
            assert!(!name.starts_with('.'), "{}", name);
            assert_eq!(std::path::Path::new(&name).components().count(), 1);
            assert!(name.ends_with(".ttf"));
        }
        assert_eq!(font("/tmp/abc.ttf", "..", "400").generate_filename(None), "-Regular.ttf");
    }

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let result = Font::from_bytes("broken.ttf", b"definitely not a font");
        assert!(matches!(result, Err(FontError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = Font::load("/nonexistent/fonty/missing.ttf");
        assert!(matches!(result, Err(FontError::Io { .. })));
    }
}
