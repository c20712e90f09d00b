use std::path::Path;

/// Container formats fonty knows how to name and serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFormat {
    Ttf,
    Otf,
    Woff,
    Woff2,
}

impl FontFormat {
    /// Detects the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ttf" => Some(FontFormat::Ttf),
            "otf" => Some(FontFormat::Otf),
            "woff" => Some(FontFormat::Woff),
            "woff2" => Some(FontFormat::Woff2),
            _ => None,
        }
    }

    /// The extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            FontFormat::Ttf => ".ttf",
            FontFormat::Otf => ".otf",
            FontFormat::Woff => ".woff",
            FontFormat::Woff2 => ".woff2",
        }
    }

    /// Keyword for the CSS `format()` hint in `@font-face` rules.
    pub fn css_format(self) -> &'static str {
        match self {
            FontFormat::Ttf => "truetype",
            FontFormat::Otf => "opentype",
            FontFormat::Woff => "woff",
            FontFormat::Woff2 => "woff2",
        }
    }

    /// Whether the file is a raw TrueType/OpenType font rather than a web container.
    pub fn is_sfnt(self) -> bool {
        matches!(self, FontFormat::Ttf | FontFormat::Otf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(FontFormat::from_path(Path::new("a/Roboto-Bold.TTF")), Some(FontFormat::Ttf));
        assert_eq!(FontFormat::from_path(Path::new("x.otf")), Some(FontFormat::Otf));
        assert_eq!(FontFormat::from_path(Path::new("x.woff2")), Some(FontFormat::Woff2));
        assert_eq!(FontFormat::from_path(Path::new("x.pfb")), None);
        assert_eq!(FontFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_css_format() {
        assert_eq!(FontFormat::Ttf.css_format(), "truetype");
        assert_eq!(FontFormat::Otf.css_format(), "opentype");
        assert_eq!(FontFormat::Woff.extension(), ".woff");
        assert!(FontFormat::Otf.is_sfnt());
        assert!(!FontFormat::Woff.is_sfnt());
    }
}
