use super::{Context, expand_file_patterns};
use crate::error::FontyError;
use crate::font::{Font, FontError, FontFormat, woff};
use crate::manifest::Manifest;
use crate::search::closest_name;
use fonty_traits::Executor;
use fonty_variant::Described;
use std::fmt;
use std::path::{Path, PathBuf};

const STYLESHEET: &str = "styles.css";
const HEADER: &str = "/* Auto-generated by fonty, a friendly CLI tool for fonts. */\n\n";

#[derive(Debug, Clone, Default)]
pub struct WebfontRequest {
    /// Font files or glob patterns.
    pub files: Vec<String>,
    /// Convert an installed family instead of files.
    pub typeface: Option<String>,
    /// Output directory, the working directory by default.
    pub output: Option<PathBuf>,
}

/// A converted font and the files generated for it, in `src` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebFont {
    pub font: Font,
    pub files: Vec<(String, FontFormat)>,
}

#[derive(Debug)]
pub struct WebfontReport {
    pub output_dir: PathBuf,
    pub stylesheet: PathBuf,
    pub fonts: Vec<WebFont>,
}

impl fmt::Display for WebfontReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Generated webfonts for {} font(s) in {}",
            self.fonts.len(),
            self.output_dir.display()
        )?;
        for webfont in &self.fonts {
            for (name, _) in &webfont.files {
                writeln!(f, "  - {}", name)?;
            }
        }
        writeln!(f, "@font-face declarations written to {}", self.stylesheet.display())
    }
}

/// Copies fonts into the output directory next to WOFF and WOFF2 versions and
/// writes a stylesheet with their `@font-face` rules.
pub fn webfont(ctx: &Context, request: &WebfontRequest) -> Result<WebfontReport, FontyError> {
    let paths = match &request.typeface {
        Some(name) => typeface_paths(ctx, name)?,
        None => expand_file_patterns(&request.files)?,
    };
    let output_dir = request.output.clone().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&output_dir)?;

    log::info!("Converting {} font file(s)", paths.len());
    let dir = output_dir.clone();
    let fonts = ctx
        .executor
        .execute_all(paths, move |path| convert(&path, &dir))
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let css = stylesheet(&fonts);
    let stylesheet = output_dir.join(STYLESHEET);
    std::fs::write(&stylesheet, css)?;

    Ok(WebfontReport {
        output_dir,
        stylesheet,
        fonts,
    })
}

fn typeface_paths(ctx: &Context, name: &str) -> Result<Vec<PathBuf>, FontyError> {
    let manifest = Manifest::load_or_generate(&ctx.config)?;
    match manifest.get(name) {
        Some(typeface) => Ok(typeface.fonts.iter().map(|f| f.local_path.clone()).collect()),
        None => Err(FontyError::TypefaceNotFound {
            name: name.to_string(),
            suggestion: closest_name(name, manifest.typefaces.iter().map(|t| t.name.as_str()))
                .map(str::to_string),
        }),
    }
}

/// Writes the original font with its WOFF and WOFF2 versions into `output_dir`.
fn convert(path: &Path, output_dir: &Path) -> Result<WebFont, FontyError> {
    let format = FontFormat::from_path(path).unwrap_or(FontFormat::Otf);
    if !format.is_sfnt() {
        return Err(FontError::Unsupported(format!(
            "'{}' is already a web font",
            path.display()
        ))
        .into());
    }

    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let font = Font::from_bytes(path, &data)?;

    let original = font.generate_filename(Some(format.extension()));
    std::fs::write(output_dir.join(&original), &data)?;

    let woff_name = font.generate_filename(Some(FontFormat::Woff.extension()));
    std::fs::write(output_dir.join(&woff_name), woff::encode(&data)?)?;

    let woff2_name = font.generate_filename(Some(FontFormat::Woff2.extension()));
    std::fs::write(output_dir.join(&woff2_name), woff::encode_woff2(&data)?)?;

    log::debug!("Converted {} -> {}, {}", path.display(), woff_name, woff2_name);
    Ok(WebFont {
        font,
        files: vec![
            (original, format),
            (woff_name, FontFormat::Woff),
            (woff2_name, FontFormat::Woff2),
        ],
    })
}

/// One `@font-face` rule.
pub fn font_face(webfont: &WebFont) -> String {
    let variant = &webfont.font.variant;
    let src = webfont
        .files
        .iter()
        .map(|(name, format)| format!("url('{}') format('{}')", name, format.css_format()))
        .collect::<Vec<_>>()
        .join(",\n       ");
    format!(
        "@font-face {{\n  font-family: '{}';\n  font-weight: {};\n  font-style: {};\n  font-stretch: {};\n  src: {};\n}}\n",
        webfont.font.family,
        variant.weight().css(),
        variant.style().css(),
        variant.stretch().css(),
        src
    )
}

pub fn stylesheet(fonts: &[WebFont]) -> String {
    let rules: Vec<String> = fonts.iter().map(font_face).collect();
    format!("{}{}", HEADER, rules.join("\n"))
}
