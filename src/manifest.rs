//! The manifest of installed fonts.
//!
//! Stored as `manifest.json` in the application directory:
//!
//! ```json
//! { "lastUpdated": "2024-05-01T10:00:00Z",
//!   "typefaces": [ { "name": "Lato",
//!                    "fonts": [ { "variant": "700i", "localPath": "/fonts/Lato-BoldItalic.ttf" } ] } ] }
//! ```

use crate::config::FontyConfig;
use crate::error::FontyError;
use crate::font::{Font, FontFamily};
use chrono::{DateTime, Utc};
use fonty_variant::{HasVariant, VariantAttribute, VariantSelection, contains, equals, select};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFont {
    pub variant: VariantAttribute,
    pub local_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_path: Option<String>,
}

impl HasVariant for ManifestFont {
    fn variant(&self) -> &VariantAttribute {
        &self.variant
    }
}

/// An installed family and its fonts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typeface {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub fonts: Vec<ManifestFont>,
}

impl Typeface {
    pub fn variants(&self) -> Vec<&VariantAttribute> {
        self.fonts.iter().map(|f| &f.variant).collect()
    }

    pub fn select(&self, requested: &[VariantAttribute]) -> VariantSelection<'_, ManifestFont> {
        select(&self.fonts, requested)
    }

    pub fn to_family(&self) -> FontFamily {
        let fonts = self
            .fonts
            .iter()
            .map(|f| Font::new(&f.local_path, &self.name, f.variant.clone()))
            .collect();
        FontFamily::new(&self.name, fonts)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub typefaces: Vec<Typeface>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

impl Manifest {
    pub fn new() -> Self {
        Self {
            last_updated: Utc::now(),
            typefaces: Vec::new(),
        }
    }

    /// Case-insensitive family lookup.
    pub fn get(&self, name: &str) -> Option<&Typeface> {
        self.typefaces
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Typeface> {
        self.typefaces
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Records an installed font. Returns false, leaving the manifest
    /// untouched, when the family already lists an equal variant.
    pub fn add(&mut self, font: &Font) -> bool {
        self.add_with_remote(font, None)
    }

    pub fn add_with_remote(&mut self, font: &Font, remote_path: Option<String>) -> bool {
        let entry = ManifestFont {
            variant: font.variant.clone(),
            local_path: font.path.clone(),
            remote_path,
        };

        match self.get_mut(&font.family) {
            Some(typeface) => {
                if typeface.fonts.iter().any(|f| equals(&f.variant, &font.variant)) {
                    log::debug!("'{}' {} is already in the manifest", font.family, font.variant);
                    return false;
                }
                typeface.fonts.push(entry);
            }
            None => self.typefaces.push(Typeface {
                name: font.family.clone(),
                category: None,
                fonts: vec![entry],
            }),
        }
        self.last_updated = Utc::now();
        true
    }

    /// Removes a whole family (`variants == None`) or the listed variants of it.
    ///
    /// Returns the number of fonts removed. Requesting a variant the family
    /// does not have fails without changing anything. A family left without
    /// fonts is dropped.
    pub fn remove(
        &mut self,
        family: &str,
        variants: Option<&[VariantAttribute]>,
    ) -> Result<usize, FontyError> {
        let index = self
            .typefaces
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(family))
            .ok_or_else(|| FontyError::TypefaceNotFound {
                name: family.to_string(),
                suggestion: None,
            })?;

        let removed = match variants {
            None => self.typefaces.remove(index).fonts.len(),
            Some(variants) => {
                let typeface = &mut self.typefaces[index];
                let selection = typeface.select(variants);
                if !selection.is_complete() {
                    return Err(FontyError::VariantsUnavailable(selection.invalid_names()));
                }
                let before = typeface.fonts.len();
                typeface.fonts.retain(|f| !contains(variants, &f.variant));
                let removed = before - typeface.fonts.len();
                if typeface.fonts.is_empty() {
                    self.typefaces.remove(index);
                }
                removed
            }
        };

        self.last_updated = Utc::now();
        Ok(removed)
    }

    /// True when any listed font file no longer exists.
    pub fn is_stale(&self) -> bool {
        self.typefaces
            .iter()
            .flat_map(|t| &t.fonts)
            .any(|f| !f.local_path.exists())
    }

    pub fn families(&self) -> Vec<FontFamily> {
        let mut families: Vec<FontFamily> = self.typefaces.iter().map(Typeface::to_family).collect();
        families.sort_by_key(|f| f.name.to_lowercase());
        families
    }

    pub fn load(path: &Path) -> Result<Self, FontyError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), FontyError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::debug!("Saved manifest to {}", path.display());
        Ok(())
    }

    /// Loads the manifest, generating and saving a fresh one from the font
    /// directory when the file is missing or unreadable.
    pub fn load_or_generate(config: &FontyConfig) -> Result<Self, FontyError> {
        let path = config.manifest_path();
        if path.exists() {
            match Self::load(&path) {
                Ok(manifest) => return Ok(manifest),
                Err(err) => log::warn!("Regenerating unreadable manifest {}: {}", path.display(), err),
            }
        }
        let manifest = Self::generate(&config.font_dir)?;
        manifest.save(&path)?;
        Ok(manifest)
    }

    /// Builds a manifest by scanning `font_dir` for font files.
    ///
    /// Files that cannot be read as fonts are skipped with a warning.
    pub fn generate(font_dir: &Path) -> Result<Self, FontyError> {
        let mut manifest = Self::new();
        if !font_dir.is_dir() {
            log::info!("Font directory {} does not exist yet", font_dir.display());
            return Ok(manifest);
        }

        let mut db = fontdb::Database::new();
        db.load_fonts_dir(font_dir);

        let paths: BTreeSet<PathBuf> = db
            .faces()
            .filter_map(|face| match &face.source {
                fontdb::Source::File(path) => Some(path.clone()),
                fontdb::Source::SharedFile(path, _) => Some(path.clone()),
                _ => None,
            })
            .collect();
        log::debug!("Found {} font files in {}", paths.len(), font_dir.display());

        for path in paths {
            match Font::load(&path) {
                Ok(font) => {
                    manifest.add(&font);
                }
                Err(err) => log::warn!("Skipping {}: {}", path.display(), err),
            }
        }
        manifest
            .typefaces
            .sort_by_key(|t| t.name.to_lowercase());
        Ok(manifest)
    }
}
