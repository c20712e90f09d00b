use crate::error::FontyError;
use crate::font::RemoteFont;
use fonty_variant::{HasVariant, VariantAttribute, VariantSelection, select};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One downloadable font file in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFont {
    pub variant: VariantAttribute,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl HasVariant for CatalogFont {
    fn variant(&self) -> &VariantAttribute {
        &self.variant
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFamily {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub fonts: Vec<CatalogFont>,
}

impl RemoteFamily {
    pub fn select(&self, requested: &[VariantAttribute]) -> VariantSelection<'_, CatalogFont> {
        select(&self.fonts, requested)
    }

    /// The catalogue entries for `requested` (all of them when empty) as
    /// fonts ready to be downloaded.
    pub fn remote_fonts(&self, requested: &[VariantAttribute]) -> Result<Vec<RemoteFont>, FontyError> {
        let selection = self.select(requested);
        if !selection.is_complete() {
            return Err(FontyError::VariantsUnavailable(selection.invalid_names()));
        }

        Ok(selection
            .matched
            .into_iter()
            .map(|entry| {
                let remote = RemoteFont::from_location(&entry.url)
                    .with_metadata(&self.name, entry.variant.clone());
                match &entry.filename {
                    Some(name) => remote.with_filename(name),
                    None => remote,
                }
            })
            .collect())
    }
}

/// A catalogue of font families published at some URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub families: Vec<RemoteFamily>,
}

impl Repository {
    /// Parses repository JSON fetched from `location`.
    pub fn from_slice(data: &[u8], location: &str) -> Result<Self, FontyError> {
        let repository: Self =
            serde_json::from_slice(data).map_err(|e| FontyError::InvalidRepository {
                location: location.to_string(),
                message: e.to_string(),
            })?;
        if repository.name.trim().is_empty() {
            return Err(FontyError::InvalidRepository {
                location: location.to_string(),
                message: "repository has no name".to_string(),
            });
        }
        Ok(repository)
    }

    pub fn load(path: &Path) -> Result<Self, FontyError> {
        let data = std::fs::read(path)?;
        Self::from_slice(&data, &path.display().to_string())
    }

    /// Case-insensitive family lookup.
    pub fn get_family(&self, name: &str) -> Option<&RemoteFamily> {
        self.families
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name.trim()))
    }
}
