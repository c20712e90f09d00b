use super::Context;
use super::install::Failure;
use crate::error::FontyError;
use crate::font::Font;
use crate::install::{InstallError, partition};
use crate::manifest::Manifest;
use crate::search::closest_name;
use fonty_variant::{VariantAttribute, parse_variant_list};
use std::fmt;

#[derive(Debug)]
pub struct UninstallReport {
    pub family: String,
    pub removed: Vec<Font>,
    pub failures: Vec<Failure>,
}

impl fmt::Display for UninstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Uninstalled {} font(s) of '{}'", self.removed.len(), self.family)?;
        for font in &self.removed {
            writeln!(f, "  - {} ({})", font.variant.to_long_string(), font.path.display())?;
        }
        for failure in &self.failures {
            writeln!(f, "Failed: {} ({})", failure.location, failure.message)?;
        }
        Ok(())
    }
}

/// Removes an installed family, or some of its variants.
pub fn uninstall(ctx: &Context, name: &str, variants: &[String]) -> Result<UninstallReport, FontyError> {
    let requested = parse_variant_list(variants);
    let mut manifest = Manifest::load_or_generate(&ctx.config)?;

    let Some(typeface) = manifest.get(name).cloned() else {
        let suggestion = closest_name(name, manifest.typefaces.iter().map(|t| t.name.as_str()))
            .map(str::to_string);
        return Err(FontyError::TypefaceNotFound {
            name: name.to_string(),
            suggestion,
        });
    };

    let selection = typeface.select(&requested);
    if !selection.is_complete() {
        return Err(FontyError::VariantsUnavailable(selection.invalid_names()));
    }
    let fonts: Vec<Font> = selection
        .matched
        .iter()
        .map(|f| Font::new(&f.local_path, &typeface.name, f.variant.clone()))
        .collect();

    let (removed, mut failed) = partition(ctx.installer.uninstall(&fonts));

    // A file that is already gone no longer belongs in the manifest either.
    let forget: Vec<VariantAttribute> = removed
        .iter()
        .map(|f| f.variant.clone())
        .chain(
            failed
                .iter()
                .filter(|(_, err)| matches!(err, InstallError::MissingFile(_)))
                .map(|(f, _)| f.variant.clone()),
        )
        .collect();
    if !forget.is_empty() {
        manifest.remove(&typeface.name, Some(forget.as_slice()))?;
        manifest.save(&ctx.config.manifest_path())?;
    }

    let hard_failure = failed
        .iter()
        .position(|(_, err)| !matches!(err, InstallError::MissingFile(_)));
    if let (true, Some(index)) = (removed.is_empty(), hard_failure) {
        let (_, err) = failed.swap_remove(index);
        return Err(err.into());
    }

    let failures = failed
        .iter()
        .map(|(font, err)| Failure {
            location: font.path.display().to_string(),
            message: err.to_string(),
        })
        .collect();
    log::info!("Removed {} font(s) of '{}'", removed.len(), typeface.name);
    Ok(UninstallReport {
        family: typeface.name,
        removed,
        failures,
    })
}
