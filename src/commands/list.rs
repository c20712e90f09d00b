use super::Context;
use crate::error::FontyError;
use crate::font::FontFamily;
use crate::manifest::Manifest;

/// Rescans the font directory, refreshes the manifest and returns what is installed.
pub fn list(ctx: &Context) -> Result<Vec<FontFamily>, FontyError> {
    let manifest = Manifest::generate(&ctx.config.font_dir)?;
    manifest.save(&ctx.config.manifest_path())?;
    Ok(manifest.families())
}
