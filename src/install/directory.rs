use super::{FontInstaller, InstallError, InstallOutcome};
use crate::font::Font;
use std::path::{Path, PathBuf};

/// Copies fonts into a directory under their generated file names.
#[derive(Debug, Clone)]
pub struct DirectoryInstaller {
    dir: PathBuf,
}

impl DirectoryInstaller {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn install_one(&self, font: &Font) -> Result<PathBuf, InstallError> {
        if !font.path.is_file() {
            return Err(InstallError::MissingFile(font.path.clone()));
        }
        let target = self.dir.join(font.generate_filename(None));
        let io_err = |source| InstallError::Io {
            path: target.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        if font.path != target {
            std::fs::copy(&font.path, &target).map_err(io_err)?;
        }
        log::debug!("Installed {} -> {}", font.path.display(), target.display());
        Ok(target)
    }

    fn uninstall_one(&self, font: &Font) -> Result<PathBuf, InstallError> {
        if !font.path.exists() {
            return Err(InstallError::MissingFile(font.path.clone()));
        }
        std::fs::remove_file(&font.path).map_err(|source| InstallError::Io {
            path: font.path.clone(),
            source,
        })?;
        log::debug!("Removed {}", font.path.display());
        Ok(font.path.clone())
    }
}

impl FontInstaller for DirectoryInstaller {
    fn install(&self, fonts: &[Font]) -> Vec<InstallOutcome> {
        fonts
            .iter()
            .map(|font| InstallOutcome {
                font: font.clone(),
                result: self.install_one(font),
            })
            .collect()
    }

    fn uninstall(&self, fonts: &[Font]) -> Vec<InstallOutcome> {
        fonts
            .iter()
            .map(|font| InstallOutcome {
                font: font.clone(),
                result: self.uninstall_one(font),
            })
            .collect()
    }

    fn target(&self) -> &Path {
        &self.dir
    }

    fn name(&self) -> &'static str {
        "DirectoryInstaller"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::partition;
    use fonty_variant::VariantAttribute;

    #[test]
    fn test_missing_source_is_reported_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.ttf");
        std::fs::write(&present, b"font bytes").unwrap();

        let fonts = vec![
            Font::new(&present, "Lato", VariantAttribute::parse("700")),
            Font::new(dir.path().join("absent.ttf"), "Lato", VariantAttribute::parse("400")),
        ];
        let installer = DirectoryInstaller::new(dir.path().join("out"));
        let (done, failed) = partition(installer.install(&fonts));

        assert_eq!(done.len(), 1);
        assert_eq!(done[0].path, dir.path().join("out").join("Lato-Bold.ttf"));
        assert_eq!(std::fs::read(&done[0].path).unwrap(), b"font bytes");
        assert_eq!(failed.len(), 1);
        assert!(matches!(failed[0].1, InstallError::MissingFile(_)));
    }

    #[test]
    fn test_uninstall_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Lato-Regular.ttf");
        std::fs::write(&path, b"x").unwrap();

        let installer = DirectoryInstaller::new(dir.path());
        let font = Font::new(&path, "Lato", VariantAttribute::parse("400"));
        let outcomes = installer.uninstall(std::slice::from_ref(&font));
        assert!(outcomes[0].is_ok());
        assert!(!path.exists());

        let outcomes = installer.uninstall(&[font]);
        assert!(matches!(outcomes[0].result, Err(InstallError::MissingFile(_))));
        assert_eq!(installer.target(), dir.path());
    }
}
