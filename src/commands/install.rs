use super::{Context, expand_file_patterns};
use crate::error::FontyError;
use crate::font::{Font, FontFamily, FontSource, RemoteFont};
use crate::install::{DirectoryInstaller, FontInstaller};
use crate::manifest::Manifest;
use crate::search::{SearchIndex, SearchResult};
use crate::source::RemoteFamily;
use fonty_resource::is_http_url;
use fonty_traits::Executor;
use fonty_variant::{VariantAttribute, contains, parse_variant_list};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct InstallRequest {
    /// A family name (possibly split over several arguments), URLs, or file patterns.
    pub targets: Vec<String>,
    /// Variant arguments, each possibly comma separated.
    pub variants: Vec<String>,
    /// Install into this directory instead of the system font directory.
    pub output: Option<PathBuf>,
    /// Treat `targets` as local files.
    pub from_files: bool,
}

/// A font that could not be fetched, read or installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub location: String,
    pub message: String,
}

#[derive(Debug)]
pub struct InstallReport {
    pub families: Vec<FontFamily>,
    pub target: PathBuf,
    pub failures: Vec<Failure>,
}

impl InstallReport {
    pub fn font_count(&self) -> usize {
        self.families.iter().map(|f| f.fonts.len()).sum()
    }
}

impl fmt::Display for InstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Installed {} font(s) into {}",
            self.font_count(),
            self.target.display()
        )?;
        for family in &self.families {
            write!(f, "{}", family)?;
        }
        for failure in &self.failures {
            writeln!(f, "Failed: {} ({})", failure.location, failure.message)?;
        }
        Ok(())
    }
}

/// Installs fonts from a subscribed source, URLs or local files.
pub fn install(ctx: &Context, request: &InstallRequest) -> Result<InstallReport, FontyError> {
    let requested = parse_variant_list(&request.variants);
    let remote_fonts: Vec<RemoteFont> = resolve_targets(ctx, request, &requested)?
        .into_iter()
        .filter(|remote| {
            remote
                .variant
                .as_ref()
                .is_none_or(|v| requested.is_empty() || contains(&requested, v))
        })
        .collect();

    log::info!(
        "Loading {} font file(s) with {}",
        remote_fonts.len(),
        ctx.executor.name()
    );
    let fetcher = Arc::clone(&ctx.fetcher);
    let dir = ctx.config.tmp_dir();
    let results = ctx.executor.execute_all(remote_fonts, move |remote| {
        let loaded = remote.load(fetcher.as_ref(), &dir, &mut |p| {
            log::trace!("{}: {}/{:?} bytes", p.location, p.received, p.total);
        });
        (remote, loaded)
    });

    let mut loaded = Vec::new();
    let mut failures = Vec::new();
    let mut first_error = None;
    for (remote, result) in results {
        match result {
            Ok(font) => loaded.push((font, remote)),
            Err(err) => {
                log::warn!("Could not load {}: {}", remote.source.location(), err);
                failures.push(Failure {
                    location: remote.source.location(),
                    message: err.to_string(),
                });
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    let downloads: Vec<PathBuf> = loaded
        .iter()
        .filter(|(_, remote)| remote.is_remote())
        .map(|(font, _)| font.path.clone())
        .collect();

    let result = match (loaded.is_empty(), first_error) {
        (true, Some(err)) => Err(err),
        _ => install_loaded(ctx, request, &requested, loaded, failures),
    };

    for path in downloads {
        if let Err(err) = std::fs::remove_file(&path) {
            log::debug!("Could not remove {}: {}", path.display(), err);
        }
    }
    result
}

fn install_loaded(
    ctx: &Context,
    request: &InstallRequest,
    requested: &[VariantAttribute],
    loaded: Vec<(Font, RemoteFont)>,
    mut failures: Vec<Failure>,
) -> Result<InstallReport, FontyError> {
    // Variants embedded in the files are authoritative.
    let (fonts, remotes): (Vec<Font>, Vec<RemoteFont>) = loaded
        .into_iter()
        .filter(|(font, _)| requested.is_empty() || contains(requested, &font.variant))
        .unzip();
    if fonts.is_empty() {
        return Err(FontyError::NoMatchingVariants);
    }

    // Snapshot the manifest before copying, so new entries keep their remote path.
    let manifest = match request.output {
        Some(_) => None,
        None => Some(Manifest::load_or_generate(&ctx.config)?),
    };

    let (target, outcomes) = match &request.output {
        Some(dir) => {
            let installer = DirectoryInstaller::new(dir);
            (dir.clone(), installer.install(&fonts))
        }
        None => (
            ctx.installer.target().to_path_buf(),
            ctx.installer.install(&fonts),
        ),
    };

    let mut installed = Vec::new();
    let mut first_error = None;
    for (outcome, remote) in outcomes.into_iter().zip(remotes) {
        match outcome.result {
            Ok(path) => {
                let remote_path = match remote.source {
                    FontSource::Url(url) => Some(url),
                    FontSource::Path(_) => None,
                };
                installed.push((Font { path, ..outcome.font }, remote_path));
            }
            Err(err) => {
                log::warn!("Could not install {}: {}", outcome.font.path.display(), err);
                failures.push(Failure {
                    location: outcome.font.path.display().to_string(),
                    message: err.to_string(),
                });
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }
    if let (true, Some(err)) = (installed.is_empty(), first_error) {
        return Err(err.into());
    }

    if let Some(mut manifest) = manifest {
        for (font, remote_path) in &installed {
            manifest.add_with_remote(font, remote_path.clone());
        }
        if manifest.is_stale() {
            log::info!("Manifest lists missing files, regenerating it");
            manifest = Manifest::generate(&ctx.config.font_dir)?;
        }
        manifest.save(&ctx.config.manifest_path())?;
    }

    let fonts = installed.into_iter().map(|(font, _)| font).collect();
    Ok(InstallReport {
        families: FontFamily::from_font_list(fonts),
        target,
        failures,
    })
}

fn resolve_targets(
    ctx: &Context,
    request: &InstallRequest,
    requested: &[VariantAttribute],
) -> Result<Vec<RemoteFont>, FontyError> {
    let Some(first) = request.targets.first() else {
        return Err(FontyError::NoFontFiles(String::new()));
    };

    if request.from_files {
        let paths = expand_file_patterns(&request.targets)?;
        return Ok(paths
            .iter()
            .map(|p| RemoteFont::from_location(&p.display().to_string()))
            .collect());
    }

    if is_http_url(first) {
        return Ok(request
            .targets
            .iter()
            .map(|url| RemoteFont::from_location(url))
            .collect());
    }

    let family = find_family(ctx, &request.targets.join(" "))?;
    log::info!("Found '{}' with {} font(s)", family.name, family.fonts.len());
    family.remote_fonts(requested)
}

/// Looks a family up in the subscribed repositories.
pub fn find_family(ctx: &Context, name: &str) -> Result<RemoteFamily, FontyError> {
    let subscriptions = ctx.subscriptions()?;
    if subscriptions.is_empty() {
        return Err(FontyError::NoSources);
    }

    let repositories = subscriptions.repositories();
    let index = SearchIndex::from_repositories(&repositories);
    let not_found = |suggestion| FontyError::TypefaceNotFound {
        name: name.to_string(),
        suggestion,
    };

    match index.search(name) {
        SearchResult::Match(hit) => repositories
            .iter()
            .filter(|r| r.name == hit.repository)
            .find_map(|r| r.get_family(&hit.family))
            .cloned()
            .ok_or_else(|| not_found(None)),
        SearchResult::Suggestion(suggestion) => Err(not_found(Some(suggestion))),
        SearchResult::NoMatch => Err(not_found(None)),
    }
}
