use super::Repository;
use crate::error::FontyError;
use chrono::{DateTime, Utc};
use fonty_traits::Fetcher;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A subscribed repository and where its local copy lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub remote_path: String,
    pub local_path: PathBuf,
    pub last_updated: DateTime<Utc>,
}

impl Subscription {
    /// Stable identifier for a repository location.
    pub fn id_for(remote_path: &str) -> String {
        slug::slugify(remote_path.trim())
    }

    /// Matches by id, name (case-insensitive) or remote path.
    pub fn matches(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.id == identifier
            || self.name.eq_ignore_ascii_case(identifier)
            || self.remote_path == identifier
    }

    pub fn load_repository(&self) -> Result<Repository, FontyError> {
        Repository::load(&self.local_path)
    }
}

/// Outcome of refreshing one subscription.
#[derive(Debug)]
pub struct UpdateReport {
    pub name: String,
    pub remote_path: String,
    /// `Ok(true)` when the repository changed since the last fetch.
    pub outcome: Result<bool, FontyError>,
}

/// All subscriptions, persisted as `{ "subscriptions": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionList {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl SubscriptionList {
    /// Loads the list, treating a missing file as no subscriptions.
    pub fn load(path: &Path) -> Result<Self, FontyError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), FontyError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn get(&self, identifier: &str) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.matches(identifier))
    }

    /// Fetches the repository at `url`, checks it parses, and stores a local
    /// copy under `repository_dir`.
    pub fn subscribe(
        &mut self,
        fetcher: &dyn Fetcher,
        url: &str,
        repository_dir: &Path,
    ) -> Result<&Subscription, FontyError> {
        let url = url.trim();
        let id = Subscription::id_for(url);
        if self.subscriptions.iter().any(|s| s.id == id) {
            return Err(FontyError::AlreadySubscribed(url.to_string()));
        }

        let data = fetcher.fetch(url, &mut |p| {
            log::debug!("{}: {} bytes received", p.location, p.received);
        })?;
        let repository = Repository::from_slice(&data, url)?;

        std::fs::create_dir_all(repository_dir)?;
        let local_path = repository_dir.join(format!("{}.json", id));
        std::fs::write(&local_path, data.as_slice())?;

        log::info!(
            "Subscribed to '{}' ({} families)",
            repository.name,
            repository.families.len()
        );
        self.subscriptions.push(Subscription {
            id,
            name: repository.name,
            remote_path: url.to_string(),
            local_path,
            last_updated: Utc::now(),
        });
        let index = self.subscriptions.len() - 1;
        Ok(&self.subscriptions[index])
    }

    /// Removes a subscription and deletes its local copy.
    pub fn unsubscribe(&mut self, identifier: &str) -> Result<Subscription, FontyError> {
        let index = self
            .subscriptions
            .iter()
            .position(|s| s.matches(identifier))
            .ok_or_else(|| FontyError::SourceNotFound(identifier.to_string()))?;
        let subscription = self.subscriptions.remove(index);

        if subscription.local_path.exists() {
            std::fs::remove_file(&subscription.local_path)?;
        }
        log::info!("Unsubscribed from '{}'", subscription.name);
        Ok(subscription)
    }

    /// Refetches every source. With `force` the local copy is rewritten even
    /// when nothing changed.
    pub fn update(&mut self, fetcher: &dyn Fetcher, force: bool) -> Vec<UpdateReport> {
        self.subscriptions
            .iter_mut()
            .map(|subscription| {
                let outcome = refresh(subscription, fetcher, force);
                if let Err(err) = &outcome {
                    log::warn!("Failed to update '{}': {}", subscription.name, err);
                }
                UpdateReport {
                    name: subscription.name.clone(),
                    remote_path: subscription.remote_path.clone(),
                    outcome,
                }
            })
            .collect()
    }

    /// Loads the local copy of every subscribed repository. Copies that
    /// cannot be read are skipped.
    pub fn repositories(&self) -> Vec<Repository> {
        self.subscriptions
            .iter()
            .filter_map(|s| match s.load_repository() {
                Ok(repository) => Some(repository),
                Err(err) => {
                    log::warn!(
                        "Ignoring source '{}', run 'fonty source update' to repair it: {}",
                        s.name,
                        err
                    );
                    None
                }
            })
            .collect()
    }
}

fn refresh(subscription: &mut Subscription, fetcher: &dyn Fetcher, force: bool) -> Result<bool, FontyError> {
    let data = fetcher.fetch_quiet(&subscription.remote_path)?;
    let repository = Repository::from_slice(&data, &subscription.remote_path)?;

    let changed = match std::fs::read(&subscription.local_path) {
        Ok(existing) => existing != *data,
        Err(_) => true,
    };

    if changed || force {
        if let Some(parent) = subscription.local_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&subscription.local_path, data.as_slice())?;
        subscription.name = repository.name;
        subscription.last_updated = Utc::now();
    }
    log::debug!("Source '{}' changed: {}", subscription.name, changed);
    Ok(changed)
}
