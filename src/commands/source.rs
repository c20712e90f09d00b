//! `fonty source add|remove|list|update`.

use super::Context;
use crate::error::FontyError;
use crate::source::{Subscription, UpdateReport};
use chrono::{DateTime, Utc};
use std::fmt;

/// A subscription as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub id: String,
    pub name: String,
    pub url: String,
    /// `None` when the local copy could not be read.
    pub families: Option<usize>,
    pub last_updated: DateTime<Utc>,
}

impl SourceSummary {
    fn from_subscription(subscription: &Subscription) -> Self {
        let families = match subscription.load_repository() {
            Ok(repository) => Some(repository.families.len()),
            Err(err) => {
                log::warn!("Cannot read '{}': {}", subscription.name, err);
                None
            }
        };
        Self {
            id: subscription.id.clone(),
            name: subscription.name.clone(),
            url: subscription.remote_path.clone(),
            families,
            last_updated: subscription.last_updated,
        }
    }
}

impl fmt::Display for SourceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let families = match self.families {
            Some(n) => format!("{} families", n),
            None => "unreadable".to_string(),
        };
        writeln!(f, "{} ({})", self.name, families)?;
        writeln!(f, "  ├─ url: {}", self.url)?;
        writeln!(f, "  ├─ id: {}", self.id)?;
        writeln!(f, "  └─ updated: {}", self.last_updated.format("%Y-%m-%d %H:%M"))
    }
}

pub fn add(ctx: &Context, url: &str) -> Result<SourceSummary, FontyError> {
    let path = ctx.config.subscriptions_path();
    let mut subscriptions = ctx.subscriptions()?;
    let summary = {
        let subscription =
            subscriptions.subscribe(ctx.fetcher.as_ref(), url, &ctx.config.repository_dir())?;
        SourceSummary::from_subscription(subscription)
    };
    subscriptions.save(&path)?;
    Ok(summary)
}

pub fn remove(ctx: &Context, identifier: &str) -> Result<Subscription, FontyError> {
    let mut subscriptions = ctx.subscriptions()?;
    let removed = subscriptions.unsubscribe(identifier)?;
    subscriptions.save(&ctx.config.subscriptions_path())?;
    Ok(removed)
}

pub fn list(ctx: &Context) -> Result<Vec<SourceSummary>, FontyError> {
    let subscriptions = ctx.subscriptions()?;
    Ok(subscriptions
        .subscriptions
        .iter()
        .map(SourceSummary::from_subscription)
        .collect())
}

/// Refetches every subscribed source. Sources that fail to update are
/// reported, the others are still saved.
pub fn update(ctx: &Context, force: bool) -> Result<Vec<UpdateReport>, FontyError> {
    let mut subscriptions = ctx.subscriptions()?;
    if subscriptions.is_empty() {
        return Err(FontyError::NoSources);
    }
    let reports = subscriptions.update(ctx.fetcher.as_ref(), force);
    subscriptions.save(&ctx.config.subscriptions_path())?;
    Ok(reports)
}
