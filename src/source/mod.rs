//! Font sources: remote repositories the user subscribes to.

mod repository;
mod subscription;

pub use repository::{CatalogFont, RemoteFamily, Repository};
pub use subscription::{Subscription, SubscriptionList, UpdateReport};
