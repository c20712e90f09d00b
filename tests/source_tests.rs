mod common;

use common::{TestResult, test_context};
use fonty::FontyError;
use fonty::commands::source;
use fonty::search::{SearchIndex, SearchResult};
use fonty::source::SubscriptionList;
use fonty_traits::InMemoryFetcher;
use std::sync::Arc;

const URL: &str = "https://example.com/google.json";

fn fetcher() -> Arc<InMemoryFetcher> {
    let fetcher = InMemoryFetcher::new();
    fetcher
        .insert(
            URL,
            br#"{ "name": "Google", "families": [ { "name": "Open Sans" }, { "name": "Lato" } ] }"#
                .to_vec(),
        )
        .unwrap();
    Arc::new(fetcher)
}

#[test]
fn test_add_list_remove() -> TestResult {
    let dir = tempfile::tempdir()?;
    let ctx = test_context(dir.path(), fetcher());

    let summary = source::add(&ctx, URL)?;
    assert_eq!(summary.name, "Google");
    assert_eq!(summary.families, Some(2));
    assert!(summary.to_string().contains(URL));

    assert!(matches!(
        source::add(&ctx, URL),
        Err(FontyError::AlreadySubscribed(_))
    ));

    let sources = source::list(&ctx)?;
    assert_eq!(sources.len(), 1);

    let removed = source::remove(&ctx, "google")?;
    assert!(!removed.local_path.exists());
    assert!(source::list(&ctx)?.is_empty());
    assert!(matches!(
        source::remove(&ctx, "google"),
        Err(FontyError::SourceNotFound(_))
    ));
    Ok(())
}

#[test]
fn test_update() -> TestResult {
    let dir = tempfile::tempdir()?;
    let fetcher = fetcher();
    let ctx = test_context(dir.path(), Arc::clone(&fetcher));

    assert!(matches!(source::update(&ctx, false), Err(FontyError::NoSources)));

    source::add(&ctx, URL)?;
    let reports = source::update(&ctx, false)?;
    assert!(matches!(reports[0].outcome, Ok(false)));

    fetcher.insert(URL, br#"{ "name": "Google", "families": [] }"#.to_vec())?;
    let reports = source::update(&ctx, false)?;
    assert!(matches!(reports[0].outcome, Ok(true)));

    let subscriptions = SubscriptionList::load(&ctx.config.subscriptions_path())?;
    assert!(subscriptions.repositories()[0].families.is_empty());
    Ok(())
}

#[test]
fn test_failed_update_is_reported_per_source() -> TestResult {
    let dir = tempfile::tempdir()?;
    let fetcher = fetcher();
    let ctx = test_context(dir.path(), Arc::clone(&fetcher));
    source::add(&ctx, URL)?;

    fetcher.insert(URL, b"<html>gone</html>".to_vec())?;
    let reports = source::update(&ctx, true)?;
    assert!(matches!(
        reports[0].outcome,
        Err(FontyError::InvalidRepository { .. })
    ));
    // The previous local copy is kept.
    let subscriptions = SubscriptionList::load(&ctx.config.subscriptions_path())?;
    assert_eq!(subscriptions.repositories()[0].families.len(), 2);
    Ok(())
}

#[test]
fn test_search_over_subscribed_sources() -> TestResult {
    let dir = tempfile::tempdir()?;
    let ctx = test_context(dir.path(), fetcher());
    source::add(&ctx, URL)?;

    let subscriptions = SubscriptionList::load(&ctx.config.subscriptions_path())?;
    let index = SearchIndex::from_repositories(&subscriptions.repositories());
    match index.search("open sans") {
        SearchResult::Match(hit) => {
            assert_eq!(hit.family, "Open Sans");
            assert_eq!(hit.repository, "Google");
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(index.search("Lat0"), SearchResult::Suggestion("Lato".to_string()));
    Ok(())
}
