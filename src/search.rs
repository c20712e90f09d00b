//! Family search across subscribed repositories.
//!
//! Lookups try, in order: an exact name match ignoring case and whitespace,
//! a match on every query word, and finally a "did you mean" suggestion based
//! on edit distance.

use crate::source::Repository;

/// A family found in a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub family: String,
    pub repository: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Match(SearchHit),
    Suggestion(String),
    NoMatch,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    key: String,
    tokens: Vec<String>,
    hit: SearchHit,
}

#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

/// Lowercased name with everything but letters and digits removed.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// The candidate closest to `query` by edit distance, if it is within a
/// third of the query's length (at least one edit).
pub fn closest_name<'a, I>(query: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let key = normalize(query);
    if key.is_empty() {
        return None;
    }
    let limit = (key.chars().count() / 3).max(1);
    candidates
        .into_iter()
        .map(|name| (strsim::levenshtein(&key, &normalize(name)), name))
        .filter(|(distance, _)| *distance <= limit)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_repositories(repositories: &[Repository]) -> Self {
        let mut index = Self::new();
        for repository in repositories {
            index.add_repository(repository);
        }
        index
    }

    pub fn add_repository(&mut self, repository: &Repository) {
        for family in &repository.families {
            self.entries.push(IndexEntry {
                key: normalize(&family.name),
                tokens: tokenize(&family.name),
                hit: SearchHit {
                    family: family.name.clone(),
                    repository: repository.name.clone(),
                },
            });
        }
        log::debug!(
            "Indexed {} families from '{}'",
            repository.families.len(),
            repository.name
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn search(&self, text: &str) -> SearchResult {
        let key = normalize(text);
        if key.is_empty() {
            return SearchResult::NoMatch;
        }

        if let Some(entry) = self.entries.iter().find(|e| e.key == key) {
            return SearchResult::Match(entry.hit.clone());
        }

        // Every query word must prefix some word of the family name; the
        // family with the fewest extra words wins.
        let query = tokenize(text);
        let token_match = self
            .entries
            .iter()
            .filter(|e| {
                query
                    .iter()
                    .all(|q| e.tokens.iter().any(|t| t.starts_with(q.as_str())))
            })
            .min_by(|a, b| {
                a.tokens
                    .len()
                    .cmp(&b.tokens.len())
                    .then_with(|| a.hit.family.cmp(&b.hit.family))
            });
        if let Some(entry) = token_match {
            return SearchResult::Match(entry.hit.clone());
        }

        match closest_name(text, self.entries.iter().map(|e| e.hit.family.as_str())) {
            Some(name) => SearchResult::Suggestion(name.to_string()),
            None => SearchResult::NoMatch,
        }
    }
}
