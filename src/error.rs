// src/error.rs
use crate::font::FontError;
use crate::install::InstallError;
use fonty_traits::FetchError;
use thiserror::Error;

/// Top-level error for every fonty command.
#[derive(Error, Debug)]
pub enum FontyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("You are not subscribed to any font sources, add one with 'fonty source add <url>'")]
    NoSources,

    #[error("Already subscribed to '{0}'")]
    AlreadySubscribed(String),

    #[error("No font source matches '{0}'")]
    SourceNotFound(String),

    #[error("'{location}' is not a valid font repository: {message}")]
    InvalidRepository { location: String, message: String },

    #[error("No typeface named '{name}' was found{}", did_you_mean(.suggestion))]
    TypefaceNotFound { name: String, suggestion: Option<String> },

    #[error("Variant(s) [{}] are not available", .0.join(", "))]
    VariantsUnavailable(Vec<String>),

    #[error("No font files match the requested variants")]
    NoMatchingVariants,

    #[error("No font files found matching '{0}'")]
    NoFontFiles(String),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(", did you mean '{}'?", name),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typeface_not_found_mentions_suggestion() {
        let err = FontyError::TypefaceNotFound {
            name: "Robto".into(),
            suggestion: Some("Roboto".into()),
        };
        assert_eq!(
            err.to_string(),
            "No typeface named 'Robto' was found, did you mean 'Roboto'?"
        );

        let err = FontyError::TypefaceNotFound {
            name: "Nothing".into(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "No typeface named 'Nothing' was found");
    }

    #[test]
    fn test_variants_unavailable_lists_canonical_names() {
        let err = FontyError::VariantsUnavailable(vec!["800".into(), "900i".into()]);
        assert_eq!(err.to_string(), "Variant(s) [800, 900i] are not available");
    }

    #[test]
    fn test_fetch_error_is_transparent() {
        let err: FontyError = FetchError::NotFound("https://example.com/x.json".into()).into();
        assert_eq!(err.to_string(), "Not found: https://example.com/x.json");
    }
}
