//! Free-text search queries.
//!
//! Documents are matched on words drawn from their string values. Words are
//! maximal runs of alphanumeric characters, compared case-insensitively. A
//! document matches when every query word occurs in it.
//!
//! This approximates the PostgreSQL `simple` configuration for plain words
//! only. The PostgreSQL parser keeps emails, URLs, and hosts as single tokens
//! and also indexes hyphenated compounds whole, so `b` matches `a@b.com`
//! here but not in the database adapter.

use std::collections::BTreeSet;

use serde_json::Value;

use super::error::Error;
use super::record::Document;

/// Message returned when a search request carries no usable query.
pub const MISSING_QUERY_MESSAGE: &str = "No search query found in request";

/// Validated, non-empty free-text query.
///
/// # Examples
/// ```
/// use storefront::domain::SearchQuery;
///
/// let query = SearchQuery::parse(Some("  Blue pen ".into())).expect("query");
/// assert_eq!(query.as_str(), "Blue pen");
/// assert!(SearchQuery::parse(Some("   ".into())).is_err());
/// assert!(SearchQuery::parse(None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Validate the raw `q` parameter.
    ///
    /// # Errors
    /// Returns an invalid-request [`Error`] when the query is absent, empty,
    /// or only whitespace.
    pub fn parse(raw: Option<String>) -> Result<Self, Error> {
        match raw {
            Some(text) if !text.trim().is_empty() => Ok(Self(text.trim().to_owned())),
            _ => Err(Error::invalid_request(MISSING_QUERY_MESSAGE)),
        }
    }

    /// Query text with surrounding whitespace removed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Distinct lower-cased words of the query.
    #[must_use]
    pub fn terms(&self) -> BTreeSet<String> {
        tokenize(&self.0).collect()
    }

    /// Whether `document` contains every query word.
    ///
    /// A query without any word matches nothing.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        let terms = self.terms();
        if terms.is_empty() {
            return false;
        }
        let mut words = BTreeSet::new();
        for value in document.values() {
            collect_words(value, &mut words);
        }
        terms.is_subset(&words)
    }
}

/// Split `text` into lower-cased alphanumeric words.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

fn collect_words(value: &Value, words: &mut BTreeSet<String>) {
    match value {
        Value::String(text) => words.extend(tokenize(text)),
        Value::Array(items) => {
            for item in items {
                collect_words(item, words);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_words(item, words);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
