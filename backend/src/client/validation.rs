//! Client-side validation of search input.

use regex::Regex;

/// Pattern a search input must match before a request is issued: a leading
/// non-whitespace character followed by at most 100 more characters.
pub const SEARCH_INPUT_PATTERN: &str = r"^\S.{0,100}$";

/// Compiled search input rule.
#[derive(Debug, Clone)]
pub struct SearchInputRule(Regex);

impl SearchInputRule {
    /// Compile [`SEARCH_INPUT_PATTERN`].
    ///
    /// # Errors
    /// Returns the regex error if the pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Regex::new(SEARCH_INPUT_PATTERN).map(Self)
    }

    /// Whether `input` may be submitted as a search.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        self.0.is_match(input)
    }
}
