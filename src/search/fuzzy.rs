//! Fuzzy matching for list search boxes.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

/// Matches item text against a search query using `fuzzy-matcher` (Skim
/// algorithm). Each whitespace-separated term must match on its own, so
/// `"hesse fic"` finds a fiction title by Hesse regardless of field order.
pub struct QueryMatcher {
    matcher: SkimMatcherV2,
    terms: Vec<String>,
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        Self {
            matcher: SkimMatcherV2::default().smart_case(),
            terms: query.split_whitespace().map(str::to_owned).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// An empty query matches everything.
    pub fn matches(&self, text: &str) -> bool {
        self.score(text).is_some()
    }

    /// Sum of per-term scores, or `None` when any term misses.
    pub fn score(&self, text: &str) -> Option<i64> {
        self.terms.iter().try_fold(0_i64, |total, term| {
            self.matcher
                .fuzzy_match(text, term)
                .map(|score| total + score)
        })
    }
}
