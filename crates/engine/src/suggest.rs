//! Search-box suggestions.
//!
//! Unlike the resolution cascade, suggestions always return something to
//! show: the closest distinct titles by fuzzy similarity, expanded to one
//! entry per year variant and capped.

use catalog::CatalogStore;
use std::collections::HashSet;

/// How many distinct titles to rank before expanding year variants
const MATCH_POOL: usize = 10;

/// Maximum suggestions returned to the caller
const SUGGESTION_LIMIT: usize = 6;

/// Rank catalog titles by similarity to `query` and format the best ones as
/// `"Title (Year)"`. Titles with multiple year variants contribute one entry
/// per variant before the cap applies.
pub fn search_suggestions(store: &CatalogStore, query: &str) -> Vec<String> {
    let needle = query.to_lowercase();

    // Distinct titles in first-occurrence order, scored once each
    let mut seen: HashSet<&str> = HashSet::new();
    let mut scored: Vec<(&str, f64)> = Vec::new();
    for row in store.rows() {
        let title = row.standardized_title.as_str();
        if seen.insert(title) {
            let score = strsim::normalized_levenshtein(&needle, &title.to_lowercase());
            scored.push((title, score));
        }
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(MATCH_POOL);

    let mut suggestions = Vec::new();
    for (title, _) in scored {
        for row in store.rows().iter().filter(|r| r.standardized_title == title) {
            suggestions.push(format!("{} ({})", title, row.year));
        }
    }

    suggestions.truncate(SUGGESTION_LIMIT);
    suggestions
}
