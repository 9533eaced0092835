//! Match stages for the title resolution cascade.
//!
//! The cascade is an explicit ordered pipeline: each stage inspects the
//! catalog and either produces a definitive resolution, a set of candidate
//! rows for the shared year-filter/decision step, or passes to the next
//! stage. Keeping the stages separate makes the short-circuit and tie-break
//! rules testable in isolation.

use crate::resolution::{Disambiguation, Resolution, YEAR_MISMATCH_MESSAGE};
use catalog::{CatalogStore, RowId};
use std::collections::HashSet;

/// What a single match stage produced.
pub enum StageOutcome {
    /// A definitive answer; the cascade stops here
    Final(Resolution),
    /// Candidate rows (dataset order) to be year-filtered and decided on
    Candidates(Vec<RowId>),
    /// Nothing found; try the next stage
    Continue,
}

/// One stage of the resolution cascade.
pub trait MatchStage: Send + Sync {
    /// Returns the name of this stage (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this stage to the query.
    fn apply(&self, store: &CatalogStore, query: &str, year: Option<u16>) -> StageOutcome;
}

/// Exact case-insensitive match on `standardized_title`.
///
/// Only the single-match fast paths terminate here; with zero or multiple
/// exact matches (or a single match plus a matching year) the exact result
/// set is discarded and the cascade falls through to the substring stage.
pub struct ExactStage;

impl MatchStage for ExactStage {
    fn name(&self) -> &str {
        "ExactStage"
    }

    fn apply(&self, store: &CatalogStore, query: &str, year: Option<u16>) -> StageOutcome {
        let needle = query.to_lowercase();
        let matches: Vec<RowId> = store
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.standardized_title.to_lowercase() == needle)
            .map(|(id, _)| id)
            .collect();

        if matches.len() != 1 {
            return StageOutcome::Continue;
        }

        let row = &store.rows()[matches[0]];
        match year {
            // A year mismatch on an otherwise-unique title is reported with
            // the correct year as the single suggestion, not silently fixed.
            Some(requested) if row.year != requested => {
                StageOutcome::Final(Resolution::Unresolved(Disambiguation::ambiguous(
                    YEAR_MISMATCH_MESSAGE,
                    vec![(row.standardized_title.clone(), row.year)],
                )))
            }
            None => StageOutcome::Final(Resolution::Resolved(matches)),
            // Unique match with the right year still goes through the
            // substring path, where the year filter confirms it.
            Some(_) => StageOutcome::Continue,
        }
    }
}

/// Case-insensitive substring match over all standardized titles.
pub struct SubstringStage;

impl MatchStage for SubstringStage {
    fn name(&self) -> &str {
        "SubstringStage"
    }

    fn apply(&self, store: &CatalogStore, query: &str, _year: Option<u16>) -> StageOutcome {
        let needle = query.to_lowercase();
        let candidates: Vec<RowId> = store
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.standardized_title.to_lowercase().contains(&needle))
            .map(|(id, _)| id)
            .collect();

        if candidates.is_empty() {
            StageOutcome::Continue
        } else {
            StageOutcome::Candidates(candidates)
        }
    }
}

/// Fuzzy fallback: normalized Levenshtein similarity against every
/// standardized title, keeping the closest distinct titles above the cutoff.
///
/// Candidate rows come back in dataset order regardless of similarity rank;
/// the ranking only decides which titles make the cut.
pub struct FuzzyStage {
    pub cutoff: f64,
    pub limit: usize,
}

impl MatchStage for FuzzyStage {
    fn name(&self) -> &str {
        "FuzzyStage"
    }

    fn apply(&self, store: &CatalogStore, query: &str, _year: Option<u16>) -> StageOutcome {
        let needle = query.to_lowercase();

        // Score each distinct title once, preserving first-occurrence order
        // so equal scores tie-break deterministically.
        let mut seen: HashSet<String> = HashSet::new();
        let mut scored: Vec<(String, f64)> = Vec::new();
        for row in store.rows() {
            let title = row.standardized_title.to_lowercase();
            if seen.insert(title.clone()) {
                let score = strsim::normalized_levenshtein(&needle, &title);
                if score >= self.cutoff {
                    scored.push((title, score));
                }
            }
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.limit);

        let close: HashSet<String> = scored.into_iter().map(|(title, _)| title).collect();
        let candidates: Vec<RowId> = store
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| close.contains(&row.standardized_title.to_lowercase()))
            .map(|(id, _)| id)
            .collect();

        // Possibly empty; the fuzzy stage is the end of the cascade, so an
        // empty candidate set becomes the "no match at all" disambiguation.
        StageOutcome::Candidates(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogRow, ClusterModel};

    fn test_store(titles: &[(&str, u16)]) -> CatalogStore {
        let rows: Vec<CatalogRow> = titles
            .iter()
            .enumerate()
            .map(|(i, (title, year))| CatalogRow {
                movie_id: i as u32 + 1,
                title: format!("{} ({})", title, year),
                standardized_title: title.to_string(),
                year: *year,
                rating: 3.0,
                cluster: 0,
            })
            .collect();
        let model = ClusterModel {
            labels: vec![0; rows.len()],
            cluster_centers: vec![vec![0.0]],
        };
        CatalogStore::from_parts(rows, model).unwrap()
    }

    #[test]
    fn test_exact_stage_unique_match_no_year() {
        let store = test_store(&[("The Matrix", 1999), ("Nope", 2022)]);
        match ExactStage.apply(&store, "the matrix", None) {
            StageOutcome::Final(Resolution::Resolved(rows)) => assert_eq!(rows, vec![0]),
            _ => panic!("expected resolved fast path"),
        }
    }

    #[test]
    fn test_exact_stage_year_mismatch_suggests_correct_year() {
        let store = test_store(&[("The Matrix", 1999)]);
        match ExactStage.apply(&store, "The Matrix", Some(2003)) {
            StageOutcome::Final(Resolution::Unresolved(d)) => {
                assert_eq!(d.message, YEAR_MISMATCH_MESSAGE);
                assert_eq!(
                    d.possible_matches,
                    Some(vec![("The Matrix".to_string(), 1999)])
                );
            }
            _ => panic!("expected year-mismatch disambiguation"),
        }
    }

    #[test]
    fn test_exact_stage_matching_year_falls_through() {
        // The exact result set only exists for the fast paths; a correct
        // year goes through the substring path instead.
        let store = test_store(&[("The Matrix", 1999)]);
        assert!(matches!(
            ExactStage.apply(&store, "The Matrix", Some(1999)),
            StageOutcome::Continue
        ));
    }

    #[test]
    fn test_exact_stage_duplicate_titles_fall_through() {
        let store = test_store(&[("The Matrix", 1999), ("The Matrix", 2021)]);
        assert!(matches!(
            ExactStage.apply(&store, "the matrix", None),
            StageOutcome::Continue
        ));
    }

    #[test]
    fn test_substring_stage_collects_all_containing_rows() {
        let store = test_store(&[("The Matrix", 1999), ("The Matrix Reloaded", 2003), ("Nope", 2022)]);
        match SubstringStage.apply(&store, "matrix", None) {
            StageOutcome::Candidates(c) => assert_eq!(c, vec![0, 1]),
            _ => panic!("expected candidates"),
        }
    }

    #[test]
    fn test_substring_stage_continues_when_empty() {
        let store = test_store(&[("Nope", 2022)]);
        assert!(matches!(
            SubstringStage.apply(&store, "matrix", None),
            StageOutcome::Continue
        ));
    }

    #[test]
    fn test_fuzzy_stage_finds_close_title() {
        let store = test_store(&[("The Matrix", 1999), ("Nope", 2022)]);
        let stage = FuzzyStage { cutoff: 0.6, limit: 5 };
        match stage.apply(&store, "the matrxi", None) {
            StageOutcome::Candidates(c) => assert_eq!(c, vec![0]),
            _ => panic!("expected candidates"),
        }
    }

    #[test]
    fn test_fuzzy_stage_empty_for_garbage_query() {
        let store = test_store(&[("The Matrix", 1999), ("Nope", 2022)]);
        let stage = FuzzyStage { cutoff: 0.6, limit: 5 };
        match stage.apply(&store, "zzzzqqqqxxxx", None) {
            StageOutcome::Candidates(c) => assert!(c.is_empty()),
            _ => panic!("fuzzy stage always yields a candidate set"),
        }
    }

    #[test]
    fn test_fuzzy_stage_caps_suggestions() {
        let store = test_store(&[
            ("Movie 1", 2000),
            ("Movie 2", 2001),
            ("Movie 3", 2002),
            ("Movie 4", 2003),
            ("Movie 5", 2004),
            ("Movie 6", 2005),
            ("Movie 7", 2006),
        ]);
        let stage = FuzzyStage { cutoff: 0.6, limit: 5 };
        match stage.apply(&store, "movie", None) {
            StageOutcome::Candidates(c) => assert_eq!(c.len(), 5),
            _ => panic!("expected candidates"),
        }
    }
}
