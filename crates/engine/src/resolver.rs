//! The TitleResolver chains the match stages into the resolution cascade.
//!
//! Stage order is fixed: exact match (with its single-match fast paths),
//! substring match, fuzzy fallback. The first stage to produce candidates
//! hands them to the shared year-filter and decision step.

use crate::resolution::{AMBIGUOUS_MESSAGE, Disambiguation, Resolution, TitleYear};
use crate::stages::{ExactStage, FuzzyStage, MatchStage, StageOutcome, SubstringStage};
use catalog::{CatalogStore, RowId};
use std::sync::Arc;
use tracing::debug;

/// Tunables for the fuzzy fallback stage.
///
/// The defaults (similarity cutoff 0.6, at most 5 suggested titles) match
/// the behavior the trained system has always had; they are configurable
/// rather than hardcoded because neither value has a documented derivation.
#[derive(Debug, Clone, Copy)]
pub struct ResolverConfig {
    pub fuzzy_cutoff: f64,
    pub fuzzy_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_cutoff: 0.6,
            fuzzy_limit: 5,
        }
    }
}

/// Resolves a free-text title (+ optional year) to catalog rows.
pub struct TitleResolver {
    store: Arc<CatalogStore>,
    stages: Vec<Box<dyn MatchStage>>,
}

impl TitleResolver {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self::with_config(store, ResolverConfig::default())
    }

    pub fn with_config(store: Arc<CatalogStore>, config: ResolverConfig) -> Self {
        let stages: Vec<Box<dyn MatchStage>> = vec![
            Box::new(ExactStage),
            Box::new(SubstringStage),
            Box::new(FuzzyStage {
                cutoff: config.fuzzy_cutoff,
                limit: config.fuzzy_limit,
            }),
        ];
        Self { store, stages }
    }

    /// Run the cascade for a query.
    ///
    /// Returns `Resolved` with one row (or the row set sharing one
    /// standardized title when no year was given), or a `Disambiguation`
    /// describing why the query did not pin down a single movie.
    pub fn resolve(&self, query: &str, year: Option<u16>) -> Resolution {
        if query.is_empty() {
            return Resolution::Unresolved(Disambiguation::no_title());
        }

        for stage in &self.stages {
            match stage.apply(&self.store, query, year) {
                StageOutcome::Final(resolution) => {
                    debug!(stage = stage.name(), "stage produced final resolution");
                    return resolution;
                }
                StageOutcome::Candidates(candidates) => {
                    debug!(
                        stage = stage.name(),
                        count = candidates.len(),
                        "stage produced candidates"
                    );
                    return self.decide(candidates, year);
                }
                StageOutcome::Continue => {}
            }
        }

        // The fuzzy stage always yields a candidate set, so this is only
        // reachable with a custom stage list.
        Resolution::Unresolved(Disambiguation::ambiguous(AMBIGUOUS_MESSAGE, vec![]))
    }

    /// Year-filter the candidates and decide the final outcome.
    fn decide(&self, candidates: Vec<RowId>, year: Option<u16>) -> Resolution {
        let filtered: Vec<RowId> = match year {
            Some(requested) => candidates
                .into_iter()
                .filter(|&id| self.store.rows()[id].year == requested)
                .collect(),
            None => candidates,
        };

        if filtered.len() == 1 {
            let id = filtered[0];
            if year.is_some() {
                return Resolution::Resolved(vec![id]);
            }
            // Without a year, resolve to every row sharing the matched
            // standardized title (duplicate year-variants stay together).
            let title = &self.store.rows()[id].standardized_title;
            let rows: Vec<RowId> = self
                .store
                .rows()
                .iter()
                .enumerate()
                .filter(|(_, row)| &row.standardized_title == title)
                .map(|(i, _)| i)
                .collect();
            return Resolution::Resolved(rows);
        }

        let possible_matches: Vec<TitleYear> = filtered
            .iter()
            .map(|&id| {
                let row = &self.store.rows()[id];
                (row.standardized_title.clone(), row.year)
            })
            .collect();
        Resolution::Unresolved(Disambiguation::ambiguous(AMBIGUOUS_MESSAGE, possible_matches))
    }
}
