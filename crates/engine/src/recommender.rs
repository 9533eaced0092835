//! # Anti-Recommendation Selector
//!
//! This module turns a resolved movie into recommendations that are
//! deliberately dissimilar to it:
//! 1. Resolve the title through the cascade
//! 2. Look up the movie's cluster and its center vector
//! 3. Find the cluster whose center is farthest away (Euclidean)
//! 4. Sample one movie per rating band (low/mid/high) from that cluster
//! 5. Return the bundle plus the resolved movie's own metadata

use crate::resolution::{Disambiguation, Resolution};
use crate::resolver::{ResolverConfig, TitleResolver};
use crate::suggest;
use catalog::{CatalogRow, CatalogStore, ClusterId, RowId};
use rand::seq::IndexedRandom;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Internal inconsistencies between the catalog and the model.
///
/// These are unexpected by construction (load-time validation rules them
/// out) and are reported to callers as a generic failure, never retried.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("resolution produced an empty row set")]
    EmptyResolution,

    #[error("catalog row {row} has no cluster label")]
    MissingLabel { row: RowId },

    #[error("cluster {cluster} has no center vector")]
    MissingCenter { cluster: ClusterId },
}

/// One recommended movie: every catalog field except the internal key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedMovie {
    pub title: String,
    pub standardized_title: String,
    pub year: u16,
    pub rating: f32,
    pub cluster: ClusterId,
}

impl From<&CatalogRow> for RecommendedMovie {
    fn from(row: &CatalogRow) -> Self {
        Self {
            title: row.title.clone(),
            standardized_title: row.standardized_title.clone(),
            year: row.year,
            rating: row.rating,
            cluster: row.cluster,
        }
    }
}

/// Metadata of the movie the query resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryMovie {
    pub title: String,
    pub rating: f32,
    pub year: u16,
}

/// The anti-recommendation response: zero to three sampled movies plus the
/// resolved query's own metadata.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationBundle {
    pub recommendations: Vec<RecommendedMovie>,
    pub query: QueryMovie,
}

/// Outcome of a recommendation request; a disambiguation from the resolver
/// is propagated unchanged, not wrapped into an error.
#[derive(Debug, Clone)]
pub enum RecommendOutcome {
    Bundle(RecommendationBundle),
    Unresolved(Disambiguation),
}

/// The recommender: owns the resolver and the selection logic, operating
/// over the shared immutable catalog.
///
/// Stateless per call; the only randomness is the per-band draw, which uses
/// a thread-local RNG so concurrent calls never contend.
pub struct AntiRecommender {
    store: Arc<CatalogStore>,
    resolver: TitleResolver,
}

impl AntiRecommender {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self::with_config(store, ResolverConfig::default())
    }

    pub fn with_config(store: Arc<CatalogStore>, config: ResolverConfig) -> Self {
        let resolver = TitleResolver::with_config(store.clone(), config);
        Self { store, resolver }
    }

    /// Resolve a title without recommending (exposed for the serving layer).
    pub fn resolve_title(&self, query: &str, year: Option<u16>) -> Resolution {
        self.resolver.resolve(query, year)
    }

    /// Fuzzy search-box suggestions, formatted as `"Title (Year)"`.
    pub fn search_suggestions(&self, query: &str) -> Vec<String> {
        suggest::search_suggestions(&self.store, query)
    }

    /// Generate anti-recommendations for a movie title.
    pub fn recommend(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> Result<RecommendOutcome, EngineError> {
        let rows = match self.resolver.resolve(query, year) {
            Resolution::Unresolved(disambiguation) => {
                return Ok(RecommendOutcome::Unresolved(disambiguation));
            }
            Resolution::Resolved(rows) => rows,
        };

        // The resolved set is a singleton under normal operation, but the
        // algorithm only relies on it being non-empty.
        let row_id = *rows.first().ok_or(EngineError::EmptyResolution)?;
        let row = self
            .store
            .row(row_id)
            .ok_or(EngineError::MissingLabel { row: row_id })?;

        let model = self.store.model();
        let cluster = model
            .label(row_id)
            .ok_or(EngineError::MissingLabel { row: row_id })?;
        let center = model
            .center(cluster)
            .ok_or(EngineError::MissingCenter { cluster })?;

        let farthest = farthest_cluster(center, model.centers());
        debug!(
            movie = %row.standardized_title,
            own_cluster = cluster,
            farthest_cluster = farthest,
            "selected farthest cluster"
        );

        let recommendations = self.sample_bands(farthest);

        Ok(RecommendOutcome::Bundle(RecommendationBundle {
            recommendations,
            query: QueryMovie {
                title: row.title.clone(),
                rating: row.rating,
                year: row.year,
            },
        }))
    }

    /// Draw one movie per non-empty rating band from the given cluster.
    ///
    /// Draws are independent and uniform; since the mid and high bands
    /// overlap, the same movie can legitimately appear twice. Empty bands
    /// contribute nothing.
    fn sample_bands(&self, cluster: ClusterId) -> Vec<RecommendedMovie> {
        let quantiles = self.store.quantiles();
        let labels = &self.store.model().labels;

        let in_cluster: Vec<&CatalogRow> = self
            .store
            .rows()
            .iter()
            .enumerate()
            .filter(|(id, _)| labels[*id] == cluster)
            .map(|(_, row)| row)
            .collect();

        let bands: [Vec<&CatalogRow>; 3] = [
            in_cluster
                .iter()
                .copied()
                .filter(|r| quantiles.is_low(r.rating))
                .collect(),
            in_cluster
                .iter()
                .copied()
                .filter(|r| quantiles.is_mid(r.rating))
                .collect(),
            in_cluster
                .iter()
                .copied()
                .filter(|r| quantiles.is_high(r.rating))
                .collect(),
        ];

        let mut rng = rand::rng();
        bands
            .iter()
            .filter_map(|band| band.choose(&mut rng))
            .map(|row| RecommendedMovie::from(*row))
            .collect()
    }
}

/// Stable argmax over Euclidean distances to every cluster center.
///
/// The movie's own cluster is included at distance zero; ties keep the
/// first occurrence in ascending cluster-id order.
fn farthest_cluster(center: &[f32], centers: &[Vec<f32>]) -> ClusterId {
    let mut best = 0usize;
    let mut best_distance = f32::NEG_INFINITY;
    for (id, other) in centers.iter().enumerate() {
        let distance = euclidean(center, other);
        if distance > best_distance {
            best_distance = distance;
            best = id;
        }
    }
    best as ClusterId
}

fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::DisambiguationKind;
    use catalog::ClusterModel;

    fn row(movie_id: u32, title: &str, year: u16, rating: f32, cluster: u32) -> CatalogRow {
        CatalogRow {
            movie_id,
            title: format!("{} ({})", title, year),
            standardized_title: title.to_string(),
            year,
            rating,
            cluster,
        }
    }

    /// Three clusters laid out on a line: cluster 0 at the origin, cluster 1
    /// nearby, cluster 2 far away. Cluster 2 holds movies across the whole
    /// rating range so every band is populated.
    fn test_store() -> Arc<CatalogStore> {
        let rows = vec![
            row(1, "The Matrix", 1999, 3.0, 0),
            row(2, "Near Movie", 2001, 3.0, 1),
            row(3, "Far Low", 2002, 1.0, 2),
            row(4, "Far Low Too", 2003, 1.2, 2),
            row(5, "Far Mid", 2004, 4.0, 2),
            row(6, "Far High", 2005, 5.0, 2),
            row(7, "Middling", 2006, 3.0, 0),
            row(8, "Also Middling", 2007, 3.1, 1),
        ];
        let labels = rows.iter().map(|r| r.cluster).collect();
        let model = ClusterModel {
            labels,
            cluster_centers: vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![10.0, 10.0]],
        };
        Arc::new(CatalogStore::from_parts(rows, model).unwrap())
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean(&[1.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_farthest_cluster_excludes_self_in_practice() {
        let centers = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![10.0, 10.0]];
        assert_eq!(farthest_cluster(&centers[0], &centers), 2);
        assert_eq!(farthest_cluster(&centers[2], &centers), 0);
    }

    #[test]
    fn test_farthest_cluster_single_cluster_is_itself() {
        let centers = vec![vec![0.0, 0.0]];
        assert_eq!(farthest_cluster(&centers[0], &centers), 0);
    }

    #[test]
    fn test_farthest_cluster_tie_breaks_on_first() {
        // Two centers equidistant from the query center
        let centers = vec![vec![0.0], vec![5.0], vec![-5.0]];
        assert_eq!(farthest_cluster(&centers[0], &centers), 1);
    }

    #[test]
    fn test_recommend_samples_from_farthest_cluster() {
        let recommender = AntiRecommender::new(test_store());
        let outcome = recommender.recommend("The Matrix", None).unwrap();

        let bundle = match outcome {
            RecommendOutcome::Bundle(b) => b,
            _ => panic!("expected a bundle"),
        };

        assert!(!bundle.recommendations.is_empty());
        assert!(bundle.recommendations.len() <= 3);
        for rec in &bundle.recommendations {
            assert_eq!(rec.cluster, 2, "recommendation not in farthest cluster");
        }
    }

    #[test]
    fn test_recommend_bands_satisfy_predicates() {
        let store = test_store();
        let q = *store.quantiles();
        let recommender = AntiRecommender::new(store);

        let outcome = recommender.recommend("The Matrix", None).unwrap();
        let bundle = match outcome {
            RecommendOutcome::Bundle(b) => b,
            _ => panic!("expected a bundle"),
        };

        for rec in &bundle.recommendations {
            assert!(
                q.is_low(rec.rating) || q.is_mid(rec.rating) || q.is_high(rec.rating),
                "rating {} falls in no band",
                rec.rating
            );
        }
    }

    #[test]
    fn test_recommend_query_metadata() {
        let recommender = AntiRecommender::new(test_store());
        let outcome = recommender.recommend("the matrix", None).unwrap();

        match outcome {
            RecommendOutcome::Bundle(bundle) => {
                assert_eq!(bundle.query.title, "The Matrix (1999)");
                assert_eq!(bundle.query.year, 1999);
                assert!((bundle.query.rating - 3.0).abs() < 1e-6);
            }
            _ => panic!("expected a bundle"),
        }
    }

    #[test]
    fn test_recommend_propagates_disambiguation_unchanged() {
        let recommender = AntiRecommender::new(test_store());
        let outcome = recommender.recommend("", None).unwrap();

        match outcome {
            RecommendOutcome::Unresolved(d) => {
                assert_eq!(d.kind, DisambiguationKind::NoTitleProvided);
            }
            _ => panic!("expected disambiguation passthrough"),
        }
    }

    #[test]
    fn test_recommend_empty_bands_yield_fewer_entries() {
        // Farthest cluster (2) holds a single mid/high movie and nothing in
        // the low band
        let rows = vec![
            row(1, "Query Movie", 2000, 3.0, 0),
            row(2, "Low Here", 2001, 1.0, 0),
            row(3, "Mid Here", 2002, 3.5, 0),
            row(4, "Only Far Movie", 2003, 5.0, 1),
        ];
        let labels = rows.iter().map(|r| r.cluster).collect();
        let model = ClusterModel {
            labels,
            cluster_centers: vec![vec![0.0], vec![100.0]],
        };
        let store = Arc::new(CatalogStore::from_parts(rows, model).unwrap());
        let recommender = AntiRecommender::new(store);

        let outcome = recommender.recommend("Query Movie", None).unwrap();
        let bundle = match outcome {
            RecommendOutcome::Bundle(b) => b,
            _ => panic!("expected a bundle"),
        };

        // The single far movie (5.0) is in both the mid and high bands, so
        // it is drawn twice; the empty low band contributes nothing.
        assert_eq!(bundle.recommendations.len(), 2);
        for rec in &bundle.recommendations {
            assert_eq!(rec.standardized_title, "Only Far Movie");
        }
    }

    #[test]
    fn test_recommend_never_exposes_movie_id() {
        let recommender = AntiRecommender::new(test_store());
        let outcome = recommender.recommend("The Matrix", None).unwrap();
        let bundle = match outcome {
            RecommendOutcome::Bundle(b) => b,
            _ => panic!("expected a bundle"),
        };

        let json = serde_json::to_value(&bundle).unwrap();
        for rec in json["recommendations"].as_array().unwrap() {
            assert!(rec.get("movie_id").is_none());
            assert!(rec.get("title").is_some());
            assert!(rec.get("cluster").is_some());
        }
    }

    #[test]
    fn test_recommend_single_cluster_catalog() {
        // With exactly one cluster the farthest cluster is the movie's own
        let rows = vec![
            row(1, "Only Movie", 2000, 3.0, 0),
            row(2, "Other Movie", 2001, 4.0, 0),
        ];
        let labels = rows.iter().map(|r| r.cluster).collect();
        let model = ClusterModel {
            labels,
            cluster_centers: vec![vec![0.0]],
        };
        let store = Arc::new(CatalogStore::from_parts(rows, model).unwrap());
        let recommender = AntiRecommender::new(store);

        let outcome = recommender.recommend("Only Movie", None).unwrap();
        match outcome {
            RecommendOutcome::Bundle(bundle) => {
                for rec in &bundle.recommendations {
                    assert_eq!(rec.cluster, 0);
                }
            }
            _ => panic!("expected a bundle"),
        }
    }
}
