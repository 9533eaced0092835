//! Core domain types for the clustered movie catalog.
//!
//! The catalog is a read-only table of movies with a precomputed cluster
//! assignment per row, paired with the trained model's cluster centers and
//! three rating-quantile thresholds computed once at load time.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up row positions,
// catalog keys, and cluster labels

/// Unique catalog key for a movie (never exposed in recommendation output)
pub type MovieId = u32;

/// Positional row index into the catalog table
pub type RowId = usize;

/// Cluster label assigned by the offline model, dense in `[0, K)`
pub type ClusterId = u32;

// =============================================================================
// Catalog Row
// =============================================================================

/// One physical movie record from the clustered dataset CSV.
///
/// `standardized_title` is the matching key ("The Matrix", not "Matrix,
/// The"). It is not guaranteed unique: multiple releases can share a
/// standardized title with different years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub movie_id: MovieId,
    /// Original display title, possibly ", The"-suffixed
    pub title: String,
    /// Normalized display form used for title matching
    pub standardized_title: String,
    /// Release year; rows lacking a year were removed upstream
    pub year: u16,
    /// Mean user rating
    pub rating: f32,
    /// Cluster id assigned by the offline model
    pub cluster: ClusterId,
}

// =============================================================================
// Cluster Model
// =============================================================================

/// The trained clustering artifact: one label per catalog row and one center
/// vector per cluster id. Loaded once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterModel {
    pub labels: Vec<ClusterId>,
    pub cluster_centers: Vec<Vec<f32>>,
}

impl ClusterModel {
    /// Cluster label for a catalog row, if the row is in range
    pub fn label(&self, row: RowId) -> Option<ClusterId> {
        self.labels.get(row).copied()
    }

    /// Center vector for a cluster id
    pub fn center(&self, cluster: ClusterId) -> Option<&[f32]> {
        self.cluster_centers
            .get(cluster as usize)
            .map(|v| v.as_slice())
    }

    /// All center vectors, indexed by cluster id
    pub fn centers(&self) -> &[Vec<f32>] {
        &self.cluster_centers
    }

    pub fn num_clusters(&self) -> usize {
        self.cluster_centers.len()
    }
}

// =============================================================================
// Rating Quantiles
// =============================================================================

/// 25th, 75th and 97th percentile of `rating` over the whole catalog.
///
/// These define the band boundaries used when sampling recommendations:
/// low = `rating < q25`, mid = `rating > q75`, high = `rating > q97`.
/// The mid and high bands overlap by construction (a high-rated movie
/// qualifies for both); this mirrors the trained pipeline and is intentional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingQuantiles {
    pub q25: f32,
    pub q75: f32,
    pub q97: f32,
}

impl RatingQuantiles {
    /// Compute the three thresholds from the full rating column.
    ///
    /// Uses linear interpolation between closest ranks, matching the
    /// convention of the training pipeline that produced the artifacts.
    pub fn from_ratings(ratings: &[f32]) -> Self {
        let mut sorted: Vec<f32> = ratings.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            q25: percentile(&sorted, 0.25),
            q75: percentile(&sorted, 0.75),
            q97: percentile(&sorted, 0.97),
        }
    }

    pub fn is_low(&self, rating: f32) -> bool {
        rating < self.q25
    }

    pub fn is_mid(&self, rating: f32) -> bool {
        rating > self.q75
    }

    pub fn is_high(&self, rating: f32) -> bool {
        rating > self.q97
    }
}

/// Linear-interpolation percentile over an already sorted slice
fn percentile(sorted: &[f32], q: f64) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    (sorted[lo] as f64 + (sorted[hi] as f64 - sorted[lo] as f64) * frac) as f32
}

// =============================================================================
// CatalogStore - The Immutable In-Memory Catalog
// =============================================================================

/// The in-memory, read-only catalog: rows, cluster model, and rating
/// quantiles.
///
/// Built once at startup via [`CatalogStore::load`] (or
/// [`CatalogStore::from_parts`] in tests) and shared immutably afterwards,
/// so concurrent reads need no locking.
#[derive(Debug)]
pub struct CatalogStore {
    pub(crate) rows: Vec<CatalogRow>,
    pub(crate) model: ClusterModel,
    pub(crate) quantiles: RatingQuantiles,
}

impl CatalogStore {
    /// Get a row by positional index
    pub fn row(&self, id: RowId) -> Option<&CatalogRow> {
        self.rows.get(id)
    }

    /// All rows in dataset order
    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn model(&self) -> &ClusterModel {
        &self.model
    }

    pub fn quantiles(&self) -> &RatingQuantiles {
        &self.quantiles
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
