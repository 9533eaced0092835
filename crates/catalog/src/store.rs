//! CatalogStore construction and load-time validation.
//!
//! The store is assembled from the two artifacts in one shot:
//! 1. Parse the clustered dataset CSV and the model blob (in parallel)
//! 2. Validate the row-count invariant against the model labels
//! 3. Compute the rating quantiles over the full catalog
//!
//! Any failure here is fatal; the store never becomes ready half-loaded.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::{CatalogRow, CatalogStore, ClusterModel, RatingQuantiles};
use std::path::Path;
use tracing::info;

impl CatalogStore {
    /// Load the catalog and cluster model from disk.
    ///
    /// This is the main entry point used by the server and CLI at startup.
    pub fn load(data_path: &Path, model_path: &Path) -> Result<Self> {
        info!(
            "Loading catalog from {:?} and model from {:?}",
            data_path, model_path
        );

        // The two artifacts are independent files; parse them in parallel
        let (rows, model) = rayon::join(
            || parser::parse_catalog(data_path),
            || parser::parse_model(model_path),
        );

        Self::from_parts(rows?, model?)
    }

    /// Build a store from already-parsed artifacts.
    ///
    /// Validates the load integrity invariant (one model label per catalog
    /// row, every label within the center table) and computes the rating
    /// quantiles.
    pub fn from_parts(rows: Vec<CatalogRow>, model: ClusterModel) -> Result<Self> {
        if rows.len() != model.labels.len() {
            return Err(CatalogError::RowCountMismatch {
                rows: rows.len(),
                labels: model.labels.len(),
            });
        }

        for &label in &model.labels {
            if (label as usize) >= model.cluster_centers.len() {
                return Err(CatalogError::InvalidValue {
                    field: "labels".to_string(),
                    value: label.to_string(),
                });
            }
        }

        let ratings: Vec<f32> = rows.iter().map(|r| r.rating).collect();
        let quantiles = RatingQuantiles::from_ratings(&ratings);

        info!(
            "Catalog ready: {} rows, {} clusters, quantiles q25={:.2} q75={:.2} q97={:.2}",
            rows.len(),
            model.num_clusters(),
            quantiles.q25,
            quantiles.q75,
            quantiles.q97,
        );

        Ok(Self {
            rows,
            model,
            quantiles,
        })
    }
}
