//! # Catalog Crate
//!
//! This crate loads and holds the clustered movie catalog: a read-only table
//! of movies with a precomputed cluster assignment per row, the trained
//! model's cluster centers, and the rating-quantile thresholds.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CatalogRow, ClusterModel, RatingQuantiles, CatalogStore)
//! - **parser**: Parse the dataset CSV and the model JSON artifact
//! - **store**: Assemble and validate the CatalogStore
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogStore;
//! use std::path::Path;
//!
//! // Load both artifacts once at startup
//! let store = CatalogStore::load(
//!     Path::new("data/clustered_dataset.csv"),
//!     Path::new("data/movies_kmeans.json"),
//! )?;
//!
//! let row = store.row(0).unwrap();
//! println!("{} ({}) is in cluster {}", row.standardized_title, row.year, row.cluster);
//! ```
//!
//! The store is immutable after load, so it can be wrapped in an `Arc` and
//! shared across concurrent recommendation calls without locking.

// Public modules
pub mod error;
pub mod parser;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{
    // Type aliases
    ClusterId,
    MovieId,
    RowId,
    // Core types
    CatalogRow,
    CatalogStore,
    ClusterModel,
    RatingQuantiles,
};
