//! Parsers for the two catalog artifacts.
//!
//! - the clustered dataset CSV with columns
//!   `movie_id,title,standardized_title,year,rating,cluster`
//! - the trained model artifact, a JSON blob with per-row labels and
//!   per-cluster center vectors

use crate::error::{CatalogError, Result};
use crate::types::{CatalogRow, ClusterModel};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|_| CatalogError::FileNotFound {
        path: path.display().to_string(),
    })
}

/// Parse the clustered dataset CSV into catalog rows, preserving file order.
///
/// Row order matters: the model's label array is positional, so rows must
/// come out in exactly the order they were written by the training pipeline.
pub fn parse_catalog(path: &Path) -> Result<Vec<CatalogRow>> {
    let file = open_file(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize().enumerate() {
        let row: CatalogRow = record.map_err(|e| CatalogError::ParseError {
            file: path.display().to_string(),
            // +2: one for the header line, one for 1-based numbering
            record: idx + 2,
            reason: e.to_string(),
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Parse the serialized cluster model artifact.
pub fn parse_model(path: &Path) -> Result<ClusterModel> {
    let file = open_file(path)?;
    let model: ClusterModel =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| CatalogError::ModelError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

    if model.cluster_centers.is_empty() {
        return Err(CatalogError::InvalidValue {
            field: "cluster_centers".to_string(),
            value: "empty".to_string(),
        });
    }

    Ok(model)
}
