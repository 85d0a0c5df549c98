//! Dataset loading from disk.
//!
//! # Responsibilities
//! - Read the JSON document at the configured path
//! - Parse the top-level array into records, in file order
//! - Degrade to an empty dataset on any read or parse failure
//!
//! # Design Decisions
//! - No caching here; see source.rs for the optional mtime snapshot
//! - Elements are kept as-is, whatever their shape

use std::path::{Path, PathBuf};
use serde_json::Value;
use thiserror::Error;

use crate::data::record::{Dataset, Record};

/// Reasons the backing file could not produce a dataset.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} does not contain a JSON array")]
    NotAnArray { path: PathBuf },
}

/// Load the dataset, returning an empty one if the source is unavailable.
pub async fn load(path: &Path) -> Dataset {
    match try_load(path).await {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!(error = %e, "Error loading NID data");
            Vec::new()
        }
    }
}

/// Load the dataset, surfacing the failure.
pub async fn try_load(path: &Path) -> Result<Dataset, SourceError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_dataset(path, &bytes)
}

fn parse_dataset(path: &Path, bytes: &[u8]) -> Result<Dataset, SourceError> {
    let document: Value = serde_json::from_slice(bytes).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(elements) = document else {
        return Err(SourceError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    let dataset: Dataset = elements.into_iter().map(Record::from).collect();

    tracing::debug!(path = %path.display(), records = dataset.len(), "NID data loaded");
    Ok(dataset)
}
