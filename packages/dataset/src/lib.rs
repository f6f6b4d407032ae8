// ABOUTME: Survey dataset loading, statistics and summary rendering
// ABOUTME: Load never fails; errors degrade to an empty table and an error summary

use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

pub mod labels;
pub mod stats;
pub mod table;

pub use table::Table;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// A loaded dataset and its rendered summary text.
///
/// Replaced wholesale on reload; the previous table and summary are dropped
/// together.
#[derive(Debug, Clone, Default)]
pub struct DatasetState {
    pub table: Table,
    pub summary: String,
}

impl DatasetState {
    /// Load a dataset from disk.
    ///
    /// Fails soft: a missing file yields an empty table summarized normally,
    /// and any IO or parse error yields an empty table with an error string
    /// in place of the statistics. Never returns an error to the caller.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!(
                "No dataset found at {}; proceeding with empty table",
                path.display()
            );
            let table = Table::empty();
            let summary = stats::summarize(&table);
            return Self { table, summary };
        }

        match Table::from_csv_path(path) {
            Ok(table) => {
                info!("Loaded dataset: {} records", table.len());
                let summary = stats::summarize(&table);
                Self { table, summary }
            }
            Err(err) => {
                error!("Error loading dataset: {}", err);
                Self {
                    table: Table::empty(),
                    summary: format!("Error loading data: {}", err),
                }
            }
        }
    }
}
