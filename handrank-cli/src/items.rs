//! CSV item source.
//!
//! Reads one column of a headered CSV file. Each field is trimmed and blank
//! fields are skipped. Rows shorter than the header contribute nothing.
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Column read when neither `--column` nor the config names one.
pub const DEFAULT_COLUMN: &str = "Name";

#[derive(Debug, Error)]
pub enum ItemSourceError {
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("CSV file must have a single column titled '{column}'.")]
    MissingColumn { column: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Load item names from the `column` column of the CSV file at `path`.
pub fn load_items(path: &Path, column: &str) -> Result<Vec<String>, ItemSourceError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ItemSourceError::NotFound { path: path.to_path_buf() }
        } else {
            ItemSourceError::Io { path: path.to_path_buf(), source }
        }
    })?;
    read_items(file, column)
}

/// Read item names from CSV data.
pub fn read_items<R: Read>(input: R, column: &str) -> Result<Vec<String>, ItemSourceError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let col_idx = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ItemSourceError::MissingColumn { column: column.to_string() })?;

    let mut items = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(col_idx).map(str::trim).filter(|s| !s.is_empty()) {
            items.push(name.to_string());
        }
    }
    Ok(items)
}
