use std::path::PathBuf;

use thiserror::Error;

pub type CsvDataReaderClientResult<T> = Result<T, CsvDataReaderError>;

#[derive(Error, Debug)]
pub enum CsvDataReaderError {
    #[error("Failed to open CSV file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV reader error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File is empty, no header row found")]
    EmptyFile,

    #[error("Header column not found: {0}")]
    MissingHeader(String),
}
