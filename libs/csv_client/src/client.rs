use std::{fs::File, io::Read, path::Path};

use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;

use crate::error::{CsvDataReaderClientResult, CsvDataReaderError};

/// A row the reader could not turn into a record.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug)]
pub struct ReadOutcome<T> {
    pub records: Vec<T>,
    pub rejected: Vec<RejectedRow>,
}

pub struct CsvDataReaderClient<R> {
    csv_reader: Reader<R>,
    source: String,
}

impl CsvDataReaderClient<File> {
    pub fn open(path: impl AsRef<Path>) -> CsvDataReaderClientResult<Self> {
        let path = path.as_ref();
        let csv_reader = builder().from_path(path).map_err(|source| {
            CsvDataReaderError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(Self {
            csv_reader,
            source: path.display().to_string(),
        })
    }
}

impl<R: Read> CsvDataReaderClient<R> {
    pub fn from_reader(reader: R, source: impl Into<String>) -> Self {
        Self {
            csv_reader: builder().from_reader(reader),
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Reads every row as `T`.
    ///
    /// Header names listed in `aliases` as `(found, canonical)` are renamed
    /// before the required columns are checked. Rows that cannot be
    /// deserialized are reported in [`ReadOutcome::rejected`]; only I/O
    /// failures and missing columns abort the read.
    pub fn read_records<T: DeserializeOwned>(
        &mut self,
        required_headers: &[&str],
        aliases: &[(&str, &str)],
    ) -> CsvDataReaderClientResult<ReadOutcome<T>> {
        let found = self.csv_reader.headers()?.clone();
        if found.is_empty() {
            return Err(CsvDataReaderError::EmptyFile);
        }

        let headers = rename_headers(&found, aliases);
        for name in required_headers {
            find_column(&headers, name)?;
        }
        self.csv_reader.set_headers(headers.clone());

        let mut records = Vec::new();
        let mut rejected = Vec::new();
        for result in self.csv_reader.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    rejected.push(RejectedRow {
                        line: e.position().map_or(0, |p| p.line()),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            match row.deserialize::<T>(Some(&headers)) {
                Ok(record) => records.push(record),
                Err(e) => rejected.push(RejectedRow {
                    line: row.position().map_or(0, |p| p.line()),
                    reason: e.to_string(),
                }),
            }
        }

        Ok(ReadOutcome { records, rejected })
    }
}

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.trim(Trim::All).flexible(true);
    builder
}

fn rename_headers(
    headers: &StringRecord,
    aliases: &[(&str, &str)],
) -> StringRecord {
    headers
        .iter()
        .map(|header| {
            aliases
                .iter()
                .find(|(alias, canonical)| {
                    header == *alias && !headers.iter().any(|h| h == *canonical)
                })
                .map_or(header, |(_, canonical)| *canonical)
        })
        .collect()
}

fn find_column(
    header_row: &StringRecord,
    name: &str,
) -> CsvDataReaderClientResult<usize> {
    header_row
        .iter()
        .position(|cell| cell == name)
        .ok_or_else(|| CsvDataReaderError::MissingHeader(name.to_string()))
}
