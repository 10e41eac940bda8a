use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use csv_client::CsvDataReaderClient;
use csv_client::models::{
    DEVICE_HEADERS, DeviceRow, SAVING_HEADER_ALIASES, SAVING_HEADERS, SavingRow,
};
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::error::{LoadError, RowError};
use crate::models::{Device, DeviceId, SavingRecord};

const DEVICES_SOURCE: &str = "devices";
const SAVINGS_SOURCE: &str = "device savings";

#[derive(Debug, Clone)]
pub struct DataSources {
    pub devices_path: PathBuf,
    pub savings_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LoadSummary {
    pub devices_loaded: usize,
    pub savings_loaded: usize,
    /// Rows skipped because they could not be parsed.
    pub rejected_rows: usize,
}

#[derive(Debug, Default)]
struct Snapshot {
    devices: Vec<Device>,
    savings: Vec<SavingRecord>,
}

/// Process-wide, read-mostly record store.
///
/// Cloning is cheap and shares the same contents. Every accessor returns
/// owned copies; the internal collections are never handed out.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    inner: Arc<RwLock<Snapshot>>,
    ready: Arc<OnceCell<LoadSummary>>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads both files and replaces the current contents.
    ///
    /// Blocking. Nothing is replaced unless both sources were read.
    pub fn load(&self, sources: &DataSources) -> Result<LoadSummary, LoadError> {
        let devices = CsvDataReaderClient::open(&sources.devices_path).map_err(
            |error| LoadError::Source {
                source_name: DEVICES_SOURCE,
                error,
            },
        )?;
        let savings = CsvDataReaderClient::open(&sources.savings_path).map_err(
            |error| LoadError::Source {
                source_name: SAVINGS_SOURCE,
                error,
            },
        )?;

        self.load_from_clients(devices, savings)
    }

    pub fn load_from_readers<D: Read, S: Read>(
        &self,
        devices: D,
        savings: S,
    ) -> Result<LoadSummary, LoadError> {
        self.load_from_clients(
            CsvDataReaderClient::from_reader(devices, DEVICES_SOURCE),
            CsvDataReaderClient::from_reader(savings, SAVINGS_SOURCE),
        )
    }

    /// Loads once per store. Concurrent callers wait for the load already
    /// in flight instead of starting their own; a failed load can be
    /// retried by the next caller.
    pub async fn ensure_loaded(
        &self,
        sources: DataSources,
    ) -> Result<LoadSummary, LoadError> {
        let store = self.clone();
        self.ready
            .get_or_try_init(|| async move {
                let loaded =
                    tokio::task::spawn_blocking(move || store.load(&sources))
                        .await;
                match loaded {
                    Ok(result) => result,
                    Err(e) => Err(LoadError::Task(e.to_string())),
                }
            })
            .await
            .copied()
    }

    pub fn is_loaded(&self) -> bool {
        self.ready.initialized()
    }

    pub fn get_devices(&self) -> Vec<Device> {
        self.inner.read().devices.clone()
    }

    pub fn get_savings(&self) -> Vec<SavingRecord> {
        self.inner.read().savings.clone()
    }

    pub fn get_device_by_id(&self, id: DeviceId) -> Option<Device> {
        self.inner
            .read()
            .devices
            .iter()
            .find(|device| device.id == id)
            .cloned()
    }

    /// All records of one device, in load order.
    pub fn get_savings_by_device_id(&self, id: DeviceId) -> Vec<SavingRecord> {
        self.inner
            .read()
            .savings
            .iter()
            .filter(|saving| saving.device_id == id)
            .cloned()
            .collect()
    }

    pub fn device_count(&self) -> usize {
        self.inner.read().devices.len()
    }

    pub fn savings_count(&self) -> usize {
        self.inner.read().savings.len()
    }

    fn load_from_clients<D: Read, S: Read>(
        &self,
        mut devices: CsvDataReaderClient<D>,
        mut savings: CsvDataReaderClient<S>,
    ) -> Result<LoadSummary, LoadError> {
        tracing::info!(
            devices = devices.source(),
            savings = savings.source(),
            "Loading device savings data"
        );

        let (devices, rejected_devices) = read_source::<DeviceRow, Device, _>(
            &mut devices,
            DEVICES_SOURCE,
            DEVICE_HEADERS,
            &[],
        )?;
        let (savings, rejected_savings) =
            read_source::<SavingRow, SavingRecord, _>(
                &mut savings,
                SAVINGS_SOURCE,
                SAVING_HEADERS,
                SAVING_HEADER_ALIASES,
            )?;

        let summary = LoadSummary {
            devices_loaded: devices.len(),
            savings_loaded: savings.len(),
            rejected_rows: rejected_devices + rejected_savings,
        };
        *self.inner.write() = Snapshot { devices, savings };

        tracing::info!(
            devices = summary.devices_loaded,
            savings = summary.savings_loaded,
            rejected = summary.rejected_rows,
            "Device savings data loaded"
        );

        Ok(summary)
    }
}

fn read_source<Row, T, R>(
    client: &mut CsvDataReaderClient<R>,
    source_name: &'static str,
    required_headers: &[&str],
    aliases: &[(&str, &str)],
) -> Result<(Vec<T>, usize), LoadError>
where
    Row: DeserializeOwned,
    T: TryFrom<Row, Error = RowError>,
    R: Read,
{
    let outcome = client
        .read_records::<Row>(required_headers, aliases)
        .map_err(|error| LoadError::Source { source_name, error })?;

    for row in &outcome.rejected {
        tracing::warn!(
            source = source_name,
            line = row.line,
            reason = %row.reason,
            "Skipping malformed row"
        );
    }

    let mut rejected = outcome.rejected.len();
    let mut records = Vec::with_capacity(outcome.records.len());
    for row in outcome.records {
        match T::try_from(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                rejected += 1;
                tracing::warn!(
                    source = source_name,
                    error = %e,
                    "Skipping invalid row"
                );
            }
        }
    }

    Ok((records, rejected))
}
