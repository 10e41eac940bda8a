//! # Savings store
//!
//! Device and savings records held in process memory, plus the read-side
//! pipeline the API is built on: date range filtering, interval bucketing
//! and monthly averages.
pub mod aggregate;
pub mod date_range;
pub mod error;
pub mod models;
pub mod monthly;
pub mod store;
pub mod timestamp;

pub use aggregate::{AggregatedBucket, Interval, aggregate_by_interval};
pub use date_range::{DateRangeFilter, resolve_timezone};
pub use error::{LoadError, RowError, ValidationError};
pub use models::{Device, DeviceId, SavingRecord};
pub use monthly::{MonthlyAverage, monthly_average};
pub use store::{DataSources, DataStore, LoadSummary};
