pub mod client;
pub mod error;
pub mod models;


pub use client::{CsvDataReaderClient, ReadOutcome, RejectedRow};
pub use error::{CsvDataReaderClientResult, CsvDataReaderError};
