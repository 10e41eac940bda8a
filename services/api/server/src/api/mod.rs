pub mod api_error;
pub mod error_recorder;
pub mod v1;
