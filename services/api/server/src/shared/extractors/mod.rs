pub mod device_id;
pub mod query;
pub mod request_id;
