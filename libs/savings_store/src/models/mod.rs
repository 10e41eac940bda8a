mod device;
mod saving_record;

pub use device::{Device, DeviceId};
pub use saving_record::SavingRecord;
