pub mod constants;
pub use constants::*;

mod access_error;
pub use access_error::AccessError;

mod fixed_record;
pub use fixed_record::FixedRecord;

mod record;
pub use record::{Record, RecordSizeError};

mod record_store;
pub use record_store::RecordStore;

mod slot;
pub use slot::Slot;

mod store_config;
pub use store_config::StoreConfig;
