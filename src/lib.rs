//! # slotfile
//!
//! Fixed-size binary records in a single flat file, addressed by index.
//!
//! Record `i` occupies bytes `[i * SIZE, (i + 1) * SIZE)`, so every access is a
//! single seek with no index structure. Each read or write opens the file,
//! takes an advisory lock over exactly the record's byte range (shared for
//! reads, exclusive for writes), transfers the whole record, then releases the
//! lock and closes the file on every path, errors included.
//!
//! ```no_run
//! use slotfile::{Record, RecordStore, StoreConfig};
//!
//! let store = RecordStore::open(StoreConfig::new("config.bin"));
//! store.write_record(3, &Record::from_strs("alpha", "hello"))?;
//!
//! let record = store.read_record(3)?;
//! assert_eq!(record.to_string(), "key=alpha, value=hello");
//! # Ok::<(), slotfile::AccessError>(())
//! ```

// Thread-level exclusion needs open-file-description locks; process-owned
// POSIX locks neither exclude sibling threads nor survive a sibling's close.
#[cfg(not(target_os = "linux"))]
compile_error!("slotfile requires Linux open-file-description locks (F_OFD_SETLKW)");

pub mod storage_engine;
pub use storage_engine::*;

pub mod cli;

/// Region locking primitives, re-exported for custom lockers and tests.
pub use slotfile_region_lock as region_lock;
