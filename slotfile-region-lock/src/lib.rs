pub mod byte_region;
pub use byte_region::*;

pub mod lock_error;
pub use lock_error::*;

pub mod lock_mode;
pub use lock_mode::*;

pub mod region_locker;
pub use region_locker::*;

pub mod region_guard;
pub use region_guard::*;

#[cfg(target_os = "linux")]
pub mod fcntl_locker;
#[cfg(target_os = "linux")]
pub use fcntl_locker::*;

#[cfg(unix)]
pub mod memory_lock_table;
#[cfg(unix)]
pub use memory_lock_table::*;
