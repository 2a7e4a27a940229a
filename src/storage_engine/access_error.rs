use slotfile_region_lock::LockError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`RecordStore`](crate::RecordStore) operations.
///
/// Every error is raised at the failing call, after any lock already taken has
/// been released and the file handle has been closed.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The backing file does not exist. A record must be written first.
    #[error("storage file '{}' does not exist; write a record first", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to open storage file '{}'", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The index does not map to a lockable file offset.
    #[error("record index {index} is out of range")]
    IndexOutOfRange { index: u64 },

    #[error("failed to lock or unlock record {index}")]
    LockFailed {
        index: u64,
        #[source]
        source: LockError,
    },

    #[error("failed to seek to offset {offset}")]
    SeekFailed {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on record {index}")]
    Io {
        index: u64,
        #[source]
        source: io::Error,
    },

    /// The slot lies entirely beyond the end of the file (never written).
    #[error("record {index} does not exist")]
    Absent { index: u64 },

    /// The slot is cut short by the end of the file.
    #[error("read size mismatch on record {index}: got {read} of {expected} bytes")]
    ShortRead {
        index: u64,
        read: usize,
        expected: usize,
    },

    #[error("write size mismatch on record {index}: wrote {written} of {expected} bytes")]
    ShortWrite {
        index: u64,
        written: usize,
        expected: usize,
    },
}

impl AccessError {
    /// Returns `true` if the record was simply never written.
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, AccessError::NotFound { .. } | AccessError::Absent { .. })
    }
}
