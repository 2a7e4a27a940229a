use crate::{ByteRegion, LockOp};
use thiserror::Error;

/// Failure of a region lock operation.
///
/// The underlying OS error is kept as the error source for diagnostics;
/// callers are not expected to branch on it.
#[derive(Debug, Error)]
pub enum LockError {
    /// The region is empty or extends past the largest representable offset.
    #[error("invalid lock region: offset {offset}, length {length}")]
    InvalidRegion { offset: u64, length: u64 },

    /// The locking primitive reported an error.
    #[error("failed to {op} region {region}")]
    Os {
        op: LockOp,
        region: ByteRegion,
        #[source]
        source: std::io::Error,
    },
}
