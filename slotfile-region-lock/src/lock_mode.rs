use std::fmt;

/// Compatibility class of a region lock.
///
/// Any number of `Shared` holders may overlap. An `Exclusive` holder
/// excludes every other holder of an overlapping range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockMode {
    /// Read lock (`F_RDLCK`).
    Shared,
    /// Write lock (`F_WRLCK`).
    Exclusive,
}

impl LockMode {
    /// Returns `true` if a holder in `self` mode may coexist with one in `other`.
    #[inline]
    pub fn is_compatible_with(self, other: LockMode) -> bool {
        matches!((self, other), (LockMode::Shared, LockMode::Shared))
    }
}

/// A single lock-table operation.
///
/// Releasing never takes a mode: an unlock clears whatever the caller holds
/// over the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockOp {
    Acquire(LockMode),
    Release,
}

impl fmt::Display for LockOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockOp::Acquire(LockMode::Shared) => f.write_str("acquire shared"),
            LockOp::Acquire(LockMode::Exclusive) => f.write_str("acquire exclusive"),
            LockOp::Release => f.write_str("release"),
        }
    }
}
