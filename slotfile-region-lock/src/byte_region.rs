use crate::LockError;
use std::fmt;
use std::ops::Range;

/// Half-open byte range `[offset, offset + length)` of a file.
///
/// Construction guarantees a non-zero length (a zero `l_len` means "to end of
/// file" for `fcntl`) and an end that still fits in a signed `off_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRegion {
    offset: u64,
    length: u64,
}

impl ByteRegion {
    pub fn new(offset: u64, length: u64) -> Result<Self, LockError> {
        let fits = length > 0
            && offset
                .checked_add(length)
                .is_some_and(|end| end <= i64::MAX as u64);

        if !fits {
            return Err(LockError::InvalidRegion { offset, length });
        }

        Ok(Self { offset, length })
    }

    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[inline]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Exclusive end offset.
    #[inline]
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }

    #[inline]
    pub fn as_range(&self) -> Range<u64> {
        self.offset..self.end()
    }

    /// Returns `true` if the two regions share at least one byte.
    #[inline]
    pub fn overlaps(&self, other: &ByteRegion) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

impl fmt::Display for ByteRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.offset, self.end())
    }
}
