use crate::storage_engine::FixedRecord;
use crate::storage_engine::constants::*;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// A byte slice that is not exactly one record long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} record bytes, got {actual}")]
pub struct RecordSizeError {
    pub expected: usize,
    pub actual: usize,
}

/// Fixed-size key/value record.
///
/// ## Record Layout
///
/// Each record is exactly [`RECORD_SIZE`] bytes with no padding:
///
/// - **Offset `0` → `8`**: **Key** (NUL-padded, at most 7 significant bytes)
/// - **Offset `8` → `40`**: **Value** (NUL-padded, at most 31 significant bytes)
///
/// The last byte of each field is reserved for a terminator when the record is
/// built through [`Record::new`], so inputs longer than 7 / 31 bytes are
/// truncated. Records decoded from disk are taken as-is.
#[repr(C)]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub key: [u8; KEY_SIZE],
    pub value: [u8; VALUE_SIZE],
}

impl Record {
    /// Builds a record, truncating `key` to 7 bytes and `value` to 31 bytes.
    pub fn new(key: &[u8], value: &[u8]) -> Self {
        Self {
            key: terminated(key),
            value: terminated(value),
        }
    }

    pub fn from_strs(key: &str, value: &str) -> Self {
        Self::new(key.as_bytes(), value.as_bytes())
    }

    /// Key bytes up to (not including) the first NUL.
    #[inline]
    pub fn key_bytes(&self) -> &[u8] {
        until_nul(&self.key)
    }

    /// Value bytes up to (not including) the first NUL.
    #[inline]
    pub fn value_bytes(&self) -> &[u8] {
        until_nul(&self.value)
    }

    pub fn key_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.key_bytes())
    }

    pub fn value_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.value_bytes())
    }

    /// Serializes the record into its on-disk form.
    #[inline]
    pub fn serialize(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];

        buf[KEY_RANGE].copy_from_slice(&self.key);
        buf[VALUE_RANGE].copy_from_slice(&self.value);

        buf
    }

    /// Deserializes a record from its on-disk form.
    ///
    /// # Panics
    /// - If `data` is shorter than [`RECORD_SIZE`]. Use `Record::try_from`
    ///   for unvalidated input.
    #[inline]
    pub fn deserialize(data: &[u8]) -> Self {
        let mut key = [0u8; KEY_SIZE];
        let mut value = [0u8; VALUE_SIZE];

        key.copy_from_slice(&data[KEY_RANGE]);
        value.copy_from_slice(&data[VALUE_RANGE]);

        Self { key, value }
    }
}

impl TryFrom<&[u8]> for Record {
    type Error = RecordSizeError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        if data.len() != RECORD_SIZE {
            return Err(RecordSizeError {
                expected: RECORD_SIZE,
                actual: data.len(),
            });
        }

        Ok(Self::deserialize(data))
    }
}

impl FixedRecord for Record {
    const SIZE: usize = RECORD_SIZE;

    fn encode_into(&self, buf: &mut [u8]) {
        buf.copy_from_slice(&self.serialize());
    }

    fn decode(buf: &[u8]) -> Self {
        Self::deserialize(buf)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key={}, value={}", self.key_lossy(), self.value_lossy())
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("key", &self.key_lossy())
            .field("value", &self.value_lossy())
            .finish()
    }
}

/// Copies at most `N - 1` bytes, leaving the rest (terminator included) zero.
fn terminated<const N: usize>(src: &[u8]) -> [u8; N] {
    let mut field = [0u8; N];
    let len = src.len().min(N - 1);
    field[..len].copy_from_slice(&src[..len]);
    field
}

fn until_nul(field: &[u8]) -> &[u8] {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    &field[..end]
}
