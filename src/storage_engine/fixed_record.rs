/// A record type with a fixed on-disk size.
///
/// Record `i` of a store occupies bytes `[i * SIZE, (i + 1) * SIZE)`. The size
/// is part of the file's implicit format and must never change for an
/// existing file; nothing on disk records it.
pub trait FixedRecord: Sized {
    /// Encoded size in bytes. Must be non-zero; a store of a zero-sized
    /// record fails to compile.
    const SIZE: usize;

    /// Writes exactly `Self::SIZE` bytes into `buf`.
    ///
    /// `buf.len()` is always `Self::SIZE`.
    fn encode_into(&self, buf: &mut [u8]);

    /// Rebuilds a record from exactly `Self::SIZE` bytes.
    fn decode(buf: &[u8]) -> Self;
}
