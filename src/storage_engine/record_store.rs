use crate::storage_engine::{AccessError, FixedRecord, Record, Slot, StoreConfig};
use slotfile_region_lock::{ByteRegion, FcntlLocker, LockMode, RegionLocker};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing::{debug, warn};

/// Indexed access to fixed-size records in a single flat file.
///
/// Record `i` lives at byte offset `i * R::SIZE`. The store keeps no open
/// handle and no cached data: every call opens the file, locks exactly the
/// record's byte range, transfers the record, releases the lock and closes
/// the file again.
///
/// ## Concurrency
/// - Reads take a **shared** lock, writes an **exclusive** lock, over the
///   identical byte range, so a reader never observes a half-written record.
/// - Writers of one index are serialized; records at different indices never
///   contend.
/// - Coordination happens entirely through the locker. With the default
///   [`FcntlLocker`] this extends to other processes using the same file.
/// - Acquisition blocks without a timeout.
#[derive(Debug)]
pub struct RecordStore<L = FcntlLocker, R = Record> {
    config: StoreConfig,
    locker: L,
    _record: PhantomData<fn() -> R>,
}

impl RecordStore {
    /// Creates a store of [`Record`]s guarded by `fcntl(2)` range locks.
    ///
    /// Nothing is opened until the first read or write.
    pub fn open(config: StoreConfig) -> Self {
        Self::with_locker(config, FcntlLocker::new())
    }
}

impl<L: RegionLocker, R: FixedRecord> RecordStore<L, R> {
    /// Creates a store of `R` records guarded by `locker`.
    ///
    /// A zero-sized record type is rejected at compile time:
    ///
    /// ```compile_fail
    /// use slotfile::region_lock::MemoryLockTable;
    /// use slotfile::{FixedRecord, RecordStore, StoreConfig};
    ///
    /// struct Empty;
    ///
    /// impl FixedRecord for Empty {
    ///     const SIZE: usize = 0;
    ///     fn encode_into(&self, _buf: &mut [u8]) {}
    ///     fn decode(_buf: &[u8]) -> Self {
    ///         Empty
    ///     }
    /// }
    ///
    /// let _store: RecordStore<MemoryLockTable, Empty> =
    ///     RecordStore::with_locker(StoreConfig::default(), MemoryLockTable::new());
    /// ```
    pub fn with_locker(config: StoreConfig, locker: L) -> Self {
        const { assert!(R::SIZE > 0, "FixedRecord::SIZE must be non-zero") };

        Self {
            config,
            locker,
            _record: PhantomData,
        }
    }

    #[inline]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    #[inline]
    pub fn locker(&self) -> &L {
        &self.locker
    }

    /// Byte range occupied by record `index`.
    ///
    /// # Errors
    /// - [`AccessError::IndexOutOfRange`] if the range does not fit in a file
    ///   offset.
    pub fn slot_region(&self, index: u64) -> Result<ByteRegion, AccessError> {
        let size = R::SIZE as u64;

        index
            .checked_mul(size)
            .and_then(|offset| ByteRegion::new(offset, size).ok())
            .ok_or(AccessError::IndexOutOfRange { index })
    }

    /// Reads record `index`.
    ///
    /// # Errors
    /// - [`AccessError::NotFound`] if the backing file does not exist. The file
    ///   is never created by a read.
    /// - [`AccessError::Absent`] if the slot lies beyond the end of the file.
    /// - [`AccessError::ShortRead`] if the slot is truncated by the end of the file.
    /// - [`AccessError::LockFailed`] if the shared lock cannot be taken or
    ///   released. A failed release is reported even though the record was read.
    /// - [`AccessError::SeekFailed`] / [`AccessError::Io`] on OS failures.
    pub fn read_record(&self, index: u64) -> Result<R, AccessError> {
        let region = self.slot_region(index)?;
        let file = self.open_for_read()?;

        // Declared after `file`, so on early return the lock is dropped
        // (released) before the handle is closed.
        let guard = self
            .locker
            .lock(&file, LockMode::Shared, region)
            .map_err(|source| AccessError::LockFailed { index, source })?;

        let mut buf = vec![0u8; R::SIZE];
        seek_to(&file, region)?;

        let read = read_full(&file, &mut buf).map_err(|source| {
            warn!("Read of record {} failed: {}", index, source);
            AccessError::Io { index, source }
        })?;

        if read == 0 {
            return Err(AccessError::Absent { index });
        }

        if read < R::SIZE {
            warn!(
                "Record {} in {} is truncated ({} of {} bytes)",
                index,
                self.config.path.display(),
                read,
                R::SIZE
            );
            return Err(AccessError::ShortRead {
                index,
                read,
                expected: R::SIZE,
            });
        }

        guard
            .release()
            .map_err(|source| AccessError::LockFailed { index, source })?;

        drop(file);

        debug!("Read record {} at {}", index, region);
        Ok(R::decode(&buf))
    }

    /// Reads record `index`, reporting a never-written slot as [`Slot::Absent`].
    ///
    /// A missing backing file and a slot beyond the end of the file are both
    /// absent. Truncated slots and every other failure are still errors.
    pub fn read_slot(&self, index: u64) -> Result<Slot<R>, AccessError> {
        match self.read_record(index) {
            Ok(record) => Ok(Slot::Present(record)),
            Err(err) if err.is_absent() => Ok(Slot::Absent),
            Err(err) => Err(err),
        }
    }

    /// Writes `record` at `index`, creating the backing file if necessary.
    ///
    /// The file is never truncated. Writing beyond the current end of the file
    /// leaves a zero-filled gap, which reads back as all-zero records.
    ///
    /// # Errors
    /// - [`AccessError::OpenFailed`] if the file cannot be opened or created.
    /// - [`AccessError::LockFailed`] if the exclusive lock cannot be taken or
    ///   released.
    /// - [`AccessError::ShortWrite`] if the OS stops accepting bytes before the
    ///   whole record is written. The slot may be partially updated.
    /// - [`AccessError::SeekFailed`] / [`AccessError::Io`] on OS failures.
    pub fn write_record(&self, index: u64, record: &R) -> Result<(), AccessError> {
        let region = self.slot_region(index)?;

        let mut buf = vec![0u8; R::SIZE];
        record.encode_into(&mut buf);

        let file = self.open_for_write()?;

        let guard = self
            .locker
            .lock(&file, LockMode::Exclusive, region)
            .map_err(|source| AccessError::LockFailed { index, source })?;

        seek_to(&file, region)?;

        let written = write_full(&file, &buf).map_err(|source| {
            warn!("Write of record {} failed: {}", index, source);
            AccessError::Io { index, source }
        })?;

        if written < R::SIZE {
            warn!(
                "Short write on record {} ({} of {} bytes)",
                index,
                written,
                R::SIZE
            );
            return Err(AccessError::ShortWrite {
                index,
                written,
                expected: R::SIZE,
            });
        }

        guard
            .release()
            .map_err(|source| AccessError::LockFailed { index, source })?;

        drop(file);

        debug!("Wrote record {} at {}", index, region);
        Ok(())
    }

    fn open_for_read(&self) -> Result<File, AccessError> {
        let path = &self.config.path;

        OpenOptions::new().read(true).open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                AccessError::NotFound { path: path.clone() }
            } else {
                AccessError::OpenFailed {
                    path: path.clone(),
                    source,
                }
            }
        })
    }

    fn open_for_write(&self) -> Result<File, AccessError> {
        let path = &self.config.path;

        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .mode(self.config.create_mode)
            .open(path)
            .map_err(|source| AccessError::OpenFailed {
                path: path.clone(),
                source,
            })
    }
}

fn seek_to(mut file: &File, region: ByteRegion) -> Result<(), AccessError> {
    let offset = region.offset();

    file.seek(SeekFrom::Start(offset))
        .map(|_| ())
        .map_err(|source| AccessError::SeekFailed { offset, source })
}

/// Reads until `buf` is full or the end of the file, returning the byte count.
fn read_full(mut file: &File, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }

    Ok(filled)
}

/// Writes until all of `buf` is written or the OS accepts no more bytes,
/// returning the byte count.
fn write_full(mut file: &File, buf: &[u8]) -> io::Result<usize> {
    let mut written = 0;

    while written < buf.len() {
        match file.write(&buf[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }

    Ok(written)
}
