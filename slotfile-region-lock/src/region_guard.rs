use crate::{ByteRegion, LockError, LockMode, RegionLocker};
use std::fs::File;
use tracing::{debug, warn};

/// A held region lock.
///
/// Call [`RegionGuard::release`] to observe release failures. A guard that is
/// dropped without being released (e.g. on an early `?` return) still
/// releases its region; a failure at that point can only be logged.
#[must_use = "dropping the guard immediately releases the region"]
pub struct RegionGuard<'a, L: RegionLocker> {
    locker: &'a L,
    file: &'a File,
    mode: LockMode,
    region: ByteRegion,
    released: bool,
}

impl<'a, L: RegionLocker> RegionGuard<'a, L> {
    pub(crate) fn new(locker: &'a L, file: &'a File, mode: LockMode, region: ByteRegion) -> Self {
        Self {
            locker,
            file,
            mode,
            region,
            released: false,
        }
    }

    #[inline]
    pub fn mode(&self) -> LockMode {
        self.mode
    }

    #[inline]
    pub fn region(&self) -> ByteRegion {
        self.region
    }

    /// Releases the region, reporting any failure of the locking primitive.
    pub fn release(mut self) -> Result<(), LockError> {
        // Marked before the call: a failed release is not retried on drop.
        self.released = true;
        self.locker.release(self.file, self.region)?;
        debug!("Released {:?} lock on {}", self.mode, self.region);
        Ok(())
    }
}

impl<L: RegionLocker> Drop for RegionGuard<'_, L> {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        if let Err(err) = self.locker.release(self.file, self.region) {
            warn!(
                "Failed to release {:?} lock on {} during cleanup: {}",
                self.mode, self.region, err
            );
        }
    }
}
