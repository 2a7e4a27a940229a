use crate::{ByteRegion, LockError, LockMode, LockOp, RegionGuard};
use std::fs::File;
use std::sync::Arc;

/// Advisory byte-range locking over an open file.
///
/// Implementors apply a single [`LockOp`] to `region` of `file`. Acquiring
/// blocks the calling thread until the region is available under the
/// requested mode; there is no timeout and no deadlock detection. Regions
/// outside the requested range are never affected.
///
/// The lock is owned by the open file handle that acquired it, so the same
/// `file` must be passed to the matching release.
pub trait RegionLocker: Send + Sync {
    /// Acquires (blocking) or releases a lock on `region` of `file`.
    fn lock_region(&self, file: &File, region: ByteRegion, op: LockOp) -> Result<(), LockError>;

    #[inline]
    fn acquire(&self, file: &File, mode: LockMode, region: ByteRegion) -> Result<(), LockError> {
        self.lock_region(file, region, LockOp::Acquire(mode))
    }

    #[inline]
    fn release(&self, file: &File, region: ByteRegion) -> Result<(), LockError> {
        self.lock_region(file, region, LockOp::Release)
    }

    /// Acquires `region` and returns a guard that releases it.
    ///
    /// The guard borrows `file`, which keeps the handle open (and in place)
    /// until the region has been released.
    fn lock<'a>(
        &'a self,
        file: &'a File,
        mode: LockMode,
        region: ByteRegion,
    ) -> Result<RegionGuard<'a, Self>, LockError>
    where
        Self: Sized,
    {
        self.acquire(file, mode, region)?;
        Ok(RegionGuard::new(self, file, mode, region))
    }
}

impl<L: RegionLocker + ?Sized> RegionLocker for Arc<L> {
    #[inline]
    fn lock_region(&self, file: &File, region: ByteRegion, op: LockOp) -> Result<(), LockError> {
        (**self).lock_region(file, region, op)
    }
}

impl<L: RegionLocker + ?Sized> RegionLocker for &L {
    #[inline]
    fn lock_region(&self, file: &File, region: ByteRegion, op: LockOp) -> Result<(), LockError> {
        (**self).lock_region(file, region, op)
    }
}
