use crate::{ByteRegion, LockError, LockMode, LockOp, RegionLocker};
use std::fs::File;
use std::io;
use std::os::fd::{AsRawFd, RawFd};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Identity of the open handle that owns a simulated lock.
///
/// The raw descriptor follows the open file rather than the `File` value, so
/// moving the handle between acquire and release keeps the same owner. A
/// descriptor number is not reused while its `File` is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(RawFd);

impl HandleId {
    #[inline]
    pub fn of(file: &File) -> Self {
        Self(file.as_raw_fd())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldRegion {
    pub owner: HandleId,
    pub mode: LockMode,
    pub region: ByteRegion,
}

/// Entry in the table's operation log, in the order the operations completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockEvent {
    Acquired {
        owner: HandleId,
        mode: LockMode,
        region: ByteRegion,
    },
    Released {
        owner: HandleId,
        region: ByteRegion,
    },
    Failed {
        owner: HandleId,
        op: LockOp,
        region: ByteRegion,
    },
}

#[derive(Debug, Default)]
struct TableState {
    held: Vec<HeldRegion>,
    events: Vec<LockEvent>,
    fail_next_acquire: bool,
    fail_next_release: bool,
}

impl TableState {
    fn conflicts(&self, owner: HandleId, mode: LockMode, region: &ByteRegion) -> bool {
        self.held.iter().any(|held| {
            held.owner != owner
                && held.region.overlaps(region)
                && !held.mode.is_compatible_with(mode)
        })
    }

    fn drop_owned(&mut self, owner: HandleId, region: &ByteRegion) {
        self.held
            .retain(|held| held.owner != owner || !held.region.overlaps(region));
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: Mutex<TableState>,
    changed: Condvar,
}

/// In-process simulation of advisory range locks.
///
/// Follows the same rules as the OS primitive: shared holders coexist,
/// exclusive holders exclude every other owner of an overlapping range, and
/// acquisition blocks until the range is free. Re-locking a range through the
/// same handle replaces the previous lock. Clones share one table.
///
/// The table also keeps an ordered event log and can inject failures, which
/// makes cleanup paths observable in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLockTable {
    inner: Arc<Inner>,
}

impl MemoryLockTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, TableState> {
        // A panicking test thread must not wedge every other lock holder.
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes the next acquisition fail without taking the lock.
    pub fn fail_next_acquire(&self) {
        self.state().fail_next_acquire = true;
    }

    /// Makes the next release fail. The region is still removed from the
    /// table, matching a descriptor whose locks vanish when it is closed.
    pub fn fail_next_release(&self) {
        self.state().fail_next_release = true;
    }

    /// Snapshot of the currently held regions.
    pub fn held(&self) -> Vec<HeldRegion> {
        self.state().held.clone()
    }

    /// Snapshot of the operation log.
    pub fn events(&self) -> Vec<LockEvent> {
        self.state().events.clone()
    }

    pub fn clear_events(&self) {
        self.state().events.clear();
    }

    fn acquire_region(
        &self,
        owner: HandleId,
        mode: LockMode,
        region: ByteRegion,
    ) -> Result<(), LockError> {
        let mut state = self.state();

        if std::mem::take(&mut state.fail_next_acquire) {
            let op = LockOp::Acquire(mode);
            state.events.push(LockEvent::Failed { owner, op, region });
            return Err(injected(op, region));
        }

        while state.conflicts(owner, mode, &region) {
            state = self
                .inner
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        state.drop_owned(owner, &region);
        state.held.push(HeldRegion {
            owner,
            mode,
            region,
        });
        state.events.push(LockEvent::Acquired {
            owner,
            mode,
            region,
        });

        debug!("Simulated {:?} lock on {} for {:?}", mode, region, owner);
        Ok(())
    }

    fn release_region(&self, owner: HandleId, region: ByteRegion) -> Result<(), LockError> {
        let mut state = self.state();
        let fail = std::mem::take(&mut state.fail_next_release);

        state.drop_owned(owner, &region);
        self.inner.changed.notify_all();

        if fail {
            let op = LockOp::Release;
            state.events.push(LockEvent::Failed { owner, op, region });
            return Err(injected(op, region));
        }

        state.events.push(LockEvent::Released { owner, region });
        Ok(())
    }
}

fn injected(op: LockOp, region: ByteRegion) -> LockError {
    LockError::Os {
        op,
        region,
        source: io::Error::other("injected lock table failure"),
    }
}

impl RegionLocker for MemoryLockTable {
    fn lock_region(&self, file: &File, region: ByteRegion, op: LockOp) -> Result<(), LockError> {
        let owner = HandleId::of(file);
        match op {
            LockOp::Acquire(mode) => self.acquire_region(owner, mode, region),
            LockOp::Release => self.release_region(owner, region),
        }
    }
}
