use crate::{ByteRegion, LockError, LockMode, LockOp, RegionLocker};
use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;
use tracing::debug;

/// Region locks backed by Linux open-file-description locks
/// (`fcntl(2)` with `F_OFD_SETLKW`).
///
/// OFD locks belong to the open file rather than to the process: two handles
/// opened by different threads of one process contend exactly like two
/// processes, and closing one handle never drops locks held through another.
/// Classic process-associated `F_SETLKW` locks have neither property, which
/// is why this backend is Linux-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FcntlLocker;

impl FcntlLocker {
    pub fn new() -> Self {
        Self
    }
}

impl RegionLocker for FcntlLocker {
    fn lock_region(&self, file: &File, region: ByteRegion, op: LockOp) -> Result<(), LockError> {
        // SAFETY: `flock` is a plain C struct; all-zero is a valid value and
        // OFD locks require `l_pid == 0`.
        let mut fl: libc::flock = unsafe { std::mem::zeroed() };

        fl.l_type = match op {
            LockOp::Acquire(LockMode::Shared) => libc::F_RDLCK as _,
            LockOp::Acquire(LockMode::Exclusive) => libc::F_WRLCK as _,
            LockOp::Release => libc::F_UNLCK as _,
        };
        fl.l_whence = libc::SEEK_SET as _;
        // `ByteRegion` guarantees both fit in `off_t`.
        fl.l_start = region.offset() as libc::off_t;
        fl.l_len = region.length() as libc::off_t;

        let fd = file.as_raw_fd();

        loop {
            // SAFETY: `fd` is borrowed from a live `File` and `fl` outlives the call.
            let rc = unsafe { libc::fcntl(fd, libc::F_OFD_SETLKW, &fl as *const libc::flock) };

            if rc != -1 {
                debug!("fcntl {} on fd {} region {}", op, fd, region);
                return Ok(());
            }

            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }

            return Err(LockError::Os {
                op,
                region,
                source: err,
            });
        }
    }
}
