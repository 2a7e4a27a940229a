use std::ops::Range;

// Record layout (fixed 40 bytes, packed, no padding)
pub const KEY_SIZE: usize = 8;
pub const VALUE_SIZE: usize = 32;
pub const RECORD_SIZE: usize = KEY_SIZE + VALUE_SIZE;

pub const KEY_RANGE: Range<usize> = 0..KEY_SIZE;
pub const VALUE_RANGE: Range<usize> = KEY_SIZE..RECORD_SIZE;

/// Backing file used when no path is configured (relative to the working directory).
pub const DEFAULT_STORAGE_FILE: &str = "config.bin";

/// Permission bits applied when the write path creates the backing file.
pub const DEFAULT_CREATE_MODE: u32 = 0o644;
