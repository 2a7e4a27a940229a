use crate::storage_engine::constants::*;
use std::path::{Path, PathBuf};

/// Where a [`RecordStore`](crate::RecordStore) keeps its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backing file. Relative paths resolve against the working directory
    /// at the time of each call.
    pub path: PathBuf,

    /// Permission bits for a backing file created by the write path
    /// (subject to the process umask).
    pub create_mode: u32,
}

impl StoreConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            create_mode: DEFAULT_CREATE_MODE,
        }
    }

    pub fn with_create_mode(mut self, mode: u32) -> Self {
        self.create_mode = mode;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_FILE)
    }
}
