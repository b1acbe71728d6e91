use std::path::{Path, PathBuf};

use crate::AUDIT_FILE;

/// Where a run keeps its state and whether it continues a previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Load the persisted profile instead of starting from an empty one.
    pub resume: bool,
}

impl Config {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    pub fn audit_path(&self) -> PathBuf {
        self.data_dir.join(AUDIT_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            resume: false,
        }
    }
}
