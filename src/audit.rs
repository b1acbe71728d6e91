use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Result;

/// Receives one outcome line per processed command, in command order.
pub trait AuditSink {
    fn record(&mut self, line: &str) -> Result<()>;
}

/// Append-only audit trail on disk.
pub struct FileAudit {
    path: PathBuf,
}

impl FileAudit {
    pub fn new(path: &Path) -> Self {
        Self {
            path: PathBuf::from(path),
        }
    }
}

impl AuditSink for FileAudit {
    fn record(&mut self, line: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

/// Keeps the trail in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryAudit {
    lines: Vec<String>,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl AuditSink for MemoryAudit {
    fn record(&mut self, line: &str) -> Result<()> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}
