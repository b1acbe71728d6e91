use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{ProfileError, Result};

const LOG_PREFIX: &str = "[file-storage]";

/// Line-oriented storage file: one record per line.
pub struct FileStorage {
    log_prefix: String,
    label: String,
    path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with a diagnostic label and file path
    pub fn new(label: String, path: &Path) -> Self {
        Self {
            log_prefix: format!("{} {}", LOG_PREFIX, label),
            label,
            path: PathBuf::from(path),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all lines of the file as they are.
    ///
    /// A missing file reads as empty.
    pub fn read_lines(&self) -> Result<Vec<String>> {
        if !self.exists() {
            log::warn!(
                "{} {} not found, starting empty",
                self.log_prefix,
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        log::debug!("{} {} lines read", self.log_prefix, lines.len());
        Ok(lines)
    }

    /// Read records, one per non-empty line.
    pub fn read_from_disk<R>(&self) -> Result<Vec<R>>
    where
        R: FromStr,
        ProfileError: From<<R as FromStr>::Err>,
    {
        let mut records = Vec::new();
        for (number, line) in self.read_lines()?.into_iter().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record = R::from_str(line).map_err(|err| {
                ProfileError::Storage(
                    self.label.clone(),
                    format!("line {}: {}", number + 1, ProfileError::from(err)),
                )
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Replace the file contents with `records`, one per line.
    pub fn write_to_disk<R, I>(&self, records: I) -> Result<usize>
    where
        R: Display,
        I: IntoIterator<Item = R>,
    {
        let parent_dir = self.path.parent().ok_or_else(|| {
            ProfileError::Storage(
                self.label.clone(),
                "Failed to get parent directory".to_owned(),
            )
        })?;
        fs::create_dir_all(parent_dir)?;
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        let mut written = 0;
        for record in records {
            writeln!(writer, "{}", record)?;
            written += 1;
        }
        writer.flush()?;

        log::info!("{} {} entries have been written", self.log_prefix, written);
        Ok(written)
    }

    /// Remove the file from disk
    pub fn erase(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(|err| {
            ProfileError::Storage(self.label.clone(), err.to_string())
        })
    }
}
