use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Result of a write-once publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// A file with that name was already there and was left untouched.
    AlreadyPresent,
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    ensure_dir(dir)?;
    // Writability check: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Idempotent `mkdir -p` that rejects a non-directory in the way.
pub fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes files into one directory through a temp file and a rename, so a
/// reader never observes a half-written target.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `content` to `{dir}/{filename}`, replacing any existing file.
    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let tmp = self.stage(|file| file.write_all(content))?;

        // rename(2) swaps the target in place; readers never see it missing.
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }

    /// Write `content` to `{dir}/{filename}` unless that file already exists.
    pub fn write_once(&self, filename: &str, content: &[u8]) -> Result<WriteOutcome, PersistError> {
        self.publish_once(filename, |file| file.write_all(content))
    }

    /// Stream `source` into `{dir}/{filename}` unless that file already exists.
    pub fn copy_once(&self, source: &Path, filename: &str) -> Result<WriteOutcome, PersistError> {
        if self.dir.join(filename).exists() {
            return Ok(WriteOutcome::AlreadyPresent);
        }
        let mut input = File::open(source)?;
        self.publish_once(filename, |file| io::copy(&mut input, file).map(|_| ()))
    }

    fn publish_once<F>(&self, filename: &str, fill: F) -> Result<WriteOutcome, PersistError>
    where
        F: FnOnce(&mut File) -> io::Result<()>,
    {
        ensure_dir(&self.dir)?;

        let target = self.dir.join(filename);
        if target.exists() {
            return Ok(WriteOutcome::AlreadyPresent);
        }
        let tmp = self.stage(fill)?;
        match tmp.persist_noclobber(&target) {
            Ok(_) => Ok(WriteOutcome::Written),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                Ok(WriteOutcome::AlreadyPresent)
            }
            Err(e) => Err(PersistError::Io(e.error)),
        }
    }

    fn stage<F>(&self, fill: F) -> Result<NamedTempFile, PersistError>
    where
        F: FnOnce(&mut File) -> io::Result<()>,
    {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        fill(tmp.as_file_mut())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        Ok(tmp)
    }
}
