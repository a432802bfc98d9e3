use std::io;
use std::path::{Path, PathBuf};

use journal_core::{IMAGES_DIR, MEDIA_DIR, VIDEOS_DIR};
use thiserror::Error;

use crate::persist::PersistError;

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("unsupported image: {0}")]
    Unsupported(String),
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),
    #[error("gif metadata error: {0}")]
    Gif(#[from] gif::DecodingError),
    #[error("source has no usable file name: {}", .0.display())]
    InvalidName(PathBuf),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Produces one output file for one referenced media file.
pub trait Materializer {
    /// Copy or convert `source` into `dest_dir` and return the link to the
    /// result, relative to the output root. Never overwrites an existing file.
    fn materialize(&self, source: &Path, dest_dir: &Path) -> Result<String, MaterializeError>;
}

/// Directory tree produced under the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn media_dir(&self) -> PathBuf {
        self.root.join(MEDIA_DIR)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.media_dir().join(IMAGES_DIR)
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.media_dir().join(VIDEOS_DIR)
    }
}

pub(crate) fn file_stem(source: &Path) -> Result<String, MaterializeError> {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| MaterializeError::InvalidName(source.to_path_buf()))
}

pub(crate) fn file_name(source: &Path) -> Result<String, MaterializeError> {
    source
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| MaterializeError::InvalidName(source.to_path_buf()))
}
