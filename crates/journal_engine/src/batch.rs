use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use journal_core::{assemble_markdown, output_filename};
use journal_logging::{journal_debug, journal_info, journal_warn};
use thiserror::Error;

use crate::decode::{decode_html, DecodeError};
use crate::extract::{Extractor, JournalHtmlExtractor};
use crate::images::ImageMaterializer;
use crate::media::{Materializer, OutputLayout};
use crate::persist::{ensure_dir, ensure_output_dir, AtomicFileWriter, PersistError};
use crate::videos::VideoMaterializer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Failures that stop the whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("input directory '{}' does not exist or is not a directory", .0.display())]
    InputDir(PathBuf),
    #[error("cannot list input directory '{}': {source}", .path.display())]
    ListInput { path: PathBuf, source: io::Error },
    #[error("cannot prepare output directory: {0}")]
    OutputDir(#[from] PersistError),
}

/// Failures that skip one entry.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("cannot read entry: {0}")]
    Read(#[from] io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("cannot write markdown: {0}")]
    Write(#[from] PersistError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub entries_written: usize,
    pub entries_failed: usize,
    pub images_written: usize,
    pub images_failed: usize,
    pub videos_written: usize,
    pub videos_failed: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries written, {} failed; {} images ({} failed); {} videos ({} failed)",
            self.entries_written,
            self.entries_failed,
            self.images_written,
            self.images_failed,
            self.videos_written,
            self.videos_failed
        )
    }
}

/// The collaborators a batch runs an entry through.
pub struct Pipeline<'a> {
    pub extractor: &'a dyn Extractor,
    pub images: &'a dyn Materializer,
    pub videos: &'a dyn Materializer,
}

impl Pipeline<'static> {
    pub fn standard() -> Self {
        Self {
            extractor: &JournalHtmlExtractor,
            images: &ImageMaterializer,
            videos: &VideoMaterializer,
        }
    }
}

/// Convert every file directly inside `config.input_dir`.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary, BatchError> {
    run_batch_with(config, &Pipeline::standard())
}

pub fn run_batch_with(
    config: &BatchConfig,
    pipeline: &Pipeline<'_>,
) -> Result<BatchSummary, BatchError> {
    if !config.input_dir.is_dir() {
        return Err(BatchError::InputDir(config.input_dir.clone()));
    }
    let layout = OutputLayout::new(&config.output_dir);
    ensure_output_dir(layout.root())?;
    ensure_dir(&layout.media_dir())?;

    let listing = fs::read_dir(&config.input_dir).map_err(|source| BatchError::ListInput {
        path: config.input_dir.clone(),
        source,
    })?;

    let mut summary = BatchSummary::default();
    for dir_entry in listing {
        let path = match dir_entry {
            Ok(dir_entry) => dir_entry.path(),
            Err(err) => {
                journal_warn!("Skipping unreadable directory entry: {}", err);
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        match process_entry(&path, &config.input_dir, &layout, pipeline, &mut summary) {
            Ok(written) => {
                summary.entries_written += 1;
                journal_debug!("Wrote {:?}", written);
            }
            Err(err) => {
                summary.entries_failed += 1;
                journal_warn!("Failed to process entry '{}': {}", path.display(), err);
            }
        }
    }

    journal_info!("Done. {}", summary);
    Ok(summary)
}

fn process_entry(
    path: &Path,
    input_root: &Path,
    layout: &OutputLayout,
    pipeline: &Pipeline<'_>,
    summary: &mut BatchSummary,
) -> Result<PathBuf, EntryError> {
    let bytes = fs::read(path)?;
    let decoded = decode_html(&bytes)?;
    let entry = pipeline.extractor.extract(&decoded.html, path, input_root);

    let images_dir = layout.images_dir();
    let mut images = Vec::with_capacity(entry.image_sources.len());
    for source in &entry.image_sources {
        match pipeline.images.materialize(source, &images_dir) {
            Ok(link) => {
                summary.images_written += 1;
                images.push(link);
            }
            Err(err) => {
                summary.images_failed += 1;
                journal_warn!("Failed to process image '{}': {}", source.display(), err);
            }
        }
    }

    let videos_dir = layout.videos_dir();
    let mut videos = Vec::with_capacity(entry.video_sources.len());
    for source in &entry.video_sources {
        match pipeline.videos.materialize(source, &videos_dir) {
            Ok(link) => {
                summary.videos_written += 1;
                videos.push(link);
            }
            Err(err) => {
                summary.videos_failed += 1;
                journal_warn!("Failed to copy video '{}': {}", source.display(), err);
            }
        }
    }

    let markdown = assemble_markdown(entry.title.as_deref(), &images, &videos, &entry.paragraphs);
    let filename = output_filename(entry.date, path);
    let writer = AtomicFileWriter::new(layout.root().to_path_buf());
    Ok(writer.write(&filename, markdown.as_bytes())?)
}
