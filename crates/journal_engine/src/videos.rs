use std::path::Path;

use journal_core::video_link;
use journal_logging::journal_debug;

use crate::media::{file_name, MaterializeError, Materializer};
use crate::persist::{ensure_dir, AtomicFileWriter, WriteOutcome};

/// Copies videos byte for byte; they are never transcoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct VideoMaterializer;

impl Materializer for VideoMaterializer {
    fn materialize(&self, source: &Path, dest_dir: &Path) -> Result<String, MaterializeError> {
        ensure_dir(dest_dir)?;
        let filename = file_name(source)?;

        let writer = AtomicFileWriter::new(dest_dir.to_path_buf());
        match writer.copy_once(source, &filename)? {
            WriteOutcome::Written => journal_debug!("Copied video {:?}", source),
            WriteOutcome::AlreadyPresent => {
                journal_debug!("Video {} already present, skipping", filename)
            }
        }
        Ok(video_link(&filename))
    }
}
