use std::path::PathBuf;

use chrono::NaiveDate;

/// Media subtree under the output root.
pub const MEDIA_DIR: &str = "Media";
pub const IMAGES_DIR: &str = "Images";
pub const VIDEOS_DIR: &str = "Videos";

/// One exported journal document and everything pulled out of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    pub source: PathBuf,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub paragraphs: Vec<String>,
    /// Absolute paths of referenced images, in document order.
    pub image_sources: Vec<PathBuf>,
    /// Absolute paths of referenced videos, in document order.
    pub video_sources: Vec<PathBuf>,
}

/// Link to a materialized image, relative to the output root.
pub fn image_link(filename: &str) -> String {
    format!("{MEDIA_DIR}/{IMAGES_DIR}/{filename}")
}

/// Link to a materialized video, relative to the output root.
pub fn video_link(filename: &str) -> String {
    format!("{MEDIA_DIR}/{VIDEOS_DIR}/{filename}")
}
