//! Journal core: pure classification and rendering helpers. No I/O.
mod classify;
mod date;
mod document;
mod entry;
mod text;

pub use classify::{
    classify, Classification, ColorMode, ImageTraits, SourceEncoding, TargetEncoding, TargetMode,
};
pub use date::parse_free_text_date;
pub use document::{assemble_markdown, output_filename};
pub use entry::{image_link, video_link, Entry, IMAGES_DIR, MEDIA_DIR, VIDEOS_DIR};
pub use text::{join_nonempty, normalize_whitespace};
