//! Journal engine: turns an export directory into Markdown plus a media tree.
mod batch;
mod decode;
mod extract;
mod heif;
mod images;
mod media;
mod persist;
mod videos;

pub use batch::{
    run_batch, run_batch_with, BatchConfig, BatchError, BatchSummary, EntryError, Pipeline,
};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use extract::{
    find_within, resolve_reference, spaced_text_of, text_of, ElementLookup, Extractor, JournalHtmlExtractor,
};
pub use heif::is_heif;
pub use images::{
    decode_image, encode, gif_declares_transparency, image_traits, DecodedImage, ImageMaterializer,
};
pub use media::{MaterializeError, Materializer, OutputLayout};
pub use persist::{ensure_dir, ensure_output_dir, AtomicFileWriter, PersistError, WriteOutcome};
pub use videos::VideoMaterializer;
