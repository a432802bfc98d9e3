use std::path::Path;

use chrono::NaiveDate;

/// Render an entry as Markdown.
///
/// Order is fixed: title heading, image embeds, video embeds, paragraphs.
/// Blocks are separated by one blank line and the text ends with a single
/// newline, unless there are no blocks at all, in which case it is empty.
pub fn assemble_markdown(
    title: Option<&str>,
    images: &[String],
    videos: &[String],
    paragraphs: &[String],
) -> String {
    let mut blocks: Vec<String> =
        Vec::with_capacity(1 + images.len() + videos.len() + paragraphs.len());
    if let Some(title) = title {
        blocks.push(format!("# {title}"));
    }
    blocks.extend(images.iter().map(|path| format!("![Image]({path})")));
    // Markdown has no video embed; reuse the image syntax.
    blocks.extend(videos.iter().map(|path| format!("![Video]({path})")));
    blocks.extend(paragraphs.iter().cloned());

    if blocks.is_empty() {
        return String::new();
    }
    let mut doc = blocks.join("\n\n");
    doc.push('\n');
    doc
}

/// `YYYY-MM-DD.md` when the entry is dated, otherwise `<source stem>.md`.
pub fn output_filename(date: Option<NaiveDate>, source: &Path) -> String {
    match date {
        Some(date) => format!("{}.md", date.format("%Y-%m-%d")),
        None => {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "untitled".to_string());
            format!("{stem}.md")
        }
    }
}
