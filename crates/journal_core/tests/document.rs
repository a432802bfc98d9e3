use std::path::Path;
use std::sync::Once;

use chrono::NaiveDate;
use journal_core::{
    assemble_markdown, image_link, output_filename, parse_free_text_date, video_link,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(journal_logging::initialize_for_tests);
}

#[test]
fn title_and_paragraph_render_as_two_blocks() {
    init_logging();
    let doc = assemble_markdown(Some("T"), &[], &[], &["Hello world".to_string()]);
    assert_eq!(doc, "# T\n\nHello world\n");
}

#[test]
fn empty_entry_renders_as_empty_text() {
    let doc = assemble_markdown(None, &[], &[], &[]);
    assert!(doc.is_empty());
}

#[test]
fn blocks_follow_fixed_order() {
    let images = vec![image_link("a.jpeg"), image_link("b.png")];
    let videos = vec![video_link("c.mov")];
    let paragraphs = vec!["First".to_string(), "Second".to_string()];

    let doc = assemble_markdown(Some("Trip"), &images, &videos, &paragraphs);

    assert_eq!(
        doc,
        "# Trip\n\n\
         ![Image](Media/Images/a.jpeg)\n\n\
         ![Image](Media/Images/b.png)\n\n\
         ![Video](Media/Videos/c.mov)\n\n\
         First\n\n\
         Second\n"
    );
}

#[test]
fn media_only_entry_has_no_heading() {
    let doc = assemble_markdown(None, &[], &[video_link("clip.mp4")], &[]);
    assert_eq!(doc, "![Video](Media/Videos/clip.mp4)\n");
}

#[test]
fn dated_entry_is_named_after_its_date() {
    let date = parse_free_text_date("January 5, 2024");
    assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5));
    assert_eq!(
        output_filename(date, Path::new("/in/entry-1.html")),
        "2024-01-05.md"
    );
}

#[test]
fn undated_entry_keeps_source_stem() {
    assert_eq!(
        output_filename(None, Path::new("/in/2023-12-31_Evening.html")),
        "2023-12-31_Evening.md"
    );
}
