use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use journal_engine::{run_batch, BatchConfig, BatchError, BatchSummary};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(journal_logging::initialize_for_tests);
}

struct Export {
    _temp: TempDir,
    entries: PathBuf,
    resources: PathBuf,
    output: PathBuf,
}

impl Export {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let entries = temp.path().join("Entries");
        let resources = temp.path().join("Resources");
        fs::create_dir_all(&entries).unwrap();
        fs::create_dir_all(&resources).unwrap();
        let output = temp.path().join("Journal");
        Self {
            entries,
            resources,
            output,
            _temp: temp,
        }
    }

    fn entry(&self, name: &str, html: &str) {
        fs::write(self.entries.join(name), html).unwrap();
    }

    fn config(&self) -> BatchConfig {
        BatchConfig {
            input_dir: self.entries.clone(),
            output_dir: self.output.clone(),
        }
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.output.join(rel)).unwrap()
    }

    /// Every file under the output root with its bytes, keyed by relative path.
    fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        let mut files = BTreeMap::new();
        collect(&self.output, &self.output, &mut files);
        files
    }
}

fn collect(root: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
            files.insert(rel, fs::read(&path).unwrap());
        }
    }
}

fn write_bmp(path: &Path) {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])))
        .save_with_format(path, ImageFormat::Bmp)
        .unwrap();
}

const FULL_ENTRY: &str = r#"<html><body>
<div class="pageHeader">Friday, January 5, 2024</div>
<div class="title">Snow day</div>
<div class="assetGrid">
  <img src="../Resources/broken.png">
  <img src="../Resources/sled.bmp">
  <video><source src="../Resources/run.mov"></video>
</div>
<div class="bodyText"><p>We went
   sledding.</p><p>Then cocoa.</p></div>
</body></html>"#;

#[test]
fn converts_entry_and_skips_broken_media() {
    init_logging();
    let export = Export::new();
    export.entry("entry1.html", FULL_ENTRY);
    fs::write(export.resources.join("broken.png"), b"garbage").unwrap();
    write_bmp(&export.resources.join("sled.bmp"));
    fs::write(export.resources.join("run.mov"), b"movie bytes").unwrap();

    let summary = run_batch(&export.config()).unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            entries_written: 1,
            entries_failed: 0,
            images_written: 1,
            images_failed: 1,
            videos_written: 1,
            videos_failed: 0,
        }
    );
    assert_eq!(
        export.read("2024-01-05.md"),
        "# Snow day\n\n\
         ![Image](Media/Images/sled.jpeg)\n\n\
         ![Video](Media/Videos/run.mov)\n\n\
         We went sledding.\n\n\
         Then cocoa.\n"
    );
    assert!(export.output.join("Media/Images/sled.jpeg").is_file());
    assert!(!export.output.join("Media/Images/broken.png").exists());
    assert_eq!(
        fs::read(export.output.join("Media/Videos/run.mov")).unwrap(),
        b"movie bytes"
    );
}

#[test]
fn title_and_paragraph_only() {
    init_logging();
    let export = Export::new();
    export.entry(
        "note.html",
        r#"<div class="title">T</div><div class="bodyText"><p>Hello world</p></div>"#,
    );

    run_batch(&export.config()).unwrap();

    assert_eq!(export.read("note.md"), "# T\n\nHello world\n");
}

#[test]
fn empty_entry_produces_zero_byte_file() {
    init_logging();
    let export = Export::new();
    export.entry("blank.html", "<html><body><div class=\"other\">x</div></body></html>");

    run_batch(&export.config()).unwrap();

    let md = export.output.join("blank.md");
    assert!(md.is_file());
    assert_eq!(fs::metadata(md).unwrap().len(), 0);
}

#[test]
fn second_run_is_byte_identical_and_keeps_media() {
    init_logging();
    let export = Export::new();
    export.entry("entry1.html", FULL_ENTRY);
    fs::write(export.resources.join("broken.png"), b"garbage").unwrap();
    write_bmp(&export.resources.join("sled.bmp"));
    fs::write(export.resources.join("run.mov"), b"movie bytes").unwrap();

    run_batch(&export.config()).unwrap();
    let first = export.snapshot();

    // Changing sources must not leak into already materialized media.
    fs::write(export.resources.join("run.mov"), b"re-exported movie").unwrap();
    run_batch(&export.config()).unwrap();
    let second = export.snapshot();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn subdirectories_are_not_entries() {
    init_logging();
    let export = Export::new();
    fs::create_dir_all(export.entries.join("nested")).unwrap();
    fs::write(
        export.entries.join("nested/inner.html"),
        r#"<div class="title">Hidden</div>"#,
    )
    .unwrap();
    export.entry("top.html", r#"<div class="title">Top</div>"#);

    let summary = run_batch(&export.config()).unwrap();

    assert_eq!(summary.entries_written, 1);
    assert_eq!(export.read("top.md"), "# Top\n");
    assert!(!export.output.join("inner.md").exists());
}

#[test]
fn missing_input_dir_is_fatal() {
    init_logging();
    let export = Export::new();
    let config = BatchConfig {
        input_dir: export.entries.join("missing"),
        output_dir: export.output.clone(),
    };

    let result = run_batch(&config);

    assert!(matches!(result, Err(BatchError::InputDir(_))));
    assert!(!export.output.exists());
}

#[test]
fn output_tree_is_created_even_without_media() {
    init_logging();
    let export = Export::new();

    let summary = run_batch(&export.config()).unwrap();

    assert_eq!(summary, BatchSummary::default());
    assert!(export.output.join("Media").is_dir());
}
