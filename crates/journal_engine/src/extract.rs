use std::path::{Component, Path, PathBuf};

use journal_core::{join_nonempty, normalize_whitespace, parse_free_text_date, Entry};
use scraper::{ElementRef, Html, Selector};

const TITLE_CLASS: &str = "title";
const PAGE_HEADER_CLASS: &str = "pageHeader";
const ASSET_GRID_CLASS: &str = "assetGrid";
const BODY_TEXT_CLASS: &str = "bodyText";

pub trait Extractor {
    /// Pull an [`Entry`] out of one exported document.
    ///
    /// `input_root` is the directory media references are relative to.
    fn extract(&self, html: &str, source: &Path, input_root: &Path) -> Entry;
}

/// Narrow lookup surface over a parsed document: find elements, read text.
pub struct ElementLookup {
    document: Html,
}

impl ElementLookup {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Every `<tag class="class">` in document order.
    pub fn find_all(&self, tag: &str, class: &str) -> Vec<ElementRef<'_>> {
        match selector(&format!("{tag}.{class}")) {
            Some(sel) => self.document.select(&sel).collect(),
            None => Vec::new(),
        }
    }
}

/// Every `<tag>` below `element` in document order.
pub fn find_within<'a>(element: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    match selector(tag) {
        Some(sel) => element.select(&sel).collect(),
        None => Vec::new(),
    }
}

/// Text content of `element`, whitespace-normalized.
pub fn text_of(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Text nodes of `element`, each trimmed, joined by single spaces. Runs of
/// whitespace inside a node are kept.
pub fn spaced_text_of(element: ElementRef<'_>) -> String {
    join_nonempty(element.text().map(str::trim))
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Extractor for the Apple Journal HTML export layout.
#[derive(Debug, Default)]
pub struct JournalHtmlExtractor;

impl Extractor for JournalHtmlExtractor {
    fn extract(&self, html: &str, source: &Path, input_root: &Path) -> Entry {
        let doc = ElementLookup::parse(html);

        let title = Some(join_nonempty(
            doc.find_all("div", TITLE_CLASS).into_iter().map(spaced_text_of),
        ))
        .filter(|t| !t.is_empty());

        let header = join_nonempty(
            doc.find_all("div", PAGE_HEADER_CLASS)
                .into_iter()
                .map(spaced_text_of),
        );
        let date = parse_free_text_date(&header);

        let grids = doc.find_all("div", ASSET_GRID_CLASS);
        let image_sources = collect_sources(&grids, "img", input_root);
        let video_sources = collect_sources(&grids, "source", input_root);

        let paragraphs = doc
            .find_all("div", BODY_TEXT_CLASS)
            .into_iter()
            .flat_map(|body| find_within(body, "p"))
            .map(text_of)
            .filter(|p| !p.is_empty())
            .collect();

        Entry {
            source: source.to_path_buf(),
            title,
            date,
            paragraphs,
            image_sources,
            video_sources,
        }
    }
}

fn collect_sources(grids: &[ElementRef<'_>], tag: &str, input_root: &Path) -> Vec<PathBuf> {
    grids
        .iter()
        .flat_map(|grid| find_within(*grid, tag))
        .filter_map(|el| el.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(|src| resolve_reference(input_root, src))
        .collect()
}

/// Join `reference` onto `root` and fold `.`/`..` lexically. The file does not
/// need to exist.
pub fn resolve_reference(root: &Path, reference: &str) -> PathBuf {
    let joined = root.join(reference);
    let absolute = if joined.is_absolute() {
        joined
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&joined))
            .unwrap_or(joined)
    };

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}
