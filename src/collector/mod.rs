//! Item collection from rendered gallery markup
//!
//! Scans a fragment's entry nodes in document order and lifts each into a
//! [`GalleryItem`] for the lightbox and the grid. The scan is tolerant:
//! entries missing an image are skipped, and malformed numeric attributes
//! fall back to zero with a diagnostic rather than aborting the page.

mod item;

pub use item::GalleryItem;

use crate::markup::{self, Fragment, MarkupDialect};
use crate::utils::Result;
use markup5ever_rcdom::Handle;

/// Scans gallery markup into ordered item lists
#[derive(Debug, Clone, Default)]
pub struct ItemCollector {
    dialect: MarkupDialect,
}

impl ItemCollector {
    /// Create a collector for one markup dialect
    pub fn new(dialect: MarkupDialect) -> Self {
        Self { dialect }
    }

    /// The dialect this collector scans for
    pub fn dialect(&self) -> &MarkupDialect {
        &self.dialect
    }

    /// Scan all collectable entries inside `html`, in document order
    pub fn collect(&self, html: &str) -> Result<Vec<GalleryItem>> {
        let fragment = Fragment::parse(html)?;
        let mut items = Vec::new();

        for node in fragment.nodes() {
            if !self.is_entry(&node) {
                continue;
            }
            let Some(img) = markup::find_element(&node, "img") else {
                // An entry without an image has nothing to display.
                continue;
            };
            let Some(source_url) = markup::attr(&img, &self.dialect.source_attr) else {
                log::debug!("gallery entry skipped: image lacks {}", self.dialect.source_attr);
                continue;
            };

            let width = parse_dimension(&img, &self.dialect.width_attr);
            let height = parse_dimension(&img, &self.dialect.height_attr);
            let title = markup::attr(&img, &self.dialect.title_attr)
                .or_else(|| markup::attr(&img, "title"))
                .or_else(|| markup::attr(&img, "alt"))
                .unwrap_or_default();

            items.push(GalleryItem::new(source_url, width, height, title));
        }

        Ok(items)
    }

    /// Concatenate two item lists, existing order first.
    ///
    /// No de-duplication: duplicates only arise from distinct pages and are
    /// tolerated. Placeholder slides in `existing` are dropped; the incoming
    /// items are the content they reserved space for.
    pub fn merge(
        existing: Vec<GalleryItem>,
        incoming: impl IntoIterator<Item = GalleryItem>,
    ) -> Vec<GalleryItem> {
        let mut merged: Vec<GalleryItem> =
            existing.into_iter().filter(|i| !i.is_placeholder).collect();
        merged.extend(incoming);
        merged
    }

    /// Total page count from the pagination marker, if present and numeric
    pub fn read_total_pages(&self, html: &str) -> Option<u32> {
        self.read_marker_attr(html, &self.dialect.total_attr)
    }

    /// Current page from the pagination marker, if present and numeric
    pub fn read_current_page(&self, html: &str) -> Option<u32> {
        self.read_marker_attr(html, &self.dialect.current_attr)
    }

    fn read_marker_attr(&self, html: &str, attr_name: &str) -> Option<u32> {
        let fragment = Fragment::parse(html).ok()?;
        let marker = fragment
            .nodes()
            .into_iter()
            .find(|n| markup::has_class(n, &self.dialect.pagination_class))?;
        let raw = markup::attr(&marker, attr_name)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("pagination marker {} is not numeric: {:?}", attr_name, raw);
                None
            }
        }
    }

    fn is_entry(&self, node: &Handle) -> bool {
        markup::has_class(node, &self.dialect.entry_class)
            && !markup::has_class(node, &self.dialect.exclude_class)
            && markup::element_name(node).as_deref() != Some("noscript")
    }
}

fn parse_dimension(img: &Handle, attr_name: &str) -> u32 {
    match markup::attr(img, attr_name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("non-numeric {} on gallery image: {:?}", attr_name, raw);
            0
        }),
        None => 0,
    }
}
