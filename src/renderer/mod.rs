//! Gallery container rendering
//!
//! The renderer owns the live container: an append-only sequence of page
//! fragments plus the justified grid placing their entries. Appending never
//! replaces or reorders earlier content; relayout either resumes packing
//! behind the completed rows (`NoRewind`) or recomputes everything (`Full`).

mod justified;
mod resize;

pub use justified::{Extent, JustifiedLayout, Rect, Row};
pub use resize::Debouncer;

use crate::collector::GalleryItem;
use crate::gallery_defaults;

/// How much of the grid a relayout may recompute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayoutMode {
    /// Recompute from the beginning; used on initial load and resize
    Full,
    /// Preserve completed rows and scroll position; pack only new entries
    NoRewind,
}

/// Append-only gallery container with justified packing
pub struct GalleryRenderer {
    fragments: Vec<String>,
    extents: Vec<Extent>,
    layout: JustifiedLayout,
    container_width: f32,
    row_height_fraction: f32,
    scroll_position: f32,
}

impl GalleryRenderer {
    /// Create a renderer for a container of the given pixel width
    pub fn new(container_width: f32, row_height_fraction: f32) -> Self {
        let row_height = derive_row_height(container_width, row_height_fraction);
        Self {
            fragments: Vec::new(),
            extents: Vec::new(),
            layout: JustifiedLayout::new(container_width, row_height),
            container_width,
            row_height_fraction,
            scroll_position: 0.0,
        }
    }

    /// Append one page's fragment and its entries to the container end.
    ///
    /// Placeholder items reserve no grid slot; only concrete entries are
    /// handed to the layout.
    pub fn append_page(&mut self, html: &str, items: &[GalleryItem]) {
        self.fragments.push(html.to_string());
        self.extents.extend(items.iter().filter(|i| !i.is_placeholder).map(|i| Extent {
            width: i.width as f32,
            height: i.height as f32,
        }));
    }

    /// Drop all fragments and packing, e.g. before re-initialization
    pub fn clear(&mut self) {
        self.fragments.clear();
        self.extents.clear();
        self.layout.reset();
        self.scroll_position = 0.0;
    }

    /// Re-run the grid packing
    pub fn relayout(&mut self, mode: RelayoutMode) {
        if mode == RelayoutMode::Full {
            self.layout.reset();
        }
        self.layout.pack(&self.extents);
        if mode == RelayoutMode::Full {
            // The grid may have shrunk; keep the viewport inside it.
            self.scroll_position = self.scroll_position.min(self.layout.content_height());
        }
    }

    /// Apply a settled container width: derive the row height and re-pack
    pub fn set_container_width(&mut self, width: f32) {
        self.container_width = width;
        self.layout
            .set_metrics(width, derive_row_height(width, self.row_height_fraction));
        self.relayout(RelayoutMode::Full);
    }

    /// Record the viewport scroll offset, clamped to the content height
    pub fn set_scroll_position(&mut self, offset: f32) {
        self.scroll_position = offset.clamp(0.0, self.layout.content_height());
    }

    /// Current viewport scroll offset
    pub fn scroll_position(&self) -> f32 {
        self.scroll_position
    }

    /// Container width in pixels
    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Target row height derived from the current width
    pub fn row_height(&self) -> f32 {
        derive_row_height(self.container_width, self.row_height_fraction)
    }

    /// Placed rectangle for the entry at `index`
    pub fn entry_rect(&self, index: usize) -> Option<Rect> {
        self.layout.slot(index)
    }

    /// Number of entries handed to the grid
    pub fn entry_count(&self) -> usize {
        self.extents.len()
    }

    /// Number of appended fragments
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// The live container markup, fragments in append order
    pub fn full_markup(&self) -> String {
        self.fragments.concat()
    }

    /// Height of the packed grid
    pub fn content_height(&self) -> f32 {
        self.layout.content_height()
    }

    /// The packed grid
    pub fn layout(&self) -> &JustifiedLayout {
        &self.layout
    }
}

impl Default for GalleryRenderer {
    fn default() -> Self {
        Self::new(900.0, gallery_defaults::ROW_HEIGHT_FRACTION)
    }
}

fn derive_row_height(container_width: f32, fraction: f32) -> f32 {
    if container_width <= 0.0 {
        return gallery_defaults::ROW_HEIGHT_PX;
    }
    container_width * fraction
}
