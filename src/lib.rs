//! # Artgrid - Paginated Artwork Gallery Engine
//!
//! An incremental gallery loader written in Rust: fixed-size pages of
//! artwork are fetched over HTTP, scanned out of their HTML fragments,
//! packed into a justified grid, and surfaced through a lightbox viewer
//! that prefetches the next page as the visitor nears the end of the set.
//!
//! ## Architecture
//!
//! The engine is organized into the following core modules:
//!
//! - **gallery**: Orchestrator owning one gallery view end to end
//! - **state**: Page bookkeeping (current/total/loaded pages, loading flag)
//! - **collector**: Scans rendered markup into ordered gallery items
//! - **markup**: HTML fragment parsing and the entry-markup dialects
//! - **fetch**: Page fetch coordination over a pluggable transport
//! - **renderer**: Append-only container with justified row packing
//! - **lightbox**: Full-screen viewer state and near-end prefetch policy
//! - **events**: Lifecycle event dispatch for external observers
//! - **utils**: Shared utilities and error types

pub mod collector;
pub mod events;
pub mod fetch;
pub mod gallery;
pub mod lightbox;
pub mod markup;
pub mod renderer;
pub mod state;
pub mod utils;

// Re-export main types for convenience
pub use collector::{GalleryItem, ItemCollector};
pub use fetch::{ArtworkRequest, ArtworkResponse, FetchCoordinator};
pub use gallery::{Gallery, GalleryConfig, LoadOutcome};
pub use lightbox::Lightbox;
pub use renderer::{GalleryRenderer, RelayoutMode};
pub use state::PageState;
pub use utils::error::{ArtgridError, Result};

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "Artgrid";

/// Tuning defaults shared by the gallery components
pub mod gallery_defaults {
    /// Row height as a fraction of the container width
    pub const ROW_HEIGHT_FRACTION: f32 = 0.33;
    /// Fallback row height before the container width is known, in pixels
    pub const ROW_HEIGHT_PX: f32 = 300.0;
    /// Debounce delay applied to container resize signals, in milliseconds
    pub const RESIZE_DEBOUNCE_MS: u64 = 300;
    /// Trailing fraction of the item list that triggers a lightbox prefetch
    pub const PREFETCH_TRAILING_FRACTION: f32 = 0.33;
    /// Items requested per gallery page
    pub const ITEMS_PER_PAGE: u32 = 9;
    /// Upper bound on a single page fetch, in milliseconds
    pub const FETCH_TIMEOUT_MS: u64 = 10_000;
}
