//! Gallery orchestration
//!
//! One [`Gallery`] owns one gallery view end to end: page state, item
//! collection, fetch coordination, grid rendering, the lightbox, and the
//! load-more control. Multiple galleries on one page are simply multiple
//! instances; nothing here is global.

use crate::collector::{GalleryItem, ItemCollector};
use crate::events::{EventDispatcher, EventHandler, GalleryEvent, GalleryEventKind};
use crate::fetch::{ArtworkRequest, ArtworkResponse, FetchCoordinator, HttpTransport, Transport};
use crate::gallery_defaults;
use crate::lightbox::{Lightbox, ThresholdPolicy, ThumbBounds, ToolbarOffsets};
use crate::markup::MarkupDialect;
use crate::renderer::{Debouncer, GalleryRenderer, RelayoutMode};
use crate::state::PageState;
use crate::utils::error::FetchError;
use crate::utils::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Configuration for one gallery instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Endpoint serving `get_artworks` requests
    pub endpoint: String,
    /// Items requested per page
    pub items_per_page: u32,
    /// Image shown by placeholder slides while a fetch is pending
    pub default_image: String,
    /// Row height as a fraction of the container width
    pub row_height_fraction: f32,
    /// Initial container width in pixels
    pub container_width: f32,
    /// Settle delay for container resize signals, in milliseconds
    pub resize_debounce_ms: u64,
    /// Per-request fetch timeout, in milliseconds
    pub fetch_timeout_ms: u64,
    /// Near-end window driving the lightbox prefetch
    pub threshold: ThresholdPolicy,
    /// Toolbar correction applied to thumbnail bounds
    pub toolbar: ToolbarOffsets,
    /// Entry-markup dialect the collector scans for
    pub dialect: MarkupDialect,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost/api/gallery".into(),
            items_per_page: gallery_defaults::ITEMS_PER_PAGE,
            default_image: String::new(),
            row_height_fraction: gallery_defaults::ROW_HEIGHT_FRACTION,
            container_width: 900.0,
            resize_debounce_ms: gallery_defaults::RESIZE_DEBOUNCE_MS,
            fetch_timeout_ms: gallery_defaults::FETCH_TIMEOUT_MS,
            threshold: ThresholdPolicy::default(),
            toolbar: ToolbarOffsets::default(),
            dialect: MarkupDialect::default(),
        }
    }
}

/// How a load request settled, for callers that render UI from it
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The page's fragment was appended and its items merged
    Appended { page: u32, new_items: usize },
    /// The endpoint had no content for the page
    NoContent { page: u32, message: String },
    /// Transport or decode failure; the page stays retryable
    Failed { page: u32, reason: String },
    /// Preconditions filtered the request before dispatch
    Skipped,
}

/// Visibility state of the load-more control.
///
/// Hidden and disabled exactly when the current page is the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreControl {
    visible: bool,
    enabled: bool,
}

impl LoadMoreControl {
    /// The control starts hidden, as the markup ships it
    pub fn hidden() -> Self {
        Self {
            visible: false,
            enabled: false,
        }
    }

    /// Reveal the control at gallery initialization
    pub fn unhide(&mut self) {
        self.visible = true;
        self.enabled = true;
    }

    /// Re-evaluate visibility against the page state
    pub fn refresh(&mut self, state: &PageState) {
        if state.current_page() == state.total_pages() {
            self.visible = false;
            self.enabled = false;
        } else {
            self.visible = true;
            self.enabled = true;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// One gallery view: state, fetching, rendering, lightbox, load-more
pub struct Gallery {
    state: PageState,
    collector: ItemCollector,
    coordinator: FetchCoordinator,
    renderer: GalleryRenderer,
    lightbox: Lightbox,
    load_more: LoadMoreControl,
    events: Arc<EventDispatcher>,
    debouncer: Debouncer,
    items: Vec<GalleryItem>,
    items_per_page: u32,
    default_image: String,
}

impl Gallery {
    /// Create a gallery speaking HTTP to the configured endpoint
    pub fn new(config: GalleryConfig) -> Result<Self> {
        let transport =
            HttpTransport::new(Duration::from_millis(config.fetch_timeout_ms))?;
        Self::with_transport(config, Box::new(transport))
    }

    /// Create a gallery over a caller-supplied transport
    pub fn with_transport(config: GalleryConfig, transport: Box<dyn Transport>) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.endpoint, e)))?;
        let events = Arc::new(EventDispatcher::new());

        Ok(Self {
            state: PageState::empty(),
            collector: ItemCollector::new(config.dialect),
            coordinator: FetchCoordinator::new(endpoint, transport, Arc::clone(&events)),
            renderer: GalleryRenderer::new(config.container_width, config.row_height_fraction),
            lightbox: Lightbox::new(config.threshold, config.toolbar),
            load_more: LoadMoreControl::hidden(),
            events,
            debouncer: Debouncer::new(Duration::from_millis(config.resize_debounce_ms)),
            items: Vec::new(),
            items_per_page: config.items_per_page,
            default_image: config.default_image,
        })
    }

    /// Register a lifecycle observer
    pub fn on(&self, kind: GalleryEventKind, handler: EventHandler) {
        self.events.add_listener(kind, handler);
    }

    /// The dispatcher, for observers wired up elsewhere
    pub fn events(&self) -> Arc<EventDispatcher> {
        Arc::clone(&self.events)
    }

    /// Initialize from a server-rendered first page.
    ///
    /// Reads the pagination marker, collects the rendered entries, packs
    /// the grid, and reveals the load-more control. Page 1 counts as
    /// loaded.
    pub fn initialize(&mut self, initial_html: &str) -> Result<()> {
        self.state = PageState::with_initial_page();
        self.renderer.clear();
        self.items.clear();
        self.state
            .set_total_pages(self.collector.read_total_pages(initial_html));
        if let Some(current) = self.collector.read_current_page(initial_html) {
            self.state.set_current_page(current);
        }

        let items = self.collector.collect(initial_html)?;
        self.renderer.append_page(initial_html, &items);
        self.items = items;
        self.renderer.relayout(RelayoutMode::Full);

        self.load_more.unhide();
        self.load_more.refresh(&self.state);
        Ok(())
    }

    /// Initialize an empty gallery that fetches its own first page
    pub async fn initialize_empty(&mut self) -> LoadOutcome {
        self.state = PageState::empty();
        self.renderer.clear();
        self.items.clear();
        self.load_more.unhide();
        self.load_page(1).await
    }

    /// Load the page after the current one (the load-more activation)
    pub async fn load_more(&mut self) -> LoadOutcome {
        let next = self.state.next_page(None);
        self.load_page(next).await
    }

    /// Load a specific page through the coordinator's guards
    pub async fn load_page(&mut self, page: u32) -> LoadOutcome {
        let outcome = match self
            .coordinator
            .fetch_page(&mut self.state, ArtworkRequest::page(page))
            .await
        {
            None => LoadOutcome::Skipped,
            Some(Err(err)) => LoadOutcome::Failed {
                page,
                reason: err.to_string(),
            },
            Some(Ok(response)) => self.apply_response(page, response),
        };

        // Visibility is re-evaluated after every settlement, and placeholder
        // slides never outlive the fetch they reserved space for.
        self.prune_placeholders();
        self.load_more.refresh(&self.state);
        outcome
    }

    fn apply_response(&mut self, page: u32, response: ArtworkResponse) -> LoadOutcome {
        if !response.status.is_success() {
            self.events.dispatch(&GalleryEvent::NoContentLoaded {
                page,
                message: response.message.clone(),
            });
            return LoadOutcome::NoContent {
                page,
                message: response.message,
            };
        }

        let fragment_items = match self.collector.collect(&response.html) {
            Ok(items) => items,
            Err(err) => {
                log::warn!("page {} fragment unusable: {}", page, err);
                return LoadOutcome::Failed {
                    page,
                    reason: err.to_string(),
                };
            }
        };

        self.renderer.append_page(&response.html, &fragment_items);
        // A fragment may carry its own pagination marker (headless mode).
        if let Some(total) = self.collector.read_total_pages(&response.html) {
            self.state.set_total_pages(Some(total));
        }
        self.state.add_loaded_page(page);
        self.state.set_current_page(page);

        let new_items = fragment_items.len();
        self.items = ItemCollector::merge(std::mem::take(&mut self.items), fragment_items);
        self.renderer.relayout(RelayoutMode::NoRewind);
        self.events.dispatch(&GalleryEvent::PageAppended {
            page,
            item_count: new_items,
        });

        if self.lightbox.is_open() {
            self.lightbox.merge_incoming(&response.items);
        }

        LoadOutcome::Appended { page, new_items }
    }

    /// Open the lightbox from a gallery-grid thumbnail (index by position)
    pub fn lightbox_open(&mut self, start_index: usize) {
        self.lightbox.open(self.items.clone(), start_index);
    }

    /// Open the lightbox on a single artwork (identifier entry point)
    pub fn lightbox_open_single(&mut self, item: GalleryItem) {
        self.lightbox.open_single(item);
    }

    /// Close the lightbox
    pub fn lightbox_destroy(&mut self) {
        self.lightbox.destroy();
    }

    /// Record a lightbox navigation; prefetch the next page near the end.
    ///
    /// Placeholder slides reserve grid space while the fetch is pending and
    /// are stripped once it settles, whatever the outcome.
    pub async fn lightbox_navigate(&mut self, index: usize) -> LoadOutcome {
        let wants_prefetch = self.lightbox.navigated(index);
        if !wants_prefetch || self.state.is_loading() {
            return LoadOutcome::Skipped;
        }

        let next = self.state.next_page(None);
        if self.state.is_valid_page(next) && !self.state.is_loaded_page(next) {
            self.add_placeholder_slides();
        }
        self.load_more().await
    }

    /// Thumbnail bounds for the zoom transition of the entry at `index`
    pub fn thumb_bounds(&self, index: usize, viewport_width: f32) -> Option<ThumbBounds> {
        let rect = self.renderer.entry_rect(index)?;
        Some(self.lightbox.thumb_bounds(rect, viewport_width))
    }

    /// Record a container resize signal; applied once the burst settles
    pub fn resize(&mut self, width: f32) {
        self.debouncer.signal(Instant::now(), width);
    }

    /// Apply a settled resize, if any. Returns true when a relayout ran.
    pub fn apply_pending_resize(&mut self) -> bool {
        match self.debouncer.settled(Instant::now()) {
            Some(width) => {
                self.renderer.set_container_width(width);
                true
            }
            None => false,
        }
    }

    /// Resize and wait out the debounce window before applying
    pub async fn resize_and_settle(&mut self, width: f32) {
        self.resize(width);
        tokio::time::sleep(self.debouncer.delay()).await;
        self.apply_pending_resize();
    }

    fn add_placeholder_slides(&mut self) {
        for _ in 0..self.items_per_page {
            self.items
                .push(GalleryItem::placeholder(self.default_image.clone()));
        }
    }

    fn prune_placeholders(&mut self) {
        self.items.retain(|i| !i.is_placeholder);
    }

    /// Page bookkeeping for this view
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// The merged page-level item list
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// The live container
    pub fn renderer(&self) -> &GalleryRenderer {
        &self.renderer
    }

    /// The lightbox viewer state
    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// The load-more control state
    pub fn load_more_control(&self) -> &LoadMoreControl {
        &self.load_more
    }
}
