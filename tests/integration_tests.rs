//! Integration tests for the gallery engine
//!
//! These drive a full gallery instance over a scripted in-memory transport
//! and verify the loader's observable behavior end to end.

use artgrid::events::GalleryEventKind;
use artgrid::fetch::Transport;
use artgrid::utils::error::FetchError;
use artgrid::{Gallery, GalleryConfig, LoadOutcome, PageState};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

/// What the scripted endpoint does for one page
#[derive(Clone)]
enum Scripted {
    Body(String),
    Fail,
}

/// In-memory endpoint: canned bodies per page, plus a dispatch log
struct ScriptedTransport {
    pages: HashMap<u32, Scripted>,
    log: Arc<Mutex<Vec<u32>>>,
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &Url) -> artgrid::Result<String> {
        let page: u32 = url
            .query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
            .expect("request carries a page parameter");
        self.log.lock().unwrap().push(page);

        match self.pages.get(&page) {
            Some(Scripted::Body(body)) => Ok(body.clone()),
            Some(Scripted::Fail) => Err(FetchError::Timeout.into()),
            None => Err(FetchError::Http(404).into()),
        }
    }
}

fn entry_html(id: u32) -> String {
    format!(
        r##"<div id="artwork-{id}" class="item artwork">
             <a href="#" class="artwork-link">
               <img src="thumb.png" data-full_image="https://x/{id}.jpg" data-full_image_w="400"
                    data-full_image_h="300" data-title="Artwork {id}" class="artwork-image">
             </a>
           </div>"##
    )
}

fn page_fragment(first_id: u32, count: u32) -> String {
    (first_id..first_id + count).map(entry_html).collect()
}

fn success_body(first_id: u32, count: u32) -> String {
    let items: Vec<String> = (first_id..first_id + count)
        .map(|id| {
            format!(
                r#"{{"src": "https://x/{id}.jpg", "w": 400, "h": 300, "title": "Artwork {id}"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"html": {html}, "items": [{items}], "status": "success", "message": ""}}"#,
        html = serde_json::to_string(&page_fragment(first_id, count)).unwrap(),
        items = items.join(",")
    )
}

fn no_content_body() -> String {
    r#"{"html": "", "items": [], "status": "error", "message": "No artwork"}"#.to_string()
}

fn initial_page(total_pages: u32, count: u32) -> String {
    format!(
        r#"{}<nav class="artworker-pagination" data-total="{}" data-current="1"></nav>"#,
        page_fragment(1, count),
        total_pages
    )
}

fn gallery_with(pages: Vec<(u32, Scripted)>) -> (Gallery, Arc<Mutex<Vec<u32>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let transport = ScriptedTransport {
        pages: pages.into_iter().collect(),
        log: Arc::clone(&log),
    };
    let config = GalleryConfig {
        endpoint: "https://example.com/endpoint".into(),
        items_per_page: 3,
        ..GalleryConfig::default()
    };
    let gallery = Gallery::with_transport(config, Box::new(transport)).unwrap();
    (gallery, log)
}

/// Loaded pages never refetch and never duplicate appended content.
#[tokio::test]
async fn test_idempotent_page_loading() {
    let (mut gallery, log) = gallery_with(vec![(2, Scripted::Body(success_body(4, 3)))]);
    gallery.initialize(&initial_page(2, 3)).unwrap();

    assert_eq!(gallery.load_more().await, LoadOutcome::Appended { page: 2, new_items: 3 });
    let fragments = gallery.renderer().fragment_count();
    let items = gallery.items().len();

    // Page 2 is loaded; asking again never reaches the network.
    assert_eq!(gallery.load_page(2).await, LoadOutcome::Skipped);
    assert_eq!(gallery.load_page(1).await, LoadOutcome::Skipped);
    assert_eq!(*log.lock().unwrap(), vec![2]);
    assert_eq!(gallery.renderer().fragment_count(), fragments);
    assert_eq!(gallery.items().len(), items);
}

proptest! {
    /// `is_valid_page(p)` holds exactly on `1..=total`.
    #[test]
    fn test_page_validity_bounds(total in 1u32..500, page in 0u32..1000) {
        let mut state = PageState::with_initial_page();
        state.set_total_pages(Some(total));
        prop_assert_eq!(state.is_valid_page(page), page >= 1 && page <= total);
    }
}

/// Repeated load-more activations from an empty gallery make exactly
/// `total_pages` successful fetches, then the control goes away.
#[tokio::test]
async fn test_load_more_terminates_at_last_page() {
    let first = format!(
        r#"{{"html": {html}, "items": [], "status": "success", "message": ""}}"#,
        html = serde_json::to_string(&initial_page(3, 3)).unwrap()
    );
    let (mut gallery, log) = gallery_with(vec![
        (1, Scripted::Body(first)),
        (2, Scripted::Body(success_body(4, 3))),
        (3, Scripted::Body(success_body(7, 3))),
    ]);

    assert!(matches!(
        gallery.initialize_empty().await,
        LoadOutcome::Appended { page: 1, .. }
    ));
    assert_eq!(gallery.state().total_pages(), 3);

    let mut appended = 1;
    for _ in 0..10 {
        match gallery.load_more().await {
            LoadOutcome::Appended { .. } => appended += 1,
            LoadOutcome::Skipped => break,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    assert_eq!(appended, 3);
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    assert!(!gallery.load_more_control().is_visible());
    assert!(!gallery.load_more_control().is_enabled());
    assert_eq!(gallery.load_more().await, LoadOutcome::Skipped);
}

/// A failed settlement leaves the page unloaded, the current page where it
/// was, and the loading flag clear - and the page stays retryable.
#[tokio::test]
async fn test_failure_leaves_state_unchanged() {
    let (mut gallery, log) = gallery_with(vec![(2, Scripted::Fail)]);
    gallery.initialize(&initial_page(3, 3)).unwrap();

    let outcome = gallery.load_more().await;
    assert!(matches!(outcome, LoadOutcome::Failed { page: 2, .. }));

    assert_eq!(gallery.state().loaded_pages().collect::<Vec<_>>(), vec![1]);
    assert_eq!(gallery.state().current_page(), 1);
    assert!(!gallery.state().is_loading());
    // Not at the last page, so the control stays available for a retry...
    assert!(gallery.load_more_control().is_visible());

    // ...and the retry reaches the transport again.
    let _ = gallery.load_more().await;
    assert_eq!(*log.lock().unwrap(), vec![2, 2]);
}

/// An error envelope (no content) settles cleanly without marking the page.
#[tokio::test]
async fn test_no_content_envelope() {
    let (mut gallery, _log) = gallery_with(vec![(2, Scripted::Body(no_content_body()))]);
    gallery.initialize(&initial_page(2, 3)).unwrap();

    let outcome = gallery.load_more().await;
    assert_eq!(
        outcome,
        LoadOutcome::NoContent { page: 2, message: "No artwork".into() }
    );
    assert_eq!(gallery.state().loaded_pages().collect::<Vec<_>>(), vec![1]);
}

/// Navigation into the trailing third of the lightbox prefetches the next
/// page exactly once; navigation before the window does nothing.
#[tokio::test]
async fn test_threshold_triggered_prefetch() {
    let (mut gallery, log) = gallery_with(vec![(2, Scripted::Body(success_body(10, 3)))]);
    gallery.initialize(&initial_page(2, 9)).unwrap();
    gallery.lightbox_open(0);
    assert_eq!(gallery.lightbox().item_count(), 9);

    // Position 5 of 9 is outside the trailing third.
    assert_eq!(gallery.lightbox_navigate(4).await, LoadOutcome::Skipped);
    assert!(log.lock().unwrap().is_empty());

    // Position 7 of 9 is inside it (threshold = 9 - ceil(9/3) = 6).
    assert!(matches!(
        gallery.lightbox_navigate(6).await,
        LoadOutcome::Appended { page: 2, .. }
    ));
    assert_eq!(*log.lock().unwrap(), vec![2]);

    // The merge reached the open viewer without reopening it.
    assert_eq!(gallery.lightbox().item_count(), 12);
    assert!(gallery.lightbox().ui_refreshes() >= 1);

    // Near the new end there is no page left; nothing further dispatches.
    assert_eq!(gallery.lightbox_navigate(11).await, LoadOutcome::Skipped);
    assert_eq!(*log.lock().unwrap(), vec![2]);
}

/// Full end-to-end flow: three pages, two activations.
#[tokio::test]
async fn test_end_to_end_three_pages() {
    let (mut gallery, log) = gallery_with(vec![
        (2, Scripted::Body(success_body(4, 2))),
        (3, Scripted::Body(success_body(6, 2))),
    ]);
    gallery.initialize(&initial_page(3, 3)).unwrap();

    let settled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&settled);
    gallery.on(
        GalleryEventKind::FetchAlways,
        Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    assert_eq!(gallery.load_more().await, LoadOutcome::Appended { page: 2, new_items: 2 });
    assert_eq!(gallery.state().loaded_pages().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(gallery.state().current_page(), 2);
    assert!(gallery.load_more_control().is_visible());

    assert_eq!(gallery.load_more().await, LoadOutcome::Appended { page: 3, new_items: 2 });
    assert_eq!(gallery.state().loaded_pages().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(gallery.state().current_page(), 3);
    assert!(!gallery.load_more_control().is_visible());
    assert!(!gallery.load_more_control().is_enabled());

    assert_eq!(*log.lock().unwrap(), vec![2, 3]);
    assert_eq!(settled.load(Ordering::SeqCst), 2);

    // The grid grew append-only: 3 + 2 + 2 entries across 3 fragments.
    assert_eq!(gallery.renderer().fragment_count(), 3);
    assert_eq!(gallery.items().len(), 7);
    assert!(gallery.renderer().content_height() > 0.0);
}

/// Placeholder slides reserve space only while their fetch is pending.
#[tokio::test]
async fn test_placeholders_never_survive_settlement() {
    // Page 2 fails, so the reserved slides must be stripped again.
    let (mut gallery, _log) = gallery_with(vec![(2, Scripted::Fail)]);
    gallery.initialize(&initial_page(2, 9)).unwrap();
    gallery.lightbox_open(0);

    let outcome = gallery.lightbox_navigate(8).await;
    assert!(matches!(outcome, LoadOutcome::Failed { .. }));
    assert_eq!(gallery.items().len(), 9);
    assert!(gallery.items().iter().all(|i| !i.is_placeholder));
}
