//! Page fetch coordination
//!
//! One coordinator serves one gallery instance. It owns the authoritative
//! dispatch guard: a page that is out of range or already merged never
//! reaches the transport, regardless of which control asked for it. Every
//! dispatched fetch emits the full lifecycle - before-fetch, then success
//! or failure, then always - and releases the loading flag on every path.

mod request;
mod response;
mod transport;

pub use request::{ArtworkRequest, FETCH_ACTION};
pub use response::{ArtworkResponse, ResponseStatus};
pub use transport::{HttpTransport, Transport};

use crate::events::{EventDispatcher, GalleryEvent};
use crate::state::{LoadingGuard, PageState};
use crate::utils::Result;
use std::sync::Arc;
use url::Url;

/// Issues page fetches for a single gallery view
pub struct FetchCoordinator {
    endpoint: Url,
    transport: Box<dyn Transport>,
    events: Arc<EventDispatcher>,
}

impl FetchCoordinator {
    /// Create a coordinator for one endpoint
    pub fn new(endpoint: Url, transport: Box<dyn Transport>, events: Arc<EventDispatcher>) -> Self {
        Self {
            endpoint,
            transport,
            events,
        }
    }

    /// The endpoint requests resolve against
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch one page.
    ///
    /// Returns `None` without dispatching when the page is invalid or
    /// already loaded. Otherwise returns the settled outcome: a decoded
    /// envelope (whose own status may still report an error), or the
    /// transport/decode failure. The caller decides whether to merge; this
    /// method never marks pages loaded, so a failed page stays retryable.
    pub async fn fetch_page(
        &self,
        state: &mut PageState,
        request: ArtworkRequest,
    ) -> Option<Result<ArtworkResponse>> {
        let page = request.page_number();
        if !state.is_valid_page(page) || state.is_loaded_page(page) {
            log::debug!(
                "fetch for page {} skipped: out of range or already loaded",
                page
            );
            return None;
        }

        self.events.dispatch(&GalleryEvent::BeforeFetch { page });
        let guard = LoadingGuard::acquire(state);

        let url = request.to_url(&self.endpoint);
        let result = match self.transport.get(&url).await {
            Ok(body) => ArtworkResponse::decode(&body),
            Err(err) => Err(err),
        };

        match &result {
            Ok(_) => self.events.dispatch(&GalleryEvent::FetchSuccess { page }),
            Err(err) => {
                log::warn!("page {} fetch failed: {}", page, err);
                self.events.dispatch(&GalleryEvent::FetchFailure {
                    page,
                    reason: err.to_string(),
                });
            }
        }
        self.events.dispatch(&GalleryEvent::FetchAlways { page });
        drop(guard);

        Some(result)
    }
}
