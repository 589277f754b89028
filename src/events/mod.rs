//! Lifecycle event dispatch for gallery observers
//!
//! External collaborators (busy spinners, disabled buttons, analytics) hook
//! the fetch lifecycle and render milestones here. Dispatch is synchronous
//! and fire-and-forget; handlers cannot cancel anything.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Event kinds emitted by a gallery instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryEventKind {
    /// A page fetch is about to be dispatched
    BeforeFetch,
    /// A page fetch settled with a decodable response
    FetchSuccess,
    /// A page fetch settled with a transport or decode failure
    FetchFailure,
    /// A page fetch settled, regardless of outcome
    FetchAlways,
    /// A page fragment was appended to the container
    PageAppended,
    /// A fetch settled without appendable content
    NoContentLoaded,
}

/// A lifecycle event with its payload
#[derive(Debug, Clone)]
pub enum GalleryEvent {
    BeforeFetch { page: u32 },
    FetchSuccess { page: u32 },
    FetchFailure { page: u32, reason: String },
    FetchAlways { page: u32 },
    PageAppended { page: u32, item_count: usize },
    NoContentLoaded { page: u32, message: String },
}

impl GalleryEvent {
    /// The kind used for listener registration
    pub fn kind(&self) -> GalleryEventKind {
        match self {
            Self::BeforeFetch { .. } => GalleryEventKind::BeforeFetch,
            Self::FetchSuccess { .. } => GalleryEventKind::FetchSuccess,
            Self::FetchFailure { .. } => GalleryEventKind::FetchFailure,
            Self::FetchAlways { .. } => GalleryEventKind::FetchAlways,
            Self::PageAppended { .. } => GalleryEventKind::PageAppended,
            Self::NoContentLoaded { .. } => GalleryEventKind::NoContentLoaded,
        }
    }

    /// The page the event concerns
    pub fn page(&self) -> u32 {
        match self {
            Self::BeforeFetch { page }
            | Self::FetchSuccess { page }
            | Self::FetchFailure { page, .. }
            | Self::FetchAlways { page }
            | Self::PageAppended { page, .. }
            | Self::NoContentLoaded { page, .. } => *page,
        }
    }
}

/// Event handler callback type
pub type EventHandler = Arc<dyn Fn(&GalleryEvent) + Send + Sync>;

/// Dispatcher managing listeners per event kind.
///
/// Registration and dispatch take `&self` so the dispatcher can be shared
/// between the gallery and its fetch coordinator.
pub struct EventDispatcher {
    listeners: Mutex<HashMap<GalleryEventKind, Vec<EventHandler>>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no listeners
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Register a listener for one event kind
    pub fn add_listener(&self, kind: GalleryEventKind, handler: EventHandler) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.entry(kind).or_default().push(handler);
        }
    }

    /// Dispatch an event to every listener registered for its kind.
    ///
    /// Handlers are cloned out before invocation so a handler may register
    /// further listeners without deadlocking the dispatcher.
    pub fn dispatch(&self, event: &GalleryEvent) {
        let handlers: Vec<EventHandler> = match self.listeners.lock() {
            Ok(listeners) => listeners
                .get(&event.kind())
                .map(|h| h.to_vec())
                .unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        for handler in handlers {
            handler(event);
        }
    }

    /// Number of listeners registered for an event kind
    pub fn listener_count(&self, kind: GalleryEventKind) -> usize {
        self.listeners
            .lock()
            .map(|l| l.get(&kind).map(|h| h.len()).unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
