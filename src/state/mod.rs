//! Page bookkeeping for one gallery view
//!
//! Tracks which page is current, how many pages exist, and which pages have
//! already been merged into the container. The state is session-local and is
//! never serialized; it is created once at gallery initialization and
//! mutated only by its own setters and the fetch coordinator.

use std::collections::BTreeSet;

/// Mutable pagination state for a single gallery instance
#[derive(Debug, Clone)]
pub struct PageState {
    /// Page the gallery most recently merged, 1-based
    current_page: u32,
    /// Total page count reported by the pagination marker
    total_pages: u32,
    /// Pages whose content has been merged into the container
    loaded_pages: BTreeSet<u32>,
    /// True between fetch dispatch and fetch settlement
    is_loading: bool,
}

impl PageState {
    /// State for a gallery whose first page was rendered server-side
    pub fn with_initial_page() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            loaded_pages: BTreeSet::from([1]),
            is_loading: false,
        }
    }

    /// State for a gallery that starts empty and fetches page 1 itself
    pub fn empty() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            loaded_pages: BTreeSet::new(),
            is_loading: false,
        }
    }

    /// Record the total page count from the pagination marker.
    ///
    /// An absent or unparseable signal defaults to 1, and a zero signal is
    /// clamped to 1 so `total_pages >= 1` holds unconditionally.
    pub fn set_total_pages(&mut self, signal: Option<u32>) {
        let total = match signal {
            Some(total) => total.max(1),
            None => {
                log::debug!("no total-pages signal, defaulting to 1");
                1
            }
        };
        self.total_pages = total;
        // Keep the invariant if the marker shrank under us.
        if self.current_page > self.total_pages {
            self.current_page = self.total_pages;
        }
    }

    /// Record the page the gallery is now on.
    ///
    /// A page outside `1..=total_pages` is rejected with a diagnostic and
    /// leaves the state unchanged, never partially updated.
    pub fn set_current_page(&mut self, page: u32) {
        if !self.is_valid_page(page) {
            log::warn!(
                "set_current_page rejected {} (total pages {})",
                page,
                self.total_pages
            );
            return;
        }
        self.current_page = page;
    }

    /// True iff `1 <= page <= total_pages`
    pub fn is_valid_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// True iff `page` has already been merged into the container
    pub fn is_loaded_page(&self, page: u32) -> bool {
        self.loaded_pages.contains(&page)
    }

    /// Mark `page` as loaded.
    ///
    /// Returns true only when the page is valid and was not loaded before;
    /// otherwise the call is a no-op.
    pub fn add_loaded_page(&mut self, page: u32) -> bool {
        if !self.is_valid_page(page) || self.is_loaded_page(page) {
            return false;
        }
        self.loaded_pages.insert(page)
    }

    /// Page after `from` (or after the current page). No upper clamp is
    /// applied; callers check validity before fetching.
    pub fn next_page(&self, from: Option<u32>) -> u32 {
        from.unwrap_or(self.current_page).saturating_add(1)
    }

    /// Page before `from` (or before the current page). Saturates at 0,
    /// which no validity check accepts.
    pub fn prev_page(&self, from: Option<u32>) -> u32 {
        from.unwrap_or(self.current_page).saturating_sub(1)
    }

    /// Which page the item at 1-based `position` falls on
    pub fn determine_page(position: u32, per_page: u32) -> u32 {
        if per_page == 0 {
            return 1;
        }
        position.div_ceil(per_page).max(1)
    }

    /// True between fetch dispatch and settlement
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Pages merged so far, in ascending order
    pub fn loaded_pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.loaded_pages.iter().copied()
    }

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::with_initial_page()
    }
}

/// Scoped hold on the loading flag.
///
/// Acquiring sets `is_loading`; dropping clears it on every exit path, so a
/// settled fetch can never leave the gallery stuck in a loading state.
pub struct LoadingGuard<'a> {
    state: &'a mut PageState,
}

impl<'a> LoadingGuard<'a> {
    /// Set the loading flag and hold it until drop
    pub fn acquire(state: &'a mut PageState) -> Self {
        state.set_loading(true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.set_loading(false);
    }
}
