//! Full-screen lightbox viewer state
//!
//! The viewer widget itself is an external collaborator; this module owns
//! what the engine must track about it: the live item list, the open flag,
//! the near-end prefetch decision, and the thumbnail bounds handed to the
//! open/zoom transition.

use crate::collector::GalleryItem;
use crate::gallery_defaults;
use crate::renderer::Rect;
use serde::{Deserialize, Serialize};

/// When a navigation position is "near the end" of the item list.
///
/// The reference behavior used three slightly different formulas for this
/// window; it is one configurable policy here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThresholdPolicy {
    /// Trigger within the trailing `fraction` of the item count
    TrailingFraction(f32),
    /// Trigger within the last `n` items
    LastN(usize),
}

impl ThresholdPolicy {
    /// True when 1-based `position` falls inside the trigger window
    pub fn should_prefetch(&self, position: usize, item_count: usize) -> bool {
        if item_count == 0 || position > item_count {
            return false;
        }
        let window = match *self {
            Self::TrailingFraction(fraction) => {
                (item_count as f32 * fraction.clamp(0.0, 1.0)).ceil() as usize
            }
            Self::LastN(n) => n,
        };
        position >= item_count.saturating_sub(window)
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::TrailingFraction(gallery_defaults::PREFETCH_TRAILING_FRACTION)
    }
}

/// Vertical offsets of a persistent top toolbar, by viewport breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolbarOffsets {
    /// Whether a toolbar is present at all
    pub enabled: bool,
    /// Viewport width above which the wide offset applies
    pub wide_min: f32,
    /// Viewport width above which the medium offset applies
    pub medium_min: f32,
    /// Offset at wide viewports
    pub wide: f32,
    /// Offset at medium viewports
    pub medium: f32,
}

impl ToolbarOffsets {
    /// No toolbar correction
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// The offset to subtract at the given viewport width
    pub fn offset(&self, viewport_width: f32) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        if viewport_width > self.wide_min {
            self.wide
        } else if viewport_width > self.medium_min {
            self.medium
        } else {
            0.0
        }
    }
}

impl Default for ToolbarOffsets {
    fn default() -> Self {
        Self {
            enabled: true,
            wide_min: 782.0,
            medium_min: 600.0,
            wide: 32.0,
            medium: 46.0,
        }
    }
}

/// Screen coordinates of the clicked thumbnail for the zoom transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbBounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
}

/// Lightbox viewer state for one gallery instance
pub struct Lightbox {
    items: Vec<GalleryItem>,
    current: usize,
    is_open: bool,
    threshold: ThresholdPolicy,
    toolbar: ToolbarOffsets,
    ui_refreshes: u32,
    size_invalidations: u32,
}

impl Lightbox {
    /// Create a closed lightbox
    pub fn new(threshold: ThresholdPolicy, toolbar: ToolbarOffsets) -> Self {
        Self {
            items: Vec::new(),
            current: 0,
            is_open: false,
            threshold,
            toolbar,
            ui_refreshes: 0,
            size_invalidations: 0,
        }
    }

    /// Open the viewer seeded with the gallery's merged item list.
    ///
    /// A start index past the end is clamped with a diagnostic rather than
    /// rejected; the click that produced it raced a relayout.
    pub fn open(&mut self, items: Vec<GalleryItem>, start_index: usize) {
        let clamped = start_index.min(items.len().saturating_sub(1));
        if clamped != start_index {
            log::warn!(
                "lightbox start index {} clamped to {} ({} items)",
                start_index,
                clamped,
                items.len()
            );
        }
        self.items = items;
        self.current = clamped;
        self.is_open = true;
    }

    /// Open the viewer on a single artwork (the single-artwork entry point)
    pub fn open_single(&mut self, item: GalleryItem) {
        self.items = vec![item];
        self.current = 0;
        self.is_open = true;
    }

    /// Close the viewer; the item list is retained
    pub fn destroy(&mut self) {
        self.is_open = false;
    }

    /// Record navigation to `index`.
    ///
    /// Returns true when the new position sits in the near-end window and
    /// the next page should be prefetched. The in-flight gate is the
    /// caller's check; this method is pure viewer state.
    pub fn navigated(&mut self, index: usize) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let clamped = index.min(self.items.len() - 1);
        if clamped != index {
            log::warn!("lightbox navigated past end ({} of {})", index, self.items.len());
        }
        self.current = clamped;
        self.threshold.should_prefetch(self.current + 1, self.items.len())
    }

    /// Merge a fetched page's items into the live viewer list.
    ///
    /// Placeholder slides are dropped first; if the viewer currently sits
    /// within the last three known slides its size cache is invalidated so
    /// the new slides become navigable without reopening.
    pub fn merge_incoming(&mut self, incoming: &[GalleryItem]) {
        let position = self.current + 1;
        let known = self.items.len();
        let near_end = known >= 3 && position >= known - 3;

        self.items.retain(|i| !i.is_placeholder);
        self.current = self.current.min(self.items.len().saturating_sub(1));
        self.items.extend(incoming.iter().cloned());

        if near_end {
            self.size_invalidations += 1;
        }
        self.ui_refreshes += 1;
    }

    /// Thumbnail bounds for the zoom transition, toolbar-corrected
    pub fn thumb_bounds(&self, entry_rect: Rect, viewport_width: f32) -> ThumbBounds {
        ThumbBounds {
            x: entry_rect.x,
            y: entry_rect.y - self.toolbar.offset(viewport_width),
            w: entry_rect.width,
        }
    }

    /// True while the viewer is open
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Index of the slide in view
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of slides the viewer knows about
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The live item list
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Times the viewer UI was asked to refresh after a merge
    pub fn ui_refreshes(&self) -> u32 {
        self.ui_refreshes
    }

    /// Times the size cache was invalidated after a near-end merge
    pub fn size_invalidations(&self) -> u32 {
        self.size_invalidations
    }
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new(ThresholdPolicy::default(), ToolbarOffsets::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<GalleryItem> {
        (0..n)
            .map(|i| GalleryItem::new(format!("https://x/{i}.jpg"), 100, 100, format!("{i}")))
            .collect()
    }

    #[test]
    fn test_trailing_third_window() {
        // Nine items: ceil(9/3) = 3, so positions 6..=9 trigger.
        let policy = ThresholdPolicy::TrailingFraction(1.0 / 3.0);
        assert!(!policy.should_prefetch(5, 9));
        assert!(policy.should_prefetch(6, 9));
        assert!(policy.should_prefetch(7, 9));
        assert!(policy.should_prefetch(9, 9));
        assert!(!policy.should_prefetch(10, 9));
        assert!(!policy.should_prefetch(1, 0));
    }

    #[test]
    fn test_last_n_window() {
        let policy = ThresholdPolicy::LastN(3);
        assert!(!policy.should_prefetch(5, 9));
        assert!(policy.should_prefetch(6, 9));
        assert!(policy.should_prefetch(9, 9));
    }

    #[test]
    fn test_open_close_reentrant() {
        let mut lightbox = Lightbox::default();
        assert!(!lightbox.is_open());
        lightbox.open(items(4), 2);
        assert!(lightbox.is_open());
        assert_eq!(lightbox.current_index(), 2);
        lightbox.destroy();
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.item_count(), 4);

        lightbox.open_single(items(1).remove(0));
        assert!(lightbox.is_open());
        assert_eq!(lightbox.item_count(), 1);
    }

    #[test]
    fn test_open_clamps_start_index() {
        let mut lightbox = Lightbox::default();
        lightbox.open(items(3), 99);
        assert_eq!(lightbox.current_index(), 2);
    }

    #[test]
    fn test_navigated_reports_prefetch_window() {
        let mut lightbox = Lightbox::default();
        lightbox.open(items(9), 0);
        // Position 5 (index 4) is outside the trailing third.
        assert!(!lightbox.navigated(4));
        // Position 7 (index 6) is inside it.
        assert!(lightbox.navigated(6));
    }

    #[test]
    fn test_merge_extends_and_refreshes_near_end() {
        let mut lightbox = Lightbox::default();
        lightbox.open(items(9), 0);
        lightbox.navigated(7);
        lightbox.merge_incoming(&items(3));
        assert_eq!(lightbox.item_count(), 12);
        assert_eq!(lightbox.ui_refreshes(), 1);
        assert_eq!(lightbox.size_invalidations(), 1);
        // Navigating into the appended slides works without reopening.
        assert!(lightbox.navigated(11));
    }

    #[test]
    fn test_merge_away_from_end_skips_size_invalidation() {
        let mut lightbox = Lightbox::default();
        lightbox.open(items(9), 0);
        lightbox.navigated(1);
        lightbox.merge_incoming(&items(3));
        assert_eq!(lightbox.ui_refreshes(), 1);
        assert_eq!(lightbox.size_invalidations(), 0);
    }

    #[test]
    fn test_merge_strips_placeholders() {
        let mut lightbox = Lightbox::default();
        let mut seeded = items(3);
        seeded.push(GalleryItem::placeholder("https://x/default.png"));
        lightbox.open(seeded, 0);
        lightbox.merge_incoming(&items(2));
        assert_eq!(lightbox.item_count(), 5);
        assert!(lightbox.items().iter().all(|i| !i.is_placeholder));
    }

    #[test]
    fn test_thumb_bounds_toolbar_correction() {
        let lightbox = Lightbox::default();
        let rect = Rect::new(10.0, 100.0, 200.0, 150.0);
        assert_eq!(lightbox.thumb_bounds(rect, 1200.0).y, 68.0);
        assert_eq!(lightbox.thumb_bounds(rect, 700.0).y, 54.0);
        assert_eq!(lightbox.thumb_bounds(rect, 500.0).y, 100.0);

        let plain = Lightbox::new(ThresholdPolicy::default(), ToolbarOffsets::disabled());
        assert_eq!(plain.thumb_bounds(rect, 1200.0).y, 100.0);
    }
}
