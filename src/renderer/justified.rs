//! Justified row packing for the gallery grid
//!
//! Entries are scaled to a shared target row height and packed greedily;
//! once a row overflows the container width it is justified - every slot
//! rescaled so the row spans the width exactly. The trailing row stays at
//! target height until enough entries arrive to close it, which is what
//! lets an incremental pack resume without disturbing completed rows.

/// Natural pixel extent of one entry's image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    /// Width this extent occupies when scaled to `row_height`
    fn scaled_width(&self, row_height: f32) -> f32 {
        if self.height <= 0.0 {
            // Degenerate extents render as squares rather than vanishing.
            return row_height;
        }
        self.width * row_height / self.height
    }
}

/// Placed rectangle in container coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One packed row of entry slots
#[derive(Debug, Clone)]
pub struct Row {
    /// Top edge in container coordinates
    pub y: f32,
    /// Row height after justification
    pub height: f32,
    /// Slot rectangles, left to right
    pub slots: Vec<Rect>,
}

/// Incremental justified layout over an append-only entry list
#[derive(Debug, Clone)]
pub struct JustifiedLayout {
    container_width: f32,
    target_row_height: f32,
    rows: Vec<Row>,
    /// Entries consumed into `rows`
    packed: usize,
    /// The trailing row is unjustified and may be reopened by a later pack
    tail_open: bool,
}

impl JustifiedLayout {
    /// Create a layout for the given container metrics
    pub fn new(container_width: f32, target_row_height: f32) -> Self {
        Self {
            container_width,
            target_row_height,
            rows: Vec::new(),
            packed: 0,
            tail_open: false,
        }
    }

    /// Replace the container metrics; the caller decides when to re-pack
    pub fn set_metrics(&mut self, container_width: f32, target_row_height: f32) {
        self.container_width = container_width;
        self.target_row_height = target_row_height;
    }

    /// Discard all packing
    pub fn reset(&mut self) {
        self.rows.clear();
        self.packed = 0;
        self.tail_open = false;
    }

    /// Pack entries not yet consumed.
    ///
    /// `extents` is the full entry list; completed rows are left untouched
    /// and only the open tail (if any) plus the new entries are packed.
    /// Calling twice with the same list is a no-op.
    pub fn pack(&mut self, extents: &[Extent]) {
        if self.tail_open {
            // Reopen the unjustified trailing row so its entries pack
            // together with the new arrivals.
            if let Some(tail) = self.rows.pop() {
                self.packed -= tail.slots.len();
            }
            self.tail_open = false;
        }
        if self.packed > extents.len() {
            // The entry list never shrinks; a shorter list means the
            // caller reset the container without resetting the layout.
            log::warn!(
                "layout saw {} packed entries but only {} extents; repacking from scratch",
                self.packed,
                extents.len()
            );
            self.reset();
        }

        let mut y = self.rows.last().map(|r| r.y + r.height).unwrap_or(0.0);
        let mut pending: Vec<f32> = Vec::new();
        let mut pending_width = 0.0;

        for extent in &extents[self.packed..] {
            let width = extent.scaled_width(self.target_row_height);
            pending.push(width);
            pending_width += width;

            if pending_width >= self.container_width && self.container_width > 0.0 {
                let factor = self.container_width / pending_width;
                let height = self.target_row_height * factor;
                let mut x = 0.0;
                let slots = pending
                    .drain(..)
                    .map(|w| {
                        let slot = Rect::new(x, y, w * factor, height);
                        x += w * factor;
                        slot
                    })
                    .collect::<Vec<_>>();
                self.packed += slots.len();
                self.rows.push(Row { y, height, slots });
                y += height;
                pending_width = 0.0;
            }
        }

        if !pending.is_empty() {
            // Trailing row: keep target height, left-aligned, reopenable.
            let mut x = 0.0;
            let slots = pending
                .drain(..)
                .map(|w| {
                    let slot = Rect::new(x, y, w, self.target_row_height);
                    x += w;
                    slot
                })
                .collect::<Vec<_>>();
            self.packed += slots.len();
            self.rows.push(Row {
                y,
                height: self.target_row_height,
                slots,
            });
            self.tail_open = true;
        }
    }

    /// Packed rows, top to bottom
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of entries consumed into rows
    pub fn packed_entries(&self) -> usize {
        self.packed
    }

    /// Total height of the packed content
    pub fn content_height(&self) -> f32 {
        self.rows.last().map(|r| r.y + r.height).unwrap_or(0.0)
    }

    /// Slot rectangle for the entry at `index`, if packed
    pub fn slot(&self, index: usize) -> Option<Rect> {
        let mut remaining = index;
        for row in &self.rows {
            if remaining < row.slots.len() {
                return Some(row.slots[remaining]);
            }
            remaining -= row.slots.len();
        }
        None
    }
}
