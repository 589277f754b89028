//! Markup dialects for gallery entries
//!
//! The archive gallery and the related-art gallery render the same entry
//! shape under different attribute names. Both route through one adapter so
//! the collector never hard-codes either variant.

use serde::{Deserialize, Serialize};

/// Selector and attribute names for one entry-markup variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupDialect {
    /// Class marking a gallery entry container
    pub entry_class: String,
    /// Class excluding an entry from collection (script-less duplicates)
    pub exclude_class: String,
    /// Attribute on the inner image carrying the full-resolution URL
    pub source_attr: String,
    /// Attribute carrying the declared pixel width
    pub width_attr: String,
    /// Attribute carrying the declared pixel height
    pub height_attr: String,
    /// Attribute carrying the caption; falls back to `title`/`alt`
    pub title_attr: String,
    /// Class marking the pagination marker element
    pub pagination_class: String,
    /// Attribute on the marker carrying the total page count
    pub total_attr: String,
    /// Attribute on the marker carrying the current page
    pub current_attr: String,
}

impl MarkupDialect {
    /// Dialect rendered by the taxonomy-archive gallery templates
    pub fn archive() -> Self {
        Self {
            entry_class: "artwork".into(),
            exclude_class: "noscript".into(),
            source_attr: "data-full_image".into(),
            width_attr: "data-full_image_w".into(),
            height_attr: "data-full_image_h".into(),
            title_attr: "data-title".into(),
            pagination_class: "artworker-pagination".into(),
            total_attr: "data-total".into(),
            current_attr: "data-current".into(),
        }
    }

    /// Dialect rendered by single-artwork related galleries
    pub fn related() -> Self {
        Self {
            source_attr: "data-large_image".into(),
            width_attr: "data-large_image_w".into(),
            height_attr: "data-large_image_h".into(),
            ..Self::archive()
        }
    }
}

impl Default for MarkupDialect {
    fn default() -> Self {
        Self::archive()
    }
}
