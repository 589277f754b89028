//! Gallery item model

use serde::{Deserialize, Serialize};

/// One displayable artwork entry.
///
/// Wire form is the fetch envelope's `{src, w, h, title}`; placeholders are
/// a purely local construct and never cross the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Full-resolution image location
    #[serde(rename = "src")]
    pub source_url: String,
    /// Declared pixel width
    #[serde(rename = "w")]
    pub width: u32,
    /// Declared pixel height
    #[serde(rename = "h")]
    pub height: u32,
    /// Caption, may be empty
    #[serde(default)]
    pub title: String,
    /// Synthetic entry reserving grid space while a page fetch is pending
    #[serde(skip)]
    pub is_placeholder: bool,
}

impl GalleryItem {
    /// Create a concrete item
    pub fn new(
        source_url: impl Into<String>,
        width: u32,
        height: u32,
        title: impl Into<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            width,
            height,
            title: title.into(),
            is_placeholder: false,
        }
    }

    /// Create a placeholder slide showing the configured default image
    pub fn placeholder(default_image: impl Into<String>) -> Self {
        Self {
            source_url: default_image.into(),
            width: 100,
            height: 100,
            title: String::new(),
            is_placeholder: true,
        }
    }
}
