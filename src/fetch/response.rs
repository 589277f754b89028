//! Page fetch response envelope

use crate::collector::GalleryItem;
use crate::utils::error::FetchError;
use crate::utils::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope status reported by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

// Unknown status strings fold to Error rather than failing the decode;
// only a structurally broken envelope is a decode error.
impl<'de> Deserialize<'de> for ResponseStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "success" => Self::Success,
            _ => Self::Error,
        })
    }
}

impl ResponseStatus {
    /// True for the success status
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// One page's fetch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkResponse {
    /// Rendered fragment for the page's entries
    pub html: String,
    /// The page's items in render order
    #[serde(default)]
    pub items: Vec<GalleryItem>,
    /// Envelope status
    pub status: ResponseStatus,
    /// Human-readable note, e.g. "No artwork"
    #[serde(default)]
    pub message: String,
}

impl ArtworkResponse {
    /// Decode a response body.
    ///
    /// A payload that does not match the envelope shape is a decode error,
    /// as is a success status carrying no appendable markup.
    pub fn decode(body: &str) -> Result<Self> {
        let response: ArtworkResponse =
            serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

        if response.status.is_success() && response.html.trim().is_empty() {
            return Err(FetchError::Decode("success status with empty html".into()).into());
        }

        Ok(response)
    }
}
