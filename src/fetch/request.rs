//! Page fetch request types

use url::Url;

/// Fixed action discriminator the host endpoint dispatches on
pub const FETCH_ACTION: &str = "get_artworks";

/// One page request, with optional caller-supplied extra parameters.
///
/// Extras never override the reserved `action`/`page` keys; the page number
/// always wins over a caller-supplied duplicate.
#[derive(Debug, Clone)]
pub struct ArtworkRequest {
    page: u32,
    params: Vec<(String, String)>,
}

impl ArtworkRequest {
    /// Create a request for one page
    pub fn page(page: u32) -> Self {
        Self {
            page,
            params: Vec::new(),
        }
    }

    /// Attach an extra query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// The requested page number
    pub fn page_number(&self) -> u32 {
        self.page
    }

    /// Query pairs in dispatch order: extras first, reserved keys last
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .params
            .iter()
            .filter(|(key, _)| key != "action" && key != "page")
            .cloned()
            .collect();
        pairs.push(("action".into(), FETCH_ACTION.into()));
        pairs.push(("page".into(), self.page.to_string()));
        pairs
    }

    /// Resolve the request against the gallery endpoint
    pub fn to_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        url
    }
}
