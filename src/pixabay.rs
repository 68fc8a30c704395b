use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use ureq::Agent;

use crate::model::ResultPage;

pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Filters applied to every search; not exposed to the user.
const FIXED_PARAMS: [(&str, &str); 5] = [
    ("image_type", "photo"),
    ("orientation", "horizontal"),
    ("safesearch", "true"),
    ("min_width", "640"),
    ("min_height", "480"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("No images found")]
    EmptyResult,
    #[error("Search request failed: {0}")]
    Transport(String),
}

impl From<ureq::Error> for SearchError {
    fn from(err: ureq::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}

#[derive(Clone)]
pub struct PixabayClient {
    agent: Agent,
    api_key: String,
    base_url: String,
}

impl PixabayClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(15)))
            .build()
            .new_agent();
        Self {
            agent,
            api_key,
            base_url,
        }
    }

    /// Fetch one page of photos for `query`.
    ///
    /// The query, page and page size are passed through untouched; the API
    /// rejects out-of-range values itself and that surfaces as
    /// [`SearchError::Transport`]. A page without hits is reported as
    /// [`SearchError::EmptyResult`], so a successful result is never empty.
    pub fn search(&self, query: &str, page: u32, page_size: u32) -> Result<ResultPage, SearchError> {
        debug!("Searching '{}' (page {}, {} per page)", query, page, page_size);

        let mut request = self
            .agent
            .get(&self.base_url)
            .query("key", &self.api_key)
            .query("q", query);
        for (name, value) in FIXED_PARAMS {
            request = request.query(name, value);
        }

        let mut resp = request
            .query("page", page.to_string())
            .query("per_page", page_size.to_string())
            .call()?;

        let page: ResultPage = resp.body_mut().read_json()?;
        ensure_hits(page)
    }
}

fn ensure_hits(page: ResultPage) -> Result<ResultPage, SearchError> {
    if page.hits.is_empty() {
        Err(SearchError::EmptyResult)
    } else {
        Ok(page)
    }
}
