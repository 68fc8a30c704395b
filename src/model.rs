use serde::Deserialize;

/// A single photo as returned by the search API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageResult {
    pub id: u64,
    /// Medium-sized image used for the gallery card.
    #[serde(rename = "webformatURL")]
    pub preview_url: String,
    /// Full-size image shown in the viewer.
    #[serde(rename = "largeImageURL")]
    pub full_url: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub downloads: u64,
}

impl ImageResult {
    /// Tags as individual words, e.g. "cat, kitten, pet" -> ["cat", "kitten", "pet"].
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResultPage {
    pub hits: Vec<ImageResult>,
    /// Number of hits for the whole query, not just this page.
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
}

/// Whether pages beyond `page` exist for a query with `total_hits` results.
pub fn has_more(page: u32, page_size: u32, total_hits: u64) -> bool {
    u64::from(page) * u64::from(page_size) < total_hits
}

#[cfg(test)]
pub(crate) fn sample_image(id: u64) -> ImageResult {
    ImageResult {
        id,
        preview_url: format!("https://cdn.example.com/{id}_640.jpg"),
        full_url: format!("https://cdn.example.com/{id}_1280.jpg"),
        tags: "cat, kitten, pet".to_string(),
        likes: 10,
        views: 200,
        comments: 3,
        downloads: 50,
    }
}
