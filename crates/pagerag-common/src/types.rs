use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a CMS page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub i64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PageId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// SEO metadata block of an [`IndexableRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMetadata {
    pub seo_title: String,
    pub search_description: String,
    pub meta_keywords: Vec<String>,
    pub tags: Vec<String>,
}

/// The JSON document sent to the external RAG service for one published page.
/// Built fresh on every publish event, never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexableRecord {
    pub id: PageId,
    pub url: String,
    pub slug: String,
    pub title: String,
    pub seo_metadata: SeoMetadata,
    /// Markdown rendering of the page's declared panels.
    pub content: String,
    /// RFC 3339 timestamp of the last publish, empty if never published.
    pub last_published_at: String,
}
