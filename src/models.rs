//! Data models for favorite videos

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry of a favorites page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    /// Provider-side identifier, used for deletes
    pub video_code: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl VideoSummary {
    pub fn new(video_code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            video_code: video_code.into(),
            title: title.into(),
            cover_url: None,
            added_at: None,
        }
    }

    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = Some(cover_url.into());
        self
    }
}

/// One page as returned by a provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based page number this batch answers
    pub page: u32,
    pub items: Vec<VideoSummary>,
    /// Session token the provider expects back on mutating requests
    pub csrf_token: Option<String>,
    /// Set when no page after this one holds data
    pub exhausted: bool,
}

impl PageInfo {
    /// Whether this page ends the list, either explicitly or by being empty
    pub fn is_last(&self) -> bool {
        self.exhausted || self.items.is_empty()
    }
}

/// A favorite to be stored, as accepted by `add` and `import`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFavorite {
    pub video_code: String,
    pub title: String,
    #[serde(default)]
    pub cover_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_is_last() {
        let page = PageInfo {
            page: 3,
            ..Default::default()
        };
        assert!(page.is_last());
    }

    #[test]
    fn test_exhausted_page_with_items_is_last() {
        let page = PageInfo {
            page: 1,
            items: vec![VideoSummary::new("a1", "First")],
            csrf_token: None,
            exhausted: true,
        };
        assert!(page.is_last());
    }

    #[test]
    fn test_new_favorite_cover_is_optional_in_json() {
        let fav: NewFavorite =
            serde_json::from_str(r#"{"video_code":"x9","title":"Clip"}"#).unwrap();
        assert_eq!(fav.video_code, "x9");
        assert!(fav.cover_url.is_none());
    }
}
