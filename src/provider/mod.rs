//! Data provider boundary
//!
//! A provider supplies favorites page by page and accepts deletes. The
//! controller never talks to storage or the network directly.

mod local;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::PageInfo;

pub use local::LocalProvider;

/// Paged favorites source
#[async_trait]
pub trait ListProvider: Send + Sync {
    /// Fetch 1-based page `page`
    async fn fetch_page(&self, page: u32) -> Result<PageInfo, ProviderError>;

    /// Delete one entry. `csrf_token` is the token last returned with a page.
    async fn delete_item(
        &self,
        video_code: &str,
        csrf_token: Option<&str>,
    ) -> Result<(), ProviderError>;
}
