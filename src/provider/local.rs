//! Provider over the local SQLite favorites store

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use tracing::debug;

use super::ListProvider;
use crate::db::Database;
use crate::error::ProviderError;
use crate::models::PageInfo;

/// Serves favorites from [`Database`] on tokio's blocking pool
#[derive(Debug, Clone)]
pub struct LocalProvider {
    db: Arc<Database>,
    page_size: u32,
}

impl LocalProvider {
    pub fn new(db: Arc<Database>, page_size: u32) -> Self {
        Self {
            db,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[async_trait]
impl ListProvider for LocalProvider {
    async fn fetch_page(&self, page: u32) -> Result<PageInfo, ProviderError> {
        let db = Arc::clone(&self.db);
        let page_size = self.page_size;

        let result = tokio::task::spawn_blocking(move || -> anyhow::Result<PageInfo> {
            let items = db.list_favorites_page(page, page_size)?;
            let total = db.count_favorites()?;
            let csrf_token = db.session_token()?;
            let exhausted = u64::from(page.max(1)) * u64::from(page_size) >= total;
            Ok(PageInfo {
                page,
                items,
                csrf_token: Some(csrf_token),
                exhausted,
            })
        })
        .await
        .map_err(|e| ProviderError::fetch(page, e))?;

        let info = result.map_err(|e| ProviderError::fetch(page, e))?;
        debug!(page, count = info.items.len(), exhausted = info.exhausted, "fetched local page");
        Ok(info)
    }

    async fn delete_item(
        &self,
        video_code: &str,
        csrf_token: Option<&str>,
    ) -> Result<(), ProviderError> {
        let db = Arc::clone(&self.db);
        let code = video_code.to_string();
        let token = csrf_token.map(str::to_string);

        tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
            if let Some(token) = token
                && token != db.session_token()?
            {
                return Err(anyhow!("session token is stale, refresh and try again"));
            }
            if !db.delete_favorite(&code)? {
                return Err(anyhow!("not in favorites"));
            }
            Ok(())
        })
        .await
        .map_err(|e| ProviderError::delete(video_code, e))?
        .map_err(|e| ProviderError::delete(video_code, e))
    }
}
