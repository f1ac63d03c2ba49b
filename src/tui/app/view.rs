//! The favorites screen as seen by the list binding

use std::time::{Duration, Instant};

use super::grid::GridState;
use crate::binding::{
    ConfirmPrompt, ConfirmRequest, Notice, Notifier, RefreshIndicator, RenderSurface,
    StateSurface,
};
use crate::controller::ItemList;
use crate::error::ProviderError;

/// What covers the grid instead of content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Placeholder {
    #[default]
    None,
    Empty,
    Error(String),
}

/// Footer state of the load-more indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMoreStatus {
    #[default]
    Idle,
    Loading,
    Failed,
    /// End reached; scrolling further does not fetch
    NoMoreData,
}

#[derive(Debug, Clone)]
pub struct ActiveNotice {
    pub notice: Notice,
    pub shown_at: Instant,
}

#[derive(Debug)]
pub struct FavoritesView {
    pub items: ItemList,
    pub grid: GridState,
    pub placeholder: Placeholder,
    pub refreshing: bool,
    pub load_more: LoadMoreStatus,
    pub notice: Option<ActiveNotice>,
    pub pending_delete: Option<ConfirmRequest>,
    notice_ttl: Duration,
}

impl FavoritesView {
    pub fn new(columns: usize, notice_ttl: Duration) -> Self {
        Self {
            items: ItemList::default(),
            grid: GridState::new(columns),
            placeholder: Placeholder::None,
            refreshing: false,
            load_more: LoadMoreStatus::Idle,
            notice: None,
            pending_delete: None,
            notice_ttl,
        }
    }

    /// Whether a scroll past the end should fetch the next page
    pub fn can_load_more(&self) -> bool {
        !self.refreshing
            && !self.items.is_empty()
            && matches!(self.load_more, LoadMoreStatus::Idle | LoadMoreStatus::Failed)
    }

    /// Drop the notice once it has been visible long enough
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        match &self.notice {
            Some(active) if now.duration_since(active.shown_at) >= self.notice_ttl => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }
}

impl RenderSurface for FavoritesView {
    fn submit_list(&mut self, items: ItemList) {
        self.grid.set_len(items.len());
        self.items = items;
    }
}

impl RefreshIndicator for FavoritesView {
    fn auto_refresh(&mut self) {
        self.refreshing = true;
    }

    fn finish_refresh(&mut self) {
        self.refreshing = false;
    }

    fn finish_load_more(&mut self, success: bool) {
        self.load_more = if success {
            LoadMoreStatus::Idle
        } else {
            LoadMoreStatus::Failed
        };
    }

    fn finish_load_more_with_no_more_data(&mut self) {
        // No Success follows, so the refresh spinner would otherwise stay up
        self.refreshing = false;
        self.load_more = LoadMoreStatus::NoMoreData;
    }
}

impl StateSurface for FavoritesView {
    fn clear_state_view(&mut self) {
        self.placeholder = Placeholder::None;
    }

    fn show_empty(&mut self) {
        self.placeholder = Placeholder::Empty;
    }

    fn show_error(&mut self, cause: &ProviderError) {
        self.placeholder = Placeholder::Error(cause.cause_message());
    }

    fn show_content(&mut self) {
        self.placeholder = Placeholder::None;
    }
}

impl Notifier for FavoritesView {
    fn notify(&mut self, notice: Notice) {
        self.notice = Some(ActiveNotice {
            notice,
            shown_at: Instant::now(),
        });
    }
}

impl ConfirmPrompt for FavoritesView {
    fn confirm(&mut self, request: ConfirmRequest) {
        self.pending_delete = Some(request);
    }
}
