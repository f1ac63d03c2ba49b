//! Surfaces the binding drives
//!
//! Each trait is one collaborator of a list screen. A concrete screen
//! usually implements all of them on one view struct, which then satisfies
//! [`ListScreen`].

use crate::controller::ItemList;
use crate::error::ProviderError;
use crate::models::VideoSummary;

/// Accepts the ordered item list and re-renders it
pub trait RenderSurface {
    fn submit_list(&mut self, items: ItemList);
}

/// Pull-to-refresh and load-more indicators
pub trait RefreshIndicator {
    /// Show the refresh spinner without a user gesture
    fn auto_refresh(&mut self);
    fn finish_refresh(&mut self);
    fn finish_load_more(&mut self, success: bool);
    fn finish_load_more_with_no_more_data(&mut self);
}

/// Placeholder area shown instead of (or over) the content
pub trait StateSurface {
    fn clear_state_view(&mut self);
    fn show_empty(&mut self);
    fn show_error(&mut self, cause: &ProviderError);
    fn show_content(&mut self);
}

/// Transient notices (toasts)
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Yes/no dialog primitive
pub trait ConfirmPrompt {
    fn confirm(&mut self, request: ConfirmRequest);
}

/// Everything the binding needs from a list screen
pub trait ListScreen: RenderSurface + RefreshIndicator + StateSurface + Notifier {}

impl<T> ListScreen for T where T: RenderSurface + RefreshIndicator + StateSurface + Notifier {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Error,
        }
    }
}

/// A delete waiting on the user's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub video_code: String,
    pub title: String,
    /// Display position at the time of the gesture
    pub position: usize,
}

/// Contents of a confirmation dialog plus the action confirming runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub pending: PendingDelete,
}

impl ConfirmRequest {
    pub fn delete_favorite(item: &VideoSummary, position: usize) -> Self {
        Self {
            title: "Delete favorite".to_string(),
            message: format!("Remove \"{}\" from your favorites?", item.title),
            pending: PendingDelete {
                video_code: item.video_code.clone(),
                title: item.title.clone(),
                position,
            },
        }
    }
}
