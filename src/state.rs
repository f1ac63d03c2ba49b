//! Lifecycle states emitted by the list controller

use std::sync::Arc;

use crate::error::ProviderError;

/// Outcome of the most recent page-fetch attempt
#[derive(Debug, Clone)]
pub enum PageLoadingState<T> {
    Loading,
    Success(T),
    NoMoreData,
    Error(Arc<ProviderError>),
}

impl<T> PageLoadingState<T> {
    /// Short tag for logs and tests
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::NoMoreData => "no-more-data",
            Self::Error(_) => "error",
        }
    }
}

/// Outcome of a single delete request
#[derive(Debug, Clone)]
pub enum DeleteState {
    Loading,
    Success { video_code: String, position: usize },
    Error(Arc<ProviderError>),
}

impl DeleteState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success { .. } => "success",
            Self::Error(_) => "error",
        }
    }
}
