//! Typed errors for the provider boundary and context lookups

use thiserror::Error;

/// Boxed underlying cause carried by provider errors
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures reported by a [`ListProvider`](crate::provider::ListProvider)
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to fetch page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: Cause,
    },

    #[error("failed to delete {video_code}: {source}")]
    Delete {
        video_code: String,
        #[source]
        source: Cause,
    },
}

impl ProviderError {
    pub fn fetch(page: u32, source: impl Into<Cause>) -> Self {
        Self::Fetch {
            page,
            source: source.into(),
        }
    }

    pub fn delete(video_code: impl Into<String>, source: impl Into<Cause>) -> Self {
        Self::Delete {
            video_code: video_code.into(),
            source: source.into(),
        }
    }

    /// Short, user-facing description of the underlying cause
    pub fn cause_message(&self) -> String {
        match self {
            Self::Fetch { source, .. } | Self::Delete { source, .. } => source.to_string(),
        }
    }
}

/// Failures when walking a UI context chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("no {capability} found in context chain")]
    NotFound { capability: &'static str },

    #[error("context chain deeper than {limit} nodes")]
    DepthExceeded { limit: usize },

    #[error("no active screen registered")]
    NoActiveScreen,
}
