//! favreel - a terminal viewer for paged favorite-video lists
//!
//! The crate is split into a framework-free core and the surfaces that
//! render it:
//! - [`controller`]: page cursor, item list and the lifecycle-state streams
//! - [`binding`]: maps lifecycle states onto idempotent UI effects
//! - [`provider`]: the data boundary, with a local SQLite implementation
//! - [`tui`]: the ratatui grid screen

pub mod binding;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod provider;
pub mod state;
pub mod tui;

pub use binding::ListBinding;
pub use config::FavreelConfig;
pub use controller::PagedListController;
pub use db::Database;
pub use error::{ContextError, ProviderError};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use models::{NewFavorite, PageInfo, VideoSummary};
pub use provider::{ListProvider, LocalProvider};
pub use state::{DeleteState, PageLoadingState};
