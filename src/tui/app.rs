//! Application state for the TUI

mod grid;
mod traits;
mod view;


use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::context::{
    AppContext, ContextRegistry, OverlayContext, Screen, ScreenContext, UiContext, theme_of,
};
use super::theme::{Theme, ThemeVariant};
use crate::binding::{ListBinding, Notice, Notifier};
use crate::config::FavreelConfig;
use crate::controller::PagedListController;
use crate::lifecycle::Lifecycle;
use crate::models::VideoSummary;
use crate::provider::ListProvider;

pub use grid::{CARD_HEIGHT, GridState, columns_for_width};
pub use traits::SelectableList;
pub use view::{ActiveNotice, FavoritesView, LoadMoreStatus, Placeholder};

pub const SCREEN_ID: &str = "favorites";
const SCREEN_TITLE: &str = "My favorites";

/// Main application state
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub view: FavoritesView,
    binding: ListBinding,
    /// Lifecycle of whatever owns the controller; outlives focus changes
    owner: Lifecycle,
    contexts: Arc<ContextRegistry>,
    app_ctx: Arc<AppContext>,
    screen_ctx: ScreenContext,
    theme_variant: ThemeVariant,
    custom_theme: Option<Theme>,
    cover_width: u16,
}

impl App {
    pub fn new(
        config: &FavreelConfig,
        provider: Arc<dyn ListProvider>,
        runtime: Handle,
        contexts: Arc<ContextRegistry>,
        custom_theme: Option<Theme>,
        width: u16,
    ) -> Self {
        let theme_variant = ThemeVariant::from_config_theme(config.tui.theme);
        let app_ctx = Arc::new(AppContext::new(theme_variant.theme(custom_theme)));

        let owner = Lifecycle::new();
        let screen_lifecycle = Lifecycle::new();
        let screen_ctx = ScreenContext::new(
            app_ctx.clone(),
            SCREEN_ID,
            SCREEN_TITLE,
            screen_lifecycle.clone(),
        );
        contexts.register_screen(screen_ctx.clone());

        let (controller, streams) = PagedListController::new(provider, runtime, owner.clone());
        let binding = ListBinding::new(controller, streams, screen_lifecycle);

        let cover_width = config.tui.cover_width;
        let view = FavoritesView::new(
            columns_for_width(width, cover_width),
            Duration::from_secs(config.tui.notice_seconds),
        );

        Self {
            running: true,
            show_help: false,
            view,
            binding,
            owner,
            contexts,
            app_ctx,
            screen_ctx,
            theme_variant,
            custom_theme,
            cover_width,
        }
    }

    pub fn controller(&self) -> &PagedListController {
        self.binding.controller()
    }

    /// Bring the screen up and fetch the first page
    pub fn start(&mut self) -> JoinHandle<()> {
        self.owner.start();
        self.screen_ctx.screen_lifecycle().start();
        info!(screen = SCREEN_ID, "screen started");
        self.refresh()
    }

    /// Apply queued controller output and expire notices.
    /// Returns true if anything visible changed.
    pub fn tick(&mut self) -> bool {
        let touched = self.binding.pump(&mut self.view);
        let expired = self.view.expire_notice(Instant::now());
        touched || expired
    }

    // ========================================================================
    // Contexts and theme
    // ========================================================================

    pub fn screen_context(&self) -> &ScreenContext {
        &self.screen_ctx
    }

    /// Context for something drawn on top of the screen
    pub fn overlay_context(&self, name: &'static str) -> OverlayContext {
        OverlayContext::new(self.screen_ctx.clone(), name)
    }

    pub fn contexts(&self) -> &ContextRegistry {
        &self.contexts
    }

    /// Title of the active screen, resolved through the context chain
    pub fn screen_title(&self, ctx: &dyn UiContext) -> String {
        self.contexts
            .require_screen(ctx)
            .map(|screen| screen.title().to_string())
            .unwrap_or_else(|_| SCREEN_TITLE.to_string())
    }

    pub fn theme(&self) -> Theme {
        theme_of(&self.screen_ctx).unwrap_or_default()
    }

    pub fn theme_variant(&self) -> ThemeVariant {
        self.theme_variant
    }

    pub fn cycle_theme(&mut self) {
        self.theme_variant = self.theme_variant.next(self.custom_theme.is_some());
        let theme = self.theme_variant.theme(self.custom_theme);
        self.app_ctx.set_theme(theme);
        self.view
            .notify(Notice::info(format!("Theme: {}", theme.name)));
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Pull-to-refresh
    pub fn refresh(&mut self) -> JoinHandle<()> {
        self.view.refreshing = true;
        self.view.load_more = LoadMoreStatus::Idle;
        self.binding.refresh()
    }

    /// Fetch the next page unless one is in flight or the end was reached
    pub fn request_load_more(&mut self) -> Option<JoinHandle<()>> {
        if !self.view.can_load_more() {
            return None;
        }
        debug!(page = self.controller().page_cursor(), "load more");
        self.view.load_more = LoadMoreStatus::Loading;
        Some(self.binding.load_more())
    }

    pub fn selected_item(&self) -> Option<&VideoSummary> {
        self.view.items.get(self.view.grid.selected_index())
    }

    pub fn select_next(&mut self) -> Option<JoinHandle<()>> {
        if self.view.grid.at_end() {
            return self.request_load_more();
        }
        self.view.grid.select_next();
        None
    }

    pub fn select_prev(&mut self) {
        self.view.grid.select_prev();
    }

    /// Move down a row; moving past the last row loads more
    pub fn select_down(&mut self) -> Option<JoinHandle<()>> {
        if self.view.grid.select_row_down() {
            None
        } else {
            self.request_load_more()
        }
    }

    pub fn select_up(&mut self) {
        self.view.grid.select_row_up();
    }

    pub fn select_first(&mut self) {
        self.view.grid.select_first();
    }

    pub fn select_last(&mut self) {
        self.view.grid.select_last();
    }

    /// Select the card under a mouse position
    pub fn select_at(&mut self, x: u16, y: u16) -> bool {
        match self.view.grid.index_at(x, y) {
            Some(index) => {
                self.view.grid.set_selected_index(index);
                true
            }
            None => false,
        }
    }

    /// Long-press equivalent: ask to delete the selected favorite
    pub fn request_delete(&mut self) -> bool {
        let position = self.view.grid.selected_index();
        self.binding.on_item_long_press(position, &mut self.view)
    }

    pub fn has_pending_delete(&self) -> bool {
        self.view.pending_delete.is_some()
    }

    pub fn confirm_delete(&mut self) -> Option<JoinHandle<()>> {
        let request = self.view.pending_delete.take()?;
        Some(self.binding.confirm_delete(request.pending))
    }

    pub fn cancel_delete(&mut self) {
        self.view.pending_delete = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // ========================================================================
    // Terminal events
    // ========================================================================

    /// Recompute the column count for a new terminal width
    pub fn resize(&mut self, width: u16) {
        let columns = columns_for_width(width, self.cover_width);
        debug!(width, columns, "grid resized");
        self.view.grid.set_columns(columns);
    }

    pub fn focus_lost(&mut self) {
        self.screen_ctx.screen_lifecycle().stop();
    }

    pub fn focus_gained(&mut self) {
        self.screen_ctx.screen_lifecycle().start();
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Tear down both lifecycles; late provider results are dropped after this
    pub fn shutdown(&mut self) {
        self.screen_ctx.screen_lifecycle().destroy();
        self.owner.destroy();
        self.contexts.unregister_screen(SCREEN_ID);
        info!(screen = SCREEN_ID, "screen destroyed");
    }
}
