//! List presentation binding
//!
//! Subscribes to a [`PagedListController`]'s streams and turns each
//! lifecycle state into the same, repeatable set of UI effects:
//!
//! | state        | effect                                                        |
//! |--------------|---------------------------------------------------------------|
//! | Loading      | clear placeholder; auto-refresh if the list is empty          |
//! | Success      | advance page; finish indicators; keep token; show content     |
//! | NoMoreData   | finish load-more (no more data); empty placeholder if empty   |
//! | Error        | finish indicators as failed; show error placeholder           |
//!
//! Page states and list updates are only observed while the view lifecycle
//! is at least `Started`. Queued page states are applied in order once the
//! view starts again. Delete outcomes are observed until the view is
//! destroyed.

mod surface;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::controller::{ListStreams, LoadState, PagedListController};
use crate::lifecycle::{Lifecycle, LifecycleState};
use crate::state::{DeleteState, PageLoadingState};

pub use surface::{
    ConfirmPrompt, ConfirmRequest, ListScreen, Notice, NoticeLevel, Notifier, PendingDelete,
    RefreshIndicator, RenderSurface, StateSurface,
};

#[derive(Debug)]
pub struct ListBinding {
    controller: PagedListController,
    streams: ListStreams,
    lifecycle: Lifecycle,
    observing: bool,
}

impl ListBinding {
    /// Bind `streams` (from [`PagedListController::new`]) to a view with `lifecycle`
    pub fn new(controller: PagedListController, streams: ListStreams, lifecycle: Lifecycle) -> Self {
        Self {
            controller,
            streams,
            lifecycle,
            observing: false,
        }
    }

    pub fn controller(&self) -> &PagedListController {
        &self.controller
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    // ========================================================================
    // User gestures
    // ========================================================================

    /// Pull-to-refresh
    pub fn refresh(&self) -> JoinHandle<()> {
        self.controller.refresh()
    }

    /// Scrolled to the end
    pub fn load_more(&self) -> JoinHandle<()> {
        self.controller.load_more()
    }

    /// Long-press on the item at `position`: ask before deleting it.
    /// Returns false when nothing is at that position.
    pub fn on_item_long_press<P>(&self, position: usize, prompt: &mut P) -> bool
    where
        P: ConfirmPrompt + ?Sized,
    {
        let items = self.controller.items();
        let Some(item) = items.get(position) else {
            return false;
        };
        prompt.confirm(ConfirmRequest::delete_favorite(item, position));
        true
    }

    /// The user confirmed the delete prompt
    pub fn confirm_delete(&self, pending: PendingDelete) -> JoinHandle<()> {
        debug!(video_code = %pending.video_code, position = pending.position, "delete confirmed");
        self.controller
            .delete_item(pending.video_code, pending.position)
    }

    // ========================================================================
    // State application
    // ========================================================================

    pub fn apply_load_state<V>(&self, state: LoadState, view: &mut V)
    where
        V: ListScreen + ?Sized,
    {
        apply_load_state(&self.controller, state, view);
    }

    pub fn apply_delete_state<V>(&self, state: DeleteState, view: &mut V)
    where
        V: Notifier + ?Sized,
    {
        apply_delete_state(state, view);
    }

    /// Apply everything queued so far. Used by tick-driven front ends.
    /// Returns true if the view was touched.
    pub fn pump<V>(&mut self, view: &mut V) -> bool
    where
        V: ListScreen + ?Sized,
    {
        let current = self.lifecycle.current();
        if current == LifecycleState::Destroyed {
            return false;
        }

        let mut touched = false;
        if current >= LifecycleState::Started {
            if !self.observing {
                self.observing = true;
                view.submit_list(self.streams.items.borrow_and_update().clone());
                touched = true;
            }
            while let Ok(state) = self.streams.load.try_recv() {
                apply_load_state(&self.controller, state, view);
                touched = true;
            }
            if self.streams.items.has_changed().unwrap_or(false) {
                view.submit_list(self.streams.items.borrow_and_update().clone());
                touched = true;
            }
        } else {
            self.observing = false;
        }

        while let Ok(state) = self.streams.delete.try_recv() {
            apply_delete_state(state, view);
            touched = true;
        }
        touched
    }

    /// Drive the view until its lifecycle is destroyed
    pub async fn run<V>(self, view: &mut V)
    where
        V: ListScreen + ?Sized,
    {
        let Self {
            controller,
            streams,
            lifecycle,
            ..
        } = self;
        let ListStreams {
            mut load,
            mut delete,
            mut items,
        } = streams;
        let mut states = lifecycle.subscribe();
        let mut observing = false;

        loop {
            let current = *states.borrow_and_update();
            if current == LifecycleState::Destroyed {
                break;
            }

            let active = current >= LifecycleState::Started;
            if active && !observing {
                view.submit_list(items.borrow_and_update().clone());
            }
            observing = active;

            if active {
                tokio::select! {
                    biased;
                    changed = states.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    Some(state) = load.recv() => apply_load_state(&controller, state, view),
                    Ok(()) = items.changed() => {
                        view.submit_list(items.borrow_and_update().clone());
                    }
                    Some(state) = delete.recv() => apply_delete_state(state, view),
                    else => break,
                }
            } else {
                tokio::select! {
                    changed = states.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    Some(state) = delete.recv() => apply_delete_state(state, view),
                }
            }
        }
        debug!("list binding stopped");
    }
}

fn apply_load_state<V>(controller: &PagedListController, state: LoadState, view: &mut V)
where
    V: ListScreen + ?Sized,
{
    match state {
        PageLoadingState::Loading => {
            view.clear_state_view();
            if controller.is_empty() {
                view.auto_refresh();
            }
        }
        PageLoadingState::Success(info) => {
            controller.advance_page();
            view.finish_refresh();
            view.finish_load_more(true);
            controller.set_csrf_token(info.csrf_token);
            view.show_content();
        }
        PageLoadingState::NoMoreData => {
            view.finish_load_more_with_no_more_data();
            if controller.is_empty() {
                view.show_empty();
            }
        }
        PageLoadingState::Error(cause) => {
            view.finish_refresh();
            view.finish_load_more(false);
            view.show_error(&cause);
        }
    }
}

fn apply_delete_state<V>(state: DeleteState, view: &mut V)
where
    V: Notifier + ?Sized,
{
    match state {
        DeleteState::Loading => {}
        DeleteState::Success { .. } => view.notify(Notice::success("Removed from favorites")),
        DeleteState::Error(cause) => {
            warn!(error = %cause, "delete failed");
            view.notify(Notice::error("Failed to remove favorite"));
        }
    }
}
