//! Paged list controller
//!
//! Owns the page cursor and the item list for one screen, issues provider
//! requests on the tokio runtime and reports every outcome as a
//! [`PageLoadingState`] or [`DeleteState`]. It never touches a UI surface.
//!
//! Streams:
//! - lifecycle states go through an unbounded `mpsc` so every transition
//!   reaches the binding in order, none coalesced
//! - the item list is a `watch` channel, so observers only ever see the
//!   latest list
//!
//! A response that completes after the owner lifecycle is destroyed, or
//! after a newer `refresh`, is dropped before it can mutate anything.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::lifecycle::Lifecycle;
use crate::models::{PageInfo, VideoSummary};
use crate::provider::ListProvider;
use crate::state::{DeleteState, PageLoadingState};

/// Shared, immutable snapshot of the item list
pub type ItemList = Arc<Vec<VideoSummary>>;

/// Lifecycle state of a page fetch as emitted by the controller
pub type LoadState = PageLoadingState<PageInfo>;

/// First page index; the cursor is reset here by `refresh`
pub const FIRST_PAGE: u32 = 1;

/// Receiving halves handed to the presentation binding
#[derive(Debug)]
pub struct ListStreams {
    pub load: mpsc::UnboundedReceiver<LoadState>,
    pub delete: mpsc::UnboundedReceiver<DeleteState>,
    pub items: watch::Receiver<ItemList>,
}

struct Inner {
    provider: Arc<dyn ListProvider>,
    runtime: Handle,
    owner: Lifecycle,
    page: AtomicU32,
    generation: AtomicU64,
    items: watch::Sender<ItemList>,
    csrf_token: watch::Sender<Option<String>>,
    load_tx: mpsc::UnboundedSender<LoadState>,
    delete_tx: mpsc::UnboundedSender<DeleteState>,
}

/// Cloneable handle to a screen's list state
#[derive(Clone)]
pub struct PagedListController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for PagedListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedListController")
            .field("page", &self.page_cursor())
            .field("items", &self.inner.items.borrow().len())
            .field("owner", &self.inner.owner.current())
            .finish()
    }
}

impl PagedListController {
    /// Create a controller bound to `owner`, spawning its requests on `runtime`
    pub fn new(
        provider: Arc<dyn ListProvider>,
        runtime: Handle,
        owner: Lifecycle,
    ) -> (Self, ListStreams) {
        let (load_tx, load) = mpsc::unbounded_channel();
        let (delete_tx, delete) = mpsc::unbounded_channel();
        let (items_tx, items) = watch::channel(Arc::new(Vec::new()));
        let (csrf_token, _) = watch::channel(None);

        let controller = Self {
            inner: Arc::new(Inner {
                provider,
                runtime,
                owner,
                page: AtomicU32::new(FIRST_PAGE),
                generation: AtomicU64::new(0),
                items: items_tx,
                csrf_token,
                load_tx,
                delete_tx,
            }),
        };
        (controller, ListStreams { load, delete, items })
    }

    /// Next page to fetch
    pub fn page_cursor(&self) -> u32 {
        self.inner.page.load(Ordering::SeqCst)
    }

    /// Move the cursor forward by one page
    pub fn advance_page(&self) {
        let _ = self
            .inner
            .page
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |page| {
                Some(page.saturating_add(1))
            });
    }

    /// Current item list snapshot
    pub fn items(&self) -> ItemList {
        self.inner.items.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.borrow().is_empty()
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.inner.csrf_token.borrow().clone()
    }

    pub fn set_csrf_token(&self, token: Option<String>) {
        self.inner.csrf_token.send_replace(token);
    }

    pub fn owner(&self) -> &Lifecycle {
        &self.inner.owner
    }

    /// Ask the provider for page `page`
    pub fn request_page(&self, page: u32) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let generation = inner.generation.load(Ordering::SeqCst);
        if !inner.owner.is_destroyed() {
            inner.emit(PageLoadingState::Loading);
        }
        self.inner
            .runtime
            .spawn(async move { inner.load_page(page, generation).await })
    }

    /// Fetch the page under the cursor
    pub fn load_more(&self) -> JoinHandle<()> {
        self.request_page(self.page_cursor())
    }

    /// Drop everything and start again from the first page
    pub fn refresh(&self) -> JoinHandle<()> {
        self.inner.page.store(FIRST_PAGE, Ordering::SeqCst);
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.clear_items();
        self.request_page(FIRST_PAGE)
    }

    pub fn clear_items(&self) {
        self.inner.items.send_if_modified(|items| {
            if items.is_empty() {
                return false;
            }
            *items = Arc::new(Vec::new());
            true
        });
    }

    /// Delete `video_code`, removing the entry at `position` once the
    /// provider confirms
    ///
    /// `position` refers to the list as it is when the call is made. If the
    /// list is refreshed before the provider answers, nothing is removed.
    pub fn delete_item(&self, video_code: impl Into<String>, position: usize) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let video_code = video_code.into();
        let generation = inner.generation.load(Ordering::SeqCst);
        if !inner.owner.is_destroyed() {
            inner.emit_delete(DeleteState::Loading);
        }
        self.inner
            .runtime
            .spawn(async move { inner.delete(video_code, position, generation).await })
    }
}

impl Inner {
    fn emit(&self, state: LoadState) {
        debug!(state = state.name(), "page state");
        if self.load_tx.send(state).is_err() {
            debug!("page state dropped, no observer");
        }
    }

    fn emit_delete(&self, state: DeleteState) {
        debug!(state = state.name(), "delete state");
        if self.delete_tx.send(state).is_err() {
            debug!("delete state dropped, no observer");
        }
    }

    async fn load_page(&self, page: u32, generation: u64) {
        if self.owner.is_destroyed() {
            return;
        }

        let result = self.provider.fetch_page(page).await;

        if self.owner.is_destroyed() {
            debug!(page, "owner destroyed, discarding page result");
            return;
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(page, "list refreshed meanwhile, discarding page result");
            return;
        }

        match result {
            Ok(info) => {
                if !info.items.is_empty() {
                    self.items.send_modify(|items| {
                        Arc::make_mut(items).extend(info.items.iter().cloned());
                    });
                }
                if info.is_last() {
                    self.emit(PageLoadingState::NoMoreData);
                } else {
                    self.emit(PageLoadingState::Success(info));
                }
            }
            Err(e) => {
                warn!(page, error = %e, "page fetch failed");
                self.emit(PageLoadingState::Error(Arc::new(e)));
            }
        }
    }

    async fn delete(&self, video_code: String, position: usize, generation: u64) {
        let token = self.csrf_token.borrow().clone();
        let result = self
            .provider
            .delete_item(&video_code, token.as_deref())
            .await;

        if self.owner.is_destroyed() {
            debug!(%video_code, "owner destroyed, discarding delete result");
            return;
        }

        match result {
            Ok(()) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    debug!(%video_code, position, "list refreshed meanwhile, keeping it as is");
                } else {
                    let removed = self.items.send_if_modified(|items| {
                        match locate(items.as_slice(), &video_code, position) {
                            Some(index) => {
                                Arc::make_mut(items).remove(index);
                                true
                            }
                            None => false,
                        }
                    });
                    if !removed {
                        warn!(%video_code, position, "deleted entry no longer in list");
                    }
                }
                self.emit_delete(DeleteState::Success {
                    video_code,
                    position,
                });
            }
            Err(e) => {
                self.emit_delete(DeleteState::Error(Arc::new(e)));
            }
        }
    }
}

/// Index of the entry a delete issued at `position` now refers to
///
/// Within one refresh generation pages are only appended and entries only
/// removed, so an entry can shift toward the front but never past
/// `position`. The search walks back from there and never matches a
/// same-coded entry further down the list.
fn locate(items: &[VideoSummary], video_code: &str, position: usize) -> Option<usize> {
    let last = position.min(items.len().checked_sub(1)?);
    (0..=last)
        .rev()
        .find(|&index| items[index].video_code == video_code)
}

#[cfg(test)]
pub(crate) mod tests;
