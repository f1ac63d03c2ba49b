//! Tests for the paged list controller

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::{Notify, mpsc};

use super::*;
use crate::error::ProviderError;

/// Provider answering from a queue of canned responses
#[derive(Default)]
pub(crate) struct ScriptedProvider {
    pages: Mutex<VecDeque<Result<PageInfo, String>>>,
    deletes: Mutex<VecDeque<Result<(), String>>>,
    pub(crate) fetched: Mutex<Vec<u32>>,
    pub(crate) deleted: Mutex<Vec<(String, Option<String>)>>,
    gate: Option<Arc<Notify>>,
    delete_gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Hold every fetch until `gate` is notified
    pub(crate) fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Hold the delete of `video_code` until `gate` is notified
    pub(crate) fn hold_delete(self, video_code: &str, gate: Arc<Notify>) -> Self {
        self.delete_gates
            .lock()
            .unwrap()
            .insert(video_code.to_string(), gate);
        self
    }

    pub(crate) fn page(self, page: u32, count: usize, exhausted: bool) -> Self {
        let items = (0..count)
            .map(|i| VideoSummary::new(format!("p{page}-{i}"), format!("Page {page} #{i}")))
            .collect();
        self.page_of(page, items, exhausted)
    }

    pub(crate) fn page_with(self, page: u32, codes: &[&str], exhausted: bool) -> Self {
        let items = codes
            .iter()
            .map(|code| VideoSummary::new(*code, code.to_uppercase()))
            .collect();
        self.page_of(page, items, exhausted)
    }

    fn page_of(self, page: u32, items: Vec<VideoSummary>, exhausted: bool) -> Self {
        self.pages.lock().unwrap().push_back(Ok(PageInfo {
            page,
            items,
            csrf_token: Some(format!("token-{page}")),
            exhausted,
        }));
        self
    }

    pub(crate) fn failing_page(self, message: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub(crate) fn delete_ok(self) -> Self {
        self.deletes.lock().unwrap().push_back(Ok(()));
        self
    }

    pub(crate) fn delete_err(self, message: &str) -> Self {
        self.deletes
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }
}

#[async_trait]
impl ListProvider for ScriptedProvider {
    async fn fetch_page(&self, page: u32) -> Result<PageInfo, ProviderError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.fetched.lock().unwrap().push(page);
        let next = self.pages.lock().unwrap().pop_front();
        match next {
            Some(Ok(info)) => Ok(info),
            Some(Err(message)) => Err(ProviderError::fetch(page, message)),
            None => Err(ProviderError::fetch(page, "no scripted page")),
        }
    }

    async fn delete_item(
        &self,
        video_code: &str,
        csrf_token: Option<&str>,
    ) -> Result<(), ProviderError> {
        let gate = self.delete_gates.lock().unwrap().get(video_code).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.deleted
            .lock()
            .unwrap()
            .push((video_code.to_string(), csrf_token.map(str::to_string)));
        let next = self.deletes.lock().unwrap().pop_front();
        match next {
            Some(Ok(())) => Ok(()),
            Some(Err(message)) => Err(ProviderError::delete(video_code, message)),
            None => Err(ProviderError::delete(video_code, "no scripted delete")),
        }
    }
}

fn controller_for(provider: ScriptedProvider) -> (PagedListController, ListStreams) {
    let owner = Lifecycle::new();
    owner.start();
    PagedListController::new(Arc::new(provider), Handle::current(), owner)
}

fn drain_states(rx: &mut mpsc::UnboundedReceiver<LoadState>) -> Vec<&'static str> {
    let mut names = Vec::new();
    while let Ok(state) = rx.try_recv() {
        names.push(state.name());
    }
    names
}

fn codes(items: &ItemList) -> Vec<String> {
    items.iter().map(|v| v.video_code.clone()).collect()
}

#[tokio::test]
async fn test_refresh_success_emits_loading_then_success() {
    let (controller, mut streams) = controller_for(ScriptedProvider::new().page(1, 20, false));

    controller.refresh().await.unwrap();

    assert_eq!(drain_states(&mut streams.load), vec!["loading", "success"]);
    assert_eq!(controller.items().len(), 20);
}

#[tokio::test]
async fn test_request_page_leaves_cursor_to_observer() {
    let (controller, _streams) = controller_for(ScriptedProvider::new().page(1, 5, false));

    controller.refresh().await.unwrap();

    assert_eq!(controller.page_cursor(), FIRST_PAGE);
    controller.advance_page();
    assert_eq!(controller.page_cursor(), 2);
}

#[tokio::test]
async fn test_load_more_appends_batch() {
    let provider = ScriptedProvider::new().page(1, 3, false).page(2, 2, false);
    let (controller, _streams) = controller_for(provider);

    controller.refresh().await.unwrap();
    controller.advance_page();
    controller.load_more().await.unwrap();

    assert_eq!(
        codes(&controller.items()),
        vec!["p1-0", "p1-1", "p1-2", "p2-0", "p2-1"]
    );
}

#[tokio::test]
async fn test_load_more_requests_cursor_page() {
    let provider = Arc::new(ScriptedProvider::new().page(1, 3, false).page(2, 3, false));
    let owner = Lifecycle::new();
    let (controller, _streams) = PagedListController::new(
        Arc::clone(&provider) as Arc<dyn ListProvider>,
        Handle::current(),
        owner,
    );

    controller.refresh().await.unwrap();
    controller.advance_page();
    controller.load_more().await.unwrap();

    assert_eq!(*provider.fetched.lock().unwrap(), vec![1, 2]);
}

#[tokio::test]
async fn test_refresh_discards_accumulated_items() {
    let provider = ScriptedProvider::new()
        .page(1, 2, false)
        .page(2, 2, false)
        .page(1, 1, false);
    let (controller, _streams) = controller_for(provider);

    controller.refresh().await.unwrap();
    controller.advance_page();
    controller.load_more().await.unwrap();
    controller.advance_page();
    assert_eq!(controller.items().len(), 4);

    controller.refresh().await.unwrap();

    assert_eq!(codes(&controller.items()), vec!["p1-0"]);
    assert_eq!(controller.page_cursor(), FIRST_PAGE);
}

#[tokio::test]
async fn test_exhausted_page_emits_no_more_data() {
    let (controller, mut streams) = controller_for(ScriptedProvider::new().page(1, 4, true));

    controller.refresh().await.unwrap();

    assert_eq!(drain_states(&mut streams.load), vec!["loading", "no-more-data"]);
    assert_eq!(controller.items().len(), 4);
    assert_eq!(controller.page_cursor(), FIRST_PAGE);
}

#[tokio::test]
async fn test_empty_page_emits_no_more_data() {
    let (controller, mut streams) = controller_for(ScriptedProvider::new().page(1, 0, false));

    controller.refresh().await.unwrap();

    assert_eq!(drain_states(&mut streams.load), vec!["loading", "no-more-data"]);
    assert!(controller.is_empty());
}

#[tokio::test]
async fn test_failure_leaves_items_and_cursor() {
    let provider = ScriptedProvider::new()
        .page(1, 3, false)
        .failing_page("timed out");
    let (controller, mut streams) = controller_for(provider);

    controller.refresh().await.unwrap();
    controller.advance_page();
    let before = controller.items();
    drain_states(&mut streams.load);

    controller.load_more().await.unwrap();

    let states: Vec<_> = std::iter::from_fn(|| streams.load.try_recv().ok()).collect();
    assert_eq!(states.len(), 2);
    match &states[1] {
        PageLoadingState::Error(e) => assert_eq!(e.cause_message(), "timed out"),
        other => panic!("expected error, got {}", other.name()),
    }
    assert_eq!(controller.items(), before);
    assert_eq!(controller.page_cursor(), 2);
}

#[tokio::test]
async fn test_retry_after_failure_is_a_fresh_request() {
    let provider = ScriptedProvider::new()
        .failing_page("offline")
        .page(1, 2, false);
    let (controller, mut streams) = controller_for(provider);

    controller.refresh().await.unwrap();
    controller.refresh().await.unwrap();

    assert_eq!(
        drain_states(&mut streams.load),
        vec!["loading", "error", "loading", "success"]
    );
    assert_eq!(controller.items().len(), 2);
}

#[tokio::test]
async fn test_delete_removes_exactly_that_position() {
    let provider = ScriptedProvider::new().page(1, 4, false).delete_ok();
    let (controller, mut streams) = controller_for(provider);
    controller.refresh().await.unwrap();

    controller.delete_item("p1-2", 2).await.unwrap();

    assert_eq!(codes(&controller.items()), vec!["p1-0", "p1-1", "p1-3"]);
    assert!(matches!(streams.delete.try_recv(), Ok(DeleteState::Loading)));
    assert!(matches!(
        streams.delete.try_recv(),
        Ok(DeleteState::Success { position: 2, .. })
    ));
}

#[tokio::test]
async fn test_delete_failure_keeps_list() {
    let provider = ScriptedProvider::new()
        .page(1, 3, false)
        .delete_err("forbidden");
    let (controller, mut streams) = controller_for(provider);
    controller.refresh().await.unwrap();
    let before = controller.items();

    controller.delete_item("p1-0", 0).await.unwrap();

    assert_eq!(controller.items(), before);
    assert!(matches!(streams.delete.try_recv(), Ok(DeleteState::Loading)));
    assert!(matches!(streams.delete.try_recv(), Ok(DeleteState::Error(_))));
}

#[tokio::test]
async fn test_delete_out_of_range_position_still_reports_success() {
    let provider = ScriptedProvider::new().page(1, 1, false).delete_ok();
    let (controller, mut streams) = controller_for(provider);
    controller.refresh().await.unwrap();

    controller.delete_item("gone", 7).await.unwrap();

    assert_eq!(controller.items().len(), 1);
    streams.delete.try_recv().unwrap();
    assert!(matches!(
        streams.delete.try_recv(),
        Ok(DeleteState::Success { .. })
    ));
}

#[tokio::test]
async fn test_delete_sends_stored_token() {
    let provider = Arc::new(ScriptedProvider::new().delete_ok());
    let (controller, _streams) = PagedListController::new(
        Arc::clone(&provider) as Arc<dyn ListProvider>,
        Handle::current(),
        Lifecycle::new(),
    );
    controller.set_csrf_token(Some("abc".to_string()));

    controller.delete_item("x", 0).await.unwrap();

    assert_eq!(
        *provider.deleted.lock().unwrap(),
        vec![("x".to_string(), Some("abc".to_string()))]
    );
}

#[tokio::test]
async fn test_result_after_teardown_is_dropped() {
    let gate = Arc::new(Notify::new());
    let provider = ScriptedProvider::gated(Arc::clone(&gate)).page(1, 20, false);
    let (controller, mut streams) = controller_for(provider);

    let handle = controller.refresh();
    controller.owner().destroy();
    gate.notify_one();
    handle.await.unwrap();

    assert_eq!(drain_states(&mut streams.load), vec!["loading"]);
    assert!(controller.is_empty());
    assert_eq!(controller.page_cursor(), FIRST_PAGE);
}

#[tokio::test]
async fn test_stale_page_after_refresh_is_dropped() {
    let gate = Arc::new(Notify::new());
    let provider = ScriptedProvider::gated(Arc::clone(&gate))
        .page(2, 5, false)
        .page(1, 1, false);
    let (controller, mut streams) = controller_for(provider);

    controller.advance_page();
    let stale = controller.load_more();
    let fresh = controller.refresh();
    gate.notify_one();
    stale.await.unwrap();
    gate.notify_one();
    fresh.await.unwrap();

    assert_eq!(codes(&controller.items()), vec!["p1-0"]);
    assert_eq!(
        drain_states(&mut streams.load),
        vec!["loading", "loading", "success"]
    );
}

#[tokio::test]
async fn test_overlapping_deletes_remove_both_entries() {
    let first = Arc::new(Notify::new());
    let second = Arc::new(Notify::new());
    let provider = ScriptedProvider::new()
        .page_with(1, &["a", "b", "c"], false)
        .delete_ok()
        .delete_ok()
        .hold_delete("a", Arc::clone(&first))
        .hold_delete("b", Arc::clone(&second));
    let (controller, mut streams) = controller_for(provider);
    controller.refresh().await.unwrap();

    let delete_a = controller.delete_item("a", 0);
    let delete_b = controller.delete_item("b", 1);
    first.notify_one();
    delete_a.await.unwrap();
    second.notify_one();
    delete_b.await.unwrap();

    assert_eq!(codes(&controller.items()), vec!["c"]);
    let states: Vec<_> = std::iter::from_fn(|| streams.delete.try_recv().ok())
        .map(|state| state.name())
        .collect();
    assert_eq!(states, vec!["loading", "loading", "success", "success"]);
}

#[tokio::test]
async fn test_overlapping_deletes_finishing_in_reverse_order() {
    let first = Arc::new(Notify::new());
    let second = Arc::new(Notify::new());
    let provider = ScriptedProvider::new()
        .page_with(1, &["a", "b", "c"], false)
        .delete_ok()
        .delete_ok()
        .hold_delete("a", Arc::clone(&first))
        .hold_delete("b", Arc::clone(&second));
    let (controller, _streams) = controller_for(provider);
    controller.refresh().await.unwrap();

    let delete_a = controller.delete_item("a", 0);
    let delete_b = controller.delete_item("b", 1);
    second.notify_one();
    delete_b.await.unwrap();
    assert_eq!(codes(&controller.items()), vec!["a", "c"]);
    first.notify_one();
    delete_a.await.unwrap();

    assert_eq!(codes(&controller.items()), vec!["c"]);
}

#[tokio::test]
async fn test_delete_finishing_after_refresh_keeps_new_list() {
    let gate = Arc::new(Notify::new());
    let provider = ScriptedProvider::new()
        .page_with(1, &["a", "b", "c"], false)
        .page_with(1, &["b", "c"], false)
        .delete_ok()
        .hold_delete("a", Arc::clone(&gate));
    let (controller, mut streams) = controller_for(provider);
    controller.refresh().await.unwrap();

    let delete = controller.delete_item("a", 0);
    controller.refresh().await.unwrap();
    gate.notify_one();
    delete.await.unwrap();

    assert_eq!(codes(&controller.items()), vec!["b", "c"]);
    let last = std::iter::from_fn(|| streams.delete.try_recv().ok()).last();
    assert!(matches!(last, Some(DeleteState::Success { position: 0, .. })));
}

#[tokio::test]
async fn test_delete_never_removes_a_different_entry() {
    let provider = ScriptedProvider::new()
        .page_with(1, &["a", "b"], false)
        .delete_ok();
    let (controller, _streams) = controller_for(provider);
    controller.refresh().await.unwrap();

    controller.delete_item("z", 1).await.unwrap();

    assert_eq!(codes(&controller.items()), vec!["a", "b"]);
}

#[test]
fn test_locate_walks_back_from_position() {
    let items: Vec<_> = ["a", "b", "a", "c"]
        .iter()
        .map(|code| VideoSummary::new(*code, *code))
        .collect();

    assert_eq!(locate(&items, "a", 2), Some(2));
    assert_eq!(locate(&items, "a", 1), Some(0));
    assert_eq!(locate(&items, "c", 9), Some(3));
    assert_eq!(locate(&items, "c", 2), None);
    assert_eq!(locate(&[], "a", 0), None);
}
