//! List page controller: reload, search, paging and form mutations

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use shared::{
    AggregateTotals, LineItemSource, ListViewModel, PageInfo, Searchable, UnresolvedCost,
};
use tokio::sync::Mutex;

use crate::api::{ApiClient, EditableResource, Resource};
use crate::endpoints;
use crate::error::ClientResult;

/// What happened to the response of a reload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Records replaced the list contents
    Applied { records: usize },
    /// A newer reload started while this one was in flight
    Stale,
}

/// Keeps the in-flight counter raised while alive
struct LoadingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingGuard {
    fn new(in_flight: &Arc<AtomicUsize>) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            in_flight: Arc::clone(in_flight),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Controller behind one searchable, paginated list page.
///
/// Clones share the same view, flags and generation counter.
#[derive(Clone)]
pub struct ListController<R> {
    api: ApiClient,
    path: String,
    view: Arc<Mutex<ListViewModel<R>>>,
    generation: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
    last_error: Arc<StdMutex<Option<String>>>,
}

impl<R> ListController<R>
where
    R: Resource + Searchable,
{
    pub fn new(api: ApiClient, page_size: usize) -> Self {
        Self::with_path(api, endpoints::list(R::KIND), page_size)
    }

    /// List fed by a route other than the resource's list route
    pub fn with_path(api: ApiClient, path: impl Into<String>, page_size: usize) -> Self {
        Self {
            api,
            path: path.into(),
            view: Arc::new(Mutex::new(ListViewModel::new(page_size))),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            last_error: Arc::new(StdMutex::new(None)),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Whether any reload is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn last_error(&self) -> Option<String> {
        self.error_slot().clone()
    }

    /// Fetch the collection and replace the list contents.
    ///
    /// Only the most recently started reload may apply its response.
    pub async fn reload(&self) -> ClientResult<ReloadOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::new(&self.in_flight);

        let result = self.api.list_from::<R>(&self.path).await;

        let mut view = self.view.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale {} list response (generation {})", R::KIND, generation);
            return Ok(ReloadOutcome::Stale);
        }

        match result {
            Ok(records) => {
                let count = records.len();
                view.set_records(records);
                *self.error_slot() = None;
                Ok(ReloadOutcome::Applied { records: count })
            }
            Err(e) => {
                tracing::warn!("Failed to load {} list: {}", R::KIND, e);
                self.record(e.user_message());
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        match self.api.delete::<R>(id).await {
            Ok(()) => {
                tracing::info!("Deleted {} {}", R::KIND, id);
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                self.record(e.user_message());
                Err(e)
            }
        }
    }

    pub async fn set_search_term(&self, term: &str) {
        self.view.lock().await.set_search_term(term);
    }

    pub async fn go_to_page(&self, page: usize) {
        self.view.lock().await.go_to_page(page);
    }

    pub async fn next_page(&self) {
        self.view.lock().await.next_page();
    }

    pub async fn previous_page(&self) {
        self.view.lock().await.previous_page();
    }

    /// Rows of the current page
    pub async fn visible_page(&self) -> Vec<R> {
        self.view.lock().await.visible_page().into_iter().cloned().collect()
    }

    pub async fn page_info(&self) -> PageInfo {
        self.view.lock().await.page_info()
    }

    /// Record currently loaded with this id, e.g. to prefill an edit form
    pub async fn find(&self, id: i64) -> Option<R> {
        self.view
            .lock()
            .await
            .records()
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    /// Run `f` against the view model
    pub async fn with_view<T>(&self, f: impl FnOnce(&ListViewModel<R>) -> T) -> T {
        let view = self.view.lock().await;
        f(&view)
    }

    async fn reload_after_mutation(&self) {
        // The mutation succeeded; a failed reload is already recorded.
        let _ = self.reload().await;
    }

    fn record(&self, message: String) {
        *self.error_slot() = Some(message);
    }

    fn error_slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<R> ListController<R>
where
    R: EditableResource + Searchable,
{
    /// Validate and send a create form, then reload
    pub async fn create(&self, form: &R::Form) -> ClientResult<Option<R>> {
        match self.api.create::<R>(form).await {
            Ok(created) => {
                tracing::info!("Created {}", R::KIND);
                self.reload_after_mutation().await;
                Ok(created)
            }
            Err(e) => {
                self.record(e.user_message());
                Err(e)
            }
        }
    }

    /// Validate and send an update form, then reload
    pub async fn update(&self, id: i64, form: &R::Form) -> ClientResult<Option<R>> {
        match self.api.update::<R>(id, form).await {
            Ok(updated) => {
                tracing::info!("Updated {} {}", R::KIND, id);
                self.reload_after_mutation().await;
                Ok(updated)
            }
            Err(e) => {
                self.record(e.user_message());
                Err(e)
            }
        }
    }
}

impl<R> ListController<R>
where
    R: Resource + Searchable + LineItemSource,
{
    /// Totals over every loaded record, regardless of search and page
    pub async fn aggregate_totals(&self, policy: UnresolvedCost) -> AggregateTotals {
        self.view.lock().await.aggregate_totals(policy)
    }
}
