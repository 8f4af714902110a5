//! crates/campus_console_core/src/list.rs
//!
//! The list-view controller shared by every management screen: one paginated
//! listing and one instant free-text search over the same collection, kept
//! consistent with the server across create/update/delete mutations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;
use uuid::Uuid;

use crate::domain::{Filter, Page, PageRequest, SortSpec};
use crate::ports::{ApiResult, ListSource};

//=========================================================================================
// ListState
//=========================================================================================

/// The combined state of one collection screen.
///
/// `page` and `matches` are both kept, but only one of them is displayed at a
/// time: the search result set while `active_query` is non-empty, the page
/// items otherwise.
#[derive(Debug)]
pub struct ListState<T> {
    pub page: Option<Page<T>>,
    pub matches: Vec<T>,
    pub active_query: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            page: None,
            matches: Vec::new(),
            active_query: String::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T: Clone> Clone for ListState<T> {
    fn clone(&self) -> Self {
        Self {
            page: self.page.clone(),
            matches: self.matches.clone(),
            active_query: self.active_query.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

impl<T: Clone> ListState<T> {
    /// The collection the screen should render right now.
    pub fn visible(&self) -> Vec<T> {
        if self.active_query.is_empty() {
            self.page
                .as_ref()
                .map(|page| page.items.clone())
                .unwrap_or_default()
        } else {
            self.matches.clone()
        }
    }
}

//=========================================================================================
// ListController
//=========================================================================================

/// Drives one `ListSource` for one screen. Each screen owns its own
/// controller; nothing is shared between collections.
pub struct ListController<S: ListSource> {
    source: Arc<S>,
    page_size: u32,
    sort: Option<SortSpec>,
    filters: Vec<Filter>,
    state: Mutex<ListState<S::Item>>,
    /// Monotonically increasing stamp for read requests. A response is only
    /// applied if no newer read has been issued since it started.
    read_generation: AtomicU64,
}

impl<S: ListSource> ListController<S>
where
    S::Item: Clone,
{
    pub fn new(source: Arc<S>, page_size: u32) -> Self {
        Self {
            source,
            page_size,
            sort: None,
            filters: Vec::new(),
            state: Mutex::new(ListState::default()),
            read_generation: AtomicU64::new(0),
        }
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    /// A copy of the current screen state.
    pub fn snapshot(&self) -> ListState<S::Item> {
        self.state.lock().expect("list state poisoned").clone()
    }

    /// Fetches the given zero-based page. While a search is active this is a
    /// no-op: search results are not paginated client-side.
    pub async fn go_to_page(&self, page_index: u32) {
        {
            let state = self.state.lock().expect("list state poisoned");
            if !state.active_query.is_empty() {
                return;
            }
        }
        self.read_page(page_index).await;
    }

    /// Switches between the paginated listing and the instant search.
    ///
    /// Repeating the currently active query is a no-op. A non-empty query runs
    /// the search and leaves the cached page untouched. Clearing the query
    /// always re-fetches page 0 from the server rather than restoring a cached
    /// page, so mutations performed during the search session are reflected.
    pub async fn set_query(&self, query: &str) {
        {
            let mut state = self.state.lock().expect("list state poisoned");
            if state.active_query == query {
                return;
            }
            state.active_query = query.to_string();
        }
        if query.is_empty() {
            self.read_page(0).await;
        } else {
            self.read_search(query).await;
        }
    }

    /// Re-runs whichever read currently backs the display. This is the retry
    /// affordance behind the error banner.
    pub async fn refresh(&self) {
        self.resynchronize().await;
    }

    pub async fn create(&self, payload: &S::Payload) -> ApiResult<S::Item> {
        let item = self.source.create(payload).await?;
        self.resynchronize().await;
        Ok(item)
    }

    pub async fn update(&self, id: Uuid, payload: &S::Payload) -> ApiResult<S::Item> {
        let item = self.source.update(id, payload).await?;
        self.resynchronize().await;
        Ok(item)
    }

    pub async fn remove(&self, id: Uuid) -> ApiResult<()> {
        self.source.remove(id).await?;
        self.resynchronize().await;
        Ok(())
    }

    /// Pulls the displayed collection back in line with the server after a
    /// successful mutation. The controller never patches `page.items` or the
    /// search results in place; the server stays the source of truth for
    /// element and page counts.
    async fn resynchronize(&self) {
        let (query, page_index) = {
            let state = self.state.lock().expect("list state poisoned");
            let page_index = state.page.as_ref().map(|page| page.page_index).unwrap_or(0);
            (state.active_query.clone(), page_index)
        };
        if query.is_empty() {
            self.read_page(page_index).await;
        } else {
            self.read_search(&query).await;
        }
    }

    fn begin_read(&self) -> u64 {
        let generation = self.read_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.lock().expect("list state poisoned");
        state.loading = true;
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.read_generation.load(Ordering::SeqCst) == generation
    }

    async fn read_page(&self, page_index: u32) {
        let generation = self.begin_read();
        let request = PageRequest {
            page_index,
            page_size: self.page_size,
            sort: self.sort.clone(),
            filters: self.filters.clone(),
        };
        let outcome = self.source.fetch_page(request).await;
        if !self.is_current(generation) {
            debug!(page_index, "discarding superseded page response");
            return;
        }
        let mut state = self.state.lock().expect("list state poisoned");
        state.loading = false;
        match outcome {
            Ok(page) => {
                state.page = Some(page);
                state.error = None;
            }
            // Keep the last good collection on screen; only raise the banner.
            Err(error) => state.error = Some(error.to_string()),
        }
    }

    async fn read_search(&self, query: &str) {
        let generation = self.begin_read();
        let outcome = self.source.search(query).await;
        if !self.is_current(generation) {
            debug!(query, "discarding superseded search response");
            return;
        }
        let mut state = self.state.lock().expect("list state poisoned");
        state.loading = false;
        match outcome {
            Ok(matches) => {
                state.matches = matches;
                state.error = None;
            }
            Err(error) => state.error = Some(error.to_string()),
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================
