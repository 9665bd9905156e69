use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::RwLock;

use crate::{PagerCallback, PagerConfig, Repository, RepositoryFetcher, RepositoryPager};

/// The mutable state of a paging session.
#[derive(Debug)]
struct PagerState {
    /// Accumulated repositories, in arrival order. Append-only.
    items: Vec<Repository>,

    /// The page the next fetch will target. Capped at the configured maximum.
    current_page: u32,

    /// Whether a fetch is currently in flight.
    is_fetching: bool,

    /// The message of the last failed fetch. Not cleared on success.
    last_error: Option<String>,
}

/// A pager that fetches pages ahead of user-visible scrolling.
///
/// Prefetch signals near the end of the accumulated list trigger the next
/// page fetch. The in-flight flag and the page ceiling are checked and the
/// flag is set under a single write lock acquisition, so at most one fetch
/// is outstanding even with concurrent callers.
///
/// A failed fetch does not advance the page: the next qualifying prefetch
/// signal retries the same page. This retry-by-recurrence is intentional,
/// there is no retry or backoff inside the pager.
pub struct PrefetchPager {
    fetcher: Arc<dyn RepositoryFetcher>,
    config: PagerConfig,
    state: RwLock<PagerState>,
    on_data_changed: RwLock<Option<PagerCallback>>,
    on_error: RwLock<Option<PagerCallback>>,
}

impl PrefetchPager {
    /// Creates a new `PrefetchPager` instance with the given fetcher and
    /// configuration. No fetch is issued until the presentation layer calls
    /// [`fetch_next_page`](RepositoryPager::fetch_next_page) or sends a
    /// qualifying prefetch signal.
    pub fn new(fetcher: Arc<dyn RepositoryFetcher>, config: PagerConfig) -> Self {
        let state = PagerState {
            items: Vec::new(),
            current_page: config.start_page,
            is_fetching: false,
            last_error: None,
        };

        Self {
            fetcher,
            config,
            state: RwLock::new(state),
            on_data_changed: RwLock::new(None),
            on_error: RwLock::new(None),
        }
    }

    /// Fetches the current page and applies the outcome. The caller must
    /// have set the in-flight flag; it is cleared here on both paths.
    async fn fetch_marked_page(&self) {
        let page = self.state.read().await.current_page;
        debug!("Fetching page {page}");
        match self.fetcher.fetch_page(page).await {
            Ok(repositories) => {
                info!("Fetched page {page}: {} repositories", repositories.len());
                {
                    let mut state = self.state.write().await;
                    state.items.extend(repositories);
                    if state.current_page < self.config.max_page {
                        state.current_page += 1;
                    }
                    state.is_fetching = false;
                }
                self.notify(&self.on_data_changed).await;
            }
            Err(error) => {
                warn!("Fetch for page {page} failed: {error}");
                {
                    let mut state = self.state.write().await;
                    state.last_error = Some(error.to_string());
                    state.is_fetching = false;
                }
                self.notify(&self.on_error).await;
            }
        }
    }

    /// Invokes the callback registered in the given slot, if any. Called
    /// after the state lock has been released so the subscriber may schedule
    /// a read of the full state.
    async fn notify(&self, slot: &RwLock<Option<PagerCallback>>) {
        let callback = slot.read().await;
        if let Some(callback) = callback.as_ref() {
            callback();
        }
    }
}

#[async_trait::async_trait]
impl RepositoryPager for PrefetchPager {
    async fn request_next_page_if_needed(&self, visible_indices: &[usize]) {
        {
            let mut state = self.state.write().await;
            if state.is_fetching || state.current_page >= self.config.max_page {
                return;
            }
            let near_end = visible_indices
                .iter()
                .any(|index| index + self.config.lookahead >= state.items.len());
            if !near_end {
                return;
            }
            state.is_fetching = true;
        }
        self.fetch_marked_page().await;
    }

    async fn fetch_next_page(&self) {
        {
            let mut state = self.state.write().await;
            if state.is_fetching {
                return;
            }
            state.is_fetching = true;
        }
        self.fetch_marked_page().await;
    }

    async fn repositories(&self) -> Vec<Repository> {
        let state = self.state.read().await;
        state.items.clone()
    }

    async fn last_error(&self) -> Option<String> {
        let state = self.state.read().await;
        state.last_error.clone()
    }

    async fn current_page(&self) -> u32 {
        let state = self.state.read().await;
        state.current_page
    }

    async fn is_fetching(&self) -> bool {
        let state = self.state.read().await;
        state.is_fetching
    }

    async fn set_on_data_changed(&self, callback: PagerCallback) {
        let mut slot = self.on_data_changed.write().await;
        *slot = Some(callback);
    }

    async fn set_on_error(&self, callback: PagerCallback) {
        let mut slot = self.on_error.write().await;
        *slot = Some(callback);
    }
}
