use crate::Repository;

/// A level-triggered notification hook: the subscriber is expected to read
/// the pager's full state when invoked, it receives no delta.
pub type PagerCallback = Box<dyn Fn() + Send + Sync>;

/// A trait for driving incremental, page-based retrieval of a growing list
/// of repositories and exposing the accumulated state to a presentation
/// layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryPager: Sync + Send {
    /// Signals that the given item indices are about to become visible and
    /// triggers at most one fetch of the next page if any of them is close
    /// enough to the end of the accumulated list.
    async fn request_next_page_if_needed(&self, visible_indices: &[usize]);

    /// Fetches the current page, appends its records on success and records
    /// the error on failure. No-op while another fetch is in flight.
    async fn fetch_next_page(&self);

    /// Retrieves the accumulated repositories, in arrival order.
    async fn repositories(&self) -> Vec<Repository>;

    /// Retrieves the message of the last failed fetch, if any.
    async fn last_error(&self) -> Option<String>;

    /// Retrieves the page the next fetch will target.
    async fn current_page(&self) -> u32;

    /// Returns whether a fetch is currently in flight.
    async fn is_fetching(&self) -> bool;

    /// Registers the callback invoked after every successful fetch,
    /// replacing any previously registered one.
    async fn set_on_data_changed(&self, callback: PagerCallback);

    /// Registers the callback invoked after every failed fetch, replacing
    /// any previously registered one.
    async fn set_on_error(&self, callback: PagerCallback);
}
