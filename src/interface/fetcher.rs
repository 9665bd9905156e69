use crate::{Repository, StdResult};

/// A trait for fetching one page of repository data from the API.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryFetcher: Sync + Send {
    /// Fetches the repositories of the given 1-indexed page from the API.
    async fn fetch_page(&self, page: u32) -> StdResult<Vec<Repository>>;
}
