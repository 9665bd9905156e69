use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use log::warn;
use tokio::time::timeout;

use crate::{Repository, RepositoryFetcher, StdResult};

/// A struct that bounds the duration of a single page fetch. The wrapped
/// fetcher has no timeout of its own; without this decorator a
/// non-responding fetch would keep the pager's in-flight flag set forever.
pub struct FetcherTimeout {
    /// The fetcher to be bounded.
    fetcher: Arc<dyn RepositoryFetcher>,

    /// The maximum duration of a single fetch.
    max_duration: Duration,
}

impl FetcherTimeout {
    /// Creates a new `FetcherTimeout` instance with the given maximum fetch duration.
    pub fn new(fetcher: Arc<dyn RepositoryFetcher>, max_duration: Duration) -> Self {
        Self {
            fetcher,
            max_duration,
        }
    }
}

#[async_trait::async_trait]
impl RepositoryFetcher for FetcherTimeout {
    /// Fails the fetch if it does not complete within the maximum duration.
    async fn fetch_page(&self, page: u32) -> StdResult<Vec<Repository>> {
        match timeout(self.max_duration, self.fetcher.fetch_page(page)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Fetch for page {page} timed out after {:?}", self.max_duration);
                Err(anyhow!(
                    "Fetch for page {page} timed out after {:?}",
                    self.max_duration
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use crate::MockRepositoryFetcher;

    use super::*;

    /// A fetcher that never completes within a test's patience.
    struct StalledFetcher;

    #[async_trait::async_trait]
    impl RepositoryFetcher for StalledFetcher {
        async fn fetch_page(&self, _page: u32) -> StdResult<Vec<Repository>> {
            sleep(Duration::from_secs(3600)).await;

            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn fetch_passes_through_when_within_the_deadline() {
        let fetcher = {
            let mut fetcher = MockRepositoryFetcher::new();
            fetcher
                .expect_fetch_page()
                .returning(|_| Ok(vec![Repository::dummy(1, "repository-1")]))
                .times(1);

            fetcher
        };
        let bounded = FetcherTimeout::new(Arc::new(fetcher), Duration::from_secs(1));

        let repositories = bounded.fetch_page(1).await.unwrap();

        assert_eq!(repositories.len(), 1);
    }

    #[tokio::test]
    async fn fetch_error_is_preserved() {
        let fetcher = {
            let mut fetcher = MockRepositoryFetcher::new();
            fetcher
                .expect_fetch_page()
                .returning(|_| Err(anyhow!("Error fetching data")))
                .times(1);

            fetcher
        };
        let bounded = FetcherTimeout::new(Arc::new(fetcher), Duration::from_secs(1));

        let error = bounded
            .fetch_page(1)
            .await
            .expect_err("Expected the inner error to surface");

        assert_eq!(error.to_string(), "Error fetching data");
    }

    #[tokio::test]
    async fn fetch_fails_when_the_deadline_expires() {
        let bounded = FetcherTimeout::new(Arc::new(StalledFetcher), Duration::from_millis(10));

        let error = bounded
            .fetch_page(2)
            .await
            .expect_err("Expected failure after the deadline");

        assert!(error.to_string().contains("timed out"));
        assert!(error.to_string().contains("page 2"));
    }
}
