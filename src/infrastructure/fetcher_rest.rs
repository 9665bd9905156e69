use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{Repository, RepositoryFetcher, StdResult};

/// The REST production endpoint for GitHub.
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

/// Fetcher error
#[derive(Error, Debug)]
pub enum FetchError {
    /// Parse error
    #[error("Parsing error: {0}")]
    Parse(String),
    /// Remote error
    #[error("Remote error: {0}")]
    Remote(String),
}

/// The payload of a search API response.
#[derive(Deserialize, Debug)]
struct SearchRepositoriesResponse {
    items: Vec<Repository>,
}

/// Fetches repository pages from the GitHub REST search API.
pub struct RestFetcher {
    client: Client,
    base_url: String,
    query: String,
    per_page: u16,
}

impl RestFetcher {
    /// Creates a new `RestFetcher` instance with the given endpoint, search
    /// query and page size. A bearer token is attached when the
    /// `GITHUB_API_TOKEN` environment variable is set; the search API also
    /// works anonymously, with lower rate limits.
    pub fn try_new(base_url: &str, query: &str, per_page: u16) -> StdResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Ok(token) = std::env::var("GITHUB_API_TOKEN") {
            let bearer_token = format!("Bearer {token}");
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&bearer_token)?);
        }
        let client = Client::builder()
            .user_agent("github-repolist")
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            query: query.to_string(),
            per_page,
        })
    }
}

#[async_trait::async_trait]
impl RepositoryFetcher for RestFetcher {
    async fn fetch_page(&self, page: u32) -> StdResult<Vec<Repository>> {
        let url = format!("{}/search/repositories", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", self.query.clone()),
                ("page", page.to_string()),
                ("per_page", self.per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Remote(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Remote(format!("Unexpected status code: {status}")).into());
        }
        let payload: SearchRepositoriesResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(payload.items)
    }
}
