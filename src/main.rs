use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use clap::Parser;
use log::{debug, info, warn};

use github_repolist::{
    FetcherTimeout, GITHUB_API_ENDPOINT, PagerConfig, PrefetchPager, RepositoryFetcher,
    RepositoryPager, RestFetcher, StdResult,
};

/// Command line arguments for the repository list browser
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Search query used to select repositories
    #[arg(short, long, default_value = "language:swift")]
    query: String,

    /// Number of repositories fetched per page
    #[arg(short, long, default_value_t = 30)]
    per_page: u16,

    /// Maximum page that may be fetched
    #[arg(short, long, default_value_t = 34)]
    max_page: u32,

    /// Distance from the end of the list at which the next page is prefetched
    #[arg(short, long, default_value_t = 5)]
    lookahead: usize,

    /// Timeout in seconds for a single page fetch (no timeout when omitted)
    #[arg(short, long)]
    fetch_timeout: Option<u64>,

    /// Number of pages to browse before exiting
    #[arg(short, long, default_value_t = 3)]
    total_pages: u32,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    info!("Starting repository browsing");
    let args = Args::parse();
    let pager = build_pager(&args)?;
    pager
        .set_on_data_changed(Box::new(|| debug!("Pager data changed")))
        .await;
    pager
        .set_on_error(Box::new(|| warn!("Pager reported an error")))
        .await;

    browse(pager.as_ref(), &args).await?;
    info!("Browsing completed");

    Ok(())
}

/// Plays the role of the presentation layer: issues prefetch signals as if
/// the user were scrolling to the bottom of the list and prints every newly
/// arrived repository.
async fn browse(pager: &dyn RepositoryPager, args: &Args) -> StdResult<()> {
    pager.fetch_next_page().await;
    let mut total_displayed = 0;
    loop {
        let repositories = pager.repositories().await;
        for repository in &repositories[total_displayed..] {
            info!("Fetched {repository}");
        }
        total_displayed = repositories.len();

        if let Some(error) = pager.last_error().await {
            return Err(anyhow!("Browsing aborted: {error}"));
        }
        let current_page = pager.current_page().await;
        if current_page > args.total_pages || current_page >= args.max_page {
            break;
        }
        pager
            .request_next_page_if_needed(&[total_displayed.saturating_sub(1)])
            .await;
    }

    Ok(())
}

fn build_pager(args: &Args) -> StdResult<Arc<dyn RepositoryPager>> {
    let mut fetcher: Arc<dyn RepositoryFetcher> = Arc::new(RestFetcher::try_new(
        GITHUB_API_ENDPOINT,
        &args.query,
        args.per_page,
    )?);
    if let Some(fetch_timeout) = args.fetch_timeout {
        fetcher = Arc::new(FetcherTimeout::new(
            fetcher,
            Duration::from_secs(fetch_timeout),
        ));
    }
    let config = PagerConfig {
        lookahead: args.lookahead,
        max_page: args.max_page,
        start_page: 1,
    };

    Ok(Arc::new(PrefetchPager::new(fetcher, config)))
}
