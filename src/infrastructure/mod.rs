mod fetcher_rest;
mod fetcher_timeout;
mod pager_prefetch;

pub use fetcher_rest::*;
pub use fetcher_timeout::*;
pub use pager_prefetch::*;
