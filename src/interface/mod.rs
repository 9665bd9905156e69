mod fetcher;
mod pager;

pub use fetcher::*;
pub use pager::*;
