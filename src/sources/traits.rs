use crate::domain::{FeedSource, RawEntry};
use crate::errors::NewsboardResult;

#[cfg_attr(test, mockall::automock)]
pub trait FeedFetcher {
    /// Fetch and parse a feed, returning its entries in feed order
    fn fetch(&self, source: &FeedSource) -> NewsboardResult<Vec<RawEntry>>;
}
