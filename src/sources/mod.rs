pub mod traits;
pub mod rss_atom;
pub mod loader;
pub mod catalog;

pub use traits::FeedFetcher;
pub use rss_atom::RssAtomFetcher;
pub use loader::{FeedBatch, FeedLoader};
