use tracing::{info, warn};

use crate::domain::{FeedSource, RawEntry};
use crate::errors::NewsboardError;
use crate::sources::traits::FeedFetcher;

/// Result of loading one source. A failed source carries its error and no entries.
#[derive(Debug)]
pub struct FeedBatch {
    pub source: FeedSource,
    pub entries: Vec<RawEntry>,
    pub error: Option<NewsboardError>,
}

impl FeedBatch {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

pub struct FeedLoader<F: FeedFetcher> {
    fetcher: F,
    per_source_limit: Option<usize>,
}

impl<F: FeedFetcher> FeedLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            per_source_limit: None,
        }
    }

    /// Keep at most `limit` entries from each feed
    pub fn with_per_source_limit(mut self, limit: Option<usize>) -> Self {
        self.per_source_limit = limit;
        self
    }

    /// Load a single source, never propagating its failure
    pub fn load(&self, source: &FeedSource) -> FeedBatch {
        match self.fetcher.fetch(source) {
            Ok(mut entries) => {
                if let Some(limit) = self.per_source_limit {
                    entries.truncate(limit);
                }
                info!(source = %source.name, count = entries.len(), "loaded feed");
                FeedBatch {
                    source: source.clone(),
                    entries,
                    error: None,
                }
            }
            Err(e) => {
                warn!(source = %source.name, url = %source.url, error = %e, "feed failed, skipping");
                FeedBatch {
                    source: source.clone(),
                    entries: Vec::new(),
                    error: Some(e),
                }
            }
        }
    }

    /// One batch per source, in source order
    pub fn load_all(&self, sources: &[FeedSource]) -> Vec<FeedBatch> {
        sources.iter().map(|source| self.load(source)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::traits::MockFeedFetcher;
    use mockall::predicate::*;

    fn entries(prefix: &str, count: usize) -> Vec<RawEntry> {
        (0..count)
            .map(|i| RawEntry::new(format!("{} {}", prefix, i), format!("https://{}/{}", prefix, i)))
            .collect()
    }

    #[test]
    fn test_one_batch_per_source_in_order() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|source| Ok(entries(&source.name, 2)));

        let loader = FeedLoader::new(fetcher);
        let sources = vec![
            FeedSource::new("a", "https://a/feed"),
            FeedSource::new("b", "https://b/feed"),
            FeedSource::new("c", "https://c/feed"),
        ];

        let batches = loader.load_all(&sources);

        assert_eq!(batches.len(), 3);
        let names: Vec<_> = batches.iter().map(|b| b.source.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(batches.iter().all(|b| b.entries.len() == 2 && !b.is_failed()));
    }

    #[test]
    fn test_failed_source_yields_empty_batch_and_continues() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .with(function(|s: &FeedSource| s.name == "broken"))
            .times(1)
            .returning(|_| Err(NewsboardError::FeedParse("bad xml".to_string())));
        fetcher
            .expect_fetch()
            .with(function(|s: &FeedSource| s.name != "broken"))
            .times(2)
            .returning(|source| Ok(entries(&source.name, 1)));

        let loader = FeedLoader::new(fetcher);
        let sources = vec![
            FeedSource::new("first", "https://first/feed"),
            FeedSource::new("broken", "https://broken/feed"),
            FeedSource::new("last", "https://last/feed"),
        ];

        let batches = loader.load_all(&sources);

        assert_eq!(batches.len(), 3);
        assert!(!batches[0].is_failed());
        assert!(batches[1].is_failed());
        assert!(batches[1].entries.is_empty());
        assert_eq!(batches[2].entries.len(), 1);
    }

    #[test]
    fn test_per_source_limit() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|source| Ok(entries(&source.name, 10)));

        let loader = FeedLoader::new(fetcher).with_per_source_limit(Some(4));
        let batch = loader.load(&FeedSource::new("a", "https://a/feed"));

        assert_eq!(batch.entries.len(), 4);
        assert_eq!(batch.entries[0].title, "a 0");
    }

    #[test]
    fn test_empty_source_list() {
        let fetcher = MockFeedFetcher::new();
        let loader = FeedLoader::new(fetcher);
        assert!(loader.load_all(&[]).is_empty());
    }
}
