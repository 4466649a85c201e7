use tracing::info;

use crate::domain::{Article, FeedSource};
use crate::services::normalize_service::{NormalizeService, NormalizeSettings};
use crate::services::translation_service::Translator;
use crate::sources::{FeedFetcher, FeedLoader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFailure {
    pub source: String,
    pub reason: String,
}

/// How a run ended, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Complete,
    Partial,
    Empty,
}

impl RunStatus {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Complete => 0,
            RunStatus::Partial => 2,
            RunStatus::Empty => 3,
        }
    }
}

#[derive(Debug, Default)]
pub struct DigestOutcome {
    pub articles: Vec<Article>,
    pub feed_failures: Vec<FeedFailure>,
    pub translation_failures: usize,
}

impl DigestOutcome {
    pub fn status(&self) -> RunStatus {
        if self.articles.is_empty() {
            RunStatus::Empty
        } else if !self.feed_failures.is_empty() || self.translation_failures > 0 {
            RunStatus::Partial
        } else {
            RunStatus::Complete
        }
    }
}

/// Runs the load and normalize stages for a list of sources.
pub struct DigestService<F: FeedFetcher> {
    loader: FeedLoader<F>,
    settings: NormalizeSettings,
    translator: Option<Box<dyn Translator>>,
    newest_first: bool,
}

impl<F: FeedFetcher> DigestService<F> {
    pub fn new(loader: FeedLoader<F>, settings: NormalizeSettings) -> Self {
        Self {
            loader,
            settings,
            translator: None,
            newest_first: true,
        }
    }

    pub fn with_translator(mut self, translator: Option<Box<dyn Translator>>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_newest_first(mut self, newest_first: bool) -> Self {
        self.newest_first = newest_first;
        self
    }

    pub fn run(&self, sources: &[FeedSource]) -> DigestOutcome {
        let batches = self.loader.load_all(sources);

        let feed_failures: Vec<FeedFailure> = batches
            .iter()
            .filter_map(|batch| {
                batch.error.as_ref().map(|e| FeedFailure {
                    source: batch.source.name.clone(),
                    reason: e.to_string(),
                })
            })
            .collect();

        let normalizer = NormalizeService::new(self.settings.clone(), self.translator.as_deref());
        let report = normalizer.normalize_all(&batches);

        let mut articles = report.articles;
        if self.newest_first {
            // Stable; undated articles sink to the end.
            articles.sort_by(|a, b| b.published.cmp(&a.published));
        }

        info!(
            articles = articles.len(),
            feed_failures = feed_failures.len(),
            translation_failures = report.translation_failures,
            "digest complete"
        );

        DigestOutcome {
            articles,
            feed_failures,
            translation_failures: report.translation_failures,
        }
    }
}
