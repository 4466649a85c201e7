use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A configured syndication feed. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
    /// Extra request headers, applied over the client defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// The feeds used when no sources file is given.
pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new("Gematsu", "https://gematsu.com/feed"),
        FeedSource::new("VG247", "https://www.vg247.com/feed"),
        FeedSource::new("Eurogamer", "https://www.eurogamer.net/feed"),
        FeedSource::new("IGN", "https://feeds.ign.com/ign/news"),
        FeedSource::new("GameSpot", "https://www.gamespot.com/feeds/news/"),
    ]
}

/// Human readable label for a set of sources, e.g. "IGN · GameSpot".
pub fn source_label(sources: &[FeedSource]) -> String {
    sources
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(" · ")
}
